//! Trigger region configuration.
//!
//! Options can be built directly or parsed from the declarative attribute
//! pairs a host attaches to a region (`context-menu-target`,
//! `context-menu-margin-bottom`).

use std::num::ParseIntError;

use thiserror::Error;

use crate::constants::{ATTR_MARGIN_BOTTOM, ATTR_TARGET, ATTR_TARGET_SHORT, DEFAULT_MARGIN_BOTTOM};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing `context-menu-target` attribute naming the menu panel")]
    MissingTarget,
    #[error("invalid `context-menu-margin-bottom` value {value:?}: {source}")]
    InvalidMarginBottom {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerOptions {
    target: String,
    margin_bottom: i32,
}

impl TriggerOptions {
    /// Options controlling the panel with id `target`.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            margin_bottom: DEFAULT_MARGIN_BOTTOM,
        }
    }

    pub fn with_margin_bottom(mut self, margin_bottom: i32) -> Self {
        self.margin_bottom = margin_bottom;
        self
    }

    /// Parse options from attribute pairs. Unknown attributes are ignored;
    /// when a key repeats, the last value wins.
    pub fn from_attributes<'a, I>(attrs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut target = None;
        let mut margin_bottom = DEFAULT_MARGIN_BOTTOM;
        for (key, value) in attrs {
            match key {
                ATTR_TARGET | ATTR_TARGET_SHORT => target = Some(value.trim()),
                ATTR_MARGIN_BOTTOM => margin_bottom = parse_margin(value)?,
                _ => {}
            }
        }
        let target = target
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingTarget)?;
        Ok(Self::new(target).with_margin_bottom(margin_bottom))
    }

    /// Id of the panel this trigger opens.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn margin_bottom(&self) -> i32 {
        self.margin_bottom
    }
}

fn parse_margin(value: &str) -> Result<i32, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(DEFAULT_MARGIN_BOTTOM);
    }
    value
        .parse()
        .map_err(|source| ConfigError::InvalidMarginBottom {
            value: value.to_string(),
            source,
        })
}
