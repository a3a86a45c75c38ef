//! Shared crate-wide constants.

/// Attribute naming the id of the menu panel a trigger region controls.
pub const ATTR_TARGET: &str = "context-menu-target";

/// Short alias for [`ATTR_TARGET`] accepted by `TriggerOptions::from_attributes`.
pub const ATTR_TARGET_SHORT: &str = "target";

/// Attribute carrying the bottom margin kept between an overflowing panel and
/// the bottom edge of the viewport.
///
/// Units: the host's coordinate unit (terminal rows for terminal hosts).
/// Only applied when the panel would otherwise overflow vertically.
pub const ATTR_MARGIN_BOTTOM: &str = "context-menu-margin-bottom";

/// Bottom margin used when none is configured.
pub const DEFAULT_MARGIN_BOTTOM: i32 = 0;

/// Element id reported as the event target when a pointer lands outside every
/// attached trigger region.
pub const DOCUMENT_ELEMENT_ID: &str = "document";
