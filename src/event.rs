//! Document-level event vocabulary.
//!
//! Buttons and key codes are crossterm's, so terminal hosts can feed their
//! input straight through while other hosts construct events by hand.

use std::fmt;

use crossterm::event::{KeyCode, MouseButton};

use crate::constants::DOCUMENT_ELEMENT_ID;

/// Identifier of an element in the host document (a trigger region, a
/// panel, or the document itself).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id used for pointer events that hit no trigger region.
    pub fn document() -> Self {
        Self(DOCUMENT_ELEMENT_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A pointer press in page coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent {
    pub page_x: i32,
    pub page_y: i32,
    pub button: MouseButton,
    /// Element that received the event.
    pub target: ElementId,
}

impl PointerEvent {
    pub fn new(page_x: i32, page_y: i32, button: MouseButton, target: impl Into<ElementId>) -> Self {
        Self {
            page_x,
            page_y,
            button,
            target: target.into(),
        }
    }

    pub fn is_right_button(&self) -> bool {
        self.button == MouseButton::Right
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentEventKind {
    Click,
    ContextMenu,
    KeyUp,
}

/// Events delivered to document-level listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    Click(PointerEvent),
    ContextMenu(PointerEvent),
    KeyUp(KeyCode),
}

impl DocumentEvent {
    pub fn kind(&self) -> DocumentEventKind {
        match self {
            DocumentEvent::Click(_) => DocumentEventKind::Click,
            DocumentEvent::ContextMenu(_) => DocumentEventKind::ContextMenu,
            DocumentEvent::KeyUp(_) => DocumentEventKind::KeyUp,
        }
    }
}

/// What a trigger region did with a contextmenu event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Default action and propagation suppressed; the event must not bubble
    /// to document listeners.
    Consumed,
    /// The region is disabled or absent; the event continues normally.
    Ignored,
}

impl EventOutcome {
    pub fn prevent_default(self) -> bool {
        matches!(self, EventOutcome::Consumed)
    }

    pub fn stop_propagation(self) -> bool {
        matches!(self, EventOutcome::Consumed)
    }
}
