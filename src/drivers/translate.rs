//! Translation of raw terminal input into document events.
//!
//! Terminal coordinates are relative to the visible viewport; the scroll
//! offsets of the viewport are added so every pointer event leaves here in
//! page coordinates.

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};

use crate::geometry::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Click,
    ContextMenu,
}

/// A pointer press that has not yet been hit-tested against regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerInput {
    pub kind: PointerKind,
    pub page_x: i32,
    pub page_y: i32,
    pub button: MouseButton,
}

impl PointerInput {
    pub fn click(page_x: i32, page_y: i32, button: MouseButton) -> Self {
        Self {
            kind: PointerKind::Click,
            page_x,
            page_y,
            button,
        }
    }

    pub fn context_menu(page_x: i32, page_y: i32) -> Self {
        Self {
            kind: PointerKind::ContextMenu,
            page_x,
            page_y,
            button: MouseButton::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Pointer(PointerInput),
    /// A key that finished its press. Terminals rarely report releases, so
    /// the press stands in for key-up.
    Key(KeyCode),
    Resize(u16, u16),
}

/// Map one terminal event to document input. Drags, moves, scroll wheel,
/// button releases, key releases and key repeats yield `None`.
pub fn translate_event(event: &Event, viewport: &Viewport) -> Option<Input> {
    match event {
        Event::Mouse(mouse) => {
            let MouseEventKind::Down(button) = mouse.kind else {
                return None;
            };
            let page_x = i32::from(mouse.column) + viewport.page_x_offset;
            let page_y = i32::from(mouse.row) + viewport.page_y_offset;
            let pointer = match button {
                MouseButton::Right => PointerInput::context_menu(page_x, page_y),
                other => PointerInput::click(page_x, page_y, other),
            };
            Some(Input::Pointer(pointer))
        }
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(Input::Key(key.code)),
        Event::Resize(width, height) => Some(Input::Resize(*width, *height)),
        _ => None,
    }
}
