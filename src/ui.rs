//! UiFrame: a thin wrapper around `ratatui::Frame` that clips drawing to the
//! visible area.
//!
//! Menu panels are placed from signed offsets and may be larger than the
//! terminal; routing every draw through `UiFrame` keeps those writes inside
//! the buffer.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use crate::geometry::PositionResult;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Render into an arbitrary buffer, e.g. an offscreen one in tests.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        let clipped = area.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            return;
        }
        widget.render(clipped, self.buffer);
    }
}

/// Screen rectangle for a panel placed at `position` inside `viewport`,
/// clipped to the viewport. `None` when nothing of it is visible.
pub fn placed_rect(viewport: Rect, position: PositionResult, width: u16, height: u16) -> Option<Rect> {
    let x = i32::from(viewport.x) + position.left;
    let y = i32::from(viewport.y) + position.top;
    let right = (x + i32::from(width)).min(i32::from(viewport.right()));
    let bottom = (y + i32::from(height)).min(i32::from(viewport.bottom()));
    let x = x.max(i32::from(viewport.x));
    let y = y.max(i32::from(viewport.y));
    if right <= x || bottom <= y {
        return None;
    }
    Some(Rect {
        x: x as u16,
        y: y as u16,
        width: (right - x) as u16,
        height: (bottom - y) as u16,
    })
}
