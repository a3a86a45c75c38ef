use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::theme;
use crate::ui::UiFrame;

/// One-line bar: last menu activity on the left, key hints on the right.
pub struct StatusBar {
    left: String,
    right: String,
    style: Style,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            left: String::new(),
            right: String::new(),
            style: Style::default().fg(theme::status_fg()).bg(theme::status_bg()),
        }
    }

    pub fn set_left<T: Into<String>>(&mut self, value: T) {
        self.left = value.into();
    }

    pub fn set_right<T: Into<String>>(&mut self, value: T) {
        self.right = value.into();
    }

    pub fn left(&self) -> &str {
        &self.left
    }

    /// Compose the bar for `width` cells. The right text is dropped when the
    /// two would overlap.
    fn compose(&self, width: usize) -> String {
        let left: String = self.left.chars().take(width).collect();
        let used = left.chars().count();
        let right_width = self.right.chars().count();
        if right_width == 0 || used + 1 + right_width > width {
            return left;
        }
        let gap = width - used - right_width;
        format!("{left}{}{}", " ".repeat(gap), self.right)
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Component for StatusBar {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let line = Line::from(Span::raw(self.compose(area.width as usize)));
        frame.render_widget(Paragraph::new(line).style(self.style), area);
    }
}
