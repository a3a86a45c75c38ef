use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::components::Component;
use crate::theme;
use crate::ui::UiFrame;

/// Visual stand-in for a trigger region: a bordered box with a caption.
#[derive(Debug, Clone)]
pub struct RegionViewComponent {
    title: String,
    body: String,
    active: bool,
    disabled: bool,
}

impl RegionViewComponent {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            active: false,
            disabled: false,
        }
    }

    /// Highlight the border while this region's menu is open.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Component for RegionViewComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let border = if self.active {
            Style::default()
                .fg(theme::region_active_border())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::region_border())
        };
        let title = if self.disabled {
            format!("{} (locked)", self.title)
        } else {
            self.title.clone()
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border);
        let mut body = Style::default();
        if self.disabled {
            body = body.fg(theme::region_disabled_fg());
        }
        let paragraph = Paragraph::new(self.body.as_str())
            .style(body)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
