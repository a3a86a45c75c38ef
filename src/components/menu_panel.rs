use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem};

use crate::components::Component;
use crate::geometry::{PanelSize, PositionResult};
use crate::theme;
use crate::ui::{UiFrame, placed_rect};

/// A bordered list of menu items the controller shows and hides.
///
/// The panel never decides its own placement: it carries the "open" marking
/// and the offsets applied by the controller, and sizes itself from its
/// content so the controller can measure it.
#[derive(Debug, Clone, Default)]
pub struct MenuPanelComponent {
    title: String,
    items: Vec<String>,
    selected: Option<usize>,
    open: bool,
    position: PositionResult,
    /// Screen rect from the last render, used for item hit-testing.
    rendered: Option<Rect>,
}

impl MenuPanelComponent {
    pub fn new<T: Into<String>>(title: T) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_items(items);
        self
    }

    pub fn set_title<T: Into<String>>(&mut self, title: T) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self.selected = None;
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
        if !open {
            self.selected = None;
            self.rendered = None;
        }
    }

    pub fn position(&self) -> PositionResult {
        self.position
    }

    pub fn set_position(&mut self, position: PositionResult) {
        self.position = position;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Highlight the item under a screen cell, if any.
    pub fn hover(&mut self, column: u16, row: u16) {
        self.selected = self.item_at(column, row);
    }

    /// Natural size: widest line plus borders and one cell of padding on
    /// each side, one row per item plus borders.
    pub fn natural_size(&self) -> PanelSize {
        let widest = self
            .items
            .iter()
            .map(|item| item.chars().count())
            .chain(std::iter::once(self.title.chars().count()))
            .max()
            .unwrap_or(0);
        PanelSize::new(widest as i32 + 4, self.items.len() as i32 + 2)
    }

    /// Screen rect the panel occupies inside `viewport` at its current
    /// offsets, whether or not it has been drawn yet.
    pub fn placed_rect(&self, viewport: Rect) -> Option<Rect> {
        let size = self.natural_size();
        placed_rect(
            viewport,
            self.position,
            u16::try_from(size.width).unwrap_or(u16::MAX),
            u16::try_from(size.height).unwrap_or(u16::MAX),
        )
    }

    /// Index of the item drawn at a screen cell during the last render.
    pub fn item_at(&self, column: u16, row: u16) -> Option<usize> {
        let rect = self.rendered?;
        let inner_x = rect.x.saturating_add(1)..rect.right().saturating_sub(1);
        let inner_y = rect.y.saturating_add(1)..rect.bottom().saturating_sub(1);
        if !inner_x.contains(&column) || !inner_y.contains(&row) {
            return None;
        }
        let index = usize::from(row - inner_y.start);
        (index < self.items.len()).then_some(index)
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.rendered.is_some_and(|rect| {
            (rect.x..rect.right()).contains(&column) && (rect.y..rect.bottom()).contains(&row)
        })
    }
}

impl Component for MenuPanelComponent {
    /// `area` is the visible viewport the offsets are relative to.
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        if !self.open || area.width == 0 || area.height == 0 {
            self.rendered = None;
            return;
        }
        let Some(rect) = self.placed_rect(area) else {
            self.rendered = None;
            return;
        };
        self.rendered = Some(rect);

        let base = Style::default().fg(theme::menu_fg()).bg(theme::menu_bg());
        let selected = Style::default()
            .fg(theme::menu_selected_fg())
            .bg(theme::menu_selected_bg())
            .add_modifier(Modifier::BOLD);
        let items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let style = if Some(idx) == self.selected {
                    selected
                } else {
                    base
                };
                ListItem::new(Line::from(format!(" {item} "))).style(style)
            })
            .collect();
        let block = Block::default()
            .title(self.title.as_str())
            .borders(Borders::ALL)
            .style(base);
        frame.render_widget(Clear, rect);
        frame.render_widget(List::new(items).block(block), rect);
    }
}
