//! `MenuHost` over a terminal viewport.
//!
//! The document is a scrollable page larger than (or equal to) the visible
//! terminal area. Panels are kept by id and drawn on top of everything else
//! at the offsets the controller applied. Pointer input is translated
//! relative to the terminal origin, so the viewport is expected to start at
//! column 0.

use std::collections::BTreeMap;

use ratatui::layout::Rect;

use crate::components::{Component, MenuPanelComponent};
use crate::event::ElementId;
use crate::geometry::{PanelSize, PositionResult, Viewport};
use crate::host::MenuHost;
use crate::ui::UiFrame;

#[derive(Debug, Clone, Default)]
pub struct TerminalDocument {
    /// Visible area of the terminal the page is drawn into.
    viewport: Rect,
    /// Full page extent, in cells.
    page_width: u16,
    page_height: u16,
    scroll_x: u16,
    scroll_y: u16,
    panels: BTreeMap<ElementId, MenuPanelComponent>,
}

impl TerminalDocument {
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            page_width: viewport.width,
            page_height: viewport.height,
            ..Self::default()
        }
    }

    /// Grow the page beyond the viewport so it can scroll.
    pub fn with_page_size(mut self, width: u16, height: u16) -> Self {
        self.page_width = width;
        self.page_height = height;
        self.clamp_scroll();
        self
    }

    pub fn viewport_rect(&self) -> Rect {
        self.viewport
    }

    pub fn set_viewport_rect(&mut self, viewport: Rect) {
        self.viewport = viewport;
        self.clamp_scroll();
    }

    pub fn scroll(&self) -> (u16, u16) {
        (self.scroll_x, self.scroll_y)
    }

    /// Scroll by a signed delta, clamped to the page extent.
    pub fn scroll_by(&mut self, dx: i32, dy: i32) {
        let (max_x, max_y) = self.max_scroll();
        self.scroll_x = offset_by(self.scroll_x, dx, max_x);
        self.scroll_y = offset_by(self.scroll_y, dy, max_y);
    }

    fn max_scroll(&self) -> (u16, u16) {
        (
            self.page_width.saturating_sub(self.viewport.width),
            self.page_height.saturating_sub(self.viewport.height),
        )
    }

    fn clamp_scroll(&mut self) {
        let (max_x, max_y) = self.max_scroll();
        self.scroll_x = self.scroll_x.min(max_x);
        self.scroll_y = self.scroll_y.min(max_y);
    }

    /// Screen rect of a page-space rect, clipped to the viewport.
    pub fn to_screen(&self, page: Rect) -> Option<Rect> {
        let x = i32::from(page.x) - i32::from(self.scroll_x) + i32::from(self.viewport.x);
        let y = i32::from(page.y) - i32::from(self.scroll_y) + i32::from(self.viewport.y);
        let right = (x + i32::from(page.width)).min(i32::from(self.viewport.right()));
        let bottom = (y + i32::from(page.height)).min(i32::from(self.viewport.bottom()));
        let x = x.max(i32::from(self.viewport.x));
        let y = y.max(i32::from(self.viewport.y));
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

    pub fn add_panel(&mut self, id: impl Into<ElementId>, panel: MenuPanelComponent) {
        self.panels.insert(id.into(), panel);
    }

    pub fn panel(&self, id: &ElementId) -> Option<&MenuPanelComponent> {
        self.panels.get(id)
    }

    pub fn panel_mut(&mut self, id: &ElementId) -> Option<&mut MenuPanelComponent> {
        self.panels.get_mut(id)
    }

    /// Panels currently carrying the open marking.
    pub fn open_panels(&self) -> impl Iterator<Item = (&ElementId, &MenuPanelComponent)> {
        self.panels.iter().filter(|(_, panel)| panel.is_open())
    }

    /// The open panel drawn at a screen cell, with the item under it.
    pub fn panel_hit(&self, column: u16, row: u16) -> Option<(&ElementId, Option<usize>)> {
        self.open_panels()
            .find(|(_, panel)| panel.contains(column, row))
            .map(|(id, panel)| (id, panel.item_at(column, row)))
    }

    /// Highlight the item under a screen cell in whichever panel is open.
    pub fn hover(&mut self, column: u16, row: u16) {
        for panel in self.panels.values_mut().filter(|panel| panel.is_open()) {
            panel.hover(column, row);
        }
    }

    /// Draw every open panel over the viewport.
    pub fn render_panels(&mut self, frame: &mut UiFrame<'_>) {
        let area = self.viewport;
        for panel in self.panels.values_mut() {
            panel.render(frame, area);
        }
    }
}

fn offset_by(current: u16, delta: i32, max: u16) -> u16 {
    let target = i32::from(current).saturating_add(delta).clamp(0, i32::from(max));
    u16::try_from(target).unwrap_or(max)
}

impl MenuHost for TerminalDocument {
    fn viewport(&self) -> Viewport {
        Viewport::new(
            i32::from(self.viewport.width),
            i32::from(self.viewport.height),
        )
        .with_scroll(i32::from(self.scroll_x), i32::from(self.scroll_y))
    }

    fn resolve_panel(&self, id: &str) -> Option<ElementId> {
        let id = ElementId::new(id);
        self.panels.contains_key(&id).then_some(id)
    }

    fn panel_size(&self, panel: &ElementId) -> Option<PanelSize> {
        self.panels.get(panel).map(MenuPanelComponent::natural_size)
    }

    fn place_panel(&mut self, panel: &ElementId, position: PositionResult) {
        if let Some(panel) = self.panels.get_mut(panel) {
            panel.set_position(position);
        }
    }

    fn set_panel_open(&mut self, panel: &ElementId, open: bool) {
        if let Some(panel) = self.panels.get_mut(panel) {
            panel.set_open(open);
        }
    }

    fn panel_at(&self, page_x: i32, page_y: i32) -> Option<ElementId> {
        let column = u16::try_from(page_x - i32::from(self.scroll_x)).ok()?;
        let row = u16::try_from(page_y - i32::from(self.scroll_y)).ok()?;
        self.open_panels()
            .find(|(_, panel)| {
                panel.placed_rect(self.viewport).is_some_and(|rect| {
                    (rect.x..rect.right()).contains(&column)
                        && (rect.y..rect.bottom()).contains(&row)
                })
            })
            .map(|(id, _)| id.clone())
    }
}
