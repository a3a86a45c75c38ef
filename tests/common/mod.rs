#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use ratatui::layout::Rect;
use term_context_menu::{
    ElementId, MenuHost, PanelSize, PointerEvent, PositionResult, TriggerCallbacks, Viewport,
};

/// Shared, ordered record of everything the callbacks saw.
pub type Journal = Rc<RefCell<Vec<String>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.borrow().clone()
}

/// Host that keeps panels in memory and records every mutation.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub viewport: Viewport,
    pub sizes: BTreeMap<String, PanelSize>,
    pub marked: BTreeSet<String>,
    pub positions: BTreeMap<String, PositionResult>,
    /// (panel, open) in call order.
    pub markings: Vec<(String, bool)>,
    /// Page-space area an open panel covers for hit-testing.
    pub covering: Option<(String, Rect)>,
}

impl RecordingHost {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            ..Self::default()
        }
    }

    pub fn with_panel(mut self, id: &str, width: i32, height: i32) -> Self {
        self.sizes.insert(id.to_string(), PanelSize::new(width, height));
        self
    }

    pub fn position(&self, id: &str) -> Option<PositionResult> {
        self.positions.get(id).copied()
    }
}

impl MenuHost for RecordingHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resolve_panel(&self, id: &str) -> Option<ElementId> {
        self.sizes.contains_key(id).then(|| ElementId::new(id))
    }

    fn panel_size(&self, panel: &ElementId) -> Option<PanelSize> {
        self.sizes.get(panel.as_str()).copied()
    }

    fn place_panel(&mut self, panel: &ElementId, position: PositionResult) {
        self.positions.insert(panel.to_string(), position);
    }

    fn panel_at(&self, page_x: i32, page_y: i32) -> Option<ElementId> {
        let (id, area) = self.covering.as_ref()?;
        let inside = page_x >= i32::from(area.x)
            && page_y >= i32::from(area.y)
            && page_x < i32::from(area.right())
            && page_y < i32::from(area.bottom());
        (inside && self.marked.contains(id)).then(|| ElementId::new(id.as_str()))
    }

    fn set_panel_open(&mut self, panel: &ElementId, open: bool) {
        self.markings.push((panel.to_string(), open));
        if open {
            self.marked.insert(panel.to_string());
        } else {
            self.marked.remove(panel.as_str());
        }
    }
}

/// Callbacks that write `"<name>:trigger"` and `"<name>:close"` entries.
pub fn journaling(name: &'static str, journal: &Journal) -> TriggerCallbacks<RecordingHost> {
    let on_trigger = Rc::clone(journal);
    let on_close = Rc::clone(journal);
    TriggerCallbacks::new()
        .on_trigger(move |_host: &mut RecordingHost, _event: &PointerEvent| {
            on_trigger.borrow_mut().push(format!("{name}:trigger"));
        })
        .on_close(move |_host: &mut RecordingHost| {
            on_close.borrow_mut().push(format!("{name}:close"));
        })
}

pub fn rect(x: u16, y: u16, width: u16, height: u16) -> Rect {
    Rect {
        x,
        y,
        width,
        height,
    }
}
