//! The surface a context menu controller drives.
//!
//! A host owns the actual panel elements. Controllers only ever talk to it
//! through this trait, so the same state machine runs against a terminal
//! buffer, a test double, or anything else that can measure and place a
//! panel.

use crate::event::ElementId;
use crate::geometry::{PanelSize, PositionResult, Viewport};

pub trait MenuHost {
    /// Current scroll and client metrics of the visible viewport.
    fn viewport(&self) -> Viewport;

    /// Look up a panel by its configured id. `None` when the document has no
    /// such element.
    fn resolve_panel(&self, id: &str) -> Option<ElementId>;

    /// Natural rendered size of `panel`, measured after any content changes
    /// made by the trigger callback.
    fn panel_size(&self, panel: &ElementId) -> Option<PanelSize>;

    /// Apply absolute offsets to `panel`.
    fn place_panel(&mut self, panel: &ElementId, position: PositionResult);

    /// Toggle the visual "open" marking on `panel`.
    fn set_panel_open(&mut self, panel: &ElementId, open: bool);

    /// The open panel covering a page point, if any. Hosts whose panels
    /// never overlap trigger regions can keep the default.
    fn panel_at(&self, _page_x: i32, _page_y: i32) -> Option<ElementId> {
        None
    }
}
