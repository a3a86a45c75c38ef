//! A page of trigger regions sharing one open-menu registry.
//!
//! `ContextMenuPage` plays the part of the document: it owns the registry
//! and the document-level listener table, hit-tests pointer input against
//! the attached regions, and delivers each event in two phases. The region
//! under the pointer sees a contextmenu first; unless it consumes the event
//! the document listeners see it next.

use std::fmt;
use std::rc::Rc;

use crossterm::event::{Event, KeyCode};
use ratatui::layout::Rect;

use crate::config::TriggerOptions;
use crate::controller::{TriggerCallbacks, TriggerController};
use crate::drivers::translate::{Input, PointerInput, PointerKind, translate_event};
use crate::event::{DocumentEvent, ElementId, EventOutcome, PointerEvent};
use crate::host::MenuHost;
use crate::listeners::DocumentListeners;
use crate::registry::OpenMenuRegistry;

struct TriggerRegion<H: MenuHost + 'static> {
    id: ElementId,
    /// Page coordinates.
    area: Rect,
    controller: TriggerController<H>,
}

pub struct ContextMenuPage<H: MenuHost + 'static> {
    registry: Rc<OpenMenuRegistry<H>>,
    document: DocumentListeners<H>,
    /// Attachment order; later regions sit on top.
    regions: Vec<TriggerRegion<H>>,
}

impl<H: MenuHost + 'static> ContextMenuPage<H> {
    pub fn new() -> Self {
        Self::with_registry(OpenMenuRegistry::shared())
    }

    /// A page coordinating through an existing registry, e.g. one shared
    /// with triggers managed elsewhere.
    pub fn with_registry(registry: Rc<OpenMenuRegistry<H>>) -> Self {
        Self {
            registry,
            document: DocumentListeners::new(),
            regions: Vec::new(),
        }
    }

    /// Attach a trigger region covering `area` (page coordinates). An
    /// existing region with the same id is detached first.
    pub fn attach(
        &mut self,
        id: impl Into<ElementId>,
        area: Rect,
        options: TriggerOptions,
        callbacks: TriggerCallbacks<H>,
    ) -> &TriggerController<H> {
        let id = id.into();
        self.detach(&id);
        let controller = TriggerController::new(
            id.clone(),
            options,
            callbacks,
            Rc::clone(&self.registry),
            &self.document,
        );
        tracing::debug!(region = %id, ?area, "attached trigger region");
        self.regions.push(TriggerRegion {
            id,
            area,
            controller,
        });
        let last = self.regions.len() - 1;
        &self.regions[last].controller
    }

    /// Detach a region, releasing its listeners. Its menu, if open, stays
    /// open until another trigger on the page claims the registry.
    pub fn detach(&mut self, id: &ElementId) -> bool {
        let before = self.regions.len();
        self.regions.retain(|region| &region.id != id);
        let removed = self.regions.len() != before;
        if removed {
            tracing::debug!(region = %id, "detached trigger region");
        }
        removed
    }

    pub fn set_region_area(&mut self, id: &ElementId, area: Rect) -> bool {
        match self.regions.iter_mut().find(|region| &region.id == id) {
            Some(region) => {
                region.area = area;
                true
            }
            None => false,
        }
    }

    pub fn region_area(&self, id: &ElementId) -> Option<Rect> {
        self.find(id).map(|region| region.area)
    }

    /// Topmost region containing the page point.
    pub fn region_at(&self, page_x: i32, page_y: i32) -> Option<&ElementId> {
        self.regions
            .iter()
            .rev()
            .find(|region| contains(region.area, page_x, page_y))
            .map(|region| &region.id)
    }

    pub fn controller(&self, id: &ElementId) -> Option<&TriggerController<H>> {
        self.find(id).map(|region| &region.controller)
    }

    pub fn regions(&self) -> impl Iterator<Item = (&ElementId, Rect)> {
        self.regions.iter().map(|region| (&region.id, region.area))
    }

    pub fn is_open(&self, id: &ElementId) -> bool {
        self.controller(id).is_some_and(TriggerController::is_open)
    }

    /// The region whose menu is currently open, if any.
    pub fn open_region(&self) -> Option<&ElementId> {
        self.regions
            .iter()
            .find(|region| region.controller.is_open())
            .map(|region| &region.id)
    }

    /// Close whichever menu is open, e.g. after an item was chosen.
    pub fn close_open_menu(&self, host: &mut H) {
        if let Some(owner) = self.registry.active_owner() {
            owner.close_menu(host);
        }
    }

    pub fn registry(&self) -> &Rc<OpenMenuRegistry<H>> {
        &self.registry
    }

    pub fn document(&self) -> &DocumentListeners<H> {
        &self.document
    }

    /// Deliver a pointer press: contextmenu goes to the region under the
    /// pointer first, then bubbles to the document unless consumed; clicks
    /// go straight to the document. Presses on an open panel skip the
    /// regions and reach the document with the panel as their target.
    pub fn dispatch_pointer(&self, host: &mut H, input: PointerInput) -> EventOutcome {
        let over_panel = host.panel_at(input.page_x, input.page_y);
        let hit = match over_panel {
            Some(_) => None,
            None => self
                .regions
                .iter()
                .rev()
                .find(|region| contains(region.area, input.page_x, input.page_y)),
        };
        let target = over_panel
            .or_else(|| hit.map(|region| region.id.clone()))
            .unwrap_or_else(ElementId::document);
        let event = PointerEvent::new(input.page_x, input.page_y, input.button, target);

        match input.kind {
            PointerKind::ContextMenu => {
                if let Some(region) = hit {
                    let outcome = region.controller.handle_context_menu(host, &event);
                    if outcome.stop_propagation() {
                        return outcome;
                    }
                }
                self.document
                    .dispatch(host, &DocumentEvent::ContextMenu(event));
            }
            PointerKind::Click => {
                self.document.dispatch(host, &DocumentEvent::Click(event));
            }
        }
        EventOutcome::Ignored
    }

    pub fn dispatch_key(&self, host: &mut H, code: KeyCode) {
        self.document.dispatch(host, &DocumentEvent::KeyUp(code));
    }

    /// Translate a terminal event against the host's viewport and deliver
    /// it. Returns the translated input so callers can react to resizes and
    /// keys themselves; `None` when the event carries nothing for the page.
    pub fn handle_event(&self, host: &mut H, event: &Event) -> Option<Input> {
        let input = translate_event(event, &host.viewport())?;
        match input {
            Input::Pointer(pointer) => {
                self.dispatch_pointer(host, pointer);
            }
            Input::Key(code) => self.dispatch_key(host, code),
            Input::Resize(..) => {}
        }
        Some(input)
    }

    fn find(&self, id: &ElementId) -> Option<&TriggerRegion<H>> {
        self.regions.iter().find(|region| &region.id == id)
    }
}

impl<H: MenuHost + 'static> Default for ContextMenuPage<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: MenuHost + 'static> fmt::Debug for ContextMenuPage<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextMenuPage")
            .field("registry", &self.registry)
            .field(
                "regions",
                &self.regions.iter().map(|r| &r.id).collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn contains(area: Rect, x: i32, y: i32) -> bool {
    let x0 = i32::from(area.x);
    let y0 = i32::from(area.y);
    x >= x0 && y >= y0 && x < x0 + i32::from(area.width) && y < y0 + i32::from(area.height)
}
