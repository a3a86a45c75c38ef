//! Per-region context menu state machine.
//!
//! A [`TriggerController`] lives exactly as long as its trigger region is
//! attached. Right-clicking the region closes whichever menu the shared
//! registry says is open, claims the registry, lets the caller fill the
//! panel, then positions and opens it. Document-level listeners registered
//! at construction close the menu again on Escape, an outside click, or an
//! outside right-click.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crossterm::event::KeyCode;

use crate::config::TriggerOptions;
use crate::event::{DocumentEvent, DocumentEventKind, ElementId, EventOutcome, PointerEvent};
use crate::geometry::compute_position;
use crate::host::MenuHost;
use crate::listeners::{DocumentListener, DocumentListeners, ListenerGuard};
use crate::registry::{MenuOwner, OpenMenuRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
}

type TriggerFn<H> = Box<dyn FnMut(&mut H, &PointerEvent)>;
type CloseFn<H> = Box<dyn FnMut(&mut H)>;
type DisabledFn = Box<dyn Fn() -> bool>;
type OpenStateFn = Box<dyn FnMut(bool)>;

/// Collaborator hooks for one trigger region. Every hook is optional.
pub struct TriggerCallbacks<H> {
    on_trigger: Option<TriggerFn<H>>,
    is_disabled: Option<DisabledFn>,
    on_close: Option<CloseFn<H>>,
    on_open_state_changed: Option<OpenStateFn>,
}

impl<H> TriggerCallbacks<H> {
    pub fn new() -> Self {
        Self {
            on_trigger: None,
            is_disabled: None,
            on_close: None,
            on_open_state_changed: None,
        }
    }

    /// Called with the triggering event before the panel is measured, so the
    /// panel content can be filled in for this particular click.
    pub fn on_trigger(mut self, f: impl FnMut(&mut H, &PointerEvent) + 'static) -> Self {
        self.on_trigger = Some(Box::new(f));
        self
    }

    /// While this returns `true` the region ignores right-clicks and its
    /// dismissal listeners do nothing.
    pub fn disabled_when(mut self, f: impl Fn() -> bool + 'static) -> Self {
        self.is_disabled = Some(Box::new(f));
        self
    }

    /// Called once each time an open menu closes.
    pub fn on_close(mut self, f: impl FnMut(&mut H) + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }

    /// Mirrors every open/close transition, for collaborators that bind a
    /// flag to the menu's visibility.
    pub fn on_open_state_changed(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_open_state_changed = Some(Box::new(f));
        self
    }
}

impl<H> Default for TriggerCallbacks<H> {
    fn default() -> Self {
        Self::new()
    }
}

struct TriggerState<H> {
    region: ElementId,
    options: TriggerOptions,
    open: Cell<bool>,
    registry: Rc<OpenMenuRegistry<H>>,
    is_disabled: Option<DisabledFn>,
    on_trigger: RefCell<Option<TriggerFn<H>>>,
    on_close: RefCell<Option<CloseFn<H>>>,
    on_open_state_changed: RefCell<Option<OpenStateFn>>,
}

impl<H: MenuHost + 'static> TriggerState<H> {
    fn disabled(&self) -> bool {
        self.is_disabled.as_ref().is_some_and(|f| f())
    }

    fn trigger(self: &Rc<Self>, host: &mut H, event: &PointerEvent) -> EventOutcome {
        if self.disabled() {
            tracing::trace!(region = %self.region, "trigger disabled; ignoring contextmenu");
            return EventOutcome::Ignored;
        }

        self.close_active(host);

        let panel = host.resolve_panel(self.options.target());
        match &panel {
            Some(panel) => {
                let owner: Weak<dyn MenuOwner<H>> = Rc::downgrade(self) as Weak<dyn MenuOwner<H>>;
                self.registry
                    .set_active(panel.clone(), event.target.clone(), owner);
            }
            None => {
                tracing::debug!(
                    region = %self.region,
                    panel_id = self.options.target(),
                    "menu panel not found"
                );
            }
        }

        if let Ok(mut cb) = self.on_trigger.try_borrow_mut()
            && let Some(cb) = cb.as_mut()
        {
            cb(host, event);
        }

        if let Some(panel) = panel {
            self.open(host, event, &panel);
        }
        EventOutcome::Consumed
    }

    /// Close whatever menu the registry holds, through its owner when the
    /// owner is still attached.
    fn close_active(&self, host: &mut H) {
        if !self.registry.is_active() {
            return;
        }
        match self.registry.active_owner() {
            Some(owner) => owner.close_menu(host),
            None => {
                if let Some(panel) = self.registry.active_panel() {
                    tracing::debug!(panel = %panel, "closing menu left open by a detached trigger");
                    host.set_panel_open(&panel, false);
                }
                self.registry.clear();
            }
        }
    }

    fn open(&self, host: &mut H, event: &PointerEvent, panel: &ElementId) {
        // Marked open before measuring so the host lays the panel out.
        host.set_panel_open(panel, true);
        let size = host.panel_size(panel).unwrap_or_default();
        let viewport = host.viewport();
        let position = compute_position(
            event.page_x,
            event.page_y,
            size,
            &viewport,
            self.options.margin_bottom(),
        );
        host.place_panel(panel, position);
        self.set_open(true);
        tracing::debug!(
            region = %self.region,
            panel = %panel,
            top = position.top,
            left = position.left,
            "context menu opened"
        );
    }

    fn close(&self, host: &mut H) {
        if let Some(panel) = self.registry.active_panel() {
            host.set_panel_open(&panel, false);
        }
        // Flipped before the callback so a close from inside it is a no-op.
        if self.open.replace(false) {
            if let Ok(mut cb) = self.on_close.try_borrow_mut()
                && let Some(cb) = cb.as_mut()
            {
                cb(host);
            }
            tracing::debug!(region = %self.region, "context menu closed");
            self.notify_open_state(false);
        }
        self.registry.clear();
    }

    fn set_open(&self, open: bool) {
        if self.open.replace(open) != open {
            self.notify_open_state(open);
        }
    }

    fn notify_open_state(&self, open: bool) {
        if let Ok(mut cb) = self.on_open_state_changed.try_borrow_mut()
            && let Some(cb) = cb.as_mut()
        {
            cb(open);
        }
    }

    fn is_dismissal(&self, event: &DocumentEvent) -> bool {
        match event {
            DocumentEvent::KeyUp(code) => *code == KeyCode::Esc,
            DocumentEvent::Click(pointer) | DocumentEvent::ContextMenu(pointer) => {
                !pointer.is_right_button()
                    || self.registry.active_origin().as_ref() != Some(&pointer.target)
            }
        }
    }
}

impl<H: MenuHost + 'static> MenuOwner<H> for TriggerState<H> {
    fn close_menu(&self, host: &mut H) {
        self.close(host);
    }
}

impl<H: MenuHost + 'static> DocumentListener<H> for TriggerState<H> {
    fn handle_document_event(&self, host: &mut H, event: &DocumentEvent) {
        if self.disabled() || !self.open.get() {
            return;
        }
        if self.is_dismissal(event) {
            tracing::trace!(region = %self.region, kind = ?event.kind(), "dismissal event");
            self.close(host);
        }
    }
}

/// The context menu trigger attached to one region.
///
/// Dropping the controller releases its document listeners. A menu that is
/// open at that moment is left as-is; the next trigger on the page clears it.
pub struct TriggerController<H: MenuHost + 'static> {
    state: Rc<TriggerState<H>>,
    _listeners: Vec<ListenerGuard>,
}

impl<H: MenuHost + 'static> TriggerController<H> {
    pub fn new(
        region: impl Into<ElementId>,
        options: TriggerOptions,
        callbacks: TriggerCallbacks<H>,
        registry: Rc<OpenMenuRegistry<H>>,
        document: &DocumentListeners<H>,
    ) -> Self {
        let TriggerCallbacks {
            on_trigger,
            is_disabled,
            on_close,
            on_open_state_changed,
        } = callbacks;
        let state = Rc::new(TriggerState {
            region: region.into(),
            options,
            open: Cell::new(false),
            registry,
            is_disabled,
            on_trigger: RefCell::new(on_trigger),
            on_close: RefCell::new(on_close),
            on_open_state_changed: RefCell::new(on_open_state_changed),
        });
        // Click and contextmenu are both watched: some hosts report a
        // right-click as both.
        let listeners = [
            DocumentEventKind::KeyUp,
            DocumentEventKind::Click,
            DocumentEventKind::ContextMenu,
        ]
        .into_iter()
        .map(|kind| document.subscribe(kind, state.clone() as Rc<dyn DocumentListener<H>>))
        .collect();
        tracing::trace!(region = %state.region, "trigger attached");
        Self {
            state,
            _listeners: listeners,
        }
    }

    /// Handle a contextmenu event delivered to this region.
    ///
    /// Returns [`EventOutcome::Consumed`] whenever the region is enabled; the
    /// caller must then keep the event from reaching document listeners.
    pub fn handle_context_menu(&self, host: &mut H, event: &PointerEvent) -> EventOutcome {
        self.state.trigger(host, event)
    }

    /// Close this region's menu, e.g. after a menu item was chosen. No-op
    /// unless this region's menu is the open one.
    pub fn close(&self, host: &mut H) {
        if self.is_open() || self.owns_active_menu() {
            self.state.close(host);
        }
    }

    pub fn state(&self) -> MenuState {
        if self.state.open.get() {
            MenuState::Open
        } else {
            MenuState::Closed
        }
    }

    pub fn is_open(&self) -> bool {
        self.state() == MenuState::Open
    }

    pub fn is_disabled(&self) -> bool {
        self.state.disabled()
    }

    pub fn region(&self) -> &ElementId {
        &self.state.region
    }

    pub fn options(&self) -> &TriggerOptions {
        &self.state.options
    }

    fn owns_active_menu(&self) -> bool {
        self.state
            .registry
            .active_owner()
            .is_some_and(|owner| std::ptr::addr_eq(Rc::as_ptr(&owner), Rc::as_ptr(&self.state)))
    }
}

impl<H: MenuHost + 'static> fmt::Debug for TriggerController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerController")
            .field("region", &self.state.region)
            .field("options", &self.state.options)
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{PanelSize, PositionResult, Viewport};
    use crossterm::event::MouseButton;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct Host {
        open: BTreeMap<String, bool>,
        placed: BTreeMap<String, PositionResult>,
        sizes: BTreeMap<String, PanelSize>,
    }

    impl Host {
        fn with_panel(mut self, id: &str, size: PanelSize) -> Self {
            self.sizes.insert(id.to_string(), size);
            self.open.insert(id.to_string(), false);
            self
        }

        fn is_marked(&self, id: &str) -> bool {
            self.open.get(id).copied().unwrap_or(false)
        }
    }

    impl MenuHost for Host {
        fn viewport(&self) -> Viewport {
            Viewport::new(80, 24)
        }

        fn resolve_panel(&self, id: &str) -> Option<ElementId> {
            self.sizes.contains_key(id).then(|| ElementId::new(id))
        }

        fn panel_size(&self, panel: &ElementId) -> Option<PanelSize> {
            self.sizes.get(panel.as_str()).copied()
        }

        fn place_panel(&mut self, panel: &ElementId, position: PositionResult) {
            self.placed.insert(panel.as_str().to_string(), position);
        }

        fn set_panel_open(&mut self, panel: &ElementId, open: bool) {
            self.open.insert(panel.as_str().to_string(), open);
        }
    }

    fn right_click(x: i32, y: i32, target: &str) -> PointerEvent {
        PointerEvent::new(x, y, MouseButton::Right, target)
    }

    fn setup() -> (Rc<OpenMenuRegistry<Host>>, DocumentListeners<Host>, Host) {
        let host = Host::default().with_panel("menu", PanelSize::new(10, 4));
        (OpenMenuRegistry::shared(), DocumentListeners::new(), host)
    }

    #[test]
    fn right_click_opens_and_positions() {
        let (registry, doc, mut host) = setup();
        let trigger = TriggerController::new(
            "region",
            TriggerOptions::new("menu"),
            TriggerCallbacks::new(),
            registry.clone(),
            &doc,
        );
        assert_eq!(trigger.state(), MenuState::Closed);

        let outcome = trigger.handle_context_menu(&mut host, &right_click(5, 6, "region"));
        assert_eq!(outcome, EventOutcome::Consumed);
        assert!(trigger.is_open());
        assert!(host.is_marked("menu"));
        assert_eq!(host.placed["menu"], PositionResult { top: 6, left: 5 });
        assert_eq!(
            registry.get_active(),
            Some((ElementId::new("menu"), ElementId::new("region")))
        );
    }

    #[test]
    fn on_trigger_runs_before_measurement() {
        let (registry, doc, mut host) = setup();
        let callbacks = TriggerCallbacks::new().on_trigger(|host: &mut Host, _event| {
            host.sizes.insert("menu".into(), PanelSize::new(30, 4));
        });
        let trigger =
            TriggerController::new("region", TriggerOptions::new("menu"), callbacks, registry, &doc);
        trigger.handle_context_menu(&mut host, &right_click(70, 0, "region"));
        // measured at the enlarged width, so pulled back flush with the edge
        assert_eq!(host.placed["menu"].left, 50);
    }

    #[test]
    fn escape_closes_once() {
        let (registry, doc, mut host) = setup();
        let closes = Rc::new(Cell::new(0));
        let counter = closes.clone();
        let callbacks = TriggerCallbacks::new().on_close(move |_| counter.set(counter.get() + 1));
        let trigger = TriggerController::new(
            "region",
            TriggerOptions::new("menu"),
            callbacks,
            registry.clone(),
            &doc,
        );
        trigger.handle_context_menu(&mut host, &right_click(1, 1, "region"));

        doc.dispatch(&mut host, &DocumentEvent::KeyUp(KeyCode::Esc));
        assert_eq!(closes.get(), 1);
        assert!(!trigger.is_open());
        assert!(!host.is_marked("menu"));
        assert!(!registry.is_active());

        doc.dispatch(&mut host, &DocumentEvent::KeyUp(KeyCode::Esc));
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn other_keys_do_not_dismiss() {
        let (registry, doc, mut host) = setup();
        let trigger =
            TriggerController::new("region", TriggerOptions::new("menu"), TriggerCallbacks::new(), registry, &doc);
        trigger.handle_context_menu(&mut host, &right_click(1, 1, "region"));
        doc.dispatch(&mut host, &DocumentEvent::KeyUp(KeyCode::Enter));
        assert!(trigger.is_open());
    }

    #[test]
    fn right_click_on_origin_is_not_a_dismissal() {
        let (registry, doc, mut host) = setup();
        let trigger =
            TriggerController::new("region", TriggerOptions::new("menu"), TriggerCallbacks::new(), registry, &doc);
        trigger.handle_context_menu(&mut host, &right_click(1, 1, "region"));

        doc.dispatch(&mut host, &DocumentEvent::Click(right_click(1, 1, "region")));
        assert!(trigger.is_open());

        doc.dispatch(
            &mut host,
            &DocumentEvent::Click(PointerEvent::new(1, 1, MouseButton::Left, "region")),
        );
        assert!(!trigger.is_open());
    }

    #[test]
    fn outside_right_click_dismisses() {
        let (registry, doc, mut host) = setup();
        let trigger =
            TriggerController::new("region", TriggerOptions::new("menu"), TriggerCallbacks::new(), registry, &doc);
        trigger.handle_context_menu(&mut host, &right_click(1, 1, "region"));
        doc.dispatch(&mut host, &DocumentEvent::ContextMenu(right_click(40, 9, "document")));
        assert!(!trigger.is_open());
    }

    #[test]
    fn disabled_trigger_ignores_everything() {
        let (registry, doc, mut host) = setup();
        let disabled = Rc::new(Cell::new(true));
        let flag = disabled.clone();
        let fired = Rc::new(Cell::new(false));
        let fired_cb = fired.clone();
        let callbacks = TriggerCallbacks::new()
            .disabled_when(move || flag.get())
            .on_trigger(move |_, _| fired_cb.set(true));
        let trigger = TriggerController::new(
            "region",
            TriggerOptions::new("menu"),
            callbacks,
            registry.clone(),
            &doc,
        );

        let outcome = trigger.handle_context_menu(&mut host, &right_click(1, 1, "region"));
        assert_eq!(outcome, EventOutcome::Ignored);
        assert!(!fired.get());
        assert!(!trigger.is_open());
        assert!(!registry.is_active());

        // open while enabled, then disable: dismissal listeners go quiet
        disabled.set(false);
        trigger.handle_context_menu(&mut host, &right_click(1, 1, "region"));
        disabled.set(true);
        doc.dispatch(&mut host, &DocumentEvent::KeyUp(KeyCode::Esc));
        assert!(trigger.is_open());
    }

    #[test]
    fn missing_panel_still_consumes_without_opening() {
        let (registry, doc, mut host) = setup();
        let fired = Rc::new(Cell::new(false));
        let fired_cb = fired.clone();
        let callbacks = TriggerCallbacks::new().on_trigger(move |_, _| fired_cb.set(true));
        let trigger = TriggerController::new(
            "region",
            TriggerOptions::new("nope"),
            callbacks,
            registry.clone(),
            &doc,
        );
        let outcome = trigger.handle_context_menu(&mut host, &right_click(1, 1, "region"));
        assert_eq!(outcome, EventOutcome::Consumed);
        assert!(fired.get());
        assert!(!trigger.is_open());
        assert!(!registry.is_active());
    }

    #[test]
    fn open_state_changes_are_mirrored() {
        let (registry, doc, mut host) = setup();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let callbacks =
            TriggerCallbacks::new().on_open_state_changed(move |open| sink.borrow_mut().push(open));
        let trigger =
            TriggerController::new("region", TriggerOptions::new("menu"), callbacks, registry, &doc);
        trigger.handle_context_menu(&mut host, &right_click(1, 1, "region"));
        trigger.close(&mut host);
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn explicit_close_of_idle_trigger_leaves_other_menu_alone() {
        let (registry, doc, mut host) = setup();
        let a = TriggerController::new(
            "a",
            TriggerOptions::new("menu"),
            TriggerCallbacks::new(),
            registry.clone(),
            &doc,
        );
        let b = TriggerController::new(
            "b",
            TriggerOptions::new("menu"),
            TriggerCallbacks::new(),
            registry.clone(),
            &doc,
        );
        a.handle_context_menu(&mut host, &right_click(1, 1, "a"));
        b.close(&mut host);
        assert!(a.is_open());
        assert!(host.is_marked("menu"));
        assert!(registry.is_active());
    }

    #[test]
    fn drop_releases_listeners_without_closing() {
        let (registry, doc, mut host) = setup();
        let trigger = TriggerController::new(
            "region",
            TriggerOptions::new("menu"),
            TriggerCallbacks::new(),
            registry.clone(),
            &doc,
        );
        assert_eq!(doc.len(), 3);
        trigger.handle_context_menu(&mut host, &right_click(1, 1, "region"));
        drop(trigger);
        assert!(doc.is_empty());
        assert!(host.is_marked("menu"));
        assert!(registry.is_active());
        assert!(registry.active_owner().is_none());
    }

    #[test]
    fn close_from_inside_on_close_notifies_once() {
        let (registry, doc, mut host) = setup();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let closes = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let counter = Rc::clone(&closes);
        let inner = Rc::clone(&registry);
        let trigger = TriggerController::new(
            "region",
            TriggerOptions::new("menu"),
            TriggerCallbacks::new()
                .on_close(move |host: &mut Host| {
                    counter.set(counter.get() + 1);
                    if let Some(owner) = inner.active_owner() {
                        owner.close_menu(host);
                    }
                })
                .on_open_state_changed(move |open| sink.borrow_mut().push(open)),
            registry.clone(),
            &doc,
        );

        trigger.handle_context_menu(&mut host, &right_click(1, 1, "region"));
        trigger.close(&mut host);

        assert_eq!(*seen.borrow(), vec![true, false]);
        assert_eq!(closes.get(), 1);
        assert!(!trigger.is_open());
        assert!(!registry.is_active());
    }
}
