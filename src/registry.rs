//! The page-wide record of which menu is currently open.
//!
//! One registry is shared by every trigger controller on a page. It is the
//! single source of truth that keeps two menus from being visible at once:
//! a controller about to open asks the current owner to close first, then
//! claims the record for itself.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::event::ElementId;

/// Something that can run the close sequence for the menu it opened.
pub trait MenuOwner<H> {
    fn close_menu(&self, host: &mut H);
}

struct ActiveMenu<H> {
    panel: ElementId,
    origin: ElementId,
    owner: Weak<dyn MenuOwner<H>>,
}

/// Either empty or holding a full `(panel, origin, owner)` triple.
pub struct OpenMenuRegistry<H> {
    active: RefCell<Option<ActiveMenu<H>>>,
}

impl<H> OpenMenuRegistry<H> {
    pub fn new() -> Self {
        Self {
            active: RefCell::new(None),
        }
    }

    /// Convenience for the common case of sharing one registry by `Rc`.
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// The active panel and the element that received the triggering event.
    pub fn get_active(&self) -> Option<(ElementId, ElementId)> {
        self.active
            .borrow()
            .as_ref()
            .map(|active| (active.panel.clone(), active.origin.clone()))
    }

    pub fn set_active(&self, panel: ElementId, origin: ElementId, owner: Weak<dyn MenuOwner<H>>) {
        *self.active.borrow_mut() = Some(ActiveMenu {
            panel,
            origin,
            owner,
        });
    }

    pub fn clear(&self) {
        self.active.borrow_mut().take();
    }

    pub fn is_active(&self) -> bool {
        self.active.borrow().is_some()
    }

    pub fn active_panel(&self) -> Option<ElementId> {
        self.active.borrow().as_ref().map(|a| a.panel.clone())
    }

    pub fn active_origin(&self) -> Option<ElementId> {
        self.active.borrow().as_ref().map(|a| a.origin.clone())
    }

    /// The controller that opened the active menu, if it is still attached.
    pub fn active_owner(&self) -> Option<Rc<dyn MenuOwner<H>>> {
        self.active.borrow().as_ref().and_then(|a| a.owner.upgrade())
    }
}

impl<H> Default for OpenMenuRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for OpenMenuRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active = self.get_active();
        f.debug_struct("OpenMenuRegistry")
            .field("active", &active)
            .finish()
    }
}
