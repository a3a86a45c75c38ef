//! Document-level listener table with scoped registration.
//!
//! Listeners are registered per event kind and stay registered exactly as
//! long as the returned [`ListenerGuard`] lives. Delivery works on a snapshot
//! of the table, so a listener may subscribe or drop guards while an event
//! is being dispatched.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::event::{DocumentEvent, DocumentEventKind};

pub trait DocumentListener<H> {
    fn handle_document_event(&self, host: &mut H, event: &DocumentEvent);
}

struct Entry<H> {
    id: u64,
    kind: DocumentEventKind,
    listener: Rc<dyn DocumentListener<H>>,
}

struct Table<H> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<Entry<H>>>,
}

impl<H> Table<H> {
    fn remove(&self, id: u64) {
        self.entries.borrow_mut().retain(|entry| entry.id != id);
    }
}

/// The page's event target for click, contextmenu and key-up listeners.
pub struct DocumentListeners<H> {
    table: Rc<Table<H>>,
}

impl<H: 'static> DocumentListeners<H> {
    pub fn new() -> Self {
        Self {
            table: Rc::new(Table {
                next_id: Cell::new(0),
                entries: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register `listener` for events of `kind`. Dropping the guard
    /// unregisters it.
    #[must_use = "dropping the guard unregisters the listener immediately"]
    pub fn subscribe(
        &self,
        kind: DocumentEventKind,
        listener: Rc<dyn DocumentListener<H>>,
    ) -> ListenerGuard {
        let id = self.table.next_id.get();
        self.table.next_id.set(id + 1);
        self.table.entries.borrow_mut().push(Entry { id, kind, listener });
        let table: Weak<Table<H>> = Rc::downgrade(&self.table);
        ListenerGuard {
            id,
            release: Some(Box::new(move |id| {
                if let Some(table) = table.upgrade() {
                    table.remove(id);
                }
            })),
        }
    }

    /// Deliver `event` to every listener registered for its kind, in
    /// registration order.
    pub fn dispatch(&self, host: &mut H, event: &DocumentEvent) {
        let kind = event.kind();
        let snapshot: Vec<Rc<dyn DocumentListener<H>>> = self
            .table
            .entries
            .borrow()
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| Rc::clone(&entry.listener))
            .collect();
        tracing::trace!(?kind, listeners = snapshot.len(), "dispatching document event");
        for listener in snapshot {
            listener.handle_document_event(host, event);
        }
    }

    /// Number of live registrations across all kinds.
    pub fn len(&self) -> usize {
        self.table.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<H: 'static> Default for DocumentListeners<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for DocumentListeners<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentListeners")
            .field("registrations", &self.table.entries.borrow().len())
            .finish()
    }
}

/// Keeps one listener registered; unregisters it on drop.
pub struct ListenerGuard {
    id: u64,
    release: Option<Box<dyn FnOnce(u64)>>,
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard").field("id", &self.id).finish()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release(self.id);
        }
    }
}
