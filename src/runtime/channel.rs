//! Typed observer channels, one per notification kind.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Kinds of notifications a runtime emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Change,
    BeforeActions,
    Action,
    AfterActions,
}

/// Sequence shared by every channel, so an id never matches a listener of
/// another channel or runtime.
static NEXT_LISTENER: AtomicU64 = AtomicU64::new(0);

/// Handle returned by [`Channel::on`] / [`Channel::once`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId {
    kind: EventKind,
    seq: u64,
}

impl ListenerId {
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

struct Listener<T: ?Sized> {
    id: ListenerId,
    once: bool,
    handler: Rc<dyn Fn(&T)>,
}

/// Ordered listener registry.
///
/// Handlers run in registration order. A notification is delivered to the
/// listeners registered when it started; `once` listeners are removed
/// before they run. Handlers may subscribe, unsubscribe or call back into
/// the runtime while being notified.
pub struct Channel<T: ?Sized> {
    kind: EventKind,
    listeners: RefCell<Vec<Listener<T>>>,
}

impl<T: ?Sized> Channel<T> {
    pub(crate) fn new(kind: EventKind) -> Self {
        Self {
            kind,
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Register a handler called on every notification.
    pub fn on<F>(&self, handler: F) -> ListenerId
    where
        F: Fn(&T) + 'static,
    {
        self.register(Rc::new(handler), false)
    }

    /// Register a handler called on the next notification only.
    pub fn once<F>(&self, handler: F) -> ListenerId
    where
        F: Fn(&T) + 'static,
    {
        self.register(Rc::new(handler), true)
    }

    /// Remove a handler. Returns `false` if it was not registered here.
    pub fn off(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|listener| listener.id != id);
        listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    fn register(&self, handler: Rc<dyn Fn(&T)>, once: bool) -> ListenerId {
        let seq = NEXT_LISTENER.fetch_add(1, Ordering::Relaxed);
        let id = ListenerId {
            kind: self.kind,
            seq,
        };
        self.listeners
            .borrow_mut()
            .push(Listener { id, once, handler });
        id
    }

    pub(crate) fn emit(&self, payload: &T) {
        let handlers: Vec<Rc<dyn Fn(&T)>> = {
            let mut listeners = self.listeners.borrow_mut();
            let handlers = listeners
                .iter()
                .map(|listener| Rc::clone(&listener.handler))
                .collect();
            listeners.retain(|listener| !listener.once);
            handlers
        };

        for handler in handlers {
            handler(payload);
        }
    }
}

impl<T: ?Sized> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("kind", &self.kind)
            .field("listeners", &self.len())
            .finish()
    }
}
