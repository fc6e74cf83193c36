// SPDX-License-Identifier: MPL-2.0
//! Typed lifecycle events and the channel that delivers them.
//!
//! Handlers run synchronously, in subscription order, within the turn of the
//! manager operation that produced the event. A handler may subscribe,
//! unsubscribe or call back into the manager; a handler detached during a
//! dispatch is not called for the rest of it.

use crate::feedback::{FeedbackItem, Status};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Something that happened to a feedback item.
///
/// Every variant carries a snapshot of the item taken right after the change.
#[derive(Debug, Clone)]
pub enum FeedbackEvent {
    /// A new item was created.
    Added(FeedbackItem),
    /// An item's options were merged with a patch (or refreshed by dedupe).
    Updated(FeedbackItem),
    /// An item moved through its lifecycle.
    StatusChanged { item: FeedbackItem, from: Status },
    /// An item was dismissed or force-removed. Emitted exactly once per id.
    Removed(FeedbackItem),
}

impl FeedbackEvent {
    #[must_use]
    pub fn item(&self) -> &FeedbackItem {
        match self {
            FeedbackEvent::Added(item)
            | FeedbackEvent::Updated(item)
            | FeedbackEvent::Removed(item)
            | FeedbackEvent::StatusChanged { item, .. } => item,
        }
    }

    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            FeedbackEvent::Added(_) => EventKind::Added,
            FeedbackEvent::Updated(_) => EventKind::Updated,
            FeedbackEvent::StatusChanged { .. } => EventKind::StatusChanged,
            FeedbackEvent::Removed(_) => EventKind::Removed,
        }
    }
}

/// Discriminant used to subscribe to a single event variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Added,
    Updated,
    StatusChanged,
    Removed,
}

/// Identifies a subscription for [`EventBus::off`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn Fn(&FeedbackEvent)>;

struct Listener {
    id: SubscriptionId,
    filter: Option<EventKind>,
    active: Cell<bool>,
    handler: Handler,
}

#[derive(Default)]
struct BusInner {
    listeners: RefCell<Vec<Rc<Listener>>>,
    next_id: Cell<u64>,
}

/// Synchronous, single-threaded event channel.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<BusInner>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to one event variant.
    pub fn on(&self, kind: EventKind, handler: impl Fn(&FeedbackEvent) + 'static) -> Subscription {
        self.subscribe(Some(kind), Box::new(handler))
    }

    /// Subscribes to every event.
    pub fn on_any(&self, handler: impl Fn(&FeedbackEvent) + 'static) -> Subscription {
        self.subscribe(None, Box::new(handler))
    }

    fn subscribe(&self, filter: Option<EventKind>, handler: Handler) -> Subscription {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.listeners.borrow_mut().push(Rc::new(Listener {
            id,
            filter,
            active: Cell::new(true),
            handler,
        }));
        Subscription {
            bus: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Detaches a subscription by id. Unknown ids are ignored.
    pub fn off(&self, id: SubscriptionId) {
        detach(&self.inner, id);
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Delivers `event` to every matching listener, in subscription order.
    pub fn emit(&self, event: &FeedbackEvent) {
        let listeners: Vec<Rc<Listener>> = self.inner.listeners.borrow().clone();
        let kind = event.kind();
        for listener in listeners {
            if !listener.active.get() {
                continue;
            }
            if listener.filter.is_some_and(|f| f != kind) {
                continue;
            }
            (listener.handler)(event);
        }
    }

    /// Detaches every listener.
    pub(crate) fn clear(&self) {
        let drained = std::mem::take(&mut *self.inner.listeners.borrow_mut());
        for listener in &drained {
            listener.active.set(false);
        }
        // Handlers may own subscriptions; drop them after the borrow ends.
        drop(drained);
    }
}

fn detach(inner: &BusInner, id: SubscriptionId) {
    let removed = {
        let mut listeners = inner.listeners.borrow_mut();
        listeners
            .iter()
            .position(|l| l.id == id)
            .map(|pos| listeners.remove(pos))
    };
    if let Some(listener) = removed {
        listener.active.set(false);
    }
}

/// RAII guard for an event subscription. Dropping it detaches the handler.
#[must_use = "dropping a Subscription immediately detaches the handler"]
pub struct Subscription {
    bus: Weak<BusInner>,
    id: SubscriptionId,
}

impl Subscription {
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Explicitly detaches the handler (same as dropping).
    pub fn unsubscribe(self) {}

    /// Keeps the handler attached for the lifetime of the bus.
    ///
    /// It can still be detached with [`EventBus::off`].
    pub fn forget(self) -> SubscriptionId {
        let id = self.id;
        std::mem::forget(self);
        id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            detach(&inner, self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
