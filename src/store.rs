// SPDX-License-Identifier: MPL-2.0
//! Observable container of feedback items.
//!
//! The store holds the authoritative `id -> FeedbackItem` map. Only the
//! manager writes to it (the mutators are crate-private); anyone may read.
//!
//! # Notifications
//!
//! Mutations are applied immediately, one map operation each, so a read never
//! observes a half-applied change. Notifications are deferred: every mutation
//! records a change, and [`FeedbackStore::flush`] delivers them once the
//! manager has finished the operation. Watchers register a selector and are
//! only called when an item matching the selector (before or after the
//! change) was touched *and* the selected set actually differs from what the
//! watcher last saw.
//!
//! # Invariants
//!
//! 1. At most one item per id.
//! 2. Watchers are notified in registration order.
//! 3. Dropping a [`StoreWatch`] detaches it before the next notification.

use crate::feedback::{FeedbackId, FeedbackItem};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

type Selector = Box<dyn Fn(&FeedbackItem) -> bool>;
type WatchCallback = Box<dyn Fn(&[FeedbackItem])>;

struct Change {
    before: Option<FeedbackItem>,
    after: Option<FeedbackItem>,
}

struct Watcher {
    id: u64,
    active: Cell<bool>,
    /// Coarse listeners fire on every non-empty flush.
    coarse: bool,
    selector: Selector,
    callback: WatchCallback,
    /// (id, revision) pairs of the selection last delivered.
    last: RefCell<Vec<(FeedbackId, u64)>>,
}

impl Watcher {
    fn touched_by(&self, change: &Change) -> bool {
        change.before.as_ref().is_some_and(|item| (self.selector)(item))
            || change.after.as_ref().is_some_and(|item| (self.selector)(item))
    }
}

fn signature(items: &[FeedbackItem]) -> Vec<(FeedbackId, u64)> {
    items.iter().map(|item| (item.id(), item.revision())).collect()
}

/// Authoritative map of active feedback items.
#[derive(Default)]
pub struct FeedbackStore {
    items: RefCell<BTreeMap<FeedbackId, FeedbackItem>>,
    pending: RefCell<Vec<Change>>,
    watchers: RefCell<Vec<Rc<Watcher>>>,
    next_watch: Cell<u64>,
}

impl std::fmt::Debug for FeedbackStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackStore")
            .field("items", &self.items.borrow().len())
            .field("watchers", &self.watchers.borrow().len())
            .finish()
    }
}

impl FeedbackStore {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Returns a snapshot of the item with the given id.
    #[must_use]
    pub fn get(&self, id: FeedbackId) -> Option<FeedbackItem> {
        self.items.borrow().get(&id).cloned()
    }

    #[must_use]
    pub fn contains(&self, id: FeedbackId) -> bool {
        self.items.borrow().contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Returns every item in arrival order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<FeedbackItem> {
        self.items.borrow().values().cloned().collect()
    }

    /// Returns the items matching `predicate`, in arrival order.
    pub fn select(&self, predicate: impl Fn(&FeedbackItem) -> bool) -> Vec<FeedbackItem> {
        self.items
            .borrow()
            .values()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    /// Watches the subset of items matching `selector`.
    ///
    /// `callback` receives the full current selection whenever it changes.
    /// It is not called on registration.
    pub fn watch(
        self: &Rc<Self>,
        selector: impl Fn(&FeedbackItem) -> bool + 'static,
        callback: impl Fn(&[FeedbackItem]) + 'static,
    ) -> StoreWatch {
        self.register(false, Box::new(selector), Box::new(callback))
    }

    /// Calls `callback` with the whole store after every flush that carried
    /// at least one change.
    pub fn subscribe(self: &Rc<Self>, callback: impl Fn(&[FeedbackItem]) + 'static) -> StoreWatch {
        self.register(true, Box::new(|_| true), Box::new(callback))
    }

    fn register(self: &Rc<Self>, coarse: bool, selector: Selector, callback: WatchCallback) -> StoreWatch {
        let id = self.next_watch.get();
        self.next_watch.set(id + 1);

        let initial = signature(&self.select(&selector));
        self.watchers.borrow_mut().push(Rc::new(Watcher {
            id,
            active: Cell::new(true),
            coarse,
            selector,
            callback,
            last: RefCell::new(initial),
        }));

        StoreWatch {
            store: Rc::downgrade(self),
            id,
        }
    }

    /// Number of registered watchers.
    #[must_use]
    pub fn watcher_count(&self) -> usize {
        self.watchers.borrow().len()
    }

    fn unwatch(&self, id: u64) {
        let removed = {
            let mut watchers = self.watchers.borrow_mut();
            watchers
                .iter()
                .position(|w| w.id == id)
                .map(|pos| watchers.remove(pos))
        };
        if let Some(watcher) = removed {
            watcher.active.set(false);
        }
    }

    pub(crate) fn insert(&self, item: FeedbackItem) {
        let after = item.clone();
        let before = self.items.borrow_mut().insert(item.id(), item);
        self.pending.borrow_mut().push(Change {
            before,
            after: Some(after),
        });
    }

    /// Replaces an existing entry. Absent ids are ignored.
    pub(crate) fn replace(&self, item: FeedbackItem) {
        let before = {
            let mut items = self.items.borrow_mut();
            match items.get_mut(&item.id()) {
                Some(slot) => std::mem::replace(slot, item.clone()),
                None => return,
            }
        };
        self.pending.borrow_mut().push(Change {
            before: Some(before),
            after: Some(item),
        });
    }

    pub(crate) fn delete(&self, id: FeedbackId) -> Option<FeedbackItem> {
        let before = self.items.borrow_mut().remove(&id)?;
        self.pending.borrow_mut().push(Change {
            before: Some(before.clone()),
            after: None,
        });
        Some(before)
    }

    /// Drops every item without notifying anyone.
    pub(crate) fn clear_silently(&self) {
        let items = std::mem::take(&mut *self.items.borrow_mut());
        self.pending.borrow_mut().clear();
        drop(items);
        for watcher in self.watchers.borrow().iter() {
            watcher.last.borrow_mut().clear();
        }
    }

    /// Delivers pending change notifications.
    ///
    /// Watchers may call back into the manager; nested flushes deliver the
    /// nested changes before this one resumes.
    pub fn flush(&self) {
        let changes = std::mem::take(&mut *self.pending.borrow_mut());
        if changes.is_empty() {
            return;
        }
        let watchers: Vec<Rc<Watcher>> = self.watchers.borrow().clone();
        for watcher in watchers {
            if !watcher.active.get() {
                continue;
            }
            if !watcher.coarse && !changes.iter().any(|c| watcher.touched_by(c)) {
                continue;
            }
            let selection = self.select(&watcher.selector);
            let sig = signature(&selection);
            if !watcher.coarse && *watcher.last.borrow() == sig {
                continue;
            }
            *watcher.last.borrow_mut() = sig;
            (watcher.callback)(&selection);
        }
    }
}

/// RAII guard for a store watcher. Dropping it stops notifications.
#[must_use = "dropping a StoreWatch immediately stops notifications"]
pub struct StoreWatch {
    store: Weak<FeedbackStore>,
    id: u64,
}

impl StoreWatch {
    /// Explicitly stops watching (same as dropping).
    pub fn unwatch(self) {}
}

impl Drop for StoreWatch {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store.unwatch(self.id);
        }
    }
}

impl std::fmt::Debug for StoreWatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreWatch").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{FeedbackKind, FeedbackOptions, Position, Status};
    use std::time::Instant;

    fn item(kind: FeedbackKind, position: Position) -> FeedbackItem {
        FeedbackItem::new(
            kind,
            FeedbackOptions::message("m"),
            Status::Entering,
            Instant::now(),
            0,
            position,
        )
    }

    fn counter() -> (Rc<Cell<usize>>, impl Fn(&[FeedbackItem])) {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        (count, move |_: &[FeedbackItem]| c.set(c.get() + 1))
    }

    #[test]
    fn insert_get_delete() {
        let store = FeedbackStore::new();
        let it = item(FeedbackKind::Toast, Position::TopRight);
        let id = it.id();

        store.insert(it);
        assert!(store.contains(id));
        assert_eq!(store.len(), 1);

        assert!(store.delete(id).is_some());
        assert!(store.get(id).is_none());
        assert!(store.delete(id).is_none());
    }

    #[test]
    fn replace_ignores_absent_ids() {
        let store = FeedbackStore::new();
        store.replace(item(FeedbackKind::Toast, Position::TopRight));
        assert!(store.is_empty());
    }

    #[test]
    fn watcher_only_fires_for_matching_items() {
        let store = FeedbackStore::new();
        let (count, cb) = counter();
        let _watch = store.watch(
            |it| it.kind() == FeedbackKind::Toast && it.position() == Position::BottomLeft,
            cb,
        );

        store.insert(item(FeedbackKind::Toast, Position::TopRight));
        store.insert(item(FeedbackKind::Modal, Position::BottomLeft));
        store.flush();
        assert_eq!(count.get(), 0);

        store.insert(item(FeedbackKind::Toast, Position::BottomLeft));
        store.flush();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn notifications_wait_for_flush() {
        let store = FeedbackStore::new();
        let (count, cb) = counter();
        let _watch = store.watch(|_| true, cb);

        store.insert(item(FeedbackKind::Toast, Position::TopRight));
        store.insert(item(FeedbackKind::Toast, Position::TopRight));
        assert_eq!(count.get(), 0);

        store.flush();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn watcher_sees_item_leaving_selection() {
        let store = FeedbackStore::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let _watch = store.watch(
            |it| it.status() == Status::Visible,
            move |items| s.borrow_mut().push(items.len()),
        );

        let mut it = item(FeedbackKind::Toast, Position::TopRight);
        store.insert(it.clone());
        store.flush();

        it.set_status(Status::Visible);
        store.replace(it.clone());
        store.flush();

        it.set_status(Status::Exiting);
        store.replace(it);
        store.flush();

        assert_eq!(*seen.borrow(), vec![1, 0]);
    }

    #[test]
    fn dropping_watch_detaches() {
        let store = FeedbackStore::new();
        let (count, cb) = counter();
        let watch = store.watch(|_| true, cb);
        assert_eq!(store.watcher_count(), 1);

        drop(watch);
        assert_eq!(store.watcher_count(), 0);

        store.insert(item(FeedbackKind::Toast, Position::TopRight));
        store.flush();
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn coarse_subscriber_fires_on_every_flush_with_changes() {
        let store = FeedbackStore::new();
        let (count, cb) = counter();
        let _sub = store.subscribe(cb);

        let it = item(FeedbackKind::Toast, Position::TopRight);
        store.insert(it.clone());
        store.flush();
        store.replace(it);
        store.flush();
        store.flush();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn snapshot_is_in_arrival_order() {
        let store = FeedbackStore::new();
        let a = item(FeedbackKind::Toast, Position::TopRight);
        let b = item(FeedbackKind::Alert, Position::TopRight);
        let (ida, idb) = (a.id(), b.id());
        store.insert(b);
        store.insert(a);

        let ids: Vec<_> = store.snapshot().iter().map(FeedbackItem::id).collect();
        assert_eq!(ids, vec![ida, idb]);
    }
}
