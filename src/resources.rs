// SPDX-License-Identifier: MPL-2.0
//! Shared page resources held by modal-like feedback.
//!
//! Several dialogs can be open at once, but the page has a single scroll
//! state and a single focus. [`ScrollLock`] is a strict reference counter:
//! the first guard saves and disables scrolling, the last one restores it.
//! [`FocusScope`] keeps focus trapped inside one item while it lives.
//! [`ModalResources`] ties both to the manager's events.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::events::{FeedbackEvent, Subscription};
use crate::feedback::{FeedbackId, FeedbackItem, Status};
use crate::manager::FeedbackManager;

/// Scroll position and styles saved while the page is locked.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScrollSnapshot {
    pub offset_x: f32,
    pub offset_y: f32,
    /// Inline overflow style to put back, if any.
    pub overflow: Option<String>,
}

/// The scrollable page behind dialogs.
pub trait ScrollSurface {
    fn capture(&self) -> ScrollSnapshot;
    fn disable(&self);
    fn restore(&self, snapshot: ScrollSnapshot);
}

struct LockState {
    surface: Box<dyn ScrollSurface>,
    count: Cell<usize>,
    saved: RefCell<Option<ScrollSnapshot>>,
}

impl LockState {
    fn release(&self) {
        let count = self.count.get().saturating_sub(1);
        self.count.set(count);
        if count == 0 {
            if let Some(snapshot) = self.saved.borrow_mut().take() {
                self.surface.restore(snapshot);
            }
        }
    }
}

/// Reference-counted body scroll lock.
///
/// Clones share the same counter; a host creates one per page.
#[derive(Clone)]
pub struct ScrollLock {
    state: Rc<LockState>,
}

impl ScrollLock {
    #[must_use]
    pub fn new(surface: impl ScrollSurface + 'static) -> Self {
        Self {
            state: Rc::new(LockState {
                surface: Box::new(surface),
                count: Cell::new(0),
                saved: RefCell::new(None),
            }),
        }
    }

    /// Takes one reference. The page is locked until every guard is dropped.
    pub fn acquire(&self) -> ScrollLockGuard {
        let count = self.state.count.get();
        if count == 0 {
            let snapshot = self.state.surface.capture();
            *self.state.saved.borrow_mut() = Some(snapshot);
            self.state.surface.disable();
        }
        self.state.count.set(count + 1);
        ScrollLockGuard {
            state: Rc::clone(&self.state),
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.state.count.get()
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.count() > 0
    }
}

impl std::fmt::Debug for ScrollLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollLock")
            .field("count", &self.count())
            .finish()
    }
}

/// One reference on a [`ScrollLock`]. Dropping it releases the reference.
#[must_use = "dropping the guard releases the scroll lock immediately"]
pub struct ScrollLockGuard {
    state: Rc<LockState>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.state.release();
    }
}

impl std::fmt::Debug for ScrollLockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollLockGuard")
            .field("count", &self.state.count.get())
            .finish()
    }
}

/// Keeps keyboard focus inside a feedback item.
pub trait FocusTrap {
    fn activate(&self, id: FeedbackId);
    fn deactivate(&self, id: FeedbackId);
}

/// Active focus trap for one item; dropping it deactivates the trap.
#[must_use = "dropping the scope releases focus immediately"]
pub struct FocusScope {
    trap: Rc<dyn FocusTrap>,
    id: FeedbackId,
}

impl FocusScope {
    pub fn enter(trap: &Rc<dyn FocusTrap>, id: FeedbackId) -> Self {
        trap.activate(id);
        Self {
            trap: Rc::clone(trap),
            id,
        }
    }
}

impl Drop for FocusScope {
    fn drop(&mut self) {
        self.trap.deactivate(self.id);
    }
}

impl std::fmt::Debug for FocusScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusScope").field("id", &self.id).finish()
    }
}

#[derive(Debug)]
struct Held {
    _scroll: ScrollLockGuard,
    _focus: Option<FocusScope>,
}

type HeldMap = Rc<RefCell<HashMap<FeedbackId, Held>>>;

/// Locks scrolling and traps focus for every open modal-like item.
///
/// Resources are taken when an item starts entering and given back when it
/// is dismissed. Dropping this value releases everything it holds.
pub struct ModalResources {
    held: HeldMap,
    subscription: Rc<RefCell<Option<Subscription>>>,
    _on_reset: Rc<dyn Fn()>,
}

impl ModalResources {
    pub fn attach(
        manager: &FeedbackManager,
        lock: ScrollLock,
        trap: Option<Rc<dyn FocusTrap>>,
    ) -> Self {
        let held: HeldMap = Rc::default();
        let subscription = Rc::new(RefCell::new(Some(track(
            manager,
            &held,
            lock.clone(),
            trap.clone(),
        ))));

        // A reset drops items without events and detaches every handler.
        let on_reset: Rc<dyn Fn()> = {
            let manager = manager.clone();
            let held = Rc::clone(&held);
            let slot = Rc::clone(&subscription);
            Rc::new(move || {
                let released = std::mem::take(&mut *held.borrow_mut());
                drop(released);
                let fresh = track(&manager, &held, lock.clone(), trap.clone());
                let stale = slot.borrow_mut().replace(fresh);
                drop(stale);
            })
        };
        manager.on_reset(&on_reset);

        Self {
            held,
            subscription,
            _on_reset: on_reset,
        }
    }

    /// Number of items currently holding resources.
    #[must_use]
    pub fn held_count(&self) -> usize {
        self.held.borrow().len()
    }

    #[must_use]
    pub fn holds(&self, id: FeedbackId) -> bool {
        self.held.borrow().contains_key(&id)
    }
}

impl Drop for ModalResources {
    fn drop(&mut self) {
        let released = std::mem::take(&mut *self.held.borrow_mut());
        drop(released);
        let subscription = self.subscription.borrow_mut().take();
        drop(subscription);
    }
}

fn track(
    manager: &FeedbackManager,
    held: &HeldMap,
    lock: ScrollLock,
    trap: Option<Rc<dyn FocusTrap>>,
) -> Subscription {
    let map = Rc::clone(held);
    manager.on_any(move |event| {
        let item = event.item();
        if !item.kind().is_modal_like() {
            return;
        }
        match event {
            FeedbackEvent::Added(_) if item.status() == Status::Entering => {
                acquire(&map, item, &lock, trap.as_ref());
            }
            FeedbackEvent::Removed(_) => {
                let released = map.borrow_mut().remove(&item.id());
                drop(released);
            }
            _ => {}
        }
    })
}

fn acquire(
    map: &RefCell<HashMap<FeedbackId, Held>>,
    item: &FeedbackItem,
    lock: &ScrollLock,
    trap: Option<&Rc<dyn FocusTrap>>,
) {
    if map.borrow().contains_key(&item.id()) {
        return;
    }
    let held = Held {
        _scroll: lock.acquire(),
        _focus: trap.map(|trap| FocusScope::enter(trap, item.id())),
    };
    map.borrow_mut().insert(item.id(), held);
}

impl std::fmt::Debug for ModalResources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalResources")
            .field("held", &self.held_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{FeedbackKind, FeedbackOptions};

    #[derive(Clone, Default)]
    struct FakePage {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl ScrollSurface for FakePage {
        fn capture(&self) -> ScrollSnapshot {
            self.log.borrow_mut().push("capture".into());
            ScrollSnapshot {
                offset_x: 0.0,
                offset_y: 240.0,
                overflow: Some("auto".into()),
            }
        }

        fn disable(&self) {
            self.log.borrow_mut().push("disable".into());
        }

        fn restore(&self, snapshot: ScrollSnapshot) {
            self.log
                .borrow_mut()
                .push(format!("restore {}", snapshot.offset_y));
        }
    }

    #[test]
    fn nested_guards_restore_once_at_zero() {
        let page = FakePage::default();
        let lock = ScrollLock::new(page.clone());

        let first = lock.acquire();
        let second = lock.acquire();
        assert_eq!(lock.count(), 2);

        drop(first);
        assert_eq!(lock.count(), 1);
        assert!(lock.is_locked());

        drop(second);
        assert!(!lock.is_locked());
        assert_eq!(
            *page.log.borrow(),
            vec!["capture", "disable", "restore 240"]
        );
    }

    #[test]
    fn relocking_captures_again() {
        let page = FakePage::default();
        let lock = ScrollLock::new(page.clone());
        drop(lock.acquire());
        drop(lock.acquire());
        assert_eq!(page.log.borrow().len(), 6);
    }

    #[derive(Default)]
    struct FakeTrap {
        active: RefCell<Vec<FeedbackId>>,
    }

    impl FocusTrap for FakeTrap {
        fn activate(&self, id: FeedbackId) {
            self.active.borrow_mut().push(id);
        }

        fn deactivate(&self, id: FeedbackId) {
            self.active.borrow_mut().retain(|a| *a != id);
        }
    }

    fn manager() -> FeedbackManager {
        FeedbackManager::new(
            &crate::config::Config::default(),
            crate::adapter::AnimationSpec::default(),
        )
    }

    #[test]
    fn two_modals_share_one_lock() {
        let page = FakePage::default();
        let lock = ScrollLock::new(page.clone());
        let manager = manager();
        let resources = ModalResources::attach(&manager, lock.clone(), None);

        let first = manager
            .add(FeedbackKind::Modal, FeedbackOptions::message("one"))
            .expect("valid");
        let second = manager
            .add(FeedbackKind::Drawer, FeedbackOptions::new())
            .expect("valid");
        assert_eq!(lock.count(), 2);
        assert_eq!(resources.held_count(), 2);

        manager.remove(first);
        assert_eq!(lock.count(), 1);
        assert!(!resources.holds(first));

        manager.remove(second);
        assert!(!lock.is_locked());
        assert_eq!(page.log.borrow().last().map(String::as_str), Some("restore 240"));
    }

    #[test]
    fn toasts_do_not_lock_the_page() {
        let lock = ScrollLock::new(FakePage::default());
        let manager = manager();
        let _resources = ModalResources::attach(&manager, lock.clone(), None);
        manager
            .add(FeedbackKind::Toast, FeedbackOptions::message("saved"))
            .expect("valid");
        assert!(!lock.is_locked());
    }

    #[test]
    fn dropping_resources_releases_everything() {
        let lock = ScrollLock::new(FakePage::default());
        let manager = manager();
        let resources = ModalResources::attach(&manager, lock.clone(), None);
        manager
            .add(FeedbackKind::Sheet, FeedbackOptions::new())
            .expect("valid");
        assert!(lock.is_locked());
        drop(resources);
        assert!(!lock.is_locked());
    }

    #[test]
    fn reset_releases_and_keeps_tracking() {
        let page = FakePage::default();
        let lock = ScrollLock::new(page.clone());
        let manager = manager();
        let resources = ModalResources::attach(&manager, lock.clone(), None);
        manager
            .add(FeedbackKind::Modal, FeedbackOptions::message("one"))
            .expect("valid");
        assert!(lock.is_locked());

        manager.reset();
        assert_eq!(lock.count(), 0);
        assert_eq!(resources.held_count(), 0);
        assert_eq!(page.log.borrow().last().map(String::as_str), Some("restore 240"));

        let next = manager
            .add(FeedbackKind::Drawer, FeedbackOptions::new())
            .expect("valid");
        assert!(resources.holds(next));
        assert_eq!(lock.count(), 1);
        manager.remove(next);
        assert!(!lock.is_locked());
    }

    #[test]
    fn reset_after_drop_does_nothing() {
        let lock = ScrollLock::new(FakePage::default());
        let manager = manager();
        drop(ModalResources::attach(&manager, lock.clone(), None));
        manager.reset();
        manager
            .add(FeedbackKind::Modal, FeedbackOptions::message("one"))
            .expect("valid");
        assert!(!lock.is_locked());
        assert_eq!(manager.listener_count(), 0);
    }

    #[test]
    fn focus_scope_deactivates_on_drop() {
        let fake = Rc::new(FakeTrap::default());
        let trap: Rc<dyn FocusTrap> = fake.clone();
        let id = FeedbackId::next();

        let scope = FocusScope::enter(&trap, id);
        assert_eq!(*fake.active.borrow(), vec![id]);
        drop(scope);
        assert!(fake.active.borrow().is_empty());
    }

    #[test]
    fn modal_traps_focus_until_dismissed() {
        let fake = Rc::new(FakeTrap::default());
        let trap: Rc<dyn FocusTrap> = fake.clone();
        let manager = manager();
        let _resources =
            ModalResources::attach(&manager, ScrollLock::new(FakePage::default()), Some(trap));

        let id = manager
            .add(FeedbackKind::Confirm, FeedbackOptions::message("Delete?"))
            .expect("valid");
        assert_eq!(*fake.active.borrow(), vec![id]);

        manager.cancel(id);
        assert!(fake.active.borrow().is_empty());
    }
}
