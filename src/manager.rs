// SPDX-License-Identifier: MPL-2.0
//! Feedback lifecycle orchestration.
//!
//! The [`FeedbackManager`] is the only writer of the store. It creates
//! items, caps each toast/alert stack, drives every item through
//! `queued → entering → visible → exiting → removed` on timers and user
//! responses, and reports what happened on its event channel.
//!
//! # Dispatch order
//!
//! Each operation first applies all of its state changes while holding the
//! manager's internal state, recording events and user callbacks as it
//! goes. Once the state is released, store watchers are flushed and the
//! recorded events and callbacks run in the order they occurred. Handlers
//! and callbacks may therefore call back into the manager freely.
//!
//! # Timers
//!
//! Nothing fires on its own: the host calls [`FeedbackManager::tick`] (or
//! runs [`crate::driver::run_timers`]). Follow-up timers are scheduled from
//! the deadline of the timer that fired, so a late tick produces the same
//! sequence as a punctual one.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use tokio::sync::Notify;

use crate::adapter::AnimationSpec;
use crate::config::Config;
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle, DismissReason};
use crate::error::{Error, Result};
use crate::events::{EventBus, EventKind, FeedbackEvent, Subscription, SubscriptionId};
use crate::feedback::{
    FeedbackId, FeedbackItem, FeedbackKind, FeedbackOptions, MaxVisible, OptionsPatch, Position,
    QueueFamily, Status,
};
use crate::gesture::{DragRelease, SnapPoints, SnapTarget};
use crate::queue::{Admission, DisplayQueue, StackKey};
use crate::store::FeedbackStore;
use crate::timer::{Clock, FiredTimer, SystemClock, TimerKind, TimerQueue};

/// Deferred work produced while the state is held.
enum Effect {
    Emit(FeedbackEvent),
    Invoke(Box<dyn FnOnce()>),
}

struct State {
    config: Config,
    timers: TimerQueue,
    queue: DisplayQueue,
    next_seq: u64,
    diagnostics: Option<DiagnosticsHandle>,
}

struct Inner {
    state: RefCell<State>,
    store: Rc<FeedbackStore>,
    bus: EventBus,
    clock: Rc<dyn Clock>,
    animations: AnimationSpec,
    timers_changed: Rc<Notify>,
    /// Run after [`FeedbackManager::reset`]; kept alive by their owners.
    reset_hooks: RefCell<Vec<Weak<dyn Fn()>>>,
}

/// Orchestrates every feedback item of one UI.
///
/// Cheap to clone; clones share the same items, timers and subscribers.
#[derive(Clone)]
pub struct FeedbackManager {
    inner: Rc<Inner>,
}

fn stack_key(item: &FeedbackItem) -> Option<StackKey> {
    item.kind()
        .queue_family()
        .map(|family| (family, item.position()))
}

/// One manager operation in progress.
struct Txn<'a> {
    state: &'a mut State,
    store: &'a FeedbackStore,
    animation: Duration,
    effects: Vec<Effect>,
    rescheduled: bool,
}

impl Txn<'_> {
    fn log(&self, kind: DiagnosticEventKind) {
        if let Some(handle) = &self.state.diagnostics {
            handle.log(kind);
        }
    }

    fn emit(&mut self, event: FeedbackEvent) {
        self.effects.push(Effect::Emit(event));
    }

    fn invoke(&mut self, f: impl FnOnce() + 'static) {
        self.effects.push(Effect::Invoke(Box::new(f)));
    }

    fn schedule(&mut self, id: FeedbackId, kind: TimerKind, from: Instant, after: Duration) {
        self.state.timers.schedule(id, kind, from, after);
        self.rescheduled = true;
    }

    fn cap(&self, key: StackKey) -> MaxVisible {
        self.state.config.max_visible(key.0)
    }

    /// Returns the item if it can currently be interacted with.
    fn interactive(&self, id: FeedbackId) -> Option<FeedbackItem> {
        self.store
            .get(id)
            .filter(|item| item.status().is_interactive())
    }

    /// Auto-dismiss budget for an item, `None` when it stays until dismissed.
    fn auto_dismiss_after(&self, kind: FeedbackKind, options: &FeedbackOptions) -> Option<Duration> {
        if !kind.supports_auto_dismiss() {
            return None;
        }
        let budget = match options.duration {
            Some(duration) => duration,
            None => match kind {
                FeedbackKind::Toast => options
                    .severity
                    .toast_duration(self.state.config.toast_duration())?,
                FeedbackKind::Banner => self.state.config.banner_duration(),
                _ => return None,
            },
        };
        (!budget.is_zero()).then_some(budget)
    }

    /// Moves `item` to `next`, stores it and records the change.
    ///
    /// Returns `None` and leaves the item untouched if the move is not a
    /// legal forward step.
    fn transition(&mut self, mut item: FeedbackItem, next: Status) -> Option<FeedbackItem> {
        let from = item.status();
        if !from.can_advance_to(next) {
            self.log(DiagnosticEventKind::RejectedTransition {
                id: item.id().value(),
                from,
                to: next,
            });
            return None;
        }
        item.set_status(next);
        self.store.replace(item.clone());
        self.emit(FeedbackEvent::StatusChanged {
            item: item.clone(),
            from,
        });
        Some(item)
    }

    /// Folds a duplicate into the live item carrying the same dedupe key.
    fn refresh_duplicate(
        &mut self,
        kind: FeedbackKind,
        options: &FeedbackOptions,
        at: Instant,
    ) -> Option<FeedbackId> {
        let key = options.dedupe_key.as_deref()?;
        let mut existing = self
            .store
            .select(|item| {
                item.kind() == kind && item.status().is_live() && item.dedupe_key() == Some(key)
            })
            .into_iter()
            .next()?;
        let id = existing.id();

        let content = existing.options_mut();
        content.message = options.message.clone();
        content.title = options.title.clone();
        content.severity = options.severity;
        content.duration = options.duration;

        if existing.status().is_interactive() {
            match self.auto_dismiss_after(kind, existing.options()) {
                // A hovered item keeps its timer frozen until the pointer leaves.
                Some(budget) => {
                    self.state
                        .timers
                        .restart(id, TimerKind::AutoDismiss, at, budget);
                    self.rescheduled = true;
                }
                None => {
                    self.state.timers.cancel(id, TimerKind::AutoDismiss);
                }
            }
        }

        self.store.replace(existing.clone());
        self.emit(FeedbackEvent::Updated(existing));
        self.log(DiagnosticEventKind::Deduplicated {
            id: id.value(),
            kind,
        });
        Some(id)
    }

    fn insert(&mut self, kind: FeedbackKind, options: FeedbackOptions, at: Instant) -> FeedbackId {
        let position = options
            .position
            .unwrap_or_else(|| self.state.config.position());
        let seq = self.state.next_seq;
        self.state.next_seq += 1;

        let mut item = FeedbackItem::new(kind, options, Status::Queued, at, seq, position);
        let id = item.id();
        let display = match stack_key(&item) {
            Some(key) => {
                let cap = self.cap(key);
                self.state.queue.admit(key, id, cap) == Admission::Display
            }
            None => true,
        };
        if display {
            item.set_status(Status::Entering);
        }

        self.store.insert(item.clone());
        self.emit(FeedbackEvent::Added(item.clone()));
        self.log(DiagnosticEventKind::Added {
            id: id.value(),
            kind,
            status: item.status(),
        });
        if display {
            self.start_display(item, at);
        }
        id
    }

    /// Starts the enter phase of an item that just got a slot.
    fn start_display(&mut self, item: FeedbackItem, at: Instant) {
        let id = item.id();
        if let Some(budget) = self.auto_dismiss_after(item.kind(), item.options()) {
            self.schedule(id, TimerKind::AutoDismiss, at, budget);
        }
        if self.animation.is_zero() {
            self.transition(item, Status::Visible);
        } else {
            self.schedule(id, TimerKind::EnterComplete, at, self.animation);
        }
    }

    /// Starts the exit of a displayed item, or drops a waiting one.
    ///
    /// Returns `false` if the item is absent or already leaving.
    fn dismiss(&mut self, id: FeedbackId, at: Instant, reason: DismissReason) -> bool {
        let Some(item) = self.store.get(id) else {
            return false;
        };
        match item.status() {
            Status::Queued => {
                if let Some(key) = stack_key(&item) {
                    self.state.queue.release(key, id);
                }
                self.state.timers.cancel_all(id);
                let mut gone = item;
                gone.set_status(Status::Removed);
                self.store.delete(id);
                self.log(DiagnosticEventKind::Dismissed {
                    id: id.value(),
                    reason,
                });
                self.log(DiagnosticEventKind::Removed { id: id.value() });
                self.emit(FeedbackEvent::Removed(gone));
                true
            }
            Status::Entering | Status::Visible => {
                self.state.timers.cancel_all(id);
                let Some(leaving) = self.transition(item, Status::Exiting) else {
                    return false;
                };
                self.log(DiagnosticEventKind::Dismissed {
                    id: id.value(),
                    reason,
                });
                self.emit(FeedbackEvent::Removed(leaving));
                if self.animation.is_zero() {
                    self.finish(id, at);
                } else {
                    self.schedule(id, TimerKind::ExitComplete, at, self.animation);
                }
                true
            }
            Status::Exiting | Status::Removed => false,
        }
    }

    /// Drops an item whose exit animation is over and frees its slot.
    fn finish(&mut self, id: FeedbackId, at: Instant) {
        let Some(mut item) = self.store.get(id) else {
            return;
        };
        if !item.status().can_advance_to(Status::Removed) {
            return;
        }
        item.set_status(Status::Removed);
        self.store.delete(id);
        self.log(DiagnosticEventKind::Removed { id: id.value() });
        let key = stack_key(&item);
        self.emit(FeedbackEvent::StatusChanged {
            item,
            from: Status::Exiting,
        });
        if let Some(key) = key {
            if self.state.queue.release(key, id) {
                self.promote(key, at);
            }
        }
    }

    /// Gives free slots of `key` to waiting items, oldest first.
    fn promote(&mut self, key: StackKey, at: Instant) {
        let cap = self.cap(key);
        for id in self.state.queue.promote(key, cap) {
            let Some(item) = self.store.get(id) else {
                continue;
            };
            let Some(item) = self.transition(item, Status::Entering) else {
                continue;
            };
            self.log(DiagnosticEventKind::Promoted { id: id.value() });
            self.start_display(item, at);
        }
    }

    /// Removes items immediately, without exit animation or callbacks.
    fn force_remove(&mut self, ids: &[FeedbackId], at: Instant) {
        for &id in ids {
            let Some(mut item) = self.store.get(id) else {
                continue;
            };
            self.state.timers.cancel_all(id);
            if let Some(key) = stack_key(&item) {
                self.state.queue.release(key, id);
            }
            // Exiting items were announced when they were dismissed.
            let announced = item.status() == Status::Exiting;
            item.set_status(Status::Removed);
            self.store.delete(id);
            if !announced {
                self.log(DiagnosticEventKind::Dismissed {
                    id: id.value(),
                    reason: DismissReason::Forced,
                });
            }
            self.log(DiagnosticEventKind::Removed { id: id.value() });
            if !announced {
                self.emit(FeedbackEvent::Removed(item));
            }
        }
        for key in self.state.queue.stacks_with_waiting() {
            self.promote(key, at);
        }
    }

    fn fire(&mut self, timer: FiredTimer) {
        let item = self.store.get(timer.id);
        let status = item.as_ref().map(FeedbackItem::status);
        match (timer.kind, item) {
            (TimerKind::EnterComplete, Some(item)) if item.status() == Status::Entering => {
                self.transition(item, Status::Visible);
            }
            (TimerKind::AutoDismiss, Some(item)) if item.status().is_interactive() => {
                self.dismiss(timer.id, timer.deadline, DismissReason::Timeout);
            }
            (TimerKind::ExitComplete, Some(item)) if item.status() == Status::Exiting => {
                self.finish(timer.id, timer.deadline);
            }
            (kind, _) => self.log(DiagnosticEventKind::StaleTimer {
                id: timer.id.value(),
                timer: kind,
                status,
            }),
        }
    }

    /// Records a user response and dismisses the item.
    fn respond(&mut self, id: FeedbackId, at: Instant, callback: Option<Box<dyn FnOnce()>>) {
        if let Some(callback) = callback {
            self.effects.push(Effect::Invoke(callback));
        }
        self.dismiss(id, at, DismissReason::Response);
    }

    fn cancel(&mut self, id: FeedbackId, at: Instant, reason: DismissReason) {
        let Some(item) = self.interactive(id) else {
            return;
        };
        if let Some(on_cancel) = item.options().on_cancel.clone() {
            self.invoke(move || on_cancel());
        }
        self.dismiss(id, at, reason);
    }
}

impl FeedbackManager {
    /// Creates a manager driven by the system clock.
    #[must_use]
    pub fn new(config: &Config, animations: AnimationSpec) -> Self {
        Self::with_clock(config, animations, Rc::new(SystemClock))
    }

    /// Creates a manager reading time from `clock`.
    #[must_use]
    pub fn with_clock(config: &Config, animations: AnimationSpec, clock: Rc<dyn Clock>) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(State {
                    config: config.clone(),
                    timers: TimerQueue::new(),
                    queue: DisplayQueue::new(),
                    next_seq: 0,
                    diagnostics: None,
                }),
                store: FeedbackStore::new(),
                bus: EventBus::new(),
                clock,
                animations,
                timers_changed: Rc::new(Notify::new()),
                reset_hooks: RefCell::new(Vec::new()),
            }),
        }
    }

    fn now(&self) -> Instant {
        self.inner.clock.now()
    }

    fn log(&self, kind: DiagnosticEventKind) {
        if let Some(handle) = &self.inner.state.borrow().diagnostics {
            handle.log(kind);
        }
    }

    /// Runs `f` against the state, then dispatches what it recorded.
    fn transact<R>(&self, f: impl FnOnce(&mut Txn<'_>) -> R) -> R {
        let (result, effects, rescheduled) = {
            let mut state = self.inner.state.borrow_mut();
            let mut txn = Txn {
                state: &mut *state,
                store: &self.inner.store,
                animation: self.inner.animations.duration,
                effects: Vec::new(),
                rescheduled: false,
            };
            let result = f(&mut txn);
            (result, txn.effects, txn.rescheduled)
        };

        if rescheduled {
            self.inner.timers_changed.notify_one();
        }
        self.inner.store.flush();
        for effect in effects {
            match effect {
                Effect::Emit(event) => self.inner.bus.emit(&event),
                Effect::Invoke(callback) => callback(),
            }
        }
        result
    }

    // ==========================================================================
    // Core operations
    // ==========================================================================

    /// Creates a feedback item and returns its id.
    ///
    /// The item starts `Entering`, or `Queued` when its stack is full. With a
    /// dedupe key matching a live item of the same kind, that item is
    /// refreshed instead and its id is returned. Never removes anything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] if `options` lack what `kind` needs.
    pub fn add(&self, kind: FeedbackKind, options: FeedbackOptions) -> Result<FeedbackId> {
        if let Err(err) = options.validate(kind) {
            self.log(DiagnosticEventKind::Rejected {
                kind,
                reason: err.to_string(),
            });
            return Err(Error::InvalidOptions(err));
        }
        let at = self.now();
        Ok(self.transact(|txn| match txn.refresh_duplicate(kind, &options, at) {
            Some(id) => id,
            None => txn.insert(kind, options, at),
        }))
    }

    /// Dismisses an item. Absent, exiting and removed ids are ignored.
    pub fn remove(&self, id: FeedbackId) {
        let at = self.now();
        self.transact(|txn| {
            txn.dismiss(id, at, DismissReason::Explicit);
        });
    }

    /// Returns a snapshot of an item still in the store.
    #[must_use]
    pub fn get(&self, id: FeedbackId) -> Option<FeedbackItem> {
        self.inner.store.get(id)
    }

    /// Merges `patch` into an item's options.
    pub fn update(&self, id: FeedbackId, patch: OptionsPatch) {
        if patch.is_empty() {
            return;
        }
        self.transact(|txn| {
            let Some(mut item) = txn.store.get(id) else {
                return;
            };
            item.options_mut().apply(patch);
            txn.store.replace(item.clone());
            txn.emit(FeedbackEvent::Updated(item));
        });
    }

    /// Removes every item at once, skipping exit animations and callbacks.
    pub fn remove_all(&self) {
        let ids: Vec<FeedbackId> = self.inner.store.snapshot().iter().map(FeedbackItem::id).collect();
        let at = self.now();
        self.transact(|txn| txn.force_remove(&ids, at));
    }

    /// Removes every item matching `predicate`, like [`Self::remove_all`].
    pub fn remove_where(&self, predicate: impl Fn(&FeedbackItem) -> bool) {
        let ids: Vec<FeedbackId> = self
            .inner
            .store
            .select(predicate)
            .iter()
            .map(FeedbackItem::id)
            .collect();
        if ids.is_empty() {
            return;
        }
        let at = self.now();
        self.transact(|txn| txn.force_remove(&ids, at));
    }

    pub fn on(&self, kind: EventKind, handler: impl Fn(&FeedbackEvent) + 'static) -> Subscription {
        self.inner.bus.on(kind, handler)
    }

    pub fn on_any(&self, handler: impl Fn(&FeedbackEvent) + 'static) -> Subscription {
        self.inner.bus.on_any(handler)
    }

    pub fn off(&self, id: SubscriptionId) {
        self.inner.bus.off(id);
    }

    /// Number of attached event handlers.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.bus.listener_count()
    }

    // ==========================================================================
    // User interaction
    // ==========================================================================

    /// Accepts a dialog: runs `on_confirm`, then dismisses.
    pub fn confirm(&self, id: FeedbackId) {
        let at = self.now();
        self.transact(|txn| {
            let Some(item) = txn.interactive(id) else {
                return;
            };
            let callback = item
                .options()
                .on_confirm
                .clone()
                .map(|f| Box::new(move || f()) as Box<dyn FnOnce()>);
            txn.respond(id, at, callback);
        });
    }

    /// Declines a dialog: runs `on_cancel`, then dismisses.
    pub fn cancel(&self, id: FeedbackId) {
        let at = self.now();
        self.transact(|txn| txn.cancel(id, at, DismissReason::Response));
    }

    /// Closes an item the way a close button, escape or backdrop would.
    ///
    /// Ignored for items that are not dismissible. Dialogs treat it as a
    /// cancel.
    pub fn dismiss(&self, id: FeedbackId) {
        let at = self.now();
        self.transact(|txn| {
            let Some(item) = txn.interactive(id) else {
                return;
            };
            if !item.options().dismissible {
                return;
            }
            if item.kind().is_dialog() {
                txn.cancel(id, at, DismissReason::User);
            } else {
                txn.dismiss(id, at, DismissReason::User);
            }
        });
    }

    /// Submits a prompt's current value.
    ///
    /// The validator runs first; a failure is attached to `options.error`
    /// and the prompt stays open.
    pub fn submit(&self, id: FeedbackId) {
        let Some(item) = self.inner.store.get(id) else {
            return;
        };
        if item.kind() != FeedbackKind::Prompt || !item.status().is_interactive() {
            return;
        }
        let value = item.options().value.clone();
        let verdict = match &item.options().validator {
            Some(validator) => validator(&value),
            None => Ok(()),
        };
        let at = self.now();
        self.transact(|txn| {
            let Some(mut item) = txn.interactive(id) else {
                return;
            };
            match verdict {
                Err(message) => {
                    item.options_mut().error = Some(message);
                    txn.store.replace(item.clone());
                    txn.emit(FeedbackEvent::Updated(item));
                    txn.log(DiagnosticEventKind::ValidationFailed { id: id.value() });
                }
                Ok(()) => {
                    let callback = item
                        .options()
                        .on_submit
                        .clone()
                        .map(|f| Box::new(move || f(value)) as Box<dyn FnOnce()>);
                    txn.respond(id, at, callback);
                }
            }
        });
    }

    /// Replaces a prompt's input value and clears any validation error.
    pub fn set_value(&self, id: FeedbackId, value: impl Into<String>) {
        let value = value.into();
        self.transact(|txn| {
            let Some(mut item) = txn.interactive(id) else {
                return;
            };
            if item.kind() != FeedbackKind::Prompt {
                return;
            }
            let options = item.options_mut();
            options.value.clone_from(&value);
            options.error = None;
            let on_change = options.on_value_change.clone();
            txn.store.replace(item.clone());
            txn.emit(FeedbackEvent::Updated(item));
            if let Some(on_change) = on_change {
                txn.invoke(move || on_change(value));
            }
        });
    }

    /// Picks an action of an action sheet, then dismisses it.
    ///
    /// Out-of-range indices are ignored.
    pub fn select(&self, id: FeedbackId, index: usize) {
        let at = self.now();
        self.transact(|txn| {
            let Some(item) = txn.interactive(id) else {
                return;
            };
            if item.kind() != FeedbackKind::ActionSheet || index >= item.options().actions.len() {
                return;
            }
            let callback = item
                .options()
                .on_select
                .clone()
                .map(|f| Box::new(move || f(index)) as Box<dyn FnOnce()>);
            txn.respond(id, at, callback);
        });
    }

    /// Freezes an item's auto-dismiss countdown (pointer hover).
    pub fn pause(&self, id: FeedbackId) {
        let at = self.now();
        self.inner
            .state
            .borrow_mut()
            .timers
            .pause(id, TimerKind::AutoDismiss, at);
    }

    /// Restarts a paused countdown with its remaining budget.
    pub fn resume(&self, id: FeedbackId) {
        let at = self.now();
        let resumed = self
            .inner
            .state
            .borrow_mut()
            .timers
            .resume(id, TimerKind::AutoDismiss, at);
        if resumed {
            self.inner.timers_changed.notify_one();
        }
    }

    /// Whether the item's countdown is currently held by [`Self::pause`].
    #[must_use]
    pub fn is_paused(&self, id: FeedbackId) -> bool {
        self.inner
            .state
            .borrow()
            .timers
            .is_paused(id, TimerKind::AutoDismiss)
    }

    /// When a running countdown will dismiss the item.
    ///
    /// `None` for sticky, paused or already leaving items. Adapters use it
    /// to draw a remaining-time bar.
    #[must_use]
    pub fn dismisses_at(&self, id: FeedbackId) -> Option<Instant> {
        self.inner
            .state
            .borrow()
            .timers
            .deadline(id, TimerKind::AutoDismiss)
    }

    /// Settles a sheet, drawer or action sheet after a drag.
    ///
    /// Snaps to the resolved point, or dismisses (as a cancel) when the
    /// drag closes a dismissible item.
    pub fn release_drag(&self, id: FeedbackId, release: DragRelease) {
        let at = self.now();
        self.transact(|txn| {
            let Some(mut item) = txn.interactive(id) else {
                return;
            };
            if !matches!(
                item.kind(),
                FeedbackKind::Sheet | FeedbackKind::Drawer | FeedbackKind::ActionSheet
            ) {
                return;
            }
            let points = SnapPoints::new(item.options().snap_points.clone());
            match points.resolve(item.options().snap_index, release) {
                SnapTarget::Snap(index) if index != item.options().snap_index => {
                    item.options_mut().snap_index = index;
                    txn.store.replace(item.clone());
                    txn.emit(FeedbackEvent::Updated(item));
                }
                SnapTarget::Snap(_) => {}
                SnapTarget::Dismiss if item.options().dismissible => {
                    txn.cancel(id, at, DismissReason::User);
                }
                SnapTarget::Dismiss => {}
            }
        });
    }

    // ==========================================================================
    // Timers and housekeeping
    // ==========================================================================

    /// Fires every timer due at the clock's current time.
    pub fn tick(&self) {
        self.advance_to(self.now());
    }

    /// Fires every timer due at `now`, in deadline order.
    pub fn advance_to(&self, now: Instant) {
        while let Some(timer) = self.take_due(now) {
            self.transact(|txn| txn.fire(timer));
        }
    }

    fn take_due(&self, now: Instant) -> Option<FiredTimer> {
        self.inner.state.borrow_mut().timers.take_due(now)
    }

    /// Earliest pending (unpaused) timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inner.state.borrow().timers.next_deadline()
    }

    /// Items holding a display slot in a stack.
    #[must_use]
    pub fn visible_count(&self, family: QueueFamily, position: Position) -> usize {
        self.inner
            .state
            .borrow()
            .queue
            .active_count((family, position))
    }

    /// Items waiting for a display slot in a stack.
    #[must_use]
    pub fn queued_count(&self, family: QueueFamily, position: Position) -> usize {
        self.inner
            .state
            .borrow()
            .queue
            .waiting_count((family, position))
    }

    #[must_use]
    pub fn store(&self) -> Rc<FeedbackStore> {
        Rc::clone(&self.inner.store)
    }

    #[must_use]
    pub fn config(&self) -> Config {
        self.inner.state.borrow().config.clone()
    }

    #[must_use]
    pub fn animations(&self) -> &AnimationSpec {
        &self.inner.animations
    }

    /// Sends lifecycle diagnostics to `handle` from now on.
    pub fn set_diagnostics(&self, handle: DiagnosticsHandle) {
        self.inner.state.borrow_mut().diagnostics = Some(handle);
    }

    /// Signalled whenever a timer is scheduled or resumed.
    pub(crate) fn timers_changed(&self) -> Rc<Notify> {
        Rc::clone(&self.inner.timers_changed)
    }

    /// Drops every item, timer and subscriber without emitting anything.
    ///
    /// Pending dialogs resolve as externally removed. Attached
    /// [`crate::resources::ModalResources`] release what they hold and keep
    /// tracking the items added afterwards.
    pub fn reset(&self) {
        {
            let mut state = self.inner.state.borrow_mut();
            state.timers.clear();
            state.queue.clear();
        }
        self.inner.store.clear_silently();
        self.inner.bus.clear();

        let hooks: Vec<Rc<dyn Fn()>> = {
            let mut hooks = self.inner.reset_hooks.borrow_mut();
            hooks.retain(|hook| hook.strong_count() > 0);
            hooks.iter().filter_map(Weak::upgrade).collect()
        };
        for hook in hooks {
            hook();
        }
    }

    /// Calls `hook` after every [`Self::reset`] until the caller drops it.
    pub(crate) fn on_reset(&self, hook: &Rc<dyn Fn()>) {
        self.inner.reset_hooks.borrow_mut().push(Rc::downgrade(hook));
    }
}

impl std::fmt::Debug for FeedbackManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("FeedbackManager")
            .field("items", &self.inner.store.len())
            .field("timers", &state.timers.len())
            .field("listeners", &self.inner.bus.listener_count())
            .field("animations", &self.inner.animations)
            .finish_non_exhaustive()
    }
}
