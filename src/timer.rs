// SPDX-License-Identifier: MPL-2.0
//! Delayed lifecycle callbacks with pause/resume.
//!
//! The queue never calls anything itself: the manager asks for due timers
//! with [`TimerQueue::take_due`] and decides, based on the item's *current*
//! status, whether a fired timer still applies.

use crate::feedback::FeedbackId;
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Monotonic wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for deterministic tests and replays.
///
/// Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    #[must_use]
    pub fn starting_at(start: Instant) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, at: Instant) {
        self.now.set(at);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// `entering → visible` once the enter animation is over.
    EnterComplete,
    /// `visible → exiting` once the display budget is spent.
    AutoDismiss,
    /// `exiting → removed` once the exit animation is over.
    ExitComplete,
}

#[derive(Debug, Clone, Copy)]
enum TimerState {
    Running { deadline: Instant },
    Paused { remaining: Duration },
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    state: TimerState,
    /// Tie-break for timers sharing a deadline.
    seq: u64,
}

/// A timer that reached its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: FeedbackId,
    pub kind: TimerKind,
    pub deadline: Instant,
}

/// Pending timers keyed by item and purpose.
#[derive(Debug, Default)]
pub struct TimerQueue {
    timers: HashMap<(FeedbackId, TimerKind), Timer>,
    next_seq: u64,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules (or reschedules) a timer `after` from `from`.
    pub fn schedule(&mut self, id: FeedbackId, kind: TimerKind, from: Instant, after: Duration) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.insert(
            (id, kind),
            Timer {
                state: TimerState::Running {
                    deadline: from + after,
                },
                seq,
            },
        );
    }

    /// Gives a timer a fresh `after` budget.
    ///
    /// A paused timer stays paused with the new budget; anything else is
    /// (re)scheduled from `from`.
    pub fn restart(&mut self, id: FeedbackId, kind: TimerKind, from: Instant, after: Duration) {
        match self.timers.get_mut(&(id, kind)) {
            Some(timer) if matches!(timer.state, TimerState::Paused { .. }) => {
                timer.state = TimerState::Paused { remaining: after };
            }
            _ => self.schedule(id, kind, from, after),
        }
    }

    /// Cancels one timer. Returns whether it existed.
    pub fn cancel(&mut self, id: FeedbackId, kind: TimerKind) -> bool {
        self.timers.remove(&(id, kind)).is_some()
    }

    /// Cancels every timer belonging to `id`.
    pub fn cancel_all(&mut self, id: FeedbackId) {
        self.timers.retain(|(owner, _), _| *owner != id);
    }

    /// Freezes a running timer, keeping its remaining budget.
    ///
    /// Returns `false` if there is no such timer or it is already paused.
    pub fn pause(&mut self, id: FeedbackId, kind: TimerKind, now: Instant) -> bool {
        match self.timers.get_mut(&(id, kind)) {
            Some(timer) => match timer.state {
                TimerState::Running { deadline } => {
                    timer.state = TimerState::Paused {
                        remaining: deadline.saturating_duration_since(now),
                    };
                    true
                }
                TimerState::Paused { .. } => false,
            },
            None => false,
        }
    }

    /// Restarts a paused timer with its remaining budget.
    ///
    /// Returns `false` if there is no such timer or it is not paused.
    pub fn resume(&mut self, id: FeedbackId, kind: TimerKind, now: Instant) -> bool {
        match self.timers.get_mut(&(id, kind)) {
            Some(timer) => match timer.state {
                TimerState::Paused { remaining } => {
                    timer.state = TimerState::Running {
                        deadline: now + remaining,
                    };
                    true
                }
                TimerState::Running { .. } => false,
            },
            None => false,
        }
    }

    #[cfg(test)]
    pub fn is_scheduled(&self, id: FeedbackId, kind: TimerKind) -> bool {
        self.timers.contains_key(&(id, kind))
    }

    #[must_use]
    pub fn is_paused(&self, id: FeedbackId, kind: TimerKind) -> bool {
        matches!(
            self.timers.get(&(id, kind)).map(|t| t.state),
            Some(TimerState::Paused { .. })
        )
    }

    /// Deadline of a running timer.
    #[must_use]
    pub fn deadline(&self, id: FeedbackId, kind: TimerKind) -> Option<Instant> {
        match self.timers.get(&(id, kind))?.state {
            TimerState::Running { deadline } => Some(deadline),
            TimerState::Paused { .. } => None,
        }
    }

    /// Earliest deadline among running timers.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers
            .values()
            .filter_map(|t| match t.state {
                TimerState::Running { deadline } => Some(deadline),
                TimerState::Paused { .. } => None,
            })
            .min()
    }

    /// Removes and returns the single earliest timer due at `now`.
    ///
    /// Ties are broken by scheduling order. Popping one at a time lets the
    /// caller schedule follow-up timers that may themselves already be due.
    pub fn take_due(&mut self, now: Instant) -> Option<FiredTimer> {
        let (key, deadline) = self
            .timers
            .iter()
            .filter_map(|(key, t)| match t.state {
                TimerState::Running { deadline } if deadline <= now => {
                    Some((*key, deadline, t.seq))
                }
                _ => None,
            })
            .min_by_key(|(_, deadline, seq)| (*deadline, *seq))
            .map(|(key, deadline, _)| (key, deadline))?;
        self.timers.remove(&key);
        Some(FiredTimer {
            id: key.0,
            kind: key.1,
            deadline,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }
}
