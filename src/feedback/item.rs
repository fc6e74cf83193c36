// SPDX-License-Identifier: MPL-2.0
//! The tracked entity and its identifier.

use super::kind::{FeedbackKind, Position};
use super::options::FeedbackOptions;
use super::status::Status;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Unique identifier for a feedback item.
///
/// Identifiers come from a process-wide counter and are never reused, so
/// they also order items by arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeedbackId(u64);

impl FeedbackId {
    /// Creates a new unique feedback ID.
    pub(crate) fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fb-{}", self.0)
    }
}

/// One toast, modal, alert... tracked by the manager.
///
/// Values handed out by the store and by events are snapshots; mutating
/// them has no effect on the engine.
#[derive(Debug, Clone)]
pub struct FeedbackItem {
    id: FeedbackId,
    kind: FeedbackKind,
    options: FeedbackOptions,
    status: Status,
    created_at: Instant,
    /// Arrival order; used by queue policy for stacking.
    seq: u64,
    /// Bumped on every mutation.
    revision: u64,
    position: Position,
}

impl FeedbackItem {
    pub(crate) fn new(
        kind: FeedbackKind,
        options: FeedbackOptions,
        status: Status,
        created_at: Instant,
        seq: u64,
        position: Position,
    ) -> Self {
        Self {
            id: FeedbackId::next(),
            kind,
            options,
            status,
            created_at,
            seq,
            revision: 0,
            position,
        }
    }

    #[must_use]
    pub fn id(&self) -> FeedbackId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> FeedbackKind {
        self.kind
    }

    #[must_use]
    pub fn options(&self) -> &FeedbackOptions {
        &self.options
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    #[must_use]
    pub fn group_order(&self) -> u64 {
        self.seq
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Resolved stack anchor (options or configured default).
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn dedupe_key(&self) -> Option<&str> {
        self.options.dedupe_key.as_deref()
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.options.message.as_deref()
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
        self.revision += 1;
    }

    pub(crate) fn options_mut(&mut self) -> &mut FeedbackOptions {
        self.revision += 1;
        &mut self.options
    }
}
