// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for lifecycle tracking.
//!
//! This module defines what the manager records about each item so that
//! a host can reconstruct what happened when a toast went missing or a
//! dialog never resolved.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::feedback::{FeedbackKind, Status};
use crate::timer::TimerKind;

/// Why an item left the screen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DismissReason {
    /// The auto-dismiss budget ran out.
    Timeout,
    /// `remove` was called.
    Explicit,
    /// The user closed it (close button, escape, backdrop, drag).
    User,
    /// The user answered a dialog (confirm, cancel, submit, select).
    Response,
    /// `remove_all` / `remove_where`.
    Forced,
}

/// Lifecycle moments captured for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// An item was created.
    Added {
        id: u64,
        kind: FeedbackKind,
        status: Status,
    },

    /// `add` folded a duplicate into an existing item.
    Deduplicated { id: u64, kind: FeedbackKind },

    /// `add` rejected malformed options.
    Rejected { kind: FeedbackKind, reason: String },

    /// A queued item got a display slot.
    Promoted { id: u64 },

    /// An item started leaving.
    Dismissed { id: u64, reason: DismissReason },

    /// An item was dropped from the store.
    Removed { id: u64 },

    /// A timer fired for an item no longer in the expected state.
    StaleTimer {
        id: u64,
        timer: TimerKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<Status>,
    },

    /// A status change that would not move the item forward was refused.
    RejectedTransition { id: u64, from: Status, to: Status },

    /// A prompt submission failed validation.
    ValidationFailed { id: u64 },
}

/// A diagnostic event with its capture time.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// Monotonic capture time.
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}
