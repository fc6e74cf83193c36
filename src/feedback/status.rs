// SPDX-License-Identifier: MPL-2.0
//! Lifecycle states shared by every feedback item.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an item is in its lifecycle.
///
/// States only move forward: `Queued → Entering → Visible → Exiting → Removed`.
/// `Queued` is skipped when a slot is free on arrival, and an item that is
/// still `Entering` may be dismissed straight into `Exiting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Waiting for a display slot.
    Queued,
    /// Mounted, enter animation running.
    Entering,
    /// Fully displayed.
    Visible,
    /// Dismissed, exit animation running.
    Exiting,
    /// Terminal. The store drops the item.
    Removed,
}

impl Status {
    fn rank(self) -> u8 {
        match self {
            Status::Queued => 0,
            Status::Entering => 1,
            Status::Visible => 2,
            Status::Exiting => 3,
            Status::Removed => 4,
        }
    }

    /// Whether a regular (timer or user driven) transition to `next` is legal.
    ///
    /// Force removal and dropping a still-queued item are the only ways to
    /// reach `Removed` from anything other than `Exiting`; both bypass this
    /// check.
    #[must_use]
    pub fn can_advance_to(self, next: Status) -> bool {
        match (self, next) {
            (Status::Queued, Status::Entering) => true,
            (Status::Entering, Status::Visible | Status::Exiting) => true,
            (Status::Visible, Status::Exiting) => true,
            (Status::Exiting, Status::Removed) => true,
            _ => false,
        }
    }

    /// Whether the item occupies a slot and can still respond to the user.
    #[must_use]
    pub fn is_interactive(self) -> bool {
        matches!(self, Status::Entering | Status::Visible)
    }

    /// Whether the item has not yet been dismissed.
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, Status::Queued | Status::Entering | Status::Visible)
    }

    /// Whether the item is mounted by its container.
    #[must_use]
    pub fn is_displayed(self) -> bool {
        matches!(self, Status::Entering | Status::Visible | Status::Exiting)
    }

    /// Whether `self` comes strictly after `other` in the lifecycle.
    #[must_use]
    pub fn is_after(self, other: Status) -> bool {
        self.rank() > other.rank()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Queued => "queued",
            Status::Entering => "entering",
            Status::Visible => "visible",
            Status::Exiting => "exiting",
            Status::Removed => "removed",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Status; 5] = [
        Status::Queued,
        Status::Entering,
        Status::Visible,
        Status::Exiting,
        Status::Removed,
    ];

    #[test]
    fn legal_transitions_always_move_forward() {
        for from in ALL {
            for to in ALL {
                if from.can_advance_to(to) {
                    assert!(to.is_after(from), "{from} -> {to} moves backwards");
                }
            }
        }
    }

    #[test]
    fn removed_is_terminal() {
        for to in ALL {
            assert!(!Status::Removed.can_advance_to(to));
        }
    }

    #[test]
    fn exiting_cannot_return_to_a_live_state() {
        assert!(!Status::Exiting.can_advance_to(Status::Visible));
        assert!(!Status::Exiting.can_advance_to(Status::Entering));
    }

    #[test]
    fn queued_must_enter_before_anything_else() {
        assert!(Status::Queued.can_advance_to(Status::Entering));
        assert!(!Status::Queued.can_advance_to(Status::Visible));
        assert!(!Status::Queued.can_advance_to(Status::Removed));
    }

    #[test]
    fn entering_may_be_dismissed_early() {
        assert!(Status::Entering.can_advance_to(Status::Exiting));
    }
}
