// SPDX-License-Identifier: MPL-2.0
//! Display caps for stacked feedback.
//!
//! Each (family, position) stack displays at most `cap` items. Items beyond
//! the cap wait in arrival order and are promoted as displayed ones are
//! released. A displayed item keeps its slot until it is fully removed,
//! exit animation included.

use crate::feedback::{FeedbackId, MaxVisible, Position, QueueFamily};
use std::collections::{HashMap, VecDeque};

/// Identifies one stack of toasts or alerts.
pub type StackKey = (QueueFamily, Position);

/// Outcome of offering a new item to a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// A slot was free; display now.
    Display,
    /// The stack is full; the item waits.
    Wait,
}

#[derive(Debug, Default)]
struct Stack {
    /// Items holding a slot, oldest first.
    active: Vec<FeedbackId>,
    /// Items waiting for a slot, oldest first.
    waiting: VecDeque<FeedbackId>,
}

/// Slot bookkeeping for every stack.
#[derive(Debug, Default)]
pub struct DisplayQueue {
    stacks: HashMap<StackKey, Stack>,
}

impl DisplayQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a new item to its stack.
    ///
    /// An item is only displayed immediately if nobody is already waiting,
    /// so arrival order is preserved.
    pub fn admit(&mut self, key: StackKey, id: FeedbackId, cap: MaxVisible) -> Admission {
        let stack = self.stacks.entry(key).or_default();
        if stack.waiting.is_empty() && stack.active.len() < cap.value() {
            stack.active.push(id);
            Admission::Display
        } else {
            stack.waiting.push_back(id);
            Admission::Wait
        }
    }

    /// Frees the slot (or the waiting place) held by `id`.
    ///
    /// Returns `true` if `id` was holding a slot.
    pub fn release(&mut self, key: StackKey, id: FeedbackId) -> bool {
        let Some(stack) = self.stacks.get_mut(&key) else {
            return false;
        };
        if let Some(pos) = stack.active.iter().position(|a| *a == id) {
            stack.active.remove(pos);
            return true;
        }
        if let Some(pos) = stack.waiting.iter().position(|w| *w == id) {
            stack.waiting.remove(pos);
        }
        false
    }

    /// Moves waiting items into free slots, oldest first.
    ///
    /// Returns the promoted ids in promotion order.
    pub fn promote(&mut self, key: StackKey, cap: MaxVisible) -> Vec<FeedbackId> {
        let mut promoted = Vec::new();
        if let Some(stack) = self.stacks.get_mut(&key) {
            while stack.active.len() < cap.value() {
                match stack.waiting.pop_front() {
                    Some(id) => {
                        stack.active.push(id);
                        promoted.push(id);
                    }
                    None => break,
                }
            }
        }
        promoted
    }

    /// Keys of every stack with at least one waiting item.
    #[must_use]
    pub fn stacks_with_waiting(&self) -> Vec<StackKey> {
        let mut keys: Vec<StackKey> = self
            .stacks
            .iter()
            .filter(|(_, s)| !s.waiting.is_empty())
            .map(|(k, _)| *k)
            .collect();
        keys.sort_unstable();
        keys
    }

    #[must_use]
    pub fn active_count(&self, key: StackKey) -> usize {
        self.stacks.get(&key).map_or(0, |s| s.active.len())
    }

    #[must_use]
    pub fn waiting_count(&self, key: StackKey) -> usize {
        self.stacks.get(&key).map_or(0, |s| s.waiting.len())
    }

    #[cfg(test)]
    pub fn waiting(&self, key: StackKey) -> Vec<FeedbackId> {
        self.stacks
            .get(&key)
            .map(|s| s.waiting.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.stacks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: StackKey = (QueueFamily::Toast, Position::TopRight);

    fn ids(n: usize) -> Vec<FeedbackId> {
        (0..n).map(|_| FeedbackId::next()).collect()
    }

    #[test]
    fn admits_until_cap_then_waits() {
        let mut q = DisplayQueue::new();
        let cap = MaxVisible::new(2);
        let ids = ids(3);

        assert_eq!(q.admit(KEY, ids[0], cap), Admission::Display);
        assert_eq!(q.admit(KEY, ids[1], cap), Admission::Display);
        assert_eq!(q.admit(KEY, ids[2], cap), Admission::Wait);
        assert_eq!(q.active_count(KEY), 2);
        assert_eq!(q.waiting_count(KEY), 1);
    }

    #[test]
    fn stacks_are_independent() {
        let mut q = DisplayQueue::new();
        let cap = MaxVisible::new(1);
        let ids = ids(2);
        let other = (QueueFamily::Toast, Position::BottomLeft);

        assert_eq!(q.admit(KEY, ids[0], cap), Admission::Display);
        assert_eq!(q.admit(other, ids[1], cap), Admission::Display);
    }

    #[test]
    fn promotion_is_fifo() {
        let mut q = DisplayQueue::new();
        let cap = MaxVisible::new(1);
        let ids = ids(4);
        for id in &ids {
            q.admit(KEY, *id, cap);
        }

        assert!(q.release(KEY, ids[0]));
        assert_eq!(q.promote(KEY, cap), vec![ids[1]]);
        assert!(q.release(KEY, ids[1]));
        assert_eq!(q.promote(KEY, cap), vec![ids[2]]);
        assert_eq!(q.waiting(KEY), vec![ids[3]]);
    }

    #[test]
    fn releasing_a_waiting_item_frees_no_slot() {
        let mut q = DisplayQueue::new();
        let cap = MaxVisible::new(1);
        let ids = ids(2);
        q.admit(KEY, ids[0], cap);
        q.admit(KEY, ids[1], cap);

        assert!(!q.release(KEY, ids[1]));
        assert_eq!(q.waiting_count(KEY), 0);
        assert!(q.promote(KEY, cap).is_empty());
    }

    #[test]
    fn late_arrival_does_not_jump_the_queue() {
        let mut q = DisplayQueue::new();
        let cap = MaxVisible::new(1);
        let ids = ids(3);
        q.admit(KEY, ids[0], cap);
        q.admit(KEY, ids[1], cap);
        q.release(KEY, ids[0]);

        // Slot is free but ids[1] has not been promoted yet.
        assert_eq!(q.admit(KEY, ids[2], cap), Admission::Wait);
        assert_eq!(q.promote(KEY, cap), vec![ids[1]]);
    }
}
