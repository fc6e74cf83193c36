// SPDX-License-Identifier: MPL-2.0
//! Feedback newtypes.
//!
//! This module provides type-safe wrappers for queue values,
//! ensuring they are always within valid ranges.

use crate::config::{DEFAULT_TOAST_MAX_VISIBLE, MAX_MAX_VISIBLE, MIN_MAX_VISIBLE};

// =============================================================================
// MaxVisible
// =============================================================================

/// Maximum number of simultaneously displayed items in one stack.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (1–10 items).
///
/// # Example
///
/// ```
/// use feedback_core::feedback::MaxVisible;
///
/// let cap = MaxVisible::new(4);
/// assert_eq!(cap.value(), 4);
///
/// // Values outside range are clamped
/// let too_high = MaxVisible::new(100);
/// assert_eq!(too_high.value(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxVisible(usize);

impl MaxVisible {
    /// Creates a new cap, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(MIN_MAX_VISIBLE, MAX_MAX_VISIBLE))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Returns true if this is the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_MAX_VISIBLE
    }

    /// Returns true if this is the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_MAX_VISIBLE
    }
}

impl Default for MaxVisible {
    fn default() -> Self {
        Self(DEFAULT_TOAST_MAX_VISIBLE)
    }
}
