// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the engine. Constants are organized by category.
//!
//! # Categories
//!
//! - **Queue**: Maximum simultaneously displayed items per stack
//! - **Durations**: Auto-dismiss budgets per kind and severity
//! - **Animation**: Fallback enter/exit timing when no adapter is given
//! - **Diagnostics**: Event buffer sizing

use std::time::Duration;

// ==========================================================================
// Queue Defaults
// ==========================================================================

/// Default number of toasts displayed at once per position.
pub const DEFAULT_TOAST_MAX_VISIBLE: usize = 3;

/// Default number of alerts displayed at once per position.
pub const DEFAULT_ALERT_MAX_VISIBLE: usize = 3;

/// Smallest accepted queue cap.
pub const MIN_MAX_VISIBLE: usize = 1;

/// Largest accepted queue cap.
pub const MAX_MAX_VISIBLE: usize = 10;

// ==========================================================================
// Duration Defaults
// ==========================================================================

/// Auto-dismiss budget for success and info toasts (in milliseconds).
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3_000;

/// Auto-dismiss budget for warning toasts (in milliseconds).
pub const DEFAULT_WARNING_TOAST_DURATION_MS: u64 = 5_000;

/// Longest auto-dismiss budget accepted from configuration (in milliseconds).
pub const MAX_TOAST_DURATION_MS: u64 = 60_000;

/// Banners stay until dismissed unless a duration is given.
pub const DEFAULT_BANNER_DURATION_MS: u64 = 0;

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Enter/exit animation time used when no adapter declares one.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 200;

/// Default enter animation name.
pub const DEFAULT_ENTER_ANIMATION: &str = "fade-in";

/// Default exit animation name.
pub const DEFAULT_EXIT_ANIMATION: &str = "fade-out";

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 500;

/// Minimum diagnostic buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 16;

/// Maximum diagnostic buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

/// Bounded channel size between handles and the collector.
pub const DIAGNOSTICS_CHANNEL_CAPACITY: usize = 100;

/// Returns the fallback animation duration as a `Duration`.
#[must_use]
pub fn default_animation_duration() -> Duration {
    Duration::from_millis(DEFAULT_ANIMATION_DURATION_MS)
}

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_MAX_VISIBLE > 0);
    assert!(MAX_MAX_VISIBLE >= MIN_MAX_VISIBLE);
    assert!(DEFAULT_TOAST_MAX_VISIBLE >= MIN_MAX_VISIBLE);
    assert!(DEFAULT_TOAST_MAX_VISIBLE <= MAX_MAX_VISIBLE);
    assert!(DEFAULT_ALERT_MAX_VISIBLE >= MIN_MAX_VISIBLE);
    assert!(DEFAULT_ALERT_MAX_VISIBLE <= MAX_MAX_VISIBLE);

    assert!(DEFAULT_TOAST_DURATION_MS > 0);
    assert!(DEFAULT_WARNING_TOAST_DURATION_MS > DEFAULT_TOAST_DURATION_MS);
    assert!(MAX_TOAST_DURATION_MS >= DEFAULT_WARNING_TOAST_DURATION_MS);

    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};
