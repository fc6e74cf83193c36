// SPDX-License-Identifier: MPL-2.0
//! One-shot guard for adapter style injection.

use std::sync::atomic::{AtomicBool, Ordering};

/// Runs an initializer at most once per process.
///
/// Adapters keep one in a `static` and call [`InjectOnce::run`] from
/// `inject_styles`, so mounting many containers injects a single stylesheet.
///
/// ```
/// use feedback_core::adapter::InjectOnce;
///
/// static STYLES: InjectOnce = InjectOnce::new();
///
/// let mut injected = 0;
/// STYLES.run(|| injected += 1);
/// STYLES.run(|| injected += 1);
/// assert_eq!(injected, 1);
/// ```
#[derive(Debug, Default)]
pub struct InjectOnce(AtomicBool);

impl InjectOnce {
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Calls `inject` if it has not run yet. Returns whether it ran.
    pub fn run(&self, inject: impl FnOnce()) -> bool {
        if self.0.swap(true, Ordering::AcqRel) {
            return false;
        }
        inject();
        true
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
