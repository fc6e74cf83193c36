// SPDX-License-Identifier: MPL-2.0
//! Async timer driver for hosts running a tokio runtime.
//!
//! The manager only fires timers when asked. [`run_timers`] sleeps until the
//! next deadline and ticks, waking early whenever a new timer is scheduled.
//! It must run on the same thread as the manager, typically through
//! `tokio::task::spawn_local` inside a `LocalSet`.

use std::time::Instant;

use crate::manager::FeedbackManager;
use crate::timer::Clock;

/// Clock backed by tokio's time source, so paused test runtimes drive the
/// manager deterministically.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// Fires the manager's timers as they come due. Never returns; abort the
/// task to stop it.
///
/// The manager should be built with [`TokioClock`].
pub async fn run_timers(manager: FeedbackManager) {
    let changed = manager.timers_changed();
    loop {
        let notified = changed.notified();
        match manager.next_deadline() {
            Some(deadline) => {
                tokio::select! {
                    () = tokio::time::sleep_until(deadline.into()) => {}
                    () = notified => {}
                }
            }
            None => notified.await,
        }
        manager.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::AnimationSpec;
    use crate::config::Config;
    use crate::feedback::{FeedbackKind, FeedbackOptions};
    use std::rc::Rc;
    use std::time::Duration;
    use tokio::task::LocalSet;

    fn manager() -> FeedbackManager {
        FeedbackManager::with_clock(
            &Config::default(),
            AnimationSpec::default().with_duration(Duration::from_millis(200)),
            Rc::new(TokioClock),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn toast_is_dismissed_on_schedule() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let manager = manager();
                let driver = tokio::task::spawn_local(run_timers(manager.clone()));

                let id = manager
                    .add(
                        FeedbackKind::Toast,
                        FeedbackOptions::message("Saved").with_duration(Duration::from_secs(3)),
                    )
                    .expect("valid");

                tokio::time::sleep(Duration::from_millis(2900)).await;
                assert!(manager.get(id).is_some());

                tokio::time::sleep(Duration::from_millis(400)).await;
                assert!(manager.get(id).is_none());

                driver.abort();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn wakes_for_timers_scheduled_while_idle() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let manager = manager();
                let driver = tokio::task::spawn_local(run_timers(manager.clone()));

                // Let the driver park with nothing scheduled.
                tokio::time::sleep(Duration::from_secs(10)).await;

                let id = manager
                    .add(
                        FeedbackKind::Toast,
                        FeedbackOptions::message("late").with_duration(Duration::from_secs(1)),
                    )
                    .expect("valid");
                tokio::time::sleep(Duration::from_millis(1300)).await;
                assert!(manager.get(id).is_none());

                driver.abort();
            })
            .await;
    }
}
