// SPDX-License-Identifier: MPL-2.0
//! What a visual implementation must provide.
//!
//! An adapter turns a feedback item into whatever its UI toolkit renders
//! (`Output`). It has one slot per [`FeedbackKind`]; a slot that returns
//! `None` is reported as missing by the registry.

use std::borrow::Cow;
use std::time::{Duration, Instant};

use super::ThemeMode;
use crate::config::{default_animation_duration, DEFAULT_ENTER_ANIMATION, DEFAULT_EXIT_ANIMATION};
use crate::feedback::{FeedbackId, FeedbackKind, FeedbackOptions, Status};
use crate::gesture::DragRelease;
use crate::manager::FeedbackManager;

/// Enter/exit animation names and the time each phase takes.
///
/// `duration` is the only timing the manager uses for the entering and
/// exiting phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationSpec {
    pub enter: Cow<'static, str>,
    pub exit: Cow<'static, str>,
    pub duration: Duration,
}

impl AnimationSpec {
    #[must_use]
    pub fn new(
        enter: impl Into<Cow<'static, str>>,
        exit: impl Into<Cow<'static, str>>,
        duration: Duration,
    ) -> Self {
        Self {
            enter: enter.into(),
            exit: exit.into(),
            duration,
        }
    }

    /// No animation: items become visible and disappear immediately.
    #[must_use]
    pub fn instant() -> Self {
        Self::default().with_duration(Duration::ZERO)
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::new(
            DEFAULT_ENTER_ANIMATION,
            DEFAULT_EXIT_ANIMATION,
            default_animation_duration(),
        )
    }
}

/// Interaction entry points bound to one item.
///
/// Adapters wire their buttons, inputs and gestures to these methods.
/// Every method is a no-op once the item is gone.
#[derive(Clone)]
pub struct FeedbackHandle {
    manager: FeedbackManager,
    id: FeedbackId,
}

impl FeedbackHandle {
    #[must_use]
    pub fn new(manager: FeedbackManager, id: FeedbackId) -> Self {
        Self { manager, id }
    }

    #[must_use]
    pub fn id(&self) -> FeedbackId {
        self.id
    }

    pub fn confirm(&self) {
        self.manager.confirm(self.id);
    }

    pub fn cancel(&self) {
        self.manager.cancel(self.id);
    }

    /// Close button, escape key or backdrop click.
    pub fn dismiss(&self) {
        self.manager.dismiss(self.id);
    }

    pub fn submit(&self) {
        self.manager.submit(self.id);
    }

    pub fn set_value(&self, value: impl Into<String>) {
        self.manager.set_value(self.id, value);
    }

    pub fn select(&self, index: usize) {
        self.manager.select(self.id, index);
    }

    /// Pointer entered the item.
    pub fn pause(&self) {
        self.manager.pause(self.id);
    }

    /// Pointer left the item.
    pub fn resume(&self) {
        self.manager.resume(self.id);
    }

    pub fn release_drag(&self, release: DragRelease) {
        self.manager.release_drag(self.id, release);
    }
}

impl std::fmt::Debug for FeedbackHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackHandle").field("id", &self.id).finish()
    }
}

/// Everything a slot needs to draw one item.
#[derive(Debug, Clone)]
pub struct SlotProps {
    pub id: FeedbackId,
    pub kind: FeedbackKind,
    pub status: Status,
    /// When the item was requested, for relative timestamps.
    pub created_at: Instant,
    pub options: FeedbackOptions,
    pub dark_mode: bool,
    pub handle: FeedbackHandle,
}

/// A visual implementation of every feedback kind.
pub trait FeedbackAdapter {
    /// What the toolkit renders (a widget, an element tree, a string...).
    type Output;

    fn name(&self) -> &str;

    /// Renders `kind`, or returns `None` if this adapter has no such slot.
    fn render(&self, kind: FeedbackKind, props: &SlotProps) -> Option<Self::Output>;

    fn is_dark_mode(&self) -> bool {
        ThemeMode::System.is_dark()
    }

    /// Installs global styles. Must be idempotent (see `InjectOnce`).
    fn inject_styles(&self) {}

    fn animations(&self) -> AnimationSpec {
        AnimationSpec::default()
    }
}
