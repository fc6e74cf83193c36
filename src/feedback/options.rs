// SPDX-License-Identifier: MPL-2.0
//! Per-item configuration.
//!
//! `FeedbackOptions` is what adapters render from. The manager only reads
//! the lifecycle fields (`duration`, `dismissible`, `dedupe_key`,
//! `position`) and the callbacks it must fire on user responses; everything
//! else is passed through untouched.

use super::kind::{FeedbackKind, Position};
use crate::error::OptionsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// User callback attached to an item.
pub type Callback = Rc<dyn Fn()>;

/// User callback receiving a value (prompt input, selected action).
pub type ValueCallback<T> = Rc<dyn Fn(T)>;

/// Prompt input validator. `Err` carries the message shown to the user.
pub type Validator = Rc<dyn Fn(&str) -> Result<(), String>>;

/// Severity level determines default duration and visual styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Operation completed successfully.
    Success,
    /// Informational message.
    #[default]
    Info,
    /// Warning that doesn't block operation.
    Warning,
    /// Error requiring attention (manual dismiss for toasts).
    Error,
}

impl Severity {
    /// Returns the toast auto-dismiss budget for this severity, given the
    /// configured base budget for success/info toasts.
    /// Returns `None` for errors (manual dismiss required).
    #[must_use]
    pub fn toast_duration(self, base: Duration) -> Option<Duration> {
        match self {
            Severity::Success | Severity::Info => Some(base),
            Severity::Warning => Some(Duration::from_millis(
                crate::config::DEFAULT_WARNING_TOAST_DURATION_MS,
            )),
            Severity::Error => None,
        }
    }
}

/// Type-specific configuration of a feedback item.
#[derive(Clone)]
pub struct FeedbackOptions {
    pub message: Option<String>,
    pub title: Option<String>,
    pub severity: Severity,
    /// Auto-dismiss budget. `None` uses the kind default, zero means sticky.
    pub duration: Option<Duration>,
    /// Whether the user may close the item (close button, escape, backdrop).
    pub dismissible: bool,
    /// Identity used to fold duplicate concurrent items into one.
    pub dedupe_key: Option<String>,
    /// Stack anchor for toasts and alerts. `None` uses the configured default.
    pub position: Option<Position>,
    pub confirm_label: Option<String>,
    pub cancel_label: Option<String>,

    // Prompt
    pub value: String,
    pub placeholder: Option<String>,
    pub validator: Option<Validator>,
    /// Validation failure shown under the prompt input.
    pub error: Option<String>,

    /// Progress percentage (`0.0..=100.0`).
    pub progress: Option<f32>,
    /// Action sheet entries.
    pub actions: Vec<String>,
    /// Sheet snap points as fractions of the viewport height, ascending.
    pub snap_points: Vec<f32>,
    pub snap_index: usize,
    /// Connection indicator state.
    pub online: Option<bool>,

    pub on_confirm: Option<Callback>,
    pub on_cancel: Option<Callback>,
    pub on_submit: Option<ValueCallback<String>>,
    pub on_value_change: Option<ValueCallback<String>>,
    pub on_select: Option<ValueCallback<usize>>,
}

impl Default for FeedbackOptions {
    fn default() -> Self {
        Self {
            message: None,
            title: None,
            severity: Severity::default(),
            duration: None,
            dismissible: true,
            dedupe_key: None,
            position: None,
            confirm_label: None,
            cancel_label: None,
            value: String::new(),
            placeholder: None,
            validator: None,
            error: None,
            progress: None,
            actions: Vec::new(),
            snap_points: Vec::new(),
            snap_index: 0,
            online: None,
            on_confirm: None,
            on_cancel: None,
            on_submit: None,
            on_value_change: None,
            on_select: None,
        }
    }
}

impl FeedbackOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets a custom auto-dismiss duration, overriding the kind default.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Keeps the item until it is removed explicitly.
    #[must_use]
    pub fn sticky(mut self) -> Self {
        self.duration = Some(Duration::ZERO);
        self
    }

    #[must_use]
    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }

    #[must_use]
    pub fn with_dedupe_key(mut self, key: impl Into<String>) -> Self {
        self.dedupe_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_labels(mut self, confirm: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.confirm_label = Some(confirm.into());
        self.cancel_label = Some(cancel.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: impl Fn(&str) -> Result<(), String> + 'static) -> Self {
        self.validator = Some(Rc::new(validator));
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: f32) -> Self {
        self.progress = Some(progress);
        self
    }

    #[must_use]
    pub fn with_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions = actions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_snap_points(mut self, points: impl Into<Vec<f32>>) -> Self {
        self.snap_points = points.into();
        self
    }

    #[must_use]
    pub fn with_online(mut self, online: bool) -> Self {
        self.online = Some(online);
        self
    }

    #[must_use]
    pub fn on_confirm(mut self, f: impl Fn() + 'static) -> Self {
        self.on_confirm = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_cancel(mut self, f: impl Fn() + 'static) -> Self {
        self.on_cancel = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_submit(mut self, f: impl Fn(String) + 'static) -> Self {
        self.on_submit = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_value_change(mut self, f: impl Fn(String) + 'static) -> Self {
        self.on_value_change = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_select(mut self, f: impl Fn(usize) + 'static) -> Self {
        self.on_select = Some(Rc::new(f));
        self
    }

    /// Checks the options against what `kind` needs to be displayed.
    pub fn validate(&self, kind: FeedbackKind) -> Result<(), OptionsError> {
        let blank = |s: &Option<String>| s.as_deref().is_none_or(|s| s.trim().is_empty());

        if kind.requires_message() && blank(&self.message) {
            return Err(OptionsError::MissingMessage(kind));
        }
        if kind == FeedbackKind::Result && blank(&self.title) {
            return Err(OptionsError::MissingTitle(kind));
        }
        if kind == FeedbackKind::ActionSheet && self.actions.is_empty() {
            return Err(OptionsError::NoActions);
        }
        if let Some(progress) = self.progress {
            if !(0.0..=100.0).contains(&progress) {
                return Err(OptionsError::ProgressOutOfRange(progress));
            }
        }
        let snaps_in_range = self.snap_points.iter().all(|p| *p > 0.0 && *p <= 1.0);
        let snaps_ascending = self.snap_points.windows(2).all(|w| w[0] < w[1]);
        if !snaps_in_range || !snaps_ascending {
            return Err(OptionsError::InvalidSnapPoints);
        }
        Ok(())
    }

    /// Applies a partial update in place.
    pub fn apply(&mut self, patch: OptionsPatch) {
        if let Some(message) = patch.message {
            self.message = Some(message);
        }
        if let Some(title) = patch.title {
            self.title = Some(title);
        }
        if let Some(severity) = patch.severity {
            self.severity = severity;
        }
        if let Some(progress) = patch.progress {
            self.progress = Some(progress.clamp(0.0, 100.0));
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
        if let Some(error) = patch.error {
            self.error = error;
        }
        if let Some(index) = patch.snap_index {
            self.snap_index = index.min(self.snap_points.len().saturating_sub(1));
        }
        if let Some(online) = patch.online {
            self.online = Some(online);
        }
    }
}

impl fmt::Debug for FeedbackOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedbackOptions")
            .field("message", &self.message)
            .field("title", &self.title)
            .field("severity", &self.severity)
            .field("duration", &self.duration)
            .field("dismissible", &self.dismissible)
            .field("dedupe_key", &self.dedupe_key)
            .field("position", &self.position)
            .field("value", &self.value)
            .field("error", &self.error)
            .field("progress", &self.progress)
            .field("actions", &self.actions)
            .field("snap_points", &self.snap_points)
            .field("snap_index", &self.snap_index)
            .field("online", &self.online)
            .field("has_validator", &self.validator.is_some())
            .field("has_on_confirm", &self.on_confirm.is_some())
            .field("has_on_cancel", &self.on_cancel.is_some())
            .finish_non_exhaustive()
    }
}

/// Partial update merged by `FeedbackManager::update`.
///
/// Only content fields can change; identity, kind, callbacks and lifecycle
/// fields are fixed at creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsPatch {
    pub message: Option<String>,
    pub title: Option<String>,
    pub severity: Option<Severity>,
    pub progress: Option<f32>,
    pub value: Option<String>,
    /// `Some(None)` clears a validation error.
    pub error: Option<Option<String>>,
    pub snap_index: Option<usize>,
    pub online: Option<bool>,
}

impl OptionsPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    #[must_use]
    pub fn progress(mut self, progress: f32) -> Self {
        self.progress = Some(progress);
        self
    }

    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn error(mut self, error: Option<String>) -> Self {
        self.error = Some(error);
        self
    }

    #[must_use]
    pub fn snap_index(mut self, index: usize) -> Self {
        self.snap_index = Some(index);
        self
    }

    #[must_use]
    pub fn online(mut self, online: bool) -> Self {
        self.online = Some(online);
        self
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
