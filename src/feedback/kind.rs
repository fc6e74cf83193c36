// SPDX-License-Identifier: MPL-2.0
//! Feedback kinds and the placement they stack in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of feedback kinds the engine orchestrates.
///
/// Adapters provide one rendering slot per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Toast,
    Modal,
    Alert,
    Confirm,
    Prompt,
    Banner,
    Drawer,
    Popconfirm,
    Sheet,
    ActionSheet,
    Loading,
    Progress,
    Skeleton,
    Result,
    Connection,
}

impl FeedbackKind {
    /// Every kind, in declaration order.
    pub const ALL: [FeedbackKind; 15] = [
        FeedbackKind::Toast,
        FeedbackKind::Modal,
        FeedbackKind::Alert,
        FeedbackKind::Confirm,
        FeedbackKind::Prompt,
        FeedbackKind::Banner,
        FeedbackKind::Drawer,
        FeedbackKind::Popconfirm,
        FeedbackKind::Sheet,
        FeedbackKind::ActionSheet,
        FeedbackKind::Loading,
        FeedbackKind::Progress,
        FeedbackKind::Skeleton,
        FeedbackKind::Result,
        FeedbackKind::Connection,
    ];

    /// Returns the display-cap queue this kind belongs to, if any.
    #[must_use]
    pub fn queue_family(self) -> Option<QueueFamily> {
        match self {
            FeedbackKind::Toast => Some(QueueFamily::Toast),
            FeedbackKind::Alert => Some(QueueFamily::Alert),
            _ => None,
        }
    }

    /// Whether an auto-dismiss timer may be attached to this kind.
    ///
    /// State-driven indicators (loading, progress, skeleton, connection)
    /// are removed by their owner when the underlying work finishes.
    #[must_use]
    pub fn supports_auto_dismiss(self) -> bool {
        !matches!(
            self,
            FeedbackKind::Loading
                | FeedbackKind::Progress
                | FeedbackKind::Skeleton
                | FeedbackKind::Connection
        )
    }

    /// Whether the kind answers through confirm/cancel callbacks.
    #[must_use]
    pub fn is_dialog(self) -> bool {
        matches!(
            self,
            FeedbackKind::Modal
                | FeedbackKind::Confirm
                | FeedbackKind::Prompt
                | FeedbackKind::Popconfirm
                | FeedbackKind::Drawer
                | FeedbackKind::Sheet
                | FeedbackKind::ActionSheet
        )
    }

    /// Whether a displayed item of this kind blocks the page behind it,
    /// i.e. holds the body scroll lock and traps focus.
    #[must_use]
    pub fn is_modal_like(self) -> bool {
        matches!(
            self,
            FeedbackKind::Modal
                | FeedbackKind::Confirm
                | FeedbackKind::Prompt
                | FeedbackKind::Drawer
                | FeedbackKind::Sheet
                | FeedbackKind::ActionSheet
        )
    }

    /// Whether `add` rejects options without a message.
    #[must_use]
    pub fn requires_message(self) -> bool {
        matches!(
            self,
            FeedbackKind::Toast
                | FeedbackKind::Alert
                | FeedbackKind::Banner
                | FeedbackKind::Confirm
                | FeedbackKind::Prompt
                | FeedbackKind::Popconfirm
        )
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FeedbackKind::Toast => "toast",
            FeedbackKind::Modal => "modal",
            FeedbackKind::Alert => "alert",
            FeedbackKind::Confirm => "confirm",
            FeedbackKind::Prompt => "prompt",
            FeedbackKind::Banner => "banner",
            FeedbackKind::Drawer => "drawer",
            FeedbackKind::Popconfirm => "popconfirm",
            FeedbackKind::Sheet => "sheet",
            FeedbackKind::ActionSheet => "action sheet",
            FeedbackKind::Loading => "loading",
            FeedbackKind::Progress => "progress",
            FeedbackKind::Skeleton => "skeleton",
            FeedbackKind::Result => "result",
            FeedbackKind::Connection => "connection",
        }
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Groups of kinds that share a display cap per position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueFamily {
    Toast,
    Alert,
}

/// Screen corner or edge a stack of toasts/alerts is anchored to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopCenter,
    #[default]
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}
