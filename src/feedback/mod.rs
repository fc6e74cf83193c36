// SPDX-License-Identifier: MPL-2.0
//! Feedback entities: kinds, lifecycle states, options and items.
//!
//! # Components
//!
//! - [`kind`] - `FeedbackKind`, queue families and stack positions
//! - [`status`] - the shared lifecycle state machine
//! - [`options`] - per-item configuration, callbacks and partial updates
//! - [`item`] - `FeedbackItem` and its process-unique `FeedbackId`
//! - [`newtypes`] - clamped configuration values

pub mod item;
pub mod kind;
pub mod newtypes;
pub mod options;
pub mod status;

pub use item::{FeedbackId, FeedbackItem};
pub use kind::{FeedbackKind, Position, QueueFamily};
pub use newtypes::MaxVisible;
pub use options::{Callback, FeedbackOptions, OptionsPatch, Severity, Validator, ValueCallback};
pub use status::Status;
