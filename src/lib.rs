// SPDX-License-Identifier: MPL-2.0
//! `feedback_core` orchestrates transient feedback UI: toasts, modals,
//! alerts, banners, drawers, confirms, prompts, sheets, progress and
//! connection indicators.
//!
//! It renders nothing. The [`FeedbackManager`] tracks every request as a
//! typed item, drives it through `queued → entering → visible → exiting →
//! removed` on timers and user responses, and publishes the result in a
//! [`FeedbackStore`] that any [`FeedbackAdapter`] can render. [`Dialogs`]
//! turns confirm and prompt answers into futures that settle exactly once.
//!
//! ```
//! use feedback_core::{AnimationSpec, Config, FeedbackKind, FeedbackManager, FeedbackOptions};
//!
//! let manager = FeedbackManager::new(&Config::default(), AnimationSpec::instant());
//! let id = manager
//!     .add(FeedbackKind::Toast, FeedbackOptions::message("Saved"))
//!     .expect("toast options are valid");
//! assert!(manager.get(id).is_some());
//! ```

#![doc(html_root_url = "https://docs.rs/feedback_core/0.1.0")]

pub mod adapter;
pub mod bridge;
pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod events;
pub mod feedback;
pub mod gesture;
pub mod manager;
pub mod queue;
pub mod resources;
pub mod store;
pub mod timer;

pub use adapter::{
    AdapterRegistry, AnimationSpec, FeedbackAdapter, FeedbackContainer, FeedbackHandle, Region,
    SlotProps,
};
pub use bridge::{DialogOutcome, Dialogs, PromptOutcome};
pub use config::Config;
pub use error::{Error, OptionsError, Result};
pub use events::{EventKind, FeedbackEvent, Subscription};
pub use feedback::{
    FeedbackId, FeedbackItem, FeedbackKind, FeedbackOptions, OptionsPatch, Position, Severity,
    Status,
};
pub use manager::FeedbackManager;
pub use store::FeedbackStore;
