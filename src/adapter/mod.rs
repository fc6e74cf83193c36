// SPDX-License-Identifier: MPL-2.0
//! Pluggable visual implementations.
//!
//! The engine never draws anything. A [`FeedbackAdapter`] renders each kind
//! for one UI toolkit, the [`AdapterRegistry`] picks the active one, and a
//! [`FeedbackContainer`] connects a region of the store to an adapter.

mod container;
mod contract;
mod registry;
mod styles;
mod theme;

pub use container::{FeedbackContainer, Region};
pub use contract::{AnimationSpec, FeedbackAdapter, FeedbackHandle, SlotProps};
pub use registry::{AdapterRegistry, SharedAdapter};
pub use styles::InjectOnce;
pub use theme::ThemeMode;
