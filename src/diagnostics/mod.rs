// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording the lifecycle of feedback items.
//!
//! The manager reports what it does (items added, deduplicated, promoted,
//! dismissed, removed, rejected, stale timers ignored) through a
//! [`DiagnosticsHandle`]. Events travel over a bounded channel to a
//! [`DiagnosticsCollector`] that keeps them in a memory-bounded
//! [`CircularBuffer`] and can export them as JSON.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped lifecycle event
//! - [`DiagnosticsCollector`] / [`DiagnosticsHandle`]: receiving and sending ends

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, DismissReason};
