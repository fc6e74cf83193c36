// SPDX-License-Identifier: MPL-2.0
//! Drag gesture tracking for sheet-like feedback.
//!
//! The tracker follows a vertical drag on a sheet, drawer or action sheet
//! and reports the release as a [`DragRelease`]. Offsets and velocities are
//! expressed as fractions of the viewport height, so snap resolution does
//! not need to know the pixel size of the surface.

use std::time::Instant;

/// Releases faster than this (viewport heights per second) count as a flick.
pub const FLICK_VELOCITY: f32 = 1.2;

/// How far ahead (in seconds) a release is projected before snapping.
pub const PROJECTION_SECS: f32 = 0.15;

/// Final offset and speed of a drag.
///
/// Positive values point downward (closing a bottom sheet).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragRelease {
    /// Displacement since the drag started, in viewport heights.
    pub offset: f32,
    /// Speed at release, in viewport heights per second.
    pub velocity: f32,
}

impl DragRelease {
    #[must_use]
    pub fn new(offset: f32, velocity: f32) -> Self {
        Self { offset, velocity }
    }
}

/// Manages drag state for one surface.
#[derive(Debug, Clone)]
pub struct DragTracker {
    viewport_height: f32,
    /// Pointer position and time when the drag started.
    start: Option<(f32, Instant)>,
    /// Most recent pointer sample.
    last: Option<(f32, Instant)>,
    /// Velocity between the last two samples, px/s.
    velocity: f32,
}

impl DragTracker {
    /// Creates a tracker for a viewport `viewport_height` pixels tall.
    #[must_use]
    pub fn new(viewport_height: f32) -> Self {
        Self {
            viewport_height: viewport_height.max(1.0),
            start: None,
            last: None,
            velocity: 0.0,
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }

    /// Starts a drag at pointer position `y`.
    pub fn start(&mut self, y: f32, at: Instant) {
        self.start = Some((y, at));
        self.last = Some((y, at));
        self.velocity = 0.0;
    }

    /// Records a pointer move and returns the current offset in pixels.
    ///
    /// Returns `None` when no drag is active.
    pub fn update(&mut self, y: f32, at: Instant) -> Option<f32> {
        let (start_y, _) = self.start?;
        if let Some((last_y, last_at)) = self.last {
            let dt = at.saturating_duration_since(last_at).as_secs_f32();
            if dt > 0.0 {
                self.velocity = (y - last_y) / dt;
            }
        }
        self.last = Some((y, at));
        Some(y - start_y)
    }

    /// Ends the drag and reports the release.
    ///
    /// Returns `None` when no drag is active.
    pub fn release(&mut self, y: f32, at: Instant) -> Option<DragRelease> {
        let offset = self.update(y, at)?;
        let release = DragRelease {
            offset: offset / self.viewport_height,
            velocity: self.velocity / self.viewport_height,
        };
        self.cancel();
        Some(release)
    }

    /// Abandons the drag without reporting anything.
    pub fn cancel(&mut self) {
        self.start = None;
        self.last = None;
        self.velocity = 0.0;
    }
}

/// Where a released sheet should settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTarget {
    /// Snap to the point at this index.
    Snap(usize),
    /// Close the sheet.
    Dismiss,
}

/// Ascending list of sheet heights, as fractions of the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapPoints(Vec<f32>);

impl SnapPoints {
    /// Wraps snap points. An empty list means a single full-height point.
    #[must_use]
    pub fn new(points: impl Into<Vec<f32>>) -> Self {
        let points = points.into();
        if points.is_empty() {
            Self(vec![1.0])
        } else {
            Self(points)
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.0.get(index).copied()
    }

    /// Resolves where a sheet resting at `current` settles after `release`.
    ///
    /// A flick moves exactly one point in the flick direction (dismissing
    /// from the lowest point). Otherwise the release is projected a short
    /// time ahead and snapped to the nearest point; projecting below half of
    /// the lowest point dismisses.
    #[must_use]
    pub fn resolve(&self, current: usize, release: DragRelease) -> SnapTarget {
        let last = self.0.len() - 1;
        let current = current.min(last);

        if release.velocity >= FLICK_VELOCITY {
            return match current.checked_sub(1) {
                Some(lower) => SnapTarget::Snap(lower),
                None => SnapTarget::Dismiss,
            };
        }
        if release.velocity <= -FLICK_VELOCITY {
            return SnapTarget::Snap((current + 1).min(last));
        }

        let height = self.0[current] - release.offset - release.velocity * PROJECTION_SECS;
        if height < self.0[0] / 2.0 {
            return SnapTarget::Dismiss;
        }
        let nearest = self
            .0
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - height).abs().total_cmp(&(*b - height).abs()))
            .map_or(current, |(index, _)| index);
        SnapTarget::Snap(nearest)
    }
}
