//! Layout-derived offset bounds
//!
//! Two coordinate spaces are tracked: the content offset of the scrollable
//! area and the indicator offset inside its track. Both are recomputed from a
//! [`ScrollLayout`] whenever sizes or insets change.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thumbtrack_core::{interval, Axis, EdgeInsets, Point, Rect, Size};

/// Sizes and insets reported by the layout collaborator
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollLayout {
    /// Full size of the scrollable content
    pub content_size: Size,
    /// Visible frame of the scrollable area
    pub viewport_size: Size,
    /// Extra scrollable space around the content
    pub content_insets: EdgeInsets,
    /// Area obscured by system chrome
    pub safe_area_insets: EdgeInsets,
    /// Explicit track size; defaults to the viewport
    pub track_size: Option<Size>,
    /// Shrink the default track by the safe area
    pub insets_follow_safe_area: bool,
}

impl ScrollLayout {
    pub fn new(content_size: Size, viewport_size: Size) -> Self {
        Self {
            content_size,
            viewport_size,
            ..Default::default()
        }
    }

    /// Size of the track the indicator slides in
    pub fn track_size(&self) -> Size {
        if let Some(size) = self.track_size {
            return size;
        }
        if self.insets_follow_safe_area {
            let safe = self.safe_area_insets;
            Size::new(
                self.viewport_size.width - safe.left - safe.right,
                self.viewport_size.height - safe.top - safe.bottom,
            )
        } else {
            self.viewport_size
        }
    }

    /// Legal content offsets along `axis`
    pub fn content_bounds(&self, axis: Axis) -> AxisBounds {
        let inset_start = axis.leading(self.content_insets);
        let inset_end = axis.trailing(self.content_insets);
        let safe_start = axis.leading(self.safe_area_insets);
        let safe_end = axis.trailing(self.safe_area_insets);
        AxisBounds::new(
            -(inset_start + safe_start),
            axis.extent(self.content_size) - axis.extent(self.viewport_size) + safe_end + inset_end,
        )
    }

    /// Legal indicator offsets along `axis`, in track coordinates
    pub fn indicator_bounds(
        &self,
        axis: Axis,
        indicator_size: Size,
        indicator_insets: EdgeInsets,
    ) -> AxisBounds {
        AxisBounds::new(
            axis.leading(indicator_insets),
            axis.extent(self.track_size())
                - axis.extent(indicator_size)
                - axis.trailing(indicator_insets),
        )
    }
}

/// `(min, max)` pair along one axis. `max < min` is allowed and means the
/// range is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `max - min`; may be zero or negative
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// True when the range has no interior
    pub fn is_degenerate(&self) -> bool {
        self.max.partial_cmp(&self.min) != Some(Ordering::Greater)
    }

    /// Closed containment; always false for a degenerate range
    pub fn contains(&self, value: f64) -> bool {
        !self.is_degenerate() && value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        interval(self.min, value, self.max)
    }

    /// Signed distance beyond the nearer edge (negative below `min`)
    pub fn overscroll(&self, value: f64) -> f64 {
        if value < self.min {
            value - self.min
        } else if value > self.max {
            value - self.max
        } else {
            0.0
        }
    }

    /// `(value - min) / range`, or `None` on a zero-width range
    pub fn fraction(&self, value: f64) -> Option<f64> {
        let range = self.range();
        if range.abs() <= f64::EPSILON {
            return None;
        }
        Some((value - self.min) / range)
    }

    /// Inverse of [`fraction`](Self::fraction)
    pub fn lerp(&self, fraction: f64) -> f64 {
        self.min + fraction * self.range()
    }
}

/// Bounds of both offset spaces as rectangles, one axis per coordinate
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OffsetBounds {
    pub content: Rect,
    pub indicator: Rect,
    /// Rubber-band reference extent (the track size)
    pub dimensions: Size,
}

impl OffsetBounds {
    pub fn from_layout(layout: &ScrollLayout, indicator_size: Size, indicator_insets: EdgeInsets) -> Self {
        let rect = |horizontal: AxisBounds, vertical: AxisBounds| {
            Rect::from_min_max(
                Point::new(horizontal.min, vertical.min),
                Point::new(horizontal.max, vertical.max),
            )
        };
        Self {
            content: rect(
                layout.content_bounds(Axis::Horizontal),
                layout.content_bounds(Axis::Vertical),
            ),
            indicator: rect(
                layout.indicator_bounds(Axis::Horizontal, indicator_size, indicator_insets),
                layout.indicator_bounds(Axis::Vertical, indicator_size, indicator_insets),
            ),
            dimensions: layout.track_size(),
        }
    }

    pub fn content_axis(&self, axis: Axis) -> AxisBounds {
        let (min, max) = axis.range(self.content);
        AxisBounds::new(min, max)
    }

    pub fn indicator_axis(&self, axis: Axis) -> AxisBounds {
        let (min, max) = axis.range(self.indicator);
        AxisBounds::new(min, max)
    }

    /// Indicator bounds with the inactive axis collapsed onto its minimum.
    ///
    /// Offsets of the inactive axis are always zero-embedded, so this is the
    /// rectangle deceleration trajectories are intersected with.
    pub fn indicator_track(&self, axis: Axis) -> Rect {
        let active = self.indicator_axis(axis);
        let min = axis.point(active.min);
        let max = axis.point(active.max);
        Rect::from_min_max(min, max)
    }
}
