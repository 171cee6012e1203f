//! Geometry primitives
//!
//! Points, sizes, rectangles and insets used by both offset spaces (content
//! and indicator). Everything is `f64` so that the closed-form physics stays
//! numerically stable at display refresh rates.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Interval clamp
// ─────────────────────────────────────────────────────────────────────────────

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics: when `min > max` (a track shorter
/// than its indicator) the lower bound wins.
#[inline]
pub fn interval(min: f64, value: f64, max: f64) -> f64 {
    if value > max {
        max.max(min)
    } else if value < min {
        min
    } else {
        value
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Point
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point (also used as a 2D velocity)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance(&self, other: Point) -> f64 {
        (*self - other).length()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Size
// ─────────────────────────────────────────────────────────────────────────────

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rect
// ─────────────────────────────────────────────────────────────────────────────

/// 2D rectangle
///
/// The size is not normalized: a negative width or height describes an
/// inverted (empty) range, which is what an indicator bounds rectangle looks
/// like when the track is shorter than the indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Build a rect from its per-axis `(min, max)` pairs
    pub fn from_min_max(min: Point, max: Point) -> Self {
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn min(&self) -> Point {
        self.origin
    }

    pub fn max(&self) -> Point {
        Point::new(self.max_x(), self.max_y())
    }

    /// True when either axis is inverted
    pub fn is_inverted(&self) -> bool {
        self.size.width < 0.0 || self.size.height < 0.0
    }

    /// Closed containment test (edges count as inside)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    /// Clamp a point into the rect, axis by axis
    pub fn clamp_point(&self, point: Point) -> Point {
        Point::new(
            interval(self.min_x(), point.x, self.max_x()),
            interval(self.min_y(), point.y, self.max_y()),
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Edge insets
// ─────────────────────────────────────────────────────────────────────────────

/// Insets on the four edges of a box
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Axis
// ─────────────────────────────────────────────────────────────────────────────

/// A single coordinate axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    #[default]
    Vertical,
}

impl Axis {
    /// The component of `point` along this axis
    #[inline]
    pub fn component(self, point: Point) -> f64 {
        match self {
            Axis::Horizontal => point.x,
            Axis::Vertical => point.y,
        }
    }

    /// `point` with its component along this axis replaced by `value`
    #[inline]
    pub fn with_component(self, point: Point, value: f64) -> Point {
        match self {
            Axis::Horizontal => Point::new(value, point.y),
            Axis::Vertical => Point::new(point.x, value),
        }
    }

    /// Embed a scalar on this axis, zero on the other one
    #[inline]
    pub fn point(self, value: f64) -> Point {
        self.with_component(Point::ZERO, value)
    }

    /// Extent of `size` along this axis
    #[inline]
    pub fn extent(self, size: Size) -> f64 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// Leading inset along this axis (top or left)
    #[inline]
    pub fn leading(self, insets: EdgeInsets) -> f64 {
        match self {
            Axis::Horizontal => insets.left,
            Axis::Vertical => insets.top,
        }
    }

    /// Trailing inset along this axis (bottom or right)
    #[inline]
    pub fn trailing(self, insets: EdgeInsets) -> f64 {
        match self {
            Axis::Horizontal => insets.right,
            Axis::Vertical => insets.bottom,
        }
    }

    /// `(min, max)` of `rect` along this axis
    #[inline]
    pub fn range(self, rect: Rect) -> (f64, f64) {
        match self {
            Axis::Horizontal => (rect.min_x(), rect.max_x()),
            Axis::Vertical => (rect.min_y(), rect.max_y()),
        }
    }
}
