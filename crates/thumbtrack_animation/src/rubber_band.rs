//! Rubber-band compression
//!
//! Maps an offset that lies outside an allowed range to one that approaches,
//! but never reaches, `edge ± dimension`. Near the edge the response is
//! almost linear with slope `coefficient`; far past it the offset saturates.

use thumbtrack_core::{interval, Point, Rect, Size};

/// The commonly used rubber-band stiffness
pub const DEFAULT_COEFFICIENT: f64 = 0.55;

/// Compressed overshoot for a raw overshoot `distance >= 0`.
///
/// `f(x) = x * c * d / (d + c * x)`, so `f(0) = 0`, `f'(0) = c` and
/// `f(x) → d` as `x → ∞`.
#[inline]
pub fn rubber_band_distance(distance: f64, coefficient: f64, dimension: f64) -> f64 {
    if distance <= 0.0 || dimension <= 0.0 {
        return 0.0;
    }
    (distance * coefficient * dimension) / (dimension + coefficient * distance)
}

/// Rubber-band `value` into `[min, max]`. Values inside are returned unchanged.
#[inline]
pub fn rubber_band_clamp(value: f64, coefficient: f64, dimension: f64, min: f64, max: f64) -> f64 {
    let clamped = interval(min, value, max);
    let overshoot = value - clamped;
    if overshoot == 0.0 {
        return value;
    }
    clamped + overshoot.signum() * rubber_band_distance(overshoot.abs(), coefficient, dimension)
}

/// Rubber band over a 2D bounds rectangle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RubberBand {
    /// Stiffness, usually in `[0.1, DEFAULT_COEFFICIENT]`
    pub coefficient: f64,
    /// Reference extent per axis (the viewport size)
    pub dimensions: Size,
    /// Where the offset is allowed to be
    pub bounds: Rect,
}

impl RubberBand {
    pub fn new(coefficient: f64, dimensions: Size, bounds: Rect) -> Self {
        Self {
            coefficient,
            dimensions,
            bounds,
        }
    }

    /// Compress each axis of `point` independently
    pub fn clamp(&self, point: Point) -> Point {
        Point::new(
            rubber_band_clamp(
                point.x,
                self.coefficient,
                self.dimensions.width,
                self.bounds.min_x(),
                self.bounds.max_x(),
            ),
            rubber_band_clamp(
                point.y,
                self.coefficient,
                self.dimensions.height,
                self.bounds.min_y(),
                self.bounds.max_y(),
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_inside_bounds() {
        for value in [0.0, 0.5, 17.0, 99.999, 100.0] {
            assert_eq!(rubber_band_clamp(value, 0.55, 300.0, 0.0, 100.0), value);
        }
    }

    #[test]
    fn test_distance_shape() {
        assert_eq!(rubber_band_distance(0.0, 0.55, 300.0), 0.0);

        // Slope at the edge is the coefficient
        let h = 1e-6;
        let slope = rubber_band_distance(h, 0.55, 300.0) / h;
        assert!((slope - 0.55).abs() < 1e-6);

        // Monotonic and bounded by the dimension
        let mut previous = 0.0;
        for step in 1..200 {
            let d = rubber_band_distance(step as f64 * 50.0, 0.55, 300.0);
            assert!(d > previous);
            assert!(d < 300.0);
            previous = d;
        }
    }

    #[test]
    fn test_overshoot_is_compressed_on_both_sides() {
        let below = rubber_band_clamp(-50.0, 0.55, 300.0, 0.0, 100.0);
        assert!(below < 0.0 && below > -50.0);

        let above = rubber_band_clamp(150.0, 0.55, 300.0, 0.0, 100.0);
        assert!(above > 100.0 && above < 150.0);

        // Symmetric around the edges
        assert!(((0.0 - below) - (above - 100.0)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_dimension_pins_to_edge() {
        assert_eq!(rubber_band_clamp(150.0, 0.55, 0.0, 0.0, 100.0), 100.0);
    }

    #[test]
    fn test_rect_clamp_per_axis() {
        let band = RubberBand::new(
            DEFAULT_COEFFICIENT,
            Size::new(100.0, 300.0),
            Rect::new(0.0, 0.0, 0.0, 200.0),
        );
        let out = band.clamp(Point::new(0.0, 260.0));
        assert_eq!(out.x, 0.0);
        assert!(out.y > 200.0 && out.y < 260.0);
    }
}
