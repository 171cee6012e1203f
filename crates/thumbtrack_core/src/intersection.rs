//! Segment/rectangle intersection
//!
//! Finds where a straight trajectory first touches the boundary of an
//! axis-aligned rectangle. The Motion Controller uses this to locate the point
//! where a ballistic flick would leave the legal indicator-offset bounds.

use crate::geometry::{Point, Rect};

/// Liang–Barsky clip of the segment `from → to` against `rect`.
///
/// Returns the parametric interval `(t_enter, t_exit)` within `[0, 1]` for
/// which the segment lies inside the (closed) rectangle, or `None` when the
/// segment misses it entirely or the rectangle is inverted.
pub fn clip_segment(rect: Rect, from: Point, to: Point) -> Option<(f64, f64)> {
    if rect.is_inverted() {
        return None;
    }

    let delta = to - from;
    let mut t_enter = 0.0_f64;
    let mut t_exit = 1.0_f64;

    // (p, q) per half-plane: left, right, top, bottom
    let edges = [
        (-delta.x, from.x - rect.min_x()),
        (delta.x, rect.max_x() - from.x),
        (-delta.y, from.y - rect.min_y()),
        (delta.y, rect.max_y() - from.y),
    ];

    for (p, q) in edges {
        if p == 0.0 {
            // Parallel to this edge: either always inside its half-plane or never
            if q < 0.0 {
                return None;
            }
            continue;
        }

        let r = q / p;
        if p < 0.0 {
            if r > t_exit {
                return None;
            }
            t_enter = t_enter.max(r);
        } else {
            if r < t_enter {
                return None;
            }
            t_exit = t_exit.min(r);
        }
    }

    Some((t_enter, t_exit))
}

/// First point along `from → to` that lies on the boundary of `rect`.
///
/// - both endpoints inside (edges included): `None`
/// - starting inside and leaving: the exit point
/// - starting outside: the entry point, if the segment reaches the rect
/// - sliding along an edge line from outside: `None` (no directional crossing)
pub fn segment_rect_intersection(rect: Rect, from: Point, to: Point) -> Option<Point> {
    let start_inside = rect.contains(from);
    if start_inside && rect.contains(to) {
        return None;
    }

    let delta = to - from;
    if !start_inside && grazes_edge(rect, from, delta) {
        return None;
    }

    let (t_enter, t_exit) = clip_segment(rect, from, to)?;
    let t = if start_inside { t_exit } else { t_enter };

    Some(snap_to_boundary(rect, from + delta * t))
}

/// Absorb rounding in `from + delta * t` so the result lies exactly on an edge.
fn snap_to_boundary(rect: Rect, point: Point) -> Point {
    let snap = |value: f64, min: f64, max: f64| {
        let tolerance = 1e-9 * value.abs().max(1.0);
        if (value - min).abs() <= tolerance {
            min
        } else if (value - max).abs() <= tolerance {
            max
        } else {
            value
        }
    };
    let clamped = rect.clamp_point(point);
    Point::new(
        snap(clamped.x, rect.min_x(), rect.max_x()),
        snap(clamped.y, rect.min_y(), rect.max_y()),
    )
}

/// True when the segment runs exactly along one of the rect's edge lines.
///
/// A zero-extent axis is a collapsed (one-dimensional) track, not an edge.
fn grazes_edge(rect: Rect, from: Point, delta: Point) -> bool {
    let along_x = rect.width() > 0.0
        && delta.x == 0.0
        && (from.x == rect.min_x() || from.x == rect.max_x());
    let along_y = rect.height() > 0.0
        && delta.y == 0.0
        && (from.y == rect.min_y() || from.y == rect.max_y());
    along_x || along_y
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> Rect {
        // Indicator bounds of a vertical bar: x fixed at 0, y in [8, 232]
        Rect::from_min_max(Point::new(0.0, 8.0), Point::new(0.0, 232.0))
    }

    #[test]
    fn test_segment_fully_inside_returns_none() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            segment_rect_intersection(rect, Point::new(10.0, 10.0), Point::new(90.0, 90.0)),
            None
        );
    }

    #[test]
    fn test_inside_to_outside_hits_boundary() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let from = Point::new(50.0, 50.0);
        let to = Point::new(50.0, 250.0);
        let hit = segment_rect_intersection(rect, from, to).unwrap();
        assert_eq!(hit, Point::new(50.0, 100.0));

        let (_, t_exit) = clip_segment(rect, from, to).unwrap();
        assert!(t_exit > 0.0 && t_exit <= 1.0);
    }

    #[test]
    fn test_diagonal_exit_picks_first_edge() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let hit =
            segment_rect_intersection(rect, Point::new(50.0, 90.0), Point::new(150.0, 190.0))
                .unwrap();
        // Leaves through the bottom edge (y = 100) before reaching x = 100
        assert!((hit.y - 100.0).abs() < 1e-9);
        assert!((hit.x - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_outside_entering_returns_entry_point() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let hit =
            segment_rect_intersection(rect, Point::new(-50.0, 50.0), Point::new(50.0, 50.0))
                .unwrap();
        assert_eq!(hit, Point::new(0.0, 50.0));
    }

    #[test]
    fn test_outside_missing_returns_none() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            segment_rect_intersection(rect, Point::new(-50.0, -50.0), Point::new(150.0, -10.0)),
            None
        );
    }

    #[test]
    fn test_grazing_along_edge_returns_none() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            segment_rect_intersection(rect, Point::new(-50.0, 0.0), Point::new(150.0, 0.0)),
            None
        );
    }

    #[test]
    fn test_zero_width_track_flick() {
        let hit =
            segment_rect_intersection(track(), Point::new(0.0, 120.0), Point::new(0.0, 400.0))
                .unwrap();
        assert_eq!(hit, Point::new(0.0, 232.0));

        let hit =
            segment_rect_intersection(track(), Point::new(0.0, 120.0), Point::new(0.0, -40.0))
                .unwrap();
        assert_eq!(hit, Point::new(0.0, 8.0));
    }

    #[test]
    fn test_collapsed_track_entry_from_outside() {
        let hit =
            segment_rect_intersection(track(), Point::new(0.0, -20.0), Point::new(0.0, 100.0))
                .unwrap();
        assert_eq!(hit, Point::new(0.0, 8.0));
    }

    #[test]
    fn test_inverted_rect_never_intersects() {
        let rect = Rect::from_min_max(Point::new(0.0, 50.0), Point::new(0.0, 10.0));
        assert_eq!(
            segment_rect_intersection(rect, Point::new(0.0, 0.0), Point::new(0.0, 100.0)),
            None
        );
    }
}
