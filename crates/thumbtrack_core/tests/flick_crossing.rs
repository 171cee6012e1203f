//! Locating where a ballistic flick leaves a one-dimensional track, using only
//! the public API.

use thumbtrack_core::{segment_rect_intersection, Axis, Point, Rect};

/// Track of a bar along `axis`, collapsed on the other axis
fn track(axis: Axis, min: f64, max: f64) -> Rect {
    Rect::from_min_max(axis.point(min), axis.point(max))
}

#[test]
fn test_crossing_on_either_axis() {
    for axis in [Axis::Vertical, Axis::Horizontal] {
        let rect = track(axis, 8.0, 232.0);
        let hit = segment_rect_intersection(rect, axis.point(200.0), axis.point(260.0)).unwrap();
        assert_eq!(hit, axis.point(232.0));
        assert_eq!(axis.component(hit), 232.0);
    }
}

#[test]
fn test_flick_that_stays_inside_has_no_crossing() {
    let rect = track(Axis::Vertical, 8.0, 232.0);
    assert_eq!(
        segment_rect_intersection(rect, Point::new(0.0, 20.0), Point::new(0.0, 231.5)),
        None
    );
    // Ending exactly on the edge is still inside
    assert_eq!(
        segment_rect_intersection(rect, Point::new(0.0, 20.0), Point::new(0.0, 232.0)),
        None
    );
}

#[test]
fn test_crossing_fraction_along_flick() {
    let rect = track(Axis::Vertical, 0.0, 100.0);
    let from = Point::new(0.0, 40.0);
    let to = Point::new(0.0, 160.0);
    let hit = segment_rect_intersection(rect, from, to).unwrap();
    let fraction = from.distance(hit) / from.distance(to);
    assert!((fraction - 0.5).abs() < 1e-12);
}
