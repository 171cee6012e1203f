//! thumbtrack core
//!
//! Foundational primitives shared by the thumbtrack crates:
//!
//! - **Geometry**: points, sizes, rectangles, edge insets and axes in `f64`
//! - **Intersection**: first boundary crossing of a segment with a rectangle
//! - **State transitions**: small enum state machines driven by event ids
//! - **Errors**: invalid physical parameters
//!
//! # Example
//!
//! ```rust
//! use thumbtrack_core::{segment_rect_intersection, Point, Rect};
//!
//! let bounds = Rect::new(0.0, 0.0, 10.0, 100.0);
//! let hit = segment_rect_intersection(bounds, Point::new(0.0, 50.0), Point::new(0.0, 150.0));
//! assert_eq!(hit, Some(Point::new(0.0, 100.0)));
//! ```

pub mod error;
pub mod events;
pub mod geometry;
pub mod intersection;
pub mod state;

pub use error::{Error, Result};
pub use events::EventType;
pub use geometry::{interval, Axis, EdgeInsets, Point, Rect, Size};
pub use intersection::{clip_segment, segment_rect_intersection};
pub use state::StateTransitions;
