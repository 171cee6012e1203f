//! thumbtrack scroll bar engine
//!
//! Maps a scrollable area's content offset onto a draggable thumb and back,
//! and animates both when the thumb is flicked or released out of bounds.
//!
//! # Example
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use thumbtrack_bar::{MotionController, ScrollBarConfig, ScrollBarEvent, ScrollLayout};
//! use thumbtrack_core::Size;
//!
//! let layout = ScrollLayout::new(Size::new(320.0, 4000.0), Size::new(320.0, 600.0));
//! let mut bar = MotionController::new(ScrollBarConfig::default(), layout).unwrap();
//!
//! let start = Instant::now();
//! bar.begin_drag();
//! bar.drag_to(120.0);
//! bar.end_drag(1500.0, start);
//!
//! let mut now = start;
//! while bar.tick(now) {
//!     now += Duration::from_millis(16);
//! }
//! for event in bar.drain_events() {
//!     if let ScrollBarEvent::ContentOffsetChanged { offset } = event {
//!         assert!(offset.is_finite());
//!     }
//! }
//! ```

pub mod bounds;
pub mod config;
pub mod controller;
pub mod mapper;
pub mod scheduler;

pub use bounds::{AxisBounds, OffsetBounds, ScrollLayout};
pub use config::{ConfigError, IndicatorConfig, PhysicsConfig, ScrollBarConfig};
pub use controller::{EventQueue, MotionController, MotionKind, ScrollBarEvent, ScrollBarPhase};
pub use mapper::{OffsetMapper, OverscrollSource};
pub use scheduler::{FrameScheduler, ScrollBarId};
