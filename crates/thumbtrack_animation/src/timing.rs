//! Shared interface of the closed-form motion models

use thumbtrack_core::Point;

/// A trajectory that can be sampled at any time `t >= 0` (seconds).
pub trait TimingParameters {
    /// Position at `time`
    fn value_at(&self, time: f64) -> Point;

    /// Velocity at `time`, in units per second
    fn velocity_at(&self, time: f64) -> Point;

    /// Time after which the motion is considered at rest
    fn duration(&self) -> f64;
}
