//! thumbtrack animation system
//!
//! Closed-form motion models and the frame-driven animator that samples them.
//!
//! # Features
//!
//! - **Rubber banding**: nonlinear compression of out-of-bounds offsets
//! - **Deceleration**: exponential velocity decay for flicks, with boundary timing
//! - **Spring physics**: analytic damped oscillator (under, critical and over damped)
//! - **Frame animator**: cancellable, monotonic-time driven execution unit
//! - **Frame clock**: deterministic display pulses for tests and headless runs

pub mod animator;
pub mod clock;
pub mod deceleration;
pub mod rubber_band;
pub mod spring;
pub mod timing;

pub use animator::{AnimationFrame, AnimationSlot, AnimatorState, FrameAnimator};
pub use clock::{duration_from_secs, FrameClock};
pub use deceleration::{DecelerationRate, DecelerationTiming};
pub use rubber_band::{rubber_band_clamp, rubber_band_distance, RubberBand, DEFAULT_COEFFICIENT};
pub use spring::{DampingRegime, SpringConfig, SpringTiming};
pub use timing::TimingParameters;
