//! Deterministic frame clock
//!
//! Stands in for the display link in tests and headless runs: every `advance`
//! produces the next pulse instant, one refresh interval later (optionally
//! stretched by a repeating jitter pattern).

use std::time::{Duration, Instant};

/// Convert seconds to a `Duration`, saturating instead of panicking
pub fn duration_from_secs(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::MAX)
}

/// Synthetic display pulse source
#[derive(Clone, Debug)]
pub struct FrameClock {
    origin: Instant,
    now: Instant,
    interval: Duration,
    frame: u64,
    /// Per-frame interval multipliers, applied round robin
    jitter: Vec<f64>,
}

impl FrameClock {
    /// Clock at `origin` pulsing `fps` times per second
    pub fn new(origin: Instant, fps: u32) -> Self {
        Self {
            origin,
            now: origin,
            interval: Duration::from_secs(1) / fps.max(1),
            frame: 0,
            jitter: Vec::new(),
        }
    }

    /// Scale successive intervals by `pattern` (e.g. `[1.0, 2.0, 0.5]`)
    pub fn with_jitter(mut self, pattern: impl IntoIterator<Item = f64>) -> Self {
        self.jitter = pattern
            .into_iter()
            .filter(|factor| factor.is_finite() && *factor >= 0.0)
            .collect();
        self
    }

    pub fn origin(&self) -> Instant {
        self.origin
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Number of pulses delivered so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Seconds since the origin
    pub fn elapsed(&self) -> f64 {
        self.now.duration_since(self.origin).as_secs_f64()
    }

    /// Move to the next pulse and return its instant
    pub fn advance(&mut self) -> Instant {
        let step = if self.jitter.is_empty() {
            self.interval
        } else {
            let factor = self.jitter[(self.frame % self.jitter.len() as u64) as usize];
            self.interval.mul_f64(factor)
        };
        self.frame += 1;
        self.now += step;
        self.now
    }
}
