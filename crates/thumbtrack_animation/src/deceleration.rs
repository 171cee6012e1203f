//! Ballistic deceleration
//!
//! Models a flick as exponential velocity decay. The decay rate is expressed
//! per millisecond (the platform convention, `0.998` for normal scrolling)
//! while time is in seconds, so the exponent is `1000 * t`:
//!
//! ```text
//! v(t) = v0 * rate^(1000 t)
//! x(t) = x0 + v0 * (rate^(1000 t) - 1) / (1000 ln rate)
//! ```

use serde::{Deserialize, Serialize};
use thumbtrack_core::{Error, Point, Result};

use crate::timing::TimingParameters;

/// Named or explicit per-millisecond velocity decay factor
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RateRepr", into = "RateRepr")]
pub enum DecelerationRate {
    /// 0.998 per millisecond
    #[default]
    Normal,
    /// 0.99 per millisecond
    Fast,
    /// Any factor in (0, 1)
    Custom(f64),
}

impl DecelerationRate {
    /// The per-millisecond decay factor
    pub fn value(self) -> f64 {
        match self {
            DecelerationRate::Normal => 0.998,
            DecelerationRate::Fast => 0.99,
            DecelerationRate::Custom(rate) => rate,
        }
    }

    /// Check that the factor lies strictly inside (0, 1)
    pub fn validate(self) -> Result<f64> {
        let rate = self.value();
        if rate.is_finite() && rate > 0.0 && rate < 1.0 {
            Ok(rate)
        } else {
            Err(Error::InvalidDecelerationRate(rate))
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RateName {
    Normal,
    Fast,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RateRepr {
    Named(RateName),
    Value(f64),
}

impl TryFrom<RateRepr> for DecelerationRate {
    type Error = Error;

    fn try_from(repr: RateRepr) -> Result<Self> {
        let rate = match repr {
            RateRepr::Named(RateName::Normal) => DecelerationRate::Normal,
            RateRepr::Named(RateName::Fast) => DecelerationRate::Fast,
            RateRepr::Value(value) => DecelerationRate::Custom(value),
        };
        rate.validate()?;
        Ok(rate)
    }
}

impl From<DecelerationRate> for RateRepr {
    fn from(rate: DecelerationRate) -> Self {
        match rate {
            DecelerationRate::Normal => RateRepr::Named(RateName::Normal),
            DecelerationRate::Fast => RateRepr::Named(RateName::Fast),
            DecelerationRate::Custom(value) => RateRepr::Value(value),
        }
    }
}

/// Trajectory of a flick released at `initial_value` with `initial_velocity`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecelerationTiming {
    pub initial_value: Point,
    /// Units per second
    pub initial_velocity: Point,
    /// Per-millisecond decay factor in (0, 1)
    pub deceleration_rate: f64,
    /// Speed (units per second) below which the motion counts as stopped
    pub threshold: f64,
}

impl DecelerationTiming {
    pub fn new(
        initial_value: Point,
        initial_velocity: Point,
        deceleration_rate: DecelerationRate,
        threshold: f64,
    ) -> Result<Self> {
        let deceleration_rate = deceleration_rate.validate()?;
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(Error::InvalidThreshold(threshold));
        }
        if !initial_value.is_finite() {
            return Err(Error::NonFinite("initial value"));
        }
        if !initial_velocity.is_finite() {
            return Err(Error::NonFinite("initial velocity"));
        }
        Ok(Self {
            initial_value,
            initial_velocity,
            deceleration_rate,
            threshold,
        })
    }

    /// `1000 * ln(rate)`; always negative
    #[inline]
    fn decay_coefficient(&self) -> f64 {
        1000.0 * self.deceleration_rate.ln()
    }

    /// Resting position as `t → ∞`
    pub fn destination(&self) -> Point {
        self.initial_value - self.initial_velocity * (1.0 / self.decay_coefficient())
    }

    /// Time at which the trajectory passes `target`, if it ever does.
    ///
    /// `None` when `target` is off the line of travel, behind the start, or
    /// at/after the asymptotic destination.
    pub fn duration_to(&self, target: Point) -> Option<f64> {
        let speed = self.initial_velocity.length();
        let offset = target - self.initial_value;
        if speed == 0.0 {
            return (offset.length() <= self.threshold).then_some(0.0);
        }

        let direction = self.initial_velocity * (1.0 / speed);
        let along = offset.dot(direction);
        let lateral = (offset - direction * along).length();
        if lateral > self.threshold {
            return None;
        }

        let d = self.decay_coefficient();
        let reach = -speed / d;
        if along < 0.0 || along >= reach {
            return None;
        }

        Some((1.0 + d * along / speed).ln() / d)
    }
}

impl TimingParameters for DecelerationTiming {
    fn value_at(&self, time: f64) -> Point {
        let d = self.decay_coefficient();
        let decay = self.deceleration_rate.powf(1000.0 * time);
        self.initial_value + self.initial_velocity * ((decay - 1.0) / d)
    }

    fn velocity_at(&self, time: f64) -> Point {
        self.initial_velocity * self.deceleration_rate.powf(1000.0 * time)
    }

    /// Time until `|v(t)|` falls to the threshold; 0 when already below it
    fn duration(&self) -> f64 {
        let speed = self.initial_velocity.length();
        if speed <= self.threshold {
            return 0.0;
        }
        ((self.threshold / speed).ln() / self.decay_coefficient()).max(0.0)
    }
}
