//! Spring physics
//!
//! Analytic solution of the damped harmonic oscillator
//!
//! ```text
//! m x'' + c x' + k x = 0,    c = 2 ζ sqrt(k m)
//! ```
//!
//! `x` is the displacement from the rest position. Each damping regime has its
//! own closed form, chosen once at construction, so sampling is O(1) per frame
//! and never integrates numerically.

use serde::{Deserialize, Serialize};
use thumbtrack_core::{Error, Point, Result};

use crate::timing::TimingParameters;

/// Damping ratios this close to 1 are treated as critical
const CRITICAL_EPSILON: f64 = 1e-6;

/// Spring configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Mass of the animated object
    pub mass: f64,
    /// Spring stiffness (force per unit displacement)
    pub stiffness: f64,
    /// Damping ratio ζ (1 = critical, < 1 oscillates, > 1 creeps)
    pub damping_ratio: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            stiffness: 200.0,
            damping_ratio: 1.0,
        }
    }
}

impl SpringConfig {
    pub fn new(mass: f64, stiffness: f64, damping_ratio: f64) -> Self {
        Self {
            mass,
            stiffness,
            damping_ratio,
        }
    }

    /// Critically damped unit-mass spring, used to pull overscrolled content back
    pub fn snap_back(stiffness: f64) -> Self {
        Self::new(1.0, stiffness, 1.0)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |value: f64| value.is_finite() && value > 0.0;
        if !positive(self.mass) {
            return Err(Error::InvalidSpring(format!("mass {}", self.mass)));
        }
        if !positive(self.stiffness) {
            return Err(Error::InvalidSpring(format!("stiffness {}", self.stiffness)));
        }
        if !positive(self.damping_ratio) {
            return Err(Error::InvalidSpring(format!(
                "damping ratio {}",
                self.damping_ratio
            )));
        }
        Ok(())
    }

    /// Undamped angular frequency ω0 = sqrt(k / m)
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Damping coefficient c = 2 ζ sqrt(k m)
    pub fn damping(&self) -> f64 {
        2.0 * self.damping_ratio * (self.stiffness * self.mass).sqrt()
    }

    /// Exponential decay rate β = c / 2m
    pub fn beta(&self) -> f64 {
        self.damping() / (2.0 * self.mass)
    }

    /// Oscillation frequency ωd = ω0 sqrt(1 - ζ²) of an underdamped spring
    pub fn damped_natural_frequency(&self) -> f64 {
        self.natural_frequency() * (1.0 - self.damping_ratio * self.damping_ratio).max(0.0).sqrt()
    }

    pub fn regime(&self) -> DampingRegime {
        if (self.damping_ratio - 1.0).abs() <= CRITICAL_EPSILON {
            DampingRegime::Critical
        } else if self.damping_ratio < 1.0 {
            DampingRegime::Underdamped
        } else {
            DampingRegime::Overdamped
        }
    }
}

/// Qualitative behavior of a spring
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DampingRegime {
    /// Oscillates with decaying amplitude
    Underdamped,
    /// Fastest return without overshoot
    Critical,
    /// Returns without oscillation, slower than critical
    Overdamped,
}

/// Per-regime closed form, with constants solved from the initial conditions
#[derive(Clone, Copy, Debug, PartialEq)]
enum Solution {
    /// x = e^(-βt) (c1 cos ωd t + c2 sin ωd t)
    Underdamped {
        c1: Point,
        c2: Point,
        beta: f64,
        omega_d: f64,
    },
    /// x = e^(-βt) (c1 + c2 t)
    Critical { c1: Point, c2: Point, beta: f64 },
    /// x = a e^(r1 t) + b e^(r2 t), r2 < r1 < 0
    Overdamped { a: Point, b: Point, r1: f64, r2: f64 },
}

/// Trajectory of a spring released at `displacement` with `initial_velocity`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringTiming {
    pub config: SpringConfig,
    pub displacement: Point,
    pub initial_velocity: Point,
    /// Displacement and speed below which the spring counts as settled
    pub threshold: f64,
    solution: Solution,
}

impl SpringTiming {
    pub fn new(
        config: SpringConfig,
        displacement: Point,
        initial_velocity: Point,
        threshold: f64,
    ) -> Result<Self> {
        config.validate()?;
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(Error::InvalidThreshold(threshold));
        }
        if !displacement.is_finite() {
            return Err(Error::NonFinite("displacement"));
        }
        if !initial_velocity.is_finite() {
            return Err(Error::NonFinite("initial velocity"));
        }

        let x0 = displacement;
        let v0 = initial_velocity;
        let beta = config.beta();

        let solution = match config.regime() {
            DampingRegime::Underdamped => {
                let omega_d = config.damped_natural_frequency();
                Solution::Underdamped {
                    c1: x0,
                    c2: (v0 + x0 * beta) * (1.0 / omega_d),
                    beta,
                    omega_d,
                }
            }
            DampingRegime::Critical => Solution::Critical {
                c1: x0,
                c2: v0 + x0 * beta,
                beta,
            },
            DampingRegime::Overdamped => {
                let omega0 = config.natural_frequency();
                let spread = (beta * beta - omega0 * omega0).sqrt();
                let r1 = -beta + spread;
                let r2 = -beta - spread;
                let a = (v0 - x0 * r2) * (1.0 / (r1 - r2));
                Solution::Overdamped {
                    a,
                    b: x0 - a,
                    r1,
                    r2,
                }
            }
        };

        Ok(Self {
            config,
            displacement,
            initial_velocity,
            threshold,
            solution,
        })
    }

    pub fn regime(&self) -> DampingRegime {
        self.config.regime()
    }
}

impl TimingParameters for SpringTiming {
    fn value_at(&self, time: f64) -> Point {
        match self.solution {
            Solution::Underdamped {
                c1,
                c2,
                beta,
                omega_d,
            } => {
                let (sin, cos) = (omega_d * time).sin_cos();
                (c1 * cos + c2 * sin) * (-beta * time).exp()
            }
            Solution::Critical { c1, c2, beta } => (c1 + c2 * time) * (-beta * time).exp(),
            Solution::Overdamped { a, b, r1, r2 } => a * (r1 * time).exp() + b * (r2 * time).exp(),
        }
    }

    fn velocity_at(&self, time: f64) -> Point {
        let v0 = self.initial_velocity;
        match self.solution {
            Solution::Underdamped {
                c1,
                c2,
                beta,
                omega_d,
            } => {
                let (sin, cos) = (omega_d * time).sin_cos();
                (v0 * cos - (c2 * beta + c1 * omega_d) * sin) * (-beta * time).exp()
            }
            Solution::Critical { c2, beta, .. } => (v0 - c2 * (beta * time)) * (-beta * time).exp(),
            Solution::Overdamped { a, b, r1, r2 } => {
                a * (r1 * (r1 * time).exp()) + b * (r2 * (r2 * time).exp())
            }
        }
    }

    /// Upper bound on the time until both `|x(t)|` and `|v(t)|` stay below
    /// the threshold, from envelope bounds of each closed form.
    fn duration(&self) -> f64 {
        let threshold = self.threshold;
        if self.displacement.length() < threshold && self.initial_velocity.length() < threshold {
            return 0.0;
        }

        match self.solution {
            Solution::Underdamped {
                c1,
                c2,
                beta,
                omega_d,
            } => {
                let position = c1.length() + c2.length();
                let speed =
                    self.initial_velocity.length() + (c2 * beta + c1 * omega_d).length();
                decay_time(position, beta, threshold).max(decay_time(speed, beta, threshold))
            }
            Solution::Critical { c1, c2, beta } => {
                let half = threshold / 2.0;
                let position = decay_time(c1.length(), beta, half)
                    .max(polynomial_decay_time(c2.length(), beta, half));
                let speed = decay_time(self.initial_velocity.length(), beta, half)
                    .max(polynomial_decay_time(c2.length() * beta, beta, half));
                position.max(speed)
            }
            Solution::Overdamped { a, b, r1, r2 } => {
                let rate = -r1;
                let position = a.length() + b.length();
                let speed = (a * r1).length() + (b * r2).length();
                decay_time(position, rate, threshold).max(decay_time(speed, rate, threshold))
            }
        }
    }
}

/// Smallest `t >= 0` with `amplitude * e^(-rate t) <= threshold`
fn decay_time(amplitude: f64, rate: f64, threshold: f64) -> f64 {
    if amplitude <= threshold {
        return 0.0;
    }
    (amplitude / threshold).ln() / rate
}

/// A `t >= 0` after which `amplitude * t * e^(-rate t) <= threshold`.
///
/// Uses `t e^(-rate t) <= 2 / (e rate) * e^(-rate t / 2)` for all `t >= 0`.
fn polynomial_decay_time(amplitude: f64, rate: f64, threshold: f64) -> f64 {
    decay_time(
        2.0 * amplitude / (std::f64::consts::E * rate),
        rate / 2.0,
        threshold,
    )
}
