//! Error types for physical parameters

use thiserror::Error;

/// Errors raised when constructing motion models from invalid parameters.
///
/// Numeric degeneracies at evaluation time (zero-width bounds, velocities
/// already below threshold) are recovered locally and never reported here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Spring mass, stiffness or damping ratio out of range
    #[error("invalid spring parameters: {0}")]
    InvalidSpring(String),

    /// Deceleration rate outside (0, 1)
    #[error("deceleration rate must lie in (0, 1), got {0}")]
    InvalidDecelerationRate(f64),

    /// Motion threshold must be positive
    #[error("threshold must be positive and finite, got {0}")]
    InvalidThreshold(f64),

    /// NaN or infinite input
    #[error("non-finite {0}")]
    NonFinite(&'static str),
}

/// Result type for model construction
pub type Result<T> = std::result::Result<T, Error>;
