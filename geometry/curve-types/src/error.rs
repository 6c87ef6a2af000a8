//! Error types for curve construction.

use thiserror::Error;

/// Errors that can occur while building a curve.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum CurveError {
    /// Insufficient points to define the curve.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        actual: usize,
    },

    /// Tension must be finite and non-negative.
    #[error("invalid tension: {0} (must be finite and non-negative)")]
    InvalidTension(f64),

    /// A control point has a NaN or infinite coordinate.
    #[error("control point {index} is not finite")]
    NonFinitePoint {
        /// Index of the offending control point.
        index: usize,
    },

    /// Sampling needs at least one interval, and one more point than intervals.
    #[error("invalid sample count: {0} intervals")]
    InvalidSampleCount(usize),

    /// Degenerate curve (e.g., zero length).
    #[error("degenerate curve: {reason}")]
    Degenerate {
        /// Description of the degeneracy.
        reason: String,
    },
}

impl CurveError {
    /// Create an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, actual: usize) -> Self {
        Self::InsufficientPoints { required, actual }
    }

    /// Create a degenerate curve error.
    #[must_use]
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::Degenerate {
            reason: reason.into(),
        }
    }

    /// Check if this is an insufficient points error.
    #[must_use]
    pub fn is_insufficient_points(&self) -> bool {
        matches!(self, Self::InsufficientPoints { .. })
    }

    /// Check if this is a degenerate curve error.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate { .. })
    }
}
