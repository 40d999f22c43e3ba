//! Error types for transform composition and grid evaluation.

use thiserror::Error;

/// Result type alias using TransformError.
pub type TransformResult<T> = Result<T, TransformError>;

/// Primary error type for transform construction and evaluation.
///
/// None of these are retried internally: every variant is a deterministic
/// function of the inputs, so repeating the call reproduces the failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    // === Dimensionality ===
    #[error("Dimension mismatch: expected {expected} ordinates, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid dimension {0}: only 2 or 3 ordinates are supported")]
    InvalidDimension(usize),

    #[error("Cannot derive a {source_dim}D -> {target_dim}D variant: {reason}")]
    UnsupportedDimensionChange {
        source_dim: usize,
        target_dim: usize,
        reason: String,
    },

    #[error("Invalid ordinate window: {0}")]
    InvalidWindow(String),

    // === Inversion ===
    #[error("Transform is not invertible: {0}")]
    NotInvertible(String),

    #[error("Inverse did not converge after {iterations} iterations (residual {residual:e})")]
    NoConvergence { iterations: usize, residual: f64 },

    // === Grid ===
    #[error("Position outside grid bounds on axis {axis}: fractional index {index} not in [0, {}]", .extent.saturating_sub(1))]
    OutOfGridBounds {
        axis: usize,
        index: f64,
        extent: usize,
    },

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    // === Construction ===
    #[error("Invalid matrix: {0}")]
    InvalidMatrix(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TransformError {
    /// Create a NotInvertible error.
    pub fn not_invertible(msg: impl Into<String>) -> Self {
        Self::NotInvertible(msg.into())
    }

    /// Create an InvalidGrid error.
    pub fn invalid_grid(msg: impl Into<String>) -> Self {
        Self::InvalidGrid(msg.into())
    }

    /// Create an UnsupportedDimensionChange error.
    pub fn unsupported_dimension_change(
        source_dim: usize,
        target_dim: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnsupportedDimensionChange {
            source_dim,
            target_dim,
            reason: reason.into(),
        }
    }

    /// Check a coordinate length against a declared dimensionality.
    pub fn check_dimension(expected: usize, actual: usize) -> TransformResult<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::DimensionMismatch { expected, actual })
        }
    }

    /// Whether this error can only surface while evaluating coordinates.
    ///
    /// Everything else is raised while a pipeline is being assembled.
    pub fn is_evaluation_error(&self) -> bool {
        matches!(
            self,
            TransformError::DimensionMismatch { .. }
                | TransformError::OutOfGridBounds { .. }
                | TransformError::NoConvergence { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dimension() {
        assert!(TransformError::check_dimension(3, 3).is_ok());
        assert_eq!(
            TransformError::check_dimension(3, 2),
            Err(TransformError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_out_of_bounds_message() {
        let err = TransformError::OutOfGridBounds {
            axis: 0,
            index: 1.5,
            extent: 2,
        };
        assert_eq!(
            err.to_string(),
            "Position outside grid bounds on axis 0: fractional index 1.5 not in [0, 1]"
        );
    }

    #[test]
    fn test_evaluation_errors() {
        assert!(TransformError::DimensionMismatch {
            expected: 2,
            actual: 3
        }
        .is_evaluation_error());
        assert!(!TransformError::not_invertible("no inverse").is_evaluation_error());
        assert!(!TransformError::InvalidDimension(4).is_evaluation_error());
    }
}
