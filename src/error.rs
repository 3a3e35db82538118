//! Error types for eigensolver operations

use thiserror::Error;

/// Result type for eigensolver operations
pub type Result<T> = std::result::Result<T, RutishauserError>;

/// Errors that can occur while building matrices or solving
///
/// Running out of iterations is deliberately absent: an exhausted loop still
/// returns its best approximation, see [`crate::Termination::Exhausted`].
#[derive(Debug, Error, PartialEq)]
pub enum RutishauserError {
    /// Malformed matrix (empty, ragged or non-square)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Size mismatch between operands
    #[error("Size mismatch: expected {expected}, got {actual}")]
    SizeMismatch {
        /// Expected size
        expected: usize,
        /// Actual size
        actual: usize,
    },

    /// Solver configuration out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Rotation requested on an exactly zero pivot
    #[error("Degenerate pivot at ({row}, {col}): off-diagonal entry is zero")]
    DegeneratePivot {
        /// Pivot row
        row: usize,
        /// Pivot column
        col: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_error() {
        let err = RutishauserError::InvalidInput("Empty matrix".to_string());
        assert_eq!(err.to_string(), "Invalid input: Empty matrix");
    }

    #[test]
    fn test_size_mismatch_error() {
        let err = RutishauserError::SizeMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "Size mismatch: expected 3, got 2");
    }

    #[test]
    fn test_invalid_config_error() {
        let err = RutishauserError::InvalidConfig("tolerance must be finite".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: tolerance must be finite"
        );
    }

    #[test]
    fn test_degenerate_pivot_error() {
        let err = RutishauserError::DegeneratePivot { row: 0, col: 2 };
        assert_eq!(
            err.to_string(),
            "Degenerate pivot at (0, 2): off-diagonal entry is zero"
        );
    }

    #[test]
    fn test_error_equality() {
        let err1 = RutishauserError::DegeneratePivot { row: 1, col: 2 };
        let err2 = RutishauserError::DegeneratePivot { row: 1, col: 2 };
        assert_eq!(err1, err2);
        assert_ne!(err1, RutishauserError::DegeneratePivot { row: 0, col: 2 });
    }
}
