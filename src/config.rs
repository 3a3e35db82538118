//! Solver configuration
//!
//! Defaults reproduce the classic interactive solver: stop once every
//! off-diagonal magnitude is at most `0.01`, and never apply more than `100`
//! rotations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Result, RutishauserError};

/// Convergence threshold on the largest off-diagonal magnitude
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Hard cap on the number of rotations
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// How each rotation is folded into the eigenvector accumulator
///
/// `PivotRowOnly` is the default and rotates only the pivot-row column of
/// the accumulator, leaving the pivot-column column untouched. This matches
/// the established output of the solver, but columns other than the pivot
/// row drift away from true eigenvectors once rotations overlap.
/// `BothColumns` applies the textbook update to both coupled columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EigenvectorUpdate {
    /// `v[i][p] = c*v[i][p] - s*v[i][q]`; column q unchanged
    #[default]
    PivotRowOnly,
    /// Also `v[i][q] = s*v[i][p] + c*v[i][q]`
    BothColumns,
}

/// Parameters of the convergence loop
///
/// # Example
///
/// ```
/// use rutishauser::{EigenvectorUpdate, JacobiConfig};
///
/// let config = JacobiConfig::default()
///     .with_tolerance(1e-9)
///     .with_eigenvector_update(EigenvectorUpdate::BothColumns);
/// assert_eq!(config.max_iterations, 100);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JacobiConfig {
    /// Loop stops once `max |a[i][j]| (i < j)` is at most this value
    pub tolerance: f64,
    /// Loop stops after this many rotations even if not converged
    pub max_iterations: usize,
    /// Accumulator update rule
    pub eigenvector_update: EigenvectorUpdate,
}

impl Default for JacobiConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            eigenvector_update: EigenvectorUpdate::default(),
        }
    }
}

impl JacobiConfig {
    /// Sets the convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the rotation cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the accumulator update rule
    pub fn with_eigenvector_update(mut self, update: EigenvectorUpdate) -> Self {
        self.eigenvector_update = update;
        self
    }

    /// Checks that the tolerance is finite and non-negative
    ///
    /// A non-negative tolerance is what keeps the loop from ever rotating
    /// on a zero pivot.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` otherwise
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() {
            return Err(RutishauserError::InvalidConfig(format!(
                "tolerance must be finite, got {}",
                self.tolerance
            )));
        }
        if self.tolerance < 0.0 {
            return Err(RutishauserError::InvalidConfig(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_classic_constants() {
        let config = JacobiConfig::default();
        assert_eq!(config.tolerance, 0.01);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.eigenvector_update, EigenvectorUpdate::PivotRowOnly);
    }

    #[test]
    fn test_builder_setters() {
        let config = JacobiConfig::default()
            .with_tolerance(1e-6)
            .with_max_iterations(7)
            .with_eigenvector_update(EigenvectorUpdate::BothColumns);
        assert_eq!(config.tolerance, 1e-6);
        assert_eq!(config.max_iterations, 7);
        assert_eq!(config.eigenvector_update, EigenvectorUpdate::BothColumns);
    }

    #[test]
    fn test_validate_accepts_zero_tolerance() {
        assert!(JacobiConfig::default().with_tolerance(0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_tolerance() {
        let result = JacobiConfig::default().with_tolerance(-1.0).validate();
        assert!(matches!(result, Err(RutishauserError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_non_finite_tolerance() {
        for tol in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = JacobiConfig::default().with_tolerance(tol).validate();
            assert!(
                matches!(result, Err(RutishauserError::InvalidConfig(_))),
                "tolerance {} should be rejected",
                tol
            );
        }
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_partial_document_fills_defaults() {
            let config: JacobiConfig =
                serde_json::from_str(r#"{ "tolerance": 0.001 }"#).expect("valid config");
            assert_eq!(config.tolerance, 0.001);
            assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
            assert_eq!(config.eigenvector_update, EigenvectorUpdate::PivotRowOnly);
        }

        #[test]
        fn test_update_rule_snake_case() {
            let config: JacobiConfig =
                serde_json::from_str(r#"{ "eigenvector_update": "both_columns" }"#)
                    .expect("valid config");
            assert_eq!(config.eigenvector_update, EigenvectorUpdate::BothColumns);

            let json = serde_json::to_string(&EigenvectorUpdate::PivotRowOnly).unwrap();
            assert_eq!(json, r#""pivot_row_only""#);
        }
    }
}
