//! Eigendecomposition for symmetric matrices
//!
//! Classical (largest-pivot) Jacobi iteration in Rutishauser's formulation.
//! Every step the largest off-diagonal entry is located and rotated away,
//! until every off-diagonal magnitude is within the configured tolerance or
//! the rotation budget runs out.
//!
//! # Example
//!
//! ```
//! use rutishauser::{Matrix, SymmetricEigen, Termination};
//!
//! let m = Matrix::from_vec(2, vec![
//!     2.0, 1.0,
//!     1.0, 2.0,
//! ]).unwrap();
//!
//! let eigen = SymmetricEigen::new(&m).unwrap();
//!
//! // Eigenvalues come back in diagonal order, not sorted
//! let values = eigen.eigenvalues();
//! assert!((values[0] - 1.0).abs() < 0.01);
//! assert!((values[1] - 3.0).abs() < 0.01);
//! assert_eq!(eigen.termination(), Termination::Converged);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::{debug, instrument, trace};

use crate::rotation::Rotation;
use crate::scan::max_off_diagonal_entry;
use crate::{JacobiConfig, Matrix, Result, RutishauserError};

/// Terminal state of the convergence loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Termination {
    /// Largest off-diagonal magnitude fell to the tolerance
    Converged,
    /// Rotation budget spent first; the result is an approximation
    Exhausted,
}

/// Symmetric matrix eigendecomposition
///
/// Eigenvalues are the diagonal of the final rotated matrix in index order.
/// Eigenvector `i` is column `i` of the rotation accumulator and pairs with
/// eigenvalue `i`.
///
/// Reaching the iteration cap is not an error. Check [`termination`] or
/// [`residual`] when the distinction matters.
///
/// [`termination`]: SymmetricEigen::termination
/// [`residual`]: SymmetricEigen::residual
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SymmetricEigen {
    eigenvalues: Vec<f64>,
    eigenvectors: Vec<Vec<f64>>,
    iterations: usize,
    termination: Termination,
    residual: f64,
}

impl SymmetricEigen {
    /// Computes the eigendecomposition with [`JacobiConfig::default`]
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the matrix is empty
    pub fn new(matrix: &Matrix) -> Result<Self> {
        Self::with_config(matrix, &JacobiConfig::default())
    }

    /// Computes the eigendecomposition with an explicit configuration
    ///
    /// The input must be symmetric; this is not checked, and asymmetric input
    /// produces meaningless output rather than an error.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the matrix is empty
    /// - `InvalidConfig` if the tolerance is negative or non-finite
    ///
    /// # Example
    ///
    /// ```
    /// use rutishauser::{EigenvectorUpdate, JacobiConfig, Matrix, SymmetricEigen};
    ///
    /// let m = Matrix::from_vec(2, vec![3.0, 1.0, 1.0, 3.0]).unwrap();
    /// let config = JacobiConfig::default()
    ///     .with_tolerance(1e-12)
    ///     .with_eigenvector_update(EigenvectorUpdate::BothColumns);
    ///
    /// let eigen = SymmetricEigen::with_config(&m, &config).unwrap();
    /// assert!((eigen.eigenvalues()[0] - 2.0).abs() < 1e-9);
    /// assert!((eigen.eigenvalues()[1] - 4.0).abs() < 1e-9);
    /// ```
    #[cfg_attr(
        feature = "tracing",
        instrument(skip(matrix, config), fields(n = matrix.size(), tolerance = config.tolerance))
    )]
    pub fn with_config(matrix: &Matrix, config: &JacobiConfig) -> Result<Self> {
        config.validate()?;

        if matrix.is_empty() {
            return Err(RutishauserError::InvalidInput(
                "Cannot compute eigendecomposition of empty matrix".to_string(),
            ));
        }

        let n = matrix.size();
        let mut a = matrix.clone();
        let mut v = Matrix::identity(n);
        let mut iterations = 0;

        let (termination, residual) = loop {
            let (pivot, max_off) = max_off_diagonal_entry(&a);

            if max_off <= config.tolerance {
                break (Termination::Converged, max_off);
            }
            if iterations >= config.max_iterations {
                break (Termination::Exhausted, max_off);
            }

            #[cfg(feature = "tracing")]
            trace!(iteration = iterations, row = pivot.row, col = pivot.col, magnitude = max_off, "rotating");

            // max_off > tolerance >= 0, so the pivot is non-zero
            let rotation = Rotation::compute(&a, pivot)?;
            a = rotation.apply(&a)?;
            rotation.accumulate(&mut v, config.eigenvector_update)?;
            iterations += 1;
        };

        #[cfg(feature = "tracing")]
        debug!(?termination, iterations, residual, "jacobi loop finished");

        Ok(Self::extract(&a, &v, iterations, termination, residual))
    }

    fn extract(
        a: &Matrix,
        v: &Matrix,
        iterations: usize,
        termination: Termination,
        residual: f64,
    ) -> Self {
        let eigenvalues = a.diagonal();
        let eigenvectors = (0..v.size()).filter_map(|j| v.column(j)).collect();

        SymmetricEigen {
            eigenvalues,
            eigenvectors,
            iterations,
            termination,
            residual,
        }
    }

    /// Returns the eigenvalues in diagonal order
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    /// Returns the eigenvectors; entry `i` pairs with `eigenvalues()[i]`
    pub fn eigenvectors(&self) -> &[Vec<f64>] {
        &self.eigenvectors
    }

    /// Returns eigenvector `i`, or `None` if the index is out of bounds
    pub fn eigenvector(&self, i: usize) -> Option<&[f64]> {
        self.eigenvectors.get(i).map(Vec::as_slice)
    }

    /// Returns an iterator over (eigenvalue, eigenvector) pairs
    ///
    /// # Example
    ///
    /// ```
    /// use rutishauser::{Matrix, SymmetricEigen};
    ///
    /// let m = Matrix::from_vec(2, vec![2.0, 0.0, 0.0, 1.0]).unwrap();
    /// let eigen = SymmetricEigen::new(&m).unwrap();
    ///
    /// for (value, vector) in eigen.iter() {
    ///     println!("λ = {:.4}, v = {:?}", value, vector);
    /// }
    /// ```
    pub fn iter(&self) -> EigenIterator<'_> {
        EigenIterator {
            eigen: self,
            index: 0,
        }
    }

    /// Returns the number of eigenvalue/eigenvector pairs
    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    /// Returns true if there are no eigenvalues
    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }

    /// Returns the number of rotations applied
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the terminal state that ended the loop
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Returns true if the loop reached the tolerance
    pub fn is_converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Returns the largest off-diagonal magnitude left in the final matrix
    pub fn residual(&self) -> f64 {
        self.residual
    }

    /// Returns `V × D × V^T` rebuilt from the eigenpairs
    ///
    /// Only approximates the input when the eigenvectors are accurate, i.e.
    /// with [`crate::EigenvectorUpdate::BothColumns`] on a 2x2 input or when
    /// no rotation overlapped another.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if the number of eigenvectors or the length of
    /// any eigenvector differs from the number of eigenvalues. Only a
    /// deserialized value can be in that state.
    pub fn reconstruct(&self) -> Result<Matrix> {
        let n = self.len();
        if self.eigenvectors.len() != n {
            return Err(RutishauserError::SizeMismatch {
                expected: n,
                actual: self.eigenvectors.len(),
            });
        }
        if let Some(bad) = self.eigenvectors.iter().find(|v| v.len() != n) {
            return Err(RutishauserError::SizeMismatch {
                expected: n,
                actual: bad.len(),
            });
        }

        let mut v_data = vec![0.0f64; n * n];
        let mut vd_data = vec![0.0f64; n * n];
        for (j, (lambda, vector)) in self.iter().enumerate() {
            for (i, &x) in vector.iter().enumerate() {
                v_data[i * n + j] = x;
                vd_data[i * n + j] = x * lambda;
            }
        }

        let v = Matrix::from_vec(n, v_data)?;
        let vd = Matrix::from_vec(n, vd_data)?;
        vd.matmul(&v.transpose())
    }

    /// Consumes the result, returning `(eigenvalues, eigenvectors)`
    pub fn into_parts(self) -> (Vec<f64>, Vec<Vec<f64>>) {
        (self.eigenvalues, self.eigenvectors)
    }
}

/// Iterator over eigenvalue-eigenvector pairs
pub struct EigenIterator<'a> {
    eigen: &'a SymmetricEigen,
    index: usize,
}

impl<'a> Iterator for EigenIterator<'a> {
    type Item = (f64, &'a [f64]);

    fn next(&mut self) -> Option<Self::Item> {
        let value = *self.eigen.eigenvalues.get(self.index)?;
        let vector = self.eigen.eigenvector(self.index)?;
        self.index += 1;
        Some((value, vector))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.eigen.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for EigenIterator<'a> {}

/// Solves a symmetric eigenproblem given as one `Vec<f64>` per row
///
/// Uses [`JacobiConfig::default`] (tolerance `0.01`, at most `100` rotations).
///
/// # Errors
///
/// Returns `InvalidInput` if `rows` is empty, ragged, or not square
///
/// # Example
///
/// ```
/// use rutishauser::solve_symmetric_eigenproblem;
///
/// let eigen = solve_symmetric_eigenproblem(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
/// assert_eq!(eigen.eigenvalues(), &[1.0, 1.0]);
/// assert_eq!(eigen.eigenvectors(), &[vec![1.0, 0.0], vec![0.0, 1.0]]);
/// ```
pub fn solve_symmetric_eigenproblem(rows: &[Vec<f64>]) -> Result<SymmetricEigen> {
    let matrix = Matrix::from_rows(rows)?;
    SymmetricEigen::new(&matrix)
}
