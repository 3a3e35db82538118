//! Dense square matrices
//!
//! The eigensolver only ever works on square matrices, so [`Matrix`] stores a
//! single dimension `n` and `n * n` entries in row-major order. Construction
//! checks shape; symmetry is left to the caller (see [`Matrix::is_symmetric`]).
//!
//! # Example
//!
//! ```
//! use rutishauser::Matrix;
//!
//! let m = Matrix::from_rows(&[vec![2.0, 1.0], vec![1.0, 2.0]]).unwrap();
//! assert_eq!(m.size(), 2);
//! assert_eq!(m.get(0, 1), Some(&1.0));
//! assert_eq!(m.trace(), 4.0);
//! ```

use std::ops::{Index, IndexMut};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Result, RutishauserError};

/// A square n×n matrix of `f64` with row-major storage
///
/// For a 2x2 matrix:
/// ```text
/// [[a, b],
///  [c, d]]
/// ```
/// Data is stored as: [a, b, c, d]
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    n: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates an n×n matrix from row-major data
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `data.len() != n * n`
    ///
    /// # Example
    ///
    /// ```
    /// use rutishauser::Matrix;
    ///
    /// let m = Matrix::from_vec(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(m.get(1, 0), Some(&3.0));
    /// ```
    pub fn from_vec(n: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != n * n {
            return Err(RutishauserError::InvalidInput(format!(
                "Data length {} does not match matrix dimensions {}x{} (expected {})",
                data.len(),
                n,
                n,
                n * n
            )));
        }

        Ok(Matrix { n, data })
    }

    /// Creates a matrix from a sequence of rows
    ///
    /// This is the shape the solver's callers naturally hold: one `Vec<f64>`
    /// per row, as read from a grid of input cells.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `rows` is empty or any row length differs
    /// from the number of rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(RutishauserError::InvalidInput(
                "Cannot build a matrix from zero rows".to_string(),
            ));
        }

        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(RutishauserError::InvalidInput(format!(
                    "Row {} has {} entries, expected {} for a square matrix",
                    i,
                    row.len(),
                    n
                )));
            }
            data.extend_from_slice(row);
        }

        Ok(Matrix { n, data })
    }

    /// Creates an n×n matrix filled with zeros
    pub fn zeros(n: usize) -> Self {
        Matrix {
            n,
            data: vec![0.0; n * n],
        }
    }

    /// Creates the n×n identity matrix
    ///
    /// # Example
    ///
    /// ```
    /// use rutishauser::Matrix;
    ///
    /// let m = Matrix::identity(3);
    /// assert_eq!(m.get(0, 0), Some(&1.0));
    /// assert_eq!(m.get(0, 1), Some(&0.0));
    /// ```
    pub fn identity(n: usize) -> Self {
        let mut m = Matrix::zeros(n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// Returns the dimension n
    pub fn size(&self) -> usize {
        self.n
    }

    /// Returns true for the 0×0 matrix
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Gets a reference to an element at (row, col)
    ///
    /// Returns `None` if indices are out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<&f64> {
        if row >= self.n || col >= self.n {
            None
        } else {
            self.data.get(row * self.n + col)
        }
    }

    /// Gets a mutable reference to an element at (row, col)
    ///
    /// Returns `None` if indices are out of bounds
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut f64> {
        if row >= self.n || col >= self.n {
            None
        } else {
            self.data.get_mut(row * self.n + col)
        }
    }

    /// Returns a reference to the underlying row-major data
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns the main diagonal in index order
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.n).map(|i| self.data[i * self.n + i]).collect()
    }

    /// Copies column `col` into a fresh vector, or `None` if out of bounds
    pub fn column(&self, col: usize) -> Option<Vec<f64>> {
        if col >= self.n {
            return None;
        }
        Some((0..self.n).map(|row| self.data[row * self.n + col]).collect())
    }

    /// Sum of the diagonal entries
    pub fn trace(&self) -> f64 {
        (0..self.n).map(|i| self.data[i * self.n + i]).sum()
    }

    /// Returns true if `|a[i][j] - a[j][i]| <= tol` for every pair
    ///
    /// The solver never calls this; it is offered to callers who want to
    /// reject asymmetric input before solving.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                if (self.data[i * self.n + j] - self.data[j * self.n + i]).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the transpose
    pub fn transpose(&self) -> Matrix {
        let n = self.n;
        let mut result = Matrix::zeros(n);
        for i in 0..n {
            for j in 0..n {
                result.data[j * n + i] = self.data[i * n + j];
            }
        }
        result
    }

    /// Matrix multiplication `self × other`
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if the two matrices differ in dimension
    #[cfg_attr(feature = "tracing", instrument(skip(self, other), fields(n = self.n)))]
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        if other.n != self.n {
            return Err(RutishauserError::SizeMismatch {
                expected: self.n,
                actual: other.n,
            });
        }

        let n = self.n;
        let mut result = Matrix::zeros(n);
        // i-k-j order keeps the inner loop on contiguous rows of both operands
        for i in 0..n {
            for k in 0..n {
                let a_ik = self.data[i * n + k];
                for j in 0..n {
                    result.data[i * n + j] += a_ik * other.data[k * n + j];
                }
            }
        }

        Ok(result)
    }

    /// Matrix-vector multiplication `self × v`
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if `v.len() != self.size()`
    ///
    /// # Example
    ///
    /// ```
    /// use rutishauser::Matrix;
    ///
    /// let m = Matrix::from_vec(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(m.matvec(&[1.0, 1.0]).unwrap(), vec![3.0, 7.0]);
    /// ```
    pub fn matvec(&self, v: &[f64]) -> Result<Vec<f64>> {
        if v.len() != self.n {
            return Err(RutishauserError::SizeMismatch {
                expected: self.n,
                actual: v.len(),
            });
        }
        if self.n == 0 {
            return Ok(Vec::new());
        }

        Ok(self
            .data
            .chunks_exact(self.n)
            .map(|row| row.iter().zip(v).map(|(a, x)| a * x).sum())
            .collect())
    }

    /// Copies the matrix back into one `Vec<f64>` per row
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        if self.n == 0 {
            return Vec::new();
        }
        self.data.chunks_exact(self.n).map(<[f64]>::to_vec).collect()
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    /// Panics if either index is out of bounds; use [`Matrix::get`] to check.
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.n && col < self.n,
            "index ({row}, {col}) out of bounds for {0}x{0} matrix",
            self.n
        );
        &self.data[row * self.n + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(
            row < self.n && col < self.n,
            "index ({row}, {col}) out of bounds for {0}x{0} matrix",
            self.n
        );
        &mut self.data[row * self.n + col]
    }
}
