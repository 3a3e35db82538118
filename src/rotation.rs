//! Jacobi rotation engine
//!
//! One iteration of the solver is `(a, v) -> (a', v')`: [`Rotation::compute`]
//! derives `(c, s)` from the pivot, [`Rotation::apply`] builds the next
//! matrix as a fresh value, and [`Rotation::accumulate`] folds the rotation
//! into the eigenvector accumulator in place.
//!
//! Only the two diagonal entries and the pivot pair are recomputed; every
//! other entry of `a` is carried over unchanged. The pivot entry is produced
//! by the rotation formula rather than assigned zero, so it ends up at
//! rounding-error size instead of exactly `0.0`.

use crate::config::EigenvectorUpdate;
use crate::scan::{max_off_diagonal_index, Pivot};
use crate::{Matrix, Result, RutishauserError};

/// Rotation parameters for a single pivot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    /// Pivot the rotation eliminates
    pub pivot: Pivot,
    /// Cosine of the rotation angle
    pub c: f64,
    /// Sine of the rotation angle
    pub s: f64,
}

impl Rotation {
    /// Computes the rotation that (approximately) zeroes `a[pivot]`
    ///
    /// With `theta = (a_qq - a_pp) / (2 a_pq)` the smaller root
    /// `t = sign(theta) / (|theta| + sqrt(1 + theta^2))` is taken, which
    /// avoids cancellation, then `c = 1 / sqrt(1 + t^2)` and `s = t c`.
    ///
    /// # Errors
    ///
    /// Returns `DegeneratePivot` if `a[pivot]` is exactly zero, and
    /// `InvalidInput` if the pivot is not a strict upper-triangle index of `a`.
    pub fn compute(a: &Matrix, pivot: Pivot) -> Result<Self> {
        check_pivot(pivot, a.size())?;
        let Pivot { row: p, col: q } = pivot;

        let apq = a[(p, q)];
        if apq == 0.0 {
            return Err(RutishauserError::DegeneratePivot { row: p, col: q });
        }

        let theta = (a[(q, q)] - a[(p, p)]) / (2.0 * apq);
        let t = if theta >= 0.0 {
            1.0 / (theta + (1.0 + theta * theta).sqrt())
        } else {
            -1.0 / (-theta + (1.0 + theta * theta).sqrt())
        };

        let c = 1.0 / (1.0 + t * t).sqrt();
        let s = t * c;

        Ok(Rotation { pivot, c, s })
    }

    /// Builds the rotated matrix from `a`
    ///
    /// `a` should be the matrix the rotation was computed from.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the pivot is not a strict upper-triangle
    /// index of `a`.
    pub fn apply(&self, a: &Matrix) -> Result<Matrix> {
        check_pivot(self.pivot, a.size())?;
        let Pivot { row: p, col: q } = self.pivot;
        let (c, s) = (self.c, self.s);

        let app = a[(p, p)];
        let aqq = a[(q, q)];
        let apq = a[(p, q)];

        let mut b = a.clone();
        b[(p, p)] = c * c * app - 2.0 * c * s * apq + s * s * aqq;
        b[(q, q)] = s * s * app + 2.0 * c * s * apq + c * c * aqq;

        let off = (c * c - s * s) * apq + c * s * (app - aqq);
        b[(p, q)] = off;
        b[(q, p)] = off;

        Ok(b)
    }

    /// Folds the rotation into the eigenvector accumulator `v`
    ///
    /// Both old column values are read before either is written.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `pivot.row >= pivot.col`, and
    /// `SizeMismatch` if `v` has no column `pivot.col`. `v` is left
    /// untouched in both cases.
    pub fn accumulate(&self, v: &mut Matrix, update: EigenvectorUpdate) -> Result<()> {
        let Pivot { row: p, col: q } = self.pivot;
        if p >= q {
            return Err(invalid_pivot(self.pivot, v.size()));
        }
        if q >= v.size() {
            return Err(RutishauserError::SizeMismatch {
                expected: q + 1,
                actual: v.size(),
            });
        }
        let (c, s) = (self.c, self.s);

        for i in 0..v.size() {
            let vip = v[(i, p)];
            let viq = v[(i, q)];
            v[(i, p)] = c * vip - s * viq;
            if update == EigenvectorUpdate::BothColumns {
                v[(i, q)] = s * vip + c * viq;
            }
        }
        Ok(())
    }
}

fn invalid_pivot(pivot: Pivot, n: usize) -> RutishauserError {
    RutishauserError::InvalidInput(format!(
        "pivot ({}, {}) is not in the strict upper triangle of a {}x{} matrix",
        pivot.row, pivot.col, n, n
    ))
}

fn check_pivot(pivot: Pivot, n: usize) -> Result<()> {
    if pivot.row >= pivot.col || pivot.col >= n {
        return Err(invalid_pivot(pivot, n));
    }
    Ok(())
}

/// Runs one full iteration: scan for the pivot, rotate, accumulate
///
/// Returns the next matrix; `v` is updated in place.
///
/// # Errors
///
/// Returns `DegeneratePivot` when `a` is already diagonal, since the
/// scanner then falls back to `(0, 1)` whose entry is zero, and
/// `SizeMismatch` when `v` is smaller than `a`.
pub fn jacobi_step(a: &Matrix, v: &mut Matrix, update: EigenvectorUpdate) -> Result<Matrix> {
    let rotation = Rotation::compute(a, max_off_diagonal_index(a))?;
    let b = rotation.apply(a)?;
    rotation.accumulate(v, update)?;
    Ok(b)
}
