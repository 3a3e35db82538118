//! Off-diagonal scanner
//!
//! Only the strict upper triangle is read; the lower triangle is assumed to
//! mirror it.

use crate::Matrix;

/// Location of an off-diagonal entry, always with `row < col`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pivot {
    /// Row index (the smaller of the two)
    pub row: usize,
    /// Column index
    pub col: usize,
}

impl Pivot {
    /// Returned when no off-diagonal entry is larger than zero
    pub const DEFAULT: Pivot = Pivot { row: 0, col: 1 };
}

impl Default for Pivot {
    fn default() -> Self {
        Pivot::DEFAULT
    }
}

/// Finds the largest-magnitude entry of the strict upper triangle
///
/// Scans row by row, left to right, and only replaces the current best on a
/// strictly larger magnitude, so the first occurrence wins ties. When every
/// off-diagonal entry is zero (or `n < 2`) the result is `(Pivot::DEFAULT, 0.0)`.
#[inline]
pub fn max_off_diagonal_entry(matrix: &Matrix) -> (Pivot, f64) {
    let n = matrix.size();
    let a = matrix.as_slice();
    let mut max_val = 0.0f64;
    let mut pivot = Pivot::DEFAULT;

    for i in 0..n {
        for j in (i + 1)..n {
            let val = a[i * n + j].abs();
            if val > max_val {
                max_val = val;
                pivot = Pivot { row: i, col: j };
            }
        }
    }

    (pivot, max_val)
}

/// Largest off-diagonal magnitude
///
/// # Example
///
/// ```
/// use rutishauser::{max_off_diagonal, Matrix};
///
/// let m = Matrix::from_vec(3, vec![
///     1.0, -4.0, 2.0,
///    -4.0,  1.0, 3.0,
///     2.0,  3.0, 1.0,
/// ]).unwrap();
/// assert_eq!(max_off_diagonal(&m), 4.0);
/// ```
pub fn max_off_diagonal(matrix: &Matrix) -> f64 {
    max_off_diagonal_entry(matrix).1
}

/// Location of the largest off-diagonal magnitude
pub fn max_off_diagonal_index(matrix: &Matrix) -> Pivot {
    max_off_diagonal_entry(matrix).0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(n: usize, data: &[f64]) -> Matrix {
        Matrix::from_vec(n, data.to_vec()).expect("valid matrix")
    }

    #[test]
    fn test_scan_2x2() {
        let a = m(2, &[2.0, 1.0, 1.0, 2.0]);
        assert_eq!(max_off_diagonal(&a), 1.0);
        assert_eq!(max_off_diagonal_index(&a), Pivot { row: 0, col: 1 });
    }

    #[test]
    fn test_scan_uses_absolute_value() {
        let a = m(3, &[1.0, 0.5, -3.0, 0.5, 1.0, 2.0, -3.0, 2.0, 1.0]);
        assert_eq!(max_off_diagonal(&a), 3.0);
        assert_eq!(max_off_diagonal_index(&a), Pivot { row: 0, col: 2 });
    }

    #[test]
    fn test_scan_ignores_diagonal() {
        let a = m(3, &[100.0, 0.1, 0.2, 0.1, -100.0, 0.3, 0.2, 0.3, 50.0]);
        assert_eq!(max_off_diagonal(&a), 0.3);
        assert_eq!(max_off_diagonal_index(&a), Pivot { row: 1, col: 2 });
    }

    #[test]
    fn test_scan_reads_upper_triangle_only() {
        // lower triangle deliberately disagrees
        let a = m(3, &[0.0, 1.0, 2.0, 9.0, 0.0, 3.0, 9.0, 9.0, 0.0]);
        assert_eq!(max_off_diagonal(&a), 3.0);
        assert_eq!(max_off_diagonal_index(&a), Pivot { row: 1, col: 2 });
    }

    #[test]
    fn test_scan_ties_first_occurrence_wins() {
        let a = m(3, &[0.0, 2.0, -2.0, 2.0, 0.0, 2.0, -2.0, 2.0, 0.0]);
        assert_eq!(max_off_diagonal_index(&a), Pivot { row: 0, col: 1 });

        let b = m(3, &[0.0, 1.0, 2.0, 1.0, 0.0, -2.0, 2.0, -2.0, 0.0]);
        assert_eq!(max_off_diagonal_index(&b), Pivot { row: 0, col: 2 });
    }

    #[test]
    fn test_scan_all_zero_returns_default() {
        let a = Matrix::identity(4);
        assert_eq!(max_off_diagonal(&a), 0.0);
        assert_eq!(max_off_diagonal_index(&a), Pivot::DEFAULT);
        assert_eq!(Pivot::default(), Pivot { row: 0, col: 1 });
    }

    #[test]
    fn test_scan_1x1() {
        let a = m(1, &[7.0]);
        assert_eq!(max_off_diagonal(&a), 0.0);
        assert_eq!(max_off_diagonal_index(&a), Pivot::DEFAULT);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(50))]

            #[test]
            fn prop_value_and_index_agree(
                n in 2usize..7,
                seed in prop::collection::vec(-50.0f64..50.0, 36)
            ) {
                let mut data = vec![0.0; n * n];
                for i in 0..n {
                    for j in i..n {
                        let v = seed[i * 6 + j];
                        data[i * n + j] = v;
                        data[j * n + i] = v;
                    }
                }
                let a = Matrix::from_vec(n, data).expect("valid matrix");

                let max = max_off_diagonal(&a);
                let p = max_off_diagonal_index(&a);
                prop_assert!(p.row < p.col);
                prop_assert!(p.col < n);
                if max > 0.0 {
                    prop_assert_eq!(a[(p.row, p.col)].abs(), max);
                }
                for i in 0..n {
                    for j in (i + 1)..n {
                        prop_assert!(a[(i, j)].abs() <= max);
                    }
                }
            }
        }
    }
}
