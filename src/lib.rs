//! Rutishauser: classical Jacobi eigensolver for small symmetric matrices
//!
//! Computes eigenvalues and eigenvectors of a dense real symmetric matrix by
//! repeatedly rotating away its largest off-diagonal entry.
//!
//! The crate is split the way the algorithm is:
//!
//! 1. [`scan`] - locate the largest off-diagonal magnitude
//! 2. [`rotation`] - build and apply one Jacobi rotation
//! 3. [`eigen`] - the convergence loop and its result
//!
//! Everything is synchronous and allocation-local: independent calls share
//! no state and may run on separate threads.
//!
//! # Quick Start
//!
//! ```rust
//! use rutishauser::solve_symmetric_eigenproblem;
//!
//! let eigen = solve_symmetric_eigenproblem(&[
//!     vec![2.0, 1.0],
//!     vec![1.0, 2.0],
//! ]).unwrap();
//!
//! for (value, vector) in eigen.iter() {
//!     println!("{:.4} {:?}", value, vector);
//! }
//! ```
//!
//! # Features
//!
//! - `tracing`: span per solve, `trace!` per rotation, `debug!` on termination
//! - `serde`: `Serialize`/`Deserialize` for [`JacobiConfig`] and [`SymmetricEigen`]

pub mod config;
pub mod eigen;
pub mod error;
pub mod matrix;
pub mod rotation;
pub mod scan;

pub use config::{EigenvectorUpdate, JacobiConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
pub use eigen::{solve_symmetric_eigenproblem, EigenIterator, SymmetricEigen, Termination};
pub use error::{Result, RutishauserError};
pub use matrix::Matrix;
pub use rotation::{jacobi_step, Rotation};
pub use scan::{max_off_diagonal, max_off_diagonal_entry, max_off_diagonal_index, Pivot};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_public_types_are_send_sync() {
        assert_send_sync::<Matrix>();
        assert_send_sync::<JacobiConfig>();
        assert_send_sync::<SymmetricEigen>();
        assert_send_sync::<RutishauserError>();
    }

    #[test]
    fn test_independent_solves_across_threads() {
        let handles: Vec<_> = (1..=4)
            .map(|k| {
                std::thread::spawn(move || {
                    let d = k as f64;
                    let m = Matrix::from_vec(2, vec![d, 1.0, 1.0, d]).expect("valid matrix");
                    SymmetricEigen::new(&m).expect("eigen should succeed")
                })
            })
            .collect();

        for (k, handle) in (1..=4).zip(handles) {
            let eigen = handle.join().expect("thread should not panic");
            let d = k as f64;
            assert!((eigen.eigenvalues()[0] - (d - 1.0)).abs() < 0.01);
            assert!((eigen.eigenvalues()[1] - (d + 1.0)).abs() < 0.01);
        }
    }
}
