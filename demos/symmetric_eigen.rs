//! Symmetric Eigendecomposition Example
//!
//! Demonstrates the Jacobi solver on a few small matrices.
//!
//! Run with: cargo run --example symmetric_eigen

use rutishauser::{
    solve_symmetric_eigenproblem, EigenvectorUpdate, JacobiConfig, Matrix, SymmetricEigen,
};

fn print_result(eigen: &SymmetricEigen) {
    println!(
        "   {:?} after {} rotation(s), residual {:.2e}",
        eigen.termination(),
        eigen.iterations(),
        eigen.residual()
    );
    for (value, vector) in eigen.iter() {
        let formatted: Vec<String> = vector.iter().map(|x| format!("{:.4}", x)).collect();
        println!("   λ = {:.4}   v = [{}]", value, formatted.join(", "));
    }
    println!();
}

fn main() {
    println!("=== Rutishauser Jacobi Demo ===\n");

    println!("1. Simple 2x2 matrix [[2, 1], [1, 2]]");
    let eigen = solve_symmetric_eigenproblem(&[vec![2.0, 1.0], vec![1.0, 2.0]])
        .expect("eigendecomposition");
    print_result(&eigen);

    println!("2. 3x3 matrix, default settings");
    #[rustfmt::skip]
    let m = Matrix::from_vec(3, vec![
        4.0, 1.0, 0.5,
        1.0, 3.0, 2.0,
        0.5, 2.0, 1.0,
    ]).expect("valid matrix");
    let eigen = SymmetricEigen::new(&m).expect("eigendecomposition");
    print_result(&eigen);

    println!("3. Same matrix, both accumulator columns rotated, tighter tolerance");
    let config = JacobiConfig::default()
        .with_tolerance(1e-10)
        .with_eigenvector_update(EigenvectorUpdate::BothColumns);
    let eigen = SymmetricEigen::with_config(&m, &config).expect("eigendecomposition");
    print_result(&eigen);

    println!("4. Budget of one rotation");
    let config = JacobiConfig::default().with_max_iterations(1);
    let eigen = SymmetricEigen::with_config(&m, &config).expect("eigendecomposition");
    print_result(&eigen);

    let sum: f64 = eigen.eigenvalues().iter().sum();
    println!("Trace {:.4}, eigenvalue sum {:.4}", m.trace(), sum);
}
