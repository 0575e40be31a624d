//! Demo: Mesh-Refinement Convergence Study
//!
//! Solves −ΔU = 2π²·sin(πx)·sin(πy) (exact solution sin(πx)·sin(πy),
//! homogeneous boundary) on a family of meshes with each of the three
//! relaxation methods, then reports:
//!
//! - iteration counts and wall time per method and mesh
//! - discretization-error norms against the exact solution
//! - the empirical convergence order (theory: 2.0)
//! - the equation residual as an independent sanity check
//!
//! Run with:
//!
//! ```bash
//! RUST_LOG=debug cargo run --example convergence_study --release
//! ```

use std::time::Instant;

use poisson2d::analysis::{analyze_iterative_convergence, discretization_error_estimate};
use poisson2d::prelude::*;

const MESH_SIZES: [usize; 4] = [9, 17, 33, 65];
const TOLERANCE: f64 = 1e-9;
const MAX_ITERATIONS: usize = 200_000;

fn main() -> Result<(), String> {
    env_logger::init();

    let case = SineProduct;
    let solver = IterativeSolver::new()?;
    println!("=== {} ===", case.name());
    println!("{}", case.description());
    println!("worker pool: {} threads\n", solver.num_threads());

    // ---- per-method timing on the finest mesh --------------------------------
    let finest = *MESH_SIZES.last().unwrap();
    let methods = [
        SolverConfig::gauss_seidel(TOLERANCE, MAX_ITERATIONS),
        SolverConfig::sor(TOLERANCE, MAX_ITERATIONS, optimal_omega(finest - 2)),
        SolverConfig::red_black(TOLERANCE, MAX_ITERATIONS),
    ];

    println!("--- Method comparison on N = {} ---", finest);
    for config in &methods {
        let mut mesh = Mesh::new(finest, case.recommended_boundary())?;
        mesh.configure_test_case(&case);

        let start = Instant::now();
        let result = solver.solve(&mut mesh, config)?;
        let elapsed = start.elapsed();

        let residual = calculate_residual(&mesh);
        let factor = analyze_iterative_convergence(&result)
            .map(|f| format!("{:.4}", f))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "  {:20} {:6} sweeps  {:8.1} ms  residual max {:.2e}  factor {}",
            result.method_name,
            result.iterations,
            elapsed.as_secs_f64() * 1e3,
            residual.max,
            factor,
        );
    }

    // ---- refinement study with SOR -------------------------------------------
    println!("\n--- Refinement study (SOR at optimal omega) ---");
    let config = SolverConfig::sor(TOLERANCE, MAX_ITERATIONS, optimal_omega(finest - 2));
    let study = study_convergence(&case, &MESH_SIZES, &config, &solver)?;
    println!("{}", study);

    println!("\n  a priori reference h²/12:");
    for (n, h) in study.mesh_sizes.iter().zip(study.h_values.iter()) {
        println!(
            "    N = {:4}  estimate {:.3e}",
            n,
            discretization_error_estimate(*h)
        );
    }

    Ok(())
}
