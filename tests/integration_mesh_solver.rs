//! Integration tests across mesh, boundary conditions, solver and
//! analysis
//!
//! These exercise full solve workflows: the boundary invariant under
//! iteration, a concrete fixed scenario with known qualitative
//! behavior, snapshot/restore around solves, and the diagnostic paths
//! (residual, availability flag, corner compatibility).

use poisson2d::prelude::*;

mod common;
use common::{configured_mesh, init_logging, max_boundary_deviation};

// =================================================================================================
// Boundary invariant
// =================================================================================================

#[test]
fn test_boundary_invariant_held_through_solve() {
    // Non-trivial per-edge data: the boundary must match the prescribed
    // values exactly before and after a full solve, for every method.
    init_logging();
    let bc = BoundaryConditions::new(
        EdgeFunction::Sinusoidal { amplitude: 1.5, frequency: 2.0 },
        EdgeFunction::Linear { start: 0.0, end: 3.0 },
        EdgeFunction::Quadratic { a: 1.0, b: -1.0, c: 0.5 },
        EdgeFunction::Constant(2.0),
    );
    let solver = IterativeSolver::new().unwrap();

    for method in [
        RelaxationMethod::GaussSeidel,
        RelaxationMethod::Sor { omega: 1.6 },
        RelaxationMethod::RedBlackParallel,
    ] {
        let mut mesh = Mesh::new(17, bc).unwrap();
        assert!(
            max_boundary_deviation(&mesh) < 1e-12,
            "{}: boundary off before solve",
            method
        );

        let config = SolverConfig::new(method, 1e-7, 20_000);
        let result = solver.solve(&mut mesh, &config).unwrap();
        assert!(result.converged, "{}: did not converge", method);
        assert!(
            max_boundary_deviation(&mesh) < 1e-12,
            "{}: boundary drifted during solve",
            method
        );
    }
}

// =================================================================================================
// Concrete scenario
// =================================================================================================

#[test]
fn test_constant_source_scenario() {
    // N = 12, homogeneous boundary, f ≡ 1, classic Gauss-Seidel,
    // tolerance 1e-6, cap 5000: converges to a solution symmetric about
    // the domain center with a small equation residual.
    let solver = IterativeSolver::new().unwrap();
    let mut mesh = configured_mesh(12, &ConstantSource);
    let config = SolverConfig::gauss_seidel(1e-6, 5_000);

    let result = solver.solve(&mut mesh, &config).unwrap();
    assert!(result.converged);
    assert!(result.iterations < 5_000);

    // centro-symmetry: problem and domain are invariant under the
    // point reflection (i, j) → (N−1−i, N−1−j)
    let n = mesh.n_total();
    for i in 0..n {
        for j in 0..n {
            let mirrored = mesh.u()[[n - 1 - i, n - 1 - j]];
            assert!(
                (mesh.u()[[i, j]] - mirrored).abs() < 1e-4,
                "asymmetry at ({}, {})",
                i,
                j
            );
        }
    }

    // interior is positive (maximum principle for f > 0, zero boundary)
    for i in 1..n - 1 {
        for j in 1..n - 1 {
            assert!(mesh.u()[[i, j]] > 0.0);
        }
    }

    let residual = calculate_residual(&mesh);
    assert!(residual.rms < 1e-2, "residual RMS {} too large", residual.rms);
    assert!(residual.rms <= residual.max);
}

// =================================================================================================
// Snapshot / restore around solves
// =================================================================================================

#[test]
fn test_snapshot_restore_makes_solve_repeatable() {
    let solver = IterativeSolver::new().unwrap();
    let mut mesh = configured_mesh(12, &SineProduct);
    let config = SolverConfig::sor(1e-8, 10_000, optimal_omega(10));

    let initial = mesh.snapshot();
    assert_eq!(initial.n_total(), 12);
    let first = solver.solve(&mut mesh, &config).unwrap();
    assert!(first.converged);
    let solved = mesh.clone();

    // rewind to the initial guess and solve again
    mesh.restore(&initial).unwrap();
    let second = solver.solve(&mut mesh, &config).unwrap();

    assert_eq!(first.iterations, second.iterations);
    common::assert_grids_close(&solved, &mesh, 1e-15, "repeated solve from snapshot");
}

// =================================================================================================
// Diagnostics
// =================================================================================================

#[test]
fn test_error_analysis_availability() {
    let solver = IterativeSolver::new().unwrap();
    let config = SolverConfig::gauss_seidel(1e-6, 10_000);

    // case with an exact solution: full analysis
    let mut with_exact = configured_mesh(9, &SineProduct);
    solver.solve(&mut with_exact, &config).unwrap();
    let analysis = compute_errors(&with_exact);
    assert!(analysis.available);
    assert!(analysis.l2_error.is_finite());
    assert!(analysis.l2_error > 0.0);

    // case without one: available = false, not an error
    let mut without_exact = configured_mesh(9, &ConstantSource);
    solver.solve(&mut without_exact, &config).unwrap();
    let analysis = compute_errors(&without_exact);
    assert!(!analysis.available);
    assert!(analysis.l2_error.is_nan());
}

#[test]
fn test_corner_incompatibility_detected() {
    init_logging();
    // bottom edge ends at 2 where the right edge starts at 0: the
    // shared corner disagrees, so the compatibility check must flag it
    let incompatible = BoundaryConditions::new(
        EdgeFunction::Constant(2.0),
        EdgeFunction::Constant(2.0),
        EdgeFunction::Constant(2.0),
        EdgeFunction::Constant(0.0),
    );
    assert!(!incompatible.check_compatibility());

    // solving still proceeds; the check is advisory
    let solver = IterativeSolver::new().unwrap();
    let mut mesh = Mesh::new(9, incompatible).unwrap();
    let result = solver
        .solve(&mut mesh, &SolverConfig::gauss_seidel(1e-6, 10_000))
        .unwrap();
    assert!(result.converged);

    assert!(BoundaryConditions::homogeneous().check_compatibility());
    assert!(BoundaryConditions::bilinear(1.0, 2.0, 3.0, 4.0).check_compatibility());
}

#[test]
fn test_catalog_cases_all_solvable() {
    // every cataloged case converges on a small mesh; the ones carrying
    // an exact solution also produce a finite analysis
    let solver = IterativeSolver::new().unwrap();
    let config = SolverConfig::sor(1e-7, 50_000, optimal_omega(9));

    for case in catalog() {
        let mut mesh = configured_mesh(11, case.as_ref());
        let result = solver.solve(&mut mesh, &config).unwrap();
        assert!(result.converged, "{} did not converge", case.name());

        let analysis = compute_errors(&mesh);
        if mesh.has_exact_solution() {
            assert!(
                analysis.available && analysis.max_error.is_finite(),
                "{}: analysis unavailable despite exact solution",
                case.name()
            );
        }
    }
}
