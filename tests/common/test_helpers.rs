//! Helper functions for integration tests

use poisson2d::prelude::*;

/// Route `log` output through the test harness; safe to call from
/// every test, only the first call wins.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a mesh of size `n_total` configured for the given test case.
pub fn configured_mesh(n_total: usize, case: &dyn TestCase) -> Mesh {
    let mut mesh = Mesh::new(n_total, case.recommended_boundary())
        .unwrap_or_else(|e| panic!("mesh construction failed: {}", e));
    mesh.configure_test_case(case);
    mesh
}

/// Assert that the solution grids of two meshes agree everywhere.
pub fn assert_grids_close(a: &Mesh, b: &Mesh, tolerance: f64, message: &str) {
    assert_eq!(
        a.n_total(),
        b.n_total(),
        "{}: mesh size mismatch",
        message
    );
    let n = a.n_total();
    for i in 0..n {
        for j in 0..n {
            let diff = (a.u()[[i, j]] - b.u()[[i, j]]).abs();
            assert!(
                diff < tolerance,
                "{}: cell ({}, {}) differs by {:e} (tolerance {:e})",
                message,
                i,
                j,
                diff,
                tolerance
            );
        }
    }
}

/// Largest deviation of any boundary cell from its prescribed
/// Dirichlet value.
pub fn max_boundary_deviation(mesh: &Mesh) -> f64 {
    let n = mesh.n_total();
    let bc = mesh.boundary_conditions();
    let mut worst = 0.0_f64;
    for i in 0..n {
        for j in 0..n {
            if !mesh.is_boundary(i, j) {
                continue;
            }
            let prescribed = bc
                .value_at(i, j, n, mesh.h())
                .unwrap_or_else(|e| panic!("boundary lookup failed: {}", e));
            worst = worst.max((mesh.u()[[i, j]] - prescribed).abs());
        }
    }
    worst
}
