//! Iterative solver driver for the discrete Poisson problem
//!
//! # Design Philosophy
//!
//! The driver owns everything the relaxation schemes share:
//!
//! - the iteration loop with its stopping rule (max pointwise update
//!   ≤ tolerance) and hard iteration cap
//! - wall-clock timing and the per-sweep error history
//! - optional progress reporting at a fixed sweep cadence
//! - the worker thread pool for the parallel method
//!
//! The schemes themselves sit behind [`RelaxationSweep`] and contribute
//! only a single sweep. Sequential and parallel methods run through the
//! same loop and are compared on equal terms.
//!
//! Non-convergence is not an error: hitting the iteration cap yields a
//! best-effort [`ConvergenceResult`] with `converged = false` and the
//! mesh left in its last iterated state for inspection.
//!
//! # Residual
//!
//! [`calculate_residual`] evaluates r = F + Δ_h U on the interior —
//! how well the current grid satisfies the discrete equation, as
//! opposed to the update-based stopping quantity. The max norm is the
//! authoritative measure; the RMS accompanies it as a bulk indicator.

pub mod methods;
pub mod traits;

use std::time::Instant;

use log::debug;
use rayon::ThreadPool;

use crate::mesh::Mesh;
use methods::{GaussSeidelSweep, RedBlackSweep, SorSweep};

pub use methods::optimal_omega;
pub use traits::{ConvergenceResult, RelaxationMethod, RelaxationSweep, SolverConfig};

/// Progress callbacks fire every this many sweeps (and once at the end).
const PROGRESS_INTERVAL: usize = 10;

// =================================================================================================
// Residual Diagnostics
// =================================================================================================

/// Interior residual norms of r = F + Δ_h U.
///
/// An exactly-solved discrete system has r ≡ 0. After convergence at
/// tolerance τ the residual is small but not zero — roughly τ · 4/h² in
/// the max norm, since the stopping rule bounds updates, not residuals.
#[derive(Debug, Clone, Copy)]
pub struct ResidualDiagnostics {
    /// max |r| over the interior (authoritative)
    pub max: f64,

    /// root-mean-square of r over the interior
    pub rms: f64,
}

/// Evaluate the discrete residual of the current solution grid.
pub fn calculate_residual(mesh: &Mesh) -> ResidualDiagnostics {
    let n = mesh.n_total();
    let h2 = mesh.h() * mesh.h();
    let u = mesh.u();
    let f = mesh.f();

    let mut max = 0.0_f64;
    let mut sum_sq = 0.0_f64;
    for i in 1..n - 1 {
        for j in 1..n - 1 {
            let laplacian =
                (u[[i - 1, j]] + u[[i + 1, j]] + u[[i, j - 1]] + u[[i, j + 1]] - 4.0 * u[[i, j]])
                    / h2;
            let r = f[[i, j]] + laplacian;
            max = max.max(r.abs());
            sum_sq += r * r;
        }
    }
    let interior = ((n - 2) * (n - 2)) as f64;
    ResidualDiagnostics { max, rms: (sum_sq / interior).sqrt() }
}

// =================================================================================================
// Iterative Solver
// =================================================================================================

/// Shared iteration driver owning the worker pool.
///
/// One instance can solve any number of meshes with any method; the
/// pool is built once at construction and reused across solves.
///
/// # Examples
///
/// ```rust
/// use poisson2d::prelude::*;
///
/// let case = SineProduct;
/// let mut mesh = Mesh::new(17, case.recommended_boundary()).unwrap();
/// mesh.configure_test_case(&case);
///
/// let solver = IterativeSolver::new().unwrap();
/// let config = SolverConfig::gauss_seidel(1e-6, 2_000);
/// let result = solver.solve(&mut mesh, &config).unwrap();
/// assert!(result.converged);
/// ```
pub struct IterativeSolver {
    pool: ThreadPool,
}

impl IterativeSolver {
    /// Create a solver with one worker per available CPU.
    pub fn new() -> Result<Self, String> {
        let threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::with_threads(threads)
    }

    /// Create a solver with an explicit worker count.
    pub fn with_threads(threads: usize) -> Result<Self, String> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| format!("Failed to build worker pool: {}", e))?;
        Ok(Self { pool })
    }

    /// Number of workers in the pool.
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Iterate the configured method on the mesh until the max
    /// pointwise update drops to the tolerance or the cap is reached.
    ///
    /// The mesh's interior is updated in place; the boundary is never
    /// touched.
    pub fn solve(&self, mesh: &mut Mesh, config: &SolverConfig) -> Result<ConvergenceResult, String> {
        self.solve_with_progress(mesh, config, None)
    }

    /// Like [`solve`](Self::solve), reporting the sweep count to
    /// `progress` every [`PROGRESS_INTERVAL`] sweeps and once after the
    /// final sweep.
    ///
    /// The callback runs on the coordinating thread only, never inside
    /// a parallel phase.
    pub fn solve_with_progress(
        &self,
        mesh: &mut Mesh,
        config: &SolverConfig,
        progress: Option<&mut dyn FnMut(usize)>,
    ) -> Result<ConvergenceResult, String> {
        config.validate()?;

        let sweep: Box<dyn RelaxationSweep + '_> = match config.method {
            RelaxationMethod::GaussSeidel => Box::new(GaussSeidelSweep::new()),
            RelaxationMethod::Sor { omega } => Box::new(SorSweep::new(omega)),
            RelaxationMethod::RedBlackParallel => Box::new(RedBlackSweep::new(&self.pool)),
        };

        debug!(
            "Solving {}x{} mesh with {} (tolerance {:.1e}, cap {})",
            mesh.n_total(),
            mesh.n_total(),
            sweep.name(),
            config.tolerance,
            config.max_iterations
        );

        let mut progress = progress;
        let mut error_history = Vec::with_capacity(config.max_iterations + 1);
        error_history.push(f64::NAN); // index 0 unused; history[k] belongs to sweep k

        let start = Instant::now();
        let mut iterations = 0;
        let mut final_error = f64::INFINITY;
        let mut converged = false;

        for k in 1..=config.max_iterations {
            let max_update = sweep.sweep(mesh);
            error_history.push(max_update);
            iterations = k;
            final_error = max_update;

            if k % PROGRESS_INTERVAL == 0 {
                if let Some(cb) = progress.as_deref_mut() {
                    cb(k);
                }
            }

            if max_update <= config.tolerance {
                converged = true;
                break;
            }
        }
        let elapsed = start.elapsed();

        if iterations % PROGRESS_INTERVAL != 0 {
            if let Some(cb) = progress.as_deref_mut() {
                cb(iterations);
            }
        }

        let result = ConvergenceResult {
            method_name: sweep.name(),
            iterations,
            final_error,
            converged,
            elapsed,
            error_history,
        };
        debug!("{}", result);
        Ok(result)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryConditions;
    use crate::cases::{ConstantSource, SineProduct, TestCase};
    use approx::assert_abs_diff_eq;

    fn configured_mesh(n: usize, case: &dyn TestCase) -> Mesh {
        let mut mesh = Mesh::new(n, case.recommended_boundary()).unwrap();
        mesh.configure_test_case(case);
        mesh
    }

    // ===== Driver behavior =====

    #[test]
    fn test_rejects_invalid_config() {
        let solver = IterativeSolver::with_threads(1).unwrap();
        let mut mesh = Mesh::new(5, BoundaryConditions::homogeneous()).unwrap();
        let config = SolverConfig::gauss_seidel(-1.0, 100);
        assert!(solver.solve(&mut mesh, &config).is_err());
    }

    #[test]
    fn test_converges_on_simple_problem() {
        let solver = IterativeSolver::with_threads(2).unwrap();
        let mut mesh = configured_mesh(12, &ConstantSource);
        let config = SolverConfig::gauss_seidel(1e-6, 5_000);

        let result = solver.solve(&mut mesh, &config).unwrap();
        assert!(result.converged);
        assert!(result.final_error <= 1e-6);
        assert_eq!(result.method_name, "Gauss-Seidel");
        assert!(mesh.verify_consistency());
    }

    #[test]
    fn test_iteration_cap_yields_unconverged_result() {
        let solver = IterativeSolver::with_threads(1).unwrap();
        let mut mesh = configured_mesh(17, &SineProduct);
        let config = SolverConfig::gauss_seidel(1e-14, 3);

        let result = solver.solve(&mut mesh, &config).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 3);
        // mesh keeps the best-effort state
        assert!(mesh.verify_consistency());
    }

    #[test]
    fn test_error_history_layout() {
        let solver = IterativeSolver::with_threads(1).unwrap();
        let mut mesh = configured_mesh(9, &ConstantSource);
        let config = SolverConfig::gauss_seidel(1e-13, 5);

        let result = solver.solve(&mut mesh, &config).unwrap();
        assert_eq!(result.error_history.len(), result.iterations + 1);
        assert!(result.error_history[0].is_nan());
        assert_abs_diff_eq!(
            result.error_history[result.iterations],
            result.final_error
        );
        // monotone-ish decay for this well-behaved problem
        assert!(result.error_history[result.iterations] < result.error_history[1]);
    }

    #[test]
    fn test_progress_callback_cadence() {
        let solver = IterativeSolver::with_threads(1).unwrap();
        let mut mesh = configured_mesh(12, &ConstantSource);
        // cap forces exactly 25 sweeps
        let config = SolverConfig::gauss_seidel(1e-15, 25);

        let mut reports = Vec::new();
        let mut cb = |k: usize| reports.push(k);
        solver
            .solve_with_progress(&mut mesh, &config, Some(&mut cb))
            .unwrap();

        assert_eq!(reports, vec![10, 20, 25]);
    }

    #[test]
    fn test_sor_converges_faster_than_gauss_seidel() {
        let solver = IterativeSolver::with_threads(1).unwrap();
        let case = SineProduct;
        let config_gs = SolverConfig::gauss_seidel(1e-8, 20_000);
        let omega = optimal_omega(15);
        let config_sor = SolverConfig::sor(1e-8, 20_000, omega);

        let mut mesh_gs = configured_mesh(17, &case);
        let mut mesh_sor = configured_mesh(17, &case);
        let gs = solver.solve(&mut mesh_gs, &config_gs).unwrap();
        let sor = solver.solve(&mut mesh_sor, &config_sor).unwrap();

        assert!(gs.converged && sor.converged);
        assert!(sor.iterations < gs.iterations);
    }

    #[test]
    fn test_red_black_matches_sequential_solution() {
        let solver = IterativeSolver::with_threads(4).unwrap();
        let case = SineProduct;
        let tight = 1e-10;

        let mut mesh_gs = configured_mesh(9, &case);
        let mut mesh_rb = configured_mesh(9, &case);
        solver
            .solve(&mut mesh_gs, &SolverConfig::gauss_seidel(tight, 50_000))
            .unwrap();
        solver
            .solve(&mut mesh_rb, &SolverConfig::red_black(tight, 50_000))
            .unwrap();

        // both approximate the same discrete solution
        for i in 0..9 {
            for j in 0..9 {
                assert_abs_diff_eq!(
                    mesh_gs.u()[[i, j]],
                    mesh_rb.u()[[i, j]],
                    epsilon = 1e-6
                );
            }
        }
    }

    // ===== Residual =====

    #[test]
    fn test_residual_zero_on_exact_discrete_solution() {
        // zero source, zero boundary: u ≡ 0 solves the discrete system
        let mesh = Mesh::new(9, BoundaryConditions::homogeneous()).unwrap();
        let residual = calculate_residual(&mesh);
        assert_abs_diff_eq!(residual.max, 0.0);
        assert_abs_diff_eq!(residual.rms, 0.0);
    }

    #[test]
    fn test_residual_drops_after_convergence() {
        let solver = IterativeSolver::with_threads(1).unwrap();
        let mut mesh = configured_mesh(12, &ConstantSource);

        let before = calculate_residual(&mesh);
        solver
            .solve(&mut mesh, &SolverConfig::gauss_seidel(1e-9, 10_000))
            .unwrap();
        let after = calculate_residual(&mesh);

        assert!(after.max < before.max * 1e-3);
        assert!(after.rms <= after.max);
    }
}
