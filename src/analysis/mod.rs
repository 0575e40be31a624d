//! Discretization-error norms and convergence studies
//!
//! # Mathematical Background
//!
//! With an exact solution on the mesh, the pointwise error
//! d[i,j] = U[i,j] − exact[i,j] over the interior yields three norms:
//!
//! ```text
//! L2   = h · √(Σ d²)          (Riemann-sum approximation of ‖d‖_L²)
//! max  = max |d|
//! mean = Σ |d| / N_interior²
//! ```
//!
//! The 5-point stencil is second-order accurate, so refining the mesh
//! should shrink these norms like h². [`study_convergence`] measures
//! that empirically across a family of meshes with the two-point
//! Richardson estimator
//!
//! ```text
//! p_k = ln(e_k / e_{k+1}) / ln(h_k / h_{k+1})
//! ```
//!
//! # Design Philosophy
//!
//! A missing or degenerate reference solution is a normal outcome, not
//! an error: [`ErrorAnalysis::available`] is false and the norm fields
//! are NaN. Only configuration failures (a solve rejecting its config)
//! propagate as `Err`.

use ndarray::Array2;

use crate::cases::TestCase;
use crate::mesh::Mesh;
use crate::solver::{ConvergenceResult, IterativeSolver, SolverConfig};

/// Errors below this are numerically indistinguishable from exact and
/// poison the Richardson log-ratio; such pairs yield a NaN local order.
const ORDER_ESTIMATE_FLOOR: f64 = 1e-15;

/// Sweeps of recorded history required before a convergence factor is
/// considered meaningful.
const MIN_FACTOR_SWEEPS: usize = 5;

// =================================================================================================
// Error Analysis
// =================================================================================================

/// Interior-only error norms against the mesh's exact solution.
///
/// When the mesh carries no valid (non-all-zero) exact solution,
/// `available` is false, the norms are NaN and the map is zeroed.
#[derive(Debug, Clone)]
pub struct ErrorAnalysis {
    /// h·√(Σ d²) over the interior
    pub l2_error: f64,

    /// max |d| over the interior
    pub max_error: f64,

    /// mean |d| over the interior
    pub mean_error: f64,

    /// Per-cell |d|, full N×N (zero on the boundary frame)
    pub error_map: Array2<f64>,

    /// Number of interior cells analyzed
    pub interior_points: usize,

    /// False when no valid exact solution was supplied
    pub available: bool,
}

impl ErrorAnalysis {
    fn unavailable(n_total: usize) -> Self {
        Self {
            l2_error: f64::NAN,
            max_error: f64::NAN,
            mean_error: f64::NAN,
            error_map: Array2::zeros((n_total, n_total)),
            interior_points: 0,
            available: false,
        }
    }
}

impl std::fmt::Display for ErrorAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.available {
            write!(
                f,
                "L2 = {:.3e}, max = {:.3e}, mean = {:.3e} ({} interior points)",
                self.l2_error, self.max_error, self.mean_error, self.interior_points
            )
        } else {
            write!(f, "no exact solution available")
        }
    }
}

/// Compare the solution grid against the mesh's exact solution.
///
/// Does not mutate the mesh. Returns an unavailable analysis when the
/// exact-solution grid is absent in substance (all zero).
pub fn compute_errors(mesh: &Mesh) -> ErrorAnalysis {
    let n = mesh.n_total();
    if !mesh.has_exact_solution() {
        return ErrorAnalysis::unavailable(n);
    }

    let u = mesh.u();
    let exact = mesh.exact();
    let mut error_map = Array2::zeros((n, n));
    let mut sum_sq = 0.0_f64;
    let mut sum_abs = 0.0_f64;
    let mut max_error = 0.0_f64;

    for i in 1..n - 1 {
        for j in 1..n - 1 {
            let d = (u[[i, j]] - exact[[i, j]]).abs();
            error_map[[i, j]] = d;
            sum_sq += d * d;
            sum_abs += d;
            max_error = max_error.max(d);
        }
    }

    let interior_points = (n - 2) * (n - 2);
    ErrorAnalysis {
        l2_error: mesh.h() * sum_sq.sqrt(),
        max_error,
        mean_error: sum_abs / interior_points as f64,
        error_map,
        interior_points,
        available: true,
    }
}

// =================================================================================================
// Iterative Convergence Factor
// =================================================================================================

/// Geometric-mean per-sweep error-reduction factor of a recorded run.
///
/// The factor is `(e_last / e_first)^(1/(k−1))` over the recorded
/// history, i.e. the geometric mean of the per-sweep ratios. Returns
/// `None` when fewer than 5 sweeps were recorded or the history is
/// degenerate (zero or non-finite entries). Strictly below 1 for a
/// convergent run.
pub fn analyze_iterative_convergence(result: &ConvergenceResult) -> Option<f64> {
    // history[0] is the unused NaN slot
    let history = &result.error_history[1..];
    if history.len() < MIN_FACTOR_SWEEPS {
        return None;
    }
    let first = history[0];
    let last = history[history.len() - 1];
    if !(first > 0.0) || !(last > 0.0) || !first.is_finite() || !last.is_finite() {
        return None;
    }
    let exponent = 1.0 / (history.len() - 1) as f64;
    Some((last / first).powf(exponent))
}

/// Crude a priori discretization-error bound h²/12, a reference line
/// for convergence plots rather than a correctness check.
pub fn discretization_error_estimate(h: f64) -> f64 {
    h * h / 12.0
}

// =================================================================================================
// Convergence Study
// =================================================================================================

/// Empirical convergence orders across a family of mesh refinements.
///
/// `l2_orders[k]` / `max_orders[k]` is the local Richardson order for
/// the pair (mesh k, mesh k+1) — one fewer entry than meshes, NaN when
/// either paired error sits at the numerical floor. Overall orders are
/// the mean of the valid local orders (NaN when none are valid).
#[derive(Debug, Clone)]
pub struct ConvergenceStudy {
    /// Requested N_total values, in study order
    pub mesh_sizes: Vec<usize>,

    /// Grid spacing per mesh
    pub h_values: Vec<f64>,

    /// L2 error per mesh
    pub l2_errors: Vec<f64>,

    /// Max error per mesh
    pub max_errors: Vec<f64>,

    /// Pairwise local L2 orders
    pub l2_orders: Vec<f64>,

    /// Pairwise local max-norm orders
    pub max_orders: Vec<f64>,

    /// Mean of valid local L2 orders
    pub overall_l2_order: f64,

    /// Mean of valid local max-norm orders
    pub overall_max_order: f64,
}

impl std::fmt::Display for ConvergenceStudy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Convergence study over {} meshes:", self.mesh_sizes.len())?;
        for k in 0..self.mesh_sizes.len() {
            writeln!(
                f,
                "  N = {:4}  h = {:.4e}  L2 = {:.4e}  max = {:.4e}",
                self.mesh_sizes[k], self.h_values[k], self.l2_errors[k], self.max_errors[k]
            )?;
        }
        write!(
            f,
            "  overall order: L2 = {:.2}, max = {:.2} (theory: 2.0)",
            self.overall_l2_order, self.overall_max_order
        )
    }
}

/// Solve one test case on each requested mesh size and estimate the
/// empirical convergence order of the discretization.
///
/// Builds a fresh mesh per size with the case's recommended boundary
/// conditions, solves with the given configuration, and pairs adjacent
/// meshes through the Richardson estimator. Fails on invalid sizes or
/// configuration, and on a case without an exact solution (the study
/// is meaningless without a reference).
pub fn study_convergence(
    case: &dyn TestCase,
    mesh_sizes: &[usize],
    config: &SolverConfig,
    solver: &IterativeSolver,
) -> Result<ConvergenceStudy, String> {
    if mesh_sizes.len() < 2 {
        return Err(format!(
            "A convergence study needs at least 2 mesh sizes (got {})",
            mesh_sizes.len()
        ));
    }

    let mut h_values = Vec::with_capacity(mesh_sizes.len());
    let mut l2_errors = Vec::with_capacity(mesh_sizes.len());
    let mut max_errors = Vec::with_capacity(mesh_sizes.len());

    for &n in mesh_sizes {
        let mut mesh = Mesh::new(n, case.recommended_boundary())?;
        mesh.configure_test_case(case);
        solver.solve(&mut mesh, config)?;

        let analysis = compute_errors(&mesh);
        if !analysis.available {
            return Err(format!(
                "Test case '{}' has no exact solution; convergence order cannot be estimated",
                case.name()
            ));
        }
        h_values.push(mesh.h());
        l2_errors.push(analysis.l2_error);
        max_errors.push(analysis.max_error);
    }

    let l2_orders = local_orders(&h_values, &l2_errors);
    let max_orders = local_orders(&h_values, &max_errors);

    Ok(ConvergenceStudy {
        mesh_sizes: mesh_sizes.to_vec(),
        overall_l2_order: mean_of_valid(&l2_orders),
        overall_max_order: mean_of_valid(&max_orders),
        h_values,
        l2_errors,
        max_errors,
        l2_orders,
        max_orders,
    })
}

/// Two-point Richardson estimate for each adjacent mesh pair.
fn local_orders(h_values: &[f64], errors: &[f64]) -> Vec<f64> {
    (0..h_values.len() - 1)
        .map(|k| {
            let (e0, e1) = (errors[k], errors[k + 1]);
            if e0 <= ORDER_ESTIMATE_FLOOR || e1 <= ORDER_ESTIMATE_FLOOR {
                f64::NAN
            } else {
                (e0 / e1).ln() / (h_values[k] / h_values[k + 1]).ln()
            }
        })
        .collect()
}

fn mean_of_valid(orders: &[f64]) -> f64 {
    let valid: Vec<f64> = orders.iter().copied().filter(|p| p.is_finite()).collect();
    if valid.is_empty() {
        f64::NAN
    } else {
        valid.iter().sum::<f64>() / valid.len() as f64
    }
}

// =================================================================================================
// Tests
// =================================================================================================
