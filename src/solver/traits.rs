//! Solver configuration, result value objects and the sweep trait
//!
//! # Design Philosophy
//!
//! - Central enum [`RelaxationMethod`] defines which relaxation scheme
//!   runs; method-specific parameters (ω) live on the variant
//! - [`SolverConfig`] carries the shared stopping parameters and
//!   validates them
//! - [`ConvergenceResult`] is the immutable value object every solve
//!   produces, converged or not
//! - [`RelaxationSweep`] is the seam between the shared iteration
//!   driver and the concrete schemes: one full sweep in, the max
//!   pointwise update out
//!
//! Non-convergence is data (`converged = false`), never an error —
//! divergence is an expected, inspectable outcome for a poorly chosen ω
//! or an overly strict tolerance.

use std::time::Duration;

use crate::mesh::Mesh;

// =================================================================================================
// Relaxation Methods
// =================================================================================================

/// The relaxation scheme applied at every sweep.
///
/// All three discretize −ΔU = f with the same 5-point stencil and share
/// the same stopping rule; they differ only in traversal order and
/// blending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RelaxationMethod {
    /// Classic Gauss-Seidel: single-threaded lexicographic sweep with
    /// immediately visible in-place updates.
    GaussSeidel,

    /// Successive over-relaxation: Gauss-Seidel blended with the old
    /// value, `(1−ω)·old + ω·gs`.
    ///
    /// ω must lie in (0, 2) for the scheme to be consistent; values
    /// outside are accepted but not guaranteed to converge (caller
    /// responsibility, deliberately unvalidated).
    Sor {
        /// Relaxation factor ω
        omega: f64,
    },

    /// Thread-parallel red-black Gauss-Seidel: two color phases per
    /// sweep, each parallelized over interior-row blocks.
    RedBlackParallel,
}

impl RelaxationMethod {
    /// Display name of the method.
    pub fn name(&self) -> &'static str {
        match self {
            RelaxationMethod::GaussSeidel => "Gauss-Seidel",
            RelaxationMethod::Sor { .. } => "SOR",
            RelaxationMethod::RedBlackParallel => "Red-Black Parallel",
        }
    }
}

impl std::fmt::Display for RelaxationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelaxationMethod::Sor { omega } => write!(f, "SOR (omega = {})", omega),
            other => write!(f, "{}", other.name()),
        }
    }
}

// =================================================================================================
// Solver Configuration
// =================================================================================================

/// Stopping parameters shared by all relaxation methods.
///
/// # Examples
///
/// ```rust
/// use poisson2d::solver::SolverConfig;
///
/// let config = SolverConfig::sor(1e-8, 10_000, 1.7);
/// assert!(config.validate().is_ok());
///
/// let broken = SolverConfig::gauss_seidel(0.0, 100);
/// assert!(broken.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Relaxation scheme to apply
    pub method: RelaxationMethod,

    /// Stop when the max pointwise update of a sweep drops to or below
    /// this value (must be > 0)
    pub tolerance: f64,

    /// Hard iteration cap (must be ≥ 1); reaching it yields a
    /// best-effort result with `converged = false`
    pub max_iterations: usize,
}

impl SolverConfig {
    /// Create a configuration with an explicit method.
    pub fn new(method: RelaxationMethod, tolerance: f64, max_iterations: usize) -> Self {
        Self { method, tolerance, max_iterations }
    }

    /// Classic Gauss-Seidel configuration.
    pub fn gauss_seidel(tolerance: f64, max_iterations: usize) -> Self {
        Self::new(RelaxationMethod::GaussSeidel, tolerance, max_iterations)
    }

    /// SOR configuration with relaxation factor ω.
    pub fn sor(tolerance: f64, max_iterations: usize, omega: f64) -> Self {
        Self::new(RelaxationMethod::Sor { omega }, tolerance, max_iterations)
    }

    /// Parallel red-black configuration.
    pub fn red_black(tolerance: f64, max_iterations: usize) -> Self {
        Self::new(RelaxationMethod::RedBlackParallel, tolerance, max_iterations)
    }

    /// Validate the stopping parameters.
    ///
    /// ω is deliberately not validated: out-of-range values are a
    /// numerical-quality question (answered by `converged`), not a
    /// configuration error.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.tolerance > 0.0) {
            return Err(format!(
                "Tolerance must be positive (got {})",
                self.tolerance
            ));
        }
        if self.max_iterations == 0 {
            return Err("Maximum iterations must be at least 1".to_string());
        }
        Ok(())
    }
}

// =================================================================================================
// Convergence Result
// =================================================================================================

/// Outcome of one `solve` call. Immutable; produced once per call.
///
/// `error_history[0]` is unused (NaN); `error_history[k]` is the max
/// absolute pointwise update observed during sweep k.
#[derive(Debug, Clone)]
pub struct ConvergenceResult {
    /// Display name of the method that produced this result
    pub method_name: &'static str,

    /// Number of sweeps performed
    pub iterations: usize,

    /// Max |Δu| of the final sweep
    pub final_error: f64,

    /// Whether `final_error ≤ tolerance` was reached within the cap
    pub converged: bool,

    /// Wall-clock time of the iteration loop
    pub elapsed: Duration,

    /// Per-sweep max updates; index 0 unused
    pub error_history: Vec<f64>,
}

impl std::fmt::Display for ConvergenceResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} after {} iterations (final update {:.3e}, {:.1} ms)",
            self.method_name,
            if self.converged { "converged" } else { "NOT converged" },
            self.iterations,
            self.final_error,
            self.elapsed.as_secs_f64() * 1e3,
        )
    }
}

// =================================================================================================
// Sweep Trait
// =================================================================================================

/// One full relaxation sweep over the interior of a mesh.
///
/// # Contract
///
/// - updates interior cells only (the boundary invariant is preserved)
/// - returns the max absolute pointwise update of the sweep, the
///   quantity the shared stopping rule compares against the tolerance
///
/// The driver in [`crate::solver::IterativeSolver`] owns the iteration
/// loop, the stopping rule and the progress callback; implementations
/// own a single sweep's traversal and arithmetic.
pub trait RelaxationSweep {
    /// Perform one sweep, returning max |Δu| over the interior.
    fn sweep(&self, mesh: &mut Mesh) -> f64;

    /// Display name of the scheme.
    fn name(&self) -> &'static str;
}

// =================================================================================================
// Tests
// =================================================================================================
