//! Successive over-relaxation (SOR)
//!
//! # Mathematical Background
//!
//! SOR blends each Gauss-Seidel update with the previous value:
//!
//! ```text
//! U[i,j] ← (1−ω)·U[i,j] + ω·gs(i,j)
//! ```
//!
//! where `gs(i,j)` is the plain 5-point Gauss-Seidel value and ω is the
//! relaxation factor. ω = 1 recovers Gauss-Seidel; ω ∈ (1, 2)
//! over-relaxes and, at the right ω, cuts the iteration count from
//! O(N²) to O(N) for the discrete Poisson operator.
//!
//! # Optimal relaxation factor
//!
//! For an N×N interior grid the spectral radius of the Jacobi iteration
//! is ρ = cos(π/(N+1)), and the classic closed-form optimum is
//!
//! ```text
//! ω* = 2 / (1 + √(1 − ρ²)) = 2 / (1 + sin(π/(N+1)))
//! ```
//!
//! [`optimal_omega`] computes this; it is advisory, never enforced —
//! any ω is accepted, and a divergent choice simply surfaces as
//! `converged = false`.
//!
//! # Traversal
//!
//! Identical to Gauss-Seidel: lexicographic, in place, updates visible
//! within the sweep.

use crate::mesh::Mesh;
use crate::solver::traits::RelaxationSweep;

/// Near-optimal ω for an `n_interior × n_interior` unknown grid:
/// `2 / (1 + sin(π/(N+1)))`.
///
/// # Examples
///
/// ```rust
/// use poisson2d::solver::optimal_omega;
///
/// let omega = optimal_omega(31);
/// assert!(omega > 1.0 && omega < 2.0);
/// ```
pub fn optimal_omega(n_interior: usize) -> f64 {
    let n = n_interior as f64;
    2.0 / (1.0 + (std::f64::consts::PI / (n + 1.0)).sin())
}

/// Single-threaded lexicographic SOR sweep with relaxation factor ω.
#[derive(Debug, Clone, Copy)]
pub struct SorSweep {
    omega: f64,
}

impl SorSweep {
    /// Create a sweep with the given relaxation factor.
    pub fn new(omega: f64) -> Self {
        Self { omega }
    }

    /// The relaxation factor in use.
    pub fn omega(&self) -> f64 {
        self.omega
    }
}

impl RelaxationSweep for SorSweep {
    fn sweep(&self, mesh: &mut Mesh) -> f64 {
        let n = mesh.n_total();
        let h2 = mesh.h() * mesh.h();
        let omega = self.omega;
        let (u, f) = mesh.u_f_mut();

        let mut max_update = 0.0_f64;
        for i in 1..n - 1 {
            for j in 1..n - 1 {
                let old = u[[i, j]];
                let gs = (u[[i - 1, j]] + u[[i + 1, j]] + u[[i, j - 1]] + u[[i, j + 1]]
                    + h2 * f[[i, j]])
                    / 4.0;
                let new = (1.0 - omega) * old + omega * gs;
                u[[i, j]] = new;
                max_update = max_update.max((new - old).abs());
            }
        }
        max_update
    }

    fn name(&self) -> &'static str {
        "SOR"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
