//! Classic Gauss-Seidel relaxation
//!
//! # Mathematical Background
//!
//! For the 5-point discretization of −ΔU = f, the Gauss-Seidel update
//! at interior cell (i, j) is
//!
//! ```text
//! U[i,j] ← (U[i−1,j] + U[i+1,j] + U[i,j−1] + U[i,j+1] + h²·F[i,j]) / 4
//! ```
//!
//! applied in a deterministic lexicographic sweep (i ascending, j
//! ascending within each i), **in place**: updates are immediately
//! visible to the cells that follow in the same sweep. That visitation
//! order is part of the method's semantics, not an implementation
//! detail — later cells always see the freshest neighbor values.
//!
//! Boundary neighbors participate in the sum unmodified. The mesh's
//! boundary invariant guarantees they hold the correct Dirichlet
//! values, so no separate boundary-contribution term exists.
//!
//! # Characteristics
//!
//! - **Convergence**: spectral radius ≈ cos²(π·h) for this operator —
//!   reliable but slow on fine meshes (O(N²) sweeps)
//! - **Cost**: 4 adds + 1 multiply + 1 divide per cell per sweep
//! - **Memory**: in place, no auxiliary grid

use crate::mesh::Mesh;
use crate::solver::traits::RelaxationSweep;

/// Single-threaded lexicographic Gauss-Seidel sweep.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussSeidelSweep;

impl GaussSeidelSweep {
    /// Create a new Gauss-Seidel sweep.
    pub fn new() -> Self {
        Self
    }
}

impl RelaxationSweep for GaussSeidelSweep {
    fn sweep(&self, mesh: &mut Mesh) -> f64 {
        let n = mesh.n_total();
        let h2 = mesh.h() * mesh.h();
        let (u, f) = mesh.u_f_mut();

        let mut max_update = 0.0_f64;
        for i in 1..n - 1 {
            for j in 1..n - 1 {
                let old = u[[i, j]];
                let new = (u[[i - 1, j]] + u[[i + 1, j]] + u[[i, j - 1]] + u[[i, j + 1]]
                    + h2 * f[[i, j]])
                    / 4.0;
                u[[i, j]] = new;
                max_update = max_update.max((new - old).abs());
            }
        }
        max_update
    }

    fn name(&self) -> &'static str {
        "Gauss-Seidel"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
