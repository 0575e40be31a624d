//! Harmonic saddle: non-homogeneous boundary data with a known solution
//!
//! # Mathematical Background
//!
//! ```text
//! U(x, y) = x² − y²
//! ```
//!
//! is harmonic (ΔU = 0), so the source term is identically zero and the
//! entire problem lives in the boundary data: the quadratic family
//! [`BoundaryConditions::saddle`] is exactly the trace of U on the four
//! edges.
//!
//! # Why this case
//!
//! Every other built-in case has homogeneous boundaries. This one
//! verifies the generalized-Dirichlet machinery end to end: the
//! boundary invariant with non-trivial values, interior relaxation
//! driven purely by boundary information, and error norms against an
//! exact solution that does not vanish on the frame.
//!
//! The 5-point stencil reproduces quadratics exactly, so the converged
//! discrete solution matches U up to the iterative tolerance — a useful
//! property when a test needs "discretization error ≈ 0".

use crate::boundary::BoundaryConditions;
use crate::cases::TestCase;

/// U = x² − y², f ≡ 0, quadratic (saddle) boundary family.
#[derive(Debug, Clone, Copy, Default)]
pub struct HarmonicSaddle;

impl TestCase for HarmonicSaddle {
    fn source(&self, _x: f64, _y: f64) -> f64 {
        0.0
    }

    fn exact(&self, x: f64, y: f64) -> Option<f64> {
        Some(x * x - y * y)
    }

    fn recommended_boundary(&self) -> BoundaryConditions {
        BoundaryConditions::saddle()
    }

    fn name(&self) -> &'static str {
        "HarmonicSaddle"
    }

    fn description(&self) -> &'static str {
        "U = x^2 - y^2 (harmonic, f = 0) with the quadratic saddle boundary family"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
