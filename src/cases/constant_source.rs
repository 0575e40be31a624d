//! Constant source term without a closed-form solution
//!
//! # Mathematical Background
//!
//! ```text
//! −ΔU = 1,   U = 0 on the boundary
//! ```
//!
//! is the classic membrane-deflection (or Prandtl stress-function)
//! problem. Its solution on the square exists only as an infinite
//! series, so this case deliberately carries **no** exact solution:
//! error analysis on it must report `available = false`, and validation
//! falls back to structural properties — the solution is strictly
//! positive in the interior and symmetric under every symmetry of the
//! square.

use crate::boundary::BoundaryConditions;
use crate::cases::TestCase;

/// f ≡ 1, homogeneous boundary, no exact solution.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantSource;

impl TestCase for ConstantSource {
    fn source(&self, _x: f64, _y: f64) -> f64 {
        1.0
    }

    fn exact(&self, _x: f64, _y: f64) -> Option<f64> {
        None
    }

    fn recommended_boundary(&self) -> BoundaryConditions {
        BoundaryConditions::homogeneous()
    }

    fn name(&self) -> &'static str {
        "ConstantSource"
    }

    fn description(&self) -> &'static str {
        "f = 1 everywhere with homogeneous Dirichlet data; no closed-form solution"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
