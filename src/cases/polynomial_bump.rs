//! Polynomial exact-solution case
//!
//! # Mathematical Background
//!
//! ```text
//! U(x, y) = x(1−x)·y(1−y)
//! ```
//!
//! with
//!
//! ```text
//! −ΔU = 2·[x(1−x) + y(1−y)] = f(x, y)
//! ```
//!
//! U vanishes on the boundary and peaks at 1/16 in the center. Being a
//! polynomial of degree two in each variable, it is resolved with very
//! small discretization error even on coarse meshes — useful for
//! separating iterative error from discretization error in experiments.

use crate::boundary::BoundaryConditions;
use crate::cases::TestCase;

/// U = x(1−x)·y(1−y), f = 2[x(1−x) + y(1−y)], homogeneous boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolynomialBump;

impl TestCase for PolynomialBump {
    fn source(&self, x: f64, y: f64) -> f64 {
        2.0 * (x * (1.0 - x) + y * (1.0 - y))
    }

    fn exact(&self, x: f64, y: f64) -> Option<f64> {
        Some(x * (1.0 - x) * y * (1.0 - y))
    }

    fn recommended_boundary(&self) -> BoundaryConditions {
        BoundaryConditions::homogeneous()
    }

    fn name(&self) -> &'static str {
        "PolynomialBump"
    }

    fn description(&self) -> &'static str {
        "U = x(1-x) y(1-y) with f = 2[x(1-x) + y(1-y)], homogeneous Dirichlet data"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
