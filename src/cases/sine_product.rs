//! The classic sine-product validation case
//!
//! # Mathematical Background
//!
//! ```text
//! U(x, y) = sin(πx)·sin(πy)
//! ```
//!
//! is an eigenfunction of the Laplacian on the unit square:
//! ΔU = −2π²·U. With the convention −ΔU = f the matching source term is
//!
//! ```text
//! f(x, y) = 2π²·sin(πx)·sin(πy)
//! ```
//!
//! U vanishes on the entire boundary, so the case is posed with the
//! homogeneous family.
//!
//! # Why this case
//!
//! The solution is smooth (C^∞), so the 5-point discretization error
//! behaves exactly like its leading term C·h². This makes SineProduct
//! the reference problem for empirical order-of-convergence studies:
//! halving h must reduce the L2 error by a factor close to 4.

use std::f64::consts::PI;

use crate::boundary::BoundaryConditions;
use crate::cases::TestCase;

/// U = sin(πx)·sin(πy), f = 2π²·sin(πx)·sin(πy), homogeneous boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SineProduct;

impl TestCase for SineProduct {
    fn source(&self, x: f64, y: f64) -> f64 {
        2.0 * PI * PI * (PI * x).sin() * (PI * y).sin()
    }

    fn exact(&self, x: f64, y: f64) -> Option<f64> {
        Some((PI * x).sin() * (PI * y).sin())
    }

    fn recommended_boundary(&self) -> BoundaryConditions {
        BoundaryConditions::homogeneous()
    }

    fn name(&self) -> &'static str {
        "SineProduct"
    }

    fn description(&self) -> &'static str {
        "U = sin(pi x) sin(pi y) with f = 2 pi^2 sin(pi x) sin(pi y), homogeneous Dirichlet data"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
