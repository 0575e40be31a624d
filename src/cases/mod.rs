//! Catalog of named Poisson test problems
//!
//! All cases implement the [`TestCase`] trait. A case is pure data: it
//! generates the source term f, optionally the exact solution U, and
//! recommends a boundary-condition family — the mesh does the actual
//! configuration, the solver the actual work.
//!
//! # Available Cases
//!
//! ## [`SineProduct`] — the classic validation case
//!
//! U = sin(πx)·sin(πy) with homogeneous boundary. The standard problem
//! for measuring the discretization's order of convergence.
//!
//! ## [`PolynomialBump`] — polynomial exact solution
//!
//! U = x(1−x)·y(1−y), homogeneous boundary. Smooth, strictly positive
//! in the interior, cheap to evaluate.
//!
//! ## [`ConstantSource`] — no closed-form solution
//!
//! f ≡ 1 (the membrane-deflection problem). Exercises every code path
//! that must cope with an unavailable exact solution.
//!
//! ## [`HarmonicSaddle`] — non-homogeneous boundary data
//!
//! U = x² − y² with f ≡ 0 and the quadratic boundary family. The only
//! built-in case where the boundary carries all the information.

use crate::boundary::BoundaryConditions;

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod constant_source;
pub mod harmonic_saddle;
pub mod polynomial_bump;
pub mod sine_product;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use constant_source::ConstantSource;
pub use harmonic_saddle::HarmonicSaddle;
pub use polynomial_bump::PolynomialBump;
pub use sine_product::SineProduct;

// =================================================================================================
// Test Case Trait
// =================================================================================================

/// Trait for Poisson test problems −ΔU = f on the unit square.
///
/// # Responsibility
///
/// Provides the problem data only. Does NOT discretize or solve it
/// (that is the mesh's and the solver's job).
///
/// All evaluation methods are pure functions of the physical
/// coordinates; the mesh may call them for any grid cell, boundary
/// cells included.
pub trait TestCase: Send + Sync {
    /// Source term f(x, y).
    fn source(&self, x: f64, y: f64) -> f64;

    /// Exact solution U(x, y), when a closed form is known.
    ///
    /// `None` signals "unavailable"; the mesh then stores the all-zero
    /// sentinel grid and error analysis reports `available = false`.
    fn exact(&self, x: f64, y: f64) -> Option<f64>;

    /// Boundary-condition family this case is posed with.
    fn recommended_boundary(&self) -> BoundaryConditions;

    /// Name of the case (used for display and logging).
    fn name(&self) -> &'static str;

    /// One-line description of the problem.
    fn description(&self) -> &'static str;
}

/// All built-in test cases.
pub fn catalog() -> Vec<Box<dyn TestCase>> {
    vec![
        Box::new(SineProduct),
        Box::new(PolynomialBump),
        Box::new(ConstantSource),
        Box::new(HarmonicSaddle),
    ]
}

// =================================================================================================
// Tests
// =================================================================================================
