//! Concrete relaxation schemes
//!
//! Each scheme implements [`RelaxationSweep`](crate::solver::traits::RelaxationSweep)
//! and owns nothing but a single sweep's traversal and arithmetic; the
//! iteration loop, stopping rule and progress reporting live in the
//! shared driver.

pub mod gauss_seidel;
pub mod red_black;
pub mod sor;

pub use gauss_seidel::GaussSeidelSweep;
pub use red_black::RedBlackSweep;
pub use sor::{optimal_omega, SorSweep};
