//! poisson2d: 2D Poisson Relaxation Solver
//!
//! A finite-difference solver for the Poisson equation −ΔU = f on the
//! unit square with generalized (non-homogeneous, per-edge) Dirichlet
//! boundary conditions, together with the error analysis needed to
//! validate the discretization against known exact solutions.
//!
//! # Architecture
//!
//! poisson2d is built on two core principles:
//!
//! 1. **Separation of Problem and Numerics**
//!    - Test cases define the problem (source term, exact solution,
//!      boundary data) — WHAT to solve
//!    - Relaxation sweeps provide the method (Gauss-Seidel, SOR,
//!      parallel red-black) — HOW to solve
//!
//! 2. **The boundary invariant**
//!    - Every boundary cell of the solution grid always holds the value
//!      prescribed by the active [`BoundaryConditions`](boundary::BoundaryConditions),
//!      before, during and after any solve. The 5-point stencil then
//!      needs no special boundary handling: boundary neighbors simply
//!      participate in the update sum.
//!
//! # Quick Start
//!
//! ```rust
//! use poisson2d::prelude::*;
//!
//! # fn main() -> Result<(), String> {
//! // 1. Pick a test case and build a mesh for it
//! let case = SineProduct;
//! let mut mesh = Mesh::new(33, case.recommended_boundary())?;
//! mesh.configure_test_case(&case);
//!
//! // 2. Configure and run a solver
//! let solver = IterativeSolver::new()?;
//! let config = SolverConfig::sor(1e-8, 5_000, optimal_omega(mesh.n_interior()));
//! let result = solver.solve(&mut mesh, &config)?;
//! assert!(result.converged);
//!
//! // 3. Compare against the exact solution
//! let analysis = compute_errors(&mesh);
//! println!("L2 error: {:.3e}", analysis.l2_error);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`boundary`]: per-edge Dirichlet boundary functions
//! - [`mesh`]: the discretized grid and its invariants
//! - [`cases`]: catalog of named test problems
//! - [`solver`]: the relaxation family and convergence results
//! - [`analysis`]: discretization-error norms and convergence studies

pub mod analysis;
pub mod boundary;
pub mod cases;
pub mod mesh;
pub mod solver;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use poisson2d::prelude::*;
    //! ```
    pub use crate::analysis::{
        compute_errors, study_convergence, ConvergenceStudy, ErrorAnalysis,
    };
    pub use crate::boundary::{BoundaryConditions, Edge, EdgeFunction};
    pub use crate::cases::{
        catalog, ConstantSource, HarmonicSaddle, PolynomialBump, SineProduct, TestCase,
    };
    pub use crate::mesh::{InteriorSnapshot, Mesh};
    pub use crate::solver::{
        calculate_residual, optimal_omega, ConvergenceResult, IterativeSolver, RelaxationMethod,
        ResidualDiagnostics, SolverConfig,
    };
}
