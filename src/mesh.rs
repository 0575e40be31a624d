//! The discretized unit-square grid and its invariants
//!
//! # Design
//!
//! The [`Mesh`] is the single owner of its grids. Collaborators
//! (solvers, analyzers, renderers) get either borrowed read-only views
//! or, during a solve, exclusive mutable access — never copies, never
//! shared mutation.
//!
//! Grids are square `n_total × n_total`, including both boundary rows
//! and columns, with spacing `h = 1/(n_total − 1)`:
//!
//! - `u`: the current solution (mutable interior, boundary pinned)
//! - `f`: the source term, set once per test-case configuration
//! - `exact`: optional reference solution (all-zero means unavailable)
//! - `boundary_mask`: derived, immutable — true on the outer frame
//!
//! # The boundary invariant
//!
//! For every masked cell, `u[[i, j]]` equals the boundary-condition
//! value at that cell's physical coordinate. This holds before, during
//! and after any solve: the 5-point stencil reads boundary neighbors
//! unmodified, so the invariant is what makes the interior update
//! formula complete. Interior cells (1 ≤ i, j ≤ n_total − 2) are the
//! unknowns of the linear system.

use log::warn;
use ndarray::Array2;

use crate::boundary::BoundaryConditions;
use crate::cases::TestCase;

/// Tolerance for the consistency check of boundary cells against their
/// boundary-condition values.
pub const CONSISTENCY_TOLERANCE: f64 = 1e-12;

/// Tolerance for accepting a redundant boundary write in [`Mesh::set_u`].
pub const BOUNDARY_WRITE_TOLERANCE: f64 = 1e-10;

// =================================================================================================
// Interior Snapshot
// =================================================================================================

/// Saved interior state of a mesh, for rollback between experiments.
///
/// Holds interior cells only. [`Mesh::restore`] re-derives boundary
/// cells from the active [`BoundaryConditions`] rather than from the
/// snapshot, so the boundary invariant holds unconditionally even if a
/// snapshot is restored after the boundary set changed.
#[derive(Debug, Clone)]
pub struct InteriorSnapshot {
    n_total: usize,
    values: Vec<f64>,
}

impl InteriorSnapshot {
    /// Mesh size this snapshot was taken from.
    pub fn n_total(&self) -> usize {
        self.n_total
    }
}

// =================================================================================================
// Mesh
// =================================================================================================

/// The discretized unit square: solution, source term, optional exact
/// solution and the boundary mask.
///
/// # Examples
///
/// ```rust
/// use poisson2d::boundary::BoundaryConditions;
/// use poisson2d::mesh::Mesh;
///
/// let mesh = Mesh::new(9, BoundaryConditions::bilinear(0.0, 1.0, 1.0, 2.0)).unwrap();
/// assert_eq!(mesh.n_total(), 9);
/// assert_eq!(mesh.n_interior(), 7);
/// assert!(mesh.verify_consistency());
/// ```
#[derive(Debug, Clone)]
pub struct Mesh {
    n_total: usize,
    h: f64,
    u: Array2<f64>,
    f: Array2<f64>,
    exact: Array2<f64>,
    boundary_mask: Array2<bool>,
    boundary_conditions: BoundaryConditions,
}

impl Mesh {
    /// Create a mesh with `n_total` points per axis (boundary included)
    /// and populate the boundary cells immediately.
    ///
    /// # Errors
    ///
    /// Rejects `n_total < 3` (no interior unknowns).
    pub fn new(n_total: usize, boundary_conditions: BoundaryConditions) -> Result<Self, String> {
        if n_total < 3 {
            return Err(format!(
                "Mesh requires at least 3 points per axis (got {})",
                n_total
            ));
        }

        let last = n_total - 1;
        let boundary_mask = Array2::from_shape_fn((n_total, n_total), |(i, j)| {
            i == 0 || i == last || j == 0 || j == last
        });

        let mut mesh = Self {
            n_total,
            h: 1.0 / last as f64,
            u: Array2::zeros((n_total, n_total)),
            f: Array2::zeros((n_total, n_total)),
            exact: Array2::zeros((n_total, n_total)),
            boundary_mask,
            boundary_conditions,
        };
        mesh.apply_boundary_conditions();
        Ok(mesh)
    }

    // ======================================= Configuration =======================================

    /// Write the boundary-condition value into every boundary cell of
    /// `u`. Idempotent; touches boundary cells only.
    pub fn apply_boundary_conditions(&mut self) {
        let n = self.n_total;
        let h = self.h;
        let last = n - 1;
        for k in 0..n {
            // value_at cannot fail on actual boundary indices
            self.u[[0, k]] = self.boundary_conditions.value_at(0, k, n, h).unwrap_or(0.0);
            self.u[[last, k]] = self.boundary_conditions.value_at(last, k, n, h).unwrap_or(0.0);
            self.u[[k, 0]] = self.boundary_conditions.value_at(k, 0, n, h).unwrap_or(0.0);
            self.u[[k, last]] = self.boundary_conditions.value_at(k, last, n, h).unwrap_or(0.0);
        }
    }

    /// Fully reconfigure the mesh for a test case:
    ///
    /// 1. reset all interior `u` to 0
    /// 2. fill `f` and `exact` from the case's generators over every
    ///    grid cell (boundary included, for reporting symmetry)
    /// 3. re-apply boundary conditions
    ///
    /// Leaves the mesh in a state that passes [`Mesh::verify_consistency`].
    pub fn configure_test_case(&mut self, case: &dyn TestCase) {
        let n = self.n_total;
        for i in 0..n {
            for j in 0..n {
                let (x, y) = self.coordinates_of(i, j);
                self.f[[i, j]] = case.source(x, y);
                self.exact[[i, j]] = case.exact(x, y).unwrap_or(0.0);
                if !self.boundary_mask[[i, j]] {
                    self.u[[i, j]] = 0.0;
                }
            }
        }
        self.apply_boundary_conditions();
    }

    /// Swap in a new boundary-condition set and re-derive the boundary
    /// cells. The compatibility of the new set is checked and reported,
    /// never enforced.
    pub fn set_boundary_conditions(&mut self, boundary_conditions: BoundaryConditions) {
        boundary_conditions.check_compatibility();
        self.boundary_conditions = boundary_conditions;
        self.apply_boundary_conditions();
    }

    // ======================================== Diagnostics ========================================

    /// Recompute the boundary-condition value for every masked cell and
    /// compare against `u` within [`CONSISTENCY_TOLERANCE`].
    ///
    /// Mismatches are logged and `false` is returned; never fatal.
    pub fn verify_consistency(&self) -> bool {
        let n = self.n_total;
        let mut consistent = true;
        for i in 0..n {
            for j in 0..n {
                if !self.boundary_mask[[i, j]] {
                    continue;
                }
                let expected = self
                    .boundary_conditions
                    .value_at(i, j, n, self.h)
                    .unwrap_or(0.0);
                let actual = self.u[[i, j]];
                if (actual - expected).abs() > CONSISTENCY_TOLERANCE {
                    warn!(
                        "Boundary inconsistency at ({}, {}): u = {} but boundary value is {}",
                        i, j, actual, expected
                    );
                    consistent = false;
                }
            }
        }
        consistent
    }

    // ========================================== Mutation ==========================================

    /// Write a solution value. Interior writes always succeed; boundary
    /// cells are read-only from the caller's perspective.
    ///
    /// A boundary write matching the boundary-condition value within
    /// [`BOUNDARY_WRITE_TOLERANCE`] is a tolerated no-op; anything else
    /// is rejected with a logged diagnostic. Returns `true` only when
    /// an interior write was performed.
    pub fn set_u(&mut self, i: usize, j: usize, value: f64) -> bool {
        if !self.boundary_mask[[i, j]] {
            self.u[[i, j]] = value;
            return true;
        }

        let expected = self
            .boundary_conditions
            .value_at(i, j, self.n_total, self.h)
            .unwrap_or(0.0);
        if (value - expected).abs() > BOUNDARY_WRITE_TOLERANCE {
            warn!(
                "Rejected write of {} to boundary cell ({}, {}); boundary value is {}",
                value, i, j, expected
            );
        }
        false
    }

    /// Save the interior state for later rollback.
    pub fn snapshot(&self) -> InteriorSnapshot {
        let n_int = self.n_interior();
        let mut values = Vec::with_capacity(n_int * n_int);
        for i in 1..self.n_total - 1 {
            for j in 1..self.n_total - 1 {
                values.push(self.u[[i, j]]);
            }
        }
        InteriorSnapshot { n_total: self.n_total, values }
    }

    /// Restore a previously taken interior snapshot.
    ///
    /// Boundary cells are re-derived from the active boundary
    /// conditions, not taken from the snapshot, so the boundary
    /// invariant holds unconditionally afterwards.
    ///
    /// # Errors
    ///
    /// Rejects snapshots taken from a mesh of a different size.
    pub fn restore(&mut self, snapshot: &InteriorSnapshot) -> Result<(), String> {
        if snapshot.n_total != self.n_total {
            return Err(format!(
                "Snapshot is for a {}-point mesh, this mesh has {} points",
                snapshot.n_total, self.n_total
            ));
        }

        let mut idx = 0;
        for i in 1..self.n_total - 1 {
            for j in 1..self.n_total - 1 {
                self.u[[i, j]] = snapshot.values[idx];
                idx += 1;
            }
        }
        self.apply_boundary_conditions();
        Ok(())
    }

    // ====================================== Index geometry ======================================

    /// Physical coordinates of grid index (i, j): x = j·h, y = i·h.
    #[inline]
    pub fn coordinates_of(&self, i: usize, j: usize) -> (f64, f64) {
        (j as f64 * self.h, i as f64 * self.h)
    }

    /// Whether (i, j) lies on the outer frame.
    #[inline]
    pub fn is_boundary(&self, i: usize, j: usize) -> bool {
        self.boundary_mask[[i, j]]
    }

    /// Linear index of an interior cell: (i−1)·n_interior + (j−1).
    ///
    /// Used for index reasoning only; the solvers operate directly on
    /// the 2D grid.
    ///
    /// # Errors
    ///
    /// Rejects indices outside the interior.
    pub fn interior_index(&self, i: usize, j: usize) -> Result<usize, String> {
        if self.boundary_mask[[i, j]] {
            return Err(format!("Index ({}, {}) is not an interior cell", i, j));
        }
        Ok((i - 1) * self.n_interior() + (j - 1))
    }

    // ====================================== Read-only views ======================================

    /// Points per axis, boundary included.
    #[inline]
    pub fn n_total(&self) -> usize {
        self.n_total
    }

    /// Interior points per axis (`n_total − 2`).
    #[inline]
    pub fn n_interior(&self) -> usize {
        self.n_total - 2
    }

    /// Grid spacing `h = 1/(n_total − 1)`.
    #[inline]
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Current solution grid (read-only view).
    #[inline]
    pub fn u(&self) -> &Array2<f64> {
        &self.u
    }

    /// Source-term grid (read-only view).
    #[inline]
    pub fn f(&self) -> &Array2<f64> {
        &self.f
    }

    /// Exact-solution grid (read-only view; all-zero means unavailable).
    #[inline]
    pub fn exact(&self) -> &Array2<f64> {
        &self.exact
    }

    /// Derived boundary mask (read-only view).
    #[inline]
    pub fn boundary_mask(&self) -> &Array2<bool> {
        &self.boundary_mask
    }

    /// The active boundary-condition set.
    #[inline]
    pub fn boundary_conditions(&self) -> &BoundaryConditions {
        &self.boundary_conditions
    }

    /// Whether a usable exact solution was configured (the all-zero
    /// grid is the "unavailable" sentinel).
    pub fn has_exact_solution(&self) -> bool {
        self.exact.iter().any(|&v| v != 0.0)
    }

    // ================================= Solver-internal access =================================

    /// Split borrow of the mutable solution grid and the read-only
    /// source grid, for the relaxation sweeps. Callers must preserve
    /// the boundary invariant: only interior cells may be written.
    #[inline]
    pub(crate) fn u_f_mut(&mut self) -> (&mut Array2<f64>, &Array2<f64>) {
        (&mut self.u, &self.f)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
