//! Per-edge Dirichlet boundary conditions on the unit square
//!
//! # Design Philosophy
//!
//! Each of the four edges carries an independent scalar function of one
//! parameter t ∈ [0, 1] (position along the edge). Instead of capturing
//! arbitrary closures, every edge function is a tagged variant carrying
//! only the parameters needed to evaluate `t ↦ value`:
//!
//! - deterministic re-evaluation at any time (the mesh re-derives
//!   boundary cells from these functions, never from cached data)
//! - `Copy`/`Clone` value semantics for cheap configuration passing
//! - an escape hatch (`Custom`) that accepts a plain `fn` pointer for
//!   anything the built-in families cannot express
//!
//! # Corner compatibility
//!
//! Adjacent edges meet at the four corners. A well-posed boundary set
//! has matching corner values; [`BoundaryConditions::check_compatibility`]
//! verifies this within 1e-10 and reports (never throws) — mismatched
//! corners only affect the two adjacent boundary cells, not solver
//! correctness.

use log::warn;
use std::fmt;

/// Tolerance for corner agreement between adjacent edge functions.
pub const CORNER_TOLERANCE: f64 = 1e-10;

// =================================================================================================
// Edges
// =================================================================================================

/// One of the four edges of the unit square.
///
/// The edge parameter t runs along x on horizontal edges and along y on
/// vertical edges, always from 0 to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// y = 0, parametrized by x
    Bottom,
    /// y = 1, parametrized by x
    Top,
    /// x = 0, parametrized by y
    Left,
    /// x = 1, parametrized by y
    Right,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Edge::Bottom => "bottom (y=0)",
            Edge::Top => "top (y=1)",
            Edge::Left => "left (x=0)",
            Edge::Right => "right (x=1)",
        };
        write!(f, "{}", name)
    }
}

// =================================================================================================
// Edge Functions
// =================================================================================================

/// Pure mapping from the edge parameter t ∈ [0, 1] to a boundary value.
///
/// # Families
///
/// - `Constant`: g(t) = c (the homogeneous family is `Constant(0)`)
/// - `Linear`: g(t) = start + (end − start)·t — the per-edge restriction
///   of bilinear interpolation between corner values
/// - `Sinusoidal`: g(t) = a·sin(k·π·t)
/// - `Quadratic`: g(t) = a·t² + b·t + c
/// - `Custom`: any `fn(f64) -> f64`
///
/// All variants are stateless; evaluating twice at the same t always
/// yields the same value.
#[derive(Debug, Clone, Copy)]
pub enum EdgeFunction {
    /// Constant value along the whole edge
    Constant(f64),

    /// Linear interpolation between the two corner values of the edge
    Linear { start: f64, end: f64 },

    /// `amplitude · sin(frequency · π · t)`
    ///
    /// With an integer frequency the corners evaluate to exactly 0,
    /// making sinusoidal edges compatible with homogeneous neighbors.
    Sinusoidal { amplitude: f64, frequency: f64 },

    /// `a·t² + b·t + c`
    Quadratic { a: f64, b: f64, c: f64 },

    /// Arbitrary function of the edge parameter (plain fn pointer, no
    /// captured state)
    Custom(fn(f64) -> f64),
}

impl EdgeFunction {
    /// Evaluate the edge function at parameter t.
    ///
    /// t is expected in [0, 1]; values outside are evaluated as-is
    /// (the mesh never produces them).
    pub fn evaluate(&self, t: f64) -> f64 {
        match self {
            EdgeFunction::Constant(c) => *c,
            EdgeFunction::Linear { start, end } => start + (end - start) * t,
            EdgeFunction::Sinusoidal { amplitude, frequency } => {
                amplitude * (frequency * std::f64::consts::PI * t).sin()
            }
            EdgeFunction::Quadratic { a, b, c } => a * t * t + b * t + c,
            EdgeFunction::Custom(f) => f(t),
        }
    }

    /// Short human-readable form used by [`BoundaryConditions::describe`].
    fn describe(&self) -> String {
        match self {
            EdgeFunction::Constant(c) => format!("g(t) = {}", c),
            EdgeFunction::Linear { start, end } => {
                format!("g(t) = {} + ({})·t", start, end - start)
            }
            EdgeFunction::Sinusoidal { amplitude, frequency } => {
                format!("g(t) = {}·sin({}πt)", amplitude, frequency)
            }
            EdgeFunction::Quadratic { a, b, c } => {
                format!("g(t) = {}·t² + {}·t + {}", a, b, c)
            }
            EdgeFunction::Custom(_) => "g(t) = <custom>".to_string(),
        }
    }
}

impl Default for EdgeFunction {
    fn default() -> Self {
        EdgeFunction::Constant(0.0)
    }
}

// =================================================================================================
// Boundary Conditions
// =================================================================================================

/// A complete Dirichlet boundary-condition set: one function per edge.
///
/// # Invariant (checked, not auto-corrected)
///
/// Corner agreement within [`CORNER_TOLERANCE`]:
///
/// ```text
/// bottom(0) = left(0)     bottom(1) = right(0)
/// top(0)    = left(1)     top(1)    = right(1)
/// ```
///
/// A failed check is a warning, never fatal: solving proceeds with
/// whatever values were supplied.
///
/// # Examples
///
/// ```rust
/// use poisson2d::boundary::{BoundaryConditions, Edge};
///
/// let bc = BoundaryConditions::bilinear(0.0, 1.0, 1.0, 2.0);
/// assert!(bc.check_compatibility());
/// assert!((bc.evaluate(Edge::Bottom, 0.5) - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BoundaryConditions {
    /// g0: y = 0 edge
    pub bottom: EdgeFunction,
    /// g1: y = 1 edge
    pub top: EdgeFunction,
    /// h0: x = 0 edge
    pub left: EdgeFunction,
    /// h1: x = 1 edge
    pub right: EdgeFunction,
}

impl BoundaryConditions {
    /// Generic constructor from four edge functions.
    pub fn new(
        bottom: EdgeFunction,
        top: EdgeFunction,
        left: EdgeFunction,
        right: EdgeFunction,
    ) -> Self {
        Self { bottom, top, left, right }
    }

    // ====================================== Factory methods ======================================

    /// All-zero boundary (the homogeneous family).
    pub fn homogeneous() -> Self {
        Self::new(
            EdgeFunction::Constant(0.0),
            EdgeFunction::Constant(0.0),
            EdgeFunction::Constant(0.0),
            EdgeFunction::Constant(0.0),
        )
    }

    /// One constant value per edge.
    pub fn constant_per_edge(bottom: f64, top: f64, left: f64, right: f64) -> Self {
        Self::new(
            EdgeFunction::Constant(bottom),
            EdgeFunction::Constant(top),
            EdgeFunction::Constant(left),
            EdgeFunction::Constant(right),
        )
    }

    /// Bilinear family: each edge interpolates linearly between its two
    /// corner values.
    ///
    /// Corners are given counterclockwise from the origin:
    /// `c00` = (0,0), `c10` = (1,0), `c01` = (0,1), `c11` = (1,1).
    /// The resulting set is corner-compatible by construction.
    pub fn bilinear(c00: f64, c10: f64, c01: f64, c11: f64) -> Self {
        Self::new(
            EdgeFunction::Linear { start: c00, end: c10 },
            EdgeFunction::Linear { start: c01, end: c11 },
            EdgeFunction::Linear { start: c00, end: c01 },
            EdgeFunction::Linear { start: c10, end: c11 },
        )
    }

    /// Sinusoidal family: `amplitude·sin(πt)` on every edge.
    ///
    /// Every edge vanishes at its endpoints, so the set is
    /// corner-compatible for any amplitude.
    pub fn sinusoidal(amplitude: f64) -> Self {
        let edge = EdgeFunction::Sinusoidal { amplitude, frequency: 1.0 };
        Self::new(edge, edge, edge, edge)
    }

    /// The fixed quadratic family: the trace of U(x,y) = x² − y² on the
    /// four edges. Used by the harmonic test case; corner-compatible by
    /// construction.
    pub fn saddle() -> Self {
        Self::new(
            // y = 0: x²
            EdgeFunction::Quadratic { a: 1.0, b: 0.0, c: 0.0 },
            // y = 1: x² − 1
            EdgeFunction::Quadratic { a: 1.0, b: 0.0, c: -1.0 },
            // x = 0: −y²
            EdgeFunction::Quadratic { a: -1.0, b: 0.0, c: 0.0 },
            // x = 1: 1 − y²
            EdgeFunction::Quadratic { a: -1.0, b: 0.0, c: 1.0 },
        )
    }

    // ===================================== Evaluation =====================================

    /// Evaluate the function of a given edge at parameter t ∈ [0, 1].
    pub fn evaluate(&self, edge: Edge, t: f64) -> f64 {
        match edge {
            Edge::Bottom => self.bottom.evaluate(t),
            Edge::Top => self.top.evaluate(t),
            Edge::Left => self.left.evaluate(t),
            Edge::Right => self.right.evaluate(t),
        }
    }

    /// Boundary value at the global grid index (i, j) of an
    /// `n_total × n_total` mesh with spacing h.
    ///
    /// The grid convention is x = j·h, y = i·h, so row i = 0 is the
    /// bottom edge and column j = 0 is the left edge. Corner cells
    /// resolve to the bottom/top edge; corner agreement makes the
    /// choice immaterial for compatible sets.
    ///
    /// # Errors
    ///
    /// Returns `Err` when (i, j) is not a boundary cell — that is a
    /// programmer error at the call site, not a numerical condition.
    pub fn value_at(&self, i: usize, j: usize, n_total: usize, h: f64) -> Result<f64, String> {
        let last = n_total - 1;
        if i == 0 {
            Ok(self.bottom.evaluate(j as f64 * h))
        } else if i == last {
            Ok(self.top.evaluate(j as f64 * h))
        } else if j == 0 {
            Ok(self.left.evaluate(i as f64 * h))
        } else if j == last {
            Ok(self.right.evaluate(i as f64 * h))
        } else {
            Err(format!(
                "Index ({}, {}) is not on the boundary of a {}x{} grid",
                i, j, n_total, n_total
            ))
        }
    }

    // ===================================== Diagnostics =====================================

    /// Check that adjacent edge functions agree at the four corners
    /// within [`CORNER_TOLERANCE`].
    ///
    /// A failed check is reported via `log::warn!` and `false`; it is
    /// never fatal, since non-matching corners only affect the two
    /// immediately adjacent boundary cells.
    pub fn check_compatibility(&self) -> bool {
        let corners = [
            ("(0,0)", self.bottom.evaluate(0.0), self.left.evaluate(0.0)),
            ("(1,0)", self.bottom.evaluate(1.0), self.right.evaluate(0.0)),
            ("(0,1)", self.top.evaluate(0.0), self.left.evaluate(1.0)),
            ("(1,1)", self.top.evaluate(1.0), self.right.evaluate(1.0)),
        ];

        let mut compatible = true;
        for (corner, a, b) in corners {
            if (a - b).abs() > CORNER_TOLERANCE {
                warn!(
                    "Boundary corner mismatch at {}: {} vs {} (diff {:e})",
                    corner,
                    a,
                    b,
                    (a - b).abs()
                );
                compatible = false;
            }
        }
        compatible
    }

    /// Human-readable description of the active boundary set (free
    /// text, for display only).
    pub fn describe(&self) -> String {
        format!(
            "Dirichlet boundary conditions:\n  bottom (y=0): {}\n  top    (y=1): {}\n  left   (x=0): {}\n  right  (x=1): {}",
            self.bottom.describe(),
            self.top.describe(),
            self.left.describe(),
            self.right.describe(),
        )
    }
}

impl Default for BoundaryConditions {
    fn default() -> Self {
        Self::homogeneous()
    }
}

impl fmt::Display for BoundaryConditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_edge_function_families() {
        assert_abs_diff_eq!(EdgeFunction::Constant(2.5).evaluate(0.7), 2.5);

        let lin = EdgeFunction::Linear { start: 1.0, end: 3.0 };
        assert_abs_diff_eq!(lin.evaluate(0.0), 1.0);
        assert_abs_diff_eq!(lin.evaluate(0.5), 2.0);
        assert_abs_diff_eq!(lin.evaluate(1.0), 3.0);

        let sin = EdgeFunction::Sinusoidal { amplitude: 2.0, frequency: 1.0 };
        assert_abs_diff_eq!(sin.evaluate(0.0), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(sin.evaluate(0.5), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sin.evaluate(1.0), 0.0, epsilon = 1e-12);

        let quad = EdgeFunction::Quadratic { a: 1.0, b: -1.0, c: 0.25 };
        assert_abs_diff_eq!(quad.evaluate(0.5), 0.0);

        fn ramp(t: f64) -> f64 {
            t * t * t
        }
        assert_abs_diff_eq!(EdgeFunction::Custom(ramp).evaluate(0.5), 0.125);
    }

    #[test]
    fn test_homogeneous_is_zero_everywhere() {
        let bc = BoundaryConditions::homogeneous();
        for edge in [Edge::Bottom, Edge::Top, Edge::Left, Edge::Right] {
            for k in 0..=10 {
                assert_eq!(bc.evaluate(edge, k as f64 / 10.0), 0.0);
            }
        }
        assert!(bc.check_compatibility());
    }

    #[test]
    fn test_bilinear_corners_match() {
        let bc = BoundaryConditions::bilinear(1.0, 2.0, 3.0, 4.0);
        assert!(bc.check_compatibility());

        assert_abs_diff_eq!(bc.evaluate(Edge::Bottom, 0.0), 1.0);
        assert_abs_diff_eq!(bc.evaluate(Edge::Bottom, 1.0), 2.0);
        assert_abs_diff_eq!(bc.evaluate(Edge::Top, 0.0), 3.0);
        assert_abs_diff_eq!(bc.evaluate(Edge::Top, 1.0), 4.0);
        assert_abs_diff_eq!(bc.evaluate(Edge::Left, 0.0), 1.0);
        assert_abs_diff_eq!(bc.evaluate(Edge::Right, 1.0), 4.0);
    }

    #[test]
    fn test_saddle_matches_x2_minus_y2() {
        let bc = BoundaryConditions::saddle();
        assert!(bc.check_compatibility());

        // y = 0 edge carries x², x = 1 edge carries 1 − y²
        assert_abs_diff_eq!(bc.evaluate(Edge::Bottom, 0.5), 0.25);
        assert_abs_diff_eq!(bc.evaluate(Edge::Right, 0.5), 0.75);
        assert_abs_diff_eq!(bc.evaluate(Edge::Top, 0.0), -1.0);
    }

    #[test]
    fn test_incompatible_corners_detected() {
        // bottom(1) = 2.0 but right(0) = 0.0
        let bc = BoundaryConditions::new(
            EdgeFunction::Constant(2.0),
            EdgeFunction::Constant(0.0),
            EdgeFunction::Constant(2.0),
            EdgeFunction::Constant(0.0),
        );
        assert!(!bc.check_compatibility());
    }

    #[test]
    fn test_value_at_edges() {
        let n = 5;
        let h = 1.0 / (n as f64 - 1.0);
        let bc = BoundaryConditions::constant_per_edge(1.0, 2.0, 1.0, 2.0);

        // wrong corners on purpose, but edges away from corners are unambiguous
        assert_abs_diff_eq!(bc.value_at(0, 2, n, h).unwrap(), 1.0);
        assert_abs_diff_eq!(bc.value_at(n - 1, 2, n, h).unwrap(), 2.0);
        assert_abs_diff_eq!(bc.value_at(2, 0, n, h).unwrap(), 1.0);
        assert_abs_diff_eq!(bc.value_at(2, n - 1, n, h).unwrap(), 2.0);
    }

    #[test]
    fn test_value_at_uses_edge_parameter() {
        let n = 5;
        let h = 1.0 / (n as f64 - 1.0);
        let bc = BoundaryConditions::bilinear(0.0, 1.0, 0.0, 1.0);

        // bottom edge: t = x = j·h
        assert_abs_diff_eq!(bc.value_at(0, 2, n, h).unwrap(), 0.5);
        // right edge: t = y = i·h
        assert_abs_diff_eq!(bc.value_at(1, n - 1, n, h).unwrap(), 1.0);
    }

    #[test]
    fn test_value_at_rejects_interior() {
        let bc = BoundaryConditions::homogeneous();
        let result = bc.value_at(2, 2, 5, 0.25);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("not on the boundary"));
    }

    #[test]
    fn test_describe_mentions_all_edges() {
        let text = BoundaryConditions::sinusoidal(1.5).describe();
        assert!(text.contains("bottom"));
        assert!(text.contains("top"));
        assert!(text.contains("left"));
        assert!(text.contains("right"));
        assert!(text.contains("sin"));
    }
}
