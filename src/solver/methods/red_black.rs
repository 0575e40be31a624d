//! Thread-parallel red-black Gauss-Seidel relaxation
//!
//! # Mathematical Background
//!
//! The interior cells are 2-colored by the parity of (i + j): red for
//! even, black for odd. Under the 5-point stencil every neighbor of a
//! cell has the opposite parity, so **no two cells of one color are
//! stencil-neighbors**. All cells of one color can therefore be updated
//! concurrently using only values of the other, currently frozen color.
//!
//! One sweep is two phases:
//!
//! 1. update all red cells in parallel (black frozen)
//! 2. barrier
//! 3. update all black cells in parallel (red fresh)
//! 4. barrier
//!
//! This is mathematically one sweep of a *reordered* Gauss-Seidel
//! method — not a Jacobi iteration — so convergence behavior matches
//! the sequential method. The phase ordering is load-bearing: black
//! updates must see completed red values.
//!
//! # Work partitioning
//!
//! The interior row range is divided into contiguous near-equal blocks,
//! one per pool worker. Each worker scans its rows, updates only cells
//! of the target color, and accumulates a local max update; the
//! coordinator max-folds the per-worker maxima after the parallel join.
//! Workers never write outside their assigned rows.
//!
//! # Why no locks
//!
//! Within a phase the written set (target color) and the read set (the
//! other color, plus the immutable source grid) are disjoint cell sets,
//! and the row partition makes writes pairwise disjoint. Correctness
//! rests entirely on this coloring argument — there is no runtime
//! exclusion to pay for.

use ndarray::Array2;
use rayon::prelude::*;
use rayon::ThreadPool;

use crate::mesh::Mesh;
use crate::solver::traits::RelaxationSweep;

/// Color class of interior cells: (i + j) even.
const RED: usize = 0;
/// Color class of interior cells: (i + j) odd.
const BLACK: usize = 1;

// =================================================================================================
// Shared-grid cursor
// =================================================================================================

/// Raw view of the solution grid shared across one color phase.
///
/// # Safety contract
///
/// Tasks holding a copy may, during a phase targeting color c:
/// - write only interior cells with (i + j) % 2 == c inside their own
///   row block
/// - read only cells of the opposite parity (stencil neighbors)
///
/// Under that discipline no cell is ever accessed by two tasks with at
/// least one access being a write, so the phase is data-race free. The
/// grid must be in ndarray's standard (row-major, contiguous) layout.
#[derive(Clone, Copy)]
struct GridCursor {
    ptr: *mut f64,
    n: usize,
}

// Safety: see the cursor's contract above — all concurrent use goes
// through `relax_rows`, which upholds the color/row discipline.
unsafe impl Send for GridCursor {}
unsafe impl Sync for GridCursor {}

impl GridCursor {
    #[inline]
    unsafe fn get(&self, i: usize, j: usize) -> f64 {
        *self.ptr.add(i * self.n + j)
    }

    #[inline]
    unsafe fn set(&self, i: usize, j: usize, value: f64) {
        *self.ptr.add(i * self.n + j) = value;
    }
}

/// Relax every cell of `color` in rows `[row_start, row_end)`,
/// returning the local max update.
///
/// # Safety
///
/// Caller must guarantee the [`GridCursor`] contract: exclusive row
/// range per concurrent caller, all callers targeting the same color,
/// grid contiguous row-major of size n×n.
unsafe fn relax_rows(
    u: GridCursor,
    f: &Array2<f64>,
    h2: f64,
    color: usize,
    row_start: usize,
    row_end: usize,
) -> f64 {
    let n = u.n;
    let mut local_max = 0.0_f64;
    for i in row_start..row_end {
        // first column ≥ 1 with (i + j) % 2 == color, then stride 2
        let mut j = if (i + 1) % 2 == color { 1 } else { 2 };
        while j < n - 1 {
            let old = u.get(i, j);
            let new = (u.get(i - 1, j) + u.get(i + 1, j) + u.get(i, j - 1) + u.get(i, j + 1)
                + h2 * f[[i, j]])
                / 4.0;
            u.set(i, j, new);
            local_max = local_max.max((new - old).abs());
            j += 2;
        }
    }
    local_max
}

// =================================================================================================
// Red-Black Sweep
// =================================================================================================

/// Parallel red-black sweep running on a borrowed, solver-owned pool.
pub struct RedBlackSweep<'p> {
    pool: &'p ThreadPool,
}

impl<'p> RedBlackSweep<'p> {
    /// Create a sweep backed by the given thread pool.
    pub fn new(pool: &'p ThreadPool) -> Self {
        Self { pool }
    }

    /// Run one color phase, returning the max update over that phase.
    ///
    /// The returning `install` call is the phase barrier: every worker
    /// has finished (and its writes are visible) before the coordinator
    /// proceeds to the next phase.
    fn color_phase(&self, mesh: &mut Mesh, color: usize) -> f64 {
        let n = mesh.n_total();
        let h2 = mesh.h() * mesh.h();
        let workers = self.pool.current_num_threads().max(1);
        let interior_rows = n - 2;
        let block = interior_rows.div_ceil(workers);

        let (u, f) = mesh.u_f_mut();
        let cursor = GridCursor { ptr: u.as_mut_ptr(), n };

        self.pool.install(|| {
            (0..workers)
                .into_par_iter()
                .map(|w| {
                    let row_start = 1 + w * block;
                    let row_end = (row_start + block).min(n - 1);
                    if row_start >= n - 1 {
                        return 0.0;
                    }
                    // Safety: row blocks are pairwise disjoint, every
                    // task targets the same color, and `u` is a
                    // standard-layout n×n grid exclusively borrowed for
                    // the duration of the phase.
                    unsafe { relax_rows(cursor, f, h2, color, row_start, row_end) }
                })
                .reduce(|| 0.0_f64, f64::max)
        })
    }
}

impl RelaxationSweep for RedBlackSweep<'_> {
    fn sweep(&self, mesh: &mut Mesh) -> f64 {
        // Phase ordering is load-bearing: red completes and
        // synchronizes before black starts.
        let red_max = self.color_phase(mesh, RED);
        let black_max = self.color_phase(mesh, BLACK);
        red_max.max(black_max)
    }

    fn name(&self) -> &'static str {
        "Red-Black Parallel"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
