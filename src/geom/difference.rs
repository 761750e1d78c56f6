//! Finite differences on sampled sequences and grids.
//!
//! Interior samples use the symmetric difference of both neighbours, the two
//! end samples use the single available neighbour:
//!
//! ```text
//! f'[0]     = (f[1] - f[0]) / h
//! f'[k]     = (f[k+1] - f[k-1]) / 2h      0 < k < n-1
//! f'[n-1]   = (f[n-1] - f[n-2]) / h
//! ```

use super::grid::Grid2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifferenceKind {
    Forward,
    Central,
    Backward,
    /// Fewer than two samples: no neighbour to difference against.
    Undefined,
}

/// Which stencil sample `k` of a `len`-long sequence gets.
#[must_use]
pub fn difference_kind(len: usize, k: usize) -> DifferenceKind {
    if len < 2 {
        DifferenceKind::Undefined
    } else if k == 0 {
        DifferenceKind::Forward
    } else if k + 1 == len {
        DifferenceKind::Backward
    } else {
        DifferenceKind::Central
    }
}

fn difference_at(len: usize, k: usize, h: f64, f: impl Fn(usize) -> f64) -> f64 {
    match difference_kind(len, k) {
        DifferenceKind::Forward => (f(1) - f(0)) / h,
        DifferenceKind::Backward => (f(len - 1) - f(len - 2)) / h,
        DifferenceKind::Central => (f(k + 1) - f(k - 1)) / (2.0 * h),
        DifferenceKind::Undefined => 0.0,
    }
}

/// Derivative estimate of `values` sampled with uniform spacing `h`.
///
/// With `h = 1` the result is the per-sample delta, which already carries the
/// parameter step.
#[must_use]
pub fn gradient(values: &[f64], h: f64) -> Vec<f64> {
    let len = values.len();
    (0..len)
        .map(|k| difference_at(len, k, h, |i| values[i]))
        .collect()
}

/// Derivative along the column axis (the `u` direction), row by row.
#[must_use]
pub fn gradient_along_u(grid: &Grid2<f64>, du: f64) -> Grid2<f64> {
    let cols = grid.cols();
    Grid2::from_fn(grid.rows(), cols, |row, col| {
        difference_at(cols, col, du, |c| grid[(row, c)])
    })
}

/// Derivative along the row axis (the `v` direction), column by column.
#[must_use]
pub fn gradient_along_v(grid: &Grid2<f64>, dv: f64) -> Grid2<f64> {
    let rows = grid.rows();
    Grid2::from_fn(rows, grid.cols(), |row, col| {
        difference_at(rows, row, dv, |r| grid[(r, col)])
    })
}
