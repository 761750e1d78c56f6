//! Parameter sampling for the strip.
//!
//! Every 2D array in this crate is a [`Grid2`] stored row-major with the
//! following orientation:
//!
//! - **row** index `i` walks the cross-section parameter `v` (across the width)
//! - **column** index `j` walks the loop parameter `u` (along the centerline)
//!
//! Swapping the two silently transposes the finite-difference axes, so every
//! producer and consumer goes through `Grid2::get(row, col)`.

use std::f64::consts::TAU;
use std::ops::Index;

use serde::Serialize;

use super::params::{StripError, StripParams};

/// Dense row-major 2D array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid2<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Grid2<T> {
    /// Builds a grid by calling `f(row, col)` for every cell in row-major order.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self { rows, cols, data }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`, i.e. `(v samples, u samples)`.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// One constant-`v` row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.cols.max(1)).take(self.rows)
    }

    /// Flat row-major buffer, the layout renderers upload directly.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Grid2<U> {
        Grid2 {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(&mut f).collect(),
        }
    }
}

impl<T: Clone> Grid2<T> {
    /// Nested `Vec` per row, for serializers that expect a matrix.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.iter_rows().map(<[T]>::to_vec).collect()
    }
}

impl<T> Index<(usize, usize)> for Grid2<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            row < self.rows && col < self.cols,
            "grid index ({row}, {col}) out of bounds for shape ({}, {})",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

/// `count` evenly spaced values from `start` to `stop`, both inclusive.
///
/// The last sample is pinned to `stop` so the closing endpoint does not drift
/// with accumulated rounding.
#[must_use]
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + i as f64 * step).collect();
            values[count - 1] = stop;
            values
        }
    }
}

/// Sampled parameter domain of the strip.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterGrid {
    u: Vec<f64>,
    v: Vec<f64>,
    u_grid: Grid2<f64>,
    v_grid: Grid2<f64>,
    du: f64,
    dv: f64,
}

impl ParameterGrid {
    /// Samples `u` over `[0, 2π]` and `v` over `[-w/2, w/2]`, both with
    /// `resolution` samples, and forms the outer-product grids.
    pub fn new(params: &StripParams) -> Result<Self, StripError> {
        params.validate()?;

        let n = params.resolution;
        let half = params.half_width();
        let u = linspace(0.0, TAU, n);
        let v = linspace(-half, half, n);

        let u_grid = Grid2::from_fn(n, n, |_, col| u[col]);
        let v_grid = Grid2::from_fn(n, n, |row, _| v[row]);

        log::debug!("parameter grid sampled: {n}x{n} (w = {})", params.width);

        Ok(Self {
            u,
            v,
            u_grid,
            v_grid,
            du: TAU / (n - 1) as f64,
            dv: params.width / (n - 1) as f64,
        })
    }

    /// Loop parameter samples, one per column.
    #[must_use]
    pub fn u(&self) -> &[f64] {
        &self.u
    }

    /// Width parameter samples, one per row.
    #[must_use]
    pub fn v(&self) -> &[f64] {
        &self.v
    }

    /// `U[i][j] = u[j]`.
    #[must_use]
    pub fn u_grid(&self) -> &Grid2<f64> {
        &self.u_grid
    }

    /// `V[i][j] = v[i]`.
    #[must_use]
    pub fn v_grid(&self) -> &Grid2<f64> {
        &self.v_grid
    }

    #[must_use]
    pub fn resolution(&self) -> usize {
        self.u.len()
    }

    /// Spacing between consecutive `u` samples, `2π / (n - 1)`.
    #[must_use]
    pub fn du(&self) -> f64 {
        self.du
    }

    /// Spacing between consecutive `v` samples, `w / (n - 1)`.
    #[must_use]
    pub fn dv(&self) -> f64 {
        self.dv
    }
}
