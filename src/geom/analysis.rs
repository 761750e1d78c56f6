//! Area and edge-length estimates computed from sampled coordinates only.
//!
//! Neither estimate looks at the closed-form parametrization: the area works
//! on a [`CoordinateGrid`], the edge length on a sampled polyline.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::core::{Point3, Tolerance, Vec3};
use super::difference::{DifferenceKind, difference_kind, gradient, gradient_along_u, gradient_along_v};
use super::grid::Grid2;
use super::surface::CoordinateGrid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaDiagnostics {
    /// Samples along `v`.
    pub rows: usize,
    /// Samples along `u`.
    pub cols: usize,
    pub du: f64,
    pub dv: f64,
    /// Grid points where at least one tangent came from a one-sided difference.
    pub boundary_samples: usize,
    /// Grid points whose area-element density is numerically zero.
    pub degenerate_elements: usize,
    pub min_density: f64,
    pub max_density: f64,
}

impl AreaDiagnostics {
    /// Share of grid points estimated with a one-sided stencil.
    #[must_use]
    pub fn boundary_fraction(&self) -> f64 {
        let total = self.rows * self.cols;
        if total == 0 {
            0.0
        } else {
            self.boundary_samples as f64 / total as f64
        }
    }
}

/// Area-element density `|∂P/∂u × ∂P/∂v|` at every grid point.
///
/// Tangents come from finite differences of the coordinate grid: along the
/// columns with spacing `du`, along the rows with spacing `dv`.
#[must_use]
pub fn area_density_grid(coords: &CoordinateGrid, du: f64, dv: f64) -> Grid2<f64> {
    let xu = gradient_along_u(coords.x(), du);
    let yu = gradient_along_u(coords.y(), du);
    let zu = gradient_along_u(coords.z(), du);
    let xv = gradient_along_v(coords.x(), dv);
    let yv = gradient_along_v(coords.y(), dv);
    let zv = gradient_along_v(coords.z(), dv);

    let (rows, cols) = coords.shape();
    Grid2::from_fn(rows, cols, |row, col| {
        let at = (row, col);
        let tangent_u = Vec3::new(xu[at], yu[at], zu[at]);
        let tangent_v = Vec3::new(xv[at], yv[at], zv[at]);
        tangent_u.cross(tangent_v).length()
    })
}

/// Sums each row first, then the row totals in order, so the parallel and
/// sequential builds accumulate identically.
fn sum_rows(density: &Grid2<f64>) -> f64 {
    #[cfg(feature = "parallel")]
    let row_totals: Vec<f64> = density
        .as_slice()
        .par_chunks(density.cols().max(1))
        .map(|row| row.iter().sum::<f64>())
        .collect();

    #[cfg(not(feature = "parallel"))]
    let row_totals: Vec<f64> = density
        .iter_rows()
        .map(|row| row.iter().sum::<f64>())
        .collect();

    row_totals.iter().sum()
}

/// Left-Riemann estimate of the surface area: the area-element density summed
/// over all grid points, times `du·dv`.
///
/// Every sample contributes a full `du·dv` cell, including the last row and
/// column, so the estimate is biased upward by `O(1/n)`. The scheme is kept
/// as is; do not replace it with a trapezoidal or midpoint rule.
#[must_use]
pub fn estimate_surface_area(coords: &CoordinateGrid, du: f64, dv: f64) -> f64 {
    let density = area_density_grid(coords, du, dv);
    sum_rows(&density) * du * dv
}

/// [`estimate_surface_area`] plus stencil and density statistics.
#[must_use]
pub fn estimate_surface_area_with_diagnostics(
    coords: &CoordinateGrid,
    du: f64,
    dv: f64,
) -> (f64, AreaDiagnostics) {
    let density = area_density_grid(coords, du, dv);
    let area = sum_rows(&density) * du * dv;

    let (rows, cols) = density.shape();
    let mut boundary_samples = 0;
    let mut degenerate_elements = 0;
    let mut min_density = f64::INFINITY;
    let mut max_density = 0.0_f64;

    for row in 0..rows {
        let row_one_sided = difference_kind(rows, row) != DifferenceKind::Central;
        for col in 0..cols {
            if row_one_sided || difference_kind(cols, col) != DifferenceKind::Central {
                boundary_samples += 1;
            }
            let d = density[(row, col)];
            if Tolerance::ZERO_LENGTH.is_zero_length(d) {
                degenerate_elements += 1;
            }
            min_density = min_density.min(d);
            max_density = max_density.max(d);
        }
    }

    if rows * cols == 0 {
        min_density = 0.0;
    }

    let diagnostics = AreaDiagnostics {
        rows,
        cols,
        du,
        dv,
        boundary_samples,
        degenerate_elements,
        min_density,
        max_density,
    };
    (area, diagnostics)
}

/// Length of a sampled curve as the sum of per-sample speeds.
///
/// Coordinates are differenced with unit spacing, so each speed is already
/// the arc length one parameter step covers and no step factor is applied.
/// Like the area, every sample contributes a full step, endpoints included.
#[must_use]
pub fn estimate_edge_length(points: &[Point3]) -> f64 {
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let zs: Vec<f64> = points.iter().map(|p| p.z).collect();

    let dx = gradient(&xs, 1.0);
    let dy = gradient(&ys, 1.0);
    let dz = gradient(&zs, 1.0);

    dx.iter()
        .zip(&dy)
        .zip(&dz)
        .map(|((&dx, &dy), &dz)| Vec3::new(dx, dy, dz).length())
        .sum()
}

/// How far apart the `u = 0` and `u = 2π` columns of a grid are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeamDiagnostics {
    /// Max distance between row `i` of the first column and row `n-1-i` of
    /// the last. Near zero for a half-twisted strip.
    pub flipped_gap: f64,
    /// Max distance between row `i` of the first and last column. Equals the
    /// strip width for a half-twisted strip.
    pub aligned_gap: f64,
}

#[must_use]
pub fn seam_diagnostics(coords: &CoordinateGrid) -> SeamDiagnostics {
    let (rows, cols) = coords.shape();
    if rows == 0 || cols == 0 {
        return SeamDiagnostics {
            flipped_gap: 0.0,
            aligned_gap: 0.0,
        };
    }

    let last = cols - 1;
    let mut flipped_gap = 0.0_f64;
    let mut aligned_gap = 0.0_f64;
    for row in 0..rows {
        let start = coords.point(row, 0);
        flipped_gap = flipped_gap.max(start.distance_to(coords.point(rows - 1 - row, last)));
        aligned_gap = aligned_gap.max(start.distance_to(coords.point(row, last)));
    }

    SeamDiagnostics {
        flipped_gap,
        aligned_gap,
    }
}
