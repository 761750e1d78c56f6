use std::f64::consts::TAU;

use super::core::{BBox, Point3, Tolerance, Vec3};
use super::grid::{Grid2, ParameterGrid};

/// A parametric surface `P(u, v)` over a rectangular domain.
pub trait Surface {
    fn point_at(&self, u: f64, v: f64) -> Point3;

    fn domain_u(&self) -> (f64, f64);

    fn domain_v(&self) -> (f64, f64);

    /// `(∂P/∂u, ∂P/∂v)` by a small symmetric difference, clamped to the domain.
    #[must_use]
    fn partial_derivatives_at(&self, u: f64, v: f64) -> (Vec3, Vec3) {
        let (u0, u1) = self.domain_u();
        let (v0, v1) = self.domain_v();
        let u = u.clamp(u0, u1);
        let v = v.clamp(v0, v1);

        let mut du = Vec3::ZERO;
        let mut dv = Vec3::ZERO;

        let h = Tolerance::DERIVATIVE.relative_to(u1 - u0);
        if h.is_finite() && h != 0.0 {
            let ua = (u - h).max(u0);
            let ub = (u + h).min(u1);
            if ua != ub {
                let pa = self.point_at(ua, v);
                let pb = self.point_at(ub, v);
                du = pb.sub_point(pa).mul_scalar(1.0 / (ub - ua));
            }
        }

        let h = Tolerance::DERIVATIVE.relative_to(v1 - v0);
        if h.is_finite() && h != 0.0 {
            let va = (v - h).max(v0);
            let vb = (v + h).min(v1);
            if va != vb {
                let pa = self.point_at(u, va);
                let pb = self.point_at(u, vb);
                dv = pb.sub_point(pa).mul_scalar(1.0 / (vb - va));
            }
        }

        (du, dv)
    }

    #[must_use]
    fn normal_at(&self, u: f64, v: f64) -> Option<Vec3> {
        let (du, dv) = self.partial_derivatives_at(u, v);
        du.cross(dv).normalized()
    }
}

/// Closed-form Möbius strip embedding:
///
/// ```text
/// x(u, v) = (R + v·cos(u/2))·cos(u)
/// y(u, v) = (R + v·cos(u/2))·sin(u)
/// z(u, v) = v·sin(u/2)
/// ```
///
/// The half-angle term gives the single half twist: `P(0, v)` coincides with
/// `P(2π, -v)`. Sampling `u` up to and including `2π` therefore produces a
/// mesh whose seam columns hold the same cross-section in reversed row order.
/// The seam is left open on purpose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MobiusSurface {
    pub radius: f64,
    pub width: f64,
}

impl MobiusSurface {
    #[must_use]
    pub const fn new(radius: f64, width: f64) -> Self {
        Self { radius, width }
    }

    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }
}

impl Surface for MobiusSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        let radial = self.radius + v * (u / 2.0).cos();
        Point3::new(radial * u.cos(), radial * u.sin(), v * (u / 2.0).sin())
    }

    fn domain_u(&self) -> (f64, f64) {
        (0.0, TAU)
    }

    fn domain_v(&self) -> (f64, f64) {
        let half = self.half_width();
        (-half, half)
    }

    fn partial_derivatives_at(&self, u: f64, v: f64) -> (Vec3, Vec3) {
        let (sin_u, cos_u) = u.sin_cos();
        let (sin_h, cos_h) = (u / 2.0).sin_cos();
        let radial = self.radius + v * cos_h;
        let radial_du = -0.5 * v * sin_h;

        let du = Vec3::new(
            radial_du * cos_u - radial * sin_u,
            radial_du * sin_u + radial * cos_u,
            0.5 * v * cos_h,
        );
        let dv = Vec3::new(cos_h * cos_u, cos_h * sin_u, sin_h);
        (du, dv)
    }
}

/// Embedded positions for every cell of a [`ParameterGrid`], split per axis
/// so renderers can upload `X`, `Y`, `Z` as separate buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateGrid {
    x: Grid2<f64>,
    y: Grid2<f64>,
    z: Grid2<f64>,
}

impl CoordinateGrid {
    /// Assembles a grid from per-axis arrays. Returns `None` when the shapes differ.
    #[must_use]
    pub fn from_axes(x: Grid2<f64>, y: Grid2<f64>, z: Grid2<f64>) -> Option<Self> {
        (x.shape() == y.shape() && y.shape() == z.shape()).then_some(Self { x, y, z })
    }

    #[must_use]
    pub fn x(&self) -> &Grid2<f64> {
        &self.x
    }

    #[must_use]
    pub fn y(&self) -> &Grid2<f64> {
        &self.y
    }

    #[must_use]
    pub fn z(&self) -> &Grid2<f64> {
        &self.z
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }

    #[must_use]
    pub fn point(&self, row: usize, col: usize) -> Point3 {
        Point3::new(
            self.x[(row, col)],
            self.y[(row, col)],
            self.z[(row, col)],
        )
    }

    /// Points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point3> + '_ {
        self.x
            .as_slice()
            .iter()
            .zip(self.y.as_slice())
            .zip(self.z.as_slice())
            .map(|((&x, &y), &z)| Point3::new(x, y, z))
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<BBox> {
        BBox::from_points(self.points())
    }
}

/// Evaluates `surface` at every `(U[i][j], V[i][j])`, keeping the grid's
/// row/column orientation.
#[must_use]
pub fn evaluate_grid<S: Surface + ?Sized>(surface: &S, grid: &ParameterGrid) -> CoordinateGrid {
    let u = grid.u_grid();
    let v = grid.v_grid();
    let (rows, cols) = u.shape();

    let points = Grid2::from_fn(rows, cols, |row, col| {
        surface.point_at(u[(row, col)], v[(row, col)])
    });

    CoordinateGrid {
        x: points.map(|p| p.x),
        y: points.map(|p| p.y),
        z: points.map(|p| p.z),
    }
}

/// The curve `u ↦ P(u, v)` sampled at the given `u` values.
#[must_use]
pub fn sample_isocurve_v<S: Surface + ?Sized>(surface: &S, u: &[f64], v: f64) -> Vec<Point3> {
    u.iter().map(|&u| surface.point_at(u, v)).collect()
}
