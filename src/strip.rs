//! Composition root: strip constants in, grids and estimates out.
//!
//! [`MobiusStrip`] runs the whole pipeline once at construction
//! (parameter grid, surface evaluation, area and edge estimates) and keeps the
//! results read-only. Changing a constant means building a new strip.

use std::fmt;

use serde::Serialize;

use crate::geom::{
    AreaDiagnostics, BBox, CoordinateGrid, GeomContext, GeomMesh, GeomMeshDiagnostics,
    GeomMetrics, GeomTimingReport, Grid2, MobiusSurface, ParameterGrid, SeamDiagnostics,
    StripError, StripParams, TimingBucket, estimate_edge_length, estimate_surface_area,
    estimate_surface_area_with_diagnostics, evaluate_grid, mesh_coordinate_grid_with_context,
    sample_isocurve_v, seam_diagnostics,
};

/// Summary of one strip, as printed by the CLI and exported to renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StripReport {
    pub params: StripParams,
    pub surface_area: f64,
    /// Length along `v = +w/2` only.
    pub edge_length: f64,
    /// Both boundary passes, `v = +w/2` and `v = -w/2`.
    pub boundary_length: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timings: Option<GeomTimingReport>,
}

impl fmt::Display for StripReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Surface Area: {:.4}", self.surface_area)?;
        write!(f, "Edge Length: {:.4}", self.edge_length)
    }
}

#[derive(Debug, Clone)]
pub struct MobiusStrip {
    params: StripParams,
    surface: MobiusSurface,
    grid: ParameterGrid,
    coords: CoordinateGrid,
    surface_area: f64,
    edge_length: f64,
    timings: Option<GeomTimingReport>,
}

impl MobiusStrip {
    /// Validates `params` and runs the pipeline. Fails before any grid is
    /// allocated when a constant is out of range.
    pub fn new(params: StripParams) -> Result<Self, StripError> {
        let mut metrics = GeomMetrics::default();
        Self::build_with_metrics(params, &mut metrics)
    }

    pub fn build_with_metrics(
        params: StripParams,
        metrics: &mut GeomMetrics,
    ) -> Result<Self, StripError> {
        metrics.begin();

        let grid = metrics.time(TimingBucket::ParameterGrid, || ParameterGrid::new(&params))?;
        if params.is_coarse() {
            log::warn!(
                "resolution {} is below {}: boundary differences dominate the estimates",
                params.resolution,
                crate::geom::COARSE_RESOLUTION
            );
        }

        let surface = MobiusSurface::new(params.radius, params.width);
        let coords = metrics.time(TimingBucket::SurfaceEvaluation, || {
            evaluate_grid(&surface, &grid)
        });

        let surface_area = metrics.time(TimingBucket::AreaEstimation, || {
            estimate_surface_area(&coords, grid.du(), grid.dv())
        });
        let edge_length = metrics.time(TimingBucket::EdgeEstimation, || {
            edge_length_at(&surface, &grid, params.half_width())
        });

        log::debug!(
            "strip R = {}, w = {}, n = {}: area {surface_area}, edge {edge_length}",
            params.radius,
            params.width,
            params.resolution
        );

        Ok(Self {
            params,
            surface,
            grid,
            coords,
            surface_area,
            edge_length,
            timings: metrics.end(),
        })
    }

    #[must_use]
    pub fn params(&self) -> &StripParams {
        &self.params
    }

    #[must_use]
    pub fn surface(&self) -> &MobiusSurface {
        &self.surface
    }

    #[must_use]
    pub fn grid(&self) -> &ParameterGrid {
        &self.grid
    }

    #[must_use]
    pub fn u(&self) -> &[f64] {
        self.grid.u()
    }

    #[must_use]
    pub fn v(&self) -> &[f64] {
        self.grid.v()
    }

    #[must_use]
    pub fn u_grid(&self) -> &Grid2<f64> {
        self.grid.u_grid()
    }

    #[must_use]
    pub fn v_grid(&self) -> &Grid2<f64> {
        self.grid.v_grid()
    }

    #[must_use]
    pub fn coordinates(&self) -> &CoordinateGrid {
        &self.coords
    }

    #[must_use]
    pub fn x(&self) -> &Grid2<f64> {
        self.coords.x()
    }

    #[must_use]
    pub fn y(&self) -> &Grid2<f64> {
        self.coords.y()
    }

    #[must_use]
    pub fn z(&self) -> &Grid2<f64> {
        self.coords.z()
    }

    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.surface_area
    }

    /// Length of the `v = +w/2` boundary pass alone.
    #[must_use]
    pub fn edge_length(&self) -> f64 {
        self.edge_length
    }

    /// Length of the whole edge curve: the `+w/2` pass plus the `-w/2` pass it
    /// joins across the seam.
    #[must_use]
    pub fn boundary_length(&self) -> f64 {
        self.edge_length + edge_length_at(&self.surface, &self.grid, -self.params.half_width())
    }

    #[must_use]
    pub fn area_diagnostics(&self) -> AreaDiagnostics {
        let (_, diagnostics) =
            estimate_surface_area_with_diagnostics(&self.coords, self.grid.du(), self.grid.dv());
        diagnostics
    }

    #[must_use]
    pub fn seam(&self) -> SeamDiagnostics {
        seam_diagnostics(&self.coords)
    }

    #[must_use]
    pub fn mesh(&self) -> (GeomMesh, GeomMeshDiagnostics) {
        let mut ctx = GeomContext::new();
        self.mesh_with_context(&mut ctx)
    }

    #[must_use]
    pub fn mesh_with_context(&self, ctx: &mut GeomContext) -> (GeomMesh, GeomMeshDiagnostics) {
        mesh_coordinate_grid_with_context(&self.surface, &self.grid, &self.coords, ctx)
    }

    /// Stage timings captured at construction; `None` unless built with the
    /// `strip_metrics` feature.
    #[must_use]
    pub fn timings(&self) -> Option<&GeomTimingReport> {
        self.timings.as_ref()
    }

    #[must_use]
    pub fn report(&self) -> StripReport {
        StripReport {
            params: self.params,
            surface_area: self.surface_area,
            edge_length: self.edge_length,
            boundary_length: self.boundary_length(),
            bounding_box: self.coords.bounding_box(),
            timings: self.timings.clone(),
        }
    }
}

fn edge_length_at(surface: &MobiusSurface, grid: &ParameterGrid, v: f64) -> f64 {
    let curve = sample_isocurve_v(surface, grid.u(), v);
    estimate_edge_length(&curve)
}
