mod analysis;
mod core;
mod diagnostics;
mod difference;
mod grid;
mod mesh;
mod metrics;
mod params;
mod surface;
mod triangulation;

pub use analysis::{
    AreaDiagnostics, SeamDiagnostics, area_density_grid, estimate_edge_length,
    estimate_surface_area, estimate_surface_area_with_diagnostics, seam_diagnostics,
};
pub use self::core::{BBox, Point3, Tolerance, Vec3};
pub use diagnostics::GeomMeshDiagnostics;
pub use difference::{DifferenceKind, difference_kind, gradient, gradient_along_u, gradient_along_v};
pub use grid::{Grid2, ParameterGrid, linspace};
pub use mesh::{GeomContext, GeomMesh, mesh_coordinate_grid, mesh_coordinate_grid_with_context};
pub use metrics::{GeomMetrics, GeomTimingReport, TimingBucket};
pub use params::{COARSE_RESOLUTION, StripError, StripParams};
pub use surface::{CoordinateGrid, MobiusSurface, Surface, evaluate_grid, sample_isocurve_v};
pub use triangulation::triangulate_grid;

#[cfg(test)]
mod tests;
