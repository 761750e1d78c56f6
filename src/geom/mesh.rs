use std::collections::HashMap;

use serde::Serialize;

use super::diagnostics::GeomMeshDiagnostics;
use super::grid::ParameterGrid;
use super::metrics::{GeomMetrics, TimingBucket};
use super::surface::{CoordinateGrid, Surface};
use super::triangulation::triangulate_grid;
use super::{Point3, Tolerance, Vec3};

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GeomMesh {
    pub positions: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
    pub uvs: Option<Vec<[f64; 2]>>,
    pub normals: Option<Vec<[f64; 3]>>,
}

impl GeomMesh {
    /// Create a new mesh with positions and indices only.
    #[must_use]
    pub fn new(positions: Vec<[f64; 3]>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices,
            uvs: None,
            normals: None,
        }
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if any vertex position contains NaN or Inf values.
    #[must_use]
    pub fn has_invalid_vertices(&self) -> bool {
        self.positions
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite() || !p[2].is_finite())
    }

    /// Returns true if all vertex indices are within bounds.
    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let n = self.positions.len();
        self.indices.iter().all(|&i| (i as usize) < n)
    }

    /// Returns true if all optional vertex attribute buffers match `positions.len()`.
    #[must_use]
    pub fn has_valid_attribute_lengths(&self) -> bool {
        let n = self.positions.len();
        self.uvs.as_ref().is_none_or(|uvs| uvs.len() == n)
            && self.normals.as_ref().is_none_or(|normals| normals.len() == n)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err("mesh indices are not a triangle list (len % 3 != 0)".to_string());
        }
        if self.has_invalid_vertices() {
            return Err("mesh has invalid vertex coordinates (NaN/Inf)".to_string());
        }
        if !self.has_valid_indices() {
            return Err("mesh has out-of-bounds vertex indices".to_string());
        }
        if !self.has_valid_attribute_lengths() {
            return Err("mesh attribute buffers do not match vertex count".to_string());
        }
        Ok(())
    }

    /// Returns the position buffer as a flat slice: `[x0, y0, z0, x1, y1, z1, ...]`.
    #[must_use]
    pub fn positions_flat(&self) -> &[f64] {
        self.positions.as_flattened()
    }

    /// Returns the normal buffer as a flat slice when present.
    #[must_use]
    pub fn normals_flat(&self) -> Option<&[f64]> {
        self.normals.as_deref().map(<[[f64; 3]]>::as_flattened)
    }
}

#[derive(Debug)]
pub struct GeomContext {
    pub tolerance: Tolerance,
    pub metrics: GeomMetrics,
}

impl GeomContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tolerance: Tolerance::default_geom(),
            metrics: GeomMetrics::default(),
        }
    }
}

impl Default for GeomContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Triangle mesh over an evaluated grid, one vertex per grid point.
///
/// Vertices keep the grid's row-major order, so vertex `row·cols + col` is
/// `coords.point(row, col)`. UVs are the normalized `(u, v)` parameters and
/// normals come from `surface`. The seam columns are not welded.
#[must_use]
pub fn mesh_coordinate_grid<S: Surface + ?Sized>(
    surface: &S,
    grid: &ParameterGrid,
    coords: &CoordinateGrid,
) -> (GeomMesh, GeomMeshDiagnostics) {
    let mut ctx = GeomContext::new();
    mesh_coordinate_grid_with_context(surface, grid, coords, &mut ctx)
}

#[must_use]
pub fn mesh_coordinate_grid_with_context<S: Surface + ?Sized>(
    surface: &S,
    grid: &ParameterGrid,
    coords: &CoordinateGrid,
    ctx: &mut GeomContext,
) -> (GeomMesh, GeomMeshDiagnostics) {
    let (rows, cols) = coords.shape();
    let positions: Vec<[f64; 3]> = coords.points().map(Point3::to_array).collect();

    let indices = ctx
        .metrics
        .time(TimingBucket::Triangulation, || triangulate_grid(cols, rows));

    let uvs = grid_uvs(cols, rows);
    let u_grid = grid.u_grid();
    let v_grid = grid.v_grid();
    let normals: Vec<[f64; 3]> = u_grid
        .as_slice()
        .iter()
        .zip(v_grid.as_slice())
        .map(|(&u, &v)| surface.normal_at(u, v).unwrap_or(Vec3::Z).to_array())
        .collect();

    let mesh = GeomMesh {
        positions,
        indices,
        uvs: Some(uvs),
        normals: Some(normals),
    };

    let tol = ctx.tolerance;
    let diagnostics = ctx
        .metrics
        .time(TimingBucket::Diagnostics, || mesh_diagnostics(&mesh, tol));

    (mesh, diagnostics)
}

fn grid_uvs(u_count: usize, v_count: usize) -> Vec<[f64; 2]> {
    let u_denom = u_count.saturating_sub(1).max(1) as f64;
    let v_denom = v_count.saturating_sub(1).max(1) as f64;

    let mut uvs = Vec::with_capacity(u_count * v_count);
    for v in 0..v_count {
        let vv = v as f64 / v_denom;
        for u in 0..u_count {
            uvs.push([u as f64 / u_denom, vv]);
        }
    }
    uvs
}

fn mesh_diagnostics(mesh: &GeomMesh, tol: Tolerance) -> GeomMeshDiagnostics {
    let (open_edge_count, non_manifold_edge_count) = count_edge_topology(&mesh.indices);

    let degenerate_triangle_count = if mesh.has_valid_indices() {
        count_degenerate_triangles(mesh, tol)
    } else {
        0
    };

    let mut diagnostics = GeomMeshDiagnostics {
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
        open_edge_count,
        non_manifold_edge_count,
        degenerate_triangle_count,
        warnings: Vec::new(),
    };

    if let Err(message) = mesh.validate() {
        diagnostics.add_warning(message);
    }
    if degenerate_triangle_count > 0 {
        diagnostics.add_warning(format!(
            "{degenerate_triangle_count} triangles have near-zero area"
        ));
    }

    diagnostics
}

fn count_degenerate_triangles(mesh: &GeomMesh, tol: Tolerance) -> usize {
    mesh.indices
        .chunks_exact(3)
        .filter(|tri| {
            let a = Point3::from(mesh.positions[tri[0] as usize]);
            let b = Point3::from(mesh.positions[tri[1] as usize]);
            let c = Point3::from(mesh.positions[tri[2] as usize]);
            let doubled_area = (b - a).cross(c - a).length();
            doubled_area <= tol.eps_squared()
        })
        .count()
}

fn count_edge_topology(indices: &[u32]) -> (usize, usize) {
    let mut edge_counts: HashMap<(u32, u32), u32> = HashMap::new();

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0], tri[1], tri[2]);
        if i0 == i1 || i1 == i2 || i0 == i2 {
            continue;
        }

        for (ea, eb) in [(i0, i1), (i1, i2), (i2, i0)] {
            let key = if ea <= eb { (ea, eb) } else { (eb, ea) };
            *edge_counts.entry(key).or_insert(0) += 1;
        }
    }

    let mut open_edge_count = 0usize;
    let mut non_manifold_edge_count = 0usize;
    for count in edge_counts.into_values() {
        if count == 1 {
            open_edge_count += 1;
        } else if count > 2 {
            non_manifold_edge_count += 1;
        }
    }

    (open_edge_count, non_manifold_edge_count)
}
