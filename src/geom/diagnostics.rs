//! Mesh diagnostics for renderer-facing strip meshes.
//!
//! The strip mesh keeps its `u = 0` / `u = 2π` seam open, so a healthy mesh
//! reports its full outline (both strip edges plus both seam columns) as open
//! edges and nothing else.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct GeomMeshDiagnostics {
    /// Total number of vertices in the final mesh.
    pub vertex_count: usize,

    /// Total number of triangles in the final mesh.
    pub triangle_count: usize,

    /// Edges with only one adjacent triangle.
    pub open_edge_count: usize,

    /// Edges with more than two adjacent triangles.
    pub non_manifold_edge_count: usize,

    /// Triangles whose area is below the zero-length tolerance.
    pub degenerate_triangle_count: usize,

    pub warnings: Vec<String>,
}

impl GeomMeshDiagnostics {
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.open_edge_count == 0 && self.non_manifold_edge_count == 0
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.non_manifold_edge_count == 0
            && self.degenerate_triangle_count == 0
            && self.warnings.is_empty()
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

impl fmt::Display for GeomMeshDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices, {} triangles, {} open edges, {} non-manifold edges, {} degenerate",
            self.vertex_count,
            self.triangle_count,
            self.open_edge_count,
            self.non_manifold_edge_count,
            self.degenerate_triangle_count
        )
    }
}
