use mobius_engine::StripEngine;
use mobius_engine::geom::{StripError, StripParams};
use mobius_engine::strip::MobiusStrip;

fn strip(radius: f64, width: f64, n: usize) -> MobiusStrip {
    MobiusStrip::new(StripParams::new(radius, width, n)).expect("valid strip")
}

#[test]
fn estimates_are_positive_for_valid_constants() {
    for &(radius, width, n) in &[
        (1.0, 0.3, 2),
        (1.0, 0.3, 3),
        (1.0, 0.3, 17),
        (0.5, 0.05, 64),
        (3.0, 1.0, 100),
        (1.0, 0.3, 200),
    ] {
        let s = strip(radius, width, n);
        assert!(s.surface_area() > 0.0, "area for ({radius}, {width}, {n})");
        assert!(s.edge_length() > 0.0, "edge for ({radius}, {width}, {n})");
    }
}

#[test]
fn every_grid_is_n_by_n() {
    for n in [2, 5, 33] {
        let s = strip(1.0, 0.3, n);
        let shapes = [
            s.u_grid().shape(),
            s.v_grid().shape(),
            s.x().shape(),
            s.y().shape(),
            s.z().shape(),
        ];
        assert!(shapes.iter().all(|&shape| shape == (n, n)), "{shapes:?}");
    }
}

#[test]
fn construction_is_idempotent() {
    let a = strip(1.0, 0.3, 120);
    let b = strip(1.0, 0.3, 120);

    assert_eq!(a.grid(), b.grid());
    assert_eq!(a.coordinates(), b.coordinates());
    assert_eq!(a.surface_area().to_bits(), b.surface_area().to_bits());
    assert_eq!(a.edge_length().to_bits(), b.edge_length().to_bits());
}

#[test]
fn invalid_constants_are_rejected() {
    let cases = [
        (StripParams::new(0.0, 0.3, 200), "radius"),
        (StripParams::new(1.0, -1.0, 200), "width"),
        (StripParams::new(1.0, 0.3, 1), "resolution"),
        (StripParams::new(1.0, 0.0, 200), "width"),
    ];
    for (params, expected) in cases {
        match MobiusStrip::new(params) {
            Err(StripError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
            Ok(_) => panic!("expected {params:?} to be rejected"),
        }
    }
}

#[test]
fn area_converges_with_shrinking_steps() {
    let a50 = strip(1.0, 0.3, 50).surface_area();
    let a200 = strip(1.0, 0.3, 200).surface_area();
    let a800 = strip(1.0, 0.3, 800).surface_area();

    assert!(a50 > a200 && a200 > a800);
    assert!((a200 - a800).abs() < (a50 - a200).abs());
}

#[test]
fn area_is_nearly_linear_in_radius_for_wide_loops() {
    let mut last_gap = f64::INFINITY;
    for radius in [1.0, 4.0, 16.0] {
        let ratio = strip(2.0 * radius, 0.3, 100).surface_area() / strip(radius, 0.3, 100).surface_area();
        let gap = (ratio - 2.0).abs();
        assert!(gap < 0.01, "ratio {ratio} at R = {radius}");
        assert!(gap < last_gap);
        last_gap = gap;
    }
}

#[test]
fn seam_matches_with_reversed_rows() {
    let s = strip(1.0, 0.3, 200);
    let seam = s.seam();
    assert!(seam.flipped_gap < 1e-12);
    assert!((seam.aligned_gap - 0.3).abs() < 1e-12);
}

#[test]
fn mesh_covers_the_grid() {
    let s = strip(1.0, 0.3, 30);
    let (mesh, diagnostics) = s.mesh();
    mesh.validate().expect("valid mesh");
    assert_eq!(mesh.vertex_count(), 900);
    assert_eq!(mesh.triangle_count(), 2 * 29 * 29);
    assert_eq!(diagnostics.open_edge_count, 4 * 29);
    assert_eq!(diagnostics.non_manifold_edge_count, 0);
}

#[test]
fn report_carries_estimates_and_bounds() {
    let s = strip(1.0, 0.3, 60);
    let report = s.report();
    assert_eq!(report.params, StripParams::new(1.0, 0.3, 60));
    assert_eq!(report.surface_area, s.surface_area());
    assert_eq!(report.edge_length, s.edge_length());
    assert_eq!(report.boundary_length, s.boundary_length());

    let bbox = report.bounding_box.expect("non-empty grid");
    assert!(bbox.max.x <= 1.15 + 1e-12);
    assert!(bbox.max.z <= 0.15 + 1e-12);

    let json = serde_json::to_string(&report).expect("serialize report");
    assert!(json.contains("\"surface_area\""));
}

#[test]
fn area_diagnostics_report_boundary_share() {
    let s = strip(1.0, 0.3, 10);
    let diag = s.area_diagnostics();
    assert_eq!((diag.rows, diag.cols), (10, 10));
    assert_eq!(diag.boundary_samples, 100 - 64);
    assert_eq!(diag.degenerate_elements, 0);
}

#[test]
fn wasm_engine_wraps_the_strip() {
    let engine = StripEngine::new(1.0, 0.3, 50).expect("valid engine");
    let direct = strip(1.0, 0.3, 50);
    assert_eq!(engine.surface_area(), direct.surface_area());
    assert_eq!(engine.edge_length(), direct.edge_length());
    assert_eq!(engine.z(), direct.z().as_slice());
}
