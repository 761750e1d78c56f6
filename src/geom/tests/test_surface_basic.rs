use std::f64::consts::{PI, TAU};

use super::approx_eq;
use crate::geom::{
    CoordinateGrid, Grid2, MobiusSurface, ParameterGrid, Point3, StripParams, Surface, Tolerance,
    evaluate_grid, sample_isocurve_v,
};

/// Same embedding, but partials come from the trait's finite-difference default.
struct NumericMobius(MobiusSurface);

impl Surface for NumericMobius {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.0.point_at(u, v)
    }

    fn domain_u(&self) -> (f64, f64) {
        self.0.domain_u()
    }

    fn domain_v(&self) -> (f64, f64) {
        self.0.domain_v()
    }
}

fn reference_surface() -> MobiusSurface {
    MobiusSurface::new(1.0, 0.3)
}

#[test]
fn closed_form_values_at_key_parameters() {
    let surface = reference_surface();
    let tol = Tolerance::new(1e-12);

    assert!(tol.approx_eq_point3(surface.point_at(0.0, 0.1), Point3::new(1.1, 0.0, 0.0)));
    assert!(tol.approx_eq_point3(surface.point_at(PI, 0.1), Point3::new(-1.0, 0.0, 0.1)));
    assert!(tol.approx_eq_point3(surface.point_at(TAU, 0.1), Point3::new(0.9, 0.0, 0.0)));
    assert!(tol.approx_eq_point3(
        surface.point_at(PI / 2.0, 0.0),
        Point3::new(0.0, 1.0, 0.0)
    ));
}

#[test]
fn domains_cover_loop_and_width() {
    let surface = reference_surface();
    assert_eq!(surface.domain_u(), (0.0, TAU));
    assert_eq!(surface.domain_v(), (-0.15, 0.15));
    assert_eq!(surface.half_width(), 0.15);
}

#[test]
fn analytic_partials_match_finite_differences() {
    let analytic = reference_surface();
    let numeric = NumericMobius(analytic);
    let tol = Tolerance::LOOSE;

    for &(u, v) in &[(0.3, 0.0), (1.7, 0.12), (PI, -0.05), (5.2, -0.14)] {
        let (du_a, dv_a) = analytic.partial_derivatives_at(u, v);
        let (du_n, dv_n) = numeric.partial_derivatives_at(u, v);
        assert!(tol.approx_eq_vec3(du_a, du_n), "du at ({u}, {v}): {du_a:?} vs {du_n:?}");
        assert!(tol.approx_eq_vec3(dv_a, dv_n), "dv at ({u}, {v}): {dv_a:?} vs {dv_n:?}");

        let n_a = analytic.normal_at(u, v).unwrap();
        let n_n = numeric.normal_at(u, v).unwrap();
        assert!(tol.approx_eq_vec3(n_a, n_n));
        assert!(approx_eq(n_a.length(), 1.0, 1e-12));
    }
}

#[test]
fn cross_section_direction_is_unit_length() {
    let surface = reference_surface();
    for &u in &[0.0, 1.0, PI, 4.0, TAU] {
        let (_, dv) = surface.partial_derivatives_at(u, 0.07);
        assert!(approx_eq(dv.length(), 1.0, 1e-12));
    }
}

#[test]
fn normal_flips_across_the_seam() {
    let surface = reference_surface();
    let start = surface.normal_at(0.0, 0.0).unwrap();
    let end = surface.normal_at(TAU, 0.0).unwrap();
    assert!(approx_eq(start.dot(end), -1.0, 1e-9));
}

#[test]
fn evaluate_grid_keeps_row_column_orientation() {
    let surface = reference_surface();
    let grid = ParameterGrid::new(&StripParams::new(1.0, 0.3, 9)).unwrap();
    let coords = evaluate_grid(&surface, &grid);

    assert_eq!(coords.shape(), (9, 9));
    assert_eq!(coords.x().shape(), (9, 9));
    assert_eq!(coords.y().shape(), (9, 9));
    assert_eq!(coords.z().shape(), (9, 9));

    for row in 0..9 {
        for col in 0..9 {
            let expected = surface.point_at(grid.u()[col], grid.v()[row]);
            assert_eq!(coords.point(row, col), expected);
        }
    }
    assert_eq!(coords.points().count(), 81);
}

#[test]
fn centerline_row_lies_on_the_circle() {
    let surface = reference_surface();
    let grid = ParameterGrid::new(&StripParams::new(1.0, 0.3, 9)).unwrap();
    let coords = evaluate_grid(&surface, &grid);

    // Row 4 of 9 is v = 0.
    for col in 0..9 {
        let p = coords.point(4, col);
        assert!(approx_eq(p.x.hypot(p.y), 1.0, 1e-12));
        assert!(approx_eq(p.z, 0.0, 1e-12));
    }
}

#[test]
fn seam_columns_match_with_reversed_rows() {
    let surface = reference_surface();
    let n = 11;
    let grid = ParameterGrid::new(&StripParams::new(1.0, 0.3, n)).unwrap();
    let coords = evaluate_grid(&surface, &grid);
    let tol = Tolerance::new(1e-12);

    for row in 0..n {
        let start = coords.point(row, 0);
        let end = coords.point(n - 1 - row, n - 1);
        assert!(tol.approx_eq_point3(start, end), "row {row}: {start:?} vs {end:?}");
    }
}

#[test]
fn isocurve_samples_follow_u() {
    let surface = reference_surface();
    let u = [0.0, PI, TAU];
    let curve = sample_isocurve_v(&surface, &u, 0.15);
    assert_eq!(curve.len(), 3);
    assert_eq!(curve[1], surface.point_at(PI, 0.15));

    // The +w/2 edge comes back on the -w/2 side after one loop.
    let tol = Tolerance::new(1e-12);
    assert!(tol.approx_eq_point3(curve[0], Point3::new(1.15, 0.0, 0.0)));
    assert!(tol.approx_eq_point3(curve[2], Point3::new(0.85, 0.0, 0.0)));
}

#[test]
fn coordinate_grid_requires_matching_shapes() {
    let a = Grid2::from_fn(2, 3, |_, _| 0.0);
    let b = Grid2::from_fn(3, 2, |_, _| 0.0);
    assert!(CoordinateGrid::from_axes(a.clone(), a.clone(), b).is_none());

    let coords = CoordinateGrid::from_axes(a.clone(), a.clone(), a).unwrap();
    assert_eq!(coords.shape(), (2, 3));
}

#[test]
fn bounding_box_is_within_strip_extent() {
    let surface = reference_surface();
    let grid = ParameterGrid::new(&StripParams::new(1.0, 0.3, 41)).unwrap();
    let coords = evaluate_grid(&surface, &grid);
    let bbox = coords.bounding_box().unwrap();

    assert!(approx_eq(bbox.max.x, 1.15, 1e-12));
    assert!(bbox.min.x >= -1.15 - 1e-12);
    assert!(bbox.max.z <= 0.15 + 1e-12);
    assert!(bbox.min.z >= -0.15 - 1e-12);
}
