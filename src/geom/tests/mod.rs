mod test_surface_basic;

/// Absolute comparison used across the geometry tests.
pub(super) fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}
