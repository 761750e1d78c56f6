/// Triangle indices for a `u_count × v_count` vertex grid stored row-major
/// (`index = v·u_count + u`). Two triangles per quad; the last column is not
/// connected back to the first.
///
/// Returns no triangles when the grid has fewer than two samples along an axis
/// or more vertices than a `u32` index can address.
#[must_use]
pub fn triangulate_grid(u_count: usize, v_count: usize) -> Vec<u32> {
    if u_count < 2 || v_count < 2 {
        return Vec::new();
    }
    let addressable = u_count
        .checked_mul(v_count)
        .is_some_and(|count| u32::try_from(count - 1).is_ok());
    if !addressable {
        log::warn!("grid {u_count}x{v_count} exceeds u32 vertex indices, skipping triangulation");
        return Vec::new();
    }

    let quad_u = u_count - 1;
    let quad_v = v_count - 1;
    let mut indices = Vec::with_capacity(quad_u * quad_v * 6);

    let stride = u_count;
    // Bounded by the check above.
    let index = |row: usize, col: usize| u32::try_from(row * stride + col).unwrap_or(u32::MAX);
    for v in 0..quad_v {
        for u in 0..quad_u {
            let i0 = index(v, u);
            let i1 = index(v, u + 1);
            let i2 = index(v + 1, u);
            let i3 = index(v + 1, u + 1);

            indices.extend_from_slice(&[i0, i1, i2]);
            indices.extend_from_slice(&[i2, i1, i3]);
        }
    }

    indices
}
