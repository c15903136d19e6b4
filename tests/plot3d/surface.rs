use approx::assert_abs_diff_eq;
use plotgen::core::cache::EvalCache;
use plotgen::core::expression::parse;
use plotgen::plot3d::surface::{point_cloud, triangulated_mesh};

#[test]
fn flat_plane_two_by_two() {
    crate::setup();
    let z = parse("0", &["x", "y"]).unwrap();
    let mut cache = EvalCache::default();

    let mesh = triangulated_mesh(&z, [0f64, 1f64], [0f64, 1f64], 2, &mut cache).unwrap();

    // 2 triangles per cell, 4 cells.
    assert_eq!(mesh.triangle_count(), 8);
    assert_eq!(mesh.vertices.len(), 8 * 9);
    assert_eq!(mesh.normals.len(), mesh.vertices.len());
    assert_eq!(mesh.indices.len(), 8 * 3);

    for normal in mesh.normals.chunks_exact(3) {
        assert_abs_diff_eq!(normal[0], 0f64, epsilon = 1e-12);
        assert_abs_diff_eq!(normal[1], 0f64, epsilon = 1e-12);
        assert_abs_diff_eq!(normal[2].abs(), 1f64, epsilon = 1e-12);
    }
}

#[test]
fn indices_run_sequentially() {
    let z = parse("x + y", &["x", "y"]).unwrap();
    let mut cache = EvalCache::default();

    let mesh = triangulated_mesh(&z, [0f64, 1f64], [0f64, 1f64], 3, &mut cache).unwrap();
    let expected: Vec<u32> = (0..mesh.vertices.len() as u32 / 3).collect();
    assert_eq!(mesh.indices, expected);
}

#[test]
fn normals_are_unit_length() {
    let z = parse("sin(x) * cos(y)", &["x", "y"]).unwrap();
    let mut cache = EvalCache::default();

    let mesh = triangulated_mesh(&z, [-2f64, 2f64], [-2f64, 2f64], 8, &mut cache).unwrap();
    for normal in mesh.normals.chunks_exact(3) {
        let len = (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
        assert_abs_diff_eq!(len, 1f64, epsilon = 1e-12);
    }
}

#[test]
fn degenerate_cells_are_skipped() {
    // sqrt(x) is NaN for x < 0: every cell touching a negative x corner
    // drops out, leaving a hole instead of a flat patch.
    let z = parse("sqrt(x)", &["x", "y"]).unwrap();
    let mut cache = EvalCache::default();

    let mesh = triangulated_mesh(&z, [-1f64, 1f64], [0f64, 1f64], 2, &mut cache).unwrap();
    // Grid x values are -1, 0, 1: only cells with all corners at x >= 0
    // survive, i.e. the right column (2 cells, 4 triangles).
    assert_eq!(mesh.triangle_count(), 4);
}

#[test]
fn fully_degenerate_surface_yields_empty_mesh() {
    let z = parse("sqrt(-1 - x^2)", &["x", "y"]).unwrap();
    let mut cache = EvalCache::default();

    let mesh = triangulated_mesh(&z, [0f64, 1f64], [0f64, 1f64], 2, &mut cache).unwrap();
    assert_eq!(mesh.triangle_count(), 0);
    assert!(mesh.vertices.is_empty());
}

#[test]
fn point_cloud_is_grid_ordered_and_complete() {
    let z = parse("x * 10 + y", &["x", "y"]).unwrap();
    let mut cache = EvalCache::default();

    let cloud = point_cloud(&z, [0f64, 2f64], [0f64, 1f64], 2, &mut cache).unwrap();
    assert_eq!(cloud.points.len(), 9);
    assert_eq!(cloud.zero_filled, 0);

    // y-major rows, x fastest.
    assert_eq!(cloud.points[0], [0f64, 0f64, 0f64]);
    assert_eq!(cloud.points[1], [1f64, 0f64, 10f64]);
    assert_eq!(cloud.points[3], [0f64, 0.5, 0.5]);
}

#[test]
fn point_cloud_zero_fills_instead_of_omitting() {
    let z = parse("sqrt(x)", &["x", "y"]).unwrap();
    let mut cache = EvalCache::default();

    let cloud = point_cloud(&z, [-1f64, 1f64], [0f64, 1f64], 2, &mut cache).unwrap();
    // The grid stays rectangular; x = -1 column is patched to z = 0.
    assert_eq!(cloud.points.len(), 9);
    assert_eq!(cloud.zero_filled, 3);
    assert_eq!(cloud.points[0], [-1f64, 0f64, 0f64]);
}

#[test]
fn mesh_regeneration_is_identical() {
    let z = parse("x^2 - y^2", &["x", "y"]).unwrap();
    let mut cache = EvalCache::default();

    let a = triangulated_mesh(&z, [-1f64, 1f64], [-1f64, 1f64], 6, &mut cache).unwrap();
    let b = triangulated_mesh(&z, [-1f64, 1f64], [-1f64, 1f64], 6, &mut cache).unwrap();
    assert_eq!(a, b);
}
