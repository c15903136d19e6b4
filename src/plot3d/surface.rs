//! Point clouds and triangulated meshes for `z = f(x, y)` surfaces.

use log::debug;

use crate::core::cache::EvalCache;
use crate::core::expression::Expression;
use crate::core::sampling::sample2d;
use crate::errors::GraphError;
use crate::geometry::{PointCloud, SurfaceMesh};
use crate::spec::axes;

/// Samples the surface into a grid-ordered point cloud (y-major rows, x
/// fastest). Non-finite samples are kept at `z = 0` instead of omitted so
/// the grid stays rectangular; the count of patched samples is reported on
/// the output.
pub fn point_cloud(
    z: &Expression,
    x: [f64; 2],
    y: [f64; 2],
    count: usize,
    cache: &mut EvalCache,
) -> Result<PointCloud, GraphError> {
    let (xv, yv) = sample2d(axes::X, x, axes::Y, y, count)?;
    let mut points = Vec::with_capacity(xv.len() * yv.len());
    let mut zero_filled = 0usize;
    for &y in &yv {
        for &x in &xv {
            let z = cache.eval(z, &[x, y])?;
            if z.is_finite() {
                points.push([x, y, z]);
            } else {
                points.push([x, y, 0.0]);
                zero_filled += 1;
            }
        }
    }
    if zero_filled > 0 {
        debug!("point cloud: zero-filled {zero_filled} non-finite sample(s)");
    }
    Ok(PointCloud {
        points,
        zero_filled,
    })
}

fn face_normal(p0: [f64; 3], p1: [f64; 3], p2: [f64; 3]) -> [f64; 3] {
    let e1 = [p1[0] - p0[0], p1[1] - p0[1], p1[2] - p0[2]];
    let e2 = [p2[0] - p0[0], p2[1] - p0[1], p2[2] - p0[2]];
    let n = [
        e1[1] * e2[2] - e1[2] * e2[1],
        e1[2] * e2[0] - e1[0] * e2[2],
        e1[0] * e2[1] - e1[1] * e2[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > 0.0 {
        [n[0] / len, n[1] / len, n[2] / len]
    } else {
        // Collapsed cell (zero-width interval); leave it unlit.
        [0.0, 0.0, 0.0]
    }
}

fn push_triangle(mesh: &mut SurfaceMesh, p0: [f64; 3], p1: [f64; 3], p2: [f64; 3]) {
    let normal = face_normal(p0, p1, p2);
    let base = mesh.vertex_count() as u32;
    for p in [p0, p1, p2] {
        mesh.vertices.extend_from_slice(&p);
        mesh.normals.extend_from_slice(&normal);
    }
    mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
}

/// Samples `z(x, y)` over a `(count + 1)^2` grid and builds two triangles
/// per cell with per-corner face normals.
///
/// A cell with any non-finite corner is skipped entirely, leaving a hole
/// rather than a spurious flat patch, so the triangle count is exactly
/// `2 * count^2` minus two per skipped cell.
pub fn triangulated_mesh(
    z: &Expression,
    x: [f64; 2],
    y: [f64; 2],
    count: usize,
    cache: &mut EvalCache,
) -> Result<SurfaceMesh, GraphError> {
    let (xv, yv) = sample2d(axes::X, x, axes::Y, y, count)?;
    let cols = xv.len();

    // Row-major z grid; None marks a degenerate corner.
    let mut zv: Vec<Option<f64>> = Vec::with_capacity(cols * yv.len());
    for &y in &yv {
        for &x in &xv {
            let z = cache.eval(z, &[x, y])?;
            zv.push(z.is_finite().then_some(z));
        }
    }

    let mut mesh = SurfaceMesh {
        vertices: Vec::with_capacity(count * count * 18),
        normals: Vec::with_capacity(count * count * 18),
        indices: Vec::with_capacity(count * count * 6),
    };
    let mut skipped = 0usize;
    for j in 0..count {
        for i in 0..count {
            let corners = [
                (i, j),
                (i + 1, j),
                (i + 1, j + 1),
                (i, j + 1),
            ];
            let mut ps = [[0.0f64; 3]; 4];
            let mut degenerate = false;
            for (slot, &(ci, cj)) in ps.iter_mut().zip(corners.iter()) {
                match zv[cj * cols + ci] {
                    Some(z) => *slot = [xv[ci], yv[cj], z],
                    None => {
                        degenerate = true;
                        break;
                    }
                }
            }
            if degenerate {
                skipped += 1;
                continue;
            }
            let [a, b, c, d] = ps;
            push_triangle(&mut mesh, a, b, c);
            push_triangle(&mut mesh, a, c, d);
        }
    }
    if skipped > 0 {
        debug!("surface mesh: skipped {skipped} degenerate cell(s)");
    }
    Ok(mesh)
}
