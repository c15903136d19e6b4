//! Output geometry handed to the renderer.
//!
//! Everything here is produced fresh per generation, owned by the caller,
//! and never mutated after construction: a change to the spec or LOD state
//! replaces the whole value.

use serde::Serialize;

/// A pair of points consumed pairwise into shaded quads: `(curve point,
/// baseline point)` or `(function point, function2 point)`.
pub type PointPair = [[f64; 3]; 2];

/// A triangulated surface as flat buffers, stride 3.
///
/// `normals` has the same length as `vertices`; each triangle's three
/// corners carry its unit face normal, so vertices are not shared across
/// triangles and `indices` runs sequentially.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceMesh {
    pub vertices: Vec<f64>,
    pub normals: Vec<f64>,
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// A grid-ordered point cloud over a surface.
///
/// Non-finite samples are kept with `z = 0` instead of being omitted, since
/// a grid with holes breaks downstream triangulation; `zero_filled` reports
/// how many samples were patched that way.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointCloud {
    pub points: Vec<[f64; 3]>,
    pub zero_filled: usize,
}

/// Renderer-ready geometry for one graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GraphGeometry {
    /// An ordered line strip; gaps from omitted samples break the strip.
    Curve { points: Vec<[f64; 3]> },
    Mesh(SurfaceMesh),
    PointCloud(PointCloud),
    /// Consecutive pairs triangulate into quads.
    Region { pairs: Vec<PointPair> },
}
