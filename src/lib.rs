//! Geometry generation for mathematical plots.
//!
//! A [`spec::GraphSpec`] describes one plot: an explicit, parametric or polar
//! curve, a 3D surface, or an integral region between curves/surfaces. The
//! [`engine::GraphEngine`] validates the spec, derives an effective sampling
//! resolution from the current [`spec::LodState`], and produces renderer-ready
//! [`geometry::GraphGeometry`] (ordered point sequences, triangulated meshes
//! with per-corner normals, or point-pair regions).
//!
//! Expressions are parsed once into an AST and interpreted; user-supplied
//! source never becomes executable code.

pub mod core;
pub mod engine;
pub mod errors;
pub mod geometry;
pub mod lod;
pub mod plot2d;
pub mod plot3d;
pub mod spec;
pub mod validate;
