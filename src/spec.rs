//! The serialized graph specification contract.
//!
//! A [`GraphSpec`] arrives from the editor layer as a JSON-compatible
//! structure, is validated once, and is treated as an immutable snapshot: any
//! edit replaces the whole spec. Unknown keys in the `domain` and
//! `expressions` maps are ignored, not errors; `BTreeMap` keeps their
//! serialization order deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Expression slot names, keyed by [`PlotKind`].
pub mod slots {
    pub const Y_OF_X: &str = "yOfX";
    pub const X_OF_T: &str = "xOfT";
    pub const Y_OF_T: &str = "yOfT";
    pub const R_OF_THETA: &str = "rOfTheta";
    pub const SURFACE_Z: &str = "surfaceZ";
    pub const CYLINDRICAL_Z: &str = "cylindricalZ";
}

/// Domain axis symbols.
pub mod axes {
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const T: &str = "t";
    pub const R: &str = "r";
    pub const THETA: &str = "theta";
    pub const PHI: &str = "phi";
}

/// The complete description of one graph. Non-mathematical variants are out
/// of engine scope and pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GraphSpec {
    Mathematical(PlotSpec),
    Chart(serde_json::Value),
    Statistical(serde_json::Value),
}

impl GraphSpec {
    /// The mathematical plot payload, if this spec carries one.
    pub fn plot(&self) -> Option<&PlotSpec> {
        match self {
            GraphSpec::Mathematical(plot) => Some(plot),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlotKind {
    #[serde(rename = "2d_explicit")]
    Explicit2D,
    #[serde(rename = "2d_parametric")]
    Parametric2D,
    #[serde(rename = "2d_polar")]
    Polar2D,
    #[serde(rename = "2d_integral")]
    Integral2D,
    #[serde(rename = "3d_surface")]
    Surface3D,
    #[serde(rename = "3d_integral")]
    Integral3D,
    #[serde(rename = "cylindrical_integral")]
    CylindricalIntegral,
    #[serde(rename = "spherical_integral")]
    SphericalIntegral,
}

impl PlotKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PlotKind::Explicit2D => "2d_explicit",
            PlotKind::Parametric2D => "2d_parametric",
            PlotKind::Polar2D => "2d_polar",
            PlotKind::Integral2D => "2d_integral",
            PlotKind::Surface3D => "3d_surface",
            PlotKind::Integral3D => "3d_integral",
            PlotKind::CylindricalIntegral => "cylindrical_integral",
            PlotKind::SphericalIntegral => "spherical_integral",
        }
    }

    /// Per-axis sample count used when the spec leaves `resolution` unset.
    pub fn default_resolution(self) -> usize {
        match self {
            PlotKind::Explicit2D
            | PlotKind::Parametric2D
            | PlotKind::Polar2D
            | PlotKind::Integral2D => 200,
            PlotKind::Surface3D
            | PlotKind::Integral3D
            | PlotKind::CylindricalIntegral
            | PlotKind::SphericalIntegral => 64,
        }
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mathematical plot: kind, sampling domain, expression sources, optional
/// integral sub-spec, and display style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotSpec {
    pub kind: PlotKind,
    /// Axis symbol to closed interval `[min, max]`.
    #[serde(default)]
    pub domain: BTreeMap<String, [f64; 2]>,
    /// Slot name (see [`slots`]) to expression source.
    #[serde(default)]
    pub expressions: BTreeMap<String, String>,
    /// Sample count per axis; defaults per kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integral: Option<IntegralSpec>,
    #[serde(default)]
    pub style: PlotStyle,
}

impl PlotSpec {
    pub fn new(kind: PlotKind) -> Self {
        Self {
            kind,
            domain: BTreeMap::new(),
            expressions: BTreeMap::new(),
            resolution: None,
            integral: None,
            style: PlotStyle::default(),
        }
    }

    /// The base resolution before any LOD scaling.
    pub fn base_resolution(&self) -> usize {
        self.resolution.unwrap_or_else(|| self.kind.default_resolution())
    }
}

/// An integral bound: a literal number, or an expression in one free
/// variable evaluated per sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bound {
    Literal(f64),
    Expression(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegralSpec {
    /// The integrand curve/surface expression.
    pub function: String,
    /// Second curve/surface when shading between two functions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<Bound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<Bound>,
    #[serde(default)]
    pub between_functions: bool,
    #[serde(default = "default_true")]
    pub show_area: bool,
    #[serde(default = "default_area_color")]
    pub area_color: String,
    #[serde(default = "default_area_opacity")]
    pub area_opacity: f64,
}

fn default_true() -> bool {
    true
}

fn default_area_color() -> String {
    "#3b82f6".to_string()
}

fn default_area_opacity() -> f64 {
    0.35
}

/// Explicit display configuration; the engine never reads ambient theme
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlotStyle {
    pub color: String,
    pub line_width: f64,
    pub show_grid: bool,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            color: "#2563eb".to_string(),
            line_width: 2.0,
            show_grid: true,
        }
    }
}

/// Per-render-session level-of-detail inputs, reported by the renderer and
/// consumed read-only by generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LodState {
    pub zoom: f64,
    pub visible_graphs: usize,
    pub smoothed_fps: f64,
}

impl Default for LodState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            visible_graphs: 1,
            smoothed_fps: 60.0,
        }
    }
}

/// Camera snapshot from the renderer. The engine only reads `zoom` and the
/// position for LOD classification; it never mutates camera state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 10.0],
            rotation: [0.0, 0.0, 0.0],
            zoom: 1.0,
        }
    }
}
