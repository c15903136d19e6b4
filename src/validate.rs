//! The validation gate between a raw [`PlotSpec`] and generation.
//!
//! [`compile`] rejects structurally invalid specs (missing domain axes or
//! expression slots, unusable intervals or resolutions, expression syntax
//! errors) before any sampling begins, and parses every expression exactly
//! once so generators never re-parse source text.

use crate::core::cache::EvalCache;
use crate::core::expression::{parse, Expression};
use crate::errors::{EvalError, GraphError};
use crate::spec::{axes, slots, Bound, IntegralSpec, PlotKind, PlotSpec};

/// A compiled integral bound, evaluated per sample at one free variable.
#[derive(Debug, Clone)]
pub enum CompiledBound {
    Literal(f64),
    Expression(Expression),
}

impl CompiledBound {
    /// The bound's value at `x`. Non-finite results are returned as values;
    /// the region builders exclude the affected sample.
    pub fn eval_at(&self, x: f64, cache: &mut EvalCache) -> Result<f64, EvalError> {
        match self {
            CompiledBound::Literal(v) => Ok(*v),
            CompiledBound::Expression(expr) => cache.eval(expr, &[x]),
        }
    }
}

/// Compiled lower/upper bounds acting as an inclusion filter. An absent
/// bound admits every sample.
#[derive(Debug, Clone, Default)]
pub struct CompiledBounds {
    pub lower: Option<CompiledBound>,
    pub upper: Option<CompiledBound>,
}

impl CompiledBounds {
    /// Whether `value` lies within the bounds evaluated at `at`. A bound
    /// that evaluates non-finite excludes the sample entirely.
    pub fn admits(&self, at: f64, value: f64, cache: &mut EvalCache) -> Result<bool, EvalError> {
        if let Some(lower) = &self.lower {
            let lo = lower.eval_at(at, cache)?;
            if !lo.is_finite() || value < lo {
                return Ok(false);
            }
        }
        if let Some(upper) = &self.upper {
            let hi = upper.eval_at(at, cache)?;
            if !hi.is_finite() || value > hi {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// A fully validated plot with parsed expressions, ready for sampling.
#[derive(Debug, Clone)]
pub enum CompiledPlot {
    Explicit {
        y_of_x: Expression,
        x: [f64; 2],
    },
    Parametric {
        x_of_t: Expression,
        y_of_t: Expression,
        t: [f64; 2],
    },
    Polar {
        r_of_theta: Expression,
        theta: [f64; 2],
    },
    /// Shaded area between a curve and the x axis, or between two curves.
    Area {
        f: Expression,
        f2: Option<Expression>,
        bounds: CompiledBounds,
        x: [f64; 2],
    },
    Surface {
        z: Expression,
        x: [f64; 2],
        y: [f64; 2],
    },
    /// Shaded volume between a surface and the xy plane, or two surfaces.
    Volume {
        f: Expression,
        f2: Option<Expression>,
        bounds: CompiledBounds,
        x: [f64; 2],
        y: [f64; 2],
    },
    Cylindrical {
        z: Expression,
        bounds: CompiledBounds,
        r: [f64; 2],
        theta: [f64; 2],
    },
    Spherical {
        rho: Expression,
        bounds: CompiledBounds,
        theta: [f64; 2],
        phi: [f64; 2],
    },
}

impl CompiledPlot {
    /// Whether generation produces a triangulated mesh subject to the LOD
    /// triangle cap.
    pub fn is_mesh(&self) -> bool {
        matches!(self, CompiledPlot::Surface { .. })
    }
}

fn interval(plot: &PlotSpec, axis: &str) -> Result<[f64; 2], GraphError> {
    let iv = *plot
        .domain
        .get(axis)
        .ok_or_else(|| GraphError::domain(axis, "missing domain interval"))?;
    let [a, b] = iv;
    if !a.is_finite() || !b.is_finite() {
        return Err(GraphError::domain(
            axis,
            format!("endpoints must be finite, got [{a}, {b}]"),
        ));
    }
    if a > b {
        return Err(GraphError::domain(axis, format!("min {a} exceeds max {b}")));
    }
    Ok(iv)
}

fn slot_expr(
    plot: &PlotSpec,
    slot: &'static str,
    vars: &[&str],
) -> Result<Expression, GraphError> {
    let source = plot
        .expressions
        .get(slot)
        .ok_or_else(|| GraphError::MissingExpressionSlot {
            kind: plot.kind.to_string(),
            slot,
        })?;
    parse(source, vars).map_err(|e| GraphError::parse(slot, e))
}

fn integral_spec(plot: &PlotSpec) -> Result<&IntegralSpec, GraphError> {
    plot.integral
        .as_ref()
        .ok_or_else(|| GraphError::MissingExpressionSlot {
            kind: plot.kind.to_string(),
            slot: "integral.function",
        })
}

fn compile_bound(
    bound: &Option<Bound>,
    slot: &'static str,
    var: &str,
) -> Result<Option<CompiledBound>, GraphError> {
    match bound {
        None => Ok(None),
        Some(Bound::Literal(v)) => Ok(Some(CompiledBound::Literal(*v))),
        Some(Bound::Expression(source)) => {
            let expr = parse(source, &[var]).map_err(|e| GraphError::parse(slot, e))?;
            Ok(Some(CompiledBound::Expression(expr)))
        }
    }
}

fn compile_bounds(integ: &IntegralSpec, var: &str) -> Result<CompiledBounds, GraphError> {
    Ok(CompiledBounds {
        lower: compile_bound(&integ.lower_bound, "integral.lowerBound", var)?,
        upper: compile_bound(&integ.upper_bound, "integral.upperBound", var)?,
    })
}

fn integral_function(integ: &IntegralSpec, vars: &[&str]) -> Result<Expression, GraphError> {
    parse(&integ.function, vars).map_err(|e| GraphError::parse("integral.function", e))
}

fn integral_functions(
    integ: &IntegralSpec,
    kind: PlotKind,
    vars: &[&str],
) -> Result<(Expression, Option<Expression>), GraphError> {
    let f = integral_function(integ, vars)?;
    let f2 = match (&integ.function2, integ.between_functions) {
        (Some(source), true) => Some(
            parse(source, vars).map_err(|e| GraphError::parse("integral.function2", e))?,
        ),
        // betweenFunctions without a second function is structurally
        // incomplete, not an area against the axis.
        (None, true) => {
            return Err(GraphError::MissingExpressionSlot {
                kind: kind.to_string(),
                slot: "integral.function2",
            })
        }
        _ => None,
    };
    Ok((f, f2))
}

/// Validates `plot` and compiles it into a [`CompiledPlot`].
///
/// Structural failures abort with a typed [`GraphError`]; no generator runs
/// and no partial geometry is produced.
pub fn compile(plot: &PlotSpec) -> Result<CompiledPlot, GraphError> {
    if let Some(res) = plot.resolution {
        if res < 1 {
            return Err(GraphError::domain(
                "resolution",
                "sample count must be at least 1",
            ));
        }
    }

    match plot.kind {
        PlotKind::Explicit2D => Ok(CompiledPlot::Explicit {
            y_of_x: slot_expr(plot, slots::Y_OF_X, &[axes::X])?,
            x: interval(plot, axes::X)?,
        }),
        PlotKind::Parametric2D => Ok(CompiledPlot::Parametric {
            x_of_t: slot_expr(plot, slots::X_OF_T, &[axes::T])?,
            y_of_t: slot_expr(plot, slots::Y_OF_T, &[axes::T])?,
            t: interval(plot, axes::T)?,
        }),
        PlotKind::Polar2D => Ok(CompiledPlot::Polar {
            r_of_theta: slot_expr(plot, slots::R_OF_THETA, &[axes::THETA])?,
            theta: interval(plot, axes::THETA)?,
        }),
        PlotKind::Integral2D => {
            let integ = integral_spec(plot)?;
            let (f, f2) = integral_functions(integ, plot.kind, &[axes::X])?;
            Ok(CompiledPlot::Area {
                f,
                f2,
                bounds: compile_bounds(integ, axes::X)?,
                x: interval(plot, axes::X)?,
            })
        }
        PlotKind::Surface3D => Ok(CompiledPlot::Surface {
            z: slot_expr(plot, slots::SURFACE_Z, &[axes::X, axes::Y])?,
            x: interval(plot, axes::X)?,
            y: interval(plot, axes::Y)?,
        }),
        PlotKind::Integral3D => {
            let integ = integral_spec(plot)?;
            let (f, f2) = integral_functions(integ, plot.kind, &[axes::X, axes::Y])?;
            Ok(CompiledPlot::Volume {
                f,
                f2,
                bounds: compile_bounds(integ, axes::X)?,
                x: interval(plot, axes::X)?,
                y: interval(plot, axes::Y)?,
            })
        }
        PlotKind::CylindricalIntegral => {
            // The z expression lives in the cylindricalZ slot or in
            // integral.function; either spelling is accepted.
            let z = match plot.expressions.get(slots::CYLINDRICAL_Z) {
                Some(_) => slot_expr(plot, slots::CYLINDRICAL_Z, &[axes::R, axes::THETA])?,
                None => integral_function(integral_spec(plot)?, &[axes::R, axes::THETA])?,
            };
            let bounds = match &plot.integral {
                Some(integ) => compile_bounds(integ, axes::THETA)?,
                None => CompiledBounds::default(),
            };
            Ok(CompiledPlot::Cylindrical {
                z,
                bounds,
                r: interval(plot, axes::R)?,
                theta: interval(plot, axes::THETA)?,
            })
        }
        PlotKind::SphericalIntegral => {
            let integ = integral_spec(plot)?;
            let rho = integral_function(integ, &[axes::THETA, axes::PHI])?;
            Ok(CompiledPlot::Spherical {
                rho,
                bounds: compile_bounds(integ, axes::THETA)?,
                theta: interval(plot, axes::THETA)?,
                phi: interval(plot, axes::PHI)?,
            })
        }
    }
}
