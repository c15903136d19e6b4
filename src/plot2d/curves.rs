//! Ordered point sequences for 2D curves.
//!
//! Emitted points follow domain traversal order; consumers draw them as a
//! line strip. Samples whose evaluation is non-finite are omitted rather
//! than appended, so a curve may carry gaps.

use log::debug;

use crate::core::cache::EvalCache;
use crate::core::expression::Expression;
use crate::core::sampling::sample1d;
use crate::errors::GraphError;
use crate::spec::axes;

/// `(x, y(x), 0)` per sample over the x interval.
pub fn explicit_curve(
    y_of_x: &Expression,
    x: [f64; 2],
    count: usize,
    cache: &mut EvalCache,
) -> Result<Vec<[f64; 3]>, GraphError> {
    let xv = sample1d(axes::X, x, count)?;
    let mut points = Vec::with_capacity(xv.len());
    let mut dropped = 0usize;
    for x in xv {
        let y = cache.eval(y_of_x, &[x])?;
        if y.is_finite() {
            points.push([x, y, 0.0]);
        } else {
            dropped += 1;
        }
    }
    log_dropped("explicit", dropped);
    Ok(points)
}

/// `(x(t), y(t), 0)` per sample; a pair with either coordinate non-finite is
/// omitted.
pub fn parametric_curve(
    x_of_t: &Expression,
    y_of_t: &Expression,
    t: [f64; 2],
    count: usize,
    cache: &mut EvalCache,
) -> Result<Vec<[f64; 3]>, GraphError> {
    let tv = sample1d(axes::T, t, count)?;
    let mut points = Vec::with_capacity(tv.len());
    let mut dropped = 0usize;
    for t in tv {
        let x = cache.eval(x_of_t, &[t])?;
        let y = cache.eval(y_of_t, &[t])?;
        if x.is_finite() && y.is_finite() {
            points.push([x, y, 0.0]);
        } else {
            dropped += 1;
        }
    }
    log_dropped("parametric", dropped);
    Ok(points)
}

/// `(r cos(theta), r sin(theta), 0)` per sample. A negative radius means
/// "no point" here, not reflection through the origin, and is omitted like a
/// non-finite value.
pub fn polar_curve(
    r_of_theta: &Expression,
    theta: [f64; 2],
    count: usize,
    cache: &mut EvalCache,
) -> Result<Vec<[f64; 3]>, GraphError> {
    let thetav = sample1d(axes::THETA, theta, count)?;
    let mut points = Vec::with_capacity(thetav.len());
    let mut dropped = 0usize;
    for theta in thetav {
        let r = cache.eval(r_of_theta, &[theta])?;
        if r.is_finite() && r >= 0.0 {
            points.push([r * theta.cos(), r * theta.sin(), 0.0]);
        } else {
            dropped += 1;
        }
    }
    log_dropped("polar", dropped);
    Ok(points)
}

fn log_dropped(kind: &str, dropped: usize) {
    if dropped > 0 {
        debug!("{kind} curve: omitted {dropped} non-finite sample(s)");
    }
}
