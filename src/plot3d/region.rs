//! Point pairs shading the volume between surfaces and a base.
//!
//! Each builder walks a 2D parameter grid and pairs a surface point with a
//! baseline point (the xy plane, a second surface, or the origin). Bounds
//! are expressions in the outer axis filtering the inner axis, the same
//! inner-bounds-as-function-of-outer convention used by nested integration.

use log::debug;

use crate::core::cache::EvalCache;
use crate::core::expression::Expression;
use crate::core::sampling::sample2d;
use crate::errors::GraphError;
use crate::geometry::PointPair;
use crate::spec::axes;
use crate::validate::CompiledBounds;

/// One pair per admitted (x, y) grid sample: `[(x, y, f(x,y)), (x, y, 0)]`,
/// or the two-surface form when `f2` is given. Bounds evaluated at x filter
/// y; non-finite values exclude the sample.
pub fn volume_pairs(
    f: &Expression,
    f2: Option<&Expression>,
    bounds: &CompiledBounds,
    x: [f64; 2],
    y: [f64; 2],
    count: usize,
    cache: &mut EvalCache,
) -> Result<Vec<PointPair>, GraphError> {
    let (xv, yv) = sample2d(axes::X, x, axes::Y, y, count)?;
    let mut pairs = Vec::with_capacity(xv.len() * yv.len());
    let mut dropped = 0usize;
    for &y in &yv {
        for &x in &xv {
            if !bounds.admits(x, y, cache)? {
                dropped += 1;
                continue;
            }
            let z = cache.eval(f, &[x, y])?;
            if !z.is_finite() {
                dropped += 1;
                continue;
            }
            let base = match f2 {
                Some(f2) => {
                    let z2 = cache.eval(f2, &[x, y])?;
                    if !z2.is_finite() {
                        dropped += 1;
                        continue;
                    }
                    z2
                }
                None => 0.0,
            };
            pairs.push([[x, y, z], [x, y, base]]);
        }
    }
    log_dropped("volume", dropped);
    Ok(pairs)
}

/// Pairs over an (r, theta) grid for `z = f(r, theta)`, mapped to Cartesian:
/// `[(r cos t, r sin t, z), (r cos t, r sin t, 0)]`. Bounds evaluated at
/// theta filter r.
pub fn cylindrical_pairs(
    z: &Expression,
    bounds: &CompiledBounds,
    r: [f64; 2],
    theta: [f64; 2],
    count: usize,
    cache: &mut EvalCache,
) -> Result<Vec<PointPair>, GraphError> {
    let (rv, thetav) = sample2d(axes::R, r, axes::THETA, theta, count)?;
    let mut pairs = Vec::with_capacity(rv.len() * thetav.len());
    let mut dropped = 0usize;
    for &theta in &thetav {
        for &r in &rv {
            if !bounds.admits(theta, r, cache)? {
                dropped += 1;
                continue;
            }
            let z = cache.eval(z, &[r, theta])?;
            if !z.is_finite() {
                dropped += 1;
                continue;
            }
            let (x, y) = (r * theta.cos(), r * theta.sin());
            pairs.push([[x, y, z], [x, y, 0.0]]);
        }
    }
    log_dropped("cylindrical", dropped);
    Ok(pairs)
}

/// Pairs over a (theta, phi) grid for `rho = f(theta, phi)`, pairing each
/// surface point with the origin. Bounds evaluated at theta filter rho;
/// negative radii are excluded like non-finite ones.
pub fn spherical_pairs(
    rho: &Expression,
    bounds: &CompiledBounds,
    theta: [f64; 2],
    phi: [f64; 2],
    count: usize,
    cache: &mut EvalCache,
) -> Result<Vec<PointPair>, GraphError> {
    let (thetav, phiv) = sample2d(axes::THETA, theta, axes::PHI, phi, count)?;
    let mut pairs = Vec::with_capacity(thetav.len() * phiv.len());
    let mut dropped = 0usize;
    for &phi in &phiv {
        for &theta in &thetav {
            let rho = cache.eval(rho, &[theta, phi])?;
            if !rho.is_finite() || rho < 0.0 || !bounds.admits(theta, rho, cache)? {
                dropped += 1;
                continue;
            }
            let surface = [
                rho * phi.sin() * theta.cos(),
                rho * phi.sin() * theta.sin(),
                rho * phi.cos(),
            ];
            pairs.push([surface, [0.0, 0.0, 0.0]]);
        }
    }
    log_dropped("spherical", dropped);
    Ok(pairs)
}

fn log_dropped(kind: &str, dropped: usize) {
    if dropped > 0 {
        debug!("{kind} region: excluded {dropped} sample(s)");
    }
}
