//! Point pairs shading the area under or between 2D curves.

use log::debug;

use crate::core::cache::EvalCache;
use crate::core::expression::Expression;
use crate::core::sampling::sample1d;
use crate::errors::GraphError;
use crate::geometry::PointPair;
use crate::spec::axes;
use crate::validate::CompiledBounds;

/// One pair per admitted x sample: `[(x, f(x), 0), (x, 0, 0)]`, or
/// `[(x, f(x), 0), (x, f2(x), 0)]` when shading between two curves.
///
/// The bounds act as an inclusion filter on x; a sample is excluded when a
/// bound or function value evaluates non-finite. Consumers triangulate
/// consecutive pairs into quads, so order follows the x traversal.
pub fn area_pairs(
    f: &Expression,
    f2: Option<&Expression>,
    bounds: &CompiledBounds,
    x: [f64; 2],
    count: usize,
    cache: &mut EvalCache,
) -> Result<Vec<PointPair>, GraphError> {
    let xv = sample1d(axes::X, x, count)?;
    let mut pairs = Vec::with_capacity(xv.len());
    let mut dropped = 0usize;
    for x in xv {
        if !bounds.admits(x, x, cache)? {
            dropped += 1;
            continue;
        }
        let y = cache.eval(f, &[x])?;
        if !y.is_finite() {
            dropped += 1;
            continue;
        }
        let baseline = match f2 {
            Some(f2) => {
                let y2 = cache.eval(f2, &[x])?;
                if !y2.is_finite() {
                    dropped += 1;
                    continue;
                }
                y2
            }
            None => 0.0,
        };
        pairs.push([[x, y, 0.0], [x, baseline, 0.0]]);
    }
    if dropped > 0 {
        debug!("area region: excluded {dropped} sample(s)");
    }
    Ok(pairs)
}
