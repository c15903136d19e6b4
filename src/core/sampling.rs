//! Evenly spaced parameter grids over closed intervals.

use crate::errors::GraphError;

fn check_interval(axis: &str, interval: [f64; 2]) -> Result<(), GraphError> {
    let [a, b] = interval;
    if !a.is_finite() || !b.is_finite() {
        return Err(GraphError::domain(
            axis,
            format!("endpoints must be finite, got [{a}, {b}]"),
        ));
    }
    if a > b {
        return Err(GraphError::domain(
            axis,
            format!("min {a} exceeds max {b}"),
        ));
    }
    Ok(())
}

/// Samples `count + 1` evenly spaced values over `[a, b]`, inclusive of both
/// endpoints. The last value is exactly `b` regardless of rounding.
///
/// * `axis` - Axis symbol, used only in error reports
/// * `interval` - Closed interval `[min, max]`, both finite
/// * `count` - Subdivision count, at least 1
pub fn sample1d(axis: &str, interval: [f64; 2], count: usize) -> Result<Vec<f64>, GraphError> {
    check_interval(axis, interval)?;
    if count < 1 {
        return Err(GraphError::domain(axis, "sample count must be at least 1"));
    }
    let [a, b] = interval;
    let step = (b - a) / count as f64;
    let mut xv: Vec<f64> = (0..=count).map(|i| a + step * i as f64).collect();
    xv[count] = b;
    Ok(xv)
}

/// The axis vectors of a `(count + 1) x (count + 1)` sampling grid.
pub fn sample2d(
    axis_x: &str,
    interval_x: [f64; 2],
    axis_y: &str,
    interval_y: [f64; 2],
    count: usize,
) -> Result<(Vec<f64>, Vec<f64>), GraphError> {
    let xv = sample1d(axis_x, interval_x, count)?;
    let yv = sample1d(axis_y, interval_y, count)?;
    Ok((xv, yv))
}
