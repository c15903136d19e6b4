use plotgen::core::sampling::{sample1d, sample2d};
use plotgen::errors::GraphError;

use crate::test_helpers::assert_float_iters_equal;

#[test]
fn six_evenly_spaced_values() {
    let xv = sample1d("x", [0f64, 10f64], 5).unwrap();
    assert_float_iters_equal(
        xv.into_iter(),
        [0f64, 2f64, 4f64, 6f64, 8f64, 10f64].into_iter(),
        1e-12,
    );
}

#[test]
fn endpoints_are_exact() {
    let xv = sample1d("x", [0.1, 0.7], 7).unwrap();
    assert_eq!(xv.len(), 8);
    assert_eq!(xv[0], 0.1);
    assert_eq!(xv[7], 0.7);
}

#[test]
fn single_subdivision() {
    let xv = sample1d("x", [-1f64, 1f64], 1).unwrap();
    assert_eq!(xv, vec![-1f64, 1f64]);
}

#[test]
fn degenerate_interval() {
    let xv = sample1d("x", [2f64, 2f64], 3).unwrap();
    assert_eq!(xv, vec![2f64; 4]);
}

#[test]
fn inverted_interval_rejected() {
    assert!(matches!(
        sample1d("x", [1f64, 0f64], 4),
        Err(GraphError::InvalidDomain { .. })
    ));
}

#[test]
fn non_finite_endpoint_rejected() {
    assert!(matches!(
        sample1d("x", [0f64, f64::INFINITY], 4),
        Err(GraphError::InvalidDomain { .. })
    ));
    assert!(matches!(
        sample1d("x", [f64::NAN, 1f64], 4),
        Err(GraphError::InvalidDomain { .. })
    ));
}

#[test]
fn zero_count_rejected() {
    assert!(matches!(
        sample1d("x", [0f64, 1f64], 0),
        Err(GraphError::InvalidDomain { .. })
    ));
}

#[test]
fn grid_axis_vectors() {
    let (xv, yv) = sample2d("x", [0f64, 1f64], "y", [-1f64, 1f64], 2).unwrap();
    assert_eq!(xv, vec![0f64, 0.5, 1f64]);
    assert_eq!(yv, vec![-1f64, 0f64, 1f64]);
}

#[test]
fn grid_propagates_axis_errors() {
    match sample2d("x", [0f64, 1f64], "y", [3f64, 2f64], 2) {
        Err(GraphError::InvalidDomain { axis, .. }) => assert_eq!(axis, "y"),
        other => panic!("expected InvalidDomain for y, got {other:?}"),
    }
}

#[test]
fn deterministic() {
    let a = sample1d("t", [-3.5, 7.25], 33).unwrap();
    let b = sample1d("t", [-3.5, 7.25], 33).unwrap();
    assert_eq!(a, b);
}
