use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use plotgen::core::cache::EvalCache;
use plotgen::core::expression::parse;
use plotgen::plot3d::region::{cylindrical_pairs, spherical_pairs, volume_pairs};
use plotgen::validate::{CompiledBound, CompiledBounds};

fn no_bounds() -> CompiledBounds {
    CompiledBounds::default()
}

#[test]
fn volume_pairs_against_xy_plane() {
    crate::setup();
    let f = parse("x + y", &["x", "y"]).unwrap();
    let mut cache = EvalCache::default();

    let pairs = volume_pairs(
        &f,
        None,
        &no_bounds(),
        [0f64, 1f64],
        [0f64, 1f64],
        1,
        &mut cache,
    )
    .unwrap();
    assert_eq!(pairs.len(), 4);
    assert_eq!(pairs[3], [[1f64, 1f64, 2f64], [1f64, 1f64, 0f64]]);
    // Every baseline point sits on the plane under its surface point.
    for [top, bottom] in &pairs {
        assert_eq!(top[0], bottom[0]);
        assert_eq!(top[1], bottom[1]);
        assert_eq!(bottom[2], 0f64);
    }
}

#[test]
fn volume_between_two_surfaces() {
    let f = parse("2", &["x", "y"]).unwrap();
    let f2 = parse("x", &["x", "y"]).unwrap();
    let mut cache = EvalCache::default();

    let pairs = volume_pairs(
        &f,
        Some(&f2),
        &no_bounds(),
        [0f64, 1f64],
        [0f64, 1f64],
        1,
        &mut cache,
    )
    .unwrap();
    assert_eq!(pairs.len(), 4);
    assert_eq!(pairs[1], [[1f64, 0f64, 2f64], [1f64, 0f64, 1f64]]);
}

#[test]
fn volume_bounds_filter_y_by_x() {
    // Inner bound as a function of the outer axis: y <= x.
    let f = parse("1", &["x", "y"]).unwrap();
    let bounds = CompiledBounds {
        lower: None,
        upper: Some(CompiledBound::Expression(parse("x", &["x"]).unwrap())),
    };
    let mut cache = EvalCache::default();

    let pairs = volume_pairs(
        &f,
        None,
        &bounds,
        [0f64, 1f64],
        [0f64, 1f64],
        2,
        &mut cache,
    )
    .unwrap();
    // 3x3 grid; admitted samples have y <= x: (0,0), (.5,0), (1,0),
    // (.5,.5), (1,.5), (1,1).
    assert_eq!(pairs.len(), 6);
    for [top, _] in &pairs {
        assert!(top[1] <= top[0]);
    }
}

#[test]
fn non_finite_surface_sample_is_excluded() {
    let f = parse("sqrt(x)", &["x", "y"]).unwrap();
    let mut cache = EvalCache::default();

    let pairs = volume_pairs(
        &f,
        None,
        &no_bounds(),
        [-1f64, 1f64],
        [0f64, 1f64],
        2,
        &mut cache,
    )
    .unwrap();
    // x = -1 column of the 3x3 grid drops out.
    assert_eq!(pairs.len(), 6);
}

#[test]
fn cylindrical_maps_to_cartesian() {
    let z = parse("1", &["r", "theta"]).unwrap();
    let mut cache = EvalCache::default();

    let pairs = cylindrical_pairs(
        &z,
        &no_bounds(),
        [0f64, 1f64],
        [0f64, PI],
        1,
        &mut cache,
    )
    .unwrap();
    assert_eq!(pairs.len(), 4);
    // r = 1, theta = pi maps to (-1, 0).
    let [top, bottom] = pairs[3];
    assert_abs_diff_eq!(top[0], -1f64, epsilon = 1e-12);
    assert_abs_diff_eq!(top[1], 0f64, epsilon = 1e-12);
    assert_eq!(top[2], 1f64);
    assert_eq!(bottom[2], 0f64);
}

#[test]
fn cylindrical_bounds_filter_r_by_theta() {
    let z = parse("1", &["r", "theta"]).unwrap();
    let bounds = CompiledBounds {
        lower: None,
        upper: Some(CompiledBound::Literal(0.5)),
    };
    let mut cache = EvalCache::default();

    let pairs = cylindrical_pairs(
        &z,
        &bounds,
        [0f64, 1f64],
        [0f64, PI],
        2,
        &mut cache,
    )
    .unwrap();
    // r in {0, 0.5, 1}; only r <= 0.5 admitted, for each of 3 theta rows.
    assert_eq!(pairs.len(), 6);
}

#[test]
fn spherical_unit_sphere() {
    let rho = parse("1", &["theta", "phi"]).unwrap();
    let mut cache = EvalCache::default();

    let pairs = spherical_pairs(
        &rho,
        &no_bounds(),
        [0f64, 2f64 * PI],
        [0f64, PI],
        8,
        &mut cache,
    )
    .unwrap();
    assert_eq!(pairs.len(), 81);
    for [surface, origin] in &pairs {
        let len =
            (surface[0] * surface[0] + surface[1] * surface[1] + surface[2] * surface[2]).sqrt();
        assert_abs_diff_eq!(len, 1f64, epsilon = 1e-12);
        assert_eq!(*origin, [0f64, 0f64, 0f64]);
    }
}

#[test]
fn spherical_negative_radius_excluded() {
    let rho = parse("cos(phi)", &["theta", "phi"]).unwrap();
    let mut cache = EvalCache::default();

    let pairs = spherical_pairs(
        &rho,
        &no_bounds(),
        [0f64, 2f64 * PI],
        [0f64, PI],
        2,
        &mut cache,
    )
    .unwrap();
    // phi rows at 0 and pi/2 keep rho >= 0; the phi = pi row is negative.
    assert_eq!(pairs.len(), 6);
}
