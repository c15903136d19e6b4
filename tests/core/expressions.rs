use std::f64::consts::{E, PI};

use approx::assert_abs_diff_eq;
use plotgen::core::expression::parse;
use plotgen::errors::{EvalError, ParseError};

fn test_x(source: &str, input: f64, output: f64) {
    let expr = parse(source, &["x"]).unwrap();
    assert_abs_diff_eq!(expr.eval(&[input]).unwrap(), output, epsilon = 1e-13)
}

fn test_xy(source: &str, input: [f64; 2], output: f64) {
    let expr = parse(source, &["x", "y"]).unwrap();
    assert_abs_diff_eq!(expr.eval(&input).unwrap(), output, epsilon = 1e-13)
}

/* Evaluation */

#[test]
fn basic_expression() {
    test_x("x^2 - 5", 2f64, -1f64)
}

#[test]
fn double_star_power_alias() {
    test_x("x**2 - 5", 2f64, -1f64)
}

#[test]
fn signs() {
    test_x("-x*-2 +(-5)", 2f64, -1f64)
}

#[test]
fn named_elements() {
    test_x("sin((2*x)/ 4) - log(e)", PI, 0f64)
}

#[test]
fn constants_fold() {
    test_x("pi + e", 0f64, PI + E)
}

#[test]
fn two_vars() {
    test_xy("cos((2*x*y)/4)", [PI, 2f64], -1f64)
}

#[test]
fn exponents() {
    test_xy("log(e^(x+y**0))", [PI, 2f64], PI + 1f64)
}

#[test]
fn power_right_associative() {
    test_x("2^3^2", 0f64, 512f64)
}

#[test]
fn unary_minus_binds_looser_than_power() {
    test_x("-x^2", 3f64, -9f64)
}

#[test]
fn negative_exponent() {
    test_x("2^-2", 0f64, 0.25)
}

#[test]
fn binary_functions() {
    test_xy("min(x, y) + max(x, y) + pow(x, y)", [2f64, 3f64], 13f64)
}

#[test]
fn rounding_family() {
    test_x("floor(x) + ceil(x) + round(x)", 2.4, 7f64)
}

#[test]
fn scientific_literals() {
    test_x("1e2 + 2.5e-1 * x", 4f64, 101f64)
}

#[test]
fn constant_invariant_under_binding() {
    let expr = parse("2+2", &["x"]).unwrap();
    for x in [-10f64, 0f64, 3.7, 1e9] {
        assert_eq!(expr.eval(&[x]).unwrap(), 4f64);
    }
}

#[test]
fn sin_at_zero() {
    test_x("sin(x)", 0f64, 0f64)
}

#[test]
fn square() {
    test_x("x^2", 3f64, 9f64)
}

/* Numeric degradation stays a value, never an error */

#[test]
fn sqrt_of_negative_is_non_finite_value() {
    let expr = parse("sqrt(x)", &["x"]).unwrap();
    assert!(expr.eval(&[-1f64]).unwrap().is_nan());
}

#[test]
fn division_by_zero_is_non_finite_value() {
    let expr = parse("1/x", &["x"]).unwrap();
    assert!(expr.eval(&[0f64]).unwrap().is_infinite());
}

/* Parse errors */

#[test]
fn unknown_function_is_parse_error() {
    match parse("foo(x)", &["x"]) {
        Err(ParseError::UnknownIdentifier { name, position }) => {
            assert_eq!(name, "foo");
            assert_eq!(position, 0);
        }
        other => panic!("expected UnknownIdentifier, got {other:?}"),
    }
}

#[test]
fn unknown_variable_is_parse_error() {
    assert!(matches!(
        parse("x + q", &["x"]),
        Err(ParseError::UnknownIdentifier { .. })
    ));
}

#[test]
fn wrong_arity_is_parse_error() {
    assert!(matches!(
        parse("min(x)", &["x"]),
        Err(ParseError::WrongArity {
            name: "min",
            expected: 2,
            found: 1,
            ..
        })
    ));
}

#[test]
fn empty_source() {
    assert!(matches!(parse("   ", &["x"]), Err(ParseError::Empty)));
}

#[test]
fn unbalanced_parens() {
    assert!(matches!(
        parse("(x + 1", &["x"]),
        Err(ParseError::UnexpectedEnd)
    ));
}

#[test]
fn trailing_input() {
    assert!(matches!(
        parse("x + 1 2", &["x"]),
        Err(ParseError::TrailingInput { .. })
    ));
}

#[test]
fn stray_character() {
    assert!(matches!(
        parse("x + #", &["x"]),
        Err(ParseError::UnexpectedChar { .. })
    ));
}

#[test]
fn duplicate_variables_rejected() {
    assert!(matches!(
        parse("x", &["x", "x"]),
        Err(ParseError::DuplicateVariable { .. })
    ));
}

#[test]
fn three_variables_rejected() {
    assert!(matches!(
        parse("x", &["x", "y", "z"]),
        Err(ParseError::TooManyVariables { .. })
    ));
}

/* Binding contract */

#[test]
fn binding_mismatch_is_typed_error() {
    let expr = parse("x + 1", &["x"]).unwrap();
    assert_eq!(
        expr.eval(&[1f64, 2f64]),
        Err(EvalError::BindingMismatch {
            expected: 1,
            found: 2
        })
    );
}

#[test]
fn parse_is_deterministic() {
    let a = parse("sin(x) + x^2/3", &["x"]).unwrap();
    let b = parse("sin(x) + x^2/3", &["x"]).unwrap();
    for x in [-2f64, -0.5, 0f64, 1.25, 42f64] {
        assert_eq!(a.eval(&[x]).unwrap(), b.eval(&[x]).unwrap());
    }
}
