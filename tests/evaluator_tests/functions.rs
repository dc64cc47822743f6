use super::*;
use std::f64::consts::{E, PI};

fn eval(input: &str, x: f64) -> f64 {
  compile_and_evaluate(input, x).unwrap()
}

fn assert_close(actual: f64, expected: f64) {
  assert!(
    (actual - expected).abs() < 1e-12,
    "expected {expected}, got {actual}"
  );
}

mod trigonometric {
  use super::*;

  #[test]
  fn sin_cos_tan() {
    assert_eq!(eval("sin(0)", 0.0), 0.0);
    assert_eq!(eval("cos(x)", 0.0), 1.0);
    assert_close(eval("tan(pi/4)", 0.0), 1.0);
  }

  #[test]
  fn pythagorean_identity() {
    for x in [-3.0, -0.5, 0.0, 1.0, 2.5] {
      assert_close(eval("sin(x)^2 + cos(x)^2", x), 1.0);
    }
  }

  #[test]
  fn inverse_functions() {
    assert_close(eval("asin(1)", 0.0), PI / 2.0);
    assert_close(eval("acos(1)", 0.0), 0.0);
    assert_close(eval("atan(1)", 0.0), PI / 4.0);
    assert_close(eval("arctan(1)", 0.0), PI / 4.0);
  }

  #[test]
  fn hyperbolic() {
    assert_eq!(eval("sinh(0)", 0.0), 0.0);
    assert_eq!(eval("cosh(0)", 0.0), 1.0);
    assert_eq!(eval("tanh(0)", 0.0), 0.0);
  }
}

mod exponential {
  use super::*;

  #[test]
  fn exp_and_logs() {
    assert_eq!(eval("exp(0)", 0.0), 1.0);
    assert_close(eval("ln(e)", 0.0), 1.0);
    assert_close(eval("log(e^2)", 0.0), 2.0);
    assert_close(eval("log10(1000)", 0.0), 3.0);
    assert_eq!(eval("log2(8)", 0.0), 3.0);
    assert_close(eval("log(81, 3)", 0.0), 4.0);
  }

  #[test]
  fn roots_and_abs() {
    assert_eq!(eval("sqrt(16)", 0.0), 4.0);
    assert_close(eval("cbrt(-27)", 0.0), -3.0);
    assert_eq!(eval("abs(x)", -2.5), 2.5);
  }

  #[test]
  fn constants() {
    assert_eq!(eval("pi", 0.0), PI);
    assert_eq!(eval("π", 0.0), PI);
    assert_eq!(eval("e", 0.0), E);
    assert_eq!(eval("tau", 0.0), 2.0 * PI);
    assert_eq!(eval("2pi", 0.0), 2.0 * PI);
  }

  #[test]
  fn implicit_coefficient_on_call() {
    assert_close(eval("2sin(x)", PI / 2.0), 2.0);
  }

  #[test]
  fn negative_base_with_integer_exponent() {
    assert_eq!(eval("x^3", -2.0), -8.0);
    assert_eq!(eval("x^2", -2.0), 4.0);
  }
}
