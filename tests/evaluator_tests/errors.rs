use super::*;

fn domain_error(input: &str, x: f64) -> bool {
  matches!(
    compile_and_evaluate(input, x),
    Err(MathError::Evaluation(EvalError::Domain(_)))
  )
}

fn parse_error(input: &str) -> bool {
  matches!(compile_and_evaluate(input, 0.0), Err(MathError::Parse(_)))
}

mod parse_errors {
  use super::*;

  #[test]
  fn empty_input() {
    assert!(parse_error(""));
    assert!(parse_error("   "));
  }

  #[test]
  fn unbalanced_parentheses() {
    assert!(parse_error("(x + 1"));
    assert!(parse_error("x + 1)"));
    assert!(parse_error("sin(x"));
  }

  #[test]
  fn unknown_tokens() {
    assert!(parse_error("x $ 1"));
    assert!(parse_error("x + y"));
    assert!(parse_error("foo(x)"));
  }

  #[test]
  fn function_without_arguments() {
    assert!(parse_error("sin"));
    assert!(parse_error("sin + 1"));
  }

  #[test]
  fn wrong_arity() {
    assert!(parse_error("sin(x, 2)"));
    assert!(parse_error("log(x, 2, 3)"));
  }

  #[test]
  fn number_after_number() {
    assert!(parse_error("2 3"));
    assert!(parse_error("1.5.2"));
    assert!(parse_error("-2 3"));
    assert!(parse_error("x^2 3"));
    assert!(parse_error("x² 3"));
    assert!(parse_error("1/2 3"));
  }

  #[test]
  fn literal_out_of_range() {
    assert!(parse_error("1e400"));
  }

  #[test]
  fn reports_column() {
    let err = compile("x + $").unwrap_err();
    assert_eq!(err.column, Some(5));
    assert!(err.message.contains('$'), "message: {}", err.message);

    let err = compile("x + y").unwrap_err();
    assert_eq!(err.column, Some(5));
    assert!(err.message.contains("`y`"), "message: {}", err.message);
  }

  #[test]
  fn reports_end_of_input() {
    let err = compile("(x + 1").unwrap_err();
    assert!(
      err.message.starts_with("unexpected end of input"),
      "message: {}",
      err.message
    );
  }

  #[test]
  fn valid_but_undefined_input_compiles() {
    assert!(compile("sqrt(-1)").is_ok());
    assert!(compile("1/0").is_ok());
    assert!(compile("log(0)").is_ok());
  }
}

mod domain_errors {
  use super::*;

  #[test]
  fn sqrt_of_negative() {
    assert!(domain_error("sqrt(-1)", 0.0));
    assert!(domain_error("sqrt(x)", -4.0));
  }

  #[test]
  fn division_by_zero() {
    assert!(domain_error("1/x", 0.0));
    assert!(domain_error("1/(x - 2)", 2.0));
  }

  #[test]
  fn logarithm_of_non_positive() {
    assert!(domain_error("ln(x)", 0.0));
    assert!(domain_error("log(x)", -1.0));
    assert!(domain_error("log10(0)", 0.0));
    assert!(domain_error("log(8, 1)", 0.0));
    assert!(domain_error("log(8, -2)", 0.0));
  }

  #[test]
  fn inverse_trig_out_of_range() {
    assert!(domain_error("asin(2)", 0.0));
    assert!(domain_error("acos(x)", -1.5));
  }

  #[test]
  fn powers() {
    assert!(domain_error("0^-1", 0.0));
    assert!(domain_error("x^0.5", -4.0));
  }

  #[test]
  fn non_finite_binding() {
    assert!(domain_error("x", f64::NAN));
    assert!(domain_error("x + 1", f64::INFINITY));
  }

  #[test]
  fn failure_is_never_zero() {
    let result = compile_and_evaluate("1/x", 0.0);
    assert!(result.is_err());
    assert_ne!(result, Ok(0.0));
  }
}

mod overflow {
  use super::*;

  #[test]
  fn exponential_overflow() {
    assert_eq!(
      compile_and_evaluate("exp(x)", 1000.0),
      Err(MathError::Evaluation(EvalError::Overflow))
    );
  }

  #[test]
  fn product_overflow() {
    assert_eq!(
      compile_and_evaluate("x * 1e308 * 10", 1.0),
      Err(MathError::Evaluation(EvalError::Overflow))
    );
    assert_eq!(
      compile_and_evaluate("10^400", 0.0),
      Err(MathError::Evaluation(EvalError::Overflow))
    );
  }

  #[test]
  fn distinct_from_domain_error() {
    let overflow = compile_and_evaluate("exp(1000)", 0.0).unwrap_err();
    let domain = compile_and_evaluate("sqrt(-1)", 0.0).unwrap_err();
    let parse = compile_and_evaluate("", 0.0).unwrap_err();
    assert_ne!(overflow, domain);
    assert!(matches!(parse, MathError::Parse(_)));
    assert!(matches!(domain, MathError::Evaluation(EvalError::Domain(_))));
  }
}
