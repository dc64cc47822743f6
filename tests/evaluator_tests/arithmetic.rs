use super::*;

fn eval(input: &str, x: f64) -> f64 {
  compile_and_evaluate(input, x).unwrap()
}

mod arithmetic {
  use super::*;

  #[test]
  fn addition() {
    assert_eq!(eval("1 + 2", 0.0), 3.0);
    assert_eq!(eval("1 + 2 + 3", 0.0), 6.0);
    assert_eq!(eval("(1 + 2) + 3", 0.0), 6.0);
    assert_eq!(eval("1 + (2 + 3)", 0.0), 6.0);
  }

  #[test]
  fn subtraction() {
    assert_eq!(eval("3 - 1", 0.0), 2.0);
    assert_eq!(eval("7 - 3 - 1", 0.0), 3.0);
  }

  #[test]
  fn negative_numbers() {
    assert_eq!(eval("-1 + 3", 0.0), 2.0);
    assert_eq!(eval("2 - -1", 0.0), 3.0);
    assert_eq!(eval("+4", 0.0), 4.0);
  }

  #[test]
  fn complex_multiplication() {
    assert_eq!(eval("2 * 3 + 4 * 5", 0.0), 26.0);
  }

  #[test]
  fn division() {
    assert_eq!(eval("10 / 2", 0.0), 5.0);
    assert_eq!(eval("10 / 4", 0.0), 2.5);
    assert_eq!(eval("8 / 2 / 2", 0.0), 2.0);
  }

  #[test]
  fn power_is_right_associative() {
    assert_eq!(eval("2^3^2", 0.0), 512.0);
    assert_eq!(eval("(2^3)^2", 0.0), 64.0);
  }

  #[test]
  fn unary_minus_binds_looser_than_power() {
    assert_eq!(eval("-x^2", 3.0), -9.0);
    assert_eq!(eval("(-x)^2", 3.0), 9.0);
    assert_eq!(eval("2^-1", 0.0), 0.5);
  }

  #[test]
  fn decimals_and_scientific_notation() {
    assert_eq!(eval(".5 + 0.25", 0.0), 0.75);
    assert_eq!(eval("1e3", 0.0), 1000.0);
    assert_eq!(eval("2.5E-1", 0.0), 0.25);
  }
}

mod variable {
  use super::*;

  #[test]
  fn polynomial() {
    assert_eq!(eval("x^2 + 3x", 2.0), 10.0);
    assert_eq!(eval("3*x^2 + 2*x + 1", -1.0), 2.0);
  }

  #[test]
  fn implicit_multiplication() {
    assert_eq!(eval("2(x + 1)", 3.0), 8.0);
    assert_eq!(eval("(x + 1)(x - 1)", 3.0), 8.0);
    assert_eq!(eval("x(x + 1)", 3.0), 12.0);
    assert_eq!(eval("2x^2", 3.0), 18.0);
    assert_eq!(eval("x 2", 3.0), 6.0);
    assert_eq!(eval("sin(x)2", 0.0), 0.0);
  }

  #[test]
  fn number_over_number_is_a_coefficient() {
    assert_eq!(eval("1/2x", 2.0), 1.0);
    assert_eq!(eval("1 / 2 x", 2.0), 1.0);
    assert_eq!(eval("3/4(x + 1)", 3.0), 3.0);
    assert_eq!(eval("-1/2x", 4.0), -2.0);
    assert_eq!(eval("3/4/2x", 1.0), 1.5);
  }

  #[test]
  fn juxtaposed_divisor() {
    assert_eq!(eval("1/x 2", 2.0), 0.25);
    assert_eq!(eval("x/2x", 3.0), 0.5);
  }

  #[test]
  fn unicode_spellings() {
    assert_eq!(eval("x²", 4.0), 16.0);
    assert_eq!(eval("x³", 2.0), 8.0);
    assert_eq!(eval("6 × x", 2.0), 12.0);
    assert_eq!(eval("x ÷ 4", 2.0), 0.5);
    assert_eq!(eval("−x", 2.0), -2.0);
  }

  #[test]
  fn custom_variable_name() {
    let expression = mathsteps::Expression::compile_with_variable("3t + 1", "t").unwrap();
    assert_eq!(expression.variable(), "t");
    assert_eq!(expression.evaluate(2.0), Ok(7.0));
  }

  #[test]
  fn same_expression_many_bindings() {
    let expression = compile("x^2").unwrap();
    let values: Vec<f64> = [-2.0, -1.0, 0.0, 1.0, 2.0]
      .iter()
      .map(|&x| expression.evaluate(x).unwrap())
      .collect();
    assert_eq!(values, vec![4.0, 1.0, 0.0, 1.0, 4.0]);
  }

  #[test]
  fn shared_across_threads() {
    let expression = std::sync::Arc::new(compile("x^3 - x").unwrap());
    let handles: Vec<_> = (0..4)
      .map(|i| {
        let expression = std::sync::Arc::clone(&expression);
        std::thread::spawn(move || expression.evaluate(i as f64).unwrap())
      })
      .collect();
    let results: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![0.0, 0.0, 6.0, 24.0]);
  }
}
