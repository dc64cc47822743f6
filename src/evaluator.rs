use crate::syntax::{BinaryOperator, Expr, UnaryOperator};
use crate::EvalError;

/// Evaluate `expr` with the free variable bound to `x`.
///
/// Every intermediate value is checked: a NaN is reported as a domain
/// error and an infinity produced from finite operands as an overflow,
/// so a successful result is always finite.
pub fn evaluate(expr: &Expr, x: f64) -> Result<f64, EvalError> {
  if !x.is_finite() {
    return Err(EvalError::Domain(format!(
      "variable must be bound to a finite number, got {x}"
    )));
  }
  eval_node(expr, x)
}

fn eval_node(expr: &Expr, x: f64) -> Result<f64, EvalError> {
  match expr {
    Expr::Number(n) => Ok(*n),
    Expr::Variable(_) => Ok(x),
    Expr::Constant(c) => Ok(c.value()),
    Expr::UnaryOp {
      op: UnaryOperator::Minus,
      operand,
    } => Ok(-eval_node(operand, x)?),
    Expr::BinaryOp { op, left, right } => {
      let l = eval_node(left, x)?;
      let r = eval_node(right, x)?;
      let value = apply_binary(*op, l, r)?;
      check_finite(value, || format!("{l} {} {r}", op.symbol()))
    }
    Expr::FunctionCall { function, args } => {
      let values = args
        .iter()
        .map(|arg| eval_node(arg, x))
        .collect::<Result<Vec<_>, _>>()?;
      let value = function.apply(&values)?;
      check_finite(value, || format!("{}({})", function.name(), join(&values)))
    }
  }
}

pub fn apply_binary(op: BinaryOperator, l: f64, r: f64) -> Result<f64, EvalError> {
  match op {
    BinaryOperator::Plus => Ok(l + r),
    BinaryOperator::Minus => Ok(l - r),
    BinaryOperator::Times => Ok(l * r),
    BinaryOperator::Divide => {
      if r == 0.0 {
        Err(EvalError::Domain(format!("division by zero in {l} / {r}")))
      } else {
        Ok(l / r)
      }
    }
    BinaryOperator::Power => {
      if l == 0.0 && r < 0.0 {
        Err(EvalError::Domain(format!(
          "zero raised to negative power {r}"
        )))
      } else if l < 0.0 && r.fract() != 0.0 {
        Err(EvalError::Domain(format!(
          "negative base {l} with non-integer exponent {r}"
        )))
      } else {
        Ok(l.powf(r))
      }
    }
  }
}

fn check_finite(
  value: f64,
  describe: impl FnOnce() -> String,
) -> Result<f64, EvalError> {
  if value.is_nan() {
    Err(EvalError::Domain(format!("{} is undefined", describe())))
  } else if value.is_infinite() {
    Err(EvalError::Overflow)
  } else {
    Ok(value)
  }
}

fn join(values: &[f64]) -> String {
  values
    .iter()
    .map(f64::to_string)
    .collect::<Vec<_>>()
    .join(", ")
}
