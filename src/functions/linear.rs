//! Linear-term collection for equations of the form `a·x + b = c`.
//!
//! Each side is compiled to a tree and folded into `coefficient·x + constant`.
//! Anything that is not affine in the free variable is rejected instead of
//! guessed at.

use thiserror::Error;
use tracing::debug;

use crate::evaluator::evaluate;
use crate::syntax::{BinaryOperator, Expr, UnaryOperator};
use crate::{EvalError, Expression, MathError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinearError {
  #[error("expected an equation with exactly one `=`, got `{0}`")]
  NotAnEquation(String),
  #[error("`{expression}` is not linear in {variable}")]
  NotLinear { expression: String, variable: String },
}

/// `coefficient·x + constant`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearForm {
  pub coefficient: f64,
  pub constant: f64,
}

impl LinearForm {
  pub const fn constant(value: f64) -> Self {
    Self {
      coefficient: 0.0,
      constant: value,
    }
  }

  pub const fn variable() -> Self {
    Self {
      coefficient: 1.0,
      constant: 0.0,
    }
  }

  pub fn is_constant(&self) -> bool {
    self.coefficient == 0.0
  }

  fn add(self, other: Self) -> Self {
    Self {
      coefficient: self.coefficient + other.coefficient,
      constant: self.constant + other.constant,
    }
  }

  fn scale(self, factor: f64) -> Self {
    Self {
      coefficient: self.coefficient * factor,
      constant: self.constant * factor,
    }
  }

  fn checked(self) -> Result<Self, Collect> {
    if self.coefficient.is_finite() && self.constant.is_finite() {
      Ok(self)
    } else {
      Err(Collect::Eval(EvalError::Overflow))
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinearSolution {
  Unique(f64),
  /// Both sides are identical, every value solves the equation
  Infinite,
  /// Contradiction such as `x + 1 = x`
  None,
}

enum Collect {
  NotLinear,
  Eval(EvalError),
}

impl From<EvalError> for Collect {
  fn from(err: EvalError) -> Self {
    Collect::Eval(err)
  }
}

fn collect(expr: &Expr) -> Result<LinearForm, Collect> {
  if !expr.contains_variable() {
    return Ok(LinearForm::constant(evaluate(expr, 0.0)?));
  }
  let form = match expr {
    Expr::Variable(_) => LinearForm::variable(),
    Expr::UnaryOp {
      op: UnaryOperator::Minus,
      operand,
    } => collect(operand)?.scale(-1.0),
    Expr::BinaryOp { op, left, right } => match op {
      BinaryOperator::Plus => collect(left)?.add(collect(right)?),
      BinaryOperator::Minus => collect(left)?.add(collect(right)?.scale(-1.0)),
      BinaryOperator::Times => {
        let (l, r) = (collect(left)?, collect(right)?);
        if l.is_constant() {
          r.scale(l.constant)
        } else if r.is_constant() {
          l.scale(r.constant)
        } else {
          return Err(Collect::NotLinear);
        }
      }
      BinaryOperator::Divide => {
        if right.contains_variable() {
          return Err(Collect::NotLinear);
        }
        let divisor = evaluate(right, 0.0)?;
        if divisor == 0.0 {
          return Err(Collect::Eval(EvalError::Domain(
            "division by zero".to_string(),
          )));
        }
        let l = collect(left)?;
        LinearForm {
          coefficient: l.coefficient / divisor,
          constant: l.constant / divisor,
        }
      }
      BinaryOperator::Power => {
        if right.contains_variable() {
          return Err(Collect::NotLinear);
        }
        match evaluate(right, 0.0)? {
          e if e == 1.0 => collect(left)?,
          e if e == 0.0 => LinearForm::constant(1.0),
          _ => return Err(Collect::NotLinear),
        }
      }
    },
    _ => return Err(Collect::NotLinear),
  };
  form.checked()
}

/// Fold an expression into `coefficient·x + constant`.
pub fn collect_linear(expression: &Expression) -> Result<LinearForm, MathError> {
  collect(expression.tree()).map_err(|err| match err {
    Collect::NotLinear => LinearError::NotLinear {
      expression: expression.source().to_string(),
      variable: expression.variable().to_string(),
    }
    .into(),
    Collect::Eval(err) => err.into(),
  })
}

/// Solve `lhs = rhs` when both sides are linear in `variable`.
pub fn solve_linear(
  equation: &str,
  variable: &str,
) -> Result<LinearSolution, MathError> {
  let (lhs, rhs) = match equation.split('=').collect::<Vec<_>>()[..] {
    [lhs, rhs] => (lhs, rhs),
    _ => return Err(LinearError::NotAnEquation(equation.to_string()).into()),
  };
  let lhs = collect_linear(&Expression::compile_with_variable(lhs, variable)?)?;
  let rhs = collect_linear(&Expression::compile_with_variable(rhs, variable)?)?;

  // a·x + b = 0
  let a = lhs.coefficient - rhs.coefficient;
  let b = lhs.constant - rhs.constant;
  debug!(equation, a, b, "collected linear terms");

  if a == 0.0 {
    return Ok(if b == 0.0 {
      LinearSolution::Infinite
    } else {
      LinearSolution::None
    });
  }
  let root = -b / a;
  if !root.is_finite() {
    return Err(EvalError::Overflow.into());
  }
  // Avoid reporting `-0`
  Ok(LinearSolution::Unique(if root == 0.0 { 0.0 } else { root }))
}
