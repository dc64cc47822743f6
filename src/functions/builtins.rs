use std::f64::consts;
use std::ops::RangeInclusive;

use crate::EvalError;

/// Named constants recognized by the compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
  Pi,
  E,
  Tau,
}

impl Constant {
  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "pi" | "PI" | "π" => Some(Constant::Pi),
      "e" | "E" => Some(Constant::E),
      "tau" | "τ" => Some(Constant::Tau),
      _ => None,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Constant::Pi => "pi",
      Constant::E => "e",
      Constant::Tau => "tau",
    }
  }

  pub fn value(self) -> f64 {
    match self {
      Constant::Pi => consts::PI,
      Constant::E => consts::E,
      Constant::Tau => consts::TAU,
    }
  }
}

/// The closed set of functions an expression may call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
  Sin,
  Cos,
  Tan,
  Asin,
  Acos,
  Atan,
  Sinh,
  Cosh,
  Tanh,
  Sqrt,
  Cbrt,
  Exp,
  Ln,
  Log,
  Log10,
  Log2,
  Abs,
}

impl Function {
  pub fn from_name(name: &str) -> Option<Self> {
    let function = match name {
      "sin" => Function::Sin,
      "cos" => Function::Cos,
      "tan" => Function::Tan,
      "asin" | "arcsin" => Function::Asin,
      "acos" | "arccos" => Function::Acos,
      "atan" | "arctan" => Function::Atan,
      "sinh" => Function::Sinh,
      "cosh" => Function::Cosh,
      "tanh" => Function::Tanh,
      "sqrt" => Function::Sqrt,
      "cbrt" => Function::Cbrt,
      "exp" => Function::Exp,
      "ln" => Function::Ln,
      "log" => Function::Log,
      "log10" => Function::Log10,
      "log2" => Function::Log2,
      "abs" => Function::Abs,
      _ => return None,
    };
    Some(function)
  }

  pub fn name(self) -> &'static str {
    match self {
      Function::Sin => "sin",
      Function::Cos => "cos",
      Function::Tan => "tan",
      Function::Asin => "asin",
      Function::Acos => "acos",
      Function::Atan => "atan",
      Function::Sinh => "sinh",
      Function::Cosh => "cosh",
      Function::Tanh => "tanh",
      Function::Sqrt => "sqrt",
      Function::Cbrt => "cbrt",
      Function::Exp => "exp",
      Function::Ln => "ln",
      Function::Log => "log",
      Function::Log10 => "log10",
      Function::Log2 => "log2",
      Function::Abs => "abs",
    }
  }

  /// Accepted argument counts. `log(x)` is the natural logarithm,
  /// `log(x, b)` uses base `b`.
  pub fn arity(self) -> RangeInclusive<usize> {
    match self {
      Function::Log => 1..=2,
      _ => 1..=1,
    }
  }

  /// Apply the function to already-evaluated arguments.
  /// Arity has been checked at compile time.
  pub fn apply(self, args: &[f64]) -> Result<f64, EvalError> {
    let x = args.first().copied().unwrap_or(f64::NAN);
    match self {
      Function::Sin => Ok(x.sin()),
      Function::Cos => Ok(x.cos()),
      Function::Tan => Ok(x.tan()),
      Function::Asin | Function::Acos if !(-1.0..=1.0).contains(&x) => {
        Err(EvalError::Domain(format!(
          "{}({x}) is undefined outside [-1, 1]",
          self.name()
        )))
      }
      Function::Asin => Ok(x.asin()),
      Function::Acos => Ok(x.acos()),
      Function::Atan => Ok(x.atan()),
      Function::Sinh => Ok(x.sinh()),
      Function::Cosh => Ok(x.cosh()),
      Function::Tanh => Ok(x.tanh()),
      Function::Sqrt if x < 0.0 => Err(EvalError::Domain(format!(
        "square root of negative number {x}"
      ))),
      Function::Sqrt => Ok(x.sqrt()),
      Function::Cbrt => Ok(x.cbrt()),
      Function::Exp => Ok(x.exp()),
      Function::Ln | Function::Log10 | Function::Log2 | Function::Log
        if x <= 0.0 =>
      {
        Err(EvalError::Domain(format!(
          "logarithm of non-positive number {x}"
        )))
      }
      Function::Ln => Ok(x.ln()),
      Function::Log10 => Ok(x.log10()),
      Function::Log2 => Ok(x.log2()),
      Function::Log => match args.get(1) {
        None => Ok(x.ln()),
        Some(&base) if base <= 0.0 || base == 1.0 => Err(EvalError::Domain(
          format!("invalid logarithm base {base}"),
        )),
        Some(&base) => Ok(x.ln() / base.ln()),
      },
      Function::Abs => Ok(x.abs()),
    }
  }
}
