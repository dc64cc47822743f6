use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};
use std::fmt;
use std::sync::LazyLock;

use crate::functions::builtins::{Constant, Function};
use crate::{ParseError, Rule};

/// Operator table, loosest binding first.
/// Juxtaposition binds tighter than `*` and `/`, so `1/x y` is `1/(x y)`,
/// but looser than `^`, so `2x^2` is `2(x^2)`. A number over a number
/// written in front of a factor is a `Fraction` primary, so `1/2x` is
/// `(1/2)x`.
static PRATT: LazyLock<PrattParser<Rule>> = LazyLock::new(|| {
  PrattParser::new()
    .op(
      Op::infix(Rule::Add, Assoc::Left) | Op::infix(Rule::Subtract, Assoc::Left),
    )
    .op(
      Op::infix(Rule::Multiply, Assoc::Left)
        | Op::infix(Rule::Divide, Assoc::Left),
    )
    .op(Op::infix(Rule::ImplicitMultiply, Assoc::Left))
    .op(Op::prefix(Rule::Negate) | Op::prefix(Rule::Positive))
    .op(Op::infix(Rule::Power, Assoc::Right))
    .op(Op::postfix(Rule::Squared) | Op::postfix(Rule::Cubed))
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
  Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
  Plus,
  Minus,
  Times,
  Divide,
  Power,
}

impl BinaryOperator {
  pub fn symbol(self) -> &'static str {
    match self {
      BinaryOperator::Plus => "+",
      BinaryOperator::Minus => "-",
      BinaryOperator::Times => "*",
      BinaryOperator::Divide => "/",
      BinaryOperator::Power => "^",
    }
  }

  fn precedence(self) -> u8 {
    match self {
      BinaryOperator::Plus | BinaryOperator::Minus => 1,
      BinaryOperator::Times | BinaryOperator::Divide => 2,
      BinaryOperator::Power => 4,
    }
  }
}

/// A resolved expression tree over a single free variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
  Number(f64),
  Variable(String),
  Constant(Constant),
  UnaryOp {
    op: UnaryOperator,
    operand: Box<Expr>,
  },
  BinaryOp {
    op: BinaryOperator,
    left: Box<Expr>,
    right: Box<Expr>,
  },
  FunctionCall {
    function: Function,
    args: Vec<Expr>,
  },
}

impl Expr {
  pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Self {
    Expr::BinaryOp {
      op,
      left: Box::new(left),
      right: Box::new(right),
    }
  }

  pub fn negate(operand: Expr) -> Self {
    Expr::UnaryOp {
      op: UnaryOperator::Minus,
      operand: Box::new(operand),
    }
  }

  /// Whether the free variable occurs anywhere in the tree
  pub fn contains_variable(&self) -> bool {
    match self {
      Expr::Variable(_) => true,
      Expr::Number(_) | Expr::Constant(_) => false,
      Expr::UnaryOp { operand, .. } => operand.contains_variable(),
      Expr::BinaryOp { left, right, .. } => {
        left.contains_variable() || right.contains_variable()
      }
      Expr::FunctionCall { args, .. } => {
        args.iter().any(Expr::contains_variable)
      }
    }
  }

  /// Binding strength used to decide where `Display` needs parentheses
  fn precedence(&self) -> u8 {
    match self {
      Expr::BinaryOp { op, .. } => op.precedence(),
      Expr::UnaryOp { .. } => 3,
      Expr::Number(n) if *n < 0.0 => 3,
      _ => 5,
    }
  }
}

fn write_operand(
  f: &mut fmt::Formatter<'_>,
  operand: &Expr,
  needs_parens: bool,
) -> fmt::Result {
  if needs_parens {
    write!(f, "({operand})")
  } else {
    write!(f, "{operand}")
  }
}

impl fmt::Display for Expr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Expr::Number(n) => write!(f, "{n}"),
      Expr::Variable(name) => f.write_str(name),
      Expr::Constant(c) => f.write_str(c.name()),
      Expr::UnaryOp {
        op: UnaryOperator::Minus,
        operand,
      } => {
        f.write_str("-")?;
        write_operand(f, operand, operand.precedence() <= 3)
      }
      Expr::BinaryOp { op, left, right } => {
        let prec = op.precedence();
        // `^` is right-associative, everything else left-associative
        let (left_parens, right_parens) = if *op == BinaryOperator::Power {
          (left.precedence() <= prec, right.precedence() < prec)
        } else {
          (left.precedence() < prec, right.precedence() <= prec)
        };
        write_operand(f, left, left_parens)?;
        if *op == BinaryOperator::Power {
          f.write_str(op.symbol())?;
        } else {
          write!(f, " {} ", op.symbol())?;
        }
        write_operand(f, right, right_parens)
      }
      Expr::FunctionCall { function, args } => {
        write!(f, "{}(", function.name())?;
        for (i, arg) in args.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{arg}")?;
        }
        f.write_str(")")
      }
    }
  }
}

/// Convert a parsed `Program` into a resolved tree for the free variable `var`.
pub fn pair_to_expr(program: Pair<Rule>, var: &str) -> Result<Expr, ParseError> {
  let expression = program
    .into_inner()
    .find(|p| p.as_rule() == Rule::Expression)
    .ok_or_else(|| ParseError::new("expected an expression", None))?;
  expression_to_expr(expression.into_inner(), var)
}

fn expression_to_expr(pairs: Pairs<Rule>, var: &str) -> Result<Expr, ParseError> {
  PRATT
    .map_primary(|primary| primary_to_expr(primary, var))
    .map_prefix(|op, operand| match op.as_rule() {
      Rule::Negate => Ok(Expr::negate(operand?)),
      _ => operand,
    })
    .map_postfix(|base, op| {
      let exponent = match op.as_rule() {
        Rule::Cubed => 3.0,
        _ => 2.0,
      };
      Ok(Expr::binary(BinaryOperator::Power, base?, Expr::Number(exponent)))
    })
    .map_infix(|left, op, right| {
      let op = match op.as_rule() {
        Rule::Add => BinaryOperator::Plus,
        Rule::Subtract => BinaryOperator::Minus,
        Rule::Divide => BinaryOperator::Divide,
        Rule::Power => BinaryOperator::Power,
        _ => BinaryOperator::Times,
      };
      Ok(Expr::binary(op, left?, right?))
    })
    .parse(pairs)
}

fn column_of(pair: &Pair<Rule>) -> Option<usize> {
  Some(pair.line_col().1)
}

fn primary_to_expr(pair: Pair<Rule>, var: &str) -> Result<Expr, ParseError> {
  match pair.as_rule() {
    Rule::Expression => expression_to_expr(pair.into_inner(), var),
    Rule::Number => number_to_expr(&pair),
    Rule::Fraction => {
      let column = column_of(&pair);
      let mut inner = pair.into_inner();
      match (inner.next(), inner.next()) {
        (Some(numerator), Some(denominator)) => Ok(Expr::binary(
          BinaryOperator::Divide,
          number_to_expr(&numerator)?,
          number_to_expr(&denominator)?,
        )),
        _ => Err(ParseError::new("incomplete fraction", column)),
      }
    }
    Rule::Identifier => identifier_to_expr(&pair, var),
    Rule::FunctionCall => function_call_to_expr(pair, var),
    other => Err(ParseError::new(
      format!("unexpected {other:?}"),
      column_of(&pair),
    )),
  }
}

fn number_to_expr(pair: &Pair<Rule>) -> Result<Expr, ParseError> {
  let text = pair.as_str();
  let value = text.parse::<f64>().map_err(|_| {
    ParseError::new(format!("invalid number `{text}`"), column_of(pair))
  })?;
  if !value.is_finite() {
    return Err(ParseError::new(
      format!("number `{text}` is out of range"),
      column_of(pair),
    ));
  }
  Ok(Expr::Number(value))
}

fn identifier_to_expr(pair: &Pair<Rule>, var: &str) -> Result<Expr, ParseError> {
  let name = pair.as_str();
  if name == var {
    return Ok(Expr::Variable(name.to_string()));
  }
  if let Some(constant) = Constant::from_name(name) {
    return Ok(Expr::Constant(constant));
  }
  if Function::from_name(name).is_some() {
    return Err(ParseError::new(
      format!("function `{name}` needs an argument list, e.g. `{name}({var})`"),
      column_of(pair),
    ));
  }
  Err(ParseError::new(
    format!("unknown symbol `{name}`"),
    column_of(pair),
  ))
}

fn function_call_to_expr(pair: Pair<Rule>, var: &str) -> Result<Expr, ParseError> {
  let column = column_of(&pair);
  let mut inner = pair.into_inner();
  let head = inner
    .next()
    .ok_or_else(|| ParseError::new("missing function name", column))?;
  let args = inner
    .map(|arg| expression_to_expr(arg.into_inner(), var))
    .collect::<Result<Vec<_>, _>>()?;

  let name = head.as_str();
  let function = match Function::from_name(name) {
    Some(function) => function,
    None => {
      // `x(x + 1)` and `pi(2)` are juxtapositions, not calls
      let factor = identifier_to_expr(&head, var)?;
      return match <[Expr; 1]>::try_from(args) {
        Ok([arg]) => Ok(Expr::binary(BinaryOperator::Times, factor, arg)),
        Err(_) => Err(ParseError::new(
          format!("`{name}` is not a function"),
          column,
        )),
      };
    }
  };

  let arity = function.arity();
  if !arity.contains(&args.len()) {
    let expected = if arity.start() == arity.end() {
      arity.start().to_string()
    } else {
      format!("{} to {}", arity.start(), arity.end())
    };
    return Err(ParseError::new(
      format!(
        "`{name}` takes {expected} argument(s), got {}",
        args.len()
      ),
      column,
    ));
  }
  Ok(Expr::FunctionCall { function, args })
}
