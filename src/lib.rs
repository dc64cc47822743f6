use pest::error::{ErrorVariant, InputLocation, LineColLocation};
use pest::Parser;
use pest_derive::Parser;
use std::fmt;
use thiserror::Error;
use tracing::debug;

pub mod cache;
pub mod config;
pub mod evaluator;
pub mod functions;
pub mod syntax;

pub use cache::{clear_cache, compile_cached, compile_cached_with_variable};
pub use config::{
  DomainPreset, SampleOptions, DEFAULT_SAMPLE_COUNT, DEFAULT_VARIABLE,
  MAX_SAMPLE_COUNT,
};
pub use functions::linear::{
  collect_linear, solve_linear, LinearError, LinearForm, LinearSolution,
};
pub use functions::sampling::{Sample, SampleRun, SampleSequence};

#[derive(Parser)]
#[grammar = "math.pest"]
pub struct MathParser;

/// The text is not a well-formed expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}{}", column_suffix(.column))]
pub struct ParseError {
  pub message: String,
  /// 1-based column of the offending input, when known
  pub column: Option<usize>,
}

fn column_suffix(column: &Option<usize>) -> String {
  column
    .map(|c| format!(" at column {c}"))
    .unwrap_or_default()
}

impl ParseError {
  pub fn new(message: impl Into<String>, column: Option<usize>) -> Self {
    Self {
      message: message.into(),
      column,
    }
  }

  /// Translate a grammar failure on `input` into a user-facing message.
  pub fn from_pest(err: &pest::error::Error<Rule>, input: &str) -> Self {
    let column = match err.line_col {
      LineColLocation::Pos((_, col)) => col,
      LineColLocation::Span((_, col), _) => col,
    };
    let offset = match err.location {
      InputLocation::Pos(pos) => pos,
      InputLocation::Span((start, _)) => start,
    };
    let rest = input.get(offset..).unwrap_or_default();
    let found = match rest.trim_start().chars().next() {
      None => "unexpected end of input".to_string(),
      Some(token) => format!("unexpected `{token}`"),
    };
    let message = match &err.variant {
      ErrorVariant::ParsingError { positives, .. } => {
        let mut expected: Vec<&str> = Vec::new();
        for rule in positives {
          let description = describe_rule(rule);
          if !expected.contains(&description) {
            expected.push(description);
          }
        }
        if expected.is_empty() {
          found
        } else {
          format!("{found}, expected {}", expected.join(" or "))
        }
      }
      ErrorVariant::CustomError { message } => message.clone(),
    };
    ParseError::new(message, Some(column))
  }
}

fn describe_rule(rule: &Rule) -> &'static str {
  match rule {
    Rule::EOI => "end of input",
    Rule::Number
    | Rule::Fraction
    | Rule::Identifier
    | Rule::FunctionCall
    | Rule::Expression => "an operand",
    Rule::Add | Rule::Subtract | Rule::Multiply | Rule::Divide | Rule::Power => {
      "an operator"
    }
    Rule::ImplicitMultiply => "an operand",
    Rule::Negate | Rule::Positive => "a sign",
    Rule::Squared | Rule::Cubed => "an exponent",
    _ => "a token",
  }
}

/// A point at which a valid expression has no finite value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
  #[error("domain error: {0}")]
  Domain(String),
  #[error("overflow: result exceeds the finite range")]
  Overflow,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
  #[error("parse error: {0}")]
  Parse(#[from] ParseError),
  #[error("evaluation failed: {0}")]
  Evaluation(#[from] EvalError),
  #[error("invalid domain [{min}, {max}]: need finite bounds with min < max")]
  InvalidDomain { min: f64, max: f64 },
  #[error("invalid sample count {0}: need between 2 and 100000")]
  InvalidSampleCount(usize),
  #[error(transparent)]
  Linear(#[from] LinearError),
}

pub fn parse(
  input: &str,
) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>> {
  MathParser::parse(Rule::Program, input).map_err(Box::new)
}

/// A compiled single-variable expression.
///
/// Immutable once built; evaluating it has no side effects, so one
/// instance can be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
  source: String,
  variable: String,
  tree: syntax::Expr,
}

impl Expression {
  /// Compile `text` with `x` as the free variable.
  pub fn compile(text: &str) -> Result<Self, ParseError> {
    Self::compile_with_variable(text, DEFAULT_VARIABLE)
  }

  pub fn compile_with_variable(
    text: &str,
    variable: &str,
  ) -> Result<Self, ParseError> {
    if text.trim().is_empty() {
      return Err(ParseError::new("empty expression", None));
    }
    let mut pairs = parse(text).map_err(|e| ParseError::from_pest(&e, text))?;
    let program = pairs
      .next()
      .ok_or_else(|| ParseError::new("empty expression", None))?;
    let tree = syntax::pair_to_expr(program, variable)?;
    debug!(text, %tree, "compiled expression");
    Ok(Self {
      source: text.to_string(),
      variable: variable.to_string(),
      tree,
    })
  }

  pub fn source(&self) -> &str {
    &self.source
  }

  pub fn variable(&self) -> &str {
    &self.variable
  }

  pub fn tree(&self) -> &syntax::Expr {
    &self.tree
  }

  /// Evaluate with the free variable bound to `x`.
  pub fn evaluate(&self, x: f64) -> Result<f64, EvalError> {
    evaluator::evaluate(&self.tree, x)
  }
}

impl fmt::Display for Expression {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.tree)
  }
}

/// Compile `text` over `x`.
pub fn compile(text: &str) -> Result<Expression, ParseError> {
  Expression::compile(text)
}

/// One-shot evaluation of `text` at `x`.
pub fn compile_and_evaluate(text: &str, x: f64) -> Result<f64, MathError> {
  let expression = compile_cached(text)?;
  Ok(expression.evaluate(x)?)
}

/// Sample `text` over `[min, max]` in `count` steps (default
/// [`DEFAULT_SAMPLE_COUNT`]), skipping points where it is undefined.
pub fn sample_domain(
  text: &str,
  min: f64,
  max: f64,
  count: Option<usize>,
) -> Result<SampleSequence, MathError> {
  let options =
    SampleOptions::new(min, max).with_count(count.unwrap_or(DEFAULT_SAMPLE_COUNT));
  compile_cached(text)?.sample(&options)
}
