use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use mathsteps::{
  solve_linear, DomainPreset, Expression, LinearSolution, MathError,
  SampleOptions, DEFAULT_SAMPLE_COUNT,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Evaluate an expression at a single point
  Eval {
    /// The expression, e.g. "x^2 + 3x"
    expression: String,
    /// Value bound to the free variable
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    at: f64,
    #[command(flatten)]
    variable: VariableArg,
  },
  /// Sample an expression across a domain for plotting
  Sample {
    /// The expression, e.g. "sin(x)/x"
    expression: String,
    #[arg(long, allow_negative_numbers = true, requires = "max")]
    min: Option<f64>,
    #[arg(long, allow_negative_numbers = true, requires = "min")]
    max: Option<f64>,
    /// Named window: standard, narrow or periodic
    #[arg(long, conflicts_with_all = ["min", "category"])]
    preset: Option<DomainPreset>,
    /// Pick the window a problem category uses (algebra, calculus, ...)
    #[arg(long, conflicts_with = "min")]
    category: Option<String>,
    /// Number of equal steps across the domain
    #[arg(long, env = "MATHSTEPS_SAMPLES", default_value_t = DEFAULT_SAMPLE_COUNT)]
    samples: usize,
    /// Print the samples as JSON records
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    variable: VariableArg,
  },
  /// Solve a linear equation such as "2x + 3 = 7"
  Solve {
    equation: String,
    #[command(flatten)]
    variable: VariableArg,
  },
}

#[derive(Args)]
struct VariableArg {
  /// Name of the free variable
  #[arg(long = "var", env = "MATHSTEPS_VAR", default_value = "x")]
  name: String,
}

fn init_tracing() {
  let filter = EnvFilter::try_from_env("MATHSTEPS_LOG")
    .or_else(|_| EnvFilter::try_from_default_env())
    .unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}

/// Compile, echoing the raw input back when it cannot be understood.
fn compile(text: &str, variable: &str) -> Result<Expression> {
  match Expression::compile_with_variable(text, variable) {
    Ok(expression) => Ok(expression),
    Err(err) => bail!("could not understand `{text}`: {err}"),
  }
}

fn run(cli: Cli) -> Result<()> {
  match cli.command {
    Commands::Eval {
      expression,
      at,
      variable,
    } => {
      let compiled = compile(&expression, &variable.name)?;
      let value = compiled
        .evaluate(at)
        .map_err(MathError::from)
        .with_context(|| format!("{compiled} at {} = {at}", variable.name))?;
      println!("{value}");
    }
    Commands::Sample {
      expression,
      min,
      max,
      preset,
      category,
      samples,
      json,
      variable,
    } => {
      let compiled = compile(&expression, &variable.name)?;
      let options = match (min, max, preset, category) {
        (Some(min), Some(max), _, _) => SampleOptions::new(min, max),
        (_, _, Some(preset), _) => SampleOptions::from_preset(preset),
        (_, _, _, Some(category)) => {
          SampleOptions::from_preset(DomainPreset::for_category(&category))
        }
        _ => SampleOptions::default(),
      }
      .with_count(samples);
      let sequence = compiled.sample(&options)?;
      if json {
        println!("{}", serde_json::to_string_pretty(&sequence.to_json())?);
      } else {
        for sample in &sequence {
          println!("{}\t{}", sample.x, sample.y);
        }
      }
      if sequence.is_empty() {
        eprintln!(
          "{compiled} is undefined everywhere on [{}, {}]",
          options.min, options.max
        );
      }
    }
    Commands::Solve { equation, variable } => {
      let name = variable.name;
      match solve_linear(&equation, &name) {
        Ok(LinearSolution::Unique(value)) => println!("{name} = {value}"),
        Ok(LinearSolution::Infinite) => {
          println!("every value of {name} solves the equation")
        }
        Ok(LinearSolution::None) => println!("no value of {name} solves the equation"),
        Err(MathError::Parse(err)) => {
          bail!("could not understand `{equation}`: {err}")
        }
        Err(err) => return Err(err.into()),
      }
    }
  }
  Ok(())
}

fn main() -> ExitCode {
  init_tracing();
  let cli = Cli::parse();

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("Error: {e:#}");
      ExitCode::FAILURE
    }
  }
}
