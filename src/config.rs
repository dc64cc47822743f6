use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use crate::MathError;

/// Free variable name used when none is given
pub const DEFAULT_VARIABLE: &str = "x";

/// Number of steps the sampler divides a domain into by default
pub const DEFAULT_SAMPLE_COUNT: usize = 100;

/// Smallest accepted step count (a line needs two endpoints)
pub const MIN_SAMPLE_COUNT: usize = 2;

/// Largest accepted step count
pub const MAX_SAMPLE_COUNT: usize = 100_000;

/// Plot windows the assistant uses for its problem categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DomainPreset {
  /// `[-10, 10]`
  #[default]
  Standard,
  /// `[-5, 5]`
  Narrow,
  /// `[0, 2π]`
  Periodic,
}

impl DomainPreset {
  pub fn bounds(self) -> (f64, f64) {
    match self {
      DomainPreset::Standard => (-10.0, 10.0),
      DomainPreset::Narrow => (-5.0, 5.0),
      DomainPreset::Periodic => (0.0, TAU),
    }
  }

  /// Window used for a problem category (`"calculus"`, `"trigonometry"`, ...).
  /// Unknown categories get the standard window.
  pub fn for_category(category: &str) -> Self {
    match category.trim().to_ascii_lowercase().as_str() {
      "calculus" => DomainPreset::Narrow,
      "trigonometry" | "trig" => DomainPreset::Periodic,
      _ => DomainPreset::Standard,
    }
  }
}

impl fmt::Display for DomainPreset {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      DomainPreset::Standard => "standard",
      DomainPreset::Narrow => "narrow",
      DomainPreset::Periodic => "periodic",
    })
  }
}

impl FromStr for DomainPreset {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "standard" => Ok(DomainPreset::Standard),
      "narrow" => Ok(DomainPreset::Narrow),
      "periodic" => Ok(DomainPreset::Periodic),
      other => Err(format!(
        "unknown preset `{other}` (expected standard, narrow or periodic)"
      )),
    }
  }
}

/// Where and how densely to sample an expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleOptions {
  pub min: f64,
  pub max: f64,
  /// Number of equal steps; `count + 1` grid points are evaluated
  pub count: usize,
}

impl SampleOptions {
  pub fn new(min: f64, max: f64) -> Self {
    Self {
      min,
      max,
      count: DEFAULT_SAMPLE_COUNT,
    }
  }

  pub fn from_preset(preset: DomainPreset) -> Self {
    let (min, max) = preset.bounds();
    Self::new(min, max)
  }

  pub fn with_count(mut self, count: usize) -> Self {
    self.count = count;
    self
  }

  /// Reject empty, inverted or non-finite domains and step counts outside
  /// `MIN_SAMPLE_COUNT..=MAX_SAMPLE_COUNT`.
  pub fn validate(&self) -> Result<(), MathError> {
    if !(self.min.is_finite() && self.max.is_finite() && self.min < self.max) {
      return Err(MathError::InvalidDomain {
        min: self.min,
        max: self.max,
      });
    }
    if !(MIN_SAMPLE_COUNT..=MAX_SAMPLE_COUNT).contains(&self.count) {
      return Err(MathError::InvalidSampleCount(self.count));
    }
    Ok(())
  }

  /// Distance between neighbouring grid points.
  /// Falls back to dividing each bound separately when `max - min` overflows.
  pub fn step(&self) -> f64 {
    let n = self.count as f64;
    let span = self.max - self.min;
    if span.is_finite() {
      span / n
    } else {
      self.max / n - self.min / n
    }
  }

  /// The `i`-th of the `count + 1` grid points. The last one is exactly
  /// `max`, and no point leaves the domain.
  pub fn grid_point(&self, i: usize) -> f64 {
    if i >= self.count {
      return self.max;
    }
    let x = if (self.max - self.min).is_finite() {
      self.min + i as f64 * self.step()
    } else {
      // Interpolate bound by bound so the span never materialises
      let t = i as f64 / self.count as f64;
      self.min * (1.0 - t) + self.max * t
    };
    x.max(self.min).min(self.max)
  }
}

impl Default for SampleOptions {
  fn default() -> Self {
    Self::from_preset(DomainPreset::default())
  }
}
