use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::{json, Value};
use tracing::{debug, trace};

use crate::config::SampleOptions;
use crate::{Expression, MathError};

/// One finite point of a function's graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
  pub x: f64,
  pub y: f64,
}

/// Ordered, finite samples of an expression over a domain.
///
/// x values are strictly increasing and lie within the requested domain;
/// y values are always finite. Points where the expression is undefined
/// are left out, so the sequence can be shorter than the grid or empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleSequence {
  samples: Vec<Sample>,
  /// Grid index of each kept sample, used to find gaps
  grid: Vec<usize>,
  attempted: usize,
}

impl SampleSequence {
  pub fn len(&self) -> usize {
    self.samples.len()
  }

  pub fn is_empty(&self) -> bool {
    self.samples.is_empty()
  }

  pub fn samples(&self) -> &[Sample] {
    &self.samples
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
    self.samples.iter()
  }

  /// Grid points that were evaluated, kept or not
  pub fn attempted(&self) -> usize {
    self.attempted
  }

  /// Grid points left out because the expression was undefined there
  pub fn skipped(&self) -> usize {
    self.attempted - self.samples.len()
  }

  pub fn points(&self) -> Vec<(f64, f64)> {
    self.samples.iter().map(|s| (s.x, s.y)).collect()
  }

  /// Split into runs of neighbouring grid points, breaking wherever a
  /// point was skipped. A renderer draws one polyline per run so it does
  /// not bridge a discontinuity such as `1/x` at zero.
  pub fn segments(&self) -> Vec<&[Sample]> {
    let mut segments = Vec::new();
    let mut start = 0;
    for i in 1..self.samples.len() {
      if self.grid[i] != self.grid[i - 1] + 1 {
        segments.push(&self.samples[start..i]);
        start = i;
      }
    }
    if start < self.samples.len() {
      segments.push(&self.samples[start..]);
    }
    segments
  }

  /// Smallest and largest y, if there are any samples
  pub fn y_range(&self) -> Option<(f64, f64)> {
    self.samples.iter().fold(None, |range, s| match range {
      None => Some((s.y, s.y)),
      Some((lo, hi)) => Some((f64::min(lo, s.y), f64::max(hi, s.y))),
    })
  }

  /// `[{"x": .., "y": ..}, ...]`, the record shape chart components consume
  pub fn to_json(&self) -> Value {
    Value::Array(
      self
        .samples
        .iter()
        .map(|s| json!({ "x": s.x, "y": s.y }))
        .collect(),
    )
  }
}

impl<'a> IntoIterator for &'a SampleSequence {
  type Item = &'a Sample;
  type IntoIter = std::slice::Iter<'a, Sample>;

  fn into_iter(self) -> Self::IntoIter {
    self.samples.iter()
  }
}

/// Outcome of a cancellable sampling pass
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRun {
  pub samples: SampleSequence,
  /// Set when the pass stopped early; `samples` is still valid
  pub cancelled: bool,
}

impl Expression {
  /// Sample over `opts.min..=opts.max` in `opts.count` equal steps.
  pub fn sample(&self, opts: &SampleOptions) -> Result<SampleSequence, MathError> {
    let never = AtomicBool::new(false);
    self.sample_until(opts, &never).map(|run| run.samples)
  }

  /// Like [`Expression::sample`], but checks `cancel` before each point
  /// and returns what was collected so far once it is set.
  pub fn sample_until(
    &self,
    opts: &SampleOptions,
    cancel: &AtomicBool,
  ) -> Result<SampleRun, MathError> {
    opts.validate()?;

    let n = opts.count;
    let mut samples = Vec::with_capacity(n.saturating_add(1));
    let mut grid = Vec::with_capacity(n.saturating_add(1));
    let mut attempted = 0;
    let mut previous_x: Option<f64> = None;
    let mut cancelled = false;

    for i in 0..=n {
      if cancel.load(Ordering::Relaxed) {
        cancelled = true;
        break;
      }
      let x = opts.grid_point(i);
      // Below float resolution neighbouring grid points can collide
      if previous_x.is_some_and(|prev| x <= prev) {
        continue;
      }
      previous_x = Some(x);
      attempted += 1;

      match self.evaluate(x) {
        Ok(y) => {
          samples.push(Sample { x, y });
          grid.push(i);
        }
        Err(err) => trace!(x, %err, "skipping sample point"),
      }
    }

    debug!(
      expression = %self,
      min = opts.min,
      max = opts.max,
      kept = samples.len(),
      skipped = attempted - samples.len(),
      cancelled,
      "sampled domain"
    );

    Ok(SampleRun {
      samples: SampleSequence {
        samples,
        grid,
        attempted,
      },
      cancelled,
    })
  }
}
