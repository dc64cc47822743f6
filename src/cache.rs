use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;

use crate::config::DEFAULT_VARIABLE;
use crate::{Expression, ParseError};

/// Entries kept per thread before the cache is flushed
pub const CACHE_CAPACITY: usize = 256;

thread_local! {
    // (variable, source text) -> compiled expression
    static COMPILED: RefCell<HashMap<(String, String), Arc<Expression>>> =
      RefCell::new(HashMap::new());
}

/// Compile `text` over `x`, reusing an earlier compilation of the same
/// text on this thread. Failures are not cached.
pub fn compile_cached(text: &str) -> Result<Arc<Expression>, ParseError> {
  compile_cached_with_variable(text, DEFAULT_VARIABLE)
}

pub fn compile_cached_with_variable(
  text: &str,
  variable: &str,
) -> Result<Arc<Expression>, ParseError> {
  let key = (variable.to_string(), text.to_string());
  if let Some(hit) = COMPILED.with(|c| c.borrow().get(&key).cloned()) {
    trace!(text, "expression cache hit");
    return Ok(hit);
  }

  let compiled = Arc::new(Expression::compile_with_variable(text, variable)?);
  COMPILED.with(|c| {
    let mut cache = c.borrow_mut();
    if cache.len() >= CACHE_CAPACITY {
      cache.clear();
    }
    cache.insert(key, Arc::clone(&compiled));
  });
  Ok(compiled)
}

/// Drop every cached expression on this thread
pub fn clear_cache() {
  COMPILED.with(|c| c.borrow_mut().clear());
}

#[cfg(test)]
fn cached_len() -> usize {
  COMPILED.with(|c| c.borrow().len())
}
