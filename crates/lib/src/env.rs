//! Access to environment variables.
//!
//! The precedence resolver reads the environment through [`Environment`] so
//! tests can supply a fixed map instead of mutating the process environment.

use std::collections::BTreeMap;

pub trait Environment {
  /// Returns the value of `key`, or `None` when it is unset or empty.
  fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
  fn var(&self, key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
  }
}

impl Environment for BTreeMap<String, String> {
  fn var(&self, key: &str) -> Option<String> {
    self.get(key).filter(|v| !v.is_empty()).cloned()
  }
}
