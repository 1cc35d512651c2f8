//! Shared helpers for library integration tests.

use std::collections::BTreeMap;
use std::io;

use chrono::{NaiveDate, NaiveDateTime};
use ninjagen_lib::exec::{CommandRunner, QueryOutput};
use ninjagen_lib::generate::{GenerateContext, Generated, generate};
use ninjagen_lib::ConfigError;

/// Answers every query with the same result.
pub struct FixedRunner {
  pub output: Option<QueryOutput>,
}

impl CommandRunner for FixedRunner {
  fn run(&self, program: &str, _args: &[&str]) -> io::Result<QueryOutput> {
    self
      .output
      .clone()
      .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, program.to_string()))
  }
}

pub fn timestamp() -> NaiveDateTime {
  NaiveDate::from_ymd_opt(2025, 1, 31)
    .and_then(|d| d.and_hms_opt(8, 0, 0))
    .unwrap()
}

pub fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
  pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// Generate with the given arguments, environment and query result.
pub fn run(args: &[&str], vars: &[(&str, &str)], output: Option<QueryOutput>) -> Result<Generated, ConfigError> {
  let env = env(vars);
  let runner = FixedRunner { output };
  generate(&GenerateContext {
    argv: args.iter().map(|a| a.to_string()).collect(),
    timestamp: timestamp(),
    env: &env,
    runner: &runner,
  })
}
