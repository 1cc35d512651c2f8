//! Test utilities for ninjagen-lib.
//!
//! Fakes for the [`Environment`] and [`CommandRunner`] seams, plus
//! cross-platform helpers for tests that spawn real processes.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;

use crate::env::Environment;
use crate::exec::{CommandRunner, QueryOutput};

/// Build a map-backed [`Environment`] from key/value pairs.
pub fn env_of(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
  pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// An empty environment.
pub fn no_env() -> impl Environment {
  BTreeMap::<String, String>::new()
}

/// A [`CommandRunner`] answering from a fixed table and recording every call.
///
/// Commands are keyed by the program followed by its arguments, space separated.
/// Unknown commands fail to spawn.
#[derive(Default)]
pub struct FakeRunner {
  responses: BTreeMap<String, QueryOutput>,
  calls: RefCell<Vec<String>>,
}

impl FakeRunner {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_success(mut self, command: &str, stdout: &str) -> Self {
    self.responses.insert(
      command.to_string(),
      QueryOutput {
        success: true,
        stdout: stdout.to_string(),
      },
    );
    self
  }

  pub fn with_failure(mut self, command: &str, stdout: &str) -> Self {
    self.responses.insert(
      command.to_string(),
      QueryOutput {
        success: false,
        stdout: stdout.to_string(),
      },
    );
    self
  }

  pub fn calls(&self) -> Vec<String> {
    self.calls.borrow().clone()
  }
}

impl CommandRunner for FakeRunner {
  fn run(&self, program: &str, args: &[&str]) -> io::Result<QueryOutput> {
    let key = std::iter::once(program).chain(args.iter().copied()).collect::<Vec<_>>().join(" ");
    self.calls.borrow_mut().push(key.clone());
    self
      .responses
      .get(&key)
      .cloned()
      .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, key))
  }
}

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}
