//! Running external query tools.
//!
//! Only eager resolution (package flags, `git describe`) ever spawns a process.
//! Invocations are synchronous and run to completion before generation moves on.

use std::io;
use std::process::Command;

use tracing::{debug, info};

/// Captured result of one external query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryOutput {
  /// Whether the process exited with status zero.
  pub success: bool,
  /// Trimmed standard output, whatever the exit status.
  pub stdout: String,
}

impl QueryOutput {
  pub fn failed() -> Self {
    Self::default()
  }
}

pub trait CommandRunner {
  /// Run `program` with `args` and capture its output.
  ///
  /// An `Err` means the process could not be started at all.
  fn run(&self, program: &str, args: &[&str]) -> io::Result<QueryOutput>;
}

/// Runs commands with [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
  fn run(&self, program: &str, args: &[&str]) -> io::Result<QueryOutput> {
    info!(program = %program, args = ?args, "running query");

    let output = Command::new(program).args(args).output()?;
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if !stderr.is_empty() {
        debug!(stderr = %stderr, "query stderr");
      }
    }

    Ok(QueryOutput {
      success: output.status.success(),
      stdout,
    })
  }
}

/// Run a query, folding a failure to spawn into an unsuccessful result.
pub fn run_query(runner: &dyn CommandRunner, program: &str, args: &[&str]) -> QueryOutput {
  runner.run(program, args).unwrap_or_else(|err| {
    debug!(program = %program, error = %err, "query could not be started");
    QueryOutput::failed()
  })
}
