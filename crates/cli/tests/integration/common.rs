//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated working directory for one `configure` run.
///
/// The tool environment variables are cleared so the host never leaks into
/// the generated descriptor.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  pub fn output_path(&self) -> PathBuf {
    self.temp.path().join("build.ninja")
  }

  pub fn cmd(&self) -> Command {
    let mut cmd = cargo_bin_cmd!("configure");
    cmd
      .current_dir(self.temp.path())
      .env_remove("CC")
      .env_remove("GLSLC")
      .env_remove("CFLAGS")
      .env_remove("LDFLAGS")
      .env_remove("RUST_LOG");
    cmd
  }

  /// Run with `args`, assert success and return the descriptor text.
  pub fn generate(&self, args: &[&str]) -> String {
    self.cmd().args(args).assert().success();
    self.descriptor()
  }

  pub fn descriptor(&self) -> String {
    std::fs::read_to_string(self.output_path()).unwrap()
  }
}
