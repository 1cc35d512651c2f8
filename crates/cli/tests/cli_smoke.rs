//! CLI smoke tests for configure.
//!
//! These tests verify that the binary parses its flags, writes a descriptor
//! and returns appropriate exit codes.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the configure binary, run inside `dir`.
fn configure_cmd(dir: &TempDir) -> Command {
  let mut cmd = cargo_bin_cmd!("configure");
  cmd.current_dir(dir.path()).env_remove("CC").env_remove("GLSLC").env_remove("CFLAGS").env_remove("LDFLAGS");
  cmd
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  let temp = TempDir::new().unwrap();
  configure_cmd(&temp)
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"))
    .stdout(predicate::str::contains("--disable-tool"));
}

#[test]
fn version_flag_works() {
  let temp = TempDir::new().unwrap();
  configure_cmd(&temp)
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("configure"));
}

// =============================================================================
// Generation
// =============================================================================

#[test]
fn default_run_writes_build_ninja() {
  let temp = TempDir::new().unwrap();

  configure_cmd(&temp)
    .assert()
    .success()
    .stdout(predicate::str::contains("Wrote build.ninja"));

  let text = std::fs::read_to_string(temp.path().join("build.ninja")).unwrap();
  assert!(text.starts_with("# generated by configure on "));
  assert!(text.ends_with("default all\n"));
}

#[test]
fn output_flag_changes_destination() {
  let temp = TempDir::new().unwrap();

  configure_cmd(&temp).args(["-o", "release.ninja", "--build=release"]).assert().success();

  let text = std::fs::read_to_string(temp.path().join("release.ninja")).unwrap();
  assert!(text.contains("# arguments: ['-o', 'release.ninja', '--build=release']\n"));
  assert!(!temp.path().join("build.ninja").exists());
}

#[test]
fn invalid_build_mode_fails_without_writing() {
  let temp = TempDir::new().unwrap();

  configure_cmd(&temp)
    .arg("--build=w32")
    .assert()
    .failure()
    .stderr(predicate::str::contains("w32"))
    .stderr(predicate::str::contains("release, debug, w64, w64-debug"));

  assert!(!temp.path().join("build.ninja").exists());
}

#[test]
fn multi_line_value_fails_without_writing() {
  let temp = TempDir::new().unwrap();

  configure_cmd(&temp)
    .arg("--force-version=1.0\nbuild evil: phony")
    .assert()
    .failure()
    .stderr(predicate::str::contains("value for --force-version must not contain line breaks"));

  assert!(!temp.path().join("build.ninja").exists());
}

#[test]
fn unknown_flag_fails() {
  let temp = TempDir::new().unwrap();

  configure_cmd(&temp).arg("--frobnicate").assert().failure();
}

#[test]
fn unwritable_output_fails() {
  let temp = TempDir::new().unwrap();

  configure_cmd(&temp)
    .args(["-o", "missing-dir/build.ninja"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to write descriptor"));
}
