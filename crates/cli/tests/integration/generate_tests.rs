//! End-to-end tests: flags in, descriptor and report out.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn debug_build_links_client_and_tools() {
  let env = TestEnv::new();
  let text = env.generate(&[]);

  assert!(text.contains("# build mode: debug\n"));
  assert!(text.contains("build snrkos: bin $builddir/main.o"));
  assert!(text.contains("build tools: phony tools/generate-dfield\n"));
  assert!(text.contains("build all: phony snrkos tools/generate-dfield\n"));
}

#[test]
fn release_o3_sets_higher_optimization() {
  let env = TestEnv::new();
  let text = env.generate(&["--build=release", "--O3"]);

  assert!(text.contains("# setting -O3 because we were generated with --O3\n"));
  assert!(text.contains("cflags = $cflags -O3\n"));
  assert!(text.contains("defines = $defines -DNDEBUG\n"));
}

#[test]
fn cross_build_documents_forced_getopt() {
  let env = TestEnv::new();
  let text = env.generate(&["--build", "w64", "--enable-argp"]);

  assert!(text.contains("# (this implies --disable-argp)\n"));
  assert!(text.contains("args_getopt.o\n  libs = -lm -fopenmp $lzma_libs\n"));
  assert!(text.contains("build all: phony snrkos.exe tools/generate-dfield.exe\n"));
  assert!(text.contains("# -fsanitize disabled for w64 builds\n"));
}

#[test]
fn disabled_targets_explain_every_reason() {
  let env = TestEnv::new();
  let text = env.generate(&[
    "--disable-client",
    "--disable-tool=generate-dfield",
    "--disable-all-tools",
  ]);

  assert!(text.contains("# snrkos is disabled because we were generated with --disable-client\n"));
  assert!(text.contains("# tools/generate-dfield is disabled because:\n"));
  assert!(text.contains("# NOTE: no tools target because there are no enabled tools\n"));
  assert!(text.contains("build all: phony\n"));
}

#[test]
fn shadowed_environment_warns_on_stderr_and_in_descriptor() {
  let env = TestEnv::new();

  env
    .cmd()
    .env("CC", "clang")
    .arg("--cc=tcc")
    .assert()
    .success()
    .stderr(predicate::str::contains(
      "CC environment variable is set but will be ignored because --cc= was passed",
    ));

  let text = env.descriptor();
  assert!(text.contains("# WARNING: CC environment variable is set but will be ignored"));
  assert!(text.contains("cc = tcc\n"));
}

#[test]
fn environment_compiler_is_used_without_flag() {
  let env = TestEnv::new();

  env.cmd().env("CC", "clang").assert().success();

  let text = env.descriptor();
  assert!(text.contains("# using this cc because CC was set\ncc = clang\n"));
}

#[test]
fn forced_version_suppresses_debug_suffix() {
  let env = TestEnv::new();
  let text = env.generate(&["--force-version=1.2.3", "--add-version-suffix=beta"]);

  assert!(text.contains("version = 1.2.3\n"));
  assert!(text.contains("# not appending -debug because we were generated with --force-version=\n"));
  assert!(text.contains("version = \"$version\"-beta\n"));
}

#[test]
fn eager_package_query_with_missing_tool_degrades() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["--no-defer-pkg-config", "--pkg-config=/nonexistent/ninjagen-pkg-config"])
    .assert()
    .success()
    .stderr(predicate::str::contains("exited non-zero for library vulkan"));

  let text = env.descriptor();
  assert!(text.contains("# WARNING: /nonexistent/ninjagen-pkg-config exited non-zero for library glfw3\n"));
  assert!(text.contains("lzma_libs =\n"));
}

#[test]
fn json_report_lists_targets() {
  let env = TestEnv::new();

  let output = env
    .cmd()
    .args(["--json", "--disable-client"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["build"], "debug");
  assert_eq!(report["enabled_targets"], serde_json::json!(["tools/generate-dfield"]));
  assert_eq!(report["disabled_targets"][0]["name"], "snrkos");
  assert_eq!(report["aggregates"]["tools"], serde_json::json!(["tools/generate-dfield"]));
}
