//! Tests for the whole generation pipeline through the public API.

use ninjagen_lib::ConfigError;
use ninjagen_lib::exec::QueryOutput;
use ninjagen_lib::graph::Aggregate;
use ninjagen_lib::options::BuildMode;

use super::common::run;

mod precedence {
  use super::*;

  #[test]
  fn override_beats_environment_and_default() {
    let generated = run(&["--glslc=glslangValidator"], &[("GLSLC", "/opt/glslc")], None).unwrap();

    assert!(generated.text.contains("glslc = glslangValidator\n"));
    assert_eq!(generated.report.warnings.len(), 1);
    assert!(generated.report.warnings[0].starts_with("GLSLC environment variable is set"));
  }

  #[test]
  fn empty_environment_value_is_ignored() {
    let generated = run(&[], &[("CC", "")], None).unwrap();
    assert!(generated.text.contains("\ncc = gcc\n"));
    assert!(!generated.text.contains("because CC was set"));
  }

  #[test]
  fn link_flags_from_environment_replace_defaults() {
    let generated = run(&["--build=release"], &[("LDFLAGS", "-Wl,--as-needed")], None).unwrap();
    let text = &generated.text;
    assert!(text.contains("# these are overriden below because LDFLAGS was set\nldflags =\n"));
    assert!(text.contains("ldflags = -Wl,--as-needed\n"));
  }
}

mod modes {
  use super::*;

  #[test]
  fn every_mode_generates() {
    for mode in BuildMode::ALL {
      let generated = run(&["--build", mode.as_str()], &[], None).unwrap();
      assert_eq!(generated.report.build, mode);
      assert!(generated.text.contains(&format!("# build mode: {mode}\n")));
    }
  }

  #[test]
  fn w64_debug_keeps_sanitizer_and_debug_token() {
    let text = run(&["--build=w64-debug"], &[], None).unwrap().text;
    assert!(text.contains("sanflags = -fsanitize=address,undefined\n"));
    assert!(text.contains("version = \"$version\"-debug\n"));
    assert!(text.contains("windows = -lgdi32 -mwindows\n"));
  }

  #[test]
  fn disable_sanitize_is_explained() {
    let text = run(&["--disable-sanitize"], &[], None).unwrap().text;
    assert!(text.contains("# -fsanitize disabled because we were generated with --disable-sanitize\nsanflags =\n"));
  }

  #[test]
  fn last_parser_flag_wins_on_native_builds() {
    let argp = run(&["--disable-argp", "--enable-argp"], &[], None).unwrap();
    assert!(argp.text.contains("args_argp.o\n  libs = -lm -fopenmp $lzma_libs\n"));
    assert!(!argp.text.contains("with getopt"));

    let getopt = run(&["--enable-argp", "--disable-argp"], &[], None).unwrap();
    assert!(getopt.text.contains("args_getopt.o\n  libs = -lm -fopenmp $lzma_libs\n"));
  }
}

mod packages {
  use super::*;

  #[test]
  fn eager_query_output_is_embedded() {
    let output = QueryOutput {
      success: true,
      stdout: "-lfoo".to_string(),
    };
    let generated = run(&["--no-defer-pkg-config"], &[], Some(output)).unwrap();

    assert!(generated.text.contains("vulkan_libs = -lfoo\n"));
    assert!(generated.text.contains("lzma_cflags = -lfoo\n"));
    assert!(generated.report.warnings.is_empty());
  }

  #[test]
  fn failing_query_warns_once_per_package() {
    let output = QueryOutput {
      success: false,
      stdout: String::new(),
    };
    let generated = run(&["--no-defer-pkg-config"], &[], Some(output)).unwrap();

    assert_eq!(generated.report.warnings.len(), 3);
    assert_eq!(generated.report.packages.len(), 3);
  }

  #[test]
  fn last_defer_flag_wins() {
    let generated = run(&["--no-defer-pkg-config", "--defer-pkg-config"], &[], None).unwrap();
    assert!(generated.text.contains("glfw3_cflags = $$($pkgconfig --cflags glfw3)\n"));
  }
}

mod targets {
  use super::*;

  #[test]
  fn all_matches_enabled_targets() {
    for args in [
      vec![],
      vec!["--disable-client"],
      vec!["--disable-all-tools"],
      vec!["--disable-client", "--disable-tool=generate-dfield"],
    ] {
      let report = run(&args, &[], None).unwrap().report;
      let all = report.aggregates.get(&Aggregate::All).cloned().unwrap_or_default();
      assert_eq!(all, report.enabled_targets, "args: {args:?}");
      for disabled in &report.disabled_targets {
        assert!(!all.contains(&disabled.name));
      }
    }
  }

  #[test]
  fn repeated_tool_disable_is_one_reason() {
    let report = run(
      &["--disable-tool=generate-dfield", "--disable-tool=generate-dfield"],
      &[],
      None,
    )
    .unwrap()
    .report;
    assert_eq!(report.disabled_targets[0].reasons.len(), 1);
  }
}

mod errors {
  use super::*;

  #[test]
  fn unknown_tool_is_rejected() {
    let err = run(&["--disable-tool=frobnicate"], &[], None).unwrap_err();
    match err {
      ConfigError::InvalidValue { value, accepted, .. } => {
        assert_eq!(value, "frobnicate");
        assert_eq!(accepted, vec!["generate-dfield"]);
      }
      other => panic!("unexpected error {other:?}"),
    }
  }

  #[test]
  fn unknown_native_mode_is_rejected() {
    let err = run(&["--build-native=znver4"], &[], None).unwrap_err();
    assert!(err.to_string().contains("none, mtune, march, both"));
  }
}
