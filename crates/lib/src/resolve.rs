//! Precedence resolution for tools and flag sets.
//!
//! Every overridable value is resolved as
//! `explicit flag > environment variable > build-mode default`.
//! An environment value that loses to an explicit flag is reported as a
//! [`Warning::EnvironmentShadowed`] rather than silently dropped.

use tracing::debug;

use crate::consts::BASE_CFLAGS;
use crate::descriptor::{Descriptor, Warning};
use crate::env::Environment;
use crate::options::{BuildMode, OptionSet};

/// A value that can be set by flag, environment, or mode default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setting {
  /// Human name used in comments ("cc", "pkg-config").
  pub name: &'static str,
  /// Descriptor variable holding the resolved value.
  pub variable: &'static str,
  pub flag: &'static str,
  pub env: Option<&'static str>,
}

pub const CC: Setting = Setting {
  name: "cc",
  variable: "cc",
  flag: "--cc",
  env: Some("CC"),
};

pub const GLSLC: Setting = Setting {
  name: "glslc",
  variable: "glslc",
  flag: "--glslc",
  env: Some("GLSLC"),
};

pub const PKG_CONFIG: Setting = Setting {
  name: "pkg-config",
  variable: "pkgconfig",
  flag: "--pkg-config",
  env: None,
};

pub const CFLAGS: Setting = Setting {
  name: "cflags",
  variable: "cflags",
  flag: "--cflags",
  env: Some("CFLAGS"),
};

pub const LDFLAGS: Setting = Setting {
  name: "ldflags",
  variable: "ldflags",
  flag: "--ldflags",
  env: Some("LDFLAGS"),
};

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
  Override,
  Environment,
  Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
  pub value: Option<String>,
  pub source: Source,
}

/// Resolve one setting, recording a warning if an environment value is shadowed.
pub fn resolve(
  setting: &Setting,
  explicit: Option<&str>,
  env: &dyn Environment,
  default: Option<&str>,
  descriptor: &mut Descriptor,
) -> Resolved {
  let from_env = setting.env.and_then(|key| env.var(key).map(|value| (key, value)));

  if let Some(value) = explicit {
    if let Some((key, _)) = from_env {
      descriptor.warn(Warning::EnvironmentShadowed {
        variable: key.to_string(),
        flag: setting.flag.to_string(),
      });
    }
    return Resolved {
      value: Some(value.to_string()),
      source: Source::Override,
    };
  }

  if let Some((_, value)) = from_env {
    return Resolved {
      value: Some(value),
      source: Source::Environment,
    };
  }

  Resolved {
    value: default.map(str::to_string),
    source: Source::Default,
  }
}

/// Tools and flag overrides after precedence resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTools {
  pub cc: Resolved,
  pub glslc: Resolved,
  pub pkg_config: Resolved,
  /// Replaces the computed compile flags when present.
  pub cflags: Resolved,
  /// Replaces the computed link flags when present.
  pub ldflags: Resolved,
}

impl ResolvedTools {
  /// The package query tool, if one could be determined for this mode.
  pub fn pkg_config(&self) -> Option<&str> {
    self.pkg_config.value.as_deref()
  }
}

pub fn resolve_tools(opts: &OptionSet, env: &dyn Environment, descriptor: &mut Descriptor) -> ResolvedTools {
  let mode = opts.build;
  let tools = ResolvedTools {
    cc: resolve(&CC, opts.cc.as_deref(), env, Some(mode.default_cc()), descriptor),
    glslc: resolve(&GLSLC, opts.glslc.as_deref(), env, Some(mode.default_glslc()), descriptor),
    pkg_config: resolve(
      &PKG_CONFIG,
      opts.pkg_config.as_deref(),
      env,
      mode.default_pkg_config(),
      descriptor,
    ),
    cflags: resolve(&CFLAGS, opts.cflags.as_deref(), env, None, descriptor),
    ldflags: resolve(&LDFLAGS, opts.ldflags.as_deref(), env, None, descriptor),
  };
  debug!(cc = ?tools.cc.value, glslc = ?tools.glslc.value, pkg_config = ?tools.pkg_config.value, "resolved tools");
  tools
}

fn emit_tool(setting: &Setting, resolved: &Resolved, default: Option<&str>, descriptor: &mut Descriptor) {
  let Some(value) = resolved.value.as_deref() else {
    return;
  };
  match resolved.source {
    Source::Override if Some(value) != default => descriptor.comment(&format!(
      "using this {} because we were generated with {}={value}",
      setting.name, setting.flag
    )),
    Source::Environment => {
      if let Some(key) = setting.env {
        descriptor.comment(&format!("using this {} because {key} was set", setting.name));
      }
    }
    _ => {}
  }
  descriptor.variable(setting.variable, value);
}

/// Emit the `cc`, `glslc` and `pkgconfig` variables.
pub fn emit_tools(tools: &ResolvedTools, mode: BuildMode, descriptor: &mut Descriptor) {
  emit_tool(&CC, &tools.cc, Some(mode.default_cc()), descriptor);
  emit_tool(&GLSLC, &tools.glslc, Some(mode.default_glslc()), descriptor);
  emit_tool(&PKG_CONFIG, &tools.pkg_config, None, descriptor);
}

fn note_flag_override(setting: &Setting, resolved: &Resolved, descriptor: &mut Descriptor) {
  match (&resolved.source, resolved.value.as_deref()) {
    (Source::Override, Some(value)) => descriptor.comment(&format!(
      "these are overriden below because we were generated with {}={value}",
      setting.flag
    )),
    (Source::Environment, _) => {
      if let Some(key) = setting.env {
        descriptor.comment(&format!("these are overriden below because {key} was set"));
      }
    }
    _ => {}
  }
}

/// Emit the base compile and link flags that the mode block extends.
pub fn emit_flag_defaults(tools: &ResolvedTools, opts: &OptionSet, descriptor: &mut Descriptor) {
  note_flag_override(&CFLAGS, &tools.cflags, descriptor);
  descriptor.variable("cflags", BASE_CFLAGS);

  if opts.fanalyzer {
    descriptor.comment("enabling -fanalyzer because we were generated with --fanalyzer");
    descriptor.variable("cflags", "$cflags -fanalyzer");
  }

  note_flag_override(&LDFLAGS, &tools.ldflags, descriptor);
  descriptor.variable("ldflags", "");
}

/// Emit the final compile/link flag replacements. Returns whether anything was written.
pub fn emit_flag_overrides(tools: &ResolvedTools, descriptor: &mut Descriptor) -> bool {
  let mut wrote = false;
  for (setting, resolved) in [(&CFLAGS, &tools.cflags), (&LDFLAGS, &tools.ldflags)] {
    if let Some(value) = resolved.value.as_deref() {
      descriptor.variable(setting.variable, value);
      wrote = true;
    }
  }
  wrote
}
