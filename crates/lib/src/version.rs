//! Version string composition.
//!
//! The version is built from, in order: a base (`--force-version`, or the
//! output of `git describe` evaluated now or deferred to graph execution), a
//! `-debug` token for debug-family modes unless the base was forced, and the
//! user suffix from `--add-version-suffix`.

use serde::Serialize;
use tracing::debug;

use crate::consts::{DEBUG_VERSION_SUFFIX, GIT, GIT_DESCRIBE_ARGS, UNKNOWN_VERSION};
use crate::descriptor::{Descriptor, Warning};
use crate::exec::{CommandRunner, run_query};
use crate::options::{OptionSet, QueryStrategy};

/// Where the first component of the version comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum VersionBase {
  /// `--force-version`.
  Forced(String),
  /// `git describe` run at graph execution time.
  Deferred,
  /// `git describe` output captured during generation.
  Described(String),
}

impl VersionBase {
  /// Shell expression evaluating `git describe`, with `$` escaped for ninja.
  pub fn deferred_expression() -> String {
    format!("$$({} {})", GIT, GIT_DESCRIBE_ARGS.join(" "))
  }

  /// Determine the base, running `git describe` now if the version query is eager.
  pub fn resolve(opts: &OptionSet, runner: &dyn CommandRunner, descriptor: &mut Descriptor) -> Self {
    if let Some(forced) = &opts.force_version {
      return Self::Forced(forced.clone());
    }
    match opts.version_query {
      QueryStrategy::Deferred => Self::Deferred,
      QueryStrategy::Eager => {
        let out = run_query(runner, GIT, GIT_DESCRIBE_ARGS);
        if out.success && !out.stdout.is_empty() {
          debug!(version = %out.stdout, "described version");
          return Self::Described(out.stdout);
        }
        let fallback = if out.stdout.is_empty() {
          UNKNOWN_VERSION.to_string()
        } else {
          out.stdout
        };
        descriptor.warn(Warning::VersionQueryFailed {
          tool: GIT.to_string(),
          fallback: fallback.clone(),
        });
        Self::Described(fallback)
      }
    }
  }

  /// Emit the base `version` variable.
  pub fn emit(&self, descriptor: &mut Descriptor) {
    match self {
      Self::Forced(version) => {
        descriptor.comment(&format!(
          "the following version was set at generation by --force-version={version}"
        ));
        descriptor.variable("version", version);
      }
      Self::Deferred => descriptor.variable("version", &Self::deferred_expression()),
      Self::Described(version) => {
        descriptor.comment("the following version was set at generation by git describe");
        descriptor.variable("version", version);
      }
    }
  }
}

/// The full composition, kept for reporting and for checking the composition order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionPlan {
  pub base: VersionBase,
  pub debug: bool,
  pub suffix: Option<String>,
}

impl VersionPlan {
  pub fn new(base: VersionBase, opts: &OptionSet) -> Self {
    let debug = opts.build.is_debug() && !matches!(base, VersionBase::Forced(_));
    Self {
      base,
      debug,
      suffix: opts.version_suffix.clone(),
    }
  }

  /// The final version, given what `git describe` evaluates to.
  ///
  /// `describe` is only consulted for a deferred base.
  pub fn compose(&self, describe: &str) -> String {
    let mut version = match &self.base {
      VersionBase::Forced(v) | VersionBase::Described(v) => v.clone(),
      VersionBase::Deferred => describe.to_string(),
    };
    if self.debug {
      version.push('-');
      version.push_str(DEBUG_VERSION_SUFFIX);
    }
    if let Some(suffix) = &self.suffix {
      version.push('-');
      version.push_str(suffix);
    }
    version
  }

  /// The version as a shell expression, for display.
  pub fn expression(&self) -> String {
    self.compose(&format!("$({} {})", GIT, GIT_DESCRIBE_ARGS.join(" ")))
  }
}

/// Emit the `-debug` token, or a note on why it is missing.
pub fn emit_debug_suffix(opts: &OptionSet, descriptor: &mut Descriptor) {
  if opts.force_version.is_some() {
    descriptor.comment("not appending -debug because we were generated with --force-version=");
  } else {
    descriptor.variable("version", &format!("\"$version\"-{DEBUG_VERSION_SUFFIX}"));
  }
}

/// Emit the user suffix. Returns whether anything was written.
pub fn emit_user_suffix(opts: &OptionSet, descriptor: &mut Descriptor) -> bool {
  match &opts.version_suffix {
    Some(suffix) => {
      descriptor.variable("version", &format!("\"$version\"-{suffix}"));
      true
    }
    None => false,
  }
}

/// Emit the `VERSION` preprocessor define.
pub fn emit_define(descriptor: &mut Descriptor) {
  descriptor.variable("defines", "$defines -DVERSION=\"\\\"$version\\\"\"");
}
