//! The option model.
//!
//! [`ConfigureArgs`] is the raw flag surface; [`OptionSet`] is the validated,
//! normalized configuration every later stage reads. After conversion nothing
//! downstream looks at raw arguments again.

mod args;
mod types;

pub use args::ConfigureArgs;
pub use types::*;

use std::collections::BTreeSet;
use std::ffi::OsString;

use clap::Parser;

use crate::error::ConfigError;
use args::StandaloneArgs;

/// Fully parsed configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionSet {
  pub build: BuildMode,

  pub cc: Option<String>,
  pub glslc: Option<String>,
  pub pkg_config: Option<String>,
  pub cflags: Option<String>,
  pub ldflags: Option<String>,

  pub enable_compatible: bool,
  pub disable_sanitize: bool,
  pub fanalyzer: bool,
  pub build_native: BuildNative,
  pub o3: bool,

  pub disabled_tools: BTreeSet<Tool>,
  pub disable_all_tools: bool,
  pub disable_client: bool,
  pub arg_parser: ArgParser,

  pub force_version: Option<String>,
  pub version_suffix: Option<String>,
  pub version_query: QueryStrategy,
  pub package_query: QueryStrategy,
}

impl OptionSet {
  /// Parse and validate a bare argument vector (without the program name).
  pub fn from_args<I, T>(argv: I) -> Result<Self, ConfigError>
  where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
  {
    let parsed = StandaloneArgs::try_parse_from(argv)?;
    parsed.args.try_into()
  }

  pub fn is_tool_disabled(&self, tool: Tool) -> bool {
    self.disabled_tools.contains(&tool)
  }
}

/// Validate a free-form override.
///
/// Empty overrides behave as if the flag was never passed. Every value ends up
/// on a single descriptor line, so line breaks are rejected.
fn single_line(flag: &str, value: Option<String>) -> Result<Option<String>, ConfigError> {
  match value.filter(|v| !v.is_empty()) {
    Some(v) if v.contains(['\n', '\r']) => Err(ConfigError::LineBreak {
      option: flag.to_string(),
    }),
    other => Ok(other),
  }
}

impl TryFrom<ConfigureArgs> for OptionSet {
  type Error = ConfigError;

  fn try_from(args: ConfigureArgs) -> Result<Self, Self::Error> {
    Ok(Self {
      build: args.build,
      cc: single_line("--cc", args.cc)?,
      glslc: single_line("--glslc", args.glslc)?,
      pkg_config: single_line("--pkg-config", args.pkg_config)?,
      cflags: single_line("--cflags", args.cflags)?,
      ldflags: single_line("--ldflags", args.ldflags)?,
      enable_compatible: args.enable_compatible,
      disable_sanitize: args.disable_sanitize,
      fanalyzer: args.fanalyzer,
      build_native: args.build_native,
      o3: args.o3,
      disabled_tools: args.disable_tool.into_iter().collect(),
      disable_all_tools: args.disable_all_tools,
      disable_client: args.disable_client,
      arg_parser: if args.disable_argp {
        ArgParser::Getopt
      } else {
        ArgParser::Argp
      },
      force_version: single_line("--force-version", args.force_version)?,
      version_suffix: single_line("--add-version-suffix", args.add_version_suffix)?,
      version_query: QueryStrategy::from_deferred(!args.no_defer_git_describe),
      package_query: QueryStrategy::from_deferred(!args.no_defer_pkg_config),
    })
  }
}
