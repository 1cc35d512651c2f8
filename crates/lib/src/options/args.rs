use clap::{ArgAction, Args, Parser};

use super::types::{BuildMode, BuildNative, Tool};
use crate::consts::APP_NAME;

/// Raw configuration flags, exactly as accepted on the command line.
///
/// Flattened into the CLI's own parser; converted into an [`super::OptionSet`]
/// before anything else looks at it.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigureArgs {
  /// Override compiler flags (and CFLAGS)
  #[arg(long)]
  pub cflags: Option<String>,

  /// Override compiler flags when linking (and LDFLAGS)
  #[arg(long)]
  pub ldflags: Option<String>,

  /// Override cc (and CC)
  #[arg(long)]
  pub cc: Option<String>,

  /// Override glslc (and GLSLC)
  #[arg(long)]
  pub glslc: Option<String>,

  /// Override pkg-config
  #[arg(long = "pkg-config")]
  pub pkg_config: Option<String>,

  /// Set the build type
  #[arg(long, value_enum, default_value_t = BuildMode::Debug)]
  pub build: BuildMode,

  /// Enable compatibility mode for older compilers
  #[arg(long)]
  pub enable_compatible: bool,

  /// Don't enable the sanitizer in debug mode
  #[arg(long)]
  pub disable_sanitize: bool,

  /// Include -fanalyzer in c flags
  #[arg(long)]
  pub fanalyzer: bool,

  /// Build with mtune=native and/or march=native
  #[arg(long, value_enum, default_value_t = BuildNative::None)]
  pub build_native: BuildNative,

  /// Build releases with -O3
  #[arg(long = "O3", visible_alias = "o3")]
  pub o3: bool,

  /// Don't build a specific tool
  #[arg(long = "disable-tool", value_enum, action = ArgAction::Append)]
  pub disable_tool: Vec<Tool>,

  /// Don't build any tools
  #[arg(long)]
  pub disable_all_tools: bool,

  /// Don't build the client
  #[arg(long)]
  pub disable_client: bool,

  /// Fall back to getopt for argument parsing
  #[arg(long, overrides_with = "enable_argp")]
  pub disable_argp: bool,

  /// Use argp for argument parsing (default; cross builds ignore this)
  #[arg(long, overrides_with = "disable_argp")]
  pub enable_argp: bool,

  /// Override the version string
  #[arg(long, value_name = "STRING")]
  pub force_version: Option<String>,

  /// Append to the version string
  #[arg(long, value_name = "SUFFIX")]
  pub add_version_suffix: Option<String>,

  /// Run git describe when ninja is run, not at generation (default)
  #[arg(long, overrides_with = "no_defer_git_describe")]
  pub defer_git_describe: bool,

  /// Run git describe at generation, not when ninja is run
  #[arg(long, overrides_with = "defer_git_describe")]
  pub no_defer_git_describe: bool,

  /// Run pkg-config when ninja is run, not at generation (default)
  #[arg(long, overrides_with = "no_defer_pkg_config")]
  pub defer_pkg_config: bool,

  /// Run pkg-config at generation, not when ninja is run
  #[arg(long, overrides_with = "defer_pkg_config")]
  pub no_defer_pkg_config: bool,
}

/// Parser for a bare argument vector, used when there is no surrounding CLI.
#[derive(Debug, Parser)]
#[command(name = APP_NAME, no_binary_name = true)]
pub(super) struct StandaloneArgs {
  #[command(flatten)]
  pub(super) args: ConfigureArgs,
}
