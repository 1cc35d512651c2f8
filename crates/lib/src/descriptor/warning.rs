use std::fmt;

use crate::options::BuildMode;

/// A non-fatal degradation recorded during generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
  /// An environment variable lost to an explicit flag.
  EnvironmentShadowed { variable: String, flag: String },

  /// The package query tool exited non-zero during eager resolution.
  PackageQueryFailed { tool: String, package: String },

  /// `git describe` failed during eager version resolution.
  VersionQueryFailed { tool: String, fallback: String },

  /// A flag has no effect in the selected build mode.
  OptionIgnored { option: String, mode: BuildMode },
}

impl fmt::Display for Warning {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Warning::EnvironmentShadowed { variable, flag } => write!(
        f,
        "{variable} environment variable is set but will be ignored because {flag}= was passed"
      ),
      Warning::PackageQueryFailed { tool, package } => {
        write!(f, "{tool} exited non-zero for library {package}")
      }
      Warning::VersionQueryFailed { tool, fallback } => {
        write!(f, "{tool} describe failed, using version '{fallback}'")
      }
      Warning::OptionIgnored { option, mode } => {
        write!(f, "ignoring option {option} for {mode} build")
      }
    }
  }
}
