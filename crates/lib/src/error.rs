//! Fatal configuration errors.
//!
//! Anything in this module aborts generation before a descriptor is written.
//! Recoverable problems are reported as [`crate::descriptor::Warning`]s instead.

use clap::error::{ContextKind, ContextValue, ErrorKind};
use thiserror::Error;

use crate::options::BuildMode;

/// Errors that stop generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
  /// An enumerated option received a value outside its closed set.
  #[error("invalid value '{value}' for {option} (possible values: {})", accepted.join(", "))]
  InvalidValue {
    option: String,
    value: String,
    accepted: Vec<String>,
  },

  /// A free-form value would span more than one descriptor line.
  #[error("value for {option} must not contain line breaks")]
  LineBreak { option: String },

  /// The argument vector was rejected for any other reason.
  #[error("{0}")]
  Usage(String),

  /// Eager package resolution was requested but no query tool is known.
  #[error("--no-defer-pkg-config was passed but there is no pkg-config for build type {mode}")]
  NoPackageQueryTool { mode: BuildMode },
}

fn context_string(err: &clap::Error, kind: ContextKind) -> Option<String> {
  match err.get(kind) {
    Some(ContextValue::String(s)) => Some(s.clone()),
    _ => None,
  }
}

impl From<clap::Error> for ConfigError {
  fn from(err: clap::Error) -> Self {
    if err.kind() == ErrorKind::InvalidValue {
      let accepted = match err.get(ContextKind::ValidValue) {
        Some(ContextValue::Strings(values)) => values.clone(),
        _ => Vec::new(),
      };
      if let (Some(option), Some(value)) = (
        context_string(&err, ContextKind::InvalidArg),
        context_string(&err, ContextKind::InvalidValue),
      ) {
        return ConfigError::InvalidValue {
          option,
          value,
          accepted,
        };
      }
    }
    ConfigError::Usage(err.render().to_string().trim_end().to_string())
  }
}
