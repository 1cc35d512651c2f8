use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

/// The closed set of build profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildMode {
  Release,
  #[default]
  Debug,
  /// Cross-compiled release build for 64-bit Windows.
  W64,
  /// Cross-compiled debug build for 64-bit Windows.
  W64Debug,
}

impl BuildMode {
  pub const ALL: [BuildMode; 4] = [Self::Release, Self::Debug, Self::W64, Self::W64Debug];

  /// Returns the identifier accepted by `--build`
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Release => "release",
      Self::Debug => "debug",
      Self::W64 => "w64",
      Self::W64Debug => "w64-debug",
    }
  }

  /// Whether this mode targets a platform other than the host.
  pub fn is_cross(&self) -> bool {
    matches!(self, Self::W64 | Self::W64Debug)
  }

  /// Whether this mode belongs to the debug family (and carries the `-debug` version token).
  pub fn is_debug(&self) -> bool {
    matches!(self, Self::Debug | Self::W64Debug)
  }

  /// Whether the sanitizer runtime can be linked at all in this mode.
  pub fn supports_sanitizer(&self) -> bool {
    !matches!(self, Self::W64)
  }

  pub fn default_cc(&self) -> &'static str {
    if self.is_cross() { "x86_64-w64-mingw32-gcc" } else { "gcc" }
  }

  pub fn default_glslc(&self) -> &'static str {
    "glslc"
  }

  /// The package query tool used when no `--pkg-config` is given.
  pub fn default_pkg_config(&self) -> Option<&'static str> {
    Some(if self.is_cross() {
      "x86_64-w64-mingw32-pkg-config"
    } else {
      "pkg-config"
    })
  }
}

impl fmt::Display for BuildMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// `-mtune=native` / `-march=native` selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BuildNative {
  #[default]
  None,
  Mtune,
  March,
  Both,
}

impl BuildNative {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::None => "none",
      Self::Mtune => "mtune",
      Self::March => "march",
      Self::Both => "both",
    }
  }

  /// Compile flags contributed by this setting, if any.
  pub fn cflags(&self) -> Option<&'static str> {
    match self {
      Self::None => None,
      Self::Mtune => Some("-mtune=native"),
      Self::March => Some("-march=native"),
      Self::Both => Some("-march=native -mtune=native"),
    }
  }
}

/// Optional tools that can be disabled by name with `--disable-tool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Tool {
  GenerateDfield,
}

impl Tool {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::GenerateDfield => "generate-dfield",
    }
  }
}

impl fmt::Display for Tool {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Which argument parsing implementation tools are linked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgParser {
  /// GNU argp, the rich parser.
  #[default]
  Argp,
  /// Plain getopt, the simplified parser.
  Getopt,
}

/// When an external query (package flags, version) is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStrategy {
  /// Embed a shell expression re-evaluated on every graph execution.
  #[default]
  Deferred,
  /// Run the query during generation and embed its output literally.
  Eager,
}

impl QueryStrategy {
  pub fn from_deferred(deferred: bool) -> Self {
    if deferred { Self::Deferred } else { Self::Eager }
  }
}
