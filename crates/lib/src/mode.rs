//! Build mode policy.
//!
//! Maps the selected [`BuildMode`] to the language dialect, optimization,
//! debug-symbol and sanitizer settings it implies, and derives the options a
//! mode forces on the user (cross builds cannot link argp).

use tracing::debug;

use crate::consts::{
  BASE_INCLUDES, COMPAT_DEFINES, CROSS_INCLUDES, CROSS_LIBS, SANITIZER_FLAGS, STD_COMPAT, STD_DEFAULT,
};
use crate::descriptor::{Descriptor, Warning};
use crate::options::{ArgParser, BuildMode, OptionSet};
use crate::version;

/// A value a build mode set regardless of what was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForcedOverride {
  /// The flag the mode implies.
  pub option: &'static str,
  pub mode: BuildMode,
}

/// Options after mode-implied overrides have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derived {
  pub options: OptionSet,
  pub forced: Vec<ForcedOverride>,
}

/// Apply the overrides a build mode forces. The input is left untouched.
pub fn derive_options(opts: &OptionSet) -> Derived {
  let mut options = opts.clone();
  let mut forced = Vec::new();

  if opts.build.is_cross() {
    if opts.arg_parser != ArgParser::Getopt {
      debug!(mode = %opts.build, "forcing getopt for cross build");
    }
    options.arg_parser = ArgParser::Getopt;
    forced.push(ForcedOverride {
      option: "--disable-argp",
      mode: opts.build,
    });
  }

  Derived { options, forced }
}

/// Why the sanitizer flag set is what it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sanitizer {
  Enabled,
  UnsupportedByMode(BuildMode),
  DisabledByFlag,
}

impl Sanitizer {
  /// Mode support is checked first: an unsupported mode never reports the flag.
  pub fn for_options(opts: &OptionSet) -> Self {
    if !opts.build.supports_sanitizer() {
      Self::UnsupportedByMode(opts.build)
    } else if opts.disable_sanitize {
      Self::DisabledByFlag
    } else {
      Self::Enabled
    }
  }

  pub fn flags(&self) -> &'static str {
    match self {
      Self::Enabled => SANITIZER_FLAGS,
      Self::UnsupportedByMode(_) | Self::DisabledByFlag => "",
    }
  }
}

/// The variable bundle a build mode contributes to the descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModePolicy {
  pub mode: BuildMode,
  pub std: &'static str,
  /// Appended to `$cflags`.
  pub cflags: String,
  pub cross_libs: Option<&'static str>,
  pub cross_includes: Option<&'static str>,
  pub compat_defines: bool,
  pub ndebug: bool,
}

fn optimization(opts: &OptionSet) -> &'static str {
  if opts.o3 { "-O3" } else { "-O2" }
}

impl ModePolicy {
  pub fn for_options(opts: &OptionSet) -> Self {
    let std = if opts.enable_compatible { STD_COMPAT } else { STD_DEFAULT };
    let (cflags, ndebug) = match opts.build {
      BuildMode::Debug => ("$cflags $sanflags -g3 -Og".to_string(), false),
      BuildMode::Release => (format!("$cflags {}", optimization(opts)), true),
      BuildMode::W64 => (format!("$cflags -static {}", optimization(opts)), true),
      BuildMode::W64Debug => ("$cflags -static -static-libubsan -g3 -Og".to_string(), false),
    };
    let cross = opts.build.is_cross();

    Self {
      mode: opts.build,
      std,
      cflags,
      cross_libs: cross.then_some(CROSS_LIBS),
      cross_includes: cross.then_some(CROSS_INCLUDES),
      compat_defines: opts.enable_compatible,
      ndebug,
    }
  }
}

/// Emit native tuning, the sanitizer set and the base include path.
pub fn emit_common(opts: &OptionSet, descriptor: &mut Descriptor) {
  if let Some(flags) = opts.build_native.cflags() {
    descriptor.comment(&format!(
      "adding cflags for --build-native={}",
      opts.build_native.as_str()
    ));
    descriptor.variable("cflags", &format!("$cflags {flags}"));
  }

  let sanitizer = Sanitizer::for_options(opts);
  match sanitizer {
    Sanitizer::UnsupportedByMode(mode) => {
      descriptor.comment(&format!("-fsanitize disabled for {mode} builds"));
    }
    Sanitizer::DisabledByFlag => {
      descriptor.comment("-fsanitize disabled because we were generated with --disable-sanitize");
    }
    Sanitizer::Enabled => {}
  }
  descriptor.variable("sanflags", sanitizer.flags());

  descriptor.variable("includes", BASE_INCLUDES);
  descriptor.newline();
}

/// Emit the mode block.
pub fn emit_mode(policy: &ModePolicy, derived: &Derived, descriptor: &mut Descriptor) {
  let opts = &derived.options;

  if opts.o3 && policy.mode.is_debug() {
    descriptor.warn(Warning::OptionIgnored {
      option: "--O3".to_string(),
      mode: policy.mode,
    });
  }

  descriptor.comment(&format!("build mode: {}", policy.mode));
  for forced in &derived.forced {
    descriptor.comment(&format!("(this implies {})", forced.option));
  }
  if opts.o3 && !policy.mode.is_debug() {
    descriptor.comment("setting -O3 because we were generated with --O3");
  }

  descriptor.variable("std", policy.std);
  descriptor.variable("cflags", &policy.cflags);

  if let Some(libs) = policy.cross_libs {
    descriptor.variable("windows", libs);
  }

  if policy.compat_defines {
    descriptor.comment("adding compatibility defines because we were generated with --enable-compatible");
    descriptor.variable("defines", &format!("$defines {COMPAT_DEFINES}"));
  }

  if let Some(includes) = policy.cross_includes {
    descriptor.variable("includes", &format!("$includes {includes}"));
  }

  if policy.ndebug {
    descriptor.variable("defines", "$defines -DNDEBUG");
  }

  if policy.mode.is_debug() {
    version::emit_debug_suffix(opts, descriptor);
  }
  descriptor.newline();
}
