use std::fmt;

use serde::Serialize;

use crate::descriptor::Descriptor;

/// Rules the generated graph uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rule {
  /// Compile one C source to an object file.
  Cc,
  /// Link objects into an executable.
  Bin,
  /// Compile one GLSL shader to SPIR-V.
  Glslc,
  /// Ninja's built-in grouping rule.
  Phony,
}

impl Rule {
  /// Rules that need a definition in the descriptor, in emission order.
  pub const DEFINED: [Rule; 3] = [Rule::Cc, Rule::Bin, Rule::Glslc];

  pub fn as_str(&self) -> &'static str {
    match self {
      Rule::Cc => "cc",
      Rule::Bin => "bin",
      Rule::Glslc => "glslc",
      Rule::Phony => "phony",
    }
  }

  /// The command line, or `None` for the built-in `phony`.
  pub fn command(&self) -> Option<&'static str> {
    match self {
      Rule::Cc => Some("$cc $std $includes -MMD -MF $out.d $defines $cflags $in -c -o $out"),
      Rule::Bin => Some("$cc $std $includes -MMD -MF $out.d $defines $cflags $in -o $out $ldflags $libs"),
      Rule::Glslc => {
        Some("$glslc -Werror -MD -MF $out.d $glsldefines -fshader-stage=$stage $glslflags $in -o $out")
      }
      Rule::Phony => None,
    }
  }

  /// Map a source path to the artifact this rule produces from it.
  ///
  /// Paths without the rule's input extension pass through unchanged.
  pub fn transform(&self, source: &str) -> String {
    let rewrite = match self {
      Rule::Cc => Some((".c", ".o")),
      Rule::Glslc => Some((".glsl", ".spv")),
      Rule::Bin | Rule::Phony => None,
    };
    match rewrite.and_then(|(from, to)| source.strip_suffix(from).map(|stem| format!("{stem}{to}"))) {
      Some(artifact) => artifact,
      None => source.to_string(),
    }
  }
}

impl fmt::Display for Rule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Emit every rule definition, each followed by a blank line.
pub fn emit_rules(descriptor: &mut Descriptor) {
  for rule in Rule::DEFINED {
    if let Some(command) = rule.command() {
      descriptor.rule(rule.as_str(), command, Some("$out.d"), Some("gcc"));
      descriptor.newline();
    }
  }
}
