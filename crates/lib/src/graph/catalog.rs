//! The fixed set of sources, binaries and packages the project builds.

use std::fmt;

use serde::Serialize;

use super::rule::Rule;
use crate::options::{OptionSet, Tool};
use crate::packages::Package;

const SOURCE_PREFIX: &str = "src/";
const OUTPUT_PREFIX: &str = "$builddir/";

/// One source file compiled by one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEdge {
  pub source: &'static str,
  pub rule: Rule,
  pub input_prefix: &'static str,
  pub output_prefix: &'static str,
  /// Replaces `$cflags` on this edge.
  pub cflags: Option<&'static str>,
  /// Package aliases whose `_cflags` are appended on this edge.
  pub packages: Vec<&'static str>,
  pub includes: Option<&'static str>,
  /// Shader stage, for [`Rule::Glslc`].
  pub stage: Option<&'static str>,
}

impl SourceEdge {
  pub fn cc(source: &'static str) -> Self {
    Self {
      source,
      rule: Rule::Cc,
      input_prefix: SOURCE_PREFIX,
      output_prefix: OUTPUT_PREFIX,
      cflags: None,
      packages: Vec::new(),
      includes: None,
      stage: None,
    }
  }

  pub fn shader(source: &'static str, stage: &'static str) -> Self {
    Self {
      rule: Rule::Glslc,
      stage: Some(stage),
      ..Self::cc(source)
    }
  }

  pub fn cflags(mut self, cflags: &'static str) -> Self {
    self.cflags = Some(cflags);
    self
  }

  pub fn packages(mut self, packages: &[&'static str]) -> Self {
    self.packages = packages.to_vec();
    self
  }

  pub fn prefixes(mut self, input: &'static str, output: &'static str) -> Self {
    self.input_prefix = input;
    self.output_prefix = output;
    self
  }

  pub fn input(&self) -> String {
    format!("{}{}", self.input_prefix, self.source)
  }

  pub fn output(&self) -> String {
    format!("{}{}", self.output_prefix, self.rule.transform(self.source))
  }

  /// Edge-local variables; empty when the edge uses the globals unchanged.
  pub fn variables(&self) -> Vec<(String, String)> {
    let mut variables = Vec::new();

    let cflags = std::iter::once(self.cflags.unwrap_or("$cflags").to_string())
      .chain(self.packages.iter().map(|alias| format!("${alias}_cflags")))
      .collect::<Vec<_>>()
      .join(" ");
    if cflags != "$cflags" {
      variables.push(("cflags".to_string(), cflags));
    }
    if let Some(includes) = self.includes.filter(|i| *i != "$includes") {
      variables.push(("includes".to_string(), includes.to_string()));
    }
    if let Some(stage) = self.stage {
      variables.push(("stage".to_string(), stage.to_string()));
    }

    variables
  }
}

/// A named group of enabled binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
  All,
  Tools,
}

impl Aggregate {
  pub fn as_str(&self) -> &'static str {
    match self {
      Aggregate::All => "all",
      Aggregate::Tools => "tools",
    }
  }
}

impl fmt::Display for Aggregate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One independent reason a target may be switched off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disablement {
  pub active: bool,
  pub reason: String,
}

impl Disablement {
  pub fn new(active: bool, reason: impl Into<String>) -> Self {
    Self {
      active,
      reason: reason.into(),
    }
  }
}

/// A linked binary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Target {
  pub name: &'static str,
  pub inputs: Vec<String>,
  /// Inputs used when the rich argument parser is selected.
  pub argp_inputs: Vec<String>,
  /// Inputs used when the simplified argument parser is selected.
  pub getopt_inputs: Vec<String>,
  /// Written as ninja implicit inputs (`|`), not order-only, so a changed artifact relinks the binary.
  pub implicit: Vec<String>,
  pub variables: Vec<(String, String)>,
  pub aggregates: Vec<Aggregate>,
  pub disablement: Vec<Disablement>,
}

impl Target {
  /// Every reason that currently applies, in declaration order.
  pub fn active_reasons(&self) -> Vec<&str> {
    self
      .disablement
      .iter()
      .filter(|d| d.active)
      .map(|d| d.reason.as_str())
      .collect()
  }

  pub fn is_enabled(&self) -> bool {
    self.disablement.iter().all(|d| !d.active)
  }

  /// Whether the target cares which argument parser is selected.
  pub fn has_parser_inputs(&self) -> bool {
    !self.argp_inputs.is_empty() || !self.getopt_inputs.is_empty()
  }
}

/// Everything the graph is assembled from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
  pub packages: Vec<Package>,
  /// Source edges in groups separated by a blank line.
  pub sources: Vec<Vec<SourceEdge>>,
  pub targets: Vec<Target>,
}

fn built(paths: &[&str]) -> Vec<String> {
  paths.iter().map(|p| format!("{OUTPUT_PREFIX}{p}")).collect()
}

impl Catalog {
  /// The project's own sources and binaries, with disablement evaluated against `opts`.
  pub fn standard(opts: &OptionSet) -> Self {
    let packages = vec![
      Package::new("vulkan"),
      Package::new("glfw3"),
      Package::new("liblzma").alias("lzma"),
    ];

    let sources = vec![
      vec![
        SourceEdge::cc("main.c"),
        SourceEdge::cc("dfield.c").cflags("$cflags -fopenmp").packages(&["lzma"]),
      ],
      vec![
        SourceEdge::cc("renderer/renderer.c").packages(&["vulkan", "glfw3"]),
        SourceEdge::cc("renderer/scene.c").packages(&["vulkan", "glfw3"]),
      ],
      vec![SourceEdge::cc("util/sorted_set.c"), SourceEdge::cc("util/strdup.c")],
      vec![
        SourceEdge::cc("tools/generate-dfield/generate-dfield.c"),
        SourceEdge::cc("tools/generate-dfield/args_argp.c").cflags("$cflags -Wno-missing-field-initializers"),
        SourceEdge::cc("tools/generate-dfield/args_getopt.c"),
      ],
      vec![SourceEdge::cc("quat.c").prefixes("libs/quat/src/", "$builddir/libs/quat/")],
      vec![
        SourceEdge::shader("shaders/vertex.glsl", "vertex"),
        SourceEdge::shader("shaders/fragment.glsl", "fragment"),
      ],
    ];

    let client = Target {
      name: "snrkos",
      inputs: built(&[
        "main.o",
        "renderer/renderer.o",
        "renderer/scene.o",
        "dfield.o",
        "util/sorted_set.o",
        "util/strdup.o",
        "libs/quat/quat.o",
      ]),
      implicit: built(&["shaders/vertex.spv", "shaders/fragment.spv"]),
      variables: vec![(
        "libs".to_string(),
        "-lm $vulkan_libs $glfw3_libs $lzma_libs -fopenmp $windows".to_string(),
      )],
      aggregates: vec![Aggregate::All],
      disablement: vec![Disablement::new(
        opts.disable_client,
        "we were generated with --disable-client",
      )],
      ..Target::default()
    };

    let dfield = Tool::GenerateDfield;
    let generate_dfield = Target {
      name: "tools/generate-dfield",
      inputs: built(&[
        "tools/generate-dfield/generate-dfield.o",
        "dfield.o",
        "util/strdup.o",
      ]),
      argp_inputs: built(&["tools/generate-dfield/args_argp.o"]),
      getopt_inputs: built(&["tools/generate-dfield/args_getopt.o"]),
      variables: vec![("libs".to_string(), "-lm -fopenmp $lzma_libs".to_string())],
      aggregates: vec![Aggregate::All, Aggregate::Tools],
      disablement: vec![
        Disablement::new(
          opts.is_tool_disabled(dfield),
          format!("we were generated with --disable-tool={dfield}"),
        ),
        Disablement::new(opts.disable_all_tools, "we were generated with --disable-all-tools"),
      ],
      ..Target::default()
    };

    Self {
      packages,
      sources,
      targets: vec![client, generate_dfield],
    }
  }
}
