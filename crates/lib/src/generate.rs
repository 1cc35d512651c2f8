//! The generation pipeline.
//!
//! Runs every stage in order against one [`Descriptor`]:
//! option model, precedence resolution, mode policy, package resolution and
//! graph assembly. The caller gets the finished text and a report back and
//! decides where to write it.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info};

use crate::consts::{APP_NAME, BUILD_DIR, TIMESTAMP_FORMAT};
use crate::descriptor::Descriptor;
use crate::env::Environment;
use crate::error::ConfigError;
use crate::exec::CommandRunner;
use crate::graph::{self, Aggregate, Assembly, Catalog, DisabledTarget, ParserChoice};
use crate::mode::{self, Derived, ModePolicy};
use crate::options::{ArgParser, BuildMode, OptionSet};
use crate::packages::{self, PackageBinding};
use crate::resolve;
use crate::version::{self, VersionBase, VersionPlan};

/// Inputs a generation run reads from outside the argument vector.
pub struct GenerateContext<'a> {
  /// The argument vector as given, without the program name.
  pub argv: Vec<String>,
  pub timestamp: NaiveDateTime,
  pub env: &'a dyn Environment,
  pub runner: &'a dyn CommandRunner,
}

/// Summary of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
  pub build: BuildMode,
  pub version: VersionPlan,
  /// The version with any deferred query shown as a shell expression.
  pub version_expression: String,
  pub packages: Vec<PackageBinding>,
  pub enabled_targets: Vec<String>,
  pub disabled_targets: Vec<DisabledTarget>,
  pub aggregates: BTreeMap<Aggregate, Vec<String>>,
  pub warnings: Vec<String>,
}

/// A finished descriptor, not yet written anywhere.
#[derive(Debug, Clone)]
pub struct Generated {
  pub text: String,
  pub report: GenerationReport,
}

impl Generated {
  pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
    std::fs::write(path, &self.text)
  }
}

/// Describe how the argument parser was chosen.
fn parser_choice(requested: &OptionSet, derived: &Derived) -> ParserChoice {
  let parser = derived.options.arg_parser;
  let reason = match parser {
    ArgParser::Argp => None,
    ArgParser::Getopt if requested.arg_parser == ArgParser::Getopt => {
      Some("we were generated with --disable-argp".to_string())
    }
    ArgParser::Getopt => derived
      .forced
      .first()
      .map(|forced| format!("--build={} implies {}", forced.mode, forced.option)),
  };
  ParserChoice { parser, reason }
}

fn emit_header(ctx: &GenerateContext<'_>, descriptor: &mut Descriptor) {
  descriptor.comment(&format!(
    "generated by {APP_NAME} on {}",
    ctx.timestamp.format(TIMESTAMP_FORMAT)
  ));
  let quoted: Vec<String> = ctx.argv.iter().map(|arg| format!("'{arg}'")).collect();
  descriptor.comment(&format!("arguments: [{}]", quoted.join(", ")));
  descriptor.newline();
}

/// Generate from an already-parsed option set and a catalog.
pub fn generate_with(
  ctx: &GenerateContext<'_>,
  requested: &OptionSet,
  catalog_for: impl FnOnce(&OptionSet) -> Catalog,
) -> Result<Generated, ConfigError> {
  let mut d = Descriptor::new();

  let derived = mode::derive_options(requested);
  let opts = &derived.options;
  let catalog = catalog_for(opts);
  debug!(mode = %opts.build, "generating");

  emit_header(ctx, &mut d);

  let base = VersionBase::resolve(opts, ctx.runner, &mut d);
  base.emit(&mut d);
  d.variable("builddir", BUILD_DIR);
  d.newline();

  let tools = resolve::resolve_tools(opts, ctx.env, &mut d);
  resolve::emit_tools(&tools, opts.build, &mut d);
  d.newline();

  resolve::emit_flag_defaults(&tools, opts, &mut d);
  mode::emit_common(opts, &mut d);

  let policy = ModePolicy::for_options(opts);
  mode::emit_mode(&policy, &derived, &mut d);

  if resolve::emit_flag_overrides(&tools, &mut d) {
    d.newline();
  }

  d.comment("the version define");
  version::emit_user_suffix(opts, &mut d);
  version::emit_define(&mut d);
  d.newline();

  let bindings = packages::resolve_packages(&catalog.packages, opts, &tools, ctx.runner, &mut d)?;

  graph::emit_rules(&mut d);
  let parser = parser_choice(requested, &derived);
  let Assembly {
    enabled,
    disabled,
    aggregates,
  } = graph::assemble(&catalog, opts.build, &parser, &mut d);

  let plan = VersionPlan::new(base, opts);
  let (text, warnings) = d.into_parts();
  info!(enabled = enabled.len(), disabled = disabled.len(), warnings = warnings.len(), "generated descriptor");

  Ok(Generated {
    text,
    report: GenerationReport {
      build: opts.build,
      version_expression: plan.expression(),
      version: plan,
      packages: bindings,
      enabled_targets: enabled,
      disabled_targets: disabled,
      aggregates,
      warnings: warnings.iter().map(ToString::to_string).collect(),
    },
  })
}

/// Parse `ctx.argv` and generate the standard project graph.
pub fn generate(ctx: &GenerateContext<'_>) -> Result<Generated, ConfigError> {
  let requested = OptionSet::from_args(&ctx.argv)?;
  generate_with(ctx, &requested, Catalog::standard)
}
