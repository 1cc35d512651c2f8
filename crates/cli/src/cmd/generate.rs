//! Implementation of the `configure` run.
//!
//! Generates the descriptor in memory and writes it only once generation has
//! succeeded, so a rejected configuration never leaves a partial file behind.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::debug;

use ninjagen_lib::env::ProcessEnv;
use ninjagen_lib::exec::SystemRunner;
use ninjagen_lib::generate::{GenerateContext, GenerationReport, generate_with};
use ninjagen_lib::graph::Catalog;
use ninjagen_lib::options::OptionSet;

use crate::output::{print_info, print_json, print_stat, print_success};

pub fn cmd_generate(options: OptionSet, argv: Vec<String>, output: &Path, json: bool) -> Result<()> {
  let ctx = GenerateContext {
    argv,
    timestamp: Local::now().naive_local(),
    env: &ProcessEnv,
    runner: &SystemRunner,
  };

  let generated = generate_with(&ctx, &options, Catalog::standard)?;
  generated
    .write_to(output)
    .with_context(|| format!("Failed to write descriptor: {}", output.display()))?;
  debug!(path = %output.display(), bytes = generated.text.len(), "wrote descriptor");

  if json {
    print_json(&generated.report)?;
  } else {
    print_summary(&generated.report, output);
  }

  Ok(())
}

fn print_summary(report: &GenerationReport, output: &Path) {
  print_success(&format!("Wrote {}", output.display()));
  print_stat("Build", report.build.as_str());
  print_stat("Version", &report.version_expression);
  print_stat("Targets", &report.enabled_targets.join(", "));

  for disabled in &report.disabled_targets {
    print_info(&format!("{} disabled: {}", disabled.name, disabled.reasons.join("; ")));
  }
  if !report.warnings.is_empty() {
    print_stat("Warnings", &report.warnings.len().to_string());
  }
}
