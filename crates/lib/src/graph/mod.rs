//! Graph assembly.
//!
//! Turns the [`Catalog`] into build edges. Each source becomes one edge whose
//! output is a pure function of its path and rule. Each binary is either
//! emitted as a link edge or, when any of its disablement reasons holds,
//! replaced by a comment listing every reason. Aggregates are filled only from
//! the binaries that were actually emitted.

mod catalog;
mod rule;

pub use catalog::{Aggregate, Catalog, Disablement, SourceEdge, Target};
pub use rule::{Rule, emit_rules};

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::consts::EXE_SUFFIX;
use crate::descriptor::Descriptor;
use crate::options::{ArgParser, BuildMode};

/// How binaries that carry parser-specific inputs are linked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserChoice {
  pub parser: ArgParser,
  /// Why getopt was selected, when it was.
  pub reason: Option<String>,
}

/// A binary that was left out, with every reason that applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisabledTarget {
  pub name: String,
  pub reasons: Vec<String>,
}

/// What assembly decided.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assembly {
  pub enabled: Vec<String>,
  pub disabled: Vec<DisabledTarget>,
  pub aggregates: BTreeMap<Aggregate, Vec<String>>,
}

impl Assembly {
  pub fn members(&self, aggregate: Aggregate) -> &[String] {
    self.aggregates.get(&aggregate).map(Vec::as_slice).unwrap_or_default()
  }
}

/// The artifact name for a binary in the given mode.
pub fn artifact_name(name: &str, mode: BuildMode) -> String {
  if mode.is_cross() {
    format!("{name}{EXE_SUFFIX}")
  } else {
    name.to_string()
  }
}

/// Emit one edge per source.
pub fn emit_sources(sources: &[Vec<SourceEdge>], descriptor: &mut Descriptor) {
  descriptor.comment("source files");
  for group in sources {
    for edge in group {
      descriptor.build(
        &[edge.output()],
        edge.rule.as_str(),
        &[edge.input()],
        &[],
        &edge.variables(),
      );
    }
    descriptor.newline();
  }
}

fn emit_disabled(fullname: &str, reasons: &[&str], descriptor: &mut Descriptor) {
  match reasons {
    [single] => descriptor.comment(&format!("{fullname} is disabled because {single}")),
    _ => {
      descriptor.comment(&format!("{fullname} is disabled because:"));
      for reason in reasons {
        descriptor.comment(&format!(" - {reason}"));
      }
    }
  }
}

/// Emit link edges or disablement notes for every target, in declaration order.
pub fn emit_targets(
  targets: &[Target],
  mode: BuildMode,
  parser: &ParserChoice,
  descriptor: &mut Descriptor,
) -> Assembly {
  let mut assembly = Assembly::default();
  descriptor.comment("output products");

  for target in targets {
    let fullname = artifact_name(target.name, mode);
    let reasons = target.active_reasons();

    if !reasons.is_empty() {
      debug!(target = %fullname, reasons = ?reasons, "target disabled");
      emit_disabled(&fullname, &reasons, descriptor);
      assembly.disabled.push(DisabledTarget {
        name: fullname,
        reasons: reasons.iter().map(|r| r.to_string()).collect(),
      });
      descriptor.newline();
      continue;
    }

    let mut inputs = target.inputs.clone();
    match parser.parser {
      ArgParser::Getopt if target.has_parser_inputs() => {
        if let Some(reason) = &parser.reason {
          descriptor.comment(&format!("building {} with getopt because {reason}", target.name));
        }
        inputs.extend(target.getopt_inputs.iter().cloned());
      }
      _ => inputs.extend(target.argp_inputs.iter().cloned()),
    }

    descriptor.build(
      std::slice::from_ref(&fullname),
      Rule::Bin.as_str(),
      &inputs,
      &target.implicit,
      &target.variables,
    );
    descriptor.newline();

    for aggregate in &target.aggregates {
      assembly.aggregates.entry(*aggregate).or_default().push(fullname.clone());
    }
    assembly.enabled.push(fullname);
  }

  assembly
}

/// Emit the `tools` and `all` groups and make `all` the default.
pub fn emit_aggregates(assembly: &Assembly, descriptor: &mut Descriptor) {
  let tools = assembly.members(Aggregate::Tools);
  if tools.is_empty() {
    descriptor.comment("NOTE: no tools target because there are no enabled tools");
  } else {
    descriptor.build(&[Aggregate::Tools.to_string()], Rule::Phony.as_str(), tools, &[], &[]);
  }
  descriptor.newline();

  descriptor.build(
    &[Aggregate::All.to_string()],
    Rule::Phony.as_str(),
    assembly.members(Aggregate::All),
    &[],
    &[],
  );
  descriptor.newline();

  descriptor.default_targets(&[Aggregate::All.to_string()]);
}

/// Emit sources, targets and aggregates for a catalog.
pub fn assemble(
  catalog: &Catalog,
  mode: BuildMode,
  parser: &ParserChoice,
  descriptor: &mut Descriptor,
) -> Assembly {
  emit_sources(&catalog.sources, descriptor);
  let assembly = emit_targets(&catalog.targets, mode, parser, descriptor);
  emit_aggregates(&assembly, descriptor);
  assembly
}
