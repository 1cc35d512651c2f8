//! The descriptor buffer.
//!
//! Every pipeline stage appends to a [`Descriptor`] handed to it by the caller.
//! Nothing touches the filesystem here: the whole descriptor is buffered so a
//! failed run never leaves a partial file behind.

mod ninja;
mod warning;

pub use ninja::{NinjaWriter, escape_path};
pub use warning::Warning;

use tracing::warn;

/// Buffered descriptor text plus the warnings recorded while producing it.
#[derive(Debug, Default)]
pub struct Descriptor {
  writer: NinjaWriter,
  warnings: Vec<Warning>,
}

impl Descriptor {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn newline(&mut self) {
    self.writer.newline();
  }

  pub fn comment(&mut self, text: &str) {
    self.writer.comment(text);
  }

  pub fn variable(&mut self, key: &str, value: &str) {
    self.writer.variable(key, value);
  }

  pub fn rule(&mut self, name: &str, command: &str, depfile: Option<&str>, deps: Option<&str>) {
    self.writer.rule(name, command, depfile, deps);
  }

  pub fn build(
    &mut self,
    outputs: &[String],
    rule: &str,
    inputs: &[String],
    implicit: &[String],
    variables: &[(String, String)],
  ) {
    self.writer.build(outputs, rule, inputs, implicit, variables);
  }

  pub fn default_targets(&mut self, targets: &[String]) {
    self.writer.default_targets(targets);
  }

  /// Record a warning on the log and as a comment at the current position.
  pub fn warn(&mut self, warning: Warning) {
    warn!("{warning}");
    self.writer.comment(&format!("WARNING: {warning}"));
    self.warnings.push(warning);
  }

  pub fn warnings(&self) -> &[Warning] {
    &self.warnings
  }

  pub fn text(&self) -> &str {
    self.writer.as_str()
  }

  pub fn into_parts(self) -> (String, Vec<Warning>) {
    (self.writer.into_string(), self.warnings)
  }
}
