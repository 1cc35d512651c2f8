//! Textual ninja syntax.
//!
//! A thin append-only writer: it formats what it is given and makes no
//! decisions of its own. Values are written verbatim apart from line breaks,
//! which become line continuations, so `$` escaping of variable values is the
//! caller's job. Paths in build statements are escaped.

/// Escape a path for use in a `build` line.
pub fn escape_path(word: &str) -> String {
  word.replace("$ ", "$$ ").replace(' ', "$ ").replace(':', "$:")
}

/// Turn line breaks into ninja line continuations so a value stays one statement.
fn escape_line_breaks(value: &str) -> String {
  value.replace("\r\n", "\n").replace('\r', "\n").replace('\n', "$\n")
}

#[derive(Debug, Default, Clone)]
pub struct NinjaWriter {
  out: String,
}

impl NinjaWriter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn newline(&mut self) {
    self.out.push('\n');
  }

  /// Write a comment; multi-line text becomes one comment line per line.
  pub fn comment(&mut self, text: &str) {
    for line in text.lines() {
      self.line(&format!("# {line}"), 0);
    }
  }

  pub fn variable(&mut self, key: &str, value: &str) {
    self.indented_variable(key, value, 0);
  }

  fn indented_variable(&mut self, key: &str, value: &str, indent: usize) {
    self.line(&format!("{key} = {}", escape_line_breaks(value)), indent);
  }

  pub fn rule(&mut self, name: &str, command: &str, depfile: Option<&str>, deps: Option<&str>) {
    self.line(&format!("rule {name}"), 0);
    self.indented_variable("command", command, 1);
    if let Some(depfile) = depfile {
      self.indented_variable("depfile", depfile, 1);
    }
    if let Some(deps) = deps {
      self.indented_variable("deps", deps, 1);
    }
  }

  /// Write a build statement: `build outputs: rule inputs | implicit`.
  pub fn build(
    &mut self,
    outputs: &[String],
    rule: &str,
    inputs: &[String],
    implicit: &[String],
    variables: &[(String, String)],
  ) {
    let mut line = format!("build {}: {rule}", join_paths(outputs));
    if !inputs.is_empty() {
      line.push(' ');
      line.push_str(&join_paths(inputs));
    }
    if !implicit.is_empty() {
      line.push_str(" | ");
      line.push_str(&join_paths(implicit));
    }
    self.line(&line, 0);
    for (key, value) in variables {
      self.indented_variable(key, value, 1);
    }
  }

  pub fn default_targets(&mut self, targets: &[String]) {
    self.line(&format!("default {}", join_paths(targets)), 0);
  }

  pub fn as_str(&self) -> &str {
    &self.out
  }

  pub fn into_string(self) -> String {
    self.out
  }

  fn line(&mut self, text: &str, indent: usize) {
    for _ in 0..indent {
      self.out.push_str("  ");
    }
    self.out.push_str(text.trim_end());
    self.out.push('\n');
  }
}

fn join_paths(paths: &[String]) -> String {
  paths.iter().map(|p| escape_path(p)).collect::<Vec<_>>().join(" ")
}
