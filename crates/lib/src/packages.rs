//! External package flags.
//!
//! Each package gets a `<alias>_cflags` / `<alias>_libs` variable pair. With a
//! deferred package query those hold a shell expression that runs the query
//! tool whenever the graph is executed; with an eager query the tool runs now
//! and its output is embedded literally. A failing eager query degrades to
//! whatever output it produced and never aborts generation.

use serde::Serialize;
use tracing::debug;

use crate::descriptor::{Descriptor, Warning};
use crate::error::ConfigError;
use crate::exec::{CommandRunner, run_query};
use crate::options::{BuildMode, OptionSet, QueryStrategy};
use crate::resolve::ResolvedTools;

/// Extra fragments declared for a package, per build mode and for every mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments {
  pub per_mode: Vec<(BuildMode, &'static str)>,
  pub all: Option<&'static str>,
}

impl Fragments {
  /// Mode-specific fragments first, then the catch-all, space separated.
  pub fn for_mode(&self, mode: BuildMode) -> String {
    self
      .per_mode
      .iter()
      .filter(|(m, _)| *m == mode)
      .map(|(_, f)| *f)
      .chain(self.all)
      .filter(|f| !f.is_empty())
      .collect::<Vec<_>>()
      .join(" ")
  }
}

/// A declared package dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
  /// Name passed to the query tool.
  pub name: &'static str,
  /// Prefix of the descriptor variables.
  pub alias: &'static str,
  /// Whether the query tool knows this package at all.
  pub query: bool,
  pub cflags: Fragments,
  pub libs: Fragments,
}

impl Package {
  pub fn new(name: &'static str) -> Self {
    Self {
      name,
      alias: name,
      query: true,
      cflags: Fragments::default(),
      libs: Fragments::default(),
    }
  }

  pub fn alias(mut self, alias: &'static str) -> Self {
    self.alias = alias;
    self
  }
}

/// The value of one package variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Binding {
  /// Shell expression evaluated when the graph runs.
  Deferred(String),
  /// Captured during generation.
  Literal(String),
}

impl Binding {
  pub fn value(&self) -> &str {
    match self {
      Binding::Deferred(v) | Binding::Literal(v) => v,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageBinding {
  pub alias: String,
  pub cflags: Binding,
  pub libs: Binding,
}

fn with_fragments(base: &str, fragments: &str) -> String {
  match (base.is_empty(), fragments.is_empty()) {
    (_, true) => base.to_string(),
    (true, false) => format!(" {fragments}"),
    (false, false) => format!("{base} {fragments}"),
  }
}

/// Resolve one package and emit its variable pair.
pub fn resolve_package(
  package: &Package,
  opts: &OptionSet,
  tools: &ResolvedTools,
  runner: &dyn CommandRunner,
  descriptor: &mut Descriptor,
) -> Result<PackageBinding, ConfigError> {
  let mode = opts.build;
  let cflags_extra = package.cflags.for_mode(mode);
  let libs_extra = package.libs.for_mode(mode);

  descriptor.comment(&format!("package {}", package.name));

  let (cflags, libs) = if !package.query {
    (
      Binding::Literal(with_fragments("", &cflags_extra)),
      Binding::Literal(with_fragments("", &libs_extra)),
    )
  } else {
    match opts.package_query {
      QueryStrategy::Deferred => (
        Binding::Deferred(with_fragments(
          &format!("$$($pkgconfig --cflags {})", package.name),
          &cflags_extra,
        )),
        Binding::Deferred(with_fragments(
          &format!("$$($pkgconfig --libs {})", package.name),
          &libs_extra,
        )),
      ),
      QueryStrategy::Eager => {
        let tool = tools.pkg_config().ok_or(ConfigError::NoPackageQueryTool { mode })?;
        let queried_cflags = run_query(runner, tool, &["--cflags", package.name]);
        let queried_libs = run_query(runner, tool, &["--libs", package.name]);
        if !queried_cflags.success || !queried_libs.success {
          descriptor.warn(Warning::PackageQueryFailed {
            tool: tool.to_string(),
            package: package.name.to_string(),
          });
        }
        debug!(package = package.name, cflags = %queried_cflags.stdout, libs = %queried_libs.stdout, "queried package");
        (
          Binding::Literal(with_fragments(&queried_cflags.stdout, &cflags_extra)),
          Binding::Literal(with_fragments(&queried_libs.stdout, &libs_extra)),
        )
      }
    }
  };

  descriptor.variable(&format!("{}_cflags", package.alias), cflags.value());
  descriptor.variable(&format!("{}_libs", package.alias), libs.value());
  descriptor.newline();

  Ok(PackageBinding {
    alias: package.alias.to_string(),
    cflags,
    libs,
  })
}

/// Resolve every package in declaration order.
pub fn resolve_packages(
  packages: &[Package],
  opts: &OptionSet,
  tools: &ResolvedTools,
  runner: &dyn CommandRunner,
  descriptor: &mut Descriptor,
) -> Result<Vec<PackageBinding>, ConfigError> {
  packages
    .iter()
    .map(|package| resolve_package(package, opts, tools, runner, descriptor))
    .collect()
}
