//! ninjagen-lib: configuration-to-build-graph compiler for `configure`
//!
//! This crate turns a build configuration into a ninja build descriptor:
//! - `options`: the flag surface and the validated `OptionSet`
//! - `resolve`: explicit flag > environment > mode default precedence
//! - `mode`: per build-mode variable bundles and forced overrides
//! - `packages`: deferred or eager package flag lookup
//! - `graph`: source edges, binaries, disablement and aggregates
//! - `generate`: the pipeline tying the stages together

pub mod consts;
pub mod descriptor;
pub mod env;
pub mod error;
pub mod exec;
pub mod generate;
pub mod graph;
pub mod mode;
pub mod options;
pub mod packages;
pub mod resolve;
pub mod util;
pub mod version;

pub use error::ConfigError;
pub use generate::{GenerateContext, Generated, GenerationReport, generate};
