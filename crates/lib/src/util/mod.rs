//! Shared utilities.
//!
//! Test helpers for substituting the environment and external processes.

#[cfg(test)]
pub mod testutil;
