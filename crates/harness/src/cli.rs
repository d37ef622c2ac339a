// SPDX-License-Identifier: MIT

//! CLI argument parsing with clap derive.
//!
//! The harness is embeddable, so argument parsing lives in the library:
//! the consuming binary calls [`crate::command::run`] and gets the full
//! surface for free.

use std::path::PathBuf;

use clap::Parser;

/// Run spec-style tests against an embedded engine
#[derive(Debug, Parser)]
#[command(name = "specrun")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Spec files or glob patterns to run instead of the configured set
    #[arg(value_name = "FILES")]
    pub files: Vec<String>,

    /// Only run specs whose full names contain this string
    #[arg(long, value_name = "STRING")]
    pub filter: Option<String>,

    /// Use specific config file (relative to the project root)
    #[arg(short = 'C', long = "config", env = "SPECRUN_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Stop a spec on its first expectation failure
    #[arg(long, value_name = "BOOL")]
    pub stop_on_failure: Option<bool>,

    /// Stop the suite on the first failing spec
    #[arg(long, value_name = "BOOL")]
    pub fail_fast: Option<bool>,

    /// Randomize spec execution order
    #[arg(long, value_name = "BOOL")]
    pub random: Option<bool>,

    /// Seed for randomized ordering
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
