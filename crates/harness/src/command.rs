// SPDX-License-Identifier: MIT

//! Process entry point for embedding binaries.
//!
//! A consumer's `main` is one call:
//!
//! ```ignore
//! fn main() -> anyhow::Result<std::process::ExitCode> {
//!     specrun::command::run(MyEngine::new(), Box::new(MyLoader::new()))
//! }
//! ```
//!
//! Configuration and load errors propagate out as `anyhow` errors so the
//! process terminates abnormally; only completed runs produce the 0/1/4
//! codes.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::engine::Engine;
use crate::loader::ModuleLoader;
use crate::process::{self, ProcessHandle, SystemProcess};
use crate::runner::Runner;

/// Parse process arguments, run the suite, and return the exit code.
pub fn run<G: Engine>(engine: G, loader: Box<dyn ModuleLoader>) -> anyhow::Result<ExitCode> {
    init_tracing();
    run_with(Cli::parse(), engine, loader)
}

/// Like [`run`], but with pre-parsed arguments.
pub fn run_with<G: Engine>(
    cli: Cli,
    engine: G,
    loader: Box<dyn ModuleLoader>,
) -> anyhow::Result<ExitCode> {
    let system = Arc::new(SystemProcess::new());
    let handle: Arc<dyn ProcessHandle> = Arc::clone(&system) as Arc<dyn ProcessHandle>;

    let mut runner = Runner::new(engine, loader, handle)?;
    runner.load_config_file(cli.config.as_deref()).context("loading configuration")?;

    // CLI flags beat config-file values: they are applied afterwards.
    if let Some(value) = cli.stop_on_failure {
        runner.stop_spec_on_expectation_failure(value);
    }
    if let Some(value) = cli.fail_fast {
        runner.stop_on_spec_failure(value);
    }
    if let Some(value) = cli.random {
        runner.randomize_tests(value);
    }
    if let Some(value) = cli.seed {
        runner.seed(value);
    }

    runner.execute(&cli.files, cli.filter.as_deref())?;

    system.run_exit_hooks();
    Ok(process::to_exit_code(system.exit_code()))
}

/// Dev diagnostics via `RUST_LOG`, written to stderr. Defaults to `warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
