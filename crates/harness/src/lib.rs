// SPDX-License-Identifier: MIT

//! specrun: an embeddable command-line harness for spec-style test
//! engines.
//!
//! The harness handles everything around a run: discovering spec and
//! helper files from glob patterns, loading JSON configuration, wiring
//! reporters, name-based filtering, and turning the engine's terminal
//! pass/fail signal into a process exit code (0 pass, 1 fail, 4 when the
//! engine never finished). Test semantics live in the engine the
//! embedding application supplies through the [`engine`] traits.

pub mod cli;
pub mod command;
pub mod completion;
pub mod config;
pub mod console;
pub mod engine;
pub mod filter;
pub mod loader;
pub mod process;
pub mod resolver;
pub mod runner;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use completion::CompletionReporter;
pub use config::{ConfigDocument, ConfigError};
pub use console::{ConsoleOptions, ConsoleReporter};
pub use engine::{Engine, EnvOptions, Environment, Reporter, RunResult};
pub use filter::NameFilter;
pub use loader::{LoadError, ModuleLoader};
pub use process::{ProcessHandle, SystemProcess};
pub use resolver::ResolveError;
pub use runner::{EXIT_FAILURE, EXIT_INCOMPLETE, EXIT_SUCCESS, Runner, RunnerError, RunnerState};
