// SPDX-License-Identifier: MIT

//! Minimal plain-text progress reporter.
//!
//! One mark per spec, failed spec names, and a summary line. Anything
//! fancier (colors, diffs, timing breakdowns) belongs to a user-supplied
//! reporter.

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::engine::{Reporter, RunResult, RunStart, SpecResult, SpecStatus};

/// Options for [`ConsoleReporter::configure`].
#[derive(Default)]
pub struct ConsoleOptions {
    /// Replacement output sink. Defaults to stdout.
    pub print: Option<Box<dyn Write + Send>>,
}

struct State {
    sink: Box<dyn Write + Send>,
    executed: usize,
    failures: Vec<String>,
    pending: usize,
}

/// The reporter installed by the runner when no other default was
/// configured. Clones share one sink and one set of counters.
#[derive(Clone)]
pub struct ConsoleReporter {
    state: Arc<Mutex<State>>,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                sink: Box::new(std::io::stdout()),
                executed: 0,
                failures: Vec::new(),
                pending: 0,
            })),
        }
    }

    /// Apply reporter options; currently just the output sink.
    pub fn configure(&self, options: ConsoleOptions) {
        if let Some(sink) = options.print {
            self.lock().sink = sink;
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn run_started(&mut self, _info: &RunStart) {
        let mut state = self.lock();
        state.executed = 0;
        state.failures.clear();
        state.pending = 0;
        let _ = writeln!(state.sink, "Started");
    }

    fn spec_done(&mut self, result: &SpecResult) {
        let mut state = self.lock();
        let mark = match result.status {
            SpecStatus::Passed => ".",
            SpecStatus::Failed => "F",
            SpecStatus::Pending => "*",
        };
        if result.status == SpecStatus::Failed {
            state.failures.push(result.full_name.clone());
        }
        if result.status == SpecStatus::Pending {
            state.pending += 1;
        } else {
            state.executed += 1;
        }
        let _ = write!(state.sink, "{mark}");
    }

    fn run_done(&mut self, _result: &RunResult) {
        let mut state = self.lock();
        let State { sink, executed, failures, pending } = &mut *state;
        let _ = writeln!(sink);
        if !failures.is_empty() {
            let _ = writeln!(sink, "Failures:");
            for (idx, name) in failures.iter().enumerate() {
                let _ = writeln!(sink, "{}) {}", idx + 1, name);
            }
        }
        let _ = write!(sink, "{} specs, {} failures", executed, failures.len());
        if *pending > 0 {
            let _ = write!(sink, ", {pending} pending");
        }
        let _ = writeln!(sink);
        let _ = sink.flush();
    }
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
