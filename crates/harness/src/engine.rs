// SPDX-License-Identifier: MIT

//! Contracts for the external test-execution engine.
//!
//! The harness never runs tests itself. It drives an [`Engine`] supplied by
//! the embedding application: the engine owns the describe/it tree, matcher
//! evaluation, and scheduling, and reports progress back through the
//! [`Reporter`] observers registered on its [`Environment`].

/// Options passed when obtaining an [`Environment`] from an engine.
#[derive(Debug, Clone, Copy)]
pub struct EnvOptions {
    /// Defer errors raised while spec files register their declarations,
    /// so they surface as failed specs instead of aborting the load phase.
    pub suppress_load_errors: bool,
}

impl Default for EnvOptions {
    fn default() -> Self {
        Self { suppress_load_errors: true }
    }
}

/// A test-execution engine, as seen by the harness.
pub trait Engine {
    type Env: Environment;

    /// Boot the engine and hand over its execution environment.
    fn environment(self, options: EnvOptions) -> Self::Env;
}

/// Predicate consulted once per discovered spec to decide inclusion.
///
/// Receives the spec's fully-qualified name (suite path plus description).
pub type SpecPredicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// The engine's execution environment.
///
/// Only one `execute` call may be in flight per environment; the call
/// blocks the caller until every registered reporter has seen the
/// terminal [`Reporter::run_done`] notification.
pub trait Environment {
    /// Engine-defined representation of custom assertion extensions.
    type Matchers;

    fn add_reporter(&mut self, reporter: Box<dyn Reporter>);
    fn clear_reporters(&mut self);

    /// Install the spec-selection predicate. Replaces any previous one.
    fn set_spec_filter(&mut self, predicate: SpecPredicate);

    fn randomize_tests(&mut self, value: bool);
    fn seed(&mut self, value: u64);

    /// Whether the first failed expectation aborts the current spec.
    fn stop_spec_on_expectation_failure(&mut self, value: bool);

    /// Whether the first failed spec aborts the remaining suite.
    fn stop_on_spec_failure(&mut self, value: bool);

    fn add_matchers(&mut self, matchers: Self::Matchers);

    /// Run every loaded spec, notifying reporters along the way and
    /// finishing with the terminal run-done notification.
    fn execute(&mut self);
}

/// Details of a run about to start.
#[derive(Debug, Clone, Default)]
pub struct RunStart {
    /// Number of specs the engine plans to run after filtering.
    pub total_specs: usize,
}

/// A suite boundary event.
#[derive(Debug, Clone)]
pub struct SuiteInfo {
    pub full_name: String,
}

/// A spec about to run.
#[derive(Debug, Clone)]
pub struct SpecInfo {
    pub full_name: String,
}

/// Outcome of a single spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecStatus {
    Passed,
    Failed,
    /// Declared but excluded or marked pending; did not run.
    Pending,
}

/// A finished spec.
#[derive(Debug, Clone)]
pub struct SpecResult {
    pub full_name: String,
    pub status: SpecStatus,
}

/// The terminal notification for a run.
#[derive(Debug, Clone, Copy)]
pub struct RunResult {
    /// True iff every executed spec passed.
    pub overall_passed: bool,
}

/// Observer of test lifecycle events.
///
/// All notifications default to no-ops so reporters implement only what
/// they care about. The harness itself depends solely on [`run_done`].
///
/// [`run_done`]: Reporter::run_done
pub trait Reporter: Send {
    fn run_started(&mut self, _info: &RunStart) {}
    fn suite_started(&mut self, _suite: &SuiteInfo) {}
    fn spec_started(&mut self, _spec: &SpecInfo) {}
    fn spec_done(&mut self, _result: &SpecResult) {}
    fn suite_done(&mut self, _suite: &SuiteInfo) {}
    fn run_done(&mut self, _result: &RunResult) {}
}
