// SPDX-License-Identifier: MIT

//! The runner facade.
//!
//! Owns the run lifecycle: configuration, file resolution, loading in
//! fixed order (requires, then helpers, then specs), reporter wiring,
//! engine execution, and exit-code determination.
//!
//! Exit codes: 0 when every spec passed, 1 when any failed, and
//! [`EXIT_INCOMPLETE`] (4) when the engine never delivered its terminal
//! signal, so an engine hang or silent crash is distinguishable from a
//! failing suite.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::completion::CompletionReporter;
use crate::config::{self, ConfigDocument, ConfigError};
use crate::console::{ConsoleOptions, ConsoleReporter};
use crate::engine::{Engine, EnvOptions, Environment, Reporter};
use crate::filter::NameFilter;
use crate::loader::{LoadError, ModuleLoader};
use crate::process::ProcessHandle;
use crate::resolver::{self, ResolveError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
/// Execution ended without the engine's terminal signal.
pub const EXIT_INCOMPLETE: i32 = 4;

/// Failure during runner setup or the load phase.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("failed to determine the working directory")]
    WorkingDir(#[source] std::io::Error),
}

/// Mutable runner bookkeeping. Owned by exactly one [`Runner`].
#[derive(Debug)]
pub struct RunnerState {
    /// Absolute project root; anchors relative patterns and the default
    /// config location.
    pub project_base_dir: PathBuf,
    /// Subdirectory under the base dir for relative spec patterns. May be
    /// empty.
    pub spec_dir: String,
    /// Resolved spec files, unique, in first-seen order.
    pub spec_files: Vec<PathBuf>,
    /// Resolved helper files, unique, in first-seen order.
    pub helper_files: Vec<PathBuf>,
    /// Require-hook identifiers, appended verbatim.
    pub requires: Vec<String>,
    /// Reporters currently registered with the engine environment.
    pub reporter_count: usize,
    /// Whether [`Runner::configure_default_reporter`] ran.
    pub default_reporter_configured: bool,
    /// Whether the completion reporter has been handed to the engine.
    pub completion_reporter_installed: bool,
}

impl RunnerState {
    fn new(project_base_dir: PathBuf) -> Self {
        Self {
            project_base_dir,
            spec_dir: String::new(),
            spec_files: Vec::new(),
            helper_files: Vec::new(),
            requires: Vec::new(),
            reporter_count: 0,
            default_reporter_configured: false,
            completion_reporter_installed: false,
        }
    }
}

/// Orchestrates one engine run from configuration to exit code.
pub struct Runner<E: Environment> {
    env: E,
    loader: Box<dyn ModuleLoader>,
    process: Arc<dyn ProcessHandle>,
    state: RunnerState,
    completion: CompletionReporter,
    default_reporter: ConsoleReporter,
}

impl<E: Environment> Runner<E> {
    /// Build a runner rooted at the current working directory.
    pub fn new<G>(
        engine: G,
        loader: Box<dyn ModuleLoader>,
        process: Arc<dyn ProcessHandle>,
    ) -> Result<Self, RunnerError>
    where
        G: Engine<Env = E>,
    {
        let base_dir = std::env::current_dir().map_err(RunnerError::WorkingDir)?;
        Ok(Self::with_base_dir(engine, loader, process, base_dir))
    }

    /// Build a runner rooted at an explicit project base directory.
    pub fn with_base_dir<G>(
        engine: G,
        loader: Box<dyn ModuleLoader>,
        process: Arc<dyn ProcessHandle>,
        project_base_dir: PathBuf,
    ) -> Self
    where
        G: Engine<Env = E>,
    {
        let env = engine.environment(EnvOptions { suppress_load_errors: true });
        let completion = CompletionReporter::new();
        {
            // Terminal signal -> exit code, registered before anything
            // else so the policy holds even for bare library use.
            let process = Arc::clone(&process);
            completion.on_complete(move |passed| {
                process.set_exit_code(if passed { EXIT_SUCCESS } else { EXIT_FAILURE });
            });
        }

        let default_reporter = ConsoleReporter::new();
        let mut runner = Self {
            env,
            loader,
            process,
            state: RunnerState::new(project_base_dir),
            completion,
            default_reporter: default_reporter.clone(),
        };
        runner.add_reporter(Box::new(default_reporter));
        runner
    }

    pub fn state(&self) -> &RunnerState {
        &self.state
    }

    // --- engine passthroughs -------------------------------------------

    pub fn randomize_tests(&mut self, value: bool) {
        self.env.randomize_tests(value);
    }

    pub fn seed(&mut self, value: u64) {
        self.env.seed(value);
    }

    pub fn stop_spec_on_expectation_failure(&mut self, value: bool) {
        self.env.stop_spec_on_expectation_failure(value);
    }

    pub fn stop_on_spec_failure(&mut self, value: bool) {
        self.env.stop_on_spec_failure(value);
    }

    pub fn add_matchers(&mut self, matchers: E::Matchers) {
        self.env.add_matchers(matchers);
    }

    // --- reporters -----------------------------------------------------

    pub fn add_reporter(&mut self, reporter: Box<dyn Reporter>) {
        self.env.add_reporter(reporter);
        self.state.reporter_count += 1;
    }

    /// Remove every registered reporter, including the default one and
    /// the completion reporter; `execute` re-installs the latter.
    pub fn clear_reporters(&mut self) {
        self.env.clear_reporters();
        self.state.reporter_count = 0;
        self.state.completion_reporter_installed = false;
    }

    /// Apply options to the default reporter.
    pub fn configure_default_reporter(&mut self, options: ConsoleOptions) {
        self.default_reporter.configure(options);
        self.state.default_reporter_configured = true;
    }

    // --- files and configuration ---------------------------------------

    /// Add a single already-resolved spec file.
    pub fn add_spec_file(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.state.spec_files.contains(&path) {
            self.state.spec_files.push(path);
        }
    }

    /// Resolve patterns and append newly-seen spec files.
    pub fn add_spec_files(&mut self, patterns: &[String]) -> Result<(), RunnerError> {
        resolver::resolve_into(
            &mut self.state.spec_files,
            patterns,
            &self.state.project_base_dir,
            &self.state.spec_dir,
        )?;
        Ok(())
    }

    /// Resolve patterns and append newly-seen helper files.
    pub fn add_helper_files(&mut self, patterns: &[String]) -> Result<(), RunnerError> {
        resolver::resolve_into(
            &mut self.state.helper_files,
            patterns,
            &self.state.project_base_dir,
            &self.state.spec_dir,
        )?;
        Ok(())
    }

    /// Append require-hook identifiers verbatim.
    pub fn add_requires(&mut self, requires: &[String]) {
        self.state.requires.extend(requires.iter().cloned());
    }

    /// Apply a configuration document. Each key is applied independently
    /// and only if present.
    pub fn load_config(&mut self, doc: &ConfigDocument) -> Result<(), RunnerError> {
        if let Some(dir) = &doc.spec_dir {
            self.state.spec_dir = dir.clone();
        }
        if let Some(value) = doc.stop_spec_on_expectation_failure {
            self.env.stop_spec_on_expectation_failure(value);
        }
        if let Some(value) = doc.stop_on_spec_failure {
            self.env.stop_on_spec_failure(value);
        }
        if let Some(value) = doc.random {
            self.env.randomize_tests(value);
        }
        if let Some(helpers) = &doc.helpers {
            self.add_helper_files(helpers)?;
        }
        if let Some(requires) = &doc.requires {
            self.add_requires(requires);
        }
        if let Some(spec_files) = &doc.spec_files {
            self.add_spec_files(spec_files)?;
        }
        Ok(())
    }

    /// Load and apply the project config file.
    ///
    /// `path` is relative to the project base directory. Without one, a
    /// missing file at the default location is not an error.
    pub fn load_config_file(&mut self, path: Option<&Path>) -> Result<(), RunnerError> {
        if let Some(doc) = config::load_optional(&self.state.project_base_dir, path)? {
            self.load_config(&doc)?;
        }
        Ok(())
    }

    // --- completion and exit codes -------------------------------------

    /// Register a callback for the terminal pass/fail signal.
    pub fn on_complete(&self, callback: impl FnMut(bool) + Send + 'static) {
        self.completion.on_complete(callback);
    }

    /// Map an overall result to the process exit code.
    pub fn exit_code_completion(&self, passed: bool) {
        self.process.set_exit_code(if passed { EXIT_SUCCESS } else { EXIT_FAILURE });
    }

    /// The shutdown check: when the run never completed, force
    /// [`EXIT_INCOMPLETE`]. A completed run's 0/1 is left untouched.
    pub fn check_exit(&self) {
        if !self.completion.is_complete() {
            self.process.set_exit_code(EXIT_INCOMPLETE);
        }
    }

    // --- execution -----------------------------------------------------

    /// Run the suite.
    ///
    /// A non-empty `files` list overrides the configured spec set for
    /// this invocation: the spec directory and file list are reset before
    /// the new patterns resolve. A load failure aborts before the engine
    /// starts.
    pub fn execute(&mut self, files: &[String], filter: Option<&str>) -> Result<(), RunnerError> {
        self.install_exit_hook();
        self.load_requires()?;
        self.load_helpers()?;

        if !self.state.default_reporter_configured {
            self.configure_default_reporter(ConsoleOptions::default());
        }

        if let Some(filter) = filter
            && !filter.is_empty()
        {
            let filter = NameFilter::new(filter);
            self.env.set_spec_filter(Box::new(move |name| filter.matches(name)));
        }

        if !files.is_empty() {
            self.state.spec_dir.clear();
            self.state.spec_files.clear();
            self.add_spec_files(files)?;
        }

        self.load_specs()?;

        if !self.state.completion_reporter_installed {
            // Registered last so it observes the terminal signal after
            // every other reporter has handled it.
            let completion = Box::new(self.completion.clone());
            self.add_reporter(completion);
            self.state.completion_reporter_installed = true;
        }

        self.env.execute();
        Ok(())
    }

    fn install_exit_hook(&self) {
        let completion = self.completion.clone();
        self.process.on_exit(Box::new(move |process| {
            if !completion.is_complete() {
                process.set_exit_code(EXIT_INCOMPLETE);
            }
        }));
    }

    fn load_requires(&mut self) -> Result<(), RunnerError> {
        for id in &self.state.requires {
            tracing::debug!("loading require-hook {}", id);
            self.loader.load_module(id)?;
        }
        Ok(())
    }

    fn load_helpers(&mut self) -> Result<(), RunnerError> {
        for path in &self.state.helper_files {
            tracing::debug!("loading helper {}", path.display());
            self.loader.load_file(path)?;
        }
        Ok(())
    }

    fn load_specs(&mut self) -> Result<(), RunnerError> {
        for path in &self.state.spec_files {
            tracing::debug!("loading spec file {}", path.display());
            self.loader.load_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
