// SPDX-License-Identifier: MIT

//! Fakes for the engine, loader, and output seams.
//!
//! Compiled for unit tests and, behind the `test-support` feature, for
//! the behavioral suite in `tests/`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::engine::{
    Engine, EnvOptions, Environment, Reporter, RunResult, RunStart, SpecInfo, SpecPredicate,
    SpecResult, SpecStatus, SuiteInfo,
};
use crate::loader::{LoadError, ModuleLoader};

// --- filesystem fixtures -----------------------------------------------

/// Creates a directory tree from (path, content) pairs. Parent
/// directories are created automatically.
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

/// Creates a temp project with a config file at the default location.
pub fn temp_project_with_config(config: &str) -> tempfile::TempDir {
    let dir = tempfile::TempDir::new().unwrap();
    create_tree(dir.path(), &[(crate::config::DEFAULT_CONFIG_PATH, config)]);
    dir
}

// --- captured output ---------------------------------------------------

/// An in-memory `Write` sink shared between the reporter and the test.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// --- scripted engine ---------------------------------------------------

/// One spec the fake engine will pretend to run.
#[derive(Debug, Clone)]
pub struct ScriptedSpec {
    pub full_name: String,
    pub passes: bool,
}

pub fn passing(full_name: &str) -> ScriptedSpec {
    ScriptedSpec { full_name: full_name.to_string(), passes: true }
}

pub fn failing(full_name: &str) -> ScriptedSpec {
    ScriptedSpec { full_name: full_name.to_string(), passes: false }
}

/// Everything the fake environment observed, for assertions.
#[derive(Debug, Default)]
pub struct EnvRecord {
    pub suppress_load_errors: Option<bool>,
    pub reporters_added: usize,
    pub reporters_cleared: usize,
    pub filter_installed: bool,
    pub random: Option<bool>,
    pub seed: Option<u64>,
    pub stop_spec_on_expectation_failure: Option<bool>,
    pub stop_on_spec_failure: Option<bool>,
    pub matchers: Vec<String>,
    pub executed: bool,
    pub executed_specs: Vec<String>,
}

/// Shared view into the fake environment's observations.
#[derive(Clone, Default)]
pub struct EnvProbe {
    record: Arc<Mutex<EnvRecord>>,
}

impl EnvProbe {
    /// Run a closure against the record.
    pub fn with<T>(&self, f: impl FnOnce(&EnvRecord) -> T) -> T {
        f(&self.record.lock().unwrap())
    }

    pub fn executed(&self) -> bool {
        self.with(|r| r.executed)
    }

    pub fn executed_specs(&self) -> Vec<String> {
        self.with(|r| r.executed_specs.clone())
    }
}

/// Engine double that runs a scripted set of specs synchronously.
pub struct FakeEngine {
    env: FakeEnvironment,
}

impl FakeEngine {
    /// Build an engine whose run yields the scripted outcomes. The probe
    /// stays valid after the engine is consumed by the runner.
    pub fn new(script: Vec<ScriptedSpec>) -> (Self, EnvProbe) {
        let probe = EnvProbe::default();
        let env = FakeEnvironment {
            record: Arc::clone(&probe.record),
            reporters: Vec::new(),
            filter: None,
            script,
            hang: false,
        };
        (Self { env }, probe)
    }

    /// An engine that runs its specs but never delivers the terminal
    /// signal, like an engine that hung or crashed silently.
    pub fn hanging(script: Vec<ScriptedSpec>) -> (Self, EnvProbe) {
        let (mut engine, probe) = Self::new(script);
        engine.env.hang = true;
        (engine, probe)
    }
}

impl Engine for FakeEngine {
    type Env = FakeEnvironment;

    fn environment(self, options: EnvOptions) -> Self::Env {
        self.env.record.lock().unwrap().suppress_load_errors = Some(options.suppress_load_errors);
        self.env
    }
}

/// The fake engine's environment. Notifies reporters in registration
/// order and applies the installed spec filter, mirroring the collaborator
/// contract closely enough for lifecycle tests.
pub struct FakeEnvironment {
    record: Arc<Mutex<EnvRecord>>,
    reporters: Vec<Box<dyn Reporter>>,
    filter: Option<SpecPredicate>,
    script: Vec<ScriptedSpec>,
    hang: bool,
}

impl Environment for FakeEnvironment {
    type Matchers = Vec<String>;

    fn add_reporter(&mut self, reporter: Box<dyn Reporter>) {
        self.record.lock().unwrap().reporters_added += 1;
        self.reporters.push(reporter);
    }

    fn clear_reporters(&mut self) {
        self.record.lock().unwrap().reporters_cleared += 1;
        self.reporters.clear();
    }

    fn set_spec_filter(&mut self, predicate: SpecPredicate) {
        self.record.lock().unwrap().filter_installed = true;
        self.filter = Some(predicate);
    }

    fn randomize_tests(&mut self, value: bool) {
        self.record.lock().unwrap().random = Some(value);
    }

    fn seed(&mut self, value: u64) {
        self.record.lock().unwrap().seed = Some(value);
    }

    fn stop_spec_on_expectation_failure(&mut self, value: bool) {
        self.record.lock().unwrap().stop_spec_on_expectation_failure = Some(value);
    }

    fn stop_on_spec_failure(&mut self, value: bool) {
        self.record.lock().unwrap().stop_on_spec_failure = Some(value);
    }

    fn add_matchers(&mut self, matchers: Self::Matchers) {
        self.record.lock().unwrap().matchers.extend(matchers);
    }

    fn execute(&mut self) {
        self.record.lock().unwrap().executed = true;

        let selected: Vec<ScriptedSpec> = self
            .script
            .iter()
            .filter(|spec| self.filter.as_ref().is_none_or(|f| f(&spec.full_name)))
            .cloned()
            .collect();

        let start = RunStart { total_specs: selected.len() };
        let suite = SuiteInfo { full_name: "suite".to_string() };
        for reporter in &mut self.reporters {
            reporter.run_started(&start);
            reporter.suite_started(&suite);
        }

        let mut overall_passed = true;
        for spec in &selected {
            let info = SpecInfo { full_name: spec.full_name.clone() };
            let status = if spec.passes { SpecStatus::Passed } else { SpecStatus::Failed };
            overall_passed &= spec.passes;
            self.record.lock().unwrap().executed_specs.push(spec.full_name.clone());
            let result = SpecResult { full_name: spec.full_name.clone(), status };
            for reporter in &mut self.reporters {
                reporter.spec_started(&info);
                reporter.spec_done(&result);
            }
        }

        for reporter in &mut self.reporters {
            reporter.suite_done(&suite);
        }
        if self.hang {
            return;
        }
        let result = RunResult { overall_passed };
        for reporter in &mut self.reporters {
            reporter.run_done(&result);
        }
    }
}

// --- recording loader --------------------------------------------------

/// What a [`RecordingLoader`] was asked to load, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded {
    Module(String),
    File(PathBuf),
}

/// Loader double that records load order. Clones share the log, so a
/// clone can sit in the runner while the original asserts.
#[derive(Clone, Default)]
pub struct RecordingLoader {
    log: Arc<Mutex<Vec<Loaded>>>,
    fail_on: Option<String>,
}

impl RecordingLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any load whose path or identifier contains `needle`.
    pub fn failing_on(needle: &str) -> Self {
        Self { log: Arc::default(), fail_on: Some(needle.to_string()) }
    }

    pub fn loaded(&self) -> Vec<Loaded> {
        self.log.lock().unwrap().clone()
    }

    fn should_fail(&self, text: &str) -> bool {
        self.fail_on.as_deref().is_some_and(|needle| text.contains(needle))
    }
}

impl ModuleLoader for RecordingLoader {
    fn load_file(&mut self, path: &Path) -> Result<(), LoadError> {
        if self.should_fail(&path.to_string_lossy()) {
            return Err(LoadError::File {
                path: path.to_path_buf(),
                message: "scripted failure".to_string(),
            });
        }
        self.log.lock().unwrap().push(Loaded::File(path.to_path_buf()));
        Ok(())
    }

    fn load_module(&mut self, id: &str) -> Result<(), LoadError> {
        if self.should_fail(id) {
            return Err(LoadError::Module { id: id.to_string(), message: "scripted failure".to_string() });
        }
        self.log.lock().unwrap().push(Loaded::Module(id.to_string()));
        Ok(())
    }
}
