//! Shared fixture for behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;

pub use specrun::test_support::*;

pub use specrun::process::{ProcessHandle, SystemProcess};

use specrun::runner::Runner;
use tempfile::TempDir;

/// A runner wired to fakes inside a temp project directory.
pub struct Fixture {
    pub runner: Runner<FakeEnvironment>,
    pub probe: EnvProbe,
    pub loader: RecordingLoader,
    pub process: Arc<SystemProcess>,
    pub dir: TempDir,
}

/// Build a fixture with scripted spec outcomes and project files.
pub fn fixture(script: Vec<ScriptedSpec>, files: &[(&str, &str)]) -> Fixture {
    let dir = TempDir::new().unwrap();
    create_tree(dir.path(), files);
    fixture_in(script, dir)
}

/// Build a fixture over an existing temp project directory.
pub fn fixture_in(script: Vec<ScriptedSpec>, dir: TempDir) -> Fixture {
    let (engine, probe) = FakeEngine::new(script);
    let loader = RecordingLoader::new();
    let process = Arc::new(SystemProcess::new());
    let runner = Runner::with_base_dir(
        engine,
        Box::new(loader.clone()),
        Arc::clone(&process) as Arc<dyn ProcessHandle>,
        dir.path().to_path_buf(),
    );
    Fixture { runner, probe, loader, process, dir }
}
