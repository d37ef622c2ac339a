//! Exit-code policy: 0 pass, 1 fail, 4 never completed.

use specrun::runner::{EXIT_FAILURE, EXIT_INCOMPLETE, EXIT_SUCCESS};

use crate::prelude::*;

#[test]
fn all_specs_passing_exits_zero() {
    let mut f = fixture(vec![passing("Foo works"), passing("Bar works")], &[]);
    f.runner.execute(&[], None).unwrap();
    f.process.run_exit_hooks();
    assert_eq!(f.process.exit_code(), Some(EXIT_SUCCESS));
}

#[test]
fn any_spec_failing_exits_one() {
    let mut f = fixture(vec![passing("Foo works"), failing("Bar breaks")], &[]);
    f.runner.execute(&[], None).unwrap();
    f.process.run_exit_hooks();
    assert_eq!(f.process.exit_code(), Some(EXIT_FAILURE));
}

#[test]
fn engine_that_never_completes_exits_four() {
    let dir = tempfile::TempDir::new().unwrap();
    let (engine, _probe) = FakeEngine::hanging(vec![passing("Foo works")]);
    let process = std::sync::Arc::new(specrun::process::SystemProcess::new());
    let mut runner = specrun::runner::Runner::with_base_dir(
        engine,
        Box::new(RecordingLoader::new()),
        std::sync::Arc::clone(&process) as std::sync::Arc<dyn specrun::process::ProcessHandle>,
        dir.path().to_path_buf(),
    );

    runner.execute(&[], None).unwrap();
    process.run_exit_hooks();
    assert_eq!(process.exit_code(), Some(EXIT_INCOMPLETE));
}

#[test]
fn shutdown_hook_never_overrides_a_completed_run() {
    let mut f = fixture(vec![failing("Bar breaks")], &[]);
    f.runner.execute(&[], None).unwrap();
    // Hooks run after completion; the recorded failure code survives.
    f.process.run_exit_hooks();
    f.process.run_exit_hooks();
    assert_eq!(f.process.exit_code(), Some(EXIT_FAILURE));
}
