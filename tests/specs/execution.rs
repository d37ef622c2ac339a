//! File discovery, load order, and per-invocation overrides.

use specrun::config::DEFAULT_CONFIG_PATH;
use specrun::runner::RunnerError;

use crate::prelude::*;

#[test]
fn config_file_drives_discovery_and_load_order() {
    let mut f = fixture(
        vec![passing("Foo works")],
        &[
            (
                DEFAULT_CONFIG_PATH,
                r#"{
                    "spec_dir": "spec",
                    "requires": ["transpiler"],
                    "helpers": ["helpers/**/*.txt"],
                    "spec_files": ["**/*_spec.txt"]
                }"#,
            ),
            ("spec/helpers/matchers.txt", ""),
            ("spec/a_spec.txt", ""),
            ("spec/nested/b_spec.txt", ""),
        ],
    );

    f.runner.load_config_file(None).unwrap();
    f.runner.execute(&[], None).unwrap();

    let base = f.dir.path();
    assert_eq!(
        f.loader.loaded(),
        vec![
            Loaded::Module("transpiler".to_string()),
            Loaded::File(base.join("spec/helpers/matchers.txt")),
            Loaded::File(base.join("spec/a_spec.txt")),
            Loaded::File(base.join("spec/nested/b_spec.txt")),
        ]
    );
    assert!(f.probe.executed());
}

#[test]
fn overlapping_patterns_yield_each_file_once_in_first_seen_order() {
    let mut f = fixture(
        vec![],
        &[("spec/a_spec.txt", ""), ("spec/b_spec.txt", "")],
    );
    f.runner
        .load_config(
            &serde_json::from_str(
                r#"{"spec_dir": "spec", "spec_files": ["b_spec.txt", "*_spec.txt"]}"#,
            )
            .unwrap(),
        )
        .unwrap();
    // A second document with overlapping patterns appends nothing new.
    f.runner
        .load_config(&serde_json::from_str(r#"{"spec_files": ["**/*_spec.txt"]}"#).unwrap())
        .unwrap();

    let base = f.dir.path();
    assert_eq!(
        f.runner.state().spec_files,
        vec![base.join("spec/b_spec.txt"), base.join("spec/a_spec.txt")]
    );
}

#[test]
fn single_pattern_config_resolves_to_exactly_its_glob() {
    let mut f = fixture(
        vec![],
        &[("a_spec.txt", ""), ("unrelated.txt", "")],
    );
    f.runner
        .load_config(&serde_json::from_str(r#"{"spec_files": ["a_spec.txt"]}"#).unwrap())
        .unwrap();
    assert_eq!(f.runner.state().spec_files, vec![f.dir.path().join("a_spec.txt")]);
}

#[test]
fn explicit_execute_files_override_configured_specs() {
    let mut f = fixture(
        vec![passing("Foo works")],
        &[("spec/a_spec.txt", ""), ("x_spec.txt", "")],
    );
    f.runner
        .load_config(
            &serde_json::from_str(r#"{"spec_dir": "spec", "spec_files": ["*_spec.txt"]}"#).unwrap(),
        )
        .unwrap();

    f.runner.execute(&["x_spec.txt".to_string()], None).unwrap();

    assert_eq!(f.runner.state().spec_dir, "");
    assert_eq!(f.runner.state().spec_files, vec![f.dir.path().join("x_spec.txt")]);
    assert_eq!(f.loader.loaded(), vec![Loaded::File(f.dir.path().join("x_spec.txt"))]);
}

#[test]
fn helper_load_failure_halts_before_the_engine_runs() {
    let dir = tempfile::TempDir::new().unwrap();
    create_tree(dir.path(), &[("spec/helpers/broken.txt", ""), ("spec/a_spec.txt", "")]);

    let (engine, probe) = FakeEngine::new(vec![passing("never runs")]);
    let process = std::sync::Arc::new(specrun::process::SystemProcess::new());
    let mut runner = specrun::runner::Runner::with_base_dir(
        engine,
        Box::new(RecordingLoader::failing_on("broken")),
        std::sync::Arc::clone(&process) as std::sync::Arc<dyn specrun::process::ProcessHandle>,
        dir.path().to_path_buf(),
    );
    runner
        .load_config(
            &serde_json::from_str(
                r#"{"spec_dir": "spec", "helpers": ["helpers/*.txt"], "spec_files": ["*_spec.txt"]}"#,
            )
            .unwrap(),
        )
        .unwrap();

    let err = runner.execute(&[], None).unwrap_err();
    assert!(matches!(err, RunnerError::Load(_)));
    assert!(!probe.executed());
}
