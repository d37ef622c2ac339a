//! Configuration discovery and failure modes.

use std::path::Path;

use specrun::config::{ConfigError, DEFAULT_CONFIG_PATH};
use specrun::runner::RunnerError;

use crate::prelude::*;

#[test]
fn missing_default_config_is_silent_and_leaves_state_unchanged() {
    let mut f = fixture(vec![], &[]);
    f.runner.load_config_file(None).unwrap();
    assert_eq!(f.runner.state().spec_dir, "");
    assert!(f.runner.state().spec_files.is_empty());
    assert!(f.runner.state().helper_files.is_empty());
    assert!(f.runner.state().requires.is_empty());
}

#[test]
fn missing_explicit_config_is_fatal() {
    let mut f = fixture(vec![], &[]);
    let err = f.runner.load_config_file(Some(Path::new("missing.json"))).unwrap_err();
    assert!(matches!(err, RunnerError::Config(ConfigError::NotFound { .. })));
}

#[test]
fn malformed_config_is_fatal_even_at_the_default_location() {
    let mut f = fixture(vec![], &[(DEFAULT_CONFIG_PATH, "{ not json")]);
    let err = f.runner.load_config_file(None).unwrap_err();
    assert!(matches!(err, RunnerError::Config(ConfigError::Parse { .. })));
}

#[test]
fn config_settings_reach_the_engine_environment() {
    let mut f = fixture(
        vec![],
        &[(
            DEFAULT_CONFIG_PATH,
            r#"{
                "stopSpecOnExpectationFailure": true,
                "stopOnSpecFailure": true,
                "random": true
            }"#,
        )],
    );
    f.runner.load_config_file(None).unwrap();
    assert_eq!(f.probe.with(|r| r.stop_spec_on_expectation_failure), Some(true));
    assert_eq!(f.probe.with(|r| r.stop_on_spec_failure), Some(true));
    assert_eq!(f.probe.with(|r| r.random), Some(true));
}

#[test]
fn explicit_api_calls_after_config_take_precedence() {
    let mut f =
        fixture(vec![], &[(DEFAULT_CONFIG_PATH, r#"{"random": true}"#)]);
    f.runner.load_config_file(None).unwrap();
    f.runner.randomize_tests(false);
    assert_eq!(f.probe.with(|r| r.random), Some(false));
}
