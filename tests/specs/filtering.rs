//! Name-based spec selection, end to end.

use specrun::runner::EXIT_SUCCESS;

use crate::prelude::*;

#[test]
fn filter_narrows_the_run_to_matching_names() {
    let mut f = fixture(
        vec![passing("Foo bar baz"), passing("Foo qux"), passing("Qux quux")],
        &[],
    );
    f.runner.execute(&[], Some("Foo")).unwrap();
    assert_eq!(
        f.probe.executed_specs(),
        vec!["Foo bar baz".to_string(), "Foo qux".to_string()]
    );
}

#[test]
fn no_filter_runs_everything() {
    let mut f = fixture(vec![passing("Foo bar baz"), passing("Qux quux")], &[]);
    f.runner.execute(&[], None).unwrap();
    assert_eq!(f.probe.executed_specs().len(), 2);
}

#[test]
fn failing_spec_outside_the_filter_does_not_fail_the_run() {
    let mut f = fixture(vec![passing("Foo works"), failing("Qux breaks")], &[]);
    f.runner.execute(&[], Some("Foo")).unwrap();
    f.process.run_exit_hooks();
    assert_eq!(f.process.exit_code(), Some(EXIT_SUCCESS));
}

#[test]
fn filter_matching_nothing_still_completes() {
    let mut f = fixture(vec![passing("Foo works")], &[]);
    f.runner.execute(&[], Some("Zzz")).unwrap();
    assert!(f.probe.executed_specs().is_empty());
    f.process.run_exit_hooks();
    assert_eq!(f.process.exit_code(), Some(EXIT_SUCCESS));
}
