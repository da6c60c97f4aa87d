#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use apicompat_core::errors::{ApiCompatError, ExErrorKind};
use apicompat_core::logging_facility::test_capture::init_test_capture;
use apicompat_core::model::AssemblyDef;
use apicompat_core::{log_op_end, log_op_error, log_op_start, RunSettings};
use apicompat_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_FLUSH, EVENT_START};
use common::{contract_lib, implementation_without_bar_int, run};

#[test]
fn test_log_op_start_and_end() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_and_end_unique_1";

    log_op_start!(op_name);
    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[1].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[1].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_2";

    let err = ApiCompatError::BaselineNotFound {
        path: "baseline.txt".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(
        events[0].field("err_code"),
        Some(ExErrorKind::BaselineNotFound.code())
    );
    assert_eq!(events[0].field("err_path"), Some("Some(\"baseline.txt\")"));
}

#[test]
fn test_run_comparison_logs_its_lifecycle() {
    let capture = init_test_capture();

    let (outcome, _) = run(
        &[contract_lib()],
        &[implementation_without_bar_int()],
        &RunSettings::default(),
    );
    assert_eq!(outcome.total_issues, 1);

    capture.assert_event_exists("run_comparison", EVENT_START);
    capture.assert_event_exists("run_comparison", EVENT_END);
}

#[test]
fn test_unresolved_references_are_warned() {
    let capture = init_test_capture();
    let contract = AssemblyDef::new("WarnLib", "1.0").with_unresolved_reference("System.Missing");

    let (outcome, _) = run(&[contract.clone()], &[contract], &RunSettings::default());
    assert!(outcome.status.is_success());

    let warned = capture.count_events(|e| {
        e.level == tracing::Level::WARN && e.field("reference") == Some("System.Missing")
    });
    assert!(warned >= 1);
}

#[test]
fn test_section_flush_is_logged_per_group() {
    let capture = init_test_capture();
    let mut contract = contract_lib();
    contract.name = "FlushLib".to_string();
    let mut implementation = implementation_without_bar_int();
    implementation.name = "FlushLib".to_string();

    run(&[contract], &[implementation], &RunSettings::default());

    let flushes = capture.count_events(|e| {
        e.event.as_deref() == Some(EVENT_FLUSH)
            && e.field("group") == Some("Compat issues with assembly FlushLib:")
    });
    assert_eq!(flushes, 1);
}
