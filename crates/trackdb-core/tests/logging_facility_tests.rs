#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::{json, Value};
use trackdb_core::errors::TrackDbError;
use trackdb_core::logging_facility::test_capture::init_test_capture;
use trackdb_core::{compare, log_op_end, log_op_error, log_op_start, Catalog, EngineConfig};
use trackdb_core::{diff_columns, RecordAssertion};
use trackdb_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, OP_CATALOG_LOAD, OP_CONFIG_LOAD, OP_DIFF,
    OP_DIFF_COLUMNS, OP_RECORD_CONTAIN, OP_RECORD_EQUAL,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, rows_a = 2);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].field("rows_a"), Some("2"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = TrackDbError::CatalogParse {
        reason: "not a map".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    capture.assert_event_exists(op_name, EVENT_END_ERROR);
    let events = capture.events_for_op(op_name);
    assert_eq!(events[0].field("err.code"), Some("ERR_INVALID_CATALOG"));
    assert_eq!(events[0].field("err.kind"), Some("InvalidCatalog"));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_assert_event_exists_fails_for_unknown_op() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_diff_logs_boundaries() {
    let capture = init_test_capture();

    let expected: Vec<Value> = Vec::new();
    let actual: Vec<Value> = (0..3)
        .map(|i| json!({"k1": i, "k2": i, "k3": i, "k4": i, "k5": i, "k6": i, "k7": i, "k8": i, "k9": i}))
        .collect();
    compare(&expected, &actual);

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some(OP_DIFF)
            && e.event.as_deref() == Some(EVENT_START)
            && e.field("rows_a") == Some("0")
            && e.field("rows_b") == Some("3")
    });
    assert!(starts >= 1);

    let end = capture
        .events_for_op(OP_DIFF)
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END) && e.field("key_count") == Some("9"))
        .expect("diff end event");
    assert_eq!(end.field("outcome"), Some("one_side_empty"));
    assert_eq!(end.field("changed_rows_b"), Some("3"));
    assert!(end.field("duration_ms").is_some());
    assert_eq!(end.component.as_deref(), Some("trackdb_core::diff::engine"));
}

#[test]
fn test_diff_columns_logs_mismatch() {
    let capture = init_test_capture();

    diff_columns(&vec![json!({"alpha": 1})], &vec![json!({"beta": 1})]);

    let found = capture.count_events(|e| {
        e.op.as_deref() == Some(OP_DIFF_COLUMNS)
            && e.event.as_deref() == Some(EVENT_END)
            && e.field("mismatch") == Some("true")
    });
    assert!(found >= 1);
}

#[test]
fn test_assertions_log_outcome() {
    let capture = init_test_capture();

    let rows: Vec<Value> = (0..13).map(|i| json!({"n": i})).collect();
    RecordAssertion::new(&rows).equal(&rows);
    RecordAssertion::new(&rows).contain(&vec![json!({"n": 99})]);

    let equal_end = capture.count_events(|e| {
        e.op.as_deref() == Some(OP_RECORD_EQUAL)
            && e.event.as_deref() == Some(EVENT_END)
            && e.field("outcome") == Some("pass")
    });
    assert!(equal_end >= 1);

    let contain_start = capture.count_events(|e| {
        e.op.as_deref() == Some(OP_RECORD_CONTAIN)
            && e.event.as_deref() == Some(EVENT_START)
            && e.field("rows_b") == Some("13")
    });
    assert!(contain_start >= 1);
    let contain_fail = capture.count_events(|e| {
        e.op.as_deref() == Some(OP_RECORD_CONTAIN)
            && e.event.as_deref() == Some(EVENT_END)
            && e.field("outcome") == Some("fail")
    });
    assert!(contain_fail >= 1);
}

#[test]
fn test_failed_loads_log_error_events() {
    let capture = init_test_capture();
    let dir = tempfile::tempdir().unwrap();

    assert!(EngineConfig::load(dir.path().join("missing.toml")).is_err());
    assert!(Catalog::from_yaml_file(dir.path().join("missing.yml")).is_err());

    let config_errors = capture.count_events(|e| {
        e.op.as_deref() == Some(OP_CONFIG_LOAD)
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field("err.code") == Some("ERR_IO")
    });
    let catalog_errors = capture.count_events(|e| {
        e.op.as_deref() == Some(OP_CATALOG_LOAD)
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field("err.code") == Some("ERR_IO")
    });
    assert!(config_errors >= 1);
    assert!(catalog_errors >= 1);
}
