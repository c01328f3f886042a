#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{changed_rows, emp_actual, emp_expected, rows};
use serde_json::json;
use trackdb_core::diff::{diff_column_sets, diff_columns_with};
use trackdb_core::records::Normalizer;
use trackdb_core::{diff_columns, normalize};

#[test]
fn test_different_columns_are_reported() {
    let result = diff_columns(&rows(json!([{"a": 1}])), &rows(json!([{"b": 1}]))).unwrap();
    assert_eq!(result.a, vec!["a"]);
    assert_eq!(result.b, vec!["b"]);
    assert!(!result.diff.is_empty());
}

#[test]
fn test_same_columns_are_none() {
    assert!(diff_columns(&rows(json!([{"a": 1}])), &rows(json!([{"a": 1}]))).is_none());
    assert!(diff_columns(&emp_expected(), &emp_actual()).is_none());
}

#[test]
fn test_column_values_do_not_matter() {
    let a = rows(json!([{"id": 1, "name": "x"}]));
    let b = rows(json!([{"ID": 2, "NAME": "y"}]));
    assert!(diff_columns(&a, &b).is_none());
}

#[test]
fn test_column_order_matters() {
    let a = rows(json!([{"id": 1, "name": "x"}]));
    let b = rows(json!([{"name": "x", "id": 1}]));
    assert!(diff_columns(&a, &b).is_some());
}

#[test]
fn test_missing_column_marks_its_position() {
    let a = rows(json!([{"empno": 1, "ename": "x", "deptno": 10}]));
    let b = rows(json!([{"empno": 1, "deptno": 10}]));
    let result = diff_columns(&a, &b).unwrap();
    assert_eq!(changed_rows(&result.diff.a), vec![1]);
    assert!(result.diff.b.is_empty());
}

#[test]
fn test_empty_side_cannot_be_assessed() {
    let empty: Vec<serde_json::Value> = Vec::new();
    assert!(diff_columns(&empty, &rows(json!([{"a": 1}]))).is_none());
    assert!(diff_columns(&empty, &empty).is_none());
}

#[test]
fn test_column_pseudo_records_render_names() {
    let result = diff_columns(&rows(json!([{"a": 1}])), &rows(json!([{"b": 1}]))).unwrap();
    let a = result.a_records();
    assert_eq!(a.len(), 1);
    assert_eq!(a[0].get("name").unwrap().to_string(), "a");
}

#[test]
fn test_column_sets_on_normalized_input() {
    let a = normalize(&rows(json!([{"A": 1, "B": 2}])));
    let b = normalize(&rows(json!([{"a": 1}])));
    let result = diff_column_sets(&a, &b).unwrap();
    assert_eq!(result.a, vec!["a", "b"]);
}

#[test]
fn test_columns_with_custom_normalizer() {
    let normalizer = Normalizer::new("NULL", Vec::new());
    let a = rows(json!([{"x": "NULL"}]));
    let b = rows(json!([{"X": 0}]));
    assert!(diff_columns_with(&normalizer, &a, &b).is_none());
}
