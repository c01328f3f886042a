use serde_json::{json, Value};
use trackdb_core::{normalize, RecordSet};

/// Rows of a JSON array literal
#[allow(dead_code)]
pub fn rows(value: Value) -> Vec<Value> {
    match value {
        Value::Array(rows) => rows,
        other => vec![other],
    }
}

/// Normalized record set from a JSON array literal
#[allow(dead_code)]
pub fn set(value: Value) -> RecordSet {
    normalize(&rows(value))
}

/// The classic EMP sample, lower-case keys and native types
#[allow(dead_code)]
pub fn emp_expected() -> Vec<Value> {
    rows(json!([
        {"empno": 7369, "ename": "SMITH", "deptno": 20},
        {"empno": 7499, "ename": "ALLEN", "deptno": 30},
        {"empno": 7521, "ename": "WARD", "deptno": 30},
        {"empno": 7566, "ename": "JONES", "deptno": 20},
    ]))
}

/// The same rows as a database driver returns them: upper-case keys and
/// text values
#[allow(dead_code)]
pub fn emp_actual() -> Vec<Value> {
    rows(json!([
        {"EMPNO": "7369", "ENAME": "SMITH", "DEPTNO": "20"},
        {"EMPNO": "7499", "ENAME": "ALLEN", "DEPTNO": "30"},
        {"EMPNO": "7521", "ENAME": "WARD", "DEPTNO": "30"},
        {"EMPNO": "7566", "ENAME": "JONES", "DEPTNO": "20"},
    ]))
}

/// Row keys of a diff side, in order
#[allow(dead_code)]
pub fn changed_rows(changes: &trackdb_core::RowChanges) -> Vec<usize> {
    changes.keys().copied().collect()
}

/// Field names changed in one row
#[allow(dead_code)]
pub fn changed_fields(changes: &trackdb_core::RowChanges, row: usize) -> Vec<String> {
    changes
        .get(&row)
        .map(|fields| fields.iter().cloned().collect())
        .unwrap_or_default()
}
