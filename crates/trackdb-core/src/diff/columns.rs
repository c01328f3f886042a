//! Column vocabulary reconciliation.
//!
//! Callers run this before the cell diff when the column set itself is under
//! test: a mismatch is reported as "expected columns vs actual columns"
//! rather than as a wall of changed cells.

use crate::diff::engine::compare_sets;
use crate::diff::model::{column_records, ColumnDiff};
use crate::records::{Normalizer, RecordLike, RecordSet};
use crate::{log_op_end, log_op_start};
use std::time::Instant;
use trackdb_core_types::schema::OP_DIFF_COLUMNS;

/// Compare the column vocabularies of two normalized record sets.
///
/// Returns `None` when either side is empty (no column shape to assess) or
/// when the column lists match, key for key and in order.
pub fn diff_column_sets(expected: &RecordSet, actual: &RecordSet) -> Option<ColumnDiff> {
    if expected.is_empty() || actual.is_empty() {
        return None;
    }
    let started = Instant::now();
    log_op_start!(OP_DIFF_COLUMNS);

    let a = expected.column_keys();
    let b = actual.column_keys();
    let result = compare_sets(&column_records(&a), &column_records(&b))
        .into_compared()
        .filter(|diff| !diff.is_empty())
        .map(|diff| ColumnDiff { a, b, diff });

    log_op_end!(
        OP_DIFF_COLUMNS,
        duration_ms = started.elapsed().as_millis() as u64,
        mismatch = result.is_some()
    );
    result
}

/// Normalize both sides with `normalizer` and compare their columns.
pub fn diff_columns_with<A, B>(normalizer: &Normalizer, expected: A, actual: B) -> Option<ColumnDiff>
where
    A: IntoIterator,
    A::Item: RecordLike,
    B: IntoIterator,
    B::Item: RecordLike,
{
    diff_column_sets(&normalizer.records(expected), &normalizer.records(actual))
}

/// Normalize both sides with default settings and compare their columns.
pub fn diff_columns<A, B>(expected: A, actual: B) -> Option<ColumnDiff>
where
    A: IntoIterator,
    A::Item: RecordLike,
    B: IntoIterator,
    B::Item: RecordLike,
{
    diff_columns_with(&Normalizer::default(), expected, actual)
}
