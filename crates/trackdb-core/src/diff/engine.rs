//! Structural record set differ.
//!
//! Both record sets are normalized, flattened row-major into one cell token
//! per `(row, key)` over a fixed, sorted key vocabulary, and aligned with
//! [`sequence::align`]. Removed and added runs are mapped back to
//! `(pos / keys.len(), keys[pos % keys.len()])`, so an inserted or deleted
//! row shows up as that row's cells only instead of shifting every
//! following row.

use crate::diff::model::{Comparison, DiffResult, RowChanges, Side};
use crate::diff::sequence::{self, HunkKind};
use crate::records::{Normalizer, Record, RecordLike, RecordSet};
use crate::{log_op_end, log_op_start};
use std::collections::BTreeSet;
use std::time::Instant;
use trackdb_core_types::schema::OP_DIFF;

/// Key vocabulary: the union of the keys of both first rows, sorted so that
/// exchanging the sides flattens cells in the same order.
fn key_vocabulary(expected: &RecordSet, actual: &RecordSet) -> Vec<String> {
    expected
        .first()
        .into_iter()
        .chain(actual.first())
        .flat_map(Record::keys)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Comparison token for one cell. Missing keys read as null; multi-line
/// text ignores trailing whitespace.
fn cell_token<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    let text = record.get(key)?.as_text()?;
    if text.contains('\n') {
        Some(text.trim_end())
    } else {
        Some(text)
    }
}

fn flatten<'a>(records: &'a RecordSet, keys: &[String]) -> Vec<Option<&'a str>> {
    records
        .iter()
        .flat_map(|record| keys.iter().map(move |key| cell_token(record, key)))
        .collect()
}

fn mark_run(changes: &mut RowChanges, keys: &[String], start: usize, count: usize) {
    for pos in start..start + count {
        DiffResult::mark(changes, pos / keys.len(), &keys[pos % keys.len()]);
    }
}

/// Diff two already-normalized record sets over a non-empty vocabulary.
fn diff_normalized(expected: &RecordSet, actual: &RecordSet, keys: &[String]) -> DiffResult {
    let tokens_a = flatten(expected, keys);
    let tokens_b = flatten(actual, keys);

    let mut result = DiffResult::default();
    let (mut pos_a, mut pos_b) = (0usize, 0usize);
    for hunk in sequence::align(&tokens_a, &tokens_b, keys.len()) {
        match hunk.kind {
            HunkKind::Removed => {
                mark_run(&mut result.a, keys, pos_a, hunk.count);
                pos_a += hunk.count;
            }
            HunkKind::Added => {
                mark_run(&mut result.b, keys, pos_b, hunk.count);
                pos_b += hunk.count;
            }
            HunkKind::Unchanged => {
                pos_a += hunk.count;
                pos_b += hunk.count;
            }
        }
    }
    result
}

/// Compare two normalized record sets, distinguishing one-sided and empty
/// inputs from real comparisons.
pub fn compare_sets(expected: &RecordSet, actual: &RecordSet) -> Comparison {
    let started = Instant::now();
    log_op_start!(OP_DIFF, rows_a = expected.len(), rows_b = actual.len());

    let keys = key_vocabulary(expected, actual);
    let comparison = if keys.is_empty() {
        Comparison::NoBasis
    } else {
        let diff = diff_normalized(expected, actual, &keys);
        match (expected.is_empty(), actual.is_empty()) {
            (true, _) => Comparison::OneSideEmpty {
                empty: Side::Expected,
                diff,
            },
            (_, true) => Comparison::OneSideEmpty {
                empty: Side::Actual,
                diff,
            },
            _ => Comparison::Compared { diff },
        }
    };

    let (changed_a, changed_b) = comparison
        .changes()
        .map_or((0, 0), |d| (d.a.len(), d.b.len()));
    log_op_end!(
        OP_DIFF,
        duration_ms = started.elapsed().as_millis() as u64,
        key_count = keys.len(),
        changed_rows_a = changed_a,
        changed_rows_b = changed_b,
        outcome = comparison.label()
    );
    comparison
}

/// Normalize both sides with `normalizer` and compare them.
pub fn compare_with<A, B>(normalizer: &Normalizer, expected: A, actual: B) -> Comparison
where
    A: IntoIterator,
    A::Item: RecordLike,
    B: IntoIterator,
    B::Item: RecordLike,
{
    compare_sets(&normalizer.records(expected), &normalizer.records(actual))
}

/// Normalize both sides with default settings and compare them.
pub fn compare<A, B>(expected: A, actual: B) -> Comparison
where
    A: IntoIterator,
    A::Item: RecordLike,
    B: IntoIterator,
    B::Item: RecordLike,
{
    compare_with(&Normalizer::default(), expected, actual)
}

/// Cell-level diff of `expected` against `actual`.
///
/// Returns `None` when there is no basis for comparison: either side has no
/// rows, or the first rows carry no fields. `None` must not be read as
/// "equal"; an equal pair yields `Some` with both maps empty. Use
/// [`compare`] to get the one-sided diff of an empty/non-empty pair.
pub fn diff<A, B>(expected: A, actual: B) -> Option<DiffResult>
where
    A: IntoIterator,
    A::Item: RecordLike,
    B: IntoIterator,
    B::Item: RecordLike,
{
    compare(expected, actual).into_compared()
}

/// [`diff`] with an explicit normalizer.
pub fn diff_with<A, B>(normalizer: &Normalizer, expected: A, actual: B) -> Option<DiffResult>
where
    A: IntoIterator,
    A::Item: RecordLike,
    B: IntoIterator,
    B::Item: RecordLike,
{
    compare_with(normalizer, expected, actual).into_compared()
}
