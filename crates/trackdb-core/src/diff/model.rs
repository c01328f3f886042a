//! Diff output types.
//!
//! Per-row change sets use `BTreeMap`/`BTreeSet` so serialization and
//! iteration order are deterministic.

use crate::records::{NormalizedValue, Record, RecordSet};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Row index → lower-cased field names that differ in that row.
pub type RowChanges = BTreeMap<usize, BTreeSet<String>>;

/// Cell-level difference between an expected (`a`) and an actual (`b`)
/// record set.
///
/// A row index absent from a map means that row is unchanged. Both maps
/// empty means the record sets are equivalent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffResult {
    /// Changed cells of the expected record set
    pub a: RowChanges,
    /// Changed cells of the actual record set
    pub b: RowChanges,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.a.is_empty() && self.b.is_empty()
    }

    /// First changed row on each side, if any.
    pub fn first_changed_rows(&self) -> (Option<usize>, Option<usize>) {
        (
            self.a.keys().next().copied(),
            self.b.keys().next().copied(),
        )
    }

    /// Exchange the roles of the two sides.
    pub fn swapped(self) -> Self {
        Self {
            a: self.b,
            b: self.a,
        }
    }

    pub(crate) fn mark(changes: &mut RowChanges, row: usize, key: &str) {
        changes.entry(row).or_default().insert(key.to_string());
    }
}

/// Which side of a comparison a statement is about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Side {
    Expected,
    Actual,
}

/// Outcome of comparing two record sets.
///
/// Separates "nothing to compare" from "compared and equal", which a bare
/// optional diff conflates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum Comparison {
    /// Both sides have rows and a non-empty key vocabulary.
    Compared { diff: DiffResult },
    /// One side has no rows; the vocabulary comes from the other side and
    /// every one of its cells is reported as changed.
    OneSideEmpty { empty: Side, diff: DiffResult },
    /// Both sides are empty, or neither first row has any field.
    NoBasis,
}

impl Comparison {
    /// The diff, only when both sides were actually compared.
    pub fn compared(&self) -> Option<&DiffResult> {
        match self {
            Comparison::Compared { diff } => Some(diff),
            _ => None,
        }
    }

    /// The diff for either compared or one-sided outcomes.
    pub fn changes(&self) -> Option<&DiffResult> {
        match self {
            Comparison::Compared { diff } | Comparison::OneSideEmpty { diff, .. } => Some(diff),
            Comparison::NoBasis => None,
        }
    }

    pub fn into_compared(self) -> Option<DiffResult> {
        match self {
            Comparison::Compared { diff } => Some(diff),
            _ => None,
        }
    }

    /// True only for a real comparison without differences.
    pub fn is_equal(&self) -> bool {
        self.compared().is_some_and(DiffResult::is_empty)
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Comparison::Compared { diff } if diff.is_empty() => "equal",
            Comparison::Compared { .. } => "changed",
            Comparison::OneSideEmpty { .. } => "one_side_empty",
            Comparison::NoBasis => "no_basis",
        }
    }
}

/// Field name of the single-column pseudo-records built from column lists.
pub const COLUMN_NAME_FIELD: &str = "name";

/// Column-vocabulary mismatch between two record sets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnDiff {
    /// Column keys of the expected record set, in order
    pub a: Vec<String>,
    /// Column keys of the actual record set, in order
    pub b: Vec<String>,
    /// Row indices refer to positions in `a` and `b`
    pub diff: DiffResult,
}

impl ColumnDiff {
    /// Expected columns as one `{name}` record per column, for rendering.
    pub fn a_records(&self) -> RecordSet {
        column_records(&self.a)
    }

    /// Actual columns as one `{name}` record per column, for rendering.
    pub fn b_records(&self) -> RecordSet {
        column_records(&self.b)
    }
}

pub(crate) fn column_records(columns: &[String]) -> RecordSet {
    columns
        .iter()
        .map(|c| Record::new().with(COLUMN_NAME_FIELD, NormalizedValue::String(c.clone())))
        .collect()
}
