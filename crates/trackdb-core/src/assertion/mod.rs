//! Record assertions.
//!
//! A [`RecordAssertion`] wraps an actual record set, optionally narrows or
//! reorders it, and checks it against expected rows. The outcome is a
//! [`Verdict`] carrying the rendered explanation; nothing here panics or
//! raises on a failed comparison.
//!
//! ```
//! use serde_json::json;
//! use trackdb_core::assertion::RecordAssertion;
//!
//! let actual = vec![json!({"EMPNO": "7369", "ENAME": "SMITH"})];
//! let verdict = RecordAssertion::new(&actual).equal(&vec![json!({"empno": 7369, "ename": "SMITH"})]);
//! assert!(verdict.passed);
//! ```

pub mod messages;
pub mod report;

use crate::config::EngineConfig;
use crate::diff::{compare_sets, diff_column_sets, Comparison};
use crate::errors::{Result, TrackDbError};
use crate::records::{Normalizer, Record, RecordLike, RecordSet};
use crate::render::{format, FormatOptions};
use crate::{log_op_end, log_op_start};
use messages::{
    Catalog, Language, Message, MessageCatalog, MSG_ACTUAL, MSG_COLUMNS_SHOULD_EQUAL, MSG_EXPECTED,
    MSG_RECORDS_SHOULD_CONTAIN, MSG_RECORDS_SHOULD_CONTAIN_COLUMNS, MSG_RECORDS_SHOULD_EQUAL,
    MSG_RECORDS_SHOULD_NOT_CONTAIN, MSG_RECORDS_SHOULD_NOT_EQUAL, MSG_TARGET,
};
use report::indent;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::time::Instant;
use trackdb_core_types::schema::{OP_RECORD_CONTAIN, OP_RECORD_EQUAL};

/// Rows of context shown above the first changed row.
const CONTEXT_ROWS: usize = 2;

/// Outcome of an assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub passed: bool,
    /// Explanation of a failure; empty when the assertion passed
    pub message: String,
}

impl Verdict {
    fn pass() -> Self {
        Self {
            passed: true,
            message: String::new(),
        }
    }

    fn fail(message: String) -> Self {
        Self {
            passed: false,
            message,
        }
    }
}

/// One parsed `order_by` column.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OrderKey {
    column: String,
    descending: bool,
}

impl OrderKey {
    fn parse(spec: &str) -> Result<Self> {
        let (descending, column) = match spec.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, spec.strip_prefix('+').unwrap_or(spec)),
        };
        if column.trim().is_empty() {
            return Err(TrackDbError::InvalidOrderSpec {
                spec: spec.to_string(),
            });
        }
        Ok(Self {
            column: column.to_lowercase(),
            descending,
        })
    }

    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ord = compare_cells(
            a.get(&self.column).and_then(|v| v.as_text()),
            b.get(&self.column).and_then(|v| v.as_text()),
        );
        if self.descending {
            ord.reverse()
        } else {
            ord
        }
    }
}

fn as_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        text.parse().ok().filter(|n: &f64| n.is_finite())
    }
}

/// Numbers compare numerically, null sorts first, everything else by text.
fn compare_cells(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => match (as_number(x), as_number(y)) {
            (Some(m), Some(n)) => m.total_cmp(&n),
            _ => x.cmp(y),
        },
    }
}

/// Lower-cased names, first occurrence kept.
fn lowercase_all<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = BTreeSet::new();
    names
        .into_iter()
        .map(|n| n.as_ref().to_lowercase())
        .filter(|n| seen.insert(n.clone()))
        .collect()
}

fn filter_columns<F>(records: &RecordSet, keep: F) -> RecordSet
where
    F: Fn(&str) -> bool,
{
    records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            record.retain_keys(&keep);
            record
        })
        .collect()
}

/// Assertion builder over an actual record set.
pub struct RecordAssertion {
    actual: RecordSet,
    normalizer: Normalizer,
    format: FormatOptions,
    catalog: Box<dyn MessageCatalog>,
    language: Language,
    columns: Option<Vec<String>>,
    without: Option<Vec<String>>,
    message: Option<Message>,
    negate: bool,
}

impl RecordAssertion {
    /// Assert over `actual`, normalized with default settings.
    pub fn new<A>(actual: A) -> Self
    where
        A: IntoIterator,
        A::Item: RecordLike,
    {
        let normalizer = Normalizer::default();
        Self::with_parts(
            normalizer.records(actual),
            normalizer,
            FormatOptions::default(),
            Language::default(),
        )
    }

    /// Assert over `actual` with the normalizer, table options and language
    /// of `config`.
    pub fn from_config<A>(config: &EngineConfig, actual: A) -> Self
    where
        A: IntoIterator,
        A::Item: RecordLike,
    {
        let normalizer = Normalizer::from_config(config);
        Self::with_parts(
            normalizer.records(actual),
            normalizer,
            FormatOptions::from_config(config),
            config.language,
        )
    }

    fn with_parts(
        actual: RecordSet,
        normalizer: Normalizer,
        format: FormatOptions,
        language: Language,
    ) -> Self {
        Self {
            actual,
            normalizer,
            format,
            catalog: Box::new(Catalog::for_language(language)),
            language,
            columns: None,
            without: None,
            message: None,
            negate: false,
        }
    }

    /// Replace the message catalog.
    pub fn with_catalog(mut self, catalog: impl MessageCatalog + 'static) -> Self {
        self.catalog = Box::new(catalog);
        self
    }

    /// Switch to the built-in catalog of `language`. Localized custom
    /// messages pick their text in this language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self.catalog = Box::new(Catalog::for_language(language));
        self
    }

    /// Replace the table options used in failure messages. Offset, diff and
    /// success styling are set per table.
    pub fn with_format(mut self, format: FormatOptions) -> Self {
        self.format = format;
        self
    }

    /// Compare only the named columns. Every actual row must carry all of
    /// them.
    pub fn columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.columns = Some(lowercase_all(names));
        self
    }

    /// Ignore the named columns on both sides.
    pub fn without<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.without = Some(lowercase_all(names));
        self
    }

    /// Stable-sort the actual rows by `col`, `+col` (ascending) or `-col`
    /// (descending) specs, earlier specs first.
    ///
    /// # Errors
    /// `InvalidOrderSpec` if a spec names no column.
    pub fn order_by<I, S>(mut self, specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = specs
            .into_iter()
            .map(|s| OrderKey::parse(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        self.actual.records_mut().sort_by(|a, b| {
            keys.iter()
                .map(|key| key.compare(a, b))
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        });
        Ok(self)
    }

    /// Rows shown per table in failure messages.
    pub fn limit(mut self, limit: usize) -> Self {
        self.format.limit = Some(limit);
        self
    }

    /// Lead failure messages with `text` instead of the default header.
    pub fn message(mut self, text: impl Into<String>) -> Self {
        self.message = Some(Message::Text(text.into()));
        self
    }

    /// Like [`RecordAssertion::message`] with one text per language. The
    /// text for the active language is used, else the first one given.
    pub fn localized_message<I, S>(mut self, texts: I) -> Self
    where
        I: IntoIterator<Item = (Language, S)>,
        S: Into<String>,
    {
        self.message = Some(Message::localized(texts));
        self
    }

    /// Negate the assertion.
    pub fn not(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    /// The actual rows after normalization and any `order_by`.
    pub fn actual(&self) -> &RecordSet {
        &self.actual
    }

    /// Passes when the actual rows equal `expected` cell for cell, in order.
    pub fn equal<E>(&self, expected: E) -> Verdict
    where
        E: IntoIterator,
        E::Item: RecordLike,
    {
        let started = Instant::now();
        let expected = self.normalizer.records(expected);
        log_op_start!(
            OP_RECORD_EQUAL,
            rows_a = expected.len(),
            rows_b = self.actual.len()
        );

        let verdict = match self.narrow(&expected) {
            Ok((actual, expected)) => self.judge_equal(&actual, &expected),
            Err(verdict) => verdict,
        };

        log_op_end!(
            OP_RECORD_EQUAL,
            duration_ms = started.elapsed().as_millis() as u64,
            outcome = if verdict.passed { "pass" } else { "fail" }
        );
        verdict
    }

    /// Passes when every target row equals some actual row.
    pub fn contain<E>(&self, targets: E) -> Verdict
    where
        E: IntoIterator,
        E::Item: RecordLike,
    {
        let started = Instant::now();
        let targets = self.normalizer.records(targets);
        log_op_start!(
            OP_RECORD_CONTAIN,
            rows_a = targets.len(),
            rows_b = self.actual.len()
        );

        let verdict = match self.narrow(&targets) {
            Ok((actual, targets)) => {
                let found = targets
                    .iter()
                    .all(|target| actual.iter().any(|record| record == target));
                self.judge_contain(found, Some(&targets), &actual)
            }
            Err(verdict) => verdict,
        };

        log_op_end!(
            OP_RECORD_CONTAIN,
            duration_ms = started.elapsed().as_millis() as u64,
            outcome = if verdict.passed { "pass" } else { "fail" }
        );
        verdict
    }

    /// Passes when some actual row satisfies `predicate`.
    pub fn contain_where<F>(&self, predicate: F) -> Verdict
    where
        F: Fn(&Record) -> bool,
    {
        let started = Instant::now();
        log_op_start!(OP_RECORD_CONTAIN, rows_b = self.actual.len());

        let verdict = match self.narrow(&RecordSet::default()) {
            Ok((actual, _)) => {
                let found = actual.iter().any(&predicate);
                self.judge_contain(found, None, &actual)
            }
            Err(verdict) => verdict,
        };

        log_op_end!(
            OP_RECORD_CONTAIN,
            duration_ms = started.elapsed().as_millis() as u64,
            outcome = if verdict.passed { "pass" } else { "fail" }
        );
        verdict
    }

    /// Apply the column filters to both sides. A missing required column is
    /// a failure regardless of negation.
    fn narrow(&self, other: &RecordSet) -> std::result::Result<(RecordSet, RecordSet), Verdict> {
        let mut actual = self.actual.clone();
        let mut other = other.clone();

        if let Some(columns) = &self.columns {
            let keep = |key: &str| columns.iter().any(|c| c == key);
            actual = filter_columns(&actual, keep);
            let complete = actual.iter().all(|record| record.len() == columns.len());
            if !complete {
                return Err(Verdict::fail(self.lines(&[
                    format!(
                        "{}: {}",
                        self.catalog.text(MSG_RECORDS_SHOULD_CONTAIN_COLUMNS),
                        columns.join(", ")
                    ),
                    self.catalog.text(MSG_ACTUAL),
                    self.table(&actual, &self.format),
                ])));
            }
            other = filter_columns(&other, keep);
        }

        if let Some(without) = &self.without {
            let keep = |key: &str| !without.iter().any(|c| c == key);
            actual = filter_columns(&actual, keep);
            other = filter_columns(&other, keep);
        }

        Ok((actual, other))
    }

    fn judge_equal(&self, actual: &RecordSet, expected: &RecordSet) -> Verdict {
        let comparison = compare_sets(expected, actual);
        let equal = match &comparison {
            Comparison::Compared { diff } => diff.is_empty(),
            Comparison::OneSideEmpty { .. } => false,
            Comparison::NoBasis => expected == actual,
        };

        if equal != self.negate {
            return Verdict::pass();
        }

        if self.negate {
            return Verdict::fail(self.lines(&[
                self.header(MSG_RECORDS_SHOULD_NOT_EQUAL),
                self.catalog.text(MSG_ACTUAL),
                self.table(actual, &self.format),
            ]));
        }

        if let Some(columns) = diff_column_sets(expected, actual) {
            return Verdict::fail(self.lines(&[
                self.header(MSG_COLUMNS_SHOULD_EQUAL),
                self.catalog.text(MSG_EXPECTED),
                self.table(
                    &columns.a_records(),
                    &self
                        .format
                        .clone()
                        .with_diff(columns.diff.a.clone())
                        .with_success(true),
                ),
                self.catalog.text(MSG_ACTUAL),
                self.table(
                    &columns.b_records(),
                    &self.format.clone().with_diff(columns.diff.b.clone()),
                ),
            ]));
        }

        let diff = comparison.changes().cloned().unwrap_or_default();
        let offset = match diff.first_changed_rows() {
            (Some(a), Some(b)) => a.min(b).saturating_sub(CONTEXT_ROWS),
            _ => 0,
        };
        Verdict::fail(self.lines(&[
            self.header(MSG_RECORDS_SHOULD_EQUAL),
            self.catalog.text(MSG_EXPECTED),
            self.table(
                expected,
                &self
                    .format
                    .clone()
                    .with_offset(offset)
                    .with_diff(diff.a)
                    .with_success(true),
            ),
            self.catalog.text(MSG_ACTUAL),
            self.table(
                actual,
                &self.format.clone().with_offset(offset).with_diff(diff.b),
            ),
        ]))
    }

    fn judge_contain(&self, found: bool, targets: Option<&RecordSet>, actual: &RecordSet) -> Verdict {
        if found != self.negate {
            return Verdict::pass();
        }
        let header = if self.negate {
            MSG_RECORDS_SHOULD_NOT_CONTAIN
        } else {
            MSG_RECORDS_SHOULD_CONTAIN
        };
        let mut lines = vec![self.header(header)];
        if let Some(targets) = targets {
            lines.push(self.catalog.text(MSG_TARGET));
            lines.push(self.table(targets, &self.format));
        }
        lines.push(self.catalog.text(MSG_ACTUAL));
        lines.push(self.table(actual, &self.format));
        Verdict::fail(self.lines(&lines))
    }

    fn header(&self, default_key: &str) -> String {
        self.message
            .as_ref()
            .and_then(|m| m.resolve(self.language, &*self.catalog))
            .unwrap_or_else(|| self.catalog.text(default_key))
    }

    fn table(&self, records: &RecordSet, options: &FormatOptions) -> String {
        indent(format(records, options).trim_end_matches('\n'), 2)
    }

    fn lines(&self, lines: &[String]) -> String {
        lines.join("\n")
    }
}
