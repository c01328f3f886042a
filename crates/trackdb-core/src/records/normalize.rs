//! Record set normalization.
//!
//! Field names are lower-cased and every cell is coerced into a
//! [`NormalizedValue`]:
//!
//! - numbers and strings become `String`, except the null marker which
//!   becomes `Null`
//! - booleans stay `Boolean`
//! - dates become `String` in [`DATE_FORMAT`]; text matching one of the
//!   configured date formats is re-canonicalized the same way
//! - anything else (absent, null, nested values) becomes `Null`
//!
//! Normalization is total, order-preserving and idempotent.

use crate::config::EngineConfig;
use crate::records::record::{Record, RecordLike, RecordSet};
use crate::records::value::{float_text, Datum, NormalizedValue, DATE_FORMAT};
use chrono::NaiveDateTime;

/// Sentinel text that text-only sources (CSV cells, literals) use for null.
pub const NULL_MARKER: &str = "__null__";

/// Date text formats re-canonicalized by default.
pub const DEFAULT_DATE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];

/// Coerces record-like input into normalized records.
#[derive(Debug, Clone)]
pub struct Normalizer {
    null_marker: String,
    date_formats: Vec<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            null_marker: NULL_MARKER.to_string(),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl Normalizer {
    pub fn new(null_marker: impl Into<String>, date_formats: Vec<String>) -> Self {
        Self {
            null_marker: null_marker.into(),
            date_formats,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.null_marker.clone(), config.date_formats.clone())
    }

    pub fn null_marker(&self) -> &str {
        &self.null_marker
    }

    /// Normalize a sequence (or set) of record-like rows.
    pub fn records<I>(&self, rows: I) -> RecordSet
    where
        I: IntoIterator,
        I::Item: RecordLike,
    {
        let set: RecordSet = rows.into_iter().map(|row| self.record(&row)).collect();
        tracing::trace!(rows = set.len(), "normalized record set");
        set
    }

    /// Normalize an arbitrary JSON value: arrays are record sets, anything
    /// else yields an empty set.
    pub fn json(&self, value: &serde_json::Value) -> RecordSet {
        match value.as_array() {
            Some(rows) => self.records(rows),
            None => RecordSet::default(),
        }
    }

    /// Normalize one row. Rows that are not record-shaped become empty.
    pub fn record<R: RecordLike + ?Sized>(&self, row: &R) -> Record {
        let mut record = Record::new();
        for (name, datum) in row.entries().unwrap_or_default() {
            record.insert(&name, self.value(datum));
        }
        record
    }

    /// Coerce a single cell.
    pub fn value(&self, datum: Datum) -> NormalizedValue {
        match datum {
            Datum::Int(v) => self.text(v.to_string()),
            Datum::UInt(v) => self.text(v.to_string()),
            Datum::Float(v) => self.text(float_text(v)),
            Datum::Text(v) => self.text(v),
            Datum::Bool(v) => NormalizedValue::Boolean(v),
            Datum::DateTime(v) => NormalizedValue::String(v.format(DATE_FORMAT).to_string()),
            Datum::Absent | Datum::Null | Datum::Compound(_) => NormalizedValue::Null,
        }
    }

    fn text(&self, text: String) -> NormalizedValue {
        if text == self.null_marker {
            return NormalizedValue::Null;
        }
        match self.parse_date_text(&text) {
            Some(instant) => NormalizedValue::String(instant.format(DATE_FORMAT).to_string()),
            None => NormalizedValue::String(text),
        }
    }

    fn parse_date_text(&self, text: &str) -> Option<NaiveDateTime> {
        self.date_formats
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    }
}

/// Normalize with the default null marker and date formats.
pub fn normalize<I>(rows: I) -> RecordSet
where
    I: IntoIterator,
    I::Item: RecordLike,
{
    Normalizer::default().records(rows)
}

/// Normalize an arbitrary JSON value with default settings.
pub fn normalize_json(value: &serde_json::Value) -> RecordSet {
    Normalizer::default().json(value)
}
