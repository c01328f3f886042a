//! CSV serialization of normalized record sets.

use crate::errors::{Result, TrackDbError};
use crate::records::{RecordSet, NULL_MARKER};

/// Write `records` as CSV with the null marker for null cells.
///
/// # Errors
///
/// `Export` if the CSV writer fails.
pub fn to_csv(records: &RecordSet) -> Result<String> {
    to_csv_with_marker(records, NULL_MARKER)
}

/// Write `records` as CSV.
///
/// The header is the first record's keys. Null cells are written as
/// `null_marker` so the text reads back as null; a key missing from a later
/// record is an empty field. Every line ends with `\n`.
///
/// # Errors
///
/// `Export` if the CSV writer fails.
pub fn to_csv_with_marker(records: &RecordSet, null_marker: &str) -> Result<String> {
    let keys = records.column_keys();
    if keys.is_empty() {
        return Ok(String::new());
    }

    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(&keys)?;
    for record in records {
        wtr.write_record(keys.iter().map(|key| match record.get(key) {
            Some(value) => value.as_text().unwrap_or(null_marker),
            None => "",
        }))?;
    }

    let bytes = wtr.into_inner().map_err(|e| TrackDbError::Export {
        reason: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| TrackDbError::Export {
        reason: e.to_string(),
    })
}
