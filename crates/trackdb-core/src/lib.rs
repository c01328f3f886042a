//! TrackDB Core - record set comparison for graded database exercises
//!
//! This crate decides whether the rows a submitted query produced match the
//! expected rows, and explains the difference when they do not:
//! - Normalization of heterogeneous rows into comparable records
//! - Cell-level structural diff that stays local under row insertion/deletion
//! - Column vocabulary reconciliation
//! - Fixed-width table rendering with windowing and cell highlighting
//! - Record assertions with localized failure messages
//!
//! The four core operations are re-exported at the crate root:
//!
//! ```
//! use serde_json::json;
//! use trackdb_core::{diff, diff_columns, format, normalize, FormatOptions};
//!
//! let expected = vec![json!({"id": "a", "flag": true}), json!({"id": "b", "flag": false})];
//! let actual = vec![json!({"ID": "a", "FLAG": true}), json!({"ID": "b", "FLAG": true})];
//!
//! assert!(diff_columns(&expected, &actual).is_none());
//! let result = diff(&expected, &actual).unwrap();
//! assert!(result.a[&1].contains("flag"));
//!
//! let table = format(&normalize(&actual), &FormatOptions::default().with_diff(result.b));
//! assert!(table.contains("\x1b[1;31m"));
//! ```

pub mod assertion;
pub mod config;
pub mod diff;
pub mod errors;
pub mod export;
pub mod logging_facility;
pub mod records;
pub mod render;

// Re-export commonly used types
pub use assertion::messages::{Catalog, Language, Message, MessageCatalog};
pub use assertion::{RecordAssertion, Verdict};
pub use config::EngineConfig;
pub use diff::{compare, diff, diff_columns, ColumnDiff, Comparison, DiffResult, RowChanges};
pub use errors::{ExError, ExErrorKind, Result, TrackDbError};
pub use export::to_csv;
pub use records::{normalize, Normalizer, NormalizedValue, Record, RecordLike, RecordSet};
pub use render::{format, FormatOptions, HighlightStyle, Markup};
