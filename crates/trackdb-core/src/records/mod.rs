//! Record sets and their normalization.
//!
//! ## Entry point
//!
//! ```
//! use serde_json::json;
//! use trackdb_core::records::normalize;
//!
//! let rows = vec![json!({"ID": 1, "Name": "Scott"})];
//! let set = normalize(&rows);
//! assert_eq!(set[0].get("id").map(|v| v.to_string()), Some("1".to_string()));
//! ```

pub mod normalize;
pub mod record;
pub mod value;

pub use normalize::{normalize, normalize_json, Normalizer, DEFAULT_DATE_FORMATS, NULL_MARKER};
pub use record::{Field, Record, RecordLike, RecordSet};
pub use value::{Datum, NormalizedValue, DATE_FORMAT};
