//! Record set diff engine.
//!
//! Decides whether two record sets are equivalent under normalization and,
//! when they are not, reports which cells differ on each side.
//!
//! ## Entry point
//!
//! ```
//! use serde_json::json;
//! use trackdb_core::diff::diff;
//!
//! let expected = vec![json!({"id": 1, "name": "Scott"})];
//! let actual = vec![json!({"ID": "1", "NAME": "Scott"})];
//! let result = diff(&expected, &actual).unwrap();
//! assert!(result.is_empty());
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical results.
//! - **Reflexivity**: a non-empty record set never differs from itself.
//! - **Role symmetry**: `diff(x, y).a == diff(y, x).b`.
//! - **Locality**: an inserted or deleted row marks only that row's cells.

pub mod columns;
pub mod engine;
pub mod model;
pub mod sequence;

pub use columns::{diff_column_sets, diff_columns, diff_columns_with};
pub use engine::{compare, compare_sets, compare_with, diff, diff_with};
pub use model::{ColumnDiff, Comparison, DiffResult, RowChanges, Side};
