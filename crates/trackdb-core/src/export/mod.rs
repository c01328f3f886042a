//! Text exports of normalized record sets.

pub mod csv;

pub use csv::{to_csv, to_csv_with_marker};
