//! Text rendering of record sets.

pub mod markup;
pub mod table;
pub mod width;

pub use markup::{HighlightStyle, Markup};
pub use table::{cell_text, format, FormatOptions, DEFAULT_ROW_LIMIT, MIN_COLUMN_WIDTH};
pub use width::{display_width, pad_end};
