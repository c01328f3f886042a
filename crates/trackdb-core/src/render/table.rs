//! Fixed-width text tables for record sets.
//!
//! ```text
//! ----------  ----------
//! id          name
//! ----------  ----------
//!   ..
//! 3           Scott
//! 4           Adams
//!   ..
//! ----------  ----------
//! ```
//!
//! Columns are the fields of the first record, headed by their display
//! label. Cells are separated by two spaces and every line, including the
//! last, ends with `\n`.

use crate::config::EngineConfig;
use crate::diff::RowChanges;
use crate::records::{Record, RecordSet};
use crate::render::markup::{HighlightStyle, Markup};
use crate::render::width::{display_width, pad_end};

/// Narrowest column, in display columns.
pub const MIN_COLUMN_WIDTH: usize = 10;

/// Default number of rows shown.
pub const DEFAULT_ROW_LIMIT: usize = 10;

const CELL_SEPARATOR: &str = "  ";

/// Rendering options for [`format`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// First visible row
    pub offset: usize,
    /// Number of visible rows; `None` shows every row from `offset`
    pub limit: Option<usize>,
    /// Changed cells to highlight, by absolute row index
    pub diff: RowChanges,
    /// Highlight with the expected-side style instead of the actual-side one
    pub success: bool,
    pub markup: Markup,
    pub min_width: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: Some(DEFAULT_ROW_LIMIT),
            diff: RowChanges::new(),
            success: false,
            markup: Markup::default(),
            min_width: MIN_COLUMN_WIDTH,
        }
    }
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying the configured row limit, markup and column width.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            limit: config.row_limit,
            markup: config.markup,
            min_width: config.min_column_width,
            ..Self::default()
        }
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_diff(mut self, diff: RowChanges) -> Self {
        self.diff = diff;
        self
    }

    pub fn with_success(mut self, success: bool) -> Self {
        self.success = success;
        self
    }

    pub fn with_markup(mut self, markup: Markup) -> Self {
        self.markup = markup;
        self
    }

    pub fn with_min_width(mut self, min_width: usize) -> Self {
        self.min_width = min_width;
        self
    }
}

/// Display text of one cell. Line breaks are escaped so a row stays on a
/// single line; missing fields show as `null`.
pub fn cell_text(record: &Record, key: &str) -> String {
    match record.get(key) {
        Some(value) => value.to_string().replace('\n', "\\n"),
        None => "null".to_string(),
    }
}

/// Render `records` as a text table.
///
/// Returns an empty string when there are no records or the first record
/// has no fields.
pub fn format(records: &RecordSet, options: &FormatOptions) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };
    if first.is_empty() {
        return String::new();
    }

    let columns: Vec<(&str, &str)> = first
        .fields()
        .iter()
        .map(|f| (f.key(), f.label()))
        .collect();

    let start = options.offset.min(records.len());
    let end = match options.limit {
        Some(limit) => start.saturating_add(limit).min(records.len()),
        None => records.len(),
    };
    let window = &records.as_slice()[start..end];
    let truncated = end < records.len();

    let cells: Vec<Vec<String>> = window
        .iter()
        .map(|record| columns.iter().map(|(key, _)| cell_text(record, key)).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, (_, label))| {
            cells
                .iter()
                .map(|row| display_width(&row[i]))
                .fold(options.min_width.max(display_width(label)), usize::max)
        })
        .collect();

    let border: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let ellipsis: Vec<String> = widths
        .iter()
        .map(|w| format!("  ..{}", " ".repeat(w.saturating_sub(4))))
        .collect();

    let mut lines: Vec<Vec<String>> = Vec::with_capacity(cells.len() + 6);
    lines.push(border.clone());
    lines.push(
        columns
            .iter()
            .zip(&widths)
            .map(|((_, label), w)| pad_end(label, *w))
            .collect(),
    );
    lines.push(border.clone());
    if start > 0 {
        lines.push(ellipsis.clone());
    }

    let style = HighlightStyle::for_success(options.success);
    for (offset, row) in cells.iter().enumerate() {
        let changed = options.diff.get(&(start + offset));
        lines.push(
            row.iter()
                .zip(&columns)
                .zip(&widths)
                .map(|((text, (key, _)), w)| {
                    let padded = pad_end(text, *w);
                    if changed.is_some_and(|keys| keys.contains(*key)) {
                        options.markup.wrap(style, &padded)
                    } else {
                        padded
                    }
                })
                .collect(),
        );
    }

    if truncated {
        lines.push(ellipsis);
    }
    lines.push(border);

    tracing::trace!(
        rows = records.len(),
        visible = window.len(),
        columns = columns.len(),
        "formatted record table"
    );

    let mut out = lines
        .iter()
        .map(|line| line.join(CELL_SEPARATOR))
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}
