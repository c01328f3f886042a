//! Cell highlighting.
//!
//! The renderer only decides *which* cells are highlighted and in which
//! style; [`Markup`] decides what that looks like in the output text.

use serde::{Deserialize, Serialize};

const ANSI_SUCCESS: &str = "\x1b[1;32m";
const ANSI_FAILURE: &str = "\x1b[1;31m";
const ANSI_RESET: &str = "\x1b[00m";

/// Highlight applied to a changed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightStyle {
    #[default]
    None,
    /// Expected side
    Success,
    /// Actual side
    Failure,
}

impl HighlightStyle {
    /// Style for changed cells of a table, given the success flag.
    pub fn for_success(success: bool) -> Self {
        if success {
            HighlightStyle::Success
        } else {
            HighlightStyle::Failure
        }
    }
}

/// How highlights are materialized in rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Markup {
    /// Terminal color escapes
    #[default]
    Ansi,
    /// `[cell]` for the failure side, `{cell}` for the success side
    Brackets,
    /// No highlighting at all
    Plain,
}

impl Markup {
    /// Wrap an already padded cell.
    pub fn wrap(self, style: HighlightStyle, cell: &str) -> String {
        match (self, style) {
            (_, HighlightStyle::None) | (Markup::Plain, _) => cell.to_string(),
            (Markup::Ansi, HighlightStyle::Success) => format!("{ANSI_SUCCESS}{cell}{ANSI_RESET}"),
            (Markup::Ansi, HighlightStyle::Failure) => format!("{ANSI_FAILURE}{cell}{ANSI_RESET}"),
            (Markup::Brackets, HighlightStyle::Success) => format!("{{{cell}}}"),
            (Markup::Brackets, HighlightStyle::Failure) => format!("[{cell}]"),
        }
    }
}
