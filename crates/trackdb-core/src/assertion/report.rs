//! Plain-text report of a query execution.

use crate::assertion::messages::{
    MessageCatalog, MSG_NO_RECORD, MSG_ROWS_SELECTED, MSG_SQL_EXECUTION_RESULT,
};
use crate::records::RecordSet;
use crate::render::{format, FormatOptions, Markup};

/// Rows shown in an execution summary.
pub const SUMMARY_ROW_LIMIT: usize = 20;

/// Prefix every line of `text` with `n` spaces.
pub fn indent(text: &str, n: usize) -> String {
    let pad = " ".repeat(n);
    text.split('\n')
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Summarize an executed statement and the rows it returned.
///
/// ```text
/// SQL execution result:
///   SELECT * FROM emp
///
///   2 row(s) selected
///   ----------  ...
/// ```
pub fn execution_summary(
    catalog: &dyn MessageCatalog,
    message: Option<&str>,
    sql: &str,
    records: &RecordSet,
) -> String {
    let title = catalog.text(message.unwrap_or(MSG_SQL_EXECUTION_RESULT));
    let table = if records.is_empty() {
        catalog.text(MSG_NO_RECORD)
    } else {
        let options = FormatOptions::default()
            .with_limit(Some(SUMMARY_ROW_LIMIT))
            .with_markup(Markup::Plain);
        format(records, &options).trim_end_matches('\n').to_string()
    };
    format!(
        "{title}:\n{}\n\n  {} {}\n{}\n",
        indent(sql.trim_end(), 2),
        records.len(),
        catalog.text(MSG_ROWS_SELECTED),
        indent(&table, 2)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertion::messages::{Catalog, Language};
    use crate::records::normalize;
    use serde_json::json;

    #[test]
    fn test_indent_every_line() {
        assert_eq!(indent("a\nb", 2), "  a\n  b");
        assert_eq!(indent("", 3), "   ");
    }

    #[test]
    fn test_summary_layout() {
        let records = normalize(&vec![json!({"id": 1})]);
        let out = execution_summary(&Catalog::english(), None, "SELECT id\nFROM t", &records);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "SQL execution result:");
        assert_eq!(lines[1], "  SELECT id");
        assert_eq!(lines[2], "  FROM t");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "  1 row(s) selected");
        assert_eq!(lines[5], "  ----------");
        assert_eq!(lines[6], "  id        ");
    }

    #[test]
    fn test_summary_caps_rows() {
        let rows: Vec<_> = (0..25).map(|i| json!({"n": i})).collect();
        let out = execution_summary(&Catalog::english(), None, "SELECT n", &normalize(&rows));
        assert!(out.contains("25 row(s) selected"));
        assert!(out.contains("  ..  "));
        assert!(!out.contains("\n  20  "));
    }

    #[test]
    fn test_summary_translated_and_empty() {
        let catalog = Catalog::builtin(Language::Ja);
        let out = execution_summary(&catalog, None, "SELECT 1", &RecordSet::default());
        assert!(out.starts_with("SQL 実行結果:"));
        assert!(out.contains("0 件が選択されました"));
        assert!(out.contains("  レコードなし"));
    }
}
