#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use chrono::NaiveDate;
use common::{rows, set};
use serde_json::json;
use std::collections::BTreeSet;
use trackdb_core::records::Datum;
use trackdb_core::render::display_width;
use trackdb_core::{diff, format, normalize, FormatOptions, Markup, RowChanges};

fn numbered(n: usize) -> trackdb_core::RecordSet {
    let rows: Vec<_> = (0..n).map(|i| json!({"n": i})).collect();
    normalize(&rows)
}

fn changes(row: usize, keys: &[&str]) -> RowChanges {
    let mut map = RowChanges::new();
    map.insert(row, keys.iter().map(|k| k.to_string()).collect::<BTreeSet<_>>());
    map
}

#[test]
fn test_native_date_and_text_render_identically() {
    let instant = NaiveDate::from_ymd_opt(2020, 7, 7)
        .and_then(|d| d.and_hms_opt(12, 23, 45))
        .unwrap();
    let native = normalize(&vec![vec![("date", Datum::from(instant))]]);
    let text = set(json!([{"date": "2020-07-07 12:23:45"}]));
    let options = FormatOptions::default();
    assert_eq!(format(&native, &options), format(&text, &options));
}

#[test]
fn test_header_keeps_first_label_casing() {
    let out = format(&set(json!([{"EMPNO": 1}])), &FormatOptions::default());
    assert_eq!(out.lines().nth(1).unwrap(), "EMPNO     ");
}

#[test]
fn test_columns_grow_to_widest_visible_cell() {
    let out = format(
        &set(json!([{"k": "a-rather-long-value"}])),
        &FormatOptions::default(),
    );
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "-".repeat(19));
    assert_eq!(lines[3], "a-rather-long-value");
}

#[test]
fn test_hidden_rows_do_not_widen_columns() {
    let set = set(json!([{"k": "short"}, {"k": "a-rather-long-value"}]));
    let out = format(&set, &FormatOptions::default().with_limit(Some(1)));
    assert_eq!(out.lines().next().unwrap(), "-".repeat(10));
}

#[test]
fn test_bottom_ellipsis_when_rows_remain() {
    let out = format(&numbered(12), &FormatOptions::default());
    let lines: Vec<&str> = out.lines().collect();
    // border, header, border, 10 rows, ellipsis, border
    assert_eq!(lines.len(), 15);
    assert_eq!(lines[13], "  ..      ");
    assert!(out.ends_with("----------\n"));
}

#[test]
fn test_top_ellipsis_with_offset() {
    let out = format(&numbered(5), &FormatOptions::default().with_offset(2));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[3], "  ..      ");
    assert_eq!(lines[4].trim_end(), "2");
    assert_eq!(lines[6].trim_end(), "4");
    assert_eq!(lines.len(), 8);
}

#[test]
fn test_both_ellipses() {
    let out = format(
        &numbered(10),
        &FormatOptions::default().with_offset(3).with_limit(Some(2)),
    );
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[3].trim_end(), "  ..");
    assert_eq!(lines[4].trim_end(), "3");
    assert_eq!(lines[5].trim_end(), "4");
    assert_eq!(lines[6].trim_end(), "  ..");
}

#[test]
fn test_unbounded_limit_shows_everything() {
    let out = format(&numbered(30), &FormatOptions::default().with_limit(None));
    assert!(!out.contains(".."));
    assert_eq!(out.lines().count(), 34);
}

#[test]
fn test_offset_past_end_shows_only_frame() {
    let out = format(&numbered(3), &FormatOptions::default().with_offset(10));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[3].trim_end(), "  ..");
}

#[test]
fn test_failure_highlight_wraps_padded_cell() {
    let set = set(json!([{"id": 1, "name": "x"}, {"id": 2, "name": "y"}]));
    let out = format(&set, &FormatOptions::default().with_diff(changes(1, &["name"])));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[3], "1           x         ");
    assert_eq!(lines[4], "2           \x1b[1;31my         \x1b[00m");
}

#[test]
fn test_success_highlight() {
    let set = set(json!([{"id": 1}]));
    let options = FormatOptions::default()
        .with_diff(changes(0, &["id"]))
        .with_success(true);
    assert!(format(&set, &options).contains("\x1b[1;32m1         \x1b[00m"));
}

#[test]
fn test_highlight_uses_absolute_row_index() {
    let options = FormatOptions::default()
        .with_offset(5)
        .with_diff(changes(6, &["n"]));
    let out = format(&numbered(8), &options);
    let lines: Vec<&str> = out.lines().collect();
    assert!(!lines[4].contains('\x1b'));
    assert!(lines[5].starts_with("\x1b[1;31m6"));
}

#[test]
fn test_plain_and_bracket_markup() {
    let set = set(json!([{"id": 1}]));
    let diff = changes(0, &["id"]);
    let plain = format(
        &set,
        &FormatOptions::default()
            .with_diff(diff.clone())
            .with_markup(Markup::Plain),
    );
    assert!(!plain.contains('\x1b'));
    let brackets = format(
        &set,
        &FormatOptions::default()
            .with_diff(diff)
            .with_markup(Markup::Brackets),
    );
    assert!(brackets.contains("[1         ]"));
}

#[test]
fn test_wide_characters_align() {
    let set = set(json!([{"名前": "実際の値です", "id": 1}]));
    let out = format(&set, &FormatOptions::default());
    let widths: Vec<usize> = out.lines().map(display_width).collect();
    assert!(widths.windows(2).all(|w| w[0] == w[1]), "{widths:?}");
    assert_eq!(widths[0], 12 + 2 + 10);
}

#[test]
fn test_null_and_boolean_display() {
    let out = format(
        &set(json!([{"a": null, "b": true, "c": "__null__"}])),
        &FormatOptions::default(),
    );
    assert_eq!(
        out.lines().nth(3).unwrap(),
        "null        true        null      "
    );
}

#[test]
fn test_min_width_from_options() {
    let out = format(
        &set(json!([{"id": 1}])),
        &FormatOptions::default().with_min_width(4),
    );
    assert_eq!(out.lines().next().unwrap(), "----");
}

#[test]
fn test_rendering_a_diff_end_to_end() {
    let expected = rows(json!([{"id": "a", "flag": true}, {"id": "b", "flag": false}]));
    let actual = rows(json!([{"id": "a", "flag": true}, {"id": "b", "flag": true}]));
    let result = diff(&expected, &actual).unwrap();
    let out = format(
        &normalize(&actual),
        &FormatOptions::default().with_diff(result.b),
    );
    assert!(out
        .lines()
        .nth(4)
        .unwrap()
        .ends_with("\x1b[1;31mtrue      \x1b[00m"));
}
