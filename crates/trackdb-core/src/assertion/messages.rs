//! Message catalogs for human-readable assertion output.
//!
//! Messages are keyed by their English text; a catalog maps a key to its
//! translation and anything missing falls back to the key itself. The diff
//! engine never looks messages up; only the assertion and report layers do.

use crate::errors::{Result, TrackDbError};
use crate::{log_op_end, log_op_error, log_op_start};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use trackdb_core_types::schema::OP_CATALOG_LOAD;

pub const MSG_NO_RECORD: &str = "No record";
pub const MSG_SQL_EXECUTION_RESULT: &str = "SQL execution result";
pub const MSG_ROWS_SELECTED: &str = "row(s) selected";
pub const MSG_RECORDS_SHOULD_EQUAL: &str = "Records should equal to expected";
pub const MSG_RECORDS_SHOULD_NOT_EQUAL: &str = "Records should not equal to followings";
pub const MSG_COLUMNS_SHOULD_EQUAL: &str = "Column names should equal to expected";
pub const MSG_RECORDS_SHOULD_CONTAIN_COLUMNS: &str = "Records should contain every columns";
pub const MSG_RECORDS_SHOULD_CONTAIN: &str = "Records should contain the followings";
pub const MSG_RECORDS_SHOULD_NOT_CONTAIN: &str = "Records should not contain the followings";
pub const MSG_EXPECTED: &str = "Expected:";
pub const MSG_ACTUAL: &str = "Actual:";
pub const MSG_TARGET: &str = "Target:";

const JA: &[(&str, &str)] = &[
    (MSG_NO_RECORD, "レコードなし"),
    (MSG_SQL_EXECUTION_RESULT, "SQL 実行結果"),
    (MSG_ROWS_SELECTED, "件が選択されました"),
    (
        MSG_RECORDS_SHOULD_EQUAL,
        "レコードが期待値と一致しなければいけません",
    ),
    (
        MSG_RECORDS_SHOULD_NOT_EQUAL,
        "レコードが以下の値と一致してはいけません",
    ),
    (MSG_EXPECTED, "期待値:"),
    (MSG_ACTUAL, "実際の値:"),
];

/// Language of the built-in catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ja,
}

impl FromStr for Language {
    type Err = TrackDbError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ja" => Ok(Language::Ja),
            other => Err(TrackDbError::ConfigParse {
                reason: format!("unsupported language {other:?}"),
            }),
        }
    }
}

/// Lookup capability handed to whatever builds human-readable text.
pub trait MessageCatalog {
    fn lookup(&self, key: &str) -> Option<&str>;

    /// Translation of `key`, or `key` itself.
    fn text(&self, key: &str) -> String {
        self.lookup(key).unwrap_or(key).to_string()
    }
}

/// Caller-supplied assertion message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Looked up in the catalog like any other key
    Text(String),
    /// One verbatim text per language, in the order given
    Localized(Vec<(Language, String)>),
}

impl Message {
    pub fn localized<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = (Language, S)>,
        S: Into<String>,
    {
        Message::Localized(texts.into_iter().map(|(l, t)| (l, t.into())).collect())
    }

    /// Text to show for `language`. A localized message without an entry
    /// for `language` uses its first entry. `None` when the result is empty.
    pub fn resolve(&self, language: Language, catalog: &dyn MessageCatalog) -> Option<String> {
        let text = match self {
            Message::Text(key) => catalog.text(key),
            Message::Localized(texts) => texts
                .iter()
                .find(|(l, t)| *l == language && !t.is_empty())
                .or_else(|| texts.first())
                .map(|(_, t)| t.clone())
                .unwrap_or_default(),
        };
        (!text.is_empty()).then_some(text)
    }
}

/// In-memory message catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, String>,
}

impl Catalog {
    /// The identity catalog: every key reads as itself.
    pub fn english() -> Self {
        Self::default()
    }

    pub fn builtin(language: Language) -> Self {
        match language {
            Language::En => Self::english(),
            Language::Ja => JA.iter().copied().collect(),
        }
    }

    pub fn for_language(language: Language) -> Self {
        Self::builtin(language)
    }

    /// Parse a flat `key: translation` YAML mapping. An empty document is an
    /// empty catalog.
    ///
    /// # Errors
    /// `CatalogParse` if the document is not a string-to-string mapping.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let entries: Option<BTreeMap<String, String>> = serde_yaml::from_str(text)?;
        Ok(Self {
            entries: entries.unwrap_or_default(),
        })
    }

    /// # Errors
    /// `Io` if the file cannot be read, `CatalogParse` if it cannot be parsed.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let started = Instant::now();
        log_op_start!(OP_CATALOG_LOAD, path = %path.display());

        let result = std::fs::read_to_string(path)
            .map_err(|e| TrackDbError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
            .and_then(|text| Self::from_yaml_str(&text));

        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(catalog) => {
                log_op_end!(
                    OP_CATALOG_LOAD,
                    duration_ms = duration_ms,
                    entries = catalog.len()
                );
            }
            Err(err) => {
                log_op_error!(OP_CATALOG_LOAD, err.clone(), duration_ms = duration_ms);
            }
        }
        result
    }

    /// Overlay `other` on top of `self`; its entries win.
    pub fn merge(mut self, other: Catalog) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl MessageCatalog for Catalog {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}
