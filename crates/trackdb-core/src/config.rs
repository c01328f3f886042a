//! Engine configuration.
//!
//! Loaded from TOML; every key is optional.
//!
//! ```toml
//! null_marker = "__null__"
//! date_formats = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"]
//! min_column_width = 10
//! row_limit = 10
//! markup = "ansi"
//! language = "ja"
//! ```

use crate::assertion::messages::Language;
use crate::errors::{Result, TrackDbError};
use crate::records::{DEFAULT_DATE_FORMATS, NULL_MARKER};
use crate::render::{Markup, DEFAULT_ROW_LIMIT, MIN_COLUMN_WIDTH};
use crate::{log_op_end, log_op_error, log_op_start};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use trackdb_core_types::schema::OP_CONFIG_LOAD;

/// Environment variable selecting the message language.
pub const ENV_LANGUAGE: &str = "TRACKDB_LANGUAGE";
/// Environment variable overriding the rendered row limit; `0` means no limit.
pub const ENV_ROW_LIMIT: &str = "TRACKDB_ROW_LIMIT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Text that stands for null in text-only sources. Fixtures depend on it.
    pub null_marker: String,
    /// Textual date formats re-canonicalized during normalization
    pub date_formats: Vec<String>,
    pub min_column_width: usize,
    pub row_limit: Option<usize>,
    pub markup: Markup,
    pub language: Language,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            null_marker: NULL_MARKER.to_string(),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
            min_column_width: MIN_COLUMN_WIDTH,
            row_limit: Some(DEFAULT_ROW_LIMIT),
            markup: Markup::default(),
            language: Language::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    /// `ConfigParse` if the document is not valid TOML or carries unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        tracing::debug!(
            null_marker = %config.null_marker,
            date_formats = config.date_formats.len(),
            "loaded engine config"
        );
        Ok(config)
    }

    /// Read and parse a TOML file.
    ///
    /// # Errors
    /// `Io` if the file cannot be read, `ConfigParse` if it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let started = Instant::now();
        log_op_start!(OP_CONFIG_LOAD, path = %path.display());

        let result = std::fs::read_to_string(path)
            .map_err(|e| TrackDbError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
            .and_then(|text| Self::from_toml_str(&text));

        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => {
                log_op_end!(OP_CONFIG_LOAD, duration_ms = duration_ms);
            }
            Err(err) => {
                log_op_error!(OP_CONFIG_LOAD, err.clone(), duration_ms = duration_ms);
            }
        }
        result
    }

    /// Apply `TRACKDB_LANGUAGE` and `TRACKDB_ROW_LIMIT` from the process
    /// environment.
    ///
    /// # Errors
    /// `ConfigParse` if a variable is set to an unusable value.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// # Errors
    /// `ConfigParse` if a variable is set to an unusable value.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_LANGUAGE) {
            self.language = value.parse()?;
        }
        if let Some(value) = lookup(ENV_ROW_LIMIT) {
            let limit: usize = value.trim().parse().map_err(|_| TrackDbError::ConfigParse {
                reason: format!("{ENV_ROW_LIMIT} must be a non-negative integer, got {value:?}"),
            })?;
            self.row_limit = (limit > 0).then_some(limit);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let config = EngineConfig::from_toml_str("null_marker = \"\\\\N\"\nmarkup = \"plain\"").unwrap();
        assert_eq!(config.null_marker, "\\N");
        assert_eq!(config.markup, Markup::Plain);
        assert_eq!(config.row_limit, Some(DEFAULT_ROW_LIMIT));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = EngineConfig::from_toml_str("colour = true").unwrap_err();
        assert!(matches!(err, TrackDbError::ConfigParse { .. }));
    }

    #[test]
    fn test_overrides() {
        let config = EngineConfig::default()
            .with_overrides_from(|name| match name {
                ENV_LANGUAGE => Some("ja".to_string()),
                ENV_ROW_LIMIT => Some("0".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.language, Language::Ja);
        assert_eq!(config.row_limit, None);
    }

    #[test]
    fn test_bad_row_limit_override() {
        let err = EngineConfig::default()
            .with_overrides_from(|name| (name == ENV_ROW_LIMIT).then(|| "lots".to_string()))
            .unwrap_err();
        assert!(matches!(err, TrackDbError::ConfigParse { .. }));
    }
}
