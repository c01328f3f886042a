use thiserror::Error;

/// Result type alias using TrackDbError
pub type Result<T> = std::result::Result<T, TrackDbError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// The comparison engine itself degrades to defaults instead of failing, so
/// these kinds only cover the surfaces around it: configuration, message
/// catalogs and caller-supplied assertion options. Each kind maps to a stable
/// error code for programmatic handling and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Caller input
    InvalidInput,

    // Configuration
    InvalidConfig,
    /// A message catalog overlay could not be parsed
    InvalidCatalog,

    // Integration/IO
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::InvalidCatalog => "ERR_INVALID_CATALOG",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the operation
/// and message context needed for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the file path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain errors raised around the comparison engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackDbError {
    /// Engine configuration text is not valid TOML or has the wrong shape
    #[error("Invalid configuration: {reason}")]
    ConfigParse { reason: String },

    /// A message catalog overlay is not a flat YAML string map
    #[error("Invalid message catalog: {reason}")]
    CatalogParse { reason: String },

    /// A file could not be read
    #[error("Failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    /// An `order_by` column spec is empty or only a sign
    #[error("Invalid order spec: {spec:?}")]
    InvalidOrderSpec { spec: String },

    /// A record set could not be written out
    #[error("Export failed: {reason}")]
    Export { reason: String },
}

impl From<TrackDbError> for ExError {
    fn from(err: TrackDbError) -> Self {
        match &err {
            TrackDbError::ConfigParse { .. } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(err.to_string())
            }
            TrackDbError::CatalogParse { .. } => {
                ExError::new(ExErrorKind::InvalidCatalog).with_message(err.to_string())
            }
            TrackDbError::Io { path, .. } => ExError::new(ExErrorKind::Io)
                .with_path(path.clone())
                .with_message(err.to_string()),
            TrackDbError::InvalidOrderSpec { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(err.to_string())
            }
            TrackDbError::Export { .. } => {
                ExError::new(ExErrorKind::Io).with_message(err.to_string())
            }
        }
    }
}

impl From<toml::de::Error> for TrackDbError {
    fn from(err: toml::de::Error) -> Self {
        TrackDbError::ConfigParse {
            reason: err.to_string(),
        }
    }
}

impl From<csv::Error> for TrackDbError {
    fn from(err: csv::Error) -> Self {
        TrackDbError::Export {
            reason: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for TrackDbError {
    fn from(err: serde_yaml::Error) -> Self {
        TrackDbError::CatalogParse {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_unique() {
        let kinds = [
            ExErrorKind::InvalidInput,
            ExErrorKind::InvalidConfig,
            ExErrorKind::InvalidCatalog,
            ExErrorKind::Io,
        ];
        let mut codes: Vec<&str> = kinds.iter().map(|k| k.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_io_error_keeps_path() {
        let err: ExError = TrackDbError::Io {
            path: "locale/ja.yml".to_string(),
            reason: "not found".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::Io);
        assert_eq!(err.path(), Some("locale/ja.yml"));
        assert!(err.to_string().starts_with("[ERR_IO]"));
    }

    #[test]
    fn test_display_includes_op() {
        let err = ExError::new(ExErrorKind::InvalidConfig)
            .with_op("load_config")
            .with_message("bad row_limit");
        assert_eq!(
            err.to_string(),
            "[ERR_INVALID_CONFIG] in operation 'load_config': bad row_limit"
        );
    }
}
