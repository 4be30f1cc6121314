use std::path::PathBuf;

use thiserror::Error;

/// Structural failures that abort a whole run.
///
/// Row-level data problems (bad dimensions, unknown colors, no size match)
/// are never errors; they are reported through `MatchType` on the output row.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// Neither the header nor the headerless reading produced Ancho/Alto/Acabado.
    #[error(
        "input CSV does not have the expected format: columns read with header: {header_columns:?}; \
         columns read without header: {headerless_columns}; \
         expected at least equivalents of Ancho, Alto, Acabado"
    )]
    Format {
        header_columns: Vec<String>,
        headerless_columns: usize,
    },
    /// Catalog path does not resolve to a readable file.
    #[error("ALVIC catalog not found at '{}'", path.display())]
    NotFound { path: PathBuf },
    /// A required column is absent after normalization.
    #[error("{table}: missing required column(s) {missing:?}; available columns: {available:?}")]
    MissingColumn {
        table: &'static str,
        missing: Vec<String>,
        available: Vec<String>,
    },
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),
    /// Config validation error (empty token, zero minimum, bad delimiter).
    #[error("config validation error: {0}")]
    ConfigValidation(String),
    /// Malformed CSV content.
    #[error("CSV error in {source_name}: {message}")]
    Csv { source_name: String, message: String },
    /// IO error (file read/write).
    #[error("IO error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, TranslateError>;
