use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::dims::MIN_PANEL_MM;
use crate::error::TranslateError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Translator settings. Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslatorConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub dimensions: DimensionConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Where the ALVIC catalog lives and which product line it is scoped to.
///
/// Both tokens are substring-matched against the upper-cased `Modelo` column;
/// an entry is kept only when it contains both.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_line_token")]
    pub line_token: String,
    #[serde(default = "default_model_token")]
    pub model_token: String,
    /// Field delimiter of the catalog file. Sniffed when absent.
    #[serde(default)]
    pub delimiter: Option<char>,
}

fn default_line_token() -> String {
    "ZENIT".into()
}

fn default_model_token() -> String {
    "06".into()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            line_token: default_line_token(),
            model_token: default_model_token(),
            delimiter: None,
        }
    }
}

impl CatalogConfig {
    pub fn delimiter_byte(&self) -> Option<u8> {
        ascii_byte(self.delimiter)
    }
}

// ---------------------------------------------------------------------------
// Dimensions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimensionConfig {
    /// Sides shorter than this are raised to it before matching.
    #[serde(default = "default_min_mm")]
    pub min_mm: i64,
}

fn default_min_mm() -> i64 {
    MIN_PANEL_MM
}

impl Default for DimensionConfig {
    fn default() -> Self {
        Self { min_mm: MIN_PANEL_MM }
    }
}

// ---------------------------------------------------------------------------
// Input + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Field delimiter of the part list only. Sniffed when absent.
    #[serde(default)]
    pub delimiter: Option<char>,
}

impl InputConfig {
    pub fn delimiter_byte(&self) -> Option<u8> {
        ascii_byte(self.delimiter)
    }
}

fn ascii_byte(delimiter: Option<char>) -> Option<u8> {
    delimiter.and_then(|c| u8::try_from(c).ok())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_machined")]
    pub machined: PathBuf,
    #[serde(default = "default_non_machined")]
    pub non_machined: PathBuf,
}

fn default_machined() -> PathBuf {
    PathBuf::from("output_alvic_mecanizadas.csv")
}

fn default_non_machined() -> PathBuf {
    PathBuf::from("output_alvic_sin_mecanizar.csv")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            machined: default_machined(),
            non_machined: default_non_machined(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl TranslatorConfig {
    pub fn from_toml(input: &str) -> Result<Self, TranslateError> {
        let config: TranslatorConfig =
            toml::from_str(input).map_err(|e| TranslateError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, TranslateError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| TranslateError::Io(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> Result<(), TranslateError> {
        if self.catalog.line_token.trim().is_empty() {
            return Err(TranslateError::ConfigValidation(
                "catalog.line_token must not be empty".into(),
            ));
        }
        if self.catalog.model_token.trim().is_empty() {
            return Err(TranslateError::ConfigValidation(
                "catalog.model_token must not be empty".into(),
            ));
        }
        if self.dimensions.min_mm <= 0 {
            return Err(TranslateError::ConfigValidation(format!(
                "dimensions.min_mm must be positive, got {}",
                self.dimensions.min_mm
            )));
        }
        validate_delimiter("catalog.delimiter", self.catalog.delimiter)?;
        validate_delimiter("input.delimiter", self.input.delimiter)?;
        Ok(())
    }
}

fn validate_delimiter(key: &str, delimiter: Option<char>) -> Result<(), TranslateError> {
    match delimiter {
        Some(delim) if !delim.is_ascii() || delim == '"' || delim == '\n' || delim == '\r' => {
            Err(TranslateError::ConfigValidation(format!(
                "{key} must be a single ASCII separator, got {delim:?}"
            )))
        }
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
