//! ALVIC reference catalog: loading, scoping to one product line, color filtering.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::config::CatalogConfig;
use crate::dims::parse_number;
use crate::error::TranslateError;
use crate::model::ColorFilterMode;

const COL_MODEL: &str = "Modelo";
const COL_COLOR: &str = "Color";
const COL_HEIGHT: &str = "Alto";
const COL_WIDTH: &str = "Ancho";
const COL_ARTICLE: &str = "ARTICULO";
const COL_THICKNESS: &str = "Grueso";

/// One catalog row after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Upper-cased, trimmed `Modelo`.
    pub model: String,
    /// Upper-cased, trimmed `Color`: either a display label ("BLANCO SM") or a code ("L3806").
    pub color: String,
    pub width: f64,
    pub height: f64,
    pub thickness: Option<f64>,
    pub article: String,
}

impl CatalogEntry {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Row counts from the last load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub rows_read: usize,
    pub incomplete: usize,
    pub out_of_scope: usize,
    pub retained: usize,
}

/// Read-only catalog shared by every record of a run.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    stats: CatalogStats,
}

impl Catalog {
    /// Wrap pre-built entries as-is (no scoping).
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let stats = CatalogStats {
            rows_read: entries.len(),
            incomplete: 0,
            out_of_scope: 0,
            retained: entries.len(),
        };
        Self { entries, stats }
    }

    /// Load the catalog CSV at `path` and scope it per `config`.
    ///
    /// The delimiter comes from `config.delimiter`, else it is sniffed from this file alone.
    pub fn load(path: &Path, config: &CatalogConfig) -> Result<Self, TranslateError> {
        if !path.is_file() {
            return Err(TranslateError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = alvic_io::read_file_as_utf8(path).map_err(|_| TranslateError::NotFound {
            path: path.to_path_buf(),
        })?;
        let delimiter = config
            .delimiter_byte()
            .unwrap_or_else(|| alvic_io::sniff_delimiter(&content));
        let records =
            alvic_io::read_records(&content, delimiter).map_err(|message| TranslateError::Csv {
                source_name: path.display().to_string(),
                message,
            })?;

        let catalog = Self::from_records(records, config)?;
        debug!(
            path = %path.display(),
            rows = catalog.stats.rows_read,
            incomplete = catalog.stats.incomplete,
            out_of_scope = catalog.stats.out_of_scope,
            retained = catalog.stats.retained,
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Build from raw CSV rows; the first row is the header.
    pub fn from_records(
        records: Vec<Vec<String>>,
        config: &CatalogConfig,
    ) -> Result<Self, TranslateError> {
        let mut rows = records.into_iter();
        let headers: Vec<String> = rows
            .next()
            .unwrap_or_default()
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let idx = |name: &str| headers.iter().position(|h| h == name);
        let required = [COL_MODEL, COL_COLOR, COL_HEIGHT, COL_WIDTH, COL_ARTICLE];
        let missing: Vec<String> = required
            .iter()
            .filter(|name| idx(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(TranslateError::MissingColumn {
                table: "catalog",
                missing,
                available: headers.clone(),
            });
        }

        let model_idx = idx(COL_MODEL);
        let color_idx = idx(COL_COLOR);
        let height_idx = idx(COL_HEIGHT);
        let width_idx = idx(COL_WIDTH);
        let article_idx = idx(COL_ARTICLE);
        let thickness_idx = idx(COL_THICKNESS);

        let line_token = config.line_token.trim().to_uppercase();
        let model_token = config.model_token.trim().to_uppercase();

        let mut stats = CatalogStats::default();
        let mut entries = Vec::new();

        for row in rows {
            stats.rows_read += 1;
            let cell = |i: Option<usize>| i.and_then(|i| row.get(i)).map(|v| v.trim()).unwrap_or("");

            let model = cell(model_idx).to_uppercase();
            let color = cell(color_idx).to_uppercase();
            let article = cell(article_idx);
            let height = parse_number(cell(height_idx));
            let width = parse_number(cell(width_idx));

            let (Some(height), Some(width)) = (height, width) else {
                stats.incomplete += 1;
                continue;
            };
            if article.is_empty() || color.is_empty() {
                stats.incomplete += 1;
                continue;
            }

            if !(model.contains(&line_token) && model.contains(&model_token)) {
                stats.out_of_scope += 1;
                continue;
            }

            entries.push(CatalogEntry {
                model,
                color,
                width,
                height,
                thickness: parse_number(cell(thickness_idx)),
                article: article.to_string(),
            });
        }

        stats.retained = entries.len();
        Ok(Self { entries, stats })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CatalogStats {
        self.stats
    }

    /// Narrow the catalog to one color before size matching.
    ///
    /// Code first, then text label; never merged. When neither yields rows the
    /// whole catalog is returned and tagged `FallbackNoColorFilter`.
    pub fn filter_by_color(
        &self,
        text: Option<&str>,
        code: Option<&str>,
    ) -> (Vec<&CatalogEntry>, ColorFilterMode) {
        if let Some(code) = code {
            let code = code.to_uppercase();
            let by_code: Vec<&CatalogEntry> =
                self.entries.iter().filter(|e| e.color == code).collect();
            if !by_code.is_empty() {
                return (by_code, ColorFilterMode::Code);
            }
        }

        if let Some(text) = text {
            let text = text.to_uppercase();
            let by_text: Vec<&CatalogEntry> =
                self.entries.iter().filter(|e| e.color == text).collect();
            if !by_text.is_empty() {
                return (by_text, ColorFilterMode::Text);
            }
        }

        (
            self.entries.iter().collect(),
            ColorFilterMode::FallbackNoColorFilter,
        )
    }
}
