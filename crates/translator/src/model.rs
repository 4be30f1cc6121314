use serde::Serialize;

use crate::columns::{self, CanonicalColumn};
use crate::error::TranslateError;
use crate::summary::TranslationSummary;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// How the header row of the part list was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderLayout {
    /// First row was a header (possibly with synonyms).
    Header,
    /// No usable header; the fixed 14-column layout was assigned positionally.
    Headerless,
}

/// Normalized part list: canonical column names plus rectangular rows.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub layout: HeaderLayout,
}

impl SourceTable {
    /// Build a table, padding or truncating every row to the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>, layout: HeaderLayout) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows, layout }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Turn every row into a `SourceRecord`.
    ///
    /// Fails when Ancho, Alto or Acabado is missing.
    pub fn records(&self) -> Result<Vec<SourceRecord>, TranslateError> {
        let missing: Vec<String> = [
            CanonicalColumn::Finish,
            CanonicalColumn::Width,
            CanonicalColumn::Height,
        ]
        .iter()
        .map(|c| c.header())
        .filter(|h| !self.has_column(h))
        .map(String::from)
        .collect();

        if !missing.is_empty() {
            return Err(TranslateError::MissingColumn {
                table: "input",
                missing,
                available: self.columns.clone(),
            });
        }

        let col = |c: CanonicalColumn| self.column_index(c.header());
        let ident = |name: &str| {
            let key = columns::canonicalize(name);
            self.columns.iter().position(|c| columns::canonicalize(c) == key)
        };

        let width_idx = col(CanonicalColumn::Width);
        let height_idx = col(CanonicalColumn::Height);
        let finish_idx = col(CanonicalColumn::Finish);
        let material_idx = col(CanonicalColumn::Material);
        let range_idx = col(CanonicalColumn::Range);
        let machining_idx = col(CanonicalColumn::MachiningFlag);
        let project_idx = ident(columns::PROJECT_ID);
        let sku_idx = ident(columns::SKU);
        let part_idx = ident(columns::PART_ID);
        let part_type_idx = ident(columns::PART_TYPE);

        let records = self
            .rows
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).cloned();
                SourceRecord {
                    row: row_idx,
                    project_id: cell(project_idx),
                    sku: cell(sku_idx),
                    part_id: cell(part_idx),
                    part_type: cell(part_type_idx),
                    width: cell(width_idx).unwrap_or_default(),
                    height: cell(height_idx).unwrap_or_default(),
                    material: cell(material_idx),
                    range: cell(range_idx),
                    finish: cell(finish_idx).unwrap_or_default(),
                    machining: cell(machining_idx),
                    fields: self.columns.iter().cloned().zip(row.iter().cloned()).collect(),
                }
            })
            .collect();

        Ok(records)
    }
}

/// One CUBRO part.
///
/// The named fields are the ones the translator reads; `fields` keeps every
/// original cell in column order so unknown columns pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    /// 0-based data row index in the part list.
    pub row: usize,
    pub project_id: Option<String>,
    pub sku: Option<String>,
    pub part_id: Option<String>,
    pub part_type: Option<String>,
    /// Raw width cell, parsed later so malformed values become BAD_DIMS.
    pub width: String,
    pub height: String,
    pub material: Option<String>,
    pub range: Option<String>,
    pub finish: String,
    pub machining: Option<String>,
    pub fields: Vec<(String, String)>,
}

impl SourceRecord {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// Outcome tag written to `Match_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    /// Not a LAC part; written as an empty tag.
    #[serde(rename = "")]
    Passthrough,
    BadDims,
    UnknownColor,
    Exact,
    RotatedExact,
    Fit,
    RotatedFit,
    NoMatch,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passthrough => "",
            Self::BadDims => "BAD_DIMS",
            Self::UnknownColor => "UNKNOWN_COLOR",
            Self::Exact => "EXACT",
            Self::RotatedExact => "ROTATED_EXACT",
            Self::Fit => "FIT",
            Self::RotatedFit => "ROTATED_FIT",
            Self::NoMatch => "NO_MATCH",
        }
    }

    /// True when a catalog article was assigned.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Exact | Self::RotatedExact | Self::Fit | Self::RotatedFit)
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the catalog was narrowed before size matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorFilterMode {
    Code,
    Text,
    FallbackNoColorFilter,
}

impl ColorFilterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "CODE",
            Self::Text => "TEXT",
            Self::FallbackNoColorFilter => "FALLBACK_NO_COLOR_FILTER",
        }
    }
}

impl std::fmt::Display for ColorFilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Width × height in whole millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: i64,
    pub height: i64,
}

/// Diagnostic columns appended after the source columns, in this order.
pub const OUTPUT_COLUMNS: [&str; 11] = [
    "Codigo_ALVIC",
    "Color_ALVIC_text",
    "Color_ALVIC_code",
    "Match_type",
    "Color_filter_mode",
    "Input_Ancho_norm",
    "Input_Alto_norm",
    "DB_Ancho",
    "DB_Alto",
    "Es_LAC",
    "Es_Mecanizada",
];

/// A source record enriched with its ALVIC translation.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub source: SourceRecord,
    pub article: Option<String>,
    pub color_text: Option<String>,
    pub color_code: Option<String>,
    pub match_type: MatchType,
    pub color_filter_mode: Option<ColorFilterMode>,
    /// Clamped input size used for matching.
    pub input_dims: Option<Dimensions>,
    /// Size of the catalog panel actually matched.
    pub matched_dims: Option<Dimensions>,
    pub is_lac: bool,
    pub is_machined: bool,
}

impl OutputRecord {
    /// Fresh values for `OUTPUT_COLUMNS`, same order.
    fn diagnostic_cells(&self) -> [String; 11] {
        [
            self.article.clone().unwrap_or_default(),
            self.color_text.clone().unwrap_or_default(),
            self.color_code.clone().unwrap_or_default(),
            self.match_type.as_str().to_string(),
            self.color_filter_mode
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            opt_int(self.input_dims.map(|d| d.width)),
            opt_int(self.input_dims.map(|d| d.height)),
            opt_int(self.matched_dims.map(|d| d.width)),
            opt_int(self.matched_dims.map(|d| d.height)),
            bool_cell(self.is_lac),
            bool_cell(self.is_machined),
        ]
    }

    /// Source cells in column order followed by `OUTPUT_COLUMNS`.
    ///
    /// A source column that already carries a diagnostic name (a previous
    /// output fed back in) is overwritten in place instead of repeated.
    pub fn to_row(&self) -> Vec<String> {
        let diagnostics = self.diagnostic_cells();
        let mut row: Vec<String> = self
            .source
            .fields
            .iter()
            .map(|(name, value)| match output_column_index(name) {
                Some(i) => diagnostics[i].clone(),
                None => value.clone(),
            })
            .collect();

        for (i, column) in OUTPUT_COLUMNS.iter().enumerate() {
            if !self.source.fields.iter().any(|(name, _)| name == column) {
                row.push(diagnostics[i].clone());
            }
        }
        row
    }
}

fn output_column_index(name: &str) -> Option<usize> {
    OUTPUT_COLUMNS.iter().position(|c| *c == name)
}

fn opt_int(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn bool_cell(value: bool) -> String {
    let text = if value { "True" } else { "False" };
    text.to_string()
}

/// A rendered partition: header row plus string rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl OutputTable {
    pub fn from_records(source_columns: &[String], records: &[OutputRecord]) -> Self {
        let headers = source_columns
            .iter()
            .cloned()
            .chain(
                OUTPUT_COLUMNS
                    .iter()
                    .filter(|c| !source_columns.iter().any(|s| s == *c))
                    .map(|c| c.to_string()),
            )
            .collect();
        Self {
            headers,
            rows: records.iter().map(OutputRecord::to_row).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell `column` of every row, in row order.
    pub fn column(&self, name: &str) -> Vec<&str> {
        match self.column_index(name) {
            Some(i) => self.rows.iter().map(|r| r[i].as_str()).collect(),
            None => Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Run result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct TranslationMeta {
    pub engine_version: String,
    pub run_at: String,
    pub layout: HeaderLayout,
    pub catalog_entries: usize,
}

/// Both partitions of one run, in input row order.
#[derive(Debug, Clone)]
pub struct Translation {
    pub meta: TranslationMeta,
    pub source_columns: Vec<String>,
    pub machined: Vec<OutputRecord>,
    pub non_machined: Vec<OutputRecord>,
    pub summary: TranslationSummary,
}

impl Translation {
    pub fn machined_table(&self) -> OutputTable {
        OutputTable::from_records(&self.source_columns, &self.machined)
    }

    pub fn non_machined_table(&self) -> OutputTable {
        OutputTable::from_records(&self.source_columns, &self.non_machined)
    }
}
