//! Input normalization: header synonyms and the headerless fallback.

use std::path::Path;

use tracing::debug;

use crate::error::TranslateError;
use crate::model::{HeaderLayout, SourceTable};

pub const PROJECT_ID: &str = "ID de Proyecto";
pub const SKU: &str = "SKU";
pub const PART_ID: &str = "ID de pieza";
pub const PART_TYPE: &str = "Tipología de pieza";

/// Column layout assumed when the file has no usable header row.
///
/// The headerless width is the widest row in the file, so a short first row
/// does not hide a complete layout below it. Shorter rows are padded with
/// empty cells and extra columns are dropped.
pub const EXPECTED_COLUMNS: [&str; 14] = [
    PROJECT_ID,
    SKU,
    PART_ID,
    PART_TYPE,
    "Ancho",
    "Alto",
    "Material",
    "Gama",
    "Acabado",
    "Mecanizado o sin mecanizar (vacío)",
    "Modelo de tirador",
    "Posición de tirador",
    "Dirección de apertura de puerta",
    "Acabado de tirador",
];

/// Columns the translator reads by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalColumn {
    Width,
    Height,
    Finish,
    Material,
    Range,
    MachiningFlag,
}

impl CanonicalColumn {
    pub const ALL: [CanonicalColumn; 6] = [
        Self::Width,
        Self::Height,
        Self::Finish,
        Self::Material,
        Self::Range,
        Self::MachiningFlag,
    ];

    /// Without these the file cannot be translated at all.
    pub const LOAD_CRITICAL: [CanonicalColumn; 3] = [Self::Width, Self::Height, Self::Finish];

    /// Header name written to the normalized table and the output files.
    pub fn header(self) -> &'static str {
        match self {
            Self::Width => "Ancho",
            Self::Height => "Alto",
            Self::Finish => "Acabado",
            Self::Material => "Material",
            Self::Range => "Gama",
            Self::MachiningFlag => "Mecanizado o sin mecanizar (vacío)",
        }
    }

    fn synonyms(self) -> &'static [&'static str] {
        match self {
            Self::Width => &["ancho", "width", "w", "anchura"],
            Self::Height => &["alto", "height", "h", "altura"],
            Self::Finish => &["acabado", "color", "acabado color", "finish", "acabo"],
            Self::Material => &["material", "mat", "materiales"],
            Self::Range => &["gama", "serie", "range"],
            Self::MachiningFlag => &[
                "mecanizado o sin mecanizar (vacío)",
                "mecanizado o sin mecanizar",
                "mecanizado",
                "cnc",
                "mecanizada",
                "mecanizado/sin mecanizar",
            ],
        }
    }

    fn matches(self, canonical_name: &str) -> bool {
        self.synonyms().iter().any(|s| canonicalize(s) == canonical_name)
    }
}

/// Comparison key for a column name: trimmed, inner whitespace collapsed, lower-cased.
pub fn canonicalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Rename synonym columns to their canonical header; trim everything else.
///
/// For each canonical column only the leftmost matching source column is renamed.
pub fn rename_with_synonyms(columns: &[String]) -> Vec<String> {
    let keys: Vec<String> = columns.iter().map(|c| canonicalize(c)).collect();
    let mut renamed: Vec<Option<&'static str>> = vec![None; columns.len()];

    for target in CanonicalColumn::ALL {
        let hit = keys
            .iter()
            .enumerate()
            .find(|(i, key)| renamed[*i].is_none() && target.matches(key));
        if let Some((i, _)) = hit {
            renamed[i] = Some(target.header());
        }
    }

    columns
        .iter()
        .zip(renamed)
        .map(|(original, new)| match new {
            Some(header) => header.to_string(),
            None => original.trim().to_string(),
        })
        .collect()
}

fn has_load_critical(columns: &[String]) -> bool {
    CanonicalColumn::LOAD_CRITICAL
        .iter()
        .all(|c| columns.iter().any(|col| col == c.header()))
}

/// Interpret raw CSV rows as a part list.
///
/// The first row is tried as a header. If Ancho/Alto/Acabado cannot be found
/// that way, every row is treated as data and `EXPECTED_COLUMNS` is assigned
/// to the first 14 columns, provided the widest row has at least 14.
pub fn normalize_records(records: Vec<Vec<String>>) -> Result<SourceTable, TranslateError> {
    let Some(first) = records.first() else {
        return Err(TranslateError::Format {
            header_columns: Vec::new(),
            headerless_columns: 0,
        });
    };

    let header_columns = rename_with_synonyms(first);
    if has_load_critical(&header_columns) {
        let rows = records.into_iter().skip(1).collect();
        return Ok(SourceTable::new(header_columns, rows, HeaderLayout::Header));
    }

    let headerless_columns = records.iter().map(Vec::len).max().unwrap_or(0);
    if headerless_columns >= EXPECTED_COLUMNS.len() {
        debug!(
            columns = headerless_columns,
            "no usable header row, assigning the fixed 14-column layout"
        );
        let expected: Vec<String> = EXPECTED_COLUMNS.iter().map(|c| c.to_string()).collect();
        let columns = rename_with_synonyms(&expected);
        let rows = records
            .into_iter()
            .map(|mut row| {
                row.truncate(EXPECTED_COLUMNS.len());
                row
            })
            .collect();
        return Ok(SourceTable::new(columns, rows, HeaderLayout::Headerless));
    }

    Err(TranslateError::Format {
        header_columns,
        headerless_columns,
    })
}

/// Read and normalize a part list CSV. The delimiter is sniffed when not given.
pub fn load_source_file(path: &Path, delimiter: Option<u8>) -> Result<SourceTable, TranslateError> {
    let content = alvic_io::read_file_as_utf8(path)
        .map_err(|e| TranslateError::Io(format!("cannot read {}: {e}", path.display())))?;
    load_source_str(&content, delimiter, &path.display().to_string())
}

/// Normalize part list CSV text already in memory.
pub fn load_source_str(
    content: &str,
    delimiter: Option<u8>,
    source_name: &str,
) -> Result<SourceTable, TranslateError> {
    let delimiter = delimiter.unwrap_or_else(|| alvic_io::sniff_delimiter(content));
    let records = alvic_io::read_records(content, delimiter).map_err(|message| TranslateError::Csv {
        source_name: source_name.to_string(),
        message,
    })?;
    normalize_records(records)
}
