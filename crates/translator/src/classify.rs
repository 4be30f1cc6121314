use crate::model::SourceRecord;

/// Values that spreadsheet exports write for an empty machining cell.
const NULL_MARKERS: [&str; 3] = ["nan", "none", "null"];

/// LAC (lacquered) parts are the only ones translated.
///
/// Checks Gama and Material; either containing "LAC" (any case) is enough.
pub fn is_lac(record: &SourceRecord) -> bool {
    [record.range.as_deref(), record.material.as_deref()]
        .into_iter()
        .flatten()
        .any(|value| value.trim().to_uppercase().contains("LAC"))
}

/// Any non-empty, non-null machining indicator marks the part as machined.
/// A missing column means unmachined.
pub fn is_machined(record: &SourceRecord) -> bool {
    let Some(value) = record.machining.as_deref() else {
        return false;
    };
    let value = value.trim();
    !value.is_empty() && !NULL_MARKERS.contains(&value.to_lowercase().as_str())
}
