use std::path::Path;

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, CatalogEntry};
use crate::classify::{is_lac, is_machined};
use crate::color::ResolvedColor;
use crate::columns::load_source_file;
use crate::config::TranslatorConfig;
use crate::dims;
use crate::error::TranslateError;
use crate::matcher::find_best_match;
use crate::model::{
    ColorFilterMode, Dimensions, MatchType, OutputRecord, OutputTable, SourceRecord, SourceTable,
    Translation, TranslationMeta,
};
use crate::summary::compute_summary;

/// Everything decided about a record before assembly.
#[derive(Debug, Clone, Copy)]
pub struct RecordTags {
    pub match_type: MatchType,
    pub color: ResolvedColor,
    pub color_filter_mode: Option<ColorFilterMode>,
    pub input_dims: Option<Dimensions>,
    pub is_lac: bool,
    pub is_machined: bool,
}

/// Load the catalog at `catalog_path`, then translate `source`.
pub fn translate(
    source: &SourceTable,
    catalog_path: &Path,
    config: &TranslatorConfig,
) -> Result<Translation, TranslateError> {
    let catalog = Catalog::load(catalog_path, &config.catalog)?;
    translate_with_catalog(source, &catalog, config)
}

/// Translate every row of `source` against an already loaded catalog.
pub fn translate_with_catalog(
    source: &SourceTable,
    catalog: &Catalog,
    config: &TranslatorConfig,
) -> Result<Translation, TranslateError> {
    let records = source.records()?;
    info!(rows = records.len(), catalog_entries = catalog.len(), "translating part list");

    let outputs: Vec<OutputRecord> = records
        .into_iter()
        .map(|record| translate_record(record, catalog, config))
        .collect();

    let (machined, non_machined) = partition(outputs);
    let summary = compute_summary(&machined, &non_machined);
    info!(
        total = summary.total,
        machined = summary.machined,
        non_machined = summary.non_machined,
        lac = summary.lac,
        no_match = summary.no_match,
        "translation finished"
    );

    Ok(Translation {
        meta: TranslationMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            layout: source.layout,
            catalog_entries: catalog.len(),
        },
        source_columns: source.columns.clone(),
        machined,
        non_machined,
        summary,
    })
}

/// Read the part list and catalog from disk, translate, and write both partitions.
///
/// The catalog is loaded first so a missing catalog is reported before any input problem.
pub fn translate_and_split(
    input_path: &Path,
    catalog_path: &Path,
    machined_out: &Path,
    non_machined_out: &Path,
    config: &TranslatorConfig,
) -> Result<Translation, TranslateError> {
    let catalog = Catalog::load(catalog_path, &config.catalog)?;
    let source = load_source_file(input_path, config.input.delimiter_byte())?;

    let translation = translate_with_catalog(&source, &catalog, config)?;

    write_table(machined_out, &translation.machined_table())?;
    write_table(non_machined_out, &translation.non_machined_table())?;

    Ok(translation)
}

fn write_table(path: &Path, table: &OutputTable) -> Result<(), TranslateError> {
    alvic_io::write_records(path, &table.headers, &table.rows).map_err(TranslateError::Io)?;
    debug!(path = %path.display(), rows = table.len(), "partition written");
    Ok(())
}

/// Run one record through the translation state machine.
///
/// not LAC → pass-through; unparsable size → BAD_DIMS; unknown finish →
/// UNKNOWN_COLOR; otherwise color-filter the catalog and size-match.
pub fn translate_record(
    record: SourceRecord,
    catalog: &Catalog,
    config: &TranslatorConfig,
) -> OutputRecord {
    let is_lac = is_lac(&record);
    let is_machined = is_machined(&record);

    let mut tags = RecordTags {
        match_type: MatchType::Passthrough,
        color: ResolvedColor::default(),
        color_filter_mode: None,
        input_dims: None,
        is_lac,
        is_machined,
    };

    if !is_lac {
        return finish(record, None, tags);
    }

    tags.color = ResolvedColor::resolve(&record.finish);

    let Some(size) = dims::normalize(&record.width, &record.height, config.dimensions.min_mm) else {
        tags.match_type = MatchType::BadDims;
        return finish(record, None, tags);
    };
    tags.input_dims = Some(size);

    if !tags.color.is_resolved() {
        tags.match_type = MatchType::UnknownColor;
        return finish(record, None, tags);
    }

    let (subset, mode) = catalog.filter_by_color(tags.color.text, tags.color.code);
    if mode == ColorFilterMode::FallbackNoColorFilter {
        warn!(
            row = record.row,
            finish = %record.finish,
            "no catalog rows for color, matching against the full catalog"
        );
    }
    tags.color_filter_mode = Some(mode);

    let (entry, match_type) = find_best_match(&subset, size.width, size.height);
    tags.match_type = match_type;
    finish(record, entry, tags)
}

fn finish(record: SourceRecord, entry: Option<&CatalogEntry>, tags: RecordTags) -> OutputRecord {
    debug!(
        row = record.row,
        project = record.project_id.as_deref().unwrap_or(""),
        sku = record.sku.as_deref().unwrap_or(""),
        part = record.part_id.as_deref().unwrap_or(""),
        part_type = record.part_type.as_deref().unwrap_or(""),
        match_type = %tags.match_type,
        "record translated"
    );
    enrich(record, entry, tags)
}

/// Assemble the output row from the source record, the matched entry and the tags.
///
/// UNKNOWN_COLOR rows never report color labels; every other LAC row reports
/// whatever the lookup resolved.
pub fn enrich(record: SourceRecord, entry: Option<&CatalogEntry>, tags: RecordTags) -> OutputRecord {
    let report_color = tags.is_lac && tags.match_type != MatchType::UnknownColor;
    OutputRecord {
        source: record,
        article: entry.map(|e| e.article.clone()),
        color_text: tags.color.text.filter(|_| report_color).map(String::from),
        color_code: tags.color.code.filter(|_| report_color).map(String::from),
        match_type: tags.match_type,
        color_filter_mode: tags.color_filter_mode,
        input_dims: tags.input_dims,
        matched_dims: entry.map(|e| Dimensions {
            width: e.width.trunc() as i64,
            height: e.height.trunc() as i64,
        }),
        is_lac: tags.is_lac,
        is_machined: tags.is_machined,
    }
}

/// Split on `is_machined`, keeping input order inside each partition.
pub fn partition(records: Vec<OutputRecord>) -> (Vec<OutputRecord>, Vec<OutputRecord>) {
    records.into_iter().partition(|r| r.is_machined)
}
