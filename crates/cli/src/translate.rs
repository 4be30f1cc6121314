//! `alvic translate` and `alvic preview`.

use std::path::{Path, PathBuf};

use alvic_translator::classify::is_lac;
use alvic_translator::columns::load_source_file;
use alvic_translator::model::TranslationMeta;
use alvic_translator::summary::TranslationSummary;
use alvic_translator::{translate_and_split, MatchType, TranslateError};
use serde::Serialize;

use crate::exit_codes::{translate_exit_code, EXIT_NO_MATCH};
use crate::settings::{load_config, resolve_catalog};
use crate::CliError;

/// Machine-readable result of one `translate` run.
#[derive(Serialize)]
struct TranslateReport<'a> {
    meta: &'a TranslationMeta,
    input: &'a Path,
    catalog: &'a Path,
    machined_out: &'a Path,
    non_machined_out: &'a Path,
    summary: &'a TranslationSummary,
}

pub(crate) fn engine_err(err: TranslateError) -> CliError {
    let code = translate_exit_code(&err);
    let hint = match &err {
        TranslateError::NotFound { .. } => {
            Some("pass --catalog PATH or set [catalog] path in the config file")
        }
        TranslateError::Format { .. } => Some(
            "expected a header with Ancho, Alto and Acabado (or synonyms), \
             or the 14-column layout without header",
        ),
        _ => None,
    };
    CliError {
        code,
        message: err.to_string(),
        hint: hint.map(String::from),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_translate(
    input: PathBuf,
    catalog: Option<PathBuf>,
    config_path: Option<PathBuf>,
    machined_out: Option<PathBuf>,
    non_machined_out: Option<PathBuf>,
    json_output: bool,
    output_file: Option<PathBuf>,
    fail_on_no_match: bool,
) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;
    let catalog_path = resolve_catalog(catalog, &config);
    let machined_out = machined_out.unwrap_or_else(|| config.output.machined.clone());
    let non_machined_out = non_machined_out.unwrap_or_else(|| config.output.non_machined.clone());

    if machined_out == non_machined_out {
        return Err(CliError::args(format!(
            "machined and non-machined output both point to {}",
            machined_out.display()
        )));
    }
    if machined_out == input || non_machined_out == input {
        return Err(CliError::args("an output path would overwrite the input file"));
    }

    let result = translate_and_split(
        &input,
        &catalog_path,
        &machined_out,
        &non_machined_out,
        &config,
    )
    .map_err(engine_err)?;

    let report = TranslateReport {
        meta: &result.meta,
        input: &input,
        catalog: &catalog_path,
        machined_out: &machined_out,
        non_machined_out: &non_machined_out,
        summary: &result.summary,
    };
    let json_str = serde_json::to_string_pretty(&report)
        .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::io(format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &result.summary;
    eprintln!(
        "translated {} parts: {} machined, {} non-machined, {} LAC, {} matched, {} NO_MATCH",
        s.total, s.machined, s.non_machined, s.lac, s.matched, s.no_match,
    );
    for (tag, count) in &s.match_type_counts {
        let label = if tag.is_empty() { "(not LAC)" } else { tag.as_str() };
        eprintln!("  {label:<16} {count}");
    }
    if s.fallback_color_filter > 0 {
        eprintln!(
            "  {} part(s) matched without a color filter (FALLBACK_NO_COLOR_FILTER)",
            s.fallback_color_filter
        );
    }
    eprintln!("wrote {}", machined_out.display());
    eprintln!("wrote {}", non_machined_out.display());

    if fail_on_no_match && s.count(MatchType::NoMatch) > 0 {
        return Err(CliError {
            code: EXIT_NO_MATCH,
            message: format!("{} LAC part(s) have no catalog panel", s.no_match),
            hint: None,
        }
        .with_hint("filter Match_type = NO_MATCH in the output files"));
    }

    Ok(())
}

pub fn cmd_preview(input: PathBuf, rows: usize, config_path: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;
    let source = load_source_file(&input, config.input.delimiter_byte()).map_err(engine_err)?;
    let records = source.records().map_err(engine_err)?;
    let lac = records.iter().filter(|r| is_lac(r)).count();

    let layout = match source.layout {
        alvic_translator::model::HeaderLayout::Header => "header",
        alvic_translator::model::HeaderLayout::Headerless => "headerless (14-column layout)",
    };

    println!("layout:  {layout}");
    println!("columns: {}", source.columns.join(" | "));
    println!("rows:    {}", source.len());
    println!("lac:     {lac}");

    if rows > 0 && !source.is_empty() {
        println!();
        println!("{}", source.columns.join("\t"));
        for row in source.rows.iter().take(rows) {
            println!("{}", row.join("\t"));
        }
    }

    Ok(())
}
