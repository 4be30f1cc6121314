//! `alvic catalog`: inspect the ALVIC reference catalog.

use std::collections::BTreeSet;
use std::path::PathBuf;

use alvic_translator::catalog::CatalogStats;
use alvic_translator::Catalog;
use clap::Subcommand;
use serde::Serialize;

use crate::settings::{load_config, resolve_catalog};
use crate::translate::engine_err;
use crate::CliError;

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// Load the catalog and report what survives normalization and scoping
    #[command(after_help = "\
Examples:
  alvic catalog check
  alvic catalog check --catalog data/base_datos_alvic_2026.csv
  alvic catalog check --json")]
    Check {
        /// Path to the ALVIC catalog CSV (defaults to the config or the usual locations)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output JSON to stdout instead of the text report
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct CatalogReport {
    path: PathBuf,
    line_token: String,
    model_token: String,
    stats: CatalogStats,
    colors: Vec<String>,
    thicknesses: Vec<String>,
}

pub fn cmd_catalog(cmd: CatalogCommands, config_path: Option<PathBuf>) -> Result<(), CliError> {
    match cmd {
        CatalogCommands::Check { catalog, json } => cmd_catalog_check(catalog, config_path, json),
    }
}

fn cmd_catalog_check(
    catalog: Option<PathBuf>,
    config_path: Option<PathBuf>,
    json_output: bool,
) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;
    let path = resolve_catalog(catalog, &config);
    let loaded = Catalog::load(&path, &config.catalog).map_err(engine_err)?;

    let colors: BTreeSet<&str> = loaded.entries().iter().map(|e| e.color.as_str()).collect();
    let thicknesses: BTreeSet<String> = loaded
        .entries()
        .iter()
        .filter_map(|e| e.thickness)
        .map(|t| t.to_string())
        .collect();

    let report = CatalogReport {
        path,
        line_token: config.catalog.line_token.clone(),
        model_token: config.catalog.model_token.clone(),
        stats: loaded.stats(),
        colors: colors.into_iter().map(String::from).collect(),
        thicknesses: thicknesses.into_iter().collect(),
    };

    if json_output {
        let json_str = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
        return Ok(());
    }

    let s = &report.stats;
    println!("catalog:      {}", report.path.display());
    println!("scope:        {} {}", report.line_token, report.model_token);
    println!("rows read:    {}", s.rows_read);
    println!("incomplete:   {}", s.incomplete);
    println!("out of scope: {}", s.out_of_scope);
    println!("retained:     {}", s.retained);
    println!("colors:       {}", report.colors.join(", "));
    if !report.thicknesses.is_empty() {
        println!("thickness:    {}", report.thicknesses.join(", "));
    }

    if s.retained == 0 {
        eprintln!("warning: no catalog rows match {} {}", report.line_token, report.model_token);
    }

    Ok(())
}
