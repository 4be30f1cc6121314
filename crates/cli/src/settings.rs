//! Config file and catalog path resolution.

use std::path::{Path, PathBuf};

use alvic_translator::TranslatorConfig;
use tracing::debug;

use crate::exit_codes::translate_exit_code;
use crate::CliError;

/// Catalog locations tried, in order, when neither `--catalog` nor the config names one.
pub const DEFAULT_CATALOG_CANDIDATES: [&str; 5] = [
    "data/base_datos_alvic_2026.csv",
    "data/base_datos_alvic_2026",
    "base_datos_alvic_2026.csv",
    "base_datos_alvic_2026",
    "BASE DE DATOS ALVIC 2026.csv",
];

/// `<config_dir>/alvic-translator/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("alvic-translator").join("config.toml"))
}

/// Load the explicit config, else the user config if it exists, else defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<TranslatorConfig, CliError> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => user_config_path().filter(|p| p.is_file()),
    };

    let Some(path) = path else {
        debug!("no config file, using defaults");
        return Ok(TranslatorConfig::default());
    };

    debug!(path = %path.display(), "loading config");
    TranslatorConfig::load(&path).map_err(|e| {
        CliError {
            code: translate_exit_code(&e),
            message: e.to_string(),
            hint: None,
        }
        .with_hint(format!("config file: {}", path.display()))
    })
}

/// `--catalog`, then `[catalog] path`, then the first existing default candidate.
///
/// With nothing on disk the first candidate is returned so the load fails with
/// a not-found error naming a concrete path.
pub fn resolve_catalog(explicit: Option<PathBuf>, config: &TranslatorConfig) -> PathBuf {
    if let Some(path) = explicit.or_else(|| config.catalog.path.clone()) {
        return path;
    }
    find_default_catalog(Path::new("."))
}

fn find_default_catalog(base: &Path) -> PathBuf {
    DEFAULT_CATALOG_CANDIDATES
        .iter()
        .map(|candidate| base.join(candidate))
        .find(|path| path.is_file())
        .unwrap_or_else(|| base.join(DEFAULT_CATALOG_CANDIDATES[0]))
}
