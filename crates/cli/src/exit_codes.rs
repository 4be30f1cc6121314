//! CLI Exit Code Registry
//!
//! Single source of truth for `alvic` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error (unspecified)                          |
//! | 2    | Usage error (bad args; also clap's own parse errors) |
//! | 3    | Input not in a recognized format / malformed CSV     |
//! | 4    | ALVIC catalog not found                              |
//! | 5    | Required column missing (input or catalog)           |
//! | 6    | Invalid config file                                  |
//! | 7    | I/O error reading or writing files                   |
//! | 8    | NO_MATCH rows present with `--fail-on-no-match`      |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into `translate_exit_code` or the command that raises it

use alvic_translator::TranslateError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Translation (3-8)
// =============================================================================

/// Input could be read neither with a header nor as the 14-column layout,
/// or the CSV itself is malformed.
pub const EXIT_FORMAT: u8 = 3;

/// Catalog path does not point to a readable file.
pub const EXIT_CATALOG_NOT_FOUND: u8 = 4;

/// Ancho/Alto/Acabado (input) or Modelo/Color/Alto/Ancho/ARTICULO (catalog) missing.
pub const EXIT_MISSING_COLUMN: u8 = 5;

/// Config TOML failed to parse or validate.
pub const EXIT_CONFIG: u8 = 6;

/// Read or write failure.
pub const EXIT_IO: u8 = 7;

/// Run completed and files were written, but some LAC parts found no panel.
pub const EXIT_NO_MATCH: u8 = 8;

/// Map an engine error to its exit code.
pub fn translate_exit_code(err: &TranslateError) -> u8 {
    match err {
        TranslateError::Format { .. } | TranslateError::Csv { .. } => EXIT_FORMAT,
        TranslateError::NotFound { .. } => EXIT_CATALOG_NOT_FOUND,
        TranslateError::MissingColumn { .. } => EXIT_MISSING_COLUMN,
        TranslateError::ConfigParse(_) | TranslateError::ConfigValidation(_) => EXIT_CONFIG,
        TranslateError::Io(_) => EXIT_IO,
    }
}
