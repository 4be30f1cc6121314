//! `alvic-translator`: CUBRO → ALVIC panel translation engine.
//!
//! Receives a part list, resolves every LAC panel to an ALVIC catalog article
//! and splits the result into machined / non-machined partitions. File access
//! is limited to reading the catalog and the optional `translate_and_split`
//! convenience; formatting and presentation live in the CLI.

pub mod catalog;
pub mod classify;
pub mod color;
pub mod columns;
pub mod config;
pub mod dims;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod summary;

pub use catalog::{Catalog, CatalogEntry};
pub use config::TranslatorConfig;
pub use engine::{translate, translate_and_split, translate_with_catalog};
pub use error::TranslateError;
pub use model::{
    ColorFilterMode, MatchType, OutputRecord, OutputTable, SourceRecord, SourceTable, Translation,
};
