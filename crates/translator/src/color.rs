//! CUBRO color name → ALVIC color label / internal code.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// CUBRO color names, in catalog order.
const CUBRO_COLORS: &[&str] = &[
    "Blanco", "Negro", "Tinta", "Seda", "Tipo", "Crema", "Humo", "Zafiro",
    "Celeste", "Pino", "Noche", "Marga", "Argil", "Curry", "Roto", "Ave",
];

/// ALVIC display labels, same order as `CUBRO_COLORS`.
const ALVIC_COLOR_TEXTS: &[&str] = &[
    "BLANCO SM",
    "NEGRO SM",
    "GRIS PLOMO SM",
    "CASHMERE SM",
    "BASALTO SM",
    "MAGNOLIA SM",
    "GRIS NUBE SM",
    "AZUL ÍNDIGO SM",
    "AGUA MARINA SM",
    "VERDE SALVIA SM",
    "AZUL MARINO SM",
    "COTTO SM",
    "ALMAGRA SM",
    "CAMEL SM",
    "ARENA SM",
    "TORTORA SM",
];

/// ALVIC internal color codes, same order as `CUBRO_COLORS`.
const ALVIC_COLOR_CODES: &[&str] = &[
    "L3806", "L4596", "L4706", "L5266", "L5276", "L5556", "L5866", "L5906",
    "L6766", "L9146", "L9166", "L9556", "LA056", "LA066", "LA076", "LA086",
];

static COLOR_TABLE: Lazy<ColorTable> = Lazy::new(ColorTable::build);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorEntry {
    pub cubro: &'static str,
    pub text: &'static str,
    pub code: &'static str,
}

/// Immutable lookup built once per process from the three parallel lists.
#[derive(Debug)]
pub struct ColorTable {
    entries: Vec<ColorEntry>,
    by_key: HashMap<String, usize>,
}

impl ColorTable {
    fn build() -> Self {
        assert!(
            CUBRO_COLORS.len() == ALVIC_COLOR_TEXTS.len()
                && CUBRO_COLORS.len() == ALVIC_COLOR_CODES.len(),
            "color lists out of alignment: {} names, {} texts, {} codes",
            CUBRO_COLORS.len(),
            ALVIC_COLOR_TEXTS.len(),
            ALVIC_COLOR_CODES.len(),
        );

        let entries: Vec<ColorEntry> = CUBRO_COLORS
            .iter()
            .zip(ALVIC_COLOR_TEXTS)
            .zip(ALVIC_COLOR_CODES)
            .map(|((&cubro, &text), &code)| ColorEntry { cubro, text, code })
            .collect();

        let by_key = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (color_key(e.cubro), i))
            .collect();

        Self { entries, by_key }
    }

    pub fn global() -> &'static ColorTable {
        &COLOR_TABLE
    }

    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    /// Case-insensitive, trimmed lookup by CUBRO name.
    pub fn lookup(&self, name: &str) -> Option<&ColorEntry> {
        self.by_key.get(&color_key(name)).map(|&i| &self.entries[i])
    }
}

fn color_key(name: &str) -> String {
    name.trim().to_lowercase()
}

pub fn resolve_text(name: &str) -> Option<&'static str> {
    ColorTable::global().lookup(name).map(|e| e.text)
}

pub fn resolve_code(name: &str) -> Option<&'static str> {
    ColorTable::global().lookup(name).map(|e| e.code)
}

/// Both resolutions for one CUBRO finish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedColor {
    pub text: Option<&'static str>,
    pub code: Option<&'static str>,
}

impl ResolvedColor {
    pub fn resolve(name: &str) -> Self {
        Self {
            text: resolve_text(name),
            code: resolve_code(name),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.text.is_some() || self.code.is_some()
    }
}
