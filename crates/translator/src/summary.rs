use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{ColorFilterMode, MatchType, OutputRecord};

/// QA counts for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranslationSummary {
    pub total: usize,
    pub machined: usize,
    pub non_machined: usize,
    pub lac: usize,
    pub matched: usize,
    pub no_match: usize,
    pub fallback_color_filter: usize,
    /// Keyed by the `Match_type` cell; pass-through rows count under "".
    pub match_type_counts: BTreeMap<String, usize>,
}

impl TranslationSummary {
    pub fn count(&self, match_type: MatchType) -> usize {
        self.match_type_counts
            .get(match_type.as_str())
            .copied()
            .unwrap_or(0)
    }
}

/// Compute summary statistics over both partitions.
pub fn compute_summary(machined: &[OutputRecord], non_machined: &[OutputRecord]) -> TranslationSummary {
    let mut summary = TranslationSummary {
        machined: machined.len(),
        non_machined: non_machined.len(),
        total: machined.len() + non_machined.len(),
        ..TranslationSummary::default()
    };

    for r in machined.iter().chain(non_machined) {
        *summary
            .match_type_counts
            .entry(r.match_type.as_str().to_string())
            .or_insert(0) += 1;

        if r.is_lac {
            summary.lac += 1;
        }
        if r.match_type.is_match() {
            summary.matched += 1;
        }
        if r.match_type == MatchType::NoMatch {
            summary.no_match += 1;
        }
        if r.color_filter_mode == Some(ColorFilterMode::FallbackNoColorFilter) {
            summary.fallback_color_filter += 1;
        }
    }

    summary
}
