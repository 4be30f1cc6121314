use std::cmp::Ordering;

use crate::catalog::CatalogEntry;
use crate::model::MatchType;

/// Best catalog panel for a `width` × `height` part.
///
/// Strategies in priority order, first non-empty wins:
/// - `Exact`: same height and width
/// - `RotatedExact`: the part turned 90°
/// - `Fit`: smallest panel enclosing the part
/// - `RotatedFit`: smallest panel enclosing the turned part
///
/// Fit candidates are ranked by area, then height, then width (all ascending).
/// Remaining ties resolve to the earliest entry in catalog order.
pub fn find_best_match<'a>(
    candidates: &[&'a CatalogEntry],
    width: i64,
    height: i64,
) -> (Option<&'a CatalogEntry>, MatchType) {
    let w = width as f64;
    let h = height as f64;

    if let Some(entry) = candidates.iter().find(|e| e.height == h && e.width == w) {
        return (Some(*entry), MatchType::Exact);
    }

    if let Some(entry) = candidates.iter().find(|e| e.height == w && e.width == h) {
        return (Some(*entry), MatchType::RotatedExact);
    }

    if let Some(entry) = smallest(candidates.iter().filter(|e| e.height >= h && e.width >= w)) {
        return (Some(entry), MatchType::Fit);
    }

    if let Some(entry) = smallest(candidates.iter().filter(|e| e.height >= w && e.width >= h)) {
        return (Some(entry), MatchType::RotatedFit);
    }

    (None, MatchType::NoMatch)
}

fn smallest<'a, 'b>(fits: impl Iterator<Item = &'b &'a CatalogEntry>) -> Option<&'a CatalogEntry>
where
    'a: 'b,
{
    fits.copied().min_by(|a, b| fit_order(a, b))
}

fn fit_order(a: &CatalogEntry, b: &CatalogEntry) -> Ordering {
    a.area()
        .total_cmp(&b.area())
        .then(a.height.total_cmp(&b.height))
        .then(a.width.total_cmp(&b.width))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(article: &str, height: f64, width: f64) -> CatalogEntry {
        CatalogEntry {
            model: "ZENIT 06".into(),
            color: "BLANCO SM".into(),
            width,
            height,
            thickness: Some(19.0),
            article: article.into(),
        }
    }

    fn best(entries: &[CatalogEntry], width: i64, height: i64) -> (Option<String>, MatchType) {
        let refs: Vec<&CatalogEntry> = entries.iter().collect();
        let (hit, kind) = find_best_match(&refs, width, height);
        (hit.map(|e| e.article.clone()), kind)
    }

    #[test]
    fn exact_match() {
        let entries = vec![entry("A", 300.0, 500.0)];
        assert_eq!(best(&entries, 500, 300), (Some("A".into()), MatchType::Exact));
    }

    #[test]
    fn rotated_exact_match() {
        let entries = vec![entry("A", 500.0, 300.0)];
        assert_eq!(best(&entries, 500, 300), (Some("A".into()), MatchType::RotatedExact));
    }

    #[test]
    fn exact_beats_fit_regardless_of_order() {
        let entries = vec![entry("FIT", 400.0, 600.0), entry("EXACT", 300.0, 500.0)];
        assert_eq!(best(&entries, 500, 300), (Some("EXACT".into()), MatchType::Exact));
    }

    #[test]
    fn exact_beats_rotated_exact() {
        let entries = vec![entry("ROT", 500.0, 300.0), entry("EXACT", 300.0, 500.0)];
        assert_eq!(best(&entries, 500, 300).0.as_deref(), Some("EXACT"));
    }

    #[test]
    fn first_exact_in_catalog_order_wins() {
        let entries = vec![entry("FIRST", 300.0, 500.0), entry("SECOND", 300.0, 500.0)];
        assert_eq!(best(&entries, 500, 300).0.as_deref(), Some("FIRST"));
    }

    #[test]
    fn fit_picks_smallest_area() {
        let entries = vec![
            entry("BIG", 1000.0, 1000.0),
            entry("SMALL", 400.0, 600.0),
            entry("TOO_SHORT", 200.0, 600.0),
        ];
        assert_eq!(best(&entries, 500, 300), (Some("SMALL".into()), MatchType::Fit));
    }

    #[test]
    fn fit_tie_break_by_height_then_width() {
        // Both 240000 mm²; lower height wins.
        let entries = vec![entry("TALL", 600.0, 400.0), entry("SHORT", 400.0, 600.0)];
        assert_eq!(best(&entries, 350, 350).0.as_deref(), Some("SHORT"));

        // Same area and height: lower width (identical here) then catalog order.
        let entries = vec![entry("ONE", 400.0, 600.0), entry("TWO", 400.0, 600.0)];
        assert_eq!(best(&entries, 350, 350).0.as_deref(), Some("ONE"));
    }

    #[test]
    fn rotated_fit_when_unrotated_cannot_fit() {
        // Part 900 wide × 200 high only fits a panel 1000 high × 300 wide when turned.
        let entries = vec![entry("TURNED", 1000.0, 300.0), entry("TINY", 100.0, 100.0)];
        assert_eq!(best(&entries, 900, 200), (Some("TURNED".into()), MatchType::RotatedFit));
    }

    #[test]
    fn rotated_fit_prefers_smallest_area() {
        let entries = vec![
            entry("B", 1200.0, 300.0),
            entry("A", 1000.0, 360.0),
            entry("C", 1000.0, 300.0),
        ];
        assert_eq!(best(&entries, 900, 200), (Some("C".into()), MatchType::RotatedFit));
    }

    #[test]
    fn rotated_fit_equal_area_prefers_lower_alto() {
        // Both 360000 mm² and only fit turned; SHORT is listed last.
        let entries = vec![entry("TALL", 1200.0, 300.0), entry("SHORT", 900.0, 400.0)];
        assert_eq!(best(&entries, 900, 200), (Some("SHORT".into()), MatchType::RotatedFit));
    }

    #[test]
    fn no_match_is_not_an_error() {
        let entries = vec![entry("SMALL", 100.0, 100.0)];
        assert_eq!(best(&entries, 500, 300), (None, MatchType::NoMatch));
        assert_eq!(best(&[], 500, 300), (None, MatchType::NoMatch));
    }
}
