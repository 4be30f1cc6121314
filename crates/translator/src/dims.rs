//! Dimension parsing and the minimum-side clamp.

use crate::model::Dimensions;

/// Smallest panel side ALVIC manufactures, in millimetres.
pub const MIN_PANEL_MM: i64 = 100;

/// Parse a numeric cell. Surrounding whitespace is ignored; non-finite values are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Parse a dimension in millimetres, truncating any fractional part toward zero.
pub fn parse_dimension(raw: &str) -> Option<i64> {
    parse_number(raw).map(|v| v.trunc() as i64)
}

/// Raise `value` to `min` when it is strictly smaller.
pub fn clamp_min(value: i64, min: i64) -> i64 {
    if value < min {
        min
    } else {
        value
    }
}

/// Parse and clamp both sides. `None` when either side is not a number.
pub fn normalize(width_raw: &str, height_raw: &str, min: i64) -> Option<Dimensions> {
    let width = parse_dimension(width_raw)?;
    let height = parse_dimension(height_raw)?;
    Some(Dimensions {
        width: clamp_min(width, min),
        height: clamp_min(height, min),
    })
}
