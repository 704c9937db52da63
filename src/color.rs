//! Hex-color validation and normalization for manifest fields.

use std::sync::LazyLock;

use regex::Regex;

static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").expect("valid regex"));

/// Default manifest background color.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Default manifest theme color.
pub const DEFAULT_THEME: &str = "#6644ff";

/// Validates a hex color and normalizes it to a leading-`#` form.
///
/// Accepts 3- or 6-digit hex values with or without a leading `#` and with
/// surrounding whitespace. Anything else (including `None` and empty
/// strings) yields the supplied `fallback` unchanged; no partial correction
/// is attempted.
#[must_use]
pub fn normalize_color(color: Option<&str>, fallback: &str) -> String {
    let Some(color) = color else {
        return fallback.to_string();
    };
    let cleaned = color.trim();
    if cleaned.is_empty() || !HEX_COLOR_RE.is_match(cleaned) {
        return fallback.to_string();
    }
    if cleaned.starts_with('#') {
        cleaned.to_string()
    } else {
        format!("#{cleaned}")
    }
}
