//! Utility functions for parsing and formatting parameter values.

/// Parses a string as `f64`, degrading to `0.0` on failure.
///
/// Catalogue metadata is hand-maintained and occasionally malformed; numeric
/// attributes use tolerant parsing so a bad entry disqualifies a control
/// instead of raising.
///
/// # Arguments
///
/// * `raw` - The attribute string to parse.
pub fn parse_or_zero(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

/// Splits a range attribute into its two numeric bounds.
///
/// Returns `None` unless the string contains exactly two whitespace-separated
/// parts. Each bound degrades to `0.0` when unparsable, matching
/// [`parse_or_zero`].
///
/// # Arguments
///
/// * `raw` - The range attribute, e.g. `"0 100"`.
pub fn parse_bounds(raw: &str) -> Option<(f64, f64)> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    if parts.len() != 2 {
        return None;
    }
    Some((parse_or_zero(parts[0]), parse_or_zero(parts[1])))
}

/// Parses an edited display value as `f64`.
///
/// Unlike catalogue attributes, commit input must parse cleanly; a failure
/// here becomes a named commit failure rather than a silent zero.
///
/// # Arguments
///
/// * `raw` - The display string the user edited.
pub fn parse_edit(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

/// Formats a raw value for display with up to three decimal places,
/// trailing zeros trimmed.
///
/// # Arguments
///
/// * `value` - The raw parameter value.
pub fn format_value(value: f64) -> String {
    let mut formatted = format!("{value:.3}");
    if formatted.contains('.') {
        while formatted.ends_with('0') {
            formatted.pop();
        }
        if formatted.ends_with('.') {
            formatted.pop();
        }
    }
    formatted
}
