/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Strips thousands separators and a trailing `+` from a magnitude
/// marker, so `"1,000,000+"` becomes `"1000000"`.
///
/// The `+` is dropped, not interpreted: an app listed at `100,000+`
/// installs is counted as exactly its literal floor of 100000.
pub fn normalize_magnitude(raw: &str) -> String {
    raw.replace(',', "").trim_end_matches('+').to_string()
}
