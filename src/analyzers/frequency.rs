//! Categorical distributions and per-category numeric averages.

use std::collections::HashMap;

use crate::analyzers::types::{AverageReport, FrequencyTable, Record, field};
use crate::analyzers::utility::mean;
use crate::error::ProfileError;

/// Computes the percentage-of-total distribution of the category field.
///
/// Single pass: counts per category value, then converts counts to
/// percentages of the total. The resulting values sum to 100 within
/// floating tolerance.
///
/// # Errors
///
/// Fails with [`ProfileError::EmptyInput`] on an empty record set,
/// since a share of zero records is undefined.
pub fn frequency_table(
    records: &[Record],
    category_index: usize,
) -> Result<FrequencyTable, ProfileError> {
    if records.is_empty() {
        return Err(ProfileError::EmptyInput);
    }

    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        let value = field(record, category_index)?;
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }

    let total = records.len() as f64;
    Ok(counts
        .into_iter()
        .map(|(value, count)| (value, count as f64 / total * 100.0))
        .collect())
}

/// Computes, per distinct category value, the mean of a numeric field.
///
/// `normalize` is an optional pre-parse transform applied to the raw
/// field text, for markets that encode magnitudes as free-text markers
/// like `"100,000+"`. Categories with no records never appear, so no
/// per-category division by zero can occur.
///
/// # Errors
///
/// Fails with [`ProfileError::EmptyInput`] on an empty record set, and
/// with [`ProfileError::MalformedNumericField`] if any value still
/// fails to parse after normalization.
pub fn average_by_category(
    records: &[Record],
    category_index: usize,
    numeric_index: usize,
    normalize: Option<fn(&str) -> String>,
) -> Result<AverageReport, ProfileError> {
    if records.is_empty() {
        return Err(ProfileError::EmptyInput);
    }

    let mut series: HashMap<String, Vec<f64>> = HashMap::new();

    for (row, record) in records.iter().enumerate() {
        let category = field(record, category_index)?;
        let raw = field(record, numeric_index)?;

        let text = match normalize {
            Some(f) => f(raw),
            None => raw.to_string(),
        };

        let value = text
            .parse::<f64>()
            .map_err(|_| ProfileError::MalformedNumericField {
                field: "popularity",
                row,
                value: raw.to_string(),
            })?;

        series.entry(category.to_string()).or_default().push(value);
    }

    Ok(series
        .into_iter()
        .map(|(category, values)| (category, mean(&values)))
        .collect())
}
