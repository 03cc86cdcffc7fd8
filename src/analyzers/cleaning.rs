//! Row filters: explicit bad-row exclusion, name heuristic, price.

use crate::analyzers::types::Record;

/// An explicit rule naming rows the caller wants dropped.
///
/// Exclusion is a point fix for documented data errors, not a schema
/// validator; the pipeline never auto-detects corruption.
#[derive(Debug, Clone)]
pub enum ExclusionRule {
    /// Drop the row at this 0-based position in the input set.
    Row(usize),
    /// Drop rows whose field count differs from the expected width.
    WidthNot(usize),
    /// Drop rows whose field at `index` parses to a value above `max`.
    /// Rows where the field is missing or non-numeric are not matched.
    FieldAbove { index: usize, max: f64 },
}

impl ExclusionRule {
    fn matches(&self, position: usize, record: &Record) -> bool {
        match self {
            ExclusionRule::Row(row) => position == *row,
            ExclusionRule::WidthNot(width) => record.len() != *width,
            ExclusionRule::FieldAbove { index, max } => record
                .get(*index)
                .and_then(|raw| raw.parse::<f64>().ok())
                .is_some_and(|value| value > *max),
        }
    }
}

/// Drops exactly the rows matching any exclusion rule, keeping the rest
/// in their original relative order.
pub fn apply_exclusions(records: Vec<Record>, rules: &[ExclusionRule]) -> Vec<Record> {
    records
        .into_iter()
        .enumerate()
        .filter(|(position, record)| !rules.iter().any(|rule| rule.matches(*position, record)))
        .map(|(_, record)| record)
        .collect()
}

/// Stable predicate filter: keeps rows passing `pred`, original order.
pub fn filter_stable<F>(records: Vec<Record>, pred: F) -> Vec<Record>
where
    F: Fn(&Record) -> bool,
{
    records.into_iter().filter(|record| pred(record)).collect()
}

/// Returns true if at most 3 characters of `name` fall outside ASCII.
///
/// A zero-tolerance ASCII check rejects legitimate names that carry a
/// trademark sign or an emoji, so up to 3 non-ASCII characters are
/// tolerated. The threshold is an empirical compromise, not language
/// detection; changing it changes which rows survive.
pub fn is_mostly_ascii(name: &str) -> bool {
    name.chars().filter(|c| !c.is_ascii()).count() <= 3
}
