//! Duplicate resolution: one record per key, best rank wins.

use std::collections::{HashMap, HashSet};

use crate::analyzers::types::{Record, field};
use crate::error::ProfileError;

/// Resolves records sharing a key down to the single record with the
/// highest rank value.
///
/// Two passes: the first records the maximum rank seen per key, the
/// second emits, in original input order, the first record whose rank
/// equals that maximum. Ties at the maximum are broken by first
/// occurrence, so the result is deterministic for a given input order.
/// The output length always equals the number of distinct keys.
///
/// # Errors
///
/// Rank fields must be well-formed numeric text; a rank that fails to
/// parse is a data error and is propagated, never defaulted to zero.
pub fn dedupe_by_best(
    records: Vec<Record>,
    key_index: usize,
    rank_index: usize,
) -> Result<Vec<Record>, ProfileError> {
    let mut best_rank: HashMap<String, f64> = HashMap::new();

    for (row, record) in records.iter().enumerate() {
        let key = field(record, key_index)?;
        let rank = parse_rank(record, rank_index, row)?;

        match best_rank.get(key) {
            Some(current) if *current >= rank => {}
            _ => {
                best_rank.insert(key.to_string(), rank);
            }
        }
    }

    let mut emitted: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(best_rank.len());

    for (row, record) in records.into_iter().enumerate() {
        let key = field(&record, key_index)?.to_string();
        let rank = parse_rank(&record, rank_index, row)?;

        if best_rank.get(&key) == Some(&rank) && !emitted.contains(&key) {
            emitted.insert(key);
            out.push(record);
        }
    }

    Ok(out)
}

fn parse_rank(record: &Record, index: usize, row: usize) -> Result<f64, ProfileError> {
    let raw = field(record, index)?;
    raw.parse::<f64>()
        .map_err(|_| ProfileError::MalformedNumericField {
            field: "rank",
            row,
            value: raw.to_string(),
        })
}
