//! Data types used by the cleaning and aggregation pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::error::ProfileError;

/// One row of a catalog, as an ordered sequence of string fields.
///
/// A record has no intrinsic identity beyond its name field; which index
/// holds the name is part of the per-market [`ColumnMapping`].
pub type Record = Vec<String>;

/// Category value mapped to its percentage of the total record count.
/// Percentages sum to 100 across all keys (within floating tolerance).
pub type FrequencyTable = HashMap<String, f64>;

/// Category value mapped to the arithmetic mean of a numeric field.
/// Categories with zero matching records are never present.
pub type AverageReport = HashMap<String, f64>;

/// Field indices for the semantic roles of one market's catalog.
///
/// Built once per market and never mutated; [`ColumnMapping::validate`]
/// must pass before any row is interpreted through the mapping.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMapping {
    /// App name, also the deduplication key.
    pub name: usize,
    /// Category or genre used for grouping.
    pub category: usize,
    /// Review count used to rank duplicates.
    pub rank: usize,
    /// Price field, compared against the market's free-price literal.
    pub price: usize,
    /// Numeric field averaged per category (installs or rating count).
    pub popularity: usize,
}

impl ColumnMapping {
    fn indices(&self) -> [usize; 5] {
        [
            self.name,
            self.category,
            self.rank,
            self.price,
            self.popularity,
        ]
    }

    /// Checks every mapped index against every record's width.
    ///
    /// Runs before any row is interpreted, so an out-of-range mapping
    /// fails the whole run instead of a single stage partway through.
    pub fn validate(&self, records: &[Record]) -> Result<(), ProfileError> {
        for record in records {
            for index in self.indices() {
                if index >= record.len() {
                    return Err(ProfileError::UnmappedColumn {
                        index,
                        width: record.len(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Borrows one field of a record, failing if the index is out of range.
pub fn field(record: &Record, index: usize) -> Result<&str, ProfileError> {
    record
        .get(index)
        .map(String::as_str)
        .ok_or(ProfileError::UnmappedColumn {
            index,
            width: record.len(),
        })
}

/// Record counts after each cleaning stage, in pipeline order.
#[derive(Debug, Serialize)]
pub struct StageCounts {
    pub raw: usize,
    pub after_exclusions: usize,
    pub after_dedupe: usize,
    pub after_language: usize,
    pub after_price: usize,
}

/// Complete aggregation result for a single market.
#[derive(Debug, Serialize)]
pub struct MarketReport {
    pub schema_version: u8,
    pub market: String,
    pub generated_at: DateTime<Utc>,
    pub stages: StageCounts,
    pub category_share: FrequencyTable,
    pub avg_popularity: AverageReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> Record {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_validate_accepts_wide_enough_records() {
        let mapping = ColumnMapping {
            name: 0,
            category: 1,
            rank: 2,
            price: 3,
            popularity: 4,
        };
        let records = vec![record(&["a", "b", "1", "0", "5"])];
        assert!(mapping.validate(&records).is_ok());
    }

    #[test]
    fn test_validate_rejects_narrow_record() {
        let mapping = ColumnMapping {
            name: 0,
            category: 1,
            rank: 2,
            price: 7,
            popularity: 4,
        };
        let records = vec![record(&["a", "b", "1", "0", "5"])];
        let err = mapping.validate(&records).unwrap_err();
        match err {
            ProfileError::UnmappedColumn { index, width } => {
                assert_eq!(index, 7);
                assert_eq!(width, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_field_out_of_range() {
        let r = record(&["only"]);
        assert!(field(&r, 0).is_ok());
        assert!(field(&r, 1).is_err());
    }
}
