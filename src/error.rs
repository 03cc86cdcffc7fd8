//! Error types for the cleaning and aggregation pipeline.

use thiserror::Error;

/// Errors raised while cleaning or aggregating catalog records.
///
/// Every variant is terminal to the operation that raised it; nothing in
/// the pipeline retries or silently substitutes a default value.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// A field that must parse as a number did not, after normalization.
    #[error("malformed numeric {field} field at row {row}: {value:?}")]
    MalformedNumericField {
        field: &'static str,
        row: usize,
        value: String,
    },

    /// Frequency or average computation was invoked on zero records.
    #[error("cannot aggregate an empty record set")]
    EmptyInput,

    /// A column mapping points past the end of a record.
    #[error("column index {index} out of range for record with {width} fields")]
    UnmappedColumn { index: usize, width: usize },
}
