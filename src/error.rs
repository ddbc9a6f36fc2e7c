//! Error types for u-tabular.

use thiserror::Error;

/// All errors produced by u-tabular operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TabularError {
    /// Column name not present in the table.
    #[error("column '{name}' is not in available names: {available:?}")]
    UnknownColumn { name: String, available: Vec<String> },
    /// Row index beyond the last row.
    #[error("row index {index} is out of max range: {max}")]
    IndexOutOfRange { index: usize, max: usize },
    /// Column is not numeric where numeric data is required.
    #[error("column '{column}' is not numeric (found {found})")]
    WrongColumnType { column: String, found: String },
    /// Rounding requested before the table was cleaned.
    #[error("data was not cleaned before, run clean first")]
    DirtyData,
    /// Unsupported hypothesis-test parameters.
    #[error("invalid hypothesis test input: {0}")]
    InvalidHypothesisTestInput(String),
    /// Subset requested with no names or more names than columns.
    #[error("cannot subset {requested} columns from a table with {available}")]
    InvalidSubset { requested: usize, available: usize },
    /// Column names must be given explicitly for this table shape.
    #[error("explicit column names required for a table with {column_count} columns")]
    ColumnsRequired { column_count: usize },
    /// Column contains missing values where none are allowed.
    #[error("column '{column}' has {count} missing values")]
    MissingValues { column: String, count: usize },
    /// Insufficient data for the requested operation.
    #[error("need at least {min_required} values, got {actual}")]
    InsufficientData { min_required: usize, actual: usize },
    /// Column has zero variance where a spread is required.
    #[error("column '{column}' is constant")]
    ZeroVariance { column: String },
    /// Dimension mismatch.
    #[error("expected {expected} elements, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    /// CSV parsing failed.
    #[error("CSV parse error at line {line}: {message}")]
    CsvParse { line: usize, message: String },
    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TabularError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
