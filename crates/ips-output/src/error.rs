//! Error types for ips-output.

use thiserror::Error;

/// Errors that can occur when writing a run's table.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("row has {got} fields, schema has {expected} columns")]
    SchemaMismatch {
        expected: usize,
        got:      usize,
    },

    #[error("timestamp {0} is outside the representable date range")]
    Timestamp(i64),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
