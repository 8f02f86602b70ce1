//! Error types for the store layer.

use rusqlite::ErrorCode;
use thiserror::Error;

/// Main error type for store operations
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLite reported a failure
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to read CSV input
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A CSV record could not be turned into a row
    #[error("Invalid record on line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },

    /// A stored date could not be interpreted
    #[error("Failed to parse date: {0}")]
    DateParse(String),

    /// The data file lacks a declared table
    #[error("Schema mismatch: table '{0}' does not exist")]
    MissingTable(String),

    /// The data file lacks a declared column
    #[error("Schema mismatch: table '{table}' has no column '{column}'")]
    MissingColumn { table: String, column: String },

    /// The store refused a caller-supplied query parameter
    #[error("Query parameter rejected by the store: {0}")]
    InvalidParameter(String),

    /// A thread panicked while holding the connection
    #[error("Database connection lock was poisoned")]
    ConnectionPoisoned,
}

impl DbError {
    /// Whether the failure was caused by the caller's input rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(self, DbError::InvalidParameter(_))
    }

    /// Classify an error raised while binding or evaluating caller-supplied parameters.
    pub(crate) fn from_parameter(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::ToSqlConversionFailure(e) => DbError::InvalidParameter(e.to_string()),
            rusqlite::Error::SqliteFailure(ffi, msg)
                if matches!(
                    ffi.code,
                    ErrorCode::TooBig | ErrorCode::TypeMismatch | ErrorCode::ParameterOutOfRange
                ) =>
            {
                DbError::InvalidParameter(msg.unwrap_or_else(|| ffi.to_string()))
            }
            other => DbError::Sqlite(other),
        }
    }
}

/// Type alias for Results using DbError
pub type DbResult<T> = std::result::Result<T, DbError>;
