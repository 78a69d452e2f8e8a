//! Error types for the trading journal.

use thiserror::Error;

/// Top-level journal error.
#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised while turning raw input into a validated trade.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} is too long: {len} chars, max {max}")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{field} must be strictly positive")]
    NotPositive { field: &'static str },

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: String },

    #[error("Unknown {kind} label: {label}")]
    UnknownLabel { kind: &'static str, label: String },
}

/// Trade storage errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Journal not found: {0}")]
    NotFound(String),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: u64, message: String },

    #[error("Invalid trade at line {line}: {source}")]
    InvalidRow {
        line: u64,
        #[source]
        source: ValidationError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data source error: {0}")]
    Internal(String),
}

/// Image storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Unsupported content type: {0}")]
    UnsupportedType(String),

    #[error("File too large: {size} bytes, max {max}")]
    TooLarge { size: usize, max: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for journal operations.
pub type JournalResult<T> = Result<T, JournalError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn read_row() -> Result<(), DataError> {
        Err(DataError::InvalidRow {
            line: 4,
            source: ValidationError::NotPositive { field: "risk_usd" },
        })
    }

    fn run() -> JournalResult<()> {
        read_row()?;
        Ok(())
    }

    #[test]
    fn test_errors_convert_to_journal_error() {
        let err = run().unwrap_err();
        assert!(matches!(err, JournalError::Data(DataError::InvalidRow { line: 4, .. })));
        assert_eq!(
            err.to_string(),
            "Data error: Invalid trade at line 4: risk_usd must be strictly positive"
        );

        let err: JournalError = StorageError::TooLarge { size: 11, max: 10 }.into();
        assert_eq!(err.to_string(), "Storage error: File too large: 11 bytes, max 10");
    }
}
