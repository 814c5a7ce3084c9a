//! Domain error types
//!
//! This module defines the error hierarchy for the lead router.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main lead router error type
///
/// This is the primary error type used throughout the application.
/// Per-record routing outcomes (unmapped area code, missing destination) are
/// not errors: they are recorded as terminal statuses on the source row.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Routing table construction errors
    #[error("Routing error: {0}")]
    Routing(String),

    /// Source or destination sink errors
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Sink-specific errors
///
/// Errors raised by source/destination adapters. Any of these aborts the
/// remaining run; already committed writes are kept.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Failed to connect to the backing store
    #[error("Failed to connect to sink: {0}")]
    ConnectionFailed(String),

    /// The source sheet does not exist
    #[error("Source sheet not found: {0}")]
    SourceNotFound(String),

    /// Failed to read rows
    #[error("Failed to read rows: {0}")]
    ReadFailed(String),

    /// Failed to write rows or cells
    #[error("Failed to write rows: {0}")]
    WriteFailed(String),

    /// The destination sheet does not exist
    #[error("Destination sheet not found: {0}")]
    SheetNotFound(String),

    /// Append position no longer matches the sheet's next free row
    #[error("Append position mismatch on '{sheet}': expected row {expected}, got {requested}")]
    PositionMismatch {
        sheet: String,
        expected: usize,
        requested: usize,
    },

    /// Row number outside the sheet
    #[error("Row {row} out of range on '{sheet}'")]
    RowOutOfRange { sheet: String, row: usize },

    /// Stored data could not be interpreted
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for RouterError {
    fn from(err: std::io::Error) -> Self {
        RouterError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RouterError {
    fn from(err: serde_json::Error) -> Self {
        RouterError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RouterError {
    fn from(err: toml::de::Error) -> Self {
        RouterError::Configuration(format!("TOML parse error: {err}"))
    }
}
