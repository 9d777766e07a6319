//! Error types for records and storage.

use thiserror::Error;

/// Errors from record validation and store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error while writing a data file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error while writing a data file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A reminder was submitted with no days selected.
    #[error("select at least one day")]
    NoDaysSelected,

    /// Positional index past the end of the reminders list.
    #[error("no reminder at index {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Unparseable time of day.
    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    /// Unparseable weekday name.
    #[error("invalid weekday '{0}'")]
    InvalidWeekday(String),
}
