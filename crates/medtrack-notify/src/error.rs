//! Error types for desktop alerting.

use thiserror::Error;

/// Errors from raising desktop notifications.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The notification backend rejected the alert.
    #[error("notification error: {0}")]
    Backend(#[from] notify_rust::error::Error),

    /// The blocking notification task was cancelled or panicked.
    #[error("notification task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
