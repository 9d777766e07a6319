//! Error types for the scheduler.

use thiserror::Error;

/// Errors that can occur in scheduler operations.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Store error while persisting a list.
    #[error("store error: {0}")]
    Store(#[from] medtrack_store::StoreError),
}
