//! Reminder scheduling for Medtrack.
//!
//! This crate provides a scheduler that:
//! - Computes each reminder's next due occurrence from its time of day
//! - Owns one cancellable timer task per reminder, keyed by reminder id
//! - Day-gates firings, appends them to the dose history, and invokes
//!   an alert handler for notification and sound

mod error;
mod occurrence;
mod scheduler;

pub use error::SchedulerError;
pub use occurrence::next_occurrence;
pub use scheduler::{AlertHandler, Scheduler};
