//! Persisted record types and JSON file storage for Medtrack.
//!
//! This crate provides:
//! - The `Reminder` and `HistoryEntry` record shapes, with the typed
//!   `ReminderTime` ("HH:MM") and `Weekday` fields they are built from
//! - A file store that loads and saves both lists, treating absent or
//!   malformed data as an empty list rather than an error

mod error;
mod records;
mod store;

pub use error::StoreError;
pub use records::{HISTORY_FILE, HistoryEntry, REMINDERS_FILE, Reminder, ReminderTime, Weekday};
pub use store::Store;
