//! Desktop alerting for Medtrack.
//!
//! Provides the permission-gated `Notifier` for desktop notifications
//! and the best-effort `Alarm` sound playback.

mod alarm;
mod error;
mod notifier;

pub use alarm::Alarm;
pub use error::NotifyError;
pub use notifier::{Notifier, Permission};
