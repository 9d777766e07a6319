//! Permission-gated desktop notifications.

use notify_rust::{Notification, Urgency};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use medtrack_store::Reminder;

use crate::NotifyError;

/// Outcome of a notification capability request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// The notification service answered; alerts may be raised.
    Granted,
    /// The service is unreachable; alerts are skipped.
    Denied,
    /// No request has completed yet.
    Undetermined,
}

/// Permission-gated notifier for firing reminders.
///
/// Alerts are fire-and-forget: at most one notification per firing, and
/// a denied or unreachable service degrades to a silent skip.
pub struct Notifier {
    permission: RwLock<Permission>,
}

impl Notifier {
    /// Create a notifier with undetermined permission.
    pub fn new() -> Self {
        Self {
            permission: RwLock::new(Permission::Undetermined),
        }
    }

    #[cfg(test)]
    fn with_permission(permission: Permission) -> Self {
        Self {
            permission: RwLock::new(permission),
        }
    }

    /// Current cached permission state.
    pub async fn permission(&self) -> Permission {
        *self.permission.read().await
    }

    /// Probe the desktop notification service.
    ///
    /// The first determination is cached; later calls return it without
    /// probing again.
    pub async fn request_permission(&self) -> Permission {
        let current = *self.permission.read().await;
        if current != Permission::Undetermined {
            return current;
        }

        let probed = tokio::task::spawn_blocking(notify_rust::get_capabilities).await;
        let permission = match probed {
            Ok(Ok(_)) => Permission::Granted,
            Ok(Err(e)) => {
                debug!(error = %e, "notification service unavailable");
                Permission::Denied
            }
            Err(e) => {
                warn!(error = %e, "notification capability probe failed");
                Permission::Denied
            }
        };

        *self.permission.write().await = permission;
        info!(?permission, "notification permission determined");
        permission
    }

    /// Raise a notification for the firing reminder, honoring the
    /// permission state.
    ///
    /// An undetermined state triggers a permission request first; the
    /// alert is raised only if it comes back granted. Denied is a no-op.
    pub async fn notify(&self, reminder: &Reminder) -> Result<(), NotifyError> {
        match self.permission().await {
            Permission::Granted => self.show(reminder).await,
            Permission::Undetermined => {
                if self.request_permission().await == Permission::Granted {
                    self.show(reminder).await
                } else {
                    Ok(())
                }
            }
            Permission::Denied => Ok(()),
        }
    }

    async fn show(&self, reminder: &Reminder) -> Result<(), NotifyError> {
        let summary = format!("Time to take {}", reminder.medication);
        let body = format!("{} at {}", reminder.dosage, reminder.time);

        tokio::task::spawn_blocking(move || {
            Notification::new()
                .summary(&summary)
                .body(&body)
                .appname("medtrack")
                .icon("alarm-clock")
                .urgency(Urgency::Critical)
                .show()
                .map(|_| ())
        })
        .await??;

        Ok(())
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
