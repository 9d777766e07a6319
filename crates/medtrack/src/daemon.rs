//! Daemon command running the scheduling loop.
//!
//! The daemon arms one timer per persisted reminder, then re-reads the
//! reminders file on a refresh tick. That pass is how `add` and
//! `remove` from other processes reach the armed set: new ids get
//! armed, removed ids get disarmed.

use std::sync::Arc;
use std::time::Duration;

use miette::Result;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{error, info, warn};

use medtrack_notify::{Alarm, Notifier, Permission};
use medtrack_scheduler::{AlertHandler, Scheduler};
use medtrack_store::Store;

/// Configuration for the daemon.
pub struct DaemonConfig {
    pub store: Store,
    /// Seconds between scheduling passes.
    pub refresh_interval: u64,
    /// Skip alarm playback entirely.
    pub no_sound: bool,
}

/// Run the daemon until Ctrl-C.
pub async fn run(config: DaemonConfig) -> Result<()> {
    let store = config.store;
    info!(dir = %store.dir().display(), "starting medtrack daemon");

    let notifier = Arc::new(Notifier::new());
    let alarm = if config.no_sound {
        Alarm::disabled()
    } else {
        Alarm::detect()
    };

    // Request notification permission once at startup.
    match notifier.request_permission().await {
        Permission::Granted => info!("notifications enabled"),
        other => warn!(?other, "notifications unavailable, alerts will be skipped"),
    }

    let handler = alert_handler(Arc::clone(&notifier), alarm);
    let scheduler = Scheduler::new(store.clone(), handler);

    // Initial scheduling pass over the persisted list.
    scheduler.sync(&store.load_reminders().await).await;

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for shutdown signal");
            return;
        }
        let _ = shutdown_tx.send(true);
    });

    let refresh = Duration::from_secs(config.refresh_interval.max(1));
    loop {
        tokio::select! {
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    info!("shutdown requested");
                    break;
                }
            }
            _ = sleep(refresh) => {
                let reminders = store.load_reminders().await;
                scheduler.sync(&reminders).await;
            }
        }
    }

    scheduler.disarm_all().await;
    info!("daemon shut down gracefully");
    Ok(())
}

fn alert_handler(notifier: Arc<Notifier>, alarm: Alarm) -> AlertHandler {
    Box::new(move |reminder| {
        let notifier = Arc::clone(&notifier);
        let alarm = alarm.clone();
        Box::pin(async move {
            if let Err(e) = notifier.notify(&reminder).await {
                warn!(error = %e, "failed to raise notification");
            }
            alarm.play(&reminder.tune);
        })
    })
}
