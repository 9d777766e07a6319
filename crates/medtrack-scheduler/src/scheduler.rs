//! Timer-owning reminder scheduler.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::{Datelike, Local};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info};
use uuid::Uuid;

use medtrack_store::{HistoryEntry, Reminder, Store, Weekday};

use crate::SchedulerError;
use crate::occurrence::next_occurrence;

/// Type alias for the alert handler invoked on each firing.
pub type AlertHandler =
    Box<dyn Fn(Reminder) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// The reminder scheduler.
///
/// Owns one timer task per armed reminder, keyed by reminder id. Arming
/// an id that already has a live timer cancels and replaces it, so
/// repeated scheduling passes never stack duplicate alerts; disarming
/// aborts the pending wait outright.
pub struct Scheduler {
    store: Store,
    handler: Arc<AlertHandler>,
    armed: Arc<Mutex<HashMap<Uuid, JoinHandle<()>>>>,
}

impl Scheduler {
    /// Create a new scheduler over the given store.
    ///
    /// The handler runs on every firing, after the history entry has
    /// been persisted.
    pub fn new(store: Store, handler: AlertHandler) -> Self {
        Self {
            store,
            handler: Arc::new(handler),
            armed: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Arm a timer for the reminder's next occurrence, replacing any
    /// existing timer for the same id.
    pub async fn arm(&self, reminder: Reminder) {
        let id = reminder.id;
        let task = self.spawn_timer(reminder);

        let mut armed = self.armed.lock().await;
        if let Some(old) = armed.insert(id, task) {
            old.abort();
            debug!(%id, "replaced armed timer");
        }
    }

    /// Cancel the reminder's armed timer, if any.
    pub async fn disarm(&self, id: Uuid) {
        if let Some(task) = self.armed.lock().await.remove(&id) {
            task.abort();
            debug!(%id, "disarmed timer");
        }
    }

    /// Cancel every armed timer.
    pub async fn disarm_all(&self) {
        let mut armed = self.armed.lock().await;
        for (_, task) in armed.drain() {
            task.abort();
        }
    }

    /// Number of reminders currently armed.
    pub async fn armed_count(&self) -> usize {
        self.armed.lock().await.len()
    }

    /// Whether the given reminder id has an armed timer.
    pub async fn is_armed(&self, id: Uuid) -> bool {
        self.armed.lock().await.contains_key(&id)
    }

    /// Reconcile armed timers against the given reminders list.
    ///
    /// Ids that disappeared are disarmed; ids not yet armed are armed.
    /// Timers for ids present on both sides are left alone so their
    /// pending waits are not reset.
    pub async fn sync(&self, reminders: &[Reminder]) {
        let keep: HashSet<Uuid> = reminders.iter().map(|r| r.id).collect();

        let stale: Vec<Uuid> = {
            let armed = self.armed.lock().await;
            armed.keys().filter(|id| !keep.contains(*id)).copied().collect()
        };
        for id in stale {
            self.disarm(id).await;
        }

        for reminder in reminders {
            if !self.is_armed(reminder.id).await {
                self.arm(reminder.clone()).await;
            }
        }

        debug!(armed = self.armed_count().await, "scheduling pass complete");
    }

    /// Persist a new reminder and arm its timer.
    ///
    /// Returns the new list length.
    pub async fn add_reminder(&self, reminder: Reminder) -> Result<usize, SchedulerError> {
        let reminders = self.store.add_reminder(reminder.clone()).await?;
        self.arm(reminder).await;
        Ok(reminders.len())
    }

    /// Remove the reminder at `index`, persist, and cancel its timer.
    pub async fn remove_reminder(&self, index: usize) -> Result<Reminder, SchedulerError> {
        let removed = self.store.remove_reminder(index).await?;
        self.disarm(removed.id).await;
        Ok(removed)
    }

    fn spawn_timer(&self, reminder: Reminder) -> JoinHandle<()> {
        let store = self.store.clone();
        let handler = Arc::clone(&self.handler);

        tokio::spawn(async move {
            loop {
                let now = Local::now();
                let due = next_occurrence(now, reminder.time);
                let wait = (due - now).to_std().unwrap_or_default();
                debug!(medication = %reminder.medication, due = %due, "reminder armed");

                sleep(wait).await;

                let today = Weekday::from(Local::now().weekday());
                fire_if_due(&store, &handler, &reminder, today).await;
                // The loop recomputes the next wait from the reminder's
                // time field rather than adding a fixed 24 hours.
            }
        })
    }
}

/// Evaluate one elapsed wait: fire when `today` is in the reminder's day
/// set, otherwise skip. Firing appends a history entry, persists it,
/// then invokes the alert handler.
async fn fire_if_due(store: &Store, handler: &AlertHandler, reminder: &Reminder, today: Weekday) {
    if !reminder.fires_on(today) {
        debug!(medication = %reminder.medication, day = %today, "skipping firing, day not selected");
        return;
    }

    info!(
        medication = %reminder.medication,
        dosage = %reminder.dosage,
        time = %reminder.time,
        "reminder fired"
    );

    let entry = HistoryEntry::for_firing(reminder, Local::now().date_naive());
    if let Err(e) = store.append_history(entry).await {
        error!(error = %e, "failed to persist history entry");
    }

    (handler)(reminder.clone()).await;
}
