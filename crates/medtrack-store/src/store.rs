//! JSON file persistence for the reminders and history lists.
//!
//! Each list lives in its own file under the data directory. Loads treat
//! absent or malformed files as empty lists; saves serialize the full
//! list and replace the file atomically. There are no partial writes.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::warn;

use crate::StoreError;
use crate::records::{HISTORY_FILE, HistoryEntry, REMINDERS_FILE, Reminder};

/// File-backed store for the two persisted lists.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Create a store rooted at the given data directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform default data directory.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("medtrack")
    }

    /// Directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn reminders_path(&self) -> PathBuf {
        self.dir.join(REMINDERS_FILE)
    }

    fn history_path(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }

    /// Load the reminders list. Absent or malformed data is an empty list.
    pub async fn load_reminders(&self) -> Vec<Reminder> {
        load_list(&self.reminders_path()).await
    }

    /// Overwrite the persisted reminders list.
    pub async fn save_reminders(&self, reminders: &[Reminder]) -> Result<(), StoreError> {
        save_list(&self.reminders_path(), reminders).await
    }

    /// Load the dose history. Absent or malformed data is an empty list.
    pub async fn load_history(&self) -> Vec<HistoryEntry> {
        load_list(&self.history_path()).await
    }

    /// Overwrite the persisted history list.
    pub async fn save_history(&self, history: &[HistoryEntry]) -> Result<(), StoreError> {
        save_list(&self.history_path(), history).await
    }

    /// Append a reminder and persist. Returns the updated list.
    pub async fn add_reminder(&self, reminder: Reminder) -> Result<Vec<Reminder>, StoreError> {
        let mut reminders = self.load_reminders().await;
        reminders.push(reminder);
        self.save_reminders(&reminders).await?;
        Ok(reminders)
    }

    /// Remove the reminder at `index` and persist.
    ///
    /// Returns the removed reminder. Later entries keep their relative
    /// order; their indices shift down by one.
    pub async fn remove_reminder(&self, index: usize) -> Result<Reminder, StoreError> {
        let mut reminders = self.load_reminders().await;
        if index >= reminders.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: reminders.len(),
            });
        }

        let removed = reminders.remove(index);
        self.save_reminders(&reminders).await?;
        Ok(removed)
    }

    /// Append one history entry and persist.
    pub async fn append_history(&self, entry: HistoryEntry) -> Result<(), StoreError> {
        let mut history = self.load_history().await;
        history.push(entry);
        self.save_history(&history).await
    }
}

async fn load_list<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(_) => return Vec::new(),
    };

    match serde_json::from_str(&content) {
        Ok(list) => list,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "malformed data file, treating as empty");
            Vec::new()
        }
    }
}

async fn save_list<T: Serialize>(path: &Path, list: &[T]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let content = serde_json::to_string_pretty(list)?;

    // Write to temp file first, then rename for atomicity
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path).await?;
    file.write_all(content.as_bytes()).await?;
    file.sync_all().await?;
    fs::rename(&temp_path, path).await?;

    Ok(())
}
