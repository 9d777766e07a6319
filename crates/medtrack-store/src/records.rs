//! Reminder and history record types.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::StoreError;

/// File name for the persisted reminders list.
pub const REMINDERS_FILE: &str = "reminders.json";

/// File name for the persisted dose history.
pub const HISTORY_FILE: &str = "history.json";

/// Day of the week a reminder is active on.
///
/// Serialized as the full English name ("Monday") so the stored files
/// stay human-readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All seven days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Full English name, as stored.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl FromStr for Weekday {
    type Err = StoreError;

    /// Accepts full names and three-letter abbreviations, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mon" | "monday" => Ok(Weekday::Monday),
            "tue" | "tuesday" => Ok(Weekday::Tuesday),
            "wed" | "wednesday" => Ok(Weekday::Wednesday),
            "thu" | "thursday" => Ok(Weekday::Thursday),
            "fri" | "friday" => Ok(Weekday::Friday),
            "sat" | "saturday" => Ok(Weekday::Saturday),
            "sun" | "sunday" => Ok(Weekday::Sunday),
            _ => Err(StoreError::InvalidWeekday(s.to_string())),
        }
    }
}

/// Minute-precision time of day, serialized as "HH:MM".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReminderTime(NaiveTime);

impl ReminderTime {
    /// Build from an hour and minute. `None` if out of range.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// The underlying naive time.
    pub fn as_naive(self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for ReminderTime {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(Self)
            .map_err(|_| StoreError::InvalidTime(s.to_string()))
    }
}

impl Serialize for ReminderTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReminderTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A user-defined recurring medication alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    /// Stable identity used to track this reminder's armed timer.
    /// Generated for records written before the field existed.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Medication name.
    pub medication: String,
    /// Dose description, e.g. "100mg".
    pub dosage: String,
    /// Time of day the reminder is due.
    pub time: ReminderTime,
    /// Days of the week the reminder fires on. Never empty.
    pub days: Vec<Weekday>,
    /// Alert tune identifier. Stored for the user's choice; playback
    /// currently uses a single shared sound.
    pub tune: String,
}

impl Reminder {
    /// Create a reminder, enforcing that at least one day is selected.
    ///
    /// Duplicate days are collapsed, keeping first-occurrence order.
    pub fn new(
        medication: impl Into<String>,
        dosage: impl Into<String>,
        time: ReminderTime,
        days: Vec<Weekday>,
        tune: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let mut deduped: Vec<Weekday> = Vec::with_capacity(days.len());
        for day in days {
            if !deduped.contains(&day) {
                deduped.push(day);
            }
        }

        if deduped.is_empty() {
            return Err(StoreError::NoDaysSelected);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            medication: medication.into(),
            dosage: dosage.into(),
            time,
            days: deduped,
            tune: tune.into(),
        })
    }

    /// Whether this reminder fires on the given day.
    pub fn fires_on(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }
}

/// An immutable log record of a dose that came due and was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Medication name, copied from the reminder.
    pub medication: String,
    /// Dose description, copied from the reminder.
    pub dosage: String,
    /// Scheduled time of day.
    pub time: ReminderTime,
    /// Local calendar day the reminder fired on.
    pub date: NaiveDate,
}

impl HistoryEntry {
    /// The entry a firing reminder produces for the given day.
    pub fn for_firing(reminder: &Reminder, date: NaiveDate) -> Self {
        Self {
            medication: reminder.medication.clone(),
            dosage: reminder.dosage.clone(),
            time: reminder.time,
            date,
        }
    }
}
