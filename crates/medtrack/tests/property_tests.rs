//! Property-based tests for Medtrack's record types.

use proptest::prelude::*;

use medtrack_store::{HistoryEntry, Reminder, ReminderTime, Weekday};

// Strategy for generating a weekday
fn weekday() -> impl Strategy<Value = Weekday> {
    prop_oneof![
        Just(Weekday::Monday),
        Just(Weekday::Tuesday),
        Just(Weekday::Wednesday),
        Just(Weekday::Thursday),
        Just(Weekday::Friday),
        Just(Weekday::Saturday),
        Just(Weekday::Sunday),
    ]
}

// Strategy for generating a non-empty day selection (may repeat)
fn day_set() -> impl Strategy<Value = Vec<Weekday>> {
    prop::collection::vec(weekday(), 1..7)
}

// Strategy for generating minute-precision times
fn reminder_time() -> impl Strategy<Value = ReminderTime> {
    (0u32..24, 0u32..60).prop_map(|(hour, minute)| ReminderTime::new(hour, minute).unwrap())
}

// Strategy for generating short human labels
fn label() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,20}".prop_map(|s| s.to_string())
}

proptest! {
    #[test]
    fn reminder_roundtrip(
        medication in label(),
        dosage in label(),
        time in reminder_time(),
        days in day_set(),
        tune in label(),
    ) {
        let reminder = Reminder::new(medication, dosage, time, days, tune).unwrap();

        let json = serde_json::to_string(&reminder).unwrap();
        let decoded: Reminder = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(decoded, reminder);
    }

    #[test]
    fn history_entry_roundtrip(
        medication in label(),
        dosage in label(),
        time in reminder_time(),
        year in 2000i32..2100,
        month in 1u32..13,
        day in 1u32..29,
    ) {
        let entry = HistoryEntry {
            medication,
            dosage,
            time,
            date: chrono::NaiveDate::from_ymd_opt(year, month, day).unwrap(),
        };

        let json = serde_json::to_string(&entry).unwrap();
        let decoded: HistoryEntry = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(decoded, entry);
    }

    #[test]
    fn reminder_days_stay_non_empty_and_unique(days in day_set()) {
        let reminder = Reminder::new(
            "Aspirin",
            "100mg",
            ReminderTime::new(8, 0).unwrap(),
            days,
            "bell",
        )
        .unwrap();

        prop_assert!(!reminder.days.is_empty());

        let mut seen = reminder.days.clone();
        seen.sort_by_key(|d| d.name());
        seen.dedup();
        prop_assert_eq!(seen.len(), reminder.days.len());
    }

    #[test]
    fn reminder_list_roundtrip(count in 0usize..5, time in reminder_time()) {
        let reminders: Vec<Reminder> = (0..count)
            .map(|i| {
                Reminder::new(
                    format!("med-{i}"),
                    "1 tablet",
                    time,
                    vec![Weekday::Monday],
                    "bell",
                )
                .unwrap()
            })
            .collect();

        let json = serde_json::to_string(&reminders).unwrap();
        let decoded: Vec<Reminder> = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(decoded, reminders);
    }
}
