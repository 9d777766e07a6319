//! Next-occurrence computation for reminder times.

use chrono::{DateTime, Local, NaiveDate};

use medtrack_store::ReminderTime;

/// Days to probe past today for a representable candidate. DST gaps
/// only ever remove a single day's candidate.
const MAX_LOOKAHEAD_DAYS: u32 = 7;

/// The instant a local calendar day reaches the given wall-clock time.
///
/// `None` when the combination does not exist in the local timezone
/// (spring-forward gap).
fn occurrence_on(date: NaiveDate, time: ReminderTime) -> Option<DateTime<Local>> {
    date.and_time(time.as_naive())
        .and_local_timezone(Local)
        .earliest()
}

/// The next instant the given wall-clock time comes around after `now`.
///
/// Today's candidate is used only if it is strictly in the future;
/// otherwise the search moves forward to the next day that can
/// represent the time.
pub fn next_occurrence(now: DateTime<Local>, time: ReminderTime) -> DateTime<Local> {
    let today = now.date_naive();

    if let Some(candidate) = occurrence_on(today, time)
        && candidate > now
    {
        return candidate;
    }

    let mut date = today;
    for _ in 0..MAX_LOOKAHEAD_DAYS {
        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
        if let Some(candidate) = occurrence_on(date, time) {
            return candidate;
        }
    }

    // Only reachable at the far edge of the supported calendar range.
    now + chrono::Duration::days(1)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn time(hour: u32, minute: u32) -> ReminderTime {
        ReminderTime::new(hour, minute).unwrap()
    }

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn future_time_today_stays_today() {
        let now = local(2025, 6, 2, 7, 0);
        let next = next_occurrence(now, time(8, 0));
        assert_eq!(next, local(2025, 6, 2, 8, 0));
    }

    #[test]
    fn past_time_moves_to_tomorrow() {
        let now = local(2025, 6, 2, 9, 0);
        let next = next_occurrence(now, time(8, 0));
        assert_eq!(next, local(2025, 6, 3, 8, 0));
    }

    #[test]
    fn exactly_now_moves_to_tomorrow() {
        // "Not strictly in the future" includes the current instant.
        let now = local(2025, 6, 2, 8, 0);
        let next = next_occurrence(now, time(8, 0));
        assert_eq!(next, local(2025, 6, 3, 8, 0));
    }

    #[test]
    fn one_minute_ahead_is_today() {
        let now = local(2025, 6, 2, 7, 59);
        let next = next_occurrence(now, time(8, 0));
        assert_eq!(next, local(2025, 6, 2, 8, 0));
    }

    #[test]
    fn midnight_reminder_after_midnight_is_tomorrow() {
        let now = local(2025, 6, 2, 0, 1);
        let next = next_occurrence(now, time(0, 0));
        assert_eq!(next, local(2025, 6, 3, 0, 0));
    }

    proptest! {
        #[test]
        fn next_occurrence_is_strictly_future(
            now_hour in 0u32..24,
            now_minute in 0u32..60,
            hour in 0u32..24,
            minute in 0u32..60,
        ) {
            let now = local(2025, 6, 2, now_hour, now_minute);
            let next = next_occurrence(now, time(hour, minute));
            prop_assert!(next > now);
        }

        #[test]
        fn next_occurrence_lands_on_requested_time(
            now_hour in 0u32..24,
            hour in 0u32..24,
            minute in 0u32..60,
        ) {
            let now = local(2025, 6, 2, now_hour, 30);
            let next = next_occurrence(now, time(hour, minute));
            prop_assert_eq!(next.time(), time(hour, minute).as_naive());
        }

        #[test]
        fn next_occurrence_is_within_a_day(
            now_hour in 0u32..24,
            now_minute in 0u32..60,
            hour in 0u32..24,
            minute in 0u32..60,
        ) {
            let now = local(2025, 6, 2, now_hour, now_minute);
            let next = next_occurrence(now, time(hour, minute));
            // A 25h bound keeps this robust across DST fall-back days.
            prop_assert!(next - now <= chrono::Duration::hours(25));
        }
    }
}
