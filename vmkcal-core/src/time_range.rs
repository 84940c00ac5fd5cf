//! Interpretation of free-text time ranges such as `6:00 PM - 7:00 PM`.

use std::sync::LazyLock;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

static TIME_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*([0-9]{1,2}):([0-9]{2})\s*([AP]M)\s*-\s*([0-9]{1,2}):([0-9]{2})\s*([AP]M)\s*$",
    )
    .expect("time range pattern is valid")
});

/// Turn `text` into a start/end pair on `date`.
///
/// A `H:MM AM - H:MM PM` range gives those wall-clock times, with the end
/// moved to the next day when it is not after the start. Anything else,
/// including an empty string or a single time, is an all-day event.
pub fn interpret(text: &str, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    match parse_range(text) {
        Some((start_time, end_time)) => {
            let start = date.and_time(start_time);
            let mut end = date.and_time(end_time);
            if end <= start {
                end += Duration::days(1);
            }
            (start, end)
        }
        None => all_day(date),
    }
}

/// The all-day span of `date`: 00:00:00 to 23:59:00.
pub fn all_day(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(NaiveTime::MIN);
    (start, start + Duration::hours(23) + Duration::minutes(59))
}

/// Parse both ends of a time range into 24-hour times.
pub fn parse_range(text: &str) -> Option<(NaiveTime, NaiveTime)> {
    let caps = TIME_RANGE_RE.captures(text)?;
    let start = to_24h(&caps[1], &caps[2], &caps[3])?;
    let end = to_24h(&caps[4], &caps[5], &caps[6])?;
    Some((start, end))
}

/// Convert a 12-hour clock reading. Hours outside 1-12 or minutes past 59
/// are rejected.
fn to_24h(hour: &str, minute: &str, meridiem: &str) -> Option<NaiveTime> {
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }
    let pm = meridiem.eq_ignore_ascii_case("pm");
    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn test_evening_range() {
        let (start, end) = interpret("6:00 PM - 7:00 PM", date(2025, 10, 15));
        assert_eq!(start, at(2025, 10, 15, 18, 0));
        assert_eq!(end, at(2025, 10, 15, 19, 0));
    }

    #[test]
    fn test_range_crossing_midnight_rolls_end_to_next_day() {
        let (start, end) = interpret("11:30 PM - 12:30 AM", date(2025, 10, 15));
        assert_eq!(start, at(2025, 10, 15, 23, 30));
        assert_eq!(end, at(2025, 10, 16, 0, 30));
    }

    #[test]
    fn test_equal_start_and_end_is_a_full_day() {
        let (start, end) = interpret("9:00 AM - 9:00 AM", date(2025, 10, 31));
        assert_eq!(start, at(2025, 10, 31, 9, 0));
        assert_eq!(end, at(2025, 11, 1, 9, 0));
    }

    #[test]
    fn test_loose_spacing_and_case() {
        let (start, end) = interpret("  7:05pm-10:45 Pm ", date(2025, 1, 2));
        assert_eq!(start, at(2025, 1, 2, 19, 5));
        assert_eq!(end, at(2025, 1, 2, 22, 45));
    }

    #[test]
    fn test_noon_and_midnight_readings() {
        let (start, end) = interpret("12:00 AM - 12:15 PM", date(2025, 3, 1));
        assert_eq!(start, at(2025, 3, 1, 0, 0));
        assert_eq!(end, at(2025, 3, 1, 12, 15));
    }

    #[test]
    fn test_unmatched_text_is_all_day() {
        let day = date(2025, 10, 15);
        for text in [
            "",
            "All day",
            "6:00 PM",
            "6 PM - 7 PM",
            "6:0 PM - 7:00 PM",
            "18:00 - 19:00",
            "starts 6:00 PM - 7:00 PM",
            "13:00 PM - 2:00 PM",
            "6:75 PM - 7:00 PM",
        ] {
            let (start, end) = interpret(text, day);
            assert_eq!(start, at(2025, 10, 15, 0, 0), "text: {:?}", text);
            assert_eq!(end, at(2025, 10, 15, 23, 59), "text: {:?}", text);
        }
    }

    #[test]
    fn test_every_matched_range_ends_after_start_and_reparses() {
        let day = date(2025, 6, 30);
        for sh in 1..=12 {
            for eh in 1..=12 {
                for (sm, em) in [("AM", "AM"), ("AM", "PM"), ("PM", "AM"), ("PM", "PM")] {
                    let text = format!("{}:30 {} - {}:00 {}", sh, sm, eh, em);
                    let (start, end) = interpret(&text, day);
                    assert!(start < end, "{}", text);

                    let (parsed_start, parsed_end) = parse_range(&text).unwrap();
                    assert_eq!(
                        (start.hour(), start.minute()),
                        (parsed_start.hour(), parsed_start.minute())
                    );
                    assert_eq!(
                        (end.hour(), end.minute()),
                        (parsed_end.hour(), parsed_end.minute())
                    );
                }
            }
        }
    }
}
