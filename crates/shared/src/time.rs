//! Calendar and time-window helpers.
//!
//! All helpers take the reference instant as a parameter so callers (and
//! tests) control the clock.

use chrono::{DateTime, Datelike, Utc};

/// Whole days elapsed between `then` and `now`. Partial days truncate.
pub fn days_since(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - then).num_days()
}

/// Whether two instants fall in the same calendar month (month + year
/// equality on the stored timestamps, not a rolling window).
pub fn same_calendar_month(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Calendar period key for monthly counters, e.g. "2026-08".
pub fn month_key(ts: DateTime<Utc>) -> String {
    format!("{:04}-{:02}", ts.year(), ts.month())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_days_since_truncates_partial_days() {
        let then = at(2026, 3, 1, 12);
        assert_eq!(days_since(then, at(2026, 3, 16, 11)), 14);
        assert_eq!(days_since(then, at(2026, 3, 16, 12)), 15);
        assert_eq!(days_since(then, at(2026, 3, 16, 13)), 15);
    }

    #[test]
    fn test_same_calendar_month() {
        assert!(same_calendar_month(at(2026, 5, 1, 0), at(2026, 5, 31, 23)));
        assert!(!same_calendar_month(at(2026, 5, 31, 23), at(2026, 6, 1, 0)));
        // Same month number, different year
        assert!(!same_calendar_month(at(2025, 5, 10, 0), at(2026, 5, 10, 0)));
    }

    #[test]
    fn test_month_key_zero_pads() {
        assert_eq!(month_key(at(2026, 8, 6, 0)), "2026-08");
        assert_eq!(month_key(at(2026, 11, 1, 0)), "2026-11");
    }
}
