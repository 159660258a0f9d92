// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Calendar date of `now` in UTC.
pub fn utc_today(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}

/// Zero-based month index (January = 0), matching the catalogue month filter.
pub fn month_index(date: DateTime<Utc>) -> u32 {
    date.month0()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_utc_today_uses_utc_calendar_day() {
        let late = Utc.with_ymd_and_hms(2026, 6, 1, 23, 59, 59).unwrap();
        assert_eq!(utc_today(late), NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
    }

    #[test]
    fn test_month_index_is_zero_based() {
        let date = Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(month_index(date), 0);
        let date = Utc.with_ymd_and_hms(2026, 12, 15, 0, 0, 0).unwrap();
        assert_eq!(month_index(date), 11);
    }
}
