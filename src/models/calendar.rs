//! Calendar period model.
//!
//! Maps a date to its month-relative week and paycheck period, and parses
//! `YYYY-MM-DD` strings by numeric decomposition (no locale or time zone is
//! ever involved, so a date string can never shift by a day).
//!
//! # Periods
//!
//! | Day of month | Week of month | Paycheck period |
//! |--------------|---------------|-----------------|
//! | 1-7          | 1             | 1               |
//! | 8-14         | 2             | 1               |
//! | 15-21        | 3             | 2               |
//! | 22-31        | 4             | 2               |
//!
//! Periods are month-relative, not ISO weeks: two dates compare as "same
//! week" whenever their week-of-month values are equal.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{Result, ScheduleError};

/// Parses a canonical `YYYY-MM-DD` date string.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    let mut parts = trimmed.split('-');
    let (Some(y), Some(m), Some(d), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ScheduleError::invalid_date(value));
    };

    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !(numeric(y) && numeric(m) && numeric(d)) {
        return Err(ScheduleError::invalid_date(value));
    }

    let year: i32 = y.parse().map_err(|_| ScheduleError::invalid_date(value))?;
    let month: u32 = m.parse().map_err(|_| ScheduleError::invalid_date(value))?;
    let day: u32 = d.parse().map_err(|_| ScheduleError::invalid_date(value))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| ScheduleError::invalid_date(value))
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Week index within the month: `ceil(day / 7)`, clamped to 1..=4.
#[inline]
pub fn week_of_month(date: NaiveDate) -> u32 {
    date.day().div_ceil(7).clamp(1, 4)
}

/// Paycheck period: weeks 1-2 are period 1, weeks 3-4 are period 2.
#[inline]
pub fn paycheck_period(date: NaiveDate) -> u32 {
    if week_of_month(date) <= 2 {
        1
    } else {
        2
    }
}

/// Whether two dates share a week-of-month value.
pub fn same_week(a: NaiveDate, b: NaiveDate) -> bool {
    week_of_month(a) == week_of_month(b)
}

/// Whether two dates share a paycheck period.
pub fn same_paycheck_period(a: NaiveDate, b: NaiveDate) -> bool {
    paycheck_period(a) == paycheck_period(b)
}

/// Whether two dates fall in the same calendar month of the same year.
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Saturday or Sunday.
#[inline]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Absolute number of calendar days separating two dates.
#[inline]
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().abs()
}

#[cfg(test)]
pub(crate) fn date(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}
