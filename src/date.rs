//! date.rs
//!
//! Calendar dates and the small amount of Gregorian arithmetic the month
//! grid needs.
//!
//! # Overview
//!
//! - **`CalendarDate`**: a validated Gregorian date (wraps `chrono::NaiveDate`),
//!   displayed and parsed as `YYYY-MM-DD`.
//! - **`format_date(date)`**: the canonical `YYYY-MM-DD` key used for holiday lookups.
//! - **`DateFormatter`**: memoizing wrapper around `format_date`, owned by its caller.
//! - **`leap_year(year)`**: Gregorian leap-year rule.
//! - **`date_to_ydays(year, month, day)`**: 1-based day-of-year index.
//! - **`day_of_week(year, month, day)`**: 0 = Sunday, 1 = Monday, …, 6 = Saturday.
//! - **`days_in_month(year, month)`**: the last day of the month, i.e. "day 0" of the next one.
//! - **`shift_month(year, month, delta)`**: month arithmetic wrapping across years.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::error::{KoyomiError, Result};

/// Month lengths (index 1..12); index 0 is unused.
const MONTH_LENGTH: [u32; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days before the first of each month in a common year.
const MONTHS_CUMULATIVE: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

static DATE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("date key pattern is valid"));

/// A valid Gregorian calendar date.
///
/// ```
/// # use koyomi::date::CalendarDate;
/// let date = CalendarDate::new(2024, 2, 29).unwrap();
/// assert_eq!(date.to_string(), "2024-02-29");
/// assert_eq!(date.weekday(), 4); // Thursday
/// assert!(CalendarDate::new(2023, 2, 29).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Builds a date, rejecting month/day combinations that do not exist.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(KoyomiError::InvalidDate { year, month, day })
    }

    /// The current local date.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Day of week with 0 = Sunday.
    pub fn weekday(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    /// The following day, if representable.
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// The preceding day, if representable.
    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// Signed number of days from `other` to `self`.
    pub fn days_since(&self, other: CalendarDate) -> i64 {
        self.0.signed_duration_since(other.0).num_days()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for CalendarDate {
    type Err = KoyomiError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let caps = DATE_KEY
            .captures(trimmed)
            .ok_or_else(|| KoyomiError::InvalidFormat(trimmed.to_string()))?;
        let field = |i: usize| caps[i].parse::<u32>();
        match (field(1), field(2), field(3)) {
            (Ok(year), Ok(month), Ok(day)) => Self::new(year as i32, month, day),
            _ => Err(KoyomiError::InvalidFormat(trimmed.to_string())),
        }
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Renders `date` as `YYYY-MM-DD` with zero-padded month and day.
///
/// ```
/// # use koyomi::date::{format_date, CalendarDate};
/// let date = CalendarDate::new(2023, 1, 9).unwrap();
/// assert_eq!(format_date(date), "2023-01-09");
/// ```
pub fn format_date(date: CalendarDate) -> String {
    date.to_string()
}

/// Memoizing date formatter.
///
/// The cache lives as long as the formatter and only grows; call
/// [`DateFormatter::clear`] to drop it.
#[derive(Debug, Default)]
pub struct DateFormatter {
    cache: HashMap<CalendarDate, String>,
}

impl DateFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the `YYYY-MM-DD` key of `date`, computing it on first use.
    pub fn format(&mut self, date: CalendarDate) -> String {
        self.cache
            .entry(date)
            .or_insert_with(|| {
                trace!(%date, "formatting date key");
                format_date(date)
            })
            .clone()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Returns `true` if the given year is a leap year under the Gregorian rules.
///
/// ```
/// # use koyomi::date::leap_year;
/// assert!(leap_year(2000));  // divisible by 400
/// assert!(!leap_year(1900)); // divisible by 100 but not 400
/// assert!(leap_year(2024));
/// assert!(!leap_year(2023));
/// ```
pub fn leap_year(year: i32) -> bool {
    (year % 4 == 0) && ((year % 100 != 0) || (year % 400 == 0))
}

/// Converts a date to its day-of-year index (1-based).
///
/// ```
/// # use koyomi::date::date_to_ydays;
/// assert_eq!(date_to_ydays(2023, 1, 1), 1);
/// assert_eq!(date_to_ydays(2023, 12, 31), 365);
/// assert_eq!(date_to_ydays(2024, 3, 1), 61);
/// ```
pub fn date_to_ydays(year: i32, month: u32, day: u32) -> u32 {
    debug_assert!((1..=12).contains(&month));
    let mut days = MONTHS_CUMULATIVE[(month - 1) as usize] + day;
    if month > 2 && leap_year(year) {
        days += 1;
    }
    days
}

/// Day of week for a Gregorian date: 0 = Sunday … 6 = Saturday.
///
/// Counts the days elapsed since the proleptic year 0 and reduces mod 7.
///
/// ```
/// # use koyomi::date::day_of_week;
/// assert_eq!(day_of_week(2024, 2, 1), 4); // Thursday
/// assert_eq!(day_of_week(2023, 12, 25), 1); // Monday
/// ```
pub fn day_of_week(year: i32, month: u32, day: u32) -> u32 {
    let y = year as i64;
    let elapsed = y * 365 + (y - 1).div_euclid(4) - (y - 1).div_euclid(100)
        + (y - 1).div_euclid(400)
        - 1;
    let dow = (elapsed + date_to_ydays(year, month, day) as i64).rem_euclid(7);
    dow as u32
}

/// Number of days in `month` of `year`: the day before the first of the
/// following month.
///
/// ```
/// # use koyomi::date::days_in_month;
/// assert_eq!(days_in_month(2024, 2), 29);
/// assert_eq!(days_in_month(2023, 2), 28);
/// assert_eq!(days_in_month(2023, 12), 31);
/// ```
pub fn days_in_month(year: i32, month: u32) -> u32 {
    debug_assert!((1..=12).contains(&month));
    let (next_year, next_month) = shift_month(year, month, 1);
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or_else(|| {
            if month == 2 && leap_year(year) {
                29
            } else {
                MONTH_LENGTH[month as usize]
            }
        })
}

/// Moves `(year, month)` by `delta` months, wrapping across year boundaries.
///
/// ```
/// # use koyomi::date::shift_month;
/// assert_eq!(shift_month(2023, 12, 1), (2024, 1));
/// assert_eq!(shift_month(2024, 1, -1), (2023, 12));
/// assert_eq!(shift_month(2024, 5, -17), (2022, 12));
/// ```
///
/// Years past the `i32` range saturate.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let total = i64::from(year) * 12 + (i64::from(month) - 1) + i64::from(delta);
    let year = total.div_euclid(12).clamp(i64::from(i32::MIN), i64::from(i32::MAX));
    (year as i32, (total.rem_euclid(12) + 1) as u32)
}

/// The `n`-th (1-based) occurrence of `weekday` (0 = Sunday) in a month.
///
/// ```
/// # use koyomi::date::nth_weekday;
/// // second Monday of January 2024
/// assert_eq!(nth_weekday(2024, 1, 1, 2), 8);
/// ```
pub fn nth_weekday(year: i32, month: u32, weekday: u32, n: u32) -> u32 {
    let first = day_of_week(year, month, 1);
    1 + (weekday + 7 - first) % 7 + (n - 1) * 7
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn test_day_of_week_matches_chrono() {
        let mut d = date(1960, 1, 1);
        while d < date(2060, 1, 1) {
            assert_eq!(day_of_week(d.year(), d.month(), d.day()), d.weekday(), "{d}");
            d = d.succ().unwrap();
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
    }

    #[test]
    fn test_format_date_pads() {
        assert_eq!(format_date(date(1970, 1, 1)), "1970-01-01");
        assert_eq!(format_date(date(2050, 12, 31)), "2050-12-31");
    }

    #[test]
    fn test_formatter_is_idempotent_and_cached() {
        let mut formatter = DateFormatter::new();
        let d = date(2024, 7, 4);
        let first = formatter.format(d);
        let second = formatter.format(d);
        assert_eq!(first, second);
        assert_eq!(formatter.len(), 1);
        formatter.clear();
        assert!(formatter.is_empty());
        assert_eq!(formatter.format(d), first);
    }

    #[test]
    fn test_formatter_is_injective_over_a_year() {
        let mut formatter = DateFormatter::new();
        let mut seen = std::collections::HashSet::new();
        let mut d = date(2024, 1, 1);
        while d.year() == 2024 {
            assert!(seen.insert(formatter.format(d)));
            d = d.succ().unwrap();
        }
        assert_eq!(seen.len(), 366);
    }

    #[test]
    fn test_parse_date_key() {
        assert_eq!("2024-02-29".parse::<CalendarDate>().unwrap(), date(2024, 2, 29));
        assert_eq!(" 1999-12-31 ".parse::<CalendarDate>().unwrap(), date(1999, 12, 31));
        assert!(matches!(
            "2024-2-29".parse::<CalendarDate>(),
            Err(KoyomiError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2023-02-29".parse::<CalendarDate>(),
            Err(KoyomiError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_shift_month_wraps() {
        assert_eq!(shift_month(1970, 1, -1), (1969, 12));
        assert_eq!(shift_month(2049, 12, 13), (2051, 1));
        assert_eq!(shift_month(2024, 6, 0), (2024, 6));
        assert_eq!(shift_month(200_000_000, 1, 0), (200_000_000, 1));
        assert_eq!(shift_month(i32::MAX, 12, 1), (i32::MAX, 1));
        assert_eq!(shift_month(i32::MIN, 1, i32::MIN).0, i32::MIN);
    }

    #[test]
    fn test_nth_weekday() {
        // third Monday of September 2023 is the 18th
        assert_eq!(nth_weekday(2023, 9, 1, 3), 18);
        // second Monday of October 2024 is the 14th
        assert_eq!(nth_weekday(2024, 10, 1, 2), 14);
    }
}
