//! table.rs
//!
//! Static holiday table keyed by date, loadable from a text file with one
//! `YYYY-MM-DD: name` entry per line (the layout of the holiday_jp data
//! files). Blank lines and lines starting with `#` are skipped.

use std::collections::BTreeMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use super::{Holiday, HolidaySource};
use crate::date::CalendarDate;
use crate::error::{KoyomiError, Result};
use crate::fileio::do_read;

static HOLIDAY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})\s*:\s*(.*?)\s*$").expect("holiday line pattern is valid")
});

/// A fixed set of holidays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayTable {
    entries: BTreeMap<CalendarDate, String>,
}

impl HolidayTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the holiday on `date`.
    pub fn insert(&mut self, date: CalendarDate, name: &str) {
        self.entries.insert(date, name.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses table lines.
    ///
    /// ```
    /// # use koyomi::holiday::{HolidaySource, HolidayTable};
    /// let table = HolidayTable::from_lines(["# 2024", "2024-01-01: 元日", ""]).unwrap();
    /// assert_eq!(table.lookup("2024-01-01").as_deref(), Some("元日"));
    /// ```
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for (index, line) in lines.into_iter().enumerate() {
            let line = line.as_ref().trim_start_matches('\u{feff}').trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let bad_line = || KoyomiError::HolidayLine {
                line: index + 1,
                text: line.to_string(),
            };
            let caps = HOLIDAY_LINE.captures(line).ok_or_else(bad_line)?;
            let date: CalendarDate = caps[1].parse().map_err(|_| bad_line())?;
            table.insert(date, &caps[2]);
        }
        Ok(table)
    }

    /// Reads a holiday table file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let table = Self::from_lines(do_read(path)?)?;
        info!(path = %path.display(), entries = table.len(), "loaded holiday table");
        Ok(table)
    }

    /// Table lines in file order.
    pub fn to_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(date, name)| format!("{date}: {name}"))
            .collect()
    }
}

impl FromIterator<Holiday> for HolidayTable {
    fn from_iter<I: IntoIterator<Item = Holiday>>(iter: I) -> Self {
        let entries = iter.into_iter().map(|h| (h.date, h.name)).collect();
        Self { entries }
    }
}

impl HolidaySource for HolidayTable {
    fn lookup(&self, key: &str) -> Option<String> {
        let date: CalendarDate = key.parse().ok()?;
        self.entries.get(&date).cloned()
    }

    fn between(&self, start: CalendarDate, end: CalendarDate) -> Vec<Holiday> {
        if end < start {
            return Vec::new();
        }
        self.entries
            .range(start..=end)
            .map(|(date, name)| Holiday {
                date: *date,
                name: name.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::holiday::JapaneseHolidays;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    fn rules_snapshot(from: i32, to: i32) -> HolidayTable {
        JapaneseHolidays
            .between(date(from, 1, 1), date(to, 12, 31))
            .into_iter()
            .collect()
    }

    #[test]
    fn test_parse_lines() {
        let table = HolidayTable::from_lines([
            "\u{feff}# holidays",
            "2024-01-01: 元日",
            "2024-02-12 :  建国記念の日 振替休日  ",
        ]);
        let table = table.unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.lookup("2024-02-12").as_deref(),
            Some("建国記念の日 振替休日")
        );
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let err = HolidayTable::from_lines(["2024-01-01: 元日", "January 8th"]).unwrap_err();
        assert!(matches!(err, KoyomiError::HolidayLine { line: 2, .. }));
        let err = HolidayTable::from_lines(["2023-02-29: nope"]).unwrap_err();
        assert!(matches!(err, KoyomiError::HolidayLine { line: 1, .. }));
    }

    #[test]
    fn test_between_is_inclusive() {
        let table = rules_snapshot(2024, 2024);
        let may = table.between(date(2024, 5, 3), date(2024, 5, 6));
        let names: Vec<_> = may.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["憲法記念日", "みどりの日", "こどもの日", "こどもの日 振替休日"]);
    }

    #[test]
    fn test_rules_snapshot_round_trips_through_lines() {
        let table = rules_snapshot(2023, 2024);
        let reparsed = HolidayTable::from_lines(table.to_lines()).unwrap();
        assert_eq!(reparsed, table);
    }
}
