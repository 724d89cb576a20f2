//! grid.rs
//!
//! Month grid of the calendar view.
//!
//! A grid is Sunday-first: it starts with one blank cell per weekday before
//! the 1st, followed by one cell per day of the month. Each day carries the
//! label shown under its number: the short holiday name on holidays, the
//! six-day (六曜) name otherwise.

use serde::Serialize;
use tracing::debug;

use super::Koyomi;
use crate::date::{day_of_week, days_in_month, CalendarDate};
use crate::error::{KoyomiError, Result};
use crate::holiday::{holiday_short_name, HolidaySource};
use crate::lunar::LunarConverter;

/// A day of the displayed month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayEntry {
    pub day: u32,
    pub date: CalendarDate,
    /// Short holiday name, or the six-day name; empty when neither exists.
    pub label: String,
    pub is_holiday: bool,
    pub is_today: bool,
}

/// A cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DayCell {
    Blank,
    Day(DayEntry),
}

impl DayCell {
    pub fn entry(&self) -> Option<&DayEntry> {
        match self {
            DayCell::Blank => None,
            DayCell::Day(entry) => Some(entry),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|cell| matches!(cell, DayCell::Blank))
            .count()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayEntry> {
        self.cells.iter().filter_map(DayCell::entry)
    }

    /// Rows of seven cells; the last row may be shorter.
    pub fn weeks(&self) -> std::slice::Chunks<'_, DayCell> {
        self.cells.chunks(7)
    }
}

/// Builds the grid of `month` in `year`.
///
/// ```
/// # use koyomi::calendar::{build_month_grid, Koyomi};
/// let mut koyomi = Koyomi::japanese();
/// let grid = build_month_grid(&mut koyomi, 2024, 2).unwrap();
/// assert_eq!(grid.leading_blanks(), 4);
/// assert_eq!(grid.days().count(), 29);
/// ```
pub fn build_month_grid<S, L>(koyomi: &mut Koyomi<S, L>, year: i32, month: u32) -> Result<MonthGrid>
where
    S: HolidaySource,
    L: LunarConverter,
{
    if !(1..=12).contains(&month) {
        return Err(KoyomiError::InvalidMonth(month));
    }
    CalendarDate::new(year, month, 1)?;
    let blanks = day_of_week(year, month, 1) as usize;
    let length = days_in_month(year, month);
    let today = koyomi.today();

    let mut cells = Vec::with_capacity(blanks + length as usize);
    cells.extend((0..blanks).map(|_| DayCell::Blank));
    for day in 1..=length {
        let date = CalendarDate::new(year, month, day)?;
        let holiday = koyomi.holiday(date);
        let label = match &holiday.name {
            Some(name) => holiday_short_name(name).to_string(),
            None => koyomi
                .six_day(date)
                .map(|r| r.name().to_string())
                .unwrap_or_default(),
        };
        cells.push(DayCell::Day(DayEntry {
            day,
            date,
            label,
            is_holiday: holiday.is_holiday(),
            is_today: date == today,
        }));
    }
    debug!(year, month, cells = cells.len(), "built month grid");

    Ok(MonthGrid { year, month, cells })
}
