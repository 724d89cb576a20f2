//! controller.rs
//!
//! Navigation state of the calendar view.
//!
//! # Overview
//!
//! [`CalendarController`] owns the displayed `(year, month)`, the selected
//! date and the [`Koyomi`] context. Its transitions mirror the controls of
//! a calendar view:
//!
//! - **`prev_month` / `next_month` / `change_month`**: step through months,
//!   wrapping at year boundaries. Stepping below January of `min_year` lands
//!   on January of `min_year`; there is no upper bound.
//! - **`select_year` / `select_month`**: the year and month selectors.
//! - **`jump_to_today`**: the "today" button.
//! - **`jump_to_holiday`**: the holiday picker; its placeholder (`0`) is a
//!   no-op.
//! - **`select_day`**: clicking a day cell. Only the detail panel changes.
//!
//! Every transition that changes the displayed month rebuilds the grid and
//! the holiday picker, and resets the selection to today.

use std::ops::RangeInclusive;

use chrono::NaiveTime;
use serde::Serialize;
use tracing::debug;

use crate::calendar::{build_month_grid, compose_detail, DetailPanel, Koyomi, MonthGrid};
use crate::date::{shift_month, CalendarDate};
use crate::error::{KoyomiError, Result};
use crate::holiday::{unique_holidays_for_year, HolidayPick, HolidaySource};
use crate::lunar::LunarConverter;
use crate::setup::KoyomiConfig;

/// Snapshot of everything the calendar shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarView {
    pub year: i32,
    pub month: u32,
    pub today: CalendarDate,
    pub selected: CalendarDate,
    pub grid: MonthGrid,
    pub holidays: Vec<HolidayPick>,
    pub detail: DetailPanel,
}

pub struct CalendarController<S, L> {
    koyomi: Koyomi<S, L>,
    config: KoyomiConfig,
    year: i32,
    month: u32,
    selected: CalendarDate,
    grid: MonthGrid,
    holidays: Vec<HolidayPick>,
    detail: DetailPanel,
}

impl<S: HolidaySource, L: LunarConverter> CalendarController<S, L> {
    /// A controller showing the month of `koyomi.today()`.
    pub fn new(mut koyomi: Koyomi<S, L>, config: KoyomiConfig) -> Result<Self> {
        let today = koyomi.today();
        let grid = build_month_grid(&mut koyomi, today.year(), today.month())?;
        let holidays = unique_holidays_for_year(koyomi.holiday_source(), today.year());
        let detail = compose_detail(&mut koyomi, today, config.extended_details);
        Ok(CalendarController {
            koyomi,
            config,
            year: today.year(),
            month: today.month(),
            selected: today,
            grid,
            holidays,
            detail,
        })
    }

    pub fn config(&self) -> &KoyomiConfig {
        &self.config
    }

    pub fn koyomi(&self) -> &Koyomi<S, L> {
        &self.koyomi
    }

    /// Displayed `(year, month)`.
    pub fn displayed(&self) -> (i32, u32) {
        (self.year, self.month)
    }

    pub fn selected(&self) -> CalendarDate {
        self.selected
    }

    pub fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub fn holidays(&self) -> &[HolidayPick] {
        &self.holidays
    }

    pub fn detail(&self) -> &DetailPanel {
        &self.detail
    }

    pub fn view(&self) -> CalendarView {
        CalendarView {
            year: self.year,
            month: self.month,
            today: self.koyomi.today(),
            selected: self.selected,
            grid: self.grid.clone(),
            holidays: self.holidays.clone(),
            detail: self.detail.clone(),
        }
    }

    /// Values offered by the year selector.
    pub fn year_options(&self) -> RangeInclusive<i32> {
        self.config.min_year..=self.config.max_year
    }

    /// Moves the display by `delta` months.
    pub fn change_month(&mut self, delta: i32) -> Result<()> {
        let (mut year, mut month) = shift_month(self.year, self.month, delta);
        if year < self.config.min_year {
            year = self.config.min_year;
            month = 1;
        }
        self.show(year, month)
    }

    pub fn prev_month(&mut self) -> Result<()> {
        self.change_month(-1)
    }

    pub fn next_month(&mut self) -> Result<()> {
        self.change_month(1)
    }

    pub fn select_year(&mut self, year: i32) -> Result<()> {
        if !self.year_options().contains(&year) {
            return Err(KoyomiError::YearOutOfRange {
                year,
                min: self.config.min_year,
                max: self.config.max_year,
            });
        }
        self.show(year, self.month)
    }

    pub fn select_month(&mut self, month: u32) -> Result<()> {
        self.show(self.year, month)
    }

    /// Makes `today` the current date and displays its month.
    pub fn jump_to_today(&mut self, today: CalendarDate) -> Result<()> {
        self.koyomi.set_today(today);
        self.show(today.year(), today.month())
    }

    /// Displays `month` of the current year; `0` leaves everything as is.
    pub fn jump_to_holiday(&mut self, month: u32) -> Result<()> {
        if month == 0 {
            return Ok(());
        }
        self.show(self.year, month)
    }

    /// Selects `day` of the displayed month.
    pub fn select_day(&mut self, day: u32) -> Result<()> {
        let date = CalendarDate::new(self.year, self.month, day)?;
        debug!(%date, "select day");
        self.selected = date;
        self.detail = compose_detail(&mut self.koyomi, date, self.config.extended_details);
        Ok(())
    }

    fn show(&mut self, year: i32, month: u32) -> Result<()> {
        let grid = build_month_grid(&mut self.koyomi, year, month)?;
        if year != self.grid.year {
            self.holidays = unique_holidays_for_year(self.koyomi.holiday_source(), year);
        }
        debug!(year, month, "show month");
        self.year = year;
        self.month = month;
        self.grid = grid;
        self.selected = self.koyomi.today();
        self.detail = compose_detail(&mut self.koyomi, self.selected, self.config.extended_details);
        Ok(())
    }
}

/// `HH:MM:SS` text of the clock.
///
/// ```
/// # use chrono::NaiveTime;
/// # use koyomi::controller::clock_text;
/// let time = NaiveTime::from_hms_opt(9, 5, 3).unwrap();
/// assert_eq!(clock_text(time), "09:05:03");
/// ```
pub fn clock_text(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}
