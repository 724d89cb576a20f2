//! calendar.rs
//!
//! The calendar context shared by the grid builder, the detail composer and
//! the controller.
//!
//! [`Koyomi`] bundles the two collaborators, a [`HolidaySource`] behind a
//! cached [`HolidayLookup`] and a [`LunarConverter`], together with the date
//! treated as "today".

pub mod detail;
pub mod grid;

use crate::date::CalendarDate;
use crate::holiday::{HolidayInfo, HolidayLookup, HolidaySource, JapaneseHolidays};
use crate::lunar::{ChineseLunisolar, LunarConverter, LunarDate};
use crate::rokuyo::{six_day_label, Rokuyo};

pub use detail::{compose_detail, kanji_day_label, DetailPanel};
pub use grid::{build_month_grid, DayCell, DayEntry, MonthGrid};

/// Holiday and lunar data for one calendar session.
pub struct Koyomi<S, L> {
    holidays: HolidayLookup<S>,
    lunar: L,
    today: CalendarDate,
}

impl Koyomi<JapaneseHolidays, ChineseLunisolar> {
    /// Built-in holiday rules and the table-driven lunar converter.
    pub fn japanese() -> Self {
        Koyomi::new(JapaneseHolidays, ChineseLunisolar)
    }
}

impl<S: HolidaySource, L: LunarConverter> Koyomi<S, L> {
    /// A context whose "today" is the local date.
    pub fn new(source: S, lunar: L) -> Self {
        Koyomi::with_today(source, lunar, CalendarDate::today())
    }

    pub fn with_today(source: S, lunar: L, today: CalendarDate) -> Self {
        Koyomi {
            holidays: HolidayLookup::new(source),
            lunar,
            today,
        }
    }

    pub fn today(&self) -> CalendarDate {
        self.today
    }

    pub fn set_today(&mut self, today: CalendarDate) {
        self.today = today;
    }

    pub fn holiday(&mut self, date: CalendarDate) -> HolidayInfo {
        self.holidays.info(date)
    }

    pub fn holiday_source(&self) -> &S {
        self.holidays.source()
    }

    pub fn lunar_date(&self, date: CalendarDate) -> Option<LunarDate> {
        self.lunar.solar_to_lunar(date)
    }

    pub fn six_day(&self, date: CalendarDate) -> Option<Rokuyo> {
        six_day_label(&self.lunar, date)
    }

    /// Number of dates with a cached holiday result.
    pub fn cached_dates(&self) -> usize {
        self.holidays.cached()
    }

    pub fn clear_caches(&mut self) {
        self.holidays.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_caches_holidays() {
        let today = CalendarDate::new(2024, 5, 3).unwrap();
        let mut koyomi = Koyomi::with_today(JapaneseHolidays, ChineseLunisolar, today);
        assert_eq!(koyomi.holiday(today).name.as_deref(), Some("憲法記念日"));
        assert_eq!(koyomi.cached_dates(), 1);
        koyomi.clear_caches();
        assert_eq!(koyomi.cached_dates(), 0);
    }

    #[test]
    fn test_context_lunar_lookups() {
        let koyomi = Koyomi::japanese();
        let new_year = CalendarDate::new(2024, 2, 10).unwrap();
        let lunar = koyomi.lunar_date(new_year).unwrap();
        assert_eq!((lunar.month, lunar.day), (1, 1));
        assert_eq!(koyomi.six_day(new_year), Some(Rokuyo::Sensho));
    }
}
