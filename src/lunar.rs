//! lunar.rs
//!
//! Solar-to-lunar conversion for the traditional lunisolar calendar, and the
//! 24 solar terms (二十四節気).
//!
//! # Overview
//!
//! - **`LunarConverter`**: the conversion seam used by the rest of the crate.
//! - **`ChineseLunisolar`**: table-driven converter for 1900-01-31 ..= 2100-12-31.
//! - **`solar_term(date)`**: the solar term starting on `date`, if any.
//!
//! The month-length table packs one lunar year per entry:
//!
//! - bits 0..4: the leap month (0 = no leap month);
//! - bits 4..16: month lengths for months 12 down to 1 (1 = 30 days, 0 = 29);
//! - bit 16: length of the leap month (1 = 30 days).

use std::fmt;

use serde::Serialize;

use crate::date::CalendarDate;

/// Lunar year data, 1900 ..= 2100.
const LUNAR_INFO: [u32; 201] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050
    0x0a2e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090
    0x0d520, // 2100
];

const FIRST_LUNAR_YEAR: i32 = 1900;
const LAST_LUNAR_YEAR: i32 = 2100;

/// Century constants for the solar-term formula, 1901 ..= 1999.
const TERM_C20: [f64; 24] = [
    6.11, 20.84, 4.6295, 19.4599, 6.3826, 21.4155, 5.59, 20.888, 6.318, 21.86, 6.5, 22.2, 7.928,
    23.65, 8.35, 23.95, 8.44, 23.822, 9.098, 24.218, 8.218, 23.08, 7.9, 22.6,
];

/// Century constants for the solar-term formula, 2000 ..= 2100.
const TERM_C21: [f64; 24] = [
    5.4055, 20.12, 3.87, 18.73, 5.63, 20.646, 4.81, 20.1, 5.52, 21.04, 5.678, 21.37, 7.108, 22.83,
    7.5, 23.13, 7.646, 23.042, 8.318, 23.438, 7.438, 22.36, 7.18, 21.94,
];

/// Years where the formula is off by one day: (year, term index, correction).
const TERM_CORRECTIONS: [(i32, usize, i32); 19] = [
    (1902, 10, 1),
    (1911, 8, 1),
    (1918, 23, -1),
    (1922, 13, 1),
    (1925, 12, 1),
    (1927, 16, 1),
    (1928, 11, 1),
    (1942, 17, 1),
    (1954, 22, 1),
    (1978, 21, 1),
    (1982, 0, 1),
    (2002, 14, 1),
    (2008, 9, 1),
    (2016, 12, 1),
    (2019, 0, -1),
    (2021, 23, -1),
    (2026, 3, -1),
    (2082, 1, 1),
    (2084, 5, 1),
];

/// One of the 24 solar terms, in calendar order starting from 小寒.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SolarTerm {
    Shokan,
    Daikan,
    Risshun,
    Usui,
    Keichitsu,
    Shunbun,
    Seimei,
    Kokuu,
    Rikka,
    Shoman,
    Boshu,
    Geshi,
    Shosho,
    Taisho,
    Risshu,
    Shosho2,
    Hakuro,
    Shubun,
    Kanro,
    Soko,
    Ritto,
    Shosetsu,
    Taisetsu,
    Toji,
}

const SOLAR_TERMS: [SolarTerm; 24] = [
    SolarTerm::Shokan,
    SolarTerm::Daikan,
    SolarTerm::Risshun,
    SolarTerm::Usui,
    SolarTerm::Keichitsu,
    SolarTerm::Shunbun,
    SolarTerm::Seimei,
    SolarTerm::Kokuu,
    SolarTerm::Rikka,
    SolarTerm::Shoman,
    SolarTerm::Boshu,
    SolarTerm::Geshi,
    SolarTerm::Shosho,
    SolarTerm::Taisho,
    SolarTerm::Risshu,
    SolarTerm::Shosho2,
    SolarTerm::Hakuro,
    SolarTerm::Shubun,
    SolarTerm::Kanro,
    SolarTerm::Soko,
    SolarTerm::Ritto,
    SolarTerm::Shosetsu,
    SolarTerm::Taisetsu,
    SolarTerm::Toji,
];

const SOLAR_TERM_NAMES: [&str; 24] = [
    "小寒", "大寒", "立春", "雨水", "啓蟄", "春分", "清明", "穀雨", "立夏", "小満", "芒種", "夏至",
    "小暑", "大暑", "立秋", "処暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至",
];

impl SolarTerm {
    /// Position in the year, 0 = 小寒 … 23 = 冬至.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        SOLAR_TERM_NAMES[self.index()]
    }

    /// Solar month in which the term falls.
    pub fn month(self) -> u32 {
        self.index() as u32 / 2 + 1
    }
}

impl fmt::Display for SolarTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Day of month on which solar term `index` starts in `year`.
///
/// Returns `None` outside 1901 ..= 2100.
pub fn solar_term_day(year: i32, index: usize) -> Option<u32> {
    if !(1901..=2100).contains(&year) || index >= 24 {
        return None;
    }
    let (y, constants) = if year >= 2000 {
        (year - 2000, &TERM_C21)
    } else {
        (year - 1900, &TERM_C20)
    };
    // 小寒 … 雨水 fall before the leap day of their own year.
    let leap_days = if index < 4 {
        (y - 1).div_euclid(4)
    } else {
        y.div_euclid(4)
    };
    let base = (y as f64 * 0.2422 + constants[index]).floor() as i32 - leap_days;
    let correction = TERM_CORRECTIONS
        .iter()
        .find(|(cy, ci, _)| *cy == year && *ci == index)
        .map_or(0, |(_, _, c)| *c);
    u32::try_from(base + correction).ok()
}

/// The solar term that starts on `date`, if any.
///
/// ```
/// # use koyomi::date::CalendarDate;
/// # use koyomi::lunar::{solar_term, SolarTerm};
/// let date = CalendarDate::new(2024, 3, 20).unwrap();
/// assert_eq!(solar_term(date), Some(SolarTerm::Shunbun));
/// assert_eq!(solar_term(CalendarDate::new(2024, 3, 21).unwrap()), None);
/// ```
pub fn solar_term(date: CalendarDate) -> Option<SolarTerm> {
    let first = (date.month() as usize - 1) * 2;
    (first..first + 2)
        .find(|&index| solar_term_day(date.year(), index) == Some(date.day()))
        .map(|index| SOLAR_TERMS[index])
}

/// A date in the lunisolar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// `true` for days of an intercalary (閏) month.
    pub is_leap_month: bool,
    /// Solar term starting on the converted solar date.
    pub term: Option<SolarTerm>,
}

/// Converts solar dates to lunar dates.
pub trait LunarConverter {
    /// Returns `None` when the date is outside the converter's data.
    fn solar_to_lunar(&self, date: CalendarDate) -> Option<LunarDate>;
}

/// Table-driven converter covering 1900-01-31 ..= 2100-12-31.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChineseLunisolar;

impl ChineseLunisolar {
    /// Solar date of lunar 1900-01-01.
    fn epoch() -> Option<CalendarDate> {
        CalendarDate::new(FIRST_LUNAR_YEAR, 1, 31).ok()
    }
}

fn year_info(year: i32) -> u32 {
    LUNAR_INFO[(year - FIRST_LUNAR_YEAR) as usize]
}

/// Intercalary month of `year`, 0 if none.
pub fn leap_month(year: i32) -> u32 {
    year_info(year) & 0xf
}

fn leap_month_days(year: i32) -> u32 {
    if leap_month(year) == 0 {
        0
    } else if year_info(year) & 0x10000 != 0 {
        30
    } else {
        29
    }
}

/// Length of regular month `month` (1..=12) of lunar `year`.
pub fn lunar_month_days(year: i32, month: u32) -> u32 {
    if year_info(year) & (0x10000 >> month) != 0 {
        30
    } else {
        29
    }
}

/// Number of days in lunar `year`, leap month included.
pub fn lunar_year_days(year: i32) -> u32 {
    (1..=12).map(|m| lunar_month_days(year, m)).sum::<u32>() + leap_month_days(year)
}

impl LunarConverter for ChineseLunisolar {
    fn solar_to_lunar(&self, date: CalendarDate) -> Option<LunarDate> {
        if date.year() > LAST_LUNAR_YEAR {
            return None;
        }
        let mut offset = u32::try_from(date.days_since(Self::epoch()?)).ok()?;

        let mut year = FIRST_LUNAR_YEAR;
        loop {
            if year > LAST_LUNAR_YEAR {
                return None;
            }
            let days = lunar_year_days(year);
            if offset < days {
                break;
            }
            offset -= days;
            year += 1;
        }

        let leap = leap_month(year);
        let lunar = |month, day, is_leap_month| LunarDate {
            year,
            month,
            day,
            is_leap_month,
            term: solar_term(date),
        };
        for month in 1..=12 {
            let days = lunar_month_days(year, month);
            if offset < days {
                return Some(lunar(month, offset + 1, false));
            }
            offset -= days;
            if month == leap {
                let days = leap_month_days(year);
                if offset < days {
                    return Some(lunar(month, offset + 1, true));
                }
                offset -= days;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    fn lunar(y: i32, m: u32, d: u32) -> (i32, u32, u32, bool) {
        let l = ChineseLunisolar.solar_to_lunar(date(y, m, d)).unwrap();
        (l.year, l.month, l.day, l.is_leap_month)
    }

    #[test]
    fn test_lunar_new_years() {
        assert_eq!(lunar(1970, 2, 6), (1970, 1, 1, false));
        assert_eq!(lunar(1990, 1, 27), (1990, 1, 1, false));
        assert_eq!(lunar(2000, 2, 5), (2000, 1, 1, false));
        assert_eq!(lunar(2023, 1, 22), (2023, 1, 1, false));
        assert_eq!(lunar(2024, 2, 10), (2024, 1, 1, false));
        assert_eq!(lunar(2050, 1, 23), (2050, 1, 1, false));
    }

    #[test]
    fn test_day_before_new_year() {
        assert_eq!(lunar(2024, 2, 9), (2023, 12, 30, false));
    }

    #[test]
    fn test_leap_months() {
        // 2023 has a leap second month, 2025 a leap sixth month
        assert_eq!(lunar(2023, 3, 22), (2023, 2, 1, true));
        assert_eq!(lunar(2023, 4, 20), (2023, 3, 1, false));
        assert_eq!(lunar(2025, 7, 25), (2025, 6, 1, true));
        assert_eq!(lunar(2025, 8, 23), (2025, 7, 1, false));
    }

    #[test]
    fn test_epoch_and_range() {
        assert_eq!(lunar(1900, 1, 31), (1900, 1, 1, false));
        assert!(ChineseLunisolar.solar_to_lunar(date(1900, 1, 30)).is_none());
        assert!(ChineseLunisolar.solar_to_lunar(date(2100, 12, 31)).is_some());
        assert!(ChineseLunisolar.solar_to_lunar(date(2101, 1, 1)).is_none());
    }

    #[test]
    fn test_lunar_days_are_in_range() {
        let mut d = date(1970, 1, 1);
        while d.year() <= 2050 {
            let l = ChineseLunisolar.solar_to_lunar(d).unwrap();
            assert!((1..=12).contains(&l.month), "{d}");
            assert!((1..=30).contains(&l.day), "{d}");
            d = d.succ().unwrap();
        }
    }

    #[test]
    fn test_solar_terms() {
        assert_eq!(solar_term(date(2024, 2, 4)), Some(SolarTerm::Risshun));
        assert_eq!(solar_term(date(2024, 6, 21)), Some(SolarTerm::Geshi));
        assert_eq!(solar_term(date(2024, 9, 22)), Some(SolarTerm::Shubun));
        assert_eq!(solar_term(date(2024, 12, 21)), Some(SolarTerm::Toji));
        assert_eq!(solar_term(date(2023, 3, 21)), Some(SolarTerm::Shunbun));
        assert_eq!(solar_term(date(2023, 12, 22)), Some(SolarTerm::Toji));
        assert_eq!(solar_term(date(2024, 2, 5)), None);
    }

    #[test]
    fn test_solar_term_corrections() {
        assert_eq!(solar_term(date(2019, 1, 5)), Some(SolarTerm::Shokan));
        assert_eq!(solar_term(date(2021, 12, 21)), Some(SolarTerm::Toji));
        assert_eq!(solar_term(date(2026, 2, 18)), Some(SolarTerm::Usui));
    }

    #[test]
    fn test_every_month_has_two_terms() {
        for year in [1970, 1999, 2000, 2024, 2050] {
            for month in 1..=12 {
                let count = (1..=crate::date::days_in_month(year, month))
                    .filter(|&d| solar_term(date(year, month, d)).is_some())
                    .count();
                assert_eq!(count, 2, "{year}-{month}");
            }
        }
    }

    #[test]
    fn test_term_is_reported_with_lunar_date() {
        let l = ChineseLunisolar.solar_to_lunar(date(2024, 2, 4)).unwrap();
        assert_eq!(l.term.map(SolarTerm::name), Some("立春"));
        assert_eq!(SolarTerm::Risshun.month(), 2);
    }
}
