//! rules.rs
//!
//! Rule-based Japanese national holidays (国民の祝日), following the 祝日法
//! and its amendments up to the 2021 Olympic moves.
//!
//! Holidays are generated one Gregorian year at a time in three passes:
//!
//! 1. the national holidays proper, including the equinox days and one-off
//!    imperial ceremonies;
//! 2. substitute holidays (振替休日) for national holidays falling on a
//!    Sunday, from 1973-04-12;
//! 3. citizens' holidays (国民の休日) for days sandwiched between two
//!    national holidays, from 1986.
//!
//! Substitute holidays are named `"<holiday> 振替休日"`: the part before the
//! space groups them with the holiday they replace, the part after it is
//! what a day cell shows.

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use super::{Holiday, HolidaySource};
use crate::date::{nth_weekday, CalendarDate};

const MONDAY: u32 = 1;

pub const SUBSTITUTE_HOLIDAY: &str = "振替休日";
pub const CITIZENS_HOLIDAY: &str = "国民の休日";

/// One-off holidays set by special laws.
const SPECIAL_HOLIDAYS: [(i32, u32, u32, &str); 6] = [
    (1959, 4, 10, "皇太子明仁親王の結婚の儀"),
    (1989, 2, 24, "昭和天皇の大喪の礼"),
    (1990, 11, 12, "即位礼正殿の儀"),
    (1993, 6, 9, "皇太子徳仁親王の結婚の儀"),
    (2019, 5, 1, "天皇の即位の日"),
    (2019, 10, 22, "即位礼正殿の儀"),
];

/// Day of March of the vernal equinox, for 1900 ..= 2099.
///
/// ```
/// # use koyomi::holiday::rules::vernal_equinox_day;
/// assert_eq!(vernal_equinox_day(2024), Some(20));
/// assert_eq!(vernal_equinox_day(2023), Some(21));
/// ```
pub fn vernal_equinox_day(year: i32) -> Option<u32> {
    equinox_day(year, 20.8357, 20.8431)
}

/// Day of September of the autumnal equinox, for 1900 ..= 2099.
///
/// ```
/// # use koyomi::holiday::rules::autumnal_equinox_day;
/// assert_eq!(autumnal_equinox_day(2024), Some(22));
/// assert_eq!(autumnal_equinox_day(2023), Some(23));
/// ```
pub fn autumnal_equinox_day(year: i32) -> Option<u32> {
    equinox_day(year, 23.2588, 23.2488)
}

fn equinox_day(year: i32, before_1980: f64, from_1980: f64) -> Option<u32> {
    let shift = 0.242194 * (year - 1980) as f64;
    let day = match year {
        1900..=1979 => before_1980 + shift - ((year - 1983) / 4) as f64,
        1980..=2099 => from_1980 + shift - ((year - 1980) / 4) as f64,
        _ => return None,
    };
    Some(day.floor() as u32)
}

/// National holidays proper of `year` as `(month, day, name)`.
fn national_holidays(year: i32) -> Vec<(u32, u32, &'static str)> {
    let mut days = Vec::new();
    if year < 1948 {
        return days;
    }
    let mut add = |month: u32, day: u32, name: &'static str| days.push((month, day, name));

    if year >= 1949 {
        add(1, 1, "元日");
        add(1, if year < 2000 { 15 } else { nth_weekday(year, 1, MONDAY, 2) }, "成人の日");
        if year >= 1967 {
            add(2, 11, "建国記念の日");
        }
        match year {
            1949..=1988 => add(4, 29, "天皇誕生日"),
            2020.. => add(2, 23, "天皇誕生日"),
            _ => {}
        }
        if let Some(day) = vernal_equinox_day(year) {
            add(3, day, "春分の日");
        }
        match year {
            1989..=2006 => add(4, 29, "みどりの日"),
            2007.. => {
                add(4, 29, "昭和の日");
                add(5, 4, "みどりの日");
            }
            _ => {}
        }
        add(5, 3, "憲法記念日");
        add(5, 5, "こどもの日");
        match year {
            1996..=2002 => add(7, 20, "海の日"),
            2020 => add(7, 23, "海の日"),
            2021 => add(7, 22, "海の日"),
            2003.. => add(7, nth_weekday(year, 7, MONDAY, 3), "海の日"),
            _ => {}
        }
        match year {
            2020 => add(8, 10, "山の日"),
            2021 => add(8, 8, "山の日"),
            2016.. => add(8, 11, "山の日"),
            _ => {}
        }
        match year {
            1966..=2002 => add(9, 15, "敬老の日"),
            2003.. => add(9, nth_weekday(year, 9, MONDAY, 3), "敬老の日"),
            _ => {}
        }
        match year {
            1966..=1999 => add(10, 10, "体育の日"),
            2000..=2019 => add(10, nth_weekday(year, 10, MONDAY, 2), "体育の日"),
            2020 => add(7, 24, "スポーツの日"),
            2021 => add(7, 23, "スポーツの日"),
            2022.. => add(10, nth_weekday(year, 10, MONDAY, 2), "スポーツの日"),
            _ => {}
        }
        if (1989..=2018).contains(&year) {
            add(12, 23, "天皇誕生日");
        }
    }
    if let Some(day) = autumnal_equinox_day(year) {
        add(9, day, "秋分の日");
    }
    add(11, 3, "文化の日");
    add(11, 23, "勤労感謝の日");

    for (y, month, day, name) in SPECIAL_HOLIDAYS {
        if y == year {
            add(month, day, name);
        }
    }
    days
}

/// Built-in holiday source computing the holidays of each year from the law.
#[derive(Debug, Clone, Copy, Default)]
pub struct JapaneseHolidays;

impl JapaneseHolidays {
    /// All holidays of `year`, ordered by date.
    ///
    /// ```
    /// # use koyomi::holiday::JapaneseHolidays;
    /// let names: Vec<_> = JapaneseHolidays::holidays_in_year(2019)
    ///     .into_iter()
    ///     .filter(|h| h.date.month() == 5)
    ///     .map(|h| h.name)
    ///     .collect();
    /// assert_eq!(
    ///     names,
    ///     ["天皇の即位の日", "国民の休日", "憲法記念日", "みどりの日", "こどもの日", "こどもの日 振替休日"]
    /// );
    /// ```
    pub fn holidays_in_year(year: i32) -> Vec<Holiday> {
        let national: BTreeMap<CalendarDate, &str> = national_holidays(year)
            .into_iter()
            .filter_map(|(month, day, name)| {
                CalendarDate::new(year, month, day).ok().map(|date| (date, name))
            })
            .collect();
        let mut all: BTreeMap<CalendarDate, String> = national
            .iter()
            .map(|(date, name)| (*date, name.to_string()))
            .collect();

        if let Ok(substitute_start) = CalendarDate::new(1973, 4, 12) {
            for (date, name) in &national {
                if date.weekday() != 0 || *date < substitute_start {
                    continue;
                }
                let Some(mut next) = date.succ() else { continue };
                if year >= 2007 {
                    while all.contains_key(&next) {
                        let Some(after) = next.succ() else { break };
                        next = after;
                    }
                } else if all.contains_key(&next) {
                    continue;
                }
                trace!(%date, %next, "substitute holiday");
                all.insert(next, format!("{name} {SUBSTITUTE_HOLIDAY}"));
            }
        }

        if year >= 1986 {
            let national_days: BTreeSet<CalendarDate> = national.keys().copied().collect();
            let sandwiched: Vec<CalendarDate> = national_days
                .iter()
                .filter_map(|date| date.succ())
                .filter(|date| !all.contains_key(date))
                .filter(|date| year >= 2007 || date.weekday() != 0)
                .filter(|date| date.succ().is_some_and(|next| national_days.contains(&next)))
                .collect();
            for date in sandwiched {
                all.insert(date, CITIZENS_HOLIDAY.to_string());
            }
        }

        all.into_iter()
            .map(|(date, name)| Holiday { date, name })
            .collect()
    }
}

impl HolidaySource for JapaneseHolidays {
    fn lookup(&self, key: &str) -> Option<String> {
        let date: CalendarDate = key.parse().ok()?;
        Self::holidays_in_year(date.year())
            .into_iter()
            .find(|h| h.date == date)
            .map(|h| h.name)
    }

    fn between(&self, start: CalendarDate, end: CalendarDate) -> Vec<Holiday> {
        if end < start {
            return Vec::new();
        }
        (start.year()..=end.year())
            .flat_map(Self::holidays_in_year)
            .filter(|h| h.date >= start && h.date <= end)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    fn days(year: i32) -> Vec<(String, String)> {
        JapaneseHolidays::holidays_in_year(year)
            .into_iter()
            .map(|h| (h.date.to_string()[5..].to_string(), h.name))
            .collect()
    }

    fn name(key: &str) -> Option<String> {
        JapaneseHolidays.lookup(key)
    }

    #[test]
    fn test_2019_enthronement_week() {
        let got = days(2019);
        assert_eq!(got.len(), 22);
        assert!(got.contains(&("04-30".into(), "国民の休日".into())));
        assert!(got.contains(&("05-02".into(), "国民の休日".into())));
        assert!(got.contains(&("05-06".into(), "こどもの日 振替休日".into())));
        assert!(got.contains(&("10-22".into(), "即位礼正殿の儀".into())));
        assert!(got.contains(&("10-14".into(), "体育の日".into())));
    }

    #[test]
    fn test_2020_olympic_moves() {
        assert_eq!(name("2020-07-23").as_deref(), Some("海の日"));
        assert_eq!(name("2020-07-24").as_deref(), Some("スポーツの日"));
        assert_eq!(name("2020-08-10").as_deref(), Some("山の日"));
        assert_eq!(name("2020-10-12"), None);
        assert_eq!(name("2021-07-22").as_deref(), Some("海の日"));
        assert_eq!(name("2021-08-08").as_deref(), Some("山の日"));
        assert_eq!(name("2021-08-09").as_deref(), Some("山の日 振替休日"));
    }

    #[test]
    fn test_emperors_birthday_moves() {
        assert_eq!(name("1988-04-29").as_deref(), Some("天皇誕生日"));
        assert_eq!(name("1989-04-29").as_deref(), Some("みどりの日"));
        assert_eq!(name("2018-12-23").as_deref(), Some("天皇誕生日"));
        assert_eq!(name("2019-12-23"), None);
        assert_eq!(name("2019-02-23"), None);
        assert_eq!(name("2020-02-23").as_deref(), Some("天皇誕生日"));
        assert_eq!(name("2020-02-24").as_deref(), Some("天皇誕生日 振替休日"));
    }

    #[test]
    fn test_substitute_rolls_past_golden_week_from_2007() {
        // 2008-05-04 (みどりの日) is a Sunday; 05-05 is taken, so 05-06
        assert_eq!(name("2008-05-06").as_deref(), Some("みどりの日 振替休日"));
        // 2020-05-03 is a Sunday
        assert_eq!(name("2020-05-06").as_deref(), Some("憲法記念日 振替休日"));
    }

    #[test]
    fn test_substitute_holidays_start_in_1973() {
        // 1973-04-29 Sunday is after the amendment
        assert_eq!(name("1973-04-30").as_deref(), Some("天皇誕生日 振替休日"));
        // 1971-03-21 (春分の日) was a Sunday, before the amendment
        assert_eq!(name("1971-03-22"), None);
    }

    #[test]
    fn test_citizens_holidays() {
        assert_eq!(name("1988-05-04").as_deref(), Some("国民の休日"));
        assert_eq!(name("2009-09-22").as_deref(), Some("国民の休日"));
        assert_eq!(name("2026-09-22").as_deref(), Some("国民の休日"));
        assert_eq!(name("1985-05-04"), None);
    }

    #[test]
    fn test_happy_monday_rules() {
        assert_eq!(name("1999-01-15").as_deref(), Some("成人の日"));
        assert_eq!(name("2000-01-10").as_deref(), Some("成人の日"));
        assert_eq!(name("2023-07-17").as_deref(), Some("海の日"));
        assert_eq!(name("2023-09-18").as_deref(), Some("敬老の日"));
        assert_eq!(name("2024-10-14").as_deref(), Some("スポーツの日"));
        for year in 2003..=2050 {
            for h in JapaneseHolidays::holidays_in_year(year) {
                if ["海の日", "敬老の日", "成人の日"].contains(&h.name.as_str()) {
                    assert_eq!(h.date.weekday(), MONDAY, "{}", h.date);
                }
            }
        }
    }

    #[test]
    fn test_equinoxes() {
        assert_eq!(vernal_equinox_day(1973), Some(21));
        assert_eq!(autumnal_equinox_day(1973), Some(23));
        assert_eq!(autumnal_equinox_day(1979), Some(24));
        assert_eq!(vernal_equinox_day(2100), None);
        assert_eq!(name("2024-03-20").as_deref(), Some("春分の日"));
        assert_eq!(name("2024-09-22").as_deref(), Some("秋分の日"));
    }

    #[test]
    fn test_no_holidays_before_the_law() {
        assert!(JapaneseHolidays::holidays_in_year(1900).is_empty());
        assert_eq!(days(1948).len(), 3);
    }

    #[test]
    fn test_between_spans_years_and_is_ordered() {
        let holidays = JapaneseHolidays.between(date(2023, 12, 1), date(2024, 1, 31));
        let keys: Vec<_> = holidays.iter().map(|h| h.date.to_string()).collect();
        assert_eq!(keys, ["2024-01-01", "2024-01-08"]);
        assert!(JapaneseHolidays.between(date(2024, 2, 1), date(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_lookup_rejects_malformed_keys() {
        assert_eq!(name("2024/01/01"), None);
        assert_eq!(name(""), None);
    }
}
