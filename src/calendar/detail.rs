//! detail.rs
//!
//! Text of the detail panel for a selected date.
//!
//! # Overview
//!
//! - **`compose_detail`**: full date with weekday, era, the 和風月名 of the
//!   solar month, the special-day label, the six-day entry and the holiday.
//! - **`special_day_label`**: solar term, else 元日 / 大晦日 / 月立, else the
//!   kanji rendering of the day.
//! - **`kanji_day_label`**: `15` -> `十五日`.
//!
//! The month name is looked up by the *solar* month, not derived from the
//! lunar date.

use serde::Serialize;

use super::Koyomi;
use crate::date::CalendarDate;
use crate::era::japanese_era;
use crate::holiday::{holiday_explanation, HolidaySource};
use crate::lunar::{LunarConverter, LunarDate, SolarTerm};
use crate::rokuyo::Rokuyo;

/// Weekday names, Sunday first.
pub const WEEKDAY_NAMES: [&str; 7] = ["日曜日", "月曜日", "火曜日", "水曜日", "木曜日", "金曜日", "土曜日"];

/// Traditional month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "睦月", "如月", "弥生", "卯月", "皐月", "水無月", "文月", "葉月", "長月", "神無月", "霜月", "師走",
];

const KANJI_NUMBERS: [&str; 12] = ["一", "二", "三", "四", "五", "六", "七", "八", "九", "十", "二十", "三十"];

/// Kanji label of a day of the month.
///
/// Round tens past ten keep only their prefix, so `20` gives `十日` and `30`
/// gives `二十日`.
///
/// ```
/// # use koyomi::calendar::kanji_day_label;
/// assert_eq!(kanji_day_label(3), "三日");
/// assert_eq!(kanji_day_label(15), "十五日");
/// assert_eq!(kanji_day_label(31), "三十一日");
/// ```
pub fn kanji_day_label(day: u32) -> String {
    let ones = if day % 10 == 0 {
        ""
    } else {
        KANJI_NUMBERS[(day % 10 - 1) as usize]
    };
    match day {
        0 => String::new(),
        1..=10 => format!("{}日", KANJI_NUMBERS[(day - 1) as usize]),
        11..=20 => format!("十{ones}日"),
        21..=30 => format!("二十{ones}日"),
        _ => format!("三十{ones}日"),
    }
}

/// Label after the month name in the combined line.
pub fn special_day_label(date: CalendarDate, term: Option<SolarTerm>) -> String {
    if let Some(term) = term {
        return term.name().to_string();
    }
    match (date.month(), date.day()) {
        (1, 1) => "元日".to_string(),
        (12, 31) => "大晦日".to_string(),
        (_, 1) => "月立".to_string(),
        (_, day) => kanji_day_label(day),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SixDayDetail {
    pub name: &'static str,
    pub reading: &'static str,
    pub meaning: &'static str,
}

impl From<Rokuyo> for SixDayDetail {
    fn from(rokuyo: Rokuyo) -> Self {
        SixDayDetail {
            name: rokuyo.name(),
            reading: rokuyo.reading(),
            meaning: rokuyo.meaning(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolidayDetail {
    pub name: String,
    /// Empty for unmapped names and in the compact panel.
    pub explanation: String,
}

/// Everything the detail panel shows for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailPanel {
    pub date: CalendarDate,
    /// `YYYY-MM-DD <weekday>`
    pub full_date: String,
    pub weekday: &'static str,
    pub era: String,
    pub lunar_month_name: &'static str,
    pub special_day: String,
    /// `<era> <month name> <special day>`
    pub combined: String,
    pub lunar: Option<LunarDate>,
    /// Only in the extended panel.
    pub rokuyo: Option<SixDayDetail>,
    pub holiday: Option<HolidayDetail>,
}

impl DetailPanel {
    /// The explanation lines of the panel, in display order.
    pub fn explanation_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(r) = &self.rokuyo {
            lines.push(format!("{}({})", r.name, r.reading));
            lines.push(r.meaning.to_string());
        }
        if let Some(h) = &self.holiday {
            lines.push(format!("{}: {}", h.name, h.explanation).trim_end().to_string());
        }
        lines
    }
}

/// Composes the detail panel of `date`.
///
/// `extended` adds the six-day reading/meaning and the holiday explanation.
///
/// ```
/// # use koyomi::calendar::{compose_detail, Koyomi};
/// # use koyomi::date::CalendarDate;
/// let mut koyomi = Koyomi::japanese();
/// let panel = compose_detail(&mut koyomi, CalendarDate::new(2023, 3, 15).unwrap(), true);
/// assert_eq!(panel.full_date, "2023-03-15 水曜日");
/// assert_eq!(panel.combined, "令和5年 弥生 十五日");
/// ```
pub fn compose_detail<S, L>(koyomi: &mut Koyomi<S, L>, date: CalendarDate, extended: bool) -> DetailPanel
where
    S: HolidaySource,
    L: LunarConverter,
{
    let weekday = WEEKDAY_NAMES[date.weekday() as usize];
    let era = japanese_era(date.year()).to_string();
    let lunar_month_name = MONTH_NAMES[(date.month() - 1) as usize];
    let lunar = koyomi.lunar_date(date);
    let special_day = special_day_label(date, lunar.and_then(|l| l.term));

    let rokuyo = if extended {
        koyomi.six_day(date).map(SixDayDetail::from)
    } else {
        None
    };
    let holiday = koyomi.holiday(date).name.map(|name| HolidayDetail {
        explanation: if extended {
            holiday_explanation(&name).to_string()
        } else {
            String::new()
        },
        name,
    });

    DetailPanel {
        date,
        full_date: format!("{date} {weekday}"),
        weekday,
        combined: format!("{era} {lunar_month_name} {special_day}"),
        era,
        lunar_month_name,
        special_day,
        lunar,
        rokuyo,
        holiday,
    }
}
