//! holiday.rs
//!
//! Japanese public holidays.
//!
//! Holiday data comes from a [`HolidaySource`]: either the rule-based
//! [`JapaneseHolidays`] or a [`HolidayTable`] loaded from a data file. On top
//! of a source this module provides:
//!
//! - **`HolidayLookup`**: per-date `HolidayInfo`, cached by date key;
//! - **`unique_holidays_for_year`**: one entry per holiday key, ordered by month,
//!   for the "jump to holiday" picker;
//! - **`holiday_short_name`** / **`holiday_key`**: the two ways a raw holiday name
//!   is cut at its spaces;
//! - **`holiday_explanation`**: the fixed explanation text of each national holiday.

pub mod rules;
pub mod table;

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::debug;

use crate::date::{CalendarDate, DateFormatter};

pub use rules::JapaneseHolidays;
pub use table::HolidayTable;

/// A named holiday on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holiday {
    pub date: CalendarDate,
    pub name: String,
}

/// Holiday data provider.
///
/// `lookup(key)` must agree with `between(d, d)` for the date `d` whose
/// `YYYY-MM-DD` key is `key`.
pub trait HolidaySource {
    /// Name of the holiday on the date with the given `YYYY-MM-DD` key.
    fn lookup(&self, key: &str) -> Option<String>;

    /// All holidays in `start ..= end`, ordered by date.
    fn between(&self, start: CalendarDate, end: CalendarDate) -> Vec<Holiday>;
}

impl<S: HolidaySource + ?Sized> HolidaySource for Box<S> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }

    fn between(&self, start: CalendarDate, end: CalendarDate) -> Vec<Holiday> {
        (**self).between(start, end)
    }
}

/// Holiday status of a single date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HolidayInfo {
    pub name: Option<String>,
}

impl HolidayInfo {
    pub fn is_holiday(&self) -> bool {
        self.name.is_some()
    }
}

/// Cached holiday lookups over a [`HolidaySource`].
pub struct HolidayLookup<S> {
    source: S,
    formatter: DateFormatter,
    cache: HashMap<String, HolidayInfo>,
}

impl<S: HolidaySource> HolidayLookup<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            formatter: DateFormatter::new(),
            cache: HashMap::new(),
        }
    }

    /// Holiday status of `date`; the first call per date queries the source.
    pub fn info(&mut self, date: CalendarDate) -> HolidayInfo {
        let key = self.formatter.format(date);
        if let Some(info) = self.cache.get(&key) {
            return info.clone();
        }
        let info = HolidayInfo {
            name: self.source.lookup(&key).filter(|name| !name.is_empty()),
        };
        debug!(%key, holiday = ?info.name, "holiday cache miss");
        self.cache.insert(key, info.clone());
        info
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Drops cached holiday results and formatted keys.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.formatter.clear();
    }

    /// Number of cached dates.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

/// Grouping key of a raw holiday name: the text before the first space.
///
/// ```
/// # use koyomi::holiday::holiday_key;
/// assert_eq!(holiday_key("憲法記念日 振替休日"), "憲法記念日");
/// assert_eq!(holiday_key("元日"), "元日");
/// ```
pub fn holiday_key(name: &str) -> &str {
    name.split(' ').next().unwrap_or("")
}

/// Name shown inside a grid cell: the second space-separated part when
/// there is one, otherwise the whole name.
///
/// ```
/// # use koyomi::holiday::holiday_short_name;
/// assert_eq!(holiday_short_name("建国記念の日"), "建国記念の日");
/// assert_eq!(holiday_short_name("体育の日 スポーツの日"), "スポーツの日");
/// assert_eq!(holiday_short_name(""), "");
/// ```
pub fn holiday_short_name(name: &str) -> &str {
    let mut parts = name.split(' ');
    let first = parts.next().unwrap_or("");
    parts.next().unwrap_or(first)
}

/// Entry of the holiday picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolidayPick {
    pub name: String,
    pub month: u32,
}

/// One picker entry per distinct holiday key in `year`, sorted by month.
///
/// The first name seen for a key wins; entries of the same month keep the
/// source order.
pub fn unique_holidays_for_year<S: HolidaySource + ?Sized>(source: &S, year: i32) -> Vec<HolidayPick> {
    let (Ok(start), Ok(end)) = (
        CalendarDate::new(year, 1, 1),
        CalendarDate::new(year, 12, 31),
    ) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut picks: Vec<HolidayPick> = Vec::new();
    for holiday in source.between(start, end) {
        if !seen.insert(holiday_key(&holiday.name).to_string()) {
            continue;
        }
        picks.push(HolidayPick {
            name: holiday.name,
            month: holiday.date.month(),
        });
    }
    picks.sort_by_key(|pick| pick.month);
    picks
}

/// Explanation texts of the national holidays, keyed by holiday name.
static HOLIDAY_EXPLANATIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("元日", "年のはじめを祝う。");
    m.insert(
        "成人の日",
        "おとなになったことを自覚し、みずから生き抜こうとする青年を祝いはげます。",
    );
    m.insert("建国記念の日", "建国をしのび、国を愛する心を養う。");
    m.insert("天皇誕生日", "天皇の誕生日を祝う。");
    m.insert("春分の日", "自然をたたえ、生物をいつくしむ。");
    m.insert(
        "昭和の日",
        "激動の日々を経て、復興を遂げた昭和の時代を顧み、国の将来に思いをいたす。",
    );
    m.insert("憲法記念日", "日本国憲法の施行を記念し、国の成長を期する。");
    m.insert(
        "みどりの日",
        "自然に親しむとともにその恩恵に感謝し、豊かな心をはぐくむ。",
    );
    m.insert(
        "こどもの日",
        "こどもの人格を重んじ、こどもの幸福をはかるとともに、母に感謝する。",
    );
    m.insert("海の日", "海の恩恵に感謝するとともに、海洋国日本の繁栄を願う。");
    m.insert("山の日", "山に親しむ機会を得て、山の恩恵に感謝する。");
    m.insert(
        "敬老の日",
        "多年にわたり社会につくしてきた老人を敬愛し、長寿を祝う。",
    );
    m.insert("秋分の日", "祖先をうやまい、なくなった人々をしのぶ。");
    m.insert(
        "スポーツの日",
        "スポーツを楽しみ、他者を尊重する精神を培うとともに、健康で活力ある社会の実現を願う。",
    );
    m.insert("文化の日", "自由と平和を愛し、文化をすすめる。");
    m.insert("勤労感謝の日", "勤労をたっとび、生産を祝い、国民たがいに感謝しあう。");
    m
});

/// Explanation of a holiday by its full name; empty when the name is not
/// one of the tabled national holidays.
///
/// ```
/// # use koyomi::holiday::holiday_explanation;
/// assert_eq!(holiday_explanation("元日"), "年のはじめを祝う。");
/// assert_eq!(holiday_explanation("国民の休日"), "");
/// ```
pub fn holiday_explanation(name: &str) -> &'static str {
    HOLIDAY_EXPLANATIONS.get(name).copied().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    fn table(entries: &[(CalendarDate, &str)]) -> HolidayTable {
        let mut t = HolidayTable::new();
        for (d, name) in entries {
            t.insert(*d, name);
        }
        t
    }

    #[test]
    fn test_short_name_rule() {
        assert_eq!(holiday_short_name("元日"), "元日");
        assert_eq!(holiday_short_name("こどもの日 振替休日"), "振替休日");
        assert_eq!(holiday_short_name("a b c"), "b");
        assert_eq!(holiday_short_name("a "), "");
    }

    #[test]
    fn test_lookup_caches_per_date() {
        let mut lookup = HolidayLookup::new(table(&[(date(2024, 1, 1), "元日")]));
        assert_eq!(lookup.info(date(2024, 1, 1)).name.as_deref(), Some("元日"));
        assert!(!lookup.info(date(2024, 1, 2)).is_holiday());
        assert_eq!(lookup.cached(), 2);
        lookup.info(date(2024, 1, 1));
        assert_eq!(lookup.cached(), 2);
        lookup.clear();
        assert_eq!(lookup.cached(), 0);
    }

    #[test]
    fn test_lookup_agrees_with_range_query() {
        let mut lookup = HolidayLookup::new(JapaneseHolidays);
        let mut d = date(2019, 1, 1);
        while d.year() == 2019 {
            let ranged = lookup.source().between(d, d);
            let info = lookup.info(d);
            assert_eq!(info.name, ranged.first().map(|h| h.name.clone()), "{d}");
            d = d.succ().unwrap();
        }
    }

    #[test]
    fn test_unique_picks_keep_first_name_and_sort_by_month() {
        let source = table(&[
            (date(2024, 1, 1), "元日"),
            (date(2024, 2, 11), "建国記念の日"),
            (date(2024, 2, 12), "建国記念の日 振替休日"),
            (date(2024, 5, 3), "憲法記念日"),
            (date(2024, 5, 6), "こどもの日 振替休日"),
            (date(2024, 5, 5), "こどもの日"),
        ]);
        let picks = unique_holidays_for_year(&source, 2024);
        let names: Vec<_> = picks.iter().map(|p| p.name.as_str()).collect();
        // the table yields dates in order, so 05-05 is seen before 05-06
        assert_eq!(names, ["元日", "建国記念の日", "憲法記念日", "こどもの日"]);
        assert!(picks.windows(2).all(|w| w[0].month <= w[1].month));
    }

    #[test]
    fn test_unique_picks_have_unique_keys() {
        for year in [1970, 1989, 2007, 2019, 2020, 2024, 2050] {
            let picks = unique_holidays_for_year(&JapaneseHolidays, year);
            let mut keys: Vec<_> = picks.iter().map(|p| holiday_key(&p.name)).collect();
            assert!(picks.windows(2).all(|w| w[0].month <= w[1].month), "{year}");
            let before = keys.len();
            keys.sort();
            keys.dedup();
            assert_eq!(keys.len(), before, "{year}");
        }
    }

    #[test]
    fn test_explanations() {
        assert_eq!(holiday_explanation("山の日"), "山に親しむ機会を得て、山の恩恵に感謝する。");
        assert_eq!(holiday_explanation("こどもの日 振替休日"), "");
        assert_eq!(holiday_explanation(""), "");
    }
}
