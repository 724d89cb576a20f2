//! era.rs
//!
//! Japanese imperial era (元号) for a Gregorian year.
//!
//! The lookup works on whole years: a year belongs to the newest era that
//! started in or before it, so 2019 is 令和1 even though 平成 lasted until
//! April of that year.

use std::fmt;

use serde::Serialize;

/// Imperial eras known to the calculator, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Era {
    Reiwa,
    Heisei,
    Showa,
    Taisho,
    Meiji,
}

/// Era table: first Gregorian year of each era, newest first.
const ERA_TABLE: [(i32, Era); 5] = [
    (2019, Era::Reiwa),
    (1989, Era::Heisei),
    (1926, Era::Showa),
    (1912, Era::Taisho),
    (1868, Era::Meiji),
];

impl Era {
    /// The kanji name of the era.
    pub fn name(self) -> &'static str {
        match self {
            Era::Reiwa => "令和",
            Era::Heisei => "平成",
            Era::Showa => "昭和",
            Era::Taisho => "大正",
            Era::Meiji => "明治",
        }
    }

    /// Gregorian year counted as year 1 of the era.
    pub fn start_year(self) -> i32 {
        match self {
            Era::Reiwa => 2019,
            Era::Heisei => 1989,
            Era::Showa => 1926,
            Era::Taisho => 1912,
            Era::Meiji => 1868,
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An era name together with the year number inside that era.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EraLabel {
    pub era: Era,
    pub year: i32,
}

impl fmt::Display for EraLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}年", self.era.name(), self.year)
    }
}

/// Maps a Gregorian year to its era and in-era year.
///
/// Years before 1868 fall through to 明治 and produce a year number of zero
/// or less.
///
/// ```
/// # use koyomi::era::{japanese_era, Era};
/// let label = japanese_era(2023);
/// assert_eq!(label.era, Era::Reiwa);
/// assert_eq!(label.year, 5);
/// assert_eq!(label.to_string(), "令和5年");
/// ```
pub fn japanese_era(year: i32) -> EraLabel {
    let era = ERA_TABLE
        .iter()
        .find(|(start, _)| year >= *start)
        .map(|(_, era)| *era)
        .unwrap_or(Era::Meiji);
    EraLabel {
        era,
        year: year - era.start_year() + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(year: i32) -> (&'static str, i32) {
        let l = japanese_era(year);
        (l.era.name(), l.year)
    }

    #[test]
    fn test_era_boundaries() {
        assert_eq!(label(2019), ("令和", 1));
        assert_eq!(label(2018), ("平成", 30));
        assert_eq!(label(1989), ("平成", 1));
        assert_eq!(label(1988), ("昭和", 63));
        assert_eq!(label(1926), ("昭和", 1));
        assert_eq!(label(1925), ("大正", 14));
        assert_eq!(label(1912), ("大正", 1));
        assert_eq!(label(1911), ("明治", 44));
    }

    #[test]
    fn test_era_year_positive_from_meiji() {
        for year in 1868..=2100 {
            assert!(japanese_era(year).year >= 1, "{year}");
        }
    }

    #[test]
    fn test_pre_meiji_years_are_not_corrected() {
        assert_eq!(label(1868), ("明治", 1));
        assert_eq!(label(1867), ("明治", 0));
        assert_eq!(label(1800), ("明治", -67));
    }

    #[test]
    fn test_era_table_matches_start_years() {
        for (start, era) in ERA_TABLE {
            assert_eq!(era.start_year(), start);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(japanese_era(1970).to_string(), "昭和45年");
        assert_eq!(japanese_era(2050).to_string(), "令和32年");
    }
}
