//! rokuyo.rs
//!
//! The six-day luck cycle (六曜).
//!
//! The label is derived from the lunar date as `(month + day) % 6` looked up
//! in the fixed order 大安, 赤口, 先勝, 友引, 先負, 仏滅. This simplified rule
//! is not the almanac rule that restarts the cycle at a fixed label on the
//! first of every lunar month.

use std::fmt;

use serde::Serialize;

use crate::date::CalendarDate;
use crate::lunar::LunarConverter;

/// One of the six day labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rokuyo {
    Taian,
    Shakko,
    Sensho,
    Tomobiki,
    Senbu,
    Butsumetsu,
}

/// Cycle order used by [`Rokuyo::from_lunar`].
pub const ROKUYO_CYCLE: [Rokuyo; 6] = [
    Rokuyo::Taian,
    Rokuyo::Shakko,
    Rokuyo::Sensho,
    Rokuyo::Tomobiki,
    Rokuyo::Senbu,
    Rokuyo::Butsumetsu,
];

impl Rokuyo {
    /// Label for a lunar month/day pair.
    ///
    /// ```
    /// # use koyomi::rokuyo::Rokuyo;
    /// assert_eq!(Rokuyo::from_lunar(1, 1), Rokuyo::Sensho);
    /// assert_eq!(Rokuyo::from_lunar(3, 3), Rokuyo::Taian);
    /// ```
    pub fn from_lunar(month: u32, day: u32) -> Self {
        ROKUYO_CYCLE[((month + day) % 6) as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            Rokuyo::Taian => "大安",
            Rokuyo::Shakko => "赤口",
            Rokuyo::Sensho => "先勝",
            Rokuyo::Tomobiki => "友引",
            Rokuyo::Senbu => "先負",
            Rokuyo::Butsumetsu => "仏滅",
        }
    }

    /// Kana reading.
    pub fn reading(self) -> &'static str {
        match self {
            Rokuyo::Taian => "たいあん",
            Rokuyo::Shakko => "せきぐち",
            Rokuyo::Sensho => "せんかち",
            Rokuyo::Tomobiki => "ともびき",
            Rokuyo::Senbu => "せんぶ",
            Rokuyo::Butsumetsu => "ぶつめつ",
        }
    }

    /// Traditional meaning of the day.
    pub fn meaning(self) -> &'static str {
        match self {
            Rokuyo::Taian => "万事大吉。特に婚礼に良い。",
            Rokuyo::Shakko => "凶日。特に祝事は大凶。火の元、刃物に要注意。正午は吉、朝夕は凶。",
            Rokuyo::Sensho => "急ぐことは吉。午前は吉、午後は凶。",
            Rokuyo::Tomobiki => {
                "友を引く。祝い事は良いが葬式などの凶事を忌む。朝夕は吉、正午は凶など。"
            }
            Rokuyo::Senbu => "何事も控えめに平静を保つ日。午前は凶、午後は吉。",
            Rokuyo::Butsumetsu => "万事凶。葬式や法事は構わない。",
        }
    }
}

impl fmt::Display for Rokuyo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Six-day label of a solar date, `None` if the converter has no data for it.
pub fn six_day_label<L: LunarConverter + ?Sized>(converter: &L, date: CalendarDate) -> Option<Rokuyo> {
    converter
        .solar_to_lunar(date)
        .map(|lunar| Rokuyo::from_lunar(lunar.month, lunar.day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lunar::ChineseLunisolar;

    #[test]
    fn test_cycle_order() {
        let names: Vec<_> = ROKUYO_CYCLE.iter().map(|r| r.name()).collect();
        assert_eq!(names, ["大安", "赤口", "先勝", "友引", "先負", "仏滅"]);
    }

    #[test]
    fn test_label_depends_only_on_sum_mod_six() {
        for month in 1..=12 {
            for day in 1..=30 {
                let expected = ROKUYO_CYCLE[((month + day) % 6) as usize];
                assert_eq!(Rokuyo::from_lunar(month, day), expected);
                assert_eq!(Rokuyo::from_lunar(month + 6, day), expected);
            }
        }
    }

    #[test]
    fn test_six_day_label_for_dates() {
        // lunar 2024-01-01
        let new_year = CalendarDate::new(2024, 2, 10).unwrap();
        assert_eq!(six_day_label(&ChineseLunisolar, new_year), Some(Rokuyo::Sensho));
        // lunar 2023-12-30: (12 + 30) % 6 == 0
        let eve = CalendarDate::new(2024, 2, 9).unwrap();
        assert_eq!(six_day_label(&ChineseLunisolar, eve), Some(Rokuyo::Taian));
    }

    #[test]
    fn test_out_of_range_has_no_label() {
        let early = CalendarDate::new(1899, 12, 31).unwrap();
        assert_eq!(six_day_label(&ChineseLunisolar, early), None);
    }

    #[test]
    fn test_every_label_has_explanation() {
        for r in ROKUYO_CYCLE {
            assert!(!r.reading().is_empty());
            assert!(r.meaning().ends_with('。'));
        }
    }
}
