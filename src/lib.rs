//! Japanese calendar core: month grids with public holidays, the six-day
//! cycle (六曜), era names, solar terms and the traditional month names,
//! plus the navigation state of a calendar view.
//!
//! The crate is organised leaves first:
//!
//! 1. **`date`**: `CalendarDate`, the `YYYY-MM-DD` formatter and month arithmetic.
//! 2. **`era`**: `japanese_era(year)` -> `令和5年`.
//! 3. **`holiday`**: the `HolidaySource` trait with the rule-based
//!    `JapaneseHolidays` and file-backed `HolidayTable`, a cached
//!    `HolidayLookup` and the yearly holiday picker.
//! 4. **`lunar`** / **`rokuyo`**: lunisolar conversion, solar terms and the
//!    six-day labels.
//! 5. **`calendar`**: the `Koyomi` context, `build_month_grid` and
//!    `compose_detail`.
//! 6. **`controller`**: `CalendarController`, driven by `setup::KoyomiConfig`.
//!
//! # Usage
//!
//! ```
//! use koyomi::calendar::Koyomi;
//! use koyomi::controller::CalendarController;
//! use koyomi::date::CalendarDate;
//! use koyomi::holiday::JapaneseHolidays;
//! use koyomi::lunar::ChineseLunisolar;
//! use koyomi::setup::KoyomiConfig;
//!
//! let today = CalendarDate::new(2024, 2, 14).unwrap();
//! let koyomi = Koyomi::with_today(JapaneseHolidays, ChineseLunisolar, today);
//! let mut controller = CalendarController::new(koyomi, KoyomiConfig::default()).unwrap();
//! controller.select_day(11).unwrap();
//! assert_eq!(controller.detail().holiday.as_ref().unwrap().name, "建国記念の日");
//! ```

pub mod calendar;
pub mod controller;
pub mod date;
pub mod era;
pub mod error;
pub mod fileio;
pub mod holiday;
pub mod lunar;
pub mod rokuyo;
pub mod setup;

pub use calendar::Koyomi;
pub use controller::{CalendarController, CalendarView};
pub use date::CalendarDate;
pub use error::{KoyomiError, Result};
pub use setup::KoyomiConfig;
