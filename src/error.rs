//! error.rs
//!
//! Error type shared by the parsing and construction entry points of the
//! crate. Lookups themselves never fail: absent holidays, unsupported lunar
//! years and unmapped explanation texts are all reported as `None` or an
//! empty string.

use std::io;

use thiserror::Error;

/// Errors raised while building dates, parsing input or loading data files.
#[derive(Debug, Error)]
pub enum KoyomiError {
    #[error("invalid date {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("invalid month: {0} (must be 1-12)")]
    InvalidMonth(u32),

    #[error("year {year} outside the selectable range {min}-{max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("invalid date format: {0:?} (expected YYYY-MM-DD)")]
    InvalidFormat(String),

    #[error("invalid value {value:?} for setting `{key}`")]
    InvalidSetting { key: String, value: String },

    #[error("line {line}: cannot parse holiday entry {text:?}")]
    HolidayLine { line: usize, text: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, KoyomiError>;
