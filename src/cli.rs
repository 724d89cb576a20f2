use std::path::PathBuf;

use clap::{Parser, Subcommand};

use koyomi::CalendarDate;

/// Koyomi Japanese calendar.
#[derive(Parser)]
#[command(
    name = "koyomi",
    version,
    about = "Japanese calendar with public holidays, eras and the six-day cycle"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Setup file with `key="value"` lines.
    #[arg(short, long, global = true)]
    pub setup: Option<PathBuf>,

    /// Holiday table (`YYYY-MM-DD: name` lines) replacing the built-in rules.
    #[arg(long = "holidays-file", global = true)]
    pub holidays_file: Option<PathBuf>,

    /// Leave six-day and holiday explanations out of the detail panel.
    #[arg(long, global = true)]
    pub compact: bool,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Show the grid of a month.
    Month(MonthArgs),
    /// Show the detail panel of a date.
    Day(DayArgs),
    /// List the holidays of a year.
    Holidays(HolidaysArgs),
    /// Navigate the calendar with commands read from stdin.
    Interactive,
    /// Print the current time once per second.
    Clock(ClockArgs),
    /// Print or save the effective settings as a setup file.
    Setup(SetupArgs),
}

/// Arguments for the `month` subcommand.
#[derive(clap::Args)]
pub struct MonthArgs {
    /// Year to show; defaults to the current year.
    pub year: Option<i32>,

    /// Month to show (1-12); defaults to the current month.
    #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
}

/// Arguments for the `day` subcommand.
#[derive(clap::Args)]
pub struct DayArgs {
    /// Date as YYYY-MM-DD; defaults to today.
    pub date: Option<CalendarDate>,
}

/// Arguments for the `holidays` subcommand.
#[derive(clap::Args)]
pub struct HolidaysArgs {
    /// Year to list; defaults to the current year.
    pub year: Option<i32>,

    /// Last year to list, for multi-year listings.
    #[arg(long)]
    pub to: Option<i32>,

    /// One entry per holiday, as in the holiday picker.
    #[arg(short, long)]
    pub unique: bool,

    /// Also write the listing as a holiday table file.
    #[arg(short, long)]
    pub export: Option<PathBuf>,
}

/// Arguments for the `clock` subcommand.
#[derive(clap::Args)]
pub struct ClockArgs {
    /// Number of ticks to print.
    #[arg(short = 'n', long, default_value_t = 1)]
    pub ticks: u32,
}

/// Arguments for the `setup` subcommand.
#[derive(clap::Args)]
pub struct SetupArgs {
    /// File to write instead of printing.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
