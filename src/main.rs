mod cli;
mod interactive_cmd;
mod logging;
mod render;
mod setup_cmd;
mod show_cmd;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use koyomi::holiday::{HolidaySource, HolidayTable, JapaneseHolidays};
use koyomi::lunar::ChineseLunisolar;
use koyomi::setup::{KoyomiConfig, Setup};
use koyomi::Koyomi;

use crate::cli::{Cli, Command};

/// Calendar context used by every subcommand.
pub type Session = Koyomi<Box<dyn HolidaySource>, ChineseLunisolar>;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let json = cli.json;
    match cli.command {
        Command::Setup(args) => setup_cmd::run(&config, args),
        Command::Clock(args) => interactive_cmd::clock(args),
        Command::Month(args) => show_cmd::month(open_session(&config)?, args, json),
        Command::Day(args) => show_cmd::day(open_session(&config)?, &config, args, json),
        Command::Holidays(args) => show_cmd::holidays(open_session(&config)?, args, json),
        Command::Interactive => interactive_cmd::run(open_session(&config)?, config, json),
    }
}

/// Setup file first, then command-line overrides.
fn load_config(cli: &Cli) -> Result<KoyomiConfig> {
    let mut setup = Setup::new();
    if let Some(path) = &cli.setup {
        setup
            .load_from_file(path)
            .with_context(|| format!("failed to read setup file: {}", path.display()))?;
    }
    let mut config = KoyomiConfig::from_setup(&setup).context("invalid setup")?;
    if let Some(path) = &cli.holidays_file {
        config.holidays_file = Some(path.clone());
    }
    if cli.compact {
        config.extended_details = false;
    }
    Ok(config)
}

fn open_session(config: &KoyomiConfig) -> Result<Session> {
    let source: Box<dyn HolidaySource> = match &config.holidays_file {
        Some(path) => {
            let table = HolidayTable::load(path)
                .with_context(|| format!("failed to load holiday table: {}", path.display()))?;
            Box::new(table)
        }
        None => {
            info!("using built-in holiday rules");
            Box::new(JapaneseHolidays)
        }
    };
    Ok(Koyomi::new(source, ChineseLunisolar))
}
