//! Long-running commands: the interactive calendar and the clock.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use tracing::{debug, warn};

use koyomi::controller::clock_text;
use koyomi::holiday::{HolidayPick, HolidaySource};
use koyomi::lunar::ChineseLunisolar;
use koyomi::{CalendarController, CalendarDate, KoyomiConfig};

use crate::cli::ClockArgs;
use crate::render;
use crate::Session;

type Controller = CalendarController<Box<dyn HolidaySource>, ChineseLunisolar>;

const HELP: &str = "\
commands:
  n, next          next month
  p, prev          previous month
  t, today         jump to today
  y, year <year>   select a year
  m, month <1-12>  select a month
  h, holiday <n>   jump to the month of picker entry <n> (0 keeps the month)
  d, day <day>     select a day of the displayed month
  v, view          show the calendar again
  q, quit          leave";

/// A parsed line of interactive input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Next,
    Prev,
    Today,
    Year(i32),
    Month(u32),
    Holiday(usize),
    Day(u32),
    View,
    Help,
    Quit,
}

fn parse_input(line: &str) -> Option<Input> {
    let mut words = line.split_whitespace();
    let command = words.next()?;
    let arg = words.next();
    let input = match (command, arg) {
        ("n" | "next", None) => Input::Next,
        ("p" | "prev", None) => Input::Prev,
        ("t" | "today", None) => Input::Today,
        ("y" | "year", Some(a)) => Input::Year(a.parse().ok()?),
        ("m" | "month", Some(a)) => Input::Month(a.parse().ok()?),
        ("h" | "holiday", Some(a)) => Input::Holiday(a.parse().ok()?),
        ("d" | "day", Some(a)) => Input::Day(a.parse().ok()?),
        ("v" | "view", None) => Input::View,
        ("?" | "help", None) => Input::Help,
        ("q" | "quit" | "exit", None) => Input::Quit,
        _ => return None,
    };
    words.next().is_none().then_some(input)
}

/// Month of the 1-based picker entry `n`; `0` is the placeholder.
fn picker_month(picks: &[HolidayPick], n: usize) -> Option<u32> {
    match n {
        0 => Some(0),
        n => picks.get(n - 1).map(|p| p.month),
    }
}

fn show(controller: &Controller, json: bool) -> Result<()> {
    let view = controller.view();
    if json {
        println!("{}", serde_json::to_string(&view)?);
    } else {
        let options = controller.year_options();
        println!("[{}年 {}月] ({}-{})", view.year, view.month, options.start(), options.end());
        print!("{}", render::view(&view));
    }
    Ok(())
}

/// Reads commands from stdin until `quit` or end of input.
pub fn run(session: Session, config: KoyomiConfig, json: bool) -> Result<()> {
    let mut controller = CalendarController::new(session, config)?;
    show(&controller, json)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let Some(input) = parse_input(&line) else {
            warn!(%line, "unrecognised command");
            eprintln!("unrecognised command: {line} (try `help`)");
            continue;
        };
        debug!(?input, "interactive command");

        let outcome = match input {
            Input::Quit => break,
            Input::Help => {
                println!("{HELP}");
                continue;
            }
            Input::View => Ok(()),
            Input::Next => controller.next_month(),
            Input::Prev => controller.prev_month(),
            Input::Today => controller.jump_to_today(CalendarDate::today()),
            Input::Year(year) => controller.select_year(year),
            Input::Month(month) => controller.select_month(month),
            Input::Day(day) => controller.select_day(day),
            Input::Holiday(n) => match picker_month(controller.holidays(), n) {
                Some(month) => controller.jump_to_holiday(month),
                None => {
                    eprintln!("no holiday #{n} in {}", controller.displayed().0);
                    continue;
                }
            },
        };
        match outcome {
            Ok(()) => show(&controller, json)?,
            Err(e) => eprintln!("{e}"),
        }
        io::stdout().flush()?;
    }
    Ok(())
}

/// Prints `HH:MM:SS` once per second.
pub fn clock(args: ClockArgs) -> Result<()> {
    for tick in 0..args.ticks {
        if tick > 0 {
            thread::sleep(Duration::from_secs(1));
        }
        println!("{}", clock_text(Local::now().time()));
    }
    Ok(())
}
