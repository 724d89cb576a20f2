//! One-shot commands: `month`, `day` and `holidays`.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::info;

use koyomi::calendar::{build_month_grid, compose_detail};
use koyomi::fileio::do_write;
use koyomi::holiday::{unique_holidays_for_year, HolidaySource, HolidayTable};
use koyomi::{CalendarDate, KoyomiConfig};

use crate::cli::{DayArgs, HolidaysArgs, MonthArgs};
use crate::render;
use crate::Session;

fn print<T: Serialize>(value: &T, json: bool, text: impl FnOnce(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text(value));
    }
    Ok(())
}

pub fn month(mut session: Session, args: MonthArgs, json: bool) -> Result<()> {
    let today = session.today();
    let year = args.year.unwrap_or(today.year());
    let month = args.month.unwrap_or(today.month());
    let grid = build_month_grid(&mut session, year, month)?;
    print(&grid, json, render::month)
}

pub fn day(mut session: Session, config: &KoyomiConfig, args: DayArgs, json: bool) -> Result<()> {
    let date = args.date.unwrap_or(session.today());
    let panel = compose_detail(&mut session, date, config.extended_details);
    print(&panel, json, render::detail)
}

pub fn holidays(session: Session, args: HolidaysArgs, json: bool) -> Result<()> {
    let from = args.year.unwrap_or(session.today().year());
    let to = args.to.unwrap_or(from);
    if to < from {
        bail!("--to {to} is before {from}");
    }
    let source = session.holiday_source();

    if args.unique {
        if args.export.is_some() {
            bail!("--export writes dated entries and cannot be combined with --unique");
        }
        let picks: Vec<_> = (from..=to)
            .flat_map(|year| unique_holidays_for_year(source, year))
            .collect();
        return print(&picks, json, |p| render::picks(p));
    }

    let start = CalendarDate::new(from, 1, 1)?;
    let end = CalendarDate::new(to, 12, 31)?;
    let list = source.between(start, end);
    if let Some(path) = &args.export {
        let table: HolidayTable = list.iter().cloned().collect();
        do_write(path, table.to_lines())
            .with_context(|| format!("failed to write holiday table: {}", path.display()))?;
        info!(path = %path.display(), entries = table.len(), "exported holiday table");
    }
    print(&list, json, |l| render::holidays(l))
}
