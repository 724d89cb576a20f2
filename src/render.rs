//! Plain-text rendering of the calendar views.
//!
//! Cells are five columns wide. Labels are assumed to be full-width and are
//! cut to two characters inside the grid; holiday names are listed in full
//! under it.

use std::fmt::Write;

use koyomi::calendar::{DayCell, DetailPanel, MonthGrid};
use koyomi::holiday::{Holiday, HolidayPick};
use koyomi::CalendarView;

const WEEKDAY_HEADER: &str = "   日   月   火   水   木   金   土";

/// Label shown in a grid cell, padded to four columns.
fn cell_label(label: &str) -> String {
    let cut: String = label.chars().take(2).collect();
    let pad = 4usize.saturating_sub(cut.chars().count() * 2);
    format!("{}{cut}", " ".repeat(pad))
}

pub fn month(grid: &MonthGrid) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}年{}月", grid.year, grid.month);
    let _ = writeln!(out, "{WEEKDAY_HEADER}");
    for week in grid.weeks() {
        let mut days = String::new();
        let mut labels = String::new();
        for cell in week {
            match cell {
                DayCell::Blank => {
                    days.push_str("     ");
                    labels.push_str("     ");
                }
                DayCell::Day(entry) => {
                    let mark = if entry.is_today {
                        '<'
                    } else if entry.is_holiday {
                        '*'
                    } else {
                        ' '
                    };
                    let _ = write!(days, "{:>4}{mark}", entry.day);
                    let _ = write!(labels, " {}", cell_label(&entry.label));
                }
            }
        }
        let _ = writeln!(out, "{}", days.trim_end());
        let _ = writeln!(out, "{}", labels.trim_end());
    }
    for entry in grid.days().filter(|d| d.is_holiday) {
        let _ = writeln!(out, "  {:>2}日 {}", entry.day, entry.label);
    }
    out
}

pub fn detail(panel: &DetailPanel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", panel.full_date);
    let _ = writeln!(out, "{}", panel.combined);
    for line in panel.explanation_lines() {
        let _ = writeln!(out, "{line}");
    }
    out
}

pub fn holidays(list: &[Holiday]) -> String {
    list.iter().map(|h| format!("{} {}\n", h.date, h.name)).collect()
}

pub fn picks(list: &[HolidayPick]) -> String {
    list.iter()
        .map(|p| format!("{:>2}月 {}\n", p.month, p.name))
        .collect()
}

pub fn view(view: &CalendarView) -> String {
    let mut out = month(&view.grid);
    let picker: Vec<String> = view
        .holidays
        .iter()
        .map(|p| format!("{}({})", p.name, p.month))
        .collect();
    let _ = writeln!(out, "祝日: {}", picker.join(" "));
    let _ = writeln!(out);
    out.push_str(&detail(&view.detail));
    out
}
