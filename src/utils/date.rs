//! Date helpers: local clock, YYYY-MM-DD parsing and short relative labels.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Local wall clock truncated to the minute, the resolution meals are stored at.
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn parse_date_arg(s: &str) -> AppResult<NaiveDate> {
    parse_date(s.trim()).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// "today", "yesterday", "3 days ago" or the plain date for anything older
/// than a week. Future dates print as plain dates.
pub fn relative_label(date: NaiveDate, today: NaiveDate) -> String {
    match (today - date).num_days() {
        0 => "today".to_string(),
        1 => "yesterday".to_string(),
        n @ 2..=7 => format!("{} days ago", n),
        _ => date.format("%Y-%m-%d").to_string(),
    }
}
