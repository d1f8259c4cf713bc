use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::io::{self, BufRead, Write};
use tracing::info;

use crate::error::{Result, TimesheetError};

/// Query timestamps are rendered with millisecond precision and a literal
/// UTC designator, matching what the hosting API returns.
pub const QUERY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Inclusive UTC bounds for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayRange {
    pub fn since(&self) -> String {
        self.start.format(QUERY_TIME_FORMAT).to_string()
    }

    pub fn until(&self) -> String {
        self.end.format(QUERY_TIME_FORMAT).to_string()
    }
}

/// Blocks on stdin for a `DD/MM` line, printing a prompt first.
pub fn prompt_for_date() -> Result<String> {
    println!("Enter the date to collect commits for (DD/MM):");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    Ok(line)
}

/// Resolves `DD/MM` input into the day's bounds: 00:00:00.000 through
/// 23:59:59.000 of that date in `year`, both UTC.
pub fn day_bounds(text: &str, year: i32) -> Result<DayRange> {
    let invalid = |reason: &str| TimesheetError::InvalidDateInput {
        input: text.trim().to_string(),
        reason: reason.to_string(),
    };

    let parts: Vec<&str> = text.trim().split('/').collect();
    if parts.len() != 2 {
        return Err(invalid("expected exactly one '/' separator"));
    }

    let day: u32 = parts[0]
        .trim()
        .parse()
        .map_err(|_| invalid("day is not a number"))?;
    let month: u32 = parts[1]
        .trim()
        .parse()
        .map_err(|_| invalid("month is not a number"))?;

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| invalid("no such calendar date"))?;

    let start = Utc.from_utc_datetime(&date.and_hms_milli_opt(0, 0, 0, 0).unwrap());
    let end = Utc.from_utc_datetime(&date.and_hms_milli_opt(23, 59, 59, 0).unwrap());

    info!(
        action = "resolve",
        component = "day_bounds",
        since = start.format(QUERY_TIME_FORMAT).to_string(),
        until = end.format(QUERY_TIME_FORMAT).to_string(),
        "Resolved target day"
    );

    Ok(DayRange { start, end })
}
