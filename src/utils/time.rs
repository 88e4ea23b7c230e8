//! Time utilities: parsing HH:MM, check-in windows, reading the wall clock.

use crate::errors::{AppError, AppResult};
use crate::models::schedule::CheckInWindow;
use chrono::{NaiveTime, Timelike};

pub const TIME_FMT: &str = "%H:%M";

/// Closure time used when a day has no explicit check-in window.
pub const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 0) {
    Some(t) => t,
    None => NaiveTime::MIN,
};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), TIME_FMT).ok()
}

pub fn format_time(t: &NaiveTime) -> String {
    t.format(TIME_FMT).to_string()
}

/// Current local time truncated to the minute.
pub fn now_time() -> NaiveTime {
    let now = chrono::Local::now().time();
    NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now)
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// Parse a window like `"08:00-10:30"`. The end must not precede the start.
pub fn parse_window(s: &str) -> AppResult<CheckInWindow> {
    let (a, b) = s
        .split_once('-')
        .ok_or_else(|| AppError::InvalidWindow(s.to_string()))?;

    let start = parse_time(a).ok_or_else(|| AppError::InvalidTime(a.trim().to_string()))?;
    let end = parse_time(b).ok_or_else(|| AppError::InvalidTime(b.trim().to_string()))?;

    if end < start {
        return Err(AppError::InvalidWindow(format!(
            "{} ends before it starts",
            s.trim()
        )));
    }

    Ok(CheckInWindow { start, end })
}
