//! Formatting utilities used for CLI outputs.

use crate::utils::date::format_date;
use chrono::NaiveDate;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// A line made of `ch` repeated `width` times.
pub fn separator(ch: &str, width: usize) -> String {
    let c = ch.chars().next().unwrap_or('-');
    std::iter::repeat_n(c, width).collect()
}

/// `"1 day"` / `"3 days"`.
pub fn days_label(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}

/// Comma separated dates, `--` when empty.
pub fn date_list(dates: &[String]) -> String {
    if dates.is_empty() {
        "--".to_string()
    } else {
        dates.join(", ")
    }
}

pub fn optional_date(d: Option<&NaiveDate>) -> String {
    d.map(format_date).unwrap_or_else(|| "--".to_string())
}
