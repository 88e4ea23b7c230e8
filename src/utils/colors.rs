/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

use crate::models::report::DayStatus;

/// Color of a day in the attendance history.
pub fn color_for_status(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Completed => GREEN,
        DayStatus::Missed => RED,
        DayStatus::Excused => MAGENTA,
        DayStatus::Pending => YELLOW,
        DayStatus::Unscheduled => GREY,
    }
}

/// Streak color: 0 → red, below a week → yellow, otherwise green.
pub fn color_for_streak(streak: u32) -> &'static str {
    match streak {
        0 => RED,
        1..=6 => YELLOW,
        _ => GREEN,
    }
}

/// Greys out empty placeholders (`""`, `"--"`).
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
