//! Next required check-in date.

use crate::core::schedule::{expand, is_scheduled_on};
use crate::models::schedule::ScheduleDefinition;
use crate::utils::date::add_days;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// First date, starting at `from`, on which a check-in is still owed.
///
/// `from` itself wins when it is scheduled and has no check-in yet. Otherwise
/// the days `from + 1 ..= from + horizon_days` are scanned in order.
pub fn find_next(
    definitions: &[ScheduleDefinition],
    from: NaiveDate,
    horizon_days: u32,
    checked_in: &BTreeSet<NaiveDate>,
) -> Option<NaiveDate> {
    if is_scheduled_on(definitions, from) && !checked_in.contains(&from) {
        return Some(from);
    }

    if horizon_days == 0 {
        return None;
    }

    let start = from.succ_opt()?;
    let end = add_days(from, horizon_days as u64);
    expand(definitions, start, end).into_iter().next()
}

/// `"Today"`, `"Tomorrow"`, or `date` rendered with the strftime `format`.
pub fn next_label(date: NaiveDate, today: NaiveDate, format: &str) -> String {
    if date == today {
        "Today".to_string()
    } else if today.succ_opt() == Some(date) {
        "Tomorrow".to_string()
    } else {
        date.format(format).to_string()
    }
}
