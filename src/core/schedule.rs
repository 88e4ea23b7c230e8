//! Schedule expansion: turns a worker's schedule definitions into the set of
//! calendar dates on which a check-in was required.
//!
//! Several active definitions may claim the same worker at once (a fixed
//! override on top of a recurring baseline, two weekdays, ...). They are
//! combined as a plain set union: a date is required if any definition
//! claims it, and it is counted once.

use crate::models::schedule::{ScheduleDefinition, ScheduleMode};
use crate::utils::time::END_OF_DAY;
use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use std::collections::BTreeSet;

/// All dates in `[from, to]` (inclusive) required by at least one active definition.
pub fn expand(definitions: &[ScheduleDefinition], from: NaiveDate, to: NaiveDate) -> BTreeSet<NaiveDate> {
    let mut out = BTreeSet::new();

    if from > to {
        return out;
    }

    for def in definitions.iter().filter(|d| d.is_active) {
        match &def.mode {
            ScheduleMode::Fixed { date } => {
                if *date >= from && *date <= to {
                    out.insert(*date);
                }
            }
            ScheduleMode::Recurring {
                weekday,
                effective_from,
                expiry_at,
            } => {
                // Clamp the range to the validity bounds first.
                let lo = effective_from.map_or(from, |f| f.max(from));
                let hi = expiry_at.map_or(to, |e| e.min(to));
                if lo > hi {
                    continue;
                }

                // First matching weekday at or after `lo`, then step by a week.
                let offset = (7 + weekday.num_days_from_monday() as i64
                    - lo.weekday().num_days_from_monday() as i64)
                    % 7;
                let mut d = match lo.checked_add_days(Days::new(offset as u64)) {
                    Some(d) => d,
                    None => continue,
                };

                while d <= hi {
                    out.insert(d);
                    d = match d.checked_add_days(Days::new(7)) {
                        Some(next) => next,
                        None => break,
                    };
                }
            }
        }
    }

    out
}

/// Whether any active definition requires a check-in on `date`.
pub fn is_scheduled_on(definitions: &[ScheduleDefinition], date: NaiveDate) -> bool {
    definitions.iter().any(|d| d.is_active && d.covers(date))
}

/// Active definitions claiming `date`.
pub fn definitions_on(definitions: &[ScheduleDefinition], date: NaiveDate) -> Vec<&ScheduleDefinition> {
    definitions
        .iter()
        .filter(|d| d.is_active && d.covers(date))
        .collect()
}

/// Time after which an unfulfilled `date` counts as missed.
///
/// A definition that requires a daily check-in and carries a window closes at
/// the window end; any other definition closes at end of day. With several
/// definitions claiming the date the latest closure applies. A date nothing
/// claims closes at end of day.
pub fn window_close_for(definitions: &[ScheduleDefinition], date: NaiveDate) -> NaiveTime {
    definitions_on(definitions, date)
        .into_iter()
        .map(closure_time)
        .max()
        .unwrap_or(END_OF_DAY)
}

fn closure_time(def: &ScheduleDefinition) -> NaiveTime {
    match (def.requires_daily_check_in, def.check_in_window) {
        (true, Some(window)) => window.end,
        _ => END_OF_DAY,
    }
}
