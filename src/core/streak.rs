//! Streak & attendance reconciliation.
//!
//! Walks backwards from `today` over the lookback window and classifies each
//! day against the scheduled, excused and checked-in sets:
//!
//! - unscheduled and excused days are transparent: they neither extend nor
//!   break a run;
//! - today is transparent too while its check-in window is still open;
//! - a checked-in day extends the running run;
//! - any other scheduled day is a miss and breaks the run.
//!
//! The current streak is the run anchored at the most recent contributing day.
//! The first miss met during the walk seals it; older runs only feed the
//! longest streak.

use crate::models::report::{DayRecord, DayStatus, Reconciliation};
use crate::utils::date::sub_days;
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy)]
pub struct ReconcileParams {
    pub today: NaiveDate,
    /// Local time of day of the request.
    pub now: NaiveTime,
    /// Number of days walked, today included.
    pub lookback_days: u32,
    /// When today's check-in window closes (see `schedule::window_close_for`).
    pub today_closes_at: NaiveTime,
}

pub fn reconcile(
    scheduled: &BTreeSet<NaiveDate>,
    checked_in: &BTreeSet<NaiveDate>,
    excused: &BTreeSet<NaiveDate>,
    params: &ReconcileParams,
) -> Reconciliation {
    let mut out = Reconciliation {
        today_check_in_completed: scheduled.contains(&params.today)
            && checked_in.contains(&params.today),
        ..Default::default()
    };

    let today_open = params.now <= params.today_closes_at;

    let mut run: u32 = 0;
    let mut current_sealed = false;

    for offset in 0..params.lookback_days {
        let d = sub_days(params.today, offset as u64);

        let status = classify(d, scheduled, checked_in, excused, params.today, today_open);
        out.days.push(DayRecord { date: d, status });

        match status {
            DayStatus::Unscheduled | DayStatus::Excused | DayStatus::Pending => {}
            DayStatus::Completed => {
                run += 1;
                out.longest_streak = out.longest_streak.max(run);
                out.completed_days += 1;
                if !current_sealed {
                    out.current_streak += 1;
                    out.current_run.push(d);
                }
            }
            DayStatus::Missed => {
                run = 0;
                current_sealed = true;
                out.missed_dates.push(d);
            }
        }

        if matches!(
            status,
            DayStatus::Completed | DayStatus::Missed | DayStatus::Pending
        ) {
            out.past_scheduled_days += 1;
        }

        if d == NaiveDate::MIN {
            break;
        }
    }

    out
}

fn classify(
    d: NaiveDate,
    scheduled: &BTreeSet<NaiveDate>,
    checked_in: &BTreeSet<NaiveDate>,
    excused: &BTreeSet<NaiveDate>,
    today: NaiveDate,
    today_open: bool,
) -> DayStatus {
    if !scheduled.contains(&d) {
        DayStatus::Unscheduled
    } else if excused.contains(&d) {
        DayStatus::Excused
    } else if checked_in.contains(&d) {
        DayStatus::Completed
    } else if d == today && today_open {
        DayStatus::Pending
    } else {
        DayStatus::Missed
    }
}
