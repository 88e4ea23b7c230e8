use crate::core::milestones;
use crate::core::next::{find_next, next_label};
use crate::core::overlay::overlay;
use crate::core::schedule::{expand, window_close_for};
use crate::core::streak::{ReconcileParams, reconcile};
use crate::models::exception::ExceptionRecord;
use crate::models::report::{Reconciliation, StreakReport};
use crate::models::schedule::ScheduleDefinition;
use crate::utils::date::{add_days, format_date, sub_days};
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeSet;

/// Everything fetched from the store for one worker.
#[derive(Debug, Default, Clone)]
pub struct WorkerSnapshot {
    pub schedules: Vec<ScheduleDefinition>,
    pub exceptions: Vec<ExceptionRecord>,
    /// Dates with a recorded check-in.
    pub checked_in: BTreeSet<NaiveDate>,
}

/// Request-level knobs. `today` and `now` are always supplied by the caller.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub today: NaiveDate,
    pub now: NaiveTime,
    pub lookback_days: u32,
    pub horizon_days: u32,
    pub label_format: String,
}

pub struct Core;

impl Core {
    /// First day of the lookback window ending at `today`.
    pub fn window_start(today: NaiveDate, lookback_days: u32) -> NaiveDate {
        sub_days(today, lookback_days.saturating_sub(1) as u64)
    }

    /// Expand, overlay and reconcile the lookback window.
    pub fn reconcile_snapshot(snapshot: &WorkerSnapshot, opts: &ReportOptions) -> (Reconciliation, Vec<NaiveDate>) {
        let from = Self::window_start(opts.today, opts.lookback_days);
        let scheduled = if opts.lookback_days == 0 {
            BTreeSet::new()
        } else {
            expand(&snapshot.schedules, from, opts.today)
        };
        let ov = overlay(&scheduled, &snapshot.exceptions);

        let params = ReconcileParams {
            today: opts.today,
            now: opts.now,
            lookback_days: opts.lookback_days,
            today_closes_at: window_close_for(&snapshot.schedules, opts.today),
        };

        (
            reconcile(&scheduled, &snapshot.checked_in, &ov.excused, &params),
            ov.exception_dates,
        )
    }

    /// Full read view for one worker.
    pub fn build_report(snapshot: &WorkerSnapshot, opts: &ReportOptions) -> StreakReport {
        let (rec, exception_dates) = Self::reconcile_snapshot(snapshot, opts);

        // Upcoming days already covered by a known exception are not owed.
        let future_scheduled = match opts.today.succ_opt() {
            Some(tomorrow) if opts.horizon_days > 0 => {
                let upcoming = expand(
                    &snapshot.schedules,
                    tomorrow,
                    add_days(opts.today, opts.horizon_days as u64),
                );
                let excused = overlay(&upcoming, &snapshot.exceptions).excused;
                (upcoming.len() - excused.len()) as u32
            }
            _ => 0,
        };

        let next = find_next(
            &snapshot.schedules,
            opts.today,
            opts.horizon_days,
            &snapshot.checked_in,
        );

        let total_scheduled_days = rec.past_scheduled_days + future_scheduled;
        let has_any_schedule = total_scheduled_days > 0 || !exception_dates.is_empty();

        StreakReport {
            current_streak: rec.current_streak,
            longest_streak: rec.longest_streak,
            today_check_in_completed: rec.today_check_in_completed,
            next_milestone: milestones::next_milestone(rec.current_streak),
            days_until_next_milestone: milestones::days_until_next_milestone(rec.current_streak),
            has_seven_day_badge: milestones::has_seven_day_badge(rec.current_streak),
            total_scheduled_days,
            past_scheduled_days: rec.past_scheduled_days,
            completed_days: rec.completed_days,
            missed_schedule_count: rec.missed_dates.len() as u32,
            missed_schedule_dates: rec.missed_dates.iter().map(format_date).collect(),
            exception_dates: exception_dates.iter().map(format_date).collect(),
            next_check_in_date: next.as_ref().map(format_date),
            next_check_in_date_formatted: next
                .map(|d| next_label(d, opts.today, &opts.label_format)),
            badge: has_any_schedule.then(|| milestones::seven_day_badge(&rec.current_run)),
        }
    }
}
