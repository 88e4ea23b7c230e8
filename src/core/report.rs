use crate::core::logic::{Core, ReportOptions, WorkerSnapshot};
use crate::core::next::{find_next, next_label};
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::load_snapshot;
use crate::errors::AppResult;
use crate::export::{ExportFormat, ExportLogic};
use crate::models::report::{DayStatus, StreakReport};
use crate::ui::messages::{header, info};
use crate::utils::colors::{CYAN, RESET, color_for_status, color_for_streak};
use crate::utils::date::format_date;
use crate::utils::formatting::{bold, date_list, days_label, separator};
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

/// Read-side commands: streak, history, next, export.
pub struct ReportLogic;

impl ReportLogic {
    fn snapshot(pool: &mut DbPool, worker_id: &str, opts: &ReportOptions) -> AppResult<WorkerSnapshot> {
        let from = Core::window_start(opts.today, opts.lookback_days);
        load_snapshot(pool, worker_id, from, opts.today)
    }

    pub fn report(pool: &mut DbPool, worker_id: &str, opts: &ReportOptions) -> AppResult<StreakReport> {
        let snapshot = Self::snapshot(pool, worker_id, opts)?;
        Ok(Core::build_report(&snapshot, opts))
    }

    pub fn streak(pool: &mut DbPool, worker_id: &str, opts: &ReportOptions, json: bool, sep: &str) -> AppResult<()> {
        let report = Self::report(pool, worker_id, opts)?;

        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        print_report(worker_id, &report, opts.today, sep);
        Ok(())
    }

    pub fn history(pool: &mut DbPool, worker_id: &str, opts: &ReportOptions) -> AppResult<()> {
        let snapshot = Self::snapshot(pool, worker_id, opts)?;
        let (rec, _) = Core::reconcile_snapshot(&snapshot, opts);

        let mut table = Table::new(vec![
            Column::new("DATE", 10),
            Column::new("DAY", 4),
            Column::new("STATUS", 11),
        ]);

        for day in rec.days.iter().filter(|d| d.status != DayStatus::Unscheduled) {
            let color = color_for_status(day.status);
            table.add_row(vec![
                format_date(&day.date),
                day.date.format("%a").to_string(),
                format!("{}{}{}", color, day.status.as_str(), RESET),
            ]);
        }

        if table.rows.is_empty() {
            info(format!(
                "{} has no scheduled days in the last {}.",
                worker_id,
                days_label(opts.lookback_days)
            ));
            return Ok(());
        }

        print!("{}", table.render());
        Ok(())
    }

    pub fn next(
        pool: &mut DbPool,
        worker_id: &str,
        from: NaiveDate,
        horizon_days: u32,
        label_format: &str,
    ) -> AppResult<Option<NaiveDate>> {
        let opts = ReportOptions {
            today: from,
            now: crate::utils::time::END_OF_DAY,
            lookback_days: 1,
            horizon_days,
            label_format: label_format.to_string(),
        };
        let snapshot = Self::snapshot(pool, worker_id, &opts)?;

        let next = find_next(&snapshot.schedules, from, horizon_days, &snapshot.checked_in);

        match next {
            Some(d) => println!(
                "Next check-in: {}{}{} ({})",
                CYAN,
                format_date(&d),
                RESET,
                next_label(d, from, label_format)
            ),
            None => info(format!(
                "No scheduled check-in for {} in the next {}.",
                worker_id,
                days_label(horizon_days)
            )),
        }

        Ok(next)
    }

    pub fn export(
        pool: &mut DbPool,
        worker_id: &str,
        opts: &ReportOptions,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let snapshot = Self::snapshot(pool, worker_id, opts)?;
        let (rec, _) = Core::reconcile_snapshot(&snapshot, opts);

        ExportLogic::export(worker_id, &rec.days, format, file, force)?;

        audit_quiet(
            &pool.conn,
            "export",
            worker_id,
            &format!("{} history exported to {}", format.as_str(), file),
        );
        Ok(())
    }
}

fn print_report(worker_id: &str, r: &StreakReport, today: NaiveDate, sep: &str) {
    header(format!("Attendance for {} ({})", worker_id, format_date(&today)));

    let streak_color = color_for_streak(r.current_streak);
    println!(
        "Current streak : {}{}{}",
        streak_color,
        days_label(r.current_streak),
        RESET
    );
    println!("Longest streak : {}", days_label(r.longest_streak));
    println!(
        "Today          : {}",
        if r.today_check_in_completed {
            "checked in ✅"
        } else {
            "not checked in"
        }
    );

    match (r.next_milestone, r.days_until_next_milestone) {
        (Some(m), Some(left)) => println!("Next milestone : {} ({} to go)", m, days_label(left)),
        _ => println!("Next milestone : all milestones reached 🏆"),
    }

    println!("{}", separator(sep, 40));
    println!(
        "Scheduled      : {} past / {} total",
        r.past_scheduled_days, r.total_scheduled_days
    );
    println!("Completed      : {}", r.completed_days);
    println!(
        "Missed ({})     : {}",
        r.missed_schedule_count,
        date_list(&r.missed_schedule_dates)
    );
    println!("Excused        : {}", date_list(&r.exception_dates));

    match (&r.next_check_in_date, &r.next_check_in_date_formatted) {
        (Some(d), Some(label)) => println!("Next check-in  : {} ({})", d, label),
        _ => println!("Next check-in  : --"),
    }

    if let Some(badge) = &r.badge {
        let state = match (&badge.achieved, &badge.achieved_date) {
            (true, Some(d)) => format!("achieved on {}", d),
            (true, None) => "achieved".to_string(),
            (false, _) => "not yet".to_string(),
        };
        println!("{}", separator(sep, 40));
        println!("{} {} : {}", badge.icon, bold(&badge.name), state);
    }
}
