use chrono::{Duration, NaiveDate, NaiveTime, Weekday};
use rcheckin::core::logic::{Core, ReportOptions, WorkerSnapshot};
use rcheckin::core::milestones::{next_milestone, seven_day_badge};
use rcheckin::core::next::{find_next, next_label};
use rcheckin::core::overlay::overlay;
use rcheckin::core::schedule::{expand, window_close_for};
use rcheckin::core::streak::{ReconcileParams, reconcile};
use rcheckin::models::exception::{ExceptionRecord, ExceptionType};
use rcheckin::models::report::DayStatus;
use rcheckin::models::schedule::{CheckInWindow, ScheduleDefinition};
use std::collections::BTreeSet;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("valid time")
}

fn dates(list: &[&str]) -> BTreeSet<NaiveDate> {
    list.iter().map(|s| d(s)).collect()
}

/// `n` days ending at `today`, most recent first.
fn last_days(today: NaiveDate, n: i64) -> Vec<NaiveDate> {
    (0..n).map(|i| today - Duration::days(i)).collect()
}

fn mon_wed_fri() -> Vec<ScheduleDefinition> {
    [Weekday::Mon, Weekday::Wed, Weekday::Fri]
        .into_iter()
        .map(|w| ScheduleDefinition::recurring("w1", "t1", w, None, None))
        .collect()
}

/// 2025-10-16 is a Thursday.
fn options(today: &str, now: &str, lookback: u32) -> ReportOptions {
    ReportOptions {
        today: d(today),
        now: t(now),
        lookback_days: lookback,
        horizon_days: 14,
        label_format: "%A, %B %-d".to_string(),
    }
}

fn params(today: &str, now: &str, lookback: u32) -> ReconcileParams {
    ReconcileParams {
        today: d(today),
        now: t(now),
        lookback_days: lookback,
        today_closes_at: t("23:59"),
    }
}

// ---------------------------------------------------------------------------
// Schedule expansion
// ---------------------------------------------------------------------------

#[test]
fn test_expand_recurring_weekdays_in_range() {
    let got = expand(&mon_wed_fri(), d("2025-10-06"), d("2025-10-12"));
    assert_eq!(got, dates(&["2025-10-06", "2025-10-08", "2025-10-10"]));
}

#[test]
fn test_expand_fixed_only_inside_range() {
    let defs = vec![
        ScheduleDefinition::fixed("w1", "t1", d("2025-10-01")),
        ScheduleDefinition::fixed("w1", "t1", d("2025-11-01")),
    ];
    let got = expand(&defs, d("2025-10-01"), d("2025-10-31"));
    assert_eq!(got, dates(&["2025-10-01"]));
}

#[test]
fn test_expand_respects_effective_and_expiry_bounds() {
    let defs = vec![ScheduleDefinition::recurring(
        "w1",
        "t1",
        Weekday::Mon,
        Some(d("2025-10-07")),
        Some(d("2025-10-27")),
    )];
    let got = expand(&defs, d("2025-09-01"), d("2025-12-31"));
    assert_eq!(got, dates(&["2025-10-13", "2025-10-20", "2025-10-27"]));
}

#[test]
fn test_expand_skips_inactive_and_inverted_bounds() {
    let defs = vec![
        ScheduleDefinition::fixed("w1", "t1", d("2025-10-01")).inactive(),
        ScheduleDefinition::recurring(
            "w1",
            "t1",
            Weekday::Tue,
            Some(d("2025-10-31")),
            Some(d("2025-10-01")),
        ),
    ];
    assert!(expand(&defs, d("2025-09-01"), d("2025-12-31")).is_empty());
}

#[test]
fn test_expand_union_collapses_duplicates() {
    let mut defs = mon_wed_fri();
    // fixed override on a day the recurrence already claims
    defs.push(ScheduleDefinition::fixed("w1", "t1", d("2025-10-08")));
    // and one on a Saturday
    defs.push(ScheduleDefinition::fixed("w1", "t1", d("2025-10-11")));

    let got = expand(&defs, d("2025-10-06"), d("2025-10-12"));
    assert_eq!(
        got,
        dates(&["2025-10-06", "2025-10-08", "2025-10-10", "2025-10-11"])
    );
}

#[test]
fn test_expand_empty_when_from_after_to() {
    assert!(expand(&mon_wed_fri(), d("2025-10-12"), d("2025-10-06")).is_empty());
}

#[test]
fn test_expand_is_deterministic() {
    let a = expand(&mon_wed_fri(), d("2025-01-01"), d("2025-12-31"));
    let b = expand(&mon_wed_fri(), d("2025-01-01"), d("2025-12-31"));
    assert_eq!(a, b);
    assert_eq!(a.len(), 157);
}

#[test]
fn test_window_close_uses_latest_claim() {
    let defs = vec![
        ScheduleDefinition::fixed("w1", "t1", d("2025-10-16")).with_window(Some(CheckInWindow {
            start: t("06:00"),
            end: t("09:00"),
        })),
        ScheduleDefinition::recurring("w1", "t1", Weekday::Thu, None, None).with_window(Some(
            CheckInWindow {
                start: t("08:00"),
                end: t("17:00"),
            },
        )),
    ];
    assert_eq!(window_close_for(&defs, d("2025-10-16")), t("17:00"));

    let no_daily = vec![
        ScheduleDefinition::fixed("w1", "t1", d("2025-10-16"))
            .with_window(Some(CheckInWindow {
                start: t("06:00"),
                end: t("09:00"),
            }))
            .with_daily_check_in(false),
    ];
    assert_eq!(window_close_for(&no_daily, d("2025-10-16")), t("23:59"));
}

// ---------------------------------------------------------------------------
// Exception overlay
// ---------------------------------------------------------------------------

#[test]
fn test_overlay_excuses_only_scheduled_dates_in_span() {
    let scheduled = dates(&["2025-10-06", "2025-10-08", "2025-10-10"]);
    let ex = vec![ExceptionRecord::new(
        "w1",
        ExceptionType::Leave,
        d("2025-10-07"),
        Some(d("2025-10-09")),
    )];

    let ov = overlay(&scheduled, &ex);
    assert_eq!(ov.excused, dates(&["2025-10-08"]));
    assert_eq!(ov.exception_dates, vec![d("2025-10-08")]);
}

#[test]
fn test_overlay_open_ended_and_closed_exceptions() {
    let scheduled = dates(&["2025-10-06", "2025-10-08", "2025-10-10", "2025-10-13"]);

    // open-ended injury closed on the 8th: still excuses the 6th and 8th
    let closed = ExceptionRecord::new("w1", ExceptionType::Injury, d("2025-10-06"), None)
        .deactivated(d("2025-10-08").and_time(t("12:00")));

    let ov = overlay(&scheduled, &[closed]);
    assert_eq!(ov.exception_dates, vec![d("2025-10-06"), d("2025-10-08")]);

    // never closed: everything from the start on
    let open = ExceptionRecord::new("w1", ExceptionType::Incident, d("2025-10-08"), None);
    let ov = overlay(&scheduled, &[open]);
    assert_eq!(
        ov.exception_dates,
        vec![d("2025-10-08"), d("2025-10-10"), d("2025-10-13")]
    );
}

#[test]
fn test_overlay_ignores_malformed_and_accepts_overlaps() {
    let scheduled = dates(&["2025-10-06", "2025-10-08"]);
    let ex = vec![
        ExceptionRecord::new("w1", ExceptionType::Leave, d("2025-10-10"), Some(d("2025-10-01"))),
        ExceptionRecord::new("w1", ExceptionType::Leave, d("2025-10-08"), Some(d("2025-10-08"))),
        ExceptionRecord::new("w1", ExceptionType::Other, d("2025-10-01"), Some(d("2025-10-31"))),
    ];

    let ov = overlay(&scheduled, &ex[..1]);
    assert!(ov.excused.is_empty());

    let ov = overlay(&scheduled, &ex);
    assert_eq!(ov.excused, scheduled);
}

// ---------------------------------------------------------------------------
// Reconciler: scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_a_three_day_streak_on_unscheduled_thursday() {
    let snapshot = WorkerSnapshot {
        schedules: mon_wed_fri(),
        exceptions: vec![],
        checked_in: dates(&["2025-10-10", "2025-10-13", "2025-10-15"]),
    };

    let report = Core::build_report(&snapshot, &options("2025-10-16", "10:00", 7));
    assert_eq!(report.current_streak, 3);
    assert_eq!(report.longest_streak, 3);
    assert!(report.missed_schedule_dates.is_empty());
    assert!(!report.today_check_in_completed);
    assert_eq!(report.completed_days, 3);
}

#[test]
fn test_scenario_b_recent_miss_breaks_current_streak() {
    let snapshot = WorkerSnapshot {
        schedules: mon_wed_fri(),
        exceptions: vec![],
        checked_in: dates(&["2025-10-10", "2025-10-13"]),
    };

    let report = Core::build_report(&snapshot, &options("2025-10-16", "10:00", 7));
    assert_eq!(report.current_streak, 0);
    assert_eq!(report.longest_streak, 2);
    assert_eq!(report.missed_schedule_dates, vec!["2025-10-15".to_string()]);
    assert_eq!(report.missed_schedule_count, 1);
}

#[test]
fn test_scenario_c_excused_miss_is_transparent() {
    let snapshot = WorkerSnapshot {
        schedules: mon_wed_fri(),
        exceptions: vec![ExceptionRecord::new(
            "w1",
            ExceptionType::Leave,
            d("2025-10-15"),
            Some(d("2025-10-15")),
        )],
        checked_in: dates(&["2025-10-10", "2025-10-13"]),
    };

    let report = Core::build_report(&snapshot, &options("2025-10-16", "10:00", 7));
    assert_eq!(report.current_streak, 2);
    assert!(report.missed_schedule_dates.is_empty());
    assert_eq!(report.exception_dates, vec!["2025-10-15".to_string()]);
}

#[test]
fn test_scenario_d_same_day_window_closure() {
    let schedules = vec![
        ScheduleDefinition::recurring("w1", "t1", Weekday::Thu, None, None).with_window(Some(
            CheckInWindow {
                start: t("08:00"),
                end: t("17:00"),
            },
        )),
    ];
    let snapshot = WorkerSnapshot {
        schedules,
        exceptions: vec![],
        checked_in: dates(&["2025-10-09"]),
    };

    let before = Core::build_report(&snapshot, &options("2025-10-16", "15:00", 8));
    assert!(before.missed_schedule_dates.is_empty());
    assert_eq!(before.current_streak, 1);

    let after = Core::build_report(&snapshot, &options("2025-10-16", "18:00", 8));
    assert_eq!(after.missed_schedule_dates, vec!["2025-10-16".to_string()]);
    assert_eq!(after.current_streak, 0);
    assert_eq!(after.longest_streak, 1);
}

#[test]
fn test_scenario_e_find_next_returns_unfulfilled_today() {
    let defs = mon_wed_fri();
    let monday = d("2025-10-13");

    assert_eq!(find_next(&defs, monday, 14, &BTreeSet::new()), Some(monday));

    // once checked in, the next occurrence is Wednesday
    assert_eq!(
        find_next(&defs, monday, 14, &dates(&["2025-10-13"])),
        Some(d("2025-10-15"))
    );
}

// ---------------------------------------------------------------------------
// Reconciler: policy details
// ---------------------------------------------------------------------------

#[test]
fn test_no_schedule_means_no_streak_and_no_misses() {
    let rec = reconcile(
        &BTreeSet::new(),
        &dates(&["2025-10-15", "2025-10-16"]),
        &BTreeSet::new(),
        &params("2025-10-16", "23:59", 30),
    );
    assert_eq!(rec.current_streak, 0);
    assert_eq!(rec.longest_streak, 0);
    assert!(rec.missed_dates.is_empty());
    assert_eq!(rec.past_scheduled_days, 0);
}

#[test]
fn test_current_run_sealed_by_first_miss() {
    // daily schedule, check-ins: 16, 15, (14 missed), 13, 12, 11
    let scheduled: BTreeSet<NaiveDate> = (10..=16).map(|n| d(&format!("2025-10-{n}"))).collect();
    let checked = dates(&[
        "2025-10-11",
        "2025-10-12",
        "2025-10-13",
        "2025-10-15",
        "2025-10-16",
    ]);

    let rec = reconcile(&scheduled, &checked, &BTreeSet::new(), &params("2025-10-16", "12:00", 7));
    assert_eq!(rec.current_streak, 2);
    assert_eq!(rec.longest_streak, 3);
    assert_eq!(rec.completed_days, 5);
    assert_eq!(rec.missed_dates, vec![d("2025-10-14"), d("2025-10-10")]);
    assert!(rec.today_check_in_completed);
    assert_eq!(rec.current_run, vec![d("2025-10-16"), d("2025-10-15")]);
}

#[test]
fn test_pending_today_is_classified_and_skipped() {
    let scheduled = dates(&["2025-10-15", "2025-10-16"]);
    let checked = dates(&["2025-10-15"]);

    let mut p = params("2025-10-16", "09:00", 2);
    p.today_closes_at = t("10:00");

    let rec = reconcile(&scheduled, &checked, &BTreeSet::new(), &p);
    assert_eq!(rec.days[0].status, DayStatus::Pending);
    assert_eq!(rec.days[1].status, DayStatus::Completed);
    assert_eq!(rec.current_streak, 1);
    assert!(rec.missed_dates.is_empty());
}

#[test]
fn test_excused_check_in_does_not_count() {
    let scheduled = dates(&["2025-10-15", "2025-10-16"]);
    let checked = dates(&["2025-10-15", "2025-10-16"]);
    let excused = dates(&["2025-10-16"]);

    let rec = reconcile(&scheduled, &checked, &excused, &params("2025-10-16", "12:00", 2));
    assert_eq!(rec.completed_days, 1);
    assert_eq!(rec.current_streak, 1);
    assert_eq!(rec.days[0].status, DayStatus::Excused);
}

#[test]
fn test_current_never_exceeds_longest() {
    let today = d("2025-10-16");
    let scheduled: BTreeSet<NaiveDate> = last_days(today, 12).into_iter().collect();
    let days: Vec<NaiveDate> = scheduled.iter().copied().collect();

    for mask in 0u32..(1 << 12) {
        let checked: BTreeSet<NaiveDate> = days
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, d)| *d)
            .collect();

        let rec = reconcile(&scheduled, &checked, &BTreeSet::new(), &params("2025-10-16", "23:59", 12));
        assert!(
            rec.current_streak <= rec.longest_streak,
            "mask {mask:#b}: current {} > longest {}",
            rec.current_streak,
            rec.longest_streak
        );
    }
}

#[test]
fn test_removing_excused_dates_keeps_current_streak() {
    let today = d("2025-10-16");
    let days = last_days(today, 10);
    let scheduled: BTreeSet<NaiveDate> = days.iter().copied().collect();

    for mask in 0u32..(1 << 10) {
        let checked: BTreeSet<NaiveDate> = days
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, d)| *d)
            .collect();
        // excuse every third day
        let excused: BTreeSet<NaiveDate> = days.iter().copied().step_by(3).collect();
        let without: BTreeSet<NaiveDate> = scheduled.difference(&excused).copied().collect();

        let p = params("2025-10-16", "23:59", 10);
        let a = reconcile(&scheduled, &checked, &excused, &p);
        let b = reconcile(&without, &checked, &BTreeSet::new(), &p);

        assert_eq!(a.current_streak, b.current_streak, "mask {mask:#b}");
        assert!(a.missed_dates.iter().all(|d| !excused.contains(d)));
    }
}

#[test]
fn test_reconcile_is_idempotent() {
    let snapshot = WorkerSnapshot {
        schedules: mon_wed_fri(),
        exceptions: vec![ExceptionRecord::new(
            "w1",
            ExceptionType::Injury,
            d("2025-09-29"),
            Some(d("2025-10-03")),
        )],
        checked_in: dates(&["2025-09-22", "2025-10-06", "2025-10-08", "2025-10-13"]),
    };
    let opts = options("2025-10-16", "20:00", 30);

    assert_eq!(
        Core::build_report(&snapshot, &opts),
        Core::build_report(&snapshot, &opts)
    );
    assert_eq!(
        Core::reconcile_snapshot(&snapshot, &opts),
        Core::reconcile_snapshot(&snapshot, &opts)
    );
}

// ---------------------------------------------------------------------------
// Milestones, next occurrence, report view
// ---------------------------------------------------------------------------

#[test]
fn test_next_milestone_thresholds() {
    assert_eq!(next_milestone(0), Some(7));
    assert_eq!(next_milestone(7), Some(14));
    assert_eq!(next_milestone(29), Some(30));
    assert_eq!(next_milestone(89), Some(90));
    assert_eq!(next_milestone(90), None);
}

#[test]
fn test_seven_day_badge_date() {
    let run = last_days(d("2025-10-16"), 9);
    let badge = seven_day_badge(&run);
    assert!(badge.achieved);
    assert_eq!(badge.achieved_date.as_deref(), Some("2025-10-14"));

    let short = seven_day_badge(&run[..6]);
    assert!(!short.achieved);
    assert_eq!(short.achieved_date, None);
}

#[test]
fn test_find_next_without_match_in_horizon() {
    let defs = vec![ScheduleDefinition::fixed("w1", "t1", d("2025-12-25"))];
    assert_eq!(find_next(&defs, d("2025-10-16"), 30, &BTreeSet::new()), None);
    assert_eq!(
        find_next(&defs, d("2025-12-01"), 30, &BTreeSet::new()),
        Some(d("2025-12-25"))
    );
}

#[test]
fn test_next_label() {
    let today = d("2025-10-16");
    assert_eq!(next_label(today, today, "%A, %B %-d"), "Today");
    assert_eq!(next_label(d("2025-10-17"), today, "%A, %B %-d"), "Tomorrow");
    assert_eq!(
        next_label(d("2025-10-20"), today, "%A, %B %-d"),
        "Monday, October 20"
    );
}

#[test]
fn test_report_json_view() {
    let snapshot = WorkerSnapshot {
        schedules: mon_wed_fri(),
        exceptions: vec![],
        checked_in: dates(&["2025-10-10", "2025-10-13", "2025-10-15"]),
    };

    let report = Core::build_report(&snapshot, &options("2025-10-16", "10:00", 7));
    let json = serde_json::to_value(&report).expect("serializable");

    assert_eq!(json["currentStreak"], 3);
    assert_eq!(json["nextMilestone"], 7);
    assert_eq!(json["daysUntilNextMilestone"], 4);
    assert_eq!(json["hasSevenDayBadge"], false);
    assert_eq!(json["pastScheduledDays"], 3);
    // 3 past + Fri 17 .. Thu 30
    assert_eq!(json["totalScheduledDays"], 9);
    assert_eq!(json["nextCheckInDate"], "2025-10-17");
    assert_eq!(json["nextCheckInDateFormatted"], "Tomorrow");
    assert_eq!(json["badge"]["achieved"], false);
    assert!(json["badge"]["achievedDate"].is_null());
}

#[test]
fn test_total_scheduled_days_skips_excused_future_days() {
    let mondays = vec![ScheduleDefinition::recurring("w1", "t1", Weekday::Mon, None, None)];

    let open_leave = WorkerSnapshot {
        schedules: mondays.clone(),
        exceptions: vec![ExceptionRecord::new(
            "w1",
            ExceptionType::Leave,
            d("2025-10-01"),
            None,
        )],
        checked_in: dates(&["2025-09-22", "2025-09-29"]),
    };

    // past: 09-22, 09-29 (10-06, 10-13 excused); future 10-20, 10-27 excused
    let report = Core::build_report(&open_leave, &options("2025-10-16", "10:00", 30));
    assert_eq!(report.past_scheduled_days, 2);
    assert_eq!(report.total_scheduled_days, 2);

    let leave_until_20th = WorkerSnapshot {
        exceptions: vec![ExceptionRecord::new(
            "w1",
            ExceptionType::Leave,
            d("2025-10-01"),
            Some(d("2025-10-20")),
        )],
        ..open_leave
    };

    let report = Core::build_report(&leave_until_20th, &options("2025-10-16", "10:00", 30));
    assert_eq!(report.past_scheduled_days, 2);
    assert_eq!(report.total_scheduled_days, 3);
}
