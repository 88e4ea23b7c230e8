use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db, init_db_with_data, rci, setup_test_db, streak_json, temp_out};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    rci()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_streak_json_three_day_run() {
    let db_path = setup_test_db("cli_streak_three");
    init_db_with_data(&db_path);

    // Thursday: nothing scheduled today
    let json = streak_json(&db_path, "w1", "2025-10-16", "10:00");

    assert_eq!(json["currentStreak"], 3);
    assert_eq!(json["longestStreak"], 3);
    assert_eq!(json["todayCheckInCompleted"], false);
    assert_eq!(json["missedScheduleCount"], 0);
    assert_eq!(json["nextCheckInDate"], "2025-10-17");
    assert_eq!(json["nextCheckInDateFormatted"], "Tomorrow");
    assert_eq!(json["badge"]["name"], "Week Warrior");
}

#[test]
fn test_missed_day_resets_current_streak() {
    let db_path = setup_test_db("cli_streak_missed");
    init_db_with_data(&db_path);

    rci()
        .args(["--db", &db_path, "checkin", "del", "w1", "--date", "2025-10-15"])
        .assert()
        .success()
        .stdout(contains("deleted"));

    let json = streak_json(&db_path, "w1", "2025-10-16", "10:00");
    assert_eq!(json["currentStreak"], 0);
    assert_eq!(json["longestStreak"], 2);
    assert_eq!(
        json["missedScheduleDates"],
        serde_json::json!(["2025-10-15"])
    );
}

#[test]
fn test_exception_excuses_missed_day() {
    let db_path = setup_test_db("cli_exception_excuse");
    init_db_with_data(&db_path);

    rci()
        .args(["--db", &db_path, "checkin", "del", "w1", "--date", "2025-10-15"])
        .assert()
        .success();

    rci()
        .args([
            "--db",
            &db_path,
            "exception",
            "add",
            "w1",
            "--type",
            "injury",
            "--start",
            "2025-10-15",
            "--reason",
            "sprained ankle",
        ])
        .assert()
        .success()
        .stdout(contains("Exception #1"));

    // closing the exception afterwards keeps the 15th excused
    rci()
        .args([
            "--db", &db_path, "exception", "close", "1", "--on", "2025-10-15",
        ])
        .assert()
        .success()
        .stdout(contains("closed"));

    let json = streak_json(&db_path, "w1", "2025-10-16", "10:00");
    assert_eq!(json["currentStreak"], 2);
    assert_eq!(json["missedScheduleCount"], 0);
    assert_eq!(json["exceptionDates"], serde_json::json!(["2025-10-15"]));

    rci()
        .args(["--db", &db_path, "exception", "list", "w1"])
        .assert()
        .success()
        .stdout(contains("injury").and(contains("closed")));
}

#[test]
fn test_window_closure_on_today() {
    let db_path = setup_test_db("cli_window");
    init_db(&db_path);

    rci()
        .args([
            "--db",
            &db_path,
            "schedule",
            "add",
            "w2",
            "--date",
            "2025-10-16",
            "--window",
            "08:00-17:00",
        ])
        .assert()
        .success();

    let open = streak_json(&db_path, "w2", "2025-10-16", "15:00");
    assert_eq!(open["missedScheduleCount"], 0);
    assert_eq!(open["nextCheckInDateFormatted"], "Today");

    let closed = streak_json(&db_path, "w2", "2025-10-16", "18:00");
    assert_eq!(closed["missedScheduleDates"], serde_json::json!(["2025-10-16"]));
}

#[test]
fn test_no_daily_check_in_closes_at_end_of_day() {
    let db_path = setup_test_db("cli_no_daily");
    init_db(&db_path);

    rci()
        .args([
            "--db",
            &db_path,
            "schedule",
            "add",
            "w3",
            "--date",
            "2025-10-16",
            "--window",
            "08:00-17:00",
            "--no-daily",
        ])
        .assert()
        .success();

    let json = streak_json(&db_path, "w3", "2025-10-16", "18:00");
    assert_eq!(json["missedScheduleCount"], 0);
}

#[test]
fn test_duplicate_checkin_rejected() {
    let db_path = setup_test_db("cli_duplicate");
    init_db_with_data(&db_path);

    rci()
        .args([
            "--db", &db_path, "checkin", "add", "w1", "--date", "2025-10-13",
        ])
        .assert()
        .failure()
        .stderr(contains("already checked in"));
}

#[test]
fn test_checkin_defaults_to_clock() {
    let db_path = setup_test_db("cli_checkin_clock");
    init_db(&db_path);

    rci()
        .args([
            "--db", &db_path, "--today", "2025-10-13", "--now", "07:45", "checkin", "add", "w1",
        ])
        .assert()
        .success()
        .stdout(contains("2025-10-13").and(contains("07:45")));

    rci()
        .args(["--db", &db_path, "checkin", "list", "w1", "--period", "2025-10"])
        .assert()
        .success()
        .stdout(contains("2025-10-13"));
}

#[test]
fn test_next_returns_unfulfilled_today() {
    let db_path = setup_test_db("cli_next");
    init_db_with_data(&db_path);

    rci()
        .args(["--db", &db_path, "next", "w1", "--from", "2025-10-17"])
        .assert()
        .success()
        .stdout(contains("2025-10-17").and(contains("Today")));

    rci()
        .args(["--db", &db_path, "next", "w1", "--from", "2025-10-13"])
        .assert()
        .success()
        .stdout(contains("2025-10-15"));
}

#[test]
fn test_deactivated_schedule_stops_counting() {
    let db_path = setup_test_db("cli_deactivate");
    init_db(&db_path);

    rci()
        .args(["--db", &db_path, "schedule", "add", "w4", "--date", "2025-10-14"])
        .assert()
        .success()
        .stdout(contains("Schedule #1"));

    let before = streak_json(&db_path, "w4", "2025-10-16", "10:00");
    assert_eq!(before["missedScheduleCount"], 1);

    rci()
        .args(["--db", &db_path, "schedule", "deactivate", "1"])
        .assert()
        .success();

    let after = streak_json(&db_path, "w4", "2025-10-16", "10:00");
    assert_eq!(after["missedScheduleCount"], 0);
    assert!(after["badge"].is_null());
}

#[test]
fn test_history_lists_statuses() {
    let db_path = setup_test_db("cli_history");
    init_db_with_data(&db_path);

    rci()
        .args([
            "--db", &db_path, "--today", "2025-10-20", "--now", "20:00", "history", "w1",
        ])
        .assert()
        .success()
        .stdout(
            contains("completed")
                .and(contains("missed"))
                .and(contains("2025-10-17")),
        );
}

#[test]
fn test_export_csv() {
    let db_path = setup_test_db("cli_export_csv");
    let out = temp_out("cli_export_csv", "csv");
    init_db_with_data(&db_path);

    rci()
        .args([
            "--db",
            &db_path,
            "--today",
            "2025-10-16",
            "export",
            "w1",
            "--format",
            "csv",
            "--file",
            &out,
            "--lookback",
            "7",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read csv");
    assert!(content.contains("2025-10-13"));
    assert!(content.contains("completed"));
    // oldest first
    let first = content.find("2025-10-10").expect("first day");
    let last = content.find("2025-10-16").expect("last day");
    assert!(first < last);
}

#[test]
fn test_export_json() {
    let db_path = setup_test_db("cli_export_json");
    let out = temp_out("cli_export_json", "json");
    init_db_with_data(&db_path);

    rci()
        .args([
            "--db",
            &db_path,
            "--today",
            "2025-10-16",
            "export",
            "w1",
            "--format",
            "json",
            "--file",
            &out,
            "--lookback",
            "7",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(rows.as_array().map(|a| a.len()), Some(7));
}

#[test]
fn test_invalid_inputs_fail() {
    let db_path = setup_test_db("cli_invalid");
    init_db(&db_path);

    rci()
        .args(["--db", &db_path, "schedule", "add", "w1", "--weekday", "funday"])
        .assert()
        .failure()
        .stderr(contains("Invalid weekday"));

    rci()
        .args([
            "--db", &db_path, "exception", "add", "w1", "--type", "holiday", "--start",
            "2025-10-01",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid exception type"));

    rci()
        .args(["--db", &db_path, "--today", "2025-13-40", "streak", "w1"])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("cli_log");
    init_db_with_data(&db_path);

    rci()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("schedule_add").and(contains("checkin")));
}

#[test]
fn test_out_of_range_day_counts_rejected() {
    let db_path = setup_test_db("cli_day_bounds");
    init_db_with_data(&db_path);

    for lookback in ["0", "4000000000", "3661"] {
        rci()
            .args([
                "--db", &db_path, "--today", "2025-10-16", "streak", "w1", "--lookback", lookback,
                "--json",
            ])
            .timeout(std::time::Duration::from_secs(10))
            .assert()
            .failure()
            .stderr(contains("--lookback"));
    }

    rci()
        .args(["--db", &db_path, "next", "w1", "--horizon", "99999"])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .failure()
        .stderr(contains("--horizon"));

    // the upper bound itself is accepted
    rci()
        .args([
            "--db", &db_path, "--today", "2025-10-16", "history", "w1", "--lookback", "3660",
        ])
        .assert()
        .success();
}

#[test]
fn test_db_check_reports_attendance_tables() {
    let db_path = setup_test_db("cli_db_check");
    init_db_with_data(&db_path);

    rci()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(
            contains("integrity check passed")
                .and(contains("checkins"))
                .and(contains("3 row(s)"))
                .and(contains("without any schedule").not()),
        );

    rci()
        .args(["--db", &db_path, "checkin", "add", "ghost", "--date", "2025-10-14"])
        .assert()
        .success();

    rci()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("1 check-in(s) belong to workers without any schedule"));
}
