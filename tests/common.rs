#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rci() -> Command {
    cargo_bin_cmd!("rcheckin")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rcheckin.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB (schema + migrations) in test mode
pub fn init_db(db_path: &str) {
    rci()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize DB and give worker `w1` a Mon/Wed/Fri schedule with check-ins
/// on Fri 2025-10-10, Mon 2025-10-13 and Wed 2025-10-15.
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);

    for day in ["mon", "wed", "fri"] {
        rci()
            .args([
                "--db",
                db_path,
                "schedule",
                "add",
                "w1",
                "--weekday",
                day,
                "--from",
                "2025-10-10",
            ])
            .assert()
            .success();
    }

    for date in ["2025-10-10", "2025-10-13", "2025-10-15"] {
        rci()
            .args([
                "--db", db_path, "checkin", "add", "w1", "--date", date, "--time", "08:30",
            ])
            .assert()
            .success();
    }
}

/// Run `streak --json` for `worker` and parse the output.
pub fn streak_json(db_path: &str, worker: &str, today: &str, now: &str) -> serde_json::Value {
    let out = rci()
        .args([
            "--db", db_path, "--today", today, "--now", now, "streak", worker, "--json",
        ])
        .output()
        .expect("run streak");
    assert!(out.status.success(), "streak failed: {:?}", out);
    serde_json::from_slice(&out.stdout).expect("valid json")
}
