use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};
use std::fs;

/// Tables of the attendance store, in creation order.
pub const ATTENDANCE_TABLES: [&str; 4] = ["schedules", "exceptions", "checkins", "log"];

/// Row count per attendance table; None when the table does not exist.
pub fn table_counts(conn: &Connection) -> rusqlite::Result<Vec<(&'static str, Option<i64>)>> {
    let mut out = Vec::with_capacity(ATTENDANCE_TABLES.len());

    for table in ATTENDANCE_TABLES {
        let exists = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |_| Ok(()),
            )
            .optional()?
            .is_some();

        let rows = if exists {
            Some(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?)
        } else {
            None
        };
        out.push((table, rows));
    }

    Ok(out)
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    for (label, sql) in [
        ("Workers", "SELECT COUNT(DISTINCT worker_id) FROM schedules"),
        ("Active schedules", "SELECT COUNT(*) FROM schedules WHERE is_active = 1"),
        ("Exceptions", "SELECT COUNT(*) FROM exceptions"),
        ("Check-ins", "SELECT COUNT(*) FROM checkins"),
    ] {
        let count: i64 = pool.conn.query_row(sql, [], |row| row.get(0))?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, count, RESET);
    }

    //
    // 3) CHECK-IN DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row("SELECT MIN(date) FROM checkins", [], |row| row.get(0))
        .optional()?
        .flatten();

    let last_date: Option<String> = pool
        .conn
        .query_row("SELECT MAX(date) FROM checkins", [], |row| row.get(0))
        .optional()?
        .flatten();

    let fmt_first = first_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Check-in range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE CHECK-INS/DAY
    //
    if let (Some(f), Some(l)) = (first_date, last_date) {
        let d1 = parse_date(&f)?;
        let d2 = parse_date(&l)?;
        let days = (d2 - d1).num_days().max(1);

        let count: i64 = pool
            .conn
            .query_row("SELECT COUNT(*) FROM checkins", [], |row| row.get(0))?;
        let avg = count as f64 / days as f64;
        println!("{}• Average check-ins/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}

fn parse_date(date_str: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}
