use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{error, header, info, success, warning};
use std::fs;

/// Handle `db --migrate / --check / --vacuum / --info`. Flags run in that order.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    else {
        return Ok(());
    };

    if !(*migrate || *check || *vacuum || *show_info) {
        warning("Nothing to do: pass --migrate, --check, --vacuum or --info.");
        return Ok(());
    }

    let mut pool = DbPool::new(&cfg.database)?;

    if *migrate {
        info("Applying pending schema migrations…");
        run_pending_migrations(&pool.conn)?;
        success("Attendance schema is up to date.");
    }

    if *check {
        check_attendance_store(&pool)?;
    }

    if *vacuum {
        let before = file_size(&cfg.database);
        pool.conn.execute_batch("VACUUM;")?;
        let after = file_size(&cfg.database);
        success(format!(
            "Database compacted: {} → {} bytes.",
            before, after
        ));
    }

    if *show_info {
        stats::print_db_info(&mut pool, &cfg.database)?;
    }

    Ok(())
}

fn file_size(path: &str) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// SQLite integrity check plus the attendance tables and their row counts.
fn check_attendance_store(pool: &DbPool) -> AppResult<()> {
    header("Attendance store check");

    let integrity: String = pool
        .conn
        .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
    if integrity == "ok" {
        success("SQLite integrity check passed.");
    } else {
        error(format!("SQLite integrity check failed: {}", integrity));
    }

    let counts = stats::table_counts(&pool.conn)?;
    for (table, rows) in &counts {
        match rows {
            Some(n) => info(format!("{:<10} {} row(s)", table, n)),
            None => warning(format!(
                "{:<10} missing; run `rcheckin db --migrate`.",
                table
            )),
        }
    }

    if counts.iter().any(|(_, rows)| rows.is_none()) {
        return Ok(());
    }

    let orphans: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM checkins c
         WHERE NOT EXISTS (SELECT 1 FROM schedules s WHERE s.worker_id = c.worker_id)",
        [],
        |row| row.get(0),
    )?;
    if orphans > 0 {
        warning(format!(
            "{} check-in(s) belong to workers without any schedule.",
            orphans
        ));
    }

    Ok(())
}
