use crate::core::logic::WorkerSnapshot;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::checkin::CheckInRecord;
use crate::models::exception::{ExceptionRecord, ExceptionType};
use crate::models::schedule::{CheckInWindow, ScheduleDefinition, ScheduleMode};
use crate::utils::date::{DATE_FMT, format_date, weekday_from_sunday_index};
use crate::utils::time::{TIME_FMT, format_time};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::collections::BTreeSet;

pub const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn get_date(row: &Row, col: &str) -> Result<NaiveDate> {
    let s: String = row.get(col)?;
    NaiveDate::parse_from_str(&s, DATE_FMT).map_err(|_| conversion_error(0, AppError::InvalidDate(s)))
}

fn get_opt_date(row: &Row, col: &str) -> Result<Option<NaiveDate>> {
    let s: Option<String> = row.get(col)?;
    match s.filter(|v| !v.trim().is_empty()) {
        Some(v) => NaiveDate::parse_from_str(&v, DATE_FMT)
            .map(Some)
            .map_err(|_| conversion_error(0, AppError::InvalidDate(v))),
        None => Ok(None),
    }
}

fn get_time(row: &Row, col: &str) -> Result<NaiveTime> {
    let s: String = row.get(col)?;
    NaiveTime::parse_from_str(&s, TIME_FMT).map_err(|_| conversion_error(0, AppError::InvalidTime(s)))
}

fn get_opt_time(row: &Row, col: &str) -> Result<Option<NaiveTime>> {
    let s: Option<String> = row.get(col)?;
    match s.filter(|v| !v.trim().is_empty()) {
        Some(v) => NaiveTime::parse_from_str(&v, TIME_FMT)
            .map(Some)
            .map_err(|_| conversion_error(0, AppError::InvalidTime(v))),
        None => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

pub fn map_schedule(row: &Row) -> Result<ScheduleDefinition> {
    let mode_str: String = row.get("mode")?;

    let mode = match mode_str.as_str() {
        "fixed" => ScheduleMode::Fixed {
            date: get_date(row, "fixed_date")?,
        },
        "recurring" => {
            let dow: u32 = row.get("day_of_week")?;
            let weekday = weekday_from_sunday_index(dow)
                .ok_or_else(|| conversion_error(0, AppError::InvalidWeekday(dow.to_string())))?;
            ScheduleMode::Recurring {
                weekday,
                effective_from: get_opt_date(row, "effective_from")?,
                expiry_at: get_opt_date(row, "expiry_at")?,
            }
        }
        other => {
            return Err(conversion_error(
                0,
                AppError::InvalidSchedule(format!("unknown mode '{}'", other)),
            ));
        }
    };

    let check_in_window = match (get_opt_time(row, "window_start")?, get_opt_time(row, "window_end")?) {
        (Some(start), Some(end)) => Some(CheckInWindow { start, end }),
        _ => None,
    };

    Ok(ScheduleDefinition {
        id: row.get("id")?,
        worker_id: row.get("worker_id")?,
        team_id: row.get("team_id")?,
        mode,
        is_active: row.get::<_, i32>("is_active")? == 1,
        requires_daily_check_in: row.get::<_, i32>("requires_daily_check_in")? == 1,
        check_in_window,
    })
}

pub fn insert_schedule(conn: &Connection, def: &ScheduleDefinition) -> AppResult<i64> {
    let (fixed_date, effective_from, expiry_at) = match &def.mode {
        ScheduleMode::Fixed { date } => (Some(format_date(date)), None, None),
        ScheduleMode::Recurring {
            effective_from,
            expiry_at,
            ..
        } => (
            None,
            effective_from.as_ref().map(format_date),
            expiry_at.as_ref().map(format_date),
        ),
    };

    conn.execute(
        "INSERT INTO schedules (worker_id, team_id, mode, fixed_date, day_of_week, effective_from,
                                expiry_at, is_active, requires_daily_check_in, window_start, window_end, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            def.worker_id,
            def.team_id,
            def.mode.to_db_str(),
            fixed_date,
            def.day_of_week(),
            effective_from,
            expiry_at,
            if def.is_active { 1 } else { 0 },
            if def.requires_daily_check_in { 1 } else { 0 },
            def.check_in_window.map(|w| format_time(&w.start)),
            def.check_in_window.map(|w| format_time(&w.end)),
            Local::now().to_rfc3339(),
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

pub fn load_schedules(pool: &mut DbPool, worker_id: &str, include_inactive: bool) -> AppResult<Vec<ScheduleDefinition>> {
    let sql = if include_inactive {
        "SELECT * FROM schedules WHERE worker_id = ?1 ORDER BY id ASC"
    } else {
        "SELECT * FROM schedules WHERE worker_id = ?1 AND is_active = 1 ORDER BY id ASC"
    };

    let mut stmt = pool.conn.prepare(sql)?;
    let rows = stmt.query_map([worker_id], map_schedule)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_schedule_by_id(conn: &Connection, id: i64) -> AppResult<ScheduleDefinition> {
    conn.query_row("SELECT * FROM schedules WHERE id = ?1", [id], map_schedule)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("Schedule #{}", id)))
}

pub fn set_schedule_active(conn: &Connection, id: i64, active: bool) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE schedules SET is_active = ?1 WHERE id = ?2",
        params![if active { 1 } else { 0 }, id],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound(format!("Schedule #{}", id)));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Exceptions
// ---------------------------------------------------------------------------

pub fn map_exception(row: &Row) -> Result<ExceptionRecord> {
    let type_str: String = row.get("exception_type")?;
    let exception_type = ExceptionType::from_db_str(&type_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidExceptionType(type_str.clone())))?;

    let deactivated_at = match row.get::<_, Option<String>>("deactivated_at")? {
        Some(s) if !s.trim().is_empty() => Some(
            NaiveDateTime::parse_from_str(&s, DATETIME_FMT)
                .map_err(|_| conversion_error(0, AppError::InvalidDate(s.clone())))?,
        ),
        _ => None,
    };

    Ok(ExceptionRecord {
        id: row.get("id")?,
        worker_id: row.get("worker_id")?,
        exception_type,
        start_date: get_date(row, "start_date")?,
        end_date: get_opt_date(row, "end_date")?,
        is_active: row.get::<_, i32>("is_active")? == 1,
        deactivated_at,
        reason: row.get("reason")?,
    })
}

pub fn insert_exception(conn: &Connection, ex: &ExceptionRecord) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO exceptions (worker_id, exception_type, start_date, end_date, is_active,
                                 deactivated_at, reason, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            ex.worker_id,
            ex.exception_type.to_db_str(),
            format_date(&ex.start_date),
            ex.end_date.as_ref().map(format_date),
            if ex.is_active { 1 } else { 0 },
            ex.deactivated_at
                .map(|dt| dt.format(DATETIME_FMT).to_string()),
            ex.reason,
            Local::now().to_rfc3339(),
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// All exceptions of a worker, closed ones included: excusal is retroactive.
pub fn load_exceptions(pool: &mut DbPool, worker_id: &str) -> AppResult<Vec<ExceptionRecord>> {
    let mut stmt = pool.conn.prepare(
        "SELECT * FROM exceptions
         WHERE worker_id = ?1
         ORDER BY start_date ASC, id ASC",
    )?;

    let rows = stmt.query_map([worker_id], map_exception)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn close_exception(conn: &Connection, id: i64, at: NaiveDateTime) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE exceptions SET is_active = 0, deactivated_at = ?1 WHERE id = ?2 AND is_active = 1",
        params![at.format(DATETIME_FMT).to_string(), id],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound(format!("Active exception #{}", id)));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Check-ins
// ---------------------------------------------------------------------------

pub fn map_checkin(row: &Row) -> Result<CheckInRecord> {
    Ok(CheckInRecord {
        id: row.get("id")?,
        worker_id: row.get("worker_id")?,
        date: get_date(row, "date")?,
        time: get_time(row, "time")?,
        source: row.get("source")?,
        created_at: row.get("created_at")?,
    })
}

pub fn checkin_exists(conn: &Connection, worker_id: &str, date: &NaiveDate) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM checkins WHERE worker_id = ?1 AND date = ?2 LIMIT 1")?;
    Ok(stmt.exists(params![worker_id, format_date(date)])?)
}

/// Insert a check-in. At most one per worker per date.
pub fn insert_checkin(conn: &Connection, ci: &CheckInRecord) -> AppResult<i64> {
    if checkin_exists(conn, &ci.worker_id, &ci.date)? {
        return Err(AppError::DuplicateCheckIn {
            worker: ci.worker_id.clone(),
            date: ci.date_str(),
        });
    }

    conn.execute(
        "INSERT INTO checkins (worker_id, date, time, source, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            ci.worker_id,
            ci.date_str(),
            ci.time_str(),
            ci.source,
            ci.created_at,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

pub fn delete_checkin(conn: &Connection, worker_id: &str, date: &NaiveDate) -> AppResult<()> {
    let changed = conn.execute(
        "DELETE FROM checkins WHERE worker_id = ?1 AND date = ?2",
        params![worker_id, format_date(date)],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound(format!(
            "Check-in of {} on {}",
            worker_id,
            format_date(date)
        )));
    }
    Ok(())
}

pub fn load_checkins(
    pool: &mut DbPool,
    worker_id: &str,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<CheckInRecord>> {
    let mut out = Vec::new();

    match bounds {
        None => {
            let mut stmt = pool.conn.prepare(
                "SELECT * FROM checkins WHERE worker_id = ?1 ORDER BY date ASC",
            )?;
            for r in stmt.query_map([worker_id], map_checkin)? {
                out.push(r?);
            }
        }
        Some((start, end)) => {
            let mut stmt = pool.conn.prepare(
                "SELECT * FROM checkins
                 WHERE worker_id = ?1 AND date BETWEEN ?2 AND ?3
                 ORDER BY date ASC",
            )?;
            let rows = stmt.query_map(
                params![worker_id, format_date(&start), format_date(&end)],
                map_checkin,
            )?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

/// Dates in `[from, to]` on which the worker checked in.
pub fn load_checkin_dates(
    pool: &mut DbPool,
    worker_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<BTreeSet<NaiveDate>> {
    Ok(load_checkins(pool, worker_id, Some((from, to)))?
        .into_iter()
        .map(|c| c.date)
        .collect())
}

/// Read-only snapshot consumed by the engine. Any store error aborts the
/// whole request: the engine never runs on partial data.
pub fn load_snapshot(
    pool: &mut DbPool,
    worker_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<WorkerSnapshot> {
    Ok(WorkerSnapshot {
        schedules: load_schedules(pool, worker_id, false)?,
        exceptions: load_exceptions(pool, worker_id)?,
        checked_in: load_checkin_dates(pool, worker_id, from, to)?,
    })
}
