use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if `table` has a column called `column`.
fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn create_schedules_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schedules (
            id                       INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id                TEXT NOT NULL,
            team_id                  TEXT NOT NULL DEFAULT 'default',
            mode                     TEXT NOT NULL CHECK(mode IN ('fixed','recurring')),
            fixed_date               TEXT,
            day_of_week              INTEGER CHECK(day_of_week BETWEEN 0 AND 6),
            effective_from           TEXT,
            expiry_at                TEXT,
            is_active                INTEGER NOT NULL DEFAULT 1,
            requires_daily_check_in  INTEGER NOT NULL DEFAULT 1,
            window_start             TEXT,
            window_end               TEXT,
            created_at               TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_schedules_worker ON schedules(worker_id, is_active);
        "#,
    )?;
    Ok(())
}

fn create_exceptions_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS exceptions (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id       TEXT NOT NULL,
            exception_type  TEXT NOT NULL CHECK(exception_type IN ('leave','injury','incident','other')),
            start_date      TEXT NOT NULL,
            end_date        TEXT,
            is_active       INTEGER NOT NULL DEFAULT 1,
            deactivated_at  TEXT,
            created_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_exceptions_worker ON exceptions(worker_id, start_date);
        "#,
    )?;
    Ok(())
}

fn create_checkins_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS checkins (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id   TEXT NOT NULL,
            date        TEXT NOT NULL,
            time        TEXT NOT NULL,
            source      TEXT NOT NULL DEFAULT 'cli',
            created_at  TEXT NOT NULL,
            UNIQUE(worker_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_checkins_worker_date ON checkins(worker_id, date);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Free-text reason attached to an exception (added after the first schema).
fn migrate_add_exception_reason(conn: &Connection) -> Result<()> {
    let version = "20250310_0002_add_exception_reason";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !has_column(conn, "exceptions", "reason")? {
        conn.execute(
            "ALTER TABLE exceptions ADD COLUMN reason TEXT NOT NULL DEFAULT ''",
            [],
        )?;
    }

    mark_migration_applied(conn, version, "Added reason to exceptions")?;
    success(format!(
        "Migration applied: {} → added 'reason' to exceptions table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called by `db::initialize::init_db()` and `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    let tables: [(&str, fn(&Connection) -> Result<()>); 3] = [
        ("schedules", create_schedules_table),
        ("exceptions", create_exceptions_table),
        ("checkins", create_checkins_table),
    ];

    for (name, create) in tables {
        if !table_exists(conn, name)? {
            create(conn)?;
            success(format!("Created {name} table."));
        }
    }

    migrate_add_exception_reason(conn)?;

    Ok(())
}
