use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{close_exception, insert_exception, load_exceptions};
use crate::errors::{AppError, AppResult};
use crate::models::exception::ExceptionRecord;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{GREEN, GREY, RESET};
use crate::utils::formatting::optional_date;
use crate::utils::date::format_date;
use crate::utils::table::{Column, Table};
use chrono::NaiveDateTime;

/// High-level logic for the `exception` commands.
pub struct ExceptionLogic;

impl ExceptionLogic {
    pub fn add(pool: &mut DbPool, ex: &ExceptionRecord) -> AppResult<i64> {
        if let Some(end) = ex.end_date
            && end < ex.start_date
        {
            return Err(AppError::InvalidDate(format!(
                "end {} precedes start {}",
                format_date(&end),
                format_date(&ex.start_date)
            )));
        }

        let id = insert_exception(&pool.conn, ex)?;
        let span = format!(
            "{} → {}",
            format_date(&ex.start_date),
            ex.end_date
                .as_ref()
                .map(format_date)
                .unwrap_or_else(|| "open".to_string())
        );

        audit_quiet(
            &pool.conn,
            "exception_add",
            &ex.worker_id,
            &format!("{} #{} {}", ex.exception_type.to_db_str(), id, span),
        );

        success(format!(
            "Exception #{} ({}) added for {}: {}.",
            id,
            ex.exception_type.to_db_str(),
            ex.worker_id,
            span
        ));
        Ok(id)
    }

    /// Deactivate an exception. Dates it covered before `at` stay excused.
    pub fn close(pool: &mut DbPool, id: i64, at: NaiveDateTime) -> AppResult<()> {
        close_exception(&pool.conn, id, at)?;

        audit_quiet(
            &pool.conn,
            "exception_close",
            &id.to_string(),
            &format!("Exception #{} closed on {}", id, format_date(&at.date())),
        );

        success(format!(
            "Exception #{} closed on {}.",
            id,
            format_date(&at.date())
        ));
        Ok(())
    }

    pub fn list(pool: &mut DbPool, worker_id: &str) -> AppResult<()> {
        let records = load_exceptions(pool, worker_id)?;

        if records.is_empty() {
            info(format!("No exceptions for {}.", worker_id));
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("ID", 5),
            Column::new("TYPE", 9),
            Column::new("START", 10),
            Column::new("END", 10),
            Column::new("STATUS", 8),
            Column::new("REASON", 20),
        ]);

        for r in &records {
            if r.end_date.is_some_and(|end| end < r.start_date) {
                warning(format!(
                    "Exception #{} ends before it starts and excuses nothing.",
                    r.id
                ));
            }

            let status = if r.is_active {
                format!("{GREEN}active{RESET}")
            } else {
                format!("{GREY}closed{RESET}")
            };

            table.add_row(vec![
                r.id.to_string(),
                r.exception_type.to_db_str().to_string(),
                format_date(&r.start_date),
                optional_date(r.effective_end().as_ref()),
                status,
                r.reason.clone(),
            ]);
        }

        print!("{}", table.render());
        Ok(())
    }
}
