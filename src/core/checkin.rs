use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_checkin, insert_checkin, load_checkins};
use crate::errors::AppResult;
use crate::models::checkin::CheckInRecord;
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::date::format_date;
use crate::utils::table::{Column, Table};
use chrono::{NaiveDate, NaiveTime};

/// High-level logic for the `checkin` commands.
pub struct CheckInLogic;

impl CheckInLogic {
    pub fn add(pool: &mut DbPool, worker_id: &str, date: NaiveDate, time: NaiveTime) -> AppResult<i64> {
        let record = CheckInRecord::new(worker_id, date, time);
        let id = insert_checkin(&pool.conn, &record)?;

        audit_quiet(
            &pool.conn,
            "checkin",
            worker_id,
            &format!("Check-in at {} on {}", record.time_str(), record.date_str()),
        );

        success(format!(
            "Check-in recorded for {} on {} at {}.",
            worker_id,
            record.date_str(),
            record.time_str()
        ));
        Ok(id)
    }

    pub fn delete(pool: &mut DbPool, worker_id: &str, date: NaiveDate) -> AppResult<()> {
        delete_checkin(&pool.conn, worker_id, &date)?;

        audit_quiet(
            &pool.conn,
            "checkin_del",
            worker_id,
            &format!("Deleted check-in of {}", format_date(&date)),
        );

        success(format!(
            "🗑️ Check-in of {} on {} deleted.",
            worker_id,
            format_date(&date)
        ));
        Ok(())
    }

    pub fn list(
        pool: &mut DbPool,
        worker_id: &str,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<()> {
        let records = load_checkins(pool, worker_id, bounds)?;

        if records.is_empty() {
            info(format!("No check-ins for {}.", worker_id));
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("ID", 5),
            Column::new("DATE", 10),
            Column::new("DAY", 4),
            Column::new("TIME", 5),
            Column::new("SOURCE", 6),
        ]);

        for r in &records {
            table.add_row(vec![
                r.id.to_string(),
                r.date_str(),
                r.date.format("%a").to_string(),
                r.time_str(),
                colorize_optional(&r.source),
            ]);
        }

        print!("{}", table.render());
        Ok(())
    }
}
