use crate::utils::date::format_date;
use crate::utils::time::format_time;
use chrono::{Local, NaiveDate, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CheckInRecord {
    pub id: i64,
    pub worker_id: String,  // ⇔ checkins.worker_id
    pub date: NaiveDate,    // ⇔ checkins.date (TEXT "YYYY-MM-DD", unique per worker)
    pub time: NaiveTime,    // ⇔ checkins.time (TEXT "HH:MM")
    pub source: String,     // ⇔ checkins.source (TEXT, default 'cli')
    pub created_at: String, // ⇔ checkins.created_at (TEXT, ISO8601)
}

impl CheckInRecord {
    /// Check-in created from the CLI: `source = "cli"`, `created_at = now()`.
    pub fn new(worker_id: &str, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            id: 0,
            worker_id: worker_id.to_string(),
            date,
            time,
            source: "cli".to_string(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn date_str(&self) -> String {
        format_date(&self.date)
    }

    pub fn time_str(&self) -> String {
        format_time(&self.time)
    }
}
