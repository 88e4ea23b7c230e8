use crate::models::report::DayRecord;
use crate::utils::date::format_date;
use serde::Serialize;

/// Flat row for the attendance history export.
#[derive(Serialize, Clone, Debug)]
pub struct DayExport {
    pub worker_id: String,
    pub date: String,
    pub weekday: String,
    pub status: String,
}

impl DayExport {
    pub fn from_record(worker_id: &str, rec: &DayRecord) -> Self {
        Self {
            worker_id: worker_id.to_string(),
            date: format_date(&rec.date),
            weekday: rec.date.format("%a").to_string(),
            status: rec.status.as_str().to_string(),
        }
    }
}
