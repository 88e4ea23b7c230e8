use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionType {
    Leave,
    Injury,
    Incident,
    Other,
}

impl ExceptionType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ExceptionType::Leave => "leave",
            ExceptionType::Injury => "injury",
            ExceptionType::Incident => "incident",
            ExceptionType::Other => "other",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "leave" => Some(ExceptionType::Leave),
            "injury" => Some(ExceptionType::Injury),
            "incident" => Some(ExceptionType::Incident),
            "other" => Some(ExceptionType::Other),
            _ => None,
        }
    }

    /// Helper: convert CLI input (any case)
    pub fn from_code(code: &str) -> Option<Self> {
        Self::from_db_str(&code.trim().to_lowercase())
    }
}

/// Leave, injury or incident-driven absence.
#[derive(Debug, Clone, Serialize)]
pub struct ExceptionRecord {
    pub id: i64,
    pub worker_id: String,
    pub exception_type: ExceptionType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>, // None = open-ended
    pub is_active: bool,
    pub deactivated_at: Option<NaiveDateTime>,
    pub reason: String,
}

impl ExceptionRecord {
    pub fn new(
        worker_id: &str,
        exception_type: ExceptionType,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: 0,
            worker_id: worker_id.to_string(),
            exception_type,
            start_date,
            end_date,
            is_active: true,
            deactivated_at: None,
            reason: String::new(),
        }
    }

    pub fn deactivated(mut self, at: NaiveDateTime) -> Self {
        self.is_active = false;
        self.deactivated_at = Some(at);
        self
    }

    /// Last excused day: the earlier of `end_date` and the deactivation date.
    /// None means the exception is still open-ended.
    pub fn effective_end(&self) -> Option<NaiveDate> {
        match (self.end_date, self.deactivated_at.map(|dt| dt.date())) {
            (Some(end), Some(closed)) => Some(end.min(closed)),
            (Some(end), None) => Some(end),
            (None, closed) => closed,
        }
    }

    /// Retroactive excusal: `is_active` is deliberately ignored.
    pub fn excuses(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.effective_end().is_none_or(|end| date <= end)
    }
}
