use crate::utils::date::{format_date, weekday_to_sunday_index};
use crate::utils::time::format_time;
use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::Serialize;

/// Hours of the day during which a check-in for a scheduled date is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckInWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl CheckInWindow {
    pub fn label(&self) -> String {
        format!("{}-{}", format_time(&self.start), format_time(&self.end))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScheduleMode {
    /// A single calendar date.
    Fixed { date: NaiveDate },
    /// Every `weekday`, optionally bounded on both sides (inclusive).
    Recurring {
        weekday: Weekday,
        effective_from: Option<NaiveDate>,
        expiry_at: Option<NaiveDate>,
    },
}

impl ScheduleMode {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ScheduleMode::Fixed { .. } => "fixed",
            ScheduleMode::Recurring { .. } => "recurring",
        }
    }

    /// Human readable description used by `schedule list`.
    pub fn describe(&self) -> String {
        match self {
            ScheduleMode::Fixed { date } => format!("on {}", format_date(date)),
            ScheduleMode::Recurring {
                weekday,
                effective_from,
                expiry_at,
            } => {
                let mut s = format!("every {}", weekday);
                if let Some(from) = effective_from {
                    s.push_str(&format!(" from {}", format_date(from)));
                }
                if let Some(until) = expiry_at {
                    s.push_str(&format!(" until {}", format_date(until)));
                }
                s
            }
        }
    }
}

/// One schedule assignment, as stored in `schedules`.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleDefinition {
    pub id: i64,                                  // ⇔ schedules.id
    pub worker_id: String,                        // ⇔ schedules.worker_id
    pub team_id: String,                          // ⇔ schedules.team_id
    pub mode: ScheduleMode,                       // ⇔ mode + fixed_date / day_of_week / bounds
    pub is_active: bool,                          // ⇔ schedules.is_active
    pub requires_daily_check_in: bool,            // ⇔ schedules.requires_daily_check_in
    pub check_in_window: Option<CheckInWindow>,   // ⇔ window_start / window_end
}

impl ScheduleDefinition {
    pub fn fixed(worker_id: &str, team_id: &str, date: NaiveDate) -> Self {
        Self {
            id: 0,
            worker_id: worker_id.to_string(),
            team_id: team_id.to_string(),
            mode: ScheduleMode::Fixed { date },
            is_active: true,
            requires_daily_check_in: true,
            check_in_window: None,
        }
    }

    pub fn recurring(
        worker_id: &str,
        team_id: &str,
        weekday: Weekday,
        effective_from: Option<NaiveDate>,
        expiry_at: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: 0,
            worker_id: worker_id.to_string(),
            team_id: team_id.to_string(),
            mode: ScheduleMode::Recurring {
                weekday,
                effective_from,
                expiry_at,
            },
            is_active: true,
            requires_daily_check_in: true,
            check_in_window: None,
        }
    }

    pub fn with_window(mut self, window: Option<CheckInWindow>) -> Self {
        self.check_in_window = window;
        self
    }

    pub fn with_daily_check_in(mut self, required: bool) -> Self {
        self.requires_daily_check_in = required;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Whether this definition claims `date`, ignoring `is_active`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        match &self.mode {
            ScheduleMode::Fixed { date: d } => *d == date,
            ScheduleMode::Recurring {
                weekday,
                effective_from,
                expiry_at,
            } => {
                chrono::Datelike::weekday(&date) == *weekday
                    && effective_from.is_none_or(|from| date >= from)
                    && expiry_at.is_none_or(|until| date <= until)
            }
        }
    }

    /// `schedules.day_of_week` value (0 = Sunday), None for fixed rows.
    pub fn day_of_week(&self) -> Option<u32> {
        match &self.mode {
            ScheduleMode::Recurring { weekday, .. } => Some(weekday_to_sunday_index(*weekday)),
            ScheduleMode::Fixed { .. } => None,
        }
    }
}
