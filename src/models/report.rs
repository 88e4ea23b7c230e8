use chrono::NaiveDate;
use serde::Serialize;

/// Classification of one day of the lookback walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// Scheduled, not excused, checked in.
    Completed,
    /// Scheduled, not excused, no check-in, window closed.
    Missed,
    /// Scheduled but covered by an exception.
    Excused,
    /// Today, scheduled, no check-in yet, window still open.
    Pending,
    /// Nothing required that day.
    Unscheduled,
}

impl DayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Completed => "completed",
            DayStatus::Missed => "missed",
            DayStatus::Excused => "excused",
            DayStatus::Pending => "pending",
            DayStatus::Unscheduled => "unscheduled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub status: DayStatus,
}

/// Output of the reconciler. Computed per request, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub completed_days: u32,
    pub past_scheduled_days: u32,
    /// Most recent first.
    pub missed_dates: Vec<NaiveDate>,
    pub today_check_in_completed: bool,
    /// Contributing days of the current run, most recent first.
    pub current_run: Vec<NaiveDate>,
    /// One entry per walked day, most recent first.
    pub days: Vec<DayRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub achieved: bool,
    pub achieved_date: Option<String>,
}

/// Read view returned by `rcheckin streak --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakReport {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub today_check_in_completed: bool,
    pub next_milestone: Option<u32>,
    pub days_until_next_milestone: Option<u32>,
    pub has_seven_day_badge: bool,
    /// `past_scheduled_days` plus the non-excused scheduled days of the horizon.
    pub total_scheduled_days: u32,
    pub past_scheduled_days: u32,
    pub completed_days: u32,
    pub missed_schedule_dates: Vec<String>,
    pub missed_schedule_count: u32,
    pub exception_dates: Vec<String>,
    pub next_check_in_date: Option<String>,
    pub next_check_in_date_formatted: Option<String>,
    pub badge: Option<Badge>,
}
