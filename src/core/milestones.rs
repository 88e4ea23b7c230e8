use crate::models::report::Badge;
use crate::utils::date::format_date;
use chrono::NaiveDate;

pub const MILESTONES: [u32; 5] = [7, 14, 30, 60, 90];

pub const SEVEN_DAY_BADGE: u32 = 7;

/// Smallest milestone strictly greater than `streak`.
pub fn next_milestone(streak: u32) -> Option<u32> {
    MILESTONES.iter().copied().find(|m| *m > streak)
}

pub fn days_until_next_milestone(streak: u32) -> Option<u32> {
    next_milestone(streak).map(|m| m - streak)
}

pub fn has_seven_day_badge(streak: u32) -> bool {
    streak >= SEVEN_DAY_BADGE
}

/// Seven-day badge for the current run (most recent day first).
/// The achievement date is the day the run reached its seventh check-in.
pub fn seven_day_badge(current_run: &[NaiveDate]) -> Badge {
    let streak = current_run.len() as u32;
    let achieved = has_seven_day_badge(streak);

    let achieved_date = if achieved {
        current_run
            .get(current_run.len() - SEVEN_DAY_BADGE as usize)
            .map(format_date)
    } else {
        None
    };

    Badge {
        name: "Week Warrior".to_string(),
        description: "Checked in on 7 scheduled days in a row".to_string(),
        icon: "🔥".to_string(),
        achieved,
        achieved_date,
    }
}
