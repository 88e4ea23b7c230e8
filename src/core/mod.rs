//! Attendance engine (`schedule`, `overlay`, `streak`, `next`, `milestones`,
//! `logic`) plus the command logic built on top of it.
//!
//! The engine modules are pure: they read no clock and touch no store.

pub mod absences;
pub mod assignments;
pub mod checkin;
pub mod log;
pub mod logic;
pub mod milestones;
pub mod next;
pub mod overlay;
pub mod report;
pub mod schedule;
pub mod streak;
