pub mod checkin;
pub mod exception;
pub mod report;
pub mod schedule;
