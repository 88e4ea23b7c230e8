pub mod checkin;
pub mod config;
pub mod db;
pub mod exception;
pub mod export;
pub mod history;
pub mod init;
pub mod log;
pub mod next;
pub mod schedule;
pub mod streak;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::logic::ReportOptions;
use crate::errors::{AppError, AppResult};
use crate::utils::{date, time};
use chrono::{NaiveDate, NaiveTime};

/// Reference date and time of a command: the wall clock unless
/// `--today` / `--now` say otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    pub today: NaiveDate,
    pub now: NaiveTime,
}

impl Clock {
    pub fn from_cli(cli: &Cli) -> AppResult<Self> {
        let today = match &cli.today {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => date::today(),
        };
        let now = match &cli.now {
            Some(s) => time::parse_time(s).ok_or_else(|| AppError::InvalidTime(s.clone()))?,
            None => time::now_time(),
        };
        Ok(Self { today, now })
    }

    pub fn report_options(&self, cfg: &Config, lookback: Option<u32>, horizon: Option<u32>) -> ReportOptions {
        ReportOptions {
            today: self.today,
            now: self.now,
            lookback_days: lookback.unwrap_or(cfg.lookback_days),
            horizon_days: horizon.unwrap_or(cfg.horizon_days),
            label_format: cfg.next_label_format.clone(),
        }
    }
}

/// Parse a mandatory `YYYY-MM-DD` argument.
pub(crate) fn parse_date_arg(s: &str) -> AppResult<NaiveDate> {
    date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Parse an optional `YYYY-MM-DD` argument.
pub(crate) fn parse_opt_date_arg(s: &Option<String>) -> AppResult<Option<NaiveDate>> {
    s.as_deref().map(parse_date_arg).transpose()
}
