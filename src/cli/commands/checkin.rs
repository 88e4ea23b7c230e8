use crate::cli::parser::{CheckinAction, Commands};
use crate::config::Config;
use crate::core::checkin::CheckInLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date::resolve_period;
use crate::utils::time::parse_optional_time;

use super::{Clock, parse_date_arg, parse_opt_date_arg};

pub fn handle(cmd: &Commands, cfg: &Config, clock: &Clock) -> AppResult<()> {
    let Commands::Checkin { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        CheckinAction::Add { worker, date, time } => {
            let d = parse_opt_date_arg(date)?.unwrap_or(clock.today);
            let t = parse_optional_time(time.as_ref())?.unwrap_or(clock.now);
            CheckInLogic::add(&mut pool, worker, d, t)?;
        }
        CheckinAction::List { worker, period } => {
            let bounds = period
                .as_deref()
                .map(resolve_period)
                .transpose()
                .map_err(AppError::InvalidDate)?;
            CheckInLogic::list(&mut pool, worker, bounds)?;
        }
        CheckinAction::Del { worker, date } => {
            CheckInLogic::delete(&mut pool, worker, parse_date_arg(date)?)?;
        }
    }

    Ok(())
}
