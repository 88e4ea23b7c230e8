use crate::cli::parser::{Commands, ExceptionAction};
use crate::config::Config;
use crate::core::absences::ExceptionLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::exception::{ExceptionRecord, ExceptionType};

use super::{Clock, parse_date_arg, parse_opt_date_arg};

pub fn handle(cmd: &Commands, cfg: &Config, clock: &Clock) -> AppResult<()> {
    let Commands::Exception { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        ExceptionAction::Add {
            worker,
            kind,
            start,
            end,
            reason,
        } => {
            let exception_type =
                ExceptionType::from_code(kind).ok_or_else(|| AppError::InvalidExceptionType(kind.clone()))?;

            let mut record = ExceptionRecord::new(
                worker,
                exception_type,
                parse_date_arg(start)?,
                parse_opt_date_arg(end)?,
            );
            record.reason = reason.clone().unwrap_or_default();

            ExceptionLogic::add(&mut pool, &record)?;
        }
        ExceptionAction::Close { id, on } => {
            let at = match parse_opt_date_arg(on)? {
                Some(d) => d.and_time(clock.now),
                None => clock.today.and_time(clock.now),
            };
            ExceptionLogic::close(&mut pool, *id, at)?;
        }
        ExceptionAction::List { worker } => ExceptionLogic::list(&mut pool, worker)?,
    }

    Ok(())
}
