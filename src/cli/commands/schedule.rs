use crate::cli::parser::{Commands, ScheduleAction};
use crate::config::Config;
use crate::core::assignments::ScheduleLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::schedule::ScheduleDefinition;
use crate::utils::date::parse_weekday;
use crate::utils::time::parse_window;

use super::{parse_date_arg, parse_opt_date_arg};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Schedule { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        ScheduleAction::Add {
            worker,
            team,
            date,
            weekday,
            from,
            until,
            window,
            no_daily,
        } => {
            let team = team.clone().unwrap_or_else(|| cfg.default_team.clone());

            let def = match (date, weekday) {
                (Some(d), _) => ScheduleDefinition::fixed(worker, &team, parse_date_arg(d)?),
                (None, Some(w)) => {
                    let wd = parse_weekday(w).ok_or_else(|| AppError::InvalidWeekday(w.clone()))?;
                    ScheduleDefinition::recurring(
                        worker,
                        &team,
                        wd,
                        parse_opt_date_arg(from)?,
                        parse_opt_date_arg(until)?,
                    )
                }
                (None, None) => {
                    return Err(AppError::InvalidSchedule(
                        "specify either --date or --weekday".into(),
                    ));
                }
            };

            let window = window.as_deref().map(parse_window).transpose()?;
            let def = def.with_window(window).with_daily_check_in(!*no_daily);

            ScheduleLogic::add(&mut pool, &def)?;
        }
        ScheduleAction::List { worker, all } => ScheduleLogic::list(&mut pool, worker, *all)?,
        ScheduleAction::Deactivate { id } => ScheduleLogic::set_active(&mut pool, *id, false)?,
        ScheduleAction::Activate { id } => ScheduleLogic::set_active(&mut pool, *id, true)?,
    }

    Ok(())
}
