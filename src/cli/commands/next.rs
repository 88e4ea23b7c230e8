use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

use super::{Clock, parse_opt_date_arg};

pub fn handle(cmd: &Commands, cfg: &Config, clock: &Clock) -> AppResult<()> {
    if let Commands::Next {
        worker,
        from,
        horizon,
    } = cmd
    {
        let from = parse_opt_date_arg(from)?.unwrap_or(clock.today);
        let horizon = horizon.unwrap_or(cfg.horizon_days);

        let mut pool = DbPool::new(&cfg.database)?;
        ReportLogic::next(&mut pool, worker, from, horizon, &cfg.next_label_format)?;
    }
    Ok(())
}
