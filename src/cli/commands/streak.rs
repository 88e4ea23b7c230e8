use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

use super::Clock;

pub fn handle(cmd: &Commands, cfg: &Config, clock: &Clock) -> AppResult<()> {
    if let Commands::Streak {
        worker,
        lookback,
        horizon,
        json,
    } = cmd
    {
        let opts = clock.report_options(cfg, *lookback, *horizon);
        let mut pool = DbPool::new(&cfg.database)?;
        ReportLogic::streak(&mut pool, worker, &opts, *json, &cfg.separator_char)?;
    }
    Ok(())
}
