use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_schedule, load_schedule_by_id, load_schedules, set_schedule_active};
use crate::errors::{AppError, AppResult};
use crate::models::schedule::{ScheduleDefinition, ScheduleMode};
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREEN, GREY, RESET};
use crate::utils::table::{Column, Table};

/// High-level logic for the `schedule` commands.
pub struct ScheduleLogic;

impl ScheduleLogic {
    pub fn add(pool: &mut DbPool, def: &ScheduleDefinition) -> AppResult<i64> {
        if let ScheduleMode::Recurring {
            effective_from: Some(from),
            expiry_at: Some(until),
            ..
        } = &def.mode
            && until < from
        {
            return Err(AppError::InvalidSchedule(format!(
                "expiry {} precedes effective date {}",
                until, from
            )));
        }

        let id = insert_schedule(&pool.conn, def)?;
        let desc = def.mode.describe();

        audit_quiet(
            &pool.conn,
            "schedule_add",
            &def.worker_id,
            &format!("Schedule #{} {}", id, desc),
        );

        success(format!(
            "Schedule #{} added for {}: {}.",
            id, def.worker_id, desc
        ));
        Ok(id)
    }

    pub fn set_active(pool: &mut DbPool, id: i64, active: bool) -> AppResult<()> {
        let def = load_schedule_by_id(&pool.conn, id)?;
        set_schedule_active(&pool.conn, id, active)?;

        let (op, verb) = if active {
            ("schedule_activate", "activated")
        } else {
            ("schedule_deactivate", "deactivated")
        };

        audit_quiet(
            &pool.conn,
            op,
            &def.worker_id,
            &format!("Schedule #{} {}", id, verb),
        );

        success(format!("Schedule #{} ({}) {}.", id, def.mode.describe(), verb));
        Ok(())
    }

    pub fn list(pool: &mut DbPool, worker_id: &str, include_inactive: bool) -> AppResult<()> {
        let defs = load_schedules(pool, worker_id, include_inactive)?;

        if defs.is_empty() {
            info(format!("No schedules for {}.", worker_id));
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("ID", 5),
            Column::new("TEAM", 10),
            Column::new("WHEN", 44),
            Column::new("WINDOW", 11),
            Column::new("DAILY", 5),
            Column::new("STATUS", 8),
        ]);

        for d in &defs {
            let status = if d.is_active {
                format!("{GREEN}active{RESET}")
            } else {
                format!("{GREY}inactive{RESET}")
            };

            table.add_row(vec![
                d.id.to_string(),
                d.team_id.clone(),
                d.mode.describe(),
                d.check_in_window
                    .map(|w| w.label())
                    .unwrap_or_else(|| "--".to_string()),
                if d.requires_daily_check_in { "yes" } else { "no" }.to_string(),
                status,
            ]);
        }

        print!("{}", table.render());
        Ok(())
    }
}
