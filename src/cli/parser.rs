use crate::config::MAX_WINDOW_DAYS;
use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

fn bounded_days(s: &str, min: u32) -> Result<u32, String> {
    let n: u32 = s.trim().parse().map_err(|_| format!("'{s}' is not a number of days"))?;
    if (min..=MAX_WINDOW_DAYS).contains(&n) {
        Ok(n)
    } else {
        Err(format!("must be between {min} and {MAX_WINDOW_DAYS} days"))
    }
}

/// `--lookback`: today is always walked, so at least 1.
fn lookback_days(s: &str) -> Result<u32, String> {
    bounded_days(s, 1)
}

fn horizon_days(s: &str) -> Result<u32, String> {
    bounded_days(s, 0)
}

/// Command-line interface definition for rCheckin
/// CLI application to track daily check-ins against schedules with SQLite
#[derive(Parser)]
#[command(
    name = "rcheckin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track worker check-ins against schedules, absences and attendance streaks using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(global = true, long = "today", value_name = "DATE")]
    pub today: Option<String>,

    /// Treat this time as now (HH:MM)
    #[arg(global = true, long = "now", value_name = "TIME")]
    pub now: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage schedule assignments
    Schedule {
        #[command(subcommand)]
        action: ScheduleAction,
    },

    /// Manage leave, injury and incident exceptions
    Exception {
        #[command(subcommand)]
        action: ExceptionAction,
    },

    /// Record or inspect check-ins
    Checkin {
        #[command(subcommand)]
        action: CheckinAction,
    },

    /// Show the current streak and attendance summary of a worker
    Streak {
        worker: String,

        #[arg(long, value_parser = lookback_days, help = "Days to look back, today included")]
        lookback: Option<u32>,

        #[arg(long, value_parser = horizon_days, help = "Days to look ahead for the next check-in")]
        horizon: Option<u32>,

        #[arg(long, help = "Print the summary as JSON")]
        json: bool,
    },

    /// Show the day-by-day attendance classification
    History {
        worker: String,

        #[arg(long, value_parser = lookback_days, help = "Days to look back, today included")]
        lookback: Option<u32>,
    },

    /// Show the next required check-in date
    Next {
        worker: String,

        #[arg(long, value_name = "DATE", help = "Start searching from this date")]
        from: Option<String>,

        #[arg(long, value_parser = horizon_days, help = "Days to look ahead")]
        horizon: Option<u32>,
    },

    /// Export the attendance history of a worker
    Export {
        worker: String,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, value_parser = lookback_days, help = "Days to look back, today included")]
        lookback: Option<u32>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Assign a fixed date or a weekly recurrence to a worker
    Add {
        worker: String,

        #[arg(long, help = "Team identifier (default from config)")]
        team: Option<String>,

        #[arg(
            long,
            value_name = "DATE",
            conflicts_with = "weekday",
            required_unless_present = "weekday",
            help = "Single scheduled date (YYYY-MM-DD)"
        )]
        date: Option<String>,

        #[arg(long, help = "Weekly recurrence: mon..sun or 0 (Sunday) .. 6")]
        weekday: Option<String>,

        #[arg(long, value_name = "DATE", requires = "weekday", help = "First valid date")]
        from: Option<String>,

        #[arg(long, value_name = "DATE", requires = "weekday", help = "Last valid date")]
        until: Option<String>,

        #[arg(long, value_name = "HH:MM-HH:MM", help = "Check-in window")]
        window: Option<String>,

        #[arg(long = "no-daily", help = "No daily check-in required (day closes at midnight)")]
        no_daily: bool,
    },

    /// List the schedules of a worker
    List {
        worker: String,

        #[arg(long, help = "Include inactive schedules")]
        all: bool,
    },

    /// Deactivate a schedule
    Deactivate { id: i64 },

    /// Re-activate a schedule
    Activate { id: i64 },
}

#[derive(Subcommand)]
pub enum ExceptionAction {
    /// Record an absence covering a date range
    Add {
        worker: String,

        #[arg(long = "type", value_name = "TYPE", help = "leave, injury, incident or other")]
        kind: String,

        #[arg(long, value_name = "DATE")]
        start: String,

        #[arg(long, value_name = "DATE", help = "Last day (omit for open-ended)")]
        end: Option<String>,

        #[arg(long)]
        reason: Option<String>,
    },

    /// Close an exception
    Close {
        id: i64,

        #[arg(long, value_name = "DATE", help = "Closing date (default today)")]
        on: Option<String>,
    },

    /// List the exceptions of a worker
    List { worker: String },
}

#[derive(Subcommand)]
pub enum CheckinAction {
    /// Record a check-in
    Add {
        worker: String,

        #[arg(long, value_name = "DATE", help = "Check-in date (default today)")]
        date: Option<String>,

        #[arg(long, value_name = "HH:MM", help = "Check-in time (default now)")]
        time: Option<String>,
    },

    /// List check-ins
    List {
        worker: String,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,
    },

    /// Delete the check-in of a date
    Del {
        worker: String,

        #[arg(long, value_name = "DATE")]
        date: String,
    },
}
