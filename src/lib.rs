//! rCheckin library root.
//! Exposes the CLI parser, the high-level run() function and the attendance
//! engine (`core`) so it can be driven without the binary.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands::Clock;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let clock = Clock::from_cli(cli)?;

    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Schedule { .. } => cli::commands::schedule::handle(&cli.command, cfg),
        Commands::Exception { .. } => cli::commands::exception::handle(&cli.command, cfg, &clock),
        Commands::Checkin { .. } => cli::commands::checkin::handle(&cli.command, cfg, &clock),
        Commands::Streak { .. } => cli::commands::streak::handle(&cli.command, cfg, &clock),
        Commands::History { .. } => cli::commands::history::handle(&cli.command, cfg, &clock),
        Commands::Next { .. } => cli::commands::next::handle(&cli.command, cfg, &clock),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg, &clock),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // load config once
    let mut cfg = Config::load()?;

    // command-line override of the database path
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
