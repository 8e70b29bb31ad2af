//! worktracker library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules (tracker, reports, storage).

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
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use models::response::ApiResponse;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Shift { action } => commands::shift::handle(cli, action, cfg),
        Commands::Break { action } => commands::breaks::handle(cli, action, cfg),
        Commands::Task { action } => commands::task::handle(cli, action, cfg),
        Commands::Status => commands::status::handle(cli, cfg),
        Commands::History { kind, period } => {
            commands::history::handle(cli, kind.as_ref(), period.as_ref(), cfg)
        }
        Commands::Report {
            employee,
            all,
            period,
        } => commands::report::handle_shift_report(
            cli,
            employee.as_ref(),
            *all,
            period.as_ref(),
            cfg,
        ),
        Commands::TaskReport {
            employee,
            all,
            period,
        } => commands::report::handle_task_report(
            cli,
            employee.as_ref(),
            *all,
            period.as_ref(),
            cfg,
        ),
        Commands::Dashboard => commands::dashboard::handle(cli, cfg),
        Commands::Employee { action } => commands::employee::handle(cli, action, cfg),
        Commands::Project { action } => commands::project::handle(cli, action, cfg),
        Commands::Export { .. } => commands::export::handle(cli, cfg),
        Commands::Backup { .. } => commands::backup::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs. Returns the process exit code.
pub fn run() -> i32 {
    let cli = Cli::parse();
    ui::messages::set_quiet(cli.json);

    let result = Config::load().and_then(|mut cfg| {
        if let Some(custom_db) = &cli.db {
            cfg.database = custom_db.clone();
        }
        dispatch(&cli, &cfg)
    });

    match result {
        Ok(()) => 0,
        Err(e) => {
            if cli.json {
                match serde_json::to_string_pretty(&ApiResponse::from_error(&e)) {
                    Ok(out) => println!("{out}"),
                    Err(_) => ui::messages::error(&e),
                }
            } else {
                ui::messages::error(&e);
            }
            e.exit_code()
        }
    }
}
