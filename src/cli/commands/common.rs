//! Glue shared by the command handlers: opening the database, resolving
//! the caller, choosing the clock and rendering responses.

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::clock::{Clock, FixedClock, SystemClock};
use crate::core::identity::{DbIdentity, IdentityProvider, Principal, resolve_username};
use crate::db::migrate::pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::report::ReportScope;
use crate::models::response::ApiResponse;
use crate::ui::messages::success;
use crate::utils::time::parse_optional_timestamp;
use serde::Serialize;

/// Open the configured database; refuses a database that `init` has not
/// prepared.
pub fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::with_busy_timeout(&cfg.database, cfg.busy_timeout_ms)?;

    if !pending_migrations(&pool.conn)?.is_empty() {
        return Err(AppError::Migration(format!(
            "database {} is not initialized or outdated; run `worktracker init` or `worktracker db --migrate`",
            cfg.database
        )));
    }

    Ok(pool)
}

pub fn principal(cli: &Cli, cfg: &Config, pool: &DbPool) -> AppResult<Principal> {
    let username = resolve_username(cli.user.as_deref(), cfg.user.as_deref())?;
    DbIdentity::new(&pool.conn).resolve(&username)
}

/// `--at` pins the clock to the given instant; otherwise the system clock.
pub fn clock_for(at: Option<&String>) -> AppResult<Box<dyn Clock>> {
    Ok(match parse_optional_timestamp(at)? {
        Some(ts) => Box::new(FixedClock(ts)),
        None => Box::new(SystemClock),
    })
}

/// Turn `--employee NAME` / `--all` into a report scope. Defaults to the
/// caller.
pub fn resolve_scope(
    pool: &DbPool,
    principal: &Principal,
    employee: Option<&String>,
    all: bool,
) -> AppResult<ReportScope> {
    if all {
        return Ok(ReportScope::All);
    }
    match employee {
        Some(name) => {
            let other = DbIdentity::new(&pool.conn).resolve(name)?;
            Ok(ReportScope::Employee(other.employee.id))
        }
        None => Ok(ReportScope::Employee(principal.employee.id)),
    }
}

/// Print an operation result.
pub fn respond(cli: &Cli, resp: &ApiResponse) -> AppResult<()> {
    if cli.json {
        print_json(resp)
    } else {
        if let Some(msg) = &resp.message {
            success(msg);
        }
        Ok(())
    }
}

pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let out = serde_json::to_string_pretty(value).map_err(|e| AppError::Other(e.to_string()))?;
    println!("{out}");
    Ok(())
}
