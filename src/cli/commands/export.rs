use crate::cli::commands::common::{open_pool, principal, resolve_scope};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::logic::ExportLogic;
use crate::utils::date::parse_optional_period;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        period,
        employee,
        all,
        force,
    } = &cli.command
    {
        let range = parse_optional_period(period.as_ref())?;
        let mut pool = open_pool(cfg)?;
        let who = principal(cli, cfg, &pool)?;
        let scope = resolve_scope(&pool, &who, employee.as_ref(), *all)?;

        ExportLogic::export(&mut pool, &who, scope, *format, file, range, *force)?;
    }
    Ok(())
}
