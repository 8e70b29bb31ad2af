use crate::cli::commands::common::{open_pool, principal, print_json};
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::calculator::duration_minutes;
use crate::core::clock::SystemClock;
use crate::core::tracker::IntervalTracker;
use crate::errors::{AppError, AppResult};
use crate::models::interval_kind::IntervalKind;
use crate::ui::messages::info;
use crate::utils::date::parse_optional_period;
use crate::utils::table::{Column, Table};
use crate::utils::time::display;

pub fn handle(
    cli: &Cli,
    kind: Option<&String>,
    period: Option<&String>,
    cfg: &Config,
) -> AppResult<()> {
    let kind = match kind {
        Some(k) => {
            Some(IntervalKind::from_input(k).ok_or_else(|| AppError::InvalidKind(k.clone()))?)
        }
        None => None,
    };
    let range = parse_optional_period(period)?;

    let mut pool = open_pool(cfg)?;
    let who = principal(cli, cfg, &pool)?;
    let clock = SystemClock;
    let rows =
        IntervalTracker::new(&mut pool, &clock).history(&who.employee, kind, range.as_ref())?;

    if cli.json {
        return print_json(&rows);
    }

    if rows.is_empty() {
        info("No intervals found.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::new("ID", 6),
        Column::new("KIND", 10),
        Column::new("SCOPE", 6),
        Column::new("START", 17),
        Column::new("END", 17),
        Column::new("MIN", 6),
        Column::new("TYPE", 8),
    ]);

    for iv in &rows {
        let end = iv.ended_at.as_ref().map(display);
        let minutes = iv.ended_at.map(|_| duration_minutes(iv).to_string());
        table.add_row(vec![
            iv.id.to_string(),
            iv.kind.label().to_string(),
            iv.scope_id.to_string(),
            display(&iv.started_at),
            end.unwrap_or_else(|| "--".into()),
            minutes.unwrap_or_else(|| "-".into()),
            iv.break_type.map(|b| b.to_string()).unwrap_or_default(),
        ]);
    }

    print!("{}", table.render());
    Ok(())
}
