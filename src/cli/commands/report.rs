use crate::cli::commands::common::{open_pool, principal, print_json, resolve_scope};
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::models::report::ShiftReport;
use crate::ui::messages::{header, info};
use crate::utils::colors::{GREEN, RESET, color_for_open, colorize_optional};
use crate::utils::date::parse_optional_period;
use crate::utils::formatting::{pad_left, pad_right, separator};
use crate::utils::mins2readable;
use crate::utils::time::display;

fn print_shift_report(report: &ShiftReport, cfg: &Config) {
    let sep = separator(&cfg.separator_char, 86);

    println!(
        "{} {} {} {} {} {} {}",
        pad_right("SHIFT", 6),
        pad_right("EMPLOYEE", 14),
        pad_right("START", 17),
        pad_right("END", 17),
        pad_left("TOTAL", 8),
        pad_left("BREAKS", 8),
        pad_left("NET", 8),
    );
    println!("{sep}");

    for row in &report.rows {
        let end = row
            .ended_at
            .as_ref()
            .map(display)
            .unwrap_or_else(|| "--".into());
        println!(
            "{}{} {} {} {}{} {} {} {}{}",
            color_for_open(row.ended_at.is_none()),
            pad_right(&row.shift_id.to_string(), 6),
            pad_right(&row.employee, 14),
            pad_right(&display(&row.started_at), 17),
            colorize_optional(&pad_right(&end, 17)),
            color_for_open(row.ended_at.is_none()),
            pad_left(&mins2readable(row.total_minutes, false, true), 8),
            pad_left(&mins2readable(row.breaks_minutes, false, true), 8),
            pad_left(&mins2readable(row.net_minutes, false, true), 8),
            RESET
        );
    }

    println!("{sep}");
    println!(
        "{GREEN}{} shift(s){RESET}   total {}   breaks {}   net {}",
        report.totals.shifts,
        mins2readable(report.totals.total_minutes, false, false),
        mins2readable(report.totals.breaks_minutes, false, false),
        mins2readable(report.totals.net_minutes, false, false),
    );
}

pub fn handle_shift_report(
    cli: &Cli,
    employee: Option<&String>,
    all: bool,
    period: Option<&String>,
    cfg: &Config,
) -> AppResult<()> {
    let range = parse_optional_period(period)?;
    let pool = open_pool(cfg)?;
    let who = principal(cli, cfg, &pool)?;
    let scope = resolve_scope(&pool, &who, employee, all)?;

    let report = ReportLogic::shift_report(&pool.conn, &who, scope, range)?;

    if cli.json {
        return print_json(&report);
    }

    if report.rows.is_empty() {
        info("No shifts found for the selected period.");
        return Ok(());
    }

    header("Shift report");
    print_shift_report(&report, cfg);
    Ok(())
}

pub fn handle_task_report(
    cli: &Cli,
    employee: Option<&String>,
    all: bool,
    period: Option<&String>,
    cfg: &Config,
) -> AppResult<()> {
    let range = parse_optional_period(period)?;
    let pool = open_pool(cfg)?;
    let who = principal(cli, cfg, &pool)?;
    let scope = resolve_scope(&pool, &who, employee, all)?;

    let rows = ReportLogic::task_report(&pool.conn, &who, scope, range)?;

    if cli.json {
        return print_json(&rows);
    }

    if rows.is_empty() {
        info("No closed task timers found for the selected period.");
        return Ok(());
    }

    header("Task time per employee");
    for r in &rows {
        println!(
            "{} {} ({} min)",
            pad_right(&r.employee, 20),
            mins2readable(r.minutes, false, false),
            r.minutes
        );
    }
    Ok(())
}
