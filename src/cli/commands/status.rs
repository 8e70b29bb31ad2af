use crate::cli::commands::common::{open_pool, principal, print_json};
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::tracker::IntervalTracker;
use crate::errors::AppResult;
use crate::models::interval::OpenInterval;
use crate::utils::colors::{CYAN, GREY, RESET};
use crate::utils::mins2readable;
use crate::utils::time::display;

fn line(label: &str, open: Option<&OpenInterval>) {
    match open {
        Some(o) => println!(
            "{CYAN}{:<8}{RESET} #{} since {} ({})",
            label,
            o.interval.id,
            display(&o.interval.started_at),
            mins2readable(o.elapsed_minutes, false, false)
        ),
        None => println!("{CYAN}{:<8}{RESET} {GREY}--{RESET}", label),
    }
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;
    let who = principal(cli, cfg, &pool)?;
    let clock = SystemClock;
    let state = IntervalTracker::new(&mut pool, &clock).current(&who.employee)?;

    if cli.json {
        return print_json(&state);
    }

    println!("👤 {} ({})", who.employee.name(), who.employee.username);
    line("Shift", state.shift.as_ref());
    line("Break", state.open_break.as_ref());
    if state.task_timers.is_empty() {
        line("Task", None);
    }
    for t in &state.task_timers {
        println!(
            "{CYAN}{:<8}{RESET} #{} on task #{} since {} ({})",
            "Task",
            t.interval.id,
            t.interval.scope_id,
            display(&t.interval.started_at),
            mins2readable(t.elapsed_minutes, false, false)
        );
    }

    Ok(())
}
