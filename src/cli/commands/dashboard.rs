use crate::cli::commands::common::{open_pool, principal, print_json};
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREEN, RESET};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let pool = open_pool(cfg)?;
    let who = principal(cli, cfg, &pool)?;
    let dash = ReportLogic::dashboard(&pool.conn, &who)?;

    if cli.json {
        return print_json(&dash);
    }

    header("Dashboard");
    for (label, value) in [
        ("Employees", dash.employees),
        ("Projects", dash.projects),
        ("Tasks", dash.tasks),
        ("Employees on shift", dash.active_employees),
        ("Running task timers", dash.running_task_timers),
    ] {
        println!("{CYAN}• {label}:{RESET} {GREEN}{value}{RESET}");
    }
    Ok(())
}
