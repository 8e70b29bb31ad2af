use crate::cli::commands::common::{clock_for, open_pool, principal, print_json, respond};
use crate::cli::parser::{Cli, TaskAction};
use crate::config::Config;
use crate::core::admin::AdminLogic;
use crate::core::calculator::duration_minutes;
use crate::core::tracker::IntervalTracker;
use crate::errors::AppResult;
use crate::models::interval_kind::IntervalKind;
use crate::models::response::ApiResponse;
use crate::utils::table::{Column, Table};
use crate::utils::time::display;

pub fn handle(cli: &Cli, action: &TaskAction, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match action {
        TaskAction::Start { task_id, at } => {
            let who = principal(cli, cfg, &pool)?;
            let clock = clock_for(at.as_ref())?;
            let timer = IntervalTracker::new(&mut pool, clock.as_ref()).open(
                &who.employee,
                IntervalKind::TaskTimer,
                Some(*task_id),
                None,
            )?;
            let resp = ApiResponse::new("task_started")
                .with_interval(&timer)
                .with_message(format!(
                    "Timer #{} on task #{} started at {}.",
                    timer.id,
                    task_id,
                    display(&timer.started_at)
                ));
            respond(cli, &resp)
        }
        TaskAction::Stop { task_id, at } => {
            let who = principal(cli, cfg, &pool)?;
            let clock = clock_for(at.as_ref())?;
            let timer = IntervalTracker::new(&mut pool, clock.as_ref()).close(
                &who.employee,
                IntervalKind::TaskTimer,
                Some(*task_id),
            )?;
            let minutes = duration_minutes(&timer);
            let resp = ApiResponse::new("task_ended")
                .with_interval(&timer)
                .with_minutes(minutes)
                .with_message(format!(
                    "Timer #{} on task #{} stopped ({} min).",
                    timer.id, task_id, minutes
                ));
            respond(cli, &resp)
        }
        TaskAction::Add { project, title } => {
            let who = principal(cli, cfg, &pool)?;
            let task = AdminLogic::add_task(&mut pool, &who, *project, title)?;
            let resp = ApiResponse::new("ok").with_message(format!(
                "Task #{} '{}' added to project #{}.",
                task.id, task.title, task.project_id
            ));
            respond(cli, &resp)
        }
        TaskAction::List { project } => {
            let tasks = AdminLogic::list_tasks(&pool, *project)?;
            if cli.json {
                return print_json(&tasks);
            }

            let mut table = Table::new(vec![
                Column::new("ID", 6),
                Column::new("PROJECT", 8),
                Column::new("TITLE", 40),
            ]);
            for t in &tasks {
                table.add_row(vec![
                    t.id.to_string(),
                    t.project_id.to_string(),
                    t.title.clone(),
                ]);
            }
            print!("{}", table.render());
            Ok(())
        }
    }
}
