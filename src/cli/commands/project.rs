use crate::cli::commands::common::{open_pool, principal, print_json, respond};
use crate::cli::parser::{Cli, ProjectAction};
use crate::config::Config;
use crate::core::admin::AdminLogic;
use crate::errors::AppResult;
use crate::models::response::ApiResponse;
use crate::utils::table::{Column, Table};

pub fn handle(cli: &Cli, action: &ProjectAction, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match action {
        ProjectAction::Add { title } => {
            let who = principal(cli, cfg, &pool)?;
            let project = AdminLogic::add_project(&mut pool, &who, title)?;
            respond(
                cli,
                &ApiResponse::new("ok")
                    .with_message(format!("Project #{} '{}' added.", project.id, project.title)),
            )
        }
        ProjectAction::List => {
            let projects = AdminLogic::list_projects(&pool)?;
            if cli.json {
                return print_json(&projects);
            }

            let mut table = Table::new(vec![Column::new("ID", 6), Column::new("TITLE", 40)]);
            for p in &projects {
                table.add_row(vec![p.id.to_string(), p.title.clone()]);
            }
            print!("{}", table.render());
            Ok(())
        }
    }
}
