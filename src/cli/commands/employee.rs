use crate::cli::commands::common::{open_pool, principal, print_json, respond};
use crate::cli::parser::{Cli, EmployeeAction};
use crate::config::Config;
use crate::core::admin::AdminLogic;
use crate::db::queries::count_employees;
use crate::errors::AppResult;
use crate::models::employee::NewEmployee;
use crate::models::response::ApiResponse;
use crate::utils::table::{Column, Table};

pub fn handle(cli: &Cli, action: &EmployeeAction, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match action {
        EmployeeAction::Add {
            username,
            name,
            position,
            department,
            admin,
        } => {
            // An empty directory accepts its first employee without a caller.
            let actor = if cli.user.is_some() || count_employees(&pool.conn)? > 0 {
                Some(principal(cli, cfg, &pool)?)
            } else {
                None
            };

            let emp = AdminLogic::add_employee(
                &mut pool,
                actor.as_ref(),
                NewEmployee {
                    username: username.clone(),
                    display_name: name.clone().unwrap_or_default(),
                    position: position.clone(),
                    department: department.clone(),
                    is_admin: *admin,
                },
            )?;

            let resp = ApiResponse::new("ok").with_message(format!(
                "Employee #{} '{}' added{}.",
                emp.id,
                emp.username,
                if emp.is_admin { " as administrator" } else { "" }
            ));
            respond(cli, &resp)
        }
        EmployeeAction::List => {
            let employees = AdminLogic::list_employees(&pool)?;
            if cli.json {
                return print_json(&employees);
            }

            let mut table = Table::new(vec![
                Column::new("ID", 5),
                Column::new("USERNAME", 16),
                Column::new("NAME", 22),
                Column::new("POSITION", 16),
                Column::new("DEPARTMENT", 16),
                Column::new("ADMIN", 5),
            ]);
            for e in &employees {
                table.add_row(vec![
                    e.id.to_string(),
                    e.username.clone(),
                    e.name().to_string(),
                    e.position.clone(),
                    e.department.clone(),
                    if e.is_admin { "yes".into() } else { String::new() },
                ]);
            }
            print!("{}", table.render());
            Ok(())
        }
    }
}
