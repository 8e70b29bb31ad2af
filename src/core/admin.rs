//! Administrative operations on the reference tables.

use crate::core::identity::Principal;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    count_employees, get_project, insert_employee, insert_project, insert_task, list_employees,
    list_projects, list_tasks,
};
use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, NewEmployee};
use crate::models::project::{Project, Task};
use rusqlite::TransactionBehavior;

pub struct AdminLogic;

fn non_empty(value: &str, what: &str) -> AppResult<String> {
    let v = value.trim();
    if v.is_empty() {
        return Err(AppError::Validation(format!("{what} must not be empty")));
    }
    Ok(v.to_string())
}

impl AdminLogic {
    /// Register an employee. The first employee of an empty database may be
    /// created without an acting principal; afterwards an administrator is
    /// required.
    pub fn add_employee(
        pool: &mut DbPool,
        actor: Option<&Principal>,
        new: NewEmployee,
    ) -> AppResult<Employee> {
        let username = non_empty(&new.username, "username")?;

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let bootstrap = count_employees(&tx)? == 0;
        if !bootstrap {
            match actor {
                Some(p) => p.require_privileged("add employees")?,
                None => {
                    return Err(AppError::PermissionDenied(
                        "an administrator must be given with --user".into(),
                    ));
                }
            }
        }

        let employee = insert_employee(
            &tx,
            &NewEmployee {
                username,
                display_name: new.display_name.trim().to_string(),
                position: new.position.trim().to_string(),
                department: new.department.trim().to_string(),
                is_admin: new.is_admin,
            },
        )?;

        let by = actor
            .map(|p| p.employee.username.clone())
            .unwrap_or_else(|| "bootstrap".to_string());
        ttlog(
            &tx,
            "employee_add",
            &employee.username,
            &format!(
                "Employee #{} added by {}{}",
                employee.id,
                by,
                if employee.is_admin { " (admin)" } else { "" }
            ),
        )?;

        tx.commit()?;
        Ok(employee)
    }

    pub fn list_employees(pool: &DbPool) -> AppResult<Vec<Employee>> {
        list_employees(&pool.conn)
    }

    pub fn add_project(pool: &mut DbPool, actor: &Principal, title: &str) -> AppResult<Project> {
        actor.require_privileged("add projects")?;
        let title = non_empty(title, "project title")?;

        let tx = pool.conn.transaction()?;
        let project = insert_project(&tx, &title)?;
        ttlog(
            &tx,
            "project_add",
            &project.title,
            &format!("Project #{} added by {}", project.id, actor.employee.username),
        )?;
        tx.commit()?;
        Ok(project)
    }

    pub fn list_projects(pool: &DbPool) -> AppResult<Vec<Project>> {
        list_projects(&pool.conn)
    }

    pub fn add_task(
        pool: &mut DbPool,
        actor: &Principal,
        project_id: i64,
        title: &str,
    ) -> AppResult<Task> {
        actor.require_privileged("add tasks")?;
        let title = non_empty(title, "task title")?;

        let tx = pool.conn.transaction()?;
        get_project(&tx, project_id)?
            .ok_or_else(|| AppError::NotFound(format!("project #{project_id}")))?;
        let task = insert_task(&tx, project_id, &title)?;
        ttlog(
            &tx,
            "task_add",
            &task.title,
            &format!(
                "Task #{} added to project #{} by {}",
                task.id, project_id, actor.employee.username
            ),
        )?;
        tx.commit()?;
        Ok(task)
    }

    pub fn list_tasks(pool: &DbPool, project_id: Option<i64>) -> AppResult<Vec<Task>> {
        list_tasks(&pool.conn, project_id)
    }
}
