use crate::errors::{AppError, AppResult, is_constraint_violation, is_unique_violation};
use crate::models::break_type::BreakType;
use crate::models::date_range::DateRange;
use crate::models::employee::{Employee, NewEmployee};
use crate::models::interval::{Interval, NewInterval};
use crate::models::interval_kind::IntervalKind;
use crate::models::project::{Project, Task};
use crate::models::report::{Dashboard, ReportScope};
use crate::utils::time::{from_db, to_db};
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

const INTERVAL_COLUMNS: &str = "id, employee_id, kind, scope_id, break_type, started_at, ended_at";

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_ts(idx: usize, raw: &str) -> Result<DateTime<Utc>> {
    from_db(raw).ok_or_else(|| conversion_error(idx, AppError::InvalidTime(raw.to_string())))
}

pub fn map_interval(row: &Row) -> Result<Interval> {
    let kind_str: String = row.get("kind")?;
    let kind = IntervalKind::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(2, AppError::InvalidKind(kind_str.clone())))?;

    let break_type = match row.get::<_, Option<String>>("break_type")? {
        Some(s) => Some(
            BreakType::from_db_str(&s)
                .ok_or_else(|| conversion_error(4, AppError::InvalidBreakType(s.clone())))?,
        ),
        None => None,
    };

    let started_raw: String = row.get("started_at")?;
    let ended_raw: Option<String> = row.get("ended_at")?;

    Ok(Interval {
        id: row.get("id")?,
        kind,
        employee_id: row.get("employee_id")?,
        scope_id: row.get("scope_id")?,
        started_at: parse_ts(5, &started_raw)?,
        ended_at: ended_raw.as_deref().map(|s| parse_ts(6, s)).transpose()?,
        break_type,
    })
}

fn collect<T>(rows: impl Iterator<Item = Result<T>>) -> AppResult<Vec<T>> {
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ------------------------------------------------
// Intervals
// ------------------------------------------------

/// Insert a row. A hit on the open-interval unique index is a conflict;
/// other constraint failures (unknown employee, CHECK rules) mean the row
/// itself is invalid.
pub fn insert_interval(conn: &Connection, new: &NewInterval) -> AppResult<Interval> {
    let res = conn.execute(
        "INSERT INTO intervals (employee_id, kind, scope_id, break_type, started_at, ended_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            new.employee_id,
            new.kind.to_db_str(),
            new.scope_id,
            new.break_type.map(|b| b.to_db_str()),
            to_db(&new.started_at),
            new.ended_at.as_ref().map(to_db),
        ],
    );

    match res {
        Ok(_) => {}
        Err(e) if is_unique_violation(&e) => {
            return Err(AppError::Conflict(format!(
                "{} already open for this employee",
                new.kind.label()
            )));
        }
        Err(e) if is_constraint_violation(&e) => {
            return Err(AppError::Validation(format!(
                "{} rejected: {}",
                new.kind.label(),
                e
            )));
        }
        Err(e) => return Err(e.into()),
    }

    let id = conn.last_insert_rowid();
    get_interval(conn, id)?
        .ok_or_else(|| AppError::Other(format!("interval {id} vanished after insert")))
}

/// Set `ended_at` on a still-open row. Returns the number of rows changed
/// (0 when the row was already closed).
pub fn close_interval(conn: &Connection, id: i64, ended_at: &DateTime<Utc>) -> AppResult<usize> {
    let changed = conn.execute(
        "UPDATE intervals SET ended_at = ?1 WHERE id = ?2 AND ended_at IS NULL",
        params![to_db(ended_at), id],
    )?;
    Ok(changed)
}

pub fn get_interval(conn: &Connection, id: i64) -> AppResult<Option<Interval>> {
    let sql = format!("SELECT {INTERVAL_COLUMNS} FROM intervals WHERE id = ?1");
    let mut stmt = conn.prepare_cached(&sql)?;
    Ok(stmt.query_row([id], map_interval).optional()?)
}

pub fn find_open(
    conn: &Connection,
    employee_id: i64,
    kind: IntervalKind,
    scope_id: i64,
) -> AppResult<Option<Interval>> {
    let sql = format!(
        "SELECT {INTERVAL_COLUMNS} FROM intervals
         WHERE employee_id = ?1 AND kind = ?2 AND scope_id = ?3 AND ended_at IS NULL"
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    Ok(stmt
        .query_row(params![employee_id, kind.to_db_str(), scope_id], map_interval)
        .optional()?)
}

/// All open rows of one kind for an employee (any scope).
pub fn find_open_by_kind(
    conn: &Connection,
    employee_id: i64,
    kind: IntervalKind,
) -> AppResult<Vec<Interval>> {
    let sql = format!(
        "SELECT {INTERVAL_COLUMNS} FROM intervals
         WHERE employee_id = ?1 AND kind = ?2 AND ended_at IS NULL
         ORDER BY started_at ASC, id ASC"
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params![employee_id, kind.to_db_str()], map_interval)?;
    collect(rows)
}

pub fn list_intervals(
    conn: &Connection,
    employee_id: i64,
    kind: Option<IntervalKind>,
    range: Option<&DateRange>,
) -> AppResult<Vec<Interval>> {
    let mut sql = format!("SELECT {INTERVAL_COLUMNS} FROM intervals WHERE employee_id = ?");
    let mut args: Vec<Value> = vec![Value::Integer(employee_id)];

    if let Some(k) = kind {
        sql.push_str(" AND kind = ?");
        args.push(Value::Text(k.to_db_str().to_string()));
    }
    if let Some(r) = range {
        sql.push_str(" AND started_at >= ? AND started_at < ?");
        args.push(Value::Text(r.lower_bound()));
        args.push(Value::Text(r.upper_bound_exclusive()));
    }
    sql.push_str(" ORDER BY started_at ASC, id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args), map_interval)?;
    collect(rows)
}

/// Build the WHERE clause shared by the report queries. `alias` is the
/// table alias of the interval being filtered.
fn scope_filter(
    alias: &str,
    scope: ReportScope,
    range: Option<&DateRange>,
    args: &mut Vec<Value>,
) -> String {
    let mut clause = String::new();
    if let ReportScope::Employee(id) = scope {
        clause.push_str(&format!(" AND {alias}.employee_id = ?"));
        args.push(Value::Integer(id));
    }
    if let Some(r) = range {
        clause.push_str(&format!(
            " AND {alias}.started_at >= ? AND {alias}.started_at < ?"
        ));
        args.push(Value::Text(r.lower_bound()));
        args.push(Value::Text(r.upper_bound_exclusive()));
    }
    clause
}

/// Shifts in scope, with the owner's username, ordered by start.
pub fn load_shifts(
    conn: &Connection,
    scope: ReportScope,
    range: Option<&DateRange>,
) -> AppResult<Vec<(Interval, String)>> {
    let mut args = Vec::new();
    let filter = scope_filter("s", scope, range, &mut args);
    let sql = format!(
        "SELECT s.id, s.employee_id, s.kind, s.scope_id, s.break_type, s.started_at, s.ended_at,
                e.username
         FROM intervals s JOIN employees e ON e.id = s.employee_id
         WHERE s.kind = 'shift'{filter}
         ORDER BY s.started_at ASC, s.id ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args), |row| {
        Ok((map_interval(row)?, row.get::<_, String>("username")?))
    })?;
    collect(rows)
}

/// Every break whose enclosing shift matches the same filter as
/// `load_shifts`, fetched in one query.
pub fn load_breaks_for_shifts(
    conn: &Connection,
    scope: ReportScope,
    range: Option<&DateRange>,
) -> AppResult<Vec<Interval>> {
    let mut args = Vec::new();
    let filter = scope_filter("s", scope, range, &mut args);
    let sql = format!(
        "SELECT b.id, b.employee_id, b.kind, b.scope_id, b.break_type, b.started_at, b.ended_at
         FROM intervals b JOIN intervals s ON s.id = b.scope_id AND s.kind = 'shift'
         WHERE b.kind = 'break'{filter}
         ORDER BY b.started_at ASC, b.id ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args), map_interval)?;
    collect(rows)
}

/// Closed task timers with their owner's username. The range keeps timers
/// that started on/after `from` and ended on/before `to`.
pub fn load_closed_task_timers(
    conn: &Connection,
    scope: ReportScope,
    range: Option<&DateRange>,
) -> AppResult<Vec<(Interval, String)>> {
    let mut args = Vec::new();
    let mut filter = String::new();
    if let ReportScope::Employee(id) = scope {
        filter.push_str(" AND t.employee_id = ?");
        args.push(Value::Integer(id));
    }
    if let Some(r) = range {
        filter.push_str(" AND t.started_at >= ? AND t.ended_at < ?");
        args.push(Value::Text(r.lower_bound()));
        args.push(Value::Text(r.upper_bound_exclusive()));
    }

    let sql = format!(
        "SELECT t.id, t.employee_id, t.kind, t.scope_id, t.break_type, t.started_at, t.ended_at,
                e.username
         FROM intervals t JOIN employees e ON e.id = t.employee_id
         WHERE t.kind = 'task' AND t.ended_at IS NOT NULL{filter}
         ORDER BY e.username ASC, t.started_at ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args), |row| {
        Ok((map_interval(row)?, row.get::<_, String>("username")?))
    })?;
    collect(rows)
}

pub fn load_dashboard(conn: &Connection) -> AppResult<Dashboard> {
    let count = |sql: &str| -> AppResult<i64> { Ok(conn.query_row(sql, [], |row| row.get(0))?) };

    Ok(Dashboard {
        employees: count("SELECT COUNT(*) FROM employees")?,
        projects: count("SELECT COUNT(*) FROM projects")?,
        tasks: count("SELECT COUNT(*) FROM tasks")?,
        active_employees: count(
            "SELECT COUNT(DISTINCT employee_id) FROM intervals
             WHERE kind = 'shift' AND ended_at IS NULL",
        )?,
        running_task_timers: count(
            "SELECT COUNT(*) FROM intervals WHERE kind = 'task' AND ended_at IS NULL",
        )?,
    })
}

// ------------------------------------------------
// Employees
// ------------------------------------------------

fn map_employee(row: &Row) -> Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        username: row.get("username")?,
        display_name: row.get("display_name")?,
        position: row.get("position")?,
        department: row.get("department")?,
        is_admin: row.get::<_, i32>("is_admin")? == 1,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_employee(conn: &Connection, new: &NewEmployee) -> AppResult<Employee> {
    let res = conn.execute(
        "INSERT INTO employees (username, display_name, position, department, is_admin, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            new.username,
            new.display_name,
            new.position,
            new.department,
            if new.is_admin { 1 } else { 0 },
            to_db(&Utc::now()),
        ],
    );

    match res {
        Ok(_) => {}
        Err(e) if is_constraint_violation(&e) => {
            return Err(AppError::Conflict(format!(
                "employee '{}' already exists",
                new.username
            )));
        }
        Err(e) => return Err(e.into()),
    }

    let id = conn.last_insert_rowid();
    get_employee(conn, id)?
        .ok_or_else(|| AppError::Other(format!("employee {id} vanished after insert")))
}

pub fn get_employee(conn: &Connection, id: i64) -> AppResult<Option<Employee>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM employees WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_employee).optional()?)
}

pub fn find_employee_by_username(conn: &Connection, username: &str) -> AppResult<Option<Employee>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM employees WHERE username = ?1")?;
    Ok(stmt.query_row([username], map_employee).optional()?)
}

pub fn list_employees(conn: &Connection) -> AppResult<Vec<Employee>> {
    let mut stmt = conn.prepare("SELECT * FROM employees ORDER BY username ASC")?;
    let rows = stmt.query_map([], map_employee)?;
    collect(rows)
}

pub fn count_employees(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?)
}

// ------------------------------------------------
// Projects & tasks
// ------------------------------------------------

pub fn insert_project(conn: &Connection, title: &str) -> AppResult<Project> {
    conn.execute("INSERT INTO projects (title) VALUES (?1)", [title])?;
    Ok(Project {
        id: conn.last_insert_rowid(),
        title: title.to_string(),
    })
}

pub fn get_project(conn: &Connection, id: i64) -> AppResult<Option<Project>> {
    let mut stmt = conn.prepare_cached("SELECT id, title FROM projects WHERE id = ?1")?;
    Ok(stmt
        .query_row([id], |row| {
            Ok(Project {
                id: row.get(0)?,
                title: row.get(1)?,
            })
        })
        .optional()?)
}

pub fn list_projects(conn: &Connection) -> AppResult<Vec<Project>> {
    let mut stmt = conn.prepare("SELECT id, title FROM projects ORDER BY title ASC, id ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok(Project {
            id: row.get(0)?,
            title: row.get(1)?,
        })
    })?;
    collect(rows)
}

fn map_task(row: &Row) -> Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        title: row.get("title")?,
    })
}

pub fn insert_task(conn: &Connection, project_id: i64, title: &str) -> AppResult<Task> {
    conn.execute(
        "INSERT INTO tasks (project_id, title) VALUES (?1, ?2)",
        params![project_id, title],
    )?;
    Ok(Task {
        id: conn.last_insert_rowid(),
        project_id,
        title: title.to_string(),
    })
}

pub fn get_task(conn: &Connection, id: i64) -> AppResult<Option<Task>> {
    let mut stmt = conn.prepare_cached("SELECT id, project_id, title FROM tasks WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_task).optional()?)
}

pub fn list_tasks(conn: &Connection, project_id: Option<i64>) -> AppResult<Vec<Task>> {
    let mut stmt = conn.prepare(
        "SELECT id, project_id, title FROM tasks
         WHERE ?1 IS NULL OR project_id = ?1
         ORDER BY project_id ASC, id ASC",
    )?;
    let rows = stmt.query_map([project_id], map_task)?;
    collect(rows)
}
