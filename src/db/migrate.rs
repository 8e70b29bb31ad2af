use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, Result};

/// One versioned schema step. Applied steps are recorded in the `log`
/// table as `migration_applied` rows whose target is the version.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250601_0001_create_directory",
        description: "Created employees, projects and tasks tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS employees (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            username      TEXT NOT NULL UNIQUE,
            display_name  TEXT NOT NULL DEFAULT '',
            position      TEXT NOT NULL DEFAULT '',
            department    TEXT NOT NULL DEFAULT '',
            is_admin      INTEGER NOT NULL DEFAULT 0 CHECK(is_admin IN (0, 1)),
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS projects (
            id     INTEGER PRIMARY KEY AUTOINCREMENT,
            title  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS tasks (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id  INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            title       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_project ON tasks(project_id);
        "#,
    },
    Migration {
        version: "20250601_0002_create_intervals",
        description: "Created intervals table (shifts, task timers, breaks)",
        sql: r#"
        CREATE TABLE IF NOT EXISTS intervals (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id  INTEGER NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
            kind         TEXT NOT NULL CHECK(kind IN ('shift','task','break')),
            scope_id     INTEGER NOT NULL DEFAULT 0,
            break_type   TEXT CHECK(break_type IN ('lunch','rest','meeting')),
            started_at   TEXT NOT NULL,
            ended_at     TEXT,
            CHECK(ended_at IS NULL OR ended_at >= started_at),
            CHECK((kind = 'break') = (break_type IS NOT NULL)),
            CHECK(kind <> 'shift' OR scope_id = 0)
        );

        CREATE INDEX IF NOT EXISTS idx_intervals_employee_start
            ON intervals(employee_id, kind, started_at);
        CREATE INDEX IF NOT EXISTS idx_intervals_scope
            ON intervals(kind, scope_id);
        "#,
    },
    Migration {
        version: "20250601_0003_open_interval_guard",
        description: "At most one open interval per (employee, kind, scope); closed rows immutable",
        sql: r#"
        CREATE UNIQUE INDEX IF NOT EXISTS ux_intervals_one_open
            ON intervals(employee_id, kind, scope_id)
            WHERE ended_at IS NULL;

        CREATE TRIGGER IF NOT EXISTS trg_intervals_immutable
        BEFORE UPDATE ON intervals
        WHEN OLD.ended_at IS NOT NULL
          OR NEW.started_at <> OLD.started_at
          OR NEW.employee_id <> OLD.employee_id
          OR NEW.kind <> OLD.kind
          OR NEW.scope_id <> OLD.scope_id
        BEGIN
            SELECT RAISE(ABORT, 'interval is immutable once closed');
        END;
        "#,
    },
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    tx.commit()?;
    Ok(())
}

fn log_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='log'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Versions not yet applied to this database. Read-only.
pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    if !log_table_exists(conn)? {
        return Ok(MIGRATIONS.iter().map(|m| m.version).collect());
    }

    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations, in order.
///
/// Returns the versions applied by this call.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        applied.push(m.version);
    }

    Ok(applied)
}
