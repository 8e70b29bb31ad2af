//! Identity provider: turns the calling username into a principal.

use crate::db::queries::find_employee_by_username;
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use crate::models::report::ReportScope;
use rusqlite::Connection;

#[derive(Debug, Clone)]
pub struct Principal {
    pub employee: Employee,
}

impl Principal {
    pub fn is_privileged(&self) -> bool {
        self.employee.is_admin
    }

    pub fn require_privileged(&self, action: &str) -> AppResult<()> {
        if self.is_privileged() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(format!(
                "'{}' is not allowed to {}",
                self.employee.username, action
            )))
        }
    }

    /// Employees may always see their own data; anything wider needs the
    /// privileged flag.
    pub fn authorize_scope(&self, scope: ReportScope) -> AppResult<()> {
        match scope {
            ReportScope::Employee(id) if id == self.employee.id => Ok(()),
            ReportScope::Employee(_) => self.require_privileged("view another employee's data"),
            ReportScope::All => self.require_privileged("view reports for all employees"),
        }
    }
}

pub trait IdentityProvider {
    fn resolve(&self, username: &str) -> AppResult<Principal>;
}

/// Resolves principals against the `employees` table.
pub struct DbIdentity<'a> {
    conn: &'a Connection,
}

impl<'a> DbIdentity<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl IdentityProvider for DbIdentity<'_> {
    fn resolve(&self, username: &str) -> AppResult<Principal> {
        let employee = find_employee_by_username(self.conn, username)?
            .ok_or_else(|| AppError::NotFound(format!("employee '{username}'")))?;
        Ok(Principal { employee })
    }
}

/// Pick the calling username: command line first, then the config file.
pub fn resolve_username(cli_user: Option<&str>, cfg_user: Option<&str>) -> AppResult<String> {
    cli_user
        .or(cfg_user)
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::Validation("no user specified (use --user or set 'user' in config)".into())
        })
}
