//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Business rules
    // ---------------------------
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Storage unavailable: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid break type: {0} (use lunch, rest or meeting)")]
    InvalidBreakType(String),

    #[error("Invalid interval kind: {0}")]
    InvalidKind(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Short machine-readable status used in JSON responses.
    pub fn status(&self) -> &'static str {
        match self {
            AppError::Conflict(_) => "conflict",
            AppError::NotFound(_) => "not_found",
            AppError::Validation(_)
            | AppError::InvalidDate(_)
            | AppError::InvalidTime(_)
            | AppError::InvalidBreakType(_)
            | AppError::InvalidKind(_) => "invalid",
            AppError::PermissionDenied(_) => "forbidden",
            AppError::Storage(_) => "unavailable",
            _ => "error",
        }
    }

    /// HTTP-equivalent status code of the error class.
    pub fn http_status(&self) -> u16 {
        match self.status() {
            "conflict" => 409,
            "not_found" => 404,
            "invalid" => 400,
            "forbidden" => 403,
            "unavailable" => 503,
            _ => 500,
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.status() {
            "invalid" => 2,
            "conflict" => 3,
            "not_found" => 4,
            "forbidden" => 5,
            "unavailable" => 6,
            _ => 1,
        }
    }
}

/// SQLite reports a violated UNIQUE/CHECK constraint as a constraint error.
pub(crate) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Violation of a UNIQUE index (SQLITE_CONSTRAINT_UNIQUE).
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

pub type AppResult<T> = Result<T, AppError>;
