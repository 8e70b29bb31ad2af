// src/export/logic.rs

use crate::core::identity::Principal;
use crate::core::report::ReportLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::csv::write_csv;
use crate::export::fs_utils::ensure_writable;
use crate::export::json::write_json;
use crate::export::{ExportFormat, notify_export_success};
use crate::models::date_range::DateRange;
use crate::models::report::ReportScope;
use crate::ui::messages::warning;
use std::path::{Path, PathBuf};

/// High level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the shift report visible to `principal`.
    ///
    /// Returns the number of rows written, or 0 when nothing matched (no
    /// file is created in that case).
    pub fn export(
        pool: &mut DbPool,
        principal: &Principal,
        scope: ReportScope,
        format: ExportFormat,
        file: &str,
        range: Option<DateRange>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        let report = ReportLogic::shift_report(&pool.conn, principal, scope, range)?;

        if report.rows.is_empty() {
            warning("No shifts found for the selected period.");
            return Ok(0);
        }

        match format {
            ExportFormat::Csv => {
                write_csv(path, &report).map_err(|e| AppError::Export(e.to_string()))?
            }
            ExportFormat::Json => write_json(path, &report)?,
        }

        let label = format.as_str().to_uppercase();
        notify_export_success(&label, path);

        let abs: PathBuf = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        ttlog(
            &pool.conn,
            "export",
            &abs.to_string_lossy(),
            &format!(
                "{} rows exported as {} by {}",
                report.rows.len(),
                format.as_str(),
                principal.employee.username
            ),
        )?;

        Ok(report.rows.len())
    }
}
