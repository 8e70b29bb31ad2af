use crate::models::report::ShiftReport;
use std::path::Path;

/// Write the whole report (rows and totals) as pretty JSON.
pub fn write_json(path: &Path, report: &ShiftReport) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}
