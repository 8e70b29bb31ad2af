use crate::models::report::ShiftReport;
use crate::utils::time::display;
use csv::Writer;
use std::path::Path;

/// Write the report rows as CSV, one line per shift.
pub fn write_csv(path: &Path, report: &ShiftReport) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record([
        "shift_id",
        "employee",
        "started_at",
        "ended_at",
        "total_minutes",
        "breaks_minutes",
        "net_minutes",
    ])?;

    for row in &report.rows {
        wtr.write_record(&[
            row.shift_id.to_string(),
            row.employee.clone(),
            display(&row.started_at),
            row.ended_at.as_ref().map(display).unwrap_or_default(),
            row.total_minutes.to_string(),
            row.breaks_minutes.to_string(),
            row.net_minutes.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
