use super::date_range::DateRange;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Who a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
    Employee(i64),
    All,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShiftRow {
    pub shift_id: i64,
    pub employee: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub total_minutes: i64,
    pub breaks_minutes: i64,
    pub net_minutes: i64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ReportTotals {
    pub shifts: usize,
    pub total_minutes: i64,
    pub breaks_minutes: i64,
    pub net_minutes: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShiftReport {
    pub range: Option<DateRange>,
    pub rows: Vec<ShiftRow>,
    pub totals: ReportTotals,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TaskTimeRow {
    pub employee: String,
    pub minutes: i64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Dashboard {
    pub employees: i64,
    pub projects: i64,
    pub tasks: i64,
    pub active_employees: i64,
    pub running_task_timers: i64,
}
