use super::{break_type::BreakType, interval_kind::IntervalKind};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Snapshot of one `intervals` row.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Interval {
    pub id: i64,
    pub kind: IntervalKind,
    pub employee_id: i64,
    /// Task id (TaskTimer), enclosing shift id (Break), 0 (Shift).
    pub scope_id: i64,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub break_type: Option<BreakType>,
}

impl Interval {
    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Task reference for timers.
    pub fn task_id(&self) -> Option<i64> {
        (self.kind == IntervalKind::TaskTimer).then_some(self.scope_id)
    }

    /// Enclosing shift for breaks.
    pub fn parent_shift_id(&self) -> Option<i64> {
        (self.kind == IntervalKind::Break).then_some(self.scope_id)
    }
}

/// Values needed to insert a new interval row.
#[derive(Debug, Clone)]
pub struct NewInterval {
    pub kind: IntervalKind,
    pub employee_id: i64,
    pub scope_id: i64,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub break_type: Option<BreakType>,
}

/// Everything an employee currently has running.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OpenState {
    pub shift: Option<OpenInterval>,
    #[serde(rename = "break")]
    pub open_break: Option<OpenInterval>,
    pub task_timers: Vec<OpenInterval>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenInterval {
    pub interval: Interval,
    pub elapsed_minutes: i64,
}
