use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IntervalKind {
    Shift,
    TaskTimer,
    Break,
}

impl IntervalKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            IntervalKind::Shift => "shift",
            IntervalKind::TaskTimer => "task",
            IntervalKind::Break => "break",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "shift" => Some(IntervalKind::Shift),
            "task" => Some(IntervalKind::TaskTimer),
            "break" => Some(IntervalKind::Break),
            _ => None,
        }
    }

    /// Helper: convert user input (case-insensitive, a few aliases)
    pub fn from_input(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "shift" | "day" => Some(IntervalKind::Shift),
            "task" | "timer" | "task_timer" => Some(IntervalKind::TaskTimer),
            "break" => Some(IntervalKind::Break),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IntervalKind::Shift => "Shift",
            IntervalKind::TaskTimer => "Task timer",
            IntervalKind::Break => "Break",
        }
    }
}

impl fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
