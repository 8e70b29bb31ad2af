use crate::errors::AppError;
use crate::models::interval::Interval;
use serde::{Deserialize, Serialize};

/// Structured result of one operation at the request boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<i64>,
}

impl ApiResponse {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            message: None,
            interval_id: None,
            minutes: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_interval(mut self, interval: &Interval) -> Self {
        self.interval_id = Some(interval.id);
        self
    }

    pub fn with_minutes(mut self, minutes: i64) -> Self {
        self.minutes = Some(minutes);
        self
    }

    pub fn from_error(err: &AppError) -> Self {
        Self::new(err.status()).with_message(err.to_string())
    }

    pub fn is_success(&self) -> bool {
        !matches!(
            self.status.as_str(),
            "conflict" | "not_found" | "invalid" | "forbidden" | "unavailable" | "error"
        )
    }
}
