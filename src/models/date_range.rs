use crate::errors::{AppError, AppResult};
use crate::utils::time::{DB_FORMAT, MAX_YEAR, MIN_YEAR};
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Serialize;

/// Sorts after every storable timestamp; stands in for the day after
/// 9999-12-31.
const END_OF_STORAGE: &str = "9999-12-31T24:00:00Z";

/// Inclusive range of calendar days (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> AppResult<Self> {
        for day in [from, to] {
            if !(MIN_YEAR..=MAX_YEAR).contains(&day.year()) {
                return Err(AppError::InvalidDate(format!(
                    "{day}: year must be between {MIN_YEAR} and {MAX_YEAR}"
                )));
            }
        }
        if to < from {
            return Err(AppError::InvalidDate(format!(
                "range end {to} is before start {from}"
            )));
        }
        Ok(Self { from, to })
    }

    /// First instant of the range, in storage format.
    pub fn lower_bound(&self) -> String {
        self.from.and_time(NaiveTime::MIN).format(DB_FORMAT).to_string()
    }

    /// First instant after the range, in storage format.
    pub fn upper_bound_exclusive(&self) -> String {
        match self.to.succ_opt().filter(|d| d.year() <= MAX_YEAR) {
            Some(next) => next.and_time(NaiveTime::MIN).format(DB_FORMAT).to_string(),
            None => END_OF_STORAGE.to_string(),
        }
    }
}
