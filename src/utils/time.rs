//! Time utilities: timestamp parsing/formatting for storage and CLI input.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Datelike, NaiveDateTime, SubsecRound, Utc};

/// Storage format: fixed width, UTC, whole seconds. Sorts chronologically.
pub const DB_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Human format used in tables.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Years outside this range do not fit the fixed-width storage format.
pub const MIN_YEAR: i32 = 0;
pub const MAX_YEAR: i32 = 9999;

const INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

pub fn to_db(ts: &DateTime<Utc>) -> String {
    ts.format(DB_FORMAT).to_string()
}

pub fn from_db(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, DB_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn display(ts: &DateTime<Utc>) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}

/// Parse a user-supplied timestamp (`--at`, `--from`, `--to`).
/// Accepts RFC 3339 or `YYYY-MM-DD HH:MM[:SS]`, the latter taken as UTC.
pub fn parse_timestamp(input: &str) -> AppResult<DateTime<Utc>> {
    let s = input.trim();

    let ts = match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => dt.with_timezone(&Utc).trunc_subsecs(0),
        Err(_) => INPUT_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(|naive| naive.and_utc())
            .ok_or_else(|| AppError::InvalidTime(input.to_string()))?,
    };

    if !(MIN_YEAR..=MAX_YEAR).contains(&ts.year()) {
        return Err(AppError::InvalidTime(format!(
            "{input}: year must be between {MIN_YEAR} and {MAX_YEAR}"
        )));
    }
    Ok(ts)
}

pub fn parse_optional_timestamp(input: Option<&String>) -> AppResult<Option<DateTime<Utc>>> {
    input.map(|s| parse_timestamp(s)).transpose()
}
