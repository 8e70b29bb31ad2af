//! Duration arithmetic over interval snapshots.

use crate::models::interval::Interval;
use chrono::{DateTime, Utc};

/// Whole minutes from `start` to `end`, rounded down. Never negative.
pub fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_seconds().max(0) / 60
}

/// 0 while the interval is open, floor((end - start) / 60s) once closed.
pub fn duration_minutes(interval: &Interval) -> i64 {
    match interval.ended_at {
        Some(end) => minutes_between(interval.started_at, end),
        None => 0,
    }
}

/// Minutes run so far: the duration when closed, time until `now` when open.
pub fn elapsed_minutes(interval: &Interval, now: DateTime<Utc>) -> i64 {
    match interval.ended_at {
        Some(_) => duration_minutes(interval),
        None => minutes_between(interval.started_at, now),
    }
}

/// Sum of closed break durations. Open breaks contribute nothing.
pub fn breaks_minutes<'a, I>(breaks: I) -> i64
where
    I: IntoIterator<Item = &'a Interval>,
{
    breaks
        .into_iter()
        .filter(|b| !b.is_open())
        .map(duration_minutes)
        .sum()
}

/// Shift time minus breaks, floored at zero when breaks overlap or exceed
/// the shift span.
pub fn net_minutes(total_minutes: i64, breaks_minutes: i64) -> i64 {
    (total_minutes - breaks_minutes).max(0)
}
