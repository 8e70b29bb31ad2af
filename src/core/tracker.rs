//! Open/close lifecycle of shifts, breaks and task timers.
//!
//! Every mutation runs in an IMMEDIATE transaction so the
//! "look for an open interval, then insert" sequence is serialized across
//! connections. The partial unique index `ux_intervals_one_open` backs the
//! same invariant at the storage level; an insert rejected by it surfaces
//! as `Conflict`.

use crate::core::calculator::elapsed_minutes;
use crate::core::clock::Clock;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    close_interval, find_open, find_open_by_kind, get_interval, get_task, insert_interval,
    list_intervals,
};
use crate::errors::{AppError, AppResult};
use crate::models::break_type::BreakType;
use crate::models::date_range::DateRange;
use crate::models::employee::Employee;
use crate::models::interval::{Interval, NewInterval, OpenInterval, OpenState};
use crate::models::interval_kind::IntervalKind;
use crate::utils::time::display;
use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::{Connection, TransactionBehavior};

pub struct IntervalTracker<'a> {
    pool: &'a mut DbPool,
    clock: &'a dyn Clock,
}

fn operation_name(kind: IntervalKind, opening: bool) -> &'static str {
    match (kind, opening) {
        (IntervalKind::Shift, true) => "shift_start",
        (IntervalKind::Shift, false) => "shift_end",
        (IntervalKind::Break, true) => "break_start",
        (IntervalKind::Break, false) => "break_end",
        (IntervalKind::TaskTimer, true) => "task_start",
        (IntervalKind::TaskTimer, false) => "task_end",
    }
}

/// Argument checks that need no storage access.
fn validate_open_args(
    kind: IntervalKind,
    scope_ref: Option<i64>,
    subtype: Option<BreakType>,
) -> AppResult<()> {
    match kind {
        IntervalKind::Shift => {
            if scope_ref.is_some() {
                return Err(AppError::Validation("a shift takes no scope".into()));
            }
            if subtype.is_some() {
                return Err(AppError::Validation("only breaks have a type".into()));
            }
        }
        IntervalKind::TaskTimer => {
            if scope_ref.is_none() {
                return Err(AppError::Validation("a task timer needs a task id".into()));
            }
            if subtype.is_some() {
                return Err(AppError::Validation("only breaks have a type".into()));
            }
        }
        IntervalKind::Break => {
            if subtype.is_none() {
                return Err(AppError::Validation(
                    "a break needs a type (lunch, rest or meeting)".into(),
                ));
            }
        }
    }
    Ok(())
}

fn open_shift(conn: &Connection, employee_id: i64) -> AppResult<Option<Interval>> {
    find_open(conn, employee_id, IntervalKind::Shift, 0)
}

impl<'a> IntervalTracker<'a> {
    pub fn new(pool: &'a mut DbPool, clock: &'a dyn Clock) -> Self {
        Self { pool, clock }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(0)
    }

    /// Open a new interval for `(employee, kind[, scope])`.
    ///
    /// - Shift: no scope.
    /// - TaskTimer: `scope_ref` is the task id.
    /// - Break: `subtype` required; the scope is the employee's open shift.
    pub fn open(
        &mut self,
        employee: &Employee,
        kind: IntervalKind,
        scope_ref: Option<i64>,
        subtype: Option<BreakType>,
    ) -> AppResult<Interval> {
        validate_open_args(kind, scope_ref, subtype)?;
        let now = self.now();

        let tx = self
            .pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let scope_id = match kind {
            IntervalKind::Shift => 0,
            IntervalKind::TaskTimer => {
                let task_id = scope_ref.unwrap_or_default();
                get_task(&tx, task_id)?
                    .ok_or_else(|| AppError::NotFound(format!("task #{task_id}")))?;
                task_id
            }
            IntervalKind::Break => {
                let shift = open_shift(&tx, employee.id)?
                    .ok_or_else(|| AppError::Conflict("no open shift".into()))?;
                if now < shift.started_at {
                    return Err(AppError::Validation(format!(
                        "break cannot start before its shift ({})",
                        display(&shift.started_at)
                    )));
                }
                shift.id
            }
        };

        if let Some(existing) = find_open(&tx, employee.id, kind, scope_id)? {
            return Err(AppError::Conflict(format!(
                "{} already open (#{} since {})",
                kind.label(),
                existing.id,
                display(&existing.started_at)
            )));
        }

        let interval = insert_interval(
            &tx,
            &NewInterval {
                kind,
                employee_id: employee.id,
                scope_id,
                started_at: now,
                ended_at: None,
                break_type: if kind == IntervalKind::Break {
                    subtype
                } else {
                    None
                },
            },
        )?;

        ttlog(
            &tx,
            operation_name(kind, true),
            &employee.username,
            &format!(
                "{} #{} opened at {}",
                kind.label(),
                interval.id,
                display(&interval.started_at)
            ),
        )?;

        tx.commit()?;
        Ok(interval)
    }

    /// Close the unique open interval for `(employee, kind[, scope])`.
    ///
    /// A shift with an open break is not closable; the break must end first.
    pub fn close(
        &mut self,
        employee: &Employee,
        kind: IntervalKind,
        scope_ref: Option<i64>,
    ) -> AppResult<Interval> {
        let now = self.now();

        let tx = self
            .pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let open = match kind {
            IntervalKind::Shift => {
                let shift = open_shift(&tx, employee.id)?
                    .ok_or_else(|| AppError::NotFound("no open shift".into()))?;
                if let Some(b) = find_open(&tx, employee.id, IntervalKind::Break, shift.id)? {
                    return Err(AppError::Conflict(format!(
                        "shift has an open break (#{}); end the break first",
                        b.id
                    )));
                }
                shift
            }
            IntervalKind::Break => find_open_by_kind(&tx, employee.id, IntervalKind::Break)?
                .pop()
                .ok_or_else(|| AppError::NotFound("no open break".into()))?,
            IntervalKind::TaskTimer => {
                let task_id = scope_ref
                    .ok_or_else(|| AppError::Validation("a task timer needs a task id".into()))?;
                find_open(&tx, employee.id, IntervalKind::TaskTimer, task_id)?.ok_or_else(
                    || AppError::NotFound(format!("no running timer for task #{task_id}")),
                )?
            }
        };

        if now < open.started_at {
            return Err(AppError::Validation(format!(
                "end {} is before start {}",
                display(&now),
                display(&open.started_at)
            )));
        }

        if close_interval(&tx, open.id, &now)? == 0 {
            return Err(AppError::NotFound(format!(
                "{} #{} is already closed",
                kind.label(),
                open.id
            )));
        }

        let closed = get_interval(&tx, open.id)?
            .ok_or_else(|| AppError::Other(format!("interval {} vanished", open.id)))?;

        ttlog(
            &tx,
            operation_name(kind, false),
            &employee.username,
            &format!(
                "{} #{} closed at {}",
                kind.label(),
                closed.id,
                display(&now)
            ),
        )?;

        tx.commit()?;
        Ok(closed)
    }

    /// Record a break that already happened, inside the open shift.
    pub fn record_break(
        &mut self,
        employee: &Employee,
        subtype: BreakType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Interval> {
        let start = start.trunc_subsecs(0);
        let end = end.trunc_subsecs(0);
        let now = self.now();

        if end < start {
            return Err(AppError::Validation(format!(
                "break end {} is before its start {}",
                display(&end),
                display(&start)
            )));
        }
        if end > now {
            return Err(AppError::Validation(format!(
                "break end {} is in the future",
                display(&end)
            )));
        }

        let tx = self
            .pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let shift = open_shift(&tx, employee.id)?
            .ok_or_else(|| AppError::Conflict("no open shift".into()))?;

        if start < shift.started_at {
            return Err(AppError::Validation(format!(
                "break start {} is before the shift start {}",
                display(&start),
                display(&shift.started_at)
            )));
        }

        let interval = insert_interval(
            &tx,
            &NewInterval {
                kind: IntervalKind::Break,
                employee_id: employee.id,
                scope_id: shift.id,
                started_at: start,
                ended_at: Some(end),
                break_type: Some(subtype),
            },
        )?;

        ttlog(
            &tx,
            "break_add",
            &employee.username,
            &format!(
                "{} break #{} recorded {} → {}",
                subtype,
                interval.id,
                display(&start),
                display(&end)
            ),
        )?;

        tx.commit()?;
        Ok(interval)
    }

    /// Everything the employee currently has open.
    pub fn current(&self, employee: &Employee) -> AppResult<OpenState> {
        let conn = &self.pool.conn;
        let now = self.now();
        let wrap = |interval: Interval| OpenInterval {
            elapsed_minutes: elapsed_minutes(&interval, now),
            interval,
        };

        let shift = open_shift(conn, employee.id)?;
        let open_break = find_open_by_kind(conn, employee.id, IntervalKind::Break)?.pop();
        let task_timers = find_open_by_kind(conn, employee.id, IntervalKind::TaskTimer)?;

        Ok(OpenState {
            shift: shift.map(wrap),
            open_break: open_break.map(wrap),
            task_timers: task_timers.into_iter().map(wrap).collect(),
        })
    }

    /// Intervals started within `range`, oldest first.
    pub fn history(
        &self,
        employee: &Employee,
        kind: Option<IntervalKind>,
        range: Option<&DateRange>,
    ) -> AppResult<Vec<Interval>> {
        list_intervals(&self.pool.conn, employee.id, kind, range)
    }
}
