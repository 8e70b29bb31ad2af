//! Read-side projections. Nothing here writes to the database.

use crate::core::calculator::{breaks_minutes, duration_minutes, net_minutes};
use crate::core::identity::Principal;
use crate::db::queries::{
    load_breaks_for_shifts, load_closed_task_timers, load_dashboard, load_shifts,
};
use crate::errors::AppResult;
use crate::models::date_range::DateRange;
use crate::models::interval::Interval;
use crate::models::report::{
    Dashboard, ReportScope, ReportTotals, ShiftReport, ShiftRow, TaskTimeRow,
};
use rusqlite::Connection;
use std::collections::{BTreeMap, HashMap};

pub struct ReportLogic;

impl ReportLogic {
    /// Per-shift totals, breaks and net minutes.
    pub fn shift_report(
        conn: &Connection,
        principal: &Principal,
        scope: ReportScope,
        range: Option<DateRange>,
    ) -> AppResult<ShiftReport> {
        principal.authorize_scope(scope)?;

        let shifts = load_shifts(conn, scope, range.as_ref())?;
        let breaks = load_breaks_for_shifts(conn, scope, range.as_ref())?;

        Ok(build_shift_report(shifts, &breaks, range))
    }

    /// Minutes of closed task timers, per employee.
    pub fn task_report(
        conn: &Connection,
        principal: &Principal,
        scope: ReportScope,
        range: Option<DateRange>,
    ) -> AppResult<Vec<TaskTimeRow>> {
        principal.authorize_scope(scope)?;

        let timers = load_closed_task_timers(conn, scope, range.as_ref())?;
        Ok(build_task_report(&timers))
    }

    pub fn dashboard(conn: &Connection, principal: &Principal) -> AppResult<Dashboard> {
        principal.require_privileged("view the dashboard")?;
        load_dashboard(conn)
    }
}

/// Pure aggregation over snapshots: `breaks` may contain breaks of any of
/// the given shifts, matched through their scope id.
pub fn build_shift_report(
    shifts: Vec<(Interval, String)>,
    breaks: &[Interval],
    range: Option<DateRange>,
) -> ShiftReport {
    let mut by_shift: HashMap<i64, Vec<&Interval>> = HashMap::new();
    for b in breaks {
        if let Some(parent) = b.parent_shift_id() {
            by_shift.entry(parent).or_default().push(b);
        }
    }

    let mut totals = ReportTotals::default();
    let mut rows = Vec::with_capacity(shifts.len());

    for (shift, employee) in shifts {
        let total = duration_minutes(&shift);
        let brk = by_shift
            .get(&shift.id)
            .map(|list| breaks_minutes(list.iter().copied()))
            .unwrap_or(0);
        let net = net_minutes(total, brk);

        totals.shifts += 1;
        totals.total_minutes += total;
        totals.breaks_minutes += brk;
        totals.net_minutes += net;

        rows.push(ShiftRow {
            shift_id: shift.id,
            employee,
            started_at: shift.started_at,
            ended_at: shift.ended_at,
            total_minutes: total,
            breaks_minutes: brk,
            net_minutes: net,
        });
    }

    ShiftReport {
        range,
        rows,
        totals,
    }
}

pub fn build_task_report(timers: &[(Interval, String)]) -> Vec<TaskTimeRow> {
    let mut per_employee: BTreeMap<&str, i64> = BTreeMap::new();
    for (timer, employee) in timers {
        *per_employee.entry(employee.as_str()).or_default() += duration_minutes(timer);
    }

    per_employee
        .into_iter()
        .map(|(employee, minutes)| TaskTimeRow {
            employee: employee.to_string(),
            minutes,
        })
        .collect()
}
