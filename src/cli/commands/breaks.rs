use crate::cli::commands::common::{clock_for, open_pool, principal, respond};
use crate::cli::parser::{BreakAction, Cli};
use crate::config::Config;
use crate::core::calculator::duration_minutes;
use crate::core::clock::SystemClock;
use crate::core::tracker::IntervalTracker;
use crate::errors::{AppError, AppResult};
use crate::models::break_type::BreakType;
use crate::models::interval_kind::IntervalKind;
use crate::models::response::ApiResponse;
use crate::utils::time::{display, parse_timestamp};

fn break_type_or_default(kind: Option<BreakType>, cfg: &Config) -> AppResult<BreakType> {
    match kind {
        Some(k) => Ok(k),
        None => BreakType::from_input(&cfg.default_break_type)
            .ok_or_else(|| AppError::InvalidBreakType(cfg.default_break_type.clone())),
    }
}

pub fn handle(cli: &Cli, action: &BreakAction, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;
    let who = principal(cli, cfg, &pool)?;

    let resp = match action {
        BreakAction::Start { kind, at } => {
            let subtype = break_type_or_default(*kind, cfg)?;
            let clock = clock_for(at.as_ref())?;
            let brk = IntervalTracker::new(&mut pool, clock.as_ref()).open(
                &who.employee,
                IntervalKind::Break,
                None,
                Some(subtype),
            )?;
            ApiResponse::new("break_started")
                .with_interval(&brk)
                .with_message(format!(
                    "{} break #{} started at {}.",
                    subtype,
                    brk.id,
                    display(&brk.started_at)
                ))
        }
        BreakAction::End { at } => {
            let clock = clock_for(at.as_ref())?;
            let brk = IntervalTracker::new(&mut pool, clock.as_ref()).close(
                &who.employee,
                IntervalKind::Break,
                None,
            )?;
            let minutes = duration_minutes(&brk);
            ApiResponse::new("break_ended")
                .with_interval(&brk)
                .with_minutes(minutes)
                .with_message(format!("Break #{} ended ({} min).", brk.id, minutes))
        }
        BreakAction::Add { kind, from, to } => {
            let subtype = break_type_or_default(*kind, cfg)?;
            let start = parse_timestamp(from)?;
            let end = parse_timestamp(to)?;
            let clock = SystemClock;
            let brk = IntervalTracker::new(&mut pool, &clock).record_break(
                &who.employee,
                subtype,
                start,
                end,
            )?;
            let minutes = duration_minutes(&brk);
            ApiResponse::new("break_added")
                .with_interval(&brk)
                .with_minutes(minutes)
                .with_message(format!(
                    "{} break #{} recorded ({} min).",
                    subtype, brk.id, minutes
                ))
        }
    };

    respond(cli, &resp)
}
