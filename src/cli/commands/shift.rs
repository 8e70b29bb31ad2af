use crate::cli::commands::common::{clock_for, open_pool, principal, respond};
use crate::cli::parser::{Cli, ShiftAction};
use crate::config::Config;
use crate::core::calculator::duration_minutes;
use crate::core::tracker::IntervalTracker;
use crate::errors::AppResult;
use crate::models::interval_kind::IntervalKind;
use crate::models::response::ApiResponse;
use crate::utils::mins2readable;
use crate::utils::time::display;

pub fn handle(cli: &Cli, action: &ShiftAction, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;
    let who = principal(cli, cfg, &pool)?;

    let resp = match action {
        ShiftAction::Start { at } => {
            let clock = clock_for(at.as_ref())?;
            let shift = IntervalTracker::new(&mut pool, clock.as_ref()).open(
                &who.employee,
                IntervalKind::Shift,
                None,
                None,
            )?;
            ApiResponse::new("started")
                .with_interval(&shift)
                .with_message(format!(
                    "Shift #{} started at {}.",
                    shift.id,
                    display(&shift.started_at)
                ))
        }
        ShiftAction::End { at } => {
            let clock = clock_for(at.as_ref())?;
            let shift = IntervalTracker::new(&mut pool, clock.as_ref()).close(
                &who.employee,
                IntervalKind::Shift,
                None,
            )?;
            let minutes = duration_minutes(&shift);
            ApiResponse::new("ended")
                .with_interval(&shift)
                .with_minutes(minutes)
                .with_message(format!(
                    "Shift #{} ended ({}).",
                    shift.id,
                    mins2readable(minutes, false, false)
                ))
        }
    };

    respond(cli, &resp)
}
