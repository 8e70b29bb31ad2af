use worktracker::core::calculator::duration_minutes;
use worktracker::core::clock::ManualClock;
use worktracker::core::report::ReportLogic;
use worktracker::core::tracker::IntervalTracker;
use worktracker::db::queries::insert_interval;
use worktracker::errors::AppError;
use worktracker::models::break_type::BreakType;
use worktracker::models::interval::NewInterval;
use worktracker::models::interval_kind::IntervalKind;
use worktracker::models::report::ReportScope;

mod common;
use common::{fixture, utc};

#[test]
fn test_second_shift_open_is_a_conflict() {
    let mut fx = fixture("tracker_dup_shift");
    let clock = ManualClock::new(utc(2025, 6, 2, 8, 0));
    let mut tracker = IntervalTracker::new(&mut fx.pool, &clock);

    let first = tracker
        .open(&fx.alice, IntervalKind::Shift, None, None)
        .expect("first shift");
    assert!(first.is_open());

    clock.advance_minutes(5);
    let err = tracker
        .open(&fx.alice, IntervalKind::Shift, None, None)
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");

    let state = tracker.current(&fx.alice).unwrap();
    assert_eq!(state.shift.unwrap().interval.id, first.id);
}

#[test]
fn test_closing_twice_is_not_found() {
    let mut fx = fixture("tracker_double_close");
    let clock = ManualClock::new(utc(2025, 6, 2, 8, 0));
    let mut tracker = IntervalTracker::new(&mut fx.pool, &clock);

    tracker
        .open(&fx.alice, IntervalKind::Shift, None, None)
        .unwrap();
    clock.advance_minutes(60);
    let closed = tracker
        .close(&fx.alice, IntervalKind::Shift, None)
        .unwrap();
    assert_eq!(duration_minutes(&closed), 60);

    clock.advance_minutes(1);
    let err = tracker
        .close(&fx.alice, IntervalKind::Shift, None)
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");
}

#[test]
fn test_close_without_open_shift_is_not_found() {
    let mut fx = fixture("tracker_close_nothing");
    let clock = ManualClock::new(utc(2025, 6, 2, 8, 0));
    let mut tracker = IntervalTracker::new(&mut fx.pool, &clock);

    let err = tracker
        .close(&fx.alice, IntervalKind::Shift, None)
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = tracker
        .close(&fx.alice, IntervalKind::Break, None)
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = tracker
        .close(&fx.alice, IntervalKind::TaskTimer, Some(fx.task.id))
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn test_full_day_scenario() {
    let mut fx = fixture("tracker_full_day");
    let clock = ManualClock::new(utc(2025, 6, 2, 8, 0));

    {
        let mut tracker = IntervalTracker::new(&mut fx.pool, &clock);
        tracker
            .open(&fx.alice, IntervalKind::Shift, None, None)
            .unwrap();

        clock.set(utc(2025, 6, 2, 12, 0));
        tracker
            .open(&fx.alice, IntervalKind::Break, None, Some(BreakType::Lunch))
            .unwrap();

        clock.set(utc(2025, 6, 2, 12, 30));
        let brk = tracker
            .close(&fx.alice, IntervalKind::Break, None)
            .unwrap();
        assert_eq!(duration_minutes(&brk), 30);

        clock.set(utc(2025, 6, 2, 16, 0));
        let shift = tracker
            .close(&fx.alice, IntervalKind::Shift, None)
            .unwrap();
        assert_eq!(duration_minutes(&shift), 480);
    }

    let alice = worktracker::core::identity::Principal {
        employee: fx.alice.clone(),
    };
    let report = ReportLogic::shift_report(
        &fx.pool.conn,
        &alice,
        ReportScope::Employee(fx.alice.id),
        None,
    )
    .unwrap();

    assert_eq!(report.rows.len(), 1);
    let row = &report.rows[0];
    assert_eq!(row.total_minutes, 480);
    assert_eq!(row.breaks_minutes, 30);
    assert_eq!(row.net_minutes, 450);
}

#[test]
fn test_break_without_shift_is_a_conflict() {
    let mut fx = fixture("tracker_break_no_shift");
    let clock = ManualClock::new(utc(2025, 6, 2, 8, 0));
    let mut tracker = IntervalTracker::new(&mut fx.pool, &clock);

    let err = tracker
        .open(&fx.alice, IntervalKind::Break, None, Some(BreakType::Rest))
        .unwrap_err();
    match err {
        AppError::Conflict(msg) => assert!(msg.contains("no open shift")),
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn test_break_needs_a_type() {
    let mut fx = fixture("tracker_break_type");
    let clock = ManualClock::new(utc(2025, 6, 2, 8, 0));
    let mut tracker = IntervalTracker::new(&mut fx.pool, &clock);

    tracker
        .open(&fx.alice, IntervalKind::Shift, None, None)
        .unwrap();
    let err = tracker
        .open(&fx.alice, IntervalKind::Break, None, None)
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_second_break_while_one_is_open_is_a_conflict() {
    let mut fx = fixture("tracker_two_breaks");
    let clock = ManualClock::new(utc(2025, 6, 2, 8, 0));
    let mut tracker = IntervalTracker::new(&mut fx.pool, &clock);

    tracker
        .open(&fx.alice, IntervalKind::Shift, None, None)
        .unwrap();
    clock.advance_minutes(30);
    tracker
        .open(&fx.alice, IntervalKind::Break, None, Some(BreakType::Rest))
        .unwrap();
    let err = tracker
        .open(&fx.alice, IntervalKind::Break, None, Some(BreakType::Meeting))
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[test]
fn test_shift_with_open_break_cannot_close() {
    let mut fx = fixture("tracker_shift_open_break");
    let clock = ManualClock::new(utc(2025, 6, 2, 8, 0));
    let mut tracker = IntervalTracker::new(&mut fx.pool, &clock);

    tracker
        .open(&fx.alice, IntervalKind::Shift, None, None)
        .unwrap();
    clock.advance_minutes(120);
    tracker
        .open(&fx.alice, IntervalKind::Break, None, Some(BreakType::Rest))
        .unwrap();
    clock.advance_minutes(10);

    let err = tracker
        .close(&fx.alice, IntervalKind::Shift, None)
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");

    tracker
        .close(&fx.alice, IntervalKind::Break, None)
        .unwrap();
    let shift = tracker
        .close(&fx.alice, IntervalKind::Shift, None)
        .unwrap();
    assert_eq!(duration_minutes(&shift), 130);
}

#[test]
fn test_two_employees_share_a_task() {
    let mut fx = fixture("tracker_shared_task");
    let clock = ManualClock::new(utc(2025, 6, 2, 9, 0));
    let mut tracker = IntervalTracker::new(&mut fx.pool, &clock);

    let a = tracker
        .open(&fx.alice, IntervalKind::TaskTimer, Some(fx.task.id), None)
        .expect("alice timer");
    let b = tracker
        .open(&fx.bob, IntervalKind::TaskTimer, Some(fx.task.id), None)
        .expect("bob timer");
    assert_ne!(a.id, b.id);
    assert_eq!(a.task_id(), Some(fx.task.id));

    let err = tracker
        .open(&fx.alice, IntervalKind::TaskTimer, Some(fx.task.id), None)
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[test]
fn test_timer_on_unknown_task_is_not_found() {
    let mut fx = fixture("tracker_unknown_task");
    let clock = ManualClock::new(utc(2025, 6, 2, 9, 0));
    let mut tracker = IntervalTracker::new(&mut fx.pool, &clock);

    let err = tracker
        .open(&fx.alice, IntervalKind::TaskTimer, Some(999), None)
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn test_close_before_start_is_rejected() {
    let mut fx = fixture("tracker_close_before_start");
    let clock = ManualClock::new(utc(2025, 6, 2, 9, 0));
    let mut tracker = IntervalTracker::new(&mut fx.pool, &clock);

    tracker
        .open(&fx.alice, IntervalKind::Shift, None, None)
        .unwrap();
    clock.set(utc(2025, 6, 2, 8, 0));
    let err = tracker
        .close(&fx.alice, IntervalKind::Shift, None)
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // still open
    assert!(tracker.current(&fx.alice).unwrap().shift.is_some());
}

#[test]
fn test_record_break_validates_its_bounds() {
    let mut fx = fixture("tracker_record_break");
    let clock = ManualClock::new(utc(2025, 6, 2, 8, 0));
    let mut tracker = IntervalTracker::new(&mut fx.pool, &clock);

    let err = tracker
        .record_break(
            &fx.alice,
            BreakType::Lunch,
            utc(2025, 6, 2, 7, 0),
            utc(2025, 6, 2, 7, 30),
        )
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "no shift yet: {err:?}");

    tracker
        .open(&fx.alice, IntervalKind::Shift, None, None)
        .unwrap();
    clock.set(utc(2025, 6, 2, 14, 0));

    let err = tracker
        .record_break(
            &fx.alice,
            BreakType::Lunch,
            utc(2025, 6, 2, 12, 30),
            utc(2025, 6, 2, 12, 0),
        )
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = tracker
        .record_break(
            &fx.alice,
            BreakType::Lunch,
            utc(2025, 6, 2, 7, 30),
            utc(2025, 6, 2, 8, 30),
        )
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "before shift start");

    let err = tracker
        .record_break(
            &fx.alice,
            BreakType::Lunch,
            utc(2025, 6, 2, 13, 30),
            utc(2025, 6, 2, 15, 0),
        )
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "ends in the future");

    let brk = tracker
        .record_break(
            &fx.alice,
            BreakType::Lunch,
            utc(2025, 6, 2, 12, 0),
            utc(2025, 6, 2, 12, 45),
        )
        .unwrap();
    assert_eq!(duration_minutes(&brk), 45);
    assert_eq!(brk.break_type, Some(BreakType::Lunch));
}

#[test]
fn test_overlapping_breaks_floor_net_at_zero() {
    let mut fx = fixture("tracker_overlap");
    let clock = ManualClock::new(utc(2025, 6, 2, 8, 0));

    {
        let mut tracker = IntervalTracker::new(&mut fx.pool, &clock);
        tracker
            .open(&fx.alice, IntervalKind::Shift, None, None)
            .unwrap();
        clock.set(utc(2025, 6, 2, 9, 0));
        for _ in 0..2 {
            tracker
                .record_break(
                    &fx.alice,
                    BreakType::Rest,
                    utc(2025, 6, 2, 8, 0),
                    utc(2025, 6, 2, 9, 0),
                )
                .unwrap();
        }
        tracker
            .close(&fx.alice, IntervalKind::Shift, None)
            .unwrap();
    }

    let report = ReportLogic::shift_report(
        &fx.pool.conn,
        &fx.admin,
        ReportScope::Employee(fx.alice.id),
        None,
    )
    .unwrap();
    let row = &report.rows[0];
    assert_eq!(row.total_minutes, 60);
    assert_eq!(row.breaks_minutes, 120);
    assert_eq!(row.net_minutes, 0);
}

#[test]
fn test_storage_rejects_second_open_row() {
    let mut fx = fixture("tracker_raw_insert");
    let clock = ManualClock::new(utc(2025, 6, 2, 8, 0));
    let shift = IntervalTracker::new(&mut fx.pool, &clock)
        .open(&fx.alice, IntervalKind::Shift, None, None)
        .unwrap();

    // bypass the tracker's own lookup
    let err = insert_interval(
        &fx.pool.conn,
        &NewInterval {
            kind: IntervalKind::Shift,
            employee_id: fx.alice.id,
            scope_id: 0,
            started_at: utc(2025, 6, 2, 9, 0),
            ended_at: None,
            break_type: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");

    // a closed row alongside the open one is fine
    insert_interval(
        &fx.pool.conn,
        &NewInterval {
            kind: IntervalKind::Shift,
            employee_id: fx.alice.id,
            scope_id: 0,
            started_at: utc(2025, 6, 1, 8, 0),
            ended_at: Some(utc(2025, 6, 1, 9, 0)),
            break_type: None,
        },
    )
    .expect("closed row");

    assert!(shift.is_open());
}

#[test]
fn test_invalid_rows_are_validation_errors() {
    let fx = fixture("tracker_invalid_rows");

    let unknown_employee = insert_interval(
        &fx.pool.conn,
        &NewInterval {
            kind: IntervalKind::Shift,
            employee_id: 999,
            scope_id: 0,
            started_at: utc(2025, 6, 2, 8, 0),
            ended_at: None,
            break_type: None,
        },
    )
    .unwrap_err();
    assert!(
        matches!(unknown_employee, AppError::Validation(_)),
        "got {unknown_employee:?}"
    );

    let untyped_break = insert_interval(
        &fx.pool.conn,
        &NewInterval {
            kind: IntervalKind::Break,
            employee_id: fx.alice.id,
            scope_id: 1,
            started_at: utc(2025, 6, 2, 8, 0),
            ended_at: Some(utc(2025, 6, 2, 8, 10)),
            break_type: None,
        },
    )
    .unwrap_err();
    assert!(matches!(untyped_break, AppError::Validation(_)));

    let backwards = insert_interval(
        &fx.pool.conn,
        &NewInterval {
            kind: IntervalKind::Shift,
            employee_id: fx.alice.id,
            scope_id: 0,
            started_at: utc(2025, 6, 2, 9, 0),
            ended_at: Some(utc(2025, 6, 2, 8, 0)),
            break_type: None,
        },
    )
    .unwrap_err();
    assert!(matches!(backwards, AppError::Validation(_)));
}

#[test]
fn test_closed_rows_are_immutable() {
    let mut fx = fixture("tracker_immutable");
    let clock = ManualClock::new(utc(2025, 6, 2, 8, 0));
    let id = {
        let mut tracker = IntervalTracker::new(&mut fx.pool, &clock);
        tracker
            .open(&fx.alice, IntervalKind::Shift, None, None)
            .unwrap();
        clock.advance_minutes(30);
        tracker
            .close(&fx.alice, IntervalKind::Shift, None)
            .unwrap()
            .id
    };

    let res = fx.pool.conn.execute(
        "UPDATE intervals SET ended_at = '2025-06-02T10:00:00Z' WHERE id = ?1",
        [id],
    );
    assert!(res.is_err());
}

#[test]
fn test_duration_is_floored_to_whole_minutes() {
    let mut fx = fixture("tracker_floor");
    let clock = ManualClock::new(utc(2025, 6, 2, 8, 0));
    let mut tracker = IntervalTracker::new(&mut fx.pool, &clock);

    tracker
        .open(&fx.alice, IntervalKind::Shift, None, None)
        .unwrap();
    clock.advance_seconds(59);
    let shift = tracker
        .close(&fx.alice, IntervalKind::Shift, None)
        .unwrap();
    assert_eq!(duration_minutes(&shift), 0);

    clock.advance_seconds(1);
    tracker
        .open(&fx.alice, IntervalKind::Shift, None, None)
        .unwrap();
    clock.advance_seconds(119);
    let shift = tracker
        .close(&fx.alice, IntervalKind::Shift, None)
        .unwrap();
    assert_eq!(duration_minutes(&shift), 1);
}

#[test]
fn test_reopen_after_close_succeeds() {
    let mut fx = fixture("tracker_reopen");
    let clock = ManualClock::new(utc(2025, 6, 2, 8, 0));
    let mut tracker = IntervalTracker::new(&mut fx.pool, &clock);

    let first = tracker
        .open(&fx.alice, IntervalKind::Shift, None, None)
        .unwrap();
    clock.advance_minutes(60);
    tracker
        .close(&fx.alice, IntervalKind::Shift, None)
        .unwrap();
    clock.advance_minutes(60);
    let second = tracker
        .open(&fx.alice, IntervalKind::Shift, None, None)
        .unwrap();
    assert_ne!(first.id, second.id);

    let history = tracker
        .history(&fx.alice, Some(IntervalKind::Shift), None)
        .unwrap();
    assert_eq!(history.len(), 2);
    assert!(!history[0].is_open());
    assert!(history[1].is_open());
}

#[test]
fn test_current_reports_elapsed_minutes() {
    let mut fx = fixture("tracker_current");
    let clock = ManualClock::new(utc(2025, 6, 2, 8, 0));
    let mut tracker = IntervalTracker::new(&mut fx.pool, &clock);

    tracker
        .open(&fx.alice, IntervalKind::Shift, None, None)
        .unwrap();
    clock.advance_minutes(15);
    tracker
        .open(&fx.alice, IntervalKind::TaskTimer, Some(fx.task.id), None)
        .unwrap();
    clock.advance_minutes(45);

    let state = tracker.current(&fx.alice).unwrap();
    assert_eq!(state.shift.as_ref().unwrap().elapsed_minutes, 60);
    assert!(state.open_break.is_none());
    assert_eq!(state.task_timers.len(), 1);
    assert_eq!(state.task_timers[0].elapsed_minutes, 45);

    let bob_state = tracker.current(&fx.bob).unwrap();
    assert!(bob_state.shift.is_none());
}
