use std::sync::{Arc, Barrier};
use std::thread;
use worktracker::core::clock::FixedClock;
use worktracker::core::tracker::IntervalTracker;
use worktracker::db::pool::DbPool;
use worktracker::errors::AppError;
use worktracker::models::break_type::BreakType;
use worktracker::models::interval_kind::IntervalKind;

mod common;
use common::{fixture, utc};

const WORKERS: usize = 8;

/// Run `WORKERS` threads, each on its own connection, released together.
fn race<F>(db_path: &str, op: F) -> Vec<Result<i64, AppError>>
where
    F: Fn(&mut IntervalTracker<'_>) -> Result<i64, AppError> + Send + Sync + 'static,
{
    let barrier = Arc::new(Barrier::new(WORKERS));
    let op = Arc::new(op);

    let handles: Vec<_> = (0..WORKERS)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            let op = Arc::clone(&op);
            let path = db_path.to_string();
            thread::spawn(move || {
                let mut pool = DbPool::new(&path).expect("open db");
                let clock = FixedClock(utc(2025, 6, 2, 9, 0));
                barrier.wait();
                let mut tracker = IntervalTracker::new(&mut pool, &clock);
                op(&mut tracker)
            })
        })
        .collect();

    handles
        .into_iter()
        .map(|h| h.join().expect("worker panicked"))
        .collect()
}

fn assert_one_winner(results: &[Result<i64, AppError>]) {
    let ok = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(AppError::Conflict(_))))
        .count();
    assert_eq!(ok, 1, "results: {results:?}");
    assert_eq!(conflicts, WORKERS - 1, "results: {results:?}");
}

#[test]
fn test_concurrent_shift_starts_admit_exactly_one() {
    let fx = fixture("concurrency_shift");
    let db_path = fx.db_path.clone();
    let alice = fx.alice.clone();
    drop(fx);

    let results = race(&db_path, move |t| {
        t.open(&alice, IntervalKind::Shift, None, None).map(|iv| iv.id)
    });
    assert_one_winner(&results);

    let pool = DbPool::new(&db_path).unwrap();
    let open: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM intervals WHERE kind = 'shift' AND ended_at IS NULL",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(open, 1);
}

#[test]
fn test_concurrent_break_starts_admit_exactly_one() {
    let mut fx = fixture("concurrency_break");
    let db_path = fx.db_path.clone();
    let alice = fx.alice.clone();
    IntervalTracker::new(&mut fx.pool, &FixedClock(utc(2025, 6, 2, 8, 0)))
        .open(&alice, IntervalKind::Shift, None, None)
        .unwrap();
    drop(fx);

    let results = race(&db_path, move |t| {
        t.open(&alice, IntervalKind::Break, None, Some(BreakType::Rest))
            .map(|iv| iv.id)
    });
    assert_one_winner(&results);
}

#[test]
fn test_concurrent_timer_starts_on_one_task_admit_exactly_one() {
    let fx = fixture("concurrency_timer");
    let db_path = fx.db_path.clone();
    let (alice, task) = (fx.alice.clone(), fx.task.id);
    drop(fx);

    let results = race(&db_path, move |t| {
        t.open(&alice, IntervalKind::TaskTimer, Some(task), None)
            .map(|iv| iv.id)
    });
    assert_one_winner(&results);
}

#[test]
fn test_concurrent_shift_ends_close_exactly_once() {
    let mut fx = fixture("concurrency_close");
    let db_path = fx.db_path.clone();
    let alice = fx.alice.clone();
    IntervalTracker::new(&mut fx.pool, &FixedClock(utc(2025, 6, 2, 8, 0)))
        .open(&alice, IntervalKind::Shift, None, None)
        .unwrap();
    drop(fx);

    let results = race(&db_path, move |t| {
        t.close(&alice, IntervalKind::Shift, None).map(|iv| iv.id)
    });

    let ok = results.iter().filter(|r| r.is_ok()).count();
    let not_found = results
        .iter()
        .filter(|r| matches!(r, Err(AppError::NotFound(_))))
        .count();
    assert_eq!(ok, 1, "results: {results:?}");
    assert_eq!(not_found, WORKERS - 1, "results: {results:?}");
}

#[test]
fn test_concurrent_timers_on_distinct_employees_all_succeed() {
    let fx = fixture("concurrency_distinct");
    let db_path = fx.db_path.clone();
    let (alice, bob, task) = (fx.alice.clone(), fx.bob.clone(), fx.task.id);
    drop(fx);

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = [alice, bob]
        .into_iter()
        .map(|emp| {
            let barrier = Arc::clone(&barrier);
            let path = db_path.clone();
            thread::spawn(move || {
                let mut pool = DbPool::new(&path).expect("open db");
                let clock = FixedClock(utc(2025, 6, 2, 9, 0));
                barrier.wait();
                IntervalTracker::new(&mut pool, &clock)
                    .open(&emp, IntervalKind::TaskTimer, Some(task), None)
                    .map(|iv| iv.id)
            })
        })
        .collect();

    for h in handles {
        assert!(h.join().expect("worker panicked").is_ok());
    }
}
