#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, TimeZone, Utc};
use std::env;
use std::fs;
use std::path::PathBuf;
use worktracker::core::admin::AdminLogic;
use worktracker::core::identity::Principal;
use worktracker::db::initialize::init_db;
use worktracker::db::pool::DbPool;
use worktracker::models::employee::{Employee, NewEmployee};
use worktracker::models::project::Task;

pub fn wt() -> Command {
    cargo_bin_cmd!("worktracker")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_worktracker.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

/// Initialize DB through the CLI and register `boss` (admin), `alice` and
/// `bob`, one project and one task (#1).
pub fn init_db_with_team(db_path: &str) {
    wt().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    wt().args(["--db", db_path, "employee", "add", "boss", "--admin"])
        .assert()
        .success();

    for name in ["alice", "bob"] {
        wt().args(["--db", db_path, "-u", "boss", "employee", "add", name])
            .assert()
            .success();
    }

    wt().args(["--db", db_path, "-u", "boss", "project", "add", "Website"])
        .assert()
        .success();

    wt().args([
        "--db", db_path, "-u", "boss", "task", "add", "--project", "1", "Landing page",
    ])
    .assert()
    .success();
}

/// Library-level fixture: an initialized pool with an admin, one employee
/// and one task.
pub struct Fixture {
    pub db_path: String,
    pub pool: DbPool,
    pub admin: Principal,
    pub alice: Employee,
    pub bob: Employee,
    pub task: Task,
}

pub fn fixture(name: &str) -> Fixture {
    let db_path = setup_test_db(name);
    let mut pool = DbPool::new(&db_path).expect("open db");
    init_db(&pool.conn).expect("init db");

    let boss = AdminLogic::add_employee(
        &mut pool,
        None,
        NewEmployee {
            username: "boss".into(),
            is_admin: true,
            ..Default::default()
        },
    )
    .expect("bootstrap admin");
    let admin = Principal { employee: boss };

    let alice = AdminLogic::add_employee(
        &mut pool,
        Some(&admin),
        NewEmployee {
            username: "alice".into(),
            display_name: "Alice Rossi".into(),
            ..Default::default()
        },
    )
    .expect("add alice");
    let bob = AdminLogic::add_employee(
        &mut pool,
        Some(&admin),
        NewEmployee {
            username: "bob".into(),
            ..Default::default()
        },
    )
    .expect("add bob");

    let project = AdminLogic::add_project(&mut pool, &admin, "Website").expect("project");
    let task = AdminLogic::add_task(&mut pool, &admin, project.id, "Landing page").expect("task");

    Fixture {
        db_path,
        pool,
        admin,
        alice,
        bob,
        task,
    }
}
