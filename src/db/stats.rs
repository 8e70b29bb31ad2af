use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    for (label, sql) in [
        ("Employees", "SELECT COUNT(*) FROM employees"),
        ("Projects", "SELECT COUNT(*) FROM projects"),
        ("Tasks", "SELECT COUNT(*) FROM tasks"),
        ("Intervals", "SELECT COUNT(*) FROM intervals"),
        (
            "Open intervals",
            "SELECT COUNT(*) FROM intervals WHERE ended_at IS NULL",
        ),
    ] {
        let count: i64 = pool.conn.query_row(sql, [], |row| row.get(0))?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, count, RESET);
    }

    //
    // 3) TIME RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row("SELECT MIN(started_at) FROM intervals", [], |row| {
            row.get::<_, Option<String>>(0)
        })
        .optional()?
        .flatten();

    let last: Option<String> = pool
        .conn
        .query_row("SELECT MAX(started_at) FROM intervals", [], |row| {
            row.get::<_, Option<String>>(0)
        })
        .optional()?
        .flatten();

    let fmt_first = first.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Interval range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
