use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

/// When set, informational output is suppressed so stdout carries only the
/// JSON payload. Errors still go to stderr.
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn info<T: fmt::Display>(msg: T) {
    if !is_quiet() {
        println!("{}{}{} {}{}", FG_BLUE, BOLD, ICON_INFO, RESET, msg);
    }
}

pub fn success<T: fmt::Display>(msg: T) {
    if !is_quiet() {
        println!("{}{}{} {}{}", FG_GREEN, BOLD, ICON_OK, RESET, msg);
    }
}

pub fn warning<T: fmt::Display>(msg: T) {
    if !is_quiet() {
        println!("{}{}{} {}{}", FG_YELLOW, BOLD, ICON_WARN, RESET, msg);
    }
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", FG_RED, BOLD, ICON_ERR, RESET, msg);
}

/// Formatted section header
pub fn header<T: fmt::Display>(msg: T) {
    if !is_quiet() {
        println!(
            "{}{}====================== {}\n{}",
            FG_BLUE, BOLD, msg, RESET
        );
    }
}
