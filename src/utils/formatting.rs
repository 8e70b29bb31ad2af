//! Formatting utilities used for CLI and export outputs.

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

pub fn pad_left(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}

pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 && want_sign {
        "-"
    } else {
        ""
    };

    if short {
        // es: +02:25
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        // es: 02h 25m
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Horizontal rule built from the configured separator character.
pub fn separator(ch: &str, width: usize) -> String {
    ch.chars().next().unwrap_or('-').to_string().repeat(width)
}
