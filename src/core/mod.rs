pub mod admin;
pub mod backup;
pub mod calculator;
pub mod clock;
pub mod identity;
pub mod log;
pub mod report;
pub mod tracker;
