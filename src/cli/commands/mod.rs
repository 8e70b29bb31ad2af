pub mod backup;
pub mod breaks;
pub mod common;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod employee;
pub mod export;
pub mod history;
pub mod init;
pub mod log;
pub mod project;
pub mod report;
pub mod shift;
pub mod status;
pub mod task;
