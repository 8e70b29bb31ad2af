pub mod break_type;
pub mod date_range;
pub mod employee;
pub mod interval;
pub mod interval_kind;
pub mod project;
pub mod report;
pub mod response;
