pub mod duration;

pub use duration::{
    breaks_minutes, duration_minutes, elapsed_minutes, minutes_between, net_minutes,
};
