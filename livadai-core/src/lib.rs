pub mod identity;
pub mod time;

pub use identity::{Actor, Role};
pub use time::{parse_instant, Clock, FixedClock, SystemClock};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}
