pub mod client;
pub mod error;
pub mod types;

pub use client::{events_overlapping, ScheduleClient};
pub use error::ScheduleError;
pub use types::{ScheduleEvent, ScheduleFeed};
