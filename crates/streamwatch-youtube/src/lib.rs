pub mod client;
pub mod error;
pub mod types;

pub use client::YouTubeClient;
pub use error::YouTubeError;
pub use types::{LiveStreamingDetails, PollOutcome};
