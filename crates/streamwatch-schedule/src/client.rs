//! Client for the external event-schedule feed.
//!
//! The feed is a single JSON document split into `past` (newest first) and
//! `scheduled` (chronological) event lists. One fetch per invocation, no
//! caching.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;

use crate::error::ScheduleError;
use crate::types::{ScheduleEvent, ScheduleFeed};

/// Client for the external event-schedule feed.
pub struct ScheduleClient {
    client: Client,
    feed_url: String,
}

impl ScheduleClient {
    /// Creates a new client for the given feed URL.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(feed_url: &str, timeout_secs: u64) -> Result<Self, ScheduleError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("streamwatch/0.1 (live-viewership-monitor)")
            .build()?;

        Ok(Self {
            client,
            feed_url: feed_url.to_owned(),
        })
    }

    /// Fetches and parses the feed document.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ScheduleError::Deserialize`] if the document does not match the
    ///   expected shape.
    pub async fn fetch(&self) -> Result<ScheduleFeed, ScheduleError> {
        let response = self.client.get(&self.feed_url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ScheduleError::Deserialize {
            context: self.feed_url.clone(),
            source: e,
        })
    }
}

/// Returns the events whose start instant falls inside `[from, to]`
/// (inclusive), in chronological order.
///
/// The feed stores past events newest-first, so they are reversed before
/// being concatenated with the already-chronological scheduled list.
#[must_use]
pub fn events_overlapping(
    feed: &ScheduleFeed,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Vec<ScheduleEvent> {
    feed.past
        .iter()
        .rev()
        .chain(feed.scheduled.iter())
        .filter(|event| event.start >= from && event.start <= to)
        .cloned()
        .collect()
}
