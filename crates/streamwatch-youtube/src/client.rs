//! HTTP client for the YouTube Data API v3.
//!
//! Wraps `reqwest` with API key management and typed response
//! deserialization for the two endpoints the monitor needs: live-broadcast
//! search (`search.list`) and live-streaming details (`videos.list`).

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::YouTubeError;
use crate::types::{LiveStreamingDetails, SearchResponse, VideosResponse};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Client for the YouTube Data API v3.
///
/// Manages the HTTP client, API key, and base URL. Use [`YouTubeClient::new`]
/// for production or [`YouTubeClient::with_base_url`] to point at a mock
/// server in tests.
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YouTubeClient {
    /// Creates a new client pointed at the production YouTube API.
    ///
    /// # Errors
    ///
    /// Returns [`YouTubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YouTubeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YouTubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YouTubeError::InvalidUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YouTubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("streamwatch/0.1 (live-viewership-monitor)")
            .build()?;

        // Normalise: the base URL must end with a slash so that join()
        // appends the resource name instead of replacing the last path
        // segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| YouTubeError::InvalidUrl {
            url: normalised.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Finds the currently-live broadcast on a channel, if any.
    ///
    /// Calls `search.list` restricted to `eventType=live&type=video` and
    /// returns the first match's video id; the platform orders results by
    /// relevance and this client applies no tie-break of its own.
    ///
    /// # Errors
    ///
    /// - [`YouTubeError::Http`] on network failure or non-2xx HTTP status.
    /// - [`YouTubeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn search_live(&self, channel_id: &str) -> Result<Option<String>, YouTubeError> {
        let url = self.build_url(
            "search",
            &[
                ("part", "snippet"),
                ("channelId", channel_id),
                ("eventType", "live"),
                ("type", "video"),
                ("maxResults", "1"),
            ],
        )?;
        let body = self.request_json(&url).await?;

        let envelope: SearchResponse =
            serde_json::from_value(body).map_err(|e| YouTubeError::Deserialize {
                context: format!("search(channelId={channel_id})"),
                source: e,
            })?;

        Ok(envelope
            .items
            .into_iter()
            .next()
            .and_then(|item| item.id.video_id))
    }

    /// Fetches the live-streaming details for a broadcast.
    ///
    /// Calls `videos.list` with `part=liveStreamingDetails`. Returns `None`
    /// when the video record is missing or carries no live details; callers
    /// classify that together with the field-presence matrix via
    /// [`crate::PollOutcome::from_details`].
    ///
    /// # Errors
    ///
    /// - [`YouTubeError::Http`] on network failure or non-2xx HTTP status.
    /// - [`YouTubeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn live_details(
        &self,
        video_id: &str,
    ) -> Result<Option<LiveStreamingDetails>, YouTubeError> {
        let url = self.build_url(
            "videos",
            &[("part", "liveStreamingDetails"), ("id", video_id)],
        )?;
        let body = self.request_json(&url).await?;

        let envelope: VideosResponse =
            serde_json::from_value(body).map_err(|e| YouTubeError::Deserialize {
                context: format!("videos(id={video_id})"),
                source: e,
            })?;

        Ok(envelope
            .items
            .into_iter()
            .next()
            .and_then(|item| item.live_streaming_details))
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters, appending the API key last.
    fn build_url(&self, resource: &str, extra: &[(&str, &str)]) -> Result<Url, YouTubeError> {
        let mut url = self
            .base_url
            .join(resource)
            .map_err(|e| YouTubeError::InvalidUrl {
                url: format!("{}{resource}", self.base_url),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`YouTubeError::Http`] on network failure or a non-2xx status.
    /// Returns [`YouTubeError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, YouTubeError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| YouTubeError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> YouTubeClient {
        YouTubeClient::with_base_url("test-key", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_constructs_correct_query_string() {
        let client = test_client("https://www.googleapis.com/youtube/v3");
        let url = client
            .build_url("videos", &[("part", "liveStreamingDetails"), ("id", "abc")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/youtube/v3/videos?part=liveStreamingDetails&id=abc&key=test-key"
        );
    }

    #[test]
    fn build_url_keeps_base_path_segments() {
        let client = test_client("http://127.0.0.1:9999/youtube/v3/");
        let url = client.build_url("search", &[("type", "video")]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9999/youtube/v3/search?type=video&key=test-key"
        );
    }

    #[test]
    fn build_url_encodes_special_characters() {
        let client = test_client("https://www.googleapis.com/youtube/v3");
        let url = client
            .build_url("search", &[("channelId", "UC test&id")])
            .unwrap();
        assert!(
            url.as_str().contains("UC+test%26id") || url.as_str().contains("UC%20test%26id"),
            "query param should be percent-encoded: {url}"
        );
    }
}
