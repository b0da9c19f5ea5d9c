//! Typed response shapes for the two YouTube Data API endpoints the monitor
//! uses, and the classification of a details record into a poll outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// `search.list` response envelope. Only the video id is consumed.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub id: SearchItemId,
}

#[derive(Debug, Deserialize)]
pub struct SearchItemId {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

/// `videos.list` response envelope restricted to `part=liveStreamingDetails`.
#[derive(Debug, Deserialize)]
pub struct VideosResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
pub struct VideoItem {
    pub id: String,
    #[serde(rename = "liveStreamingDetails")]
    pub live_streaming_details: Option<LiveStreamingDetails>,
}

/// The live portion of a video record. All fields are optional on the wire;
/// which ones are present encodes the broadcast's lifecycle state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiveStreamingDetails {
    #[serde(rename = "actualStartTime")]
    pub actual_start_time: Option<DateTime<Utc>>,
    #[serde(rename = "actualEndTime")]
    pub actual_end_time: Option<DateTime<Utc>>,
    /// The API reports this as a decimal string while the stream is live and
    /// omits it entirely afterwards.
    #[serde(
        rename = "concurrentViewers",
        default,
        deserialize_with = "viewer_count"
    )]
    pub concurrent_viewers: Option<u64>,
}

/// Accepts the viewer count as either a JSON string (what the API sends) or
/// a bare number (what mocks tend to send).
fn viewer_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Num(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => s.parse::<u64>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// What one successful details lookup means for the monitor. A tick that
/// fails at the transport or parse layer never reaches this type; it is the
/// `Err` branch of the client call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The stream is live and reported a viewer count: sample it.
    Live { viewers: u64 },
    /// The platform reports the broadcast has concluded.
    Ended,
    /// Started, not ended, but no viewer count: transient anomaly, skip the
    /// tick without touching state.
    Anomaly,
    /// No live record at all: the video is not actually live, skip the tick.
    NotLive,
}

impl PollOutcome {
    /// Classifies a details lookup per the field-presence matrix:
    /// viewer count present means live; otherwise an end time means ended;
    /// otherwise a start time alone is an anomaly; nothing means not live.
    #[must_use]
    pub fn from_details(details: Option<&LiveStreamingDetails>) -> Self {
        let Some(d) = details else {
            return PollOutcome::NotLive;
        };
        if let Some(viewers) = d.concurrent_viewers {
            return PollOutcome::Live { viewers };
        }
        if d.actual_end_time.is_some() {
            return PollOutcome::Ended;
        }
        if d.actual_start_time.is_some() {
            return PollOutcome::Anomaly;
        }
        PollOutcome::NotLive
    }
}
