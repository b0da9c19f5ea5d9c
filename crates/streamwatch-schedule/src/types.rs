use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry from the external event schedule. Read-only to this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub start: DateTime<Utc>,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    /// Thumbnail image URL.
    #[serde(default)]
    pub thumbnail: String,
}

/// The feed document: events that already occurred (reverse-chronological,
/// newest first) and upcoming ones (chronological).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleFeed {
    #[serde(default)]
    pub past: Vec<ScheduleEvent>,
    #[serde(default)]
    pub scheduled: Vec<ScheduleEvent>,
}
