use std::path::PathBuf;

/// Application configuration, resolved once at startup and threaded by
/// reference through the monitor and post-processing code.
#[derive(Clone)]
pub struct AppConfig {
    pub youtube_api_key: String,
    pub channel_id: String,
    pub log_level: String,
    /// Directory holding per-broadcast time-series logs.
    pub log_dir: PathBuf,
    /// Root of the published artifacts (plots, metadata, index).
    pub out_dir: PathBuf,
    pub schedule_feed_url: Option<String>,
    /// Poll cadence while monitoring. Ticks align to wall-clock multiples
    /// of this interval, not to a fixed sleep after the previous tick.
    pub poll_interval_secs: u64,
    pub search_backoff_secs: u64,
    pub request_timeout_secs: u64,
    /// Broadcasts shorter than this are not worth publishing.
    pub min_duration_mins: i64,
    pub recorder_cmd: String,
    pub recorder_grace_secs: u64,
    pub svg_optimizer: String,
    pub png_optimizer: String,
    pub site_rebuild_cmd: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("youtube_api_key", &"[redacted]")
            .field("channel_id", &self.channel_id)
            .field("log_level", &self.log_level)
            .field("log_dir", &self.log_dir)
            .field("out_dir", &self.out_dir)
            .field("schedule_feed_url", &self.schedule_feed_url)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("search_backoff_secs", &self.search_backoff_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("min_duration_mins", &self.min_duration_mins)
            .field("recorder_cmd", &self.recorder_cmd)
            .field("recorder_grace_secs", &self.recorder_grace_secs)
            .field("svg_optimizer", &self.svg_optimizer)
            .field("png_optimizer", &self.png_optimizer)
            .field("site_rebuild_cmd", &self.site_rebuild_cmd)
            .finish()
    }
}
