use thiserror::Error;

/// Errors returned by the event-schedule feed client.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Network or TLS failure, or a non-2xx HTTP status from the feed host.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed document could not be deserialized.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
