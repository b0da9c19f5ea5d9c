//! Per-broadcast metadata document.
//!
//! One pretty-printed JSON document per broadcast at a path derived from
//! the start date and broadcast id. Keys appear in declaration order and
//! the document is written once, after post-processing.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// An external event correlated with the broadcast window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEvent {
    pub start: DateTime<Utc>,
    pub title: String,
    pub subtitle: String,
    pub thumbnail: String,
}

/// The terminal artifact for one broadcast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub broadcast_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub events: Vec<MetadataEvent>,
    /// Filename of the rendered plot (raster encoding).
    pub plot: String,
    pub peak_viewers: u64,
    pub peak_offset_secs: i64,
}

impl MetadataRecord {
    /// Deterministic document stem: `<start-date>-<broadcast-id>`.
    #[must_use]
    pub fn stem(&self) -> String {
        format!("{}-{}", self.start.date_naive(), self.broadcast_id)
    }
}

/// Writes the record under `<dir>/streams/<start-date>-<id>.json` and
/// returns the path written.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if directories or the file cannot be
/// written, or [`StoreError::Json`] if serialization fails.
pub fn write_metadata(dir: &Path, record: &MetadataRecord) -> Result<PathBuf, StoreError> {
    let streams_dir = dir.join("streams");
    std::fs::create_dir_all(&streams_dir).map_err(|e| StoreError::io(&streams_dir, e))?;

    let path = streams_dir.join(format!("{}.json", record.stem()));
    let body = serde_json::to_string_pretty(record).map_err(|e| StoreError::Json {
        path: path.clone(),
        source: e,
    })?;
    std::fs::write(&path, body).map_err(|e| StoreError::io(&path, e))?;
    Ok(path)
}
