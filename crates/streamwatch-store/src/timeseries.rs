//! Append-only per-broadcast time-series log.
//!
//! One file per broadcast, lines of `<epoch-seconds> <count>`, newline
//! terminated, no header. Each append is a single complete write so a
//! reader never sees a torn record from a finished append, and a partial
//! trailing record from an interrupted one is skippable.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use streamwatch_core::Sample;

use crate::error::StoreError;

/// Path of the series log for a broadcast id inside `log_dir`.
#[must_use]
pub fn series_path(log_dir: &Path, broadcast_id: &str) -> PathBuf {
    log_dir.join(format!("{broadcast_id}.log"))
}

/// Exclusive writer for one broadcast's series log.
///
/// Opens in append mode, so reopening the same broadcast after a crash
/// continues the series rather than overwriting it.
pub struct SeriesWriter {
    path: PathBuf,
    file: File,
}

impl SeriesWriter {
    /// Opens (creating if needed) the series log at `path`, creating parent
    /// directories along the way.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directories or file cannot be
    /// created.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| StoreError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Appends one complete record and flushes it to the OS.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] on write failure.
    pub fn append(&mut self, sample: Sample) -> Result<(), StoreError> {
        let line = format!("{} {}\n", sample.epoch_secs, sample.viewers);
        self.file
            .write_all(line.as_bytes())
            .map_err(|e| StoreError::io(&self.path, e))?;
        self.file
            .flush()
            .map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Reads a full series back in append order.
///
/// Records are independently parseable; a malformed line (e.g. the torn
/// tail of an interrupted write) is skipped with a warning rather than
/// failing the whole read.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be opened or read.
pub fn read_series(path: &Path) -> Result<Vec<Sample>, StoreError> {
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut samples = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| StoreError::io(path, e))?;
        match parse_record(&line) {
            Some(sample) => samples.push(sample),
            None => {
                if !line.trim().is_empty() {
                    tracing::warn!(path = %path.display(), line = %line, "skipping malformed series record");
                }
            }
        }
    }
    Ok(samples)
}

fn parse_record(line: &str) -> Option<Sample> {
    let mut parts = line.split_whitespace();
    let epoch_secs = parts.next()?.parse::<i64>().ok()?;
    let viewers = parts.next()?.parse::<u64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Sample {
        epoch_secs,
        viewers,
    })
}
