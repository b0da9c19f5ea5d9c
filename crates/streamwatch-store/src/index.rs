//! Append-only global index of processed broadcasts.
//!
//! One line per broadcast: `<date> <broadcast-id>`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::StoreError;

/// Appends one `<date> <broadcast-id>` line to the index at `path`,
/// creating the file and parent directories if needed.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be created or written.
pub fn append_index(path: &Path, date: NaiveDate, broadcast_id: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| StoreError::io(path, e))?;
    let line = format!("{date} {broadcast_id}\n");
    file.write_all(line.as_bytes())
        .map_err(|e| StoreError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_lines_accumulate_in_append_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("streams.txt");

        let d1 = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 6, 8).unwrap();
        append_index(&path, d1, "abc123").unwrap();
        append_index(&path, d2, "def456").unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "2025-06-01 abc123\n2025-06-08 def456\n");
    }

    #[test]
    fn parent_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deep/streams.txt");
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        append_index(&path, date, "abc123").unwrap();
        assert!(path.exists());
    }
}
