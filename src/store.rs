//! Saved report persistence.
//!
//! The list of saved reports that feeds batch export is persisted behind an
//! injected store interface with explicit load/save operations, so the
//! export core never touches a particular storage medium. The crate ships a
//! JSON-file implementation for server-side use.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

/// One saved report in the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedReport {
    /// Stable identifier
    pub id: Uuid,
    /// Title shown in the library and in exported page headers
    pub title: String,
    /// When the report was saved
    pub saved_at: DateTime<Utc>,
}

impl SavedReport {
    /// Create a report saved now, with a fresh id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            saved_at: Utc::now(),
        }
    }
}

/// Loads and saves the report library.
pub trait ReportStore {
    /// Load all saved reports, oldest first.
    fn load(&self) -> Result<Vec<SavedReport>>;

    /// Replace the stored library with `reports`.
    fn save(&self, reports: &[SavedReport]) -> Result<()>;
}

/// [`ReportStore`] backed by a single JSON file.
///
/// A missing file reads as an empty library; saves write the whole file in
/// one pass.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store persisting to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportStore for JsonFileStore {
    fn load(&self) -> Result<Vec<SavedReport>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => {
                let reports = serde_json::from_slice(&bytes)
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
                Ok(reports)
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, reports: &[SavedReport]) -> Result<()> {
        let json = serde_json::to_vec_pretty(reports)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("library.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("library.json"));

        let reports = vec![
            SavedReport::new("Flood exposure summary"),
            SavedReport::new("Q3 claims digest"),
        ];
        store.save(&reports).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, reports);
    }

    #[test]
    fn test_save_replaces_library() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("library.json"));

        store.save(&[SavedReport::new("old")]).unwrap();
        let replacement = vec![SavedReport::new("new")];
        store.save(&replacement).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "new");
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let store = JsonFileStore::new(path);
        assert!(store.load().is_err());
    }
}
