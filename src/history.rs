//! History stores
//!
//! Dispatch records one [`HistoryEntry`] per attempt through a
//! [`HistoryStore`]. [`FileHistory`] appends JSON lines to the config
//! directory; [`MemoryHistory`] keeps entries in process.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::warn;

use crate::errors::Result;
use crate::models::HistoryEntry;

/// Sink for dispatch attempts
pub trait HistoryStore {
    fn record(&self, entry: HistoryEntry) -> Result<()>;
}

impl<S: HistoryStore + ?Sized> HistoryStore for &S {
    fn record(&self, entry: HistoryEntry) -> Result<()> {
        (**self).record(entry)
    }
}

/// In-process history
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded entries, oldest first
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries are append-only, so a panic while the lock was held cannot
    /// leave them inconsistent
    fn lock(&self) -> MutexGuard<'_, Vec<HistoryEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl HistoryStore for MemoryHistory {
    fn record(&self, entry: HistoryEntry) -> Result<()> {
        self.lock().push(entry);
        Ok(())
    }
}

/// History persisted as one JSON object per line
#[derive(Debug, Clone)]
pub struct FileHistory {
    path: PathBuf,
}

impl FileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all entries, oldest first.
    ///
    /// A missing file is an empty history; unreadable lines are skipped.
    pub fn load(&self) -> Result<Vec<HistoryEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let entries = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(num, line)| match serde_json::from_str(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(path = %self.path.display(), line = num + 1, error = %e, "skipping corrupt history line");
                    None
                }
            })
            .collect();

        Ok(entries)
    }
}

impl HistoryStore for FileHistory {
    fn record(&self, entry: HistoryEntry) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;
    use crate::models::{HistoryResponse, Request, ResponseSummary};

    fn entry(url: &str) -> HistoryEntry {
        let summary = ResponseSummary::failure("Request timed out", 5);
        HistoryEntry::new(Request::new(Method::Get, url), Some(HistoryResponse::from(&summary)))
    }

    #[test]
    fn test_memory_history() {
        let history = MemoryHistory::new();
        assert!(history.is_empty());

        history.record(entry("http://a")).unwrap();
        (&history).record(entry("http://b")).unwrap();

        let entries = history.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].request.url, "http://b");
    }

    #[test]
    fn test_memory_history_survives_poisoned_lock() {
        let history = MemoryHistory::new();
        history.record(entry("http://a")).unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = history.entries.lock().unwrap();
            panic!("panic while holding the history lock");
        }));
        assert!(result.is_err());
        assert!(history.entries.is_poisoned());

        history.record(entry("http://b")).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].request.url, "http://a");
        assert!(!history.is_empty());
    }

    #[test]
    fn test_file_history_appends() {
        let dir = tempfile::tempdir().unwrap();
        let history = FileHistory::new(dir.path().join("nested").join("history.jsonl"));
        assert!(history.load().unwrap().is_empty());

        let first = entry("http://a");
        history.record(first.clone()).unwrap();
        history.record(entry("http://b")).unwrap();

        let entries = history.load().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], first);
    }

    #[test]
    fn test_file_history_skips_corrupt_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.jsonl");
        let history = FileHistory::new(&path);

        history.record(entry("http://a")).unwrap();
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "{{not json").unwrap();
        history.record(entry("http://b")).unwrap();

        let entries = history.load().unwrap();
        assert_eq!(entries.len(), 2);
    }
}
