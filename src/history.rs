//! Most recent first list of search queries.
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::error::{GylteError, Result};
use crate::util::{read_file_lines_or_empty, write_lines};

/// Default number of queries kept
pub const DEFAULT_HISTORY_SIZE: usize = 20;

/// Bounded search history.
///
/// Adding a query already present moves it to the front instead of keeping a
/// second copy.
#[derive(Debug)]
pub struct SearchHistory {
    entries: RwLock<VecDeque<String>>,
    max_size: usize,
    path: Option<PathBuf>,
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}

impl SearchHistory {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(max_size)),
            max_size,
            path: None,
        }
    }

    /// History saved at `path`, most recent query on the first line
    pub fn open(path: impl Into<PathBuf>, max_size: usize) -> Result<Self> {
        let path = path.into();
        let mut entries: VecDeque<String> = VecDeque::with_capacity(max_size);
        for line in read_file_lines_or_empty(&path).map_err(|err| GylteError::io(&path, err))? {
            let query = line.trim();
            if !entries.iter().any(|entry| entry == query) {
                entries.push_back(query.to_string());
            }
        }
        entries.truncate(max_size);
        Ok(Self {
            entries: RwLock::new(entries),
            max_size,
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Record `query` as the most recent one. Blank queries are ignored.
    pub fn add(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() || self.max_size == 0 {
            return;
        }
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(pos) = entries.iter().position(|entry| entry == query) {
            if pos == 0 {
                return;
            }
            entries.remove(pos);
        }
        entries.push_front(query.to_string());
        entries.truncate(self.max_size);
    }

    /// Queries, most recent first
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Write the history to its file, if it has one
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        write_lines(path, &self.entries()).map_err(|err| GylteError::io(path, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_recent_first_without_duplicates() {
        let history = SearchHistory::new(20);
        for query in ["car", "acc", "car", "  ", "box"] {
            history.add(query);
        }
        assert_eq!(history.entries(), ["box", "car", "acc"]);
    }

    #[test]
    fn bounded_by_max_size() {
        let history = SearchHistory::new(3);
        for query in ["a", "b", "c", "d"] {
            history.add(query);
        }
        assert_eq!(history.entries(), ["d", "c", "b"]);
        history.clear();
        assert!(history.entries().is_empty());
    }

    #[test]
    fn zero_size_keeps_nothing() {
        let history = SearchHistory::new(0);
        history.add("a");
        assert!(history.entries().is_empty());
    }

    #[test]
    fn saved_history_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        let history = SearchHistory::open(&path, 2).unwrap();
        history.add("one");
        history.add("two");
        history.add("three");
        history.save().unwrap();

        let reloaded = SearchHistory::open(&path, 5).unwrap();
        assert_eq!(reloaded.entries(), ["three", "two"]);
    }
}
