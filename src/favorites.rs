//! Favorite glyphs, keyed by name.
//!
//! Names rather than ids are stored so a favorite follows its glyph across
//! reloads and is simply inert while its name is absent from the index.
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use indexmap::IndexSet;

use crate::error::{GylteError, Result};
use crate::util::{read_file_lines_or_empty, write_lines};

/// The set of favorite glyph names, optionally persisted to a line file.
///
/// Every change is written through to the file before it returns; a failed
/// write leaves the set as it was.
#[derive(Debug, Default)]
pub struct Favorites {
    names: RwLock<IndexSet<String>>,
    path: Option<PathBuf>,
}

impl Favorites {
    /// Favorites kept in memory only
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Favorites persisted at `path`, loaded now. A missing file is an empty set.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let names: IndexSet<String> = read_file_lines_or_empty(&path)
            .map_err(|err| GylteError::io(&path, err))?
            .into_iter()
            .map(|line| line.trim().to_string())
            .collect();
        debug!("{} favorites loaded from {}", names.len(), path.display());
        Ok(Self {
            names: RwLock::new(names),
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.read().unwrap_or_else(PoisonError::into_inner).contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Favorite names, oldest first
    pub fn names(&self) -> Vec<String> {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// A copy of the current set, for checking many names without locking
    pub fn snapshot(&self) -> IndexSet<String> {
        self.names.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Flip the favorite state of `name` and return the new state
    pub fn toggle(&self, name: &str) -> Result<bool> {
        let mut names = self.names.write().unwrap_or_else(PoisonError::into_inner);
        let removed_at = names.get_index_of(name);
        match removed_at {
            Some(pos) => {
                names.shift_remove_index(pos);
            }
            None => {
                names.insert(name.to_string());
            }
        }
        let now_favorite = removed_at.is_none();

        if let Some(path) = &self.path {
            let lines: Vec<&str> = names.iter().map(String::as_str).collect();
            if let Err(err) = write_lines(path, &lines) {
                warn!("could not save favorites, undoing toggle of {name:?}: {err}");
                match removed_at {
                    Some(pos) => {
                        names.shift_insert(pos, name.to_string());
                    }
                    None => {
                        names.shift_remove(name);
                    }
                }
                return Err(GylteError::io(path, err));
            }
        }
        debug!("favorite {name:?}: {now_favorite}");
        Ok(now_favorite)
    }
}
