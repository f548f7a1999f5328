//! Where glyph records come from.
//!
//! The index only needs `list_all`. The store file is JSON:
//!
//! ```json
//! {"version": 1, "glyphs": [{"id": 1, "name": "nf-cod-account", "glyph": "", "category": "cod", "prefix": "nf"}]}
//! ```
//!
//! A bare fixture array (`[{"name": ..., "glyph": ...}]`) is read as well, with
//! ids numbered from 1 in file order.
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{GylteError, Result};
use crate::glyph::{GlyphId, GlyphRecord, NameSegments};

pub mod import;

pub use import::{FixtureGlyph, ImportReport, import_fixture};

/// Version of the store file format written by this build
pub const STORE_VERSION: u32 = 1;

/// One glyph as written in the store file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredGlyph {
    pub id: GlyphId,
    pub name: String,
    pub glyph: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl StoredGlyph {
    /// Fill in prefix and category from the name
    pub fn new(id: GlyphId, name: impl Into<String>, glyph: impl Into<String>) -> Self {
        let name = name.into();
        let segments = NameSegments::parse(&name);
        let prefix = segments.prefix.map(str::to_string);
        let category = segments.category.map(str::to_string);
        Self {
            id,
            name,
            glyph: glyph.into(),
            category,
            prefix,
        }
    }

    /// The stored category and prefix are informational; the record derives
    /// its own from the name
    pub fn into_record(self) -> GlyphRecord {
        GlyphRecord::new(self.id, &self.name, &self.glyph)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct StoreFile {
    pub version: u32,
    pub glyphs: Vec<StoredGlyph>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoreContents {
    Versioned(StoreFile),
    Fixture(Vec<FixtureGlyph>),
}

//------------------------------------------------------------------------------
/// Source of glyph records
pub trait NameStore: Send + Sync {
    /// Every record in the store's natural order
    fn list_all(&self) -> Result<Vec<GlyphRecord>>;

    /// Records whose name contains `filter`, ignoring case, in natural order.
    ///
    /// The picker never calls this; it ranks the output of [`NameStore::list_all`].
    fn list_matching(&self, filter: &str) -> Result<Vec<GlyphRecord>> {
        let filter = filter.to_lowercase();
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|record| record.name().to_lowercase().contains(&filter))
            .collect())
    }
}

impl<T: NameStore + ?Sized> NameStore for Arc<T> {
    fn list_all(&self) -> Result<Vec<GlyphRecord>> {
        (**self).list_all()
    }

    fn list_matching(&self, filter: &str) -> Result<Vec<GlyphRecord>> {
        (**self).list_matching(filter)
    }
}

//------------------------------------------------------------------------------
/// Store backed by a JSON file, read anew on every `list_all`.
///
/// Natural order is by name.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the store file
    pub fn read_glyphs(&self) -> Result<Vec<StoredGlyph>> {
        let content = std::fs::read_to_string(&self.path).map_err(|err| GylteError::io(&self.path, err))?;
        let contents: StoreContents =
            serde_json::from_str(&content).map_err(|err| GylteError::json(&self.path, err))?;
        match contents {
            StoreContents::Versioned(file) if file.version == STORE_VERSION => Ok(file.glyphs),
            StoreContents::Versioned(file) => Err(GylteError::StoreVersion {
                path: self.path.clone(),
                version: file.version,
            }),
            StoreContents::Fixture(fixture) => {
                debug!("{}: reading bare fixture array", self.path.display());
                Ok(fixture
                    .into_iter()
                    .zip(1..)
                    .map(|(item, id)| StoredGlyph::new(GlyphId(id), item.name, item.glyph))
                    .collect())
            }
        }
    }
}

impl NameStore for JsonStore {
    fn list_all(&self) -> Result<Vec<GlyphRecord>> {
        let mut glyphs = self.read_glyphs()?;
        glyphs.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("{}: {} glyphs", self.path.display(), glyphs.len());
        Ok(glyphs.into_iter().map(StoredGlyph::into_record).collect())
    }
}

//------------------------------------------------------------------------------
/// Store holding its records in memory, in insertion order
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<GlyphRecord>>,
}

impl MemoryStore {
    pub fn new(records: Vec<GlyphRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Records from `(name, symbol)` pairs, ids numbered from 1
    pub fn from_pairs<N, S>(pairs: impl IntoIterator<Item = (N, S)>) -> Self
    where
        N: AsRef<str>,
        S: AsRef<str>,
    {
        Self::new(records_from_pairs(pairs))
    }

    /// Swap the content; the next load sees the new records
    pub fn replace(&self, records: Vec<GlyphRecord>) {
        *self.records.write().unwrap_or_else(PoisonError::into_inner) = records;
    }
}

impl NameStore for MemoryStore {
    fn list_all(&self) -> Result<Vec<GlyphRecord>> {
        Ok(self.records.read().unwrap_or_else(PoisonError::into_inner).clone())
    }
}

/// Number `(name, symbol)` pairs from 1
pub fn records_from_pairs<N, S>(pairs: impl IntoIterator<Item = (N, S)>) -> Vec<GlyphRecord>
where
    N: AsRef<str>,
    S: AsRef<str>,
{
    pairs
        .into_iter()
        .zip(1..)
        .map(|((name, symbol), id)| GlyphRecord::new(GlyphId(id), name.as_ref(), symbol.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn names(records: &[GlyphRecord]) -> Vec<&str> {
        records.iter().map(GlyphRecord::name).collect()
    }

    #[test]
    fn versioned_file_is_listed_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(
            &path,
            r#"{"version":1,"glyphs":[
                {"id":2,"name":"nf-fa-car","glyph":"c"},
                {"id":1,"name":"nf-cod-account","glyph":"a","category":"cod","prefix":"nf"}
            ]}"#,
        )
        .unwrap();
        let records = JsonStore::open(&path).list_all().unwrap();
        assert_eq!(names(&records), ["nf-cod-account", "nf-fa-car"]);
        assert_eq!(records[1].id(), GlyphId(2));
        assert_eq!(records[1].category(), Some("fa"));
    }

    #[test]
    fn bare_fixture_array_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glyphs.json");
        fs::write(&path, r#"[{"name":"b-x","glyph":"1"},{"name":"a-y","glyph":"2"}]"#).unwrap();
        let records = JsonStore::open(&path).list_all().unwrap();
        assert_eq!(names(&records), ["a-y", "b-x"]);
        assert_eq!(records[0].id(), GlyphId(2));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, r#"{"version":9,"glyphs":[]}"#).unwrap();
        let err = JsonStore::open(&path).list_all().unwrap_err();
        assert!(matches!(err, GylteError::StoreVersion { version: 9, .. }));
    }

    #[test]
    fn missing_and_broken_files_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = JsonStore::open(dir.path().join("nope.json"));
        assert!(matches!(missing.list_all(), Err(GylteError::Io { .. })));
        let path = dir.path().join("broken.json");
        fs::write(&path, "{").unwrap();
        assert!(matches!(JsonStore::open(&path).list_all(), Err(GylteError::Json { .. })));
    }

    #[test]
    fn list_matching_filters_case_insensitively() {
        let store = MemoryStore::from_pairs([("nf-cod-Account", "a"), ("nf-fa-car", "c")]);
        let records = store.list_matching("ACC").unwrap();
        assert_eq!(names(&records), ["nf-cod-Account"]);
    }

    #[test]
    fn memory_store_replace() {
        let store = MemoryStore::from_pairs([("a", "1")]);
        store.replace(records_from_pairs([("b", "2"), ("c", "3")]));
        assert_eq!(names(&store.list_all().unwrap()), ["b", "c"]);
    }
}
