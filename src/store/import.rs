//! One-time import of a glyph fixture into a store file.
use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GylteError, Result};
use crate::glyph::GlyphId;
use crate::store::{STORE_VERSION, StoreFile, StoredGlyph};
use crate::util::write_atomic;

/// Number of categories listed in an [`ImportReport`]
pub const TOP_CATEGORIES: usize = 10;
const PROGRESS_EVERY: usize = 1000;

/// One entry of the fixture file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureGlyph {
    pub name: String,
    pub glyph: String,
}

/// Outcome of [`import_fixture`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Glyphs written to the store
    pub total: usize,
    /// Entries dropped because their name was already seen
    pub duplicates: usize,
    /// Entries dropped because their name was empty
    pub skipped: usize,
    pub categories: usize,
    pub prefixes: usize,
    /// Largest categories with their sizes, largest first
    pub top_categories: Vec<(String, usize)>,
}

impl Display for ImportReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "glyphs: {}", self.total)?;
        writeln!(f, "duplicates dropped: {}", self.duplicates)?;
        if self.skipped > 0 {
            writeln!(f, "unnamed entries dropped: {}", self.skipped)?;
        }
        writeln!(f, "categories: {}", self.categories)?;
        writeln!(f, "prefixes: {}", self.prefixes)?;
        for (rank, (category, count)) in self.top_categories.iter().enumerate() {
            writeln!(f, "{:>3}. {category}: {count}", rank + 1)?;
        }
        Ok(())
    }
}

/// Read a fixture file: a JSON array of `{"name", "glyph"}` objects
pub fn load_fixture(path: &Path) -> Result<Vec<FixtureGlyph>> {
    let content = std::fs::read_to_string(path).map_err(|err| GylteError::io(path, err))?;
    serde_json::from_str(&content).map_err(|err| GylteError::json(path, err))
}

/// Drop unnamed entries and later duplicates of a name, number the rest from 1.
///
/// Returns the kept glyphs, the number of duplicates and the number of
/// unnamed entries.
pub fn dedupe(fixture: Vec<FixtureGlyph>) -> (Vec<StoredGlyph>, usize, usize) {
    let mut seen: HashSet<String> = HashSet::with_capacity(fixture.len());
    let mut glyphs = Vec::with_capacity(fixture.len());
    let (mut duplicates, mut skipped) = (0, 0);

    for (i, item) in fixture.into_iter().enumerate() {
        if i > 0 && i % PROGRESS_EVERY == 0 {
            debug!("processed {i} fixture entries");
        }
        if item.name.is_empty() {
            skipped += 1;
            continue;
        }
        if !seen.insert(item.name.clone()) {
            trace!("duplicate glyph name {:?}", item.name);
            duplicates += 1;
            continue;
        }
        let id = GlyphId(glyphs.len() as u32 + 1);
        glyphs.push(StoredGlyph::new(id, item.name, item.glyph));
    }
    (glyphs, duplicates, skipped)
}

/// Categories by descending size, ties by name, at most `limit` of them
pub fn top_categories(glyphs: &[StoredGlyph], limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for category in glyphs.iter().filter_map(|g| g.category.as_deref()) {
        *counts.entry(category).or_default() += 1;
    }
    let mut counts: Vec<(String, usize)> = counts.into_iter().map(|(c, n)| (c.to_string(), n)).collect();
    counts.sort_by(|(name_a, count_a), (name_b, count_b)| count_b.cmp(count_a).then_with(|| name_a.cmp(name_b)));
    counts.truncate(limit);
    counts
}

/// Write `glyphs` as a store file, replacing `path` atomically
pub fn write_store(path: &Path, glyphs: Vec<StoredGlyph>) -> Result<()> {
    let file = StoreFile {
        version: STORE_VERSION,
        glyphs,
    };
    write_atomic(path, |out| {
        serde_json::to_writer(&mut *out, &file).map_err(std::io::Error::from)?;
        out.write_all(b"\n")
    })
    .map_err(|err| GylteError::io(path, err))
}

/// Import the fixture at `fixture_path` into a new store file at `store_path`
pub fn import_fixture(fixture_path: &Path, store_path: &Path) -> Result<ImportReport> {
    let fixture = load_fixture(fixture_path)?;
    info!("loaded {} glyphs from {}", fixture.len(), fixture_path.display());

    let (glyphs, duplicates, skipped) = dedupe(fixture);
    let categories: HashSet<&str> = glyphs.iter().filter_map(|g| g.category.as_deref()).collect();
    let prefixes: HashSet<&str> = glyphs.iter().filter_map(|g| g.prefix.as_deref()).collect();
    let report = ImportReport {
        total: glyphs.len(),
        duplicates,
        skipped,
        categories: categories.len(),
        prefixes: prefixes.len(),
        top_categories: top_categories(&glyphs, TOP_CATEGORIES),
    };

    write_store(store_path, glyphs)?;
    info!(
        "wrote {} glyphs to {} ({} duplicates dropped)",
        report.total,
        store_path.display(),
        report.duplicates
    );
    Ok(report)
}
