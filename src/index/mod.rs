//! In-memory glyph index.
//!
//! [`GlyphIndex`] is the read-only working set built from one load of the
//! store: duplicate names removed, categories extracted, and normalized keys
//! fed into a lookup table and a [`PrefixTrie`] for the indexed search strategy.
//! [`SearchIndex`] owns the current `GlyphIndex` and its readiness.
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use memchr::memmem;

use crate::engine::util::{key_words, normalize_key, strip_diacritics};
use crate::fuzzy_matcher::ScoreType;
use crate::glyph::{GlyphId, GlyphRecord};

mod shared;
pub mod trie;

pub use shared::{Readiness, SearchIndex};
pub use trie::PrefixTrie;

/// Below this many hits from the lookup table and the trie, the indexed search
/// also scans every normalized name for a substring hit.
pub const SCAN_FALLBACK_THRESHOLD: usize = 10;

const EXACT_RELEVANCE: ScoreType = 1000;
const PREFIX_RELEVANCE: ScoreType = 800;
const WORD_PREFIX_RELEVANCE: ScoreType = 600;
const SUBSTRING_RELEVANCE: ScoreType = 400;
const DEFAULT_RELEVANCE: ScoreType = 100;
/// Names shorter than this many characters get the difference as a bonus
const SHORT_NAME_LENGTH: ScoreType = 50;

//------------------------------------------------------------------------------
/// Options for building a [`GlyphIndex`]
#[derive(Debug, Default, Clone, Copy)]
pub struct IndexOptions {
    /// Strip diacritics from the normalized keys and queries
    pub strip_diacritics: bool,
}

/// The read-only working set of one load
#[derive(Debug, Default)]
pub struct GlyphIndex {
    records: Vec<Arc<GlyphRecord>>,
    positions: HashMap<GlyphId, usize>,
    /// Normalized key of every record, same order as `records`
    keys: Vec<String>,
    by_key: HashMap<String, Vec<GlyphId>>,
    trie: PrefixTrie,
    categories: IndexMap<String, Vec<GlyphId>>,
    duplicates: usize,
    options: IndexOptions,
}

impl GlyphIndex {
    /// Build an index from records in their natural order.
    ///
    /// Later records whose name, or id, was already seen are dropped.
    pub fn build(records: impl IntoIterator<Item = GlyphRecord>) -> Self {
        Self::build_with(records, IndexOptions::default())
    }

    pub fn build_with(records: impl IntoIterator<Item = GlyphRecord>, options: IndexOptions) -> Self {
        let mut index = Self {
            options,
            ..Self::default()
        };
        let mut seen_names: HashSet<Box<str>> = HashSet::new();

        for record in records {
            if index.positions.contains_key(&record.id()) {
                warn!("dropping {:?}: id {} is already taken", record.name(), record.id());
                index.duplicates += 1;
                continue;
            }
            if !seen_names.insert(record.name().into()) {
                trace!("dropping duplicate name {:?}", record.name());
                index.duplicates += 1;
                continue;
            }
            index.push(record);
        }

        debug!(
            "index built: {} glyphs, {} duplicates dropped, {} categories, {} trie nodes",
            index.records.len(),
            index.duplicates,
            index.categories.len(),
            index.trie.node_count()
        );
        index
    }

    fn push(&mut self, record: GlyphRecord) {
        let id = record.id();
        let key = self.key_of(record.name());

        // the whole key, then the tail starting at each later word
        self.trie.insert(&key, id);
        for (start, _) in key.match_indices(' ') {
            self.trie.insert(&key[start + 1..], id);
        }

        self.by_key.entry(key.clone()).or_default().push(id);
        if let Some(category) = record.category() {
            self.categories.entry(category.to_string()).or_default().push(id);
        }

        self.positions.insert(id, self.records.len());
        self.keys.push(key);
        self.records.push(Arc::new(record));
    }

    fn key_of(&self, text: &str) -> String {
        if self.options.strip_diacritics {
            normalize_key(&strip_diacritics(text))
        } else {
            normalize_key(text)
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in natural order
    pub fn records(&self) -> &[Arc<GlyphRecord>] {
        &self.records
    }

    pub fn get(&self, id: GlyphId) -> Option<&Arc<GlyphRecord>> {
        self.positions.get(&id).map(|&pos| &self.records[pos])
    }

    /// Number of records dropped as duplicates while building
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Category name to member ids, categories in first-seen order
    pub fn categories(&self) -> &IndexMap<String, Vec<GlyphId>> {
        &self.categories
    }

    /// Records of `category` in natural order; empty for an unknown category
    pub fn in_category(&self, category: &str) -> Vec<Arc<GlyphRecord>> {
        self.categories
            .get(category)
            .map(|ids| ids.iter().filter_map(|id| self.get(*id).cloned()).collect())
            .unwrap_or_default()
    }

    /// Ids whose normalized key equals the normalized `name`
    pub fn lookup(&self, name: &str) -> &[GlyphId] {
        self.by_key.get(&self.key_of(name)).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn trie(&self) -> &PrefixTrie {
        &self.trie
    }

    /// Search through the lookup table and the trie, scanning for substrings
    /// only when those found fewer than [`SCAN_FALLBACK_THRESHOLD`] hits.
    ///
    /// Results are sorted by relevance, ties in natural order. An empty query
    /// returns every record with relevance 0.
    pub fn search_indexed(&self, query: &str) -> Vec<(Arc<GlyphRecord>, ScoreType)> {
        self.search_indexed_in(query, None)
    }

    /// [`GlyphIndex::search_indexed`] restricted to one category.
    ///
    /// Hits outside the category are dropped before the fallback threshold is
    /// checked.
    pub fn search_indexed_in(&self, query: &str, category: Option<&str>) -> Vec<(Arc<GlyphRecord>, ScoreType)> {
        let in_category = |pos: usize| category.is_none() || self.records[pos].category() == category;

        let query_key = self.key_of(query);
        if query_key.is_empty() {
            return (0..self.records.len())
                .filter(|&pos| in_category(pos))
                .map(|pos| (self.records[pos].clone(), 0))
                .collect();
        }

        let mut hits: IndexSet<usize> = IndexSet::new();
        let indexed = self
            .by_key
            .get(&query_key)
            .into_iter()
            .flatten()
            .chain(self.trie.find_prefix(&query_key).into_iter().flatten());
        for id in indexed {
            if let Some(&pos) = self.positions.get(id)
                && in_category(pos)
            {
                hits.insert(pos);
            }
        }
        if hits.len() < SCAN_FALLBACK_THRESHOLD {
            trace!("{} indexed hits for {query_key:?} in {category:?}, scanning", hits.len());
            let finder = memmem::Finder::new(query_key.as_bytes());
            for (pos, key) in self.keys.iter().enumerate() {
                if in_category(pos) && finder.find(key.as_bytes()).is_some() {
                    hits.insert(pos);
                }
            }
        }

        let mut scored: Vec<(usize, ScoreType)> = hits
            .into_iter()
            .map(|pos| (pos, relevance(&query_key, &self.keys[pos])))
            .collect();
        scored.sort_by(|(pos_a, score_a), (pos_b, score_b)| score_b.cmp(score_a).then(pos_a.cmp(pos_b)));

        scored
            .into_iter()
            .map(|(pos, score)| (self.records[pos].clone(), score))
            .collect()
    }
}

/// Relevance of `key` for `query`, both normalized:
/// exact > prefix > word prefix > substring > anything else, plus a small
/// bonus for short names.
pub fn relevance(query: &str, key: &str) -> ScoreType {
    let tier = if key == query {
        EXACT_RELEVANCE
    } else if key.starts_with(query) {
        PREFIX_RELEVANCE
    } else if key_words(key).any(|word| word.starts_with(query))
        || key.match_indices(query).any(|(start, _)| key[..start].ends_with(' '))
    {
        WORD_PREFIX_RELEVANCE
    } else if key.contains(query) {
        SUBSTRING_RELEVANCE
    } else {
        DEFAULT_RELEVANCE
    };
    let length = key.chars().count() as ScoreType;
    tier + (SHORT_NAME_LENGTH - length).max(0)
}
