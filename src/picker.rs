//! The picker: one object tying the index, favorites, history and clipboard
//! together behind the operations a front end needs.
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use indexmap::IndexMap;

use crate::clipboard::{ClipboardSink, LazyClipboard};
use crate::error::{GylteError, Result};
use crate::favorites::Favorites;
use crate::glyph::{GlyphId, GlyphRecord};
use crate::history::SearchHistory;
use crate::index::{GlyphIndex, IndexOptions, Readiness, SearchIndex};
use crate::matcher::Matcher;
use crate::options::GylteOptions;
use crate::store::{JsonStore, NameStore};
use crate::{MatchedGlyph, SearchPage, Stats};

/// How long [`Picker::wait_ready`] waits by default: 50 polls of 10ms
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_millis(500);

/// Backend of a glyph picker.
///
/// Searching is lock free with respect to loading: a search works on the index
/// that was current when it started, and a reload never disturbs it.
pub struct Picker {
    options: GylteOptions,
    store: Box<dyn NameStore>,
    clipboard: Box<dyn ClipboardSink>,
    index: SearchIndex,
    matcher: Matcher,
    favorites: Favorites,
    history: SearchHistory,
}

impl Picker {
    /// A picker over `store` with in-memory favorites and history
    pub fn new(options: GylteOptions, store: Box<dyn NameStore>, clipboard: Box<dyn ClipboardSink>) -> Self {
        let history = SearchHistory::new(options.history_size);
        Self::with_state(options, store, clipboard, Favorites::in_memory(), history)
    }

    pub fn with_state(
        options: GylteOptions,
        store: Box<dyn NameStore>,
        clipboard: Box<dyn ClipboardSink>,
        favorites: Favorites,
        history: SearchHistory,
    ) -> Self {
        let matcher = Matcher::from_options(&options);
        Self {
            options,
            store,
            clipboard,
            index: SearchIndex::new(),
            matcher,
            favorites,
            history,
        }
    }

    /// A picker as configured by `options`: the JSON store, the favorites and
    /// history files when given, the system clipboard.
    ///
    /// Nothing is loaded yet.
    pub fn from_options(options: GylteOptions) -> Result<Self> {
        let favorites = match &options.favorites {
            Some(path) => Favorites::open(path)?,
            None => Favorites::in_memory(),
        };
        let history = match &options.history {
            Some(path) => SearchHistory::open(path, options.history_size)?,
            None => SearchHistory::new(options.history_size),
        };
        let store = Box::new(JsonStore::open(&options.store));
        let clipboard = Box::new(LazyClipboard::new(options.clipboard_cmd.clone()));
        Ok(Self::with_state(options, store, clipboard, favorites, history))
    }

    pub fn options(&self) -> &GylteOptions {
        &self.options
    }

    //--------------------------------------------------------------------------
    // loading

    /// Read the store and make the result the current index.
    ///
    /// Returns the new generation. On failure the previous index stays current.
    pub fn load(&self) -> Result<u64> {
        let start = Instant::now();
        let index_options = IndexOptions {
            strip_diacritics: self.options.normalize,
        };
        let generation = self.index.load_with(|| {
            let records = self.store.list_all()?;
            Ok(GlyphIndex::build_with(records, index_options))
        })?;
        info!("generation {generation} loaded in {:?}", start.elapsed());
        Ok(generation)
    }

    /// Same as [`Picker::load`], for an index that is already loaded
    pub fn reload(&self) -> Result<u64> {
        debug!("reloading from generation {}", self.index.generation());
        self.load()
    }

    /// Load on a background thread
    pub fn spawn_load(self: &Arc<Self>) -> JoinHandle<Result<u64>> {
        let picker = Arc::clone(self);
        thread::spawn(move || picker.load())
    }

    pub fn is_ready(&self) -> bool {
        self.index.is_ready()
    }

    pub fn readiness(&self) -> Readiness {
        self.index.readiness()
    }

    /// Wait up to `timeout` for a load to complete
    pub fn wait_ready(&self, timeout: Duration) -> bool {
        self.index.wait_ready(timeout)
    }

    /// The current index, if one is loaded
    pub fn index(&self) -> Option<Arc<GlyphIndex>> {
        self.index.snapshot()
    }

    //--------------------------------------------------------------------------
    // searching

    /// Search for `query`, optionally within one category, and return one page.
    ///
    /// `limit` 0 means the configured page size; a configured size of 0 means
    /// no limit. An offset past the end gives an empty page that still reports
    /// the total. Without a loaded index the page is empty.
    pub fn get_glyphs(&self, query: &str, category: Option<&str>, limit: usize, offset: usize) -> SearchPage {
        let start = Instant::now();
        let Some(index) = self.index.snapshot() else {
            debug!("search for {query:?} before the index is loaded");
            return SearchPage {
                search_time: start.elapsed(),
                ..SearchPage::empty()
            };
        };

        let favorites = self.favorites.snapshot();
        let matches = self
            .matcher
            .rank_index(query, &index, category, |glyph| favorites.contains(glyph.name()));
        self.history.add(query);

        let limit = match (limit, self.options.limit) {
            (0, 0) => usize::MAX,
            (0, default) => default,
            (limit, _) => limit,
        };
        let total = matches.len();
        let glyphs: Vec<MatchedGlyph> = matches.into_iter().skip(offset).take(limit).collect();
        let has_more = offset.saturating_add(glyphs.len()) < total;
        let search_time = start.elapsed();
        debug!("{query:?} in {category:?}: {total} matches in {search_time:?}");

        SearchPage {
            glyphs,
            total,
            search_time,
            has_more,
        }
    }

    /// Category names with their sizes, in first-seen order
    pub fn categories(&self) -> IndexMap<String, usize> {
        self.index
            .snapshot()
            .map(|index| {
                index
                    .categories()
                    .iter()
                    .map(|(category, ids)| (category.clone(), ids.len()))
                    .collect()
            })
            .unwrap_or_default()
    }

    //--------------------------------------------------------------------------
    // favorites

    fn lookup(&self, id: GlyphId) -> Result<Arc<GlyphRecord>> {
        let index = self.index.snapshot().ok_or(GylteError::NotReady)?;
        index.get(id).cloned().ok_or(GylteError::UnknownGlyph(id))
    }

    /// Flip the favorite state of glyph `id`, returning the new state
    pub fn toggle_favorite(&self, id: GlyphId) -> Result<bool> {
        let glyph = self.lookup(id)?;
        self.favorites.toggle(glyph.name())
    }

    /// Flip the favorite state of the glyph called `name`
    pub fn toggle_favorite_by_name(&self, name: &str) -> Result<bool> {
        let index = self.index.snapshot().ok_or(GylteError::NotReady)?;
        match index.records().iter().find(|glyph| glyph.name() == name) {
            Some(glyph) => self.favorites.toggle(glyph.name()),
            None => Err(GylteError::UnknownName(name.to_string())),
        }
    }

    /// Favorite glyphs present in the current index, in index order
    pub fn favorites(&self) -> Vec<MatchedGlyph> {
        let Some(index) = self.index.snapshot() else {
            return Vec::new();
        };
        let favorites = self.favorites.snapshot();
        index
            .records()
            .iter()
            .filter(|glyph| favorites.contains(glyph.name()))
            .map(|glyph| MatchedGlyph {
                is_favorite: true,
                ..MatchedGlyph::new(glyph.clone(), 0)
            })
            .collect()
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.favorites.contains(name)
    }

    //--------------------------------------------------------------------------
    // history

    /// Past queries, most recent first
    pub fn history(&self) -> Vec<String> {
        self.history.entries()
    }

    pub fn clear_history(&self) {
        self.history.clear();
    }

    /// Write the history to its file, if one is configured
    pub fn save_history(&self) -> Result<()> {
        self.history.save()
    }

    //--------------------------------------------------------------------------
    // clipboard

    pub fn copy(&self, text: &str) -> Result<()> {
        self.clipboard.set_text(text)
    }

    /// Copy the symbol of glyph `id` and return the record
    pub fn copy_glyph(&self, id: GlyphId) -> Result<Arc<GlyphRecord>> {
        let glyph = self.lookup(id)?;
        self.copy(glyph.symbol())?;
        debug!("copied {}", glyph.name());
        Ok(glyph)
    }

    //--------------------------------------------------------------------------
    pub fn stats(&self) -> Stats {
        let index = self.index.snapshot();
        Stats {
            total_glyphs: index.as_ref().map_or(0, |index| index.len()),
            total_favorites: self.favorites.len(),
            total_categories: index.as_ref().map_or(0, |index| index.categories().len()),
            loaded: self.index.is_ready(),
            generation: self.index.generation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::store::MemoryStore;

    fn picker(names: &[&str]) -> Picker {
        let store = MemoryStore::from_pairs(names.iter().map(|name| (*name, name.to_uppercase())));
        Picker::new(GylteOptions::default(), Box::new(store), Box::new(MemoryClipboard::default()))
    }

    fn names(page: &SearchPage) -> Vec<&str> {
        page.glyphs.iter().map(|m| m.glyph.name()).collect()
    }

    #[test]
    fn empty_page_until_loaded() {
        let picker = picker(&["nf-fa-car"]);
        let page = picker.get_glyphs("car", None, 0, 0);
        assert_eq!(page.total, 0);
        assert!(page.glyphs.is_empty());
        assert!(!picker.stats().loaded);
        assert!(matches!(picker.toggle_favorite(GlyphId(1)), Err(GylteError::NotReady)));
    }

    #[test]
    fn searches_during_first_load_see_nothing() {
        let picker = picker(&["nf-fa-car"]);
        picker
            .index
            .load_with(|| {
                assert_eq!(picker.readiness(), Readiness::Loading);
                assert!(picker.index().is_none());
                let page = picker.get_glyphs("car", None, 0, 0);
                assert!(page.glyphs.is_empty());
                assert_eq!((page.total, page.has_more), (0, false));
                assert!(!picker.stats().loaded);
                Ok(GlyphIndex::build(picker.store.list_all()?))
            })
            .unwrap();
        assert_eq!(picker.get_glyphs("car", None, 0, 0).total, 1);
    }

    #[test]
    fn reload_keeps_serving_and_reports_loaded() {
        let picker = picker(&["nf-fa-car"]);
        picker.load().unwrap();
        picker
            .index
            .load_with(|| {
                assert_eq!(picker.readiness(), Readiness::Reloading);
                assert!(picker.stats().loaded);
                assert!(picker.wait_ready(Duration::ZERO));
                assert_eq!(picker.get_glyphs("car", None, 0, 0).total, 1);
                Ok(GlyphIndex::build(picker.store.list_all()?))
            })
            .unwrap();
        assert_eq!(picker.readiness(), Readiness::Ready { generation: 2 });
    }

    #[test]
    fn pagination() {
        let picker = picker(&["a-x-1", "a-x-2", "a-x-3", "a-x-4", "a-x-5"]);
        picker.load().unwrap();

        let page = picker.get_glyphs("", None, 2, 0);
        assert_eq!((page.total, page.glyphs.len(), page.has_more), (5, 2, true));
        let page = picker.get_glyphs("", None, 2, 4);
        assert_eq!(names(&page), ["a-x-5"]);
        assert!(!page.has_more);
        let page = picker.get_glyphs("", None, 2, 10);
        assert!(page.glyphs.is_empty());
        assert_eq!(page.total, 5);
    }

    #[test]
    fn zero_limit_uses_configured_page_size() {
        let names: Vec<String> = (0..60).map(|i| format!("nf-md-icon{i:02}")).collect();
        let store = MemoryStore::from_pairs(names.iter().map(|n| (n.as_str(), "x")));
        let picker = Picker::new(GylteOptions::default(), Box::new(store), Box::new(MemoryClipboard::default()));
        picker.load().unwrap();
        let page = picker.get_glyphs("icon", None, 0, 0);
        assert_eq!(page.glyphs.len(), 50);
        assert_eq!(page.total, 60);
        assert!(page.has_more);
    }

    #[test]
    fn category_filter_and_counts() {
        let picker = picker(&["nf-md-car", "nf-fa-car", "nf-md-cart", "plain"]);
        picker.load().unwrap();
        let page = picker.get_glyphs("car", Some("md"), 0, 0);
        assert_eq!(names(&page), ["nf-md-car", "nf-md-cart"]);
        let categories: Vec<_> = picker.categories().into_iter().collect();
        assert_eq!(categories, [("md".to_string(), 2), ("fa".to_string(), 1)]);
    }

    #[test]
    fn favorites_rank_first_and_are_listed() {
        let picker = picker(&["nf-fa-car", "nf-md-car_side", "nf-md-scar"]);
        picker.load().unwrap();
        assert!(picker.toggle_favorite(GlyphId(3)).unwrap());

        let page = picker.get_glyphs("car", None, 0, 0);
        assert_eq!(names(&page), ["nf-md-scar", "nf-fa-car", "nf-md-car_side"]);
        assert!(page.glyphs[0].is_favorite);
        assert!(!page.glyphs[1].is_favorite);

        let favorites = picker.favorites();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].glyph.name(), "nf-md-scar");
        assert!(matches!(picker.toggle_favorite(GlyphId(99)), Err(GylteError::UnknownGlyph(_))));
        assert!(!picker.toggle_favorite_by_name("nf-md-scar").unwrap());
        assert!(picker.favorites().is_empty());
    }

    #[test]
    fn searches_are_recorded_in_history() {
        let picker = picker(&["nf-fa-car"]);
        picker.load().unwrap();
        picker.get_glyphs(" car ", None, 0, 0);
        picker.get_glyphs("", None, 0, 0);
        picker.get_glyphs("zzz", None, 0, 0);
        assert_eq!(picker.history(), ["zzz", "car"]);
        picker.clear_history();
        assert!(picker.history().is_empty());
    }

    #[test]
    fn copy_glyph_copies_symbol() {
        let clipboard = Arc::new(MemoryClipboard::default());
        let store = MemoryStore::from_pairs([("nf-cod-account", "\u{eb99}")]);
        let picker = Picker::new(GylteOptions::default(), Box::new(store), Box::new(clipboard.clone()));
        picker.load().unwrap();
        let glyph = picker.copy_glyph(GlyphId(1)).unwrap();
        assert_eq!(glyph.name(), "nf-cod-account");
        assert_eq!(clipboard.contents().as_deref(), Some("\u{eb99}"));
    }

    #[test]
    fn spawn_load_then_wait() {
        let picker = Arc::new(picker(&["nf-fa-car", "nf-fa-cat"]));
        let handle = picker.spawn_load();
        assert!(picker.wait_ready(Duration::from_secs(5)));
        assert_eq!(handle.join().unwrap().unwrap(), 1);
        let stats = picker.stats();
        assert_eq!((stats.total_glyphs, stats.total_categories, stats.generation), (2, 1, 1));
    }
}
