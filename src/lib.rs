//! gylte is a fuzzy picker for named text glyphs.
//!
//! It loads glyph records (`nf-cod-account` → ``) from a store, keeps them in
//! an in-memory index and ranks them against a typed query. It can be used as
//! a library or through the `gylte` command line tool.
//!
//! # Examples
//!
//! ```
//! use gylte::prelude::*;
//!
//! let store = MemoryStore::from_pairs([
//!     ("nf-cod-account", "\u{eb99}"),
//!     ("nf-md-account_box", "\u{f0006}"),
//!     ("nf-fa-car", "\u{f1b9}"),
//! ]);
//! let picker = Picker::new(GylteOptions::default(), Box::new(store), Box::new(MemoryClipboard::default()));
//! picker.load().unwrap();
//!
//! let page = picker.get_glyphs("acc", None, 0, 0);
//! assert_eq!(page.total, 2);
//! assert_eq!(page.glyphs[0].glyph.name(), "nf-cod-account");
//! ```

#[macro_use]
extern crate log;

use std::sync::Arc;
use std::time::Duration;

pub mod clipboard;
pub mod engine;
pub mod error;
pub mod favorites;
pub mod fuzzy_matcher;
pub mod glyph;
pub mod history;
pub mod index;
pub mod matcher;
pub mod options;
pub mod picker;
pub mod prelude;
pub mod session;
pub mod store;
pub mod util;

#[cfg(feature = "cli")]
pub mod completions;

pub use crate::error::{GylteError, Result};
pub use crate::fuzzy_matcher::ScoreType;
pub use crate::glyph::{GlyphId, GlyphRecord};
pub use crate::options::{GylteOptions, SearchStrategy};
pub use crate::picker::Picker;

/// A glyph that matched a query, with its score for that query.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedGlyph {
    /// The matched record, shared with the index
    pub glyph: Arc<GlyphRecord>,
    /// Relevance for the query that produced this result
    pub score: ScoreType,
    /// Whether the glyph was a favorite when the query ran
    pub is_favorite: bool,
}

impl MatchedGlyph {
    pub fn new(glyph: Arc<GlyphRecord>, score: ScoreType) -> Self {
        Self {
            glyph,
            score,
            is_favorite: false,
        }
    }
}

/// One page of ranked results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub glyphs: Vec<MatchedGlyph>,
    /// Number of matches before pagination
    pub total: usize,
    pub search_time: Duration,
    /// Whether matches exist past this page
    pub has_more: bool,
}

impl SearchPage {
    /// An empty page, as returned while no index is ready
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Counters over the current state of a [`Picker`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct Stats {
    pub total_glyphs: usize,
    pub total_favorites: usize,
    pub total_categories: usize,
    pub loaded: bool,
    pub generation: u64,
}
