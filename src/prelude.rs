//! Convenience re-exports of commonly used types.
//!
//! `use gylte::prelude::*;` brings in everything needed to load a store and
//! search it.

pub use crate::clipboard::{ClipboardSink, MemoryClipboard, SystemClipboard};
pub use crate::engine::fuzzy::{FuzzyEngine, FuzzyEngineFactory};
pub use crate::engine::normalized::NormalizedEngineFactory;
pub use crate::engine::{EngineFactory, MatchEngine};
pub use crate::favorites::Favorites;
pub use crate::fuzzy_matcher::FuzzyMatcher;
pub use crate::fuzzy_matcher::tiered::TieredMatcher;
pub use crate::history::SearchHistory;
pub use crate::index::{GlyphIndex, Readiness, SearchIndex};
pub use crate::matcher::Matcher;
pub use crate::options::{GylteOptions, GylteOptionsBuilder, SearchStrategy};
pub use crate::session::{QuerySession, SessionUpdate, SessionUpdates};
pub use crate::store::{JsonStore, MemoryStore, NameStore, StoredGlyph};
pub use crate::*;
pub use std::sync::Arc;
