//! Ranking of candidate glyphs against a query
use std::sync::Arc;

use crate::engine::EngineFactory;
use crate::engine::fuzzy::FuzzyEngineFactory;
use crate::engine::normalized::NormalizedEngineFactory;
use crate::glyph::GlyphRecord;
use crate::index::GlyphIndex;
use crate::options::{GylteOptions, SearchStrategy};
use crate::{MatchedGlyph, ScoreType};

//==============================================================================
/// Ranks candidates against a query.
///
/// Matching never fails: a query either matches a name with a score or it does
/// not. Results are sorted favorites first, then by score, keeping the
/// candidate order among equals.
pub struct Matcher {
    engine_factory: Arc<dyn EngineFactory>,
    strategy: SearchStrategy,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::builder(Arc::new(FuzzyEngineFactory::default())).build()
    }
}

impl Matcher {
    /// Creates a new Matcher builder with the given engine factory.
    pub fn builder(engine_factory: Arc<dyn EngineFactory>) -> Self {
        Self {
            engine_factory,
            strategy: SearchStrategy::default(),
        }
    }

    /// Sets how [`Matcher::rank_index`] finds matches.
    pub fn strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Finalizes the builder and returns the configured Matcher.
    pub fn build(self) -> Self {
        self
    }

    /// Creates the engine factory the options ask for.
    pub fn create_engine_factory(options: &GylteOptions) -> Arc<dyn EngineFactory> {
        let fuzzy_engine_factory = FuzzyEngineFactory::default();
        if options.normalize {
            Arc::new(NormalizedEngineFactory::new(fuzzy_engine_factory))
        } else {
            Arc::new(fuzzy_engine_factory)
        }
    }

    /// Creates a Matcher configured from the given options.
    pub fn from_options(options: &GylteOptions) -> Self {
        Matcher::builder(Self::create_engine_factory(options))
            .strategy(options.strategy)
            .build()
    }

    pub fn search_strategy(&self) -> SearchStrategy {
        self.strategy
    }

    pub fn engine_factory(&self) -> &Arc<dyn EngineFactory> {
        &self.engine_factory
    }

    /// Rank `candidates` against `query`.
    ///
    /// The query is trimmed. An empty query keeps every candidate, in order,
    /// with score 0. Otherwise non-matching candidates are dropped and the rest
    /// is sorted favorites first, then by descending score; candidates that
    /// compare equal keep their relative order.
    pub fn rank<'a, I, F>(&self, query: &str, candidates: I, is_favorite: F) -> Vec<MatchedGlyph>
    where
        I: IntoIterator<Item = &'a Arc<GlyphRecord>>,
        F: Fn(&GlyphRecord) -> bool,
    {
        let query = query.trim();
        if query.is_empty() {
            return candidates
                .into_iter()
                .map(|glyph| MatchedGlyph {
                    is_favorite: is_favorite(glyph.as_ref()),
                    ..MatchedGlyph::new(glyph.clone(), 0)
                })
                .collect();
        }

        let engine = self.engine_factory.create_engine(query);
        debug!("engine: {engine}");
        let mut matches: Vec<MatchedGlyph> = candidates
            .into_iter()
            .filter_map(|glyph| {
                engine.match_name(glyph.name()).map(|score| MatchedGlyph {
                    is_favorite: is_favorite(glyph.as_ref()),
                    ..MatchedGlyph::new(glyph.clone(), score)
                })
            })
            .collect();
        sort_ranked(&mut matches);
        trace!("{} matches for {query:?}", matches.len());
        matches
    }

    /// Rank `candidates` against `query` and return the matching records.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use gylte::glyph::{GlyphId, GlyphRecord};
    /// use gylte::matcher::Matcher;
    ///
    /// let candidates: Vec<_> = ["nf-fa-car", "nf-cod-account", "nf-md-account_box"]
    ///     .iter()
    ///     .enumerate()
    ///     .map(|(i, name)| Arc::new(GlyphRecord::new(GlyphId(i as u32), name, "?")))
    ///     .collect();
    ///
    /// let found = Matcher::default().search("acc", &candidates);
    /// let names: Vec<_> = found.iter().map(|g| g.name()).collect();
    /// assert_eq!(names, ["nf-cod-account", "nf-md-account_box"]);
    /// ```
    pub fn search(&self, query: &str, candidates: &[Arc<GlyphRecord>]) -> Vec<Arc<GlyphRecord>> {
        self.rank(query, candidates, |_| false)
            .into_iter()
            .map(|matched| matched.glyph)
            .collect()
    }

    /// Rank the records of `index`, optionally restricted to one category,
    /// with the configured [`SearchStrategy`].
    pub fn rank_index<F>(&self, query: &str, index: &GlyphIndex, category: Option<&str>, is_favorite: F) -> Vec<MatchedGlyph>
    where
        F: Fn(&GlyphRecord) -> bool,
    {
        let category = category.filter(|c| !c.is_empty());
        match self.strategy {
            SearchStrategy::Scan => match category {
                Some(category) => self.rank(query, &index.in_category(category), is_favorite),
                None => self.rank(query, index.records(), is_favorite),
            },
            SearchStrategy::Indexed => {
                let query = query.trim();
                let mut matches: Vec<MatchedGlyph> = index
                    .search_indexed_in(query, category)
                    .into_iter()
                    .map(|(glyph, score)| MatchedGlyph {
                        is_favorite: is_favorite(glyph.as_ref()),
                        ..MatchedGlyph::new(glyph, score)
                    })
                    .collect();
                if !query.is_empty() {
                    sort_ranked(&mut matches);
                }
                matches
            }
        }
    }
}

/// Stable sort: favorites first, then score descending
fn sort_ranked(matches: &mut [MatchedGlyph]) {
    matches.sort_by(|a, b| {
        b.is_favorite
            .cmp(&a.is_favorite)
            .then_with(|| b.score.cmp(&a.score))
    });
}

/// Best score of `query` against `name` with the default matcher
pub fn score(query: &str, name: &str) -> Option<ScoreType> {
    crate::fuzzy_matcher::tiered::fuzzy_match(name, query.trim())
}
