//! Normalized match engine for matching with Unicode normalization (removing diacritics).
//!
//! This engine wraps another engine and strips diacritics from both the query
//! and the name before matching, so `cafe` finds `café` and the other way round.

use std::fmt::{Display, Error, Formatter};

use crate::engine::util::strip_diacritics;
use crate::engine::{EngineFactory, MatchEngine};
use crate::fuzzy_matcher::ScoreType;

/// Engine that normalizes names before matching
pub struct NormalizedEngine {
    /// The underlying engine, created from the normalized query
    inner: Box<dyn MatchEngine>,
}

impl NormalizedEngine {
    /// Creates a new normalized match engine
    pub fn new(inner: Box<dyn MatchEngine>) -> Self {
        Self { inner }
    }
}

impl MatchEngine for NormalizedEngine {
    fn match_name(&self, name: &str) -> Option<ScoreType> {
        if name.is_ascii() {
            return self.inner.match_name(name);
        }
        self.inner.match_name(&strip_diacritics(name))
    }
}

impl Display for NormalizedEngine {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "(Normalized: {})", self.inner)
    }
}

//------------------------------------------------------------------------------
/// Factory that handles normalization by wrapping another engine factory
pub struct NormalizedEngineFactory {
    inner: Box<dyn EngineFactory>,
}

impl NormalizedEngineFactory {
    /// Creates a new normalized engine factory
    pub fn new(inner: impl EngineFactory + 'static) -> Self {
        Self { inner: Box::new(inner) }
    }
}

impl EngineFactory for NormalizedEngineFactory {
    fn create_engine(&self, query: &str) -> Box<dyn MatchEngine> {
        let inner_engine = self.inner.create_engine(&strip_diacritics(query));
        Box::new(NormalizedEngine::new(inner_engine))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fuzzy::FuzzyEngineFactory;
    use crate::fuzzy_matcher::tiered::EXACT_SCORE;

    #[test]
    fn accented_name_matches_plain_query() {
        let factory = NormalizedEngineFactory::new(FuzzyEngineFactory::default());
        let engine = factory.create_engine("cafe");
        assert_eq!(engine.match_name("café"), Some(EXACT_SCORE));
    }

    #[test]
    fn plain_name_matches_accented_query() {
        let factory = NormalizedEngineFactory::new(FuzzyEngineFactory::default());
        let engine = factory.create_engine("résumé");
        assert_eq!(engine.match_name("resume"), Some(EXACT_SCORE));
        assert_eq!(engine.to_string(), "(Normalized: (Fuzzy: resume))");
    }

    #[test]
    fn without_normalization_accents_differ() {
        let engine = FuzzyEngineFactory::default().create_engine("cafe");
        assert_eq!(engine.match_name("café"), None);
    }
}
