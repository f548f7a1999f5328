use std::fmt::{Display, Error, Formatter};
use std::sync::Arc;

use crate::engine::{EngineFactory, MatchEngine};
use crate::fuzzy_matcher::tiered::TieredMatcher;
use crate::fuzzy_matcher::{FuzzyMatcher, ScoreType};

//------------------------------------------------------------------------------
// Fuzzy engine

/// The fuzzy matching engine
pub struct FuzzyEngine {
    query: String,
    matcher: Arc<dyn FuzzyMatcher>,
}

impl FuzzyEngine {
    pub fn new(query: &str, matcher: Arc<dyn FuzzyMatcher>) -> Self {
        Self {
            query: query.to_string(),
            matcher,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl MatchEngine for FuzzyEngine {
    fn match_name(&self, name: &str) -> Option<ScoreType> {
        self.matcher.fuzzy_match(name, &self.query)
    }
}

impl Display for FuzzyEngine {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "(Fuzzy: {})", self.query)
    }
}

//------------------------------------------------------------------------------
/// Creates [`FuzzyEngine`]s sharing one matcher, and so its per-thread buffers
pub struct FuzzyEngineFactory {
    matcher: Arc<dyn FuzzyMatcher>,
}

impl Default for FuzzyEngineFactory {
    fn default() -> Self {
        Self {
            matcher: Arc::new(TieredMatcher::default()),
        }
    }
}

impl FuzzyEngineFactory {
    pub fn new(matcher: Arc<dyn FuzzyMatcher>) -> Self {
        Self { matcher }
    }
}

impl EngineFactory for FuzzyEngineFactory {
    fn create_engine(&self, query: &str) -> Box<dyn MatchEngine> {
        Box::new(FuzzyEngine::new(query, self.matcher.clone()))
    }
}
