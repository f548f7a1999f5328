//! Match engines: a query prepared once, applied to many names.
//!
//! An [`EngineFactory`] turns a query into a [`MatchEngine`]; the ranking code
//! only ever talks to the engine. Factories compose, e.g. the
//! [`normalized::NormalizedEngineFactory`] strips diacritics from both sides
//! before handing over to the fuzzy engine.
use std::fmt::Display;

use crate::fuzzy_matcher::ScoreType;

pub mod fuzzy;
pub mod normalized;
pub mod util;

/// A matching engine that can match a prepared query against names
pub trait MatchEngine: Sync + Send + Display {
    /// Matches a name against the query, returning its score if matched
    fn match_name(&self, name: &str) -> Option<ScoreType>;
}

/// Factory for creating match engines
pub trait EngineFactory: Sync + Send {
    /// Creates a match engine for `query`
    fn create_engine(&self, query: &str) -> Box<dyn MatchEngine>;
}
