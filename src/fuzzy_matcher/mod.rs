//! Fuzzy matching of a query against a single glyph name.
//!
//! The matcher is a pure function of `(choice, pattern)`: it decides whether the
//! name matches and, when it does, how relevant it is. Ranking a whole candidate
//! set is the job of [`crate::matcher::Matcher`].

/// Exact > substring > ordered-subsequence matcher
pub mod tiered;
mod util;

pub(crate) use util::fold_into;

/// Relevance of a match. Only comparable between results of the same query.
pub type ScoreType = i64;

/// Trait for fuzzy matching text patterns against choices
pub trait FuzzyMatcher: Send + Sync {
    /// Match `choice` against `pattern`, returning the score or `None` when it does not match
    fn fuzzy_match(&self, choice: &str, pattern: &str) -> Option<ScoreType>;

    /// Whether `choice` matches `pattern` at all
    fn is_match(&self, choice: &str, pattern: &str) -> bool {
        self.fuzzy_match(choice, pattern).is_some()
    }
}

/// Characters after which a matched character counts as a word start.
///
/// Position 0 of a name is always a word start. Only these ASCII characters
/// open a word; non-ASCII punctuation never does.
pub const SEPARATORS: [char; 5] = ['-', '_', ' ', '.', '/'];

/// Returns true if `ch` is one of [`SEPARATORS`]
#[inline]
pub fn is_separator(ch: char) -> bool {
    SEPARATORS.contains(&ch)
}
