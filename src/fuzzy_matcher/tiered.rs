//! Tiered fuzzy matching for glyph names.
//!
//! A query is tried against a name with three rules, in order; the first rule
//! that applies decides both the match and the score:
//!
//! 1. exact: the folded query equals the folded name
//! 2. substring: the name contains the query
//! 3. ordered subsequence: every query character appears in the name, in order
//!
//! Scores of the three tiers never overlap: any exact match outranks any
//! substring match, which outranks any subsequence match. Within a tier, prefix
//! and word-start hits and contiguous runs score higher, longer names lower.
//!
//! # Example:
//! ```
//! use gylte::fuzzy_matcher::FuzzyMatcher;
//! use gylte::fuzzy_matcher::tiered::TieredMatcher;
//!
//! let matcher = TieredMatcher::default();
//!
//! assert_eq!(None, matcher.fuzzy_match("abc", "ca"));
//! assert!(matcher.fuzzy_match("abc", "ac").is_some());
//! assert!(matcher.fuzzy_match("nf-cod-account", "cod") > matcher.fuzzy_match("nfxcodxaccount", "cod"));
//! ```

use std::cell::RefCell;
use std::iter::once;

use thread_local::ThreadLocal;

use crate::fuzzy_matcher::{FuzzyMatcher, ScoreType, fold_into, is_separator};

// ---------------------------------------------------------------------------
// Score constants
// ---------------------------------------------------------------------------

/// Names are truncated to this many characters before scoring; a longer query
/// matches nothing.
pub const MAX_LEN: usize = 256;

/// Score of an exact match
pub const EXACT_SCORE: ScoreType = 3_000_000;

/// Base score of a substring match, above any subsequence score at `MAX_LEN`
pub const SUBSTRING_BASE: ScoreType = 2_000_000;
/// Added when the substring starts the name
pub const PREFIX_BONUS: ScoreType = 2_000;
/// Added when the substring starts right after a separator
pub const BOUNDARY_BONUS: ScoreType = 1_000;
/// Per extra character of the name
pub const SUBSTRING_LENGTH_PENALTY: ScoreType = 2;

/// Per matched query character
pub const MATCH_SCORE: ScoreType = 100;
/// Multiplied by the length of the current contiguous run at each step
pub const CONSECUTIVE_BONUS: ScoreType = 50;
/// A matched character at position 0 or right after a separator
pub const WORD_BOUNDARY_BONUS: ScoreType = 200;
/// Per extra character of the name
pub const FUZZY_LENGTH_PENALTY: ScoreType = 3;

// ---------------------------------------------------------------------------
// Scoring over folded characters
// ---------------------------------------------------------------------------

/// Score `pattern` against `choice`, both already folded.
///
/// An empty pattern matches everything with score 0; a non-empty pattern never
/// matches an empty choice. A choice cut at [`MAX_LEN`] is never an exact match.
pub(crate) fn score_folded(choice: &[char], choice_complete: bool, pattern: &[char]) -> Option<ScoreType> {
    if pattern.is_empty() {
        return Some(0);
    }
    if choice.is_empty() || pattern.len() > choice.len() {
        return None;
    }
    if choice_complete && choice == pattern {
        return Some(EXACT_SCORE);
    }

    let len_diff = (choice.len() - pattern.len()) as ScoreType;
    if let Some(bonus) = substring_bonus(choice, pattern) {
        return Some(SUBSTRING_BASE + bonus - SUBSTRING_LENGTH_PENALTY * len_diff);
    }

    subsequence_score(choice, pattern).map(|score| score - FUZZY_LENGTH_PENALTY * len_diff)
}

/// Bonus of the best occurrence of `pattern` in `choice`, `None` if it does not occur.
fn substring_bonus(choice: &[char], pattern: &[char]) -> Option<ScoreType> {
    let mut occurrences = choice
        .windows(pattern.len())
        .enumerate()
        .filter(|(_, window)| *window == pattern)
        .map(|(start, _)| start);

    let first = occurrences.next()?;
    if first == 0 {
        return Some(PREFIX_BONUS);
    }

    let at_boundary = once(first)
        .chain(occurrences)
        .any(|start| is_separator(choice[start - 1]));
    Some(if at_boundary { BOUNDARY_BONUS } else { 0 })
}

/// Greedy leftmost subsequence match, without the length penalty
fn subsequence_score(choice: &[char], pattern: &[char]) -> Option<ScoreType> {
    let mut score = 0;
    let mut run: ScoreType = 0;
    let mut last_match: Option<usize> = None;
    let mut from = 0;

    for &ch in pattern {
        let pos = from + choice[from..].iter().position(|&c| c == ch)?;

        run = match last_match {
            Some(last) if last + 1 == pos => run + 1,
            _ => 1,
        };
        score += MATCH_SCORE + CONSECUTIVE_BONUS * run;

        if pos == 0 || is_separator(choice[pos - 1]) {
            score += WORD_BOUNDARY_BONUS;
        }

        last_match = Some(pos);
        from = pos + 1;
    }

    Some(score)
}

// ---------------------------------------------------------------------------
// Public matcher struct
// ---------------------------------------------------------------------------

/// Case insensitive tiered matcher.
///
/// Keeps per-thread buffers for the folded characters so that ranking a large
/// candidate set does not allocate per candidate.
#[derive(Debug, Default)]
pub struct TieredMatcher {
    c_cache: ThreadLocal<RefCell<Vec<char>>>,
    p_cache: ThreadLocal<RefCell<Vec<char>>>,
}

impl TieredMatcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FuzzyMatcher for TieredMatcher {
    fn fuzzy_match(&self, choice: &str, pattern: &str) -> Option<ScoreType> {
        if pattern.is_empty() {
            return Some(0);
        }

        let mut choice_chars = self.c_cache.get_or(|| RefCell::new(Vec::new())).borrow_mut();
        let mut pattern_chars = self.p_cache.get_or(|| RefCell::new(Vec::new())).borrow_mut();

        let choice_complete = fold_into(choice, &mut choice_chars);
        if !fold_into(pattern, &mut pattern_chars) {
            trace!("tiered: pattern longer than {MAX_LEN} characters");
            return None;
        }

        let score = score_folded(&choice_chars, choice_complete, &pattern_chars);
        trace!("tiered: {pattern:?} ~ {choice:?} => {score:?}");
        score
    }
}

// ---------------------------------------------------------------------------
// Convenience free functions
// ---------------------------------------------------------------------------

/// Match `choice` against `pattern` without keeping any buffers around
pub fn fuzzy_match(choice: &str, pattern: &str) -> Option<ScoreType> {
    let mut choice_chars = Vec::with_capacity(choice.len());
    let mut pattern_chars = Vec::with_capacity(pattern.len());
    let choice_complete = fold_into(choice, &mut choice_chars);
    if !fold_into(pattern, &mut pattern_chars) {
        return None;
    }
    score_folded(&choice_chars, choice_complete, &pattern_chars)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
