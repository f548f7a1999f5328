//! Configuration options for gylte.
//!
//! [`GylteOptions`] is the one place every tunable lives: where the store and
//! the state files are, how searches run, how the query session debounces.
//! The command line tool flattens it into its argument parser; library users
//! build it with [`GylteOptionsBuilder`] or start from [`Default`].

use std::path::PathBuf;
use std::time::Duration;

use derive_builder::Builder;

/// How the picker finds matches for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SearchStrategy {
    /// Score every candidate with the fuzzy matcher
    #[default]
    Scan,
    /// Look up the normalized name table and the prefix trie, with a substring
    /// scan when those find little
    Indexed,
}

/// Options of a picker
///
/// ```
/// use gylte::options::{GylteOptionsBuilder, SearchStrategy};
///
/// let options = GylteOptionsBuilder::default()
///     .strategy(SearchStrategy::Indexed)
///     .limit(20usize)
///     .build()
///     .unwrap();
/// assert_eq!(options.history_size, 20);
/// assert_eq!(options.debounce().as_millis(), 150);
/// ```
#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(default, setter(into))]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct GylteOptions {
    //  --- Files ---
    /// Glyph store to load
    ///
    /// A JSON file written by `gylte import`
    #[cfg_attr(
        feature = "cli",
        arg(long, short, default_value = "gylte.json", help_heading = "Files")
    )]
    pub store: PathBuf,

    /// File keeping the favorite glyph names, one per line
    ///
    /// Favorites are kept in memory only when not set
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Files"))]
    pub favorites: Option<PathBuf>,

    /// File keeping the search history, one query per line
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Files"))]
    pub history: Option<PathBuf>,

    /// Maximum number of queries kept in the history
    #[cfg_attr(feature = "cli", arg(long, default_value_t = 20, help_heading = "Files"))]
    pub history_size: usize,

    //  --- Search ---
    /// How matches are found
    #[cfg_attr(
        feature = "cli",
        arg(long, value_enum, default_value_t = SearchStrategy::Scan, help_heading = "Search")
    )]
    pub strategy: SearchStrategy,

    /// Ignore diacritics when matching, so `cafe` finds `café`
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Search"))]
    pub normalize: bool,

    /// Default number of results per page
    #[cfg_attr(feature = "cli", arg(long, default_value_t = 50, help_heading = "Search"))]
    pub limit: usize,

    //  --- Interface ---
    /// Milliseconds to wait for typing to pause before searching
    #[cfg_attr(feature = "cli", arg(long, default_value_t = 150, help_heading = "Interface"))]
    pub debounce_ms: u64,

    /// Command that receives copied text on stdin
    ///
    /// Detected from wl-copy, xclip, xsel, pbcopy and clip.exe when not set
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Interface"))]
    pub clipboard_cmd: Option<String>,
}

impl Default for GylteOptions {
    fn default() -> Self {
        Self {
            store: PathBuf::from("gylte.json"),
            favorites: None,
            history: None,
            history_size: 20,
            strategy: SearchStrategy::default(),
            normalize: false,
            limit: 50,
            debounce_ms: 150,
            clipboard_cmd: None,
        }
    }
}

impl GylteOptions {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
