//! Error type shared by the library.
//!
//! Matching and ranking never fail; everything here comes from the I/O edges
//! (store, favorites and history files, the clipboard provider) or from a caller
//! naming a glyph that is not in the current index.
use std::path::PathBuf;

use thiserror::Error;

use crate::glyph::GlyphId;

/// Errors surfaced by gylte
#[derive(Error, Debug)]
pub enum GylteError {
    /// Reading or writing a file failed
    #[error("{path}: {source}")]
    Io {
        /// The file that could not be accessed
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },
    /// A store or fixture file is not valid JSON for its format
    #[error("{path}: invalid json: {source}")]
    Json {
        /// The offending file
        path: PathBuf,
        /// The underlying error
        #[source]
        source: serde_json::Error,
    },
    /// The store file declares a format version this build does not read
    #[error("{path}: unsupported store version {version}")]
    StoreVersion {
        /// The offending file
        path: PathBuf,
        /// The version found in the file
        version: u32,
    },
    /// No clipboard provider could be found on this system
    #[error("no clipboard provider found (tried {tried})")]
    ClipboardUnavailable {
        /// Comma separated list of the programs looked up
        tried: String,
    },
    /// The clipboard provider ran but failed
    #[error("clipboard command `{command}` failed: {reason}")]
    Clipboard {
        /// The program that was invoked
        command: String,
        /// What went wrong
        reason: String,
    },
    /// The glyph id is not part of the current index
    #[error("unknown glyph id {0}")]
    UnknownGlyph(GlyphId),
    /// No glyph of that name is part of the current index
    #[error("unknown glyph {0:?}")]
    UnknownName(String),
    /// The index has not finished loading
    #[error("glyph index is not loaded yet")]
    NotReady,
}

impl GylteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the library
pub type Result<T, E = GylteError> = std::result::Result<T, E>;
