use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Separator between the segments of a glyph name (`nf-cod-account`)
pub const SEGMENT_SEPARATOR: char = '-';

/// Identifier of a glyph, unique per distinct name within one load of the index
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlyphId(pub u32);

impl Display for GlyphId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for GlyphId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A glyph as loaded from the store.
///
/// Records never change once loaded; a search returns them wrapped in a
/// [`MatchedGlyph`](crate::MatchedGlyph) that carries the per-query score.
///
/// ```
/// use gylte::glyph::{GlyphId, GlyphRecord};
///
/// let record = GlyphRecord::new(GlyphId(1), "nf-cod-account", "\u{eb99}");
/// assert_eq!(record.prefix(), Some("nf"));
/// assert_eq!(record.category(), Some("cod"));
/// assert_eq!(record.tags(), ["account"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRecord {
    id: GlyphId,
    name: Box<str>,
    symbol: Box<str>,
    prefix: Option<Box<str>>,
    category: Option<Box<str>>,
    tags: Vec<Box<str>>,
}

impl GlyphRecord {
    /// Create a record, deriving prefix, category and tags from `name`
    pub fn new(id: GlyphId, name: &str, symbol: &str) -> Self {
        let segments = NameSegments::parse(name);
        Self {
            id,
            name: name.into(),
            symbol: symbol.into(),
            prefix: segments.prefix.map(Into::into),
            category: segments.category.map(Into::into),
            tags: segments.tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> GlyphId {
        self.id
    }

    /// The human readable label, the only field the matcher looks at
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The display payload, never interpreted
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn tags(&self) -> Vec<&str> {
        self.tags.iter().map(AsRef::as_ref).collect()
    }
}

impl Display for GlyphRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.symbol, self.name)
    }
}

//------------------------------------------------------------------------------
/// Positional segments of a `-` separated glyph name.
///
/// `nf-cod-account` has prefix `nf`, category `cod` and tags `[account]`.
/// A name without separator only has a prefix.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NameSegments<'a> {
    pub prefix: Option<&'a str>,
    pub category: Option<&'a str>,
    pub tags: Vec<&'a str>,
}

impl<'a> NameSegments<'a> {
    pub fn parse(name: &'a str) -> Self {
        if name.is_empty() {
            return Self::default();
        }
        let mut parts = name.split(SEGMENT_SEPARATOR);
        let prefix = parts.next();
        let category = parts.next().filter(|category| !category.is_empty());
        let tags = parts.filter(|tag| !tag.is_empty()).collect();
        Self { prefix, category, tags }
    }
}

/// Category of a glyph name: the second `-` separated segment
pub fn category_of(name: &str) -> Option<&str> {
    NameSegments::parse(name).category
}
