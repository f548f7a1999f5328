//! Character prefix tree over normalized keys.
use std::collections::HashMap;

use indexmap::IndexSet;

use crate::glyph::GlyphId;

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    /// Every id whose key passes through this node, in insertion order
    ids: IndexSet<GlyphId>,
}

/// Maps every prefix of the inserted keys to the ids that were inserted under them.
///
/// Inserting the same id twice under overlapping keys is a no-op for the shared
/// nodes: each node holds a set.
///
/// ```
/// use gylte::glyph::GlyphId;
/// use gylte::index::trie::PrefixTrie;
///
/// let mut trie = PrefixTrie::default();
/// trie.insert("account", GlyphId(1));
/// trie.insert("account box", GlyphId(2));
/// trie.insert("acc", GlyphId(1));
///
/// let ids: Vec<_> = trie.find_prefix("acc").unwrap().iter().copied().collect();
/// assert_eq!(ids, [GlyphId(1), GlyphId(2)]);
/// assert!(trie.find_prefix("box").is_none());
/// ```
#[derive(Debug, Default)]
pub struct PrefixTrie {
    root: TrieNode,
    node_count: usize,
}

impl PrefixTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key` for `id`. An empty key is ignored.
    pub fn insert(&mut self, key: &str, id: GlyphId) {
        let node_count = &mut self.node_count;
        let mut node = &mut self.root;
        for ch in key.chars() {
            node = node.children.entry(ch).or_insert_with(|| {
                *node_count += 1;
                TrieNode::default()
            });
            node.ids.insert(id);
        }
    }

    /// Ids of every key starting with `prefix`, `None` for an empty prefix or no hit
    pub fn find_prefix(&self, prefix: &str) -> Option<&IndexSet<GlyphId>> {
        if prefix.is_empty() {
            return None;
        }
        let mut node = &self.root;
        for ch in prefix.chars() {
            node = node.children.get(&ch)?;
        }
        Some(&node.ids)
    }

    /// Number of nodes, the root excluded
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }
}
