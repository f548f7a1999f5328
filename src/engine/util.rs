use unicode_normalization::UnicodeNormalization;

use crate::fuzzy_matcher::is_separator;

/// Remove diacritics: NFD decomposition with combining marks dropped.
///
/// `café` becomes `cafe`; scripts without combining marks pass through unchanged.
pub fn strip_diacritics(s: &str) -> String {
    s.nfd()
        .filter(|&ch| !unicode_normalization::char::is_combining_mark(ch))
        .collect()
}

/// Normalized lookup key of a name or query.
///
/// Lower-case, every separator (`-`, `_`, `.`, `/`) becomes a space, runs of
/// whitespace collapse to one space, ends are trimmed. This is what the index
/// keys and the trie are built on; it is never shown to the user.
///
/// ```
/// use gylte::engine::util::normalize_key;
///
/// assert_eq!(normalize_key("nf-MD-account_box"), "nf md account box");
/// assert_eq!(normalize_key("  a//b  "), "a b");
/// ```
pub fn normalize_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    let mut pending_space = false;
    for ch in s.chars().flat_map(char::to_lowercase) {
        if is_separator(ch) || ch.is_whitespace() {
            pending_space = !key.is_empty();
            continue;
        }
        if pending_space {
            key.push(' ');
            pending_space = false;
        }
        key.push(ch);
    }
    key
}

/// Words of a normalized key
pub fn key_words(key: &str) -> impl Iterator<Item = &str> {
    key.split(' ').filter(|word| !word.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_combining_marks() {
        assert_eq!(strip_diacritics("café"), "cafe");
        assert_eq!(strip_diacritics("señor"), "senor");
        assert_eq!(strip_diacritics("слово"), "слово");
    }

    #[test]
    fn normalize_collapses_and_trims() {
        assert_eq!(normalize_key("nf-cod-account"), "nf cod account");
        assert_eq!(normalize_key("--a__b..c//d--"), "a b c d");
        assert_eq!(normalize_key("A \t B"), "a b");
        assert_eq!(normalize_key(""), "");
        assert_eq!(normalize_key(" - "), "");
    }

    #[test]
    fn words_of_key() {
        let words: Vec<_> = key_words("nf md account box").collect();
        assert_eq!(words, ["nf", "md", "account", "box"]);
        assert_eq!(key_words("").count(), 0);
    }
}
