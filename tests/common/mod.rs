use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use gylte::clipboard::MemoryClipboard;
use gylte::prelude::*;
use gylte::store::records_from_pairs;

/// A slice of real Nerd Font names
pub const NERD_NAMES: &[&str] = &[
    "nf-cod-account",
    "nf-md-account_box",
    "nf-fa-car",
    "nf-md-car_side",
    "nf-cod-discard",
    "nf-dev-rust",
    "nf-seti-rust",
    "nf-fa-code",
    "nf-cod-code",
    "nf-md-account_circle",
    "nf-oct-accessibility",
    "nf-linux-archlinux",
];

pub fn records(names: &[&str]) -> Vec<Arc<GlyphRecord>> {
    records_from_pairs(names.iter().map(|name| (*name, "?")))
        .into_iter()
        .map(Arc::new)
        .collect()
}

pub fn names(matches: &[MatchedGlyph]) -> Vec<&str> {
    matches.iter().map(|m| m.glyph.name()).collect()
}

/// One name per line, favorites marked with `*`
pub fn render(matches: &[MatchedGlyph]) -> String {
    matches
        .iter()
        .map(|m| format!("{}{}", if m.is_favorite { "*" } else { "" }, m.glyph.name()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn picker_with(names: &[&str], options: GylteOptions) -> Picker {
    let store = MemoryStore::from_pairs(names.iter().map(|name| (*name, "?")));
    Picker::new(options, Box::new(store), Box::new(MemoryClipboard::default()))
}

pub fn loaded_picker(names: &[&str]) -> Picker {
    let picker = picker_with(names, GylteOptions::default());
    picker.load().unwrap();
    picker
}

/// A store whose content can be swapped and which can be made to fail
#[derive(Default)]
pub struct SwitchableStore {
    inner: MemoryStore,
    failing: AtomicBool,
}

impl SwitchableStore {
    pub fn new(names: &[&str]) -> Arc<Self> {
        let store = Self::default();
        store.set(names);
        Arc::new(store)
    }

    pub fn set(&self, names: &[&str]) {
        self.inner.replace(records_from_pairs(names.iter().map(|name| (*name, "?"))));
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl NameStore for SwitchableStore {
    fn list_all(&self) -> gylte::Result<Vec<GlyphRecord>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(GylteError::Io {
                path: "switchable".into(),
                source: io::Error::other("store offline"),
            });
        }
        self.inner.list_all()
    }
}
