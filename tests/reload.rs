#[allow(dead_code)]
mod common;

use std::sync::Arc;
use std::time::Duration;

use gylte::clipboard::MemoryClipboard;
use gylte::prelude::*;

use common::{SwitchableStore, names};

fn picker(store: &Arc<SwitchableStore>) -> Picker {
    Picker::new(
        GylteOptions::default(),
        Box::new(store.clone()),
        Box::new(MemoryClipboard::default()),
    )
}

#[test]
fn reload_replaces_the_whole_index() {
    let store = SwitchableStore::new(&["nf-fa-car", "nf-cod-account"]);
    let picker = picker(&store);
    assert_eq!(picker.load().unwrap(), 1);

    store.set(&["nf-md-car_side", "nf-dev-rust"]);
    assert_eq!(picker.reload().unwrap(), 2);

    let page = picker.get_glyphs("", None, 0, 0);
    assert_eq!(names(&page.glyphs), ["nf-md-car_side", "nf-dev-rust"]);
    assert_eq!(picker.get_glyphs("account", None, 0, 0).total, 0);
    assert_eq!(picker.categories().keys().collect::<Vec<_>>(), ["md", "dev"]);
}

#[test]
fn failed_first_load_stays_not_loaded() {
    let store = SwitchableStore::new(&["nf-fa-car"]);
    store.fail(true);
    let picker = picker(&store);

    assert!(picker.load().is_err());
    assert_eq!(picker.readiness(), Readiness::NotLoaded);
    assert!(!picker.wait_ready(Duration::from_millis(20)));
    let page = picker.get_glyphs("car", None, 0, 0);
    assert!(page.glyphs.is_empty());
    assert_eq!(page.total, 0);
    assert!(matches!(picker.toggle_favorite(GlyphId(1)), Err(GylteError::NotReady)));
}

#[test]
fn failed_reload_keeps_previous_index() {
    let store = SwitchableStore::new(&["nf-fa-car", "nf-cod-account"]);
    let picker = picker(&store);
    picker.load().unwrap();

    store.set(&["nf-dev-rust"]);
    store.fail(true);
    assert!(matches!(picker.reload(), Err(GylteError::Io { .. })));

    assert_eq!(picker.readiness(), Readiness::Ready { generation: 1 });
    assert_eq!(names(&picker.get_glyphs("", None, 0, 0).glyphs), ["nf-fa-car", "nf-cod-account"]);

    store.fail(false);
    assert_eq!(picker.reload().unwrap(), 2);
    assert_eq!(names(&picker.get_glyphs("", None, 0, 0).glyphs), ["nf-dev-rust"]);
}

#[test]
fn favorites_follow_names_across_reloads() {
    let store = SwitchableStore::new(&["nf-fa-car", "nf-cod-account"]);
    let picker = picker(&store);
    picker.load().unwrap();
    let car = picker.get_glyphs("nf-fa-car", None, 1, 0).glyphs[0].glyph.id();
    assert!(picker.toggle_favorite(car).unwrap());

    // same name under a new id, and the old id now names something else
    store.set(&["nf-cod-account", "nf-dev-rust", "nf-fa-car"]);
    picker.reload().unwrap();

    let favorites = picker.favorites();
    assert_eq!(names(&favorites), ["nf-fa-car"]);
    assert_ne!(favorites[0].glyph.id(), car);

    let reused = picker.index().unwrap().get(car).unwrap().name().to_string();
    assert_eq!(reused, "nf-cod-account");
    assert!(!picker.is_favorite(&reused));
}

#[test]
fn stale_ids_are_rejected() {
    let store = SwitchableStore::new(&["a-b-c", "a-b-d", "a-b-e"]);
    let picker = picker(&store);
    picker.load().unwrap();

    store.set(&["a-b-c"]);
    picker.reload().unwrap();
    assert!(matches!(
        picker.toggle_favorite(GlyphId(3)),
        Err(GylteError::UnknownGlyph(GlyphId(3)))
    ));
    assert!(picker.copy_glyph(GlyphId(3)).is_err());
}

#[test]
fn searches_keep_their_snapshot_during_reload() {
    let store = SwitchableStore::new(&["nf-fa-car"]);
    let picker = Arc::new(picker(&store));
    picker.load().unwrap();

    let before = picker.index().unwrap();
    store.set(&["nf-dev-rust"]);
    picker.spawn_load().join().unwrap().unwrap();

    assert_eq!(before.records()[0].name(), "nf-fa-car");
    assert_eq!(picker.index().unwrap().records()[0].name(), "nf-dev-rust");
    assert_eq!(picker.stats().generation, 2);
}
