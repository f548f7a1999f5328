use criterion::{Criterion, criterion_group, criterion_main};

use gylte::clipboard::MemoryClipboard;
use gylte::options::GylteOptionsBuilder;
use gylte::prelude::*;

fn picker(strategy: SearchStrategy) -> Picker {
    let names = (0..10_000).map(|i| (format!("nf-c{}-glyph_{i}", i % 40), "?"));
    let options = GylteOptionsBuilder::default().strategy(strategy).build().unwrap();
    let picker = Picker::new(
        options,
        Box::new(MemoryStore::from_pairs(names)),
        Box::new(MemoryClipboard::default()),
    );
    picker.load().unwrap();
    picker
}

fn criterion_benchmark(c: &mut Criterion) {
    let scan = picker(SearchStrategy::Scan);
    let indexed = picker(SearchStrategy::Indexed);

    c.bench_function("scan", |b| b.iter(|| scan.get_glyphs("gly12", None, 0, 0)));
    c.bench_function("scan_category", |b| b.iter(|| scan.get_glyphs("gly", Some("c7"), 0, 0)));
    c.bench_function("indexed", |b| b.iter(|| indexed.get_glyphs("glyph_12", None, 0, 0)));
    c.bench_function("load", |b| b.iter(|| scan.reload()));
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = criterion_benchmark
);
criterion_main!(benches);
