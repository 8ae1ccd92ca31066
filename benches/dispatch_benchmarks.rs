//! Benchmarks for property dispatch.
//!
//! - `build`: building a property map from scratch on a fresh registry
//! - `cached`: scalar and array access once the map is cached
//!
//! ```bash
//! cargo bench --bench dispatch_benchmarks
//! ```

use criterion::{Criterion, criterion_group, criterion_main};
use propify::{TypeRegistry, get_property, set_property};
use std::collections::BTreeMap;
use std::hint::black_box;

#[derive(Default)]
struct Record {
    title: String,
    score: i64,
    tags: BTreeMap<i64, String>,
}

#[propify::methods]
impl Record {
    fn get_title(&self) -> String {
        self.title.clone()
    }

    fn set_title(&mut self, title: String) {
        self.title = title;
    }

    fn get_score(&self) -> i64 {
        self.score
    }

    fn set_score(&mut self, score: i64) {
        self.score = score;
    }

    fn get_tags(&self, index: i64) -> Option<String> {
        self.tags.get(&index).cloned()
    }

    fn set_tags(&mut self, index: i64, tag: String) {
        self.tags.insert(index, tag);
    }

    fn itr_tags(&self) -> BTreeMap<i64, String> {
        self.tags.clone()
    }
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build/record", |b| {
        b.iter(|| {
            let registry = TypeRegistry::new();
            black_box(registry.resolve::<Record>().map(|map| map.len()))
        })
    });
}

fn bench_cached(c: &mut Criterion) {
    let registry = TypeRegistry::new();
    let mut record = Record::default();
    for i in 0..64 {
        record.tags.insert(i, format!("tag{i}"));
    }

    let mut group = c.benchmark_group("cached");

    group.bench_function("get_scalar", |b| {
        b.iter(|| black_box(get_property(&registry, &mut record, black_box("score")).is_ok()))
    });

    group.bench_function("set_scalar", |b| {
        b.iter(|| set_property(&registry, &mut record, black_box("score"), black_box(7)))
    });

    group.bench_function("array_get", |b| {
        b.iter(|| {
            let value = get_property(&registry, &mut record, "tags")
                .ok()
                .and_then(|v| v.into_array());
            value.map(|mut tags| black_box(tags.get(black_box(32)).is_ok()))
        })
    });

    group.bench_function("array_iterate", |b| {
        b.iter(|| {
            let value = get_property(&registry, &mut record, "tags")
                .ok()
                .and_then(|v| v.into_array());
            value.and_then(|mut tags| tags.iterate().ok()).map(|pairs| black_box(pairs.count()))
        })
    });

    group.bench_function("missing", |b| {
        b.iter(|| black_box(get_property(&registry, &mut record, black_box("asdf")).is_err()))
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_cached);
criterion_main!(benches);
