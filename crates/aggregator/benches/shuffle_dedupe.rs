//! Benchmarks for page assembly
//!
//! Run with: cargo bench --package aggregator
//!
//! Covers the CPU side of the landing page: merging a few dozen records by
//! id, then shuffling and capping them.

use aggregator::{RecipeSet, shuffle};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use model::DetailRecord;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn build_records(count: usize) -> Vec<DetailRecord> {
    // Every third id repeats, like random picks landing on known recipes
    (0..count)
        .map(|i| DetailRecord::new((i - i % 3).to_string(), format!("Recipe {}", i)))
        .collect()
}

fn bench_dedupe(c: &mut Criterion) {
    let records = build_records(29);

    c.bench_function("recipe_set_extend_29", |b| {
        b.iter(|| {
            let mut set = RecipeSet::new();
            set.extend(black_box(records.clone()));
            black_box(set.len())
        })
    });
}

fn bench_shuffle(c: &mut Criterion) {
    let records = build_records(24);
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("shuffle_24", |b| {
        b.iter(|| {
            let mut page = records.clone();
            shuffle(black_box(&mut page), &mut rng);
            page.truncate(24);
            black_box(page)
        })
    });
}

criterion_group!(benches, bench_dedupe, bench_shuffle);
criterion_main!(benches);
