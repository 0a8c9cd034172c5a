//! Benchmarks for similarity computation
//!
//! Run with: cargo bench --package similarity
//!
//! Uses a synthetic store so the benchmark has no dataset dependency.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rating_store::RatingStore;
use similarity::{NormScope, SimilarityEngine};
use std::sync::Arc;

/// 500 users x 200 items, each user rating roughly a fifth of the catalog
fn synthetic_store() -> Arc<RatingStore> {
    let mut store = RatingStore::new();
    for user in 0..500u32 {
        for item in 0..200u32 {
            if (user * 7 + item * 13) % 5 == 0 {
                let rating = 1.0 + ((user + item) % 9) as f64 * 0.5;
                store
                    .add_rating(user, item, rating)
                    .expect("synthetic ratings are on the default scale");
            }
        }
    }
    Arc::new(store)
}

fn bench_compute_all(c: &mut Criterion) {
    let store = synthetic_store();
    let engine = SimilarityEngine::new(store.clone());

    c.bench_function("compute_all_all_raters", |b| {
        b.iter(|| black_box(engine.compute_all()))
    });

    let co_raters = SimilarityEngine::new(store).with_norm_scope(NormScope::CoRaters);
    c.bench_function("compute_all_co_raters", |b| {
        b.iter(|| black_box(co_raters.compute_all()))
    });
}

fn bench_pair_similarity(c: &mut Criterion) {
    let engine = SimilarityEngine::new(synthetic_store());

    c.bench_function("similarity_pair", |b| {
        b.iter(|| black_box(engine.similarity(black_box(3), black_box(17))))
    });
}

criterion_group!(benches, bench_compute_all, bench_pair_similarity);
criterion_main!(benches);
