//! Script Classification Benchmarks
//!
//! **Purpose:** Measure per-file heuristics and bundle aggregation
//!
//! **Regression Threshold:** >20% slower than baseline
//!
//! **How to Run:**
//! ```bash
//! cargo bench --bench js_classification
//! ```
//!
//! **What's Being Measured:**
//! 1. `classify scripts` - Rule evaluation over N files on the rayon pool
//! 2. `classify scripts (1 worker)` - Same workload on a single-thread pool
//! 3. `aggregate bundle` - Size sums and preview rendering
//!
//! **Performance Notes:**
//! - Every fourth file is a jQuery plugin, so the sub-analyzer runs too
//! - Large files dominate through the line count and preview truncation

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use deadweight::analyzer::bundle::aggregate;
use deadweight::analyzer::js::classify_all;
use deadweight::config::JsSettings;
use deadweight::snapshot::AssetFile;
use std::hint::black_box;

fn scripts(count: usize) -> Vec<AssetFile> {
    (0..count)
        .map(|i| {
            if i % 4 == 0 {
                AssetFile::new(
                    format!("https://example.com/wp-content/plugins/p{}/jquery.slick-{}.js", i, i),
                    format!("/*! jQuery v1.12.{} */\n$('.x').slick({{}});\n$('a').bind('click', f);", i % 5),
                )
            } else {
                let body: String = (0..50)
                    .map(|n| format!("function f{}_{}() {{ return require('mod{}'); }}\n", i, n, n % 7))
                    .collect();
                AssetFile::new(format!("https://example.com/js/app{}.js", i), body)
            }
        })
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let limits = JsSettings::default();
    let mut group = c.benchmark_group("classify scripts");
    for size in [10usize, 100, 500] {
        let files = scripts(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &files, |b, files| {
            b.iter(|| black_box(classify_all(black_box(files), &limits)));
        });
    }
    group.finish();
}

fn bench_classify_single_worker(c: &mut Criterion) {
    let limits = JsSettings {
        workers: Some(1),
        ..JsSettings::default()
    };
    let files = scripts(100);

    c.bench_function("classify scripts (1 worker)", |b| {
        b.iter(|| black_box(classify_all(black_box(&files), &limits)));
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let limits = JsSettings::default();
    let files = scripts(200);
    let verdicts = classify_all(&files, &limits).unwrap();

    c.bench_function("aggregate bundle", |b| {
        b.iter(|| {
            black_box(aggregate(
                verdicts.clone(),
                black_box(&files),
                limits.preview_chars,
            ))
        });
    });
}

criterion_group!(
    benches,
    bench_classify,
    bench_classify_single_worker,
    bench_aggregate
);
criterion_main!(benches);
