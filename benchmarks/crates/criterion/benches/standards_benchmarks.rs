//! Benchmarks for the content-standards scorers.

#![allow(
    clippy::min_ident_chars,
    missing_docs,
    reason = "Benchmarks use standard closure names"
)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use stencil_benchmarks_criterion::sample_document;
use stencil_engine::standards::{
    AccessibilityScorer, ContentStandards, FormattingScorer, InternationalizationScorer,
    StandardsScorer, StyleScorer,
};
use std::hint::black_box;
use std::time::Duration;

fn bench_individual_scorers(c: &mut Criterion) {
    let mut group = c.benchmark_group("scorer");
    let document = sample_document(20);
    group.throughput(Throughput::Bytes(document.len() as u64));

    let scorers: [(&str, Box<dyn StandardsScorer>); 4] = [
        ("accessibility", Box::new(AccessibilityScorer)),
        ("formatting", Box::new(FormattingScorer)),
        ("style", Box::new(StyleScorer)),
        ("internationalization", Box::new(InternationalizationScorer)),
    ];

    for (name, scorer) in &scorers {
        group.bench_with_input(BenchmarkId::from_parameter(name), &document, |b, document| {
            b.iter(|| scorer.score(black_box(document)));
        });
    }
    group.finish();
}

fn bench_aggregate_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("content_standards");
    let standards = ContentStandards::new();

    for sections in &[1, 10, 100] {
        let document = sample_document(*sections);
        group.throughput(Throughput::Bytes(document.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(sections),
            &document,
            |b, document| {
                b.iter(|| standards.evaluate(black_box(document)));
            },
        );
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(2))
        .warm_up_time(Duration::from_millis(500))
        .sample_size(10);
    targets = bench_individual_scorers,
             bench_aggregate_by_size
}
criterion_main!(benches);
