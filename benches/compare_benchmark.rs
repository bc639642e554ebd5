//! Benchmarks for the comparison engine.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use deep_compare::{compare, ComparisonConfig};
use serde_json::{json, Value};
use std::hint::black_box;

fn document(records: usize, shift: usize) -> Value {
    let items: Vec<Value> = (0..records)
        .map(|i| {
            let id = (i + shift) % records;
            json!({
                "id": id,
                "name": format!("record-{id}"),
                "tags": ["a", "b", "c"],
                "score": id as f64 * 0.5,
            })
        })
        .collect();
    json!({ "items": items })
}

fn benchmark_ordered(c: &mut Criterion) {
    let config = ComparisonConfig::builder().unlimited().build();
    let mut group = c.benchmark_group("ordered");
    for records in [100, 1_000] {
        let left = document(records, 0);
        let right = document(records, 0);
        group.bench_with_input(BenchmarkId::from_parameter(records), &records, |b, _| {
            b.iter(|| compare(black_box(&left), black_box(&right), &config));
        });
    }
    group.finish();
}

fn benchmark_unordered(c: &mut Criterion) {
    let greedy = ComparisonConfig::builder()
        .unlimited()
        .ignore_collection_order(true)
        .build();
    let keyed = ComparisonConfig::builder()
        .unlimited()
        .ignore_collection_order(true)
        .match_collection_by("object", ["id"])
        .build();

    let mut group = c.benchmark_group("unordered");
    for records in [50, 200] {
        let left = document(records, 0);
        let right = document(records, records / 2);
        group.bench_with_input(BenchmarkId::new("greedy", records), &records, |b, _| {
            b.iter(|| compare(black_box(&left), black_box(&right), &greedy));
        });
        group.bench_with_input(BenchmarkId::new("keyed", records), &records, |b, _| {
            b.iter(|| compare(black_box(&left), black_box(&right), &keyed));
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_ordered, benchmark_unordered);
criterion_main!(benches);
