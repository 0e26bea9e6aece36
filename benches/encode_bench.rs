// In sensory-core/benches/encode_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

use sensory_codec::normalize::{
    denormalize_dataset, merge_triple_arrays_and_find_min_max, normalize_dataset,
};
use sensory_codec::{decode_value, encode_dataset, encode_value, EncodingConfig};

// --- Mock Data Generation ---

/// Generates a dataset of nested records resembling event payloads: strings,
/// integers, two-decimal prices, high-precision ratios, and a timestamp.
fn generate_records(count: usize) -> Vec<Value> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|i| {
            let kind = ["click", "view", "purchase"][rng.random_range(0..3)];
            json!({
                "id": i as f64,
                "kind": kind,
                "price": (rng.random_range(0..100_000) as f64) / 100.0,
                "ratio": rng.random::<f64>(),
                "created_at": 1.5e12 + rng.random::<f64>() * 4.0e11,
                "user": {
                    "name": format!("user-{}", rng.random_range(0..64)),
                    "active": rng.random_bool(0.5)
                }
            })
        })
        .collect()
}

// --- Benchmark Suite ---

const BENCH_RECORD_COUNT: usize = 1000;

fn bench_pipeline(c: &mut Criterion) {
    let records = generate_records(BENCH_RECORD_COUNT);
    let config = EncodingConfig::default();

    let (dataset, keys, strings) = encode_dataset(&records, &config);
    let index = merge_triple_arrays_and_find_min_max(&dataset);
    let normalized =
        normalize_dataset(&dataset, Some(&index), config.precision, config.max_type_precision)
            .unwrap();

    let mut group = c.benchmark_group("Sensory Pipeline");
    group.throughput(criterion::Throughput::Elements(BENCH_RECORD_COUNT as u64));

    group.bench_function("Encode (flatten + vocabularies + triples)", |b| {
        b.iter(|| black_box(encode_dataset(black_box(&records), &config)))
    });

    group.bench_function("Encode single record (auto-build)", |b| {
        b.iter(|| black_box(encode_value(black_box(&records[0]), &config)))
    });

    group.bench_function("Build min/max index", |b| {
        b.iter(|| black_box(merge_triple_arrays_and_find_min_max(black_box(&dataset))))
    });

    group.bench_function("Normalize dataset", |b| {
        b.iter(|| {
            black_box(normalize_dataset(
                black_box(&dataset),
                Some(&index),
                config.precision,
                config.max_type_precision,
            ))
        })
    });

    group.bench_function("Denormalize dataset", |b| {
        b.iter(|| {
            black_box(denormalize_dataset(
                black_box(&normalized),
                &index,
                config.precision,
                config.max_type_precision,
            ))
        })
    });

    group.bench_function("Decode (triples + unflatten)", |b| {
        b.iter(|| {
            for triples in &dataset {
                black_box(decode_value(black_box(triples), &keys, &strings));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
