// Criterion benchmarks for Pilot Locator

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pilot_locator::core::{
    distance::haversine_distance,
    filter_by_range, find_top_matches,
    listing::parse_listing,
};
use pilot_locator::models::{Coordinate, PilotDocument, DEFAULT_REFERENCE};
use serde_json::{json, Value};

fn create_pilot(id: usize, lat: f64, lon: f64) -> Value {
    json!({
        "_id": format!("{:024x}", id),
        "name": format!("Pilot {}", id),
        "coordinates": [lat, lon],
        "experience": id % 30,
        "location": "Benchmark Field",
        "profileImage": format!("https://images.example.com/{}.png", id),
    })
}

fn create_listing(count: usize) -> Value {
    let pilots: Vec<Value> = (0..count)
        .map(|i| {
            let lat_offset = (i as f64 * 0.013) % 20.0;
            let lon_offset = (i as f64 * 0.029) % 40.0;
            create_pilot(i, 40.0 + lat_offset, -20.0 + lon_offset)
        })
        .collect();
    Value::Array(pilots)
}

fn create_documents(count: usize) -> Vec<PilotDocument> {
    parse_listing(&create_listing(count)).expect("listing is an array")
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(51.505),
                black_box(-0.09),
                black_box(40.0),
                black_box(-70.0),
            )
        });
    });
}

fn bench_parse_listing(c: &mut Criterion) {
    let listing = create_listing(1000);

    c.bench_function("parse_listing_1000_pilots", |b| {
        b.iter(|| parse_listing(black_box(&listing)))
    });
}

fn bench_top_matches(c: &mut Criterion) {
    let query = Coordinate::new(50.0, 0.0).expect("valid coordinate");

    let mut group = c.benchmark_group("top_matches");

    for pilot_count in [10, 100, 1000, 10000].iter() {
        let documents = create_documents(*pilot_count);

        group.bench_with_input(
            BenchmarkId::new("find_top_matches", pilot_count),
            pilot_count,
            |b, _| {
                b.iter(|| {
                    find_top_matches(
                        black_box(&documents),
                        black_box(query),
                        black_box(1000.0),
                        black_box(10),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_filter_by_range(c: &mut Criterion) {
    let documents = create_documents(1000);

    c.bench_function("filter_by_range_1000_pilots", |b| {
        b.iter(|| filter_by_range(black_box(&documents), black_box(DEFAULT_REFERENCE), black_box(300.0)))
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_parse_listing,
    bench_top_matches,
    bench_filter_by_range
);

criterion_main!(benches);
