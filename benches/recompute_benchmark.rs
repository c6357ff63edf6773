use criterion::{criterion_group, criterion_main, Criterion};
use geojson::Value;
use hazard_scan::models::{
    AirportInfo, Category, Coordinate, FilterState, RawFeature, RequestMode, ScanRequest,
    ScanResult,
};
use hazard_scan::services::{normalize_batch, recompute};
use std::hint::black_box;

const CENTER: Coordinate = Coordinate {
    lat: 51.4775,
    lon: -0.461389,
};

/// A few thousand small polygons scattered around the center, like a
/// large-radius scan with a low minimum area.
fn synthetic_features(count: usize) -> Vec<RawFeature> {
    (0..count)
        .map(|i| {
            let lat = CENTER.lat + ((i % 97) as f64 - 48.0) * 0.002;
            let lon = CENTER.lon + ((i % 89) as f64 - 44.0) * 0.003;
            let d = 0.0005;
            let ring = vec![
                vec![lon - d, lat - d],
                vec![lon + d, lat - d],
                vec![lon + d, lat + d],
                vec![lon - d, lat + d],
                vec![lon - d, lat - d],
            ];

            RawFeature {
                geometry: Some(Value::Polygon(vec![ring])),
                custom_type: Category::ALL[i % 4].key().to_string(),
                area_sq_m: Some(1000.0 + i as f64),
                risk_score: Some((i % 10) as i64 + 1),
                name: None,
                distance_km: None,
                centroid: None,
            }
        })
        .collect()
}

fn benchmark_scan_pipeline(c: &mut Criterion) {
    let raw = synthetic_features(5000);
    let batch = normalize_batch(raw.clone(), CENTER);

    let result = ScanResult {
        request: ScanRequest {
            mode: RequestMode::Icao,
            icao: Some("EGLL".to_string()),
            lat: None,
            lon: None,
            radius_km: 13.0,
            min_area_sq_m: 0.0,
        },
        features: batch.features,
        center: AirportInfo {
            name: "London Heathrow".to_string(),
            lat: CENTER.lat,
            lon: CENTER.lon,
        },
        radius_km: 13.0,
        kml_export: String::new(),
        csv_export: String::new(),
        feature_count: 5000,
        skipped: batch.skipped,
    };

    let mut water_hidden = FilterState::all();
    water_hidden.set(Category::Water, false);

    let mut group = c.benchmark_group("scan_pipeline");

    group.bench_function("normalize_5000", |b| {
        b.iter(|| normalize_batch(black_box(raw.clone()), CENTER))
    });

    group.bench_function("recompute_all_active", |b| {
        b.iter(|| recompute(black_box(&result), black_box(&FilterState::all())))
    });

    group.bench_function("recompute_water_hidden", |b| {
        b.iter(|| recompute(black_box(&result), black_box(&water_hidden)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_scan_pipeline);
criterion_main!(benches);
