// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use geojson::Value;
use hazard_scan::models::Coordinate;
use hazard_scan::services::{centroid, distance_km, GeometryError};

fn sample_points() -> Vec<Coordinate> {
    let mut points = Vec::new();
    for lat in [-89.0, -45.5, 0.0, 33.3, 51.4775, 89.9] {
        for lon in [-179.9, -90.0, -0.461389, 0.0, 45.0, 179.9] {
            points.push(Coordinate::new(lat, lon));
        }
    }
    points
}

#[test]
fn test_distance_symmetric_and_non_negative() {
    let points = sample_points();
    for &a in &points {
        assert_eq!(distance_km(a, a), 0.0);
        for &b in &points {
            let ab = distance_km(a, b);
            let ba = distance_km(b, a);
            assert!(ab >= 0.0);
            assert!((ab - ba).abs() < 1e-9, "asymmetric for {:?} {:?}", a, b);
            // Never more than half the circumference
            assert!(ab <= std::f64::consts::PI * 6371.0 + 1e-6);
        }
    }
}

#[test]
fn test_distance_known_pair() {
    // Heathrow to JFK, roughly 5,540 km
    let lhr = Coordinate::new(51.4775, -0.461389);
    let jfk = Coordinate::new(40.6413, -73.7781);
    let d = distance_km(lhr, jfk);
    assert!((d - 5540.0).abs() < 50.0, "got {}", d);
}

#[test]
fn test_distance_antipodal_is_finite() {
    let a = Coordinate::new(0.0, 0.0);
    let b = Coordinate::new(0.0, 180.0);
    let d = distance_km(a, b);
    assert!(d.is_finite());
    assert!((d - std::f64::consts::PI * 6371.0).abs() < 1e-6);
}

#[test]
fn test_point_centroid_swaps_axis_order() {
    let c = centroid(&Value::Point(vec![-0.46, 51.47])).unwrap();
    assert_eq!(c, Coordinate::new(51.47, -0.46));
}

#[test]
fn test_polygon_centroid_is_vertex_mean() {
    // Closing vertex repeats the first; it must not be double counted.
    let polygon = Value::Polygon(vec![vec![
        vec![0.0, 0.0],
        vec![4.0, 0.0],
        vec![4.0, 2.0],
        vec![0.0, 2.0],
        vec![0.0, 0.0],
    ]]);
    let c = centroid(&polygon).unwrap();
    assert!((c.lat - 1.0).abs() < 1e-12);
    assert!((c.lon - 2.0).abs() < 1e-12);
}

#[test]
fn test_multipolygon_uses_first_polygon() {
    let first = vec![vec![
        vec![10.0, 10.0],
        vec![12.0, 10.0],
        vec![12.0, 12.0],
        vec![10.0, 12.0],
        vec![10.0, 10.0],
    ]];
    let second = vec![vec![
        vec![50.0, 50.0],
        vec![52.0, 50.0],
        vec![52.0, 52.0],
        vec![50.0, 50.0],
    ]];
    let c = centroid(&Value::MultiPolygon(vec![first, second])).unwrap();
    assert!((c.lat - 11.0).abs() < 1e-12);
    assert!((c.lon - 11.0).abs() < 1e-12);
}

#[test]
fn test_unsupported_and_malformed_geometries() {
    let line = Value::LineString(vec![vec![0.0, 0.0], vec![1.0, 1.0]]);
    assert_eq!(
        centroid(&line),
        Err(GeometryError::UnsupportedGeometry("LineString"))
    );

    let short_point = Value::Point(vec![1.0]);
    assert_eq!(centroid(&short_point), Err(GeometryError::Malformed("Point")));

    let nan_polygon = Value::Polygon(vec![vec![
        vec![0.0, 0.0],
        vec![f64::NAN, 1.0],
        vec![1.0, 1.0],
        vec![0.0, 0.0],
    ]]);
    assert_eq!(
        centroid(&nan_polygon),
        Err(GeometryError::Malformed("Polygon"))
    );

    let no_rings = Value::Polygon(vec![]);
    assert!(centroid(&no_rings).is_err());

    let no_polygons = Value::MultiPolygon(vec![]);
    assert!(centroid(&no_polygons).is_err());
}
