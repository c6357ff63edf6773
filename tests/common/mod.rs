// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use hazard_scan::models::ReportResponse;
use serde_json::{json, Value};

/// Heathrow ARP, used as the scan center in fixtures.
#[allow(dead_code)]
pub const LHR_LAT: f64 = 51.4775;
#[allow(dead_code)]
pub const LHR_LON: f64 = -0.461389;

/// A square polygon feature centered on (lat, lon).
#[allow(dead_code)]
pub fn polygon_feature(
    custom_type: &str,
    lat: f64,
    lon: f64,
    area: f64,
    risk: Option<i64>,
) -> Value {
    let d = 0.001;
    let mut properties = json!({
        "custom_type": custom_type,
        "area_sq_m": area,
    });
    if let Some(risk) = risk {
        properties["risk_score"] = json!(risk);
    }

    json!({
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [[
                [lon - d, lat - d],
                [lon + d, lat - d],
                [lon + d, lat + d],
                [lon - d, lat + d],
                [lon - d, lat - d]
            ]]
        },
        "properties": properties
    })
}

/// A feature whose geometry the engine cannot use.
#[allow(dead_code)]
pub fn line_feature(custom_type: &str) -> Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "LineString",
            "coordinates": [[-0.46, 51.47], [-0.45, 51.48]]
        },
        "properties": { "custom_type": custom_type, "area_sq_m": 10.0 }
    })
}

/// Full backend response body around Heathrow.
#[allow(dead_code)]
pub fn response_json(features: Vec<Value>) -> Value {
    json!({
        "feature_count": features.len(),
        "airport_info": { "name": "London Heathrow", "lat": LHR_LAT, "lon": LHR_LON },
        "map_geojson": { "type": "FeatureCollection", "features": features },
        "kml_string": "<?xml version=\"1.0\"?><kml></kml>",
        "csv_string": "type,area_sq_m\nwater,1000\n"
    })
}

#[allow(dead_code)]
pub fn response(features: Vec<Value>) -> ReportResponse {
    serde_json::from_value(response_json(features)).expect("fixture response should parse")
}

/// Ten features: 3 water, 3 veg, 2 waste, 2 unknown-type; risk 1..=10 in order.
#[allow(dead_code)]
pub fn ten_features() -> Vec<Value> {
    let types = [
        "water", "veg", "water", "waste", "veg", "industrial", "water", "veg", "waste", "other",
    ];
    types
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let offset = 0.01 * i as f64;
            polygon_feature(
                t,
                LHR_LAT + offset,
                LHR_LON + offset,
                1000.0 * (i + 1) as f64,
                Some(i as i64 + 1),
            )
        })
        .collect()
}

/// Serve `router` on an ephemeral local port and return its base URL.
#[allow(dead_code)]
pub async fn spawn_mock_backend(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("mock backend address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("mock backend failed");
    });

    format!("http://{}", addr)
}
