// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

mod common;

use axum::{http::StatusCode, routing::post, Json, Router};
use common::{polygon_feature, response_json, spawn_mock_backend, ten_features};
use hazard_scan::models::ScanRequest;
use hazard_scan::services::HazardClient;
use hazard_scan::{FailureKind, ReportSession, ScanOutcome, SessionState};
use serde_json::{json, Value};
use std::time::Duration;

fn client(base: &str) -> HazardClient {
    HazardClient::new(format!("{}/generate-report", base), Duration::from_secs(5)).unwrap()
}

async fn error_backend(status: StatusCode, message: &'static str) -> String {
    let router = Router::new().route(
        "/generate-report",
        post(move || async move { (status, Json(json!({ "error": message }))) }),
    );
    spawn_mock_backend(router).await
}

#[tokio::test]
async fn test_scan_against_backend() {
    let router = Router::new().route(
        "/generate-report",
        post(|Json(body): Json<Value>| async move {
            // Echo a failure if the body is not what the backend expects
            if body["mode"] != "icao" || body["icao"] != "EGLL" || body.get("lat").is_some() {
                return (StatusCode::BAD_REQUEST, Json(json!({ "error": "bad body" })));
            }
            (StatusCode::OK, Json(response_json(ten_features())))
        }),
    );
    let base = spawn_mock_backend(router).await;

    let mut session = ReportSession::new();
    let outcome = session
        .start_scan(&client(&base), ScanRequest::icao("egll", 13.0, 5000.0))
        .await
        .unwrap();

    match outcome {
        ScanOutcome::Applied {
            feature_count,
            views,
            ..
        } => {
            assert_eq!(feature_count, 10);
            assert_eq!(views.ranked.len(), 10);
        }
        ScanOutcome::Stale => panic!("unexpected stale outcome"),
    }
    assert_eq!(session.state(), SessionState::Ready);
}

#[tokio::test]
async fn test_coordinate_request_body() {
    let router = Router::new().route(
        "/generate-report",
        post(|Json(body): Json<Value>| async move {
            if body["mode"] != "coords" || body["lat"] != 51.5 || body.get("icao").is_some() {
                return (StatusCode::BAD_REQUEST, Json(json!({ "error": "bad body" })));
            }
            let features = vec![polygon_feature("veg", 51.5, -0.2, 7000.0, Some(3))];
            (StatusCode::OK, Json(response_json(features)))
        }),
    );
    let base = spawn_mock_backend(router).await;

    let report = client(&base)
        .generate_report(&ScanRequest::coords(51.5, -0.2, 5.0, 5000.0))
        .await
        .unwrap();
    assert_eq!(report.map_geojson.features.len(), 1);
}

#[tokio::test]
async fn test_gateway_timeout_classified() {
    let base = error_backend(StatusCode::GATEWAY_TIMEOUT, "Gateway Timeout").await;

    let mut session = ReportSession::new();
    let err = session
        .start_scan(&client(&base), ScanRequest::icao("EGLL", 13.0, 5000.0))
        .await
        .unwrap_err();

    assert_eq!(err.failure_kind(), Some(FailureKind::Timeout));
    assert_eq!(session.state(), SessionState::Failed);
    assert!(err.user_message().contains("smaller radius"));
}

#[tokio::test]
async fn test_unknown_airport_classified() {
    let base = error_backend(StatusCode::INTERNAL_SERVER_ERROR, "Airport ZZZZ not found").await;

    let err = client(&base)
        .generate_report(&ScanRequest::icao("ZZZZ", 13.0, 5000.0))
        .await
        .unwrap_err();

    assert_eq!(err.failure_kind(), Some(FailureKind::NotFound));
    assert!(err.to_string().contains("Airport ZZZZ not found"));
}

#[tokio::test]
async fn test_too_many_elements_classified() {
    let base = error_backend(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Query returned too many elements",
    )
    .await;

    let err = client(&base)
        .generate_report(&ScanRequest::icao("EGLL", 40.0, 0.0))
        .await
        .unwrap_err();

    assert_eq!(err.failure_kind(), Some(FailureKind::QueryTooLarge));
}

#[tokio::test]
async fn test_unreadable_body_classified() {
    let router = Router::new().route(
        "/generate-report",
        post(|| async { (StatusCode::OK, "<html>maintenance</html>") }),
    );
    let base = spawn_mock_backend(router).await;

    let err = client(&base)
        .generate_report(&ScanRequest::icao("EGLL", 13.0, 5000.0))
        .await
        .unwrap_err();

    assert_eq!(err.failure_kind(), Some(FailureKind::InvalidResponse));
}

#[tokio::test]
async fn test_connection_refused_classified() {
    // Bind and drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}", addr))
        .generate_report(&ScanRequest::icao("EGLL", 13.0, 5000.0))
        .await
        .unwrap_err();

    assert_eq!(err.failure_kind(), Some(FailureKind::Transport));
}

#[tokio::test]
async fn test_out_of_range_center_rejected() {
    let router = Router::new().route(
        "/generate-report",
        post(|| async {
            let mut body = response_json(ten_features());
            body["airport_info"] = json!({ "name": "Nowhere", "lat": 451.0, "lon": -999.0 });
            (StatusCode::OK, Json(body))
        }),
    );
    let base = spawn_mock_backend(router).await;

    let err = client(&base)
        .generate_report(&ScanRequest::icao("EGLL", 13.0, 5000.0))
        .await
        .unwrap_err();

    assert_eq!(err.failure_kind(), Some(FailureKind::InvalidResponse));
}

#[tokio::test]
async fn test_out_of_range_center_keeps_previous_result() {
    let router = Router::new()
        .route(
            "/generate-report",
            post(|| async { (StatusCode::OK, Json(response_json(ten_features()))) }),
        )
        .route(
            "/broken-report",
            post(|| async {
                let mut body = response_json(ten_features());
                body["airport_info"]["lat"] = json!(91.0);
                (StatusCode::OK, Json(body))
            }),
        );
    let base = spawn_mock_backend(router).await;
    let broken =
        HazardClient::new(format!("{}/broken-report", base), Duration::from_secs(5)).unwrap();

    let mut session = ReportSession::new();
    session
        .start_scan(&client(&base), ScanRequest::icao("EGLL", 13.0, 5000.0))
        .await
        .unwrap();

    let err = session
        .start_scan(&broken, ScanRequest::icao("KJFK", 13.0, 5000.0))
        .await
        .unwrap_err();

    assert_eq!(err.failure_kind(), Some(FailureKind::InvalidResponse));
    assert_eq!(session.state(), SessionState::Failed);
    let previous = session.result().unwrap();
    assert_eq!(previous.request.location_token(), "EGLL");
    assert!(previous.center.center().is_valid());
}

#[tokio::test]
async fn test_missing_export_classified() {
    let router = Router::new().route(
        "/generate-report",
        post(|| async {
            let mut body = response_json(ten_features());
            body.as_object_mut().unwrap().remove("kml_string");
            (StatusCode::OK, Json(body))
        }),
    );
    let base = spawn_mock_backend(router).await;

    let err = client(&base)
        .generate_report(&ScanRequest::icao("EGLL", 13.0, 5000.0))
        .await
        .unwrap_err();

    assert_eq!(err.failure_kind(), Some(FailureKind::InvalidResponse));
}
