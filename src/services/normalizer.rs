// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Feature normalization at ingestion.
//!
//! Fills in `centroid` and `distance_km` for every backend feature exactly
//! once. Server-computed values win over local recomputation; a feature
//! with an unusable geometry degrades to the scan center instead of failing
//! the whole batch.

use crate::models::{
    Coordinate, NormalizedFeature, RawFeature, ReportResponse, ScanRequest, ScanResult,
};
use crate::services::geometry::{self, GeometryError};

/// Normalize a single feature against the scan center.
///
/// Pure: the same input always yields the same output. The returned
/// feature has `index` 0; batch ingestion assigns real positions.
pub fn normalize(raw: RawFeature, center: Coordinate) -> NormalizedFeature {
    let supplied_distance = raw.distance_km.filter(|d| d.is_finite() && *d >= 0.0);
    let supplied_centroid = raw.centroid.filter(Coordinate::is_valid);

    let computed = match supplied_centroid {
        Some(c) => Ok(c),
        None => raw
            .geometry
            .as_ref()
            .ok_or(GeometryError::Empty)
            .and_then(geometry::centroid),
    };

    let (centroid, distance_km, degraded) = match computed {
        Ok(centroid) => {
            let distance =
                supplied_distance.unwrap_or_else(|| geometry::distance_km(centroid, center));
            (centroid, distance, false)
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                custom_type = %raw.custom_type,
                name = raw.name.as_deref().unwrap_or(""),
                "Feature geometry unusable, substituting scan center"
            );
            (center, 0.0, true)
        }
    };

    NormalizedFeature {
        index: 0,
        category: raw.category(),
        feature: raw,
        centroid,
        distance_km,
        degraded,
    }
}

/// Output of normalizing one backend batch.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBatch {
    pub features: Vec<NormalizedFeature>,
    /// Number of degraded features
    pub skipped: usize,
}

/// Normalize every feature of a batch, assigning ingestion order.
pub fn normalize_batch<I>(raw_features: I, center: Coordinate) -> NormalizedBatch
where
    I: IntoIterator<Item = RawFeature>,
{
    let features: Vec<NormalizedFeature> = raw_features
        .into_iter()
        .enumerate()
        .map(|(index, raw)| NormalizedFeature {
            index,
            ..normalize(raw, center)
        })
        .collect();

    let skipped = features.iter().filter(|f| f.degraded).count();

    NormalizedBatch { features, skipped }
}

/// Build a scan result from an accepted backend response.
pub fn ingest(request: ScanRequest, response: ReportResponse) -> ScanResult {
    let center = response.airport_info.center();
    let raw_features = response
        .map_geojson
        .features
        .iter()
        .map(RawFeature::from_geojson);

    let batch = normalize_batch(raw_features, center);

    tracing::info!(
        center = %response.airport_info.name,
        features = batch.features.len(),
        reported = response.feature_count,
        skipped = batch.skipped,
        "Ingested scan result"
    );

    ScanResult {
        radius_km: request.radius_km,
        request,
        features: batch.features,
        center: response.airport_info,
        kml_export: response.kml_string,
        csv_export: response.csv_string,
        feature_count: response.feature_count,
        skipped: batch.skipped,
    }
}
