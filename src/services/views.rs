// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! View derivation: map layers, dashboard stats and the ranked list.
//!
//! All three views are produced together by [`recompute`] from the same
//! active subset, so they always describe the same features. Nothing here
//! is cached; callers recompute after every scan or filter change.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{
    aggregate, AggregateStats, Category, Coordinate, FilterState, NormalizedFeature, RiskBucket,
    ScanResult,
};
use crate::services::filter::select_active;

/// Popup/marker label for the scan center.
pub const CENTER_MARKER_LABEL: &str = "ARP";
/// Outline color of the scan radius circle.
pub const RADIUS_CIRCLE_COLOR: &str = "#EF4444";
/// Features scoring above this get a heavier outline.
pub const HEAVY_OUTLINE_ABOVE_SCORE: i64 = 7;

const FEATURE_WEIGHT: u32 = 1;
const HEAVY_FEATURE_WEIGHT: u32 = 3;
const RADIUS_CIRCLE_WEIGHT: u32 = 2;
const FEATURE_FILL_OPACITY: f64 = 0.6;
const KM_PER_DEGREE_LAT: f64 = 111.32;

/// Stroke and fill style for one shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ShapeStyle {
    pub color: &'static str,
    pub weight: u32,
    pub fill: bool,
    pub fill_opacity: f64,
}

/// Style for a feature shape, keyed by category and escalated by risk.
pub fn feature_style(category: Category, risk_score: i64) -> ShapeStyle {
    let color = match category {
        Category::Water => "#3B82F6",
        Category::Veg => "#10B981",
        Category::Waste => "#8B4513",
        Category::Other => "#6B7280",
    };

    let weight = if risk_score > HEAVY_OUTLINE_ABOVE_SCORE {
        HEAVY_FEATURE_WEIGHT
    } else {
        FEATURE_WEIGHT
    };

    ShapeStyle {
        color,
        weight,
        fill: true,
        fill_opacity: FEATURE_FILL_OPACITY,
    }
}

/// One drawable item handed to the map widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MapLayer {
    CenterMarker {
        position: Coordinate,
        label: &'static str,
        name: String,
    },
    RadiusCircle {
        center: Coordinate,
        radius_m: f64,
        style: ShapeStyle,
    },
    FeatureShape {
        feature_index: usize,
        category: Category,
        #[cfg_attr(feature = "binding-generation", ts(type = "unknown"))]
        geometry: Option<geojson::Value>,
        centroid: Coordinate,
        style: ShapeStyle,
        popup: String,
    },
}

/// Lat/lon box the map should fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Box enclosing a circle of `radius_km` around `center`.
    pub fn around(center: Coordinate, radius_km: f64) -> Self {
        let d_lat = radius_km / KM_PER_DEGREE_LAT;
        let km_per_degree_lon = KM_PER_DEGREE_LAT * center.lat.to_radians().cos();
        let d_lon = radius_km / km_per_degree_lon.max(1e-9);

        Self {
            south: (center.lat - d_lat).max(-90.0),
            west: (center.lon - d_lon).max(-180.0),
            north: (center.lat + d_lat).min(90.0),
            east: (center.lon + d_lon).min(180.0),
        }
    }

    /// Grow the box to include a point.
    pub fn include(&mut self, point: Coordinate) {
        self.south = self.south.min(point.lat);
        self.west = self.west.min(point.lon);
        self.north = self.north.max(point.lat);
        self.east = self.east.max(point.lon);
    }
}

/// One row of the ranked hazard list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RankedEntry {
    /// 1-based position in the list
    pub rank: usize,
    /// Ingestion index, matching `MapLayer::FeatureShape::feature_index`
    pub feature_index: usize,
    pub name: Option<String>,
    pub category: Category,
    pub risk_score: i64,
    pub risk_bucket: RiskBucket,
    pub area_sq_m: f64,
    pub distance_km: f64,
}

/// Everything the UI renders for one (scan result, filter) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ViewSet {
    pub layers: Vec<MapLayer>,
    pub bounds: Bounds,
    pub stats: AggregateStats,
    pub ranked: Vec<RankedEntry>,
}

/// Derive all views from the scan result and filter.
pub fn recompute(result: &ScanResult, filter: &FilterState) -> ViewSet {
    let active = select_active(&result.features, filter);
    let center = result.center.center();

    let stats = aggregate(active.iter().copied());

    let mut bounds = Bounds::around(center, result.radius_km);
    let mut layers = Vec::with_capacity(active.len() + 2);
    layers.push(MapLayer::CenterMarker {
        position: center,
        label: CENTER_MARKER_LABEL,
        name: result.center.name.clone(),
    });
    layers.push(MapLayer::RadiusCircle {
        center,
        radius_m: result.radius_km * 1000.0,
        style: ShapeStyle {
            color: RADIUS_CIRCLE_COLOR,
            weight: RADIUS_CIRCLE_WEIGHT,
            fill: false,
            fill_opacity: 0.0,
        },
    });
    for feature in &active {
        bounds.include(feature.centroid);
        layers.push(feature_layer(feature));
    }

    let ranked = rank(&active);

    tracing::debug!(
        active = active.len(),
        total = result.features.len(),
        "Recomputed views"
    );

    ViewSet {
        layers,
        bounds,
        stats,
        ranked,
    }
}

fn feature_layer(feature: &NormalizedFeature) -> MapLayer {
    MapLayer::FeatureShape {
        feature_index: feature.index,
        category: feature.category,
        geometry: feature.feature.geometry.clone(),
        centroid: feature.centroid,
        style: feature_style(feature.category, feature.risk_score()),
        popup: popup_text(feature),
    }
}

/// Order by risk score, highest first. The sort is stable, so equal scores
/// keep ingestion order.
fn rank(active: &[&NormalizedFeature]) -> Vec<RankedEntry> {
    let mut sorted = active.to_vec();
    sorted.sort_by(|a, b| b.risk_score().cmp(&a.risk_score()));

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, f)| RankedEntry {
            rank: i + 1,
            feature_index: f.index,
            name: f.name().map(String::from),
            category: f.category,
            risk_score: f.risk_score(),
            risk_bucket: f.risk_bucket(),
            area_sq_m: f.area_sq_m(),
            distance_km: f.distance_km,
        })
        .collect()
}

/// Popup HTML: category label and area in whole square meters.
pub fn popup_text(feature: &NormalizedFeature) -> String {
    format!(
        "<b>{}</b><br>Area: {} m²",
        feature.category.label(),
        format_thousands(feature.area_sq_m())
    )
}

/// Round to an integer and group digits with commas (`1234567.8` → `1,234,568`).
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
