// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Hazard feature model: categories, risk buckets, raw and normalized features.
//!
//! Missing numeric properties are replaced by the named defaults below so that
//! every consumer (aggregator, styler, ranked list) agrees on the same value.

use crate::models::scan::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Risk score assumed when the backend omits `risk_score`.
pub const DEFAULT_RISK_SCORE: i64 = 1;
/// Area assumed when the backend omits `area_sq_m`.
pub const DEFAULT_AREA_SQ_M: f64 = 0.0;
/// Lowest score in the High bucket.
pub const HIGH_RISK_MIN_SCORE: i64 = 7;
/// Lowest score in the Medium bucket.
pub const MEDIUM_RISK_MIN_SCORE: i64 = 4;

/// Hazard category as tagged by the backend in `custom_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Category {
    Water,
    Veg,
    Waste,
    Other,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 4] = [
        Category::Water,
        Category::Veg,
        Category::Waste,
        Category::Other,
    ];

    /// Classify a backend `custom_type`. The tag must match a wire key
    /// exactly; anything else folds into `Other`.
    pub fn from_custom_type(custom_type: &str) -> Self {
        Category::ALL
            .into_iter()
            .find(|c| c.key() == custom_type)
            .unwrap_or(Category::Other)
    }

    /// Wire key (`water`, `veg`, `waste`, `other`).
    pub fn key(self) -> &'static str {
        match self {
            Category::Water => "water",
            Category::Veg => "veg",
            Category::Waste => "waste",
            Category::Other => "other",
        }
    }

    /// Human-readable label used in popups and the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            Category::Water => "Water Body",
            Category::Veg => "Vegetation",
            Category::Waste => "Ind./Waste",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Lenient parse for operator input: surrounding whitespace and case are ignored.
impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "water" => Ok(Category::Water),
            "veg" => Ok(Category::Veg),
            "waste" => Ok(Category::Waste),
            "other" => Ok(Category::Other),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Returned when a strict category parse fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category '{0}' (expected water, veg, waste or other)")]
pub struct UnknownCategory(pub String);

/// Risk bucket derived from a feature's risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum RiskBucket {
    High,
    Medium,
    Low,
}

impl RiskBucket {
    /// Bucket a score. Boundaries are inclusive at the lower edge.
    pub fn from_score(score: i64) -> Self {
        if score >= HIGH_RISK_MIN_SCORE {
            RiskBucket::High
        } else if score >= MEDIUM_RISK_MIN_SCORE {
            RiskBucket::Medium
        } else {
            RiskBucket::Low
        }
    }
}

/// A feature as returned by the backend, with its properties pulled out.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFeature {
    /// GeoJSON geometry in lon/lat order, if the feature has one
    pub geometry: Option<geojson::Value>,
    /// Backend category tag (`water`, `veg`, `waste`, `other`, or anything else)
    pub custom_type: String,
    pub area_sq_m: Option<f64>,
    pub risk_score: Option<i64>,
    pub name: Option<String>,
    /// Server-computed distance to the scan center, if supplied
    pub distance_km: Option<f64>,
    /// Server-computed representative point, if supplied
    pub centroid: Option<Coordinate>,
}

impl RawFeature {
    /// Extract a raw feature from a GeoJSON feature.
    ///
    /// Reads `custom_type`, `area_sq_m`, `risk_score`, `name`, `distance_km`
    /// and `centroid_lat`/`centroid_lon` from the properties bag. Values of
    /// the wrong JSON type are treated as absent.
    pub fn from_geojson(feature: &geojson::Feature) -> Self {
        let custom_type = feature
            .property("custom_type")
            .and_then(|v| v.as_str())
            .unwrap_or("other")
            .to_string();

        let number = |key: &str| {
            feature
                .property(key)
                .and_then(|v| v.as_f64())
                .filter(|v| v.is_finite())
        };

        let centroid = match (number("centroid_lat"), number("centroid_lon")) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        };

        Self {
            geometry: feature.geometry.as_ref().map(|g| g.value.clone()),
            custom_type,
            area_sq_m: number("area_sq_m"),
            risk_score: number("risk_score").map(|v| v.round() as i64),
            name: feature
                .property("name")
                .and_then(|v| v.as_str())
                .map(String::from),
            distance_km: number("distance_km"),
            centroid,
        }
    }

    pub fn category(&self) -> Category {
        Category::from_custom_type(&self.custom_type)
    }

    /// Area with the missing-value default applied.
    pub fn area_or_default(&self) -> f64 {
        self.area_sq_m.unwrap_or(DEFAULT_AREA_SQ_M)
    }

    /// Risk score with the missing-value default applied.
    pub fn risk_or_default(&self) -> i64 {
        self.risk_score.unwrap_or(DEFAULT_RISK_SCORE)
    }
}

/// A raw feature plus the geometric attributes derived at ingestion.
///
/// Built once by the normalizer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFeature {
    /// Position in the backend's feature order (assigned per batch)
    pub index: usize,
    pub feature: RawFeature,
    pub category: Category,
    pub centroid: Coordinate,
    pub distance_km: f64,
    /// True when the geometry could not be used and the scan center was substituted
    pub degraded: bool,
}

impl NormalizedFeature {
    pub fn area_sq_m(&self) -> f64 {
        self.feature.area_or_default()
    }

    pub fn risk_score(&self) -> i64 {
        self.feature.risk_or_default()
    }

    pub fn risk_bucket(&self) -> RiskBucket {
        RiskBucket::from_score(self.risk_score())
    }

    pub fn name(&self) -> Option<&str> {
        self.feature.name.as_deref()
    }
}

impl From<NormalizedFeature> for RawFeature {
    /// Carry the derived attributes back as if the backend had supplied them.
    ///
    /// A degraded feature's center substitute is not a real centroid, so it
    /// is dropped and the feature degrades again when re-normalized.
    fn from(normalized: NormalizedFeature) -> Self {
        if normalized.degraded {
            return RawFeature {
                distance_km: None,
                centroid: None,
                ..normalized.feature
            };
        }

        RawFeature {
            distance_km: Some(normalized.distance_km),
            centroid: Some(normalized.centroid),
            ..normalized.feature
        }
    }
}
