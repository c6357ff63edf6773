// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard statistics over the active feature subset.
//!
//! Always rebuilt from scratch from the subset being displayed; there is no
//! incremental update path, so the dashboard cannot drift from the map.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Category, NormalizedFeature, RiskBucket};

/// One value per hazard category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PerCategory<T> {
    pub water: T,
    pub veg: T,
    pub waste: T,
    pub other: T,
}

impl<T> PerCategory<T> {
    pub fn get(&self, category: Category) -> &T {
        match category {
            Category::Water => &self.water,
            Category::Veg => &self.veg,
            Category::Waste => &self.waste,
            Category::Other => &self.other,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut T {
        match category {
            Category::Water => &mut self.water,
            Category::Veg => &mut self.veg,
            Category::Waste => &mut self.waste,
            Category::Other => &mut self.other,
        }
    }

    /// Values in `Category::ALL` order, paired with their category.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Feature count per risk bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RiskBucketCounts {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl RiskBucketCounts {
    pub fn get(&self, bucket: RiskBucket) -> u32 {
        match bucket {
            RiskBucket::High => self.high,
            RiskBucket::Medium => self.medium,
            RiskBucket::Low => self.low,
        }
    }

    fn increment(&mut self, bucket: RiskBucket) {
        match bucket {
            RiskBucket::High => self.high += 1,
            RiskBucket::Medium => self.medium += 1,
            RiskBucket::Low => self.low += 1,
        }
    }
}

/// Aggregate statistics for the dashboard and its charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AggregateStats {
    pub total_count: u32,
    pub total_area_sq_m: f64,

    // ─── By Category ─────────────────────────────────────────────
    /// Feature count per category (for the pie chart)
    pub by_category: PerCategory<u32>,
    /// Total area per category (square meters)
    pub area_by_category: PerCategory<f64>,

    // ─── By Risk ─────────────────────────────────────────────────
    pub by_risk_bucket: RiskBucketCounts,
}

impl AggregateStats {
    /// Compute statistics over a feature subset in a single pass.
    ///
    /// Missing area counts as zero and a missing risk score as the default
    /// (Low); neither is an error.
    pub fn from_features<'a, I>(features: I) -> Self
    where
        I: IntoIterator<Item = &'a NormalizedFeature>,
    {
        let mut stats = Self::default();

        for feature in features {
            let area = feature.area_sq_m();

            stats.total_count += 1;
            stats.total_area_sq_m += area;

            *stats.by_category.get_mut(feature.category) += 1;
            *stats.area_by_category.get_mut(feature.category) += area;

            stats.by_risk_bucket.increment(feature.risk_bucket());
        }

        stats
    }
}

/// Aggregate a feature subset. See [`AggregateStats::from_features`].
pub fn aggregate<'a, I>(subset: I) -> AggregateStats
where
    I: IntoIterator<Item = &'a NormalizedFeature>,
{
    AggregateStats::from_features(subset)
}
