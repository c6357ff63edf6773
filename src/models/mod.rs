// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod feature;
pub mod filter;
pub mod scan;
pub mod stats;

pub use feature::{
    Category, NormalizedFeature, RawFeature, RiskBucket, DEFAULT_AREA_SQ_M, DEFAULT_RISK_SCORE,
};
pub use filter::FilterState;
pub use scan::{
    AirportInfo, Coordinate, ReportResponse, RequestMode, ScanForm, ScanRequest, ScanResult,
};
pub use stats::{aggregate, AggregateStats, PerCategory, RiskBucketCounts};
