// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - feature processing and backend access.

pub mod backend;
pub mod filter;
pub mod geometry;
pub mod normalizer;
pub mod views;

pub use backend::HazardClient;
pub use filter::select_active;
pub use geometry::{centroid, distance_km, GeometryError};
pub use normalizer::{ingest, normalize, normalize_batch, NormalizedBatch};
pub use views::{recompute, Bounds, MapLayer, RankedEntry, ShapeStyle, ViewSet};
