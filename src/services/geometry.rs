// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Great-circle distance and representative points for hazard geometries.

use crate::models::Coordinate;
use geo::{Geometry, LineString};
use geojson::Value;

/// Mean Earth radius used for all distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates in kilometers.
///
/// The haversine term is clamped to `[0, 1]` so rounding overshoot near
/// antipodal points cannot push `asin` out of its domain.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Representative point of a GeoJSON geometry.
///
/// - `Point`: the point itself.
/// - `Polygon`: arithmetic mean of the exterior ring's vertices (the closing
///   vertex is not counted twice). This is a vertex average, not the area
///   centroid, and can fall outside strongly non-convex shapes.
/// - `MultiPolygon`: the same, over the first polygon only.
///
/// Any other geometry type is `UnsupportedGeometry`.
pub fn centroid(value: &Value) -> Result<Coordinate, GeometryError> {
    let type_name = match value {
        Value::Point(_) => "Point",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::MultiPoint(_) => return Err(GeometryError::UnsupportedGeometry("MultiPoint")),
        Value::LineString(_) => return Err(GeometryError::UnsupportedGeometry("LineString")),
        Value::MultiLineString(_) => {
            return Err(GeometryError::UnsupportedGeometry("MultiLineString"))
        }
        Value::GeometryCollection(_) => {
            return Err(GeometryError::UnsupportedGeometry("GeometryCollection"))
        }
    };

    if !positions_well_formed(value) {
        return Err(GeometryError::Malformed(type_name));
    }

    let geometry: Geometry<f64> = value
        .clone()
        .try_into()
        .map_err(|_: geojson::Error| GeometryError::Malformed(type_name))?;

    match geometry {
        Geometry::Point(point) => Ok(Coordinate::new(point.y(), point.x())),
        Geometry::Polygon(polygon) => ring_vertex_mean(polygon.exterior()),
        Geometry::MultiPolygon(multi) => multi
            .0
            .first()
            .ok_or(GeometryError::Empty)
            .and_then(|polygon| ring_vertex_mean(polygon.exterior())),
        _ => Err(GeometryError::UnsupportedGeometry(type_name)),
    }
}

/// Mean of a ring's distinct vertices.
fn ring_vertex_mean(ring: &LineString<f64>) -> Result<Coordinate, GeometryError> {
    let mut coords = ring.0.as_slice();
    if coords.len() > 1 && ring.is_closed() {
        coords = &coords[..coords.len() - 1];
    }
    if coords.is_empty() {
        return Err(GeometryError::Empty);
    }

    let n = coords.len() as f64;
    let (sum_x, sum_y) = coords
        .iter()
        .fold((0.0, 0.0), |(x, y), c| (x + c.x, y + c.y));

    Ok(Coordinate::new(sum_y / n, sum_x / n))
}

/// Every polygon has a ring and every position has at least lon and lat, all finite.
fn positions_well_formed(value: &Value) -> bool {
    fn position_ok(position: &[f64]) -> bool {
        position.len() >= 2 && position.iter().all(|v| v.is_finite())
    }

    match value {
        Value::Point(position) => position_ok(position),
        Value::Polygon(rings) => {
            !rings.is_empty() && rings.iter().flatten().all(|p| position_ok(p))
        }
        Value::MultiPolygon(polygons) => {
            polygons.iter().all(|rings| !rings.is_empty())
                && polygons.iter().flatten().flatten().all(|p| position_ok(p))
        }
        _ => false,
    }
}

/// Errors from geometry operations. All of them are per-feature and
/// recoverable: the caller substitutes the scan center.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("Unsupported geometry type {0} (expected Point, Polygon or MultiPolygon)")]
    UnsupportedGeometry(&'static str),

    #[error("Malformed {0} coordinates")]
    Malformed(&'static str),

    #[error("Geometry has no vertices")]
    Empty,
}
