// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Scan request/response wire types and the accepted scan result.

use crate::config::Config;
use crate::error::{FailureKind, ScanError};
use crate::models::feature::NormalizedFeature;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Finite and within the lat/lon ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// The analysis center reported by the backend (the ARP for airport scans).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportInfo {
    #[serde(default)]
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl AirportInfo {
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

/// How the scan target is identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestMode {
    Icao,
    Coords,
}

/// Body of the `POST` sent to the hazard backend.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct ScanRequest {
    pub mode: RequestMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(equal = 4, message = "ICAO must be 4 chars"))]
    pub icao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = -90.0, max = 90.0, message = "latitude out of range"))]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = -180.0, max = 180.0, message = "longitude out of range"))]
    pub lon: Option<f64>,
    #[validate(range(exclusive_min = 0.0, message = "radius must be positive"))]
    pub radius_km: f64,
    #[validate(range(min = 0.0, message = "minimum area cannot be negative"))]
    pub min_area_sq_m: f64,
}

impl ScanRequest {
    /// Scan around an airport. The code is upper-cased.
    pub fn icao(code: &str, radius_km: f64, min_area_sq_m: f64) -> Self {
        Self {
            mode: RequestMode::Icao,
            icao: Some(code.trim().to_uppercase()),
            lat: None,
            lon: None,
            radius_km,
            min_area_sq_m,
        }
    }

    /// Scan around raw coordinates.
    pub fn coords(lat: f64, lon: f64, radius_km: f64, min_area_sq_m: f64) -> Self {
        Self {
            mode: RequestMode::Coords,
            icao: None,
            lat: Some(lat),
            lon: Some(lon),
            radius_km,
            min_area_sq_m,
        }
    }

    /// Validate before any network call.
    pub fn check(&self) -> Result<(), ScanError> {
        let numbers = [Some(self.radius_km), Some(self.min_area_sq_m), self.lat, self.lon];
        if numbers.iter().flatten().any(|v| !v.is_finite()) {
            return Err(ScanError::Validation(
                "numeric fields must be finite".to_string(),
            ));
        }

        self.validate()
            .map_err(|e| ScanError::Validation(e.to_string()))?;

        match self.mode {
            RequestMode::Icao if self.icao.is_none() => Err(ScanError::Validation(
                "ICAO mode requires an airport code".to_string(),
            )),
            RequestMode::Coords if self.lat.is_none() || self.lon.is_none() => Err(
                ScanError::Validation("coordinate mode requires lat and lon".to_string()),
            ),
            _ => Ok(()),
        }
    }

    /// Location token used in export filenames.
    ///
    /// Uppercase ICAO code, or `Custom_<lat>_<lon>` for coordinate scans.
    pub fn location_token(&self) -> String {
        match (self.mode, &self.icao, self.lat, self.lon) {
            (RequestMode::Icao, Some(code), _, _) => code.to_uppercase(),
            (_, _, Some(lat), Some(lon)) => format!("Custom_{}_{}", lat, lon),
            _ => "Custom_Location".to_string(),
        }
    }
}

/// Raw text inputs from the scan form, before parsing.
#[derive(Debug, Clone)]
pub struct ScanForm {
    pub mode: RequestMode,
    pub icao: String,
    pub lat: String,
    pub lon: String,
    pub radius_km: String,
    pub min_area_sq_m: String,
}

impl ScanForm {
    /// Parse the form into a validated request.
    ///
    /// Blank or unparseable radius and minimum area fall back to the
    /// configured defaults. Coordinates must parse.
    pub fn into_request(self, config: &Config) -> Result<ScanRequest, ScanError> {
        let radius_km = parse_or(&self.radius_km, config.default_radius_km);
        let min_area_sq_m = parse_or(&self.min_area_sq_m, config.default_min_area_sq_m);

        let request = match self.mode {
            RequestMode::Icao => ScanRequest::icao(&self.icao, radius_km, min_area_sq_m),
            RequestMode::Coords => {
                let lat = parse_coordinate(&self.lat, "latitude")?;
                let lon = parse_coordinate(&self.lon, "longitude")?;
                ScanRequest::coords(lat, lon, radius_km, min_area_sq_m)
            }
        };

        request.check()?;
        Ok(request)
    }
}

/// Parse a positive number, falling back to `default` for blank, zero or junk input.
fn parse_or(text: &str, default: f64) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v != 0.0)
        .unwrap_or(default)
}

fn parse_coordinate(text: &str, field: &str) -> Result<f64, ScanError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ScanError::Validation(format!("{} must be a number", field)))
}

/// Successful backend response.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportResponse {
    #[serde(default)]
    pub feature_count: usize,
    pub airport_info: AirportInfo,
    pub map_geojson: geojson::FeatureCollection,
    pub kml_string: String,
    pub csv_string: String,
}

impl ReportResponse {
    /// Reject a report whose analysis center is not a valid coordinate.
    pub fn check(&self) -> Result<(), ScanError> {
        let center = self.airport_info.center();
        if center.is_valid() {
            return Ok(());
        }

        Err(ScanError::Network {
            kind: FailureKind::InvalidResponse,
            message: format!(
                "Report center out of range: lat {} lon {}",
                center.lat, center.lon
            ),
        })
    }
}

/// One accepted scan: normalized features plus the backend's export payloads.
///
/// Replaced wholesale by the next successful scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    /// The request that produced this result (drives export filenames)
    pub request: ScanRequest,
    pub features: Vec<NormalizedFeature>,
    pub center: AirportInfo,
    pub radius_km: f64,
    pub kml_export: String,
    pub csv_export: String,
    /// Feature count as reported by the backend
    pub feature_count: usize,
    /// Features whose geometry could not be used
    pub skipped: usize,
}
