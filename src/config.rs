// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Hosted hazard backend endpoint.
pub const DEFAULT_API_URL: &str = "https://hazard-map-backend.onrender.com/generate-report";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Full URL of the backend's report endpoint
    pub api_url: String,
    /// Radius used when the form leaves it blank (km)
    pub default_radius_km: f64,
    /// Minimum feature area used when the form leaves it blank (m²)
    pub default_min_area_sq_m: f64,
    /// Backend request timeout; scans typically take ~45 s
    pub request_timeout_secs: u64,
    /// Directory the CLI writes exports into
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            default_radius_km: 13.0,
            default_min_area_sq_m: 5000.0,
            request_timeout_secs: 120,
            export_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; unset values keep the defaults, but a
    /// value that is set and fails to parse is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        Ok(Self {
            api_url: env::var("HAZARD_API_URL").unwrap_or(defaults.api_url),
            default_radius_km: parse_var("HAZARD_DEFAULT_RADIUS_KM", defaults.default_radius_km)?,
            default_min_area_sq_m: parse_var(
                "HAZARD_DEFAULT_MIN_AREA_SQ_M",
                defaults.default_min_area_sq_m,
            )?,
            request_timeout_secs: parse_var(
                "HAZARD_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            export_dir: env::var("HAZARD_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, value)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
