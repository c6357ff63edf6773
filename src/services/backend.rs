// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for the hazard-detection backend.
//!
//! Sends one `POST` per scan and decodes the report. Failures are
//! classified for the status banner; nothing is retried here, since a
//! retry is the operator resubmitting the form.

use crate::config::Config;
use crate::error::{FailureKind, ScanError};
use crate::models::{ReportResponse, ScanRequest};
use serde::Deserialize;
use std::time::Duration;

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Hazard backend client.
#[derive(Clone)]
pub struct HazardClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HazardClient {
    /// Create a client for the given report endpoint.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ScanError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScanError::network(None, format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Create a client from application configuration.
    pub fn from_config(config: &Config) -> Result<Self, ScanError> {
        Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request a hazard report.
    pub async fn generate_report(
        &self,
        request: &ScanRequest,
    ) -> Result<ReportResponse, ScanError> {
        tracing::info!(
            endpoint = %self.endpoint,
            mode = ?request.mode,
            location = %request.location_token(),
            radius_km = request.radius_km,
            "Requesting hazard report"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        self.check_response_json(response).await
    }

    /// Check response status and parse the report body.
    async fn check_response_json(
        &self,
        response: reqwest::Response,
    ) -> Result<ReportResponse, ScanError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(parsed) => format!("HTTP {}: {}", status.as_u16(), parsed.error),
                Err(_) if body.trim().is_empty() => format!("HTTP {}", status),
                Err(_) => format!("HTTP {}: {}", status.as_u16(), body.trim()),
            };

            let err = ScanError::network(Some(status.as_u16()), message);
            tracing::warn!(
                error = %err,
                kind = ?err.failure_kind(),
                "Hazard backend returned an error"
            );
            return Err(err);
        }

        let body = response.bytes().await.map_err(transport_error)?;
        let report: ReportResponse =
            serde_json::from_slice(&body).map_err(|e| ScanError::Network {
                kind: FailureKind::InvalidResponse,
                message: format!("Failed to parse report: {}", e),
            })?;

        if let Err(err) = report.check() {
            tracing::warn!(error = %err, "Hazard backend returned an unusable report");
            return Err(err);
        }

        Ok(report)
    }
}

fn transport_error(e: reqwest::Error) -> ScanError {
    let err = if e.is_timeout() {
        ScanError::Network {
            kind: FailureKind::Timeout,
            message: format!("Request timed out: {}", e),
        }
    } else {
        ScanError::Network {
            kind: FailureKind::Transport,
            message: e.to_string(),
        }
    };
    tracing::warn!(error = %err, "Hazard backend request failed");
    err
}
