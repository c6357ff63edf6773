// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Report session: the single owner of scan state.
//!
//! ```text
//! Idle ──start──▶ Fetching ──ok──▶ Ready ──start──▶ Fetching
//!                    │                                  │
//!                    └──err──▶ Failed ──start──▶ Fetching
//! reset() from any state ──▶ Idle
//! ```
//!
//! A scan is split into [`ReportSession::begin_scan`] and
//! [`ReportSession::complete_scan`] so UI glue can release the session
//! while the request is in flight. Every scan gets a generation number;
//! a response whose generation no longer matches the in-flight scan (the
//! session was reset, or a newer scan started) is discarded.

use crate::error::{Result, ScanError};
use crate::models::{Category, FilterState, ReportResponse, ScanRequest, ScanResult};
use crate::services::normalizer::ingest;
use crate::services::views::{recompute, ViewSet};
use crate::services::HazardClient;
use crate::time_utils::{format_export_date, today_utc};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Lifecycle state of the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SessionState {
    #[default]
    Idle,
    Fetching,
    Ready,
    Failed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Fetching => "fetching",
            SessionState::Ready => "ready",
            SessionState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Handle for one in-flight scan, returned by `begin_scan`.
#[derive(Debug)]
pub struct ScanTicket {
    generation: u64,
    request: ScanRequest,
}

impl ScanTicket {
    /// The validated request to send to the backend.
    pub fn request(&self) -> &ScanRequest {
        &self.request
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a completed scan.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// The response became the current scan result.
    Applied {
        /// Backend-reported count, for the status line
        feature_count: usize,
        /// Features degraded during normalization
        skipped: usize,
        views: ViewSet,
    },
    /// The response belonged to a superseded scan and was dropped.
    Stale,
}

/// Export payload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Kml,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Kml => "kml",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Kml => "application/vnd.google-earth.kml+xml",
            ExportFormat::Csv => "text/csv",
        }
    }
}

/// A named export ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

impl ExportFile {
    /// Write the export into `dir`, returning the full path.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.content)?;
        Ok(path)
    }
}

/// Holds the current scan result and filter, and enforces state transitions.
#[derive(Debug, Default)]
pub struct ReportSession {
    state: SessionState,
    generation: u64,
    result: Option<ScanResult>,
    filter: FilterState,
    last_error: Option<ScanError>,
}

impl ReportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current scan result. Stays available while a newer scan is fetching
    /// or after it failed, until a scan succeeds or the session is reset.
    pub fn result(&self) -> Option<&ScanResult> {
        self.result.as_ref()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Error from the most recent failed scan, cleared by the next scan or reset.
    pub fn last_error(&self) -> Option<&ScanError> {
        self.last_error.as_ref()
    }

    /// Views for the current result and filter, recomputed on each call.
    pub fn views(&self) -> Option<ViewSet> {
        self.result
            .as_ref()
            .map(|result| recompute(result, &self.filter))
    }

    /// Validate a request and enter `Fetching`.
    ///
    /// Validation failures leave the state untouched. A second scan while one
    /// is in flight is rejected with `ScanInProgress`.
    pub fn begin_scan(&mut self, request: ScanRequest) -> Result<ScanTicket> {
        if self.state() == SessionState::Fetching {
            tracing::warn!(generation = self.generation, "Scan already in flight");
            return Err(ScanError::ScanInProgress);
        }

        request.check()?;

        self.generation += 1;
        self.state = SessionState::Fetching;
        self.last_error = None;

        tracing::info!(
            generation = self.generation,
            location = %request.location_token(),
            "Scan started"
        );

        Ok(ScanTicket {
            generation: self.generation,
            request,
        })
    }

    /// Apply the backend's answer for a ticket.
    ///
    /// On success the response is normalized, replaces the previous result,
    /// and the filter resets to all categories. On failure the session enters
    /// `Failed` and the error is returned; the previous result is kept.
    /// Responses for superseded tickets return `ScanOutcome::Stale` and
    /// change nothing.
    pub fn complete_scan(
        &mut self,
        ticket: ScanTicket,
        response: std::result::Result<ReportResponse, ScanError>,
    ) -> Result<ScanOutcome> {
        if self.state() != SessionState::Fetching || ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                state = %self.state(),
                "Discarding stale scan response"
            );
            return Ok(ScanOutcome::Stale);
        }

        match response.and_then(|r| r.check().map(|()| r)) {
            Ok(response) => {
                let result = ingest(ticket.request, response);
                let feature_count = result.feature_count;
                let skipped = result.skipped;

                self.filter = FilterState::all();
                let views = recompute(&result, &self.filter);
                self.result = Some(result);
                self.state = SessionState::Ready;

                tracing::info!(
                    generation = ticket.generation,
                    feature_count,
                    skipped,
                    "Scan ready"
                );

                Ok(ScanOutcome::Applied {
                    feature_count,
                    skipped,
                    views,
                })
            }
            Err(err) => {
                tracing::warn!(generation = ticket.generation, error = %err, "Scan failed");
                self.state = SessionState::Failed;
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Run a complete scan against the backend.
    pub async fn start_scan(
        &mut self,
        client: &HazardClient,
        request: ScanRequest,
    ) -> Result<ScanOutcome> {
        let ticket = self.begin_scan(request)?;
        let response = client.generate_report(ticket.request()).await;
        self.complete_scan(ticket, response)
    }

    /// Flip one category and return the refreshed views.
    pub fn toggle_category(&mut self, category: Category) -> Result<ViewSet> {
        let result = match (self.state(), self.result.as_ref()) {
            (SessionState::Ready, Some(result)) => result,
            (state, _) => {
                return Err(ScanError::InvalidState {
                    operation: "toggle a category",
                    state,
                })
            }
        };

        let active = self.filter.toggle(category);
        tracing::debug!(category = %category, active, "Category toggled");

        Ok(recompute(result, &self.filter))
    }

    /// Discard the result and filter and return to `Idle`.
    ///
    /// An in-flight scan is not cancelled, but its response will be stale.
    pub fn reset(&mut self) {
        tracing::info!(state = %self.state(), "Session reset");
        self.state = SessionState::Idle;
        self.result = None;
        self.filter = FilterState::all();
        self.last_error = None;
    }

    /// KML export of the full scan, named for today's date.
    pub fn export_kml(&self) -> Result<ExportFile> {
        self.export(ExportFormat::Kml, today_utc())
    }

    /// CSV export of the full scan, named for today's date.
    pub fn export_csv(&self) -> Result<ExportFile> {
        self.export(ExportFormat::Csv, today_utc())
    }

    /// Backend-authored export for the whole scan, independent of the filter.
    ///
    /// Filename: `<DATE>_Scanned_Hazards_<LOCATION>.<ext>`.
    pub fn export(&self, format: ExportFormat, date: NaiveDate) -> Result<ExportFile> {
        let result = match (self.state(), self.result.as_ref()) {
            (SessionState::Ready, Some(result)) => result,
            (state, _) => {
                return Err(ScanError::InvalidState {
                    operation: "export",
                    state,
                })
            }
        };

        let content = match format {
            ExportFormat::Kml => result.kml_export.clone(),
            ExportFormat::Csv => result.csv_export.clone(),
        };

        Ok(ExportFile {
            filename: format!(
                "{}_Scanned_Hazards_{}.{}",
                format_export_date(date),
                result.request.location_token(),
                format.extension()
            ),
            mime_type: format.mime_type(),
            content,
        })
    }
}
