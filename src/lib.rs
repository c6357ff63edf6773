// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Hazard-Scan: explore wildlife-attracting hazards around airports
//!
//! This crate is the client-side engine for airport hazard scans. It sends
//! scan requests to the hazard backend, normalizes the returned GeoJSON
//! features, and keeps the map layers, dashboard statistics and ranked
//! hazard list consistent with the operator's category filter.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod time_utils;

pub use error::{FailureKind, ScanError};
pub use session::{ExportFile, ExportFormat, ReportSession, ScanOutcome, ScanTicket, SessionState};
