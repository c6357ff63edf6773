// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date formatting.

use chrono::{NaiveDate, Utc};

/// Today's date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Format a date as `YYYY-MM-DD` for export filenames.
pub fn format_export_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
