// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Scan error types with user-facing classification.

use crate::session::SessionState;
use serde::Serialize;

/// Heuristic category of a failed backend call, used to pick the message
/// shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Gateway timeout or the backend's own query timed out
    Timeout,
    /// The map query returned too many elements or was aborted
    QueryTooLarge,
    /// Unknown airport code
    NotFound,
    /// Any other non-2xx response
    Server,
    /// Connection failure before a response arrived
    Transport,
    /// 2xx response whose body could not be decoded
    InvalidResponse,
}

impl FailureKind {
    /// Classify a failure from its HTTP status (if any) and message text.
    pub fn classify(status: Option<u16>, message: &str) -> Self {
        let lower = message.to_ascii_lowercase();

        if status == Some(504)
            || lower.contains("504")
            || lower.contains("timeout")
            || lower.contains("timed out")
        {
            FailureKind::Timeout
        } else if lower.contains("element") || lower.contains("abort") {
            FailureKind::QueryTooLarge
        } else if status == Some(404) || lower.contains("not found") {
            FailureKind::NotFound
        } else if status.is_some() {
            FailureKind::Server
        } else {
            FailureKind::Transport
        }
    }

    /// Hint displayed next to the backend's verbatim message.
    pub fn hint(self) -> &'static str {
        match self {
            FailureKind::Timeout => {
                "The scan timed out. Try a smaller radius or a larger minimum area."
            }
            FailureKind::QueryTooLarge => {
                "Too many map elements in this area. Reduce the radius or raise the minimum area."
            }
            FailureKind::NotFound => "Airport not found. Check the ICAO code.",
            FailureKind::Server => "The hazard service reported an error.",
            FailureKind::Transport => "Could not reach the hazard service.",
            FailureKind::InvalidResponse => "The hazard service returned an unreadable response.",
        }
    }
}

/// Errors surfaced by the report session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScanError {
    /// Rejected before any network call; session state is unchanged.
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Hazard service error: {message}")]
    Network { kind: FailureKind, message: String },

    #[error("A scan is already in progress")]
    ScanInProgress,

    #[error("Cannot {operation} while the session is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
}

impl ScanError {
    /// Build a network error, classifying the message.
    pub fn network(status: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        ScanError::Network {
            kind: FailureKind::classify(status, &message),
            message,
        }
    }

    /// Failure category for network errors.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ScanError::Network { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Full text for the status banner: verbatim error plus the category hint.
    pub fn user_message(&self) -> String {
        match self {
            ScanError::Network { kind, .. } => format!("Error: {} {}", self, kind.hint()),
            _ => format!("Error: {}", self),
        }
    }
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_status() {
        assert_eq!(FailureKind::classify(Some(504), "Gateway"), FailureKind::Timeout);
        assert_eq!(FailureKind::classify(Some(404), "missing"), FailureKind::NotFound);
        assert_eq!(FailureKind::classify(Some(500), "boom"), FailureKind::Server);
        assert_eq!(FailureKind::classify(None, "connection refused"), FailureKind::Transport);
    }

    #[test]
    fn test_user_message_includes_hint() {
        let err = ScanError::network(Some(500), "Airport ZZZZ not found");
        assert_eq!(err.failure_kind(), Some(FailureKind::NotFound));
        assert!(err.user_message().contains("Airport ZZZZ not found"));
        assert!(err.user_message().contains("Check the ICAO code"));
    }
}
