//! Error types for cbrowse.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error for fatal failures
//!   - [`ConfigError`] - Config file read/parse/validation failures
//!   - [`LoggingError`] - Tracing subscriber setup failures
//!   - `std::io::Error` - Terminal/TUI failures
//! - [`FetchError`] - The single recoverable failure kind: a page could not be fetched
//!
//! # Error Recovery Strategy
//!
//! Fetch errors are **non-fatal**: the pagination controller catches them, surfaces a
//! transient message, and leaves the result list and page cursor untouched so the user
//! can retry. Everything in [`AppError`] is fatal and propagates to `main`.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use thiserror::Error;

/// Message shown when a failure carries no server-provided message.
pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to fetch countries";

/// Top-level application error encompassing all fatal failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    ///
    /// **Recovery**: Print the error and exit before the TUI starts.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Log file could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or TUI rendering error.
    ///
    /// Raw mode, alternate screen or draw failures. Without a working terminal the
    /// TUI cannot function; the shell restores the terminal and exits.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failure to fetch one page of countries.
///
/// Every variant may carry a human-readable message. Only a message that came from
/// the server is shown to the user verbatim; otherwise the generic
/// [`FETCH_FALLBACK_MESSAGE`] is used (see [`FetchError::user_message`]).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-success status.
    ///
    /// `message` is the `message` field of the JSON error body, when present.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided message.
        message: Option<String>,
    },

    /// The request never produced a response (DNS, connect, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body was not a valid `{ data: [...] }` payload.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The fetch worker is gone; no further requests can be served.
    #[error("Fetch worker disconnected")]
    WorkerGone,
}

impl FetchError {
    /// Server-provided message, if the failure has one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            FetchError::Status { message, .. } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }

    /// Message to surface in the UI.
    pub fn user_message(&self) -> String {
        self.server_message()
            .unwrap_or(FETCH_FALLBACK_MESSAGE)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_with_message_surfaces_server_message() {
        let err = FetchError::Status {
            status: 429,
            message: Some("Too many requests".to_string()),
        };
        assert_eq!(err.user_message(), "Too many requests");
    }

    #[test]
    fn status_without_message_uses_fallback() {
        let err = FetchError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), FETCH_FALLBACK_MESSAGE);
    }

    #[test]
    fn blank_server_message_uses_fallback() {
        let err = FetchError::Status {
            status: 500,
            message: Some("   ".to_string()),
        };
        assert_eq!(err.user_message(), FETCH_FALLBACK_MESSAGE);
    }

    #[test]
    fn transport_error_uses_fallback() {
        let err = FetchError::Transport("connection refused".to_string());
        assert_eq!(err.user_message(), FETCH_FALLBACK_MESSAGE);
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn status_display_includes_code() {
        let err = FetchError::Status {
            status: 404,
            message: None,
        };
        assert_eq!(err.to_string(), "HTTP 404: no message");
    }

    #[test]
    fn app_error_from_io_error() {
        let err: AppError = std::io::Error::other("boom").into();
        assert!(matches!(err, AppError::Terminal(_)));
    }
}
