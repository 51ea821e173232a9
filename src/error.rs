//! Error types for webstore-publish
//!
//! This module defines all error types used throughout the action,
//! using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

use crate::store::ItemError;

/// Main error type for webstore-publish operations
///
/// Every variant is terminal for the run: nothing is retried, and the
/// binary reports the error and exits non-zero.
#[derive(Error, Debug)]
pub enum WebstoreError {
    /// Configuration-related errors (missing or malformed inputs)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The action selector is not one of `test`, `upload`, `uploadPublish`
    #[error("action not supported: {0}")]
    UnsupportedAction(String),

    /// The extension package could not be read from disk
    #[error("failed to read extension file {}: {source}", .path.display())]
    PackageRead {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// An endpoint answered with something other than `200 OK`.
    ///
    /// The raw response body is kept verbatim for operator diagnosis.
    #[error("request failed ({status}): {body}")]
    RequestFailed {
        /// HTTP status code returned by the server
        status: u16,
        /// Raw response body text
        body: String,
    },

    /// The granted token scope does not include the Chrome Web Store scope
    #[error("chromewebstore scope missing. Actual: {0}")]
    MissingScope(String),

    /// The token endpoint issued something other than a bearer token
    #[error("token type must be bearer. Actual: {0}")]
    InvalidTokenType(String),

    /// The store accepted the upload request but reported `FAILURE`
    #[error("upload failed: {}", format_item_errors(.0))]
    UploadFailed(Vec<ItemError>),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

fn format_item_errors(errors: &[ItemError]) -> String {
    if errors.is_empty() {
        return "no error details reported".to_string();
    }
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for webstore-publish operations
///
/// Uses `anyhow::Error` so that step boundaries can attach context while
/// callers can still downcast to [`WebstoreError`].
pub type Result<T> = anyhow::Result<T>;
