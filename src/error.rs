//! Error types for rescache operations.
//!
//! This module defines [`CacheError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Transport failures stay [`reqwest::Error`] inside [`CacheError::Connection`]
//!   so callers can still query `is_connect()`, `is_timeout()` and friends
//! - Non-success HTTP statuses become [`CacheError::BadResponse`]
//! - Use `anyhow::Error` (via `CacheError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for rescache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The request never produced a response (DNS, refused connection, timeout).
    #[error(transparent)]
    Connection(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("error: {target} responded {status}")]
    BadResponse {
        target: String,
        status: reqwest::StatusCode,
    },

    /// The resolved request target is not a usable URL.
    #[error("error: invalid request target {target}: {reason}")]
    InvalidTarget { target: String, reason: String },

    /// A request template must contain exactly one `{}` placeholder.
    #[error("Request template must contain exactly one '{{}}' placeholder, found {placeholders}: {template}")]
    InvalidTemplate {
        template: String,
        placeholders: usize,
    },

    /// Removal of a single entry that is not on disk.
    #[error("Cache entry not found: {path}")]
    EntryNotFound { path: PathBuf },

    /// Data file extension is neither JSON nor YAML.
    #[error("{path}: not a JSON or YAML file")]
    UnsupportedFormat { path: PathBuf },

    /// Structured data could not be decoded.
    #[error("Failed to decode {source_name}: {message}")]
    Decode {
        source_name: String,
        message: String,
    },

    /// Structured data could not be encoded.
    #[error("Failed to encode data as {format}: {message}")]
    Encode { format: String, message: String },

    /// A file to copy does not live under the requested anchor.
    #[error("{path} is not inside anchor directory {anchor}")]
    OutsideAnchor { path: PathBuf, anchor: PathBuf },

    /// Failed to parse a settings file.
    #[error("Failed to parse settings at {path}: {message}")]
    SettingsParse { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CacheError {
    /// True when the transport could not reach the server at all.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, CacheError::Connection(e) if e.is_connect() || e.is_timeout())
    }
}

/// Result type alias for rescache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
