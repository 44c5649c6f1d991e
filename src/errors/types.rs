//! Error type definitions for the EPG merger
//!
//! Per-source failures are modelled separately from run-level failures so the
//! pipeline can turn the former into a skipped source while escalating only
//! the latter.

use thiserror::Error;

/// Top-level application error type
///
/// Only errors that invalidate the whole run end up here. A single feed that
/// cannot be fetched or parsed is reported as a [`SourceError`] and skipped.
#[derive(Error, Debug)]
pub enum AppError {
    /// Source handling errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Every configured source failed, so there is nothing to write
    #[error("No EPG source could be processed ({attempted} attempted)")]
    NoSourcesSucceeded { attempted: usize },

    /// Filesystem errors while writing the merged guide
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Source handling specific errors
///
/// Each variant maps to "this source contributes nothing" at the pipeline
/// boundary. Messages are plain strings so outcomes can be cloned into the
/// run report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Network failures (DNS, connect, TLS, timeout)
    #[error("Source unavailable: {url} - {message}")]
    Unavailable { url: String, message: String },

    /// Non-success HTTP status from the feed host
    #[error("HTTP error: {status} - {url}")]
    Http { status: u16, url: String },

    /// Compressed payload could not be decoded into UTF-8 text
    #[error("Decompression failed: {message}")]
    Decompression { message: String },

    /// Feed text is not well-formed XML
    #[error("Malformed feed: {message}")]
    MalformedFeed { message: String },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl SourceError {
    pub fn unavailable<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Unavailable {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn decompression<S: Into<String>>(message: S) -> Self {
        Self::Decompression {
            message: message.into(),
        }
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedFeed {
            message: message.into(),
        }
    }

    /// Short classification used in log lines and the run summary
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } | Self::Http { .. } | Self::Decompression { .. } => {
                "source_unavailable"
            }
            Self::MalformedFeed { .. } => "malformed_feed",
        }
    }
}
