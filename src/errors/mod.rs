//! Centralized error handling for the EPG merger
//!
//! # Error Categories
//!
//! - **Source Errors**: a single feed could not be fetched, decompressed or parsed
//! - **Configuration Errors**: invalid or incomplete configuration file
//! - **Run Errors**: no source succeeded, or the merged guide could not be written
//!
//! # Usage
//!
//! ```rust
//! use epg_merger::errors::{AppResult, SourceError, SourceResult};
//!
//! fn parse_feed(raw: &str) -> SourceResult<usize> {
//!     if raw.is_empty() {
//!         return Err(SourceError::malformed("empty document"));
//!     }
//!     Ok(raw.len())
//! }
//!
//! fn run() -> AppResult<usize> {
//!     Ok(parse_feed("<tv/>")?)
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;
