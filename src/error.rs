//! Error types for the planning and archive layers.

use thiserror::Error;

/// Route planning failures that must be reported to the caller.
///
/// Provider hiccups on individual legs are not errors; they degrade the
/// plan (see `optimizer`). These variants mean no usable result remains.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("starting point '{0}' could not be resolved")]
    StartNotFound(String),

    #[error("no stop could be resolved to coordinates")]
    NoValidStops,
}

/// Route archive failures.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("route {0} not found")]
    NotFound(i64),

    #[error("archive I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Errors while decoding an encoded polyline string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolylineError {
    #[error("invalid character {0:?} in encoded polyline")]
    InvalidChar(char),

    #[error("truncated coordinate in encoded polyline")]
    Truncated,

    #[error("oversized coordinate value in encoded polyline")]
    Overflow,
}
