//! Error types for trace_marker setup

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring or attaching a trace marker
///
/// Failures while *writing* a marker line are never reported: a lost trace
/// line must not disturb the traced application.
#[derive(Error, Debug)]
pub enum TraceMarkerError {
    #[error(
        "Could not open trace_marker (tried {}). Tracing disabled.",
        display_paths(.tried)
    )]
    Unavailable { tried: Vec<PathBuf> },

    #[error("No trace_marker candidate paths configured")]
    NoCandidates,

    #[error("Invalid marker configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for trace marker operations
pub type Result<T> = std::result::Result<T, TraceMarkerError>;

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
