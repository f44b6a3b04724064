//! Process-wide trace marker
//!
//! Most programs want exactly one trace_marker handle shared by every call
//! site. [`global()`] builds it on first use from [`MarkerConfig::from_env`];
//! the free functions and the crate macros all go through it.

use crate::config::MarkerConfig;
use crate::error::Result;
use crate::marker::TraceMarker;
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

static GLOBAL_MARKER: OnceLock<TraceMarker> = OnceLock::new();

/// The process-wide marker, detached until [`init`] succeeds
pub fn global() -> &'static TraceMarker {
    GLOBAL_MARKER.get_or_init(|| {
        let config = MarkerConfig::from_env().unwrap_or_else(|e| {
            tracing::warn!("{}; falling back to default trace_marker paths", e);
            MarkerConfig::default()
        });
        TraceMarker::new(config)
    })
}

/// Open the process-wide trace_marker
pub fn init() -> Result<PathBuf> {
    global().init()
}

/// Close the process-wide trace_marker
pub fn cleanup() {
    global().cleanup()
}

pub fn is_enabled() -> bool {
    global().is_enabled()
}

/// Emit one line through the process-wide marker
pub fn mark(args: fmt::Arguments<'_>) {
    global().mark(args)
}
