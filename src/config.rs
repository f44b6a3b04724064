//! Marker configuration: candidate paths and line bound
//!
//! Defaults probe the debugfs mount first and the tracefs mount second.
//! Both can be overridden from the environment:
//!
//! - `TRACEMARK_PATH`: colon-separated candidate list (replaces the defaults)
//! - `TRACEMARK_MAX_LEN`: maximum rendered bytes per line, excluding `\n`

use crate::error::{Result, TraceMarkerError};
use crate::line::MARK_BUFFER_SIZE;
use std::path::PathBuf;

/// trace_marker under a debugfs mount
pub const DEBUGFS_TRACE_MARKER: &str = "/sys/kernel/debug/tracing/trace_marker";

/// trace_marker under a tracefs mount
pub const TRACEFS_TRACE_MARKER: &str = "/sys/kernel/tracing/trace_marker";

/// Environment variable overriding the candidate list
pub const ENV_PATH: &str = "TRACEMARK_PATH";

/// Environment variable overriding the line bound
pub const ENV_MAX_LEN: &str = "TRACEMARK_MAX_LEN";

/// Largest rendered payload; one byte of the buffer is kept for the newline
pub const MAX_LINE_LEN: usize = MARK_BUFFER_SIZE - 1;

/// Where to look for trace_marker and how long a line may get
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerConfig {
    /// Probed in order; the first path that opens wins
    pub candidates: Vec<PathBuf>,
    /// Rendered bytes kept per line, excluding the trailing newline
    pub max_len: usize,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            candidates: vec![
                PathBuf::from(DEBUGFS_TRACE_MARKER),
                PathBuf::from(TRACEFS_TRACE_MARKER),
            ],
            max_len: MAX_LINE_LEN,
        }
    }
}

impl MarkerConfig {
    /// Replace the candidate list
    pub fn with_candidates<I, P>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.candidates = candidates.into_iter().map(Into::into).collect();
        self
    }

    /// Probe `path` ahead of the current candidates
    pub fn with_candidate(mut self, path: impl Into<PathBuf>) -> Self {
        self.candidates.insert(0, path.into());
        self
    }

    /// Set the per-line bound
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Build a configuration from the defaults plus environment overrides
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(paths) = std::env::var(ENV_PATH) {
            config.candidates = parse_path_list(&paths);
        }

        if let Ok(raw) = std::env::var(ENV_MAX_LEN) {
            let max_len = raw.trim().parse::<usize>().map_err(|_| {
                TraceMarkerError::InvalidConfig(format!(
                    "{}={:?} is not a number",
                    ENV_MAX_LEN, raw
                ))
            })?;
            config.max_len = max_len;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the candidate list and line bound
    pub fn validate(&self) -> Result<()> {
        if self.candidates.is_empty() {
            return Err(TraceMarkerError::NoCandidates);
        }
        if self.max_len == 0 || self.max_len > MAX_LINE_LEN {
            return Err(TraceMarkerError::InvalidConfig(format!(
                "max_len must be between 1 and {}, got {}",
                MAX_LINE_LEN, self.max_len
            )));
        }
        Ok(())
    }
}

fn parse_path_list(raw: &str) -> Vec<PathBuf> {
    raw.split(':')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}
