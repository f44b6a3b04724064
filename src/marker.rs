//! Owned handle to the ftrace trace_marker file
//!
//! [`TraceMarker`] probes an ordered list of candidate paths, keeps the first
//! one that opens for writing, and turns formatted text into single
//! `write(2)` calls on it. Every write is best effort: when tracing is
//! disabled, or a write fails, the line is silently dropped.
//!
//! # Example
//!
//! ```no_run
//! use tracemark::{MarkerConfig, TraceMarker};
//!
//! let marker = TraceMarker::new(MarkerConfig::default());
//! if marker.init().is_ok() {
//!     marker.mark(format_args!("request {} started", 17));
//! }
//! marker.entry("handle_request");
//! marker.exit("handle_request", 0);
//! marker.cleanup();
//! ```
//!
//! # Concurrency
//!
//! The open handle lives behind a [`Mutex`]. Concurrent `mark` calls are
//! serialized, so lines from different threads never interleave, and
//! `init`/`cleanup` may race with `mark` safely.

use crate::config::MarkerConfig;
use crate::error::{Result, TraceMarkerError};
use crate::line::MarkerLine;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Opens a candidate trace_marker path
///
/// The production opener is [`FileOpener`]; tests substitute stubs to observe
/// probing and writes without a mounted tracefs.
pub trait MarkerOpener: Send + Sync {
    type Sink: Write + Send;

    fn open(&self, path: &Path) -> io::Result<Self::Sink>;
}

/// Opens the path write-only, never creating it
#[derive(Debug, Clone, Copy, Default)]
pub struct FileOpener;

impl MarkerOpener for FileOpener {
    type Sink = File;

    fn open(&self, path: &Path) -> io::Result<File> {
        OpenOptions::new().write(true).open(path)
    }
}

struct Attached<W> {
    sink: W,
    path: PathBuf,
}

/// Write-only handle to a kernel trace_marker
pub struct TraceMarker<O: MarkerOpener = FileOpener> {
    config: MarkerConfig,
    opener: O,
    enabled: AtomicBool,
    state: Mutex<Option<Attached<O::Sink>>>,
}

impl TraceMarker<FileOpener> {
    /// Create a detached marker that opens real files
    pub fn new(config: MarkerConfig) -> Self {
        Self::with_opener(config, FileOpener)
    }
}

impl Default for TraceMarker<FileOpener> {
    fn default() -> Self {
        Self::new(MarkerConfig::default())
    }
}

impl<O: MarkerOpener> TraceMarker<O> {
    /// Create a detached marker using a custom opener
    pub fn with_opener(config: MarkerConfig, opener: O) -> Self {
        Self {
            config,
            opener,
            enabled: AtomicBool::new(false),
            state: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &MarkerConfig {
        &self.config
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    /// Probe the candidates in order and keep the first that opens
    ///
    /// Returns the selected path. Calling `init` while already attached keeps
    /// the existing handle and returns its path; nothing is reopened.
    pub fn init(&self) -> Result<PathBuf> {
        let mut state = self.lock();

        if let Some(attached) = state.as_ref() {
            tracing::debug!(path = %attached.path.display(), "trace_marker already open");
            return Ok(attached.path.clone());
        }

        self.config.validate()?;

        for path in &self.config.candidates {
            match self.opener.open(path) {
                Ok(sink) => {
                    tracing::info!("Tracing enabled via {}", path.display());
                    *state = Some(Attached {
                        sink,
                        path: path.clone(),
                    });
                    self.enabled.store(true, Ordering::Release);
                    return Ok(path.clone());
                }
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "trace_marker candidate rejected");
                }
            }
        }

        tracing::warn!(
            "Could not open trace_marker. Tracing disabled. \
             Ensure debugfs is mounted: mount -t debugfs none /sys/kernel/debug"
        );
        Err(TraceMarkerError::Unavailable {
            tried: self.config.candidates.clone(),
        })
    }

    /// Close the handle; a no-op when already closed
    pub fn cleanup(&self) {
        let mut state = self.lock();
        if let Some(attached) = state.take() {
            self.enabled.store(false, Ordering::Release);
            tracing::debug!(path = %attached.path.display(), "trace_marker closed");
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Path of the open trace_marker, if any
    pub fn path(&self) -> Option<PathBuf> {
        self.lock().as_ref().map(|attached| attached.path.clone())
    }

    /// Emit one formatted line
    ///
    /// The text is bounded by `config().max_len` and terminated with `\n`.
    /// An empty rendering writes nothing. Write errors and short writes are
    /// ignored.
    pub fn mark(&self, args: fmt::Arguments<'_>) {
        if !self.is_enabled() {
            return;
        }

        // Render outside the lock so Display impls may themselves emit markers
        let mut line = MarkerLine::render(self.config.max_len, args);
        let Some(payload) = line.finish() else {
            return;
        };

        let mut state = self.lock();
        if let Some(attached) = state.as_mut() {
            let _ = attached.sink.write(payload);
        }
    }

    /// Emit `text` verbatim (subject to the line bound)
    pub fn mark_str(&self, text: &str) {
        self.mark(format_args!("{}", text));
    }

    /// `"<func>: entry"`
    pub fn entry(&self, func: &str) {
        self.mark(format_args!("{}: entry", func));
    }

    /// `"<func>: exit ret=<ret>"`
    pub fn exit(&self, func: &str, ret: i64) {
        self.mark(format_args!("{}: exit ret={}", func, ret));
    }

    /// `"<func>: <message>"`
    pub fn log(&self, func: &str, args: fmt::Arguments<'_>) {
        self.mark(format_args!("{}: {}", func, args));
    }

    fn lock(&self) -> MutexGuard<'_, Option<Attached<O::Sink>>> {
        // A panic while holding the lock cannot leave the handle half-updated
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<O: MarkerOpener> fmt::Debug for TraceMarker<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceMarker")
            .field("config", &self.config)
            .field("path", &self.path())
            .finish()
    }
}
