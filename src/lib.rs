//! Tracemark - unified kernel/userspace tracing through ftrace's trace_marker
//!
//! Userspace writes to `trace_marker` land in the kernel trace buffer next to
//! the kernel's own events, ordered by timestamp. This crate finds and opens
//! that file once and turns formatted text into bounded, newline-terminated
//! marker lines. Tracing never fails the caller: when no trace_marker can be
//! opened every marker call is a no-op.

pub mod cli;
pub mod config;
pub mod error;
pub mod global;
pub mod line;
pub mod macros;
pub mod marker;

pub use config::MarkerConfig;
pub use error::{Result, TraceMarkerError};
pub use global::{cleanup, global, init, is_enabled};
pub use line::{MarkerLine, MARK_BUFFER_SIZE};
pub use marker::{FileOpener, MarkerOpener, TraceMarker};
