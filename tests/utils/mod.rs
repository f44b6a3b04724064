// Shared helpers for integration tests
//
// Stub trace_marker files live in a temp dir; `CountingOpener` wraps a set of
// openable paths and counts every write so tests can assert "no I/O at all".

#![allow(dead_code)]

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tracemark::MarkerOpener;

/// A temp dir holding stand-ins for the debugfs and tracefs trace_marker files
pub struct StubTraceFs {
    pub dir: TempDir,
    pub debug: PathBuf,
    pub tracing: PathBuf,
}

impl StubTraceFs {
    /// Create the directory; `create_debug`/`create_tracing` choose which files exist
    pub fn new(create_debug: bool, create_tracing: bool) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let debug = dir.path().join("debug_trace_marker");
        let tracing = dir.path().join("tracing_trace_marker");
        if create_debug {
            std::fs::File::create(&debug).expect("Failed to create debug marker");
        }
        if create_tracing {
            std::fs::File::create(&tracing).expect("Failed to create tracing marker");
        }
        Self {
            dir,
            debug,
            tracing,
        }
    }

    pub fn candidates(&self) -> Vec<PathBuf> {
        vec![self.debug.clone(), self.tracing.clone()]
    }

    pub fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap_or_default()
    }
}

/// Opener that only accepts listed paths and counts probes and writes
#[derive(Clone, Default)]
pub struct CountingOpener {
    pub openable: Vec<PathBuf>,
    pub probes: Arc<AtomicUsize>,
    pub writes: Arc<AtomicUsize>,
    pub payloads: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl CountingOpener {
    pub fn accepting(paths: &[&str]) -> Self {
        Self {
            openable: paths.iter().map(PathBuf::from).collect(),
            ..Default::default()
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    pub fn payloads(&self) -> Vec<Vec<u8>> {
        self.payloads.lock().unwrap().clone()
    }
}

pub struct CountingSink {
    writes: Arc<AtomicUsize>,
    payloads: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl Write for CountingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().unwrap().push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl MarkerOpener for CountingOpener {
    type Sink = CountingSink;

    fn open(&self, path: &Path) -> io::Result<CountingSink> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        if !self.openable.iter().any(|p| p == path) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        Ok(CountingSink {
            writes: self.writes.clone(),
            payloads: self.payloads.clone(),
        })
    }
}
