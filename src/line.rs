//! Bounded, allocation-free rendering of one marker line
//!
//! A [`MarkerLine`] is a fixed 512-byte stack buffer that implements
//! [`fmt::Write`]. Formatting past the configured bound is dropped, never
//! splitting a UTF-8 character, and everything after the first truncation is
//! ignored so the kept text is always a prefix of the full rendering.

use std::fmt::{self, Write};

/// Size of the per-line buffer, trailing newline included
pub const MARK_BUFFER_SIZE: usize = 512;

/// One rendered marker line
pub struct MarkerLine {
    buf: [u8; MARK_BUFFER_SIZE],
    len: usize,
    max_len: usize,
    truncated: bool,
}

impl MarkerLine {
    /// Create an empty line holding at most `max_len` bytes of content
    ///
    /// `max_len` is capped at `MARK_BUFFER_SIZE - 1` to leave room for `\n`.
    pub fn new(max_len: usize) -> Self {
        Self {
            buf: [0; MARK_BUFFER_SIZE],
            len: 0,
            max_len: max_len.min(MARK_BUFFER_SIZE - 1),
            truncated: false,
        }
    }

    /// Render `args` into a new line
    ///
    /// If a `Display` impl inside `args` fails, the partial text is discarded
    /// and the line is left empty, so nothing gets written.
    pub fn render(max_len: usize, args: fmt::Arguments<'_>) -> Self {
        let mut line = Self::new(max_len);
        // MarkerLine::write_str never fails; only a Display impl could
        if line.write_fmt(args).is_err() {
            line.len = 0;
            line.truncated = false;
        }
        line
    }

    /// Rendered content, without newline
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Rendered content as text
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(self.as_bytes()).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True once any formatted output was dropped
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Terminate the line and return the bytes to hand to `write(2)`
    ///
    /// Returns `None` for an empty rendering: a bare newline is never emitted.
    pub fn finish(&mut self) -> Option<&[u8]> {
        if self.len == 0 {
            return None;
        }
        self.buf[self.len] = b'\n';
        Some(&self.buf[..=self.len])
    }
}

impl Write for MarkerLine {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }

        let room = self.max_len - self.len;
        let take = if s.len() <= room {
            s.len()
        } else {
            self.truncated = true;
            let mut cut = room;
            while !s.is_char_boundary(cut) {
                cut -= 1;
            }
            cut
        };

        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

impl fmt::Debug for MarkerLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkerLine")
            .field("text", &self.as_str())
            .field("max_len", &self.max_len)
            .field("truncated", &self.truncated)
            .finish()
    }
}
