//! Sliding chunk-buffered window over a [`ByteSource`].
//!
//! The buffer owns its source and caches the contiguous byte range
//! `[start, end)`. Accesses past `end` pull 1024-byte chunks until the
//! position is covered or the stream runs dry; `set_start` lets the owning
//! scanner discard the low end of the window once nothing below a position
//! can be addressed again.
//!
//! # Newline tracking
//!
//! Every access that observes `\n` at position `p` records `p + 1` in the
//! sorted newline table (seeded with `0`), so [`ScanBuffer::linecol`]
//! answers are exact for any position at or behind the furthest byte read
//! so far.
//!
//! # Source failures
//!
//! A read failure latches into the buffer and the stream behaves as ended
//! at the last good byte. Callers observe the latched [`SourceError`]
//! through [`ScanBuffer::fatal`] / [`ScanBuffer::take_fatal`].

use crate::source::{ByteSource, SourceError};

/// Bytes pulled from the source per underflow.
const READ_CHUNK_SIZE: usize = 1024;

/// Minimum discardable prefix before `set_start` actually trims.
const MIN_TRIM_DISTANCE: u64 = 1024;

/// Length sentinel for [`ScanBuffer::substr`]: read through end of stream.
pub const TO_END: u64 = u64::MAX;

pub struct ScanBuffer {
    src: Box<dyn ByteSource>,
    /// Total stream size, probed eagerly at construction.
    size: u64,
    /// Cached bytes covering `[start, end)`.
    data: Vec<u8>,
    start: u64,
    end: u64,
    eos: bool,
    /// Sorted start-of-line offsets; `newlines[0] == 0`.
    newlines: Vec<u64>,
    fatal: Option<SourceError>,
}

impl ScanBuffer {
    /// Open a buffer over `src`, probing the total stream size eagerly and
    /// rewinding to the first byte.
    pub fn new(mut src: Box<dyn ByteSource>) -> Result<Self, SourceError> {
        let size = src.size()?;
        src.rewind()?;
        Ok(ScanBuffer {
            src,
            size,
            data: Vec::new(),
            start: 0,
            end: 0,
            eos: false,
            newlines: vec![0],
            fatal: None,
        })
    }

    /// Total bytes in the backing stream.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// First fatal source failure, if any.
    pub fn fatal(&self) -> Option<&SourceError> {
        self.fatal.as_ref()
    }

    /// Take the latched fatal source failure, leaving `None`.
    pub fn take_fatal(&mut self) -> Option<SourceError> {
        self.fatal.take()
    }

    fn underflow(&mut self) {
        if self.eos {
            return;
        }
        match self.src.read_chunk(READ_CHUNK_SIZE) {
            Ok(chunk) => {
                self.end += chunk.len() as u64;
                self.eos = chunk.len() < READ_CHUNK_SIZE;
                self.data.extend_from_slice(&chunk);
            }
            Err(err) => {
                self.fatal = Some(err);
                self.eos = true;
            }
        }
    }

    /// Byte at absolute position `pos`, pulling chunks as needed.
    ///
    /// Positions at or past the end of the stream read as `0`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "window offsets fit in usize: data.len() == end - start"
    )]
    pub fn at(&mut self, pos: u64) -> u8 {
        while pos >= self.end && !self.eos {
            self.underflow();
        }
        debug_assert!(pos >= self.start, "access below the window start");
        if pos < self.start || pos >= self.end {
            return 0;
        }
        let byte = self.data[(pos - self.start) as usize];
        if byte == b'\n' {
            self.record_newline(pos + 1);
        }
        byte
    }

    /// Materialize `n` bytes starting at `pos` as an owned string,
    /// clamped to the bytes actually present. [`TO_END`] reads through
    /// the end of the stream.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "window offsets fit in usize: data.len() == end - start"
    )]
    pub fn substr(&mut self, pos: u64, n: u64) -> String {
        if n == TO_END {
            while !self.eos {
                self.underflow();
            }
        } else if n > 0 {
            let _ = self.at(pos.saturating_add(n - 1));
        }
        let from = pos.max(self.start);
        let to = if n == TO_END {
            self.end
        } else {
            pos.saturating_add(n).min(self.end)
        };
        if from >= to {
            return String::new();
        }
        let lo = (from - self.start) as usize;
        let hi = (to - self.start) as usize;
        String::from_utf8_lossy(&self.data[lo..hi]).into_owned()
    }

    /// Drop the window below `pos`. No-op until at least 1024 bytes are
    /// discardable, so trimming stays amortized.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "window offsets fit in usize: data.len() == end - start"
    )]
    pub fn set_start(&mut self, pos: u64) {
        debug_assert!(pos >= self.start, "window start may only advance");
        if pos < self.start || pos - self.start < MIN_TRIM_DISTANCE {
            return;
        }
        let drop = ((pos - self.start) as usize).min(self.data.len());
        self.data.drain(..drop);
        self.start += drop as u64;
    }

    fn record_newline(&mut self, line_start: u64) {
        if let Err(idx) = self.newlines.binary_search(&line_start) {
            self.newlines.insert(idx, line_start);
        }
    }

    /// 1-based (line, column) of `pos`, based on newlines observed so far.
    pub fn linecol(&self, pos: u64) -> (u64, u64) {
        let idx = self.newlines.partition_point(|&n| n <= pos) - 1;
        (idx as u64 + 1, pos - self.newlines[idx] + 1)
    }

    /// Byte offset where 1-based `line` starts, if that line has been seen.
    pub fn linepos(&self, line: usize) -> Option<u64> {
        self.newlines.get(line.checked_sub(1)?).copied()
    }
}
