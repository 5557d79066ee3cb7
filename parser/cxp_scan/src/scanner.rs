//! Position cursor over a [`ScanBuffer`] with save and extraction stacks.
//!
//! The scanner is the only owner of its buffer. Trim primitives receive it
//! as `&dyn Scan`; reads pull bytes through interior mutability, so a
//! primitive can look arbitrarily far ahead without holding `&mut`.
//!
//! Two mutation styles are offered:
//!
//! - [`Scanner::apply`] commits on success, poisons the cursor on failure
//!   (`pos == INVALID_POS`), and returns `&mut Self` for chaining;
//! - [`Scanner::apply_if_ok`] commits on success but hands back the raw
//!   [`TrimResult`] and never poisons, for callers that branch explicitly.
//!
//! [`Scanner::invoke`] is the non-mutating trial form.

use std::cell::RefCell;

use crate::buffer::ScanBuffer;
use crate::source::SourceError;
use crate::trims::{Trim, TrimResult};

/// Cursor value after a failed [`Scanner::apply`].
pub const INVALID_POS: u64 = u64::MAX;

/// Read-only view the trim primitives scan through.
pub trait Scan {
    /// Total size of the underlying stream.
    fn size(&self) -> u64;
    /// Byte at absolute `pos`; positions past the end read as `0`.
    fn at(&self, pos: u64) -> u8;
    /// Owned copy of `n` bytes at `pos` ([`crate::TO_END`] for the rest
    /// of the stream).
    fn substr(&self, pos: u64, n: u64) -> String;
}

/// One step of a trim sequence: a primitive, or a marker manipulating the
/// save / extraction stacks. Markers apply to the next primitive only.
pub enum SeqStep<'a> {
    Trim(&'a dyn Trim),
    SavePos,
    ExtractNext,
}

pub struct Scanner {
    buf: RefCell<ScanBuffer>,
    pos: u64,
    saved: Vec<u64>,
    extracted: Vec<String>,
    extract_next: bool,
}

impl Scan for Scanner {
    fn size(&self) -> u64 {
        self.buf.borrow().size()
    }

    fn at(&self, pos: u64) -> u8 {
        self.buf.borrow_mut().at(pos)
    }

    fn substr(&self, pos: u64, n: u64) -> String {
        self.buf.borrow_mut().substr(pos, n)
    }
}

impl Scanner {
    pub fn new(buf: ScanBuffer) -> Self {
        Scanner {
            buf: RefCell::new(buf),
            pos: 0,
            saved: Vec::new(),
            extracted: Vec::new(),
            extract_next: false,
        }
    }

    /// Current absolute position.
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// `true` once the cursor is at or past the end of the stream.
    pub fn exhausted(&self) -> bool {
        self.pos >= self.size()
    }

    /// `false` after a poisoning [`Scanner::apply`] failed.
    pub fn ok(&self) -> bool {
        self.pos != INVALID_POS
    }

    pub fn err(&self) -> bool {
        !self.ok()
    }

    /// 1-based line and column of `pos`, from newlines observed so far.
    pub fn linecol(&self, pos: u64) -> (u64, u64) {
        self.buf.borrow().linecol(pos)
    }

    /// Byte offset where 1-based `line` starts, if that line has been seen.
    pub fn linepos(&self, line: usize) -> Option<u64> {
        self.buf.borrow().linepos(line)
    }

    /// Take the buffer's latched fatal source failure, if any.
    pub fn take_source_error(&mut self) -> Option<SourceError> {
        self.buf.get_mut().take_fatal()
    }

    // --- Save stack ---

    /// Push the current position onto the save stack.
    pub fn save_pos(&mut self) -> &mut Self {
        self.saved.push(self.pos);
        self
    }

    /// Pop the most recent save and jump back to it.
    pub fn load_saved(&mut self) -> Option<u64> {
        let pos = self.saved.pop()?;
        self.pos = pos;
        Some(pos)
    }

    /// Pop the most recent save without moving.
    pub fn pop_saved(&mut self) -> Option<u64> {
        self.saved.pop()
    }

    // --- Extraction stack ---

    /// Arm one-shot extraction: the next successful committing apply
    /// records the consumed slice.
    pub fn extract_next(&mut self) -> &mut Self {
        self.extract_next = true;
        self
    }

    pub fn pop_extracted(&mut self) -> Option<String> {
        self.extracted.pop()
    }

    // --- Running primitives ---

    /// Run `trim` at the current position without moving.
    pub fn invoke(&self, trim: impl Trim) -> TrimResult {
        trim.trim(self, self.pos)
    }

    /// Run `trim`; on success commit the new position (and any armed
    /// extraction), on failure leave the cursor untouched. Either way the
    /// extraction flag is disarmed.
    pub fn apply_if_ok(&mut self, trim: impl Trim) -> TrimResult {
        let rslt = self.invoke(trim);
        if let Ok(next) = rslt {
            self.commit(next);
        }
        self.extract_next = false;
        rslt
    }

    /// Run `trim`; on success commit, on failure poison the cursor.
    pub fn apply(&mut self, trim: impl Trim) -> &mut Self {
        match self.invoke(trim) {
            Ok(next) => self.commit(next),
            Err(_) => self.pos = INVALID_POS,
        }
        self.extract_next = false;
        self
    }

    // --- Sequences ---

    /// Run `steps` left to right, threading the position, without moving
    /// the cursor or touching the stacks.
    pub fn invoke_seq(&self, steps: &[SeqStep<'_>]) -> TrimResult {
        let mut pos = self.pos;
        for step in steps {
            if let SeqStep::Trim(trim) = step {
                pos = trim.trim(self, pos)?;
            }
        }
        Ok(pos)
    }

    /// Run `steps`; if every primitive succeeds, commit the final position
    /// plus all saves and extractions the markers requested. If any step
    /// fails nothing is committed.
    pub fn apply_seq_if_ok(&mut self, steps: &[SeqStep<'_>]) -> TrimResult {
        let rslt = self.run_seq(steps);
        if let Ok(next) = rslt {
            self.commit(next);
        }
        self.extract_next = false;
        rslt
    }

    /// Like [`Scanner::apply_seq_if_ok`], but poisons the cursor on failure
    /// and returns `&mut Self` for chaining.
    pub fn apply_seq(&mut self, steps: &[SeqStep<'_>]) -> &mut Self {
        match self.run_seq(steps) {
            Ok(next) => self.commit(next),
            Err(_) => self.pos = INVALID_POS,
        }
        self.extract_next = false;
        self
    }

    fn run_seq(&mut self, steps: &[SeqStep<'_>]) -> TrimResult {
        let mut pos = self.pos;
        let mut saves: Vec<u64> = Vec::new();
        let mut extracted: Vec<String> = Vec::new();
        let mut extract_next = false;
        for step in steps {
            match step {
                SeqStep::SavePos => saves.push(pos),
                SeqStep::ExtractNext => extract_next = true,
                SeqStep::Trim(trim) => {
                    let next = trim.trim(&*self, pos)?;
                    if extract_next {
                        extracted.push(self.substr(pos, next - pos));
                        extract_next = false;
                    }
                    pos = next;
                }
            }
        }
        self.saved.append(&mut saves);
        self.extracted.append(&mut extracted);
        Ok(pos)
    }

    fn commit(&mut self, next: u64) {
        if self.extract_next {
            let text = self.substr(self.pos, next - self.pos);
            self.extracted.push(text);
        }
        self.pos = next;
        self.hint_start();
    }

    /// Let the buffer drop bytes below the oldest position still
    /// addressable: the oldest outstanding save, clamped by the cursor.
    fn hint_start(&mut self) {
        let low = self.saved.first().copied().unwrap_or(self.pos).min(self.pos);
        self.buf.get_mut().set_start(low);
    }
}
