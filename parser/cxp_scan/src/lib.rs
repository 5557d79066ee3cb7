//! Streaming scanning substrate for the cxp expression front end.
//!
//! This crate is standalone with **zero `cxp_*` dependencies**: the language
//! layer (`cxp_parse`) builds its token scanners on top of the generic
//! machinery here.
//!
//! # Architecture
//!
//! Three layers, bottom up:
//!
//! - **[`ByteSource`]**: an opened byte stream with a known total size,
//!   handing out bytes in bounded chunks (file-backed or in-memory).
//! - **[`ScanBuffer`]**: a sliding window over a source, keyed by absolute
//!   position. Pulls 1024-byte chunks on demand, records newline offsets as
//!   it observes them, and drops its low end once the owning scanner says
//!   nothing below a position can be addressed again.
//! - **[`Scanner`]**: a position cursor over a buffer. Runs [`Trim`]
//!   primitives against the current position, supports save/restore of
//!   positions and extraction of consumed slices, and offers both a
//!   poisoning chaining style ([`Scanner::apply`]) and an explicit
//!   result-returning style ([`Scanner::apply_if_ok`]).

mod buffer;
mod scanner;
pub mod source;
pub mod trims;

pub use buffer::{ScanBuffer, TO_END};
pub use scanner::{Scan, Scanner, SeqStep, INVALID_POS};
pub use source::{ByteSource, FileSource, MemorySource, SourceError};
pub use trims::{Trim, TrimResult};
