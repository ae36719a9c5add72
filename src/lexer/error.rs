//! Lexer-level error kind, kept distinct from end-of-input.
//!
//! `Lexer`'s public constructors all take an already-validated `&str`/
//! `String`, so a decode failure can never actually surface through them —
//! Rust's `str` invariant guarantees every byte range is well-formed UTF-8
//! before the lexer ever sees it. The decode layer underneath (`utf8`,
//! `reader::Cursor`) still reports the distinction honestly rather than
//! collapsing a malformed byte sequence into the same signal as "no bytes
//! left", both because that is the contract a byte-level decoder should
//! keep regardless of what its current callers happen to guarantee, and
//! because `BaseToken::kind == TokenCategory::Invalid` is the mechanism a
//! future raw-bytes entry point would need anyway.

use std::fmt;

use crate::position::Position;

/// The ways raw byte decoding can fail, as distinct from running out of
/// input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A lead byte's continuation bytes didn't satisfy `(b & 0xC0) == 0x80`,
    /// the sequence was truncated by the end of the buffer, or the
    /// assembled code point was an overlong encoding of `U+0000` (or
    /// otherwise not a valid scalar value).
    InvalidUtf8,
}

impl LexErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidUtf8 => "invalid UTF-8 sequence",
        }
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A lexer-level error tagged with the source position it occurred at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: Position,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.kind)
    }
}

impl std::error::Error for LexError {}
