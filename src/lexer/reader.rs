//! Byte-offset cursor over source text, with UTF-8 decoding and
//! `(row, col)` bookkeeping.
//!
//! Invariant: `offset` always points at a byte boundary that begins a
//! complete UTF-8 code point, or at end-of-buffer.

use super::error::LexErrorKind;
use super::utf8::next_utf32;
use crate::position::{Position, PositionTracker};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor {
    pub(crate) offset: usize,
    pos: PositionTracker,
}

impl Cursor {
    pub(crate) fn new() -> Self {
        Self {
            offset: 0,
            pos: PositionTracker::new(),
        }
    }

    /// Reconstructs a cursor at a known offset/position, carrying forward
    /// whether that position sits between the two halves of a newline
    /// pair (see `PositionTracker::at`).
    pub(crate) fn at(offset: usize, row: u32, col: u32, pending_newline: Option<char>) -> Self {
        Self {
            offset,
            pos: PositionTracker::at(row, col, pending_newline),
        }
    }

    pub(crate) fn pending_newline(&self) -> Option<char> {
        self.pos.pending_newline()
    }

    pub(crate) fn position(&self) -> Position {
        self.pos.position()
    }

    /// Decode the code point at the cursor without advancing. `Ok(None)`
    /// means end-of-input; `Err` means the bytes at the cursor don't
    /// decode to a valid code point — distinct outcomes that must not be
    /// conflated (see `super::error::LexErrorKind`).
    pub(crate) fn peek_char(&self, source: &str) -> Result<Option<(char, usize)>, LexErrorKind> {
        next_utf32(source.as_bytes().get(self.offset..).unwrap_or(&[]))
    }

    /// Decode and advance past one code point. Returns the decoded char.
    pub(crate) fn advance(&mut self, source: &str) -> Result<Option<char>, LexErrorKind> {
        match self.peek_char(source) {
            Ok(Some((ch, len))) => {
                self.offset += len;
                self.pos.advance(ch);
                Ok(Some(ch))
            }
            Ok(None) => Ok(None),
            Err(kind) => {
                // Step past the single offending byte so repeated calls
                // still make forward progress; position tracking beyond
                // this point is best-effort since the byte didn't decode
                // to a real code point.
                self.offset += 1;
                self.pos.advance('\u{FFFD}');
                Err(kind)
            }
        }
    }

    pub(crate) fn at_eof(&self, source: &str) -> bool {
        matches!(self.peek_char(source), Ok(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_through_ascii() {
        let src = "ab";
        let mut c = Cursor::new();
        assert_eq!(c.position(), Position::new(1, 1));
        assert_eq!(c.advance(src), Ok(Some('a')));
        assert_eq!(c.position(), Position::new(1, 2));
        assert_eq!(c.advance(src), Ok(Some('b')));
        assert_eq!(c.offset, 2);
        assert_eq!(c.advance(src), Ok(None));
    }

    #[test]
    fn advances_through_multibyte() {
        let src = "é!";
        let mut c = Cursor::new();
        assert_eq!(c.advance(src), Ok(Some('é')));
        assert_eq!(c.offset, 2);
        assert_eq!(c.advance(src), Ok(Some('!')));
        assert_eq!(c.offset, 3);
    }

    #[test]
    fn crlf_pair_is_a_single_row_advance() {
        let src = "\r\nx";
        let mut c = Cursor::new();
        c.advance(src).unwrap();
        c.advance(src).unwrap();
        assert_eq!(c.position(), Position::new(2, 1));
    }

    #[test]
    fn invalid_byte_is_distinguishable_from_eof() {
        // SAFETY: deliberately holds a malformed byte sequence to exercise
        // the decode-failure path; no safe `&str`-producing API in this
        // crate can ever construct one, since every public `Lexer`
        // constructor takes an already-valid `&str`/`String`.
        let src = unsafe { std::str::from_utf8_unchecked(&[0xFF]) };
        let mut c = Cursor::new();
        assert!(!c.at_eof(src));
        assert_eq!(c.advance(src), Err(LexErrorKind::InvalidUtf8));
        assert!(c.at_eof(""));
    }
}
