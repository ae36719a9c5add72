//! Source position tracking.
//!
//! Invariants:
//! - `row` and `col` start at 1.
//! - A newline pair (`\r\n` or `\n\r`) advances the row exactly once, not
//!   twice; a lone `\r` or `\n` also advances the row exactly once.

use std::fmt;

/// A `(row, col)` pair identifying a location in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

impl Position {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub const fn start() -> Self {
        Self { row: 1, col: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.row, self.col)
    }
}

/// A half-open `[start, end)` range of positions, used to tag diagnostics
/// and AST-ish nodes with the source text they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub const fn point(pos: Position) -> Self {
        Self { start: pos, end: pos }
    }
}

/// Tracks `(row, col)` across a stream of decoded code points, honoring the
/// `\r\n` / `\n\r` pairing rule from the spec: two code points that form a
/// newline pair count as a single row increment.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PositionTracker {
    row: u32,
    col: u32,
    /// The previous code point, if it was the first half of a newline that
    /// has not yet been paired off.
    pending_newline: Option<char>,
}

impl PositionTracker {
    pub(crate) fn new() -> Self {
        Self {
            row: 1,
            col: 1,
            pending_newline: None,
        }
    }

    /// Reconstructs tracker state at a known `(row, col)`, with an explicit
    /// pending-newline-half, for restoring a saved cursor position (see
    /// `Cursor::at`). Needed because a plain `(row, col)` pair alone loses
    /// whether the position sits between the two halves of a `\r\n`/`\n\r`
    /// pair.
    pub(crate) fn at(row: u32, col: u32, pending_newline: Option<char>) -> Self {
        Self {
            row,
            col,
            pending_newline,
        }
    }

    pub(crate) fn pending_newline(&self) -> Option<char> {
        self.pending_newline
    }

    pub(crate) fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    /// Advance position state by one just-consumed code point.
    pub(crate) fn advance(&mut self, ch: char) {
        let is_newline = ch == '\n' || ch == '\r';

        if is_newline {
            if let Some(prev) = self.pending_newline {
                let pairs = (prev == '\r' && ch == '\n') || (prev == '\n' && ch == '\r');
                if pairs {
                    // Second half of a pair: already accounted for by the
                    // first half's row increment. Consume silently.
                    self.pending_newline = None;
                    return;
                }
            }
            self.row += 1;
            self.col = 1;
            self.pending_newline = Some(ch);
        } else {
            self.col += 1;
            self.pending_newline = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lone_newline_advances_row_once() {
        let mut t = PositionTracker::new();
        assert_eq!(t.position(), Position::new(1, 1));
        t.advance('a');
        assert_eq!(t.position(), Position::new(1, 2));
        t.advance('\n');
        assert_eq!(t.position(), Position::new(2, 1));
    }

    #[test]
    fn crlf_pair_advances_row_once() {
        let mut t = PositionTracker::new();
        t.advance('\r');
        assert_eq!(t.position(), Position::new(2, 1));
        t.advance('\n');
        assert_eq!(t.position(), Position::new(2, 1));
        t.advance('x');
        assert_eq!(t.position(), Position::new(2, 2));
    }

    #[test]
    fn lfcr_pair_advances_row_once() {
        let mut t = PositionTracker::new();
        t.advance('\n');
        t.advance('\r');
        assert_eq!(t.position(), Position::new(2, 1));
    }

    #[test]
    fn unpaired_repeated_newlines_each_advance_row() {
        let mut t = PositionTracker::new();
        t.advance('\n');
        t.advance('\n');
        assert_eq!(t.position(), Position::new(3, 1));
    }
}
