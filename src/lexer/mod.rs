//! The base lexer: a UTF-8-aware scanner that classifies runs of input
//! into coarse categories (alphabetic, digit, whitespace, other), tracks
//! source position, and supports a peek/commit cursor idiom. This is the
//! reusable substrate the TOML parser (and the `celes` token tree) are
//! built on.

mod config;
mod error;
mod reader;
mod strref;
mod token;
pub mod utf8;

pub use config::LexerConfig;
pub use error::{LexError, LexErrorKind};
pub use strref::StrRef;
pub use token::{BaseToken, Iws, TokenCategory, WsType};

use std::rc::Rc;

use crate::position::Position;
use reader::Cursor;

/// A cursor over UTF-8 source text.
///
/// The buffer is a reference-counted `Rc<str>` rather than a borrowed slice,
/// so tokens it hands out (whose `text` shares the same `Rc`) can outlive
/// the borrow of any individual `peek_*`/`get_*` call — needed to support
/// holding a peeked token live across the `&mut self` call that commits it.
/// This mirrors the substrate's `owns_memory` flag; [`Lexer::new`] and
/// [`Lexer::from_owned`] both end up sharing the same owned representation,
/// the distinction is only in whether the caller's string is copied first.
#[derive(Debug, Clone)]
pub struct Lexer {
    source: Rc<str>,
    cursor: Cursor,
    config: LexerConfig,
}

impl Lexer {
    /// Copies `source` (after stripping a leading BOM) into a fresh,
    /// independently owned buffer.
    pub fn new(source: &str) -> Self {
        Self::with_config(source, LexerConfig::default())
    }

    /// Like [`Lexer::new`], with an explicit default whitespace mode for
    /// [`Lexer::next_token`]/[`Lexer::peek_next_token`].
    pub fn with_config(source: &str, config: LexerConfig) -> Self {
        Self {
            source: Rc::from(strip_bom(source)),
            cursor: Cursor::new(),
            config,
        }
    }

    /// Takes ownership of `source` without an extra copy.
    pub fn from_owned(source: String) -> Lexer {
        let source = strip_bom(&source).to_string();
        Lexer {
            source: Rc::from(source),
            cursor: Cursor::new(),
            config: LexerConfig::default(),
        }
    }

    /// Returns the next base token using this lexer's configured default
    /// whitespace mode, advancing past it.
    pub fn next_token(&mut self) -> BaseToken {
        self.get_token(self.config.default_iws)
    }

    /// Returns the next base token using the configured default whitespace
    /// mode, without advancing.
    pub fn peek_next_token(&self) -> BaseToken {
        self.peek_token(self.config.default_iws)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the next base token without advancing the cursor.
    pub fn peek_token(&self, iws: Iws) -> BaseToken {
        let mut working = self.cursor;
        scan_token(&self.source, &mut working, iws)
    }

    /// Returns the next base token and advances the cursor past it.
    pub fn get_token(&mut self, iws: Iws) -> BaseToken {
        let mut working = self.cursor;
        let tok = scan_token(&self.source, &mut working, iws);
        self.cursor = working;
        tok
    }

    /// Returns the next single code point as a token, without advancing.
    /// Used when parsing a known delimiter byte-by-byte (e.g. inside a
    /// string literal), where category grouping must not occur.
    pub fn peek_char(&self) -> BaseToken {
        let mut working = self.cursor;
        scan_char(&self.source, &mut working)
    }

    /// Returns the next single code point as a token and commits.
    pub fn get_char(&mut self) -> BaseToken {
        let mut working = self.cursor;
        let tok = scan_char(&self.source, &mut working);
        self.cursor = working;
        tok
    }

    /// Restores the cursor to `tok`'s start.
    pub fn reset_to_token(&mut self, tok: &BaseToken) {
        self.cursor = Cursor::at(tok.start_offset, tok.row, tok.col, tok.start_pending_newline);
    }

    /// Jumps the cursor to `tok`'s end (its `next_offset`), committing it
    /// without rescanning.
    pub fn pass_token(&mut self, tok: &BaseToken) {
        self.cursor = Cursor::at(
            tok.next_offset,
            tok.next_pos.row,
            tok.next_pos.col,
            tok.next_pending_newline,
        );
    }

    pub fn is_eof(&self) -> bool {
        self.cursor.at_eof(&self.source)
    }

    pub fn offset(&self) -> usize {
        self.cursor.offset
    }

    pub fn position(&self) -> crate::position::Position {
        self.cursor.position()
    }
}

fn strip_bom(source: &str) -> &str {
    source.strip_prefix('\u{FEFF}').unwrap_or(source)
}

fn classify(ch: char) -> TokenCategory {
    if ch.is_whitespace() {
        TokenCategory::Whitespace
    } else if ch.is_ascii_alphabetic() || (ch as u32) >= 0x80 {
        TokenCategory::Alpha
    } else if ch.is_ascii_digit() {
        TokenCategory::Digit
    } else {
        TokenCategory::Other
    }
}

fn ws_type_of(ch: char) -> WsType {
    match ch {
        '\n' | '\r' => WsType::Newline,
        '\t' => WsType::Tab,
        ' ' => WsType::Space,
        _ => WsType::Unknown,
    }
}

fn eof_token(source: &Rc<str>, working: &Cursor) -> BaseToken {
    let pos = working.position();
    let pending = working.pending_newline();
    BaseToken {
        text: StrRef::from_rc_range(Rc::clone(source), working.offset, working.offset),
        ch: None,
        kind: TokenCategory::None,
        ws_type: WsType::Unknown,
        passed_whitespace: false,
        passed_newline: false,
        row: pos.row,
        col: pos.col,
        start_offset: working.offset,
        next_offset: working.offset,
        next_pos: pos,
        start_pending_newline: pending,
        next_pending_newline: pending,
        error: None,
    }
}

/// A token standing in for a byte sequence that failed to decode. Carries
/// no source text (the offending bytes may not form a valid `str` range to
/// slice), but does carry the `LexErrorKind` and the cursor state needed to
/// keep scanning past it.
fn invalid_token(
    start_offset: usize,
    start_pos: Position,
    start_pending_newline: Option<char>,
    working: &Cursor,
    kind: LexErrorKind,
) -> BaseToken {
    BaseToken {
        text: StrRef::new(""),
        ch: None,
        kind: TokenCategory::Invalid,
        ws_type: WsType::Unknown,
        passed_whitespace: false,
        passed_newline: false,
        row: start_pos.row,
        col: start_pos.col,
        start_offset,
        next_offset: working.offset,
        next_pos: working.position(),
        start_pending_newline,
        next_pending_newline: working.pending_newline(),
        error: Some(kind),
    }
}

fn scan_token(source: &Rc<str>, working: &mut Cursor, iws: Iws) -> BaseToken {
    let mut passed_whitespace = false;
    let mut passed_newline = false;

    if iws == Iws::Ignore {
        loop {
            match working.peek_char(source) {
                Ok(Some((ch, _))) if classify(ch) == TokenCategory::Whitespace => {
                    passed_whitespace = true;
                    if ch == '\n' || ch == '\r' {
                        passed_newline = true;
                    }
                    let _ = working.advance(source);
                }
                _ => break,
            }
        }
    }

    let start_offset = working.offset;
    let start_pos = working.position();
    let start_pending_newline = working.pending_newline();

    let first = match working.peek_char(source) {
        Ok(Some((ch, _))) => ch,
        Ok(None) => {
            let mut tok = eof_token(source, working);
            tok.passed_whitespace = passed_whitespace;
            tok.passed_newline = passed_newline;
            tok.row = start_pos.row;
            tok.col = start_pos.col;
            tok.start_pending_newline = start_pending_newline;
            return tok;
        }
        Err(kind) => {
            let _ = working.advance(source);
            let mut tok = invalid_token(start_offset, start_pos, start_pending_newline, working, kind);
            tok.passed_whitespace = passed_whitespace;
            tok.passed_newline = passed_newline;
            return tok;
        }
    };

    let kind = classify(first);
    let _ = working.advance(source);
    let mut code_point_count = 1usize;

    if matches!(kind, TokenCategory::Alpha | TokenCategory::Digit) {
        loop {
            match working.peek_char(source) {
                Ok(Some((ch, _))) if classify(ch) == kind => {
                    let _ = working.advance(source);
                    code_point_count += 1;
                }
                _ => break,
            }
        }
    }

    let text = StrRef::from_rc_range(Rc::clone(source), start_offset, working.offset);
    let ch = if code_point_count == 1 {
        Some(first)
    } else {
        None
    };
    let ws_type = if kind == TokenCategory::Whitespace {
        ws_type_of(first)
    } else {
        WsType::Unknown
    };

    BaseToken {
        text,
        ch,
        kind,
        ws_type,
        passed_whitespace,
        passed_newline,
        row: start_pos.row,
        col: start_pos.col,
        start_offset,
        next_offset: working.offset,
        next_pos: working.position(),
        start_pending_newline,
        next_pending_newline: working.pending_newline(),
        error: None,
    }
}

fn scan_char(source: &Rc<str>, working: &mut Cursor) -> BaseToken {
    let start_offset = working.offset;
    let start_pos = working.position();
    let start_pending_newline = working.pending_newline();

    let ch = match working.peek_char(source) {
        Ok(Some((ch, _))) => ch,
        Ok(None) => return eof_token(source, working),
        Err(kind) => {
            let _ = working.advance(source);
            return invalid_token(start_offset, start_pos, start_pending_newline, working, kind);
        }
    };
    let _ = working.advance(source);

    let kind = classify(ch);
    let ws_type = if kind == TokenCategory::Whitespace {
        ws_type_of(ch)
    } else {
        WsType::Unknown
    };

    BaseToken {
        text: StrRef::from_rc_range(Rc::clone(source), start_offset, working.offset),
        ch: Some(ch),
        kind,
        ws_type,
        passed_whitespace: false,
        passed_newline: false,
        row: start_pos.row,
        col: start_pos.col,
        start_offset,
        next_offset: working.offset,
        next_pos: working.position(),
        start_pending_newline,
        next_pending_newline: working.pending_newline(),
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignore_mode_splits_words_and_marks_passed_whitespace() {
        let mut lx = Lexer::new("a b");
        let t1 = lx.get_token(Iws::Ignore);
        assert_eq!(t1.text.as_str(), "a");
        assert!(!t1.passed_whitespace);
        let t2 = lx.get_token(Iws::Ignore);
        assert_eq!(t2.text.as_str(), "b");
        assert!(t2.passed_whitespace);
    }

    #[test]
    fn ignore_mode_marks_passed_newline() {
        let mut lx = Lexer::new("a\nb");
        lx.get_token(Iws::Ignore);
        let t2 = lx.get_token(Iws::Ignore);
        assert_eq!(t2.text.as_str(), "b");
        assert!(t2.passed_newline);
    }

    #[test]
    fn crlf_counts_as_one_row_advance() {
        let mut lx = Lexer::new("\r\nx");
        let ws1 = lx.get_token(Iws::Parse);
        assert_eq!(ws1.ws_type, WsType::Newline);
        let ws2 = lx.get_token(Iws::Parse);
        assert_eq!(ws2.ws_type, WsType::Newline);
        let t = lx.get_token(Iws::Parse);
        assert_eq!(t.text.as_str(), "x");
        assert_eq!(t.row, 2);
        assert_eq!(t.col, 1);
    }

    #[test]
    fn parse_mode_surfaces_whitespace_as_tokens() {
        let mut lx = Lexer::new("a b");
        let t1 = lx.get_token(Iws::Parse);
        assert_eq!(t1.text.as_str(), "a");
        let ws = lx.get_token(Iws::Parse);
        assert_eq!(ws.kind, TokenCategory::Whitespace);
        assert_eq!(ws.ws_type, WsType::Space);
        let t2 = lx.get_token(Iws::Parse);
        assert_eq!(t2.text.as_str(), "b");
    }

    #[test]
    fn peek_is_idempotent_and_does_not_advance() {
        let lx = Lexer::new("hello");
        let p1 = lx.peek_token(Iws::Ignore);
        let p2 = lx.peek_token(Iws::Ignore);
        assert_eq!(p1.text.as_str(), p2.text.as_str());
        assert_eq!(p1.row, p2.row);
        assert_eq!(p1.col, p2.col);
        assert_eq!(lx.offset(), 0);
    }

    #[test]
    fn peek_then_pass_equals_get() {
        let mut a = Lexer::new("hello world");
        let mut b = Lexer::new("hello world");

        let peeked = a.peek_token(Iws::Ignore);
        a.pass_token(&peeked);
        let got = b.get_token(Iws::Ignore);

        assert_eq!(a.offset(), b.offset());
        assert_eq!(a.position(), b.position());
        assert_eq!(peeked.text.as_str(), got.text.as_str());
    }

    #[test]
    fn reset_to_token_rewinds_cursor() {
        let mut lx = Lexer::new("abc def");
        let first = lx.get_token(Iws::Ignore);
        lx.get_token(Iws::Ignore);
        lx.reset_to_token(&first);
        assert_eq!(lx.offset(), 0);
        assert_eq!(lx.position(), crate::position::Position::new(1, 1));
    }

    #[test]
    fn alpha_includes_non_ascii() {
        let mut lx = Lexer::new("café");
        let t = lx.get_token(Iws::Ignore);
        assert_eq!(t.kind, TokenCategory::Alpha);
        assert_eq!(t.text.as_str(), "café");
    }

    #[test]
    fn whitespace_and_other_runs_are_length_one() {
        let mut lx = Lexer::new("::");
        let t1 = lx.get_token(Iws::Ignore);
        assert_eq!(t1.text.as_str(), ":");
        assert_eq!(t1.kind, TokenCategory::Other);
        let t2 = lx.get_token(Iws::Ignore);
        assert_eq!(t2.text.as_str(), ":");
    }

    #[test]
    fn empty_input_is_eof() {
        let mut lx = Lexer::new("");
        let t = lx.get_token(Iws::Ignore);
        assert!(t.is_eof());
    }

    #[test]
    fn default_config_ignores_whitespace_in_next_token() {
        let mut lx = Lexer::new("a b");
        assert_eq!(lx.next_token().text.as_str(), "a");
        assert_eq!(lx.next_token().text.as_str(), "b");
    }

    #[test]
    fn configured_parse_mode_surfaces_whitespace_in_next_token() {
        let mut lx = Lexer::with_config("a b", LexerConfig { default_iws: Iws::Parse });
        assert_eq!(lx.next_token().text.as_str(), "a");
        assert_eq!(lx.next_token().kind, TokenCategory::Whitespace);
        assert_eq!(lx.next_token().text.as_str(), "b");
    }

    #[test]
    fn bom_only_input_is_eof() {
        let mut lx = Lexer::new("\u{FEFF}");
        let t = lx.get_token(Iws::Ignore);
        assert!(t.is_eof());
    }

    #[test]
    fn get_char_never_groups_runs() {
        let mut lx = Lexer::new("ab");
        let t1 = lx.get_char();
        assert_eq!(t1.text.as_str(), "a");
        let t2 = lx.get_char();
        assert_eq!(t2.text.as_str(), "b");
    }

    #[test]
    fn pass_token_preserves_pending_newline_half_across_a_split_pair() {
        // "\r" then "\n" are scanned as two separate Parse-mode tokens; the
        // committed cursor between them sits inside an unpaired newline
        // half, which pass_token must carry forward so the second "\n"
        // doesn't get double-counted as its own row advance.
        let mut lx = Lexer::new("\r\nx");
        let cr = lx.get_token(Iws::Parse);
        assert_eq!(cr.ws_type, WsType::Newline);
        assert_eq!(lx.position(), crate::position::Position::new(2, 1));

        let lf = lx.get_token(Iws::Parse);
        assert_eq!(lf.ws_type, WsType::Newline);
        // paired off: still row 2, not row 3
        assert_eq!(lx.position(), crate::position::Position::new(2, 1));

        let t = lx.get_token(Iws::Parse);
        assert_eq!(t.text.as_str(), "x");
        assert_eq!(t.row, 2);
        assert_eq!(t.col, 1);
    }

    #[test]
    fn position_monotonicity_holds_across_gets() {
        let mut lx = Lexer::new("ab cd\nef");
        let mut prev = (lx.offset(), lx.position());
        for _ in 0..6 {
            lx.get_token(Iws::Ignore);
            let cur = (lx.offset(), lx.position());
            assert!(cur.0 >= prev.0);
            prev = cur;
            if lx.is_eof() {
                break;
            }
        }
    }
}
