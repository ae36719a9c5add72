//! Basic and literal string parsing, single- and triple-quoted.
//!
//! All four variants are scanned code-point-at-a-time via
//! [`crate::lexer::Lexer::get_char`]/`peek_char`, the same byte-by-byte
//! idiom the base lexer documents for delimiter-sensitive content — base
//! tokens (maximal-munch runs) aren't the right grain here since a quote,
//! an escape, or a run of ordinary text can all sit directly adjacent to
//! each other with no category boundary between them.

use crate::lexer::Lexer;

use super::errors::ParseErrorKind;

/// Parses the body of a basic `"…"` string; the opening quote must
/// already be consumed. Stops at the closing `"`.
pub(crate) fn parse_basic(lexer: &mut Lexer) -> Result<String, ParseErrorKind> {
    let mut content = String::new();
    loop {
        let tok = lexer.get_char();
        let Some(ch) = tok.ch else {
            return Err(ParseErrorKind::UnexpectedEOF);
        };
        match ch {
            '"' => return Ok(content),
            '\n' | '\r' => return Err(ParseErrorKind::UnexpectedEOL),
            '\\' => content.push(process_escape(lexer)?),
            _ => content.push(ch),
        }
    }
}

/// Parses the body of a basic multiline `"""…"""` string; all three
/// opening quotes must already be consumed. Raw newlines are content;
/// the string ends at the first run of three consecutive `"`.
pub(crate) fn parse_basic_multiline(lexer: &mut Lexer) -> Result<String, ParseErrorKind> {
    let mut content = String::new();
    loop {
        let tok = lexer.get_char();
        let Some(ch) = tok.ch else {
            return Err(ParseErrorKind::UnexpectedEOF);
        };
        if ch == '"' {
            if close_triple(lexer, '"', &mut content)? {
                return Ok(content);
            }
            continue;
        }
        if ch == '\\' {
            content.push(process_escape(lexer)?);
            continue;
        }
        content.push(ch);
    }
}

/// Parses the body of a literal `'…'` string (no escape processing); the
/// opening quote must already be consumed.
pub(crate) fn parse_literal(lexer: &mut Lexer) -> Result<String, ParseErrorKind> {
    let mut content = String::new();
    loop {
        let tok = lexer.get_char();
        let Some(ch) = tok.ch else {
            return Err(ParseErrorKind::UnexpectedEOF);
        };
        match ch {
            '\'' => return Ok(content),
            '\n' | '\r' => return Err(ParseErrorKind::UnexpectedEOL),
            _ => content.push(ch),
        }
    }
}

/// Parses the body of a literal multiline `'''…'''` string; all three
/// opening quotes must already be consumed.
pub(crate) fn parse_literal_multiline(lexer: &mut Lexer) -> Result<String, ParseErrorKind> {
    let mut content = String::new();
    loop {
        let tok = lexer.get_char();
        let Some(ch) = tok.ch else {
            return Err(ParseErrorKind::UnexpectedEOF);
        };
        if ch == '\'' {
            if close_triple(lexer, '\'', &mut content)? {
                return Ok(content);
            }
            continue;
        }
        content.push(ch);
    }
}

/// `ch` is one delimiter already consumed. Looks ahead for two more; if
/// found, the string is closed (returns `true`). Otherwise the run of
/// `< 3` delimiters found is pushed back into `content` as literal text
/// and scanning continues (returns `false`).
fn close_triple(lexer: &mut Lexer, delim: char, content: &mut String) -> Result<bool, ParseErrorKind> {
    let mut run = 1;
    while run < 3 {
        let lookahead = lexer.peek_char();
        if lookahead.ch == Some(delim) {
            lexer.pass_token(&lookahead);
            run += 1;
        } else {
            break;
        }
    }
    if run >= 3 {
        return Ok(true);
    }
    for _ in 0..run {
        content.push(delim);
    }
    Ok(false)
}

/// Consumes the character after a `\` and returns the escaped code point.
fn process_escape(lexer: &mut Lexer) -> Result<char, ParseErrorKind> {
    let tok = lexer.get_char();
    let Some(ch) = tok.ch else {
        return Err(ParseErrorKind::UnexpectedEOF);
    };
    match ch {
        'b' => Ok('\u{8}'),
        't' => Ok('\t'),
        'n' => Ok('\n'),
        'f' => Ok('\u{c}'),
        'r' => Ok('\r'),
        '"' => Ok('"'),
        '\\' => Ok('\\'),
        'u' | 'U' => Err(ParseErrorKind::Unimplemented),
        _ => Err(ParseErrorKind::UnexpectedText),
    }
}
