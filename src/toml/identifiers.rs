//! Bare/quoted/literal identifier segments and dotted paths.

use crate::lexer::{Iws, TokenCategory};
use crate::lexer::Lexer;

use super::errors::ParseErrorKind;
use super::strings;

/// A bare identifier: a run of `{Alpha, Digit, '_', '-'}` base tokens with
/// no whitespace between them.
fn parse_bare(lexer: &mut Lexer) -> Result<String, ParseErrorKind> {
    let mut text = String::new();
    let mut first = true;
    loop {
        let tok = lexer.peek_token(Iws::Ignore);
        if !first && tok.passed_whitespace {
            break;
        }
        let is_part = matches!(tok.kind, TokenCategory::Alpha | TokenCategory::Digit)
            || (tok.kind == TokenCategory::Other && matches!(tok.text.as_str(), "_" | "-"));
        if !is_part {
            break;
        }
        text.push_str(tok.text.as_str());
        lexer.pass_token(&tok);
        first = false;
    }
    if text.is_empty() {
        Err(ParseErrorKind::UnexpectedText)
    } else {
        Ok(text)
    }
}

/// A single path segment: a quoted string, a literal string, or a bare
/// identifier.
fn parse_segment(lexer: &mut Lexer) -> Result<String, ParseErrorKind> {
    let tok = lexer.peek_token(Iws::Ignore);
    if tok.is_eof() {
        return Err(ParseErrorKind::UnexpectedEOF);
    }
    if tok.kind == TokenCategory::Other && tok.text.as_str() == "\"" {
        lexer.pass_token(&tok);
        return strings::parse_basic(lexer);
    }
    if tok.kind == TokenCategory::Other && tok.text.as_str() == "'" {
        lexer.pass_token(&tok);
        return strings::parse_literal(lexer);
    }
    parse_bare(lexer)
}

/// A dotted path: one or more segments separated by `.`, with optional
/// whitespace around each dot.
pub(crate) fn parse_path(lexer: &mut Lexer) -> Result<Vec<String>, ParseErrorKind> {
    let mut segments = vec![parse_segment(lexer)?];
    loop {
        let tok = lexer.peek_token(Iws::Ignore);
        if tok.kind == TokenCategory::Other && tok.text.as_str() == "." {
            lexer.pass_token(&tok);
            segments.push(parse_segment(lexer)?);
        } else {
            break;
        }
    }
    Ok(segments)
}
