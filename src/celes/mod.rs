//! The "celes" token tree: a second, simpler scanner over the same source
//! text as the base lexer. Where the TOML parser leans on `BaseToken`'s
//! maximal-munch category runs, celes groups tokens itself — identifiers,
//! numbers, and strings by hand, brackets by recursive descent into a
//! nested tree, and comments by stripping them outright rather than
//! emitting them. It exists as a simpler, re-applied sibling of the base
//! lexer (the teacher repo carries the same kind of second, lighter
//! token scanner alongside its primary one); nothing here generalizes the
//! TOML grammar, and nothing in the TOML parser depends on it.

use crate::lexer::Lexer;

/// Coarse classification of a celes token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelesKind {
    Ident,
    Number,
    String,
    /// A bracket-delimited group; the opening delimiter is `{`, `[`, or `(`.
    Block(char),
    /// Anything else: a single code point.
    Other,
}

/// One node of the celes token tree. `children` is `Some` only for
/// `Block` tokens; every other kind is a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CelesToken {
    pub kind: CelesKind,
    /// The token's exact source text. For a `Block`, this is the entire
    /// delimited region, brackets included.
    pub text: String,
    pub children: Option<Vec<CelesToken>>,
}

impl CelesToken {
    fn leaf(kind: CelesKind, text: String) -> Self {
        Self { kind, text, children: None }
    }
}

/// Scans `source` into a flat sequence of top-level celes tokens (bracket
/// groups recurse internally; comments are stripped, not emitted).
pub fn tokenize(source: &str) -> Vec<CelesToken> {
    let mut lexer = Lexer::new(source);
    scan_sequence(&mut lexer, None)
}

fn matching_close(open: char) -> char {
    match open {
        '{' => '}',
        '[' => ']',
        '(' => ')',
        _ => unreachable!("matching_close called on a non-opening delimiter"),
    }
}

/// Scans a run of sibling tokens. When `closing` is `Some`, stops (and
/// consumes) the first occurrence of that delimiter; otherwise runs to
/// end of input. An unterminated block simply runs out at EOF — celes has
/// no error channel of its own, it just stops.
fn scan_sequence(lexer: &mut Lexer, closing: Option<char>) -> Vec<CelesToken> {
    let mut tokens = Vec::new();

    loop {
        let peeked = lexer.peek_char();
        let Some(ch) = peeked.ch else { break };

        if Some(ch) == closing {
            lexer.pass_token(&peeked);
            break;
        }

        if ch.is_whitespace() {
            lexer.pass_token(&peeked);
            continue;
        }

        if ch == '/' && scan_comment(lexer) {
            continue;
        }

        if ch == '\'' || ch == '"' {
            tokens.push(scan_string(lexer, ch));
            continue;
        }

        if matches!(ch, '{' | '[' | '(') {
            tokens.push(scan_block(lexer, ch));
            continue;
        }

        if ch.is_ascii_digit() || (ch == '.' && peek_second_is_digit(lexer)) {
            tokens.push(scan_number(lexer));
            continue;
        }

        if ch.is_alphanumeric() || ch == '_' {
            tokens.push(scan_ident(lexer));
            continue;
        }

        lexer.pass_token(&peeked);
        tokens.push(CelesToken::leaf(CelesKind::Other, ch.to_string()));
    }

    tokens
}

/// If the next code point is `/` and the one after it opens a line or
/// block comment, consumes the whole comment and returns `true`.
/// Otherwise leaves the cursor untouched and returns `false` so the slash
/// falls through to being scanned as an `Other` token.
fn scan_comment(lexer: &mut Lexer) -> bool {
    let slash = lexer.peek_char();
    debug_assert_eq!(slash.ch, Some('/'));

    let checkpoint = slash.clone();
    lexer.pass_token(&slash);
    let marker = lexer.peek_char();
    match marker.ch {
        Some('/') => {
            lexer.pass_token(&marker);
            loop {
                let tok = lexer.peek_char();
                match tok.ch {
                    None => break,
                    Some('\n') | Some('\r') => break,
                    Some(_) => lexer.pass_token(&tok),
                }
            }
            true
        }
        Some('*') => {
            lexer.pass_token(&marker);
            scan_nested_block_comment(lexer);
            true
        }
        _ => {
            lexer.reset_to_token(&checkpoint);
            false
        }
    }
}

/// Consumes a `/* ... */` block comment body (opening `/*` already
/// consumed), honoring nesting: an inner `/*` increments depth, and only
/// the matching `*/` at depth zero closes it.
fn scan_nested_block_comment(lexer: &mut Lexer) {
    let mut depth = 1u32;
    loop {
        let tok = lexer.peek_char();
        let Some(ch) = tok.ch else { return };
        lexer.pass_token(&tok);
        if ch == '/' {
            let next = lexer.peek_char();
            if next.ch == Some('*') {
                lexer.pass_token(&next);
                depth += 1;
            }
        } else if ch == '*' {
            let next = lexer.peek_char();
            if next.ch == Some('/') {
                lexer.pass_token(&next);
                depth -= 1;
                if depth == 0 {
                    return;
                }
            }
        }
    }
}

fn peek_second_is_digit(lexer: &Lexer) -> bool {
    let first = lexer.peek_char();
    debug_assert_eq!(first.ch, Some('.'));
    let mut probe = lexer.clone();
    probe.pass_token(&first);
    matches!(probe.peek_char().ch, Some(c) if c.is_ascii_digit())
}

/// A run of `{Alpha, Digit, '_'}` code points with no intervening
/// whitespace.
fn scan_ident(lexer: &mut Lexer) -> CelesToken {
    let mut text = String::new();
    loop {
        let tok = lexer.peek_char();
        match tok.ch {
            Some(ch) if ch.is_alphanumeric() || ch == '_' => {
                text.push(ch);
                lexer.pass_token(&tok);
            }
            _ => break,
        }
    }
    CelesToken::leaf(CelesKind::Ident, text)
}

/// Leading digits, or a leading `.` followed by a digit; at most one
/// internal `.` is consumed.
fn scan_number(lexer: &mut Lexer) -> CelesToken {
    let mut text = String::new();
    let mut seen_dot = false;

    let first = lexer.peek_char();
    if first.ch == Some('.') {
        seen_dot = true;
        text.push('.');
        lexer.pass_token(&first);
    }

    loop {
        let tok = lexer.peek_char();
        match tok.ch {
            Some(ch) if ch.is_ascii_digit() => {
                text.push(ch);
                lexer.pass_token(&tok);
            }
            Some('.') if !seen_dot => {
                seen_dot = true;
                text.push('.');
                lexer.pass_token(&tok);
            }
            _ => break,
        }
    }

    CelesToken::leaf(CelesKind::Number, text)
}

/// `delim` (`'` or `"`) is peeked but not yet consumed. `\` escapes the
/// following byte literally — no escape-sequence interpretation, unlike
/// the TOML string parser.
fn scan_string(lexer: &mut Lexer, delim: char) -> CelesToken {
    let mut text = String::new();
    text.push(delim);
    let opening = lexer.peek_char();
    lexer.pass_token(&opening);

    loop {
        let tok = lexer.peek_char();
        let Some(ch) = tok.ch else { break };
        lexer.pass_token(&tok);
        text.push(ch);
        if ch == '\\' {
            let escaped = lexer.peek_char();
            if let Some(e) = escaped.ch {
                lexer.pass_token(&escaped);
                text.push(e);
            }
            continue;
        }
        if ch == delim {
            break;
        }
    }

    CelesToken::leaf(CelesKind::String, text)
}

/// `open` is peeked but not yet consumed. Recurses via `scan_sequence` to
/// collect the nested token list, then recovers the block's full source
/// span (brackets included) from the lexer's offsets.
fn scan_block(lexer: &mut Lexer, open: char) -> CelesToken {
    let start = lexer.offset();
    let opening = lexer.peek_char();
    lexer.pass_token(&opening);

    let children = scan_sequence(lexer, Some(matching_close(open)));
    let end = lexer.offset();
    let text = lexer.source()[start..end].to_string();

    CelesToken {
        kind: CelesKind::Block(open),
        text,
        children: Some(children),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[CelesToken]) -> Vec<CelesKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn identifier_run_has_no_internal_whitespace() {
        let tokens = tokenize("foo_bar1 baz");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, CelesKind::Ident);
        assert_eq!(tokens[0].text, "foo_bar1");
        assert_eq!(tokens[1].text, "baz");
    }

    #[test]
    fn number_with_leading_dot_and_single_internal_dot() {
        let tokens = tokenize(".5 3.14 42");
        assert_eq!(kinds(&tokens), vec![CelesKind::Number, CelesKind::Number, CelesKind::Number]);
        assert_eq!(tokens[0].text, ".5");
        assert_eq!(tokens[1].text, "3.14");
    }

    #[test]
    fn lone_dot_without_following_digit_is_other() {
        let tokens = tokenize(". x");
        assert_eq!(tokens[0].kind, CelesKind::Other);
        assert_eq!(tokens[0].text, ".");
    }

    #[test]
    fn string_with_escaped_delimiter() {
        let tokens = tokenize(r#""a\"b""#);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, CelesKind::String);
        assert_eq!(tokens[0].text, r#""a\"b""#);
    }

    #[test]
    fn line_comment_is_stripped_not_emitted() {
        let tokens = tokenize("foo // trailing comment\nbar");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "foo");
        assert_eq!(tokens[1].text, "bar");
    }

    #[test]
    fn block_comment_nests() {
        let tokens = tokenize("a /* outer /* inner */ still-comment */ b");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "a");
        assert_eq!(tokens[1].text, "b");
    }

    #[test]
    fn brace_block_recurses_into_children() {
        let tokens = tokenize("{ x 1 }");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, CelesKind::Block('{'));
        assert_eq!(tokens[0].text, "{ x 1 }");
        let children = tokens[0].children.as_ref().unwrap();
        assert_eq!(kinds(children), vec![CelesKind::Ident, CelesKind::Number]);
    }

    #[test]
    fn nested_blocks_of_different_kinds() {
        let tokens = tokenize("[ ( a ) { b } ]");
        assert_eq!(tokens[0].kind, CelesKind::Block('['));
        let inner = tokens[0].children.as_ref().unwrap();
        assert_eq!(inner.len(), 2);
        assert_eq!(inner[0].kind, CelesKind::Block('('));
        assert_eq!(inner[1].kind, CelesKind::Block('{'));
    }

    #[test]
    fn unmatched_brackets_at_top_level_are_other_tokens() {
        let tokens = tokenize("} )");
        assert_eq!(kinds(&tokens), vec![CelesKind::Other, CelesKind::Other]);
    }
}
