//! Integer and float scanning across bases 2/8/10/16.
//!
//! Numbers are scanned code-point-at-a-time rather than via base tokens,
//! since the boundary between a digit run, a base prefix letter, a `.`,
//! and an exponent marker doesn't line up with the lexer's maximal-munch
//! category runs. The base-prefix lookahead below is the one place this
//! module leans on the peek/pass/reset cursor idiom instead of manual
//! offset bookkeeping: two characters are tentatively consumed and, if
//! they don't spell a prefix, `reset_to_token` un-consumes them.

use crate::lexer::{Iws, Lexer, TokenCategory};

use super::errors::ParseErrorKind;
use super::value::Value;

/// `parse_number`'s failure modes. `inf`/`nan` (with an optional sign) are
/// recognized but deliberately unsupported, same as the unsigned spellings
/// `Parser::parse_value` already rejects — kept distinct from
/// `ParseErrorKind` so the caller can pick the right diagnostic message
/// instead of a generic one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberError {
    Kind(ParseErrorKind),
    InfUnsupported,
    NanUnsupported,
}

fn is_digit_for_base(ch: char, base: u32) -> bool {
    match base {
        2 => matches!(ch, '0' | '1'),
        8 => ch.is_digit(8),
        16 => ch.is_ascii_hexdigit(),
        _ => ch.is_ascii_digit(),
    }
}

/// Scans a number starting at the lexer's current position and returns
/// its parsed value. The caller has already confirmed the next code
/// point looks like the start of a number (a digit, or a `+`/`-` sign).
pub(crate) fn parse_number(lexer: &mut Lexer) -> Result<Value, NumberError> {
    let mut negative = false;
    let sign = lexer.peek_char();
    if matches!(sign.ch, Some('+') | Some('-')) {
        negative = sign.ch == Some('-');
        lexer.pass_token(&sign);
    }

    let word = lexer.peek_token(Iws::Ignore);
    if word.kind == TokenCategory::Alpha {
        match word.text.as_str() {
            "inf" => {
                lexer.pass_token(&word);
                return Err(NumberError::InfUnsupported);
            }
            "nan" => {
                lexer.pass_token(&word);
                return Err(NumberError::NanUnsupported);
            }
            _ => {}
        }
    }

    let mut base = 10u32;
    let zero = lexer.peek_char();
    if zero.ch == Some('0') {
        lexer.pass_token(&zero);
        let marker = lexer.peek_char();
        match marker.ch {
            Some('b') | Some('B') => {
                lexer.pass_token(&marker);
                base = 2;
            }
            Some('o') | Some('O') => {
                lexer.pass_token(&marker);
                base = 8;
            }
            Some('x') | Some('X') => {
                lexer.pass_token(&marker);
                base = 16;
            }
            _ => lexer.reset_to_token(&zero),
        }
    }

    let mut text = String::new();
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;
    let mut is_real = false;

    loop {
        let tok = lexer.peek_char();
        let Some(ch) = tok.ch else { break };

        if ch == '_' {
            if !seen_digit {
                return Err(NumberError::Kind(ParseErrorKind::UnexpectedText));
            }
            lexer.pass_token(&tok);
            let next = lexer.peek_char();
            if !next.ch.map(|c| is_digit_for_base(c, base)).unwrap_or(false) {
                return Err(NumberError::Kind(ParseErrorKind::UnexpectedText));
            }
            continue;
        }

        if is_digit_for_base(ch, base) {
            text.push(ch);
            seen_digit = true;
            lexer.pass_token(&tok);
            continue;
        }

        if base == 16 && ch.is_ascii_alphabetic() {
            // Open Question 2: a non-hex letter after at least one hex
            // digit is "unexpected text", not a clean premature stop.
            return Err(NumberError::Kind(ParseErrorKind::UnexpectedText));
        }

        if base == 10 && ch == '.' && seen_digit && !seen_dot && !seen_exp {
            text.push('.');
            seen_dot = true;
            is_real = true;
            lexer.pass_token(&tok);
            continue;
        }

        if base == 10 && (ch == 'e' || ch == 'E') && seen_digit && !seen_exp {
            text.push('e');
            seen_exp = true;
            is_real = true;
            lexer.pass_token(&tok);
            let exp_sign = lexer.peek_char();
            if matches!(exp_sign.ch, Some('+') | Some('-')) {
                text.push(exp_sign.ch.unwrap());
                lexer.pass_token(&exp_sign);
            }
            continue;
        }

        break;
    }

    if text.is_empty() {
        return Err(NumberError::Kind(ParseErrorKind::UnexpectedText));
    }

    if is_real {
        let parsed: f64 = text.parse().map_err(|_| NumberError::Kind(ParseErrorKind::UnexpectedText))?;
        Ok(Value::Real(if negative { -parsed } else { parsed }))
    } else {
        let parsed = i64::from_str_radix(&text, base).map_err(|_| NumberError::Kind(ParseErrorKind::UnexpectedText))?;
        Ok(Value::Integer(if negative { -parsed } else { parsed }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<Value, NumberError> {
        let mut lx = Lexer::new(src);
        parse_number(&mut lx)
    }

    #[test]
    fn parses_plain_negative_integer() {
        assert!(matches!(parse("-123456789").unwrap(), Value::Integer(-123456789)));
    }

    #[test]
    fn parses_hex_with_underscores() {
        assert!(matches!(parse("0xDEAD_BEEF").unwrap(), Value::Integer(0xDEADBEEF)));
    }

    #[test]
    fn parses_negative_exponent_real() {
        match parse("-1.25e-3").unwrap() {
            Value::Real(f) => assert!((f - (-0.00125)).abs() < 1e-9),
            other => panic!("expected Real, got {other:?}"),
        }
    }

    #[test]
    fn zero_e_ten_is_base_ten_real() {
        // Open Question 4: "0e" isn't a recognized base prefix, so the
        // leading 0 stays in base 10 and the scanner reaches the exponent.
        match parse("0e10").unwrap() {
            Value::Real(f) => assert_eq!(f, 0.0),
            other => panic!("expected Real, got {other:?}"),
        }
    }

    #[test]
    fn hex_with_trailing_non_hex_alpha_is_unexpected_text() {
        assert_eq!(parse("0xDEADZ"), Err(NumberError::Kind(ParseErrorKind::UnexpectedText)));
    }

    #[test]
    fn underscore_not_followed_by_digit_is_unexpected_text() {
        assert_eq!(parse("1_"), Err(NumberError::Kind(ParseErrorKind::UnexpectedText)));
    }

    #[test]
    fn signed_inf_and_nan_are_unsupported() {
        assert_eq!(parse("-inf"), Err(NumberError::InfUnsupported));
        assert_eq!(parse("+inf"), Err(NumberError::InfUnsupported));
        assert_eq!(parse("-nan"), Err(NumberError::NanUnsupported));
        assert_eq!(parse("+nan"), Err(NumberError::NanUnsupported));
    }

    #[test]
    fn binary_and_octal_prefixes_are_recognized() {
        assert!(matches!(parse("0b101").unwrap(), Value::Integer(5)));
        assert!(matches!(parse("0o17").unwrap(), Value::Integer(15)));
    }
}
