//! One-code-point-at-a-time UTF-8 decoder over raw bytes.
//!
//! Unlike `str::chars`, this operates directly on a byte slice that has not
//! necessarily been validated as UTF-8 yet, and reports the specific ways
//! decoding can fail so callers (the base lexer) can surface a clean
//! end-of-buffer or "invalid byte" condition instead of panicking.

use super::error::LexErrorKind;

/// Decode one code point starting at `bytes[0]`.
///
/// Returns `Ok(Some((ch, len)))` where `len` is the number of bytes
/// consumed, `Ok(None)` at end-of-buffer (including the buffer-terminating
/// zero byte), or `Err(LexErrorKind::InvalidUtf8)` if the bytes at the
/// cursor don't decode to a valid code point: a bad continuation byte, a
/// sequence truncated by the end of the buffer, or an overlong encoding of
/// `U+0000`.
///
/// Five-byte lead bytes are rejected outright (see spec note: they are
/// carried in the original implementation but produce no result distinct
/// from a decode failure for any text in scope here).
pub fn next_utf32(bytes: &[u8]) -> Result<Option<(char, usize)>, LexErrorKind> {
    let Some(&first) = bytes.first() else {
        return Ok(None);
    };

    // The zero byte terminates the buffer by convention; that is
    // end-of-input, not a decode failure.
    if first == 0 {
        return Ok(None);
    }

    let (len, mut cp) = if first & 0x80 == 0x00 {
        (1usize, u32::from(first))
    } else if first & 0xE0 == 0xC0 {
        (2, u32::from(first & 0x1F))
    } else if first & 0xF0 == 0xE0 {
        (3, u32::from(first & 0x0F))
    } else if first & 0xF8 == 0xF0 {
        (4, u32::from(first & 0x07))
    } else {
        return Err(LexErrorKind::InvalidUtf8);
    };

    if bytes.len() < len {
        return Err(LexErrorKind::InvalidUtf8);
    }

    for &cont in &bytes[1..len] {
        if cont & 0xC0 != 0x80 {
            return Err(LexErrorKind::InvalidUtf8);
        }
        cp = (cp << 6) | u32::from(cont & 0x3F);
    }

    if cp == 0 {
        // Overlong encoding of U+0000.
        return Err(LexErrorKind::InvalidUtf8);
    }

    let ch = char::from_u32(cp).ok_or(LexErrorKind::InvalidUtf8)?;
    Ok(Some((ch, len)))
}
