//! A non-owning view over a slice of source text.
//!
//! The original substrate represents this as a raw `(ptr, len)` pair over a
//! NUL-terminated buffer, with comparisons that probe one byte past `len`
//! for a terminator. Here the backing buffer is a reference-counted `Rc<str>`
//! plus a byte range: cheap to clone (a refcount bump, no data copy) and
//! independent of any borrow of the lexer that produced it, so a token can
//! be held across a later `&mut` call on that lexer. Comparisons are plain
//! slice equality, which is observably identical to the terminator probe for
//! all valid-UTF-8, NUL-free input (this crate's entire domain).

use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct StrRef {
    source: Rc<str>,
    start: usize,
    end: usize,
}

impl StrRef {
    /// Builds a standalone ref over its own private copy of `text`. Mainly
    /// useful for tests and the EOF sentinel; tokens produced by the lexer
    /// use `from_rc_range` to share its buffer instead.
    pub fn new(text: &str) -> Self {
        let source: Rc<str> = Rc::from(text);
        let end = source.len();
        Self { source, start: 0, end }
    }

    pub(crate) fn from_rc_range(source: Rc<str>, start: usize, end: usize) -> Self {
        debug_assert!(start <= end && end <= source.len());
        Self { source, start, end }
    }

    pub fn as_str(&self) -> &str {
        &self.source[self.start..self.end]
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Case-insensitive (ASCII-folding) comparison against another ref.
    pub fn eq_ignore_ascii_case(&self, other: &StrRef) -> bool {
        self.as_str().eq_ignore_ascii_case(other.as_str())
    }

    /// Trim leading and trailing Unicode whitespace code points, staying
    /// within the same shared buffer.
    pub fn trimmed(&self) -> StrRef {
        let text = self.as_str();
        let trimmed = text.trim();
        let offset_start = self.start + (trimmed.as_ptr() as usize - text.as_ptr() as usize);
        let offset_end = offset_start + trimmed.len();
        StrRef {
            source: Rc::clone(&self.source),
            start: offset_start,
            end: offset_end,
        }
    }
}

impl PartialEq for StrRef {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for StrRef {}

impl PartialEq<str> for StrRef {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}
