//! Parse error kinds and the top-level `open`/`parse_str` error type.

use std::fmt;

/// The fixed set of error kinds a sub-parser can fail with. Each maps to
/// one of the fixed diagnostic message strings via [`ParseErrorKind::default_message`];
/// call sites that need a more specific detail (e.g. which key already
/// existed) record that detail into the accumulator directly and still
/// propagate the matching kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnexpectedEOF,
    UnexpectedEOL,
    UnexpectedText,
    Unimplemented,
    InvalidIdentifier,
    KeyAlreadyExists,
}

impl ParseErrorKind {
    pub fn default_message(self) -> &'static str {
        match self {
            Self::UnexpectedEOF => "Unexpected end of file",
            Self::UnexpectedEOL => "Unexpected end of line",
            Self::UnexpectedText => "Unexpected text",
            Self::Unimplemented => "Unicode escape codes currently unsupported",
            Self::InvalidIdentifier => "Invalid identifier",
            Self::KeyAlreadyExists => "Key already exists",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_message())
    }
}

/// The error returned by [`super::open`] / [`super::parse_str`].
#[derive(Debug)]
pub enum TomlOpenError {
    Io(std::io::Error),
    Parse(String),
}

impl TomlOpenError {
    /// The legacy numeric return-code contract: `0` success (not
    /// representable here, since this type only exists on failure),
    /// `-1` file not found / unreadable, `-2` parse error.
    pub fn code(&self) -> i32 {
        match self {
            Self::Io(_) => -1,
            Self::Parse(_) => -2,
        }
    }
}

impl fmt::Display for TomlOpenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Parse(diagnostics) => f.write_str(diagnostics),
        }
    }
}

impl std::error::Error for TomlOpenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(_) => None,
        }
    }
}

impl From<std::io::Error> for TomlOpenError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
