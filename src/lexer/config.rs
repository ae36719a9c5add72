//! Ambient lexer configuration.
//!
//! The base substrate itself is parameter-free (whitespace handling is
//! selected per call via `Iws`), but callers commonly want one default for
//! an entire parse. `LexerConfig` carries that default, mirroring the
//! small `*Config` structs this corpus uses to thread a handful of knobs
//! through a parser without a full builder.

use super::token::Iws;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerConfig {
    pub default_iws: Iws,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            default_iws: Iws::Ignore,
        }
    }
}
