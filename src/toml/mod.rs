//! TOML parsing: a recursive-descent parser over the base lexer that
//! builds a ref-counted value tree. See spec behind this crate for the
//! exact grammar and the deliberate Non-goals (no Unicode escapes, no
//! inline arrays/tables, no `inf`/`nan`, no dates).

mod config;
mod errors;
mod identifiers;
mod numbers;
mod parser;
mod strings;
mod value;

pub use config::ParserConfig;
pub use errors::{ParseErrorKind, TomlOpenError};
pub use value::{Array, Table, Value};

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Reads `path` as UTF-8 text (stripping a leading BOM) and parses it as
/// TOML, using the file's display form as the diagnostic file name.
pub fn open(path: &Path) -> Result<Rc<RefCell<Table>>, TomlOpenError> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|_| {
        TomlOpenError::Parse(format!("{}: input is not valid UTF-8\n", path.display()))
    })?;
    parse_str(&path.display().to_string(), &text)
}

/// Parses `src` as TOML. `file_name` is used only to tag diagnostics.
pub fn parse_str(file_name: &str, src: &str) -> Result<Rc<RefCell<Table>>, TomlOpenError> {
    parser::Parser::new(file_name, src).parse()
}
