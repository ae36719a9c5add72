//! Recursive-descent TOML parser over the base lexer.
//!
//! Threads a `Vec`-backed diagnostic accumulator through parser state the
//! same way the client the base lexer is built for threads its own
//! `errors: Vec<Diagnostic>` field — fail fast (return on the first error
//! kind) while still recording every diagnostic encountered along the way.
//!
//! Table identity is shared via `Rc<RefCell<Table>>` rather than the
//! deferred "commit the previous scratch table once its final key is
//! known" dance a single-owner implementation needs: opening a header
//! materializes and inserts the new table immediately, and every
//! subsequent key-pair mutates that same shared handle through its
//! `RefCell`. There is nothing left to commit at end-of-input.

use std::cell::RefCell;
use std::rc::Rc;

use crate::diagnostics::Accumulator;
use crate::lexer::{Iws, Lexer, TokenCategory};
use crate::position::Position;

use super::config::ParserConfig;
use super::errors::{ParseErrorKind, TomlOpenError};
use super::identifiers;
use super::numbers;
use super::strings;
use super::value::{Array, Table, Value};

pub struct Parser {
    file: String,
    lexer: Lexer,
    root: Rc<RefCell<Table>>,
    cur_table: Rc<RefCell<Table>>,
    errors: Accumulator,
}

impl Parser {
    pub fn new(file: &str, source: &str) -> Self {
        Self::with_config(file, source, ParserConfig::default())
    }

    pub fn with_config(file: &str, source: &str, config: ParserConfig) -> Self {
        let root = Rc::new(RefCell::new(Table::new()));
        Self {
            file: file.to_string(),
            lexer: Lexer::new(source),
            cur_table: Rc::clone(&root),
            root,
            errors: Accumulator::with_max(config.max_errors),
        }
    }

    /// Parses the whole input and consumes `self`. On success, the root
    /// table (refs=1, plus this call's own now-dropped handle). On
    /// failure, the accumulated diagnostic string rendered into a single
    /// `TomlOpenError::Parse`.
    pub fn parse(mut self) -> Result<Rc<RefCell<Table>>, TomlOpenError> {
        match self.run() {
            Ok(()) => Ok(self.root),
            Err(_) => Err(TomlOpenError::Parse(self.errors.build_string())),
        }
    }

    fn run(&mut self) -> Result<(), ParseErrorKind> {
        loop {
            self.skip_comments();
            let tok = self.lexer.peek_token(Iws::Ignore);
            if tok.is_eof() {
                return Ok(());
            }
            if tok.kind == TokenCategory::Other && tok.text.as_str() == "[" {
                self.parse_table_header()?;
            } else {
                self.parse_key_pair()?;
            }
        }
    }

    fn skip_comments(&mut self) {
        loop {
            let tok = self.lexer.peek_token(Iws::Ignore);
            if tok.kind == TokenCategory::Other && tok.text.as_str() == "#" {
                self.lexer.pass_token(&tok);
                self.skip_to_eol();
            } else {
                break;
            }
        }
    }

    fn skip_to_eol(&mut self) {
        loop {
            let tok = self.lexer.get_char();
            match tok.ch {
                None => break,
                Some('\n') | Some('\r') => break,
                Some(_) => {}
            }
        }
    }

    fn parse_table_header(&mut self) -> Result<(), ParseErrorKind> {
        let lbracket = self.lexer.get_token(Iws::Ignore);
        debug_assert_eq!(lbracket.text.as_str(), "[");

        let is_array = {
            let tok = self.lexer.peek_token(Iws::Ignore);
            if tok.kind == TokenCategory::Other && tok.text.as_str() == "[" {
                self.lexer.pass_token(&tok);
                true
            } else {
                false
            }
        };

        let path = self.parse_path()?;

        self.expect_char(']')?;
        if is_array {
            self.expect_char(']')?;
        }

        if is_array {
            self.open_table_array(&path)
        } else {
            self.open_table(&path)
        }
    }

    fn expect_char(&mut self, expected: char) -> Result<(), ParseErrorKind> {
        let tok = self.lexer.get_token(Iws::Ignore);
        if tok.is_eof() {
            return Err(self.fail(tok.position(), ParseErrorKind::UnexpectedEOF));
        }
        if tok.ch != Some(expected) {
            return Err(self.fail(tok.position(), ParseErrorKind::UnexpectedText));
        }
        Ok(())
    }

    fn parse_key_pair(&mut self) -> Result<(), ParseErrorKind> {
        let path = self.parse_path()?;
        self.expect_char('=')?;
        let value_pos = self.lexer.position();
        let value = self.parse_value()?;

        let (parent, leaf) = self.materialize_path(Rc::clone(&self.cur_table), &path)?;
        let inserted = parent.borrow_mut().insert_if_absent(leaf, value);
        if !inserted {
            return Err(self.fail_detail(value_pos, ParseErrorKind::KeyAlreadyExists, format!("Key already exists: {leaf}")));
        }
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Value, ParseErrorKind> {
        let tok = self.lexer.peek_token(Iws::Ignore);
        if tok.is_eof() {
            return Err(self.fail(tok.position(), ParseErrorKind::UnexpectedEOF));
        }
        if tok.passed_newline {
            return Err(self.fail(tok.position(), ParseErrorKind::UnexpectedEOL));
        }

        if tok.kind == TokenCategory::Alpha {
            return match tok.text.as_str() {
                "true" => {
                    self.lexer.pass_token(&tok);
                    Ok(Value::Boolean(true))
                }
                "false" => {
                    self.lexer.pass_token(&tok);
                    Ok(Value::Boolean(false))
                }
                "inf" => {
                    self.lexer.pass_token(&tok);
                    Err(self.fail_detail(tok.position(), ParseErrorKind::Unimplemented, "inf is unsupported"))
                }
                "nan" => {
                    self.lexer.pass_token(&tok);
                    Err(self.fail_detail(tok.position(), ParseErrorKind::Unimplemented, "nan is unsupported"))
                }
                _ => Err(self.fail(tok.position(), ParseErrorKind::UnexpectedText)),
            };
        }

        if tok.kind == TokenCategory::Other && matches!(tok.text.as_str(), "\"" | "'") {
            return self.parse_string_value();
        }

        if tok.kind == TokenCategory::Digit || (tok.kind == TokenCategory::Other && matches!(tok.text.as_str(), "+" | "-")) {
            return numbers::parse_number(&mut self.lexer).map_err(|err| match err {
                numbers::NumberError::Kind(kind) => self.fail(tok.position(), kind),
                numbers::NumberError::InfUnsupported => {
                    self.fail_detail(tok.position(), ParseErrorKind::Unimplemented, "inf is unsupported")
                }
                numbers::NumberError::NanUnsupported => {
                    self.fail_detail(tok.position(), ParseErrorKind::Unimplemented, "nan is unsupported")
                }
            });
        }

        Err(self.fail(tok.position(), ParseErrorKind::UnexpectedText))
    }

    fn parse_string_value(&mut self) -> Result<Value, ParseErrorKind> {
        let opening = self.lexer.get_char();
        let delim = opening.ch.expect("single code point");
        let pos = opening.position();

        let second = self.lexer.peek_char();
        if second.ch != Some(delim) {
            let content = if delim == '"' {
                strings::parse_basic(&mut self.lexer)
            } else {
                strings::parse_literal(&mut self.lexer)
            };
            return content.map(Value::String).map_err(|kind| self.fail(pos, kind));
        }

        self.lexer.pass_token(&second);
        let third = self.lexer.peek_char();
        if third.ch == Some(delim) {
            self.lexer.pass_token(&third);
            let content = if delim == '"' {
                strings::parse_basic_multiline(&mut self.lexer)
            } else {
                strings::parse_literal_multiline(&mut self.lexer)
            };
            content.map(Value::String).map_err(|kind| self.fail(pos, kind))
        } else {
            Ok(Value::String(String::new()))
        }
    }

    fn open_table(&mut self, path: &[String]) -> Result<(), ParseErrorKind> {
        let (parent, leaf) = self.materialize_path(Rc::clone(&self.root), path)?;

        let existing = parent.borrow().get(leaf);
        let table = match existing {
            Some(Value::Table(_)) => {
                // A `[a]` header may not reopen a table already opened by
                // an earlier header — only implicit tables created while
                // materializing a dotted path (e.g. `[a.b]`'s `a`) are
                // reusable.
                let pos = self.lexer.position();
                return Err(self.fail_detail(pos, ParseErrorKind::KeyAlreadyExists, format!("Key already exists: {leaf}")));
            }
            Some(_) => {
                return Err(self.fail_path(path, ParseErrorKind::InvalidIdentifier));
            }
            None => {
                let fresh = Rc::new(RefCell::new(Table::new()));
                parent.borrow_mut().insert_if_absent(leaf, Value::Table(Rc::clone(&fresh)));
                fresh
            }
        };
        self.cur_table = table;
        Ok(())
    }

    fn open_table_array(&mut self, path: &[String]) -> Result<(), ParseErrorKind> {
        let (parent, leaf) = self.materialize_path(Rc::clone(&self.root), path)?;

        let existing = parent.borrow().get(leaf);
        let array = match existing {
            Some(Value::Array(a)) => a,
            Some(_) => {
                return Err(self.fail_path(path, ParseErrorKind::InvalidIdentifier));
            }
            None => {
                // Open Question 1: the leaf is unbound, so create the
                // array fresh rather than faulting on a null dereference.
                let fresh = Rc::new(RefCell::new(Array::new()));
                parent.borrow_mut().insert_if_absent(leaf, Value::Array(Rc::clone(&fresh)));
                fresh
            }
        };

        let table = Rc::new(RefCell::new(Table::new()));
        array.borrow_mut().push(Value::Table(Rc::clone(&table)));
        self.cur_table = table;
        Ok(())
    }

    /// Walks every segment but the last from `start`, creating missing
    /// intermediate tables, and returns `(terminal_table, leaf_key)`.
    /// Fails with `InvalidIdentifier` if a prefix segment names a
    /// non-table value.
    fn materialize_path<'p>(
        &mut self,
        start: Rc<RefCell<Table>>,
        path: &'p [String],
    ) -> Result<(Rc<RefCell<Table>>, &'p str), ParseErrorKind> {
        let (prefix, leaf) = path.split_at(path.len() - 1);
        let mut current = start;
        for segment in prefix {
            let existing = current.borrow().get(segment);
            let next = match existing {
                Some(Value::Table(t)) => t,
                Some(_) => return Err(self.fail_path(path, ParseErrorKind::InvalidIdentifier)),
                None => {
                    let fresh = Rc::new(RefCell::new(Table::new()));
                    current.borrow_mut().insert_if_absent(segment, Value::Table(Rc::clone(&fresh)));
                    fresh
                }
            };
            current = next;
        }
        Ok((current, &leaf[0]))
    }

    fn parse_path(&mut self) -> Result<Vec<String>, ParseErrorKind> {
        let pos = self.lexer.position();
        identifiers::parse_path(&mut self.lexer).map_err(|kind| self.fail(pos, kind))
    }

    fn fail(&mut self, position: Position, kind: ParseErrorKind) -> ParseErrorKind {
        self.errors.error(&self.file, position, kind.default_message());
        kind
    }

    fn fail_detail(&mut self, position: Position, kind: ParseErrorKind, message: impl Into<String>) -> ParseErrorKind {
        self.errors.error(&self.file, position, message);
        kind
    }

    fn fail_path(&mut self, path: &[String], kind: ParseErrorKind) -> ParseErrorKind {
        let pos = self.lexer.position();
        self.errors.error(&self.file, pos, format!("Invalid identifier, {}", path.join(".")));
        kind
    }
}
