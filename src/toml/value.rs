//! The parsed value tree: a sum type over scalars plus ref-counted tables
//! and arrays.
//!
//! The substrate this is ported from represents `Table`/`Array` as
//! manually ref-counted handles (`addref`/`release`) over a tree that owns
//! exactly one reference per child. `Rc<RefCell<_>>` is the direct Rust
//! realization: cloning a handle is `Rc::clone`, dropping the last handle
//! runs the destructor cascade for free, and `Rc::strong_count` gives the
//! one property test that needs to observe liveness something to read.

use std::cell::RefCell;
use std::rc::Rc;

use crate::collections::TomlTable;

/// A parsed TOML value.
#[derive(Debug, Clone)]
pub enum Value {
    Invalid,
    String(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Table(Rc<RefCell<Table>>),
    Array(Rc<RefCell<Array>>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Real(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<Rc<RefCell<Table>>> {
        match self {
            Value::Table(t) => Some(Rc::clone(t)),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<Rc<RefCell<Array>>> {
        match self {
            Value::Array(a) => Some(Rc::clone(a)),
            _ => None,
        }
    }
}

/// A TOML table: an insertion-hazardous, hash-bucket-ordered mapping from
/// key to [`Value`] (see `crate::collections::TomlTable` for the preserved
/// collision behavior).
#[derive(Debug)]
pub struct Table {
    values: TomlTable<Value>,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    pub fn new() -> Self {
        Self {
            values: TomlTable::new(),
        }
    }

    pub fn pair_count(&self) -> usize {
        self.values.len()
    }

    /// The `i`-th live key/value pair in bucket order (not insertion
    /// order — see the hash table's `get_idx`).
    pub fn pair(&self, i: usize) -> Option<(String, Value)> {
        let mut seen = 0usize;
        for slot in 0..self.values.capacity() {
            if let Some((key, value)) = self.values.get_idx(slot) {
                if seen == i {
                    return Some((key.to_string(), value.clone()));
                }
                seen += 1;
            }
        }
        None
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    pub fn get_string(&self, key: &str) -> String {
        self.get(key).and_then(|v| v.as_str().map(str::to_string)).unwrap_or_default()
    }

    pub fn get_int(&self, key: &str) -> i64 {
        self.get(key).and_then(|v| v.as_int()).unwrap_or_default()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).and_then(|v| v.as_bool()).unwrap_or_default()
    }

    pub fn get_double(&self, key: &str) -> f64 {
        self.get(key).and_then(|v| v.as_double()).unwrap_or_default()
    }

    pub fn get_table(&self, key: &str) -> Option<Rc<RefCell<Table>>> {
        self.get(key).and_then(|v| v.as_table())
    }

    pub fn get_array(&self, key: &str) -> Option<Rc<RefCell<Array>>> {
        self.get(key).and_then(|v| v.as_array())
    }

    /// Resolves `path_table` in `self`, then looks up `key` within that
    /// subtable. Null-checks at both levels (Open Question 3): a missing
    /// or non-table `path_table`, or a missing `key`, both yield `None`
    /// rather than panicking.
    pub fn get_path(&self, path_table: &str, key: &str) -> Option<Value> {
        let sub = self.get_table(path_table)?;
        let value = sub.borrow().get(key);
        value
    }

    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Inserts `key => value` only if `key` is not already bound. Returns
    /// `false` (and leaves the table unchanged) if it was — the
    /// first-writer-wins rule the parser relies on for `KeyAlreadyExists`.
    pub(crate) fn insert_if_absent(&mut self, key: &str, value: Value) -> bool {
        if self.values.contains_key(key) {
            return false;
        }
        self.values.insert(key, value);
        true
    }
}

/// A TOML array: an ordered sequence of values, same ref semantics as
/// `Table`.
#[derive(Debug, Default)]
pub struct Array {
    values: Vec<Value>,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, i: usize) -> Option<Value> {
        self.values.get(i).cloned()
    }

    pub fn get_string(&self, i: usize) -> String {
        self.get(i).and_then(|v| v.as_str().map(str::to_string)).unwrap_or_default()
    }

    pub fn get_int(&self, i: usize) -> i64 {
        self.get(i).and_then(|v| v.as_int()).unwrap_or_default()
    }

    pub fn get_bool(&self, i: usize) -> bool {
        self.get(i).and_then(|v| v.as_bool()).unwrap_or_default()
    }

    pub fn get_double(&self, i: usize) -> f64 {
        self.get(i).and_then(|v| v.as_double()).unwrap_or_default()
    }

    pub(crate) fn push(&mut self, value: Value) {
        self.values.push(value);
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Invalid => serializer.serialize_unit(),
            Value::String(s) => serializer.serialize_str(s),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Real(f) => serializer.serialize_f64(*f),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Table(t) => t.borrow().serialize(serializer),
            Value::Array(a) => a.borrow().serialize(serializer),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.pair_count()))?;
        for i in 0..self.pair_count() {
            if let Some((key, value)) = self.pair(i) {
                map.serialize_entry(&key, &value)?;
            }
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Array {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.count()))?;
        for i in 0..self.count() {
            if let Some(value) = self.get(i) {
                seq.serialize_element(&value)?;
            }
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_writer_wins_on_leaf_key() {
        let mut t = Table::new();
        assert!(t.insert_if_absent("x", Value::Integer(1)));
        assert!(!t.insert_if_absent("x", Value::Integer(2)));
        assert_eq!(t.get_int("x"), 1);
    }

    #[test]
    fn typed_accessors_return_zero_defaults_on_type_mismatch() {
        let mut t = Table::new();
        t.insert_if_absent("x", Value::Boolean(true));
        assert_eq!(t.get_string("x"), "");
        assert_eq!(t.get_int("x"), 0);
        assert_eq!(t.get_double("x"), 0.0);
        assert_eq!(t.get_bool("missing"), false);
    }

    #[test]
    fn get_path_null_checks_both_levels() {
        let mut root = Table::new();
        assert_eq!(root.get_path("missing", "k"), None);

        let mut sub = Table::new();
        sub.insert_if_absent("k", Value::Integer(7));
        root.insert_if_absent("sub", Value::Table(Rc::new(RefCell::new(sub))));
        assert_eq!(root.get_path("sub", "missing"), None);
        assert_eq!(root.get_path("sub", "k").and_then(|v| v.as_int()), Some(7));
    }

    #[test]
    fn dropping_the_last_table_handle_releases_its_storage() {
        let table = Rc::new(RefCell::new(Table::new()));
        let clone = Rc::clone(&table);
        assert_eq!(Rc::strong_count(&table), 2);
        drop(clone);
        assert_eq!(Rc::strong_count(&table), 1);
    }

    #[test]
    fn array_preserves_insertion_order() {
        let mut a = Array::new();
        a.push(Value::Integer(1));
        a.push(Value::Integer(2));
        assert_eq!(a.count(), 2);
        assert_eq!(a.get(0).and_then(|v| v.as_int()), Some(1));
        assert_eq!(a.get(1).and_then(|v| v.as_int()), Some(2));
    }
}
