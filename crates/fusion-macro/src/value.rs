//! The `Value` tree produced by [`parse`](crate::parse) and consumed by
//! [`manifest`](crate::manifest).
//!
//! Tables are ordered: keys keep their first-seen position, and a later write
//! to the same key replaces the value in place. Keys are always strings, even
//! when the source literal used a numeric bracket index like `[1]`.

use indexmap::IndexMap;
use std::fmt;

/// Ordered key → value mapping used by [`Value::Table`] and [`Value::NamedTable`].
pub type Table = IndexMap<String, Value>;

/// A parsed table-literal value.
///
/// Mirrors JSON types, but separates integers from floats (the literal form
/// preserves the distinction) and adds [`Value::NamedTable`] for tagged records
/// such as `Input { SourceOp = "Merge1" }`.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    /// Key-value pairs in insertion order.
    Table(Table),
    /// A table prefixed by an identifier, optionally with empty call parens
    /// (`ordered() { ... }`). The parens are part of `name`.
    NamedTable { name: String, fields: Table },
}

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of `Integer` and `Float` alike.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The field mapping of a `Table` or `NamedTable`.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(fields) | Value::NamedTable { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// The name of a `NamedTable`, `None` for every other variant.
    pub fn name(&self) -> Option<&str> {
        match self {
            Value::NamedTable { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Look up a field of a `Table` or `NamedTable`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_table()?.get(key)
    }

    /// Build a `NamedTable` from a name and an iterator of fields.
    pub fn named<N, I, K>(name: N, fields: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::NamedTable {
            name: name.into(),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Build a `Table` from an iterator of fields, keeping iteration order.
    pub fn table<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Table(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Equality is numeric across `Integer` and `Float` (`Integer(1) == Float(1.0)`),
/// so a tree read back from JSON compares equal to the tree it was written
/// from. Tables compare entry by entry in order, so the same fields in a
/// different order are unequal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => {
                *a as f64 == *b
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => tables_eq(a, b),
            (
                Value::NamedTable { name: a, fields: fa },
                Value::NamedTable { name: b, fields: fb },
            ) => a == b && tables_eq(fa, fb),
            _ => false,
        }
    }
}

fn tables_eq(a: &Table, b: &Table) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b.iter())
            .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
}

/// Renders the canonical table-literal form, same as [`manifest`](crate::manifest).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::manifest::manifest(self))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Table> for Value {
    fn from(fields: Table) -> Self {
        Value::Table(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        assert!(Value::Nil.is_nil());
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Value::Integer(3).as_str(), None);

        let named = Value::named("Input", [("Value", Value::Float(0.5))]);
        assert_eq!(named.name(), Some("Input"));
        assert_eq!(named.get("Value").and_then(Value::as_f64), Some(0.5));
        assert_eq!(named.as_table().map(Table::len), Some(1));
        assert_eq!(Value::Array(vec![]).get("Value"), None);
    }

    #[test]
    fn numeric_equality_crosses_kinds() {
        assert_eq!(Value::Integer(1), Value::Float(1.0));
        assert_ne!(Value::Integer(1), Value::Float(1.5));
        assert_ne!(Value::Integer(1), Value::from("1"));
    }

    #[test]
    fn table_equality_is_ordered() {
        let ab = Value::table([("a", Value::Nil), ("b", Value::Nil)]);
        let ba = Value::table([("b", Value::Nil), ("a", Value::Nil)]);
        assert_ne!(ab, ba);
        assert_ne!(ab, Value::named("T", [("a", Value::Nil), ("b", Value::Nil)]));
    }
}
