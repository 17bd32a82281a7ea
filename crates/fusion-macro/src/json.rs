//! JSON interchange for [`Value`] trees.
//!
//! The mapping is the obvious one, with a single addition for named tables:
//!
//! | `Value` | JSON |
//! |---|---|
//! | `Nil` | `null` |
//! | `Bool` | `true` / `false` |
//! | `Integer`, `Float` | number |
//! | `String` | string |
//! | `Array` | array |
//! | `Table` | object |
//! | `NamedTable` | object whose first member is `"__name__": name` |
//!
//! Because `__name__` carries the table name, a table that itself has a
//! `__name__` key cannot be represented and is rejected. Non-finite floats
//! are rejected too, since JSON has no spelling for them.

use crate::error::{MacroError, Result};
use crate::manifest::manifest;
use crate::parser::parse;
use crate::value::{Table, Value};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Map, Number};

/// Reserved JSON member that holds a [`Value::NamedTable`]'s name.
pub const NAME_FIELD: &str = "__name__";

/// Parse a table literal and return it as pretty-printed JSON.
///
/// # Example
/// ```
/// let json = fusion_macro::parse_to_json("FuID { 'SLog2' }").unwrap();
/// let value: serde_json::Value = serde_json::from_str(&json).unwrap();
/// assert_eq!(value, serde_json::json!({"__name__": "FuID", "0": "SLog2"}));
/// ```
pub fn parse_to_json(literal: &str) -> Result<String> {
    let json = to_json(&parse(literal))?;
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Read a JSON document and render it as a table literal.
///
/// Malformed JSON fails with [`MacroError::JsonParse`] before anything is
/// rendered.
pub fn manifest_json(json: &str) -> Result<String> {
    let json: serde_json::Value = serde_json::from_str(json)?;
    Ok(manifest(&from_json(&json)?))
}

/// Convert a value into a `serde_json::Value`, keeping table order.
pub fn to_json(value: &Value) -> Result<serde_json::Value> {
    Ok(match value {
        Value::Nil => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Integer(n) => serde_json::Value::Number((*n).into()),
        Value::Float(f) => serde_json::Value::Number(float_to_number(*f)?),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(to_json).collect::<Result<_>>()?)
        }
        Value::Table(fields) => serde_json::Value::Object(fields_to_json(fields, Map::new())?),
        Value::NamedTable { name, fields } => {
            let mut map = Map::new();
            map.insert(NAME_FIELD.to_string(), serde_json::Value::String(name.clone()));
            serde_json::Value::Object(fields_to_json(fields, map)?)
        }
    })
}

fn fields_to_json(
    fields: &Table,
    mut map: Map<String, serde_json::Value>,
) -> Result<Map<String, serde_json::Value>> {
    for (key, value) in fields {
        check_key(key).map_err(MacroError::Conversion)?;
        map.insert(key.clone(), to_json(value)?);
    }
    Ok(map)
}

fn float_to_number(f: f64) -> Result<Number> {
    Number::from_f64(f)
        .ok_or_else(|| MacroError::Conversion(format!("non-finite float {f} has no JSON form")))
}

fn check_key(key: &str) -> std::result::Result<(), String> {
    if key == NAME_FIELD {
        Err(format!("table key `{NAME_FIELD}` collides with the reserved name field"))
    } else {
        Ok(())
    }
}

/// Convert a `serde_json::Value` into a [`Value`].
///
/// Objects carrying a string `__name__` member become named tables. Numbers
/// that fit an `i64` become integers; every other number becomes a float.
pub fn from_json(json: &serde_json::Value) -> Result<Value> {
    Ok(match json {
        serde_json::Value::Null => Value::Nil,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().ok_or_else(|| {
                MacroError::Conversion(format!("number {n} cannot be represented"))
            })?),
        },
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => {
            Value::Array(items.iter().map(from_json).collect::<Result<_>>()?)
        }
        serde_json::Value::Object(map) => object_from_json(map)?,
    })
}

fn object_from_json(map: &Map<String, serde_json::Value>) -> Result<Value> {
    let name = match map.get(NAME_FIELD) {
        None => None,
        Some(serde_json::Value::String(name)) => Some(name.clone()),
        Some(other) => {
            return Err(MacroError::Conversion(format!(
                "`{NAME_FIELD}` must be a string, found {other}"
            )))
        }
    };

    let fields = map
        .iter()
        .filter(|(key, _)| key.as_str() != NAME_FIELD)
        .map(|(key, value)| from_json(value).map(|v| (key.clone(), v)))
        .collect::<Result<Table>>()?;

    Ok(match name {
        Some(name) => Value::NamedTable { name, fields },
        None => Value::Table(fields),
    })
}

/// Serializes with the same mapping as [`to_json`], so a tree can be written
/// straight into any serde format.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Nil => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Value::Float(f) => Err(S::Error::custom(format!(
                "non-finite float {f} has no JSON form"
            ))),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Table(fields) => serialize_fields(serializer, None, fields),
            Value::NamedTable { name, fields } => {
                serialize_fields(serializer, Some(name.as_str()), fields)
            }
        }
    }
}

fn serialize_fields<S: Serializer>(
    serializer: S,
    name: Option<&str>,
    fields: &Table,
) -> std::result::Result<S::Ok, S::Error> {
    let len = fields.len() + usize::from(name.is_some());
    let mut map = serializer.serialize_map(Some(len))?;
    if let Some(name) = name {
        map.serialize_entry(NAME_FIELD, name)?;
    }
    for (key, value) in fields {
        check_key(key).map_err(S::Error::custom)?;
        map.serialize_entry(key, value)?;
    }
    map.end()
}
