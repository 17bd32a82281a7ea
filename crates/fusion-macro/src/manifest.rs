//! Serializer that renders a [`Value`] tree back into canonical table-literal text.
//!
//! The output is the form Fusion accepts when pasted into a composition, with
//! deterministic spacing and quoting so that `manifest(parse(s))` is stable
//! under re-application:
//!
//! - **Blocks**: `{}` when empty, otherwise `{ a, b }` / `{ k = v, k2 = v2 }`
//! - **Strings**: always quoted; single quotes unless the text contains `'`
//! - **Keys**: bare identifiers stay bare, digit-only keys become `[1]`,
//!   dotted and symbolic keys are quoted and bracketed (`['a.b']`)
//! - **Floats**: always carry a fractional part (`1.0`), never an exponent
//!
//! # Example
//! ```
//! use fusion_macro::{manifest, Value};
//! let value = Value::named("Input", [("SourceOp", Value::from("Merge1"))]);
//! assert_eq!(manifest(&value), "Input { SourceOp = 'Merge1' }");
//! ```

use crate::value::{Table, Value};

/// Render a value as canonical table-literal text.
pub fn manifest(value: &Value) -> String {
    let mut out = String::new();
    write_value(value, &mut out);
    out
}

fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::Nil => out.push_str("nil"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Integer(n) => out.push_str(&n.to_string()),
        Value::Float(f) => write_float(*f, out),
        Value::String(s) => write_string(s, out),
        Value::Array(items) => write_array(items, out),
        Value::Table(fields) => write_fields(fields, out),
        Value::NamedTable { name, fields } => {
            out.push_str(name);
            out.push(' ');
            write_fields(fields, out);
        }
    }
}

/// `Display` for `f64` never uses exponent notation and gives the shortest
/// text that parses back to the same float; integral values need a `.0`
/// appended so they read back as floats.
fn write_float(f: f64, out: &mut String) {
    let text = f.to_string();
    out.push_str(&text);
    if f.is_finite() && !text.contains('.') {
        out.push_str(".0");
    }
}

/// Quote a string with whichever quote it does not contain:
///
/// - no quotes, or only `"` → `'...'`
/// - only `'` → `"..."`
/// - both → `"..."` with inner `"` escaped as `\"`
fn write_string(s: &str, out: &mut String) {
    let has_single = s.contains('\'');
    let has_double = s.contains('"');

    if has_single && has_double {
        out.push('"');
        out.push_str(&s.replace('"', "\\\""));
        out.push('"');
    } else if has_single {
        out.push('"');
        out.push_str(s);
        out.push('"');
    } else {
        out.push('\'');
        out.push_str(s);
        out.push('\'');
    }
}

fn write_array(items: &[Value], out: &mut String) {
    if items.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{ ");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_value(item, out);
    }
    out.push_str(" }");
}

/// Emit the fields of a `Table` or `NamedTable` in insertion order.
fn write_fields(fields: &Table, out: &mut String) {
    if fields.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{ ");
    for (i, (key, value)) in fields.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_key(key, out);
        out.push_str(" = ");
        write_value(value, out);
    }
    out.push_str(" }");
}

/// Key forms, checked in order:
///
/// 1. digits only → `[12]`
/// 2. contains `.` → `['a.b']`
/// 3. characters outside letters, digits, `_`, `-`, space → `'k"ey'` when the
///    key holds a quote, `['k!ey']` otherwise
/// 4. identifier → `key`
/// 5. anything else (spaces, dashes, leading digit) → `'key with spaces'`
fn write_key(key: &str, out: &mut String) {
    if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
        out.push('[');
        out.push_str(key);
        out.push(']');
    } else if key.contains('.') {
        out.push('[');
        write_string(key, out);
        out.push(']');
    } else if !key
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | ' '))
    {
        if key.contains('\'') || key.contains('"') {
            write_string(key, out);
        } else {
            out.push('[');
            write_string(key, out);
            out.push(']');
        }
    } else if is_identifier(key) {
        out.push_str(key);
    } else {
        write_string(key, out);
    }
}

/// A letter or `_`, followed by letters, digits and `_`.
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
