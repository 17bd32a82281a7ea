//! Table-literal parser: converts clipboard text into a [`Value`] tree.
//!
//! The grammar is the Lua-flavored notation Fusion puts on the clipboard when
//! nodes are copied from a composition:
//!
//! - Primitives: `nil`, `true`/`false`, integers, floats, `'single'` and
//!   `"double"` quoted strings
//! - Blocks: `{ 1, 2, 3 }` (array) and `{ x = 1, ['a.b'] = 2 }` (table)
//! - Named tables: `Input { Value = 1 }`, `ordered() { ... }`, `FuID { 'SLog2' }`
//!
//! # Key design decisions
//!
//! - **Total function**: [`parse`] never fails. Text that matches no shape is
//!   passed through unchanged as a [`Value::String`], so a clipboard payload
//!   survives a round trip even when parts of it are not understood.
//! - **Classify, then parse**: every literal is first classified into a
//!   `Literal` kind in a fixed decision order, then the kind is parsed.
//! - **Empty `{}` is ambiguous**: nested empty blocks become an empty table
//!   only when their key ends in `table` (or contains `empty_table`);
//!   otherwise they are empty arrays. At the top level `{}` is an empty table.
//! - **Bare numbers in a table body** (`{ 1, b = 2 }`) get implicit keys
//!   `"1"`, `"2"`, ... counted separately from explicit keys.
//! - **Bounded nesting**: blocks nested deeper than [`MAX_DEPTH`] are kept
//!   as raw text instead of being parsed.

use crate::scanner::{closing_brace, find_top_level, split_once_top_level, split_top_level};
use crate::value::{Table, Value};
use tracing::{debug, trace};

/// Deepest block nesting that is parsed; anything below it stays a string.
pub const MAX_DEPTH: usize = 256;

/// Parse a table literal into a [`Value`].
///
/// This is the top-level entry point: it recognizes bare primitives, unnamed
/// `{...}` blocks and `Name {...}` named tables. It never fails; anything it
/// cannot make sense of comes back as a string holding the trimmed input.
pub fn parse(input: &str) -> Value {
    parse_at(input, 0)
}

fn parse_at(input: &str, depth: usize) -> Value {
    let text = input.trim();

    match text {
        "" => return Value::String(String::new()),
        "nil" => return Value::Nil,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if is_integer_text(text) {
        if let Ok(n) = text.parse::<i64>() {
            return Value::Integer(n);
        }
    }

    if !text.starts_with('{') {
        if let Some(split) = text.find(" {") {
            return parse_named_table(text, split, depth);
        }
    }

    if let Some(inner) = block_interior(text) {
        if inner.is_empty() {
            return Value::Table(Table::new());
        }
        return parse_block_body(inner, depth);
    }

    debug!(len = text.len(), "unrecognized literal passed through as a string");
    Value::String(text.to_string())
}

/// Parse `Name { ... }`, where `split` is the offset of the first `" {"`.
///
/// Array-shaped interiors become fields keyed by position: `FuID { 'SLog2' }`
/// is a named table with the single field `"0" = 'SLog2'`.
fn parse_named_table(text: &str, split: usize, depth: usize) -> Value {
    let name = text[..split].trim();
    let block = &text[split + 1..];

    if closing_brace(block) != Some(block.len() - 1) {
        debug!(name, "named table is not a single balanced block; passing through");
        return Value::String(text.to_string());
    }

    let inner = block[1..block.len() - 1].trim();
    let fields = if inner.is_empty() {
        Table::new()
    } else {
        match BodyKind::of(inner) {
            BodyKind::Table => parse_table_body(inner, depth),
            BodyKind::Array => parse_array_body(inner, depth)
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
        }
    };

    trace!(name, fields = fields.len(), "parsed named table");
    Value::NamedTable {
        name: name.to_string(),
        fields,
    }
}

/// A single literal, classified by shape before it is parsed.
///
/// The variants are tried in declaration order; the first that matches wins.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Literal<'a> {
    Nil,
    Bool(bool),
    Integer(i64),
    Float(f64),
    /// Trimmed interior of a `{...}` block.
    Block(&'a str),
    /// Contents between matching quotes, still escaped.
    Quoted { quote: char, body: &'a str },
    /// A named table appearing as a value, e.g. `Input { ... }`.
    Named(&'a str),
    /// Anything else, kept verbatim.
    Bare(&'a str),
}

impl<'a> Literal<'a> {
    fn classify(text: &'a str) -> Self {
        match text {
            "nil" => return Literal::Nil,
            "true" => return Literal::Bool(true),
            "false" => return Literal::Bool(false),
            _ => {}
        }
        if let Some(number) = classify_number(text) {
            return number;
        }
        if let Some(inner) = block_interior(text) {
            return Literal::Block(inner);
        }
        if let Some((quote, body)) = strip_quotes(text) {
            return Literal::Quoted { quote, body };
        }
        if text.contains(" {") && !text.starts_with('{') {
            return Literal::Named(text);
        }
        Literal::Bare(text)
    }
}

/// Numeric forms: `-`? digits → integer; `-`? digits with exactly one `.` → float.
/// Integers too large for `i64` fall back to a float.
fn classify_number(text: &str) -> Option<Literal<'static>> {
    if is_integer_text(text) {
        return Some(match text.parse::<i64>() {
            Ok(n) => Literal::Integer(n),
            Err(_) => Literal::Float(text.parse().ok()?),
        });
    }

    let digits = text.strip_prefix('-').unwrap_or(text);
    let dots = digits.bytes().filter(|&b| b == b'.').count();
    let well_formed = dots == 1
        && digits.len() > 1
        && digits.bytes().all(|b| b.is_ascii_digit() || b == b'.');
    if well_formed {
        return text.parse().ok().map(Literal::Float);
    }
    None
}

/// `-`? followed by one or more ASCII digits.
fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Trimmed interior of `text` if it starts with `{` and ends with `}`.
fn block_interior(text: &str) -> Option<&str> {
    text.strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .map(str::trim)
}

/// Contents of a string wrapped in matching `'` or `"`, with the quote used.
fn strip_quotes(text: &str) -> Option<(char, &str)> {
    let quote = text.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    if text.len() >= 2 && text.ends_with(quote) {
        Some((quote, &text[1..text.len() - 1]))
    } else {
        None
    }
}

/// Parse one trimmed value literal.
///
/// `key_hint` is the normalized key this value is bound to, if any. It is only
/// consulted to decide whether an empty `{}` is a table or an array.
/// `depth` counts the blocks enclosing `text`.
pub(crate) fn parse_value(text: &str, key_hint: Option<&str>, depth: usize) -> Value {
    match Literal::classify(text) {
        Literal::Block(_) | Literal::Named(_) if depth >= MAX_DEPTH => {
            debug!(depth, "nesting limit reached; passing block through as a string");
            Value::String(text.to_string())
        }
        Literal::Nil => Value::Nil,
        Literal::Bool(b) => Value::Bool(b),
        Literal::Integer(n) => Value::Integer(n),
        Literal::Float(f) => Value::Float(f),
        Literal::Block("") => empty_block(key_hint),
        Literal::Block(inner) => parse_block_body(inner, depth),
        Literal::Quoted { quote, body } => Value::String(unescape_quote(body, quote)),
        Literal::Named(text) => parse_at(text, depth),
        Literal::Bare(text) => Value::String(text.to_string()),
    }
}

/// Resolve an empty nested `{}` from the name of the key that holds it.
fn empty_block(key_hint: Option<&str>) -> Value {
    match key_hint {
        Some(key) if key.contains("empty_table") || key.ends_with("table") => {
            Value::Table(Table::new())
        }
        Some(key) if key.contains("empty_array") || key.ends_with("array") => {
            Value::Array(Vec::new())
        }
        _ => Value::Array(Vec::new()),
    }
}

/// Only the quote that delimits the string needs escaping, so only that one
/// is unescaped: `'it\'s'` → `it's`, but `"it\'s"` keeps the backslash.
fn unescape_quote(body: &str, quote: char) -> String {
    match quote {
        '\'' => body.replace("\\'", "'"),
        _ => body.replace("\\\"", "\""),
    }
}

/// Whether a non-empty block interior holds a table or an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Table,
    Array,
}

impl BodyKind {
    /// An interior that opens with `{` is an array of tables; otherwise any
    /// top-level `=` makes it a table.
    fn of(inner: &str) -> Self {
        if inner.starts_with('{') || find_top_level(inner, '=').is_none() {
            BodyKind::Array
        } else {
            BodyKind::Table
        }
    }
}

fn parse_block_body(inner: &str, depth: usize) -> Value {
    match BodyKind::of(inner) {
        BodyKind::Table => Value::Table(parse_table_body(inner, depth)),
        BodyKind::Array => Value::Array(parse_array_body(inner, depth)),
    }
}

/// Parse the interior of a table block into ordered fields.
///
/// - `key = value`, `[key] = value`, `['key'] = value` and `'key' = value`
///   bind explicit keys; a repeated key overwrites in place.
/// - A bare numeric element gets the next implicit key (`"1"`, `"2"`, ...),
///   counted independently of explicit numeric keys.
/// - A bare non-numeric element becomes a key bound to an empty string.
///   `nan` and `inf` count as non-numeric here.
fn parse_table_body(inner: &str, depth: usize) -> Table {
    let mut table = Table::new();
    let mut implicit_index = 1usize;

    for element in split_top_level(inner, ',') {
        if let Some((key, value)) = split_once_top_level(element, '=') {
            let key = normalize_key(key);
            let value = parse_value(value, Some(&key), depth + 1);
            table.insert(key, value);
            continue;
        }

        match element.parse::<f64>() {
            Ok(n) if n.is_finite() => {
                table.insert(implicit_index.to_string(), implicit_number(element, n));
                implicit_index += 1;
            }
            _ => {
                trace!(element, "bare element in table body bound to an empty string");
                let key = normalize_key(element);
                let value = parse_value("", Some(&key), depth + 1);
                table.insert(key, value);
            }
        }
    }

    table
}

/// A bare element written as an integer (`1`, `-3`) stays an integer, so
/// `{ 1, b = 2 }` manifests back as `{ [1] = 1, b = 2 }`. Everything else
/// that parses as a number (`2.3`, `1e5`) is a float.
fn implicit_number(element: &str, n: f64) -> Value {
    if is_integer_text(element) {
        if let Ok(i) = element.parse::<i64>() {
            return Value::Integer(i);
        }
    }
    Value::Float(n)
}

/// Strip `[...]` and then one pair of matching quotes from a key.
fn normalize_key(raw: &str) -> String {
    let key = raw.trim();
    let key = key
        .strip_prefix('[')
        .and_then(|k| k.strip_suffix(']'))
        .map(str::trim)
        .unwrap_or(key);
    match strip_quotes(key) {
        Some((_, unquoted)) => unquoted.to_string(),
        None => key.to_string(),
    }
}

/// Parse the interior of an array block into its elements, in order.
fn parse_array_body(inner: &str, depth: usize) -> Vec<Value> {
    split_top_level(inner, ',')
        .into_iter()
        .map(|element| parse_value(element, None, depth + 1))
        .collect()
}
