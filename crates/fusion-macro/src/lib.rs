//! # fusion-macro
//!
//! Parser and serializer for the Lua-flavored **table literals** that DaVinci
//! Resolve's Fusion page puts on the clipboard when nodes are copied out of a
//! composition, and accepts back when they are pasted.
//!
//! Copying a node yields text like
//! `{ Tools = ordered() { Blur1 = Blur { Inputs = { XBlurSize = Input { Value = 4 } } } } }`.
//! This crate turns that text into an ordered [`Value`] tree (and into JSON),
//! and turns a tree back into canonical text that Fusion will paste.
//!
//! ## Quick start
//!
//! ```rust
//! use fusion_macro::{manifest, parse, Value};
//!
//! let value = parse("{ double_quote = \"world\", pos = { -605, -49.5 } }");
//! assert_eq!(value.get("double_quote"), Some(&Value::from("world")));
//!
//! // Canonical form: single quotes, spaced braces
//! assert_eq!(manifest(&value), "{ double_quote = 'world', pos = { -605, -49.5 } }");
//! ```
//!
//! ## Modules
//!
//! - [`parser`]: table literal → [`Value`] (never fails)
//! - [`manifest`](mod@manifest): [`Value`] → canonical table literal
//! - [`json`]: [`Value`] ⇄ JSON, with `__name__` carrying named-table names
//! - [`value`]: the [`Value`] tree and its ordered [`Table`]
//! - [`error`]: errors at the JSON boundary

pub mod error;
pub mod json;
pub mod manifest;
pub mod parser;
mod scanner;
pub mod value;

pub use error::{MacroError, Result};
pub use json::{from_json, manifest_json, parse_to_json, to_json, NAME_FIELD};
pub use manifest::manifest;
pub use parser::parse;
pub use value::{Table, Value};
