/// Property-based roundtrip tests for table literals.
///
/// Generates random `Value` trees and checks that `parse(manifest(v)) == v`
/// and that `manifest(parse(..))` is a fixed point.
///
/// Strategies generate:
/// - Primitives: nil, bools, any `i64`, floats on a 1/8 grid, quoted strings
///   mixing both quote kinds and the separators `,` `=` `{` `}`
/// - Keys: identifiers, digit strings, dotted, spaced and dashed keys
/// - Arrays, tables and named tables up to 4 levels deep
///
/// Known limitations excluded from generation:
/// - Empty nested `{}`: whether it reads back as a table or an array depends
///   on the key name, so only the top level and named tables may be empty
/// - Backslashes in strings: a backslash before a quote reads as an escape
/// - Keys holding both quote kinds: keys are never unescaped
use fusion_macro::{manifest, parse, Value};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,16}",
        prop::string::string_regex("[a-zA-Z0-9 ,={}'\"._\\-]{0,16}").unwrap(),
        Just(String::new()),
        Just("nil".to_string()),
        Just("42".to_string()),
        Just("it's".to_string()),
        Just("say \"hi\"".to_string()),
        Just("A { B }".to_string()),
    ]
}

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,10}").unwrap(),
        prop::string::string_regex("[0-9]{1,3}").unwrap(),
        prop::string::string_regex("[A-Za-z]{1,6}\\.[A-Za-z]{1,6}").unwrap(),
        prop::string::string_regex("[a-z]{1,4}[ -][a-z]{1,4}").unwrap(),
        prop::string::string_regex("[a-z]{1,4}[!@#$%^&*()][a-z]{0,4}").unwrap(),
    ]
}

fn arb_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z][A-Za-z0-9]{0,8}(\\(\\))?").unwrap()
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        (-100_000i32..100_000).prop_map(|n| Value::Float(f64::from(n) / 8.0)),
        arb_string().prop_map(Value::String),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..6).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner.clone()), 1..6).prop_map(Value::table),
            (arb_name(), prop::collection::vec((arb_key(), inner), 0..4))
                .prop_map(|(name, fields)| Value::named(name, fields)),
        ]
    })
}

/// Roots must be blocks: a bare float or string at the root is passed through
/// as raw text rather than parsed.
fn arb_root() -> impl Strategy<Value = Value> {
    arb_value().prop_filter("root must be a block", |v| {
        matches!(
            v,
            Value::Array(_) | Value::Table(_) | Value::NamedTable { .. }
        )
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn parse_inverts_manifest(value in arb_root()) {
        let literal = manifest(&value);
        let parsed = parse(&literal);
        prop_assert_eq!(&parsed, &value, "literal: {}", literal);
    }

    #[test]
    fn manifest_parse_is_idempotent(value in arb_root()) {
        let once = manifest(&parse(&manifest(&value)));
        let twice = manifest(&parse(&once));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn root_integers_roundtrip(n in any::<i64>()) {
        prop_assert_eq!(parse(&manifest(&Value::Integer(n))), Value::Integer(n));
    }

    #[test]
    fn parse_never_panics(input in any::<String>()) {
        let _ = parse(&input);
    }

    #[test]
    fn parse_never_panics_on_literal_soup(
        input in prop::string::string_regex("[{}\\[\\]'\"=, a-z0-9.\\\\-]{0,40}").unwrap()
    ) {
        let _ = manifest(&parse(&input));
    }
}
