use fusion_macro::{
    from_json, manifest_json, parse, parse_to_json, to_json, MacroError, Table, Value, NAME_FIELD,
};
use serde_json::json;

// ============================================================================
// Value → JSON
// ============================================================================

#[test]
fn to_json_maps_every_variant() {
    let value = parse("{ n = nil, b = true, i = 3, f = 2.5, s = 'x', a = { 1, 2 }, t = { k = 1 } }");
    let json = to_json(&value).unwrap();
    assert_eq!(
        json,
        json!({"n": null, "b": true, "i": 3, "f": 2.5, "s": "x", "a": [1, 2], "t": {"k": 1}})
    );
}

#[test]
fn to_json_puts_name_first() {
    let value = parse("Input { SourceOp = 'Merge1', Source = 'Output' }");
    let json = to_json(&value).unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec![NAME_FIELD, "SourceOp", "Source"]);
}

#[test]
fn to_json_preserves_table_order() {
    let json = to_json(&parse("{ zeta = 1, alpha = 2, mid = 3 }")).unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn to_json_rejects_reserved_key() {
    let value = Value::table([(NAME_FIELD, Value::from("sneaky"))]);
    let err = to_json(&value).unwrap_err();
    assert!(matches!(err, MacroError::Conversion(_)));
    assert!(err.to_string().contains(NAME_FIELD));

    let nested = Value::Array(vec![Value::named("Input", [(NAME_FIELD, Value::Nil)])]);
    assert!(to_json(&nested).is_err());
}

#[test]
fn to_json_rejects_non_finite_floats() {
    assert!(matches!(
        to_json(&Value::Float(f64::NAN)),
        Err(MacroError::Conversion(_))
    ));
    assert!(to_json(&Value::Float(f64::INFINITY)).is_err());
}

#[test]
fn serialize_impl_matches_to_json() {
    let value = parse("{['Gamut.SLogVersion'] = Input { Value = FuID { 'SLog2' }}}");
    assert_eq!(serde_json::to_value(&value).unwrap(), to_json(&value).unwrap());
    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        r#"{"Gamut.SLogVersion":{"__name__":"Input","Value":{"__name__":"FuID","0":"SLog2"}}}"#
    );
}

#[test]
fn serialize_impl_rejects_reserved_key() {
    let value = Value::table([(NAME_FIELD, Value::Integer(1))]);
    assert!(serde_json::to_string(&value).is_err());
}

// ============================================================================
// JSON → Value
// ============================================================================

#[test]
fn from_json_number_kinds() {
    assert!(matches!(from_json(&json!(7)).unwrap(), Value::Integer(7)));
    assert!(matches!(from_json(&json!(-7)).unwrap(), Value::Integer(-7)));
    assert!(matches!(from_json(&json!(1.0)).unwrap(), Value::Float(f) if f == 1.0));
    assert!(matches!(from_json(&json!(u64::MAX)).unwrap(), Value::Float(_)));
}

#[test]
fn from_json_named_table() {
    let value = from_json(&json!({"Value": 1, "__name__": "Input"})).unwrap();
    assert_eq!(value, Value::named("Input", [("Value", Value::Integer(1))]));
}

#[test]
fn from_json_rejects_non_string_name() {
    let err = from_json(&json!({"__name__": 5})).unwrap_err();
    assert!(matches!(err, MacroError::Conversion(_)));
}

#[test]
fn from_json_empty_object_is_empty_table() {
    assert_eq!(from_json(&json!({})).unwrap(), Value::Table(Table::new()));
}

// ============================================================================
// String entry points
// ============================================================================

#[test]
fn parse_to_json_is_pretty() {
    let json = parse_to_json("{ x = 1 }").unwrap();
    assert_eq!(json, "{\n  \"x\": 1\n}");
}

#[test]
fn manifest_json_renders_literal() {
    let literal = manifest_json(r#"{"__name__": "Input", "SourceOp": "Merge1", "Source": "Output"}"#)
        .unwrap();
    assert_eq!(literal, "Input { SourceOp = 'Merge1', Source = 'Output' }");
}

#[test]
fn manifest_json_rejects_malformed_json() {
    let err = manifest_json("{ not json").unwrap_err();
    assert!(matches!(err, MacroError::JsonParse(_)));
    assert!(err.to_string().starts_with("JSON parse error"));
}

#[test]
fn json_roundtrip_through_literal() {
    let original = json!({
        "Tools": {
            "__name__": "ordered()",
            "Blur1": {
                "__name__": "Blur",
                "Inputs": {"XBlurSize": {"__name__": "Input", "Value": 4.5}},
                "ViewInfo": {"__name__": "OperatorInfo", "Pos": [110, 82.5]}
            }
        },
        "ActiveTool": "Blur1"
    });
    let literal = manifest_json(&original.to_string()).unwrap();
    let back: serde_json::Value = serde_json::from_str(&parse_to_json(&literal).unwrap()).unwrap();
    assert_eq!(back, original);
}
