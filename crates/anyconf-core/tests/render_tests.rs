/// Rendering tests: the indented diagnostic dump (`to_json`) and strict JSON
/// output through serde (`to_json_string` / `to_json_pretty`).
use anyconf_core::{AnyError, AnyMap, Strategy, Value};

// ============================================================================
// Diagnostic dump: scalars
// ============================================================================

#[test]
fn dump_integer() {
    assert_eq!(Value::from(42).to_json(), "42\n");
}

#[test]
fn dump_negative_integer() {
    assert_eq!(Value::from(-7).to_json(), "-7\n");
}

#[test]
fn dump_real() {
    assert_eq!(Value::from(2.5).to_json(), "2.5\n");
}

#[test]
fn dump_boolean() {
    assert_eq!(Value::from(true).to_json(), "true\n");
    assert_eq!(Value::from(false).to_json(), "false\n");
}

#[test]
fn dump_text_is_unquoted() {
    assert_eq!(Value::from("hello world").to_json(), "hello world\n");
}

// ============================================================================
// Diagnostic dump: containers
// ============================================================================

#[test]
fn dump_empty_map() {
    assert_eq!(AnyMap::new().to_json(), "{\n}\n");
    assert_eq!(Value::from(AnyMap::new()).to_json(), "{\n}\n");
}

#[test]
fn dump_single_entry_map_nests_value() {
    let map = AnyMap::from_pairs(Strategy::Ordered, [("key", "value")]);
    assert_eq!(map.to_json(), "{\nkey: \n  value\n}\n");
}

#[test]
fn dump_ordered_map_follows_key_order() {
    let map = AnyMap::from_pairs(Strategy::Ordered, [("b", 2), ("a", 1)]);
    assert_eq!(map.to_json(), "{\na: \n  1\nb: \n  2\n}\n");
}

#[test]
fn dump_sequence_keeps_trailing_separator() {
    let v = Value::from(vec![1, 2]);
    assert_eq!(v.to_json(), "[\n  1\n  ,\n  2\n  ,\n]\n");
}

#[test]
fn dump_empty_sequence() {
    assert_eq!(Value::Sequence(Vec::new()).to_json(), "[\n]\n");
}

#[test]
fn dump_nested_map_in_map() {
    let inner = AnyMap::from_pairs(Strategy::Ordered, [("x", 1)]);
    let outer = AnyMap::from_pairs(Strategy::Ordered, [("inner", inner)]);
    assert_eq!(
        outer.to_json(),
        "{\ninner: \n  {\n  x: \n    1\n  }\n}\n"
    );
}

#[test]
fn dump_boxed_adds_one_level() {
    assert_eq!(Value::boxed(5).to_json(), "  5\n");
    assert_eq!(Value::boxed(Value::boxed("x")).to_json(), "    x\n");
}

#[test]
fn display_matches_dump() {
    let v = Value::from(vec!["a"]);
    assert_eq!(v.to_string(), v.to_json());
    let map = AnyMap::from_pairs(Strategy::Ordered, [("k", 1)]);
    assert_eq!(map.to_string(), map.to_json());
}

// ============================================================================
// Strict JSON
// ============================================================================

#[test]
fn strict_json_quotes_and_escapes() {
    let map = AnyMap::from_pairs(
        Strategy::Ordered,
        [("msg", Value::from("say \"hi\"\n")), ("n", Value::from(1))],
    );
    assert_eq!(
        map.to_json_string().unwrap(),
        r#"{"msg":"say \"hi\"\n","n":1}"#
    );
}

#[test]
fn strict_json_keeps_integer_real_distinction() {
    let v = Value::from(vec![Value::from(1), Value::from(1.5)]);
    assert_eq!(v.to_json_string().unwrap(), "[1,1.5]");
}

#[test]
fn strict_json_pretty_is_valid_json() {
    let v = Value::from_json_str(r#"{"a":{"b":[1,2,3]},"c":true}"#, Strategy::Ordered).unwrap();
    let pretty = v.to_json_pretty().unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(&pretty).unwrap();
    assert_eq!(reparsed, serde_json::json!({"a": {"b": [1, 2, 3]}, "c": true}));
}

#[test]
fn ingestion_uses_requested_strategy_everywhere() {
    let v = Value::from_json_str(r#"{"outer":{"inner":{}}}"#, Strategy::Hashed).unwrap();
    assert_eq!(v.as_map().unwrap().strategy(), Strategy::Hashed);
    let inner = v.resolve("outer.inner").unwrap();
    assert_eq!(inner.as_map().unwrap().strategy(), Strategy::Hashed);
}

#[test]
fn ingestion_splits_integers_and_reals() {
    let v = Value::from_json_str("[1, -2, 2.5, 18446744073709551615]", Strategy::Ordered).unwrap();
    let items = v.as_sequence().unwrap();
    assert_eq!(items[0], Value::Integer(1));
    assert_eq!(items[1], Value::Integer(-2));
    assert_eq!(items[2], Value::Real(2.5));
    assert!(matches!(items[3], Value::Real(_)));
}

#[test]
fn ingestion_rejects_null_and_bad_json() {
    assert!(matches!(
        Value::from_json_str("null", Strategy::Ordered),
        Err(AnyError::UnsupportedNull { .. })
    ));
    assert!(matches!(
        Value::from_json_str("{", Strategy::Ordered),
        Err(AnyError::Json(_))
    ));
}
