/// Value model tests: construction, typed extraction, equality and deep copy.
use std::collections::BTreeMap;

use anyconf_core::{AnyError, AnyMap, Kind, Strategy, Value};

fn sample_map() -> AnyMap {
    let mut submap = AnyMap::new();
    submap.insert_or_assign("a", "a");
    submap.insert_or_assign("b", "b");

    let mut map = AnyMap::new();
    map.insert_or_assign("int", 1);
    map.insert_or_assign("float", 2.5);
    map.insert_or_assign("string", "string");
    map.insert_or_assign("bool", true);
    map.insert_or_assign("submap", submap);
    map
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn scalars_set_matching_kind() {
    assert_eq!(Value::from("a").kind(), Kind::Text);
    assert_eq!(Value::from(String::from("a")).kind(), Kind::Text);
    assert_eq!(Value::from(1.5).kind(), Kind::Real);
    assert_eq!(Value::from(1.5f32).kind(), Kind::Real);
    assert_eq!(Value::from(1).kind(), Kind::Integer);
    assert_eq!(Value::from(1i64).kind(), Kind::Integer);
    assert_eq!(Value::from(7u32).kind(), Kind::Integer);
    assert_eq!(Value::from(false).kind(), Kind::Boolean);
}

#[test]
fn homogeneous_vec_becomes_sequence() {
    let v = Value::from(vec![1, 2, 3]);
    assert_eq!(
        v,
        Value::Sequence(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)])
    );
}

#[test]
fn heterogeneous_array_becomes_sequence() {
    let v = Value::from([Value::from("x"), Value::from(2.0), Value::from(true)]);
    let items = v.as_sequence().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].kind(), Kind::Text);
    assert_eq!(items[1].kind(), Kind::Real);
    assert_eq!(items[2].kind(), Kind::Boolean);
}

#[test]
fn iterator_collects_into_sequence() {
    let v: Value = (1..=4).collect();
    assert_eq!(v.as_sequence().unwrap().len(), 4);
}

#[test]
fn ordered_mapping_converts_to_ordered_map() {
    let mut source = BTreeMap::new();
    source.insert("b".to_string(), 2);
    source.insert("a".to_string(), 1);

    let v = Value::from(source);
    let map = v.as_map().unwrap();
    assert_eq!(map.strategy(), Strategy::Ordered);
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn boxed_holds_nested_value() {
    let v = Value::boxed(vec!["a", "b"]);
    assert_eq!(v.kind(), Kind::Boxed);
    assert_eq!(v.as_boxed().unwrap().kind(), Kind::Sequence);
}

// ============================================================================
// Typed extraction
// ============================================================================

#[test]
fn extraction_of_matching_kind_succeeds() {
    assert_eq!(Value::from("hi").extract::<String>().unwrap(), "hi");
    assert_eq!(Value::from(2.5).extract::<f64>().unwrap(), 2.5);
    assert_eq!(Value::from(-4).extract::<i64>().unwrap(), -4);
    assert!(Value::from(true).extract::<bool>().unwrap());
    assert_eq!(
        Value::from(vec![1]).extract::<Vec<Value>>().unwrap(),
        vec![Value::Integer(1)]
    );
    assert_eq!(Value::from(sample_map()).extract::<AnyMap>().unwrap(), sample_map());
}

#[test]
fn extraction_never_coerces_numbers() {
    let err = Value::from(1).extract::<f64>().unwrap_err();
    assert!(matches!(
        err,
        AnyError::TypeMismatch {
            expected: Kind::Real,
            found: Kind::Integer
        }
    ));
    assert!(Value::from(1).extract::<bool>().is_err());
    assert!(Value::from(1.0).extract::<i64>().is_err());
}

#[test]
fn owned_extraction_moves_payload() {
    let text: String = Value::from("owned").try_into().unwrap();
    assert_eq!(text, "owned");
    let map: AnyMap = Value::from(sample_map()).try_into().unwrap();
    assert_eq!(map.len(), 5);
    let err = String::try_from(Value::from(3)).unwrap_err();
    assert!(matches!(err, AnyError::TypeMismatch { .. }));
}

#[test]
fn container_accessors_report_mismatch() {
    let mut v = Value::from("text");
    assert!(v.as_map().is_err());
    assert!(v.as_map_mut().is_err());
    assert!(v.as_sequence().is_err());
    assert!(v.as_sequence_mut().is_err());
    assert!(v.as_boxed().is_err());
}

// ============================================================================
// Equality
// ============================================================================

#[test]
fn scalar_equality() {
    assert_eq!(Value::from("A"), Value::from("A"));
    assert_ne!(Value::from("A"), Value::from("B"));
    assert_ne!(Value::from(1), Value::from("A"));
    assert_eq!(Value::from(1), Value::from(1));
    assert_ne!(Value::from(1), Value::from(2));
    assert_eq!(Value::from(true), Value::from(true));
    assert_ne!(Value::from(true), Value::from(false));
    assert_eq!(Value::from(1.5), Value::from(1.5));
    assert_ne!(Value::from(1.5), Value::from(1.6));
}

#[test]
fn different_kinds_are_never_equal() {
    assert_ne!(Value::from(1), Value::from(true));
    assert_ne!(Value::from(0), Value::from(false));
    assert_ne!(Value::from(1), Value::from(1.0));
    assert_ne!(Value::boxed(1), Value::from(1));
}

#[test]
fn sequences_compare_elementwise() {
    assert_eq!(Value::from(vec![1, 2]), Value::from(vec![1, 2]));
    assert_ne!(Value::from(vec![1, 2]), Value::from(vec![2, 1]));
    assert_ne!(Value::from(vec![1, 2]), Value::from(vec![1, 2, 3]));
}

#[test]
fn boxed_compares_pointees() {
    assert_eq!(Value::boxed("x"), Value::boxed("x"));
    assert_ne!(Value::boxed("x"), Value::boxed("y"));
}

// ============================================================================
// Deep copy
// ============================================================================

#[test]
fn map_copy_is_equal_and_independent() {
    let lhs = sample_map();
    let mut rhs = lhs.clone();
    assert_eq!(lhs, rhs);

    rhs.insert_or_assign("int", 2);
    assert_ne!(lhs, rhs);
    rhs.insert_or_assign("int", 1);
    assert_eq!(lhs, rhs);
    rhs.erase("int");
    assert_ne!(lhs, rhs);
}

#[test]
fn nested_copy_does_not_share_children() {
    let original = Value::from(vec![Value::from(sample_map()), Value::boxed(vec![1, 2])]);
    let mut copy = original.clone();

    let items = copy.as_sequence_mut().unwrap();
    items[0]
        .as_map_mut()
        .unwrap()
        .at_mut("submap")
        .unwrap()
        .as_map_mut()
        .unwrap()
        .insert_or_assign("a", "changed");
    if let Value::Boxed(inner) = &mut items[1] {
        inner.as_sequence_mut().unwrap().push(Value::from(3));
    }

    assert_ne!(original, copy);
    assert_eq!(
        original.resolve("0.submap.a").unwrap(),
        Value::from("a"),
        "original map must be untouched"
    );
    assert_eq!(original.resolve("1.-1").unwrap(), Value::from(2));
}
