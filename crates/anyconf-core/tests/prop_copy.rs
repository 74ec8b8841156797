/// Property-based tests for value semantics and map strategies.
///
/// Generated trees check that:
/// - a clone is equal to its source and independent of it
/// - ordered iteration is repeatable and sorted
/// - case-insensitive maps treat every casing of a key as the same key
/// - strict JSON output reads back to an equal value
///
/// Reals are drawn from quarter steps so the JSON text round trip is exact.
use anyconf_core::{AnyMap, Strategy as MapStrategy, Value};
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,11}").unwrap()
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        (-4000i32..4000).prop_map(|n| Value::Real(f64::from(n) / 4.0)),
        any::<bool>().prop_map(Value::Boolean),
        "[a-zA-Z0-9 .:,\"\\\\]{0,20}".prop_map(Value::Text),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Sequence),
            prop::collection::vec((arb_key(), inner), 0..6).prop_map(|pairs| {
                Value::Map(AnyMap::from_pairs(MapStrategy::Ordered, pairs))
            }),
        ]
    })
}

fn arb_strategy() -> impl Strategy<Value = MapStrategy> {
    prop::sample::select(MapStrategy::ALL.to_vec())
}

// ============================================================================
// Copy semantics
// ============================================================================

proptest! {
    #[test]
    fn clone_equals_source(value in arb_value()) {
        prop_assert_eq!(value.clone(), value);
    }

    #[test]
    fn mutating_clone_leaves_source_untouched(
        strategy in arb_strategy(),
        pairs in prop::collection::vec((arb_key(), arb_scalar()), 1..10),
    ) {
        let source = AnyMap::from_pairs(strategy, pairs);
        let snapshot = source.to_json();
        let mut copy = source.clone();
        for (_, value) in &mut copy {
            *value = Value::from("changed");
        }
        copy.insert_or_assign("extra-key", 1);
        prop_assert_eq!(source.to_json(), snapshot);
        prop_assert_ne!(&copy, &source);
    }

    #[test]
    fn boxed_clone_is_deep(value in arb_value()) {
        let boxed = Value::boxed(value.clone());
        let mut copy = boxed.clone();
        if let Value::Boxed(inner) = &mut copy {
            **inner = Value::from("other");
        }
        prop_assert_eq!(boxed.as_boxed().unwrap(), &value);
    }
}

// ============================================================================
// Strategies
// ============================================================================

proptest! {
    #[test]
    fn ordered_iteration_is_sorted_and_stable(
        pairs in prop::collection::vec((arb_key(), arb_scalar()), 0..20),
    ) {
        let map = AnyMap::from_pairs(MapStrategy::Ordered, pairs);
        let first: Vec<&str> = map.keys().collect();
        let second: Vec<&str> = map.keys().collect();
        let mut sorted = first.clone();
        sorted.sort_unstable();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, sorted);
    }

    #[test]
    fn case_insensitive_count_ignores_casing(key in arb_key(), value in arb_scalar()) {
        let mut map = AnyMap::with_strategy(MapStrategy::HashedCaseInsensitive);
        map.insert(key.as_str(), value);
        prop_assert_eq!(map.count(&key.to_ascii_uppercase()), 1);
        prop_assert_eq!(map.count(&key.to_ascii_lowercase()), 1);
        let (_, inserted) = map.insert(key.to_ascii_uppercase(), 0);
        prop_assert!(!inserted);
        prop_assert_eq!(map.len(), 1);
    }

    #[test]
    fn every_strategy_holds_the_same_entries(
        strategy in arb_strategy(),
        pairs in prop::collection::vec((arb_key(), arb_scalar()), 0..20),
    ) {
        let reference = AnyMap::from_pairs(MapStrategy::Ordered, pairs.clone());
        let map = AnyMap::from_pairs(strategy, pairs);
        if strategy != MapStrategy::HashedCaseInsensitive {
            prop_assert_eq!(map.len(), reference.len());
            for (key, value) in &reference {
                prop_assert_eq!(map.at(key).unwrap(), value);
            }
        } else {
            prop_assert!(map.len() <= reference.len());
        }
    }
}

// ============================================================================
// Strict JSON round trip
// ============================================================================

proptest! {
    #[test]
    fn strict_json_reads_back_equal(value in arb_value()) {
        let text = value.to_json_string().unwrap();
        let back = Value::from_json_str(&text, MapStrategy::Ordered).unwrap();
        prop_assert_eq!(back, value);
    }
}
