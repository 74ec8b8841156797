//! `AnyMap`: a string-keyed map of [`Value`]s with a storage strategy fixed at construction.
//!
//! Three strategies share one interface:
//!
//! - [`Strategy::Ordered`]: lexical key order, stable across passes
//! - [`Strategy::Hashed`]: unspecified order
//! - [`Strategy::HashedCaseInsensitive`]: unspecified order; keys compare
//!   ignoring ASCII case while the inserted casing is kept for iteration
//!
//! The strategy is part of a map's identity: maps with different strategies
//! never compare equal, even with identical entries.

use std::collections::btree_map;
use std::collections::hash_map;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::Bound;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AnyError, Result};
use crate::iter::{Iter, IterMut};
use crate::value::Value;

/// Backing-storage discipline of an [`AnyMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[default]
    Ordered,
    Hashed,
    HashedCaseInsensitive,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::Ordered,
        Strategy::Hashed,
        Strategy::HashedCaseInsensitive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Ordered => "ordered",
            Strategy::Hashed => "hashed",
            Strategy::HashedCaseInsensitive => "hashed-case-insensitive",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = AnyError;

    fn from_str(s: &str) -> Result<Self> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| AnyError::InvalidStrategy(s.to_string()))
    }
}

/// The active backing store. Exactly one variant is alive per map.
#[derive(Debug, Clone)]
enum Storage {
    Ordered(BTreeMap<String, Value>),
    Hashed(HashMap<String, Value>),
    /// Keyed by the folded key; each slot keeps the inserted key.
    HashedCaseInsensitive(HashMap<String, (String, Value)>),
}

impl Storage {
    fn empty(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Ordered => Storage::Ordered(BTreeMap::new()),
            Strategy::Hashed => Storage::Hashed(HashMap::new()),
            Strategy::HashedCaseInsensitive => Storage::HashedCaseInsensitive(HashMap::new()),
        }
    }
}

/// Case-folding used by the case-insensitive strategy.
pub(crate) fn fold_key(key: &str) -> String {
    key.to_ascii_lowercase()
}

/// A string-keyed map of [`Value`]s.
///
/// # Example
///
/// ```
/// use anyconf_core::{AnyMap, Strategy, Value};
///
/// let mut map = AnyMap::with_strategy(Strategy::HashedCaseInsensitive);
/// map.insert("Foo", 1);
/// assert_eq!(map.count("FOO"), 1);
/// assert_eq!(map.at("foo").unwrap(), &Value::Integer(1));
/// ```
#[derive(Debug, Clone)]
pub struct AnyMap {
    storage: Storage,
}

impl Default for AnyMap {
    fn default() -> Self {
        Self::new()
    }
}

impl AnyMap {
    /// An empty map with the [`Strategy::Ordered`] strategy.
    pub fn new() -> Self {
        Self::with_strategy(Strategy::Ordered)
    }

    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            storage: Storage::empty(strategy),
        }
    }

    /// Build a map from key/value pairs, inserting them one at a time.
    /// A later pair with a duplicate key overwrites the earlier one.
    pub fn from_pairs<K, V, I>(strategy: Strategy, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::with_strategy(strategy);
        for (key, value) in pairs {
            map.insert_or_assign(key, value);
        }
        map
    }

    pub fn strategy(&self) -> Strategy {
        match self.storage {
            Storage::Ordered(_) => Strategy::Ordered,
            Storage::Hashed(_) => Strategy::Hashed,
            Storage::HashedCaseInsensitive(_) => Strategy::HashedCaseInsensitive,
        }
    }

    pub fn len(&self) -> usize {
        match &self.storage {
            Storage::Ordered(map) => map.len(),
            Storage::Hashed(map) => map.len(),
            Storage::HashedCaseInsensitive(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries matching `key`: 0 or 1.
    pub fn count(&self, key: &str) -> usize {
        usize::from(self.contains_key(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        match &self.storage {
            Storage::Ordered(map) => map.get(key),
            Storage::Hashed(map) => map.get(key),
            Storage::HashedCaseInsensitive(map) => map.get(&fold_key(key)).map(|(_, v)| v),
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match &mut self.storage {
            Storage::Ordered(map) => map.get_mut(key),
            Storage::Hashed(map) => map.get_mut(key),
            Storage::HashedCaseInsensitive(map) => {
                map.get_mut(&fold_key(key)).map(|(_, v)| v)
            }
        }
    }

    /// Required lookup; fails with [`AnyError::KeyNotFound`] when absent.
    pub fn at(&self, key: &str) -> Result<&Value> {
        self.get(key)
            .ok_or_else(|| AnyError::KeyNotFound(key.to_string()))
    }

    pub fn at_mut(&mut self, key: &str) -> Result<&mut Value> {
        self.get_mut(key)
            .ok_or_else(|| AnyError::KeyNotFound(key.to_string()))
    }

    /// Mutable access to the entry for `key`, inserting a default value first if absent.
    pub fn get_or_insert_default(&mut self, key: impl Into<String>) -> &mut Value {
        let key = key.into();
        match &mut self.storage {
            Storage::Ordered(map) => map.entry(key).or_default(),
            Storage::Hashed(map) => map.entry(key).or_default(),
            Storage::HashedCaseInsensitive(map) => {
                let (_, value) = map
                    .entry(fold_key(&key))
                    .or_insert_with(|| (key, Value::default()));
                value
            }
        }
    }

    /// Insert `value` only if `key` is absent.
    ///
    /// Returns an iterator positioned at the entry for `key` and whether an
    /// insertion happened. An existing value is left unchanged.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> (IterMut<'_>, bool) {
        let key = key.into();
        let inserted = match &mut self.storage {
            Storage::Ordered(map) => match map.entry(key.clone()) {
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(value.into());
                    true
                }
                btree_map::Entry::Occupied(_) => false,
            },
            Storage::Hashed(map) => match map.entry(key.clone()) {
                hash_map::Entry::Vacant(slot) => {
                    slot.insert(value.into());
                    true
                }
                hash_map::Entry::Occupied(_) => false,
            },
            Storage::HashedCaseInsensitive(map) => match map.entry(fold_key(&key)) {
                hash_map::Entry::Vacant(slot) => {
                    slot.insert((key.clone(), value.into()));
                    true
                }
                hash_map::Entry::Occupied(_) => false,
            },
        };
        (self.iter_mut_at(&key), inserted)
    }

    /// Insert or overwrite the value for `key`, returning the previous value.
    ///
    /// With the case-insensitive strategy an existing entry keeps its original key casing.
    pub fn insert_or_assign(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match &mut self.storage {
            Storage::Ordered(map) => map.insert(key, value),
            Storage::Hashed(map) => map.insert(key, value),
            Storage::HashedCaseInsensitive(map) => match map.entry(fold_key(&key)) {
                hash_map::Entry::Occupied(mut slot) => {
                    Some(std::mem::replace(&mut slot.get_mut().1, value))
                }
                hash_map::Entry::Vacant(slot) => {
                    slot.insert((key, value));
                    None
                }
            },
        }
    }

    /// Remove the entry for `key`, returning whether one was removed.
    pub fn erase(&mut self, key: &str) -> bool {
        self.remove(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        match &mut self.storage {
            Storage::Ordered(map) => map.remove(key),
            Storage::Hashed(map) => map.remove(key),
            Storage::HashedCaseInsensitive(map) => map.remove(&fold_key(key)).map(|(_, v)| v),
        }
    }

    pub fn clear(&mut self) {
        match &mut self.storage {
            Storage::Ordered(map) => map.clear(),
            Storage::Hashed(map) => map.clear(),
            Storage::HashedCaseInsensitive(map) => map.clear(),
        }
    }

    /// Move the storage out, leaving an empty map of the same strategy behind.
    pub fn take(&mut self) -> AnyMap {
        let empty = Storage::empty(self.strategy());
        let storage = std::mem::replace(&mut self.storage, empty);
        AnyMap { storage }
    }

    pub fn iter(&self) -> Iter<'_> {
        let strategy = self.strategy();
        match &self.storage {
            Storage::Ordered(map) => Iter::new(strategy, map.iter().map(keyed)),
            Storage::Hashed(map) => Iter::new(strategy, map.iter().map(keyed)),
            Storage::HashedCaseInsensitive(map) => Iter::new(strategy, map.values().map(slot)),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_> {
        let strategy = self.strategy();
        match &mut self.storage {
            Storage::Ordered(map) => IterMut::new(strategy, map.iter_mut().map(keyed_mut)),
            Storage::Hashed(map) => IterMut::new(strategy, map.iter_mut().map(keyed_mut)),
            Storage::HashedCaseInsensitive(map) => {
                IterMut::new(strategy, map.values_mut().map(slot_mut))
            }
        }
    }

    /// A mutable iterator whose current entry is `key` (or at end if absent).
    fn iter_mut_at(&mut self, key: &str) -> IterMut<'_> {
        let strategy = self.strategy();
        match &mut self.storage {
            Storage::Ordered(map) => IterMut::new(
                strategy,
                map.range_mut::<str, _>((Bound::Included(key), Bound::Unbounded))
                    .map(keyed_mut),
            ),
            Storage::Hashed(map) => {
                IterMut::new(strategy, map.iter_mut().map(keyed_mut)).seek(|k| k == key)
            }
            Storage::HashedCaseInsensitive(map) => {
                let folded = fold_key(key);
                IterMut::new(strategy, map.values_mut().map(slot_mut))
                    .seek(|k| fold_key(k) == folded)
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

fn keyed<'a>((key, value): (&'a String, &'a Value)) -> (&'a str, &'a Value) {
    (key.as_str(), value)
}

fn keyed_mut<'a>((key, value): (&'a String, &'a mut Value)) -> (&'a str, &'a mut Value) {
    (key.as_str(), value)
}

fn slot(entry: &(String, Value)) -> (&str, &Value) {
    (entry.0.as_str(), &entry.1)
}

fn slot_mut(entry: &mut (String, Value)) -> (&str, &mut Value) {
    let (key, value) = entry;
    (key.as_str(), value)
}

impl PartialEq for AnyMap {
    fn eq(&self, other: &Self) -> bool {
        match (&self.storage, &other.storage) {
            (Storage::Ordered(a), Storage::Ordered(b)) => a == b,
            (Storage::Hashed(a), Storage::Hashed(b)) => a == b,
            // Folded keys decide membership; the preserved casing does not.
            (Storage::HashedCaseInsensitive(a), Storage::HashedCaseInsensitive(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(folded, (_, value))| {
                        b.get(folded).is_some_and(|(_, other)| value == other)
                    })
            }
            _ => false,
        }
    }
}

impl<'a> IntoIterator for &'a AnyMap {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut AnyMap {
    type Item = (&'a str, &'a mut Value);
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for AnyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        AnyMap::from_pairs(Strategy::Ordered, iter)
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for AnyMap {
    fn from(map: BTreeMap<String, T>) -> Self {
        AnyMap::from_pairs(Strategy::Ordered, map)
    }
}

impl<T: Into<Value>> From<HashMap<String, T>> for AnyMap {
    fn from(map: HashMap<String, T>) -> Self {
        AnyMap::from_pairs(Strategy::Hashed, map)
    }
}

impl fmt::Display for AnyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}
