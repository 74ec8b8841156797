//! Dotted-path lookup through nested maps and sequences.
//!
//! # Path syntax
//!
//! - `"name"` -- the entry `name` of a map
//! - `"server.port"` -- `port` inside the map stored under `server`
//! - `"items.2.name"` -- `name` inside the third element of sequence `items`
//! - `"items.-1"` -- the last element of `items` (negative indices count from the end)
//!
//! Each step splits on the *first* dot only; map keys themselves therefore
//! cannot contain a dot when addressed through a path.

use tracing::debug;

use crate::error::{AnyError, Result};
use crate::map::AnyMap;
use crate::value::Value;

/// Split `path` into the first segment and the optional remainder.
fn split_head(path: &str) -> (&str, Option<&str>) {
    match path.split_once('.') {
        Some((head, tail)) => (head, Some(tail)),
        None => (path, None),
    }
}

impl Value {
    /// Resolve a dotted path and return a copy of the addressed value.
    ///
    /// ```
    /// use anyconf_core::Value;
    ///
    /// let v = Value::from(vec![10, 20, 30]);
    /// assert_eq!(v.resolve("-1").unwrap(), Value::Integer(30));
    /// ```
    pub fn resolve(&self, path: &str) -> Result<Value> {
        self.resolve_ref(path).cloned()
    }

    /// Resolve a dotted path without copying.
    pub fn resolve_ref(&self, path: &str) -> Result<&Value> {
        let (head, tail) = split_head(path);
        let child = match self.unboxed() {
            Value::Map(map) => map.at(head)?,
            Value::Sequence(items) => sequence_at(items, head)?,
            other => {
                debug!(segment = head, kind = %other.kind(), "path enters a scalar");
                return Err(AnyError::UnsupportedPathSegment {
                    segment: head.to_string(),
                });
            }
        };
        match tail {
            Some(rest) => child.resolve_ref(rest),
            None => Ok(child),
        }
    }
}

impl AnyMap {
    /// Resolve a dotted path starting at this map's keys.
    ///
    /// ```
    /// use anyconf_core::{AnyMap, Value};
    ///
    /// let inner: AnyMap = [("b", Value::from(vec![1, 2, 3]))].into_iter().collect();
    /// let outer: AnyMap = [("a", Value::from(inner))].into_iter().collect();
    /// assert_eq!(outer.resolve("a.b.1").unwrap(), Value::Integer(2));
    /// ```
    pub fn resolve(&self, path: &str) -> Result<Value> {
        self.resolve_ref(path).cloned()
    }

    pub fn resolve_ref(&self, path: &str) -> Result<&Value> {
        let (head, tail) = split_head(path);
        let child = self.at(head)?;
        match tail {
            Some(rest) => child.resolve_ref(rest),
            None => Ok(child),
        }
    }
}

/// Index into a sequence with Python-style negative wraparound.
fn sequence_at<'a>(items: &'a [Value], segment: &str) -> Result<&'a Value> {
    let index: i64 = segment
        .parse()
        .map_err(|_| AnyError::InvalidIndex(segment.to_string()))?;
    let len = items.len();
    let resolved = if index < 0 {
        index + len as i64
    } else {
        index
    };
    usize::try_from(resolved)
        .ok()
        .and_then(|i| items.get(i))
        .ok_or(AnyError::IndexOutOfRange { index, len })
}
