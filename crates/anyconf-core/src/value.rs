//! The recursive `Value` sum type.
//!
//! A `Value` is one of seven closed alternatives: four scalars, a boxed
//! self-reference, a sequence and a map. Containers own their children
//! outright, so `Clone` is always a deep copy and equality is structural.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::{AnyError, Result};
use crate::map::AnyMap;

/// A dynamically-typed configuration value.
///
/// Equality is derived: two values are equal only when their active
/// alternatives match, so `Integer(1)`, `Real(1.0)` and `Boolean(true)` are
/// pairwise unequal.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Real(f64),
    Integer(i64),
    Boolean(bool),
    /// An owned, heap-allocated nested value.
    Boxed(Box<Value>),
    Sequence(Vec<Value>),
    Map(AnyMap),
}

/// The active alternative of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Text,
    Real,
    Integer,
    Boolean,
    Boxed,
    Sequence,
    Map,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Text => "text",
            Kind::Real => "real",
            Kind::Integer => "integer",
            Kind::Boolean => "boolean",
            Kind::Boxed => "boxed",
            Kind::Sequence => "sequence",
            Kind::Map => "map",
        };
        f.write_str(name)
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Text(String::new())
    }
}

impl Value {
    /// Wrap a value in the `Boxed` alternative.
    pub fn boxed(value: impl Into<Value>) -> Self {
        Value::Boxed(Box::new(value.into()))
    }

    /// Which alternative is active.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Text(_) => Kind::Text,
            Value::Real(_) => Kind::Real,
            Value::Integer(_) => Kind::Integer,
            Value::Boolean(_) => Kind::Boolean,
            Value::Boxed(_) => Kind::Boxed,
            Value::Sequence(_) => Kind::Sequence,
            Value::Map(_) => Kind::Map,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Text(_) | Value::Real(_) | Value::Integer(_) | Value::Boolean(_)
        )
    }

    fn mismatch(&self, expected: Kind) -> AnyError {
        AnyError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    pub fn as_text(&self) -> Result<&str> {
        match self {
            Value::Text(s) => Ok(s),
            other => Err(other.mismatch(Kind::Text)),
        }
    }

    pub fn as_real(&self) -> Result<f64> {
        match self {
            Value::Real(r) => Ok(*r),
            other => Err(other.mismatch(Kind::Real)),
        }
    }

    pub fn as_integer(&self) -> Result<i64> {
        match self {
            Value::Integer(i) => Ok(*i),
            other => Err(other.mismatch(Kind::Integer)),
        }
    }

    pub fn as_boolean(&self) -> Result<bool> {
        match self {
            Value::Boolean(b) => Ok(*b),
            other => Err(other.mismatch(Kind::Boolean)),
        }
    }

    pub fn as_boxed(&self) -> Result<&Value> {
        match self {
            Value::Boxed(inner) => Ok(inner),
            other => Err(other.mismatch(Kind::Boxed)),
        }
    }

    pub fn as_sequence(&self) -> Result<&[Value]> {
        match self {
            Value::Sequence(items) => Ok(items),
            other => Err(other.mismatch(Kind::Sequence)),
        }
    }

    pub fn as_sequence_mut(&mut self) -> Result<&mut Vec<Value>> {
        match self {
            Value::Sequence(items) => Ok(items),
            other => Err(other.mismatch(Kind::Sequence)),
        }
    }

    pub fn as_map(&self) -> Result<&AnyMap> {
        match self {
            Value::Map(map) => Ok(map),
            other => Err(other.mismatch(Kind::Map)),
        }
    }

    pub fn as_map_mut(&mut self) -> Result<&mut AnyMap> {
        match self {
            Value::Map(map) => Ok(map),
            other => Err(other.mismatch(Kind::Map)),
        }
    }

    /// Extract an owned copy of the payload as `T`.
    ///
    /// ```
    /// use anyconf_core::Value;
    ///
    /// let v = Value::from(42);
    /// assert_eq!(v.extract::<i64>().unwrap(), 42);
    /// assert!(v.extract::<bool>().is_err());
    /// ```
    pub fn extract<T>(&self) -> Result<T>
    where
        T: for<'a> TryFrom<&'a Value, Error = AnyError>,
    {
        T::try_from(self)
    }

    /// Strip any number of `Boxed` layers.
    pub fn unboxed(&self) -> &Value {
        let mut current = self;
        while let Value::Boxed(inner) = current {
            current = inner;
        }
        current
    }
}

// ----------------------------------------------------------------------------
// Construction
// ----------------------------------------------------------------------------

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Value::Real(r)
    }
}

impl From<f32> for Value {
    fn from(r: f32) -> Self {
        Value::Real(f64::from(r))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Box<Value>> for Value {
    fn from(inner: Box<Value>) -> Self {
        Value::Boxed(inner)
    }
}

impl From<AnyMap> for Value {
    fn from(map: AnyMap) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(map: BTreeMap<String, T>) -> Self {
        Value::Map(AnyMap::from(map))
    }
}

impl<T: Into<Value>> From<HashMap<String, T>> for Value {
    fn from(map: HashMap<String, T>) -> Self {
        Value::Map(AnyMap::from(map))
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Sequence(iter.into_iter().map(Into::into).collect())
    }
}

// ----------------------------------------------------------------------------
// Typed extraction
// ----------------------------------------------------------------------------

impl TryFrom<&Value> for String {
    type Error = AnyError;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_text().map(str::to_string)
    }
}

impl TryFrom<&Value> for f64 {
    type Error = AnyError;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_real()
    }
}

impl TryFrom<&Value> for i64 {
    type Error = AnyError;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_integer()
    }
}

impl TryFrom<&Value> for bool {
    type Error = AnyError;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_boolean()
    }
}

impl TryFrom<&Value> for Vec<Value> {
    type Error = AnyError;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_sequence().map(<[Value]>::to_vec)
    }
}

impl TryFrom<&Value> for AnyMap {
    type Error = AnyError;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_map().cloned()
    }
}

impl TryFrom<Value> for String {
    type Error = AnyError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(other.mismatch(Kind::Text)),
        }
    }
}

impl TryFrom<Value> for Vec<Value> {
    type Error = AnyError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Sequence(items) => Ok(items),
            other => Err(other.mismatch(Kind::Sequence)),
        }
    }
}

impl TryFrom<Value> for AnyMap {
    type Error = AnyError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Map(map) => Ok(map),
            other => Err(other.mismatch(Kind::Map)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}
