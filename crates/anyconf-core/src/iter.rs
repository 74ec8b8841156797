//! Strategy-agnostic iterators over [`AnyMap`](crate::AnyMap) entries.
//!
//! [`Iter`] and [`IterMut`] wrap whichever backing iterator the map's storage
//! produced and remember the map's [`Strategy`]. Besides the usual
//! [`Iterator`] protocol they expose cursor operations (`current`, `advance`,
//! `is_end`) so an iterator returned from [`AnyMap::insert`](crate::AnyMap::insert)
//! can be inspected in place.
//!
//! A default-constructed iterator is *invalid*: it yields nothing, compares
//! equal only to another invalid iterator, and fails with
//! [`AnyError::InvalidIterator`] when dereferenced or advanced.

use std::fmt;

use crate::error::{AnyError, Result};
use crate::map::Strategy;
use crate::value::Value;

type Backing<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

/// Read-only iterator over `(key, value)` entries.
pub struct Iter<'a> {
    strategy: Option<Strategy>,
    front: Option<(&'a str, &'a Value)>,
    rest: Backing<'a, (&'a str, &'a Value)>,
}

/// Mutable iterator over `(key, value)` entries.
pub struct IterMut<'a> {
    strategy: Option<Strategy>,
    front: Option<(&'a str, &'a mut Value)>,
    rest: Backing<'a, (&'a str, &'a mut Value)>,
}

/// Two positions are the same when both are past the end, or both sit on
/// the same stored key.
fn same_position(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => std::ptr::eq(a, b),
        _ => false,
    }
}

impl<'a> Iter<'a> {
    pub(crate) fn new(
        strategy: Strategy,
        entries: impl Iterator<Item = (&'a str, &'a Value)> + 'a,
    ) -> Self {
        let mut rest: Backing<'a, _> = Box::new(entries);
        let front = rest.next();
        Self {
            strategy: Some(strategy),
            front,
            rest,
        }
    }

    /// Strategy of the map this iterator walks; `None` when invalid.
    pub fn strategy(&self) -> Option<Strategy> {
        self.strategy
    }

    pub fn is_valid(&self) -> bool {
        self.strategy.is_some()
    }

    /// True for a valid iterator positioned past the last entry.
    pub fn is_end(&self) -> bool {
        self.is_valid() && self.front.is_none()
    }

    /// The entry under the cursor.
    pub fn current(&self) -> Result<(&'a str, &'a Value)> {
        if !self.is_valid() {
            return Err(AnyError::InvalidIterator);
        }
        self.front.ok_or(AnyError::InvalidIterator)
    }

    /// Move the cursor to the next entry.
    pub fn advance(&mut self) -> Result<()> {
        if self.is_end() || !self.is_valid() {
            return Err(AnyError::InvalidIterator);
        }
        self.front = self.rest.next();
        Ok(())
    }
}

impl Default for Iter<'_> {
    fn default() -> Self {
        Self {
            strategy: None,
            front: None,
            rest: Box::new(std::iter::empty()),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.front.take()?;
        self.front = self.rest.next();
        Some(current)
    }
}

impl PartialEq for Iter<'_> {
    /// Iterators over different strategies are never equal.
    fn eq(&self, other: &Self) -> bool {
        match (self.strategy, other.strategy) {
            (None, None) => true,
            (Some(a), Some(b)) if a == b => same_position(
                self.front.map(|(k, _)| k),
                other.front.map(|(k, _)| k),
            ),
            _ => false,
        }
    }
}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("strategy", &self.strategy)
            .field("current", &self.front.map(|(k, _)| k))
            .finish_non_exhaustive()
    }
}

impl<'a> IterMut<'a> {
    pub(crate) fn new(
        strategy: Strategy,
        entries: impl Iterator<Item = (&'a str, &'a mut Value)> + 'a,
    ) -> Self {
        let mut rest: Backing<'a, _> = Box::new(entries);
        let front = rest.next();
        Self {
            strategy: Some(strategy),
            front,
            rest,
        }
    }

    /// Advance until the current key satisfies `matches`, or to the end.
    pub(crate) fn seek(mut self, mut matches: impl FnMut(&str) -> bool) -> Self {
        while let Some((key, _)) = &self.front {
            if matches(*key) {
                break;
            }
            self.front = self.rest.next();
        }
        self
    }

    pub fn strategy(&self) -> Option<Strategy> {
        self.strategy
    }

    pub fn is_valid(&self) -> bool {
        self.strategy.is_some()
    }

    pub fn is_end(&self) -> bool {
        self.is_valid() && self.front.is_none()
    }

    pub fn current(&self) -> Result<(&str, &Value)> {
        if !self.is_valid() {
            return Err(AnyError::InvalidIterator);
        }
        match &self.front {
            Some((key, value)) => Ok((*key, &**value)),
            None => Err(AnyError::InvalidIterator),
        }
    }

    /// The entry under the cursor, with write access to its value.
    pub fn current_mut(&mut self) -> Result<(&str, &mut Value)> {
        if !self.is_valid() {
            return Err(AnyError::InvalidIterator);
        }
        match &mut self.front {
            Some((key, value)) => Ok((*key, &mut **value)),
            None => Err(AnyError::InvalidIterator),
        }
    }

    pub fn advance(&mut self) -> Result<()> {
        if self.is_end() || !self.is_valid() {
            return Err(AnyError::InvalidIterator);
        }
        self.front = self.rest.next();
        Ok(())
    }
}

impl Default for IterMut<'_> {
    fn default() -> Self {
        Self {
            strategy: None,
            front: None,
            rest: Box::new(std::iter::empty()),
        }
    }
}

impl<'a> Iterator for IterMut<'a> {
    type Item = (&'a str, &'a mut Value);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.front.take()?;
        self.front = self.rest.next();
        Some(current)
    }
}

impl PartialEq for IterMut<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self.strategy, other.strategy) {
            (None, None) => true,
            (Some(a), Some(b)) if a == b => same_position(
                self.front.as_ref().map(|(k, _)| *k),
                other.front.as_ref().map(|(k, _)| *k),
            ),
            _ => false,
        }
    }
}

impl fmt::Debug for IterMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("strategy", &self.strategy)
            .field("current", &self.front.as_ref().map(|(k, _)| *k))
            .finish_non_exhaustive()
    }
}

fn freeze<'a>((key, value): (&'a str, &'a mut Value)) -> (&'a str, &'a Value) {
    (key, &*value)
}

/// Read-only view at the same position; there is no way back.
impl<'a> From<IterMut<'a>> for Iter<'a> {
    fn from(iter: IterMut<'a>) -> Self {
        Self {
            strategy: iter.strategy,
            front: iter.front.map(freeze),
            rest: Box::new(iter.rest.map(freeze)),
        }
    }
}
