//! # anyconf-core
//!
//! A dynamically-typed, recursive value model for configuration and metadata.
//!
//! [`Value`] is a closed sum type over text, reals, integers, booleans, boxed
//! self-references, sequences and maps. [`AnyMap`] is a string-keyed map whose
//! storage [`Strategy`] (ordered, hashed, or hashed with case-insensitive keys)
//! is chosen once at construction. Both own their children outright: cloning
//! is a deep copy and equality is structural.
//!
//! ## Quick start
//!
//! ```rust
//! use anyconf_core::{AnyMap, Value};
//!
//! let mut map: AnyMap = [
//!     ("hi", Value::from(2)),
//!     ("lost", Value::from(3)),
//!     ("as", Value::from("ab")),
//! ]
//! .into_iter()
//! .collect();
//!
//! assert_eq!(map.len(), 3);
//! assert_eq!(map.at("hi").unwrap(), &Value::Integer(2));
//! assert_eq!(map.resolve("as").unwrap(), Value::from("ab"));
//!
//! assert!(map.erase("lost"));
//! assert_eq!(map.count("lost"), 0);
//! ```
//!
//! ## Modules
//!
//! - [`value`]: the `Value` sum type, construction and typed extraction
//! - [`map`]: `AnyMap` and its storage strategies
//! - [`iter`]: strategy-agnostic map iterators
//! - [`path`]: dotted-path lookup (`"items.-1.name"`)
//! - [`render`]: indented diagnostic dump (`to_json`)
//! - [`json`]: strict JSON via serde (`to_json_string`, `from_json_str`)
//! - [`manifest`]: component manifest reader
//! - [`error`]: error types

pub mod error;
pub mod iter;
pub mod json;
pub mod manifest;
pub mod map;
pub mod path;
pub mod render;
pub mod value;

pub use error::{AnyError, ManifestError};
pub use iter::{Iter, IterMut};
pub use manifest::{parse_manifest, ComponentInfo, ReferenceInfo, ServiceInfo};
pub use map::{AnyMap, Strategy};
pub use value::{Kind, Value};
