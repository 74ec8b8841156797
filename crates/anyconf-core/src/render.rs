//! Indented diagnostic dump of [`Value`] and [`AnyMap`].
//!
//! The dump is a human-readable, JSON-shaped listing meant for logs and
//! debugging. It is *not* JSON: strings are not quoted or escaped and every
//! sequence element is followed by a separator line, including the last.
//! Use [`Value::to_json_string`] for grammar-compliant output.
//!
//! Layout, with `I` the current indent:
//!
//! - scalar: `I token\n`
//! - map: `I{\n`, then per entry `I key: \n` and the value at `I+2`, then `I}\n`
//! - sequence: `I[\n`, then per element the element at `I+2` and `I+2 ,\n`, then `I]\n`
//! - boxed: the inner value at `I+2`
//!
//! # Example
//! ```
//! use anyconf_core::{AnyMap, Value};
//!
//! let map: AnyMap = [("port", Value::from(8080))].into_iter().collect();
//! assert_eq!(map.to_json(), "{\nport: \n  8080\n}\n");
//! ```

use crate::map::AnyMap;
use crate::value::Value;

/// Spaces added per nesting level.
const INDENT_STEP: usize = 2;

impl Value {
    /// Render this value as an indented diagnostic dump.
    pub fn to_json(&self) -> String {
        let mut out = String::new();
        render_value(self, 0, &mut out);
        out
    }
}

impl AnyMap {
    /// Render this map as an indented diagnostic dump.
    pub fn to_json(&self) -> String {
        let mut out = String::new();
        render_map(self, 0, &mut out);
        out
    }
}

fn render_value(value: &Value, indent: usize, out: &mut String) {
    match value {
        Value::Text(s) => render_token(s, indent, out),
        Value::Real(r) => render_token(&r.to_string(), indent, out),
        Value::Integer(i) => render_token(&i.to_string(), indent, out),
        Value::Boolean(b) => render_token(if *b { "true" } else { "false" }, indent, out),
        Value::Boxed(inner) => render_value(inner, indent + INDENT_STEP, out),
        Value::Sequence(items) => render_sequence(items, indent, out),
        Value::Map(map) => render_map(map, indent, out),
    }
}

fn render_token(token: &str, indent: usize, out: &mut String) {
    out.push_str(&make_indent(indent));
    out.push_str(token);
    out.push('\n');
}

fn render_map(map: &AnyMap, indent: usize, out: &mut String) {
    let pad = make_indent(indent);
    out.push_str(&pad);
    out.push_str("{\n");
    for (key, value) in map {
        out.push_str(&pad);
        out.push_str(key);
        out.push_str(": \n");
        render_value(value, indent + INDENT_STEP, out);
    }
    out.push_str(&pad);
    out.push_str("}\n");
}

fn render_sequence(items: &[Value], indent: usize, out: &mut String) {
    let pad = make_indent(indent);
    let separator = make_indent(indent + INDENT_STEP);
    out.push_str(&pad);
    out.push_str("[\n");
    for item in items {
        render_value(item, indent + INDENT_STEP, out);
        out.push_str(&separator);
        out.push_str(",\n");
    }
    out.push_str(&pad);
    out.push_str("]\n");
}

fn make_indent(width: usize) -> String {
    " ".repeat(width)
}
