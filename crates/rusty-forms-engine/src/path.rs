// File: src/path.rs
// Purpose: Dot-path helpers - value lookup and nested error tree building

use serde_json::{Map, Value};

use crate::error::{Result, ValidationError};

pub(crate) static UNDEFINED: Value = Value::Null;

/// Split a field path into its segments
pub fn segments(path: &str, separator: char) -> impl Iterator<Item = &str> {
    path.split(separator)
}

/// Resolve a field path inside a value tree
///
/// Missing keys and non-object intermediates resolve to `Null`, so
/// `"address.zip"` on `{}` is simply undefined rather than an error.
pub fn resolve<'a>(values: &'a Value, path: &str, separator: char) -> &'a Value {
    let mut node = values;
    for segment in segments(path, separator) {
        node = match node {
            Value::Object(map) => match map.get(segment) {
                Some(child) => child,
                None => return &UNDEFINED,
            },
            _ => return &UNDEFINED,
        };
    }
    node
}

/// Set `leaf` at `path`, creating intermediate objects on demand
///
/// Siblings sharing a prefix land in the same container. A non-object value
/// sitting where a container is needed gets replaced.
pub fn insert(tree: &mut Map<String, Value>, path: &str, separator: char, leaf: Value) {
    let mut parts = segments(path, separator).peekable();
    let mut node = tree;
    while let Some(segment) = parts.next() {
        if parts.peek().is_none() {
            node.insert(segment.to_string(), leaf);
            return;
        }
        let child = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !child.is_object() {
            *child = Value::Object(Map::new());
        }
        node = match child {
            Value::Object(map) => map,
            _ => unreachable!("container was just made an object"),
        };
    }
}

/// Reject paths that cannot be mapped onto a tree
pub fn check(path: &str, separator: char) -> Result<()> {
    if path.is_empty() {
        return Err(ValidationError::InvalidFieldPath {
            path: path.to_string(),
            reason: "path is empty".to_string(),
        });
    }
    if segments(path, separator).any(str::is_empty) {
        return Err(ValidationError::InvalidFieldPath {
            path: path.to_string(),
            reason: format!("empty segment between '{}' separators", separator),
        });
    }
    Ok(())
}
