//! Bridging between JSON property values and Bolt query parameters.

use aegis_core::Properties;
use neo4rs::{Node, Query};
use serde_json::Value;

/// Bind one JSON property value as a named query parameter.
///
/// Callers strip nulls before binding (see `to_properties`); a null that
/// slips through binds as an empty string. Nested objects are stored as
/// their JSON text since graph properties hold only scalars and lists.
pub fn bind_json(query: Query, key: &str, value: &Value) -> Query {
    match value {
        Value::Bool(b) => query.param(key, *b),
        Value::Number(n) if n.is_i64() => query.param(key, n.as_i64().unwrap_or_default()),
        Value::Number(n) => query.param(key, n.as_f64().unwrap_or_default()),
        Value::String(s) => query.param(key, s.as_str()),
        Value::Array(items) => {
            let items: Vec<String> = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            query.param(key, items)
        }
        Value::Null => query.param(key, ""),
        Value::Object(_) => query.param(key, value.to_string()),
    }
}

/// Flatten a node's stored properties into a JSON map.
pub fn node_properties(node: &Node) -> Properties {
    let mut props = Properties::new();
    for key in node.keys() {
        if let Ok(value) = node.get::<Value>(key) {
            props.insert(key.to_string(), value);
        }
    }
    props
}
