//! Canonical JSON-Schema output
//!
//! Key order: `type`, `description`, kind facets, `enum`, `default`,
//! `requires`, `optional`, then extensions in their stored order.

use serde_json::{Map, Value};
use tracing::debug;

use crate::schema::{Additional, Items, NumericRange, SchemaKind, SchemaNode};

/// Render a tree as pretty-printed JSON Schema with a trailing newline
pub fn to_json_schema(node: &SchemaNode) -> String {
    let text = format!("{:#}\n", to_json_value(node));
    debug!(bytes = text.len(), "emitted json schema");
    text
}

/// Render a tree as a JSON value
pub fn to_json_value(node: &SchemaNode) -> Value {
    let mut map = Map::new();
    map.insert("type".to_string(), type_value(node));
    if let Some(description) = &node.description {
        map.insert("description".to_string(), Value::String(description.clone()));
    }

    match &node.kind {
        SchemaKind::String(s) => {
            if let Some(min) = s.length.min {
                map.insert("minLength".to_string(), Value::from(min));
            }
            if let Some(max) = s.length.max {
                map.insert("maxLength".to_string(), Value::from(max));
            }
            if let Some(pattern) = &s.pattern {
                map.insert("pattern".to_string(), Value::String(pattern.clone()));
            }
        }
        SchemaKind::Integer(range) | SchemaKind::Number(range) => insert_range(&mut map, range),
        SchemaKind::Object(obj) => {
            if !obj.properties.is_empty() {
                let properties = obj
                    .properties
                    .iter()
                    .map(|p| (p.name.clone(), to_json_value(&p.schema)))
                    .collect();
                map.insert("properties".to_string(), Value::Object(properties));
            }
            insert_additional(&mut map, "additionalProperties", &obj.additional);
        }
        SchemaKind::Array(arr) => {
            match &arr.items {
                Items::List(item) => {
                    map.insert("items".to_string(), to_json_value(item));
                }
                Items::Tuple {
                    positions,
                    additional,
                } => {
                    let items = positions.iter().map(to_json_value).collect();
                    map.insert("items".to_string(), Value::Array(items));
                    insert_additional(&mut map, "additionalItems", additional);
                }
            }
            if let Some(min) = arr.count.min {
                map.insert("minItems".to_string(), Value::from(min));
            }
            if let Some(max) = arr.count.max {
                map.insert("maxItems".to_string(), Value::from(max));
            }
            if arr.unique {
                map.insert("uniqueItems".to_string(), Value::Bool(true));
            }
        }
        SchemaKind::Boolean | SchemaKind::Null | SchemaKind::Any | SchemaKind::Union(_) => {}
    }

    if let Some(values) = &node.enum_values {
        map.insert("enum".to_string(), Value::Array(values.clone()));
    }
    if let Some(default) = &node.default {
        map.insert("default".to_string(), default.clone());
    }
    if !node.requires.is_empty() {
        let names = node.requires.iter().cloned().map(Value::String).collect();
        map.insert("requires".to_string(), Value::Array(names));
    }
    if node.optional {
        map.insert("optional".to_string(), Value::Bool(true));
    }

    for (key, value) in &node.extensions {
        if !map.contains_key(key) {
            map.insert(key.clone(), value.clone());
        }
    }
    Value::Object(map)
}

fn type_value(node: &SchemaNode) -> Value {
    match &node.kind {
        SchemaKind::Union(alternatives) => {
            Value::Array(alternatives.iter().map(alternative_value).collect())
        }
        kind => Value::String(kind.type_name().to_string()),
    }
}

/// Alternatives without facets collapse to their bare type name
fn alternative_value(node: &SchemaNode) -> Value {
    let value = to_json_value(node);
    if let Value::Object(map) = &value {
        if map.len() == 1 {
            if let Some(Value::String(name)) = map.get("type") {
                return Value::String(name.clone());
            }
        }
    }
    value
}

fn insert_range(map: &mut Map<String, Value>, range: &NumericRange) {
    if let Some(min) = range.min {
        map.insert("minimum".to_string(), min.value.to_value());
        if min.exclusive {
            map.insert("exclusiveMinimum".to_string(), Value::Bool(true));
        }
    }
    if let Some(max) = range.max {
        map.insert("maximum".to_string(), max.value.to_value());
        if max.exclusive {
            map.insert("exclusiveMaximum".to_string(), Value::Bool(true));
        }
    }
}

fn insert_additional(map: &mut Map<String, Value>, keyword: &str, additional: &Additional) {
    match additional {
        Additional::Allowed => {}
        Additional::Forbidden => {
            map.insert(keyword.to_string(), Value::Bool(false));
        }
        Additional::Typed(schema) => {
            map.insert(keyword.to_string(), to_json_value(schema));
        }
    }
}
