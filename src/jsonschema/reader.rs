//! JSON-Schema reader
//!
//! Accepts a draft-03 shaped document with the draft-02 `optional` flag and
//! the draft-04 `required` array. Keywords that do not apply to a node's
//! kind, and unknown keywords, are kept as extensions in source order.
//! Text input may not repeat a key within one object.

use serde_json::{Map, Value};
use tracing::debug;

use super::document::parse_document;
use super::errors::{FormatResult, JsonSchemaResult, SchemaFormatError};
use crate::schema::keywords::{has_dangling_escape, keyword_applies, normalize_pattern};
use crate::schema::{
    normalize_value, pointer, Additional, ArraySchema, Bound, Items, LengthRange, Limit,
    NumericRange, ObjectSchema, PropertyDef, SchemaKind, SchemaNode, StringSchema,
};

/// Parse JSON-Schema text
pub fn parse_json_schema(text: &str) -> JsonSchemaResult<SchemaNode> {
    let value = parse_document(text)?;
    let node = read_schema(&value)?;
    debug!(kind = node.type_name(), bytes = text.len(), "parsed json schema");
    Ok(node)
}

/// Interpret an already-parsed JSON value as a schema
pub fn read_schema(value: &Value) -> FormatResult<SchemaNode> {
    read_node(value, "")
}

fn fail<T>(path: &str, reason: impl Into<String>) -> FormatResult<T> {
    Err(SchemaFormatError::new(path, reason))
}

fn read_node(value: &Value, path: &str) -> FormatResult<SchemaNode> {
    let map = match value.as_object() {
        Some(map) => map,
        None => return fail(path, "expected a json schema (which is an object)"),
    };
    if map.contains_key("$ref") {
        return fail(
            &pointer::push(path, "$ref"),
            "schema references ($ref) are not supported",
        );
    }

    let mut node = read_type(map, path)?;
    match &mut node.kind {
        SchemaKind::String(s) => read_string(map, path, s)?,
        SchemaKind::Integer(range) | SchemaKind::Number(range) => *range = read_range(map, path)?,
        SchemaKind::Object(obj) => read_object(map, path, obj)?,
        SchemaKind::Array(arr) => read_array(map, path, arr)?,
        SchemaKind::Boolean | SchemaKind::Null | SchemaKind::Any | SchemaKind::Union(_) => {}
    }
    read_common(map, path, &mut node)?;

    for (key, value) in map {
        if !keyword_applies(&node.kind, key) {
            node.extensions.insert(key.clone(), value.clone());
        }
    }
    Ok(node)
}

fn kind_for(name: &str, path: &str) -> FormatResult<SchemaKind> {
    match SchemaKind::from_type_name(name) {
        Some(kind) => Ok(kind),
        None => fail(path, format!("invalid type specified: '{}'", name)),
    }
}

fn read_type(map: &Map<String, Value>, path: &str) -> FormatResult<SchemaNode> {
    let type_path = pointer::push(path, "type");
    match map.get("type") {
        None => Ok(SchemaNode::any()),
        Some(Value::String(name)) => Ok(SchemaNode::new(kind_for(name, &type_path)?)),
        Some(Value::Array(types)) if !types.is_empty() => {
            let mut alternatives = Vec::with_capacity(types.len());
            for (i, alternative) in types.iter().enumerate() {
                let alt_path = pointer::push_index(&type_path, i);
                let node = match alternative {
                    Value::String(name) => SchemaNode::new(kind_for(name, &alt_path)?),
                    Value::Object(_) => read_node(alternative, &alt_path)?,
                    _ => return fail(&alt_path, "union members must be type names or schemas"),
                };
                alternatives.push(node);
            }
            Ok(SchemaNode::union(alternatives))
        }
        Some(_) => fail(
            &type_path,
            "the type property requires either a string or non-empty array value",
        ),
    }
}

fn read_string(map: &Map<String, Value>, path: &str, facets: &mut StringSchema) -> FormatResult<()> {
    facets.length = LengthRange::new(
        read_count(map, path, "minLength")?,
        read_count(map, path, "maxLength")?,
    );
    if let Some(value) = map.get("pattern") {
        let pattern_path = pointer::push(path, "pattern");
        match value.as_str() {
            Some("") => return fail(&pattern_path, "'pattern' property requires a non-empty string"),
            Some(p) if p.contains(['\n', '\r']) => {
                return fail(&pattern_path, "'pattern' property must not contain line breaks")
            }
            Some(p) if has_dangling_escape(p) => {
                return fail(&pattern_path, "'pattern' property must not end with a lone backslash")
            }
            Some(p) => facets.pattern = Some(normalize_pattern(p)),
            None => return fail(&pattern_path, "'pattern' property requires a string value"),
        }
    }
    Ok(())
}

fn read_count(map: &Map<String, Value>, path: &str, keyword: &str) -> FormatResult<Option<u64>> {
    match map.get(keyword) {
        None => Ok(None),
        Some(value) => match value.as_u64() {
            Some(n) => Ok(Some(n)),
            None => fail(
                &pointer::push(path, keyword),
                format!("'{}' property requires a non-negative integer", keyword),
            ),
        },
    }
}

fn read_range(map: &Map<String, Value>, path: &str) -> FormatResult<NumericRange> {
    let min = read_bound(map, path, "minimum", "exclusiveMinimum")?;
    let max = read_bound(map, path, "maximum", "exclusiveMaximum")?;
    Ok(NumericRange::new(min, max))
}

fn read_bound(
    map: &Map<String, Value>,
    path: &str,
    keyword: &str,
    exclusive_keyword: &str,
) -> FormatResult<Option<Bound>> {
    let value = match map.get(keyword) {
        None => None,
        Some(Value::Number(n)) => match Limit::from_number(n) {
            Some(limit) => Some(limit),
            None => return fail(&pointer::push(path, keyword), format!("'{}' is out of range", keyword)),
        },
        Some(_) => {
            return fail(
                &pointer::push(path, keyword),
                format!("'{}' property requires a numeric value", keyword),
            )
        }
    };

    let exclusive_path = pointer::push(path, exclusive_keyword);
    let exclusive = match map.get(exclusive_keyword) {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            return fail(
                &exclusive_path,
                format!("'{}' property requires a boolean value", exclusive_keyword),
            )
        }
    };

    match value {
        Some(value) => Ok(Some(Bound { value, exclusive })),
        None if exclusive => fail(
            &exclusive_path,
            format!("'{}' requires '{}'", exclusive_keyword, keyword),
        ),
        None => Ok(None),
    }
}

fn read_additional(value: &Value, path: &str, keyword: &str) -> FormatResult<Additional> {
    match value {
        Value::Bool(true) => Ok(Additional::Allowed),
        Value::Bool(false) => Ok(Additional::Forbidden),
        Value::Object(_) => Ok(Additional::Typed(Box::new(read_node(value, path)?))),
        _ => fail(
            path,
            format!("'{}' property requires a boolean value or a schema", keyword),
        ),
    }
}

fn read_object(map: &Map<String, Value>, path: &str, obj: &mut ObjectSchema) -> FormatResult<()> {
    let properties_path = pointer::push(path, "properties");
    if let Some(value) = map.get("properties") {
        let properties = match value.as_object() {
            Some(properties) => properties,
            None => return fail(&properties_path, "the 'properties' property expects an object value"),
        };
        for (name, schema) in properties {
            let node = read_node(schema, &pointer::push(&properties_path, name))?;
            obj.properties.push(PropertyDef::new(name.clone(), node));
        }
    }

    if let Some(value) = map.get("additionalProperties") {
        obj.additional = read_additional(
            value,
            &pointer::push(path, "additionalProperties"),
            "additionalProperties",
        )?;
    }

    if let Some(Value::Array(names)) = map.get("required") {
        let required_path = pointer::push(path, "required");
        let mut listed = Vec::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            match name.as_str() {
                Some(name) if obj.property(name).is_some() => listed.push(name),
                Some(name) => {
                    return fail(
                        &pointer::push_index(&required_path, i),
                        format!("'required' lists '{}' which is not a declared property", name),
                    )
                }
                None => {
                    return fail(
                        &pointer::push_index(&required_path, i),
                        "'required' array must contain property names",
                    )
                }
            }
        }
        for prop in &mut obj.properties {
            let is_listed = listed.contains(&prop.name.as_str());
            if is_listed && prop.schema.optional {
                return fail(
                    &pointer::push(&properties_path, &prop.name),
                    "property is listed in 'required' but marked optional",
                );
            }
            if !is_listed {
                prop.schema.optional = true;
            }
        }
    }
    Ok(())
}

fn read_array(map: &Map<String, Value>, path: &str, arr: &mut ArraySchema) -> FormatResult<()> {
    let items_path = pointer::push(path, "items");
    match map.get("items") {
        None => {}
        Some(value @ Value::Object(_)) => {
            arr.items = Items::List(Box::new(read_node(value, &items_path)?));
        }
        Some(Value::Array(list)) => {
            let mut positions = Vec::with_capacity(list.len());
            for (i, item) in list.iter().enumerate() {
                positions.push(read_node(item, &pointer::push_index(&items_path, i))?);
            }
            arr.items = Items::Tuple {
                positions,
                additional: Additional::Allowed,
            };
        }
        Some(_) => {
            return fail(
                &items_path,
                "'items' property requires schema or array of schemas",
            )
        }
    }

    if let Some(value) = map.get("additionalItems") {
        let additional_path = pointer::push(path, "additionalItems");
        match &mut arr.items {
            Items::Tuple { additional, .. } => {
                *additional = read_additional(value, &additional_path, "additionalItems")?
            }
            Items::List(_) => {
                return fail(
                    &additional_path,
                    "'additionalItems' requires an array of schemas in 'items'",
                )
            }
        }
    }

    arr.count = LengthRange::new(
        read_count(map, path, "minItems")?,
        read_count(map, path, "maxItems")?,
    );

    match map.get("uniqueItems") {
        None => {}
        Some(Value::Bool(b)) => arr.unique = *b,
        Some(_) => {
            return fail(
                &pointer::push(path, "uniqueItems"),
                "'uniqueItems' property requires a boolean value",
            )
        }
    }
    Ok(())
}

/// Keywords every kind understands
fn read_common(map: &Map<String, Value>, path: &str, node: &mut SchemaNode) -> FormatResult<()> {
    if let Some(value) = map.get("description") {
        match value.as_str() {
            Some(s) => node.description = Some(s.to_string()),
            None => {
                return fail(
                    &pointer::push(path, "description"),
                    "'description' property requires a string value",
                )
            }
        }
    }

    if let Some(value) = map.get("enum") {
        match value.as_array() {
            Some(values) if !values.is_empty() => {
                node.enum_values = Some(values.iter().cloned().map(normalize_value).collect())
            }
            _ => {
                return fail(
                    &pointer::push(path, "enum"),
                    "'enum' property requires a non-empty array",
                )
            }
        }
    }

    if let Some(value) = map.get("default") {
        node.default = Some(normalize_value(value.clone()));
    }

    if let Some(value) = map.get("requires") {
        let requires_path = pointer::push(path, "requires");
        node.requires = match value {
            Value::String(name) => vec![name.clone()],
            Value::Array(names) => {
                let mut out = Vec::with_capacity(names.len());
                for name in names {
                    match name.as_str() {
                        Some(name) => out.push(name.to_string()),
                        None => return fail(&requires_path, "'requires' array must contain property names"),
                    }
                }
                out
            }
            _ => {
                return fail(
                    &requires_path,
                    "'requires' property requires a property name or array of names",
                )
            }
        };
    }

    let optional = match map.get("optional") {
        None => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            return fail(
                &pointer::push(path, "optional"),
                "'optional' property requires a boolean value",
            )
        }
    };
    let required = match map.get("required") {
        None => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::Array(_)) if matches!(node.kind, SchemaKind::Object(_)) => None,
        Some(_) => {
            return fail(
                &pointer::push(path, "required"),
                "'required' property requires a boolean value, or an array of names on an object",
            )
        }
    };
    match (optional, required) {
        (Some(o), Some(r)) if o == r => {
            return fail(path, "'optional' and 'required' contradict each other")
        }
        (Some(o), _) => node.optional = o || node.optional,
        (None, Some(r)) => node.optional = !r || node.optional,
        (None, None) => {}
    }
    Ok(())
}
