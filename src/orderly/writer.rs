//! Canonical Orderly output
//!
//! Four-space indentation, one entry per line, compound bodies closed on
//! their own line. Output only depends on the tree.

use serde_json::{Map, Value};
use tracing::debug;

use crate::schema::keywords::{escape_pattern, format_name};
use crate::schema::{Additional, Items, SchemaKind, SchemaNode};

const INDENT: &str = "    ";

/// Render a tree as canonical Orderly text
pub fn to_orderly(node: &SchemaNode) -> String {
    let mut out = String::new();
    write_entry(&mut out, None, node, 0);
    debug!(bytes = out.len(), "emitted orderly schema");
    out
}

fn write_entry(out: &mut String, name: Option<&str>, node: &SchemaNode, depth: usize) {
    out.push_str(&INDENT.repeat(depth));
    write_inline(out, name, node, depth);
    out.push_str(";\n");
}

fn write_inline(out: &mut String, name: Option<&str>, node: &SchemaNode, depth: usize) {
    write_type(out, node, depth);

    if let Some(name) = name {
        out.push(' ');
        out.push_str(&format_name(name));
    }
    if let SchemaKind::String(s) = &node.kind {
        if let Some(pattern) = &s.pattern {
            out.push_str(" /");
            out.push_str(&escape_pattern(pattern));
            out.push('/');
        }
    }
    if let Some(values) = &node.enum_values {
        out.push(' ');
        out.push_str(&Value::Array(values.clone()).to_string());
    }
    if let Some(default) = &node.default {
        out.push_str(" = ");
        out.push_str(&default.to_string());
    }
    if !node.requires.is_empty() {
        let names: Vec<String> = node.requires.iter().map(|n| format_name(n)).collect();
        out.push_str(" <");
        out.push_str(&names.join(","));
        out.push('>');
    }
    if node.optional {
        out.push('?');
    }

    let passthrough = passthrough(node);
    if !passthrough.is_empty() {
        out.push_str(" `");
        out.push_str(&Value::Object(passthrough).to_string());
        out.push('`');
    }
}

/// Keywords that travel in the backtick block
fn passthrough(node: &SchemaNode) -> Map<String, Value> {
    let mut map = Map::new();
    if let Some(description) = &node.description {
        map.insert("description".to_string(), Value::String(description.clone()));
    }
    if let SchemaKind::Array(arr) = &node.kind {
        if arr.unique {
            map.insert("uniqueItems".to_string(), Value::Bool(true));
        }
    }
    for (key, value) in &node.extensions {
        if !map.contains_key(key) {
            map.insert(key.clone(), value.clone());
        }
    }
    map
}

fn write_type(out: &mut String, node: &SchemaNode, depth: usize) {
    out.push_str(node.type_name());
    match &node.kind {
        SchemaKind::String(s) => {
            if !s.length.is_unbounded() {
                out.push(' ');
                out.push_str(&s.length.to_string());
            }
        }
        SchemaKind::Integer(range) | SchemaKind::Number(range) => {
            if !range.is_unbounded() {
                out.push(' ');
                out.push_str(&range.to_string());
            }
        }
        SchemaKind::Boolean | SchemaKind::Null | SchemaKind::Any => {}
        SchemaKind::Object(obj) => {
            write_body(
                out,
                obj.properties.iter().map(|p| (Some(p.name.as_str()), &p.schema)),
                depth,
            );
            write_additional(out, &obj.additional, depth);
        }
        SchemaKind::Array(arr) => {
            match &arr.items {
                Items::List(item) => {
                    out.push_str(" [\n");
                    write_entry(out, None, item, depth + 1);
                    out.push_str(&INDENT.repeat(depth));
                    out.push(']');
                }
                Items::Tuple {
                    positions,
                    additional,
                } => {
                    write_body(out, positions.iter().map(|p| (None, p)), depth);
                    write_additional(out, additional, depth);
                }
            }
            if !arr.count.is_unbounded() {
                out.push(' ');
                out.push_str(&arr.count.to_string());
            }
        }
        SchemaKind::Union(alternatives) => {
            write_body(out, alternatives.iter().map(|a| (None, a)), depth);
        }
    }
}

fn write_body<'a>(
    out: &mut String,
    entries: impl ExactSizeIterator<Item = (Option<&'a str>, &'a SchemaNode)>,
    depth: usize,
) {
    if entries.len() == 0 {
        out.push_str(" {}");
        return;
    }
    out.push_str(" {\n");
    for (name, node) in entries {
        write_entry(out, name, node, depth + 1);
    }
    out.push_str(&INDENT.repeat(depth));
    out.push('}');
}

fn write_additional(out: &mut String, additional: &Additional, depth: usize) {
    match additional {
        Additional::Forbidden => {}
        Additional::Allowed => out.push('*'),
        Additional::Typed(schema) => {
            out.push_str("*(");
            write_inline(out, None, schema, depth);
            out.push(')');
        }
    }
}
