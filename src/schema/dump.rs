//! Indented textual dump of a schema tree, used by `orderly parse`

use std::fmt::Write;

use super::keywords::escape_pattern;
use super::types::{Additional, Items, SchemaKind, SchemaNode};

/// Render the tree one node per line, two spaces per level
pub fn dump(node: &SchemaNode) -> String {
    let mut out = String::new();
    dump_node(&mut out, node, 0);
    out
}

fn dump_node(out: &mut String, node: &SchemaNode, depth: usize) {
    let pad = "  ".repeat(depth);
    let _ = write!(out, "{}{}", pad, node.type_name());

    match &node.kind {
        SchemaKind::String(s) => {
            if !s.length.is_unbounded() {
                let _ = write!(out, " length={}", s.length);
            }
            if let Some(p) = &s.pattern {
                let _ = write!(out, " pattern=/{}/", escape_pattern(p));
            }
        }
        SchemaKind::Integer(r) | SchemaKind::Number(r) => {
            if !r.is_unbounded() {
                let _ = write!(out, " range={}", r);
            }
        }
        SchemaKind::Object(obj) => {
            let _ = write!(out, " additional={}", obj.additional.describe());
        }
        SchemaKind::Array(arr) => {
            match &arr.items {
                Items::List(_) => out.push_str(" items=list"),
                Items::Tuple { additional, .. } => {
                    let _ = write!(out, " items=tuple additional={}", additional.describe());
                }
            }
            if !arr.count.is_unbounded() {
                let _ = write!(out, " count={}", arr.count);
            }
            if arr.unique {
                out.push_str(" unique");
            }
        }
        SchemaKind::Boolean | SchemaKind::Null | SchemaKind::Any | SchemaKind::Union(_) => {}
    }

    if node.optional {
        out.push_str(" optional");
    }
    if let Some(values) = &node.enum_values {
        let _ = write!(out, " enum={}", serde_json::Value::Array(values.clone()));
    }
    if let Some(default) = &node.default {
        let _ = write!(out, " default={}", default);
    }
    if !node.requires.is_empty() {
        let _ = write!(out, " requires=<{}>", node.requires.join(","));
    }
    if let Some(description) = &node.description {
        let _ = write!(out, " description={:?}", description);
    }
    if !node.extensions.is_empty() {
        let _ = write!(out, " extensions={}", serde_json::Value::Object(node.extensions.clone()));
    }
    out.push('\n');

    let child_pad = "  ".repeat(depth + 1);
    match &node.kind {
        SchemaKind::Object(obj) => {
            for prop in &obj.properties {
                let _ = writeln!(out, "{}property {:?}", child_pad, prop.name);
                dump_node(out, &prop.schema, depth + 2);
            }
            dump_additional(out, &obj.additional, depth + 1);
        }
        SchemaKind::Array(arr) => match &arr.items {
            Items::List(item) => dump_node(out, item, depth + 1),
            Items::Tuple {
                positions,
                additional,
            } => {
                for (i, position) in positions.iter().enumerate() {
                    let _ = writeln!(out, "{}position {}", child_pad, i);
                    dump_node(out, position, depth + 2);
                }
                dump_additional(out, additional, depth + 1);
            }
        },
        SchemaKind::Union(alternatives) => {
            for alternative in alternatives {
                dump_node(out, alternative, depth + 1);
            }
        }
        _ => {}
    }
}

fn dump_additional(out: &mut String, additional: &Additional, depth: usize) {
    if let Additional::Typed(schema) = additional {
        let _ = writeln!(out, "{}additional", "  ".repeat(depth));
        dump_node(out, schema, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::range::{Bound, Limit, NumericRange};
    use crate::schema::types::PropertyDef;

    #[test]
    fn test_dump_object() {
        let node = SchemaNode::object(vec![
            PropertyDef::new("name", SchemaNode::string()),
            PropertyDef::new(
                "invented",
                SchemaNode::integer(NumericRange::new(
                    Some(Bound::inclusive(Limit::Int(1500))),
                    Some(Bound::inclusive(Limit::Int(3000))),
                ))
                .optional(),
            ),
        ]);

        let expected = "object additional=forbidden\n  property \"name\"\n    string\n  property \"invented\"\n    integer range={1500,3000} optional\n";
        assert_eq!(dump(&node), expected);
    }
}
