//! Semantic checks over a fully built tree
//!
//! Every check runs on every node; findings are collected, never
//! short-circuited.

use std::cmp::Ordering;
use std::collections::HashMap;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use super::errors::{SemanticError, SemanticErrorKind};
use crate::schema::{
    pointer, Additional, ArraySchema, Items, NumericRange, ObjectSchema, PropertyDef, SchemaKind,
    SchemaNode,
};
use crate::validator::validate;

/// Where a node sits relative to its parent
#[derive(Clone, Copy)]
enum Position<'a> {
    Root,
    Property(&'a [PropertyDef]),
    Nested,
}

/// True when any pattern in the subtree fails to compile
fn has_broken_pattern(node: &SchemaNode) -> bool {
    let additional_broken = |additional: &Additional| match additional {
        Additional::Typed(schema) => has_broken_pattern(schema),
        Additional::Allowed | Additional::Forbidden => false,
    };
    match &node.kind {
        SchemaKind::String(s) => s.pattern.as_deref().map_or(false, |p| Regex::new(p).is_err()),
        SchemaKind::Object(obj) => {
            obj.properties.iter().any(|p| has_broken_pattern(&p.schema))
                || additional_broken(&obj.additional)
        }
        SchemaKind::Array(arr) => match &arr.items {
            Items::List(item) => has_broken_pattern(item),
            Items::Tuple {
                positions,
                additional,
            } => positions.iter().any(has_broken_pattern) || additional_broken(additional),
        },
        SchemaKind::Union(alternatives) => alternatives.iter().any(has_broken_pattern),
        SchemaKind::Integer(_)
        | SchemaKind::Number(_)
        | SchemaKind::Boolean
        | SchemaKind::Null
        | SchemaKind::Any => false,
    }
}

/// Check a tree, returning every finding; empty means valid
pub fn check(node: &SchemaNode) -> Vec<SemanticError> {
    let mut checker = Checker { errors: Vec::new() };
    checker.visit(node, "", Position::Root);
    debug!(findings = checker.errors.len(), "checked schema");
    checker.errors
}

struct Checker {
    errors: Vec<SemanticError>,
}

impl Checker {
    fn report(&mut self, path: String, kind: SemanticErrorKind) {
        self.errors.push(SemanticError::new(path, kind));
    }

    fn visit(&mut self, node: &SchemaNode, path: &str, position: Position<'_>) {
        self.check_requires(node, path, position);
        // a broken pattern is reported once, where it is declared
        let constrained = node.enum_values.is_some() || node.default.is_some();
        if constrained && !has_broken_pattern(node) {
            self.check_enum(node, path);
            self.check_default(node, path);
        }

        match &node.kind {
            SchemaKind::String(s) => {
                if s.length.is_empty() {
                    self.report(
                        pointer::push(path, "minLength"),
                        SemanticErrorKind::EmptyRange(format!(
                            "minimum length {} is greater than maximum length {}",
                            s.length.min.unwrap_or_default(),
                            s.length.max.unwrap_or_default()
                        )),
                    );
                }
                if let Some(pattern) = &s.pattern {
                    if let Err(e) = Regex::new(pattern) {
                        self.report(
                            pointer::push(path, "pattern"),
                            SemanticErrorKind::InvalidPattern {
                                pattern: pattern.clone(),
                                reason: regex_reason(&e),
                            },
                        );
                    }
                }
            }
            SchemaKind::Integer(range) | SchemaKind::Number(range) => self.check_range(range, path),
            SchemaKind::Object(obj) => self.visit_object(obj, path),
            SchemaKind::Array(arr) => self.visit_array(arr, path),
            SchemaKind::Union(alternatives) => {
                let type_path = pointer::push(path, "type");
                if alternatives.len() < 2 {
                    self.report(
                        type_path.clone(),
                        SemanticErrorKind::UnionArity(alternatives.len()),
                    );
                }
                for (index, alternative) in alternatives.iter().enumerate() {
                    if let Some(first) = alternatives[..index].iter().position(|a| a == alternative) {
                        self.report(
                            pointer::push_index(&type_path, index),
                            SemanticErrorKind::DuplicateAlternative { index, first },
                        );
                    }
                    self.visit(alternative, &pointer::push_index(&type_path, index), Position::Nested);
                }
            }
            SchemaKind::Boolean | SchemaKind::Null | SchemaKind::Any => {}
        }
    }

    fn check_requires(&mut self, node: &SchemaNode, path: &str, position: Position<'_>) {
        if node.requires.is_empty() {
            return;
        }
        match position {
            Position::Property(siblings) => {
                for name in &node.requires {
                    if !siblings.iter().any(|p| &p.name == name) {
                        self.report(
                            pointer::push(path, "requires"),
                            SemanticErrorKind::UnknownRequires(name.clone()),
                        );
                    }
                }
            }
            Position::Root | Position::Nested => {
                self.report(pointer::push(path, "requires"), SemanticErrorKind::MisplacedRequires)
            }
        }
    }

    fn check_enum(&mut self, node: &SchemaNode, path: &str) {
        let values = match &node.enum_values {
            Some(values) => values,
            None => return,
        };
        let enum_path = pointer::push(path, "enum");
        if values.is_empty() {
            self.report(enum_path, SemanticErrorKind::EmptyEnum);
            return;
        }
        let mut bare = node.clone();
        bare.enum_values = None;
        bare.default = None;
        for (i, value) in values.iter().enumerate() {
            if let Some(reason) = first_violation(&bare, value) {
                self.report(
                    pointer::push_index(&enum_path, i),
                    SemanticErrorKind::EnumMismatch {
                        value: value.to_string(),
                        reason,
                    },
                );
            }
        }
    }

    fn check_default(&mut self, node: &SchemaNode, path: &str) {
        let default = match &node.default {
            Some(default) => default,
            None => return,
        };
        // an empty enum is reported on its own
        if node.enum_values.as_ref().map_or(false, |v| v.is_empty()) {
            return;
        }
        let mut bare = node.clone();
        bare.default = None;
        if let Some(reason) = first_violation(&bare, default) {
            self.report(
                pointer::push(path, "default"),
                SemanticErrorKind::DefaultMismatch {
                    value: default.to_string(),
                    reason,
                },
            );
        }
    }

    fn check_range(&mut self, range: &NumericRange, path: &str) {
        if !range.is_empty() {
            return;
        }
        let (min, max) = match (range.min, range.max) {
            (Some(min), Some(max)) => (min, max),
            _ => return,
        };
        let message = if min.value.compare(max.value) == Some(Ordering::Equal) {
            format!("range {} admits no values", range)
        } else {
            format!("minimum {} is greater than maximum {}", min.value, max.value)
        };
        self.report(pointer::push(path, "minimum"), SemanticErrorKind::EmptyRange(message));
    }

    fn visit_object(&mut self, obj: &ObjectSchema, path: &str) {
        let properties_path = pointer::push(path, "properties");
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for prop in &obj.properties {
            let count = seen.entry(prop.name.as_str()).or_insert(0);
            *count += 1;
            if *count == 2 {
                self.report(
                    pointer::push(&properties_path, &prop.name),
                    SemanticErrorKind::DuplicateProperty(prop.name.clone()),
                );
            }
        }
        for prop in &obj.properties {
            self.visit(
                &prop.schema,
                &pointer::push(&properties_path, &prop.name),
                Position::Property(&obj.properties),
            );
        }
        self.visit_additional(&obj.additional, &pointer::push(path, "additionalProperties"));
    }

    fn visit_array(&mut self, arr: &ArraySchema, path: &str) {
        if arr.count.is_empty() {
            self.report(
                pointer::push(path, "minItems"),
                SemanticErrorKind::EmptyRange(format!(
                    "minItems {} is greater than maxItems {}",
                    arr.count.min.unwrap_or_default(),
                    arr.count.max.unwrap_or_default()
                )),
            );
        }

        let items_path = pointer::push(path, "items");
        match &arr.items {
            Items::List(item) => self.visit(item, &items_path, Position::Nested),
            Items::Tuple {
                positions,
                additional,
            } => {
                if let (Additional::Forbidden, Some(min)) = (additional, arr.count.min) {
                    if min > positions.len() as u64 {
                        self.report(
                            pointer::push(path, "minItems"),
                            SemanticErrorKind::TupleArity(format!(
                                "minItems {} exceeds the {} positions of a closed tuple",
                                min,
                                positions.len()
                            )),
                        );
                    }
                }
                let required = positions
                    .iter()
                    .rposition(|p| !p.optional && p.default.is_none())
                    .map_or(0, |i| i + 1);
                if let Some(max) = arr.count.max {
                    if max < required as u64 {
                        self.report(
                            pointer::push(path, "maxItems"),
                            SemanticErrorKind::TupleArity(format!(
                                "maxItems {} is below the {} required tuple positions",
                                max, required
                            )),
                        );
                    }
                }
                for (i, position) in positions.iter().enumerate() {
                    self.visit(position, &pointer::push_index(&items_path, i), Position::Nested);
                }
                self.visit_additional(additional, &pointer::push(path, "additionalItems"));
            }
        }
    }

    fn visit_additional(&mut self, additional: &Additional, path: &str) {
        if let Additional::Typed(schema) = additional {
            self.visit(schema, path, Position::Nested);
        }
    }
}

/// Last line of a regex error, without the `error: ` prefix
fn regex_reason(e: &regex::Error) -> String {
    let text = e.to_string();
    let last = text.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("");
    last.trim().trim_start_matches("error: ").to_string()
}

fn first_violation(node: &SchemaNode, value: &Value) -> Option<String> {
    validate(node, value).into_iter().next().map(|e| e.message)
}
