//! Instance validation
//!
//! Walks a JSON value against a schema tree and collects every violation.
//! Rules:
//! - Declared properties are checked in schema order, undeclared ones by
//!   the additional-properties policy
//! - A missing property is fine when it is optional or has a default
//! - Integers must be integral JSON numbers; bounds compare exactly
//! - String lengths count characters; patterns are searched, not anchored
//! - A union passes when any alternative passes

use std::cmp::Ordering;
use std::collections::HashMap;

use regex::Regex;
use serde_json::{Map, Number, Value};
use tracing::debug;

use super::errors::{ValidationError, ValidationFailed, ValidationResult};
use crate::schema::{
    pointer, Additional, ArraySchema, Items, LengthRange, NumericRange, ObjectSchema, SchemaKind,
    SchemaNode,
};

/// Validate `instance` against `schema`, returning every violation
pub fn validate(schema: &SchemaNode, instance: &Value) -> Vec<ValidationError> {
    SchemaValidator::new(schema).validate(instance)
}

/// Validator bound to one schema, with its patterns compiled up front
pub struct SchemaValidator<'a> {
    schema: &'a SchemaNode,
    patterns: HashMap<&'a str, Regex>,
}

impl<'a> SchemaValidator<'a> {
    pub fn new(schema: &'a SchemaNode) -> Self {
        let mut patterns = HashMap::new();
        collect_patterns(schema, &mut patterns);
        Self { schema, patterns }
    }

    /// Every violation in `instance`; empty means valid
    pub fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        self.validate_value(self.schema, instance, "", &mut errors);
        debug!(violations = errors.len(), "validated instance");
        errors
    }

    /// Validate, failing with all violations at once
    pub fn validate_instance(&self, instance: &Value) -> ValidationResult<()> {
        let errors = self.validate(instance);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailed::new(errors))
        }
    }

    fn validate_value(
        &self,
        node: &SchemaNode,
        value: &Value,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        self.validate_kind(node, value, path, errors);

        if let Some(values) = &node.enum_values {
            if !values.contains(value) {
                errors.push(ValidationError::not_in_enum(path));
            }
        }
    }

    fn validate_kind(
        &self,
        node: &SchemaNode,
        value: &Value,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        match &node.kind {
            SchemaKind::String(s) => {
                let text = match value.as_str() {
                    Some(text) => text,
                    None => return errors.push(type_error(path, "string", value)),
                };
                let length = text.chars().count() as u64;
                check_length(&s.length, length, path, "string length", errors);
                if let Some(pattern) = &s.pattern {
                    match self.patterns.get(pattern.as_str()) {
                        Some(re) if re.is_match(text) => {}
                        Some(_) => errors.push(ValidationError::pattern_mismatch(path, pattern)),
                        None => errors.push(ValidationError::invalid_pattern(path, pattern)),
                    }
                }
            }
            SchemaKind::Integer(range) => match value {
                Value::Number(n) if n.is_i64() || n.is_u64() => check_range(range, n, path, errors),
                _ => errors.push(type_error(path, "integer", value)),
            },
            SchemaKind::Number(range) => match value {
                Value::Number(n) => check_range(range, n, path, errors),
                _ => errors.push(type_error(path, "number", value)),
            },
            SchemaKind::Boolean => {
                if !value.is_boolean() {
                    errors.push(type_error(path, "boolean", value));
                }
            }
            SchemaKind::Null => {
                if !value.is_null() {
                    errors.push(type_error(path, "null", value));
                }
            }
            SchemaKind::Any => {}
            SchemaKind::Object(obj) => match value.as_object() {
                Some(map) => self.validate_object(obj, map, path, errors),
                None => errors.push(type_error(path, "object", value)),
            },
            SchemaKind::Array(arr) => match value.as_array() {
                Some(items) => self.validate_array(arr, items, path, errors),
                None => errors.push(type_error(path, "array", value)),
            },
            SchemaKind::Union(alternatives) => {
                self.validate_union(alternatives, value, path, errors)
            }
        }
    }

    fn validate_object(
        &self,
        obj: &ObjectSchema,
        map: &Map<String, Value>,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        for prop in &obj.properties {
            let prop_path = pointer::push(path, &prop.name);
            match map.get(&prop.name) {
                Some(value) => {
                    self.validate_value(&prop.schema, value, &prop_path, errors);
                    for needed in &prop.schema.requires {
                        if !map.contains_key(needed) {
                            errors.push(ValidationError::missing_requirement(&prop_path, needed));
                        }
                    }
                }
                None => {
                    if prop.is_required() && prop.default().is_none() {
                        errors.push(ValidationError::missing_property(prop_path));
                    }
                }
            }
        }

        for (key, value) in map {
            if obj.property(key).is_some() {
                continue;
            }
            let key_path = pointer::push(path, key);
            match &obj.additional {
                Additional::Allowed => {}
                Additional::Forbidden => errors.push(ValidationError::extra_property(key_path)),
                Additional::Typed(schema) => self.validate_value(schema, value, &key_path, errors),
            }
        }
    }

    fn validate_array(
        &self,
        arr: &ArraySchema,
        items: &[Value],
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        check_length(&arr.count, items.len() as u64, path, "item count", errors);

        match &arr.items {
            Items::List(item) => {
                for (i, element) in items.iter().enumerate() {
                    self.validate_value(item, element, &pointer::push_index(path, i), errors);
                }
            }
            Items::Tuple {
                positions,
                additional,
            } => {
                for (i, position) in positions.iter().enumerate() {
                    let element_path = pointer::push_index(path, i);
                    match items.get(i) {
                        Some(element) => {
                            self.validate_value(position, element, &element_path, errors)
                        }
                        None => {
                            if !position.optional && position.default.is_none() {
                                errors.push(ValidationError::missing_position(element_path));
                            }
                        }
                    }
                }
                for (i, element) in items.iter().enumerate().skip(positions.len()) {
                    let element_path = pointer::push_index(path, i);
                    match additional {
                        Additional::Allowed => {}
                        Additional::Forbidden => {
                            errors.push(ValidationError::extra_element(element_path))
                        }
                        Additional::Typed(schema) => {
                            self.validate_value(schema, element, &element_path, errors)
                        }
                    }
                }
            }
        }

        if arr.unique {
            for i in 1..items.len() {
                if let Some(first) = items[..i].iter().position(|earlier| earlier == &items[i]) {
                    errors.push(ValidationError::duplicate_item(
                        pointer::push_index(path, i),
                        first,
                    ));
                }
            }
        }
    }

    fn validate_union(
        &self,
        alternatives: &[SchemaNode],
        value: &Value,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        if alternatives.is_empty() {
            errors.push(ValidationError::new(path, "union has no alternatives"));
            return;
        }

        let mut failures = Vec::new();
        for (i, alternative) in alternatives.iter().enumerate() {
            let mut found = Vec::new();
            self.validate_value(alternative, value, path, &mut found);
            if found.is_empty() {
                return;
            }
            let kind = alternative.type_name();
            failures.extend(found.into_iter().map(|e| e.in_alternative(i, kind)));
        }
        errors.extend(failures);
    }
}

fn collect_patterns<'a>(node: &'a SchemaNode, patterns: &mut HashMap<&'a str, Regex>) {
    match &node.kind {
        SchemaKind::String(s) => {
            if let Some(pattern) = &s.pattern {
                if !patterns.contains_key(pattern.as_str()) {
                    if let Ok(re) = Regex::new(pattern) {
                        patterns.insert(pattern.as_str(), re);
                    }
                }
            }
        }
        SchemaKind::Object(obj) => {
            for prop in &obj.properties {
                collect_patterns(&prop.schema, patterns);
            }
            collect_additional(&obj.additional, patterns);
        }
        SchemaKind::Array(arr) => match &arr.items {
            Items::List(item) => collect_patterns(item, patterns),
            Items::Tuple {
                positions,
                additional,
            } => {
                for position in positions {
                    collect_patterns(position, patterns);
                }
                collect_additional(additional, patterns);
            }
        },
        SchemaKind::Union(alternatives) => {
            for alternative in alternatives {
                collect_patterns(alternative, patterns);
            }
        }
        _ => {}
    }
}

fn collect_additional<'a>(additional: &'a Additional, patterns: &mut HashMap<&'a str, Regex>) {
    if let Additional::Typed(schema) = additional {
        collect_patterns(schema, patterns);
    }
}

fn check_range(range: &NumericRange, n: &Number, path: &str, errors: &mut Vec<ValidationError>) {
    if let Some(min) = range.min {
        let below = match min.value.compare_number(n) {
            Some(Ordering::Less) => true,
            Some(Ordering::Equal) => min.exclusive,
            _ => false,
        };
        if below {
            let relation = if min.exclusive {
                "not above the exclusive minimum"
            } else {
                "below the minimum"
            };
            errors.push(ValidationError::new(
                path,
                format!("value {} is {} {}", n, relation, min.value),
            ));
        }
    }
    if let Some(max) = range.max {
        let above = match max.value.compare_number(n) {
            Some(Ordering::Greater) => true,
            Some(Ordering::Equal) => max.exclusive,
            _ => false,
        };
        if above {
            let relation = if max.exclusive {
                "not below the exclusive maximum"
            } else {
                "above the maximum"
            };
            errors.push(ValidationError::new(
                path,
                format!("value {} is {} {}", n, relation, max.value),
            ));
        }
    }
}

fn check_length(
    range: &LengthRange,
    actual: u64,
    path: &str,
    what: &str,
    errors: &mut Vec<ValidationError>,
) {
    if let Some(min) = range.min {
        if actual < min {
            errors.push(ValidationError::new(
                path,
                format!("{} {} is below the minimum {}", what, actual, min),
            ));
        }
    }
    if let Some(max) = range.max {
        if actual > max {
            errors.push(ValidationError::new(
                path,
                format!("{} {} is above the maximum {}", what, actual, max),
            ));
        }
    }
}

fn type_error(path: &str, expected: &str, value: &Value) -> ValidationError {
    ValidationError::type_mismatch(path, expected, json_type_name(value))
}

/// JSON type name of a value, distinguishing integers from other numbers
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
