//! Instance Validator Tests
//!
//! Schemas are written in Orderly and compiled through the public
//! pipeline; instances are `json!` literals.
//! - Conforming instances produce no errors
//! - Violations are accumulated, each located by a JSON pointer
//! - A union passes if any alternative passes

use orderly::compiler::{compile, InputFormat};
use orderly::schema::SchemaNode;
use orderly::validator::{validate, SchemaValidator, ValidationError};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn schema(source: &str) -> SchemaNode {
    compile(source, InputFormat::Orderly)
        .unwrap_or_else(|e| panic!("schema does not compile: {}\n{}", e, source))
}

fn errors(source: &str, instance: Value) -> Vec<String> {
    validate(&schema(source), &instance)
        .iter()
        .map(ValidationError::to_string)
        .collect()
}

const INVENTED: &str = "object { string name; integer {1500,3000} invented; }";

// =============================================================================
// Objects
// =============================================================================

#[test]
fn test_conforming_instance() {
    assert!(errors(INVENTED, json!({"name": "x", "invented": 2009})).is_empty());
}

#[test]
fn test_out_of_range_property() {
    let found = validate(&schema(INVENTED), &json!({"name": "x", "invented": 1}));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].path, "/invented");
    assert!(found[0].message.contains("minimum"));
}

#[test]
fn test_every_violation_is_reported() {
    assert_eq!(
        errors(INVENTED, json!({"invented": 1.5, "inventor": "x"})),
        vec![
            "#/name: required property is missing",
            "#/invented: expected integer, found number",
            "#/inventor: property is not allowed by the schema",
        ]
    );
}

#[test]
fn test_open_and_typed_objects() {
    assert!(errors("object { string a; }*", json!({"a": "x", "b": [1]})).is_empty());
    assert_eq!(
        errors("object { string a; }*(integer {0,})", json!({"a": "x", "b": -1})),
        vec!["#/b: value -1 is below the minimum 0"]
    );
}

#[test]
fn test_optional_default_and_requires() {
    let source = r#"object {
        string card <address>?;
        string address?;
        integer retries = 3;
    }"#;
    assert!(errors(source, json!({})).is_empty());
    assert!(errors(source, json!({"card": "visa", "address": "here"})).is_empty());
    assert_eq!(
        errors(source, json!({"card": "visa"})),
        vec!["#/card: requires sibling property 'address'"]
    );
}

#[test]
fn test_escaped_pointer_segments() {
    assert_eq!(
        errors(r#"object { integer "a/b~c"; }"#, json!({"a/b~c": "x"})),
        vec!["#/a~1b~0c: expected integer, found string"]
    );
}

// =============================================================================
// Scalars
// =============================================================================

#[test]
fn test_string_facets() {
    let source = r#"string {2,4} /^[a-z]+$/"#;
    assert!(errors(source, json!("abc")).is_empty());
    assert_eq!(
        errors(source, json!("a")),
        vec!["#: string length 1 is below the minimum 2"]
    );
    assert_eq!(
        errors(source, json!("ABCDE")),
        vec![
            "#: string length 5 is above the maximum 4",
            "#: string does not match pattern /^[a-z]+$/",
        ]
    );
}

#[test]
fn test_enumerations() {
    let source = r#"string {"red", "green"}"#;
    assert!(errors(source, json!("green")).is_empty());
    assert_eq!(
        errors(source, json!("blue")),
        vec!["#: value is not one of the enumerated values"]
    );
}

#[test]
fn test_numeric_bounds() {
    assert!(errors("number (0,1)", json!(0.5)).is_empty());
    assert_eq!(
        errors("number (0,1)", json!(1)),
        vec!["#: value 1 is not below the exclusive maximum 1"]
    );
    // exact comparison past f64 precision
    assert_eq!(
        errors("integer {,9007199254740992}", json!(9007199254740993u64)),
        vec!["#: value 9007199254740993 is above the maximum 9007199254740992"]
    );
}

#[test]
fn test_any_accepts_everything() {
    for value in [json!(null), json!(1), json!("x"), json!([]), json!({"a": 1})] {
        assert!(errors("any", value).is_empty());
    }
}

// =============================================================================
// Arrays
// =============================================================================

#[test]
fn test_list_items_and_counts() {
    let source = "array [ integer ] {1,2}";
    assert!(errors(source, json!([1, 2])).is_empty());
    assert_eq!(
        errors(source, json!([1, "2", 3])),
        vec![
            "#: item count 3 is above the maximum 2",
            "#/1: expected integer, found string",
        ]
    );
}

#[test]
fn test_tuples() {
    let closed = "array { string; boolean?; }";
    assert!(errors(closed, json!(["a"])).is_empty());
    assert_eq!(
        errors(closed, json!(["a", true, 3])),
        vec!["#/2: element is not allowed by the tuple"]
    );
    assert_eq!(
        errors(closed, json!([])),
        vec!["#/0: required tuple element is missing"]
    );

    let open = "array { string; }*(integer)";
    assert!(errors(open, json!(["a", 1, 2])).is_empty());
    assert_eq!(
        errors(open, json!(["a", "b"])),
        vec!["#/1: expected integer, found string"]
    );
}

#[test]
fn test_unique_items() {
    let source = r#"array [ any ] `{"uniqueItems": true}`"#;
    assert!(errors(source, json!([1, "1", [1]])).is_empty());
    assert_eq!(
        errors(source, json!([{"a": 1}, 2, {"a": 1}])),
        vec!["#/2: duplicates item 0"]
    );
}

#[test]
fn test_top_level_star() {
    assert!(errors("integer *", json!([1, 2, 3])).is_empty());
    assert_eq!(
        errors("integer *", json!(5)),
        vec!["#: expected array, found integer"]
    );
}

// =============================================================================
// Unions
// =============================================================================

#[test]
fn test_union_matches_any_alternative() {
    let source = "string | integer";
    assert!(errors(source, json!("x")).is_empty());
    assert!(errors(source, json!(42)).is_empty());
    assert_eq!(
        errors(source, json!(true)),
        vec![
            "#: alternative 0 (string): expected string, found boolean",
            "#: alternative 1 (integer): expected integer, found boolean",
        ]
    );
}

#[test]
fn test_nested_union_paths() {
    let source = "object { union { string; object { integer n; }; } v; }";
    assert!(errors(source, json!({"v": {"n": 1}})).is_empty());
    assert_eq!(
        errors(source, json!({"v": {"n": "1"}})),
        vec![
            "#/v: alternative 0 (string): expected string, found object",
            "#/v/n: alternative 1 (object): expected integer, found string",
        ]
    );
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_validator_reuse_is_deterministic() {
    let tree = schema(INVENTED);
    let validator = SchemaValidator::new(&tree);
    let bad = json!({"name": 1, "invented": 0});
    let first = validator.validate(&bad);
    for _ in 0..50 {
        assert_eq!(validator.validate(&bad), first);
    }
    assert_eq!(first.len(), 2);
}
