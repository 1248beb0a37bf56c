//! Negative-Case Tests
//!
//! Every tests/fixtures/negative/*.orderly must fail to compile, and the
//! rendered diagnostic must match the sibling *.output file exactly.

use std::fs;
use std::path::PathBuf;

use orderly::compiler::{compile, parse, render_diagnostic, CompileError, InputFormat};
use orderly::jsonschema::parse_json_schema;
use orderly::orderly::OrderlyError;

// =============================================================================
// Helper Functions
// =============================================================================

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/negative")
}

fn negative_fixtures() -> Vec<(String, String, String)> {
    let mut names: Vec<String> = fs::read_dir(fixture_dir())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().map_or(false, |e| e == "orderly"))
        .map(|path| path.file_stem().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert!(!names.is_empty(), "no negative fixtures found");

    names
        .into_iter()
        .map(|name| {
            let source = fs::read_to_string(fixture_dir().join(format!("{}.orderly", name))).unwrap();
            let golden = fs::read_to_string(fixture_dir().join(format!("{}.output", name))).unwrap();
            (name, source, golden)
        })
        .collect()
}

fn diagnostic(source: &str) -> String {
    match compile(source, InputFormat::Orderly) {
        Ok(_) => panic!("expected failure for:\n{}", source),
        Err(e) => render_diagnostic(source, &e),
    }
}

// =============================================================================
// Golden Diagnostics
// =============================================================================

#[test]
fn test_negative_fixtures_match_golden_output() {
    for (name, source, golden) in negative_fixtures() {
        assert_eq!(diagnostic(&source), golden, "fixture {}", name);
    }
}

/// Diagnostics do not depend on how often a schema is compiled.
#[test]
fn test_diagnostics_are_deterministic() {
    for (_, source, _) in negative_fixtures() {
        assert_eq!(diagnostic(&source), diagnostic(&source));
    }
}

// =============================================================================
// Fatal Errors Produce No Tree
// =============================================================================

#[test]
fn test_lex_errors_are_fatal() {
    let err = parse("object { string \"abc; }", InputFormat::Orderly).unwrap_err();
    assert!(matches!(err, CompileError::Orderly(OrderlyError::Lex(_))));
    assert_eq!(err.code(), "ORDERLY_LEX_ERROR");
    assert!(err.severity().is_fatal());
    assert_eq!(err.position(), Some((1, 17)));
}

#[test]
fn test_parse_errors_stop_at_the_first_problem() {
    let err = parse("object {\n    string ;\n    integer ;\n}", InputFormat::Orderly).unwrap_err();
    assert_eq!(err.position(), Some((2, 12)));
}

#[test]
fn test_semantic_errors_are_not_fatal() {
    let err = compile("integer {3,1};", InputFormat::Orderly).unwrap_err();
    assert_eq!(err.code(), "ORDERLY_SEMANTIC_ERROR");
    assert!(!err.severity().is_fatal());
}

// =============================================================================
// JSON-Schema Format Errors
// =============================================================================

fn format_error(json: &str) -> String {
    match parse_json_schema(json) {
        Ok(node) => panic!("expected failure, got {:?}", node),
        Err(e) => e.to_string(),
    }
}

#[test]
fn test_json_schema_format_errors() {
    assert_eq!(
        format_error(r#"{"type": "strin"}"#),
        "#/type: invalid type specified: 'strin'"
    );
    assert_eq!(
        format_error(r#"{"type": "integer", "exclusiveMinimum": true}"#),
        "#/exclusiveMinimum: 'exclusiveMinimum' requires 'minimum'"
    );
    assert_eq!(
        format_error(r#"{"type": "object", "properties": {"a": {"type": "string", "minLength": -1}}}"#),
        "#/properties/a/minLength: 'minLength' property requires a non-negative integer"
    );
    assert_eq!(
        format_error(r##"{"type": "object", "properties": {"a": {"$ref": "#"}}}"##),
        "#/properties/a/$ref: schema references ($ref) are not supported"
    );
    assert_eq!(
        format_error("[1]"),
        "#: expected a json schema (which is an object)"
    );
}

#[test]
fn test_json_syntax_errors_are_positioned() {
    let text = "{\n  \"type\": \"string\",\n}";
    let err = parse(text, InputFormat::JsonSchema).unwrap_err();
    assert_eq!(err.code(), "ORDERLY_JSON_SYNTAX_ERROR");
    let (line, _) = err.position().unwrap();
    assert_eq!(line, 3);
    assert!(render_diagnostic(text, &err).starts_with("Schema is invalid: line 3, column"));
}

#[test]
fn test_json_schema_repeated_property_is_rejected() {
    let text = concat!(
        "{\n",
        "  \"type\": \"object\",\n",
        "  \"properties\": {\n",
        "    \"a\": {\"type\": \"string\"},\n",
        "    \"a\": {\"type\": \"integer\"}\n",
        "  }\n",
        "}\n",
    );
    for format in [InputFormat::JsonSchema, InputFormat::Auto] {
        let err = compile(text, format).unwrap_err();
        assert_eq!(err.code(), "ORDERLY_JSON_SYNTAX_ERROR");
        assert_eq!(err.position().map(|(line, _)| line), Some(5));

        let report = render_diagnostic(text, &err);
        assert!(report.starts_with("Schema is invalid: line 5, column"));
        assert!(report.contains("invalid JSON: duplicate key \"a\" in object"));
    }
}
