//! Round-Trip and Cross-Format Tests
//!
//! Every fixture pair under tests/fixtures/positive is the same schema in
//! both notations, written in canonical form:
//! - Both notations parse to equal trees
//! - Each writer reproduces its fixture byte for byte from either tree
//! - Re-parsing emitted text yields the same tree

use std::fs;
use std::path::PathBuf;

use orderly::checker::check;
use orderly::compiler::{compile, emit, Format, InputFormat};
use orderly::jsonschema::{parse_json_schema, to_json_schema};
use orderly::orderly::{parse_orderly, to_orderly};
use orderly::schema::SchemaNode;

// =============================================================================
// Helper Functions
// =============================================================================

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/positive")
}

/// (name, orderly text, json-schema text) for every fixture pair
fn fixture_pairs() -> Vec<(String, String, String)> {
    let mut names: Vec<String> = fs::read_dir(fixture_dir())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().map_or(false, |e| e == "orderly"))
        .map(|path| path.file_stem().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert!(!names.is_empty(), "no positive fixtures found");

    names
        .into_iter()
        .map(|name| {
            let orderly = fs::read_to_string(fixture_dir().join(format!("{}.orderly", name))).unwrap();
            let json = fs::read_to_string(fixture_dir().join(format!("{}.jsonschema", name))).unwrap();
            (name, orderly, json)
        })
        .collect()
}

fn parse_pair(name: &str, orderly: &str, json: &str) -> (SchemaNode, SchemaNode) {
    let from_orderly = parse_orderly(orderly)
        .unwrap_or_else(|e| panic!("{}.orderly does not parse: {}", name, e));
    let from_json = parse_json_schema(json)
        .unwrap_or_else(|e| panic!("{}.jsonschema does not parse: {}", name, e));
    (from_orderly, from_json)
}

// =============================================================================
// Cross-Format Equivalence
// =============================================================================

/// Both notations of a fixture describe the same tree.
#[test]
fn test_fixture_pairs_parse_to_equal_trees() {
    for (name, orderly, json) in fixture_pairs() {
        let (a, b) = parse_pair(&name, &orderly, &json);
        assert_eq!(a, b, "fixture {} differs between notations", name);
    }
}

/// Each writer reproduces the other notation's fixture exactly.
#[test]
fn test_cross_format_emission() {
    for (name, orderly, json) in fixture_pairs() {
        let (from_orderly, from_json) = parse_pair(&name, &orderly, &json);
        assert_eq!(to_json_schema(&from_orderly), json, "orderly -> json for {}", name);
        assert_eq!(to_orderly(&from_json), orderly, "json -> orderly for {}", name);
    }
}

/// Fixtures are already canonical in their own notation.
#[test]
fn test_same_format_emission_is_identity() {
    for (name, orderly, json) in fixture_pairs() {
        let (from_orderly, from_json) = parse_pair(&name, &orderly, &json);
        assert_eq!(to_orderly(&from_orderly), orderly, "orderly -> orderly for {}", name);
        assert_eq!(to_json_schema(&from_json), json, "json -> json for {}", name);
    }
}

/// Fixtures pass the semantic checker.
#[test]
fn test_fixtures_are_semantically_valid() {
    for (name, orderly, _) in fixture_pairs() {
        let (tree, _) = parse_pair(&name, &orderly, "{}");
        assert!(check(&tree).is_empty(), "fixture {} has findings", name);
    }
}

// =============================================================================
// Canonicalisation
// =============================================================================

/// Non-canonical spellings converge on one canonical text.
#[test]
fn test_equivalent_spellings_canonicalise() {
    let spellings = [
        "object { string name; integer {1500,3000} invented }",
        "object{string name;integer{1500,3000}invented;};",
        "// comment\nobject {\n  string name; /* block */\n  integer {1500, 3000} invented;\n}",
    ];
    let expected = "object {\n    string name;\n    integer {1500,3000} invented;\n};\n";
    for source in spellings {
        assert_eq!(to_orderly(&parse_orderly(source).unwrap()), expected, "{}", source);
    }
}

/// Re-parsing canonical output is a fixed point.
#[test]
fn test_emission_is_idempotent() {
    let sources = [
        "string *",
        "integer | string | null",
        r#"string {"a", "b"} = "a""#,
        "number {1.5e1,1e3)",
        "array [ boolean ] {,3}",
        "object { any x?; }*(string /a\\/b/)",
    ];
    for source in sources {
        let first = to_orderly(&parse_orderly(source).unwrap());
        let second = to_orderly(&parse_orderly(&first).unwrap());
        assert_eq!(first, second, "{}", source);
    }
}

/// Integral floats print as integers in both notations.
#[test]
fn test_numeric_formatting() {
    let node = compile("number {10.0,2.50};", InputFormat::Orderly);
    // 10.0 > 2.5 makes the range empty
    assert!(node.is_err());

    let node = compile("number {1.0,2.50};", InputFormat::Orderly).unwrap();
    assert_eq!(emit(&node, Format::Orderly), "number {1,2.5};\n");
    assert_eq!(
        emit(&node, Format::JsonSchema),
        "{\n  \"type\": \"number\",\n  \"minimum\": 1,\n  \"maximum\": 2.5\n}\n"
    );
}

/// Same tree, same bytes.
#[test]
fn test_emission_is_deterministic() {
    for (name, orderly, json) in fixture_pairs() {
        let (tree, _) = parse_pair(&name, &orderly, &json);
        let copy = tree.clone();
        assert_eq!(to_orderly(&tree), to_orderly(&copy));
        assert_eq!(to_json_schema(&tree), to_json_schema(&copy));
    }
}

// =============================================================================
// Unknown Keywords
// =============================================================================

/// Vendor keywords survive JSON -> Orderly -> JSON.
#[test]
fn test_unknown_keywords_are_preserved() {
    let json = "{\n  \"type\": \"integer\",\n  \"minimum\": 0,\n  \"x-unit\": \"seconds\",\n  \"title\": \"Delay\"\n}\n";
    let tree = parse_json_schema(json).unwrap();
    let orderly = to_orderly(&tree);
    assert_eq!(
        orderly,
        "integer {0,} `{\"x-unit\":\"seconds\",\"title\":\"Delay\"}`;\n"
    );
    assert_eq!(to_json_schema(&parse_orderly(&orderly).unwrap()), json);
}

/// Keywords that do not apply to the node's type are kept, not interpreted.
#[test]
fn test_inapplicable_keywords_are_preserved() {
    let json = "{\n  \"type\": \"boolean\",\n  \"maxLength\": 3\n}\n";
    let tree = parse_json_schema(json).unwrap();
    assert_eq!(to_orderly(&tree), "boolean `{\"maxLength\":3}`;\n");
    assert_eq!(to_json_schema(&tree), json);
}
