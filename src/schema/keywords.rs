//! Keyword tables shared by the readers and writers

use super::types::SchemaKind;

/// Orderly type keywords; property names spelled like these must be quoted
pub const RESERVED_WORDS: &[&str] = &[
    "string", "integer", "number", "boolean", "null", "any", "array", "object", "union",
];

/// JSON-Schema keywords that never become extensions
const UNIVERSAL_KEYWORDS: &[&str] = &[
    "type",
    "description",
    "enum",
    "default",
    "requires",
    "optional",
    "required",
];

pub fn is_reserved(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

/// Bare Orderly identifier: `[A-Za-z_][A-Za-z0-9_-]*`
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Render a property name for Orderly, quoting when it is not a bare identifier
pub fn format_name(name: &str) -> String {
    if is_identifier(name) && !is_reserved(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

/// JSON string literal for `s`
pub fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Keywords with a typed slot for the given kind
pub fn keyword_applies(kind: &SchemaKind, keyword: &str) -> bool {
    if UNIVERSAL_KEYWORDS.contains(&keyword) {
        return true;
    }
    match kind {
        SchemaKind::String(_) => matches!(keyword, "minLength" | "maxLength" | "pattern"),
        SchemaKind::Integer(_) | SchemaKind::Number(_) => matches!(
            keyword,
            "minimum" | "maximum" | "exclusiveMinimum" | "exclusiveMaximum"
        ),
        SchemaKind::Object(_) => matches!(keyword, "properties" | "additionalProperties"),
        SchemaKind::Array(_) => matches!(
            keyword,
            "items" | "additionalItems" | "minItems" | "maxItems" | "uniqueItems"
        ),
        SchemaKind::Boolean | SchemaKind::Null | SchemaKind::Any | SchemaKind::Union(_) => false,
    }
}

/// Keywords that Orderly writes outside the backtick block for this kind
///
/// Everything that applies except `description` and `uniqueItems`.
pub fn has_native_syntax(kind: &SchemaKind, keyword: &str) -> bool {
    keyword != "description" && keyword != "uniqueItems" && keyword_applies(kind, keyword)
}

/// Rewrite `\/` to `/`, leaving every other escape pair untouched
pub fn normalize_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('/') => out.push('/'),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// True when the pattern ends in a backslash that escapes nothing
///
/// Such a pattern cannot be written between regex-literal slashes.
pub fn has_dangling_escape(pattern: &str) -> bool {
    pattern.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Escape bare `/` so the pattern can sit between regex-literal slashes
pub fn escape_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 2);
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push('\\');
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '/' => out.push_str("\\/"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::SchemaNode;

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("name"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("first-name"));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier("has space"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_format_name_quotes_reserved_words() {
        assert_eq!(format_name("title"), "title");
        assert_eq!(format_name("string"), "\"string\"");
        assert_eq!(format_name("a b"), "\"a b\"");
    }

    #[test]
    fn test_keyword_applicability() {
        let s = SchemaNode::string();
        assert!(keyword_applies(&s.kind, "pattern"));
        assert!(!keyword_applies(&s.kind, "minimum"));
        assert!(has_native_syntax(&s.kind, "maxLength"));
        assert!(!has_native_syntax(&s.kind, "description"));
        assert!(!keyword_applies(&s.kind, "format"));
    }

    #[test]
    fn test_pattern_slashes() {
        assert_eq!(normalize_pattern(r"a\/b"), "a/b");
        assert_eq!(normalize_pattern(r"\\/"), r"\\/");
        assert_eq!(normalize_pattern(r"\d+"), r"\d+");
        assert_eq!(escape_pattern("a/b"), r"a\/b");
        assert_eq!(escape_pattern(r"\\/"), r"\\\/");
        assert_eq!(normalize_pattern(&escape_pattern(r"x\\/y/")), r"x\\/y/");
    }

    #[test]
    fn test_dangling_escape() {
        assert!(has_dangling_escape(r"a\"));
        assert!(has_dangling_escape(r"\\\"));
        assert!(!has_dangling_escape(r"a\\"));
        assert!(!has_dangling_escape(r"a\d"));
        assert!(!has_dangling_escape(""));
    }
}
