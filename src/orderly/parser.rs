//! Recursive-descent parser for Orderly
//!
//! One token of lookahead. The first error aborts the parse; no partial
//! tree is returned.

use serde_json::{Map, Number, Value};
use tracing::debug;

use super::errors::{OrderlyError, OrderlyResult, ParseError, ParseErrorKind};
use super::lexer::Lexer;
use super::token::{Token, TokenKind};
use crate::schema::keywords::has_native_syntax;
use crate::schema::{
    normalize_value, Additional, ArraySchema, Bound, Items, LengthRange, Limit, NumericRange,
    ObjectSchema, PropertyDef, SchemaKind, SchemaNode, StringSchema,
};

const SCHEMA_TYPE: &str = "a schema type (e.g. \"string foo;\")";
const PROPERTY_NAME: &str = "property name";
const JSON_VALUE: &str = "JSON value";

/// Deepest nesting of entries or embedded JSON values
pub const MAX_NESTING: usize = 128;

/// Parse Orderly source into a schema tree
pub fn parse_orderly(source: &str) -> OrderlyResult<SchemaNode> {
    let mut parser = Parser::new(source)?;
    let node = parser.parse_schema()?;
    debug!(kind = node.type_name(), bytes = source.len(), "parsed orderly schema");
    Ok(node)
}

type Entry = (Option<String>, SchemaNode);

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> OrderlyResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = match lexer.next() {
            Some(token) => token?,
            None => Token::new(TokenKind::Eof, "", 1, 1),
        };
        Ok(Self {
            lexer,
            current,
            depth: 0,
        })
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn advance(&mut self) -> OrderlyResult<Token> {
        if self.check(TokenKind::Eof) {
            return Ok(self.current.clone());
        }
        let next = match self.lexer.next() {
            Some(token) => token?,
            None => Token::new(TokenKind::Eof, "", self.current.line, self.current.column),
        };
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn expect(&mut self, kind: TokenKind, expected: &[&'static str]) -> OrderlyResult<Token> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &[&'static str]) -> OrderlyError {
        self.error_at(
            &self.current,
            ParseErrorKind::Unexpected {
                expected: expected.to_vec(),
                found: self.current.describe(),
            },
        )
    }

    fn error_at(&self, token: &Token, kind: ParseErrorKind) -> OrderlyError {
        ParseError::new(token.line, token.column, kind).into()
    }

    fn descend(&mut self) -> OrderlyResult<()> {
        if self.depth >= MAX_NESTING {
            return Err(self.error_at(&self.current, ParseErrorKind::NestingTooDeep(MAX_NESTING)));
        }
        self.depth += 1;
        Ok(())
    }

    fn decode_string(&self, token: &Token) -> OrderlyResult<String> {
        serde_json::from_str::<String>(&token.lexeme)
            .map_err(|_| self.error_at(token, ParseErrorKind::InvalidString(token.lexeme.clone())))
    }

    fn decode_number(&self, token: &Token) -> OrderlyResult<Number> {
        serde_json::from_str::<Number>(&token.lexeme)
            .map_err(|_| self.error_at(token, ParseErrorKind::NumberOutOfRange(token.lexeme.clone())))
    }

    // =========================================================================
    // Entries
    // =========================================================================

    /// `schema := entry ['*'] [';'] EOF`
    pub fn parse_schema(&mut self) -> OrderlyResult<SchemaNode> {
        let (_, mut node) = self.parse_entry(false)?;
        if self.check(TokenKind::Star) {
            self.advance()?;
            node = SchemaNode::list(node);
        }
        if self.check(TokenKind::Semicolon) {
            self.advance()?;
        }
        if !self.check(TokenKind::Eof) {
            return Err(self.unexpected(&["';'", "end of input"]));
        }
        Ok(node)
    }

    fn parse_entry(&mut self, named: bool) -> OrderlyResult<Entry> {
        self.descend()?;
        let entry = self.parse_entry_body(named);
        self.depth -= 1;
        entry
    }

    fn parse_entry_body(&mut self, named: bool) -> OrderlyResult<Entry> {
        let mut node = self.parse_type_expr()?;
        let name = if named {
            Some(self.parse_property_name()?)
        } else {
            None
        };
        if self.check(TokenKind::Regex) {
            let token = self.advance()?;
            match node.string_facets_mut() {
                Some(facets) if facets.pattern.is_some() => {
                    return Err(self.error_at(&token, ParseErrorKind::DuplicatePattern))
                }
                Some(facets) => facets.pattern = Some(token.regex_pattern()),
                None => return Err(self.error_at(&token, ParseErrorKind::PatternOnNonString)),
            }
        }
        self.parse_suffix(&mut node)?;
        Ok((name, node))
    }

    /// Entries separated by `;`, the last one optionally terminated
    fn parse_entries(&mut self, named: bool) -> OrderlyResult<Vec<Entry>> {
        let mut entries = Vec::new();
        while self.current.kind.starts_entry() {
            entries.push(self.parse_entry(named)?);
            if self.check(TokenKind::Semicolon) {
                self.advance()?;
            } else {
                break;
            }
        }
        Ok(entries)
    }

    fn parse_property_name(&mut self) -> OrderlyResult<String> {
        match self.current.kind {
            TokenKind::Identifier => Ok(self.advance()?.lexeme),
            TokenKind::StringLiteral => {
                let token = self.advance()?;
                self.decode_string(&token)
            }
            _ => Err(self.unexpected(&[PROPERTY_NAME])),
        }
    }

    fn parse_type_expr(&mut self) -> OrderlyResult<SchemaNode> {
        let first = self.parse_base()?;
        if !self.check(TokenKind::Pipe) {
            return Ok(first);
        }
        let mut alternatives = vec![first];
        while self.check(TokenKind::Pipe) {
            self.advance()?;
            alternatives.push(self.parse_base()?);
        }
        Ok(SchemaNode::union(alternatives))
    }

    fn parse_base(&mut self) -> OrderlyResult<SchemaNode> {
        if !self.current.kind.starts_entry() {
            return Err(self.unexpected(&[SCHEMA_TYPE]));
        }
        let keyword = self.advance()?;

        let node = match keyword.kind {
            TokenKind::KwString => self.parse_string()?,
            TokenKind::KwInteger => SchemaNode::integer(self.parse_optional_range()?),
            TokenKind::KwNumber => SchemaNode::number(self.parse_optional_range()?),
            TokenKind::KwBoolean => SchemaNode::boolean(),
            TokenKind::KwNull => SchemaNode::null(),
            TokenKind::KwAny => SchemaNode::any(),
            TokenKind::KwObject => {
                self.expect(TokenKind::LeftCurly, &["'{'"])?;
                let entries = self.parse_entries(true)?;
                self.expect(TokenKind::RightCurly, &["';'", "'}'"])?;
                let additional = self.parse_additional()?;
                let properties = entries
                    .into_iter()
                    .map(|(name, schema)| PropertyDef::new(name.unwrap_or_default(), schema))
                    .collect();
                SchemaNode::new(SchemaKind::Object(ObjectSchema {
                    properties,
                    additional,
                }))
            }
            TokenKind::KwArray => self.parse_array()?,
            TokenKind::KwUnion => {
                self.expect(TokenKind::LeftCurly, &["'{'"])?;
                let entries = self.parse_entries(false)?;
                self.expect(TokenKind::RightCurly, &["';'", "'}'"])?;
                SchemaNode::union(entries.into_iter().map(|(_, node)| node).collect())
            }
            _ => return Err(self.error_at(&keyword, ParseErrorKind::Unexpected {
                expected: vec![SCHEMA_TYPE],
                found: keyword.describe(),
            })),
        };
        Ok(node)
    }

    /// `string [range | {"a","b"}] [/regex/]`
    fn parse_string(&mut self) -> OrderlyResult<SchemaNode> {
        let mut facets = StringSchema::default();
        let mut enum_values = None;

        if self.check(TokenKind::LeftCurly) || self.check(TokenKind::LeftParen) {
            let open = self.advance()?;
            if open.kind == TokenKind::LeftCurly && self.check(TokenKind::StringLiteral) {
                enum_values = Some(self.parse_brace_enum()?);
            } else {
                let range = self.parse_range_body(&open)?;
                facets.length = self.to_length(&open, range, "string length")?;
            }
        }
        if self.check(TokenKind::Regex) {
            let token = self.advance()?;
            facets.pattern = Some(token.regex_pattern());
        }

        let mut node = SchemaNode::new(SchemaKind::String(facets));
        node.enum_values = enum_values;
        Ok(node)
    }

    fn parse_array(&mut self) -> OrderlyResult<SchemaNode> {
        let items = match self.current.kind {
            TokenKind::LeftCurly => {
                self.advance()?;
                let entries = self.parse_entries(false)?;
                self.expect(TokenKind::RightCurly, &["';'", "'}'"])?;
                Items::Tuple {
                    positions: entries.into_iter().map(|(_, node)| node).collect(),
                    additional: self.parse_additional()?,
                }
            }
            TokenKind::LeftBracket => {
                self.advance()?;
                let (_, item) = self.parse_entry(false)?;
                if self.check(TokenKind::Semicolon) {
                    self.advance()?;
                }
                self.expect(TokenKind::RightBracket, &["']'"])?;
                Items::List(Box::new(item))
            }
            _ => return Err(self.unexpected(&["'{'", "'['"])),
        };

        let count = if self.check(TokenKind::LeftCurly) {
            let open = self.advance()?;
            let range = self.parse_range_body(&open)?;
            self.to_length(&open, range, "array item count")?
        } else {
            LengthRange::default()
        };

        Ok(SchemaNode::new(SchemaKind::Array(ArraySchema {
            items,
            count,
            unique: false,
        })))
    }

    /// `['*' ['(' entry ')']]`
    fn parse_additional(&mut self) -> OrderlyResult<Additional> {
        if !self.check(TokenKind::Star) {
            return Ok(Additional::Forbidden);
        }
        self.advance()?;
        if !self.check(TokenKind::LeftParen) {
            return Ok(Additional::Allowed);
        }
        self.advance()?;
        let (_, schema) = self.parse_entry(false)?;
        self.expect(TokenKind::RightParen, &["')'"])?;
        Ok(Additional::Typed(Box::new(schema)))
    }

    // =========================================================================
    // Ranges
    // =========================================================================

    fn parse_optional_range(&mut self) -> OrderlyResult<NumericRange> {
        if self.check(TokenKind::LeftCurly) || self.check(TokenKind::LeftParen) {
            let open = self.advance()?;
            self.parse_range_body(&open)
        } else {
            Ok(NumericRange::default())
        }
    }

    /// Everything after the opening `{` or `(`
    fn parse_range_body(&mut self, open: &Token) -> OrderlyResult<NumericRange> {
        let min = self.parse_optional_limit()?;
        self.expect(TokenKind::Comma, &["number", "','"])?;
        let max = self.parse_optional_limit()?;

        let close = match self.current.kind {
            TokenKind::RightCurly | TokenKind::RightParen => self.advance()?,
            _ => return Err(self.unexpected(&["number", "'}'", "')'"])),
        };

        let min = match (min, open.kind == TokenKind::LeftParen) {
            (Some(value), exclusive) => Some(Bound { value, exclusive }),
            (None, true) => return Err(self.error_at(open, ParseErrorKind::ExclusiveWithoutValue)),
            (None, false) => None,
        };
        let max = match (max, close.kind == TokenKind::RightParen) {
            (Some(value), exclusive) => Some(Bound { value, exclusive }),
            (None, true) => return Err(self.error_at(&close, ParseErrorKind::ExclusiveWithoutValue)),
            (None, false) => None,
        };
        Ok(NumericRange::new(min, max))
    }

    fn parse_optional_limit(&mut self) -> OrderlyResult<Option<Limit>> {
        if !matches!(
            self.current.kind,
            TokenKind::IntegerLiteral | TokenKind::NumberLiteral
        ) {
            return Ok(None);
        }
        let token = self.advance()?;
        let number = self.decode_number(&token)?;
        match Limit::from_number(&number) {
            Some(limit) => Ok(Some(limit)),
            None => Err(self.error_at(&token, ParseErrorKind::NumberOutOfRange(token.lexeme.clone()))),
        }
    }

    fn to_length(
        &self,
        open: &Token,
        range: NumericRange,
        what: &'static str,
    ) -> OrderlyResult<LengthRange> {
        let mut counts = [None, None];
        for (slot, bound) in counts.iter_mut().zip([range.min, range.max]) {
            if let Some(bound) = bound {
                if bound.exclusive {
                    return Err(self.error_at(open, ParseErrorKind::ExclusiveCount(what)));
                }
                match bound.value.as_count() {
                    Some(n) => *slot = Some(n),
                    None => return Err(self.error_at(open, ParseErrorKind::InvalidCount(what))),
                }
            }
        }
        Ok(LengthRange::new(counts[0], counts[1]))
    }

    // =========================================================================
    // Definition suffix
    // =========================================================================

    /// `['[' values ']'] ['=' value] ['<' names '>'] ['?'] ['`' object '`']`
    fn parse_suffix(&mut self, node: &mut SchemaNode) -> OrderlyResult<()> {
        if self.check(TokenKind::LeftBracket) {
            let open = self.advance()?;
            if node.enum_values.is_some() {
                return Err(self.error_at(&open, ParseErrorKind::DuplicateEnum));
            }
            let values = self.parse_json_array_body()?;
            node.enum_values = Some(values.into_iter().map(normalize_value).collect());
        }

        if self.check(TokenKind::Equals) {
            self.advance()?;
            node.default = Some(normalize_value(self.parse_json_value()?));
        }

        if self.check(TokenKind::LessThan) {
            self.advance()?;
            loop {
                node.requires.push(self.parse_property_name()?);
                if self.check(TokenKind::Comma) {
                    self.advance()?;
                } else {
                    break;
                }
            }
            self.expect(TokenKind::GreaterThan, &["','", "'>'"])?;
        }

        if self.check(TokenKind::Question) {
            self.advance()?;
            node.optional = true;
        }

        if self.check(TokenKind::Backtick) {
            self.advance()?;
            let open = self.current.clone();
            let map = self.parse_json_object()?;
            self.expect(TokenKind::Backtick, &["'`'"])?;
            self.absorb_passthrough(node, map, &open)?;
        }

        Ok(())
    }

    /// Lift typed keywords out of a backtick block; the rest become extensions
    fn absorb_passthrough(
        &self,
        node: &mut SchemaNode,
        map: Map<String, Value>,
        at: &Token,
    ) -> OrderlyResult<()> {
        for (keyword, value) in map {
            if keyword == "$ref" {
                return Err(self.error_at(at, ParseErrorKind::UnsupportedReference));
            }
            if has_native_syntax(&node.kind, &keyword) {
                return Err(self.error_at(at, ParseErrorKind::NativeKeyword { keyword }));
            }
            match (keyword.as_str(), &mut node.kind) {
                ("description", _) => match value {
                    Value::String(s) => node.description = Some(s),
                    _ => {
                        return Err(self.error_at(at, ParseErrorKind::InvalidFacet {
                            keyword: keyword.clone(),
                            expected: "a string",
                        }))
                    }
                },
                ("uniqueItems", SchemaKind::Array(array)) => match value {
                    Value::Bool(b) => array.unique = b,
                    _ => {
                        return Err(self.error_at(at, ParseErrorKind::InvalidFacet {
                            keyword: keyword.clone(),
                            expected: "a boolean",
                        }))
                    }
                },
                _ => {
                    node.extensions.insert(keyword.clone(), value);
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Embedded JSON
    // =========================================================================

    /// `{` already consumed and a string literal is next
    fn parse_brace_enum(&mut self) -> OrderlyResult<Vec<Value>> {
        let mut values = Vec::new();
        loop {
            let token = self.expect(TokenKind::StringLiteral, &["string literal"])?;
            values.push(Value::String(self.decode_string(&token)?));
            if self.check(TokenKind::Comma) {
                self.advance()?;
            } else {
                break;
            }
        }
        self.expect(TokenKind::RightCurly, &["','", "'}'"])?;
        Ok(values)
    }

    fn parse_json_value(&mut self) -> OrderlyResult<Value> {
        self.descend()?;
        let value = self.parse_json_value_body();
        self.depth -= 1;
        value
    }

    fn parse_json_value_body(&mut self) -> OrderlyResult<Value> {
        match self.current.kind {
            TokenKind::StringLiteral => {
                let token = self.advance()?;
                Ok(Value::String(self.decode_string(&token)?))
            }
            TokenKind::IntegerLiteral | TokenKind::NumberLiteral => {
                let token = self.advance()?;
                Ok(Value::Number(self.decode_number(&token)?))
            }
            TokenKind::KwNull => {
                self.advance()?;
                Ok(Value::Null)
            }
            TokenKind::Identifier if self.current.lexeme == "true" => {
                self.advance()?;
                Ok(Value::Bool(true))
            }
            TokenKind::Identifier if self.current.lexeme == "false" => {
                self.advance()?;
                Ok(Value::Bool(false))
            }
            TokenKind::LeftBracket => {
                self.advance()?;
                Ok(Value::Array(self.parse_json_array_body()?))
            }
            TokenKind::LeftCurly => Ok(Value::Object(self.parse_json_object()?)),
            _ => Err(self.unexpected(&[JSON_VALUE])),
        }
    }

    /// Everything after `[`
    fn parse_json_array_body(&mut self) -> OrderlyResult<Vec<Value>> {
        let mut values = Vec::new();
        if self.check(TokenKind::RightBracket) {
            self.advance()?;
            return Ok(values);
        }
        loop {
            values.push(self.parse_json_value()?);
            if self.check(TokenKind::Comma) {
                self.advance()?;
            } else {
                break;
            }
        }
        self.expect(TokenKind::RightBracket, &["','", "']'"])?;
        Ok(values)
    }

    fn parse_json_object(&mut self) -> OrderlyResult<Map<String, Value>> {
        self.expect(TokenKind::LeftCurly, &["'{'"])?;
        let mut map = Map::new();
        if self.check(TokenKind::RightCurly) {
            self.advance()?;
            return Ok(map);
        }
        loop {
            let key_token = self.expect(TokenKind::StringLiteral, &["string literal"])?;
            let key = self.decode_string(&key_token)?;
            self.expect(TokenKind::Colon, &["':'"])?;
            let value = self.parse_json_value()?;
            if map.contains_key(&key) {
                return Err(self.error_at(&key_token, ParseErrorKind::DuplicateKey(key_token.lexeme.clone())));
            }
            map.insert(key, value);
            if self.check(TokenKind::Comma) {
                self.advance()?;
            } else {
                break;
            }
        }
        self.expect(TokenKind::RightCurly, &["','", "'}'"])?;
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(source: &str) -> SchemaNode {
        parse_orderly(source).unwrap()
    }

    fn parse_err(source: &str) -> ParseError {
        match parse_orderly(source).unwrap_err() {
            OrderlyError::Parse(e) => e,
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    fn int_range(min: i64, max: i64) -> NumericRange {
        NumericRange::new(
            Some(Bound::inclusive(Limit::Int(min))),
            Some(Bound::inclusive(Limit::Int(max))),
        )
    }

    #[test]
    fn test_parse_simple_object() {
        let node = parse("object { string name; integer {1500,3000} invented; }");
        let expected = SchemaNode::object(vec![
            PropertyDef::new("name", SchemaNode::string()),
            PropertyDef::new("invented", SchemaNode::integer(int_range(1500, 3000))),
        ]);
        assert_eq!(node, expected);
    }

    #[test]
    fn test_trailing_semicolons_are_optional() {
        let a = parse("object { string a; string b }");
        let b = parse("object { string a; string b; };");
        assert_eq!(a, b);
    }

    #[test]
    fn test_exclusive_and_open_bounds() {
        let node = parse("number (0,2.5}");
        let range = NumericRange::new(
            Some(Bound::exclusive(Limit::Int(0))),
            Some(Bound::inclusive(Limit::Float(2.5))),
        );
        assert_eq!(node, SchemaNode::number(range));

        let node = parse("integer {,1e2)");
        let range = NumericRange::new(None, Some(Bound::exclusive(Limit::Int(100))));
        assert_eq!(node, SchemaNode::integer(range));
    }

    #[test]
    fn test_string_enum_forms_are_equivalent() {
        let inline = parse(r#"string {"a", "b"}"#);
        let trailing = parse(r#"string ["a", "b"]"#);
        assert_eq!(inline, trailing);
        assert_eq!(inline.enum_values, Some(vec![json!("a"), json!("b")]));
    }

    #[test]
    fn test_union_forms_are_equivalent() {
        let piped = parse("string | integer");
        let braced = parse("union { string; integer; }");
        assert_eq!(piped, braced);
        assert_eq!(
            piped,
            SchemaNode::union(vec![
                SchemaNode::string(),
                SchemaNode::integer(NumericRange::default())
            ])
        );
    }

    #[test]
    fn test_regex_positions() {
        let inline = parse("object { string /^x/ code; }");
        let trailing = parse("object { string code /^x/; }");
        assert_eq!(inline, trailing);

        let err = parse_err("object { string /a/ code /b/; }");
        assert_eq!(err.kind, ParseErrorKind::DuplicatePattern);

        let err = parse_err("object { integer code /b/; }");
        assert_eq!(err.kind, ParseErrorKind::PatternOnNonString);
    }

    #[test]
    fn test_definition_suffix() {
        let node = parse(
            r#"object { string color ["red","green"] = "red" <size>? `{"description":"Paint","format":"color"}`; integer size?; }"#,
        );
        let color = match &node.kind {
            SchemaKind::Object(obj) => obj.property("color").unwrap().schema.clone(),
            _ => panic!("expected object"),
        };
        assert_eq!(color.enum_values, Some(vec![json!("red"), json!("green")]));
        assert_eq!(color.default, Some(json!("red")));
        assert_eq!(color.requires, vec!["size".to_string()]);
        assert!(color.optional);
        assert_eq!(color.description.as_deref(), Some("Paint"));
        assert_eq!(color.extensions.get("format"), Some(&json!("color")));
    }

    #[test]
    fn test_arrays() {
        let list = parse("array [ string; ] {1,5}");
        match &list.kind {
            SchemaKind::Array(arr) => {
                assert_eq!(arr.count, LengthRange::new(Some(1), Some(5)));
                assert!(matches!(arr.items, Items::List(_)));
            }
            _ => panic!("expected array"),
        }

        let tuple = parse("array { string; integer; }*");
        match &tuple.kind {
            SchemaKind::Array(arr) => match &arr.items {
                Items::Tuple {
                    positions,
                    additional,
                } => {
                    assert_eq!(positions.len(), 2);
                    assert_eq!(*additional, Additional::Allowed);
                }
                _ => panic!("expected tuple"),
            },
            _ => panic!("expected array"),
        }

        let unique = parse(r#"array [ integer ] `{"uniqueItems":true}`"#);
        match &unique.kind {
            SchemaKind::Array(arr) => assert!(arr.unique),
            _ => panic!("expected array"),
        }
    }

    #[test]
    fn test_additional_policies() {
        let typed = parse("object { string a; }*(integer)");
        match &typed.kind {
            SchemaKind::Object(obj) => assert_eq!(
                obj.additional,
                Additional::Typed(Box::new(SchemaNode::integer(NumericRange::default())))
            ),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_top_level_star_is_array_of() {
        assert_eq!(parse("string *"), SchemaNode::list(SchemaNode::string()));
    }

    #[test]
    fn test_quoted_and_reserved_property_names() {
        let node = parse(r#"object { string "string"; boolean "with space"; }"#);
        match &node.kind {
            SchemaKind::Object(obj) => {
                assert!(obj.property("string").is_some());
                assert!(obj.property("with space").is_some());
            }
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_missing_property_name() {
        let err = parse_err("object { string ; }");
        assert_eq!((err.line, err.column), (1, 17));
        assert_eq!(err.expected(), &[PROPERTY_NAME]);
    }

    #[test]
    fn test_junk_at_end_of_input() {
        let err = parse_err("string; string");
        assert_eq!((err.line, err.column), (1, 9));
        assert_eq!(err.expected(), &["';'", "end of input"]);
    }

    #[test]
    fn test_range_errors() {
        assert_eq!(parse_err("integer (,5}").kind, ParseErrorKind::ExclusiveWithoutValue);
        assert_eq!(
            parse_err("string (1,5}").kind,
            ParseErrorKind::ExclusiveCount("string length")
        );
        assert_eq!(
            parse_err("string {1.5,}").kind,
            ParseErrorKind::InvalidCount("string length")
        );
        assert_eq!(
            parse_err("array [string] {-1,}").kind,
            ParseErrorKind::InvalidCount("array item count")
        );
        assert_eq!(
            parse_err("number {1e400,}").kind,
            ParseErrorKind::NumberOutOfRange("1e400".to_string())
        );
    }

    #[test]
    fn test_backtick_rejects_native_keywords() {
        let err = parse_err(r#"integer `{"minimum": 3}`"#);
        assert_eq!(
            err.kind,
            ParseErrorKind::NativeKeyword {
                keyword: "minimum".to_string()
            }
        );
        // not applicable to strings, so it is an ordinary extension
        let node = parse(r#"string `{"minimum": 3}`"#);
        assert_eq!(node.extensions.get("minimum"), Some(&json!(3)));
    }

    #[test]
    fn test_lex_errors_propagate() {
        let err = parse_orderly("object { string na@me; }").unwrap_err();
        assert!(matches!(err, OrderlyError::Lex(_)));
        assert_eq!(err.position(), (1, 19));
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let deep = format!("{}string{}", "array [ ".repeat(10_000), " ]".repeat(10_000));
        let err = parse_err(&deep);
        assert_eq!(err.kind, ParseErrorKind::NestingTooDeep(MAX_NESTING));
        assert_eq!((err.line, err.column), (1, 8 * MAX_NESTING as u32 + 1));

        let deep_default = format!("any = {}", "[".repeat(10_000));
        assert_eq!(
            parse_err(&deep_default).kind,
            ParseErrorKind::NestingTooDeep(MAX_NESTING)
        );

        let shallow = format!("{}string{}", "array [ ".repeat(100), " ]".repeat(100));
        assert!(parse_orderly(&shallow).is_ok());
    }

    #[test]
    fn test_integral_values_are_normalised() {
        let node = parse("object { integer n [1.0, 2] = 10.0; number x = 2.5; }");
        let obj = match &node.kind {
            SchemaKind::Object(obj) => obj,
            _ => panic!("expected object"),
        };
        let n = &obj.property("n").unwrap().schema;
        assert_eq!(n.enum_values, Some(vec![json!(1), json!(2)]));
        assert_eq!(n.default, Some(json!(10)));
        assert_eq!(obj.property("x").unwrap().schema.default, Some(json!(2.5)));
    }
}
