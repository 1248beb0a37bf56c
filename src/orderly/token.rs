//! Orderly tokens

use std::fmt;

use crate::schema::keywords::normalize_pattern;

/// Token kinds produced by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Type keywords
    KwString,
    KwInteger,
    KwNumber,
    KwBoolean,
    KwNull,
    KwAny,
    KwArray,
    KwObject,
    KwUnion,

    // Literals
    Identifier,
    StringLiteral,
    IntegerLiteral,
    NumberLiteral,
    Regex,

    // Punctuation
    LeftCurly,
    RightCurly,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    Semicolon,
    Comma,
    Colon,
    Question,
    Star,
    Pipe,
    LessThan,
    GreaterThan,
    Equals,
    Backtick,

    Eof,
}

impl TokenKind {
    /// Keyword kind for an identifier, if it is reserved
    pub fn keyword(word: &str) -> Option<Self> {
        let kind = match word {
            "string" => TokenKind::KwString,
            "integer" => TokenKind::KwInteger,
            "number" => TokenKind::KwNumber,
            "boolean" => TokenKind::KwBoolean,
            "null" => TokenKind::KwNull,
            "any" => TokenKind::KwAny,
            "array" => TokenKind::KwArray,
            "object" => TokenKind::KwObject,
            "union" => TokenKind::KwUnion,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether this token starts a schema entry
    pub fn starts_entry(self) -> bool {
        matches!(
            self,
            TokenKind::KwString
                | TokenKind::KwInteger
                | TokenKind::KwNumber
                | TokenKind::KwBoolean
                | TokenKind::KwNull
                | TokenKind::KwAny
                | TokenKind::KwArray
                | TokenKind::KwObject
                | TokenKind::KwUnion
        )
    }

    /// Name printed by `orderly lex`
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::KwString => "kw_string",
            TokenKind::KwInteger => "kw_integer",
            TokenKind::KwNumber => "kw_number",
            TokenKind::KwBoolean => "kw_boolean",
            TokenKind::KwNull => "kw_null",
            TokenKind::KwAny => "kw_any",
            TokenKind::KwArray => "kw_array",
            TokenKind::KwObject => "kw_object",
            TokenKind::KwUnion => "kw_union",
            TokenKind::Identifier => "identifier",
            TokenKind::StringLiteral => "string_literal",
            TokenKind::IntegerLiteral => "integer_literal",
            TokenKind::NumberLiteral => "number_literal",
            TokenKind::Regex => "regex",
            TokenKind::LeftCurly => "left_curly",
            TokenKind::RightCurly => "right_curly",
            TokenKind::LeftBracket => "left_bracket",
            TokenKind::RightBracket => "right_bracket",
            TokenKind::LeftParen => "left_paren",
            TokenKind::RightParen => "right_paren",
            TokenKind::Semicolon => "semicolon",
            TokenKind::Comma => "comma",
            TokenKind::Colon => "colon",
            TokenKind::Question => "optional_marker",
            TokenKind::Star => "additional_marker",
            TokenKind::Pipe => "pipe",
            TokenKind::LessThan => "less_than",
            TokenKind::GreaterThan => "greater_than",
            TokenKind::Equals => "equals",
            TokenKind::Backtick => "backtick",
            TokenKind::Eof => "eof",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token with its 1-based source position
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    /// Pattern text of a regex token, without the slashes
    pub fn regex_pattern(&self) -> String {
        let inner = self
            .lexeme
            .strip_prefix('/')
            .and_then(|s| s.strip_suffix('/'))
            .unwrap_or(&self.lexeme);
        normalize_pattern(inner)
    }

    /// How the token is shown in "found ..." messages
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", self.lexeme),
        }
    }
}
