//! Lexer and parser errors
//!
//! Both are fatal to the current compile and carry a 1-based line/column.

use thiserror::Error;

use crate::schema::Severity;

/// Lexer error kinds
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("invalid character '{0}' found in input text")]
    InvalidChar(char),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("invalid escape '\\{0}' in string")]
    InvalidEscape(char),
    #[error("unterminated regular expression")]
    UnterminatedRegex,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("missing integer after minus sign ('-')")]
    MissingDigitsAfterMinus,
    #[error("missing integer after decimal point")]
    MissingDigitsAfterDecimal,
    #[error("missing integer after exponent marker ('e' or 'E')")]
    MissingDigitsAfterExponent,
}

/// Error produced while tokenizing Orderly source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}, column {column}: {kind}")]
pub struct LexError {
    pub line: u32,
    pub column: u32,
    pub kind: LexErrorKind,
}

impl LexError {
    pub fn new(line: u32, column: u32, kind: LexErrorKind) -> Self {
        Self { line, column, kind }
    }

    /// The offending character, when the error is about a single character
    pub fn unexpected_char(&self) -> Option<char> {
        match self.kind {
            LexErrorKind::InvalidChar(c) | LexErrorKind::InvalidEscape(c) => Some(c),
            _ => None,
        }
    }
}

/// Parser error kinds
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected {}, found {found}", expected_list(.expected))]
    Unexpected {
        expected: Vec<&'static str>,
        found: String,
    },
    #[error("invalid string literal {0}")]
    InvalidString(String),
    #[error("number {0} is out of range")]
    NumberOutOfRange(String),
    #[error("an exclusive bound requires a value")]
    ExclusiveWithoutValue,
    #[error("{0} cannot be exclusive")]
    ExclusiveCount(&'static str),
    #[error("{0} must be a non-negative integer")]
    InvalidCount(&'static str),
    #[error("a regular expression only applies to string")]
    PatternOnNonString,
    #[error("a regular expression was already given for this string")]
    DuplicatePattern,
    #[error("'{keyword}' must be written with Orderly syntax, not in the backtick block")]
    NativeKeyword { keyword: String },
    #[error("'{keyword}' in the backtick block requires {expected}")]
    InvalidFacet {
        keyword: String,
        expected: &'static str,
    },
    #[error("an enumeration was already given for this entry")]
    DuplicateEnum,
    #[error("duplicate key {0} in JSON object")]
    DuplicateKey(String),
    #[error("schema references ($ref) are not supported")]
    UnsupportedReference,
    #[error("nesting exceeds the maximum depth of {0}")]
    NestingTooDeep(usize),
}

fn expected_list(expected: &[&'static str]) -> String {
    match expected {
        [] => "something else".to_string(),
        [one] => (*one).to_string(),
        many => format!("one of {}", many.join(", ")),
    }
}

/// Error produced while parsing Orderly tokens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}, column {column}: {kind}")]
pub struct ParseError {
    pub line: u32,
    pub column: u32,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line: u32, column: u32, kind: ParseErrorKind) -> Self {
        Self { line, column, kind }
    }

    /// Expected-set of a token mismatch, empty for other kinds
    pub fn expected(&self) -> &[&'static str] {
        match &self.kind {
            ParseErrorKind::Unexpected { expected, .. } => expected,
            _ => &[],
        }
    }
}

/// Any failure of the Orderly front end
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderlyError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl OrderlyError {
    pub fn code(&self) -> &'static str {
        match self {
            OrderlyError::Lex(_) => "ORDERLY_LEX_ERROR",
            OrderlyError::Parse(_) => "ORDERLY_PARSE_ERROR",
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }

    /// 1-based (line, column) of the error
    pub fn position(&self) -> (u32, u32) {
        match self {
            OrderlyError::Lex(e) => (e.line, e.column),
            OrderlyError::Parse(e) => (e.line, e.column),
        }
    }
}

/// Orderly front-end result type
pub type OrderlyResult<T> = Result<T, OrderlyError>;

/// The offending source line with a caret under `column`
///
/// Returns an empty string when `line` is past the end of the source.
pub fn source_context(source: &str, line: u32, column: u32) -> String {
    let text = match source.lines().nth(line.saturating_sub(1) as usize) {
        Some(text) => text,
        None if line as usize == source.lines().count() + 1 => "",
        None => return String::new(),
    };
    let indent = " ".repeat(column.saturating_sub(1) as usize);
    format!("{}\n{}^", text, indent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new(
            1,
            17,
            ParseErrorKind::Unexpected {
                expected: vec!["property name"],
                found: "';'".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "line 1, column 17: expected property name, found ';'"
        );

        let err = ParseError::new(
            2,
            1,
            ParseErrorKind::Unexpected {
                expected: vec!["';'", "end of input"],
                found: "'string'".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "line 2, column 1: expected one of ';', end of input, found 'string'"
        );
    }

    #[test]
    fn test_lex_error_display() {
        let err = LexError::new(3, 9, LexErrorKind::InvalidChar('@'));
        assert_eq!(
            err.to_string(),
            "line 3, column 9: invalid character '@' found in input text"
        );
        assert_eq!(err.unexpected_char(), Some('@'));
    }

    #[test]
    fn test_source_context() {
        let source = "object {\n    string ;\n}";
        assert_eq!(source_context(source, 2, 12), "    string ;\n           ^");
        assert_eq!(source_context("", 1, 1), "\n^");
        assert_eq!(source_context("a", 5, 1), "");
    }
}
