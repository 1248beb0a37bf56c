//! Orderly lexer
//!
//! Pull-based: `Lexer` is an iterator of `Result<Token, LexError>` that
//! yields a final `Eof` token and then stops. After an error it yields
//! nothing further. Comments and whitespace are skipped.

use super::errors::{LexError, LexErrorKind};
use super::token::{Token, TokenKind};

pub struct Lexer<'a> {
    source: &'a str,
    offset: usize,
    line: u32,
    column: u32,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Tokenize the whole input, stopping at the first error
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
        Lexer::new(source).collect()
    }

    fn peek(&self) -> Option<char> {
        self.source[self.offset..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.source[self.offset..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match (self.peek(), self.peek_second()) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                (Some('/'), Some('*')) => {
                    let (line, column) = (self.line, self.column);
                    self.bump();
                    self.bump();
                    loop {
                        match self.bump() {
                            Some('*') if self.peek() == Some('/') => {
                                self.bump();
                                break;
                            }
                            Some(_) => {}
                            None => {
                                return Err(LexError::new(
                                    line,
                                    column,
                                    LexErrorKind::UnterminatedComment,
                                ))
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia()?;

        let start = self.offset;
        let (line, column) = (self.line, self.column);

        let c = match self.bump() {
            Some(c) => c,
            None => return Ok(Token::new(TokenKind::Eof, "", line, column)),
        };

        let kind = match c {
            '{' => TokenKind::LeftCurly,
            '}' => TokenKind::RightCurly,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '?' => TokenKind::Question,
            '*' => TokenKind::Star,
            '|' => TokenKind::Pipe,
            '<' => TokenKind::LessThan,
            '>' => TokenKind::GreaterThan,
            '=' => TokenKind::Equals,
            '`' => TokenKind::Backtick,
            '"' => self.lex_string(line, column)?,
            '/' => self.lex_regex(line, column)?,
            '-' | '0'..='9' => self.lex_number(c, line, column)?,
            c if c.is_ascii_alphabetic() || c == '_' => {
                while let Some(c) = self.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                        self.bump();
                    } else {
                        break;
                    }
                }
                TokenKind::keyword(&self.source[start..self.offset])
                    .unwrap_or(TokenKind::Identifier)
            }
            other => return Err(LexError::new(line, column, LexErrorKind::InvalidChar(other))),
        };

        Ok(Token::new(kind, &self.source[start..self.offset], line, column))
    }

    /// Opening quote already consumed; escapes are checked, decoding is the parser's job
    fn lex_string(&mut self, line: u32, column: u32) -> Result<TokenKind, LexError> {
        loop {
            match self.bump() {
                Some('"') => return Ok(TokenKind::StringLiteral),
                Some('\\') => {
                    let (esc_line, esc_column) = (self.line, self.column);
                    match self.bump() {
                        Some('"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't') => {}
                        Some('u') => {
                            for _ in 0..4 {
                                match self.peek() {
                                    Some(h) if h.is_ascii_hexdigit() => {
                                        self.bump();
                                    }
                                    _ => {
                                        return Err(LexError::new(
                                            esc_line,
                                            esc_column,
                                            LexErrorKind::InvalidEscape('u'),
                                        ))
                                    }
                                }
                            }
                        }
                        Some(other) => {
                            return Err(LexError::new(
                                esc_line,
                                esc_column,
                                LexErrorKind::InvalidEscape(other),
                            ))
                        }
                        None => {
                            return Err(LexError::new(line, column, LexErrorKind::UnterminatedString))
                        }
                    }
                }
                Some(_) => {}
                None => return Err(LexError::new(line, column, LexErrorKind::UnterminatedString)),
            }
        }
    }

    /// Opening slash already consumed; a regex ends at the next unescaped slash on the same line
    fn lex_regex(&mut self, line: u32, column: u32) -> Result<TokenKind, LexError> {
        loop {
            match self.peek() {
                Some('/') => {
                    self.bump();
                    return Ok(TokenKind::Regex);
                }
                Some('\\') => {
                    self.bump();
                    match self.peek() {
                        Some('\n') | None => break,
                        Some(_) => {
                            self.bump();
                        }
                    }
                }
                Some('\n') | None => break,
                Some(_) => {
                    self.bump();
                }
            }
        }
        Err(LexError::new(line, column, LexErrorKind::UnterminatedRegex))
    }

    /// JSON number grammar: `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
    fn lex_number(&mut self, first: char, line: u32, column: u32) -> Result<TokenKind, LexError> {
        let mut kind = TokenKind::IntegerLiteral;

        let lead = if first == '-' {
            match self.bump_digit() {
                Some(d) => d,
                None => {
                    return Err(LexError::new(line, column, LexErrorKind::MissingDigitsAfterMinus))
                }
            }
        } else {
            first
        };
        if lead != '0' {
            self.bump_digits();
        }

        if self.peek() == Some('.') {
            self.bump();
            if self.bump_digits() == 0 {
                return Err(LexError::new(line, column, LexErrorKind::MissingDigitsAfterDecimal));
            }
            kind = TokenKind::NumberLiteral;
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            if self.bump_digits() == 0 {
                return Err(LexError::new(line, column, LexErrorKind::MissingDigitsAfterExponent));
            }
            kind = TokenKind::NumberLiteral;
        }

        Ok(kind)
    }

    fn bump_digit(&mut self) -> Option<char> {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => self.bump(),
            _ => None,
        }
    }

    fn bump_digits(&mut self) -> usize {
        let mut count = 0;
        while self.bump_digit().is_some() {
            count += 1;
        }
        count
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        match &result {
            Ok(token) if token.kind == TokenKind::Eof => self.finished = true,
            Err(_) => self.finished = true,
            Ok(_) => {}
        }
        Some(result)
    }
}
