//! Lexer (tokenizer) for the algorithm description language
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! `//` line comments and `/* */` block comments are skipped.

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can report
/// an accurate line and column without a separate token→location table.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    IntLiteral(i64, SourceLocation),

    // Identifiers
    Ident(String, SourceLocation),

    // Keywords
    Array(SourceLocation),
    For(SourceLocation),
    While(SourceLocation),
    If(SourceLocation),

    // Arithmetic
    Plus(SourceLocation),    // +
    Minus(SourceLocation),   // -
    Star(SourceLocation),    // *
    Slash(SourceLocation),   // /
    Percent(SourceLocation), // %

    // Comparison
    EqEq(SourceLocation),  // ==
    NotEq(SourceLocation), // !=
    Lt(SourceLocation),    // <
    Le(SourceLocation),    // <=
    Gt(SourceLocation),    // >
    Ge(SourceLocation),    // >=

    // Logical
    AndAnd(SourceLocation), // &&
    OrOr(SourceLocation),   // ||
    Bang(SourceLocation),   // !

    // Assignment
    Eq(SourceLocation),      // =
    PlusEq(SourceLocation),  // +=
    MinusEq(SourceLocation), // -=

    // Increment/Decrement
    PlusPlus(SourceLocation),   // ++
    MinusMinus(SourceLocation), // --

    // Member access
    Dot(SourceLocation), // .

    // Punctuation
    LParen(SourceLocation),    // (
    RParen(SourceLocation),    // )
    LBrace(SourceLocation),    // {
    RBrace(SourceLocation),    // }
    LBracket(SourceLocation),  // [
    RBracket(SourceLocation),  // ]
    Semicolon(SourceLocation), // ;
    Comma(SourceLocation),     // ,

    // End of file
    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::IntLiteral(_, loc)
            | Token::Ident(_, loc)
            | Token::Array(loc)
            | Token::For(loc)
            | Token::While(loc)
            | Token::If(loc)
            | Token::Plus(loc)
            | Token::Minus(loc)
            | Token::Star(loc)
            | Token::Slash(loc)
            | Token::Percent(loc)
            | Token::EqEq(loc)
            | Token::NotEq(loc)
            | Token::Lt(loc)
            | Token::Le(loc)
            | Token::Gt(loc)
            | Token::Ge(loc)
            | Token::AndAnd(loc)
            | Token::OrOr(loc)
            | Token::Bang(loc)
            | Token::Eq(loc)
            | Token::PlusEq(loc)
            | Token::MinusEq(loc)
            | Token::PlusPlus(loc)
            | Token::MinusMinus(loc)
            | Token::Dot(loc)
            | Token::LParen(loc)
            | Token::RParen(loc)
            | Token::LBrace(loc)
            | Token::RBrace(loc)
            | Token::LBracket(loc)
            | Token::RBracket(loc)
            | Token::Semicolon(loc)
            | Token::Comma(loc)
            | Token::Eof(loc) => *loc,
        }
    }

    /// The token's text as it appears in source.
    pub fn lexeme(&self) -> String {
        match self {
            Token::IntLiteral(n, _) => n.to_string(),
            Token::Ident(s, _) => s.clone(),
            Token::Array(_) => "array".into(),
            Token::For(_) => "for".into(),
            Token::While(_) => "while".into(),
            Token::If(_) => "if".into(),
            Token::Plus(_) => "+".into(),
            Token::Minus(_) => "-".into(),
            Token::Star(_) => "*".into(),
            Token::Slash(_) => "/".into(),
            Token::Percent(_) => "%".into(),
            Token::EqEq(_) => "==".into(),
            Token::NotEq(_) => "!=".into(),
            Token::Lt(_) => "<".into(),
            Token::Le(_) => "<=".into(),
            Token::Gt(_) => ">".into(),
            Token::Ge(_) => ">=".into(),
            Token::AndAnd(_) => "&&".into(),
            Token::OrOr(_) => "||".into(),
            Token::Bang(_) => "!".into(),
            Token::Eq(_) => "=".into(),
            Token::PlusEq(_) => "+=".into(),
            Token::MinusEq(_) => "-=".into(),
            Token::PlusPlus(_) => "++".into(),
            Token::MinusMinus(_) => "--".into(),
            Token::Dot(_) => ".".into(),
            Token::LParen(_) => "(".into(),
            Token::RParen(_) => ")".into(),
            Token::LBrace(_) => "{".into(),
            Token::RBrace(_) => "}".into(),
            Token::LBracket(_) => "[".into(),
            Token::RBracket(_) => "]".into(),
            Token::Semicolon(_) => ";".into(),
            Token::Comma(_) => ",".into(),
            Token::Eof(_) => String::new(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::IntLiteral(n, _) => write!(f, "int literal {}", n),
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            Token::Eof(_) => write!(f, "end of file"),
            other => write!(f, "'{}'", other.lexeme()),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at {location}: {message}")]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

/// Lexer for algorithm description source
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_at_end() {
                tokens.push(Token::Eof(self.current_location()));
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of file".to_string(),
            location: loc,
        })?;

        match ch {
            '0'..='9' => self.number_literal(ch, loc),
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword(ch, loc)),

            '+' => Ok(if self.match_char('+') {
                Token::PlusPlus(loc)
            } else if self.match_char('=') {
                Token::PlusEq(loc)
            } else {
                Token::Plus(loc)
            }),
            '-' => Ok(if self.match_char('-') {
                Token::MinusMinus(loc)
            } else if self.match_char('=') {
                Token::MinusEq(loc)
            } else {
                Token::Minus(loc)
            }),
            '*' => Ok(Token::Star(loc)),
            '/' => Ok(Token::Slash(loc)),
            '%' => Ok(Token::Percent(loc)),
            '=' => Ok(if self.match_char('=') {
                Token::EqEq(loc)
            } else {
                Token::Eq(loc)
            }),
            '!' => Ok(if self.match_char('=') {
                Token::NotEq(loc)
            } else {
                Token::Bang(loc)
            }),
            '<' => Ok(if self.match_char('=') {
                Token::Le(loc)
            } else {
                Token::Lt(loc)
            }),
            '>' => Ok(if self.match_char('=') {
                Token::Ge(loc)
            } else {
                Token::Gt(loc)
            }),
            '&' if self.match_char('&') => Ok(Token::AndAnd(loc)),
            '|' if self.match_char('|') => Ok(Token::OrOr(loc)),
            '.' => Ok(Token::Dot(loc)),
            '(' => Ok(Token::LParen(loc)),
            ')' => Ok(Token::RParen(loc)),
            '{' => Ok(Token::LBrace(loc)),
            '}' => Ok(Token::RBrace(loc)),
            '[' => Ok(Token::LBracket(loc)),
            ']' => Ok(Token::RBracket(loc)),
            ';' => Ok(Token::Semicolon(loc)),
            ',' => Ok(Token::Comma(loc)),

            _ => Err(LexError {
                message: format!("Unexpected character '{}'", ch),
                location: loc,
            }),
        }
    }

    fn number_literal(&mut self, first: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut text = String::from(first);
        while let Some(ch) = self.peek().filter(char::is_ascii_digit) {
            text.push(ch);
            self.advance();
        }
        text.parse::<i64>()
            .map(|n| Token::IntLiteral(n, loc))
            .map_err(|_| LexError {
                message: format!("Integer literal '{}' is out of range", text),
                location: loc,
            })
    }

    fn identifier_or_keyword(&mut self, first: char, loc: SourceLocation) -> Token {
        let mut text = String::from(first);
        while let Some(ch) = self.peek().filter(|c| c.is_ascii_alphanumeric() || *c == '_') {
            text.push(ch);
            self.advance();
        }
        match text.as_str() {
            "array" => Token::Array(loc),
            "for" => Token::For(loc),
            "while" => Token::While(loc),
            "if" => Token::If(loc),
            _ => Token::Ident(text, loc),
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_ahead(1) == Some('/') => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                Some('/') if self.peek_ahead(1) == Some('*') => {
                    let start = self.current_location();
                    self.advance();
                    self.advance();
                    loop {
                        match self.advance() {
                            Some('*') if self.peek() == Some('/') => {
                                self.advance();
                                break;
                            }
                            Some(_) => {}
                            None => {
                                return Err(LexError {
                                    message: "Unterminated block comment".to_string(),
                                    location: start,
                                })
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
