use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at {location}: {message}")]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Recursive descent parser for the algorithm description language
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
        })
    }

    /// Parse the entire program
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            program.nodes.push(self.parse_statement()?);
        }

        Ok(program)
    }

    fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        match self.peek_token() {
            Token::Array(_) => {
                self.advance();
                let name = self.expect_identifier()?;
                self.expect_token(&Token::Eq(loc), "Expected '=' after array name")?;
                self.parse_array_literal(name, loc)
            }
            Token::For(_) => self.parse_for(),
            Token::While(_) => self.parse_while(),
            Token::If(_) => self.parse_if(),
            Token::LBrace(_) => {
                let nodes = self.parse_block()?;
                Ok(AstNode::Sequence {
                    nodes,
                    location: loc,
                })
            }
            Token::Ident(_, _) => {
                let stmt = self.parse_simple_statement()?;
                self.expect_token(&Token::Semicolon(loc), "Expected ';' after statement")?;
                Ok(stmt)
            }
            other => Err(ParseError {
                message: format!("Expected a statement, found {}", other),
                location: loc,
            }),
        }
    }

    /// Statements that may also appear in a `for` header: calls, assignments,
    /// array declarations and bare update expressions like `i++`.
    fn parse_simple_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        let first = self.expect_identifier()?;

        if self.check(&Token::Dot(loc)) || self.check(&Token::LParen(loc)) {
            let mut name = first;
            while self.match_token(&Token::Dot(loc)) {
                name.push('.');
                name.push_str(&self.expect_identifier()?);
            }
            self.expect_token(&Token::LParen(loc), "Expected '(' after call name")?;
            let args = self.parse_arguments()?;
            return Ok(AstNode::Call {
                name: Some(name),
                args,
                location: loc,
            });
        }

        if self.match_token(&Token::Eq(loc)) {
            if self.check(&Token::LBracket(loc)) {
                return self.parse_array_literal(first, loc);
            }
            let value = self.parse_expression(&[Token::Semicolon(loc), Token::RParen(loc)])?;
            return Ok(AstNode::Assign {
                name: Some(first),
                value: Box::new(value),
                location: loc,
            });
        }

        // i++, i += 2, ... are kept as text
        let rest = self.collect_text(&[Token::Semicolon(loc), Token::RParen(loc)]);
        if rest.is_empty() {
            return Err(ParseError {
                message: format!("Expected '(' or '=' after '{}'", first),
                location: self.current_location(),
            });
        }
        Ok(AstNode::Value {
            text: format!("{} {}", first, rest),
            location: loc,
        })
    }

    /// `[1, -2, 3];` after the `=` has been consumed
    fn parse_array_literal(
        &mut self,
        name: String,
        loc: SourceLocation,
    ) -> Result<AstNode, ParseError> {
        self.expect_token(&Token::LBracket(loc), "Expected '[' to start array literal")?;
        let mut values = Vec::new();
        if !self.check(&Token::RBracket(loc)) {
            loop {
                values.push(self.expect_integer()?);
                if !self.match_token(&Token::Comma(loc)) {
                    break;
                }
            }
        }
        self.expect_token(&Token::RBracket(loc), "Expected ']' after array values")?;
        self.expect_token(&Token::Semicolon(loc), "Expected ';' after array declaration")?;
        Ok(AstNode::ArrayDecl {
            name: Some(name),
            values,
            location: loc,
        })
    }

    /// Comma-separated call arguments; consumes the closing ')'.
    fn parse_arguments(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let loc = self.current_location();
        let mut args = Vec::new();
        if self.match_token(&Token::RParen(loc)) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression(&[Token::Comma(loc), Token::RParen(loc)])?);
            if !self.match_token(&Token::Comma(loc)) {
                break;
            }
        }
        self.expect_token(&Token::RParen(loc), "Expected ')' after arguments")?;
        Ok(args)
    }

    /// An expression up to (not including) one of `terminators` at nesting
    /// depth zero. Single literals and identifiers become `Number`/`Value`;
    /// anything longer is kept as text.
    fn parse_expression(&mut self, terminators: &[Token]) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        let start = self.position;
        let text = self.collect_text(terminators);
        let consumed = &self.tokens[start..self.position];

        match consumed {
            [] => Err(ParseError {
                message: format!("Expected an expression, found {}", self.peek_token()),
                location: loc,
            }),
            [Token::IntLiteral(n, _)] => Ok(AstNode::Number {
                value: *n,
                location: loc,
            }),
            [Token::Minus(_), Token::IntLiteral(n, _)] => Ok(AstNode::Number {
                value: -*n,
                location: loc,
            }),
            _ => Ok(AstNode::Value {
                text,
                location: loc,
            }),
        }
    }

    fn parse_for(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        self.advance(); // consume 'for'
        self.expect_token(&Token::LParen(loc), "Expected '(' after 'for'")?;

        let init = if self.check(&Token::Semicolon(loc)) {
            None
        } else {
            Some(Box::new(self.parse_simple_statement()?))
        };
        self.expect_token(&Token::Semicolon(loc), "Expected ';' after loop initializer")?;

        let condition = self.parse_condition(&Token::Semicolon(loc));
        self.expect_token(&Token::Semicolon(loc), "Expected ';' after loop condition")?;

        let increment = if self.check(&Token::RParen(loc)) {
            None
        } else {
            Some(Box::new(self.parse_simple_statement()?))
        };
        self.expect_token(&Token::RParen(loc), "Expected ')' after loop header")?;

        let body = self.parse_block()?;
        Ok(AstNode::Loop {
            init,
            condition: condition.map(Box::new),
            increment,
            body,
            location: loc,
        })
    }

    fn parse_while(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        self.advance(); // consume 'while'
        self.expect_token(&Token::LParen(loc), "Expected '(' after 'while'")?;
        let condition = self.parse_condition(&Token::RParen(loc));
        self.expect_token(&Token::RParen(loc), "Expected ')' after condition")?;
        let body = self.parse_block()?;
        Ok(AstNode::Loop {
            init: None,
            condition: condition.map(Box::new),
            increment: None,
            body,
            location: loc,
        })
    }

    fn parse_if(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        self.advance(); // consume 'if'
        self.expect_token(&Token::LParen(loc), "Expected '(' after 'if'")?;
        let condition = self.parse_condition(&Token::RParen(loc)).ok_or_else(|| ParseError {
            message: "Expected a condition after 'if ('".to_string(),
            location: self.current_location(),
        })?;
        self.expect_token(&Token::RParen(loc), "Expected ')' after condition")?;
        let body = self.parse_block()?;
        Ok(AstNode::If {
            condition: Box::new(condition),
            body,
            location: loc,
        })
    }

    /// Condition text up to `terminator`; `None` when empty.
    fn parse_condition(&mut self, terminator: &Token) -> Option<AstNode> {
        let loc = self.current_location();
        let text = self.collect_text(std::slice::from_ref(terminator));
        (!text.is_empty()).then_some(AstNode::Value {
            text,
            location: loc,
        })
    }

    /// `{ stmt* }`
    fn parse_block(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let loc = self.current_location();
        self.expect_token(&Token::LBrace(loc), "Expected '{' to start block")?;
        let mut nodes = Vec::new();
        while !self.check(&Token::RBrace(loc)) {
            if self.is_at_end() {
                return Err(ParseError {
                    message: "Unterminated block: expected '}'".to_string(),
                    location: loc,
                });
            }
            nodes.push(self.parse_statement()?);
        }
        self.advance(); // consume '}'
        Ok(nodes)
    }

    /// Consume tokens until a terminator at depth zero and return their text.
    fn collect_text(&mut self, terminators: &[Token]) -> String {
        let mut parts = Vec::new();
        let mut depth = 0usize;
        while !self.is_at_end() {
            let token = self.peek_token();
            if depth == 0 && terminators.iter().any(|t| same_kind(t, token)) {
                break;
            }
            match token {
                Token::LParen(_) | Token::LBracket(_) => depth += 1,
                Token::RParen(_) | Token::RBracket(_) => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                Token::LBrace(_) | Token::RBrace(_) | Token::Semicolon(_) => break,
                _ => {}
            }
            parts.push(token.lexeme());
            self.advance();
        }
        parts.join(" ")
    }

    // Helper methods

    fn peek_token(&self) -> &Token {
        // tokenize() always ends with Eof, and advance() never moves past it.
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.position += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek_token(), Token::Eof(_))
    }

    fn current_location(&self) -> SourceLocation {
        self.peek_token().location()
    }

    fn check(&self, token: &Token) -> bool {
        same_kind(self.peek_token(), token)
    }

    fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_token(&mut self, token: &Token, message: &str) -> Result<(), ParseError> {
        if self.match_token(token) {
            Ok(())
        } else {
            Err(ParseError {
                message: format!("{}, found {}", message, self.peek_token()),
                location: self.current_location(),
            })
        }
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match self.peek_token() {
            Token::Ident(name, _) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            other => Err(ParseError {
                message: format!("Expected identifier, found {}", other),
                location: self.current_location(),
            }),
        }
    }

    fn expect_integer(&mut self) -> Result<i64, ParseError> {
        let loc = self.current_location();
        let negative = self.match_token(&Token::Minus(loc));
        match self.peek_token() {
            Token::IntLiteral(n, _) => {
                let n = *n;
                self.advance();
                Ok(if negative { -n } else { n })
            }
            other => Err(ParseError {
                message: format!("Expected integer, found {}", other),
                location: self.current_location(),
            }),
        }
    }
}

fn same_kind(a: &Token, b: &Token) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Program {
        Parser::new(source)
            .expect("lex")
            .parse_program()
            .expect("parse")
    }

    #[test]
    fn test_array_declaration_and_call() {
        let program = parse("array arr = [5, -3, 8];\nbubble_sort(arr);");
        assert_eq!(program.nodes.len(), 2);
        match &program.nodes[0] {
            AstNode::ArrayDecl { name, values, .. } => {
                assert_eq!(name.as_deref(), Some("arr"));
                assert_eq!(values, &vec![5, -3, 8]);
            }
            other => panic!("expected array declaration, got {:?}", other),
        }
        match &program.nodes[1] {
            AstNode::Call { name, args, location } => {
                assert_eq!(name.as_deref(), Some("bubble_sort"));
                assert_eq!(args[0].as_int(), None);
                assert_eq!(location.line, 2);
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_dotted_call_with_two_arguments() {
        let program = parse("graph.add_edge(0, -1);");
        match &program.nodes[0] {
            AstNode::Call { name, args, .. } => {
                assert_eq!(name.as_deref(), Some("graph.add_edge"));
                let ints: Vec<_> = args.iter().map(AstNode::as_int).collect();
                assert_eq!(ints, vec![Some(0), Some(-1)]);
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_for_loop_keeps_header_as_text() {
        let program = parse("for (i = 0; i < n; i++) { stack.push(i); }");
        match &program.nodes[0] {
            AstNode::Loop {
                init,
                condition,
                increment,
                body,
                ..
            } => {
                assert!(matches!(init.as_deref(), Some(AstNode::Assign { .. })));
                assert!(
                    matches!(condition.as_deref(), Some(AstNode::Value { text, .. }) if text == "i < n")
                );
                assert!(
                    matches!(increment.as_deref(), Some(AstNode::Value { text, .. }) if text == "i ++")
                );
                assert_eq!(body.len(), 1);
            }
            other => panic!("expected loop, got {:?}", other),
        }
    }

    #[test]
    fn test_while_if_and_block() {
        let program = parse("while (x > 0) { if (x == 1) { x = x - 1; } } { y = 2; }");
        assert!(matches!(program.nodes[0], AstNode::Loop { .. }));
        assert!(matches!(program.nodes[1], AstNode::Sequence { .. }));
    }

    #[test]
    fn test_assignment_of_array_literal_is_declaration() {
        let program = parse("data = [];");
        assert!(matches!(
            &program.nodes[0],
            AstNode::ArrayDecl { values, .. } if values.is_empty()
        ));
    }

    #[test]
    fn test_missing_semicolon_reports_location() {
        let err = Parser::new("stack.push(1)\nstack.pop();")
            .expect("lex")
            .parse_program()
            .unwrap_err();
        assert_eq!(err.location, SourceLocation::new(2, 1));
        assert!(err.message.contains("Expected ';'"));
    }

    #[test]
    fn test_unterminated_block() {
        let err = Parser::new("if (a) { stack.pop();")
            .expect("lex")
            .parse_program()
            .unwrap_err();
        assert!(err.message.contains("Unterminated block"));
    }
}
