//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: Parsing statements and indented suites
//! - `expressions`: Parsing expressions by precedence level
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::syntax::ast::*;
use crate::syntax::lexer::{LexError, Lexer, Token};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, Error)]
#[error("Parse error at line {}, column {}: {message}", .location.line, .location.column)]
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

/// Recursive descent parser for the mutation front end
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
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
    pub fn parse_module(&mut self) -> Result<Module, ParseError> {
        let mut body = Vec::new();

        while !self.is_at_end() {
            body.push(self.parse_statement()?);
        }

        Ok(Module::new(body))
    }

    // ===== Helper methods =====

    pub(crate) fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }

    /// The lexer always terminates the stream with `Eof`, and `advance` never
    /// moves past it, so `position` stays in bounds.
    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_token(&self) -> Token {
        self.peek().clone()
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    pub(crate) fn error<T>(&self, message: impl Into<String>) -> Result<T, ParseError> {
        Err(ParseError {
            message: message.into(),
            location: self.current_location(),
        })
    }

    pub(crate) fn expect_token(&mut self, token: &Token, message: &str) -> Result<(), ParseError> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            self.error(format!("{}, found {}", message, self.peek()))
        }
    }

    pub(crate) fn expect_colon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::Colon(self.current_location()),
            &format!("Expected ':' {ctx}"),
        )
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RParen(self.current_location()),
            &format!("Expected ')' {ctx}"),
        )
    }

    pub(crate) fn expect_newline(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::Newline(self.current_location()),
            &format!("Expected end of line {ctx}"),
        )
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if let Token::Ident(name, _) = self.peek_token() {
            self.advance();
            Ok(name)
        } else {
            self.error(format!("Expected identifier, found {}", self.peek()))
        }
    }
}

/// Parse source text into a [`Module`]
pub fn parse(source: &str) -> Result<Module, ParseError> {
    Parser::new(source)?.parse_module()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expression_statements() {
        let module = parse("x == 5\ny != 10\n").unwrap();

        assert_eq!(module.body.len(), 2);
        match &module.body[0] {
            Stmt::Expr {
                value: Expr::Compare { ops, comparators, location, .. },
                ..
            } => {
                assert_eq!(ops, &vec![CmpOp::Eq]);
                assert_eq!(comparators, &vec![Expr::Int(5, SourceLocation::new(1, 6))]);
                assert_eq!(*location, SourceLocation::new(1, 1));
            }
            other => panic!("Expected comparison statement, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_function() {
        let source = "def clamp(x, lo, hi):\n    if x < lo:\n        return lo\n    return x\n";
        let module = parse(source).unwrap();

        assert_eq!(module.body.len(), 1);
        match &module.body[0] {
            Stmt::FunctionDef { name, params, body, .. } => {
                assert_eq!(name, "clamp");
                assert_eq!(params, &vec!["x".to_string(), "lo".to_string(), "hi".to_string()]);
                assert_eq!(body.len(), 2);
            }
            other => panic!("Expected function definition, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_reports_location() {
        let err = parse("x = \n").unwrap_err();

        assert_eq!(err.location.line, 1);
        assert!(err.to_string().starts_with("Parse error at line 1"));
    }

    #[test]
    fn test_lex_error_is_converted() {
        let err = parse("x = $\n").unwrap_err();

        assert_eq!(err.location, SourceLocation::new(1, 5));
        assert!(err.message.contains('$'));
    }

    #[test]
    fn test_empty_source() {
        let module = parse("\n# nothing here\n").unwrap();
        assert!(module.body.is_empty());
    }
}
