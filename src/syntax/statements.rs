//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! statement   ::= if_stmt | while_stmt | def_stmt | simple_stmt NEWLINE
//! simple_stmt ::= "return" [expr] | "pass" | "break" | "continue"
//!               | NAME "=" expr | expr
//! if_stmt     ::= "if" expr ":" suite ("elif" expr ":" suite)* ["else" ":" suite]
//! while_stmt  ::= "while" expr ":" suite
//! def_stmt    ::= "def" NAME "(" [NAME ("," NAME)*] ")" ":" suite
//! suite       ::= simple_stmt NEWLINE | NEWLINE INDENT statement+ DEDENT
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::syntax::ast::*;
use crate::syntax::lexer::Token;
use crate::syntax::parse::{ParseError, Parser};

impl Parser {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();

        if self.match_token(&Token::If(loc)) {
            return self.parse_if_statement(loc);
        }

        if self.match_token(&Token::While(loc)) {
            let test = self.parse_expression()?;
            self.expect_colon("after 'while' condition")?;
            let body = self.parse_suite()?;
            return Ok(Stmt::While {
                test,
                body,
                location: loc,
            });
        }

        if self.match_token(&Token::Def(loc)) {
            return self.parse_function_definition(loc);
        }

        if self.check(&Token::Indent(loc)) {
            return self.error("Unexpected indent");
        }

        let stmt = self.parse_simple_statement()?;
        self.expect_newline("after statement")?;
        Ok(stmt)
    }

    /// Parse a single-line statement, without its terminating newline
    fn parse_simple_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();

        if self.match_token(&Token::Return(loc)) {
            let value = if self.check(&Token::Newline(loc)) {
                None
            } else {
                Some(self.parse_expression()?)
            };
            return Ok(Stmt::Return {
                value,
                location: loc,
            });
        }

        if self.match_token(&Token::Pass(loc)) {
            return Ok(Stmt::Pass { location: loc });
        }

        if self.match_token(&Token::Break(loc)) {
            return Ok(Stmt::Break { location: loc });
        }

        if self.match_token(&Token::Continue(loc)) {
            return Ok(Stmt::Continue { location: loc });
        }

        // Assignment: identifier followed by '='
        if matches!(self.peek(), Token::Ident(_, _))
            && self
                .peek_ahead(1)
                .map(|t| matches!(t, Token::Eq(_)))
                .unwrap_or(false)
        {
            let target = self.expect_identifier()?;
            self.advance(); // consume '='
            let value = self.parse_expression()?;
            return Ok(Stmt::Assign {
                target,
                value,
                location: loc,
            });
        }

        let value = self.parse_expression()?;
        Ok(Stmt::Expr {
            location: value.location(),
            value,
        })
    }

    /// Parse if/elif/else. The `if` (or `elif`) keyword is already consumed.
    fn parse_if_statement(&mut self, loc: SourceLocation) -> Result<Stmt, ParseError> {
        let test = self.parse_expression()?;
        self.expect_colon("after 'if' condition")?;
        let body = self.parse_suite()?;

        let else_loc = self.current_location();
        let orelse = if self.match_token(&Token::Elif(else_loc)) {
            vec![self.parse_if_statement(else_loc)?]
        } else if self.match_token(&Token::Else(else_loc)) {
            self.expect_colon("after 'else'")?;
            self.parse_suite()?
        } else {
            Vec::new()
        };

        Ok(Stmt::If {
            test,
            body,
            orelse,
            location: loc,
        })
    }

    /// Parse function definition: def name(params): suite
    fn parse_function_definition(&mut self, loc: SourceLocation) -> Result<Stmt, ParseError> {
        let name = self.expect_identifier()?;
        self.expect_token(
            &Token::LParen(self.current_location()),
            "Expected '(' after function name",
        )?;

        let mut params = Vec::new();
        while !self.check(&Token::RParen(self.current_location())) {
            params.push(self.expect_identifier()?);
            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }

        self.expect_rparen("after parameters")?;
        self.expect_colon("after function signature")?;
        let body = self.parse_suite()?;

        Ok(Stmt::FunctionDef {
            name,
            params,
            body,
            location: loc,
        })
    }

    /// Parse the body that follows a ':'
    fn parse_suite(&mut self) -> Result<Vec<Stmt>, ParseError> {
        // Single-line suite: `if x: pass`
        if !self.check(&Token::Newline(self.current_location())) {
            let stmt = self.parse_simple_statement()?;
            self.expect_newline("after statement")?;
            return Ok(vec![stmt]);
        }

        self.advance(); // consume newline
        self.expect_token(
            &Token::Indent(self.current_location()),
            "Expected an indented block",
        )?;

        let mut statements = Vec::new();
        while !self.check(&Token::Dedent(self.current_location())) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        self.expect_token(
            &Token::Dedent(self.current_location()),
            "Expected end of indented block",
        )?;

        Ok(statements)
    }
}

#[cfg(test)]
mod tests {
    use crate::syntax::ast::*;
    use crate::syntax::parse::parse;

    #[test]
    fn test_if_elif_else_nests() {
        let source = "if x > 0:\n    a = 1\nelif x < 0:\n    a = 2\nelse:\n    a = 3\n";
        let module = parse(source).unwrap();

        assert_eq!(module.body.len(), 1);
        let Stmt::If { orelse, location, .. } = &module.body[0] else {
            panic!("Expected if statement");
        };
        assert_eq!(*location, SourceLocation::new(1, 1));
        assert_eq!(orelse.len(), 1);
        match &orelse[0] {
            Stmt::If { orelse, location, .. } => {
                assert_eq!(*location, SourceLocation::new(3, 1));
                assert_eq!(orelse.len(), 1);
                assert!(matches!(orelse[0], Stmt::Assign { .. }));
            }
            other => panic!("Expected elif branch, got {other:?}"),
        }
    }

    #[test]
    fn test_single_line_suite() {
        let module = parse("while n >= 1: n = n - 1\n").unwrap();

        let Stmt::While { body, .. } = &module.body[0] else {
            panic!("Expected while statement");
        };
        assert!(matches!(&body[0], Stmt::Assign { target, .. } if target == "n"));
    }

    #[test]
    fn test_jump_statements() {
        let source = "while True:\n    if done:\n        break\n    continue\nreturn\n";
        let module = parse(source).unwrap();

        assert_eq!(module.body.len(), 2);
        assert!(matches!(module.body[1], Stmt::Return { value: None, .. }));
    }

    #[test]
    fn test_unexpected_indent() {
        let err = parse("x = 1\n    y = 2\n").unwrap_err();
        assert_eq!(err.message, "Unexpected indent");
        assert_eq!(err.location.line, 2);
    }

    #[test]
    fn test_missing_block() {
        let err = parse("if x:\ny\n").unwrap_err();
        assert!(err.message.starts_with("Expected an indented block"));
    }
}
