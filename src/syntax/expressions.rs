//! Expression parsing implementation
//!
//! This module handles parsing of expressions by recursive descent, one
//! method per precedence level.
//!
//! # Precedence
//!
//! From lowest to highest:
//!
//! | Level       | Operators                                   |
//! |-------------|---------------------------------------------|
//! | or          | `or`                                        |
//! | and         | `and`                                       |
//! | not         | `not x`                                     |
//! | comparison  | `< <= > >= == != is, is not, in, not in`    |
//! | arithmetic  | `+ -`                                       |
//! | term        | `* / // %`                                  |
//! | unary       | `-x`                                        |
//! | postfix     | calls `f(a, b)`                             |
//!
//! Comparisons chain: `a < b <= c` is a single [`Expr::Compare`] with two
//! operators rather than a nested pair of binary nodes.
//!
//! Compound nodes are located at the start of their leftmost operand, so a
//! comparison's location is where its expression begins.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::syntax::ast::*;
use crate::syntax::lexer::Token;
use crate::syntax::parse::{ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    /// Parse `or`, flattening `a or b or c` into one node
    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_and()?;
        let mut values = vec![first];

        while self.match_token(&Token::Or(self.current_location())) {
            values.push(self.parse_and()?);
        }

        Ok(bool_op(BoolOp::Or, values))
    }

    /// Parse `and`, flattening `a and b and c` into one node
    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_not()?;
        let mut values = vec![first];

        while self.match_token(&Token::And(self.current_location())) {
            values.push(self.parse_not()?);
        }

        Ok(bool_op(BoolOp::And, values))
    }

    /// Parse logical negation
    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();
        if self.match_token(&Token::Not(loc)) {
            let operand = Box::new(self.parse_not()?);
            return Ok(Expr::UnaryOp {
                op: UnaryOp::Not,
                operand,
                location: loc,
            });
        }

        self.parse_comparison()
    }

    /// Parse a (possibly chained) comparison
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_arithmetic()?;
        let mut ops = Vec::new();
        let mut comparators = Vec::new();

        while let Some(op) = self.match_comparison_operator() {
            ops.push(op);
            comparators.push(self.parse_arithmetic()?);
        }

        if ops.is_empty() {
            return Ok(left);
        }

        Ok(Expr::Compare {
            location: left.location(),
            left: Box::new(left),
            ops,
            comparators,
        })
    }

    /// Consume a comparison operator if one is next, including the two-word
    /// forms `is not` and `not in`
    fn match_comparison_operator(&mut self) -> Option<CmpOp> {
        let (op, width) = match self.peek() {
            Token::EqEq(_) => (CmpOp::Eq, 1),
            Token::NotEq(_) => (CmpOp::NotEq, 1),
            Token::Lt(_) => (CmpOp::Lt, 1),
            Token::Le(_) => (CmpOp::LtE, 1),
            Token::Gt(_) => (CmpOp::Gt, 1),
            Token::Ge(_) => (CmpOp::GtE, 1),
            Token::In(_) => (CmpOp::In, 1),
            Token::Is(_) if matches!(self.peek_ahead(1), Some(Token::Not(_))) => (CmpOp::IsNot, 2),
            Token::Is(_) => (CmpOp::Is, 1),
            Token::Not(_) if matches!(self.peek_ahead(1), Some(Token::In(_))) => (CmpOp::NotIn, 2),
            _ => return None,
        };
        for _ in 0..width {
            self.advance();
        }
        Some(op)
    }

    /// Parse `+` and `-` (left-associative)
    fn parse_arithmetic(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::Plus(loc)) {
                BinOp::Add
            } else if self.match_token(&Token::Minus(loc)) {
                BinOp::Sub
            } else {
                break;
            };

            let right = Box::new(self.parse_term()?);
            left = Expr::BinOp {
                location: left.location(),
                left: Box::new(left),
                op,
                right,
            };
        }

        Ok(left)
    }

    /// Parse `*`, `/`, `//` and `%` (left-associative)
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::Star(loc)) {
                BinOp::Mul
            } else if self.match_token(&Token::Slash(loc)) {
                BinOp::Div
            } else if self.match_token(&Token::SlashSlash(loc)) {
                BinOp::FloorDiv
            } else if self.match_token(&Token::Percent(loc)) {
                BinOp::Mod
            } else {
                break;
            };

            let right = Box::new(self.parse_unary()?);
            left = Expr::BinOp {
                location: left.location(),
                left: Box::new(left),
                op,
                right,
            };
        }

        Ok(left)
    }

    /// Parse unary minus
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();
        if self.match_token(&Token::Minus(loc)) {
            let operand = Box::new(self.parse_unary()?);
            return Ok(Expr::UnaryOp {
                op: UnaryOp::Neg,
                operand,
                location: loc,
            });
        }

        self.parse_postfix()
    }

    /// Parse call suffixes: `f(a)(b)`
    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        while self.match_token(&Token::LParen(self.current_location())) {
            let mut args = Vec::new();
            while !self.check(&Token::RParen(self.current_location())) {
                args.push(self.parse_expression()?);
                if !self.match_token(&Token::Comma(self.current_location())) {
                    break;
                }
            }
            self.expect_rparen("after call arguments")?;

            expr = Expr::Call {
                location: expr.location(),
                func: Box::new(expr),
                args,
            };
        }

        Ok(expr)
    }

    /// Parse literals, names and parenthesized expressions
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        let expr = match self.peek_token() {
            Token::IntLiteral(n, _) => Expr::Int(n, loc),
            Token::StringLiteral(s, _) => Expr::Str(s, loc),
            Token::Ident(name, _) => Expr::Name(name, loc),
            Token::True(_) => Expr::Bool(true, loc),
            Token::False(_) => Expr::Bool(false, loc),
            Token::NoneKw(_) => Expr::None(loc),
            Token::LParen(_) => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect_rparen("after parenthesized expression")?;
                return Ok(inner);
            }
            other => return self.error(format!("Expected expression, found {}", other)),
        };

        self.advance();
        Ok(expr)
    }
}

/// Collapse a single-operand boolean chain to the operand itself
fn bool_op(op: BoolOp, mut values: Vec<Expr>) -> Expr {
    if values.len() == 1 {
        return values.remove(0);
    }
    Expr::BoolOp {
        location: values[0].location(),
        op,
        values,
    }
}

#[cfg(test)]
mod tests {
    use crate::syntax::ast::*;
    use crate::syntax::parse::parse;

    fn parse_expr(source: &str) -> Expr {
        let module = parse(source).unwrap();
        match module.body.into_iter().next() {
            Some(Stmt::Expr { value, .. }) => value,
            other => panic!("Expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn test_chained_comparison_is_one_node() {
        match parse_expr("a < b < c") {
            Expr::Compare { ops, comparators, .. } => {
                assert_eq!(ops, vec![CmpOp::Lt, CmpOp::Lt]);
                assert_eq!(comparators.len(), 2);
            }
            other => panic!("Expected comparison, got {other:?}"),
        }
    }

    #[test]
    fn test_two_word_operators() {
        match parse_expr("a is not None and b not in xs") {
            Expr::BoolOp { op, values, .. } => {
                assert_eq!(op, BoolOp::And);
                assert!(matches!(&values[0], Expr::Compare { ops, .. } if ops == &vec![CmpOp::IsNot]));
                assert!(matches!(&values[1], Expr::Compare { ops, .. } if ops == &vec![CmpOp::NotIn]));
            }
            other => panic!("Expected boolean chain, got {other:?}"),
        }
    }

    #[test]
    fn test_arithmetic_binds_tighter_than_comparison() {
        match parse_expr("x + 1 >= y * 2") {
            Expr::Compare { left, comparators, .. } => {
                assert!(matches!(*left, Expr::BinOp { op: BinOp::Add, .. }));
                assert!(matches!(comparators[0], Expr::BinOp { op: BinOp::Mul, .. }));
            }
            other => panic!("Expected comparison, got {other:?}"),
        }
    }

    #[test]
    fn test_not_wraps_comparison() {
        match parse_expr("not a == b") {
            Expr::UnaryOp { op, operand, .. } => {
                assert_eq!(op, UnaryOp::Not);
                assert!(matches!(*operand, Expr::Compare { .. }));
            }
            other => panic!("Expected negation, got {other:?}"),
        }
    }

    #[test]
    fn test_comparison_located_at_left_operand() {
        let expr = parse_expr("(f(x) <= 3)");
        assert_eq!(expr.location(), SourceLocation::new(1, 2));
    }

    #[test]
    fn test_call_arguments() {
        match parse_expr("print(\"x\", y > 0,)") {
            Expr::Call { func, args, .. } => {
                assert!(matches!(*func, Expr::Name(ref n, _) if n == "print"));
                assert_eq!(args.len(), 2);
            }
            other => panic!("Expected call, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_operand() {
        let err = parse("x <\n").unwrap_err();
        assert!(err.message.starts_with("Expected expression"));
    }
}
