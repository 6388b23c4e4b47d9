//! Lexer (tokenizer) for the indentation-structured source language
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Block structure is carried by layout tokens: a [`Token::Newline`] ends each
//! logical line, and changes in leading whitespace produce [`Token::Indent`] /
//! [`Token::Dedent`]. Newlines inside parentheses are ignored, so a bracketed
//! expression may span several physical lines. Blank lines and `#` comments
//! never produce tokens.

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// Tab stops used when measuring indentation
const TAB_WIDTH: usize = 8;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can report
/// an accurate line and column without a separate token→location table.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    IntLiteral(i64, SourceLocation),
    StringLiteral(String, SourceLocation),

    // Identifiers
    Ident(String, SourceLocation),

    // Keywords
    If(SourceLocation),
    Elif(SourceLocation),
    Else(SourceLocation),
    While(SourceLocation),
    Def(SourceLocation),
    Return(SourceLocation),
    Pass(SourceLocation),
    Break(SourceLocation),
    Continue(SourceLocation),
    And(SourceLocation),
    Or(SourceLocation),
    Not(SourceLocation),
    Is(SourceLocation),
    In(SourceLocation),
    True(SourceLocation),
    False(SourceLocation),
    NoneKw(SourceLocation),

    // Arithmetic
    Plus(SourceLocation),       // +
    Minus(SourceLocation),      // -
    Star(SourceLocation),       // *
    Slash(SourceLocation),      // /
    SlashSlash(SourceLocation), // //
    Percent(SourceLocation),    // %

    // Comparison
    EqEq(SourceLocation),  // ==
    NotEq(SourceLocation), // !=
    Lt(SourceLocation),    // <
    Le(SourceLocation),    // <=
    Gt(SourceLocation),    // >
    Ge(SourceLocation),    // >=

    // Assignment
    Eq(SourceLocation), // =

    // Punctuation
    LParen(SourceLocation), // (
    RParen(SourceLocation), // )
    Comma(SourceLocation),  // ,
    Colon(SourceLocation),  // :

    // Layout
    Newline(SourceLocation),
    Indent(SourceLocation),
    Dedent(SourceLocation),

    // End of file
    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::IntLiteral(_, loc)
            | Token::StringLiteral(_, loc)
            | Token::Ident(_, loc)
            | Token::If(loc)
            | Token::Elif(loc)
            | Token::Else(loc)
            | Token::While(loc)
            | Token::Def(loc)
            | Token::Return(loc)
            | Token::Pass(loc)
            | Token::Break(loc)
            | Token::Continue(loc)
            | Token::And(loc)
            | Token::Or(loc)
            | Token::Not(loc)
            | Token::Is(loc)
            | Token::In(loc)
            | Token::True(loc)
            | Token::False(loc)
            | Token::NoneKw(loc)
            | Token::Plus(loc)
            | Token::Minus(loc)
            | Token::Star(loc)
            | Token::Slash(loc)
            | Token::SlashSlash(loc)
            | Token::Percent(loc)
            | Token::EqEq(loc)
            | Token::NotEq(loc)
            | Token::Lt(loc)
            | Token::Le(loc)
            | Token::Gt(loc)
            | Token::Ge(loc)
            | Token::Eq(loc)
            | Token::LParen(loc)
            | Token::RParen(loc)
            | Token::Comma(loc)
            | Token::Colon(loc)
            | Token::Newline(loc)
            | Token::Indent(loc)
            | Token::Dedent(loc)
            | Token::Eof(loc) => *loc,
        }
    }

    /// Layout tokens never follow one another with a pending statement
    fn is_layout(&self) -> bool {
        matches!(
            self,
            Token::Newline(_) | Token::Indent(_) | Token::Dedent(_)
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::IntLiteral(n, _) => write!(f, "int literal {}", n),
            Token::StringLiteral(s, _) => write!(f, "string literal {:?}", s),
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            Token::If(_) => write!(f, "'if'"),
            Token::Elif(_) => write!(f, "'elif'"),
            Token::Else(_) => write!(f, "'else'"),
            Token::While(_) => write!(f, "'while'"),
            Token::Def(_) => write!(f, "'def'"),
            Token::Return(_) => write!(f, "'return'"),
            Token::Pass(_) => write!(f, "'pass'"),
            Token::Break(_) => write!(f, "'break'"),
            Token::Continue(_) => write!(f, "'continue'"),
            Token::And(_) => write!(f, "'and'"),
            Token::Or(_) => write!(f, "'or'"),
            Token::Not(_) => write!(f, "'not'"),
            Token::Is(_) => write!(f, "'is'"),
            Token::In(_) => write!(f, "'in'"),
            Token::True(_) => write!(f, "'True'"),
            Token::False(_) => write!(f, "'False'"),
            Token::NoneKw(_) => write!(f, "'None'"),
            Token::Plus(_) => write!(f, "'+'"),
            Token::Minus(_) => write!(f, "'-'"),
            Token::Star(_) => write!(f, "'*'"),
            Token::Slash(_) => write!(f, "'/'"),
            Token::SlashSlash(_) => write!(f, "'//'"),
            Token::Percent(_) => write!(f, "'%'"),
            Token::EqEq(_) => write!(f, "'=='"),
            Token::NotEq(_) => write!(f, "'!='"),
            Token::Lt(_) => write!(f, "'<'"),
            Token::Le(_) => write!(f, "'<='"),
            Token::Gt(_) => write!(f, "'>'"),
            Token::Ge(_) => write!(f, "'>='"),
            Token::Eq(_) => write!(f, "'='"),
            Token::LParen(_) => write!(f, "'('"),
            Token::RParen(_) => write!(f, "')'"),
            Token::Comma(_) => write!(f, "','"),
            Token::Colon(_) => write!(f, "':'"),
            Token::Newline(_) => write!(f, "end of line"),
            Token::Indent(_) => write!(f, "indent"),
            Token::Dedent(_) => write!(f, "dedent"),
            Token::Eof(_) => write!(f, "end of file"),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, Error)]
#[error("Lexer error at line {}, column {}: {message}", .location.line, .location.column)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

/// Lexer for indentation-structured source
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    indent_stack: Vec<usize>,
    paren_depth: usize,
    at_line_start: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            indent_stack: vec![0],
            paren_depth: 0,
            at_line_start: true,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            if self.at_line_start && self.paren_depth == 0 {
                if !self.read_indentation(&mut tokens)? {
                    continue;
                }
            }

            self.skip_inline_whitespace_and_comments();

            if self.is_at_end() {
                break;
            }

            if self.peek() == Some('\n') {
                let loc = self.current_location();
                self.advance();
                if self.paren_depth == 0 {
                    if tokens.last().is_some_and(|t: &Token| !t.is_layout()) {
                        tokens.push(Token::Newline(loc));
                    }
                    self.at_line_start = true;
                }
                continue;
            }

            let token = self.next_token()?;
            match token {
                Token::LParen(_) => self.paren_depth += 1,
                Token::RParen(loc) => {
                    self.paren_depth = self.paren_depth.checked_sub(1).ok_or(LexError {
                        message: "Unmatched ')'".to_string(),
                        location: loc,
                    })?;
                }
                _ => {}
            }
            tokens.push(token);
        }

        let loc = self.current_location();
        if self.paren_depth > 0 {
            return Err(LexError {
                message: "Unexpected end of file inside parentheses".to_string(),
                location: loc,
            });
        }
        if tokens.last().is_some_and(|t| !t.is_layout()) {
            tokens.push(Token::Newline(loc));
        }
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            tokens.push(Token::Dedent(loc));
        }
        tokens.push(Token::Eof(loc));

        Ok(tokens)
    }

    /// Measure the indentation of a new logical line and emit layout tokens.
    ///
    /// Returns `false` when the line was blank or comment-only and has been
    /// consumed entirely, in which case no layout tokens are emitted.
    fn read_indentation(&mut self, tokens: &mut Vec<Token>) -> Result<bool, LexError> {
        let mut width = 0;
        while let Some(ch) = self.peek() {
            match ch {
                ' ' => width += 1,
                '\t' => width += TAB_WIDTH - width % TAB_WIDTH,
                '\r' | '\x0c' => {}
                _ => break,
            }
            self.advance();
        }

        match self.peek() {
            None => return Ok(true),
            Some('\n') => {
                self.advance();
                return Ok(false);
            }
            Some('#') => {
                self.skip_line_comment();
                if self.peek() == Some('\n') {
                    self.advance();
                }
                return Ok(false);
            }
            _ => {}
        }

        self.at_line_start = false;
        let loc = self.current_location();
        let current = self.indent_stack.last().copied().unwrap_or(0);

        if width > current {
            self.indent_stack.push(width);
            tokens.push(Token::Indent(loc));
        } else if width < current {
            while self.indent_stack.last().is_some_and(|&top| top > width) {
                self.indent_stack.pop();
                tokens.push(Token::Dedent(loc));
            }
            if self.indent_stack.last() != Some(&width) {
                return Err(LexError {
                    message: "Unindent does not match any outer indentation level".to_string(),
                    location: loc,
                });
            }
        }

        Ok(true)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of file".to_string(),
            location: loc,
        })?;

        match ch {
            // String literals
            '"' | '\'' => self.string_literal(ch, loc),

            // Numeric literals
            '0'..='9' => self.number_literal(ch, loc),

            // Identifiers and keywords
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword(ch, loc)),

            '+' => Ok(Token::Plus(loc)),
            '-' => Ok(Token::Minus(loc)),
            '*' => Ok(Token::Star(loc)),
            '%' => Ok(Token::Percent(loc)),
            '/' => {
                if self.peek() == Some('/') {
                    self.advance();
                    Ok(Token::SlashSlash(loc))
                } else {
                    Ok(Token::Slash(loc))
                }
            }
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::EqEq(loc))
                } else {
                    Ok(Token::Eq(loc))
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::NotEq(loc))
                } else {
                    Err(LexError {
                        message: "Unexpected character: '!'".to_string(),
                        location: loc,
                    })
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::Le(loc))
                } else {
                    Ok(Token::Lt(loc))
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::Ge(loc))
                } else {
                    Ok(Token::Gt(loc))
                }
            }
            '(' => Ok(Token::LParen(loc)),
            ')' => Ok(Token::RParen(loc)),
            ',' => Ok(Token::Comma(loc)),
            ':' => Ok(Token::Colon(loc)),

            _ => Err(LexError {
                message: format!("Unexpected character: '{}'", ch),
                location: loc,
            }),
        }
    }

    /// Parse a single- or double-quoted string literal
    fn string_literal(&mut self, quote: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut string = String::new();

        while let Some(ch) = self.peek() {
            if ch == quote {
                self.advance(); // consume closing quote
                return Ok(Token::StringLiteral(string, loc));
            }
            if ch == '\n' {
                break;
            }

            if ch == '\\' {
                self.advance();
                let escaped = self.advance().ok_or_else(|| LexError {
                    message: "Unexpected end of file in string literal".to_string(),
                    location: self.current_location(),
                })?;

                let unescaped = match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '\\' => '\\',
                    '\'' => '\'',
                    '"' => '"',
                    '0' => '\0',
                    _ => {
                        return Err(LexError {
                            message: format!("Unknown escape sequence: \\{}", escaped),
                            location: self.current_location(),
                        });
                    }
                };
                string.push(unescaped);
            } else {
                string.push(ch);
                self.advance();
            }
        }

        Err(LexError {
            message: "Unterminated string literal".to_string(),
            location: loc,
        })
    }

    /// Parse numeric literal (integers only)
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else if ch == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let value = num_str.parse::<i64>().map_err(|_| LexError {
            message: format!("Invalid integer literal: {}", num_str),
            location: loc,
        })?;

        Ok(Token::IntLiteral(value, loc))
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "if" => Token::If(loc),
            "elif" => Token::Elif(loc),
            "else" => Token::Else(loc),
            "while" => Token::While(loc),
            "def" => Token::Def(loc),
            "return" => Token::Return(loc),
            "pass" => Token::Pass(loc),
            "break" => Token::Break(loc),
            "continue" => Token::Continue(loc),
            "and" => Token::And(loc),
            "or" => Token::Or(loc),
            "not" => Token::Not(loc),
            "is" => Token::Is(loc),
            "in" => Token::In(loc),
            "True" => Token::True(loc),
            "False" => Token::False(loc),
            "None" => Token::NoneKw(loc),
            _ => Token::Ident(ident, loc),
        }
    }

    /// Skip spaces, tabs, line continuations and trailing comments.
    ///
    /// Stops in front of a newline so the caller can decide whether it ends a
    /// logical line.
    fn skip_inline_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\x0c') => {
                    self.advance();
                }
                Some('\\') if self.peek_ahead(1) == Some('\n') => {
                    self.advance();
                    self.advance();
                }
                Some('#') => self.skip_line_comment(),
                _ => break,
            }
        }
    }

    /// Skip a `#` comment, leaving the terminating newline in place
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize().unwrap()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = tokenize("x == 5\n");

        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "x"));
        assert!(matches!(tokens[1], Token::EqEq(_)));
        assert!(matches!(tokens[2], Token::IntLiteral(5, _)));
        assert!(matches!(tokens[3], Token::Newline(_)));
        assert!(matches!(tokens[4], Token::Eof(_)));
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_comparison_operators() {
        let tokens = tokenize("< <= > >= == != is not in");

        assert!(matches!(tokens[0], Token::Lt(_)));
        assert!(matches!(tokens[1], Token::Le(_)));
        assert!(matches!(tokens[2], Token::Gt(_)));
        assert!(matches!(tokens[3], Token::Ge(_)));
        assert!(matches!(tokens[4], Token::EqEq(_)));
        assert!(matches!(tokens[5], Token::NotEq(_)));
        assert!(matches!(tokens[6], Token::Is(_)));
        assert!(matches!(tokens[7], Token::Not(_)));
        assert!(matches!(tokens[8], Token::In(_)));
    }

    #[test]
    fn test_locations_are_one_based() {
        let tokens = tokenize("a = 1\nif a > 0:\n    pass\n");

        assert_eq!(tokens[0].location(), SourceLocation::new(1, 1));
        // `if` on the second line, `>` at column 6
        assert!(matches!(tokens[4], Token::If(_)));
        assert_eq!(tokens[4].location(), SourceLocation::new(2, 1));
        assert!(matches!(tokens[6], Token::Gt(_)));
        assert_eq!(tokens[6].location(), SourceLocation::new(2, 6));
    }

    #[test]
    fn test_indent_and_dedent() {
        let tokens = tokenize("if x:\n    y\nz\n");
        let kinds: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();

        assert_eq!(
            kinds,
            vec![
                "'if'",
                "identifier 'x'",
                "':'",
                "end of line",
                "indent",
                "identifier 'y'",
                "end of line",
                "dedent",
                "identifier 'z'",
                "end of line",
                "end of file",
            ]
        );
    }

    #[test]
    fn test_dedent_at_end_of_input() {
        let tokens = tokenize("while x:\n    if y:\n        pass");
        let dedents = tokens.iter().filter(|t| matches!(t, Token::Dedent(_))).count();

        assert_eq!(dedents, 2);
        assert!(matches!(tokens.last(), Some(Token::Eof(_))));
    }

    #[test]
    fn test_blank_lines_and_comments() {
        let tokens = tokenize("# header\n\nx = 1  # trailing\n\n    # indented comment\ny = 2\n");

        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "x"));
        assert!(!tokens.iter().any(|t| matches!(t, Token::Indent(_))));
        let newlines = tokens.iter().filter(|t| matches!(t, Token::Newline(_))).count();
        assert_eq!(newlines, 2);
    }

    #[test]
    fn test_newlines_inside_parentheses() {
        let tokens = tokenize("f(a,\n      b)\n");

        let newlines = tokens.iter().filter(|t| matches!(t, Token::Newline(_))).count();
        assert_eq!(newlines, 1);
        assert!(!tokens.iter().any(|t| matches!(t, Token::Indent(_))));
    }

    #[test]
    fn test_string_literal() {
        let tokens = tokenize(r#"print("x is greater than y\n", 'q')"#);

        match &tokens[2] {
            Token::StringLiteral(s, _) => assert_eq!(s, "x is greater than y\n"),
            other => panic!("Expected string literal, got {other}"),
        }
        assert!(matches!(tokens[4], Token::StringLiteral(ref s, _) if s == "q"));
    }

    #[test]
    fn test_bad_unindent() {
        let err = Lexer::new("if x:\n        y\n    z\n").tokenize().unwrap_err();

        assert!(err.message.contains("Unindent"));
        assert_eq!(err.location.line, 3);
    }

    #[test]
    fn test_bare_bang_is_rejected() {
        let err = Lexer::new("!x").tokenize().unwrap_err();
        assert_eq!(err.location, SourceLocation::new(1, 1));
    }
}
