//! Source front end for the mutation engine
//!
//! This module turns program text into the tree the mutators operate on, and
//! the tree back into text:
//! - [`lexer`]: Tokenization (source text → tokens, including layout tokens)
//! - [`parse`]: Parsing (tokens → [`ast::Module`])
//! - [`ast`]: Tree node definitions
//! - [`visit`]: Pre-order traversal, read-only and for in-place rewriting
//! - [`render`]: Rendering (tree → normalized source text)
//!
//! # Supported Language
//!
//! An indentation-structured, Python-like subset:
//! - Statements: expressions, `name = expr`, `if`/`elif`/`else`, `while`,
//!   `def`, `return`, `pass`, `break`, `continue`
//! - Expressions: `and`/`or`/`not`, chained comparisons
//!   (`== != < <= > >= is, is not, in, not in`), `+ - * / // %`, unary `-`,
//!   calls, names, integers, strings, `True`/`False`/`None`
//!
//! Locations are 1-based lines and columns.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod render;
mod statements;
pub mod visit;
