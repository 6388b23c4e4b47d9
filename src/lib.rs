//! # Introduction
//!
//! bugseed injects comparison-operator bugs into parsed programs for mutation
//! testing. Given a tree and a count, it flips randomly chosen comparison
//! operators (`<` ↔ `>`, `<=` ↔ `>=`, `==` ↔ `!=`) and reports every change,
//! so a test suite can be scored on whether it notices.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → Module → Mutator → (mutated Module, BugRecords) → Render
//! ```
//!
//! 1. [`syntax`]: tokenises Python-like source and builds a [`syntax::ast::Module`];
//!    renders trees back to text.
//! 2. [`mutator::collect`]: finds every mappable comparison operator.
//! 3. [`mutator::select`]: draws the requested number of candidates with a
//!    seedable generator.
//! 4. [`mutator::comparison`]: rewrites the drawn comparisons in place and
//!    records a [`mutator::BugRecord`] per flipped operator.
//!
//! ## Example
//!
//! ```
//! use bugseed::mutator::comparison::ComparisonMutator;
//! use bugseed::mutator::Mutator;
//! use bugseed::syntax::{parse::parse, render::to_source};
//!
//! let mut tree = parse("if x > y:\n    print(x)\n").unwrap();
//! let result = ComparisonMutator::with_seed(0).apply(&mut tree, 1).unwrap();
//!
//! assert_eq!(result.records.len(), 1);
//! assert_eq!(to_source(result.tree), "if x < y:\n    print(x)\n");
//! ```

pub mod mutator;
pub mod syntax;
