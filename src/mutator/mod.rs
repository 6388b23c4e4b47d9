//! Mutation engine
//!
//! A mutator rewrites operators of one family inside a parsed [`Module`] and
//! reports every change it made:
//! - [`rewrite`]: operator tables (what may change, and into what)
//! - [`collect`]: candidate discovery over the tree
//! - [`select`]: reproducible random selection of candidates
//! - [`comparison`]: the comparison-operator mutator
//!
//! # Pipeline
//!
//! ```text
//! Module → collect → pool → select(num_errors) → rewrite in place → BugRecords
//! ```
//!
//! Every precondition is checked before the first write, so a failed
//! [`Mutator::apply`] leaves the tree exactly as it was.

pub mod collect;
pub mod comparison;
pub mod rewrite;
pub mod select;

use crate::syntax::ast::{CmpOp, Module, SourceLocation};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors returned by [`Mutator::apply`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// The tree holds nothing this mutator can rewrite
    #[error("No candidates found")]
    NoCandidates,

    /// More mutations were requested than the tree has candidates
    #[error(
        "Number of errors is greater than number of candidates, errors:{requested}, candidates:{available}"
    )]
    InvalidArgument { requested: usize, available: usize },
}

/// One operator substitution performed by a mutator.
///
/// `line`/`col` are the location of the rewritten comparison node, exactly
/// as the parser reported it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BugRecord {
    pub line: usize,
    #[serde(rename = "col")]
    pub column: usize,
    #[serde(rename = "original_op")]
    pub original: CmpOp,
    #[serde(rename = "injected_op")]
    pub injected: CmpOp,
}

impl BugRecord {
    pub fn new(location: SourceLocation, original: CmpOp, injected: CmpOp) -> Self {
        Self {
            line: location.line,
            column: location.column,
            original,
            injected,
        }
    }

    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

impl fmt::Display for BugRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {}: {} replaced by {}",
            self.line, self.column, self.original, self.injected
        )
    }
}

/// The mutated tree together with what was done to it
#[derive(Debug)]
pub struct MutationResult<'t> {
    pub tree: &'t Module,
    pub records: Vec<BugRecord>,
}

impl MutationResult<'_> {
    pub fn into_records(self) -> Vec<BugRecord> {
        self.records
    }
}

/// Settings a driver hands to a mutator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    /// Number of candidates to draw
    pub num_errors: usize,
    /// Fixed seed for reproducible runs; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            num_errors: 1,
            seed: None,
        }
    }
}

/// A kind of mutation that can be injected into a tree.
///
/// Implementations own their rewrite table and candidate predicate. The trait
/// is object safe, so drivers can hold a `Vec<Box<dyn Mutator>>` and run
/// every kind the same way.
pub trait Mutator {
    /// Stable identifier used in reports
    fn name(&self) -> &'static str;

    /// Rewrite `num_errors` randomly drawn candidates of `tree` in place.
    ///
    /// `num_errors` bounds the number of drawn candidates, not the number of
    /// records: one drawn node may yield several records.
    fn apply<'t>(&self, tree: &'t mut Module, num_errors: usize) -> Result<MutationResult<'t>, MutationError>;
}
