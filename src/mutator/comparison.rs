//! Comparison-operator mutator
//!
//! Injects "incorrect comparison operator" bugs: `<` becomes `>`, `<=`
//! becomes `>=`, `==` becomes `!=`, and back.
//!
//! Candidates are counted per operator occurrence but rewritten per node: when
//! a chained comparison such as `a < b < c` is drawn, every mappable operator
//! in the chain flips together and each flip gets its own [`BugRecord`]. A
//! node that is drawn again through a sibling occurrence in the same call is
//! not flipped a second time.

use crate::mutator::collect::{collect_candidates, Candidate};
use crate::mutator::rewrite::{ComparisonTable, RewriteTable};
use crate::mutator::select::Selector;
use crate::mutator::{BugRecord, MutationConfig, MutationError, MutationResult, Mutator};
use crate::syntax::ast::{CmpOp, Module};
use crate::syntax::visit::compare_slots;
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

/// Mutator for the comparator family
#[derive(Debug, Clone, Default)]
pub struct ComparisonMutator {
    table: ComparisonTable,
    seed: Option<u64>,
}

impl ComparisonMutator {
    /// Entropy-seeded: repeated calls draw different candidates
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call draws the same candidates for the same tree
    pub fn with_seed(seed: u64) -> Self {
        Self {
            table: ComparisonTable,
            seed: Some(seed),
        }
    }

    pub fn from_config(config: &MutationConfig) -> Self {
        Self {
            table: ComparisonTable,
            seed: config.seed,
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Mutator for ComparisonMutator {
    fn name(&self) -> &'static str {
        "incorrect_comparison_operator"
    }

    fn apply<'t>(&self, tree: &'t mut Module, num_errors: usize) -> Result<MutationResult<'t>, MutationError> {
        let pool = collect_candidates(tree, &self.table);
        debug!(
            mutator = self.name(),
            pool = pool.len(),
            num_errors,
            "collected candidates"
        );

        let selected = Selector::new(self.seed).select(pool, num_errors)?;
        let records = rewrite_selected(tree, &selected, &self.table);
        debug!(
            mutator = self.name(),
            selected = selected.len(),
            records = records.len(),
            "mutation applied"
        );

        Ok(MutationResult {
            tree: &*tree,
            records,
        })
    }
}

/// Flip every mappable operator of each selected node, in selection order
fn rewrite_selected<T>(tree: &mut Module, selected: &[Candidate], table: &T) -> Vec<BugRecord>
where
    T: RewriteTable<Op = CmpOp>,
{
    let mut slots = compare_slots(tree);
    let mut rewritten = FxHashSet::default();
    let mut records = Vec::new();

    for candidate in selected {
        if !rewritten.insert(candidate.node) {
            continue;
        }
        let Some(slot) = slots.get_mut(candidate.node.0) else {
            warn!(node = candidate.node.0, "candidate refers to a missing comparison");
            continue;
        };

        for op in slot.ops.iter_mut() {
            let Some(injected) = table.rewrite(*op) else {
                continue;
            };
            let record = BugRecord::new(slot.location, *op, injected);
            debug!(
                line = record.line,
                col = record.column,
                original = %record.original,
                injected = %record.injected,
                "injected comparison operator"
            );
            *op = injected;
            records.push(record);
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::ast::{Expr, SourceLocation, Stmt};
    use crate::syntax::parse::parse;
    use crate::syntax::visit::CompareId;

    fn ops_of(stmt: &Stmt) -> Vec<CmpOp> {
        match stmt {
            Stmt::Expr {
                value: Expr::Compare { ops, .. },
                ..
            } => ops.clone(),
            other => panic!("Expected comparison statement, got {other:?}"),
        }
    }

    fn candidate(node: usize, occurrence: usize) -> Candidate {
        Candidate {
            node: CompareId(node),
            location: SourceLocation::new(1, 1),
            operators: Vec::new(),
            occurrence,
        }
    }

    #[test]
    fn test_rewrite_selected_flips_whole_chain() {
        let mut tree = parse("a < b <= c\n").unwrap();
        let records = rewrite_selected(&mut tree, &[candidate(0, 1)], &ComparisonTable);

        assert_eq!(ops_of(&tree.body[0]), vec![CmpOp::Gt, CmpOp::GtE]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].original, CmpOp::Lt);
        assert_eq!(records[1].original, CmpOp::LtE);
    }

    #[test]
    fn test_rewrite_selected_leaves_unmappable_operators() {
        let mut tree = parse("a is b == c\n").unwrap();
        let records = rewrite_selected(&mut tree, &[candidate(0, 1)], &ComparisonTable);

        assert_eq!(ops_of(&tree.body[0]), vec![CmpOp::Is, CmpOp::NotEq]);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_node_drawn_twice_flips_once() {
        let mut tree = parse("a < b < c\n").unwrap();
        let records = rewrite_selected(
            &mut tree,
            &[candidate(0, 1), candidate(0, 0)],
            &ComparisonTable,
        );

        assert_eq!(ops_of(&tree.body[0]), vec![CmpOp::Gt, CmpOp::Gt]);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_records_follow_selection_order() {
        let mut tree = parse("x == 1\ny < 2\n").unwrap();
        let records = rewrite_selected(
            &mut tree,
            &[candidate(1, 0), candidate(0, 0)],
            &ComparisonTable,
        );

        assert_eq!(records[0].line, 2);
        assert_eq!(records[1].line, 1);
    }

    #[test]
    fn test_apply_reports_seed_and_name() {
        let mutator = ComparisonMutator::from_config(&MutationConfig {
            num_errors: 2,
            seed: Some(5),
        });
        assert_eq!(mutator.seed(), Some(5));
        assert_eq!(mutator.name(), "incorrect_comparison_operator");
        assert_eq!(ComparisonMutator::new().seed(), None);
    }

    #[test]
    fn test_failed_apply_leaves_tree_untouched() {
        let mut tree = parse("if x > y:\n    pass\n").unwrap();
        let before = tree.clone();

        let err = ComparisonMutator::with_seed(3).apply(&mut tree, 2).unwrap_err();

        assert_eq!(
            err,
            MutationError::InvalidArgument {
                requested: 2,
                available: 1
            }
        );
        assert_eq!(tree, before);
    }
}
