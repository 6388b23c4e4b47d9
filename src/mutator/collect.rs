//! Candidate collection
//!
//! One read-only pass over the tree registers a [`Candidate`] for every
//! mappable operator occurrence. A comparison holding k mappable operators is
//! registered k times; the entries share the node's [`CompareId`].

use crate::mutator::rewrite::RewriteTable;
use crate::syntax::ast::{CmpOp, Expr, Module, SourceLocation};
use crate::syntax::visit::{walk_expr, walk_module, CompareId, Visitor};
use tracing::trace;

/// A comparison node eligible for mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub node: CompareId,
    pub location: SourceLocation,
    /// Mappable operators the node held at collection time, in chain order
    pub operators: Vec<CmpOp>,
    /// Position in the node's chain of the occurrence this entry stands for
    pub occurrence: usize,
}

struct CandidateCollector<'t, T> {
    table: &'t T,
    next_id: usize,
    candidates: Vec<Candidate>,
}

impl<T: RewriteTable<Op = CmpOp>> Visitor for CandidateCollector<'_, T> {
    fn visit_expr(&mut self, expr: &Expr) {
        if let Expr::Compare { ops, location, .. } = expr {
            let node = CompareId(self.next_id);
            self.next_id += 1;

            let operators: Vec<CmpOp> = ops
                .iter()
                .copied()
                .filter(|&op| self.table.contains(op))
                .collect();

            for (occurrence, &op) in ops.iter().enumerate() {
                if !self.table.contains(op) {
                    continue;
                }
                trace!(
                    node = node.0,
                    line = location.line,
                    col = location.column,
                    op = %op,
                    "comparison candidate"
                );
                self.candidates.push(Candidate {
                    node,
                    location: *location,
                    operators: operators.clone(),
                    occurrence,
                });
            }
        }
        walk_expr(self, expr);
    }
}

/// Collect every mappable operator occurrence in traversal order
pub fn collect_candidates<T>(module: &Module, table: &T) -> Vec<Candidate>
where
    T: RewriteTable<Op = CmpOp>,
{
    let mut collector = CandidateCollector {
        table,
        next_id: 0,
        candidates: Vec::new(),
    };
    walk_module(&mut collector, module);
    collector.candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutator::rewrite::ComparisonTable;
    use crate::syntax::parse::parse;

    fn collect(source: &str) -> Vec<Candidate> {
        let module = parse(source).unwrap();
        collect_candidates(&module, &ComparisonTable)
    }

    #[test]
    fn test_one_candidate_per_occurrence() {
        let pool = collect("x == 5\ny != 10\nif x > y:\n    pass\n");

        assert_eq!(pool.len(), 3);
        let nodes: Vec<usize> = pool.iter().map(|c| c.node.0).collect();
        assert_eq!(nodes, vec![0, 1, 2]);
        assert_eq!(pool[2].location, SourceLocation::new(3, 4));
        assert_eq!(pool[2].operators, vec![CmpOp::Gt]);
    }

    #[test]
    fn test_chained_comparison_registers_each_occurrence() {
        let pool = collect("a < b < c\n");

        assert_eq!(pool.len(), 2);
        assert_eq!(pool[0].node, pool[1].node);
        assert_eq!(pool[0].occurrence, 0);
        assert_eq!(pool[1].occurrence, 1);
        assert_eq!(pool[0].operators, vec![CmpOp::Lt, CmpOp::Lt]);
    }

    #[test]
    fn test_unmappable_operators_are_skipped() {
        let pool = collect("a is b\nx in xs\nq is not None < r\n");

        // Only the `<` in the last chain qualifies
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].node, CompareId(2));
        assert_eq!(pool[0].occurrence, 1);
        assert_eq!(pool[0].operators, vec![CmpOp::Lt]);
    }

    #[test]
    fn test_boolean_only_tree_yields_empty_pool() {
        let pool = collect("ready = a and b or not c\nwhile ready:\n    ready = False\n");
        assert!(pool.is_empty());
    }

    #[test]
    fn test_collection_does_not_modify_tree() {
        let module = parse("if a <= b:\n    pass\n").unwrap();
        let before = module.clone();
        let _ = collect_candidates(&module, &ComparisonTable);
        assert_eq!(module, before);
    }
}
