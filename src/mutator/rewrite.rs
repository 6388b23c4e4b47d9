//! Operator rewrite tables
//!
//! A [`RewriteTable`] decides which operators a mutator may touch and what
//! each one becomes. Tables are total over their family and self-inverse, so
//! applying a table twice restores the original operator.

use crate::syntax::ast::CmpOp;
use std::fmt;

/// Mapping between the operators of one mutation family
pub trait RewriteTable {
    type Op: Copy + Eq + fmt::Debug;

    /// Replacement for `op`, or `None` if `op` is outside the family
    fn rewrite(&self, op: Self::Op) -> Option<Self::Op>;

    fn contains(&self, op: Self::Op) -> bool {
        self.rewrite(op).is_some()
    }
}

/// Every operator [`ComparisonTable`] rewrites
pub const COMPARATOR_FAMILY: [CmpOp; 6] = [
    CmpOp::Lt,
    CmpOp::Gt,
    CmpOp::LtE,
    CmpOp::GtE,
    CmpOp::Eq,
    CmpOp::NotEq,
];

/// Swaps each relational operator with its mirror and each equality operator
/// with its negation: `<`/`>`, `<=`/`>=`, `==`/`!=`.
///
/// Identity and membership tests (`is`, `in` and their negations) are left
/// alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparisonTable;

impl RewriteTable for ComparisonTable {
    type Op = CmpOp;

    fn rewrite(&self, op: CmpOp) -> Option<CmpOp> {
        match op {
            CmpOp::Lt => Some(CmpOp::Gt),
            CmpOp::Gt => Some(CmpOp::Lt),
            CmpOp::LtE => Some(CmpOp::GtE),
            CmpOp::GtE => Some(CmpOp::LtE),
            CmpOp::Eq => Some(CmpOp::NotEq),
            CmpOp::NotEq => Some(CmpOp::Eq),
            CmpOp::Is | CmpOp::IsNot | CmpOp::In | CmpOp::NotIn => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_involution() {
        let table = ComparisonTable;
        for op in COMPARATOR_FAMILY {
            let flipped = table.rewrite(op).unwrap();
            assert_ne!(flipped, op);
            assert_eq!(table.rewrite(flipped), Some(op));
        }
    }

    #[test]
    fn test_bijection_on_family() {
        let table = ComparisonTable;
        let image: FxHashSet<CmpOp> = COMPARATOR_FAMILY
            .iter()
            .map(|&op| table.rewrite(op).unwrap())
            .collect();
        let family: FxHashSet<CmpOp> = COMPARATOR_FAMILY.into_iter().collect();

        assert_eq!(image, family);
    }

    #[test]
    fn test_identity_and_membership_are_outside_family() {
        let table = ComparisonTable;
        for op in [CmpOp::Is, CmpOp::IsNot, CmpOp::In, CmpOp::NotIn] {
            assert!(!table.contains(op));
        }
        assert!(table.contains(CmpOp::LtE));
    }
}
