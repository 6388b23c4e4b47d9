//! Tree traversal
//!
//! [`Visitor`] is a read-only visitor with overridable hooks; the `walk_*`
//! functions recurse into children and are what the default hooks call.
//! [`compare_slots`] is the mutable counterpart used for in-place rewriting:
//! it hands out one disjoint `&mut` operator list per comparison node.
//!
//! Both traversals are pre-order and left to right, so the n-th comparison a
//! [`Visitor`] sees is the n-th entry of [`compare_slots`]. [`CompareId`] is
//! that shared index.

use crate::syntax::ast::*;

/// Pre-order index of a comparison node within its module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompareId(pub usize);

/// Read-only visitor over a [`Module`]
pub trait Visitor {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }
}

pub fn walk_module<V: Visitor + ?Sized>(visitor: &mut V, module: &Module) {
    for stmt in &module.body {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: Visitor + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Expr { value, .. } | Stmt::Assign { value, .. } => visitor.visit_expr(value),
        Stmt::If {
            test, body, orelse, ..
        } => {
            visitor.visit_expr(test);
            for s in body.iter().chain(orelse) {
                visitor.visit_stmt(s);
            }
        }
        Stmt::While { test, body, .. } => {
            visitor.visit_expr(test);
            for s in body {
                visitor.visit_stmt(s);
            }
        }
        Stmt::FunctionDef { body, .. } => {
            for s in body {
                visitor.visit_stmt(s);
            }
        }
        Stmt::Return { value, .. } => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        Stmt::Pass { .. } | Stmt::Break { .. } | Stmt::Continue { .. } => {}
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Name(..) | Expr::Int(..) | Expr::Str(..) | Expr::Bool(..) | Expr::None(..) => {}
        Expr::BoolOp { values, .. } => {
            for v in values {
                visitor.visit_expr(v);
            }
        }
        Expr::BinOp { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        Expr::UnaryOp { operand, .. } => visitor.visit_expr(operand),
        Expr::Compare {
            left, comparators, ..
        } => {
            visitor.visit_expr(left);
            for c in comparators {
                visitor.visit_expr(c);
            }
        }
        Expr::Call { func, args, .. } => {
            visitor.visit_expr(func);
            for a in args {
                visitor.visit_expr(a);
            }
        }
    }
}

/// Mutable view of one comparison node's operators
#[derive(Debug)]
pub struct CompareSlot<'a> {
    pub location: SourceLocation,
    pub ops: &'a mut Vec<CmpOp>,
}

/// Every comparison node in `module`, indexed by [`CompareId`]
pub fn compare_slots(module: &mut Module) -> Vec<CompareSlot<'_>> {
    let mut slots = Vec::new();
    for stmt in &mut module.body {
        stmt_slots(stmt, &mut slots);
    }
    slots
}

fn stmt_slots<'a>(stmt: &'a mut Stmt, slots: &mut Vec<CompareSlot<'a>>) {
    match stmt {
        Stmt::Expr { value, .. } | Stmt::Assign { value, .. } => expr_slots(value, slots),
        Stmt::If {
            test, body, orelse, ..
        } => {
            expr_slots(test, slots);
            for s in body.iter_mut().chain(orelse.iter_mut()) {
                stmt_slots(s, slots);
            }
        }
        Stmt::While { test, body, .. } => {
            expr_slots(test, slots);
            for s in body {
                stmt_slots(s, slots);
            }
        }
        Stmt::FunctionDef { body, .. } => {
            for s in body {
                stmt_slots(s, slots);
            }
        }
        Stmt::Return { value, .. } => {
            if let Some(value) = value {
                expr_slots(value, slots);
            }
        }
        Stmt::Pass { .. } | Stmt::Break { .. } | Stmt::Continue { .. } => {}
    }
}

fn expr_slots<'a>(expr: &'a mut Expr, slots: &mut Vec<CompareSlot<'a>>) {
    match expr {
        Expr::Name(..) | Expr::Int(..) | Expr::Str(..) | Expr::Bool(..) | Expr::None(..) => {}
        Expr::BoolOp { values, .. } => {
            for v in values {
                expr_slots(v, slots);
            }
        }
        Expr::BinOp { left, right, .. } => {
            expr_slots(left, slots);
            expr_slots(right, slots);
        }
        Expr::UnaryOp { operand, .. } => expr_slots(operand, slots),
        Expr::Compare {
            left,
            ops,
            comparators,
            location,
        } => {
            slots.push(CompareSlot {
                location: *location,
                ops,
            });
            expr_slots(left, slots);
            for c in comparators {
                expr_slots(c, slots);
            }
        }
        Expr::Call { func, args, .. } => {
            expr_slots(func, slots);
            for a in args {
                expr_slots(a, slots);
            }
        }
    }
}
