// Syntax tree definitions for the mutation front end

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source location of a node, 1-based in both line and column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Comparison operators that may appear in a [`Expr::Compare`] chain.
///
/// The serialized names are the operator class names used in mutation
/// reports (`Lt`, `GtE`, `NotEq`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

impl CmpOp {
    /// Report name of the operator
    pub fn name(self) -> &'static str {
        match self {
            CmpOp::Eq => "Eq",
            CmpOp::NotEq => "NotEq",
            CmpOp::Lt => "Lt",
            CmpOp::LtE => "LtE",
            CmpOp::Gt => "Gt",
            CmpOp::GtE => "GtE",
            CmpOp::Is => "Is",
            CmpOp::IsNot => "IsNot",
            CmpOp::In => "In",
            CmpOp::NotIn => "NotIn",
        }
    }

    /// Source spelling of the operator
    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::NotEq => "!=",
            CmpOp::Lt => "<",
            CmpOp::LtE => "<=",
            CmpOp::Gt => ">",
            CmpOp::GtE => ">=",
            CmpOp::Is => "is",
            CmpOp::IsNot => "is not",
            CmpOp::In => "in",
            CmpOp::NotIn => "not in",
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
}

/// Short-circuit boolean operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not, // not x
    Neg, // -x
}

/// Expression nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Name(String, SourceLocation),
    Int(i64, SourceLocation),
    Str(String, SourceLocation),
    Bool(bool, SourceLocation),
    None(SourceLocation),
    BoolOp {
        op: BoolOp,
        values: Vec<Expr>,
        location: SourceLocation,
    },
    BinOp {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
        location: SourceLocation,
    },
    UnaryOp {
        op: UnaryOp,
        operand: Box<Expr>,
        location: SourceLocation,
    },
    /// `left ops[0] comparators[0] ops[1] comparators[1] ...`
    ///
    /// `ops` and `comparators` always have the same length.
    Compare {
        left: Box<Expr>,
        ops: Vec<CmpOp>,
        comparators: Vec<Expr>,
        location: SourceLocation,
    },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        location: SourceLocation,
    },
}

impl Expr {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::Name(_, loc)
            | Expr::Int(_, loc)
            | Expr::Str(_, loc)
            | Expr::Bool(_, loc)
            | Expr::None(loc) => *loc,
            Expr::BoolOp { location, .. }
            | Expr::BinOp { location, .. }
            | Expr::UnaryOp { location, .. }
            | Expr::Compare { location, .. }
            | Expr::Call { location, .. } => *location,
        }
    }
}

/// Statement nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr {
        value: Expr,
        location: SourceLocation,
    },
    Assign {
        target: String,
        value: Expr,
        location: SourceLocation,
    },
    /// `elif` chains are nested `If` nodes in `orelse`
    If {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
        location: SourceLocation,
    },
    While {
        test: Expr,
        body: Vec<Stmt>,
        location: SourceLocation,
    },
    FunctionDef {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
        location: SourceLocation,
    },
    Return {
        value: Option<Expr>,
        location: SourceLocation,
    },
    Pass {
        location: SourceLocation,
    },
    Break {
        location: SourceLocation,
    },
    Continue {
        location: SourceLocation,
    },
}

impl Stmt {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            Stmt::Expr { location, .. }
            | Stmt::Assign { location, .. }
            | Stmt::If { location, .. }
            | Stmt::While { location, .. }
            | Stmt::FunctionDef { location, .. }
            | Stmt::Return { location, .. }
            | Stmt::Pass { location }
            | Stmt::Break { location }
            | Stmt::Continue { location } => *location,
        }
    }
}

/// Root of a parsed program
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Module {
    pub body: Vec<Stmt>,
}

impl Module {
    pub fn new(body: Vec<Stmt>) -> Self {
        Module { body }
    }
}
