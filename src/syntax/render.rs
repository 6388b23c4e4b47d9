//! Tree → source rendering
//!
//! Produces source text that parses back to an equal tree (modulo locations).
//! Parentheses are emitted only where operator precedence requires them, so
//! the output of an unmodified tree is a normalized form of its input.

use crate::syntax::ast::*;
use std::fmt::Write;

const INDENT: &str = "    ";

/// Binding strength, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Or,
    And,
    Not,
    Compare,
    Arithmetic,
    Term,
    Unary,
    Atom,
}

impl Precedence {
    fn next(self) -> Self {
        match self {
            Precedence::Lowest => Precedence::Or,
            Precedence::Or => Precedence::And,
            Precedence::And => Precedence::Not,
            Precedence::Not => Precedence::Compare,
            Precedence::Compare => Precedence::Arithmetic,
            Precedence::Arithmetic => Precedence::Term,
            Precedence::Term => Precedence::Unary,
            Precedence::Unary | Precedence::Atom => Precedence::Atom,
        }
    }
}

/// Render a whole module, one statement per line
pub fn to_source(module: &Module) -> String {
    let mut out = String::new();
    write_block(&mut out, &module.body, 0);
    out
}

/// Render a single expression
pub fn expr_to_source(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr, Precedence::Lowest);
    out
}

fn write_block(out: &mut String, stmts: &[Stmt], depth: usize) {
    if stmts.is_empty() {
        write_line(out, depth, "pass");
        return;
    }
    for stmt in stmts {
        write_stmt(out, stmt, depth);
    }
}

fn write_line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(text);
    out.push('\n');
}

fn write_stmt(out: &mut String, stmt: &Stmt, depth: usize) {
    match stmt {
        Stmt::Expr { value, .. } => write_line(out, depth, &expr_to_source(value)),
        Stmt::Assign { target, value, .. } => {
            write_line(out, depth, &format!("{} = {}", target, expr_to_source(value)));
        }
        Stmt::If { .. } => write_if(out, stmt, depth, "if"),
        Stmt::While { test, body, .. } => {
            write_line(out, depth, &format!("while {}:", expr_to_source(test)));
            write_block(out, body, depth + 1);
        }
        Stmt::FunctionDef {
            name, params, body, ..
        } => {
            write_line(out, depth, &format!("def {}({}):", name, params.join(", ")));
            write_block(out, body, depth + 1);
        }
        Stmt::Return { value: None, .. } => write_line(out, depth, "return"),
        Stmt::Return {
            value: Some(value), ..
        } => write_line(out, depth, &format!("return {}", expr_to_source(value))),
        Stmt::Pass { .. } => write_line(out, depth, "pass"),
        Stmt::Break { .. } => write_line(out, depth, "break"),
        Stmt::Continue { .. } => write_line(out, depth, "continue"),
    }
}

/// `else` holding exactly one `if` is rendered back as `elif`
fn write_if(out: &mut String, stmt: &Stmt, depth: usize, keyword: &str) {
    let Stmt::If {
        test, body, orelse, ..
    } = stmt
    else {
        return write_stmt(out, stmt, depth);
    };

    write_line(out, depth, &format!("{} {}:", keyword, expr_to_source(test)));
    write_block(out, body, depth + 1);

    match orelse.as_slice() {
        [] => {}
        [nested @ Stmt::If { .. }] => write_if(out, nested, depth, "elif"),
        _ => {
            write_line(out, depth, "else:");
            write_block(out, orelse, depth + 1);
        }
    }
}

fn write_expr(out: &mut String, expr: &Expr, min: Precedence) {
    let own = precedence(expr);
    let wrap = own < min;
    if wrap {
        out.push('(');
    }

    match expr {
        Expr::Name(name, _) => out.push_str(name),
        Expr::Int(n, _) => {
            let _ = write!(out, "{}", n);
        }
        Expr::Str(s, _) => write_string(out, s),
        Expr::Bool(true, _) => out.push_str("True"),
        Expr::Bool(false, _) => out.push_str("False"),
        Expr::None(_) => out.push_str("None"),
        Expr::BoolOp { op, values, .. } => {
            let sep = match op {
                BoolOp::And => " and ",
                BoolOp::Or => " or ",
            };
            for (i, v) in values.iter().enumerate() {
                if i > 0 {
                    out.push_str(sep);
                }
                write_expr(out, v, own.next());
            }
        }
        Expr::BinOp {
            left, op, right, ..
        } => {
            write_expr(out, left, own);
            out.push_str(match op {
                BinOp::Add => " + ",
                BinOp::Sub => " - ",
                BinOp::Mul => " * ",
                BinOp::Div => " / ",
                BinOp::FloorDiv => " // ",
                BinOp::Mod => " % ",
            });
            write_expr(out, right, own.next());
        }
        Expr::UnaryOp {
            op: UnaryOp::Not,
            operand,
            ..
        } => {
            out.push_str("not ");
            write_expr(out, operand, own);
        }
        Expr::UnaryOp {
            op: UnaryOp::Neg,
            operand,
            ..
        } => {
            out.push('-');
            write_expr(out, operand, own);
        }
        Expr::Compare {
            left,
            ops,
            comparators,
            ..
        } => {
            write_expr(out, left, own.next());
            for (op, c) in ops.iter().zip(comparators) {
                let _ = write!(out, " {} ", op.symbol());
                write_expr(out, c, own.next());
            }
        }
        Expr::Call { func, args, .. } => {
            write_expr(out, func, Precedence::Atom);
            out.push('(');
            for (i, a) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(out, a, Precedence::Lowest);
            }
            out.push(')');
        }
    }

    if wrap {
        out.push(')');
    }
}

fn precedence(expr: &Expr) -> Precedence {
    match expr {
        Expr::BoolOp { op: BoolOp::Or, .. } => Precedence::Or,
        Expr::BoolOp {
            op: BoolOp::And, ..
        } => Precedence::And,
        Expr::UnaryOp {
            op: UnaryOp::Not, ..
        } => Precedence::Not,
        Expr::Compare { .. } => Precedence::Compare,
        Expr::BinOp {
            op: BinOp::Add | BinOp::Sub,
            ..
        } => Precedence::Arithmetic,
        Expr::BinOp { .. } => Precedence::Term,
        Expr::UnaryOp {
            op: UnaryOp::Neg, ..
        } => Precedence::Unary,
        Expr::Name(..)
        | Expr::Int(..)
        | Expr::Str(..)
        | Expr::Bool(..)
        | Expr::None(..)
        | Expr::Call { .. } => Precedence::Atom,
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse::parse;

    fn roundtrip(source: &str) -> String {
        to_source(&parse(source).unwrap())
    }

    #[test]
    fn test_normalized_output() {
        let source = "if x>y :\n  print( 'x is greater than y' )\nelse:\n  print(\"no\")\n";
        assert_eq!(
            roundtrip(source),
            "if x > y:\n    print(\"x is greater than y\")\nelse:\n    print(\"no\")\n"
        );
    }

    #[test]
    fn test_elif_chain() {
        let source = "if a == 1:\n    pass\nelif a == 2:\n    pass\nelse:\n    a = 0\n";
        assert_eq!(roundtrip(source), source);
    }

    #[test]
    fn test_parentheses_only_where_needed() {
        assert_eq!(roundtrip("(a + b) * c\n"), "(a + b) * c\n");
        assert_eq!(roundtrip("a + (b * c)\n"), "a + b * c\n");
        assert_eq!(roundtrip("a - (b - c)\n"), "a - (b - c)\n");
        assert_eq!(roundtrip("(a < b) == c\n"), "(a < b) == c\n");
        assert_eq!(roundtrip("not (a or b)\n"), "not (a or b)\n");
        assert_eq!(roundtrip("a < b < c\n"), "a < b < c\n");
    }

    #[test]
    fn test_rendered_source_parses_to_same_shape() {
        let source = "def f(x, y):\n    while x is not None and y not in x:\n        x = -x // 2\n    return f(x)(y) >= 0\n";
        let rendered = roundtrip(source);
        assert_eq!(rendered, source);
        assert_eq!(roundtrip(&rendered), rendered);
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(roundtrip("s = 'a\\n\"b\"'\n"), "s = \"a\\n\\\"b\\\"\"\n");
    }
}
