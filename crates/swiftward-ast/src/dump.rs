//! Indented tree dumps for debugging and snapshot tests.

use std::fmt::Write;

use crate::arena::SwiftAst;
use crate::expr::{ExprKind, Literal, PostfixOp, SizeOfTarget};
use crate::stmt::{Pattern, StmtKind};
use crate::{ExprId, StmtId};

/// Renders an expression subtree, one node per line, two-space indentation.
/// Resolved types are appended as `-> T`.
pub fn dump_expr(ast: &SwiftAst, id: ExprId) -> String {
    let mut out = String::new();
    write_expr(ast, id, 0, None, &mut out);
    out.truncate(out.trim_end().len());
    out
}

/// Statement counterpart of [`dump_expr`].
pub fn dump_stmt(ast: &SwiftAst, id: StmtId) -> String {
    let mut out = String::new();
    write_stmt(ast, id, 0, &mut out);
    out.truncate(out.trim_end().len());
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn header(ast: &SwiftAst, id: ExprId, label: Option<&str>, text: &str) -> String {
    let mut line = String::new();
    if let Some(label) = label {
        line.push_str(label);
        line.push_str(": ");
    }
    line.push_str(text);
    if let Some(ty) = ast.resolved_type(id) {
        let _ = write!(line, " -> {ty}");
    }
    line
}

fn write_expr(ast: &SwiftAst, id: ExprId, depth: usize, label: Option<&str>, out: &mut String) {
    indent(out, depth);
    match ast.expr_kind(id) {
        ExprKind::Identifier(name) => {
            let _ = writeln!(out, "{}", header(ast, id, label, &format!("Identifier `{name}`")));
        }
        ExprKind::Constant(literal) => {
            let text = match literal {
                Literal::Integer(v) => format!("Constant {v}"),
                Literal::Float(v) => format!("Constant {v:?}"),
                Literal::String(v) => format!("Constant {v:?}"),
                Literal::Boolean(v) => format!("Constant {v}"),
                Literal::Nil => "Constant nil".to_string(),
            };
            let _ = writeln!(out, "{}", header(ast, id, label, &text));
        }
        ExprKind::ArrayLiteral(items) => {
            let _ = writeln!(out, "{}", header(ast, id, label, "ArrayLiteral"));
            for item in items {
                write_expr(ast, *item, depth + 1, None, out);
            }
        }
        ExprKind::DictionaryLiteral(pairs) => {
            let _ = writeln!(out, "{}", header(ast, id, label, "DictionaryLiteral"));
            for (key, value) in pairs {
                write_expr(ast, *key, depth + 1, Some("key"), out);
                write_expr(ast, *value, depth + 1, Some("value"), out);
            }
        }
        ExprKind::Unary { op, operand } => {
            let _ = writeln!(out, "{}", header(ast, id, label, &format!("Unary `{}`", op.symbol())));
            write_expr(ast, *operand, depth + 1, None, out);
        }
        ExprKind::Binary { lhs, op, rhs } => {
            let _ = writeln!(out, "{}", header(ast, id, label, &format!("Binary `{}`", op.symbol())));
            write_expr(ast, *lhs, depth + 1, None, out);
            write_expr(ast, *rhs, depth + 1, None, out);
        }
        ExprKind::Ternary {
            condition,
            if_true,
            if_false,
        } => {
            let _ = writeln!(out, "{}", header(ast, id, label, "Ternary"));
            write_expr(ast, *condition, depth + 1, Some("if"), out);
            write_expr(ast, *if_true, depth + 1, Some("then"), out);
            write_expr(ast, *if_false, depth + 1, Some("else"), out);
        }
        ExprKind::Assignment { lhs, op, rhs } => {
            let _ = writeln!(
                out,
                "{}",
                header(ast, id, label, &format!("Assignment `{}`", op.symbol()))
            );
            write_expr(ast, *lhs, depth + 1, None, out);
            write_expr(ast, *rhs, depth + 1, None, out);
        }
        ExprKind::Cast { expr, to, optional } => {
            let keyword = if *optional { "as?" } else { "as" };
            let _ = writeln!(out, "{}", header(ast, id, label, &format!("Cast `{keyword} {to}`")));
            write_expr(ast, *expr, depth + 1, None, out);
        }
        ExprKind::TypeCheck { expr, ty } => {
            let _ = writeln!(out, "{}", header(ast, id, label, &format!("TypeCheck `is {ty}`")));
            write_expr(ast, *expr, depth + 1, None, out);
        }
        ExprKind::Parens(inner) => {
            let _ = writeln!(out, "{}", header(ast, id, label, "Parens"));
            write_expr(ast, *inner, depth + 1, None, out);
        }
        ExprKind::Postfix { base, op } => match op {
            PostfixOp::Member {
                name,
                optional_access,
            } => {
                let marker = if *optional_access { "?." } else { "." };
                let _ = writeln!(
                    out,
                    "{}",
                    header(ast, id, label, &format!("Member `{marker}{name}`"))
                );
                write_expr(ast, *base, depth + 1, None, out);
            }
            PostfixOp::Call { arguments } => {
                let _ = writeln!(out, "{}", header(ast, id, label, "Call"));
                write_expr(ast, *base, depth + 1, None, out);
                for argument in arguments {
                    write_expr(ast, argument.value, depth + 1, argument.label.as_deref(), out);
                }
            }
            PostfixOp::Subscript {
                index,
                optional_access,
            } => {
                let text = if *optional_access {
                    "Subscript `?[]`"
                } else {
                    "Subscript `[]`"
                };
                let _ = writeln!(out, "{}", header(ast, id, label, text));
                write_expr(ast, *base, depth + 1, None, out);
                write_expr(ast, *index, depth + 1, Some("index"), out);
            }
        },
        ExprKind::Closure {
            parameters,
            return_type,
            body,
        } => {
            let params: Vec<String> = parameters
                .iter()
                .map(|p| format!("{}: {}", p.name, p.ty))
                .collect();
            let _ = writeln!(
                out,
                "{}",
                header(
                    ast,
                    id,
                    label,
                    &format!("Closure ({}) -> {return_type}", params.join(", "))
                )
            );
            write_stmt(ast, *body, depth + 1, out);
        }
        ExprKind::SizeOf(target) => match target {
            SizeOfTarget::Type(ty) => {
                let _ = writeln!(out, "{}", header(ast, id, label, &format!("SizeOf `{ty}`")));
            }
            SizeOfTarget::Expression(expr) => {
                let _ = writeln!(out, "{}", header(ast, id, label, "SizeOf"));
                write_expr(ast, *expr, depth + 1, None, out);
            }
        },
        ExprKind::Unknown(context) => {
            let _ = writeln!(out, "{}", header(ast, id, label, &format!("Unknown {context:?}")));
        }
    }
}

fn write_pattern(pattern: &Pattern, ast: &SwiftAst) -> String {
    match pattern {
        Pattern::Identifier(name) => name.clone(),
        Pattern::Wildcard => "_".to_string(),
        Pattern::Tuple(elements) => {
            let parts: Vec<String> = elements.iter().map(|p| write_pattern(p, ast)).collect();
            format!("({})", parts.join(", "))
        }
        Pattern::Expression(_) => "<expr>".to_string(),
    }
}

fn write_stmt(ast: &SwiftAst, id: StmtId, depth: usize, out: &mut String) {
    indent(out, depth);
    match ast.stmt_kind(id) {
        StmtKind::Compound(stmts) => {
            let _ = writeln!(out, "Compound");
            for stmt in stmts {
                write_stmt(ast, *stmt, depth + 1, out);
            }
        }
        StmtKind::If {
            condition,
            binding,
            body,
            else_body,
        } => {
            match binding {
                Some(pattern) => {
                    let _ = writeln!(out, "If let {}", write_pattern(pattern, ast));
                }
                None => {
                    let _ = writeln!(out, "If");
                }
            }
            write_expr(ast, *condition, depth + 1, Some("cond"), out);
            write_stmt(ast, *body, depth + 1, out);
            if let Some(else_body) = else_body {
                indent(out, depth);
                let _ = writeln!(out, "Else");
                write_stmt(ast, *else_body, depth + 1, out);
            }
        }
        StmtKind::While { condition, body } => {
            let _ = writeln!(out, "While");
            write_expr(ast, *condition, depth + 1, Some("cond"), out);
            write_stmt(ast, *body, depth + 1, out);
        }
        StmtKind::RepeatWhile { condition, body } => {
            let _ = writeln!(out, "RepeatWhile");
            write_expr(ast, *condition, depth + 1, Some("cond"), out);
            write_stmt(ast, *body, depth + 1, out);
        }
        StmtKind::For {
            pattern,
            iterated,
            body,
        } => {
            let _ = writeln!(out, "For {}", write_pattern(pattern, ast));
            write_expr(ast, *iterated, depth + 1, Some("in"), out);
            write_stmt(ast, *body, depth + 1, out);
        }
        StmtKind::Switch {
            scrutinee,
            cases,
            default,
        } => {
            let _ = writeln!(out, "Switch");
            write_expr(ast, *scrutinee, depth + 1, Some("over"), out);
            for case in cases {
                indent(out, depth + 1);
                let patterns: Vec<String> =
                    case.patterns.iter().map(|p| write_pattern(p, ast)).collect();
                let _ = writeln!(out, "Case {}", patterns.join(", "));
                for stmt in &case.body {
                    write_stmt(ast, *stmt, depth + 2, out);
                }
            }
            if let Some(default) = default {
                indent(out, depth + 1);
                let _ = writeln!(out, "Default");
                for stmt in default {
                    write_stmt(ast, *stmt, depth + 2, out);
                }
            }
        }
        StmtKind::Do { body } => {
            let _ = writeln!(out, "Do");
            write_stmt(ast, *body, depth + 1, out);
        }
        StmtKind::Defer { body } => {
            let _ = writeln!(out, "Defer");
            write_stmt(ast, *body, depth + 1, out);
        }
        StmtKind::Return(value) => {
            let _ = writeln!(out, "Return");
            if let Some(value) = value {
                write_expr(ast, *value, depth + 1, None, out);
            }
        }
        StmtKind::Break(target) => {
            let _ = match target {
                Some(target) => writeln!(out, "Break `{target}`"),
                None => writeln!(out, "Break"),
            };
        }
        StmtKind::Continue(target) => {
            let _ = match target {
                Some(target) => writeln!(out, "Continue `{target}`"),
                None => writeln!(out, "Continue"),
            };
        }
        StmtKind::Expressions(exprs) => {
            let _ = writeln!(out, "Expressions");
            for expr in exprs {
                write_expr(ast, *expr, depth + 1, None, out);
            }
        }
        StmtKind::VariableDeclarations(decls) => {
            let _ = writeln!(out, "VariableDeclarations");
            for decl in decls {
                indent(out, depth + 1);
                let keyword = if decl.is_constant { "let" } else { "var" };
                let _ = writeln!(out, "{keyword} {}: {}", decl.name, decl.ty);
                if let Some(init) = decl.initialization {
                    write_expr(ast, init, depth + 2, Some("init"), out);
                }
            }
        }
        StmtKind::Unknown(context) => {
            let _ = writeln!(out, "Unknown {context:?}");
        }
    }
}
