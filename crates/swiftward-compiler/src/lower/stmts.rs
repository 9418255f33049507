//! Statement lowering.

use swiftward_ast::{
    AssignOp, ExprId, ExprKind, Pattern, SourceSpan, StmtId, StmtKind, SwiftAst, SwitchCase,
    VarDeclaration,
};
use swiftward_core::{Ownership, SwiftType};

use super::exprs::lower_expr;
use super::LowerCtx;
use crate::analyze::objc_types::lower_type_node;
use crate::analyze::type_mapper::map_type;
use crate::parser::{SyntaxKind, SyntaxNode};

fn span_of(node: &SyntaxNode) -> SourceSpan {
    let range = node.text_range();
    SourceSpan::new(range.start().into(), range.end().into())
}

fn is_stmt_node(node: &SyntaxNode) -> bool {
    matches!(
        node.kind(),
        SyntaxKind::CompoundStmt
            | SyntaxKind::IfStmt
            | SyntaxKind::WhileStmt
            | SyntaxKind::DoWhileStmt
            | SyntaxKind::ForStmt
            | SyntaxKind::ForInStmt
            | SyntaxKind::SwitchStmt
            | SyntaxKind::ReturnStmt
            | SyntaxKind::BreakStmt
            | SyntaxKind::ContinueStmt
            | SyntaxKind::ExprStmt
            | SyntaxKind::VarDeclStmt
    )
}

fn first_expr_child(node: &SyntaxNode) -> Option<SyntaxNode> {
    node.children().find(is_expr_child)
}

fn is_expr_child(node: &SyntaxNode) -> bool {
    !is_stmt_node(node) && node.kind() != SyntaxKind::TypeNode
}

fn stmt_children(node: &SyntaxNode) -> Vec<SyntaxNode> {
    node.children().filter(is_stmt_node).collect()
}

/// Lowers a `CompoundStmt` CST node into a compound statement.
pub fn lower_compound(node: &SyntaxNode, ast: &mut SwiftAst, ctx: &LowerCtx<'_>) -> StmtId {
    let children: Vec<SyntaxNode> = node.children().filter(is_stmt_node).collect();
    let mut stmts = Vec::with_capacity(children.len());
    for child in &children {
        stmts.push(lower_stmt(child, ast, ctx));
    }
    let id = ast.compound(stmts);
    ast.set_stmt_span(id, span_of(node));
    id
}

/// Lowers one CST statement node.
pub fn lower_stmt(node: &SyntaxNode, ast: &mut SwiftAst, ctx: &LowerCtx<'_>) -> StmtId {
    let id = match node.kind() {
        SyntaxKind::CompoundStmt => return lower_compound(node, ast, ctx),
        SyntaxKind::IfStmt => {
            let condition = lower_condition(node, ast, ctx);
            let bodies = stmt_children(node);
            let body = bodies
                .first()
                .map(|b| lower_stmt(b, ast, ctx))
                .unwrap_or_else(|| ast.compound(vec![]));
            let else_body = bodies.get(1).map(|b| lower_stmt(b, ast, ctx));
            ast.add_stmt(StmtKind::If {
                condition,
                binding: None,
                body,
                else_body,
            })
        }
        SyntaxKind::WhileStmt => {
            let condition = lower_condition(node, ast, ctx);
            let body = stmt_children(node)
                .first()
                .map(|b| lower_stmt(b, ast, ctx))
                .unwrap_or_else(|| ast.compound(vec![]));
            ast.add_stmt(StmtKind::While { condition, body })
        }
        SyntaxKind::DoWhileStmt => {
            let condition = lower_condition(node, ast, ctx);
            let body = stmt_children(node)
                .first()
                .map(|b| lower_stmt(b, ast, ctx))
                .unwrap_or_else(|| ast.compound(vec![]));
            ast.add_stmt(StmtKind::RepeatWhile { condition, body })
        }
        SyntaxKind::ForInStmt => {
            let variable = node
                .children_with_tokens()
                .filter_map(|e| e.into_token())
                .find(|t| t.kind() == SyntaxKind::Ident)
                .map(|t| t.text().to_string())
                .unwrap_or_else(|| "_".to_string());
            let iterated = first_expr_child(node)
                .map(|e| lower_expr(&e, ast, ctx))
                .unwrap_or_else(|| ast.nil());
            let body = stmt_children(node)
                .first()
                .map(|b| lower_stmt(b, ast, ctx))
                .unwrap_or_else(|| ast.compound(vec![]));
            ast.add_stmt(StmtKind::For {
                pattern: Pattern::Identifier(variable),
                iterated,
                body,
            })
        }
        SyntaxKind::ForStmt => lower_c_for(node, ast, ctx),
        SyntaxKind::SwitchStmt => lower_switch(node, ast, ctx),
        SyntaxKind::ReturnStmt => {
            let value = first_expr_child(node).map(|e| lower_expr(&e, ast, ctx));
            ast.add_stmt(StmtKind::Return(value))
        }
        SyntaxKind::BreakStmt => ast.add_stmt(StmtKind::Break(None)),
        SyntaxKind::ContinueStmt => ast.add_stmt(StmtKind::Continue(None)),
        SyntaxKind::ExprStmt => {
            let exprs: Vec<ExprId> = node
                .children()
                .filter(is_expr_child)
                .map(|e| lower_stmt_level_expr(&e, ast, ctx))
                .collect();
            ast.add_stmt(StmtKind::Expressions(exprs))
        }
        SyntaxKind::VarDeclStmt => lower_var_decl(node, ast, ctx),
        _ => ast.add_stmt(StmtKind::Unknown(node.text().to_string().trim().to_string())),
    };
    ast.set_stmt_span(id, span_of(node));
    id
}

fn lower_condition(node: &SyntaxNode, ast: &mut SwiftAst, ctx: &LowerCtx<'_>) -> ExprId {
    first_expr_child(node)
        .map(|e| lower_expr(&e, ast, ctx))
        .unwrap_or_else(|| ast.boolean(true))
}

/// Statement-position expressions tolerate the C increment idioms:
/// `i++` / `++i` become `i += 1`.
fn lower_stmt_level_expr(node: &SyntaxNode, ast: &mut SwiftAst, ctx: &LowerCtx<'_>) -> ExprId {
    let (operand, op_kind) = match node.kind() {
        SyntaxKind::PostfixUnaryExpr => {
            let operand = node.children().find(is_expr_child);
            let op = node
                .children_with_tokens()
                .filter_map(|e| e.into_token())
                .find(|t| {
                    matches!(t.kind(), SyntaxKind::PlusPlus | SyntaxKind::MinusMinus)
                })
                .map(|t| t.kind());
            (operand, op)
        }
        SyntaxKind::UnaryExpr => {
            let op = node
                .children_with_tokens()
                .filter_map(|e| e.into_token())
                .find(|t| {
                    matches!(t.kind(), SyntaxKind::PlusPlus | SyntaxKind::MinusMinus)
                })
                .map(|t| t.kind());
            (node.children().find(is_expr_child), op)
        }
        _ => (None, None),
    };

    if let (Some(operand), Some(op_kind)) = (operand, op_kind) {
        let lhs = lower_expr(&operand, ast, ctx);
        let rhs = ast.integer(1);
        let op = if op_kind == SyntaxKind::PlusPlus {
            AssignOp::AddAssign
        } else {
            AssignOp::SubtractAssign
        };
        return ast.add_expr(ExprKind::Assignment { lhs, op, rhs });
    }

    lower_expr(node, ast, ctx)
}

/// C three-clause `for` desugars into init + `while` with the update at the
/// end of the body.
fn lower_c_for(node: &SyntaxNode, ast: &mut SwiftAst, ctx: &LowerCtx<'_>) -> StmtId {
    let children: Vec<SyntaxNode> = node.children().collect();

    let mut init: Option<StmtId> = None;
    let mut condition: Option<ExprId> = None;
    let mut update: Option<ExprId> = None;
    let mut body: Option<StmtId> = None;

    // The body statement is the last statement child; an init statement (a
    // `VarDeclStmt` or `ExprStmt`) precedes the condition expression.
    let stmt_nodes: Vec<&SyntaxNode> = children.iter().filter(|n| is_stmt_node(n)).collect();
    if let Some((body_node, head)) = stmt_nodes.split_last() {
        if let Some(init_node) = head.first() {
            init = Some(lower_stmt(init_node, ast, ctx));
        }
        body = Some(lower_stmt(body_node, ast, ctx));
    }
    let exprs: Vec<&SyntaxNode> = children.iter().filter(|n| is_expr_child(n)).collect();
    if let Some(first) = exprs.first() {
        condition = Some(lower_expr(first, ast, ctx));
    }
    if let Some(second) = exprs.get(1) {
        update = Some(lower_stmt_level_expr(second, ast, ctx));
    }

    let condition = condition.unwrap_or_else(|| ast.boolean(true));
    let body = body.unwrap_or_else(|| ast.compound(vec![]));

    let loop_body = match update {
        Some(update) => {
            let update_stmt = ast.expr_stmt(update);
            ast.compound(vec![body, update_stmt])
        }
        None => body,
    };
    let while_stmt = ast.add_stmt(StmtKind::While {
        condition,
        body: loop_body,
    });

    match init {
        Some(init) => ast.compound(vec![init, while_stmt]),
        None => while_stmt,
    }
}

fn lower_switch(node: &SyntaxNode, ast: &mut SwiftAst, ctx: &LowerCtx<'_>) -> StmtId {
    let scrutinee = first_expr_child(node)
        .map(|e| lower_expr(&e, ast, ctx))
        .unwrap_or_else(|| ast.nil());

    let mut cases: Vec<SwitchCase> = Vec::new();
    let mut default: Option<Vec<StmtId>> = None;
    // Empty cases share the following case's body (`case A: case B: ...`).
    let mut pending_patterns: Vec<Pattern> = Vec::new();

    for case_node in node
        .children()
        .filter(|n| n.kind() == SyntaxKind::SwitchCase)
    {
        let is_default = case_node
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .any(|t| t.kind() == SyntaxKind::KwDefault);

        let pattern = case_node
            .children()
            .find(is_expr_child)
            .map(|e| Pattern::Expression(lower_expr(&e, ast, ctx)));

        let body_nodes: Vec<SyntaxNode> =
            case_node.children().filter(is_stmt_node).collect();
        let mut body: Vec<StmtId> = body_nodes
            .iter()
            .map(|s| lower_stmt(s, ast, ctx))
            .collect();

        // Swift switches don't fall through: a trailing `break` is dropped;
        // a non-empty body without one gets an explicit `fallthrough`.
        let had_trailing_break = matches!(
            body.last().map(|s| ast.stmt_kind(*s)),
            Some(StmtKind::Break(None))
        );
        if had_trailing_break {
            body.pop();
        }

        if is_default {
            default = Some(body);
            continue;
        }

        let Some(pattern) = pattern else { continue };

        if body_nodes.is_empty() {
            pending_patterns.push(pattern);
            continue;
        }

        if !had_trailing_break && !ends_in_return(&body, ast) {
            let fallthrough = ast.add_stmt(StmtKind::Unknown("fallthrough".to_string()));
            body.push(fallthrough);
        }

        let mut patterns = std::mem::take(&mut pending_patterns);
        patterns.push(pattern);
        cases.push(SwitchCase { patterns, body });
    }

    ast.add_stmt(StmtKind::Switch {
        scrutinee,
        cases,
        default,
    })
}

fn ends_in_return(body: &[StmtId], ast: &SwiftAst) -> bool {
    matches!(
        body.last().map(|s| ast.stmt_kind(*s)),
        Some(StmtKind::Return(_))
    )
}

fn lower_var_decl(node: &SyntaxNode, ast: &mut SwiftAst, ctx: &LowerCtx<'_>) -> StmtId {
    let (swift_type, ownership, is_constant) = match node
        .children()
        .find(|n| n.kind() == SyntaxKind::TypeNode)
    {
        Some(type_node) => {
            let objc = lower_type_node(&type_node);
            let qualifiers = objc.qualifiers();
            let ownership = if qualifiers.contains(&"__weak") {
                Ownership::Weak
            } else if qualifiers.contains(&"__unsafe_unretained") {
                Ownership::UnownedUnsafe
            } else {
                Ownership::Strong
            };
            let is_constant = qualifiers.contains(&"const");
            (map_type(&objc, ctx.map_ctx), ownership, is_constant)
        }
        None => (SwiftType::Error, Ownership::Strong, false),
    };

    let mut declarations = Vec::new();
    for declarator in node
        .children()
        .filter(|n| n.kind() == SyntaxKind::VarDeclarator)
    {
        let name = declarator
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::Ident)
            .map(|t| t.text().to_string())
            .unwrap_or_default();
        let initialization = declarator
            .children()
            .find(is_expr_child)
            .map(|e| lower_expr(&e, ast, ctx));
        declarations.push(VarDeclaration {
            name,
            ty: swift_type.clone(),
            ownership,
            is_constant,
            initialization,
        });
    }

    ast.add_stmt(StmtKind::VariableDeclarations(declarations))
}
