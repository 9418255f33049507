//! Visitors over the Swift tree.
//!
//! Classical one-method-per-variant visitors. Each hook defaults to
//! [`ExpressionVisitor::default_result`], so a pass overrides only the
//! variants it cares about. Walk helpers drive recursion explicitly; passes
//! choose pre- or post-order by where they recurse relative to their own
//! work.

use crate::arena::{expr_children, stmt_children, SwiftAst};
use crate::expr::ExprKind;
use crate::{ExprId, StmtId};

/// Visitor over expression nodes.
pub trait ExpressionVisitor {
    type Output;

    /// Result for variants the visitor does not specialize.
    fn default_result(&mut self, ast: &mut SwiftAst, id: ExprId) -> Self::Output;

    fn visit_identifier(&mut self, ast: &mut SwiftAst, id: ExprId) -> Self::Output {
        self.default_result(ast, id)
    }

    fn visit_constant(&mut self, ast: &mut SwiftAst, id: ExprId) -> Self::Output {
        self.default_result(ast, id)
    }

    fn visit_array_literal(&mut self, ast: &mut SwiftAst, id: ExprId) -> Self::Output {
        self.default_result(ast, id)
    }

    fn visit_dictionary_literal(&mut self, ast: &mut SwiftAst, id: ExprId) -> Self::Output {
        self.default_result(ast, id)
    }

    fn visit_unary(&mut self, ast: &mut SwiftAst, id: ExprId) -> Self::Output {
        self.default_result(ast, id)
    }

    fn visit_binary(&mut self, ast: &mut SwiftAst, id: ExprId) -> Self::Output {
        self.default_result(ast, id)
    }

    fn visit_ternary(&mut self, ast: &mut SwiftAst, id: ExprId) -> Self::Output {
        self.default_result(ast, id)
    }

    fn visit_assignment(&mut self, ast: &mut SwiftAst, id: ExprId) -> Self::Output {
        self.default_result(ast, id)
    }

    fn visit_cast(&mut self, ast: &mut SwiftAst, id: ExprId) -> Self::Output {
        self.default_result(ast, id)
    }

    fn visit_type_check(&mut self, ast: &mut SwiftAst, id: ExprId) -> Self::Output {
        self.default_result(ast, id)
    }

    fn visit_parens(&mut self, ast: &mut SwiftAst, id: ExprId) -> Self::Output {
        self.default_result(ast, id)
    }

    fn visit_postfix(&mut self, ast: &mut SwiftAst, id: ExprId) -> Self::Output {
        self.default_result(ast, id)
    }

    fn visit_closure(&mut self, ast: &mut SwiftAst, id: ExprId) -> Self::Output {
        self.default_result(ast, id)
    }

    fn visit_size_of(&mut self, ast: &mut SwiftAst, id: ExprId) -> Self::Output {
        self.default_result(ast, id)
    }

    fn visit_unknown(&mut self, ast: &mut SwiftAst, id: ExprId) -> Self::Output {
        self.default_result(ast, id)
    }

    /// Dispatches to the per-variant hook.
    fn visit_expr(&mut self, ast: &mut SwiftAst, id: ExprId) -> Self::Output {
        match ast.expr_kind(id) {
            ExprKind::Identifier(_) => self.visit_identifier(ast, id),
            ExprKind::Constant(_) => self.visit_constant(ast, id),
            ExprKind::ArrayLiteral(_) => self.visit_array_literal(ast, id),
            ExprKind::DictionaryLiteral(_) => self.visit_dictionary_literal(ast, id),
            ExprKind::Unary { .. } => self.visit_unary(ast, id),
            ExprKind::Binary { .. } => self.visit_binary(ast, id),
            ExprKind::Ternary { .. } => self.visit_ternary(ast, id),
            ExprKind::Assignment { .. } => self.visit_assignment(ast, id),
            ExprKind::Cast { .. } => self.visit_cast(ast, id),
            ExprKind::TypeCheck { .. } => self.visit_type_check(ast, id),
            ExprKind::Parens(_) => self.visit_parens(ast, id),
            ExprKind::Postfix { .. } => self.visit_postfix(ast, id),
            ExprKind::Closure { .. } => self.visit_closure(ast, id),
            ExprKind::SizeOf(_) => self.visit_size_of(ast, id),
            ExprKind::Unknown(_) => self.visit_unknown(ast, id),
        }
    }
}

/// Visitor over statement nodes. Expressions encountered inside statements
/// are handed to [`StatementVisitor::visit_expr_root`].
pub trait StatementVisitor {
    fn visit_stmt(&mut self, ast: &mut SwiftAst, id: StmtId) {
        walk_stmt(self, ast, id);
    }

    /// Called once per expression directly owned by a statement.
    fn visit_expr_root(&mut self, ast: &mut SwiftAst, id: ExprId);
}

/// Visits a statement's expression roots, then recurses into child
/// statements via [`StatementVisitor::visit_stmt`].
pub fn walk_stmt<V: StatementVisitor + ?Sized>(visitor: &mut V, ast: &mut SwiftAst, id: StmtId) {
    let (child_exprs, child_stmts) = stmt_children(ast.stmt_kind(id));
    for expr in child_exprs {
        visitor.visit_expr_root(ast, expr);
    }
    for stmt in child_stmts {
        visitor.visit_stmt(ast, stmt);
    }
}

/// Visits every sub-expression of `id` (not `id` itself), left to right,
/// including closure bodies' expression roots.
pub fn walk_expr_children<V: ExpressionVisitor + ?Sized>(
    visitor: &mut V,
    ast: &mut SwiftAst,
    id: ExprId,
) {
    let (child_exprs, child_stmts) = expr_children(ast.expr_kind(id));
    for expr in child_exprs {
        visitor.visit_expr(ast, expr);
    }
    for stmt in child_stmts {
        walk_exprs_in_stmt(visitor, ast, stmt);
    }
}

/// Applies an expression visitor to every expression root in a statement
/// subtree.
pub fn walk_exprs_in_stmt<V: ExpressionVisitor + ?Sized>(
    visitor: &mut V,
    ast: &mut SwiftAst,
    id: StmtId,
) {
    let (child_exprs, child_stmts) = stmt_children(ast.stmt_kind(id));
    for expr in child_exprs {
        visitor.visit_expr(ast, expr);
    }
    for stmt in child_stmts {
        walk_exprs_in_stmt(visitor, ast, stmt);
    }
}
