use crate::arena::SwiftAst;
use crate::expr::CallArgument;
use crate::stmt::StmtKind;
use crate::visitor::{walk_expr_children, walk_exprs_in_stmt, ExpressionVisitor};
use crate::ExprId;

/// Counts identifiers, recursing into every child.
struct IdentifierCounter {
    count: usize,
}

impl ExpressionVisitor for IdentifierCounter {
    type Output = ();

    fn default_result(&mut self, ast: &mut SwiftAst, id: ExprId) {
        walk_expr_children(self, ast, id);
    }

    fn visit_identifier(&mut self, _ast: &mut SwiftAst, _id: ExprId) {
        self.count += 1;
    }
}

#[test]
fn visitor_reaches_nested_expressions() {
    let mut ast = SwiftAst::new();
    let callee = ast.identifier("f");
    let inner = ast.identifier("x");
    let lit = ast.integer(7);
    let call = ast.call(
        callee,
        vec![
            CallArgument::unlabeled(inner),
            CallArgument::unlabeled(lit),
        ],
    );

    let mut counter = IdentifierCounter { count: 0 };
    counter.visit_expr(&mut ast, call);
    assert_eq!(counter.count, 2);
}

#[test]
fn statement_walk_reaches_expression_roots() {
    let mut ast = SwiftAst::new();
    let a = ast.identifier("a");
    let stmt_a = ast.expr_stmt(a);
    let b = ast.identifier("b");
    let ret = ast.add_stmt(StmtKind::Return(Some(b)));
    let body = ast.compound(vec![stmt_a, ret]);

    let mut counter = IdentifierCounter { count: 0 };
    walk_exprs_in_stmt(&mut counter, &mut ast, body);
    assert_eq!(counter.count, 2);
}

#[test]
fn visitor_reaches_closure_bodies() {
    let mut ast = SwiftAst::new();
    let captured = ast.identifier("total");
    let stmt = ast.expr_stmt(captured);
    let body = ast.compound(vec![stmt]);
    let closure = ast.add_expr(crate::expr::ExprKind::Closure {
        parameters: vec![],
        return_type: swiftward_core::SwiftType::VOID,
        body,
    });

    let mut counter = IdentifierCounter { count: 0 };
    counter.visit_expr(&mut ast, closure);
    assert_eq!(counter.count, 1);
}
