use swiftward_core::SwiftType;

use crate::arena::SwiftAst;
use crate::dump::{dump_expr, dump_stmt};
use crate::expr::{BinaryOp, CallArgument, ExprKind};
use crate::stmt::{Pattern, StmtKind};

#[test]
fn dumps_calls_with_labels_and_types() {
    let mut ast = SwiftAst::new();
    let callee = ast.identifier("CGPoint");
    let x = ast.integer(1);
    let y = ast.integer(2);
    let call = ast.call(
        callee,
        vec![CallArgument::labeled("x", x), CallArgument::labeled("y", y)],
    );
    ast.set_resolved_type(call, Some(SwiftType::type_name("CGPoint")));

    insta::assert_snapshot!(dump_expr(&ast, call), @r"
    Call -> CGPoint
      Identifier `CGPoint`
      x: Constant 1
      y: Constant 2
    ");
}

#[test]
fn dumps_member_chains() {
    let mut ast = SwiftAst::new();
    let base = ast.identifier("view");
    let frame = ast.member(base, "frame");
    let origin = ast.member(frame, "origin");

    insta::assert_snapshot!(dump_expr(&ast, origin), @r"
    Member `.origin`
      Member `.frame`
        Identifier `view`
    ");
}

#[test]
fn dumps_binary_and_literals() {
    let mut ast = SwiftAst::new();
    let lhs = ast.float(0.5);
    let rhs = ast.string("width");
    let expr = ast.add_expr(ExprKind::Binary {
        lhs,
        op: BinaryOp::Add,
        rhs,
    });

    insta::assert_snapshot!(dump_expr(&ast, expr), @r#"
    Binary `+`
      Constant 0.5
      Constant "width"
    "#);
}

#[test]
fn dumps_if_let_statements() {
    let mut ast = SwiftAst::new();
    let value = ast.identifier("maybePoint");
    let ret = ast.add_stmt(StmtKind::Return(None));
    let body = ast.compound(vec![ret]);
    let if_stmt = ast.add_stmt(StmtKind::If {
        condition: value,
        binding: Some(Pattern::Identifier("point".to_string())),
        body,
        else_body: None,
    });

    insta::assert_snapshot!(dump_stmt(&ast, if_stmt), @r"
    If let point
      cond: Identifier `maybePoint`
      Compound
        Return
    ");
}
