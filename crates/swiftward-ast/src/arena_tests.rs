use swiftward_core::SwiftType;

use crate::arena::SwiftAst;
use crate::expr::{BinaryOp, CallArgument, ExprKind, Literal, PostfixOp};
use crate::stmt::{Pattern, StmtKind, VarDeclaration};
use crate::NodeId;

fn sample_call(ast: &mut SwiftAst) -> crate::ExprId {
    let callee = ast.identifier("CGPointMake");
    let x = ast.integer(1);
    let y = ast.integer(2);
    ast.call(
        callee,
        vec![CallArgument::unlabeled(x), CallArgument::unlabeled(y)],
    )
}

#[test]
fn children_are_attached_to_their_parent() {
    let mut ast = SwiftAst::new();
    let call = sample_call(&mut ast);

    let (callee, args) = match ast.expr_kind(call) {
        ExprKind::Postfix {
            base,
            op: PostfixOp::Call { arguments },
        } => (*base, arguments.clone()),
        other => panic!("unexpected kind: {other:?}"),
    };

    assert_eq!(ast.parent_of_expr(callee), Some(NodeId::Expr(call)));
    for argument in &args {
        assert_eq!(ast.parent_of_expr(argument.value), Some(NodeId::Expr(call)));
    }
    assert_eq!(ast.parent_of_expr(call), None);
}

#[test]
fn statements_attach_expressions_and_substatements() {
    let mut ast = SwiftAst::new();
    let condition = ast.boolean(true);
    let ret = ast.add_stmt(StmtKind::Return(None));
    let body = ast.compound(vec![ret]);
    let if_stmt = ast.add_stmt(StmtKind::If {
        condition,
        binding: None,
        body,
        else_body: None,
    });

    assert_eq!(ast.parent_of_expr(condition), Some(NodeId::Stmt(if_stmt)));
    assert_eq!(ast.parent_of_stmt(body), Some(NodeId::Stmt(if_stmt)));
    assert_eq!(ast.parent_of_stmt(ret), Some(NodeId::Stmt(body)));
}

#[test]
fn deep_copy_is_structurally_equal_and_disjoint() {
    let mut ast = SwiftAst::new();
    let call = sample_call(&mut ast);
    ast.set_resolved_type(call, Some(SwiftType::type_name("CGPoint")));

    let copy = ast.deep_copy_expr(call);

    assert!(ast.expr_eq(call, copy));
    assert_ne!(call, copy);
    assert_eq!(ast.parent_of_expr(copy), None);
    assert_eq!(
        ast.resolved_type(copy),
        Some(&SwiftType::type_name("CGPoint"))
    );

    // The copies share no nodes: mutating one leaves the other untouched.
    let replacement = ast.integer(9);
    let (first_arg, _) = match ast.expr_kind(copy) {
        ExprKind::Postfix {
            op: PostfixOp::Call { arguments },
            ..
        } => (arguments[0].value, ()),
        other => panic!("unexpected kind: {other:?}"),
    };
    ast.replace_expr(first_arg, replacement);
    assert!(!ast.expr_eq(call, copy));
}

#[test]
fn deep_copy_preserves_statement_metadata() {
    let mut ast = SwiftAst::new();
    let value = ast.integer(3);
    let stmt = ast.add_stmt(StmtKind::Return(Some(value)));
    ast.set_stmt_label(stmt, Some("outer".to_string()));
    ast.push_stmt_comment(stmt, "bail early");

    let copy = ast.deep_copy_stmt(stmt);

    assert!(ast.stmt_eq(stmt, copy));
    assert_eq!(ast.stmt(copy).label.as_deref(), Some("outer"));
    assert_eq!(ast.stmt(copy).comments, vec!["bail early".to_string()]);
    assert_eq!(ast.parent_of_stmt(copy), None);
}

#[test]
fn equality_ignores_resolved_types() {
    let mut ast = SwiftAst::new();
    let a = sample_call(&mut ast);
    let b = sample_call(&mut ast);
    ast.set_resolved_type(a, Some(SwiftType::type_name("CGPoint")));

    assert!(ast.expr_eq(a, b));
}

#[test]
fn equality_distinguishes_structure() {
    let mut ast = SwiftAst::new();
    let one = ast.integer(1);
    let two = ast.integer(2);
    let lhs = ast.add_expr(ExprKind::Binary {
        lhs: one,
        op: BinaryOp::Add,
        rhs: two,
    });

    let one_b = ast.integer(1);
    let two_b = ast.integer(2);
    let rhs = ast.add_expr(ExprKind::Binary {
        lhs: two_b,
        op: BinaryOp::Add,
        rhs: one_b,
    });

    assert!(!ast.expr_eq(lhs, rhs));
}

#[test]
fn statement_equality_is_reflexive_and_copy_stable() {
    let mut ast = SwiftAst::new();
    let init = ast.integer(0);
    let decl = ast.add_stmt(StmtKind::VariableDeclarations(vec![VarDeclaration {
        name: "count".to_string(),
        ty: SwiftType::int(),
        ownership: Default::default(),
        is_constant: false,
        initialization: Some(init),
    }]));
    let body = ast.compound(vec![decl]);

    assert!(ast.stmt_eq(body, body));
    let copy = ast.deep_copy_stmt(body);
    assert!(ast.stmt_eq(body, copy));
}

#[test]
fn replace_expr_swaps_the_parent_slot() {
    let mut ast = SwiftAst::new();
    let call = sample_call(&mut ast);
    let stmt = ast.expr_stmt(call);

    let recv = ast.identifier("point");
    let replacement = ast.member(recv, "x");
    ast.replace_expr(call, replacement);

    assert_eq!(ast.parent_of_expr(replacement), Some(NodeId::Stmt(stmt)));
    assert_eq!(ast.parent_of_expr(call), None);
    match ast.stmt_kind(stmt) {
        StmtKind::Expressions(exprs) => assert_eq!(exprs, &[replacement]),
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn replace_expr_inside_an_expression_parent() {
    let mut ast = SwiftAst::new();
    let one = ast.integer(1);
    let two = ast.integer(2);
    let sum = ast.add_expr(ExprKind::Binary {
        lhs: one,
        op: BinaryOp::Add,
        rhs: two,
    });

    let three = ast.integer(3);
    ast.replace_expr(two, three);

    match ast.expr_kind(sum) {
        ExprKind::Binary { lhs, rhs, .. } => {
            assert_eq!(*lhs, one);
            assert_eq!(*rhs, three);
        }
        other => panic!("unexpected kind: {other:?}"),
    }
    assert_eq!(ast.parent_of_expr(three), Some(NodeId::Expr(sum)));
    assert_eq!(ast.parent_of_expr(two), None);
}

#[test]
fn patterns_compare_structurally() {
    let mut ast = SwiftAst::new();
    let items = ast.identifier("items");
    let body_a = ast.compound(vec![]);
    let for_a = ast.add_stmt(StmtKind::For {
        pattern: Pattern::Tuple(vec![
            Pattern::Identifier("key".to_string()),
            Pattern::Wildcard,
        ]),
        iterated: items,
        body: body_a,
    });

    let items_b = ast.identifier("items");
    let body_b = ast.compound(vec![]);
    let for_b = ast.add_stmt(StmtKind::For {
        pattern: Pattern::Tuple(vec![
            Pattern::Identifier("key".to_string()),
            Pattern::Wildcard,
        ]),
        iterated: items_b,
        body: body_b,
    });

    assert!(ast.stmt_eq(for_a, for_b));
}

#[test]
fn literal_kinds_classify_constants_and_composites() {
    let mut ast = SwiftAst::new();
    let one = ast.integer(1);
    let arr = ast.add_expr(ExprKind::ArrayLiteral(vec![one]));

    use crate::expr::LiteralKind;
    assert_eq!(
        ast.expr_kind(arr).literal_kind(),
        Some(LiteralKind::Array)
    );
    let f = ast.float(1.5);
    assert_eq!(ast.expr_kind(f).literal_kind(), Some(LiteralKind::Float));
    assert_eq!(
        ExprKind::Constant(Literal::Nil).literal_kind(),
        Some(LiteralKind::Nil)
    );
    let ident = ast.identifier("x");
    assert_eq!(ast.expr_kind(ident).literal_kind(), None);
}
