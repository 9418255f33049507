use swiftward_ast::{BinaryOp, ExprKind, StmtKind, SwiftAst, VarDeclaration};
use swiftward_core::SwiftType;

use super::annotate::TypeAnnotationPass;
use super::{BodyEnv, ExpressionPass, PassContext};
use crate::analyze::{OverloadResolver, StubTypeSystem};
use crate::diagnostics::Diagnostics;
use crate::sources::SourceId;

fn run_pass(ast: &mut SwiftAst, env: &BodyEnv, body: swiftward_ast::StmtId) -> Diagnostics {
    let resolver = OverloadResolver::new();
    let mut diagnostics = Diagnostics::new();
    let mut ctx = PassContext {
        ast,
        types: &StubTypeSystem,
        resolver: &resolver,
        diagnostics: &mut diagnostics,
        source: SourceId::default(),
        env,
        changed: false,
    };
    TypeAnnotationPass.run(&mut ctx, body);
    diagnostics
}

#[test]
fn literals_take_their_natural_types() {
    let mut ast = SwiftAst::new();
    let int = ast.integer(1);
    let float = ast.float(2.5);
    let string = ast.string("hi");
    let boolean = ast.boolean(true);
    let stmts = vec![
        ast.expr_stmt(int),
        ast.expr_stmt(float),
        ast.expr_stmt(string),
        ast.expr_stmt(boolean),
    ];
    let body = ast.compound(stmts);

    run_pass(&mut ast, &BodyEnv::default(), body);

    assert_eq!(ast.resolved_type(int), Some(&SwiftType::int()));
    assert_eq!(ast.resolved_type(float), Some(&SwiftType::double()));
    assert_eq!(ast.resolved_type(string), Some(&SwiftType::string()));
    assert_eq!(ast.resolved_type(boolean), Some(&SwiftType::bool()));
}

#[test]
fn parameters_and_self_resolve_from_the_environment() {
    let mut ast = SwiftAst::new();
    let this = ast.identifier("self");
    let param = ast.identifier("offset");
    let stmts = vec![ast.expr_stmt(this), ast.expr_stmt(param)];
    let body = ast.compound(stmts);

    let env = BodyEnv {
        self_type: Some(SwiftType::type_name("Shape")),
        parameters: vec![("offset".to_string(), SwiftType::cg_float())],
    };
    run_pass(&mut ast, &env, body);

    assert_eq!(ast.resolved_type(this), Some(&SwiftType::type_name("Shape")));
    assert_eq!(ast.resolved_type(param), Some(&SwiftType::cg_float()));
}

#[test]
fn local_declarations_scope_to_their_block() {
    let mut ast = SwiftAst::new();
    let init = ast.integer(0);
    let decl = ast.add_stmt(StmtKind::VariableDeclarations(vec![VarDeclaration {
        name: "count".to_string(),
        ty: SwiftType::int(),
        ownership: Default::default(),
        is_constant: false,
        initialization: Some(init),
    }]));
    let use_site = ast.identifier("count");
    let use_stmt = ast.expr_stmt(use_site);
    let body = ast.compound(vec![decl, use_stmt]);

    run_pass(&mut ast, &BodyEnv::default(), body);
    assert_eq!(ast.resolved_type(use_site), Some(&SwiftType::int()));
}

#[test]
fn operators_fold_types_upward() {
    let mut ast = SwiftAst::new();
    let one = ast.integer(1);
    let two = ast.integer(2);
    let sum = ast.add_expr(ExprKind::Binary {
        lhs: one,
        op: BinaryOp::Add,
        rhs: two,
    });
    let three = ast.integer(3);
    let cmp = ast.add_expr(ExprKind::Binary {
        lhs: sum,
        op: BinaryOp::Less,
        rhs: three,
    });
    let body_stmt = ast.expr_stmt(cmp);
    let body = ast.compound(vec![body_stmt]);

    run_pass(&mut ast, &BodyEnv::default(), body);

    assert_eq!(ast.resolved_type(sum), Some(&SwiftType::int()));
    assert_eq!(ast.resolved_type(cmp), Some(&SwiftType::bool()));
}

#[test]
fn uniform_array_literals_infer_an_element_type() {
    let mut ast = SwiftAst::new();
    let a = ast.integer(1);
    let b = ast.integer(2);
    let array = ast.add_expr(ExprKind::ArrayLiteral(vec![a, b]));
    let stmt = ast.expr_stmt(array);
    let body = ast.compound(vec![stmt]);

    run_pass(&mut ast, &BodyEnv::default(), body);
    assert_eq!(
        ast.resolved_type(array),
        Some(&SwiftType::array(SwiftType::int()))
    );
}

#[test]
fn unknown_members_on_known_receivers_get_the_error_sentinel() {
    let mut ast = SwiftAst::new();
    let recv = ast.identifier("shape");
    let access = ast.member(recv, "mystery");
    let stmt = ast.expr_stmt(access);
    let body = ast.compound(vec![stmt]);

    let env = BodyEnv {
        self_type: None,
        parameters: vec![("shape".to_string(), SwiftType::type_name("Shape"))],
    };
    run_pass(&mut ast, &env, body);

    assert_eq!(ast.resolved_type(access), Some(&SwiftType::Error));
}

#[test]
fn annotation_reaches_a_fixpoint() {
    let mut ast = SwiftAst::new();
    let one = ast.integer(1);
    let two = ast.integer(2);
    let sum = ast.add_expr(ExprKind::Binary {
        lhs: one,
        op: BinaryOp::Add,
        rhs: two,
    });
    let stmt = ast.expr_stmt(sum);
    let body = ast.compound(vec![stmt]);

    let resolver = OverloadResolver::new();
    let mut diagnostics = Diagnostics::new();
    let env = BodyEnv::default();

    let mut first = PassContext {
        ast: &mut ast,
        types: &StubTypeSystem,
        resolver: &resolver,
        diagnostics: &mut diagnostics,
        source: SourceId::default(),
        env: &env,
        changed: false,
    };
    TypeAnnotationPass.run(&mut first, body);
    assert!(first.changed);

    let mut second = PassContext {
        ast: &mut ast,
        types: &StubTypeSystem,
        resolver: &resolver,
        diagnostics: &mut diagnostics,
        source: SourceId::default(),
        env: &env,
        changed: false,
    };
    TypeAnnotationPass.run(&mut second, body);
    assert!(!second.changed);
}
