use indoc::indoc;
use swiftward_ast::{dump::dump_stmt, SwiftAst};

use super::{lower_compound, LowerCtx};
use crate::parser::ast::Root;
use crate::parser::parse_source;
use crate::sources::SourceId;

/// Parses a function wrapping `body`, lowers it, and dumps the tree.
fn lower_body(body: &str) -> String {
    let source = format!("void demo() {{\n{body}\n}}\n");
    let result = parse_source(&source, SourceId::default());
    assert!(
        !result.diagnostics.has_errors(),
        "parse errors:\n{}",
        result.diagnostics.printer().render()
    );
    let root = Root::cast(result.root).expect("root");
    let function = root.functions().next().expect("one function");
    let cst_body = function.body().expect("body");

    let mut ast = SwiftAst::new();
    let lowered = lower_compound(&cst_body, &mut ast, &LowerCtx::default());
    dump_stmt(&ast, lowered)
}

#[test]
fn lowers_message_sends_to_member_calls() {
    insta::assert_snapshot!(lower_body("[path moveToX:1 y:2];"), @r"
    Compound
      Expressions
        Call
          Member `.moveToX`
            Identifier `path`
          Constant 1
          y: Constant 2
    ");
}

#[test]
fn lowers_unary_selector_sends_to_calls() {
    insta::assert_snapshot!(lower_body("[items count];"), @r"
    Compound
      Expressions
        Call
          Member `.count`
            Identifier `items`
    ");
}

#[test]
fn lowers_objc_literals() {
    insta::assert_snapshot!(lower_body("id x = @[@1, @\"two\"];"), @r#"
    Compound
      VariableDeclarations
        var x: AnyObject!
          init: ArrayLiteral
            Constant 1
            Constant "two"
    "#);
}

#[test]
fn lowers_boolean_and_nil_keywords() {
    insta::assert_snapshot!(lower_body("BOOL ok = YES;\nid empty = nil;"), @r"
    Compound
      VariableDeclarations
        var ok: Bool
          init: Constant true
      VariableDeclarations
        var empty: AnyObject!
          init: Constant nil
    ");
}

#[test]
fn desugars_c_for_loops_into_while() {
    insta::assert_snapshot!(
        lower_body("for (NSInteger i = 0; i < 3; i++) { work(i); }"),
        @r"
    Compound
      Compound
        VariableDeclarations
          var i: Int
            init: Constant 0
        While
          cond: Binary `<`
            Identifier `i`
            Constant 3
          Compound
            Compound
              Expressions
                Call
                  Identifier `work`
                  Identifier `i`
            Expressions
              Assignment `+=`
                Identifier `i`
                Constant 1
    ");
}

#[test]
fn lowers_for_in_loops() {
    insta::assert_snapshot!(lower_body("for (NSString *name in names) { greet(name); }"), @r"
    Compound
      For name
        in: Identifier `names`
        Compound
          Expressions
            Call
              Identifier `greet`
              Identifier `name`
    ");
}

#[test]
fn statement_level_increment_becomes_compound_assignment() {
    insta::assert_snapshot!(lower_body("count++;"), @r"
    Compound
      Expressions
        Assignment `+=`
          Identifier `count`
          Constant 1
    ");
}

#[test]
fn lowers_switch_with_fallthrough_and_default() {
    insta::assert_snapshot!(
        lower_body("switch (kind) { case 1: a(); break; case 2: b(); default: c(); }"),
        @r#"
    Compound
      Switch
        over: Identifier `kind`
        Case <expr>
          Expressions
            Call
              Identifier `a`
        Case <expr>
          Expressions
            Call
              Identifier `b`
          Unknown "fallthrough"
        Default
          Expressions
            Call
              Identifier `c`
    "#);
}

#[test]
fn numeric_casts_become_initializer_calls() {
    insta::assert_snapshot!(lower_body("CGFloat w = (CGFloat)count;"), @r"
    Compound
      VariableDeclarations
        var w: CGFloat
          init: Call
            Identifier `CGFloat`
            Identifier `count`
    ");
}

#[test]
fn object_casts_become_conditional_downcasts() {
    insta::assert_snapshot!(lower_body("NSString *s = (NSString *)value;"), @r"
    Compound
      VariableDeclarations
        var s: String!
          init: Cast `as? String`
            Identifier `value`
    ");
}

#[test]
fn lowers_blocks_to_closures() {
    insta::assert_snapshot!(lower_body("dispatch(^{ done(); });"), @r"
    Compound
      Expressions
        Call
          Identifier `dispatch`
          Closure () -> Void
            Compound
              Expressions
                Call
                  Identifier `done`
    ");
}

#[test]
fn unmodeled_constructs_survive_as_unknown_nodes() {
    insta::assert_snapshot!(lower_body("id sel = @selector(compare:);"), @r##"
    Compound
      VariableDeclarations
        var sel: AnyObject!
          init: Unknown "#selector(compare:)"
    "##);
}
