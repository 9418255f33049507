use swiftward_ast::{dump::dump_expr, CallArgument, ExprId, SwiftAst};
use swiftward_core::SwiftType;

use super::builtins::core_graphics_registry;
use super::invocation::{ArgStrategy, FunctionTransformer, TransformTarget, TransformerRegistry};

fn call(ast: &mut SwiftAst, name: &str, args: &[ExprId]) -> ExprId {
    let callee = ast.identifier(name);
    let arguments = args.iter().map(|a| CallArgument::unlabeled(*a)).collect();
    ast.call(callee, arguments)
}

#[test]
fn cg_point_make_becomes_an_initializer() {
    let mut ast = SwiftAst::new();
    let x = ast.integer(1);
    let y = ast.integer(2);
    let site = call(&mut ast, "CGPointMake", &[x, y]);

    let registry = core_graphics_registry();
    let transformer = registry.find_match(&ast, site).expect("matches");
    let replacement = transformer.attempt_apply(&mut ast, site).expect("applies");

    insta::assert_snapshot!(dump_expr(&ast, replacement), @r"
    Call
      Identifier `CGPoint`
      x: Constant 1
      y: Constant 2
    ");
}

#[test]
fn path_move_merges_the_point_and_discards_the_transform() {
    let mut ast = SwiftAst::new();
    let path = ast.identifier("path");
    let transform = ast.identifier("transform");
    let x = ast.identifier("x");
    let y = ast.identifier("y");
    let site = call(&mut ast, "CGPathMoveToPoint", &[path, transform, x, y]);

    let registry = core_graphics_registry();
    let transformer = registry.find_match(&ast, site).expect("matches");
    let replacement = transformer.attempt_apply(&mut ast, site).expect("applies");

    insta::assert_snapshot!(dump_expr(&ast, replacement), @r"
    Call
      Member `.move`
        Identifier `path`
      to: Call
        Identifier `CGPoint`
        x: Identifier `x`
        y: Identifier `y`
    ");
}

#[test]
fn getter_transformers_produce_member_access() {
    let mut ast = SwiftAst::new();
    let frame = ast.identifier("frame");
    let site = call(&mut ast, "CGRectGetMinX", &[frame]);

    let registry = core_graphics_registry();
    let transformer = registry.find_match(&ast, site).expect("matches");
    let replacement = transformer.attempt_apply(&mut ast, site).expect("applies");

    insta::assert_snapshot!(dump_expr(&ast, replacement), @r"
    Member `.minX`
      Identifier `frame`
    ");
}

#[test]
fn setter_transformers_produce_assignment() {
    let mut ast = SwiftAst::new();
    let view = ast.identifier("view");
    let value = ast.identifier("value");
    let site = call(&mut ast, "ViewSetAlpha", &[view, value]);

    let transformer =
        FunctionTransformer::new("ViewSetAlpha", TransformTarget::PropertySetter("alpha"));
    assert_eq!(transformer.required_argument_count(), 2);
    let replacement = transformer.attempt_apply(&mut ast, site).expect("applies");

    insta::assert_snapshot!(dump_expr(&ast, replacement), @r"
    Assignment `=`
      Member `.alpha`
        Identifier `view`
      Identifier `value`
    ");
}

#[test]
fn can_apply_checks_name_and_arity() {
    let mut ast = SwiftAst::new();
    let x = ast.integer(1);
    let short = call(&mut ast, "CGPointMake", &[x]);

    let registry = core_graphics_registry();
    assert!(registry.find_match(&ast, short).is_none());

    let a = ast.integer(1);
    let b = ast.integer(2);
    let other = call(&mut ast, "SomethingElse", &[a, b]);
    assert!(registry.find_match(&ast, other).is_none());
}

#[test]
fn can_apply_implies_attempt_apply_succeeds() {
    let mut ast = SwiftAst::new();
    let x = ast.integer(3);
    let y = ast.integer(4);
    let site = call(&mut ast, "CGPointMake", &[x, y]);

    let registry = core_graphics_registry();
    let transformer = registry.find_match(&ast, site).expect("matches");
    assert!(transformer.can_apply(&ast, site));
    assert!(transformer.attempt_apply(&mut ast, site).is_some());
}

#[test]
fn replacement_keeps_the_original_resolved_type() {
    let mut ast = SwiftAst::new();
    let x = ast.integer(1);
    let y = ast.integer(2);
    let site = call(&mut ast, "CGPointMake", &[x, y]);
    ast.set_resolved_type(site, Some(SwiftType::type_name("CGPoint")));

    let registry = core_graphics_registry();
    let transformer = registry.find_match(&ast, site).expect("matches");
    let replacement = transformer.attempt_apply(&mut ast, site).expect("applies");

    assert_eq!(
        ast.resolved_type(replacement),
        Some(&SwiftType::type_name("CGPoint"))
    );
}

#[test]
fn required_count_raises_to_the_highest_referenced_index() {
    fn merge(ast: &mut SwiftAst, a: ExprId, b: ExprId) -> ExprId {
        let callee = ast.identifier("CGPoint");
        ast.call(
            callee,
            vec![CallArgument::labeled("x", a), CallArgument::labeled("y", b)],
        )
    }

    // Consumes two slots but references up to index 2 → three source
    // arguments, plus the receiver.
    let transformer = FunctionTransformer::new(
        "PathMove",
        TransformTarget::Method {
            name: "move",
            first_arg_is_receiver: true,
            args: vec![ArgStrategy::labeled(
                "to",
                ArgStrategy::MergingArguments(1, 2, merge),
            )],
        },
    );
    assert_eq!(transformer.required_argument_count(), 4);
}

#[test]
fn fixed_and_from_arg_index_consume_nothing() {
    fn make_zero(ast: &mut SwiftAst) -> ExprId {
        ast.integer(0)
    }

    let transformer = FunctionTransformer::new(
        "Mix",
        TransformTarget::Method {
            name: "mix",
            first_arg_is_receiver: false,
            args: vec![
                ArgStrategy::Fixed(make_zero),
                ArgStrategy::FromArgIndex(0),
                ArgStrategy::AsIs,
            ],
        },
    );
    // One consumed slot, highest referenced index 0 → one source argument.
    assert_eq!(transformer.required_argument_count(), 1);

    let mut ast = SwiftAst::new();
    let value = ast.identifier("v");
    let site = call(&mut ast, "Mix", &[value]);
    let replacement = transformer.attempt_apply(&mut ast, site).expect("applies");

    insta::assert_snapshot!(dump_expr(&ast, replacement), @r"
    Call
      Identifier `mix`
      Constant 0
      Identifier `v`
      Identifier `v`
    ");
}

#[test]
fn omit_if_drops_matching_arguments() {
    fn make_nil(ast: &mut SwiftAst) -> ExprId {
        ast.nil()
    }

    let transformer = FunctionTransformer::new(
        "Show",
        TransformTarget::Method {
            name: "show",
            first_arg_is_receiver: true,
            args: vec![
                ArgStrategy::AsIs,
                ArgStrategy::omit_if(make_nil, ArgStrategy::labeled("completion", ArgStrategy::AsIs)),
            ],
        },
    );
    assert_eq!(transformer.required_argument_count(), 3);

    let mut ast = SwiftAst::new();
    let recv = ast.identifier("presenter");
    let flag = ast.boolean(true);
    let nil = ast.nil();
    let site = call(&mut ast, "Show", &[recv, flag, nil]);

    let replacement = transformer.attempt_apply(&mut ast, site).expect("applies");
    insta::assert_snapshot!(dump_expr(&ast, replacement), @r"
    Call
      Member `.show`
        Identifier `presenter`
      Constant true
    ");
}

#[test]
fn omit_if_around_merge_still_consumes_slots() {
    fn make_zero_point(ast: &mut SwiftAst) -> ExprId {
        let callee = ast.identifier("CGPoint");
        let x = ast.integer(0);
        let y = ast.integer(0);
        ast.call(
            callee,
            vec![CallArgument::labeled("x", x), CallArgument::labeled("y", y)],
        )
    }
    fn merge(ast: &mut SwiftAst, a: ExprId, b: ExprId) -> ExprId {
        let callee = ast.identifier("CGPoint");
        ast.call(
            callee,
            vec![CallArgument::labeled("x", a), CallArgument::labeled("y", b)],
        )
    }

    // The merged point is omitted when it equals CGPoint(x: 0, y: 0); the
    // trailing AsIs must still see the argument after the merged pair.
    let transformer = FunctionTransformer::new(
        "Blit",
        TransformTarget::Method {
            name: "blit",
            first_arg_is_receiver: false,
            args: vec![
                ArgStrategy::omit_if(
                    make_zero_point,
                    ArgStrategy::labeled("at", ArgStrategy::MergingArguments(0, 1, merge)),
                ),
                ArgStrategy::AsIs,
            ],
        },
    );
    assert_eq!(transformer.required_argument_count(), 3);

    let mut ast = SwiftAst::new();
    let x = ast.integer(0);
    let y = ast.integer(0);
    let buffer = ast.identifier("buffer");
    let site = call(&mut ast, "Blit", &[x, y, buffer]);

    let replacement = transformer.attempt_apply(&mut ast, site).expect("applies");
    // The zero point is omitted, yet `buffer` (slot 2) is what AsIs takes:
    // the cursor advanced over both merged slots.
    insta::assert_snapshot!(dump_expr(&ast, replacement), @r"
    Call
      Identifier `blit`
      Identifier `buffer`
    ");
}

#[test]
fn first_registered_transformer_wins() {
    let mut registry = TransformerRegistry::new();
    registry.register(FunctionTransformer::new(
        "Area",
        TransformTarget::PropertyGetter("first"),
    ));
    registry.register(FunctionTransformer::new(
        "Area",
        TransformTarget::PropertyGetter("second"),
    ));

    let mut ast = SwiftAst::new();
    let shape = ast.identifier("shape");
    let site = call(&mut ast, "Area", &[shape]);

    let transformer = registry.find_match(&ast, site).expect("matches");
    let replacement = transformer.attempt_apply(&mut ast, site).expect("applies");
    insta::assert_snapshot!(dump_expr(&ast, replacement), @r"
    Member `.first`
      Identifier `shape`
    ");
}
