//! Default transformer registry: the CoreGraphics free-function idioms.

use swiftward_ast::{CallArgument, ExprId, SwiftAst};

use super::invocation::{ArgStrategy, FunctionTransformer, TransformTarget, TransformerRegistry};

fn make_point(ast: &mut SwiftAst, x: ExprId, y: ExprId) -> ExprId {
    let callee = ast.identifier("CGPoint");
    ast.call(
        callee,
        vec![CallArgument::labeled("x", x), CallArgument::labeled("y", y)],
    )
}

fn constructor(
    objc_name: &'static str,
    swift_name: &'static str,
    labels: &[&'static str],
) -> FunctionTransformer {
    FunctionTransformer::new(
        objc_name,
        TransformTarget::Method {
            name: swift_name,
            first_arg_is_receiver: false,
            args: labels
                .iter()
                .map(|label| ArgStrategy::labeled(label, ArgStrategy::AsIs))
                .collect(),
        },
    )
}

fn getter(objc_name: &'static str, property: &'static str) -> FunctionTransformer {
    FunctionTransformer::new(objc_name, TransformTarget::PropertyGetter(property))
}

/// Path mutation taking a merged `CGPoint` under a `to:` label; the
/// transform argument in slot 1 is discarded.
fn path_point_method(objc_name: &'static str, swift_name: &'static str) -> FunctionTransformer {
    FunctionTransformer::new(
        objc_name,
        TransformTarget::Method {
            name: swift_name,
            first_arg_is_receiver: true,
            args: vec![ArgStrategy::labeled(
                "to",
                ArgStrategy::MergingArguments(1, 2, make_point),
            )],
        },
    )
}

/// The transformers the rewriter registers out of the box.
pub fn core_graphics_registry() -> TransformerRegistry {
    let mut registry = TransformerRegistry::new();

    registry.register(constructor("CGPointMake", "CGPoint", &["x", "y"]));
    registry.register(constructor("CGSizeMake", "CGSize", &["width", "height"]));
    registry.register(constructor("CGVectorMake", "CGVector", &["dx", "dy"]));
    registry.register(constructor(
        "CGRectMake",
        "CGRect",
        &["x", "y", "width", "height"],
    ));

    registry.register(getter("CGRectGetMinX", "minX"));
    registry.register(getter("CGRectGetMinY", "minY"));
    registry.register(getter("CGRectGetMidX", "midX"));
    registry.register(getter("CGRectGetMidY", "midY"));
    registry.register(getter("CGRectGetMaxX", "maxX"));
    registry.register(getter("CGRectGetMaxY", "maxY"));
    registry.register(getter("CGRectGetWidth", "width"));
    registry.register(getter("CGRectGetHeight", "height"));

    registry.register(path_point_method("CGPathMoveToPoint", "move"));
    registry.register(path_point_method("CGPathAddLineToPoint", "addLine"));

    registry.register(FunctionTransformer::new(
        "CGRectIsNull",
        TransformTarget::PropertyGetter("isNull"),
    ));
    registry.register(FunctionTransformer::new(
        "CGRectIsEmpty",
        TransformTarget::PropertyGetter("isEmpty"),
    ));

    registry
}
