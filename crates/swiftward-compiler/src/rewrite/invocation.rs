//! The function-invocation transformer engine.
//!
//! A transformer is a declarative record: the Objective-C free-function
//! name it matches, a target shape (method call with optional receiver
//! promotion, property getter, property setter), and per-argument
//! strategies describing how each produced argument is built from the
//! source arguments.
//!
//! # Cursor discipline
//!
//! Strategies consume positional slots left to right. `MergingArguments`
//! consumes two slots regardless of which source indices it reads, and an
//! `OmitIf` that drops its output still consumes whatever its inner
//! strategy consumes — the cursor never rewinds. `FromArgIndex` reads
//! without consuming. Indices are relative to the argument list after
//! receiver promotion removed the first source argument.

use std::collections::HashSet;

use swiftward_ast::{
    walk_expr_children, CallArgument, ExprId, ExprKind, ExpressionVisitor, PostfixOp,
    StatementVisitor, StmtId, SwiftAst,
};

use super::{ExpressionPass, PassContext};

/// Builds a synthesized expression.
pub type MakeExpr = fn(&mut SwiftAst) -> ExprId;

/// Combines two source expressions into one argument.
pub type MergeExprs = fn(&mut SwiftAst, ExprId, ExprId) -> ExprId;

/// Wraps one produced expression.
pub type WrapExpr = fn(&mut SwiftAst, ExprId) -> ExprId;

/// How one target argument is produced from the source arguments.
#[derive(Clone)]
pub enum ArgStrategy {
    /// One source argument, in positional order, unlabeled.
    AsIs,
    /// References a source argument by index without consuming a slot.
    FromArgIndex(usize),
    /// A statically synthesized expression; consumes nothing.
    Fixed(MakeExpr),
    /// Consumes two positional slots and merges the expressions at the two
    /// given source indices.
    MergingArguments(usize, usize, MergeExprs),
    /// Applies a wrapper to the inner strategy's expression.
    Transformed(WrapExpr, Box<ArgStrategy>),
    /// Drops the argument when the inner expression equals the one built
    /// by the predicate maker. Consumption still happens.
    OmitIf(MakeExpr, Box<ArgStrategy>),
    /// Labels the inner strategy's output.
    Labeled(&'static str, Box<ArgStrategy>),
}

impl ArgStrategy {
    pub fn labeled(label: &'static str, inner: ArgStrategy) -> ArgStrategy {
        ArgStrategy::Labeled(label, Box::new(inner))
    }

    pub fn transformed(wrap: WrapExpr, inner: ArgStrategy) -> ArgStrategy {
        ArgStrategy::Transformed(wrap, Box::new(inner))
    }

    pub fn omit_if(make: MakeExpr, inner: ArgStrategy) -> ArgStrategy {
        ArgStrategy::OmitIf(make, Box::new(inner))
    }

    /// Positional slots this strategy consumes.
    fn consumed_slots(&self) -> usize {
        match self {
            ArgStrategy::AsIs => 1,
            ArgStrategy::FromArgIndex(_) | ArgStrategy::Fixed(_) => 0,
            ArgStrategy::MergingArguments(..) => 2,
            ArgStrategy::Transformed(_, inner)
            | ArgStrategy::OmitIf(_, inner)
            | ArgStrategy::Labeled(_, inner) => inner.consumed_slots(),
        }
    }

    /// Highest source index this strategy references, if any.
    fn max_referenced(&self) -> Option<usize> {
        match self {
            ArgStrategy::AsIs | ArgStrategy::Fixed(_) => None,
            ArgStrategy::FromArgIndex(index) => Some(*index),
            ArgStrategy::MergingArguments(i, j, _) => Some((*i).max(*j)),
            ArgStrategy::Transformed(_, inner)
            | ArgStrategy::OmitIf(_, inner)
            | ArgStrategy::Labeled(_, inner) => inner.max_referenced(),
        }
    }
}

impl std::fmt::Debug for ArgStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgStrategy::AsIs => f.write_str("AsIs"),
            ArgStrategy::FromArgIndex(i) => write!(f, "FromArgIndex({i})"),
            ArgStrategy::Fixed(_) => f.write_str("Fixed(..)"),
            ArgStrategy::MergingArguments(i, j, _) => write!(f, "MergingArguments({i}, {j}, ..)"),
            ArgStrategy::Transformed(_, inner) => write!(f, "Transformed(.., {inner:?})"),
            ArgStrategy::OmitIf(_, inner) => write!(f, "OmitIf(.., {inner:?})"),
            ArgStrategy::Labeled(label, inner) => write!(f, "Labeled({label:?}, {inner:?})"),
        }
    }
}

/// The shape a matched call is rewritten into.
#[derive(Debug, Clone)]
pub enum TransformTarget {
    Method {
        name: &'static str,
        first_arg_is_receiver: bool,
        args: Vec<ArgStrategy>,
    },
    PropertyGetter(&'static str),
    PropertySetter(&'static str),
}

/// One declarative rewrite rule for a free-function call.
#[derive(Debug, Clone)]
pub struct FunctionTransformer {
    pub objc_name: &'static str,
    pub target: TransformTarget,
    required_args: usize,
}

impl FunctionTransformer {
    pub fn new(objc_name: &'static str, target: TransformTarget) -> Self {
        let required_args = match &target {
            TransformTarget::Method {
                first_arg_is_receiver,
                args,
                ..
            } => {
                let consumed: usize = args.iter().map(ArgStrategy::consumed_slots).sum();
                let referenced = args
                    .iter()
                    .filter_map(ArgStrategy::max_referenced)
                    .max()
                    .map(|max| max + 1)
                    .unwrap_or(0);
                consumed.max(referenced) + usize::from(*first_arg_is_receiver)
            }
            TransformTarget::PropertyGetter(_) => 1,
            TransformTarget::PropertySetter(_) => 2,
        };
        Self {
            objc_name,
            target,
            required_args,
        }
    }

    pub fn required_argument_count(&self) -> usize {
        self.required_args
    }

    /// Whether this transformer matches the given postfix expression: an
    /// identifier naming the function, called with exactly the required
    /// argument count.
    pub fn can_apply(&self, ast: &SwiftAst, expr: ExprId) -> bool {
        let ExprKind::Postfix {
            base,
            op: PostfixOp::Call { arguments },
        } = ast.expr_kind(expr)
        else {
            return false;
        };
        if arguments.len() != self.required_args {
            return false;
        }
        ast.expr_kind(*base).as_identifier() == Some(self.objc_name)
    }

    /// Rewrites the call, returning the replacement expression. The
    /// replacement carries the original call's resolved type; the original
    /// node is left detached for the caller to swap out.
    pub fn attempt_apply(&self, ast: &mut SwiftAst, expr: ExprId) -> Option<ExprId> {
        if !self.can_apply(ast, expr) {
            return None;
        }
        let ExprKind::Postfix {
            op: PostfixOp::Call { arguments },
            ..
        } = ast.expr_kind(expr).clone()
        else {
            return None;
        };
        let source_args: Vec<ExprId> = arguments.iter().map(|a| a.value).collect();

        // The original call is discarded wholesale; its children are free
        // to be re-attached.
        for argument in &source_args {
            ast.clear_expr_parent(*argument);
        }

        let mut used: HashSet<ExprId> = HashSet::new();
        let result = match &self.target {
            TransformTarget::Method {
                name,
                first_arg_is_receiver,
                args,
            } => {
                let (receiver, rest) = if *first_arg_is_receiver {
                    let (first, rest) = source_args.split_first()?;
                    (Some(*first), rest)
                } else {
                    (None, source_args.as_slice())
                };

                let mut produced: Vec<CallArgument> = Vec::with_capacity(args.len());
                let mut cursor = 0usize;
                for strategy in args {
                    if let Some(argument) =
                        produce(strategy, ast, rest, &mut cursor, &mut used)?
                    {
                        produced.push(argument);
                    }
                }

                let base = match receiver {
                    Some(receiver) => {
                        let receiver = take(ast, receiver, &mut used);
                        ast.member(receiver, *name)
                    }
                    None => ast.identifier(*name),
                };
                ast.call(base, produced)
            }
            TransformTarget::PropertyGetter(name) => {
                let receiver = take(ast, *source_args.first()?, &mut used);
                ast.member(receiver, *name)
            }
            TransformTarget::PropertySetter(name) => {
                let receiver = take(ast, *source_args.first()?, &mut used);
                let value = take(ast, *source_args.get(1)?, &mut used);
                let member = ast.member(receiver, *name);
                ast.add_expr(ExprKind::Assignment {
                    lhs: member,
                    op: swiftward_ast::AssignOp::Assign,
                    rhs: value,
                })
            }
        };

        let resolved = ast.resolved_type(expr).cloned();
        ast.set_resolved_type(result, resolved);
        Some(result)
    }
}

/// Takes a source expression for reuse; a second reference deep-copies so
/// no node gains two parents.
fn take(ast: &mut SwiftAst, id: ExprId, used: &mut HashSet<ExprId>) -> ExprId {
    if used.insert(id) {
        id
    } else {
        ast.deep_copy_expr(id)
    }
}

/// Runs one strategy. `Ok(None)`-style inner `Option` means the argument
/// was omitted; the outer `Option` is a structural failure.
fn produce(
    strategy: &ArgStrategy,
    ast: &mut SwiftAst,
    args: &[ExprId],
    cursor: &mut usize,
    used: &mut HashSet<ExprId>,
) -> Option<Option<CallArgument>> {
    match strategy {
        ArgStrategy::AsIs => {
            let id = *args.get(*cursor)?;
            *cursor += 1;
            let id = take(ast, id, used);
            Some(Some(CallArgument::unlabeled(id)))
        }
        ArgStrategy::FromArgIndex(index) => {
            let id = *args.get(*index)?;
            let id = take(ast, id, used);
            Some(Some(CallArgument::unlabeled(id)))
        }
        ArgStrategy::Fixed(make) => {
            let id = make(ast);
            Some(Some(CallArgument::unlabeled(id)))
        }
        ArgStrategy::MergingArguments(i, j, merge) => {
            if args.len() < *cursor + 2 {
                return None;
            }
            let a = *args.get(*i)?;
            let b = *args.get(*j)?;
            *cursor += 2;
            let a = take(ast, a, used);
            let b = take(ast, b, used);
            let merged = merge(ast, a, b);
            Some(Some(CallArgument::unlabeled(merged)))
        }
        ArgStrategy::Transformed(wrap, inner) => {
            let inner = produce(inner, ast, args, cursor, used)?;
            Some(inner.map(|argument| {
                let wrapped = wrap(ast, argument.value);
                CallArgument {
                    label: argument.label,
                    value: wrapped,
                }
            }))
        }
        ArgStrategy::OmitIf(make, inner) => {
            // Consumption happens before the comparison; omission never
            // rewinds the cursor.
            let produced = produce(inner, ast, args, cursor, used)?;
            let Some(argument) = produced else {
                return Some(None);
            };
            let sentinel = make(ast);
            if ast.expr_eq(argument.value, sentinel) {
                Some(None)
            } else {
                Some(Some(argument))
            }
        }
        ArgStrategy::Labeled(label, inner) => {
            let produced = produce(inner, ast, args, cursor, used)?;
            Some(produced.map(|argument| CallArgument {
                label: Some((*label).to_string()),
                value: argument.value,
            }))
        }
    }
}

/// Ordered transformer list; first registered wins, silently.
#[derive(Debug, Clone, Default)]
pub struct TransformerRegistry {
    transformers: Vec<FunctionTransformer>,
}

impl TransformerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, transformer: FunctionTransformer) {
        self.transformers.push(transformer);
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// First registered transformer that applies to `expr`.
    pub fn find_match(&self, ast: &SwiftAst, expr: ExprId) -> Option<&FunctionTransformer> {
        self.transformers.iter().find(|t| t.can_apply(ast, expr))
    }
}

/// The pass wiring the registry into the pipeline: pre-order, at most one
/// application per call site per iteration.
pub struct InvocationTransformPass {
    registry: TransformerRegistry,
}

impl InvocationTransformPass {
    pub fn new(registry: TransformerRegistry) -> Self {
        Self { registry }
    }
}

impl ExpressionPass for InvocationTransformPass {
    fn name(&self) -> &'static str {
        "invocation-transform"
    }

    fn run(&mut self, ctx: &mut PassContext<'_>, body: StmtId) {
        let mut visitor = TransformVisitor {
            registry: &self.registry,
            changed: false,
        };
        visitor.visit_stmt(ctx.ast, body);
        if visitor.changed {
            ctx.mark_changed();
        }
    }
}

struct TransformVisitor<'a> {
    registry: &'a TransformerRegistry,
    changed: bool,
}

impl StatementVisitor for TransformVisitor<'_> {
    fn visit_expr_root(&mut self, ast: &mut SwiftAst, id: ExprId) {
        self.visit_expr(ast, id);
    }
}

impl ExpressionVisitor for TransformVisitor<'_> {
    type Output = ();

    /// Pre-order: try the site itself, then descend. A rewritten site is
    /// not revisited this iteration.
    fn default_result(&mut self, ast: &mut SwiftAst, id: ExprId) {
        if let Some(transformer) = self.registry.find_match(ast, id) {
            if let Some(replacement) = transformer.attempt_apply(ast, id) {
                ast.replace_expr(id, replacement);
                self.changed = true;
                return;
            }
        }
        walk_expr_children(self, ast, id);
    }
}
