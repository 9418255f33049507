//! Idiom cleanups: small structural rewrites after the main transforms.
//!
//! - `T.alloc().init()` / `T.alloc().initWithX(...)` collapse into Swift
//!   initializer calls `T()` / `T(x: ...)`.
//! - A call or member access on a conditional cast gains optional
//!   chaining: `(x as? T).m()` → `(x as? T)?.m()`.
//! - An assignment of a conditional cast into an implicitly-unwrapped
//!   target becomes a forced cast.
//!
//! One [`ExpressionVisitor`] drives all three: each site is tried before
//! descending, and a rewritten site is not revisited within the iteration.

use swiftward_ast::{
    walk_expr_children, CallArgument, ExprId, ExprKind, ExpressionVisitor, PostfixOp,
    StatementVisitor, StmtId, SwiftAst,
};
use swiftward_core::utils::init_label_from_keyword;
use swiftward_core::SwiftType;

use super::{ExpressionPass, PassContext};

pub struct IdiomCleanupPass;

impl ExpressionPass for IdiomCleanupPass {
    fn name(&self) -> &'static str {
        "idiom-cleanup"
    }

    fn run(&mut self, ctx: &mut PassContext<'_>, body: StmtId) {
        let mut visitor = IdiomVisitor { changed: false };
        visitor.visit_stmt(ctx.ast, body);
        if visitor.changed {
            ctx.mark_changed();
        }
    }
}

struct IdiomVisitor {
    changed: bool,
}

impl StatementVisitor for IdiomVisitor {
    fn visit_expr_root(&mut self, ast: &mut SwiftAst, id: ExprId) {
        self.visit_expr(ast, id);
    }
}

impl ExpressionVisitor for IdiomVisitor {
    type Output = ();

    /// Every variant funnels through here: rewrite attempts first, then
    /// the default child walk.
    fn default_result(&mut self, ast: &mut SwiftAst, id: ExprId) {
        if rewrite_alloc_init(ast, id) || chain_cast_access(ast, id) {
            self.changed = true;
            return;
        }
        if force_cast_into_unwrapped(ast, id) {
            self.changed = true;
        }
        walk_expr_children(self, ast, id);
    }
}

/// `T.alloc().init()` → `T()`; `T.alloc().initWithFrame(f)` → `T(frame: f)`.
fn rewrite_alloc_init(ast: &mut SwiftAst, expr: ExprId) -> bool {
    let ExprKind::Postfix {
        base,
        op: PostfixOp::Call { arguments },
    } = ast.expr_kind(expr)
    else {
        return false;
    };
    let arguments = arguments.clone();

    let ExprKind::Postfix {
        base: alloc_call,
        op: PostfixOp::Member { name, .. },
    } = ast.expr_kind(*base)
    else {
        return false;
    };
    let init_name = name.clone();
    if init_name != "init" && !init_name.starts_with("initWith") {
        return false;
    }

    let Some(type_name) = alloc_receiver_type_name(ast, *alloc_call) else {
        return false;
    };

    let mut produced: Vec<CallArgument> = Vec::with_capacity(arguments.len());
    for (index, argument) in arguments.iter().enumerate() {
        ast.clear_expr_parent(argument.value);
        let label = if index == 0 {
            init_label_from_keyword(&init_name)
        } else {
            argument.label.clone()
        };
        produced.push(CallArgument {
            label,
            value: argument.value,
        });
    }

    let callee = ast.identifier(type_name.clone());
    let replacement = ast.call(callee, produced);
    ast.set_resolved_type(replacement, Some(SwiftType::type_name(type_name)));
    ast.replace_expr(expr, replacement);
    true
}

/// Matches `T.alloc()` and yields `T`.
fn alloc_receiver_type_name(ast: &SwiftAst, expr: ExprId) -> Option<String> {
    let ExprKind::Postfix {
        base,
        op: PostfixOp::Call { arguments },
    } = ast.expr_kind(expr)
    else {
        return None;
    };
    if !arguments.is_empty() {
        return None;
    }
    let ExprKind::Postfix {
        base: receiver,
        op: PostfixOp::Member { name, .. },
    } = ast.expr_kind(*base)
    else {
        return None;
    };
    if name != "alloc" {
        return None;
    }
    let name = ast.expr_kind(*receiver).as_identifier()?;
    // Type references read as uppercase-leading identifiers.
    name.chars()
        .next()
        .is_some_and(|c| c.is_ascii_uppercase())
        .then(|| name.to_string())
}

/// A member access or call whose base is a conditional cast chains
/// optionally: `(x as? T).m` → `(x as? T)?.m`.
fn chain_cast_access(ast: &mut SwiftAst, expr: ExprId) -> bool {
    let ExprKind::Postfix { base, op } = ast.expr_kind(expr) else {
        return false;
    };
    let base = *base;

    let member_is_plain = matches!(
        op,
        PostfixOp::Member {
            optional_access: false,
            ..
        }
    );
    if !member_is_plain {
        return false;
    }
    if !is_conditional_cast(ast, base) {
        return false;
    }

    let ExprKind::Postfix { op, .. } = &mut ast.expr_mut(expr).kind else {
        return false;
    };
    if let PostfixOp::Member {
        optional_access, ..
    } = op
    {
        *optional_access = true;
        return true;
    }
    false
}

fn is_conditional_cast(ast: &SwiftAst, expr: ExprId) -> bool {
    match ast.expr_kind(expr) {
        ExprKind::Cast { optional, .. } => *optional,
        ExprKind::Parens(inner) => is_conditional_cast(ast, *inner),
        _ => false,
    }
}

/// `x = e as? T` where `x: T!` forces the cast: the target cannot hold the
/// failure case meaningfully anyway.
fn force_cast_into_unwrapped(ast: &mut SwiftAst, expr: ExprId) -> bool {
    let ExprKind::Assignment { lhs, rhs, .. } = ast.expr_kind(expr) else {
        return false;
    };
    let (lhs, rhs) = (*lhs, *rhs);

    let lhs_is_unwrapped = matches!(
        ast.resolved_type(lhs),
        Some(SwiftType::ImplicitlyUnwrappedOptional(_))
    );
    if !lhs_is_unwrapped {
        return false;
    }

    if let ExprKind::Cast { optional, .. } = &mut ast.expr_mut(rhs).kind {
        if *optional {
            *optional = false;
            return true;
        }
    }
    false
}
