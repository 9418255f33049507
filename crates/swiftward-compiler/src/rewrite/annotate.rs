//! Type annotation pass: resolves expression types bottom-up.
//!
//! Implemented as an [`ExpressionVisitor`] with one method per variant:
//! leaves first (literals, identifiers through scope, parameters, and the
//! intention graph), then member accesses, then call sites through the
//! overload resolver. The statement side overrides
//! [`StatementVisitor::visit_stmt`] only where scoping demands it
//! (compounds, declarations, loops, switch cases) and defers to the
//! default walk everywhere else.
//!
//! Resolution failures are contained: when a receiver type is known but
//! the member is not, the expression is marked with the error sentinel and
//! downstream passes skip it silently.

use std::collections::HashMap;

use swiftward_ast::{
    walk_stmt, BinaryOp, CallArgument, ExprId, ExprKind, ExpressionVisitor, Literal, Pattern,
    PostfixOp, SizeOfTarget, StatementVisitor, StmtId, StmtKind, SwiftAst, UnaryOp,
};
use swiftward_core::SwiftType;

use super::{BodyEnv, ExpressionPass, PassContext};
use crate::analyze::{OverloadArgument, OverloadResolver, TypeSystem};

pub struct TypeAnnotationPass;

impl ExpressionPass for TypeAnnotationPass {
    fn name(&self) -> &'static str {
        "type-annotation"
    }

    fn run(&mut self, ctx: &mut PassContext<'_>, body: StmtId) {
        let mut visitor = AnnotationVisitor::new(ctx.types, ctx.resolver, ctx.env);
        visitor.visit_stmt(ctx.ast, body);
        if visitor.changed {
            ctx.mark_changed();
        }
    }
}

#[derive(Default)]
struct Scopes {
    frames: Vec<HashMap<String, SwiftType>>,
}

impl Scopes {
    fn push(&mut self) {
        self.frames.push(HashMap::new());
    }

    fn pop(&mut self) {
        self.frames.pop();
    }

    fn declare(&mut self, name: String, ty: SwiftType) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name, ty);
        }
    }

    fn lookup(&self, name: &str) -> Option<&SwiftType> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }
}

/// The annotating visitor; carries the scope stack and change flag.
struct AnnotationVisitor<'a> {
    types: &'a dyn TypeSystem,
    resolver: &'a OverloadResolver,
    env: &'a BodyEnv,
    scopes: Scopes,
    changed: bool,
}

impl<'a> AnnotationVisitor<'a> {
    fn new(types: &'a dyn TypeSystem, resolver: &'a OverloadResolver, env: &'a BodyEnv) -> Self {
        let mut scopes = Scopes::default();
        scopes.push();
        for (name, ty) in &env.parameters {
            scopes.declare(name.clone(), ty.clone());
        }
        Self {
            types,
            resolver,
            env,
            scopes,
            changed: false,
        }
    }

    /// Records a freshly computed type, tracking whether anything changed.
    fn record(
        &mut self,
        ast: &mut SwiftAst,
        id: ExprId,
        ty: Option<SwiftType>,
    ) -> Option<SwiftType> {
        if ast.resolved_type(id) != ty.as_ref() {
            ast.set_resolved_type(id, ty.clone());
            self.changed = true;
        }
        ty
    }
}

impl StatementVisitor for AnnotationVisitor<'_> {
    fn visit_expr_root(&mut self, ast: &mut SwiftAst, id: ExprId) {
        self.visit_expr(ast, id);
    }

    /// Scope-bearing statements get explicit handling; the rest take the
    /// default walk.
    fn visit_stmt(&mut self, ast: &mut SwiftAst, id: StmtId) {
        match ast.stmt_kind(id).clone() {
            StmtKind::Compound(children) => {
                self.scopes.push();
                for child in children {
                    self.visit_stmt(ast, child);
                }
                self.scopes.pop();
            }
            StmtKind::VariableDeclarations(decls) => {
                for decl in decls {
                    if let Some(init) = decl.initialization {
                        self.visit_expr(ast, init);
                    }
                    self.scopes.declare(decl.name.clone(), decl.ty.clone());
                }
            }
            StmtKind::For {
                pattern,
                iterated,
                body,
            } => {
                self.visit_expr(ast, iterated);
                self.scopes.push();
                if let Pattern::Identifier(name) = &pattern {
                    if let Some(SwiftType::Array(element)) =
                        ast.resolved_type(iterated).map(|t| t.normalized())
                    {
                        self.scopes.declare(name.clone(), (*element).clone());
                    }
                }
                self.visit_stmt(ast, body);
                self.scopes.pop();
            }
            StmtKind::Switch {
                scrutinee,
                cases,
                default,
            } => {
                self.visit_expr(ast, scrutinee);
                for case in &cases {
                    for pattern in &case.patterns {
                        for expr in pattern.expressions() {
                            self.visit_expr(ast, expr);
                        }
                    }
                    self.scopes.push();
                    for child in &case.body {
                        self.visit_stmt(ast, *child);
                    }
                    self.scopes.pop();
                }
                if let Some(default) = &default {
                    self.scopes.push();
                    for child in default {
                        self.visit_stmt(ast, *child);
                    }
                    self.scopes.pop();
                }
            }
            _ => walk_stmt(self, ast, id),
        }
    }
}

impl ExpressionVisitor for AnnotationVisitor<'_> {
    type Output = Option<SwiftType>;

    fn default_result(&mut self, _ast: &mut SwiftAst, _id: ExprId) -> Option<SwiftType> {
        None
    }

    fn visit_constant(&mut self, ast: &mut SwiftAst, id: ExprId) -> Option<SwiftType> {
        let ExprKind::Constant(literal) = ast.expr_kind(id).clone() else {
            return None;
        };
        let ty = match literal {
            Literal::Integer(_) => Some(SwiftType::int()),
            Literal::Float(_) => Some(SwiftType::double()),
            Literal::String(_) => Some(SwiftType::string()),
            Literal::Boolean(_) => Some(SwiftType::bool()),
            // `nil` takes its type from context; leave it open.
            Literal::Nil => None,
        };
        self.record(ast, id, ty)
    }

    fn visit_array_literal(&mut self, ast: &mut SwiftAst, id: ExprId) -> Option<SwiftType> {
        let ExprKind::ArrayLiteral(items) = ast.expr_kind(id).clone() else {
            return None;
        };
        let mut element: Option<SwiftType> = None;
        let mut uniform = true;
        for item in items {
            let item_ty = self.visit_expr(ast, item);
            match (&element, item_ty) {
                (None, Some(ty)) => element = Some(ty),
                (Some(existing), Some(ty)) if *existing != ty => uniform = false,
                _ => {}
            }
        }
        let ty = match element {
            Some(element) if uniform => Some(SwiftType::array(element)),
            _ => None,
        };
        self.record(ast, id, ty)
    }

    fn visit_dictionary_literal(&mut self, ast: &mut SwiftAst, id: ExprId) -> Option<SwiftType> {
        let ExprKind::DictionaryLiteral(pairs) = ast.expr_kind(id).clone() else {
            return None;
        };
        for (key, value) in pairs {
            self.visit_expr(ast, key);
            self.visit_expr(ast, value);
        }
        self.record(ast, id, None)
    }

    fn visit_identifier(&mut self, ast: &mut SwiftAst, id: ExprId) -> Option<SwiftType> {
        let ExprKind::Identifier(name) = ast.expr_kind(id).clone() else {
            return None;
        };
        let ty = if name == "self" {
            self.env.self_type.clone()
        } else if let Some(ty) = self.scopes.lookup(&name) {
            Some(ty.clone())
        } else {
            self.types.identifier_type(&name)
        };
        self.record(ast, id, ty)
    }

    fn visit_unary(&mut self, ast: &mut SwiftAst, id: ExprId) -> Option<SwiftType> {
        let ExprKind::Unary { op, operand } = ast.expr_kind(id).clone() else {
            return None;
        };
        let operand_ty = self.visit_expr(ast, operand);
        let ty = match op {
            UnaryOp::Not => Some(SwiftType::bool()),
            UnaryOp::Negate | UnaryOp::BitwiseNot => operand_ty,
        };
        self.record(ast, id, ty)
    }

    fn visit_binary(&mut self, ast: &mut SwiftAst, id: ExprId) -> Option<SwiftType> {
        let ExprKind::Binary { lhs, op, rhs } = ast.expr_kind(id).clone() else {
            return None;
        };
        let lhs_ty = self.visit_expr(ast, lhs);
        let rhs_ty = self.visit_expr(ast, rhs);
        let ty = if op.is_comparison() || op.is_logical() {
            Some(SwiftType::bool())
        } else if op == BinaryOp::NilCoalesce {
            rhs_ty
        } else {
            lhs_ty.or(rhs_ty)
        };
        self.record(ast, id, ty)
    }

    fn visit_ternary(&mut self, ast: &mut SwiftAst, id: ExprId) -> Option<SwiftType> {
        let ExprKind::Ternary {
            condition,
            if_true,
            if_false,
        } = ast.expr_kind(id).clone()
        else {
            return None;
        };
        self.visit_expr(ast, condition);
        let then_ty = self.visit_expr(ast, if_true);
        self.visit_expr(ast, if_false);
        self.record(ast, id, then_ty)
    }

    fn visit_assignment(&mut self, ast: &mut SwiftAst, id: ExprId) -> Option<SwiftType> {
        let ExprKind::Assignment { lhs, rhs, .. } = ast.expr_kind(id).clone() else {
            return None;
        };
        self.visit_expr(ast, lhs);
        self.visit_expr(ast, rhs);
        self.record(ast, id, Some(SwiftType::VOID))
    }

    fn visit_cast(&mut self, ast: &mut SwiftAst, id: ExprId) -> Option<SwiftType> {
        let ExprKind::Cast { expr, to, optional } = ast.expr_kind(id).clone() else {
            return None;
        };
        self.visit_expr(ast, expr);
        let ty = if optional {
            Some(SwiftType::optional(to))
        } else {
            Some(to)
        };
        self.record(ast, id, ty)
    }

    fn visit_type_check(&mut self, ast: &mut SwiftAst, id: ExprId) -> Option<SwiftType> {
        let ExprKind::TypeCheck { expr, .. } = ast.expr_kind(id).clone() else {
            return None;
        };
        self.visit_expr(ast, expr);
        self.record(ast, id, Some(SwiftType::bool()))
    }

    fn visit_parens(&mut self, ast: &mut SwiftAst, id: ExprId) -> Option<SwiftType> {
        let ExprKind::Parens(inner) = ast.expr_kind(id).clone() else {
            return None;
        };
        let ty = self.visit_expr(ast, inner);
        self.record(ast, id, ty)
    }

    fn visit_closure(&mut self, ast: &mut SwiftAst, id: ExprId) -> Option<SwiftType> {
        let ExprKind::Closure {
            parameters,
            return_type,
            body,
        } = ast.expr_kind(id).clone()
        else {
            return None;
        };
        self.scopes.push();
        for parameter in &parameters {
            self.scopes
                .declare(parameter.name.clone(), parameter.ty.clone());
        }
        self.visit_stmt(ast, body);
        self.scopes.pop();
        let ty = Some(SwiftType::block(
            return_type,
            parameters.into_iter().map(|p| p.ty),
        ));
        self.record(ast, id, ty)
    }

    fn visit_size_of(&mut self, ast: &mut SwiftAst, id: ExprId) -> Option<SwiftType> {
        let ExprKind::SizeOf(target) = ast.expr_kind(id).clone() else {
            return None;
        };
        if let SizeOfTarget::Expression(inner) = target {
            self.visit_expr(ast, inner);
        }
        self.record(ast, id, Some(SwiftType::int()))
    }

    fn visit_postfix(&mut self, ast: &mut SwiftAst, id: ExprId) -> Option<SwiftType> {
        let ExprKind::Postfix { base, op } = ast.expr_kind(id).clone() else {
            return None;
        };
        let base_ty = self.visit_expr(ast, base);

        let ty: Option<SwiftType> = match op {
            PostfixOp::Member { ref name, .. } => match base_ty {
                Some(base_ty) if !base_ty.is_error() => {
                    let receiver = receiver_type(&base_ty);
                    match self.types.member_type(&receiver, name) {
                        Some(ty) => Some(ty),
                        // The receiver is known but the member is not:
                        // mark with the sentinel so later passes skip it.
                        None => Some(SwiftType::Error),
                    }
                }
                _ => None,
            },
            PostfixOp::Call { ref arguments } => self.annotate_call(ast, base, &base_ty, arguments),
            PostfixOp::Subscript { index, .. } => {
                self.visit_expr(ast, index);
                match base_ty.map(|t| t.deep_unwrapped().normalized()) {
                    Some(SwiftType::Array(element)) => Some(*element),
                    Some(SwiftType::Dictionary(_, value)) => Some(SwiftType::optional(*value)),
                    _ => None,
                }
            }
        };

        self.record(ast, id, ty)
    }
}

/// Optionals resolve members against their wrapped type.
fn receiver_type(ty: &SwiftType) -> SwiftType {
    ty.deep_unwrapped().normalized()
}

impl AnnotationVisitor<'_> {
    fn annotate_call(
        &mut self,
        ast: &mut SwiftAst,
        base: ExprId,
        base_ty: &Option<SwiftType>,
        arguments: &[CallArgument],
    ) -> Option<SwiftType> {
        let mut overload_args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            let arg_ty = self.visit_expr(ast, argument.value);
            let literal_kind = ast.expr_kind(argument.value).literal_kind();
            overload_args.push(OverloadArgument {
                ty: arg_ty,
                is_literal: literal_kind.is_some(),
                literal_kind,
            });
        }

        // `recv.method(args)` — overloads from the receiver's type.
        let base_kind = ast.expr_kind(base).clone();
        match base_kind {
            ExprKind::Postfix {
                base: receiver,
                op: PostfixOp::Member { ref name, .. },
            } => {
                let receiver_ty = ast.resolved_type(receiver).cloned()?;
                if receiver_ty.is_error() {
                    return None;
                }
                let signatures = match &receiver_ty.deep_unwrapped().normalized() {
                    SwiftType::Metatype(inner) => {
                        // Static call: `Type.method(...)`.
                        let mut sigs = self.types.method_signatures(inner, name);
                        sigs.retain(|s| s.is_static);
                        sigs
                    }
                    other => {
                        let mut sigs = self.types.method_signatures(other, name);
                        sigs.retain(|s| !s.is_static);
                        sigs
                    }
                };
                let selected = self
                    .resolver
                    .resolve(self.types, &signatures, &overload_args)?;
                Some(signatures[selected].return_type.clone())
            }
            ExprKind::Identifier(ref name) => {
                // `Type(...)` initializer calls resolve to the type itself.
                if let Some(SwiftType::Metatype(inner)) =
                    ast.resolved_type(base).map(|t| t.normalized())
                {
                    return Some((*inner).clone());
                }
                let signatures = self.types.function_signatures(name);
                let selected = self
                    .resolver
                    .resolve(self.types, &signatures, &overload_args)?;
                Some(signatures[selected].return_type.clone())
            }
            _ => {
                // Calling a block-typed value.
                match base_ty.as_ref().map(|t| t.deep_unwrapped().normalized()) {
                    Some(SwiftType::Block { return_type, .. }) => Some(*return_type),
                    _ => None,
                }
            }
        }
    }
}
