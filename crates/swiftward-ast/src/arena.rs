//! Id-indexed node storage with parent maintenance.

use swiftward_core::SwiftType;

use crate::expr::{CallArgument, ExprKind, Literal, PostfixOp, SizeOfTarget};
use crate::stmt::{Pattern, StmtKind, SwitchCase, VarDeclaration};
use crate::{ExprId, NodeId, SourceSpan, StmtId};

/// An expression node with its annotations.
#[derive(Debug, Clone)]
pub struct ExprData {
    pub kind: ExprKind,
    /// Filled in by the type-annotation pass; `None` before it runs.
    pub resolved_type: Option<SwiftType>,
    pub span: Option<SourceSpan>,
    pub(crate) parent: Option<NodeId>,
}

/// A statement node with its annotations.
#[derive(Debug, Clone)]
pub struct StmtData {
    pub kind: StmtKind,
    pub label: Option<String>,
    /// Leading comment lines, without the `//` marker.
    pub comments: Vec<String>,
    pub span: Option<SourceSpan>,
    pub(crate) parent: Option<NodeId>,
}

/// Arena holding one translation unit's Swift tree.
#[derive(Debug, Default, Clone)]
pub struct SwiftAst {
    exprs: Vec<ExprData>,
    stmts: Vec<StmtData>,
}

impl SwiftAst {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    pub fn expr(&self, id: ExprId) -> &ExprData {
        &self.exprs[id.index()]
    }

    /// Mutable node access. Child-id edits must go through the
    /// reparenting APIs; this is for in-place field tweaks.
    pub fn expr_mut(&mut self, id: ExprId) -> &mut ExprData {
        &mut self.exprs[id.index()]
    }

    pub fn stmt(&self, id: StmtId) -> &StmtData {
        &self.stmts[id.index()]
    }

    /// See [`SwiftAst::expr_mut`].
    pub fn stmt_mut(&mut self, id: StmtId) -> &mut StmtData {
        &mut self.stmts[id.index()]
    }

    pub fn expr_kind(&self, id: ExprId) -> &ExprKind {
        &self.exprs[id.index()].kind
    }

    pub fn stmt_kind(&self, id: StmtId) -> &StmtKind {
        &self.stmts[id.index()].kind
    }

    pub fn resolved_type(&self, id: ExprId) -> Option<&SwiftType> {
        self.exprs[id.index()].resolved_type.as_ref()
    }

    pub fn set_resolved_type(&mut self, id: ExprId, ty: Option<SwiftType>) {
        self.exprs[id.index()].resolved_type = ty;
    }

    pub fn set_expr_span(&mut self, id: ExprId, span: SourceSpan) {
        self.exprs[id.index()].span = Some(span);
    }

    pub fn set_stmt_span(&mut self, id: StmtId, span: SourceSpan) {
        self.stmts[id.index()].span = Some(span);
    }

    pub fn set_stmt_label(&mut self, id: StmtId, label: Option<String>) {
        self.stmts[id.index()].label = label;
    }

    pub fn push_stmt_comment(&mut self, id: StmtId, comment: impl Into<String>) {
        self.stmts[id.index()].comments.push(comment.into());
    }

    pub fn parent_of_expr(&self, id: ExprId) -> Option<NodeId> {
        self.exprs[id.index()].parent
    }

    pub fn parent_of_stmt(&self, id: StmtId) -> Option<NodeId> {
        self.stmts[id.index()].parent
    }

    // ------------------------------------------------------------------
    // Allocation
    // ------------------------------------------------------------------

    /// Allocates an expression node and attaches its children.
    pub fn add_expr(&mut self, kind: ExprKind) -> ExprId {
        let id = ExprId::from_raw(self.exprs.len() as u32);
        self.exprs.push(ExprData {
            kind,
            resolved_type: None,
            span: None,
            parent: None,
        });
        let (child_exprs, child_stmts) = expr_children(&self.exprs[id.index()].kind);
        for child in child_exprs {
            self.set_expr_parent(child, NodeId::Expr(id));
        }
        for child in child_stmts {
            self.set_stmt_parent(child, NodeId::Expr(id));
        }
        id
    }

    /// Allocates a statement node and attaches its children.
    pub fn add_stmt(&mut self, kind: StmtKind) -> StmtId {
        let id = StmtId::from_raw(self.stmts.len() as u32);
        self.stmts.push(StmtData {
            kind,
            label: None,
            comments: Vec::new(),
            span: None,
            parent: None,
        });
        let (child_exprs, child_stmts) = stmt_children(&self.stmts[id.index()].kind);
        for child in child_exprs {
            self.set_expr_parent(child, NodeId::Stmt(id));
        }
        for child in child_stmts {
            self.set_stmt_parent(child, NodeId::Stmt(id));
        }
        id
    }

    fn set_expr_parent(&mut self, child: ExprId, parent: NodeId) {
        let slot = &mut self.exprs[child.index()].parent;
        debug_assert!(
            slot.is_none(),
            "expression node attached to two parents: {child:?}"
        );
        *slot = Some(parent);
    }

    fn set_stmt_parent(&mut self, child: StmtId, parent: NodeId) {
        let slot = &mut self.stmts[child.index()].parent;
        debug_assert!(
            slot.is_none(),
            "statement node attached to two parents: {child:?}"
        );
        *slot = Some(parent);
    }

    // ------------------------------------------------------------------
    // Convenience constructors
    // ------------------------------------------------------------------

    pub fn identifier(&mut self, name: impl Into<String>) -> ExprId {
        self.add_expr(ExprKind::Identifier(name.into()))
    }

    pub fn integer(&mut self, value: i64) -> ExprId {
        self.add_expr(ExprKind::Constant(Literal::Integer(value)))
    }

    pub fn float(&mut self, value: f64) -> ExprId {
        self.add_expr(ExprKind::Constant(Literal::Float(value)))
    }

    pub fn string(&mut self, value: impl Into<String>) -> ExprId {
        self.add_expr(ExprKind::Constant(Literal::String(value.into())))
    }

    pub fn boolean(&mut self, value: bool) -> ExprId {
        self.add_expr(ExprKind::Constant(Literal::Boolean(value)))
    }

    pub fn nil(&mut self) -> ExprId {
        self.add_expr(ExprKind::Constant(Literal::Nil))
    }

    pub fn member(&mut self, base: ExprId, name: impl Into<String>) -> ExprId {
        self.add_expr(ExprKind::Postfix {
            base,
            op: PostfixOp::Member {
                name: name.into(),
                optional_access: false,
            },
        })
    }

    pub fn call(&mut self, base: ExprId, arguments: Vec<CallArgument>) -> ExprId {
        self.add_expr(ExprKind::Postfix {
            base,
            op: PostfixOp::Call { arguments },
        })
    }

    pub fn compound(&mut self, statements: Vec<StmtId>) -> StmtId {
        self.add_stmt(StmtKind::Compound(statements))
    }

    pub fn expr_stmt(&mut self, expression: ExprId) -> StmtId {
        self.add_stmt(StmtKind::Expressions(vec![expression]))
    }

    // ------------------------------------------------------------------
    // Reparenting
    // ------------------------------------------------------------------

    /// Detaches a node from its parent without rewriting the parent's child
    /// slot. Callers use this when the former parent is itself about to be
    /// replaced and discarded.
    pub fn clear_expr_parent(&mut self, id: ExprId) {
        self.exprs[id.index()].parent = None;
    }

    /// Swaps `new` into `old`'s position: `new` inherits the parent and the
    /// parent's child slot, `old` is detached and becomes unreachable.
    ///
    /// `new` must be unattached. If `old` was a root, the caller owns
    /// tracking the new root.
    pub fn replace_expr(&mut self, old: ExprId, new: ExprId) {
        debug_assert!(
            self.exprs[new.index()].parent.is_none(),
            "replacement node already attached: {new:?}"
        );
        let parent = self.exprs[old.index()].parent.take();
        if let Some(parent) = parent {
            match parent {
                NodeId::Expr(p) => {
                    replace_expr_in_expr_kind(&mut self.exprs[p.index()].kind, old, new);
                }
                NodeId::Stmt(p) => {
                    replace_expr_in_stmt_kind(&mut self.stmts[p.index()].kind, old, new);
                }
            }
        }
        self.exprs[new.index()].parent = parent;
    }

    // ------------------------------------------------------------------
    // Deep copy
    // ------------------------------------------------------------------

    /// Copies a subtree; the copy is structurally equal, carries the same
    /// annotations, and shares no parent links with the original.
    pub fn deep_copy_expr(&mut self, id: ExprId) -> ExprId {
        let kind = self.exprs[id.index()].kind.clone();
        let new_kind = match kind {
            ExprKind::Identifier(name) => ExprKind::Identifier(name),
            ExprKind::Constant(literal) => ExprKind::Constant(literal),
            ExprKind::ArrayLiteral(items) => ExprKind::ArrayLiteral(
                items.into_iter().map(|e| self.deep_copy_expr(e)).collect(),
            ),
            ExprKind::DictionaryLiteral(pairs) => ExprKind::DictionaryLiteral(
                pairs
                    .into_iter()
                    .map(|(k, v)| (self.deep_copy_expr(k), self.deep_copy_expr(v)))
                    .collect(),
            ),
            ExprKind::Unary { op, operand } => ExprKind::Unary {
                op,
                operand: self.deep_copy_expr(operand),
            },
            ExprKind::Binary { lhs, op, rhs } => ExprKind::Binary {
                lhs: self.deep_copy_expr(lhs),
                op,
                rhs: self.deep_copy_expr(rhs),
            },
            ExprKind::Ternary {
                condition,
                if_true,
                if_false,
            } => ExprKind::Ternary {
                condition: self.deep_copy_expr(condition),
                if_true: self.deep_copy_expr(if_true),
                if_false: self.deep_copy_expr(if_false),
            },
            ExprKind::Assignment { lhs, op, rhs } => ExprKind::Assignment {
                lhs: self.deep_copy_expr(lhs),
                op,
                rhs: self.deep_copy_expr(rhs),
            },
            ExprKind::Cast { expr, to, optional } => ExprKind::Cast {
                expr: self.deep_copy_expr(expr),
                to,
                optional,
            },
            ExprKind::TypeCheck { expr, ty } => ExprKind::TypeCheck {
                expr: self.deep_copy_expr(expr),
                ty,
            },
            ExprKind::Parens(inner) => ExprKind::Parens(self.deep_copy_expr(inner)),
            ExprKind::Postfix { base, op } => {
                let base = self.deep_copy_expr(base);
                let op = match op {
                    PostfixOp::Member {
                        name,
                        optional_access,
                    } => PostfixOp::Member {
                        name,
                        optional_access,
                    },
                    PostfixOp::Call { arguments } => PostfixOp::Call {
                        arguments: arguments
                            .into_iter()
                            .map(|a| CallArgument {
                                label: a.label,
                                value: self.deep_copy_expr(a.value),
                            })
                            .collect(),
                    },
                    PostfixOp::Subscript {
                        index,
                        optional_access,
                    } => PostfixOp::Subscript {
                        index: self.deep_copy_expr(index),
                        optional_access,
                    },
                };
                ExprKind::Postfix { base, op }
            }
            ExprKind::Closure {
                parameters,
                return_type,
                body,
            } => ExprKind::Closure {
                parameters,
                return_type,
                body: self.deep_copy_stmt(body),
            },
            ExprKind::SizeOf(target) => ExprKind::SizeOf(match target {
                SizeOfTarget::Type(ty) => SizeOfTarget::Type(ty),
                SizeOfTarget::Expression(e) => SizeOfTarget::Expression(self.deep_copy_expr(e)),
            }),
            ExprKind::Unknown(context) => ExprKind::Unknown(context),
        };
        let new = self.add_expr(new_kind);
        let (resolved_type, span) = {
            let original = &self.exprs[id.index()];
            (original.resolved_type.clone(), original.span)
        };
        self.exprs[new.index()].resolved_type = resolved_type;
        self.exprs[new.index()].span = span;
        new
    }

    /// Statement counterpart of [`SwiftAst::deep_copy_expr`]; preserves the
    /// label and comments.
    pub fn deep_copy_stmt(&mut self, id: StmtId) -> StmtId {
        let kind = self.stmts[id.index()].kind.clone();
        let new_kind = match kind {
            StmtKind::Compound(stmts) => StmtKind::Compound(
                stmts.into_iter().map(|s| self.deep_copy_stmt(s)).collect(),
            ),
            StmtKind::If {
                condition,
                binding,
                body,
                else_body,
            } => StmtKind::If {
                condition: self.deep_copy_expr(condition),
                binding: binding.map(|p| self.copy_pattern(p)),
                body: self.deep_copy_stmt(body),
                else_body: else_body.map(|s| self.deep_copy_stmt(s)),
            },
            StmtKind::While { condition, body } => StmtKind::While {
                condition: self.deep_copy_expr(condition),
                body: self.deep_copy_stmt(body),
            },
            StmtKind::RepeatWhile { condition, body } => StmtKind::RepeatWhile {
                condition: self.deep_copy_expr(condition),
                body: self.deep_copy_stmt(body),
            },
            StmtKind::For {
                pattern,
                iterated,
                body,
            } => StmtKind::For {
                pattern: self.copy_pattern(pattern),
                iterated: self.deep_copy_expr(iterated),
                body: self.deep_copy_stmt(body),
            },
            StmtKind::Switch {
                scrutinee,
                cases,
                default,
            } => StmtKind::Switch {
                scrutinee: self.deep_copy_expr(scrutinee),
                cases: cases
                    .into_iter()
                    .map(|case| SwitchCase {
                        patterns: case
                            .patterns
                            .into_iter()
                            .map(|p| self.copy_pattern(p))
                            .collect(),
                        body: case
                            .body
                            .into_iter()
                            .map(|s| self.deep_copy_stmt(s))
                            .collect(),
                    })
                    .collect(),
                default: default.map(|stmts| {
                    stmts.into_iter().map(|s| self.deep_copy_stmt(s)).collect()
                }),
            },
            StmtKind::Do { body } => StmtKind::Do {
                body: self.deep_copy_stmt(body),
            },
            StmtKind::Defer { body } => StmtKind::Defer {
                body: self.deep_copy_stmt(body),
            },
            StmtKind::Return(value) => StmtKind::Return(value.map(|e| self.deep_copy_expr(e))),
            StmtKind::Break(label) => StmtKind::Break(label),
            StmtKind::Continue(label) => StmtKind::Continue(label),
            StmtKind::Expressions(exprs) => StmtKind::Expressions(
                exprs.into_iter().map(|e| self.deep_copy_expr(e)).collect(),
            ),
            StmtKind::VariableDeclarations(decls) => StmtKind::VariableDeclarations(
                decls
                    .into_iter()
                    .map(|decl| {
                        let initialization =
                            decl.initialization.map(|e| self.deep_copy_expr(e));
                        VarDeclaration {
                            initialization,
                            ..decl
                        }
                    })
                    .collect(),
            ),
            StmtKind::Unknown(context) => StmtKind::Unknown(context),
        };
        let new = self.add_stmt(new_kind);
        let (label, comments, span) = {
            let original = &self.stmts[id.index()];
            (original.label.clone(), original.comments.clone(), original.span)
        };
        let data = &mut self.stmts[new.index()];
        data.label = label;
        data.comments = comments;
        data.span = span;
        new
    }

    fn copy_pattern(&mut self, pattern: Pattern) -> Pattern {
        match pattern {
            Pattern::Identifier(name) => Pattern::Identifier(name),
            Pattern::Wildcard => Pattern::Wildcard,
            Pattern::Tuple(elements) => Pattern::Tuple(
                elements.into_iter().map(|p| self.copy_pattern(p)).collect(),
            ),
            Pattern::Expression(id) => Pattern::Expression(self.deep_copy_expr(id)),
        }
    }

    // ------------------------------------------------------------------
    // Structural equality
    // ------------------------------------------------------------------

    /// Structural comparison ignoring resolved types, spans, and comments.
    pub fn expr_eq(&self, a: ExprId, b: ExprId) -> bool {
        use ExprKind::*;
        match (self.expr_kind(a), self.expr_kind(b)) {
            (Identifier(x), Identifier(y)) => x == y,
            (Constant(x), Constant(y)) => x == y,
            (ArrayLiteral(x), ArrayLiteral(y)) => self.expr_lists_eq(x, y),
            (DictionaryLiteral(x), DictionaryLiteral(y)) => {
                x.len() == y.len()
                    && x.iter().zip(y).all(|((xk, xv), (yk, yv))| {
                        self.expr_eq(*xk, *yk) && self.expr_eq(*xv, *yv)
                    })
            }
            (
                Unary { op: xo, operand: xe },
                Unary { op: yo, operand: ye },
            ) => xo == yo && self.expr_eq(*xe, *ye),
            (
                Binary {
                    lhs: xl,
                    op: xo,
                    rhs: xr,
                },
                Binary {
                    lhs: yl,
                    op: yo,
                    rhs: yr,
                },
            ) => xo == yo && self.expr_eq(*xl, *yl) && self.expr_eq(*xr, *yr),
            (
                Ternary {
                    condition: xc,
                    if_true: xt,
                    if_false: xf,
                },
                Ternary {
                    condition: yc,
                    if_true: yt,
                    if_false: yf,
                },
            ) => self.expr_eq(*xc, *yc) && self.expr_eq(*xt, *yt) && self.expr_eq(*xf, *yf),
            (
                Assignment {
                    lhs: xl,
                    op: xo,
                    rhs: xr,
                },
                Assignment {
                    lhs: yl,
                    op: yo,
                    rhs: yr,
                },
            ) => xo == yo && self.expr_eq(*xl, *yl) && self.expr_eq(*xr, *yr),
            (
                Cast {
                    expr: xe,
                    to: xt,
                    optional: xo,
                },
                Cast {
                    expr: ye,
                    to: yt,
                    optional: yo,
                },
            ) => xt == yt && xo == yo && self.expr_eq(*xe, *ye),
            (TypeCheck { expr: xe, ty: xt }, TypeCheck { expr: ye, ty: yt }) => {
                xt == yt && self.expr_eq(*xe, *ye)
            }
            (Parens(x), Parens(y)) => self.expr_eq(*x, *y),
            (Postfix { base: xb, op: xo }, Postfix { base: yb, op: yo }) => {
                self.expr_eq(*xb, *yb) && self.postfix_ops_eq(xo, yo)
            }
            (
                Closure {
                    parameters: xp,
                    return_type: xr,
                    body: xb,
                },
                Closure {
                    parameters: yp,
                    return_type: yr,
                    body: yb,
                },
            ) => xp == yp && xr == yr && self.stmt_eq(*xb, *yb),
            (SizeOf(x), SizeOf(y)) => match (x, y) {
                (SizeOfTarget::Type(xt), SizeOfTarget::Type(yt)) => xt == yt,
                (SizeOfTarget::Expression(xe), SizeOfTarget::Expression(ye)) => {
                    self.expr_eq(*xe, *ye)
                }
                _ => false,
            },
            (Unknown(x), Unknown(y)) => x == y,
            _ => false,
        }
    }

    fn expr_lists_eq(&self, a: &[ExprId], b: &[ExprId]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| self.expr_eq(*x, *y))
    }

    fn postfix_ops_eq(&self, a: &PostfixOp, b: &PostfixOp) -> bool {
        match (a, b) {
            (
                PostfixOp::Member {
                    name: xn,
                    optional_access: xo,
                },
                PostfixOp::Member {
                    name: yn,
                    optional_access: yo,
                },
            ) => xn == yn && xo == yo,
            (PostfixOp::Call { arguments: xa }, PostfixOp::Call { arguments: ya }) => {
                xa.len() == ya.len()
                    && xa.iter().zip(ya).all(|(x, y)| {
                        x.label == y.label && self.expr_eq(x.value, y.value)
                    })
            }
            (
                PostfixOp::Subscript {
                    index: xi,
                    optional_access: xo,
                },
                PostfixOp::Subscript {
                    index: yi,
                    optional_access: yo,
                },
            ) => xo == yo && self.expr_eq(*xi, *yi),
            _ => false,
        }
    }

    fn patterns_eq(&self, a: &Pattern, b: &Pattern) -> bool {
        match (a, b) {
            (Pattern::Identifier(x), Pattern::Identifier(y)) => x == y,
            (Pattern::Wildcard, Pattern::Wildcard) => true,
            (Pattern::Tuple(x), Pattern::Tuple(y)) => {
                x.len() == y.len() && x.iter().zip(y).all(|(x, y)| self.patterns_eq(x, y))
            }
            (Pattern::Expression(x), Pattern::Expression(y)) => self.expr_eq(*x, *y),
            _ => false,
        }
    }

    /// Structural comparison; labels participate, comments and spans do not.
    pub fn stmt_eq(&self, a: StmtId, b: StmtId) -> bool {
        use StmtKind::*;
        if self.stmt(a).label != self.stmt(b).label {
            return false;
        }
        match (self.stmt_kind(a), self.stmt_kind(b)) {
            (Compound(x), Compound(y)) => self.stmt_lists_eq(x, y),
            (
                If {
                    condition: xc,
                    binding: xp,
                    body: xb,
                    else_body: xe,
                },
                If {
                    condition: yc,
                    binding: yp,
                    body: yb,
                    else_body: ye,
                },
            ) => {
                self.expr_eq(*xc, *yc)
                    && match (xp, yp) {
                        (Some(x), Some(y)) => self.patterns_eq(x, y),
                        (None, None) => true,
                        _ => false,
                    }
                    && self.stmt_eq(*xb, *yb)
                    && match (xe, ye) {
                        (Some(x), Some(y)) => self.stmt_eq(*x, *y),
                        (None, None) => true,
                        _ => false,
                    }
            }
            (
                While {
                    condition: xc,
                    body: xb,
                },
                While {
                    condition: yc,
                    body: yb,
                },
            )
            | (
                RepeatWhile {
                    condition: xc,
                    body: xb,
                },
                RepeatWhile {
                    condition: yc,
                    body: yb,
                },
            ) => self.expr_eq(*xc, *yc) && self.stmt_eq(*xb, *yb),
            (
                For {
                    pattern: xp,
                    iterated: xi,
                    body: xb,
                },
                For {
                    pattern: yp,
                    iterated: yi,
                    body: yb,
                },
            ) => self.patterns_eq(xp, yp) && self.expr_eq(*xi, *yi) && self.stmt_eq(*xb, *yb),
            (
                Switch {
                    scrutinee: xs,
                    cases: xc,
                    default: xd,
                },
                Switch {
                    scrutinee: ys,
                    cases: yc,
                    default: yd,
                },
            ) => {
                self.expr_eq(*xs, *ys)
                    && xc.len() == yc.len()
                    && xc.iter().zip(yc).all(|(x, y)| {
                        x.patterns.len() == y.patterns.len()
                            && x.patterns
                                .iter()
                                .zip(&y.patterns)
                                .all(|(xp, yp)| self.patterns_eq(xp, yp))
                            && self.stmt_lists_eq(&x.body, &y.body)
                    })
                    && match (xd, yd) {
                        (Some(x), Some(y)) => self.stmt_lists_eq(x, y),
                        (None, None) => true,
                        _ => false,
                    }
            }
            (Do { body: x }, Do { body: y }) | (Defer { body: x }, Defer { body: y }) => {
                self.stmt_eq(*x, *y)
            }
            (Return(x), Return(y)) => match (x, y) {
                (Some(x), Some(y)) => self.expr_eq(*x, *y),
                (None, None) => true,
                _ => false,
            },
            (Break(x), Break(y)) | (Continue(x), Continue(y)) => x == y,
            (Expressions(x), Expressions(y)) => self.expr_lists_eq(x, y),
            (VariableDeclarations(x), VariableDeclarations(y)) => {
                x.len() == y.len()
                    && x.iter().zip(y).all(|(x, y)| {
                        x.name == y.name
                            && x.ty == y.ty
                            && x.ownership == y.ownership
                            && x.is_constant == y.is_constant
                            && match (x.initialization, y.initialization) {
                                (Some(xe), Some(ye)) => self.expr_eq(xe, ye),
                                (None, None) => true,
                                _ => false,
                            }
                    })
            }
            (Unknown(x), Unknown(y)) => x == y,
            _ => false,
        }
    }

    fn stmt_lists_eq(&self, a: &[StmtId], b: &[StmtId]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| self.stmt_eq(*x, *y))
    }
}

/// Direct child ids of an expression kind.
pub fn expr_children(kind: &ExprKind) -> (Vec<ExprId>, Vec<StmtId>) {
    let mut exprs = Vec::new();
    let mut stmts = Vec::new();
    match kind {
        ExprKind::Identifier(_) | ExprKind::Constant(_) | ExprKind::Unknown(_) => {}
        ExprKind::ArrayLiteral(items) => exprs.extend(items.iter().copied()),
        ExprKind::DictionaryLiteral(pairs) => {
            for (k, v) in pairs {
                exprs.push(*k);
                exprs.push(*v);
            }
        }
        ExprKind::Unary { operand, .. } => exprs.push(*operand),
        ExprKind::Binary { lhs, rhs, .. } | ExprKind::Assignment { lhs, rhs, .. } => {
            exprs.push(*lhs);
            exprs.push(*rhs);
        }
        ExprKind::Ternary {
            condition,
            if_true,
            if_false,
        } => {
            exprs.push(*condition);
            exprs.push(*if_true);
            exprs.push(*if_false);
        }
        ExprKind::Cast { expr, .. } | ExprKind::TypeCheck { expr, .. } => exprs.push(*expr),
        ExprKind::Parens(inner) => exprs.push(*inner),
        ExprKind::Postfix { base, op } => {
            exprs.push(*base);
            match op {
                PostfixOp::Member { .. } => {}
                PostfixOp::Call { arguments } => {
                    exprs.extend(arguments.iter().map(|a| a.value));
                }
                PostfixOp::Subscript { index, .. } => exprs.push(*index),
            }
        }
        ExprKind::Closure { body, .. } => stmts.push(*body),
        ExprKind::SizeOf(target) => {
            if let SizeOfTarget::Expression(e) = target {
                exprs.push(*e);
            }
        }
    }
    (exprs, stmts)
}

/// Direct child ids of a statement kind.
pub fn stmt_children(kind: &StmtKind) -> (Vec<ExprId>, Vec<StmtId>) {
    let mut exprs = Vec::new();
    let mut stmts = Vec::new();
    match kind {
        StmtKind::Compound(children) => stmts.extend(children.iter().copied()),
        StmtKind::If {
            condition,
            binding,
            body,
            else_body,
        } => {
            exprs.push(*condition);
            if let Some(pattern) = binding {
                exprs.extend(pattern.expressions());
            }
            stmts.push(*body);
            if let Some(else_body) = else_body {
                stmts.push(*else_body);
            }
        }
        StmtKind::While { condition, body } | StmtKind::RepeatWhile { condition, body } => {
            exprs.push(*condition);
            stmts.push(*body);
        }
        StmtKind::For {
            pattern,
            iterated,
            body,
        } => {
            exprs.extend(pattern.expressions());
            exprs.push(*iterated);
            stmts.push(*body);
        }
        StmtKind::Switch {
            scrutinee,
            cases,
            default,
        } => {
            exprs.push(*scrutinee);
            for case in cases {
                for pattern in &case.patterns {
                    exprs.extend(pattern.expressions());
                }
                stmts.extend(case.body.iter().copied());
            }
            if let Some(default) = default {
                stmts.extend(default.iter().copied());
            }
        }
        StmtKind::Do { body } | StmtKind::Defer { body } => stmts.push(*body),
        StmtKind::Return(value) => exprs.extend(value.iter().copied()),
        StmtKind::Break(_) | StmtKind::Continue(_) | StmtKind::Unknown(_) => {}
        StmtKind::Expressions(children) => exprs.extend(children.iter().copied()),
        StmtKind::VariableDeclarations(decls) => {
            exprs.extend(decls.iter().filter_map(|d| d.initialization));
        }
    }
    (exprs, stmts)
}

fn replace_expr_in_expr_kind(kind: &mut ExprKind, old: ExprId, new: ExprId) -> bool {
    let swap = |slot: &mut ExprId| {
        if *slot == old {
            *slot = new;
            true
        } else {
            false
        }
    };
    match kind {
        ExprKind::Identifier(_) | ExprKind::Constant(_) | ExprKind::Unknown(_) => false,
        ExprKind::ArrayLiteral(items) => items.iter_mut().any(swap),
        ExprKind::DictionaryLiteral(pairs) => pairs
            .iter_mut()
            .any(|(k, v)| swap(k) || swap(v)),
        ExprKind::Unary { operand, .. } => swap(operand),
        ExprKind::Binary { lhs, rhs, .. } | ExprKind::Assignment { lhs, rhs, .. } => {
            swap(lhs) || swap(rhs)
        }
        ExprKind::Ternary {
            condition,
            if_true,
            if_false,
        } => swap(condition) || swap(if_true) || swap(if_false),
        ExprKind::Cast { expr, .. } | ExprKind::TypeCheck { expr, .. } => swap(expr),
        ExprKind::Parens(inner) => swap(inner),
        ExprKind::Postfix { base, op } => {
            if swap(base) {
                return true;
            }
            match op {
                PostfixOp::Member { .. } => false,
                PostfixOp::Call { arguments } => {
                    arguments.iter_mut().any(|a| swap(&mut a.value))
                }
                PostfixOp::Subscript { index, .. } => swap(index),
            }
        }
        ExprKind::Closure { .. } => false,
        ExprKind::SizeOf(target) => match target {
            SizeOfTarget::Type(_) => false,
            SizeOfTarget::Expression(e) => swap(e),
        },
    }
}

fn replace_expr_in_stmt_kind(kind: &mut StmtKind, old: ExprId, new: ExprId) -> bool {
    let swap = |slot: &mut ExprId| {
        if *slot == old {
            *slot = new;
            true
        } else {
            false
        }
    };
    fn swap_in_pattern(pattern: &mut Pattern, old: ExprId, new: ExprId) -> bool {
        match pattern {
            Pattern::Identifier(_) | Pattern::Wildcard => false,
            Pattern::Tuple(elements) => elements
                .iter_mut()
                .any(|p| swap_in_pattern(p, old, new)),
            Pattern::Expression(id) => {
                if *id == old {
                    *id = new;
                    true
                } else {
                    false
                }
            }
        }
    }
    match kind {
        StmtKind::Compound(_) | StmtKind::Break(_) | StmtKind::Continue(_) | StmtKind::Unknown(_) => {
            false
        }
        StmtKind::If {
            condition, binding, ..
        } => {
            swap(condition)
                || binding
                    .as_mut()
                    .is_some_and(|p| swap_in_pattern(p, old, new))
        }
        StmtKind::While { condition, .. } | StmtKind::RepeatWhile { condition, .. } => {
            swap(condition)
        }
        StmtKind::For {
            pattern, iterated, ..
        } => swap(iterated) || swap_in_pattern(pattern, old, new),
        StmtKind::Switch {
            scrutinee, cases, ..
        } => {
            swap(scrutinee)
                || cases.iter_mut().any(|case| {
                    case.patterns
                        .iter_mut()
                        .any(|p| swap_in_pattern(p, old, new))
                })
        }
        StmtKind::Do { .. } | StmtKind::Defer { .. } => false,
        StmtKind::Return(value) => value.as_mut().is_some_and(|v| swap(v)),
        StmtKind::Expressions(children) => children.iter_mut().any(swap),
        StmtKind::VariableDeclarations(decls) => decls
            .iter_mut()
            .any(|d| d.initialization.as_mut().is_some_and(|v| swap(v))),
    }
}
