#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Swift syntax tree for Swiftward.
//!
//! # Overview
//!
//! The output-language tree lives in an id-indexed arena ([`SwiftAst`]):
//! expression and statement nodes are addressed by [`ExprId`] / [`StmtId`]
//! handles, and each node records its parent as a handle rather than an
//! owning pointer. That keeps the child→parent back-references cycle-free
//! and makes deep copies trivially disjoint.
//!
//! # Design Decisions
//!
//! ## Parents are maintained by the arena
//!
//! Allocating a node attaches its children; attaching an already-attached
//! node is an internal invariant violation (debug assert, tolerated in
//! release). [`SwiftAst::replace_expr`] swaps a subtree in place: the new
//! node inherits the old parent, the old node is detached and becomes
//! unreachable garbage within the arena.
//!
//! ## Equality is structural
//!
//! [`SwiftAst::expr_eq`] / [`SwiftAst::stmt_eq`] compare node structure and
//! ignore resolved types, spans, and comments, so a rewritten tree can be
//! compared against its pre-pass copy to detect fixpoints.

pub mod arena;
pub mod dump;
pub mod expr;
pub mod stmt;
pub mod visitor;

#[cfg(test)]
mod arena_tests;
#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod visitor_tests;

pub use arena::{expr_children, stmt_children, ExprData, StmtData, SwiftAst};
pub use expr::{
    AssignOp, BinaryOp, BlockParameter, CallArgument, ExprKind, Literal, LiteralKind, PostfixOp,
    SizeOfTarget, UnaryOp,
};
pub use stmt::{Pattern, StmtKind, SwitchCase, VarDeclaration};
pub use visitor::{
    walk_expr_children, walk_exprs_in_stmt, walk_stmt, ExpressionVisitor, StatementVisitor,
};

/// Handle to an expression node in a [`SwiftAst`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a statement node in a [`SwiftAst`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize)]
pub struct StmtId(u32);

impl StmtId {
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to either node flavor; used for parent links.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize)]
pub enum NodeId {
    Expr(ExprId),
    Stmt(StmtId),
}

/// Byte range of a node in its originating source file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize)]
pub struct SourceSpan {
    pub start: u32,
    pub end: u32,
}

impl SourceSpan {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}
