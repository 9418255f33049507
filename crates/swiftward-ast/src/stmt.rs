//! Statement node kinds and patterns.

use serde::Serialize;
use swiftward_core::{Ownership, SwiftType};

use crate::{ExprId, StmtId};

/// A binding or matching pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Pattern {
    Identifier(String),
    Wildcard,
    Tuple(Vec<Pattern>),
    /// Matches by comparing against an expression (switch cases).
    Expression(ExprId),
}

impl Pattern {
    /// Expression ids referenced anywhere in the pattern.
    pub fn expressions(&self) -> Vec<ExprId> {
        match self {
            Pattern::Identifier(_) | Pattern::Wildcard => Vec::new(),
            Pattern::Tuple(elements) => elements.iter().flat_map(Pattern::expressions).collect(),
            Pattern::Expression(id) => vec![*id],
        }
    }
}

/// One `case` of a switch statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchCase {
    pub patterns: Vec<Pattern>,
    pub body: Vec<StmtId>,
}

/// A single declarator of a variable-declarations statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDeclaration {
    pub name: String,
    pub ty: SwiftType,
    pub ownership: Ownership,
    pub is_constant: bool,
    pub initialization: Option<ExprId>,
}

/// A statement node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StmtKind {
    Compound(Vec<StmtId>),
    If {
        condition: ExprId,
        /// `if let <pattern> = <condition>` when present.
        binding: Option<Pattern>,
        body: StmtId,
        else_body: Option<StmtId>,
    },
    While {
        condition: ExprId,
        body: StmtId,
    },
    RepeatWhile {
        condition: ExprId,
        body: StmtId,
    },
    For {
        pattern: Pattern,
        iterated: ExprId,
        body: StmtId,
    },
    Switch {
        scrutinee: ExprId,
        cases: Vec<SwitchCase>,
        default: Option<Vec<StmtId>>,
    },
    Do {
        body: StmtId,
    },
    Defer {
        body: StmtId,
    },
    Return(Option<ExprId>),
    Break(Option<String>),
    Continue(Option<String>),
    Expressions(Vec<ExprId>),
    VariableDeclarations(Vec<VarDeclaration>),
    /// Source construct outside the modeled subset, kept as context text.
    Unknown(String),
}
