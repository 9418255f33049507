//! Expression node kinds.

use serde::Serialize;
use swiftward_core::SwiftType;

use crate::{ExprId, StmtId};

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOp {
    Negate,
    Not,
    BitwiseNot,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitwiseNot => "~",
        }
    }
}

/// Infix binary operators, in Swift spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    LogicalAnd,
    LogicalOr,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    ShiftLeft,
    ShiftRight,
    NilCoalesce,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalOr => "||",
            BinaryOp::BitwiseAnd => "&",
            BinaryOp::BitwiseOr => "|",
            BinaryOp::BitwiseXor => "^",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::NilCoalesce => "??",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Equal
                | BinaryOp::NotEqual
                | BinaryOp::Less
                | BinaryOp::LessEqual
                | BinaryOp::Greater
                | BinaryOp::GreaterEqual
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOp::LogicalAnd | BinaryOp::LogicalOr)
    }
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    ModuloAssign,
    BitwiseAndAssign,
    BitwiseOrAssign,
    BitwiseXorAssign,
    ShiftLeftAssign,
    ShiftRightAssign,
}

impl AssignOp {
    pub fn symbol(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubtractAssign => "-=",
            AssignOp::MultiplyAssign => "*=",
            AssignOp::DivideAssign => "/=",
            AssignOp::ModuloAssign => "%=",
            AssignOp::BitwiseAndAssign => "&=",
            AssignOp::BitwiseOrAssign => "|=",
            AssignOp::BitwiseXorAssign => "^=",
            AssignOp::ShiftLeftAssign => "<<=",
            AssignOp::ShiftRightAssign => ">>=",
        }
    }
}

/// A non-composite literal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Nil,
}

/// Classification of a literal expression, for overload resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LiteralKind {
    Integer,
    Float,
    String,
    Boolean,
    Nil,
    Array,
    Dictionary,
}

impl Literal {
    pub fn kind(&self) -> LiteralKind {
        match self {
            Literal::Integer(_) => LiteralKind::Integer,
            Literal::Float(_) => LiteralKind::Float,
            Literal::String(_) => LiteralKind::String,
            Literal::Boolean(_) => LiteralKind::Boolean,
            Literal::Nil => LiteralKind::Nil,
        }
    }
}

/// One argument of a call postfix, with optional label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CallArgument {
    pub label: Option<String>,
    pub value: ExprId,
}

impl CallArgument {
    pub fn unlabeled(value: ExprId) -> Self {
        Self { label: None, value }
    }

    pub fn labeled(label: impl Into<String>, value: ExprId) -> Self {
        Self {
            label: Some(label.into()),
            value,
        }
    }
}

/// One trailing operation of a postfix expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PostfixOp {
    Member {
        name: String,
        /// `?.` access.
        optional_access: bool,
    },
    Call {
        arguments: Vec<CallArgument>,
    },
    Subscript {
        index: ExprId,
        optional_access: bool,
    },
}

/// A parameter of a closure literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockParameter {
    pub name: String,
    pub ty: SwiftType,
}

/// Target of a `sizeof`-style query; emitted as `MemoryLayout` access.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SizeOfTarget {
    Type(SwiftType),
    Expression(ExprId),
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprKind {
    Identifier(String),
    Constant(Literal),
    ArrayLiteral(Vec<ExprId>),
    DictionaryLiteral(Vec<(ExprId, ExprId)>),
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Binary {
        lhs: ExprId,
        op: BinaryOp,
        rhs: ExprId,
    },
    Ternary {
        condition: ExprId,
        if_true: ExprId,
        if_false: ExprId,
    },
    Assignment {
        lhs: ExprId,
        op: AssignOp,
        rhs: ExprId,
    },
    Cast {
        expr: ExprId,
        to: SwiftType,
        /// `as?` when set; plain `as` otherwise.
        optional: bool,
    },
    TypeCheck {
        expr: ExprId,
        ty: SwiftType,
    },
    Parens(ExprId),
    Postfix {
        base: ExprId,
        op: PostfixOp,
    },
    Closure {
        parameters: Vec<BlockParameter>,
        return_type: SwiftType,
        body: StmtId,
    },
    SizeOf(SizeOfTarget),
    Unknown(String),
}

impl ExprKind {
    /// The literal classification, if this expression is a literal.
    pub fn literal_kind(&self) -> Option<LiteralKind> {
        match self {
            ExprKind::Constant(literal) => Some(literal.kind()),
            ExprKind::ArrayLiteral(_) => Some(LiteralKind::Array),
            ExprKind::DictionaryLiteral(_) => Some(LiteralKind::Dictionary),
            _ => None,
        }
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            ExprKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// The `(base, arguments)` pair if this is a function-call postfix.
    pub fn as_call(&self) -> Option<(ExprId, &[CallArgument])> {
        match self {
            ExprKind::Postfix {
                base,
                op: PostfixOp::Call { arguments },
            } => Some((*base, arguments)),
            _ => None,
        }
    }
}
