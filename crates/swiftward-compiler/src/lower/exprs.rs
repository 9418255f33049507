//! Expression lowering.

use swiftward_ast::{
    AssignOp, BinaryOp, CallArgument, ExprId, ExprKind, Literal, PostfixOp, SizeOfTarget,
    SourceSpan, SwiftAst, UnaryOp,
};
use swiftward_core::SwiftType;

use super::stmts::lower_compound;
use super::LowerCtx;
use crate::analyze::objc_types::lower_type_node;
use crate::analyze::type_mapper::map_type;
use crate::parser::{SyntaxKind, SyntaxNode, SyntaxToken};

fn span_of(node: &SyntaxNode) -> SourceSpan {
    let range = node.text_range();
    SourceSpan::new(range.start().into(), range.end().into())
}

fn expr_children(node: &SyntaxNode) -> Vec<SyntaxNode> {
    node.children().filter(is_expr_node).collect()
}

fn is_expr_node(node: &SyntaxNode) -> bool {
    matches!(
        node.kind(),
        SyntaxKind::IdentExpr
            | SyntaxKind::LiteralExpr
            | SyntaxKind::ObjcArrayLiteral
            | SyntaxKind::ObjcDictLiteral
            | SyntaxKind::BoxedExpr
            | SyntaxKind::MessageSend
            | SyntaxKind::SelectorExpr
            | SyntaxKind::CallExpr
            | SyntaxKind::SubscriptExpr
            | SyntaxKind::MemberExpr
            | SyntaxKind::BinaryExpr
            | SyntaxKind::UnaryExpr
            | SyntaxKind::PostfixUnaryExpr
            | SyntaxKind::TernaryExpr
            | SyntaxKind::AssignExpr
            | SyntaxKind::CastExpr
            | SyntaxKind::ParenExpr
            | SyntaxKind::BlockLiteral
            | SyntaxKind::SizeofExpr
            | SyntaxKind::ErrorNode
    )
}

fn tokens_of(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia())
}

fn unknown(ast: &mut SwiftAst, node: &SyntaxNode) -> ExprId {
    let id = ast.add_expr(ExprKind::Unknown(node.text().to_string().trim().to_string()));
    ast.set_expr_span(id, span_of(node));
    id
}

/// Lowers one CST expression node.
pub fn lower_expr(node: &SyntaxNode, ast: &mut SwiftAst, ctx: &LowerCtx<'_>) -> ExprId {
    let id = match node.kind() {
        SyntaxKind::IdentExpr => {
            let name = tokens_of(node)
                .next()
                .map(|t| t.text().to_string())
                .unwrap_or_default();
            ast.add_expr(ExprKind::Identifier(name))
        }
        SyntaxKind::LiteralExpr => lower_literal(node, ast),
        SyntaxKind::ObjcArrayLiteral => {
            let items = expr_children(node)
                .iter()
                .map(|child| lower_expr(child, ast, ctx))
                .collect();
            ast.add_expr(ExprKind::ArrayLiteral(items))
        }
        SyntaxKind::ObjcDictLiteral => {
            let children = expr_children(node);
            let pairs = children
                .chunks(2)
                .filter(|chunk| chunk.len() == 2)
                .map(|chunk| {
                    let key = lower_expr(&chunk[0], ast, ctx);
                    let value = lower_expr(&chunk[1], ast, ctx);
                    (key, value)
                })
                .collect();
            ast.add_expr(ExprKind::DictionaryLiteral(pairs))
        }
        SyntaxKind::BoxedExpr | SyntaxKind::ParenExpr => {
            let children = expr_children(node);
            match children.first() {
                Some(inner) if node.kind() == SyntaxKind::ParenExpr => {
                    let inner = lower_expr(inner, ast, ctx);
                    ast.add_expr(ExprKind::Parens(inner))
                }
                // `@(expr)` boxing is a no-op after bridging.
                Some(inner) => lower_expr(inner, ast, ctx),
                None => unknown(ast, node),
            }
        }
        SyntaxKind::MessageSend => lower_message_send(node, ast, ctx),
        SyntaxKind::CallExpr => {
            let children = expr_children(node);
            let Some((callee, args)) = children.split_first() else {
                return unknown(ast, node);
            };
            let base = lower_expr(callee, ast, ctx);
            let arguments = args
                .iter()
                .map(|arg| CallArgument::unlabeled(lower_expr(arg, ast, ctx)))
                .collect();
            ast.call(base, arguments)
        }
        SyntaxKind::SubscriptExpr => {
            let children = expr_children(node);
            if children.len() != 2 {
                return unknown(ast, node);
            }
            let base = lower_expr(&children[0], ast, ctx);
            let index = lower_expr(&children[1], ast, ctx);
            ast.add_expr(ExprKind::Postfix {
                base,
                op: PostfixOp::Subscript {
                    index,
                    optional_access: false,
                },
            })
        }
        SyntaxKind::MemberExpr => {
            let children = expr_children(node);
            let Some(base_node) = children.first() else {
                return unknown(ast, node);
            };
            let name = tokens_of(node)
                .filter(|t| t.kind() == SyntaxKind::Ident)
                .last()
                .map(|t| t.text().to_string())
                .unwrap_or_default();
            let base = lower_expr(base_node, ast, ctx);
            ast.member(base, name)
        }
        SyntaxKind::BinaryExpr => {
            let children = expr_children(node);
            if children.len() != 2 {
                return unknown(ast, node);
            }
            let Some(op) = tokens_of(node).find_map(|t| binary_op(t.kind())) else {
                return unknown(ast, node);
            };
            let lhs = lower_expr(&children[0], ast, ctx);
            let rhs = lower_expr(&children[1], ast, ctx);
            ast.add_expr(ExprKind::Binary { lhs, op, rhs })
        }
        SyntaxKind::UnaryExpr => lower_unary(node, ast, ctx),
        SyntaxKind::PostfixUnaryExpr => {
            // `x++` outside statement position has no direct Swift shape.
            unknown(ast, node)
        }
        SyntaxKind::TernaryExpr => {
            let children = expr_children(node);
            if children.len() != 3 {
                return unknown(ast, node);
            }
            let condition = lower_expr(&children[0], ast, ctx);
            let if_true = lower_expr(&children[1], ast, ctx);
            let if_false = lower_expr(&children[2], ast, ctx);
            ast.add_expr(ExprKind::Ternary {
                condition,
                if_true,
                if_false,
            })
        }
        SyntaxKind::AssignExpr => {
            let children = expr_children(node);
            if children.len() != 2 {
                return unknown(ast, node);
            }
            let Some(op) = tokens_of(node).find_map(|t| assign_op(t.kind())) else {
                return unknown(ast, node);
            };
            let lhs = lower_expr(&children[0], ast, ctx);
            let rhs = lower_expr(&children[1], ast, ctx);
            ast.add_expr(ExprKind::Assignment { lhs, op, rhs })
        }
        SyntaxKind::CastExpr => lower_cast(node, ast, ctx),
        SyntaxKind::BlockLiteral => lower_block_literal(node, ast, ctx),
        SyntaxKind::SizeofExpr => {
            if let Some(type_node) = node.children().find(|n| n.kind() == SyntaxKind::TypeNode) {
                let swift = map_type(&lower_type_node(&type_node), ctx.map_ctx);
                ast.add_expr(ExprKind::SizeOf(SizeOfTarget::Type(swift)))
            } else {
                let children = expr_children(node);
                match children.first() {
                    Some(inner) => {
                        let inner = lower_expr(inner, ast, ctx);
                        ast.add_expr(ExprKind::SizeOf(SizeOfTarget::Expression(inner)))
                    }
                    None => unknown(ast, node),
                }
            }
        }
        SyntaxKind::SelectorExpr => {
            let inner: String = node
                .text()
                .to_string()
                .trim()
                .trim_start_matches("@selector")
                .to_string();
            ast.add_expr(ExprKind::Unknown(format!("#selector{inner}")))
        }
        _ => unknown(ast, node),
    };
    ast.set_expr_span(id, span_of(node));
    id
}

fn lower_literal(node: &SyntaxNode, ast: &mut SwiftAst) -> ExprId {
    let Some(token) = tokens_of(node).find(|t| t.kind() != SyntaxKind::At) else {
        return unknown(ast, node);
    };
    let text = token.text();
    let kind = match token.kind() {
        SyntaxKind::IntNumber => ExprKind::Constant(Literal::Integer(parse_int(text))),
        SyntaxKind::FloatNumber => {
            let trimmed = text.trim_end_matches(['f', 'F']);
            ExprKind::Constant(Literal::Float(trimmed.parse().unwrap_or(0.0)))
        }
        SyntaxKind::CString => {
            ExprKind::Constant(Literal::String(strip_quotes(text).to_string()))
        }
        SyntaxKind::AtString => {
            ExprKind::Constant(Literal::String(strip_quotes(&text[1..]).to_string()))
        }
        SyntaxKind::CharLiteral => {
            let inner = strip_quotes(text);
            let value = inner.chars().next().map(|c| c as i64).unwrap_or(0);
            ExprKind::Constant(Literal::Integer(value))
        }
        SyntaxKind::AtYes | SyntaxKind::KwYes | SyntaxKind::KwTrue => {
            ExprKind::Constant(Literal::Boolean(true))
        }
        SyntaxKind::AtNo | SyntaxKind::KwNo | SyntaxKind::KwFalse => {
            ExprKind::Constant(Literal::Boolean(false))
        }
        SyntaxKind::KwNil | SyntaxKind::KwNilUpper | SyntaxKind::KwNull => {
            ExprKind::Constant(Literal::Nil)
        }
        _ => return unknown(ast, node),
    };
    ast.add_expr(kind)
}

fn parse_int(text: &str) -> i64 {
    let trimmed = text.trim_end_matches(['u', 'U', 'l', 'L']);
    if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).unwrap_or(0)
    } else {
        trimmed.parse().unwrap_or(0)
    }
}

fn strip_quotes(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .or_else(|| text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')))
        .unwrap_or(text)
}

fn binary_op(kind: SyntaxKind) -> Option<BinaryOp> {
    Some(match kind {
        SyntaxKind::Plus => BinaryOp::Add,
        SyntaxKind::Minus => BinaryOp::Subtract,
        SyntaxKind::Star => BinaryOp::Multiply,
        SyntaxKind::Slash => BinaryOp::Divide,
        SyntaxKind::Percent => BinaryOp::Modulo,
        SyntaxKind::EqualsEquals => BinaryOp::Equal,
        SyntaxKind::BangEquals => BinaryOp::NotEqual,
        SyntaxKind::AngleOpen => BinaryOp::Less,
        SyntaxKind::AngleOpenEquals => BinaryOp::LessEqual,
        SyntaxKind::AngleClose => BinaryOp::Greater,
        SyntaxKind::AngleCloseEquals => BinaryOp::GreaterEqual,
        SyntaxKind::AmpAmp => BinaryOp::LogicalAnd,
        SyntaxKind::PipePipe => BinaryOp::LogicalOr,
        SyntaxKind::Amp => BinaryOp::BitwiseAnd,
        SyntaxKind::Pipe => BinaryOp::BitwiseOr,
        SyntaxKind::Caret => BinaryOp::BitwiseXor,
        SyntaxKind::ShiftLeft => BinaryOp::ShiftLeft,
        SyntaxKind::ShiftRight => BinaryOp::ShiftRight,
        _ => return None,
    })
}

fn assign_op(kind: SyntaxKind) -> Option<AssignOp> {
    Some(match kind {
        SyntaxKind::Equals => AssignOp::Assign,
        SyntaxKind::PlusEquals => AssignOp::AddAssign,
        SyntaxKind::MinusEquals => AssignOp::SubtractAssign,
        SyntaxKind::StarEquals => AssignOp::MultiplyAssign,
        SyntaxKind::SlashEquals => AssignOp::DivideAssign,
        SyntaxKind::PercentEquals => AssignOp::ModuloAssign,
        SyntaxKind::AmpEquals => AssignOp::BitwiseAndAssign,
        SyntaxKind::PipeEquals => AssignOp::BitwiseOrAssign,
        SyntaxKind::CaretEquals => AssignOp::BitwiseXorAssign,
        SyntaxKind::ShiftLeftEquals => AssignOp::ShiftLeftAssign,
        SyntaxKind::ShiftRightEquals => AssignOp::ShiftRightAssign,
        _ => return None,
    })
}

fn lower_unary(node: &SyntaxNode, ast: &mut SwiftAst, ctx: &LowerCtx<'_>) -> ExprId {
    let children = expr_children(node);
    let Some(operand_node) = children.first() else {
        return unknown(ast, node);
    };
    let Some(op_token) = tokens_of(node).next() else {
        return unknown(ast, node);
    };
    match op_token.kind() {
        SyntaxKind::Minus => {
            let operand = lower_expr(operand_node, ast, ctx);
            ast.add_expr(ExprKind::Unary {
                op: UnaryOp::Negate,
                operand,
            })
        }
        SyntaxKind::Bang => {
            let operand = lower_expr(operand_node, ast, ctx);
            ast.add_expr(ExprKind::Unary {
                op: UnaryOp::Not,
                operand,
            })
        }
        SyntaxKind::Tilde => {
            let operand = lower_expr(operand_node, ast, ctx);
            ast.add_expr(ExprKind::Unary {
                op: UnaryOp::BitwiseNot,
                operand,
            })
        }
        // `+x` is the operand itself.
        SyntaxKind::Plus => lower_expr(operand_node, ast, ctx),
        // Address-of, dereference, and prefix increment stay outside the
        // modeled subset.
        _ => unknown(ast, node),
    }
}

fn lower_cast(node: &SyntaxNode, ast: &mut SwiftAst, ctx: &LowerCtx<'_>) -> ExprId {
    let Some(type_node) = node.children().find(|n| n.kind() == SyntaxKind::TypeNode) else {
        return unknown(ast, node);
    };
    let children = expr_children(node);
    let Some(operand_node) = children.first() else {
        return unknown(ast, node);
    };

    let target = map_type(&lower_type_node(&type_node), ctx.map_ctx);
    let operand = lower_expr(operand_node, ast, ctx);

    // Numeric conversions are initializer calls in Swift; object casts are
    // conditional downcasts.
    if target.is_numeric() {
        let name = target.to_string();
        let callee = ast.identifier(name);
        ast.call(callee, vec![CallArgument::unlabeled(operand)])
    } else {
        ast.add_expr(ExprKind::Cast {
            expr: operand,
            to: target.deep_unwrapped().clone(),
            optional: true,
        })
    }
}

fn lower_block_literal(node: &SyntaxNode, ast: &mut SwiftAst, ctx: &LowerCtx<'_>) -> ExprId {
    let mut parameters = Vec::new();
    if let Some(list) = node.children().find(|n| n.kind() == SyntaxKind::ParamList) {
        for param in list.children().filter(|n| n.kind() == SyntaxKind::Param) {
            let ty = param
                .children()
                .find(|n| n.kind() == SyntaxKind::TypeNode)
                .map(|t| map_type(&lower_type_node(&t), ctx.map_ctx))
                .unwrap_or(SwiftType::Error);
            let name = tokens_of(&param)
                .filter(|t| t.kind() == SyntaxKind::Ident)
                .last()
                .map(|t| t.text().to_string())
                .unwrap_or_default();
            parameters.push(swiftward_ast::BlockParameter { name, ty });
        }
    }

    let return_type = node
        .children()
        .find(|n| n.kind() == SyntaxKind::TypeNode)
        .map(|t| map_type(&lower_type_node(&t), ctx.map_ctx))
        .unwrap_or(SwiftType::VOID);

    let body = node
        .children()
        .find(|n| n.kind() == SyntaxKind::CompoundStmt)
        .map(|b| lower_compound(&b, ast, ctx))
        .unwrap_or_else(|| ast.compound(vec![]));

    ast.add_expr(ExprKind::Closure {
        parameters,
        return_type,
        body,
    })
}

fn lower_message_send(node: &SyntaxNode, ast: &mut SwiftAst, ctx: &LowerCtx<'_>) -> ExprId {
    let receiver_node = match node.children().find(|n| is_expr_node(n)) {
        Some(receiver) => receiver,
        None => return unknown(ast, node),
    };

    let message_args: Vec<SyntaxNode> = node
        .children()
        .filter(|n| n.kind() == SyntaxKind::MessageArg)
        .collect();

    // Unary selector: the trailing identifier token directly under the send.
    if message_args.is_empty() {
        let Some(selector) = tokens_of(node)
            .filter(|t| t.kind() == SyntaxKind::Ident)
            .last()
        else {
            return unknown(ast, node);
        };
        let receiver = lower_expr(&receiver_node, ast, ctx);
        let member = ast.member(receiver, selector.text());
        return ast.call(member, vec![]);
    }

    let mut method_name = String::new();
    let mut arguments: Vec<CallArgument> = Vec::new();
    for (index, arg) in message_args.iter().enumerate() {
        let piece_name = tokens_of(arg)
            .find(|t| t.kind() == SyntaxKind::Ident)
            .map(|t| t.text().to_string())
            .unwrap_or_default();
        let value_node = match arg.children().find(is_expr_node) {
            Some(value) => value,
            None => continue,
        };
        let value = lower_expr(&value_node, ast, ctx);
        if index == 0 {
            method_name = piece_name;
            arguments.push(CallArgument::unlabeled(value));
        } else {
            arguments.push(CallArgument::labeled(piece_name, value));
        }
    }

    // Variadic tail arguments are direct expression children after the
    // receiver; keyword argument values sit inside `MessageArg` nodes.
    let extras: Vec<SyntaxNode> = node.children().filter(is_expr_node).skip(1).collect();
    for extra in extras {
        let value = lower_expr(&extra, ast, ctx);
        arguments.push(CallArgument::unlabeled(value));
    }

    let receiver = lower_expr(&receiver_node, ast, ctx);
    let member = ast.member(receiver, method_name);
    ast.call(member, arguments)
}
