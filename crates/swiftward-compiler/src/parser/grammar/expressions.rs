//! Expression grammar: C precedence ladder plus Objective-C message sends
//! and literals.

use crate::parser::core::Parser;
use crate::parser::cst::SyntaxKind;

use super::statements::compound_stmt;
use super::types::{at_type_start, type_node};

/// Entry point: full expression including assignment.
pub(in crate::parser) fn expr(p: &mut Parser<'_>) {
    assignment_expr(p);
}

fn at_assign_op(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Equals
            | SyntaxKind::PlusEquals
            | SyntaxKind::MinusEquals
            | SyntaxKind::StarEquals
            | SyntaxKind::SlashEquals
            | SyntaxKind::PercentEquals
            | SyntaxKind::AmpEquals
            | SyntaxKind::PipeEquals
            | SyntaxKind::CaretEquals
            | SyntaxKind::ShiftLeftEquals
            | SyntaxKind::ShiftRightEquals
    )
}

/// Right-associative assignment level.
pub(super) fn assignment_expr(p: &mut Parser<'_>) {
    if !p.enter() {
        p.err_and_bump("expression too deeply nested");
        return;
    }
    let checkpoint = p.checkpoint();
    ternary_expr(p);
    if at_assign_op(p.current()) {
        p.bump();
        assignment_expr(p);
        p.start_node_at(checkpoint, SyntaxKind::AssignExpr);
        p.finish_node();
    }
    p.exit();
}

/// `cond ? then : else`, right-nested per C.
fn ternary_expr(p: &mut Parser<'_>) {
    let checkpoint = p.checkpoint();
    binary_expr(p, 1);
    if p.at(SyntaxKind::Question) {
        p.bump();
        expr(p);
        p.expect(SyntaxKind::Colon, "expected ':'");
        ternary_expr(p);
        p.start_node_at(checkpoint, SyntaxKind::TernaryExpr);
        p.finish_node();
    }
}

fn binary_prec(kind: SyntaxKind) -> Option<u8> {
    Some(match kind {
        SyntaxKind::Star | SyntaxKind::Slash | SyntaxKind::Percent => 10,
        SyntaxKind::Plus | SyntaxKind::Minus => 9,
        SyntaxKind::ShiftLeft | SyntaxKind::ShiftRight => 8,
        SyntaxKind::AngleOpen
        | SyntaxKind::AngleClose
        | SyntaxKind::AngleOpenEquals
        | SyntaxKind::AngleCloseEquals => 7,
        SyntaxKind::EqualsEquals | SyntaxKind::BangEquals => 6,
        SyntaxKind::Amp => 5,
        SyntaxKind::Caret => 4,
        SyntaxKind::Pipe => 3,
        SyntaxKind::AmpAmp => 2,
        SyntaxKind::PipePipe => 1,
        _ => return None,
    })
}

fn binary_expr(p: &mut Parser<'_>, min_prec: u8) {
    let checkpoint = p.checkpoint();
    unary_expr(p);
    while let Some(prec) = binary_prec(p.current()) {
        if prec < min_prec {
            break;
        }
        p.bump();
        binary_expr(p, prec + 1);
        p.start_node_at(checkpoint, SyntaxKind::BinaryExpr);
        p.finish_node();
    }
}

fn unary_expr(p: &mut Parser<'_>) {
    match p.current() {
        SyntaxKind::Minus
        | SyntaxKind::Plus
        | SyntaxKind::Bang
        | SyntaxKind::Tilde
        | SyntaxKind::Star
        | SyntaxKind::Amp
        | SyntaxKind::PlusPlus
        | SyntaxKind::MinusMinus => {
            p.start_node(SyntaxKind::UnaryExpr);
            p.bump();
            unary_expr(p);
            p.finish_node();
        }
        SyntaxKind::ParenOpen if at_cast(p) => {
            p.start_node(SyntaxKind::CastExpr);
            p.bump();
            type_node(p);
            p.expect(SyntaxKind::ParenClose, "expected ')'");
            unary_expr(p);
            p.finish_node();
        }
        SyntaxKind::Caret => block_literal(p),
        SyntaxKind::KwSizeof => {
            p.start_node(SyntaxKind::SizeofExpr);
            p.bump();
            p.expect(SyntaxKind::ParenOpen, "expected '('");
            if at_type_start(p) {
                type_node(p);
            } else {
                expr(p);
            }
            p.expect(SyntaxKind::ParenClose, "expected ')'");
            p.finish_node();
        }
        _ => postfix_expr(p),
    }
}

/// Cast-vs-parenthesized disambiguation at `(`.
fn at_cast(p: &Parser<'_>) -> bool {
    let next = p.nth(1);
    if next.is_primitive_type_keyword()
        || next.is_storage_qual()
        || matches!(
            next,
            SyntaxKind::KwId | SyntaxKind::KwInstancetype | SyntaxKind::KwStruct | SyntaxKind::KwConst
        )
    {
        return true;
    }
    if next != SyntaxKind::Ident {
        return false;
    }
    match p.nth(2) {
        // `(NSString *)x`
        SyntaxKind::Star => true,
        // `(NSArray<NSString *> *)x`
        SyntaxKind::AngleOpen => {
            let mut offset = 3;
            let mut depth = 1;
            while depth > 0 && offset < 32 {
                match p.nth(offset) {
                    SyntaxKind::AngleOpen => depth += 1,
                    SyntaxKind::AngleClose => depth -= 1,
                    SyntaxKind::Error | SyntaxKind::Semicolon => return false,
                    _ => {}
                }
                offset += 1;
            }
            depth == 0 && p.nth(offset) == SyntaxKind::Star
        }
        // `(CGFloat)x` — uppercase-leading name followed by an operand.
        SyntaxKind::ParenClose => {
            let type_like = p
                .nth_text(1)
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_uppercase());
            type_like
                && matches!(
                    p.nth(3),
                    SyntaxKind::Ident
                        | SyntaxKind::IntNumber
                        | SyntaxKind::FloatNumber
                        | SyntaxKind::AtString
                        | SyntaxKind::CString
                        | SyntaxKind::BracketOpen
                        | SyntaxKind::KwSelf
                        | SyntaxKind::ParenOpen
                )
        }
        _ => false,
    }
}

fn postfix_expr(p: &mut Parser<'_>) {
    let checkpoint = p.checkpoint();
    primary_expr(p);
    loop {
        match p.current() {
            SyntaxKind::ParenOpen => {
                p.bump();
                while !p.eof() && !p.at(SyntaxKind::ParenClose) {
                    assignment_expr(p);
                    if !p.at(SyntaxKind::ParenClose) && !p.eat(SyntaxKind::Comma) {
                        p.err_and_bump("expected ','");
                    }
                }
                p.expect(SyntaxKind::ParenClose, "expected ')'");
                p.start_node_at(checkpoint, SyntaxKind::CallExpr);
                p.finish_node();
            }
            SyntaxKind::BracketOpen => {
                p.bump();
                expr(p);
                p.expect(SyntaxKind::BracketClose, "expected ']'");
                p.start_node_at(checkpoint, SyntaxKind::SubscriptExpr);
                p.finish_node();
            }
            SyntaxKind::Dot | SyntaxKind::Arrow => {
                p.bump();
                p.expect(SyntaxKind::Ident, "expected member name");
                p.start_node_at(checkpoint, SyntaxKind::MemberExpr);
                p.finish_node();
            }
            SyntaxKind::PlusPlus | SyntaxKind::MinusMinus => {
                p.bump();
                p.start_node_at(checkpoint, SyntaxKind::PostfixUnaryExpr);
                p.finish_node();
            }
            _ => break,
        }
    }
}

fn primary_expr(p: &mut Parser<'_>) {
    match p.current() {
        SyntaxKind::Ident | SyntaxKind::KwSelf | SyntaxKind::KwSuper => {
            p.start_node(SyntaxKind::IdentExpr);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::IntNumber
        | SyntaxKind::FloatNumber
        | SyntaxKind::CString
        | SyntaxKind::CharLiteral
        | SyntaxKind::AtString
        | SyntaxKind::AtYes
        | SyntaxKind::AtNo
        | SyntaxKind::KwNil
        | SyntaxKind::KwNilUpper
        | SyntaxKind::KwNull
        | SyntaxKind::KwYes
        | SyntaxKind::KwNo
        | SyntaxKind::KwTrue
        | SyntaxKind::KwFalse => {
            p.start_node(SyntaxKind::LiteralExpr);
            p.bump();
            p.finish_node();
        }
        // Boxed number shorthand: `@1`, `@2.5`.
        SyntaxKind::At
            if matches!(p.nth(1), SyntaxKind::IntNumber | SyntaxKind::FloatNumber) =>
        {
            p.start_node(SyntaxKind::LiteralExpr);
            p.bump();
            p.bump();
            p.finish_node();
        }
        SyntaxKind::ParenOpen => {
            p.start_node(SyntaxKind::ParenExpr);
            p.bump();
            expr(p);
            p.expect(SyntaxKind::ParenClose, "expected ')'");
            p.finish_node();
        }
        SyntaxKind::BracketOpen => message_send(p),
        SyntaxKind::AtBracketOpen => {
            p.start_node(SyntaxKind::ObjcArrayLiteral);
            p.bump();
            while !p.eof() && !p.at(SyntaxKind::BracketClose) {
                assignment_expr(p);
                if !p.at(SyntaxKind::BracketClose) && !p.eat(SyntaxKind::Comma) {
                    p.err_and_bump("expected ','");
                }
            }
            p.expect(SyntaxKind::BracketClose, "expected ']'");
            p.finish_node();
        }
        SyntaxKind::AtBraceOpen => {
            p.start_node(SyntaxKind::ObjcDictLiteral);
            p.bump();
            while !p.eof() && !p.at(SyntaxKind::BraceClose) {
                assignment_expr(p);
                p.expect(SyntaxKind::Colon, "expected ':'");
                assignment_expr(p);
                if !p.at(SyntaxKind::BraceClose) && !p.eat(SyntaxKind::Comma) {
                    p.err_and_bump("expected ','");
                }
            }
            p.expect(SyntaxKind::BraceClose, "expected '}'");
            p.finish_node();
        }
        SyntaxKind::AtParenOpen => {
            p.start_node(SyntaxKind::BoxedExpr);
            p.bump();
            expr(p);
            p.expect(SyntaxKind::ParenClose, "expected ')'");
            p.finish_node();
        }
        SyntaxKind::AtSelector => {
            p.start_node(SyntaxKind::SelectorExpr);
            p.bump();
            p.expect(SyntaxKind::ParenOpen, "expected '('");
            while !p.eof() && !p.at(SyntaxKind::ParenClose) {
                if !p.eat(SyntaxKind::Ident) && !p.eat(SyntaxKind::Colon) {
                    p.err_and_bump("expected selector");
                }
            }
            p.expect(SyntaxKind::ParenClose, "expected ')'");
            p.finish_node();
        }
        _ => p.err_and_bump("expected expression"),
    }
}

/// `[receiver selector]` / `[receiver piece:arg piece:arg, vararg...]`
fn message_send(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::MessageSend);
    p.bump();

    // Receiver.
    assignment_expr(p);

    if p.at(SyntaxKind::Ident) && p.nth(1) != SyntaxKind::Colon {
        // Unary selector: `[obj count]`.
        p.bump();
    } else {
        while p.at(SyntaxKind::Ident) && p.nth(1) == SyntaxKind::Colon {
            p.start_node(SyntaxKind::MessageArg);
            p.bump();
            p.bump();
            assignment_expr(p);
            p.finish_node();
        }
        // Variadic tail: `, arg, arg`.
        while p.eat(SyntaxKind::Comma) {
            assignment_expr(p);
        }
    }

    p.expect(SyntaxKind::BracketClose, "expected ']'");
    p.finish_node();
}

/// `^{...}`, `^(int x){...}`, `^ReturnType (int x){...}`
fn block_literal(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::BlockLiteral);
    p.bump();

    if !p.at(SyntaxKind::BraceOpen) && !p.at(SyntaxKind::ParenOpen) {
        type_node(p);
    }
    if p.at(SyntaxKind::ParenOpen) {
        p.start_node(SyntaxKind::ParamList);
        p.bump();
        while !p.eof() && !p.at(SyntaxKind::ParenClose) {
            if p.at(SyntaxKind::KwVoid) && p.nth(1) == SyntaxKind::ParenClose {
                p.bump();
                break;
            }
            p.start_node(SyntaxKind::Param);
            type_node(p);
            p.eat(SyntaxKind::Ident);
            p.finish_node();
            if !p.at(SyntaxKind::ParenClose) && !p.eat(SyntaxKind::Comma) {
                break;
            }
        }
        p.expect(SyntaxKind::ParenClose, "expected ')'");
        p.finish_node();
    }
    compound_stmt(p);
    p.finish_node();
}
