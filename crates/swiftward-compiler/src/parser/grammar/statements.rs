//! Statement grammar for method and function bodies.

use crate::parser::core::Parser;
use crate::parser::cst::{token_sets, SyntaxKind};

use super::expressions::{assignment_expr, expr};
use super::types::{at_type_start, type_node};

/// `{ stmt* }`
pub(in crate::parser) fn compound_stmt(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::CompoundStmt);
    p.expect(SyntaxKind::BraceOpen, "expected '{'");
    while !p.eof() && !p.at(SyntaxKind::BraceClose) {
        stmt(p);
    }
    p.expect(SyntaxKind::BraceClose, "expected '}'");
    p.finish_node();
}

pub(super) fn stmt(p: &mut Parser<'_>) {
    if !p.enter() {
        p.err_and_bump("statement too deeply nested");
        return;
    }
    stmt_inner(p);
    p.exit();
}

fn stmt_inner(p: &mut Parser<'_>) {
    match p.current() {
        SyntaxKind::BraceOpen => compound_stmt(p),
        SyntaxKind::KwIf => if_stmt(p),
        SyntaxKind::KwWhile => while_stmt(p),
        SyntaxKind::KwDo => do_while_stmt(p),
        SyntaxKind::KwFor => for_stmt(p),
        SyntaxKind::KwSwitch => switch_stmt(p),
        SyntaxKind::KwReturn => {
            p.start_node(SyntaxKind::ReturnStmt);
            p.bump();
            if !p.at(SyntaxKind::Semicolon) {
                expr(p);
            }
            p.expect(SyntaxKind::Semicolon, "expected ';'");
            p.finish_node();
        }
        SyntaxKind::KwBreak => {
            p.start_node(SyntaxKind::BreakStmt);
            p.bump();
            p.expect(SyntaxKind::Semicolon, "expected ';'");
            p.finish_node();
        }
        SyntaxKind::KwContinue => {
            p.start_node(SyntaxKind::ContinueStmt);
            p.bump();
            p.expect(SyntaxKind::Semicolon, "expected ';'");
            p.finish_node();
        }
        SyntaxKind::Semicolon => p.bump(),
        _ if at_var_decl(p) => var_decl_stmt(p),
        _ if p.at_set(token_sets::EXPR_FIRST) => {
            p.start_node(SyntaxKind::ExprStmt);
            expr(p);
            p.expect(SyntaxKind::Semicolon, "expected ';'");
            p.finish_node();
        }
        _ => {
            p.err_and_bump("expected statement");
            while !p.eof() && !p.at_set(token_sets::STMT_RECOVERY) {
                p.bump();
            }
            p.eat(SyntaxKind::Semicolon);
        }
    }
}

/// Declaration-vs-expression disambiguation at statement position.
///
/// `NSString *s`, `CGFloat x`, `NSArray<NSString *> *a`, and any statement
/// starting with a type keyword read as declarations; everything else is an
/// expression.
fn at_var_decl(p: &Parser<'_>) -> bool {
    let kind = p.current();
    if kind.is_primitive_type_keyword()
        || kind.is_storage_qual()
        || matches!(
            kind,
            SyntaxKind::KwStatic | SyntaxKind::KwConst | SyntaxKind::KwStruct | SyntaxKind::KwId
        )
    {
        return true;
    }
    if kind != SyntaxKind::Ident {
        return false;
    }
    match p.nth(1) {
        // `CGFloat x ...`
        SyntaxKind::Ident => matches!(
            p.nth(2),
            SyntaxKind::Equals
                | SyntaxKind::Semicolon
                | SyntaxKind::Comma
                | SyntaxKind::BracketOpen
        ),
        // `NSString *s ...`
        SyntaxKind::Star => p.nth(2) == SyntaxKind::Ident
            && matches!(
                p.nth(3),
                SyntaxKind::Equals | SyntaxKind::Semicolon | SyntaxKind::Comma
            ),
        // `NSArray<NSString *> *a ...` — scan past the closing angle.
        SyntaxKind::AngleOpen => {
            let mut offset = 2;
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
            depth == 0 && matches!(p.nth(offset), SyntaxKind::Star | SyntaxKind::Ident)
        }
        _ => false,
    }
}

fn var_decl_stmt(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::VarDeclStmt);
    type_node(p);
    loop {
        var_declarator(p);
        if !p.eat(SyntaxKind::Comma) {
            break;
        }
    }
    p.expect(SyntaxKind::Semicolon, "expected ';'");
    p.finish_node();
}

fn var_declarator(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::VarDeclarator);
    p.expect(SyntaxKind::Ident, "expected variable name");
    if p.eat(SyntaxKind::BracketOpen) {
        p.eat(SyntaxKind::IntNumber);
        p.expect(SyntaxKind::BracketClose, "expected ']'");
    }
    if p.eat(SyntaxKind::Equals) {
        assignment_expr(p);
    }
    p.finish_node();
}

fn if_stmt(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::IfStmt);
    p.bump();
    p.expect(SyntaxKind::ParenOpen, "expected '('");
    expr(p);
    p.expect(SyntaxKind::ParenClose, "expected ')'");
    stmt(p);
    if p.eat(SyntaxKind::KwElse) {
        stmt(p);
    }
    p.finish_node();
}

fn while_stmt(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::WhileStmt);
    p.bump();
    p.expect(SyntaxKind::ParenOpen, "expected '('");
    expr(p);
    p.expect(SyntaxKind::ParenClose, "expected ')'");
    stmt(p);
    p.finish_node();
}

fn do_while_stmt(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::DoWhileStmt);
    p.bump();
    stmt(p);
    p.expect(SyntaxKind::KwWhile, "expected 'while'");
    p.expect(SyntaxKind::ParenOpen, "expected '('");
    expr(p);
    p.expect(SyntaxKind::ParenClose, "expected ')'");
    p.expect(SyntaxKind::Semicolon, "expected ';'");
    p.finish_node();
}

/// Distinguishes `for (T x in coll)` from the C three-clause form by
/// scanning for `in` before the first `;` or `)`.
fn for_stmt(p: &mut Parser<'_>) {
    let mut offset = 2; // past `for (`
    let mut is_for_in = false;
    while offset < 64 {
        match p.nth(offset) {
            SyntaxKind::KwIn => {
                is_for_in = true;
                break;
            }
            SyntaxKind::Semicolon | SyntaxKind::ParenClose | SyntaxKind::Error => break,
            _ => offset += 1,
        }
    }

    if is_for_in {
        p.start_node(SyntaxKind::ForInStmt);
        p.bump();
        p.expect(SyntaxKind::ParenOpen, "expected '('");
        if at_type_start(p) && p.nth(1) != SyntaxKind::KwIn {
            type_node(p);
        }
        p.expect(SyntaxKind::Ident, "expected loop variable");
        p.expect(SyntaxKind::KwIn, "expected 'in'");
        expr(p);
        p.expect(SyntaxKind::ParenClose, "expected ')'");
        stmt(p);
        p.finish_node();
    } else {
        p.start_node(SyntaxKind::ForStmt);
        p.bump();
        p.expect(SyntaxKind::ParenOpen, "expected '('");
        if !p.eat(SyntaxKind::Semicolon) {
            if at_var_decl(p) {
                var_decl_stmt(p);
            } else {
                p.start_node(SyntaxKind::ExprStmt);
                expr(p);
                p.expect(SyntaxKind::Semicolon, "expected ';'");
                p.finish_node();
            }
        }
        if !p.at(SyntaxKind::Semicolon) {
            expr(p);
        }
        p.expect(SyntaxKind::Semicolon, "expected ';'");
        if !p.at(SyntaxKind::ParenClose) {
            expr(p);
        }
        p.expect(SyntaxKind::ParenClose, "expected ')'");
        stmt(p);
        p.finish_node();
    }
}

fn switch_stmt(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::SwitchStmt);
    p.bump();
    p.expect(SyntaxKind::ParenOpen, "expected '('");
    expr(p);
    p.expect(SyntaxKind::ParenClose, "expected ')'");
    p.expect(SyntaxKind::BraceOpen, "expected '{'");
    while !p.eof() && !p.at(SyntaxKind::BraceClose) {
        switch_case(p);
    }
    p.expect(SyntaxKind::BraceClose, "expected '}'");
    p.finish_node();
}

/// `case expr:` / `default:` with the statements that follow until the
/// next label.
fn switch_case(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::SwitchCase);
    match p.current() {
        SyntaxKind::KwCase => {
            p.bump();
            expr(p);
            p.expect(SyntaxKind::Colon, "expected ':'");
        }
        SyntaxKind::KwDefault => {
            p.bump();
            p.expect(SyntaxKind::Colon, "expected ':'");
        }
        _ => {
            p.err_and_bump("expected 'case' or 'default'");
            p.finish_node();
            return;
        }
    }
    while !p.eof()
        && !matches!(
            p.current(),
            SyntaxKind::KwCase | SyntaxKind::KwDefault | SyntaxKind::BraceClose
        )
    {
        stmt(p);
    }
    p.finish_node();
}
