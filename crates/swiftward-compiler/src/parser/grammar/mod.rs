//! Recursive-descent grammar over the token stream.
//!
//! Each production builds CST nodes through the parser's builder. Recovery
//! is token-granular: an unexpected token is wrapped in an `ErrorNode` and
//! skipped, so one malformed declaration doesn't take the file down.

mod declarations;
mod expressions;
mod statements;
mod types;

pub(super) use expressions::expr;
pub(super) use statements::compound_stmt;
pub(super) use types::{at_type_start, type_node};

use super::core::Parser;
use super::cst::{token_sets, SyntaxKind};

/// Parses a whole translation unit into a `Root` node.
pub(super) fn root(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::Root);
    while !p.eof() {
        top_level_item(p);
    }
    p.drain_trivia();
    p.finish_node();
}

fn top_level_item(p: &mut Parser<'_>) {
    match p.current() {
        SyntaxKind::PreprocLine
        | SyntaxKind::NonnullBegin
        | SyntaxKind::NonnullEnd
        | SyntaxKind::Semicolon => p.bump(),
        SyntaxKind::AtInterface => declarations::interface_decl(p),
        SyntaxKind::AtImplementation => declarations::implementation_decl(p),
        SyntaxKind::AtProtocol => declarations::protocol_decl(p),
        SyntaxKind::AtClass => declarations::class_forward_decl(p),
        SyntaxKind::KwTypedef => declarations::typedef_decl(p),
        kind if kind == SyntaxKind::Ident || at_type_start(p) => {
            declarations::global_decl(p);
        }
        _ => {
            // Resynchronize on something that looks like a declaration.
            p.error("expected declaration");
            p.start_node(SyntaxKind::ErrorNode);
            p.bump();
            while !p.eof() && !p.at_set(token_sets::DECL_RECOVERY) && !at_type_start(p) {
                p.bump();
            }
            p.finish_node();
        }
    }
}
