//! Objective-C frontend: lexer, CST, grammar, and typed wrappers.

pub mod ast;
pub mod cst;
mod core;
mod grammar;
pub mod lexer;

#[cfg(test)]
mod tests;

pub use self::core::{ParseResult, Parser};
pub use cst::{ObjcLang, SyntaxKind, SyntaxNode, SyntaxToken};
pub use lexer::{lex, token_text, Token};

use crate::sources::SourceId;

/// Parses one source into a CST with recovery; syntax problems land in the
/// returned diagnostics.
pub fn parse_source(source: &str, id: SourceId) -> ParseResult {
    Parser::new(source, id, lex(source)).parse()
}
