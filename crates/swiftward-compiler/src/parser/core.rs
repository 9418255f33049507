//! Parser state machine and low-level operations.
//!
//! Trivia tokens (whitespace, comments) are buffered and flushed as leading
//! trivia when a new node starts. This gives predictable trivia attachment
//! without backtracking.

use rowan::{Checkpoint, GreenNodeBuilder, TextRange, TextSize};

use super::cst::{SyntaxKind, SyntaxNode, TokenSet};
use super::lexer::{token_text, Token};
use crate::diagnostics::Diagnostics;
use crate::sources::SourceId;

/// Nesting limit for recursive grammar productions.
pub(super) const MAX_DEPTH: u32 = 256;

#[derive(Debug)]
pub struct ParseResult {
    pub root: SyntaxNode,
    pub diagnostics: Diagnostics,
}

pub struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) source_id: SourceId,
    tokens: Vec<Token>,
    pos: usize,
    trivia_buffer: Vec<Token>,
    builder: GreenNodeBuilder<'static>,
    pub(super) diagnostics: Diagnostics,
    pub(super) depth: u32,
    last_diagnostic_pos: Option<TextSize>,
    debug_fuel: std::cell::Cell<u32>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, source_id: SourceId, tokens: Vec<Token>) -> Self {
        Self {
            source,
            source_id,
            tokens,
            pos: 0,
            trivia_buffer: Vec::with_capacity(4),
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            depth: 0,
            last_diagnostic_pos: None,
            debug_fuel: std::cell::Cell::new(256),
        }
    }

    pub fn parse(mut self) -> ParseResult {
        super::grammar::root(&mut self);
        self.drain_trivia();
        let green = self.builder.finish();
        ParseResult {
            root: SyntaxNode::new_root(green),
            diagnostics: self.diagnostics,
        }
    }

    // ------------------------------------------------------------------
    // Lookahead
    // ------------------------------------------------------------------

    fn reset_debug_fuel(&self) {
        self.debug_fuel.set(256);
    }

    fn ensure_progress(&self) {
        let fuel = self.debug_fuel.get();
        debug_assert!(fuel > 0, "parser stuck: no progress at {}", self.pos);
        self.debug_fuel.set(fuel.saturating_sub(1));
    }

    /// Returns `Error` at EOF (acts as sentinel).
    pub(super) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(super) fn nth(&self, lookahead: usize) -> SyntaxKind {
        self.ensure_progress();
        let mut seen = 0;
        for token in &self.tokens[self.pos.min(self.tokens.len())..] {
            if token.kind.is_trivia() {
                continue;
            }
            if seen == lookahead {
                return token.kind;
            }
            seen += 1;
        }
        SyntaxKind::Error
    }

    pub(super) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn at_set(&self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    pub(super) fn eof(&self) -> bool {
        self.current() == SyntaxKind::Error
    }

    /// Span of the current (non-trivia) token, or an empty span at EOF.
    pub(super) fn current_span(&self) -> TextRange {
        let mut index = self.pos;
        while index < self.tokens.len() && self.tokens[index].kind.is_trivia() {
            index += 1;
        }
        self.tokens
            .get(index)
            .map_or_else(|| TextRange::empty(self.eof_offset()), |t| t.span)
    }

    pub(super) fn eof_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }

    /// Text of the current token.
    pub(super) fn text(&self) -> &'src str {
        self.nth_text(0)
    }

    /// Text of the `lookahead`-th non-trivia token; empty at EOF.
    pub(super) fn nth_text(&self, lookahead: usize) -> &'src str {
        let mut seen = 0;
        for token in &self.tokens[self.pos.min(self.tokens.len())..] {
            if token.kind.is_trivia() {
                continue;
            }
            if seen == lookahead {
                return token_text(self.source, token);
            }
            seen += 1;
        }
        ""
    }

    // ------------------------------------------------------------------
    // Consumption
    // ------------------------------------------------------------------

    fn buffer_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if token.kind.is_trivia() {
                self.trivia_buffer.push(*token);
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    pub(super) fn drain_trivia(&mut self) {
        self.buffer_trivia();
        for token in std::mem::take(&mut self.trivia_buffer) {
            self.builder
                .token(token.kind.into_raw(), token_text(self.source, &token));
        }
    }

    /// Adds the current token to the tree and advances.
    pub(super) fn bump(&mut self) {
        self.drain_trivia();
        let Some(token) = self.tokens.get(self.pos).copied() else {
            return;
        };
        debug_assert!(!token.kind.is_trivia());
        self.builder
            .token(token.kind.into_raw(), token_text(self.source, &token));
        self.pos += 1;
        self.reset_debug_fuel();
    }

    /// Bumps only if at `kind`; returns whether it did.
    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, kind: SyntaxKind, message: &str) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error(message);
        false
    }

    // ------------------------------------------------------------------
    // Node construction
    // ------------------------------------------------------------------

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.drain_trivia();
        self.builder.start_node(kind.into_raw());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Checkpoint for retroactive wrapping; trivia is flushed first so the
    /// wrapped range starts at real content.
    pub(super) fn checkpoint(&mut self) -> Checkpoint {
        self.drain_trivia();
        self.builder.checkpoint()
    }

    pub(super) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into_raw());
    }

    // ------------------------------------------------------------------
    // Errors and recovery
    // ------------------------------------------------------------------

    /// Emits a parse error at the current position; consecutive errors at
    /// the same position collapse into one.
    pub(super) fn error(&mut self, message: impl Into<String>) {
        let span = self.current_span();
        if self.last_diagnostic_pos == Some(span.start()) {
            return;
        }
        self.last_diagnostic_pos = Some(span.start());
        self.diagnostics.error(self.source_id, message, span).emit();
    }

    /// Error + wrap the offending token in an `ErrorNode` to make progress.
    pub(super) fn err_and_bump(&mut self, message: impl Into<String>) {
        self.error(message);
        if !self.eof() {
            self.start_node(SyntaxKind::ErrorNode);
            self.bump();
            self.finish_node();
        }
    }

    /// Guards a recursive production; callers skip the body when it
    /// reports depth exhaustion.
    pub(super) fn enter(&mut self) -> bool {
        if self.depth >= MAX_DEPTH {
            self.error("nesting too deep");
            return false;
        }
        self.depth += 1;
        true
    }

    pub(super) fn exit(&mut self) {
        debug_assert!(self.depth > 0);
        self.depth -= 1;
    }
}

trait IntoRaw {
    fn into_raw(self) -> rowan::SyntaxKind;
}

impl IntoRaw for SyntaxKind {
    fn into_raw(self) -> rowan::SyntaxKind {
        <super::cst::ObjcLang as rowan::Language>::kind_to_raw(self)
    }
}
