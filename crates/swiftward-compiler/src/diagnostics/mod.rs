//! Compiler diagnostics infrastructure.
//!
//! Diagnostics are collected per stage and merged upward; rendering goes
//! through [`DiagnosticsPrinter`]. Every message is tagged with the
//! [`SourceId`] it belongs to so multi-file sessions render against the
//! right content.

mod message;
mod printer;

#[cfg(test)]
mod tests;

use rowan::TextRange;

pub use message::Severity;
pub use printer::DiagnosticsPrinter;

use crate::sources::SourceId;
use message::{DiagnosticMessage, Fix, RelatedInfo};

/// Collection of diagnostic messages from parsing and analysis.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

/// Builder for constructing a diagnostic message.
#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    pub fn error(
        &mut self,
        source: SourceId,
        msg: impl Into<String>,
        range: TextRange,
    ) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::error(source, range, msg),
        }
    }

    pub fn warning(
        &mut self,
        source: SourceId,
        msg: impl Into<String>,
        range: TextRange,
    ) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::warning(source, range, msg),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|d| d.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_warning()).count()
    }

    /// Errors belonging to one source only.
    pub fn has_errors_for(&self, source: SourceId) -> bool {
        self.messages
            .iter()
            .any(|d| d.is_error() && d.source == source)
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }

    /// Structured view for JSON output: `(severity, path-index, range,
    /// message)` per entry, resolved against a source map by the caller.
    pub fn entries(&self) -> impl Iterator<Item = DiagnosticEntry<'_>> {
        self.messages.iter().map(|m| DiagnosticEntry {
            severity: m.severity,
            source: m.source,
            range: m.range,
            message: &m.message,
        })
    }
}

/// Borrowed flat view of one diagnostic.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticEntry<'a> {
    pub severity: Severity,
    pub source: SourceId,
    pub range: TextRange,
    pub message: &'a str,
}

impl<'a> DiagnosticBuilder<'a> {
    pub fn related_to(mut self, msg: impl Into<String>, range: TextRange) -> Self {
        self.message.related.push(RelatedInfo::new(range, msg));
        self
    }

    pub fn fix(mut self, description: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.message.fix = Some(Fix::new(replacement, description));
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}

/// 1-based line and column of a byte offset within `source`.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.bytes().filter(|&b| b == b'\n').count() + 1;
    let col = before
        .rfind('\n')
        .map_or(before.chars().count(), |nl| before[nl + 1..].chars().count())
        + 1;
    (line, col)
}
