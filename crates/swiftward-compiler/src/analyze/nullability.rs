//! `NS_ASSUME_NONNULL_BEGIN` / `_END` region tracking.
//!
//! Regions are computed once per file from the token stream; every intention
//! records whether its declaration offset falls inside one. An unbalanced
//! `BEGIN` extends to end of file (matching the macro's preprocessor
//! behavior).

use rowan::{TextRange, TextSize};

use crate::parser::{SyntaxKind, SyntaxNode};

/// The audited-nullability regions of one file.
#[derive(Debug, Clone, Default)]
pub struct NullabilityRegions {
    ranges: Vec<TextRange>,
}

impl NullabilityRegions {
    /// Scans a file's CST for region markers.
    pub fn scan(root: &SyntaxNode) -> Self {
        let mut ranges = Vec::new();
        let mut open: Option<TextSize> = None;

        for element in root.descendants_with_tokens() {
            let Some(token) = element.into_token() else {
                continue;
            };
            match token.kind() {
                SyntaxKind::NonnullBegin => {
                    if open.is_none() {
                        open = Some(token.text_range().start());
                    }
                }
                SyntaxKind::NonnullEnd => {
                    if let Some(start) = open.take() {
                        ranges.push(TextRange::new(start, token.text_range().end()));
                    }
                }
                _ => {}
            }
        }

        if let Some(start) = open {
            let end = root.text_range().end();
            ranges.push(TextRange::new(start, end));
        }

        Self { ranges }
    }

    /// Whether a declaration at `offset` is inside a nonnull-assumed region.
    pub fn contains(&self, offset: TextSize) -> bool {
        self.ranges.iter().any(|r| r.contains(offset))
    }
}
