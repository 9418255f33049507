//! Arena-based source storage for unified lifetimes.
//!
//! All translation units live in one contiguous buffer so every borrowed
//! slice shares the lifetime of `&SourceMap`. Cross-file stages (intention
//! collection, the rewrite passes) can then hold plain `&str`s without
//! per-file lifetime plumbing.

use std::ops::Range;

/// Lightweight handle to a source in a rewrite session.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default, serde::Serialize)]
pub struct SourceId(u32);

impl SourceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn from_index(index: usize) -> SourceId {
        SourceId(index as u32)
    }
}

/// A borrowed view of a source: id, display path, and content.
#[derive(Copy, Clone, Debug)]
pub struct Source<'a> {
    pub id: SourceId,
    pub path: &'a str,
    pub content: &'a str,
}

#[derive(Clone, Debug)]
struct SourceEntry {
    path_range: Range<u32>,
    content_range: Range<u32>,
}

/// Registry of all sources in a session. Owns a single buffer.
#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    buffer: String,
    entries: Vec<SourceEntry>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source with its display path (a file path, or a marker like
    /// `<input>` for inline content).
    pub fn add(&mut self, path: &str, content: &str) -> SourceId {
        let path_start = self.buffer.len() as u32;
        self.buffer.push_str(path);
        let path_end = self.buffer.len() as u32;

        let content_start = self.buffer.len() as u32;
        self.buffer.push_str(content);
        let content_end = self.buffer.len() as u32;

        let id = SourceId(self.entries.len() as u32);
        self.entries.push(SourceEntry {
            path_range: path_start..path_end,
            content_range: content_start..content_end,
        });
        id
    }

    /// A map holding a single inline source; convenience for tests and the
    /// single-file entry points.
    pub fn single(content: &str) -> Self {
        let mut map = Self::new();
        map.add("<input>", content);
        map
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: SourceId) -> Source<'_> {
        let entry = &self.entries[id.index()];
        Source {
            id,
            path: &self.buffer[entry.path_range.start as usize..entry.path_range.end as usize],
            content: &self.buffer
                [entry.content_range.start as usize..entry.content_range.end as usize],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Source<'_>> + '_ {
        (0..self.entries.len() as u32).map(|raw| self.get(SourceId(raw)))
    }
}
