//! Ignored-span-aware text scanning primitives.
//!
//! `SourceText` bundles the file contents with its ignored-region set and a
//! newline index. All searches skip hits that fall inside ignored regions;
//! a search may opt string literals back in, since recorded snippets often
//! contain them.

use memchr::memmem;
use tracing::trace;

use crate::line_index::LineIndex;
use crate::scan::build_ignored_spans;
use crate::span::{SpanSet, SpanTag};

/// Options for [`SourceText::index_of`] and [`SourceText::last_index_of`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Find {
    /// Require the hit to sit on whole-word boundaries (the neighbors must
    /// not be alphanumeric).
    pub whole_word: bool,
    /// Allow hits inside string literals.
    pub in_string_literals: bool,
}

impl Find {
    pub fn whole_word() -> Self {
        Self {
            whole_word: true,
            ..Self::default()
        }
    }

    pub fn in_string_literals() -> Self {
        Self {
            in_string_literals: true,
            ..Self::default()
        }
    }
}

/// File contents plus the lexical context searches need.
#[derive(Debug, Clone)]
pub struct SourceText {
    text: String,
    ignored: SpanSet,
    lines: LineIndex,
}

impl SourceText {
    /// Build with C-style comment and literal regions ignored.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let ignored = build_ignored_spans(&text);
        let lines = LineIndex::build(text.as_bytes());
        trace!(bytes = text.len(), ignored = ignored.len(), "source text ready");
        Self { text, ignored, lines }
    }

    /// Build with no ignored regions at all. Every byte is searchable.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = LineIndex::build(text.as_bytes());
        Self {
            text,
            ignored: SpanSet::default(),
            lines,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn ignored(&self) -> &SpanSet {
        &self.ignored
    }

    /// 1-based line of a byte offset.
    pub fn line_of(&self, pos: usize) -> u32 {
        self.lines.line_of(pos)
    }

    pub fn is_string_literal(&self, pos: usize) -> bool {
        self.ignored.is_string_literal(pos)
    }

    fn exclude_tag(opts: Find) -> Option<SpanTag> {
        opts.in_string_literals.then_some(SpanTag::StringLiteral)
    }

    fn word_boundary(&self, pos: usize, len: usize) -> bool {
        let bytes = self.bytes();
        let before_ok = pos == 0 || !bytes[pos - 1].is_ascii_alphanumeric();
        let after_ok = pos + len >= bytes.len() || !bytes[pos + len].is_ascii_alphanumeric();
        before_ok && after_ok
    }

    /// First occurrence of `needle` in `[start, end]` (inclusive bounds;
    /// `end` defaults to EOF) that passes the ignored-region and word-
    /// boundary checks.
    pub fn index_of(
        &self,
        needle: &str,
        start: usize,
        end: Option<usize>,
        opts: Find,
    ) -> Option<usize> {
        if needle.is_empty() || self.text.is_empty() {
            return None;
        }
        let end = end.unwrap_or(self.len() - 1).min(self.len() - 1);
        if start > end {
            return None;
        }

        let exclude = Self::exclude_tag(opts);
        let finder = memmem::Finder::new(needle.as_bytes());
        let hay = &self.bytes()[start..=end];
        let mut offset = 0usize;

        while let Some(rel) = finder.find(&hay[offset..]) {
            let abs = start + offset + rel;
            let skip = self.ignored.covers(abs, needle.len(), exclude)
                || (opts.whole_word && !self.word_boundary(abs, needle.len()));
            if !skip {
                return Some(abs);
            }
            offset += rel + needle.len();
        }
        None
    }

    /// First occurrence of byte `b` at or after `start`, outside ignored
    /// regions, up to `end` (inclusive) when given.
    pub fn index_of_byte(&self, b: u8, start: usize, end: Option<usize>) -> Option<usize> {
        if self.text.is_empty() {
            return None;
        }
        let end = end.unwrap_or(self.len() - 1).min(self.len() - 1);
        let mut pos = start;
        while pos <= end {
            let rel = memchr::memchr(b, &self.bytes()[pos..=end])?;
            let abs = pos + rel;
            if !self.ignored.covers(abs, 1, None) {
                return Some(abs);
            }
            pos = abs + 1;
        }
        None
    }

    /// Last occurrence of `needle` starting at or before `from`, searching
    /// backward, with the same checks as [`Self::index_of`].
    pub fn last_index_of(&self, needle: &str, from: usize, opts: Find) -> Option<usize> {
        if needle.is_empty() || self.text.is_empty() {
            return None;
        }
        let exclude = Self::exclude_tag(opts);
        let finder = memmem::FinderRev::new(needle.as_bytes());
        // The hit may begin at `from` at the latest.
        let mut limit = (from.min(self.len() - 1) + needle.len()).min(self.len());

        while let Some(rel) = finder.rfind(&self.bytes()[..limit]) {
            if rel <= from {
                let skip = self.ignored.covers(rel, needle.len(), exclude)
                    || (opts.whole_word && !self.word_boundary(rel, needle.len()));
                if !skip {
                    return Some(rel);
                }
            }
            if rel == 0 {
                break;
            }
            limit = rel + needle.len() - 1;
        }
        None
    }

    /// Last occurrence of byte `b` at or before `from`, outside ignored
    /// regions.
    pub fn last_index_of_byte(&self, b: u8, from: usize) -> Option<usize> {
        if self.text.is_empty() {
            return None;
        }
        let mut limit = from.min(self.len() - 1) + 1;
        while limit > 0 {
            let abs = memchr::memrchr(b, &self.bytes()[..limit])?;
            if !self.ignored.covers(abs, 1, None) {
                return Some(abs);
            }
            limit = abs;
        }
        None
    }

    /// The text of `[start, start + len)` (to EOF when `len` is `None`),
    /// with the contents of ignored regions omitted.
    pub fn substring(&self, start: usize, len: Option<usize>) -> String {
        if start >= self.len() {
            return String::new();
        }
        let end = match len {
            Some(len) if len > 0 => (start + len - 1).min(self.len() - 1),
            Some(_) => return String::new(),
            None => self.len() - 1,
        };

        let mut out: Vec<u8> = Vec::with_capacity(end - start + 1);
        let mut i = start;
        while i <= end {
            match self.ignored.containing_span(i) {
                Some(span) => i = span.end + 1,
                None => {
                    // Copy up to the next ignored region in one go.
                    let stop = match self.ignored.next_span(i) {
                        Some(next) if next.start <= end => next.start,
                        _ => end + 1,
                    };
                    out.extend_from_slice(&self.bytes()[i..stop]);
                    i = stop;
                }
            }
        }
        String::from_utf8_lossy(&out).into_owned()
    }
}
