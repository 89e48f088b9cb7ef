//! Inclusive byte spans with region tags, plus `SpanSet`, the sorted collection
//! of ignored regions the engines query while scanning.
//!
//! Spans are inclusive on both ends (`[start, end]`), matching the way the
//! scanner records regions: a string literal span covers both quotes. The
//! collection is built once, sorted by start, and answered with binary search.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpanError {
    #[error("span start {start} is past end {end}")]
    Inverted { start: usize, end: usize },
}

/// What kind of region a span marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanTag {
    #[default]
    None,
    Comment,
    StringLiteral,
    CharLiteral,
}

/// An inclusive byte range within a file, optionally tagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub tag: SpanTag,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Result<Self, SpanError> {
        Self::tagged(start, end, SpanTag::None)
    }

    pub fn tagged(start: usize, end: usize, tag: SpanTag) -> Result<Self, SpanError> {
        if start > end {
            return Err(SpanError::Inverted { start, end });
        }
        Ok(Self { start, end, tag })
    }

    /// Number of bytes covered. Inclusive bounds, so never zero.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains_pos(&self, pos: usize) -> bool {
        pos >= self.start && pos <= self.end
    }

    /// True if `other` lies entirely within this span.
    pub fn contains(&self, other: &Span) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// True if the two spans share at least one position.
    pub fn intersects(&self, other: &Span) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// An immutable set of non-overlapping spans, sorted by start position.
#[derive(Debug, Clone, Default)]
pub struct SpanSet {
    spans: Vec<Span>,
}

impl SpanSet {
    /// Build a set from scanner output. Spans are sorted; the scanner
    /// guarantees they do not overlap.
    pub fn new(mut spans: Vec<Span>) -> Self {
        spans.sort_by_key(|s| s.start);
        Self { spans }
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Span> {
        self.spans.iter()
    }

    /// The span containing `pos`, if any.
    pub fn containing_span(&self, pos: usize) -> Option<&Span> {
        let idx = self.spans.partition_point(|s| s.start <= pos);
        let candidate = self.spans.get(idx.checked_sub(1)?)?;
        candidate.contains_pos(pos).then_some(candidate)
    }

    /// The nearest span ending strictly before `pos`.
    pub fn previous_span(&self, pos: usize) -> Option<&Span> {
        // Non-overlapping spans sorted by start are also sorted by end.
        let idx = self.spans.partition_point(|s| s.end < pos);
        self.spans.get(idx.checked_sub(1)?)
    }

    /// The nearest span starting strictly after `pos`.
    pub fn next_span(&self, pos: usize) -> Option<&Span> {
        let idx = self.spans.partition_point(|s| s.start <= pos);
        self.spans.get(idx)
    }

    /// True if `[start, start + len)` lies entirely within one span whose tag
    /// is not `exclude_tag`. A zero-length range is never covered.
    pub fn covers(&self, start: usize, len: usize, exclude_tag: Option<SpanTag>) -> bool {
        if len == 0 {
            return false;
        }
        match self.containing_span(start) {
            Some(span) if Some(span.tag) != exclude_tag => span.contains_pos(start + len - 1),
            _ => false,
        }
    }

    /// True if `pos` falls inside a string literal.
    pub fn is_string_literal(&self, pos: usize) -> bool {
        self.containing_span(pos)
            .is_some_and(|s| s.tag == SpanTag::StringLiteral)
    }
}
