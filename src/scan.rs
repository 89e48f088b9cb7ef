//! Single-pass scanner for the regions a matcher must ignore: block and line
//! comments, string literals, and character literals.
//!
//! The scanner is deliberately not a lexer. It only tracks enough state to
//! know whether a position is inside one of the four region kinds, with the
//! C-family escape rule for quotes: a closing quote is escaped when preceded
//! by a single backslash (`\"` stays open, `\\"` closes). Regions that never
//! terminate are dropped, except line comments, which end at EOF.

use memchr::{memchr, memmem};
use tracing::trace;

use crate::span::{Span, SpanSet, SpanTag};

/// Scan `text` and collect comment and literal spans, sorted by start.
pub fn build_ignored_spans(text: &str) -> SpanSet {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                match memmem::find(&bytes[i + 2..], b"*/") {
                    Some(rel) => {
                        let end = i + 2 + rel + 1;
                        push(&mut spans, i, end, SpanTag::Comment);
                        i = end + 1;
                    }
                    // Unterminated block comment: nothing after it is code.
                    None => break,
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => match memchr(b'\n', &bytes[i..]) {
                Some(rel) => {
                    push(&mut spans, i, i + rel - 1, SpanTag::Comment);
                    i += rel + 1;
                }
                None => {
                    push(&mut spans, i, bytes.len() - 1, SpanTag::Comment);
                    break;
                }
            },
            quote @ (b'"' | b'\'') => {
                let tag = if quote == b'"' {
                    SpanTag::StringLiteral
                } else {
                    SpanTag::CharLiteral
                };
                match find_closing_quote(bytes, i, quote) {
                    Some(close) => {
                        push(&mut spans, i, close, tag);
                        i = close + 1;
                    }
                    // Unterminated literal: drop it and stop scanning.
                    None => break,
                }
            }
            _ => i += 1,
        }
    }

    trace!(regions = spans.len(), "ignored-region scan complete");
    SpanSet::new(spans)
}

fn push(spans: &mut Vec<Span>, start: usize, end: usize, tag: SpanTag) {
    // Starts and ends come from forward scanning, so the range is valid.
    if let Ok(span) = Span::tagged(start, end, tag) {
        spans.push(span);
    }
}

/// Position of the quote that closes the literal opened at `open`.
/// A quote preceded by exactly one backslash is escaped; `\\` before the
/// quote means the backslash itself was escaped and the quote closes.
fn find_closing_quote(bytes: &[u8], open: usize, quote: u8) -> Option<usize> {
    let mut j = open + 1;
    while j < bytes.len() {
        if bytes[j] == quote {
            let escaped = bytes[j - 1] == b'\\' && (j < 2 || bytes[j - 2] != b'\\');
            if !escaped {
                return Some(j);
            }
        }
        j += 1;
    }
    None
}
