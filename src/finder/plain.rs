//! Plain forward scan: every occurrence of the text, no scope awareness.
//!
//! This is the whole story for languages without C-style scope support and
//! the fallback the C-style engine uses when a signature gives it nothing
//! to work with.

use tracing::debug;

use crate::query::MatchQuery;
use crate::result::MatchResult;
use crate::span::Span;
use crate::text::{Find, SourceText};

/// Scan the whole file for `query.text`. String literals are searched;
/// comments are not. Results are unverified (`scope_checked == false`).
pub fn find_matches_basic(src: &SourceText, query: &MatchQuery) -> Vec<MatchResult> {
    let mut matches = Vec::new();
    if query.text.is_empty() {
        return matches;
    }

    let mut start = 0usize;
    while let Some(pos) = src.index_of(&query.text, start, None, Find::in_string_literals()) {
        let end = pos + query.text.len() - 1;
        let line = src.line_of(pos);
        if let Ok(span) = Span::new(pos, end) {
            matches.push(MatchResult {
                id: query.id.clone(),
                span,
                line,
                distance: line.abs_diff(query.line_hint),
                scope_checked: false,
                scope_match: None,
                string_literal: src.is_string_literal(pos),
            });
        }
        start = pos + query.text.len();
    }

    debug!(id = %query.id, count = matches.len(), "basic scan complete");
    matches
}
