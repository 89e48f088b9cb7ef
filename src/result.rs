//! Match results and best-match selection.

use serde::Serialize;

use crate::span::Span;

/// How close a match must be to the line hint to win when scopes were not
/// checked.
pub const DEFAULT_LINE_HINT_THRESHOLD: u32 = 50;

/// One found occurrence of a query's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// ID of the query this result answers.
    pub id: String,
    /// Where in the file the occurrence starts and ends.
    pub span: Span,
    /// 1-based line of the occurrence.
    pub line: u32,
    /// Absolute distance in lines from the query's line hint.
    pub distance: u32,
    /// Whether enclosing scopes were compared for this occurrence.
    pub scope_checked: bool,
    /// Scope-chain delta, innermost-first comparison of requested vs found.
    ///
    /// `Some(0)` is exact; positive means the request named more outer
    /// levels than the file showed (all found levels matched); negative
    /// means the file had more outer levels than the request named.
    /// `None` means the chains disagreed at a shared level.
    pub scope_match: Option<i32>,
    /// The occurrence lies inside a string literal.
    pub string_literal: bool,
}

/// Pick the best result from one query's matches.
///
/// A single result must either be scope-verified or lie within `threshold`
/// lines of the hint. Among several, string literals are preferred when
/// requested and present; scope-verified results beat hint distance, with
/// `|scope_match|` minimized first and distance breaking ties.
pub fn best_match(
    results: &[MatchResult],
    threshold: u32,
    prefer_string_literals: bool,
) -> Option<&MatchResult> {
    match results {
        [] => None,
        [only] => {
            let ok = (only.scope_checked && only.scope_match.is_some())
                || (!only.scope_checked && only.distance <= threshold);
            ok.then_some(only)
        }
        _ => {
            let pool: Vec<&MatchResult> =
                if prefer_string_literals && results.iter().any(|m| m.string_literal) {
                    results.iter().filter(|m| m.string_literal).collect()
                } else {
                    results.iter().collect()
                };

            if pool.iter().any(|m| m.scope_checked) {
                // Keep the first result per (|delta|, distance) so earlier
                // lines win ties.
                let mut best: Option<(u32, u32, &MatchResult)> = None;
                for m in pool {
                    if !m.scope_checked {
                        continue;
                    }
                    let Some(delta) = m.scope_match else { continue };
                    let key = (delta.unsigned_abs(), m.distance);
                    if best.is_none_or(|(d, dist, _)| key < (d, dist)) {
                        best = Some((key.0, key.1, m));
                    }
                }
                best.map(|(_, _, m)| m)
            } else {
                let mut best: Option<&MatchResult> = None;
                for m in pool {
                    if m.distance > threshold {
                        continue;
                    }
                    if best.is_none_or(|b| m.distance < b.distance) {
                        best = Some(m);
                    }
                }
                best
            }
        }
    }
}
