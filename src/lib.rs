//! **refind** - Scope-aware code matching for relocating findings in changed sources.
//!
//! Given a recorded snippet, a line-number hint, and optionally the signature of the
//! enclosing function, `refind` locates the snippet in the current contents of a file.
//! It lexes just enough of the file to skip comments and string/char literals, resolves
//! brace-delimited scopes, and ranks candidate occurrences by how well their actual
//! enclosing scopes match the requested chain.

/// Command-line interface with clap integration
pub mod cli;

/// Inclusive byte spans and the sorted ignored-region collection
pub mod span;

/// Single-pass scanner for comments and string/char literals
pub mod scan;

/// Newline index for byte offset to 1-based line mapping
pub mod line_index;

/// Identifier-aware tokenizer and scope-chain comparison
pub mod tokens;

/// Scope kinds and identifiers parsed from function signatures
pub mod scope;

/// Match queries and line-ending helpers
pub mod query;

/// Match results and best-match ranking
pub mod result;

/// Language detection, keyword sets, and signature parsers
pub mod lang;

/// Ignored-span-aware text scanning primitives
pub mod text;

/// Match engines and the `Matcher` facade
pub mod finder {
    /// Engine dispatch, batch queries
    pub mod engine;
    pub use engine::Matcher;

    /// Plain forward-scan engine for languages without scope support
    pub mod plain;

    /// C-style engine: scope resolution, classification, narrowing
    pub mod cstyle;
}

// Strategic re-exports for external consumers
pub use finder::Matcher;
pub use lang::{Language, LanguageProfile};
pub use query::{MatchQuery, MatchTypeHint};
pub use result::{DEFAULT_LINE_HINT_THRESHOLD, MatchResult, best_match};
pub use scope::{ScopeIdentifier, ScopeKind};
pub use span::{Span, SpanError, SpanSet, SpanTag};
