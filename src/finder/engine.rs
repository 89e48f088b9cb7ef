//! The [`Matcher`] facade: picks an engine for a file and runs queries
//! against it.

use tracing::{debug, instrument};

use crate::finder::cstyle::CStyleEngine;
use crate::finder::plain;
use crate::lang::{Language, LanguageProfile};
use crate::query::MatchQuery;
use crate::result::MatchResult;
use crate::text::SourceText;

enum Engine {
    CStyle(CStyleEngine),
    Plain(SourceText),
}

/// A file's contents, ready to answer match queries.
///
/// C, C++, and C# files get the scope-aware engine; everything else gets a
/// plain text scan.
pub struct Matcher {
    engine: Engine,
    language: Language,
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher")
            .field("language", &self.language)
            .finish()
    }
}

impl Matcher {
    /// Build for a file, with the engine chosen from the path's extension.
    pub fn from_path(path: &str, text: impl Into<String>) -> Self {
        Self::new(text, Language::from_path(path))
    }

    pub fn new(text: impl Into<String>, language: Language) -> Self {
        let engine = match LanguageProfile::for_language(language) {
            Some(profile) => Engine::CStyle(CStyleEngine::new(text, profile)),
            None => Engine::Plain(SourceText::new(text)),
        };
        debug!(?language, "matcher ready");
        Self { engine, language }
    }

    /// Build with no language-specific handling at all: comments and
    /// literals are not skipped either.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            engine: Engine::Plain(SourceText::plain(text)),
            language: Language::Unknown,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn source(&self) -> &SourceText {
        match &self.engine {
            Engine::CStyle(engine) => engine.source(),
            Engine::Plain(src) => src,
        }
    }

    /// The line ending the file itself uses.
    fn line_ending(&self) -> &'static str {
        let text = self.source().as_str();
        if text.contains("\r\n") {
            "\r\n"
        } else if text.contains('\r') {
            "\r"
        } else {
            "\n"
        }
    }

    fn prepare(&self, query: &MatchQuery) -> MatchQuery {
        let mut query = query.clone();
        query.normalize_line_endings(self.line_ending());
        query
    }

    /// All occurrences of the query's text, scope-first strategy, ordered
    /// by line.
    #[instrument(skip(self, query), fields(id = %query.id))]
    pub fn find_matches(&self, query: &MatchQuery) -> Vec<MatchResult> {
        let query = self.prepare(query);
        let mut matches = match &self.engine {
            Engine::CStyle(engine) => engine.find_matches(&query),
            Engine::Plain(src) => plain::find_matches_basic(src, &query),
        };
        matches.sort_by_key(|m| m.line);
        matches
    }

    /// All occurrences of the query's text, scan-first strategy, ordered
    /// by line.
    #[instrument(skip(self, query), fields(id = %query.id))]
    pub fn find_matches_v2(&self, query: &MatchQuery) -> Vec<MatchResult> {
        let query = self.prepare(query);
        let mut matches = match &self.engine {
            Engine::CStyle(engine) => engine.find_matches_v2(&query),
            Engine::Plain(src) => plain::find_matches_basic(src, &query),
        };
        matches.sort_by_key(|m| m.line);
        matches
    }

    /// Run a batch of queries against the file. Results carry their query's
    /// ID and come back ordered by (ID, line).
    pub fn find_all(&self, queries: &[MatchQuery]) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = queries
            .iter()
            .flat_map(|q| self.find_matches(q))
            .collect();
        results.sort_by(|a, b| (&a.id, a.line).cmp(&(&b.id, b.line)));
        results
    }

    /// Batch form of [`Self::find_matches_v2`].
    pub fn find_all_v2(&self, queries: &[MatchQuery]) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = queries
            .iter()
            .flat_map(|q| self.find_matches_v2(q))
            .collect();
        results.sort_by(|a, b| (&a.id, a.line).cmp(&(&b.id, b.line)));
        results
    }
}
