//! Match queries: the snippet to find plus the hints recorded with it.

use serde::{Deserialize, Serialize};

/// What kind of construct the query text refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTypeHint {
    /// An ordinary line (or lines) of code.
    #[default]
    Code,
    /// The text names a function whose definition is wanted.
    Function,
    /// The text names a class.
    Class,
    Unknown,
}

/// A single query: text to find, a 1-based line hint, and optional context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchQuery {
    /// Caller-chosen ID used to correlate batched results with queries.
    pub id: String,
    /// The text to search for.
    pub text: String,
    /// The 1-based line the text was last seen on.
    pub line_hint: u32,
    /// Signature of the enclosing function, e.g. `Namespace::Class::Method`.
    pub signature: Option<String>,
    pub type_hint: MatchTypeHint,
    /// Require occurrences to match on whole-token boundaries.
    pub whole_tokens: bool,
}

impl MatchQuery {
    pub fn new(text: impl Into<String>, line_hint: u32) -> Self {
        Self {
            id: "0".to_string(),
            text: text.into(),
            line_hint,
            signature: None,
            type_hint: MatchTypeHint::Code,
            whole_tokens: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn with_type_hint(mut self, hint: MatchTypeHint) -> Self {
        self.type_hint = hint;
        self
    }

    pub fn with_whole_tokens(mut self, whole: bool) -> Self {
        self.whole_tokens = whole;
        self
    }

    /// The line ending used by the query text, detected in the order
    /// `\r\n`, `\r`, `\n`.
    pub fn detected_line_ending(&self) -> Option<&'static str> {
        if self.text.contains("\r\n") {
            Some("\r\n")
        } else if self.text.contains('\r') {
            Some("\r")
        } else if self.text.contains('\n') {
            Some("\n")
        } else {
            None
        }
    }

    /// The query text split on its detected line ending.
    pub fn lines(&self) -> Vec<&str> {
        match self.detected_line_ending() {
            Some(eol) => self.text.split(eol).collect(),
            None => vec![self.text.as_str()],
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines().len()
    }

    /// Rewrite the query text to use `eol` as its line ending. Useful when
    /// the file being searched uses different line endings than the text
    /// recorded with the finding.
    pub fn normalize_line_endings(&mut self, eol: &str) {
        if let Some(current) = self.detected_line_ending() {
            if current != eol {
                self.text = self.text.split(current).collect::<Vec<_>>().join(eol);
            }
        }
    }
}
