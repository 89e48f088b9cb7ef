//! The C-style engine: brace-delimited scope resolution and scope-aware
//! matching for C, C++, and C#.
//!
//! Two strategies are offered. [`CStyleEngine::find_matches`] narrows the
//! file to the scopes named by the signature first and scans only inside
//! them, so every result is an exact scope match. [`CStyleEngine::
//! find_matches_v2`] scans the whole file first and grades each occurrence
//! by how well its actual enclosing scopes agree with the signature; it
//! degrades more gracefully when the signature is partial or stale.

use smallvec::SmallVec;
use tracing::{debug, instrument, trace};

use crate::finder::plain;
use crate::lang::LanguageProfile;
use crate::query::{MatchQuery, MatchTypeHint};
use crate::result::MatchResult;
use crate::scope::{ScopeIdentifier, ScopeKind};
use crate::span::Span;
use crate::text::{Find, SourceText};
use crate::tokens::{compare_chains, is_word, is_word_char, remove_between, remove_between_keep_delims, tokenize};

/// Scope-aware matcher for one file's contents.
#[derive(Debug)]
pub struct CStyleEngine {
    src: SourceText,
    profile: LanguageProfile,
}

impl CStyleEngine {
    pub fn new(text: impl Into<String>, profile: LanguageProfile) -> Self {
        Self {
            src: SourceText::new(text),
            profile,
        }
    }

    pub fn source(&self) -> &SourceText {
        &self.src
    }

    /// Scope-first strategy: narrow to the signature's scopes, then scan
    /// only inside them.
    #[instrument(skip(self, query), fields(id = %query.id))]
    pub fn find_matches(&self, query: &MatchQuery) -> Vec<MatchResult> {
        let signature = query.signature.as_deref().unwrap_or("");
        let mut identifiers = self.profile.parse_signature(signature);

        // A function-definition query must have the function itself at the
        // end of the chain so the narrower descends into (or up to) it.
        if query.type_hint == MatchTypeHint::Function
            && identifiers.last().map(|i| i.name.as_str()) != Some(query.text.as_str())
        {
            identifiers.push(ScopeIdentifier::explicit(&query.text, ScopeKind::Function));
        }

        if identifiers.is_empty() {
            return plain::find_matches_basic(&self.src, query);
        }

        let Ok(whole_file) = Span::new(0, self.src.len().saturating_sub(1)) else {
            return Vec::new();
        };
        let mut search_spans = Vec::new();
        self.find_scope_spans(&mut identifiers, 0, whole_file, &mut search_spans);
        trace!(scopes = search_spans.len(), "narrowed search scopes");

        if query.type_hint == MatchTypeHint::Function {
            self.find_function_definition(query, &search_spans)
        } else if search_spans.is_empty() {
            // No scope could be pinned down; better inaccurate results
            // than none.
            plain::find_matches_basic(&self.src, query)
        } else {
            self.find_code(query, &search_spans)
        }
    }

    /// Scan-first strategy: find every occurrence of the text, then grade
    /// its enclosing scopes against the signature.
    #[instrument(skip(self, query), fields(id = %query.id))]
    pub fn find_matches_v2(&self, query: &MatchQuery) -> Vec<MatchResult> {
        let signature = query.signature.as_deref().unwrap_or("");
        let mut text = query.text.clone();

        // Braces open and close scopes themselves; without a signature to
        // anchor them there is no meaningful grading to do.
        if signature.trim().is_empty() && (text == "{" || text == "}") {
            return plain::find_matches_basic(&self.src, query);
        }

        // Innermost-first scope names from the signature.
        let mut scopes_to_find: Vec<String> = self
            .profile
            .parse_signature(signature)
            .into_iter()
            .rev()
            .map(|i| i.name)
            .collect();

        // For a function-definition query whose text already names the
        // innermost scope, search for the bare function name and match the
        // remaining chain around it.
        if query.type_hint == MatchTypeHint::Function
            && scopes_to_find.first().is_some_and(|s| text.ends_with(s.as_str()))
        {
            text = scopes_to_find.remove(0);
        }

        let text_tokens = if query.whole_tokens {
            tokenize(&text)
        } else {
            Vec::new()
        };

        let mut matches = Vec::new();
        if text.is_empty() {
            return matches;
        }

        let mut text_pos = 0usize;
        while let Some(pos) = self.src.index_of(&text, text_pos, None, Find::in_string_literals()) {
            text_pos = pos + text.len();

            if query.whole_tokens && !self.is_whole_token_match(pos, &text, &text_tokens) {
                continue;
            }

            let mut found_scopes: SmallVec<[String; 8]> = SmallVec::new();

            if query.type_hint == MatchTypeHint::Function {
                // The occurrence must itself be a function definition named
                // by the text; its header may chain outer scopes.
                let (mut ids, is_function) = self.scope_identifiers_at(pos);
                if is_function && ids.first().map(String::as_str) == Some(text.as_str()) {
                    ids.remove(0);
                    found_scopes.extend(ids);
                } else {
                    continue;
                }
            }

            found_scopes.extend(self.enclosing_scopes(pos));

            if let Some(scope_match) = compare_chains(&scopes_to_find, &found_scopes) {
                let line = self.src.line_of(pos);
                if let Ok(span) = Span::new(pos, pos + text.len() - 1) {
                    matches.push(MatchResult {
                        id: query.id.clone(),
                        span,
                        line,
                        distance: line.abs_diff(query.line_hint),
                        scope_checked: true,
                        scope_match: Some(scope_match),
                        string_literal: self.src.is_string_literal(pos),
                    });
                }
            }
        }

        debug!(id = %query.id, count = matches.len(), "scan-first match complete");
        matches
    }

    /// Expand the occurrence at `pos` to word boundaries and require its
    /// tokens to cover the query's tokens.
    fn is_whole_token_match(&self, pos: usize, text: &str, text_tokens: &[String]) -> bool {
        let bytes = self.src.bytes();

        let mut start = pos;
        while start > 0 && is_word_char(bytes[start - 1] as char, false) {
            start -= 1;
        }
        let mut end = pos + text.len();
        while end < bytes.len() && is_word_char(bytes[end] as char, false) {
            end += 1;
        }

        let found_tokens = tokenize(&String::from_utf8_lossy(&bytes[start..end]));
        // The expanded occurrence may tokenize longer than the query (extra
        // trailing context), but never shorter or different.
        matches!(compare_chains(&found_tokens, text_tokens), Some(d) if d >= 0)
    }

    /// Identifiers of every scope enclosing `pos`, innermost first.
    fn enclosing_scopes(&self, pos: usize) -> SmallVec<[String; 8]> {
        let mut found: SmallVec<[String; 8]> = SmallVec::new();
        let mut search_pos = pos;
        loop {
            let Some(containing) = self.scope_span_at(search_pos) else {
                break;
            };
            let (ids, _) = self.scope_identifiers_at(containing.start);
            found.extend(ids);
            match containing.start.checked_sub(1) {
                Some(prev) => search_pos = prev,
                None => break,
            }
        }
        found
    }

    /// Scan each narrowed span for the query text. Results are exact scope
    /// matches by construction.
    fn find_code(&self, query: &MatchQuery, search_spans: &[Span]) -> Vec<MatchResult> {
        let mut matches = Vec::new();

        for search_span in search_spans {
            let mut start = search_span.start;
            while start <= search_span.end {
                let Some(pos) = self.src.index_of(
                    &query.text,
                    start,
                    Some(search_span.end),
                    Find::in_string_literals(),
                ) else {
                    break;
                };
                let line = self.src.line_of(pos);
                if let Ok(span) = Span::new(pos, pos + query.text.len() - 1) {
                    matches.push(MatchResult {
                        id: query.id.clone(),
                        span,
                        line,
                        distance: line.abs_diff(query.line_hint),
                        scope_checked: true,
                        scope_match: Some(0),
                        string_literal: self.src.is_string_literal(pos),
                    });
                }
                start = pos + query.text.len();
            }
        }

        matches
    }

    /// The definition of a narrowed function scope is the last whole-word
    /// occurrence of its name before the scope's body.
    fn find_function_definition(&self, query: &MatchQuery, search_spans: &[Span]) -> Vec<MatchResult> {
        let mut matches = Vec::new();

        for span in search_spans {
            let Some(pos) = self.src.last_index_of(&query.text, span.start, Find::whole_word())
            else {
                continue;
            };
            let line = self.src.line_of(pos);
            if let Ok(span) = Span::new(pos, pos + query.text.len() - 1) {
                matches.push(MatchResult {
                    id: query.id.clone(),
                    span,
                    line,
                    distance: line.abs_diff(query.line_hint),
                    scope_checked: true,
                    scope_match: Some(0),
                    string_literal: false,
                });
            }
        }

        matches
    }

    /// Resolve the chain `identifiers[depth..]` to concrete scope spans
    /// inside `search_span`, appending each final scope to `out`.
    ///
    /// An identifier proven to own a scope is marked explicit; an
    /// identifier that is nowhere to be found but was never expected to be
    /// explicit (an implicit namespace) is skipped.
    fn find_scope_spans(
        &self,
        identifiers: &mut [ScopeIdentifier],
        depth: usize,
        search_span: Span,
        out: &mut Vec<Span>,
    ) {
        if depth >= identifiers.len() {
            out.push(search_span);
            return;
        }

        let name = identifiers[depth].name.clone();
        let mut search_start = search_span.start;

        loop {
            let Some(pos) =
                self.src
                    .index_of(&name, search_start, Some(search_span.end), Find::whole_word())
            else {
                // Not found anywhere in this span. An implicit scope may
                // simply not be spelled out; try the rest of the chain.
                if !identifiers[depth].explicit {
                    self.find_scope_spans(identifiers, depth + 1, search_span, out);
                }
                return;
            };

            search_start = pos + name.len();

            // The identifier opens a scope only if a `{` comes before the
            // next `;` (a missing `;` counts as the brace coming first).
            let open_curly = self.src.index_of_byte(b'{', pos, None);
            let semicolon = self.src.index_of_byte(b';', pos, None);
            if let Some(open) = open_curly {
                let brace_first = semicolon.is_none_or(|semi| open < semi);
                if brace_first {
                    if let Some(scope_span) = self.scope_span_at(open + 1) {
                        // Resume after this scope so a name repeated in the
                        // chain (constructors) is not matched twice.
                        search_start = scope_span.end;

                        if let Some(depth2) = self.match_scope_owner(identifiers, depth, open) {
                            identifiers[depth].explicit = true;
                            self.find_scope_spans(identifiers, depth2, scope_span, out);
                        }
                    }
                }
            }

            if search_start > search_span.end {
                return;
            }
        }
    }

    /// Check whether the scope opening at `open` is owned by the chain at
    /// `identifiers[depth..]`. Returns the depth just past the owning
    /// identifiers when the names and the owner's kind line up.
    fn match_scope_owner(
        &self,
        identifiers: &[ScopeIdentifier],
        depth: usize,
        open: usize,
    ) -> Option<usize> {
        let (scope_kind, scope_ids) = self.scope_info_at(open);

        // A scope header may chain several names ("namespace A::B"); every
        // one of them must consume the next identifier in our chain.
        let mut depth2 = depth;
        let mut owner: Option<&ScopeIdentifier> = None;
        for scope_id in &scope_ids {
            if depth2 < identifiers.len() && identifiers[depth2].name == *scope_id {
                owner = Some(&identifiers[depth2]);
                depth2 += 1;
            } else {
                return None;
            }
        }

        let owner = owner?;
        (scope_kind == owner.kind || owner.kind == ScopeKind::Unknown).then_some(depth2)
    }

    /// The span of the scope containing `start_index`, braces included.
    /// `None` when the position sits at the top level of the file.
    pub fn scope_span_at(&self, start_index: usize) -> Option<Span> {
        let bytes = self.src.bytes();
        if start_index >= bytes.len() {
            return None;
        }

        // Starting on a close brace would immediately unbalance the walk.
        let mut start_index = start_index;
        if bytes[start_index] == b'}' {
            start_index = start_index.checked_sub(1)?;
        }

        let ignored = self.src.ignored();
        let mut ignored_span = ignored
            .containing_span(start_index)
            .or_else(|| ignored.previous_span(start_index));

        // Backward: the first unmatched `{` opens our scope.
        let mut open: Option<usize> = None;
        let mut level = 0i32;
        let mut i = start_index as isize;
        while i >= 0 {
            let iu = i as usize;
            if let Some(span) = ignored_span.filter(|s| s.contains_pos(iu)) {
                i = span.start as isize - 1;
                ignored_span = ignored.previous_span(span.start);
                continue;
            }
            match bytes[iu] {
                b'}' => level += 1,
                b'{' => {
                    level -= 1;
                    if level < 0 {
                        open = Some(iu);
                        break;
                    }
                }
                _ => {}
            }
            i -= 1;
        }
        let open = open?;

        // Forward: find the brace that closes it.
        let mut ignored_span = ignored.next_span(open);
        let mut level = 0i32;
        let mut i = open;
        while i < bytes.len() {
            if let Some(span) = ignored_span.filter(|s| s.contains_pos(i)) {
                i = span.end + 1;
                ignored_span = ignored.next_span(span.end);
                continue;
            }
            match bytes[i] {
                b'{' => level += 1,
                b'}' => {
                    level -= 1;
                    if level == 0 {
                        return Span::new(open, i).ok();
                    }
                }
                _ => {}
            }
            i += 1;
        }

        None
    }

    /// The header text of the scope opening at or after `start_index`:
    /// everything between the previous `;`, `{`, or `}` and the open brace,
    /// with ignored regions dropped and parenthesized/template/array
    /// content stripped.
    fn scope_header_tokens(&self, start_index: usize) -> Option<Vec<String>> {
        let open_curly = self.src.index_of_byte(b'{', start_index, None)?;
        if open_curly == 0 {
            return None;
        }

        let header_start = [b';', b'}', b'{']
            .into_iter()
            .filter_map(|c| self.src.last_index_of_byte(c, open_curly - 1))
            .max()
            .map_or(0, |p| p + 1);

        let header = self.src.substring(header_start, Some(open_curly - header_start));
        let header = remove_between_keep_delims(&header, '(', ')');
        let header = remove_between(&header, '<', '>');
        let header = remove_between(&header, '[', ']');
        Some(tokenize(&header))
    }

    /// Identifiers of the scope at or after `start_index`, innermost first,
    /// plus whether the scope looks like a function definition. Keyword-only
    /// headers (control blocks) yield no identifiers.
    pub fn scope_identifiers_at(&self, start_index: usize) -> (Vec<String>, bool) {
        let mut identifiers = Vec::new();
        let mut is_function = false;

        let Some(mut tokens) = self.scope_header_tokens(start_index) else {
            return (identifiers, false);
        };

        let mut last_pos = tokens.len() as isize - 1;
        let open_parens = tokens.iter().rposition(|t| t == "(");
        if tokens.iter().any(|t| t == "class") {
            // An inheriting class has a single colon; the name is left of it.
            if let Some(colon) = tokens.iter().rposition(|t| t == ":") {
                last_pos = colon as isize - 1;
            }
        } else if let Some(ns) = tokens.iter().rposition(|t| t == "namespace") {
            // Namespace names always follow the keyword.
            tokens.drain(..=ns);
            last_pos = tokens.len() as isize - 1;
        } else if let Some(op) = open_parens {
            // Parentheses suggest a function; invalidated below if nothing
            // nameable precedes them.
            is_function = true;
            last_pos = op as isize - 1;

            // A constructor's initializer list puts a colon after the
            // parameter list; re-anchor to the parens before the colon.
            if let Some(colon) = tokens.iter().rposition(|t| t == ":") {
                if let Some(op2) = tokens[..colon].iter().rposition(|t| t == "(") {
                    last_pos = op2 as isize - 1;
                }
            }
        }

        if last_pos >= 0 {
            self.collect_chain(&tokens, last_pos as usize, true, |id, ids| ids.push(id), &mut identifiers);
        }

        if identifiers.is_empty() {
            is_function = false;
        }
        (identifiers, is_function)
    }

    /// Classify the scope opening at or after `start_index` and return its
    /// identifiers, outermost first.
    pub fn scope_info_at(&self, start_index: usize) -> (ScopeKind, Vec<String>) {
        let mut identifiers = Vec::new();

        let Some(tokens) = self.scope_header_tokens(start_index) else {
            return (ScopeKind::None, identifiers);
        };
        if tokens.is_empty() {
            return (ScopeKind::None, identifiers);
        }

        let mut last_pos: isize = -1;
        let kind;

        let open_parens = tokens.iter().rposition(|t| t == "(");
        match open_parens {
            Some(op) if op > 0 => {
                last_pos = op as isize - 1;
                if let Some(colon) = tokens.iter().rposition(|t| t == ":") {
                    if let Some(op2) = tokens[..colon].iter().rposition(|t| t == "(") {
                        last_pos = op2 as isize - 1;
                    }
                }

                if last_pos < 0 {
                    kind = ScopeKind::Unknown;
                } else if self.profile.is_keyword(&tokens[last_pos as usize]) {
                    // A keyword directly before the parens: if, for, while...
                    last_pos = -1;
                    kind = ScopeKind::Control;
                } else {
                    kind = ScopeKind::Function;
                }
            }
            _ => {
                if tokens.iter().any(|t| t == "namespace") {
                    kind = ScopeKind::Namespace;
                    last_pos = tokens.len() as isize - 1;
                } else if tokens.iter().any(|t| t == "class") {
                    kind = ScopeKind::Class;
                    last_pos = tokens.len() as isize - 1;
                    if let Some(colon) = tokens.iter().rposition(|t| t == ":") {
                        last_pos = colon as isize - 1;
                    }
                } else if tokens.iter().any(|t| t == "struct") {
                    kind = ScopeKind::Struct;
                    last_pos = tokens.len() as isize - 1;
                } else if open_parens == Some(0) {
                    // Parens with nothing before them: a lambda. Nameless.
                    kind = ScopeKind::Unknown;
                } else if tokens
                    .last()
                    .is_some_and(|t| self.profile.is_keyword(t))
                {
                    // do, else, try...
                    kind = ScopeKind::Control;
                } else {
                    kind = ScopeKind::Unknown;
                }
            }
        }

        if last_pos >= 0 {
            self.collect_chain(&tokens, last_pos as usize, false, |id, ids| ids.insert(0, id), &mut identifiers);
        }

        (kind, identifiers)
    }

    /// Walk tokens right to left from `from`, collecting a `::`/`.`-chained
    /// identifier run. `skip_leading_keywords` keeps scanning past keywords
    /// until the first real name (access specifiers and the like).
    fn collect_chain(
        &self,
        tokens: &[String],
        from: usize,
        skip_leading_keywords: bool,
        push: impl Fn(String, &mut Vec<String>),
        identifiers: &mut Vec<String>,
    ) {
        let mut chained = false;
        for token in tokens[..=from].iter().rev() {
            if is_word(token, true) {
                let accept = if skip_leading_keywords {
                    (identifiers.is_empty() && !self.profile.is_keyword(token)) || chained
                } else {
                    identifiers.is_empty() || chained
                };

                if accept {
                    push(token.clone(), identifiers);
                } else if !identifiers.is_empty() && !chained {
                    break;
                }
                chained = false;
            } else if token == "::" || token == "." {
                chained = true;
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Language;

    fn cpp_engine(text: &str) -> CStyleEngine {
        CStyleEngine::new(text, LanguageProfile::for_language(Language::Cpp).unwrap())
    }

    const NESTED: &str = "namespace N { class C { void M() { int x = 1; } } }";

    #[test]
    fn scope_span_resolution() {
        let engine = cpp_engine(NESTED);
        let text = NESTED;

        // Position of "int x" is inside M's body.
        let x = text.find("int x").unwrap();
        let body = engine.scope_span_at(x).unwrap();
        assert_eq!(text.as_bytes()[body.start], b'{');
        assert_eq!(&text[body.start..=body.end], "{ int x = 1; }");

        // Resolving from the body's open brace yields the same span.
        assert_eq!(engine.scope_span_at(body.start), Some(body));

        // Top level has no scope.
        assert!(engine.scope_span_at(0).is_none());
    }

    #[test]
    fn scope_spans_ignore_braces_in_literals() {
        let engine = cpp_engine("void F() { auto c = '{'; int y = 2; }");
        let pos = engine.source().as_str().find("int y").unwrap();
        let span = engine.scope_span_at(pos).unwrap();
        assert_eq!(span.start, 9);
        assert_eq!(span.end, engine.source().len() - 1);
    }

    #[test]
    fn scope_classification() {
        let engine = cpp_engine(
            "namespace A::B { class C : public Base { void M() { if (x) { } } } struct S { } }",
        );
        let text = engine.source().as_str().to_string();

        let ns_open = text.find('{').unwrap();
        let (kind, ids) = engine.scope_info_at(ns_open);
        assert_eq!(kind, ScopeKind::Namespace);
        assert_eq!(ids, vec!["A", "B"]);

        let class_open = text.find("class").unwrap();
        let (kind, ids) = engine.scope_info_at(class_open);
        assert_eq!(kind, ScopeKind::Class);
        assert_eq!(ids, vec!["C"]);

        let m_open = text.find("void M()").unwrap();
        let (kind, ids) = engine.scope_info_at(m_open);
        assert_eq!(kind, ScopeKind::Function);
        assert_eq!(ids, vec!["M"]);

        let if_open = text.find("if").unwrap();
        let (kind, ids) = engine.scope_info_at(if_open);
        assert_eq!(kind, ScopeKind::Control);
        assert!(ids.is_empty());

        let struct_open = text.find("struct").unwrap();
        let (kind, ids) = engine.scope_info_at(struct_open);
        assert_eq!(kind, ScopeKind::Struct);
        assert_eq!(ids, vec!["S"]);
    }

    #[test]
    fn qualified_method_identifiers() {
        let engine = cpp_engine("void MyClass::Foo() { int a = 0; }");
        let (ids, is_function) = engine.scope_identifiers_at(0);
        assert!(is_function);
        assert_eq!(ids, vec!["Foo", "MyClass"]);
    }

    #[test]
    fn constructor_initializer_list_identifiers() {
        let engine = cpp_engine("MyClass::MyClass() : base_(0), count_(1) { }");
        let (ids, is_function) = engine.scope_identifiers_at(0);
        assert!(is_function);
        assert_eq!(ids, vec!["MyClass", "MyClass"]);
    }

    #[test]
    fn narrower_resolves_single_line_class() {
        let engine = cpp_engine("class MyClass { void Foo() { /*body*/ } }");
        let mut chain = vec![
            ScopeIdentifier::explicit("MyClass", ScopeKind::Class),
            ScopeIdentifier::explicit("Foo", ScopeKind::Function),
        ];
        let whole = Span::new(0, engine.source().len() - 1).unwrap();
        let mut out = Vec::new();
        engine.find_scope_spans(&mut chain, 0, whole, &mut out);

        assert_eq!(out.len(), 1);
        let text = engine.source().as_str();
        assert_eq!(&text[out[0].start..=out[0].end], "{ /*body*/ }");
    }

    #[test]
    fn narrower_skips_implicit_namespace() {
        // The namespace is only "declared" via using-directive, so the
        // implicit identifier must be skippable.
        let engine = cpp_engine("class C { void M() { int x = 1; } };");
        let mut chain = vec![
            ScopeIdentifier::new("NotHere", ScopeKind::Namespace),
            ScopeIdentifier::explicit("C", ScopeKind::Class),
            ScopeIdentifier::explicit("M", ScopeKind::Function),
        ];
        let whole = Span::new(0, engine.source().len() - 1).unwrap();
        let mut out = Vec::new();
        engine.find_scope_spans(&mut chain, 0, whole, &mut out);
        assert_eq!(out.len(), 1);

        // An explicit identifier that is missing resolves nothing.
        let mut chain = vec![
            ScopeIdentifier::explicit("NotHere", ScopeKind::Class),
            ScopeIdentifier::explicit("M", ScopeKind::Function),
        ];
        let mut out = Vec::new();
        engine.find_scope_spans(&mut chain, 0, whole, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn end_to_end_exact_scope_match() {
        let engine = cpp_engine(NESTED);
        let query = MatchQuery::new("int x = 1", 1).with_signature("N::C::M");

        let matches = engine.find_matches_v2(&query);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].scope_match, Some(0));
        assert!(matches[0].scope_checked);

        let matches = engine.find_matches(&query);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].scope_match, Some(0));
    }

    #[test]
    fn v2_grades_partial_signatures() {
        let engine = cpp_engine(NESTED);

        // One scope given, three found.
        let matches = engine.find_matches_v2(&MatchQuery::new("int x = 1", 1).with_signature("M"));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].scope_match, Some(-2));

        // More scopes given than found.
        let matches = engine
            .find_matches_v2(&MatchQuery::new("int x = 1", 1).with_signature("Extra::N::C::M"));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].scope_match, Some(1));

        // Wrong scope: discarded entirely.
        let matches =
            engine.find_matches_v2(&MatchQuery::new("int x = 1", 1).with_signature("N::Other::M"));
        assert!(matches.is_empty());
    }

    #[test]
    fn whole_token_matching_rejects_partial_words() {
        let engine = cpp_engine("void F() { EnableDoSomethingEx(); }\nvoid G() { DoSomething(); }");
        let query = MatchQuery::new("DoSomething", 1).with_whole_tokens(true);
        let matches = engine.find_matches_v2(&query);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line, 2);
    }

    #[test]
    fn function_definition_query() {
        let text = "class Test1 {\n  int AddMore(int n) {\n    return n;\n  }\n};\n";
        let engine = cpp_engine(text);
        let query = MatchQuery::new("AddMore", 2)
            .with_signature("Test1::AddMore")
            .with_type_hint(MatchTypeHint::Function);

        let matches = engine.find_matches_v2(&query);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line, 2);
        assert_eq!(matches[0].scope_match, Some(0));

        let matches = engine.find_matches(&query);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line, 2);

        // A call site is not a definition.
        let engine = cpp_engine("void F() { AddMore(3); }");
        let query = MatchQuery::new("AddMore", 1).with_type_hint(MatchTypeHint::Function);
        assert!(engine.find_matches_v2(&query).is_empty());
    }

    #[test]
    fn enclosing_scope_chain() {
        let engine = cpp_engine(NESTED);
        let pos = engine.source().as_str().find("int x").unwrap();
        assert_eq!(engine.enclosing_scopes(pos).to_vec(), vec!["M", "C", "N"]);
    }
}
