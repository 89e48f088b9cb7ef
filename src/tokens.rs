//! Identifier-aware tokenization of C-family code fragments.
//!
//! A token is either a "word" (identifier or keyword) or a single punctuation
//! character, with `::` coalesced into one token. Words are ASCII
//! alphanumerics plus underscore; they may not start with a digit and may
//! start with a tilde (C++ destructors).

/// True if `c` can appear in a word at the given position.
pub fn is_word_char(c: char, first: bool) -> bool {
    if first && c.is_ascii_digit() {
        return false;
    }
    if first && c == '~' {
        return true;
    }
    c.is_ascii_alphanumeric() || c == '_'
}

/// True if `s` is a word. `fast` checks only the first character.
pub fn is_word(s: &str, fast: bool) -> bool {
    let mut chars = s.chars();
    let Some(c0) = chars.next() else {
        return false;
    };
    if !is_word_char(c0, true) {
        return false;
    }
    fast || chars.all(|c| is_word_char(c, false))
}

/// Break `text` into word and punctuation tokens. Whitespace separates
/// tokens and is never returned.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut word = String::new();

    for c in text.chars() {
        if is_word_char(c, word.is_empty()) {
            word.push(c);
            continue;
        }

        if !word.is_empty() {
            tokens.push(std::mem::take(&mut word));
        }

        if c.is_whitespace() {
            continue;
        }

        match tokens.last_mut() {
            // Coalesce the pair into a single "::" token.
            Some(last) if c == ':' && last == ":" => *last = "::".to_string(),
            _ => tokens.push(c.to_string()),
        }
    }

    if !word.is_empty() {
        tokens.push(word);
    }

    tokens
}

/// Remove every region delimited by `open`/`close`, the delimiters included,
/// honoring nesting. If either delimiter is absent the input is returned
/// unchanged.
pub fn remove_between(s: &str, open: char, close: char) -> String {
    if !s.contains(open) || !s.contains(close) {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut level = 0usize;
    for c in s.chars() {
        if c == open {
            level += 1;
        } else if c == close {
            level = level.saturating_sub(1);
        } else if level == 0 {
            out.push(c);
        }
    }
    out
}

/// Like `remove_between`, but keeps the delimiter characters themselves.
pub fn remove_between_keep_delims(s: &str, open: char, close: char) -> String {
    if !s.contains(open) || !s.contains(close) {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut level = 0usize;
    for c in s.chars() {
        if c == open {
            if level == 0 {
                out.push(c);
            }
            level += 1;
        } else if c == close {
            level = level.saturating_sub(1);
            if level == 0 {
                out.push(c);
            }
        } else if level == 0 {
            out.push(c);
        }
    }
    out
}

/// Compare two chains element-wise from index 0.
///
/// Returns `None` if any shared index differs; otherwise the surplus of
/// `requested` over `found` (positive when `requested` is longer, negative
/// when `found` is).
pub fn compare_chains<T: PartialEq>(requested: &[T], found: &[T]) -> Option<i32> {
    let shared = requested.len().min(found.len());
    if requested[..shared] != found[..shared] {
        return None;
    }
    Some(requested.len() as i32 - found.len() as i32)
}
