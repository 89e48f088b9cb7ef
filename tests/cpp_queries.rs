//! End-to-end C++ matching through the public `Matcher` API.

use refind::{MatchQuery, MatchTypeHint, Matcher, best_match};

const ADDER: &str = r#"#include "adder.h"

namespace Calc {

class Adder {
public:
    Adder() : total_(0) {
        reset();
    }

    ~Adder() {
        total_ = 0;
    }

    int Add(int value) {
        total_ += value; // accumulate
        return total_;
    }

    int Total() {
        return total_;
    }

private:
    int total_;
};

} // namespace Calc
"#;

fn adder() -> Matcher {
    Matcher::from_path("adder.cpp", ADDER)
}

#[test]
fn exact_scope_chain_match() {
    let query = MatchQuery::new("total_ += value;", 16).with_signature("Calc::Adder::Add");

    let matches = adder().find_matches_v2(&query);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].line, 16);
    assert_eq!(matches[0].distance, 0);
    assert_eq!(matches[0].scope_match, Some(0));

    // The scope-first strategy agrees.
    let matches = adder().find_matches(&query);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].line, 16);
    assert_eq!(matches[0].scope_match, Some(0));
}

#[test]
fn constructor_scope_is_narrowed() {
    let query = MatchQuery::new("reset();", 8).with_signature("Calc::Adder::Adder");
    let matches = adder().find_matches(&query);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].line, 8);
    assert_eq!(matches[0].scope_match, Some(0));
}

#[test]
fn destructor_signature_resolves() {
    let query = MatchQuery::new("total_ = 0;", 12).with_signature("Calc::Adder::{dtor}");
    let matches = adder().find_matches(&query);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].line, 12);

    let matches = adder().find_matches_v2(&query);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].line, 12);
    assert_eq!(matches[0].scope_match, Some(0));
}

#[test]
fn signature_disambiguates_identical_lines() {
    // "return total_;" appears in both Add and Total.
    let query = MatchQuery::new("return total_;", 21).with_signature("Calc::Adder::Total");
    let matches = adder().find_matches_v2(&query);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].line, 21);
    assert_eq!(matches[0].scope_match, Some(0));
}

#[test]
fn unsigned_query_falls_back_to_line_distance() {
    let query = MatchQuery::new("return total_;", 17);
    let matches = adder().find_matches_v2(&query);
    assert_eq!(matches.len(), 2);

    // Both carry the same scope deficit; the hint decides.
    assert_eq!(matches[0].scope_match, Some(-3));
    assert_eq!(matches[1].scope_match, Some(-3));
    let best = best_match(&matches, 50, false).unwrap();
    assert_eq!(best.line, 17);
}

#[test]
fn function_definition_is_found_not_its_callers() {
    let query = MatchQuery::new("Add", 15)
        .with_signature("Calc::Adder::Add")
        .with_type_hint(MatchTypeHint::Function);

    let matches = adder().find_matches_v2(&query);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].line, 15);
    assert_eq!(matches[0].scope_match, Some(0));

    let matches = adder().find_matches(&query);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].line, 15);
}

#[test]
fn commented_text_is_invisible() {
    let matches = adder().find_matches_v2(&MatchQuery::new("accumulate", 16));
    assert!(matches.is_empty());
}

#[test]
fn char_literal_braces_do_not_break_scopes() {
    let source = r#"namespace Lex {

wchar_t CloseFor(wchar_t open) {
    if (open == L'{') {
        return L'}';
    }
    return L'\0';
}

}
"#;
    let matcher = Matcher::from_path("lex.cpp", source);

    let matches =
        matcher.find_matches_v2(&MatchQuery::new("return L'}';", 5).with_signature("Lex::CloseFor"));
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].line, 5);
    assert_eq!(matches[0].scope_match, Some(0));

    let matches =
        matcher.find_matches_v2(&MatchQuery::new(r"return L'\0';", 7).with_signature("Lex::CloseFor"));
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].line, 7);
    assert_eq!(matches[0].scope_match, Some(0));
}

#[test]
fn wrong_scope_discards_the_occurrence() {
    let query = MatchQuery::new("total_ += value;", 16).with_signature("Calc::Other::Add");
    assert!(adder().find_matches_v2(&query).is_empty());
}

#[test]
fn decorated_catch_signature_still_matches() {
    let source = r#"namespace App {

class Worker {
    void Run() {
        try {
            step();
        } catch (...) {
            recover();
        }
    }
};

}
"#;
    let matcher = Matcher::from_path("worker.cpp", source);

    // The debugger reports the catch funclet, not the method itself.
    let query = MatchQuery::new("recover();", 8).with_signature("`App::Worker::Run'::`1'::catch$0");
    let matches = matcher.find_matches_v2(&query);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].line, 8);
    assert_eq!(matches[0].scope_match, Some(0));
}
