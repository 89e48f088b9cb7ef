//! End-to-end C# matching, including compiler-generated signature forms.

use refind::{MatchQuery, Matcher, best_match};

const INVOICE: &str = r#"using System;

namespace Billing
{
    public class Invoice
    {
        private int total;

        public Invoice()
        {
            total = 0;
        }

        public void AddLine(int amount)
        {
            total += amount;
            Log("added line");
        }

        public IEnumerable<int> Enumerate()
        {
            yield return total;
        }
    }
}
"#;

fn invoice() -> Matcher {
    Matcher::from_path("Invoice.cs", INVOICE)
}

#[test]
fn dotted_signature_resolves_scope_chain() {
    let query = MatchQuery::new("total += amount;", 16).with_signature("Billing.Invoice.AddLine");

    let matches = invoice().find_matches_v2(&query);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].line, 16);
    assert_eq!(matches[0].scope_match, Some(0));

    let matches = invoice().find_matches(&query);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].line, 16);
}

#[test]
fn constructor_signature_maps_to_class_name() {
    let query = MatchQuery::new("total = 0;", 11).with_signature("Billing.Invoice..ctor");
    let matches = invoice().find_matches(&query);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].line, 11);
    assert_eq!(matches[0].scope_match, Some(0));
}

#[test]
fn iterator_state_machine_signature() {
    // The runtime reports the compiler-generated MoveNext, not Enumerate.
    let query = MatchQuery::new("yield return total;", 22)
        .with_signature("Billing.Invoice+_Enumerate_d__4.MoveNext");
    let matches = invoice().find_matches_v2(&query);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].line, 22);
    assert_eq!(matches[0].scope_match, Some(0));
}

#[test]
fn bare_brace_without_signature_scans_plainly() {
    let matches = invoice().find_matches_v2(&MatchQuery::new("{", 10));
    assert!(matches.len() > 1);
    assert!(matches.iter().all(|m| !m.scope_checked));
}

#[test]
fn string_literal_occurrence_is_flagged() {
    let matches = invoice().find_matches_v2(&MatchQuery::new("added line", 17));
    assert_eq!(matches.len(), 1);
    assert!(matches[0].string_literal);
    assert_eq!(matches[0].line, 17);

    let best = best_match(&matches, 50, true).unwrap();
    assert!(best.string_literal);
}

#[test]
fn malformed_iterator_signature_degrades_to_plain_scan() {
    let query = MatchQuery::new("total = 0;", 11).with_signature("_Enumerate_d__4.MoveNext");
    let matches = invoice().find_matches(&query);
    assert_eq!(matches.len(), 1);
    assert!(!matches[0].scope_checked);
}
