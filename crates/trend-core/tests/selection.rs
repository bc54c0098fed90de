// File: crates/trend-core/tests/selection.rs
// Purpose: Soft-cap selection policies: reject vs warn-and-accept.

use trend_core::selection::{CapPolicy, Selection};

#[test]
fn toggle_below_cap_is_silent() {
    let mut sel = Selection::new(5, CapPolicy::Reject);
    assert!(sel.toggle("Smith").is_none());
    assert!(sel.toggle("Wilson").is_none());
    assert!(sel.contains("Smith"));
    assert_eq!(sel.len(), 2);

    // Toggling off always works
    assert!(sel.toggle("Smith").is_none());
    assert!(!sel.contains("Smith"));
}

#[test]
fn reject_policy_keeps_prior_selection() {
    let mut sel = Selection::from_ids(["a", "b", "c"], 3, CapPolicy::Reject);
    let warning = sel.toggle("d").expect("cap warning");
    assert!(!warning.applied);
    assert_eq!(warning.cap, 3);
    assert_eq!(sel.len(), 3);
    assert!(!sel.contains("d"));
}

#[test]
fn warn_and_accept_policy_applies_anyway() {
    let mut sel = Selection::from_ids(["a", "b", "c"], 3, CapPolicy::WarnAndAccept);
    let warning = sel.toggle("d").expect("cap warning");
    assert!(warning.applied);
    assert_eq!(sel.len(), 4);
    assert!(sel.contains("d"));
    assert!(warning.message().contains('3'));
}

#[test]
fn replace_accepts_any_size_under_cap() {
    let mut sel = Selection::new(5, CapPolicy::Reject);
    assert!(sel.replace(&[]).is_none());
    assert!(sel.is_empty());

    assert!(sel.replace(&["a", "b"]).is_none());
    assert_eq!(sel.ids(), &["a".to_owned(), "b".to_owned()]);
}

#[test]
fn replace_over_cap_goes_through_policy() {
    let mut rejecting = Selection::from_ids(["a"], 2, CapPolicy::Reject);
    let warning = rejecting.replace(&["x", "y", "z"]).expect("cap warning");
    assert!(!warning.applied);
    assert_eq!(rejecting.ids(), &["a".to_owned()]);

    let mut accepting = Selection::from_ids(["a"], 2, CapPolicy::WarnAndAccept);
    let warning = accepting.replace(&["x", "y", "z"]).expect("cap warning");
    assert!(warning.applied);
    assert_eq!(accepting.len(), 3);
}

#[test]
fn reset_to_default_replaces_wholesale() {
    let mut sel = Selection::from_ids(["x"], 5, CapPolicy::WarnAndAccept);
    sel.reset_to(&["Smith", "Blackwood", "Wilson"]);
    assert_eq!(sel.len(), 3);
    assert!(sel.contains("Blackwood"));
}
