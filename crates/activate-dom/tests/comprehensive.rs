//! Comprehensive tests for activate-dom
//!
//! Tree construction, selector lookup and event delivery through the
//! public API.

use activate_dom::{listener, Document, Event, EventDispatcher, EventType, NodeId};
use std::cell::Cell;
use std::rc::Rc;

fn counter() -> (Rc<Cell<u32>>, activate_dom::Listener) {
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    (hits, listener(move |_, _| h.set(h.get() + 1)))
}

// ============================================================================
// SELECTORS
// ============================================================================

#[test]
fn test_selector_by_attribute() {
    let mut doc = Document::new();
    let body = doc.body();
    let submit = doc.append_element(body, "input", &[("type", "submit")]);
    let _text = doc.append_element(body, "input", &[("type", "text")]);
    let flagged = doc.append_element(body, "div", &[("data-activate", "")]);

    assert_eq!(doc.query_selector_all("input[type=submit]").unwrap(), vec![submit]);
    assert_eq!(doc.query_selector_all("input[type='submit']").unwrap(), vec![submit]);
    assert_eq!(doc.query_selector_all("[data-activate]").unwrap(), vec![flagged]);
}

#[test]
fn test_selector_type_case_insensitive() {
    let mut doc = Document::new();
    let body = doc.body();
    let span = doc.append_element(body, "SPAN", &[]);

    assert_eq!(doc.query_selector_all("span").unwrap(), vec![span]);
    assert_eq!(doc.query_selector_all("SPAN").unwrap(), vec![span]);
}

#[test]
fn test_selector_descendant_vs_child() {
    let mut doc = Document::new();
    let body = doc.body();
    let nav = doc.append_element(body, "nav", &[]);
    let ul = doc.append_element(nav, "ul", &[]);
    let li = doc.append_element(ul, "li", &[]);

    assert_eq!(doc.query_selector_all("nav li").unwrap(), vec![li]);
    assert!(doc.query_selector_all("nav > li").unwrap().is_empty());
    assert_eq!(doc.query_selector_all("nav > ul > li").unwrap(), vec![li]);
    assert_eq!(doc.query_selector_all("body *").unwrap(), vec![nav, ul, li]);
}

#[test]
fn test_selector_detached_nodes_not_found() {
    let mut doc = Document::new();
    let orphan = doc.create_element("span");
    doc.set_attribute(orphan, "class", "x");

    assert!(doc.query_selector_all(".x").unwrap().is_empty());
}

#[test]
fn test_selector_sibling_combinators_and_pseudo_classes() {
    let mut doc = Document::new();
    let body = doc.body();
    let ul = doc.append_element(body, "ul", &[]);
    let first = doc.append_element(ul, "li", &[("data-x", "alpha")]);
    let second = doc.append_element(ul, "li", &[("class", "x")]);

    assert_eq!(doc.query_selector_all("li + li").unwrap(), vec![second]);
    assert_eq!(doc.query_selector_all("li ~ li").unwrap(), vec![second]);
    assert_eq!(doc.query_selector_all("li:first-child").unwrap(), vec![first]);
    assert_eq!(doc.query_selector_all("li:not(.x)").unwrap(), vec![first]);
    assert_eq!(doc.query_selector_all("[data-x^=a]").unwrap(), vec![first]);
    assert_eq!(doc.query_selector_all("*|li").unwrap(), vec![first, second]);
    assert_eq!(doc.query_selector_all("ul:has(> .x)").unwrap(), vec![ul]);
    assert!(doc.query_selector_all("li::before, li:hover").unwrap().is_empty());
}

#[test]
fn test_selector_document_structure() {
    let doc = Document::new();
    assert_eq!(doc.query_selector(":root").unwrap(), Some(doc.document_element()));
    assert_eq!(doc.query_selector(":root > head + body").unwrap(), Some(doc.body()));
    assert_eq!(doc.query_selector("html > :first-child").unwrap(), Some(doc.head()));
}

#[test]
fn test_selector_tracks_attribute_removal() {
    let mut doc = Document::new();
    let body = doc.body();
    let button = doc.append_element(body, "button", &[("disabled", ""), ("class", "a b")]);

    assert_eq!(doc.query_selector_all("button:disabled").unwrap(), vec![button]);
    assert_eq!(doc.remove_attribute(button, "DISABLED"), Some(String::new()));
    assert_eq!(doc.query_selector_all("button:enabled").unwrap(), vec![button]);
    assert_eq!(doc.remove_attribute(button, "disabled"), None);

    assert_eq!(doc.remove_attribute(button, "class"), Some("a b".to_string()));
    assert!(doc.query_selector_all(".a").unwrap().is_empty());
}

#[test]
fn test_selector_unknown_pseudo_and_namespace_rejected() {
    let doc = Document::new();
    assert_eq!(doc.query_selector_all("li:bogus").unwrap_err().offset, 2);
    assert_eq!(doc.query_selector_all("svg|rect").unwrap_err().offset, 0);
}

#[test]
fn test_selector_invalid_reports_offset() {
    let doc = Document::new();
    let err = doc.query_selector_all("div >> span").unwrap_err();
    assert_eq!(err.offset, 5);
}

// ============================================================================
// LISTENERS AND DISPATCH
// ============================================================================

#[test]
fn test_listener_dedup_through_document() {
    let mut doc = Document::new();
    let body = doc.body();
    let div = doc.append_element(body, "div", &[]);
    let (hits, l) = counter();

    assert!(doc.add_event_listener(div, EventType::Click, l.clone()));
    assert!(!doc.add_event_listener(div, EventType::Click, l.clone()));

    doc.dispatch_event(div, &mut Event::click());
    assert_eq!(hits.get(), 1);

    assert!(doc.remove_event_listener(div, EventType::Click, &l));
    doc.dispatch_event(div, &mut Event::click());
    assert_eq!(hits.get(), 1);
}

#[test]
fn test_listener_on_unknown_node_rejected() {
    let mut doc = Document::new();
    let (_, l) = counter();
    assert!(!doc.add_event_listener(NodeId::NONE, EventType::Click, l));
    assert_eq!(doc.listeners().total(), 0);
}

#[test]
fn test_dispatch_only_matching_type() {
    let mut doc = Document::new();
    let body = doc.body();
    let div = doc.append_element(body, "div", &[]);
    let (hits, l) = counter();
    doc.add_event_listener(div, EventType::KeyUp, l);

    doc.dispatch_event(div, &mut Event::key_down(" "));
    doc.dispatch_event(div, &mut Event::click());
    assert_eq!(hits.get(), 0);

    doc.dispatch_event(div, &mut Event::key_up(" "));
    assert_eq!(hits.get(), 1);
}

#[test]
fn test_detached_node_keeps_listeners() {
    let mut doc = Document::new();
    let body = doc.body();
    let div = doc.append_element(body, "div", &[]);
    let (hits, l) = counter();
    doc.add_event_listener(div, EventType::Click, l);

    assert!(doc.remove_child(body, div));
    assert_eq!(doc.listeners().count_for_node(div), 1);

    doc.dispatch_event(div, &mut Event::click());
    assert_eq!(hits.get(), 1);
}

#[test]
fn test_snapshot_tracks_identity() {
    let mut doc = Document::new();
    let body = doc.body();
    let div = doc.append_element(body, "div", &[]);
    let (_, a) = counter();
    let (_, b) = counter();

    let before = doc.listeners().snapshot(div);
    doc.add_event_listener(div, EventType::Click, a.clone());
    doc.add_event_listener(div, EventType::KeyDown, b.clone());
    assert_eq!(doc.listeners().snapshot(div).len(), 2);

    doc.remove_event_listener(div, EventType::Click, &a);
    doc.remove_event_listener(div, EventType::KeyDown, &b);
    assert_eq!(doc.listeners().snapshot(div), before);
}
