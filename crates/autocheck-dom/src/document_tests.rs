use super::*;
use crate::event::{DomEvent, EventInit, EventType};
use std::sync::{Arc, Mutex};

fn sample() -> Document {
    Document::parse_html(
        r#"
        <div id="outer">
          <label id="wrap"><input type="checkbox" id="cb"> Wrapped</label>
          <span id="s1">Side <b id="bold">note</b></span>
        </div>
        "#,
    )
}

fn id_of(doc: &Document, selector: &str) -> NodeId {
    doc.query_selector(selector).unwrap().unwrap()
}

#[test]
fn test_parent_and_children() {
    let doc = sample();
    let outer = id_of(&doc, "#outer");
    let wrap = id_of(&doc, "#wrap");
    let cb = id_of(&doc, "#cb");

    assert_eq!(doc.parent_element(cb).unwrap(), Some(wrap));
    assert_eq!(doc.parent_element(wrap).unwrap(), Some(outer));
    let children = doc.element_children(outer).unwrap();
    assert_eq!(children, vec![wrap, id_of(&doc, "#s1")]);
}

#[test]
fn test_parent_element_of_html_is_none() {
    let doc = sample();
    let html = id_of(&doc, "html");
    assert_eq!(doc.parent(html).unwrap(), Some(doc.root()));
    assert_eq!(doc.parent_element(html).unwrap(), None);
}

#[test]
fn test_descendants_in_document_order() {
    let doc = sample();
    let outer = id_of(&doc, "#outer");
    let ids: Vec<_> = doc
        .descendants(outer)
        .unwrap()
        .into_iter()
        .map(|id| doc.element(id).unwrap().id().unwrap_or_default().to_string())
        .collect();
    assert_eq!(ids, vec!["wrap", "cb", "s1", "bold"]);
}

#[test]
fn test_text_content_concatenates_descendants() {
    let doc = sample();
    let s1 = id_of(&doc, "#s1");
    assert_eq!(doc.text_content(s1).unwrap(), "Side note");
}

#[test]
fn test_closest_is_inclusive() {
    let doc = sample();
    let cb = id_of(&doc, "#cb");
    let wrap = id_of(&doc, "#wrap");
    assert_eq!(doc.closest(cb, "label").unwrap(), Some(wrap));
    assert_eq!(doc.closest(wrap, "label").unwrap(), Some(wrap));
    assert_eq!(doc.closest(cb, "table").unwrap(), None);
}

#[test]
fn test_contains() {
    let doc = sample();
    let outer = id_of(&doc, "#outer");
    let bold = id_of(&doc, "#bold");
    assert!(doc.contains(outer, bold).unwrap());
    assert!(doc.contains(bold, bold).unwrap());
    assert!(!doc.contains(bold, outer).unwrap());
}

#[test]
fn test_set_checked_only_on_inputs() {
    let mut doc = sample();
    let cb = id_of(&doc, "#cb");
    let s1 = id_of(&doc, "#s1");

    assert!(!doc.is_checked(cb).unwrap());
    doc.set_checked(cb, true).unwrap();
    assert!(doc.is_checked(cb).unwrap());
    // The attribute is left alone.
    assert_eq!(doc.attribute(cb, "checked").unwrap(), None);

    let err = doc.set_checked(s1, true).unwrap_err();
    assert!(matches!(err, DomError::NotCheckable { .. }));
}

#[test]
fn test_unknown_node_is_an_error() {
    let doc = sample();
    let bogus = NodeId::from_index(doc.node_count() + 10);
    assert_eq!(doc.node(bogus).unwrap_err(), DomError::NodeNotFound(bogus));
    assert!(doc.text_content(bogus).is_err());
    assert!(doc.parent_element(bogus).is_err());
}

#[test]
fn test_text_node_is_not_an_element() {
    let mut doc = Document::new();
    let text = doc.create_text("hi");
    assert_eq!(doc.element(text).unwrap_err(), DomError::NotAnElement(text));
}

#[test]
fn test_builder_api() {
    let mut doc = Document::new();
    let root = doc.root();
    let div = doc.create_element("DIV");
    let input = doc.create_element("input");
    doc.set_attribute(input, "type", "checkbox").unwrap();
    doc.set_attribute(input, "checked", "").unwrap();
    doc.append_child(root, div).unwrap();
    doc.append_child(div, input).unwrap();

    assert_eq!(doc.element(div).unwrap().tag_name(), "div");
    assert!(doc.is_checked(input).unwrap());
    assert_eq!(doc.query_selector_all(r#"input[type="checkbox"]"#).unwrap(), vec![input]);

    // Re-appending moves rather than duplicates.
    doc.append_child(root, input).unwrap();
    assert!(doc.element_children(div).unwrap().is_empty());
    assert_eq!(doc.parent(input).unwrap(), Some(root));
}

#[test]
fn test_dispatch_bubbles_to_ancestors() {
    let mut doc = sample();
    let cb = id_of(&doc, "#cb");
    let outer = id_of(&doc, "#outer");
    let seen: Arc<Mutex<Vec<(EventType, NodeId, NodeId)>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = seen.clone();
    doc.add_event_listener(outer, EventType::Change, move |event: &DomEvent| {
        sink.lock().unwrap().push((event.event_type, event.target, event.current_target));
    })
    .unwrap();
    let sink = seen.clone();
    doc.add_event_listener(cb, EventType::Change, move |event: &DomEvent| {
        sink.lock().unwrap().push((event.event_type, event.target, event.current_target));
    })
    .unwrap();

    let delivered = doc.dispatch_event(cb, EventType::Change, EventInit::default()).unwrap();
    assert_eq!(delivered, 2);
    let seen = seen.lock().unwrap();
    assert_eq!(seen[0], (EventType::Change, cb, cb));
    assert_eq!(seen[1], (EventType::Change, cb, outer));
}

#[test]
fn test_dispatch_without_bubbling_stays_on_target() {
    let mut doc = sample();
    let cb = id_of(&doc, "#cb");
    let outer = id_of(&doc, "#outer");
    let count = Arc::new(Mutex::new(0));
    let sink = count.clone();
    doc.add_event_listener(outer, EventType::Click, move |_: &DomEvent| {
        *sink.lock().unwrap() += 1;
    })
    .unwrap();

    let init = EventInit {
        bubbles: false,
        cancelable: true,
    };
    assert_eq!(doc.dispatch_event(cb, EventType::Click, init).unwrap(), 0);
    assert_eq!(doc.dispatch_event(cb, EventType::Click, EventInit::default()).unwrap(), 1);
    // Other event types are filtered.
    assert_eq!(doc.dispatch_event(cb, EventType::Input, EventInit::default()).unwrap(), 0);
    assert_eq!(*count.lock().unwrap(), 1);
}
