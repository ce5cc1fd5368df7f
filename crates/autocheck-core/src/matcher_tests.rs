use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};

use autocheck_dom::{DomEvent, EventType};

use crate::notify::TriggerResult;

fn selector() -> CheckboxSelector {
    CheckboxSelector::new(MatcherConfig::default())
}

fn checked(document: &Document, selector: &str) -> bool {
    let node = document.query_selector(selector).unwrap().unwrap();
    document.is_checked(node).unwrap()
}

#[test]
fn test_summary_serializes_camel_case() {
    let summary = ScanSummary {
        total_checkboxes: 3,
        selected_count: 1,
        matched_elements: 1,
        error: None,
    };
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "totalCheckboxes": 3,
            "selectedCount": 1,
            "matchedElements": 1,
            "error": null
        })
    );
}

#[test]
fn test_failure_summary_has_zero_counts() {
    let summary = ScanSummary::failure("boom");
    assert!(summary.failed());
    assert_eq!(summary.total_checkboxes, 0);
    assert_eq!(summary.selected_count, 0);
    assert_eq!(summary.matched_elements, 0);
}

#[test]
fn test_invalid_keywords_touch_nothing() {
    let mut document = Document::parse_html(r#"<input type="checkbox" name="all">"#);
    let keywords: [&str; 0] = [];
    let summary = selector().select_checkboxes(&mut document, &keywords);
    assert_eq!(summary.error.as_deref(), Some("No keywords provided"));
    assert!(!checked(&document, "input"));

    let summary = selector().select_checkboxes(&mut document, &["all", " "]);
    assert!(summary.failed());
    assert_eq!(summary.total_checkboxes, 0);
    assert!(!checked(&document, "input"));
}

#[test]
fn test_invalid_descendant_tags_fail_the_scan() {
    let mut document = Document::parse_html(r#"<input type="checkbox" name="all">"#);
    let config = MatcherConfig {
        descendant_tags: vec!["span >".to_string()],
        ..MatcherConfig::default()
    };
    let summary = CheckboxSelector::new(config).select_checkboxes(&mut document, &["all"]);
    assert!(summary.failed());
    assert!(!checked(&document, "input"));
}

#[test]
fn test_report_records_matches() {
    let mut document = Document::parse_html(
        r#"<div><div><input type="checkbox" id="hd"><label for="hd">Sports HD pack</label></div></div>
           <div><div><input type="checkbox" name="kids"><span>Cartoons</span></div></div>
           <div><div><input type="checkbox"><span>Sports extra</span></div></div>"#,
    );
    let report = selector().scan(&mut document, &["sports", "HD", "news"]);

    assert_eq!(report.summary.total_checkboxes, 3);
    assert_eq!(report.summary.selected_count, 2);
    assert_eq!(report.summary.matched_elements, 2);
    assert_eq!(report.matches.len(), 2);

    let first = &report.matches[0];
    assert_eq!(first.index, 0);
    assert_eq!(first.descriptor, "input#hd");
    assert_eq!(first.matched_keywords, ["sports", "HD"]);
    assert!(first.search_text.contains("Sports HD pack"));

    let second = &report.matches[1];
    assert_eq!(second.index, 2);
    assert_eq!(second.descriptor, "checkbox #2");
    assert_eq!(second.matched_keywords, ["sports"]);
}

#[test]
fn test_descriptor_prefers_id_then_name() {
    let document = Document::parse_html(
        r#"<input type="checkbox" id="a b"><input type="checkbox" name="pkg"><input type="checkbox" id="" name="">"#,
    );
    let inputs = document.query_selector_all("input").unwrap();
    assert_eq!(describe(&document, 0, inputs[0]), "input#a\\ b");
    assert_eq!(describe(&document, 1, inputs[1]), "input[name=\"pkg\"]");
    assert_eq!(describe(&document, 2, inputs[2]), "checkbox #2");
}

#[test]
fn test_checkbox_type_is_case_insensitive() {
    let mut document = Document::parse_html(r#"<input type="CheckBox" name="promo">"#);
    let summary = selector().select_checkboxes(&mut document, &["promo"]);
    assert_eq!(summary.total_checkboxes, 1);
    assert_eq!(summary.selected_count, 1);
}

#[test]
fn test_non_checkbox_inputs_ignored() {
    let mut document = Document::parse_html(
        r#"<input type="radio" name="promo"><input type="text" name="promo"><input name="promo">"#,
    );
    let summary = selector().select_checkboxes(&mut document, &["promo"]);
    assert_eq!(summary.total_checkboxes, 0);
    assert_eq!(summary.selected_count, 0);
    assert!(summary.error.is_none());
}

#[test]
fn test_dispatch_can_be_disabled() {
    let mut document = Document::parse_html(r#"<form><input type="checkbox" name="promo"></form>"#);
    let form = document.query_selector("form").unwrap().unwrap();
    let count = Arc::new(AtomicUsize::new(0));
    let listener_count = Arc::clone(&count);
    document
        .add_event_listener(form, EventType::Change, move |_: &DomEvent| {
            listener_count.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    let config = MatcherConfig {
        dispatch_events: false,
        ..MatcherConfig::default()
    };
    let summary = CheckboxSelector::new(config).select_checkboxes(&mut document, &["promo"]);
    assert_eq!(summary.selected_count, 1);
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

struct RecordingTrigger {
    calls: AtomicUsize,
}

impl ChangeTrigger for RecordingTrigger {
    fn trigger_change(&self, document: &Document, checkbox: NodeId) -> TriggerResult {
        assert!(document.is_checked(checkbox)?);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn test_trigger_runs_once_per_selected_checkbox() {
    let mut document = Document::parse_html(
        r#"<input type="checkbox" name="news"><input type="checkbox" name="ads"><input type="checkbox" name="news-weekly">"#,
    );
    let trigger = Arc::new(RecordingTrigger {
        calls: AtomicUsize::new(0),
    });
    let selector = selector().with_change_trigger(trigger.clone());

    let summary = selector.select_checkboxes(&mut document, &["news"]);
    assert_eq!(summary.selected_count, 2);
    assert_eq!(trigger.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_debug_hides_trigger() {
    let selector = selector().with_change_trigger(Arc::new(RecordingTrigger {
        calls: AtomicUsize::new(0),
    }));
    let debug = format!("{:?}", selector);
    assert!(debug.contains("change_trigger: true"));
}
