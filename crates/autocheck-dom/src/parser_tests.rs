use super::*;

#[test]
fn test_parse_builds_html_skeleton() {
    let doc = Document::parse_html("<p>hello</p>");
    let html = doc.query_selector("html").unwrap();
    let body = doc.query_selector("body").unwrap();
    let p = doc.query_selector("p").unwrap().unwrap();
    assert!(html.is_some());
    assert!(body.is_some());
    assert_eq!(doc.parent_element(p).unwrap(), body);
    assert_eq!(doc.text_content(p).unwrap(), "hello");
}

#[test]
fn test_parse_keeps_attributes() {
    let doc = Document::parse_html(r#"<input id="a" name="opt" type="checkbox" value="1">"#);
    let input = doc.query_selector("input").unwrap().unwrap();
    let element = doc.element(input).unwrap();
    assert_eq!(element.tag_name(), "input");
    assert_eq!(element.id(), Some("a"));
    assert_eq!(element.attr("name"), Some("opt"));
    assert_eq!(element.attr("value"), Some("1"));
    assert!(element.is_checkbox());
}

#[test]
fn test_checked_attribute_initialises_property() {
    let doc = Document::parse_html(
        r#"<input type="checkbox" id="on" checked><input type="checkbox" id="off">"#,
    );
    let on = doc.query_selector("#on").unwrap().unwrap();
    let off = doc.query_selector("#off").unwrap().unwrap();
    assert!(doc.is_checked(on).unwrap());
    assert!(!doc.is_checked(off).unwrap());
}

#[test]
fn test_adjacent_text_is_merged() {
    let doc = Document::parse_html("<div id=d>one &amp; two</div>");
    let div = doc.query_selector("#d").unwrap().unwrap();
    let node = doc.node(div).unwrap();
    assert_eq!(node.children().len(), 1);
    assert_eq!(doc.text_content(div).unwrap(), "one & two");
}

#[test]
fn test_template_contents_stay_out_of_tree() {
    let doc = Document::parse_html(
        "<div id=wrap><template><span>hidden</span></template>shown</div>",
    );
    let wrap = doc.query_selector("#wrap").unwrap().unwrap();
    assert_eq!(doc.text_content(wrap).unwrap(), "shown");
    assert!(doc.query_selector("span").unwrap().is_none());
}

#[test]
fn test_misnested_markup_is_repaired() {
    let doc = Document::parse_html("<table><tr><td>cell</td></tr><b>loose</b></table>");
    let b = doc.query_selector("b").unwrap().unwrap();
    let table = doc.query_selector("table").unwrap().unwrap();
    // Foster parenting moves the stray <b> in front of the table.
    assert!(!doc.contains(table, b).unwrap());
    assert_eq!(doc.text_content(b).unwrap(), "loose");
}

#[test]
fn test_doctype_and_comments_are_not_elements() {
    let doc = Document::parse_html("<!DOCTYPE html><!-- note --><p>x</p>");
    let root_children = doc.node(doc.root()).unwrap().children().to_vec();
    assert!(matches!(
        doc.node(root_children[0]).unwrap().data(),
        NodeData::Doctype { name } if name == "html"
    ));
    let body = doc.query_selector("body").unwrap().unwrap();
    assert_eq!(doc.text_content(body).unwrap(), "x");
}

#[test]
fn test_checkbox_type_is_not_trimmed() {
    let doc = Document::parse_html(r#"<input id="padded" type=" checkbox"><input id="upper" type="CHECKBOX">"#);
    let padded = doc.query_selector("#padded").unwrap().unwrap();
    let upper = doc.query_selector("#upper").unwrap().unwrap();

    assert!(!doc.element(padded).unwrap().is_checkbox());
    assert!(doc.element(upper).unwrap().is_checkbox());
    assert_eq!(
        doc.query_selector_all(r#"input[type="checkbox"]"#).unwrap(),
        vec![upper]
    );
}
