//! HTML parsing: an `html5ever` tree sink writing into the document arena.

use std::borrow::Cow;

use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute, ExpandedName, LocalName, Namespace, ParseOpts, QualName, parse_document};
use tracing::{debug, trace};

use crate::document::Document;
use crate::node::{ElementData, NodeData, NodeId};

impl Document {
    /// Parse a complete HTML document.
    ///
    /// Parsing never fails: the HTML5 algorithm repairs malformed markup and
    /// parse errors are only traced.
    pub fn parse_html(html: &str) -> Self {
        let sink = DocumentSink::new();
        let document = parse_document(sink, ParseOpts::default()).one(html);
        debug!(nodes = document.node_count(), "Parsed HTML document");
        document
    }
}

struct DocumentSink {
    document: Document,
    /// Returned by `elem_name` for non-element handles, which the tree
    /// builder never asks about.
    placeholder: QualName,
    errors: usize,
}

impl DocumentSink {
    fn new() -> Self {
        Self {
            document: Document::new(),
            placeholder: QualName::new(None, Namespace::from(""), LocalName::from("")),
            errors: 0,
        }
    }

    fn log_failure(result: Result<(), crate::DomError>) {
        if let Err(e) = result {
            trace!(error = %e, "Tree builder operation on a missing node");
        }
    }
}

fn convert_attrs(attrs: Vec<Attribute>) -> Vec<(String, String)> {
    attrs
        .into_iter()
        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
        .collect()
}

impl TreeSink for DocumentSink {
    type Handle = NodeId;
    type Output = Document;

    fn finish(self) -> Self::Output {
        if self.errors > 0 {
            debug!(errors = self.errors, "HTML parse recovered from errors");
        }
        self.document
    }

    fn parse_error(&mut self, msg: Cow<'static, str>) {
        self.errors += 1;
        trace!(%msg, "HTML parse error");
    }

    fn get_document(&mut self) -> Self::Handle {
        self.document.root()
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> ExpandedName<'a> {
        match self.document.node(*target).ok().and_then(|node| node.as_element()) {
            Some(element) => element.name.expanded(),
            None => self.placeholder.expanded(),
        }
    }

    fn create_element(
        &mut self,
        name: QualName,
        attrs: Vec<Attribute>,
        flags: ElementFlags,
    ) -> Self::Handle {
        let mut element = ElementData::new(name, convert_attrs(attrs));
        if flags.template {
            element.template_contents = Some(self.document.push_node(NodeData::Fragment));
        }
        self.document.push_node(NodeData::Element(element))
    }

    fn create_comment(&mut self, text: StrTendril) -> Self::Handle {
        self.document.push_node(NodeData::Comment(text.to_string()))
    }

    fn create_pi(&mut self, target: StrTendril, data: StrTendril) -> Self::Handle {
        self.document.push_node(NodeData::ProcessingInstruction {
            target: target.to_string(),
            data: data.to_string(),
        })
    }

    fn append(&mut self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let result = match child {
            NodeOrText::AppendNode(node) => self.document.append_child(*parent, node),
            NodeOrText::AppendText(text) => self.document.append_text(*parent, &text),
        };
        Self::log_failure(result);
    }

    fn append_based_on_parent_node(
        &mut self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let has_parent = self
            .document
            .parent(*element)
            .is_ok_and(|parent| parent.is_some());
        if has_parent {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &mut self,
        name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        let doctype = self.document.push_node(NodeData::Doctype {
            name: name.to_string(),
        });
        let root = self.document.root();
        Self::log_failure(self.document.append_child(root, doctype));
    }

    fn get_template_contents(&mut self, target: &Self::Handle) -> Self::Handle {
        self.document
            .node(*target)
            .ok()
            .and_then(|node| node.as_element())
            .and_then(|element| element.template_contents)
            .unwrap_or(*target)
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x == y
    }

    fn set_quirks_mode(&mut self, mode: QuirksMode) {
        trace!(?mode, "Quirks mode");
    }

    fn append_before_sibling(&mut self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let result = match new_node {
            NodeOrText::AppendNode(node) => self.document.insert_before(*sibling, node),
            NodeOrText::AppendText(text) => self.document.insert_text_before(*sibling, &text),
        };
        Self::log_failure(result);
    }

    fn add_attrs_if_missing(&mut self, target: &Self::Handle, attrs: Vec<Attribute>) {
        Self::log_failure(self.document.add_missing_attrs(*target, convert_attrs(attrs)));
    }

    fn remove_from_parent(&mut self, target: &Self::Handle) {
        Self::log_failure(self.document.detach(*target));
    }

    fn reparent_children(&mut self, node: &Self::Handle, new_parent: &Self::Handle) {
        Self::log_failure(self.document.reparent_children(*node, *new_parent));
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
