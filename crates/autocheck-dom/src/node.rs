//! Node types: NodeId, Node, NodeData, ElementData.

use std::fmt;

use html5ever::QualName;

/// Index of a node inside its [`Document`](crate::Document) arena.
///
/// Ids are only meaningful for the document that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Build an id from a raw arena index.
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Raw arena index. Document order for parsed pages follows creation order
    /// only loosely, so never sort by it.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One node of the tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data,
        }
    }

    /// Parent node, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Node payload.
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// Element payload, if this node is an element.
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum NodeData {
    Document,
    /// Detached container, used for `<template>` contents.
    Fragment,
    Doctype { name: String },
    Element(ElementData),
    Text(String),
    Comment(String),
    ProcessingInstruction { target: String, data: String },
}

/// Element name, attributes and the `checked` property.
#[derive(Debug, Clone)]
pub struct ElementData {
    pub(crate) name: QualName,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) checked: bool,
    pub(crate) template_contents: Option<NodeId>,
}

impl ElementData {
    pub(crate) fn new(name: QualName, attrs: Vec<(String, String)>) -> Self {
        let checked = attrs.iter().any(|(attr, _)| attr == "checked");
        Self {
            name,
            attrs,
            checked,
            template_contents: None,
        }
    }

    /// Lowercase local tag name.
    pub fn tag_name(&self) -> &str {
        &self.name.local
    }

    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_str())
    }

    /// All attributes in source order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// The `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Whether the whitespace-separated `class` attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }

    /// Current `checked` property (not the attribute).
    pub fn checked(&self) -> bool {
        self.checked
    }

    /// `<input type="checkbox">`, with the type compared ASCII-case-insensitively.
    pub fn is_checkbox(&self) -> bool {
        self.tag_name() == "input"
            && self
                .attr("type")
                .is_some_and(|t| t.eq_ignore_ascii_case("checkbox"))
    }

    pub(crate) fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(attr, _)| attr == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }
}
