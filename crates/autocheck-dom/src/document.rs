//! Document: arena storage, traversal, queries and mutation.

use std::fmt;

use html5ever::{LocalName, Namespace, QualName};

use crate::error::DomError;
use crate::event::ListenerEntry;
use crate::node::{ElementData, Node, NodeData, NodeId};
use crate::selector::Selector;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// A mutable document tree.
pub struct Document {
    pub(crate) nodes: Vec<Node>,
    pub(crate) listeners: Vec<ListenerEntry>,
}

impl Document {
    /// Create an empty document containing only the document node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
            listeners: Vec::new(),
        }
    }

    /// The document node.
    pub fn root(&self) -> NodeId {
        NodeId::from_index(0)
    }

    /// Number of nodes in the arena, detached ones included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.nodes.get(id.index()).ok_or(DomError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.nodes.get_mut(id.index()).ok_or(DomError::NodeNotFound(id))
    }

    /// Look up an element.
    pub fn element(&self, id: NodeId) -> Result<&ElementData, DomError> {
        self.node(id)?.as_element().ok_or(DomError::NotAnElement(id))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        match &mut self.node_mut(id)?.data {
            NodeData::Element(element) => Ok(element),
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    /// Whether `id` addresses an element of this document.
    pub fn is_element(&self, id: NodeId) -> bool {
        self.node(id).is_ok_and(|node| node.as_element().is_some())
    }

    /// Attribute of an element.
    pub fn attribute(&self, id: NodeId, name: &str) -> Result<Option<&str>, DomError> {
        Ok(self.element(id)?.attr(name))
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// Parent node of any kind.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, DomError> {
        Ok(self.node(id)?.parent)
    }

    /// Parent node when it is an element (`parentElement`).
    pub fn parent_element(&self, id: NodeId) -> Result<Option<NodeId>, DomError> {
        Ok(self.parent(id)?.filter(|parent| self.is_element(*parent)))
    }

    /// Element children in document order (`children`).
    pub fn element_children(&self, id: NodeId) -> Result<Vec<NodeId>, DomError> {
        Ok(self
            .node(id)?
            .children
            .iter()
            .copied()
            .filter(|child| self.is_element(*child))
            .collect())
    }

    /// Element descendants of `id` in document order, `id` itself excluded.
    pub fn descendants(&self, id: NodeId) -> Result<Vec<NodeId>, DomError> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(id)?.children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            let node = self.node(current)?;
            if node.as_element().is_some() {
                out.push(current);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        Ok(out)
    }

    /// Whether `node` is `ancestor` or one of its descendants (`Node.contains`).
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> Result<bool, DomError> {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return Ok(true);
            }
            current = self.parent(id)?;
        }
        Ok(false)
    }

    /// Concatenated text of all descendant text nodes (`textContent`).
    pub fn text_content(&self, id: NodeId) -> Result<String, DomError> {
        let mut text = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node(current)?;
            if let NodeData::Text(content) = &node.data {
                text.push_str(content);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        Ok(text)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// First element in the document matching `selector`.
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, DomError> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    /// All elements in the document matching `selector`, in document order.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        self.query_selector_all_from(self.root(), selector)
    }

    /// All descendants of `scope` matching `selector`, in document order.
    pub fn query_selector_all_from(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>, DomError> {
        let selector: Selector = selector.parse()?;
        self.select_all_from(scope, &selector)
    }

    /// Like [`query_selector_all_from`](Self::query_selector_all_from) with a
    /// pre-parsed selector, for callers that run the same query repeatedly.
    pub fn select_all_from(&self, scope: NodeId, selector: &Selector) -> Result<Vec<NodeId>, DomError> {
        let mut matches = Vec::new();
        for id in self.descendants(scope)? {
            if selector.matches(self.element(id)?) {
                matches.push(id);
            }
        }
        Ok(matches)
    }

    /// Whether the element `id` matches `selector`.
    pub fn matches(&self, id: NodeId, selector: &str) -> Result<bool, DomError> {
        let selector: Selector = selector.parse()?;
        Ok(selector.matches(self.element(id)?))
    }

    /// Nearest inclusive ancestor element matching `selector` (`closest`).
    pub fn closest(&self, id: NodeId, selector: &str) -> Result<Option<NodeId>, DomError> {
        let selector: Selector = selector.parse()?;
        let mut current = Some(id);
        while let Some(candidate) = current {
            if let Some(element) = self.node(candidate)?.as_element() {
                if selector.matches(element) {
                    return Ok(Some(candidate));
                }
            }
            current = self.parent(candidate)?;
        }
        Ok(None)
    }

    // ------------------------------------------------------------------
    // Checked state
    // ------------------------------------------------------------------

    /// Current `checked` property of an `<input>`.
    pub fn is_checked(&self, id: NodeId) -> Result<bool, DomError> {
        let element = self.element(id)?;
        if element.tag_name() != "input" {
            return Err(DomError::NotCheckable {
                tag: element.tag_name().to_string(),
            });
        }
        Ok(element.checked)
    }

    /// Set the `checked` property of an `<input>`. Attributes are untouched.
    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> Result<(), DomError> {
        let element = self.element_mut(id)?;
        if element.tag_name() != "input" {
            return Err(DomError::NotCheckable {
                tag: element.tag_name().to_string(),
            });
        }
        element.checked = checked;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    pub(crate) fn push_node(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(Node::new(data));
        NodeId::from_index(self.nodes.len() - 1)
    }

    /// Create a detached HTML element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let name = QualName::new(
            None,
            Namespace::from(HTML_NAMESPACE),
            LocalName::from(tag.to_ascii_lowercase().as_str()),
        );
        self.push_node(NodeData::Element(ElementData::new(name, Vec::new())))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push_node(NodeData::Text(text.to_string()))
    }

    /// Set an attribute. Setting `checked` also checks the element, which
    /// mirrors a freshly parsed `checked` attribute.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let element = self.element_mut(id)?;
        element.set_attr(name, value);
        if name == "checked" {
            element.checked = true;
        }
        Ok(())
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.node(parent)?;
        self.detach(child)?;
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Insert `child` right before `sibling` under the sibling's parent.
    pub(crate) fn insert_before(&mut self, sibling: NodeId, child: NodeId) -> Result<(), DomError> {
        let Some(parent) = self.parent(sibling)? else {
            return Ok(());
        };
        self.detach(child)?;
        let position = self.child_position(parent, sibling)?;
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.insert(position, child);
        Ok(())
    }

    /// Remove a node from its parent. Detached nodes stay in the arena.
    pub(crate) fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
        let Some(parent) = self.node_mut(id)?.parent.take() else {
            return Ok(());
        };
        self.node_mut(parent)?.children.retain(|child| *child != id);
        Ok(())
    }

    fn child_position(&self, parent: NodeId, child: NodeId) -> Result<usize, DomError> {
        self.node(parent)?
            .children
            .iter()
            .position(|c| *c == child)
            .ok_or(DomError::NodeNotFound(child))
    }

    /// Append text to `parent`, merging with a trailing text node.
    pub(crate) fn append_text(&mut self, parent: NodeId, text: &str) -> Result<(), DomError> {
        if let Some(last) = self.node(parent)?.children.last().copied() {
            if let NodeData::Text(existing) = &mut self.node_mut(last)?.data {
                existing.push_str(text);
                return Ok(());
            }
        }
        let node = self.create_text(text);
        self.append_child(parent, node)
    }

    /// Insert text before `sibling`, merging with a preceding text node.
    pub(crate) fn insert_text_before(&mut self, sibling: NodeId, text: &str) -> Result<(), DomError> {
        let Some(parent) = self.parent(sibling)? else {
            return Ok(());
        };
        let position = self.child_position(parent, sibling)?;
        if position > 0 {
            let previous = self.node(parent)?.children[position - 1];
            if let NodeData::Text(existing) = &mut self.node_mut(previous)?.data {
                existing.push_str(text);
                return Ok(());
            }
        }
        let node = self.create_text(text);
        self.insert_before(sibling, node)
    }

    pub(crate) fn add_missing_attrs(
        &mut self,
        id: NodeId,
        attrs: Vec<(String, String)>,
    ) -> Result<(), DomError> {
        let element = self.element_mut(id)?;
        for (name, value) in attrs {
            if element.attr(&name).is_none() {
                element.attrs.push((name, value));
            }
        }
        Ok(())
    }

    pub(crate) fn reparent_children(&mut self, from: NodeId, to: NodeId) -> Result<(), DomError> {
        let children = std::mem::take(&mut self.node_mut(from)?.children);
        for child in &children {
            self.node_mut(*child)?.parent = Some(to);
        }
        self.node_mut(to)?.children.extend(children);
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
