//! Label and neighbor resolution.
//!
//! Given one checkbox, the resolver produces the elements whose text is
//! considered tied to it: associated labels and a bounded set of nearby text
//! elements. Text owned by another checkbox's label is never returned.

use std::collections::HashSet;

use autocheck_dom::{Document, DomError, NodeId, Selector, css_escape};

use crate::config::MatcherConfig;

/// Resolves labels and nearby text elements for checkboxes of one document.
pub struct AssociationResolver<'a> {
    document: &'a Document,
    config: &'a MatcherConfig,
    descendant_selector: Option<Selector>,
}

impl<'a> AssociationResolver<'a> {
    /// Build a resolver, parsing the configured descendant tags.
    pub fn new(document: &'a Document, config: &'a MatcherConfig) -> Result<Self, DomError> {
        let descendant_selector = config.descendant_selector()?;
        Ok(Self::with_descendant_selector(document, config, descendant_selector))
    }

    /// Build a resolver from an already parsed descendant selector.
    pub fn with_descendant_selector(
        document: &'a Document,
        config: &'a MatcherConfig,
        descendant_selector: Option<Selector>,
    ) -> Self {
        Self {
            document,
            config,
            descendant_selector,
        }
    }

    /// Labels associated with `checkbox`, first-found order, no duplicates.
    ///
    /// Sources, in order: the `label[for]` naming the checkbox id, the
    /// nearest wrapping label, then every label under the checkbox's parent.
    pub fn labels(&self, checkbox: NodeId) -> Result<Vec<NodeId>, DomError> {
        let doc = self.document;
        let mut candidates = Vec::new();

        if let Some(id) = doc.element(checkbox)?.id().filter(|id| !id.is_empty()) {
            let query = format!("label[for=\"{}\"]", css_escape(id));
            if let Some(label) = doc.query_selector(&query)? {
                candidates.push(label);
            }
        }

        if let Some(wrapping) = doc.closest(checkbox, "label")? {
            candidates.push(wrapping);
        }

        if let Some(parent) = doc.parent_element(checkbox)? {
            candidates.extend(doc.query_selector_all_from(parent, "label")?);
        }

        let mut labels = Vec::with_capacity(candidates.len());
        for label in candidates {
            if labels.contains(&label) || self.is_foreign_label(label, checkbox)? {
                continue;
            }
            labels.push(label);
        }
        Ok(labels)
    }

    /// Nearby text elements of `checkbox`, capped at `max_nearby_elements`.
    ///
    /// Walks the parent, the parent's other children together with up to
    /// `max_descendants_per_sibling` text-bearing descendants of each, then
    /// the parent's own siblings. Discovery order is kept and the walk stops
    /// once the cap is reached.
    pub fn nearby_text_elements(&self, checkbox: NodeId) -> Result<Vec<NodeId>, DomError> {
        let doc = self.document;
        let mut found = Neighborhood::new(self.config.max_nearby_elements);

        let Some(parent) = doc.parent_element(checkbox)? else {
            return Ok(found.into_elements());
        };

        self.offer(&mut found, parent, checkbox)?;

        for sibling in doc.element_children(parent)? {
            if found.is_full() {
                break;
            }
            if sibling == checkbox || found.contains(sibling) {
                continue;
            }
            self.offer(&mut found, sibling, checkbox)?;

            let Some(selector) = &self.descendant_selector else {
                continue;
            };
            let descendants = doc.select_all_from(sibling, selector)?;
            for child in descendants
                .into_iter()
                .take(self.config.max_descendants_per_sibling)
            {
                if found.is_full() {
                    break;
                }
                if !found.contains(child) {
                    self.offer(&mut found, child, checkbox)?;
                }
            }
        }

        if let Some(grandparent) = doc.parent_element(parent)? {
            for sibling in doc.element_children(grandparent)? {
                if found.is_full() {
                    break;
                }
                if sibling != parent && !found.contains(sibling) {
                    self.offer(&mut found, sibling, checkbox)?;
                }
            }
        }

        Ok(found.into_elements())
    }

    /// Non-empty trimmed text strictly shorter than `max_text_length`.
    ///
    /// Length is counted in UTF-16 code units, as browsers report it.
    pub fn is_text_element(&self, id: NodeId) -> Result<bool, DomError> {
        let text = self.document.text_content(id)?;
        let length = text.trim().encode_utf16().count();
        Ok(length > 0 && length < self.config.max_text_length)
    }

    /// Whether `label` belongs exclusively to a checkbox other than `checkbox`.
    ///
    /// A non-empty `for` attribute points at the first element with that id;
    /// the label is foreign only when that element is another checkbox.
    /// Without `for`, the first checkbox inside the label is its control.
    pub fn is_foreign_label(&self, label: NodeId, checkbox: NodeId) -> Result<bool, DomError> {
        let doc = self.document;
        let element = doc.element(label)?;
        if element.tag_name() != "label" {
            return Ok(false);
        }

        if let Some(target) = element.attr("for").filter(|target| !target.is_empty()) {
            let control = doc.query_selector(&format!("#{}", css_escape(target)))?;
            return match control {
                Some(control) if control != checkbox => Ok(doc.element(control)?.is_checkbox()),
                _ => Ok(false),
            };
        }

        for descendant in doc.descendants(label)? {
            if doc.element(descendant)?.is_checkbox() {
                return Ok(descendant != checkbox);
            }
        }
        Ok(false)
    }

    /// Whether `element` is, sits inside, or contains a label foreign to `checkbox`.
    pub fn touches_foreign_label(&self, element: NodeId, checkbox: NodeId) -> Result<bool, DomError> {
        let doc = self.document;

        let mut current = Some(element);
        while let Some(id) = current {
            if self.is_foreign_label(id, checkbox)? {
                return Ok(true);
            }
            current = doc.parent_element(id)?;
        }

        for descendant in doc.descendants(element)? {
            if self.is_foreign_label(descendant, checkbox)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn offer(&self, found: &mut Neighborhood, candidate: NodeId, checkbox: NodeId) -> Result<(), DomError> {
        if self.is_text_element(candidate)? && !self.touches_foreign_label(candidate, checkbox)? {
            found.push(candidate);
        }
        Ok(())
    }
}

/// Bounded, insertion-ordered neighbor collection.
struct Neighborhood {
    elements: Vec<NodeId>,
    visited: HashSet<NodeId>,
    cap: usize,
}

impl Neighborhood {
    fn new(cap: usize) -> Self {
        Self {
            elements: Vec::new(),
            visited: HashSet::new(),
            cap,
        }
    }

    fn contains(&self, id: NodeId) -> bool {
        self.visited.contains(&id)
    }

    fn is_full(&self) -> bool {
        self.elements.len() >= self.cap
    }

    fn push(&mut self, id: NodeId) {
        if !self.is_full() && self.visited.insert(id) {
            self.elements.push(id);
        }
    }

    fn into_elements(self) -> Vec<NodeId> {
        self.elements
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
