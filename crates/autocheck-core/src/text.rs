//! Fragment normalization and the deduplicated text aggregate.

use std::collections::HashSet;

/// Normalize one text fragment.
///
/// Trims, collapses whitespace runs to a single space, replaces every
/// character outside `[A-Za-z0-9_]`, whitespace, `-` and `.` with a space,
/// then trims again. Replacement happens after collapsing, so `"a & b"`
/// becomes `"a   b"`.
pub fn normalize_fragment(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let replaced: String = collapsed
        .chars()
        .map(|c| if is_allowed(c) { c } else { ' ' })
        .collect();
    replaced.trim().to_string()
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' || c.is_whitespace()
}

/// Insertion-ordered set of normalized fragments for one checkbox.
#[derive(Debug, Clone, Default)]
pub struct TextAggregate {
    fragments: Vec<String>,
    seen: HashSet<String>,
}

impl TextAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize `raw` and add it unless it is empty or already present.
    /// Returns whether the fragment was added.
    pub fn add(&mut self, raw: &str) -> bool {
        let fragment = normalize_fragment(raw);
        if fragment.is_empty() || self.seen.contains(&fragment) {
            return false;
        }
        self.seen.insert(fragment.clone());
        self.fragments.push(fragment);
        true
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Fragments joined with single spaces, in insertion order.
    pub fn joined(&self) -> String {
        self.fragments.join(" ")
    }
}
