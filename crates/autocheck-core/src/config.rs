//! Matcher configuration.

use serde::{Deserialize, Serialize};

use autocheck_dom::{DomError, Selector};

/// Limits and switches of the text-association heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Cap on nearby text elements per checkbox.
    #[serde(default = "default_max_nearby_elements")]
    pub max_nearby_elements: usize,

    /// Text elements must be strictly shorter than this many characters.
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    /// Descendants inspected per sibling of the checkbox.
    #[serde(default = "default_max_descendants_per_sibling")]
    pub max_descendants_per_sibling: usize,

    /// Tags considered text-bearing when walking a sibling's descendants.
    #[serde(default = "default_descendant_tags")]
    pub descendant_tags: Vec<String>,

    /// Dispatch `change`/`click`/`input` after selecting a checkbox.
    #[serde(default = "default_dispatch_events")]
    pub dispatch_events: bool,
}

fn default_max_nearby_elements() -> usize {
    20
}

fn default_max_text_length() -> usize {
    500
}

fn default_max_descendants_per_sibling() -> usize {
    10
}

fn default_descendant_tags() -> Vec<String> {
    ["span", "div", "p", "td", "th", "li"]
        .iter()
        .map(|tag| tag.to_string())
        .collect()
}

fn default_dispatch_events() -> bool {
    true
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_nearby_elements: default_max_nearby_elements(),
            max_text_length: default_max_text_length(),
            max_descendants_per_sibling: default_max_descendants_per_sibling(),
            descendant_tags: default_descendant_tags(),
            dispatch_events: default_dispatch_events(),
        }
    }
}

impl MatcherConfig {
    /// Selector list built from `descendant_tags`, `None` when the list is empty.
    pub fn descendant_selector(&self) -> Result<Option<Selector>, DomError> {
        if self.descendant_tags.is_empty() {
            return Ok(None);
        }
        Selector::parse(&self.descendant_tags.join(", ")).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatcherConfig::default();
        assert_eq!(config.max_nearby_elements, 20);
        assert_eq!(config.max_text_length, 500);
        assert_eq!(config.max_descendants_per_sibling, 10);
        assert_eq!(config.descendant_tags.len(), 6);
        assert!(config.dispatch_events);
    }

    #[test]
    fn test_descendant_selector() {
        let config = MatcherConfig::default();
        assert!(config.descendant_selector().unwrap().is_some());

        let empty = MatcherConfig {
            descendant_tags: Vec::new(),
            ..MatcherConfig::default()
        };
        assert!(empty.descendant_selector().unwrap().is_none());

        let broken = MatcherConfig {
            descendant_tags: vec!["span".to_string(), "div >".to_string()],
            ..MatcherConfig::default()
        };
        assert!(broken.descendant_selector().is_err());
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let config: MatcherConfig = serde_json::from_str(r#"{"max_nearby_elements": 5}"#).unwrap();
        assert_eq!(config.max_nearby_elements, 5);
        assert_eq!(config.max_text_length, 500);
    }
}
