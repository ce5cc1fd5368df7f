//! Checkbox selection: one synchronous pass over a document.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use autocheck_dom::{Document, NodeId, Selector, css_escape};

use crate::aggregate::build_searchable_text;
use crate::config::MatcherConfig;
use crate::error::ScanError;
use crate::keywords::KeywordSet;
use crate::notify::{ChangeTrigger, notify_observers, panic_message};
use crate::resolve::AssociationResolver;

/// Result of one scan as handed to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub total_checkboxes: usize,
    pub selected_count: usize,
    pub matched_elements: usize,
    pub error: Option<String>,
}

impl ScanSummary {
    /// Zero-count summary carrying `error`.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Diagnostic record of one selected checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckboxMatch {
    /// Position among the page's checkboxes.
    pub index: usize,
    #[serde(skip)]
    pub node: NodeId,
    /// Short selector-like description, e.g. `input#sub`.
    pub descriptor: String,
    pub search_text: String,
    pub matched_keywords: Vec<String>,
}

/// Summary plus the per-checkbox match records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub summary: ScanSummary,
    pub matches: Vec<CheckboxMatch>,
}

impl ScanReport {
    fn failure(error: impl Into<String>) -> Self {
        Self {
            summary: ScanSummary::failure(error),
            matches: Vec::new(),
        }
    }
}

/// Selects every unchecked checkbox whose associated text contains a keyword.
#[derive(Clone)]
pub struct CheckboxSelector {
    config: MatcherConfig,
    change_trigger: Option<Arc<dyn ChangeTrigger>>,
}

impl CheckboxSelector {
    pub fn new(config: MatcherConfig) -> Self {
        Self {
            config,
            change_trigger: None,
        }
    }

    /// Attach a host change trigger, invoked after the synthetic events.
    pub fn with_change_trigger(mut self, trigger: Arc<dyn ChangeTrigger>) -> Self {
        self.change_trigger = Some(trigger);
        self
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Run one scan and return only the summary.
    pub fn select_checkboxes<S: AsRef<str>>(&self, document: &mut Document, keywords: &[S]) -> ScanSummary {
        self.scan(document, keywords).summary
    }

    /// Run one scan.
    ///
    /// Never fails: invalid keywords and unexpected faults, including panics
    /// escaping a host listener, produce a zero-count summary with `error` set.
    pub fn scan<S: AsRef<str>>(&self, document: &mut Document, keywords: &[S]) -> ScanReport {
        let outcome = catch_unwind(AssertUnwindSafe(|| self.try_scan(document, keywords)));
        match outcome {
            Ok(Ok(report)) => report,
            Ok(Err(e)) => {
                error!(error = %e, "Error in checkbox selection");
                ScanReport::failure(e.to_string())
            }
            Err(payload) => {
                let e = ScanError::Panicked(panic_message(payload.as_ref()));
                error!(error = %e, "Checkbox selection aborted");
                ScanReport::failure(e.to_string())
            }
        }
    }

    fn try_scan<S: AsRef<str>>(&self, document: &mut Document, keywords: &[S]) -> Result<ScanReport, ScanError> {
        let keywords = KeywordSet::new(keywords)?;
        let descendant_selector = self.config.descendant_selector()?;
        let checkboxes = document.query_selector_all("input[type=\"checkbox\"]")?;
        info!(
            checkboxes = checkboxes.len(),
            keywords = keywords.len(),
            "Starting checkbox selection"
        );

        let mut matches = Vec::new();
        for (index, &checkbox) in checkboxes.iter().enumerate() {
            let outcome = self.process_checkbox(
                document,
                &keywords,
                descendant_selector.as_ref(),
                index,
                checkbox,
            );
            match outcome {
                Ok(Some(selected)) => matches.push(selected),
                Ok(None) => {}
                Err(e) => warn!(index, error = %e, "Error processing checkbox"),
            }
        }

        let summary = ScanSummary {
            total_checkboxes: checkboxes.len(),
            selected_count: matches.len(),
            matched_elements: matches.len(),
            error: None,
        };
        info!(
            selected = summary.selected_count,
            total = summary.total_checkboxes,
            "Checkbox selection complete"
        );
        Ok(ScanReport { summary, matches })
    }

    /// Evaluate one checkbox; `Ok(Some(_))` when it was selected.
    fn process_checkbox(
        &self,
        document: &mut Document,
        keywords: &KeywordSet,
        descendant_selector: Option<&Selector>,
        index: usize,
        checkbox: NodeId,
    ) -> Result<Option<CheckboxMatch>, ScanError> {
        if document.is_checked(checkbox)? {
            return Ok(None);
        }

        let search_text = {
            let resolver = AssociationResolver::with_descendant_selector(
                document,
                &self.config,
                descendant_selector.cloned(),
            );
            build_searchable_text(document, &resolver, checkbox).joined()
        };
        if search_text.is_empty() {
            return Ok(None);
        }

        let matched_keywords = keywords.find_matches(&search_text);
        if matched_keywords.is_empty() {
            return Ok(None);
        }

        document.set_checked(checkbox, true)?;
        let descriptor = describe(document, index, checkbox);
        debug!(
            checkbox = %descriptor,
            keywords = ?matched_keywords,
            "Selected checkbox"
        );

        if let Err(e) = notify_observers(
            document,
            checkbox,
            self.config.dispatch_events,
            self.change_trigger.as_deref(),
        ) {
            warn!(checkbox = %descriptor, error = %e, "Error triggering checkbox events");
        }

        Ok(Some(CheckboxMatch {
            index,
            node: checkbox,
            descriptor,
            search_text,
            matched_keywords,
        }))
    }
}

impl std::fmt::Debug for CheckboxSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckboxSelector")
            .field("config", &self.config)
            .field("change_trigger", &self.change_trigger.is_some())
            .finish()
    }
}

/// `input#id`, `input[name="..."]`, or the checkbox's position.
fn describe(document: &Document, index: usize, checkbox: NodeId) -> String {
    let Ok(element) = document.element(checkbox) else {
        return format!("checkbox #{index}");
    };
    if let Some(id) = element.id().filter(|id| !id.is_empty()) {
        return format!("input#{}", css_escape(id));
    }
    if let Some(name) = element.attr("name").filter(|name| !name.is_empty()) {
        return format!("input[name=\"{}\"]", css_escape(name));
    }
    format!("checkbox #{index}")
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
