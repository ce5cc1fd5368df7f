//! Per-page session that injects the selector at most once.

use std::sync::Arc;

use once_cell::unsync::OnceCell;
use tracing::debug;

use autocheck_dom::Document;

use crate::config::MatcherConfig;
use crate::matcher::{CheckboxSelector, ScanReport, ScanSummary};
use crate::notify::ChangeTrigger;

/// One page plus the selector injected into it.
///
/// The selector is built on first use and reused by every later scan of the
/// same page. Each page gets its own session; nothing is shared across pages.
pub struct PageSession {
    document: Document,
    config: MatcherConfig,
    change_trigger: Option<Arc<dyn ChangeTrigger>>,
    selector: OnceCell<CheckboxSelector>,
}

impl PageSession {
    pub fn new(document: Document, config: MatcherConfig) -> Self {
        Self {
            document,
            config,
            change_trigger: None,
            selector: OnceCell::new(),
        }
    }

    /// Provide the host's change trigger. Has no effect once injected.
    pub fn with_change_trigger(mut self, trigger: Arc<dyn ChangeTrigger>) -> Self {
        self.change_trigger = Some(trigger);
        self
    }

    pub fn is_injected(&self) -> bool {
        self.selector.get().is_some()
    }

    /// The page's selector, created on the first call.
    pub fn inject(&self) -> &CheckboxSelector {
        self.selector
            .get_or_init(|| build_selector(&self.config, self.change_trigger.as_ref()))
    }

    pub fn select_checkboxes<S: AsRef<str>>(&mut self, keywords: &[S]) -> ScanSummary {
        self.scan(keywords).summary
    }

    pub fn scan<S: AsRef<str>>(&mut self, keywords: &[S]) -> ScanReport {
        let selector = self
            .selector
            .get_or_init(|| build_selector(&self.config, self.change_trigger.as_ref()));
        selector.scan(&mut self.document, keywords)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable page access, e.g. to register listeners.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

fn build_selector(config: &MatcherConfig, trigger: Option<&Arc<dyn ChangeTrigger>>) -> CheckboxSelector {
    debug!("Injecting checkbox selector into page");
    let selector = CheckboxSelector::new(config.clone());
    match trigger {
        Some(trigger) => selector.with_change_trigger(Arc::clone(trigger)),
        None => selector,
    }
}
