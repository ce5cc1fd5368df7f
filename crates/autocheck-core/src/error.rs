//! Scan errors.

use thiserror::Error;

use autocheck_dom::DomError;

/// Errors that end a scan or a single checkbox's processing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The keyword list is empty.
    #[error("No keywords provided")]
    NoKeywords,

    /// A keyword is blank after trimming.
    #[error("Keyword at position {index} is empty")]
    EmptyKeyword { index: usize },

    /// Document query or mutation failed.
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    /// The host change trigger reported a failure.
    #[error("Change trigger failed: {0}")]
    Trigger(String),

    /// A host listener or collaborator panicked.
    #[error("Unexpected failure: {0}")]
    Panicked(String),
}
