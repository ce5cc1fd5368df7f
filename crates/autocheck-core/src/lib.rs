//! # autocheck Core
//!
//! Keyword-driven checkbox selection.
//!
//! For every unchecked checkbox of a page the matcher gathers a bounded set
//! of text fragments (the checkbox's own attributes, its labels and nearby
//! text elements), normalizes them, and tests the result against a keyword
//! list. Matching checkboxes are checked and host listeners are notified with
//! bubbling `change`, `click` and `input` events.
//!
//! ## Components
//!
//! - [`AssociationResolver`] - labels and nearby text elements of a checkbox
//! - [`TextAggregate`] - normalized, deduplicated fragments
//! - [`KeywordSet`] - validated case-insensitive substring patterns
//! - [`CheckboxSelector`] - one scan over a document, producing a [`ScanSummary`]
//! - [`PageSession`] - per-page context that initializes the selector once
//!
//! A scan never fails past its boundary: invalid input and unexpected faults
//! come back as a zero-count summary carrying an error message.

mod aggregate;
mod config;
mod error;
mod keywords;
mod matcher;
mod notify;
mod resolve;
mod session;
mod text;

pub use aggregate::build_searchable_text;
pub use config::MatcherConfig;
pub use error::ScanError;
pub use keywords::KeywordSet;
pub use matcher::{CheckboxMatch, CheckboxSelector, ScanReport, ScanSummary};
pub use notify::{ChangeTrigger, SELECTION_EVENTS, TriggerResult, notify_observers};
pub use resolve::AssociationResolver;
pub use session::PageSession;
pub use text::{TextAggregate, normalize_fragment};
