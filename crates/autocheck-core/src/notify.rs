//! Observer notification after a checkbox is selected.

use std::error::Error;
use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::trace;

use autocheck_dom::{Document, EventInit, EventType, NodeId};

use crate::error::ScanError;

/// Events dispatched on a newly selected checkbox, in dispatch order.
pub const SELECTION_EVENTS: [EventType; 3] = [EventType::Change, EventType::Click, EventType::Input];

pub type TriggerResult = Result<(), Box<dyn Error + Send + Sync>>;

/// Optional host collaborator that has its own change mechanism.
///
/// Invoked after the synthetic events, only for checkboxes it reports to
/// handle.
pub trait ChangeTrigger: Send + Sync {
    /// Capability check for one checkbox.
    fn handles(&self, _document: &Document, _checkbox: NodeId) -> bool {
        true
    }

    fn trigger_change(&self, document: &Document, checkbox: NodeId) -> TriggerResult;
}

/// Notify observers of `checkbox`.
///
/// With `dispatch_events` set, `change`, `click` and `input` are dispatched
/// in that order, each bubbling and cancelable. The trigger runs afterwards.
/// The first failure stops the remaining steps; a panicking listener or
/// trigger is reported as [`ScanError::Panicked`]. Returns the number of
/// listener invocations.
pub fn notify_observers(
    document: &Document,
    checkbox: NodeId,
    dispatch_events: bool,
    trigger: Option<&dyn ChangeTrigger>,
) -> Result<usize, ScanError> {
    let outcome = catch_unwind(AssertUnwindSafe(|| -> Result<usize, ScanError> {
        let mut delivered = 0;
        if dispatch_events {
            for event_type in SELECTION_EVENTS {
                delivered += document.dispatch_event(checkbox, event_type, EventInit::default())?;
            }
        }

        if let Some(trigger) = trigger.filter(|t| t.handles(document, checkbox)) {
            trigger
                .trigger_change(document, checkbox)
                .map_err(|e| ScanError::Trigger(e.to_string()))?;
            trace!(checkbox = %checkbox, "Change trigger invoked");
        }

        Ok(delivered)
    }));

    match outcome {
        Ok(result) => result,
        Err(payload) => Err(ScanError::Panicked(panic_message(payload.as_ref()))),
    }
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
