//! Synthetic events: listener registration and bubbling dispatch.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::document::Document;
use crate::error::DomError;
use crate::node::NodeId;

/// Event kinds the matcher dispatches after selecting a checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Change,
    Click,
    Input,
}

impl EventType {
    /// DOM event name.
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Change => "change",
            EventType::Click => "click",
            EventType::Input => "input",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dispatch options (`EventInit`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventInit {
    pub bubbles: bool,
    pub cancelable: bool,
}

impl Default for EventInit {
    fn default() -> Self {
        Self {
            bubbles: true,
            cancelable: true,
        }
    }
}

/// Event as seen by one listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub event_type: EventType,
    /// Node the event was dispatched on.
    pub target: NodeId,
    /// Node whose listener is being invoked.
    pub current_target: NodeId,
    pub bubbles: bool,
    pub cancelable: bool,
}

/// Host-page observer of dispatched events.
pub trait EventListener: Send + Sync {
    fn handle_event(&self, event: &DomEvent);
}

impl<F> EventListener for F
where
    F: Fn(&DomEvent) + Send + Sync,
{
    fn handle_event(&self, event: &DomEvent) {
        self(event)
    }
}

pub(crate) struct ListenerEntry {
    node: NodeId,
    event_type: EventType,
    listener: Arc<dyn EventListener>,
}

impl Document {
    /// Register `listener` for `event_type` events reaching `node`.
    pub fn add_event_listener<L>(
        &mut self,
        node: NodeId,
        event_type: EventType,
        listener: L,
    ) -> Result<(), DomError>
    where
        L: EventListener + 'static,
    {
        self.node(node)?;
        self.listeners.push(ListenerEntry {
            node,
            event_type,
            listener: Arc::new(listener),
        });
        Ok(())
    }

    /// Dispatch an event on `target`.
    ///
    /// Listeners on the target run first; when `init.bubbles` is set the event
    /// then travels through every ancestor up to the document node. Returns the
    /// number of listener invocations.
    pub fn dispatch_event(
        &self,
        target: NodeId,
        event_type: EventType,
        init: EventInit,
    ) -> Result<usize, DomError> {
        let mut path = vec![target];
        if init.bubbles {
            let mut current = self.parent(target)?;
            while let Some(ancestor) = current {
                path.push(ancestor);
                current = self.parent(ancestor)?;
            }
        } else {
            self.node(target)?;
        }

        let mut delivered = 0;
        for current_target in path {
            let event = DomEvent {
                event_type,
                target,
                current_target,
                bubbles: init.bubbles,
                cancelable: init.cancelable,
            };
            for entry in self
                .listeners
                .iter()
                .filter(|entry| entry.node == current_target && entry.event_type == event_type)
            {
                entry.listener.handle_event(&event);
                delivered += 1;
            }
        }

        trace!(%target, event = %event_type, delivered, "Dispatched event");
        Ok(delivered)
    }
}
