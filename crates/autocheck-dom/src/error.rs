//! DOM errors.

use thiserror::Error;

use crate::node::NodeId;

/// Errors raised by document queries and mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The id does not address a node of this document.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// The node exists but is not an element.
    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    /// Only `<input>` elements carry a checked state.
    #[error("Element <{tag}> has no checked state")]
    NotCheckable { tag: String },

    /// The selector is malformed or uses unsupported syntax.
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}
