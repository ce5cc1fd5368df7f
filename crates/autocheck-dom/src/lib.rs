//! # autocheck DOM
//!
//! A small, mutable HTML document model for the checkbox matcher.
//!
//! The tree is an arena of nodes addressed by [`NodeId`]. Pages are parsed
//! with `html5ever`, so malformed markup is repaired exactly the way a
//! browser would repair it before any query runs.
//!
//! ## Capabilities
//!
//! - Element queries through a selector subset (type, `*`, `#id`, `.class`,
//!   `[attr]`, `[attr="value"]`, comma lists)
//! - [`css_escape`] for building attribute selectors from arbitrary identifiers
//! - Structural traversal (parents, children, descendants, `closest`)
//! - The `checked` property of inputs, the only state the matcher mutates
//! - Bubbling event dispatch to registered [`EventListener`]s

mod document;
mod error;
mod event;
mod node;
mod parser;
mod selector;

pub use document::Document;
pub use error::DomError;
pub use event::{DomEvent, EventInit, EventListener, EventType};
pub use node::{ElementData, Node, NodeData, NodeId};
pub use selector::{Selector, css_escape};
