//! Searchable text aggregation for one checkbox.

use tracing::warn;

use autocheck_dom::{Document, NodeId};

use crate::resolve::AssociationResolver;
use crate::text::TextAggregate;

/// Checkbox attributes read into the aggregate, in insertion order.
const TEXT_ATTRIBUTES: [&str; 6] = ["id", "name", "value", "title", "data-label", "aria-label"];

/// Collect the normalized text fragments tied to `checkbox`.
///
/// Attribute values come first, then the text of every resolved label, then
/// the text of every nearby element. A failure while resolving labels or
/// neighbors is logged and contributes nothing.
pub fn build_searchable_text(
    document: &Document,
    resolver: &AssociationResolver<'_>,
    checkbox: NodeId,
) -> TextAggregate {
    let mut aggregate = TextAggregate::new();

    match document.element(checkbox) {
        Ok(element) => {
            for name in TEXT_ATTRIBUTES {
                if let Some(value) = element.attr(name) {
                    aggregate.add(value);
                }
            }
        }
        Err(e) => {
            warn!(checkbox = %checkbox, error = %e, "Checkbox attributes unavailable");
            return aggregate;
        }
    }

    match resolver.labels(checkbox) {
        Ok(labels) => add_text_of(document, &mut aggregate, &labels),
        Err(e) => warn!(checkbox = %checkbox, error = %e, "Error finding associated labels"),
    }

    match resolver.nearby_text_elements(checkbox) {
        Ok(neighbors) => add_text_of(document, &mut aggregate, &neighbors),
        Err(e) => warn!(checkbox = %checkbox, error = %e, "Error finding nearby text elements"),
    }

    aggregate
}

fn add_text_of(document: &Document, aggregate: &mut TextAggregate, elements: &[NodeId]) {
    for &element in elements {
        match document.text_content(element) {
            Ok(text) => {
                aggregate.add(&text);
            }
            Err(e) => warn!(element = %element, error = %e, "Text content unavailable"),
        }
    }
}
